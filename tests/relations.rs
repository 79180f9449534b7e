use kmedia::{
    models::{catalog, container, file_asset, label, language, server, user},
    prelude::*,
};

fn container(id: i32) -> container::Container {
    container::Container {
        id,
        lang_id: Some("heb".to_string()),
        user_id: Some(3),
        censor_id: None,
        ..Default::default()
    }
}

#[test]
fn test_belongs_to_accessors() {
    let container = container(1);

    assert!(
        container
            .lang()
            .query()
            .ends_with("FROM \"languages\" WHERE (\"languages\".\"code3\" = $1)")
    );
    assert!(
        container
            .user()
            .query()
            .ends_with("FROM \"users\" WHERE (\"users\".\"id\" = $1)")
    );
    assert!(
        container
            .censor()
            .query()
            .ends_with("FROM \"users\" WHERE (FALSE)")
    );
}

#[test]
fn test_string_keys() {
    let file = file_asset::FileAsset {
        id: 9,
        asset_type_id: Some("video".to_string()),
        server_name_id: Some("FILES".to_string()),
        ..Default::default()
    };

    assert!(
        file.asset_type()
            .query()
            .ends_with("FROM \"file_types\" WHERE (\"file_types\".\"name\" = $1)")
    );
    assert!(
        file.server_name()
            .query()
            .ends_with("FROM \"servers\" WHERE (\"servers\".\"servername\" = $1)")
    );

    let server = server::Server {
        servername: "FILES".to_string(),
        id: 2,
        ..Default::default()
    };
    assert!(
        server
            .file_assets()
            .query()
            .ends_with("FROM \"file_assets\" WHERE (\"file_assets\".\"server_name_id\" = $1)")
    );
}

#[test]
fn test_has_many_accessors() {
    let user = user::User {
        id: 3,
        ..Default::default()
    };

    assert!(
        user.containers()
            .query()
            .ends_with("FROM \"containers\" WHERE (\"containers\".\"user_id\" = $1)")
    );
    assert!(
        user.censor_containers()
            .query()
            .ends_with("FROM \"containers\" WHERE (\"containers\".\"censor_id\" = $1)")
    );

    let language = language::Language {
        id: 1,
        code3: None,
        ..Default::default()
    };
    assert!(
        language
            .containers()
            .query()
            .ends_with("FROM \"containers\" WHERE (FALSE)")
    );
}

#[test]
fn test_self_reference() {
    let catalog = catalog::Catalog {
        id: 4,
        parent_id: Some(1),
        ..Default::default()
    };

    assert!(
        catalog
            .parent()
            .query()
            .ends_with("FROM \"catalogs\" WHERE (\"catalogs\".\"id\" = $1)")
    );
    assert!(
        catalog
            .child_catalogs()
            .query()
            .ends_with("FROM \"catalogs\" WHERE (\"catalogs\".\"parent_id\" = $1)")
    );
}

#[test]
fn test_many_to_many_accessors() {
    let container = container(7);

    assert!(container.labels().query().ends_with(
        "FROM \"labels\" INNER JOIN \"containers_labels\" ON \"containers_labels\".\"label_id\" \
         = \"labels\".\"id\" WHERE (\"containers_labels\".\"container_id\" = $1)"
    ));

    let label = label::Label {
        id: 2,
        ..Default::default()
    };
    assert!(label.containers().query().ends_with(
        "FROM \"containers\" INNER JOIN \"containers_labels\" ON \
         \"containers_labels\".\"container_id\" = \"containers\".\"id\" WHERE \
         (\"containers_labels\".\"label_id\" = $1)"
    ));
}

#[test]
fn test_accessors_compose_with_filters() {
    let query = container(1)
        .file_assets()
        .filter(file_asset::columns::LangId::eq(Some("eng".to_string())))
        .order_by::<file_asset::columns::Name>(Order::Asc)
        .limit(10)
        .query();

    assert!(query.ends_with(
        "FROM \"file_assets\" INNER JOIN \"containers_file_assets\" ON \
         \"containers_file_assets\".\"file_asset_id\" = \"file_assets\".\"id\" WHERE \
         (\"containers_file_assets\".\"container_id\" = $1) AND \
         (\"file_assets\".\"lang_id\" = $2) ORDER BY \"file_assets\".\"name\" ASC LIMIT 10"
    ));
}
