use chrono::{NaiveDate, NaiveDateTime};
use kmedia::{
    entity::{
        Entity,
        column::Column,
        model::{Model, Touch},
    },
    models::{catalog, ckeditor_asset, file_asset, file_type, language, roles_user, server, user},
};

fn at(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 3, 14)
        .and_then(|e| e.and_hms_opt(hour, 0, 0))
        .expect("valid date")
}

mod lecture_note {
    use chrono::NaiveDateTime;
    use kmedia::DatabaseModel;

    #[derive(DatabaseModel, Debug, Clone, Default)]
    #[kmedia(table = "lecture_notes")]
    pub struct LectureNote {
        #[kmedia(primary_key)]
        pub lecture_id: i32,
        #[kmedia(primary_key, column = "lang")]
        pub language: String,
        #[kmedia(default)]
        pub body: Option<String>,
        pub created_at: NaiveDateTime,

        #[kmedia(skip)]
        pub cached_words: usize,
    }
}

mod tag {
    use kmedia::DatabaseModel;

    /// Table name taken from the struct name.
    #[derive(DatabaseModel, Debug, Clone, Default)]
    pub struct Tag {
        #[kmedia(primary_key, default)]
        pub id: i32,
        pub name: String,
    }
}

#[test]
fn test_table_constants() {
    assert_eq!(catalog::Entity::TABLE_NAME, "catalogs");
    assert_eq!(
        catalog::Entity::COLUMN_NAMES,
        [
            "id",
            "name",
            "parent_id",
            "created_at",
            "updated_at",
            "catorder",
            "secure",
            "visible",
            "open",
            "label",
            "selected_catalog",
            "user_id",
            "books_catalog",
        ]
    );
    assert_eq!(
        catalog::Entity::COLUMNS_WITH_DEFAULT,
        ["id", "name", "catorder", "secure", "visible", "open"]
    );
    assert_eq!(
        catalog::Entity::COLUMNS_WITHOUT_DEFAULT,
        [
            "parent_id",
            "created_at",
            "updated_at",
            "label",
            "selected_catalog",
            "user_id",
            "books_catalog",
        ]
    );
    assert_eq!(catalog::Entity::PRIMARY_KEY_COLUMNS, ["id"]);
}

#[test]
fn test_unusual_keys() {
    assert_eq!(server::Entity::PRIMARY_KEY_COLUMNS, ["id"]);
    assert_eq!(server::Entity::COLUMN_NAMES.last(), Some(&"id"));
    assert_eq!(server::Entity::COLUMNS_WITH_DEFAULT, ["servername", "id"]);

    assert_eq!(file_type::Entity::PRIMARY_KEY_COLUMNS, ["name"]);
    assert_eq!(file_type::Entity::COLUMNS_WITH_DEFAULT, ["name"]);

    assert_eq!(
        roles_user::Entity::PRIMARY_KEY_COLUMNS,
        ["role_id", "user_id"]
    );
    assert!(roles_user::Entity::COLUMNS_WITH_DEFAULT.is_empty());

    let membership = roles_user::RolesUser {
        role_id: 2,
        user_id: 9,
        ..Default::default()
    };
    assert_eq!(membership.primary_key(), (2, 9));
}

#[test]
fn test_renamed_column() {
    assert_eq!(ckeditor_asset::columns::Kind::NAME, "type");
    assert!(ckeditor_asset::Entity::COLUMN_NAMES.contains(&"type"));
    assert!(!ckeditor_asset::Entity::COLUMN_NAMES.contains(&"kind"));

    let mut asset = ckeditor_asset::CkeditorAsset::default();
    ckeditor_asset::columns::Kind::set(&mut asset, Some("Ckeditor::Picture".to_string()));
    assert_eq!(asset.kind.as_deref(), Some("Ckeditor::Picture"));
    assert_eq!(
        ckeditor_asset::columns::Kind::get(&asset).as_deref(),
        Some("Ckeditor::Picture")
    );
}

#[test]
fn test_derive_outside_models() {
    use lecture_note::{Entity as Notes, LectureNote, columns};

    assert_eq!(Notes::TABLE_NAME, "lecture_notes");
    assert_eq!(Notes::COLUMN_NAMES, ["lecture_id", "lang", "body", "created_at"]);
    assert_eq!(Notes::PRIMARY_KEY_COLUMNS, ["lecture_id", "lang"]);
    assert_eq!(columns::Language::full_column_name().to_string(), "\"lecture_notes\".\"lang\"");

    let note = LectureNote {
        lecture_id: 4,
        language: "heb".to_string(),
        cached_words: 120,
        ..Default::default()
    };
    assert_eq!(note.primary_key(), (4, "heb".to_string()));
    assert!(note.non_zero_defaults().is_empty());

    assert_eq!(tag::Entity::TABLE_NAME, "tag");
    assert_eq!(<tag::Tag as Model>::Entity::COLUMNS_WITHOUT_DEFAULT, ["name"]);
}

#[test]
fn test_non_zero_defaults() {
    let mut catalog = catalog::Catalog::default();
    assert!(catalog.non_zero_defaults().is_empty());

    catalog.id = 12;
    catalog.secure = 1;
    catalog.visible = Some(false);
    catalog.label = Some("lessons".to_string());
    assert_eq!(catalog.non_zero_defaults(), ["id", "secure", "visible"]);

    let file = file_asset::FileAsset {
        server_name_id: Some("FILES-1".to_string()),
        clicks: Some(0),
        ..Default::default()
    };
    assert_eq!(file.non_zero_defaults(), ["server_name_id", "clicks"]);
}

#[test]
fn test_timestamps_on_insert() {
    let mut user = user::User::default();
    user.touch_timestamps(at(10), Touch::Insert);
    assert_eq!(user.created_at, Some(at(10)));
    assert_eq!(user.updated_at, Some(at(10)));

    let mut user = user::User {
        created_at: Some(at(8)),
        updated_at: Some(at(9)),
        ..Default::default()
    };
    user.touch_timestamps(at(10), Touch::Insert);
    assert_eq!(user.created_at, Some(at(8)));
    assert_eq!(user.updated_at, Some(at(9)));
}

#[test]
fn test_timestamps_on_update_and_upsert() {
    let mut user = user::User {
        created_at: Some(at(8)),
        updated_at: Some(at(9)),
        ..Default::default()
    };
    user.touch_timestamps(at(10), Touch::Update);
    assert_eq!(user.created_at, Some(at(8)));
    assert_eq!(user.updated_at, Some(at(10)));

    let mut user = user::User::default();
    user.touch_timestamps(at(11), Touch::Upsert);
    assert_eq!(user.created_at, Some(at(11)));
    assert_eq!(user.updated_at, Some(at(11)));

    let mut asset = ckeditor_asset::CkeditorAsset::default();
    asset.touch_timestamps(at(12), Touch::Upsert);
    assert_eq!(asset.created_at, at(12));
    assert_eq!(asset.updated_at, at(12));
}

#[test]
fn test_tables_without_timestamps() {
    let mut language = language::Language {
        code3: Some("ENG".to_string()),
        ..Default::default()
    };
    language.touch_timestamps(at(10), Touch::Insert);
    assert_eq!(language.code3.as_deref(), Some("ENG"));

    let mut server = server::Server::default();
    server.touch_timestamps(at(10), Touch::Update);
    assert!(server.created.is_none());
    assert!(server.updated.is_none());
}
