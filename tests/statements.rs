use kmedia::{
    Error,
    models::{file_type, language, roles_user},
    query::statement::{build_insert, build_update, build_upsert},
};

#[test]
fn test_insert_leaves_defaults_to_the_database() {
    let statement = build_insert::<language::Entity>(&[], &[]);

    assert_eq!(
        statement.sql,
        "INSERT INTO \"languages\" (\"locale\",\"code3\",\"language\") VALUES ($1,$2,$3) \
         RETURNING \"id\""
    );
    assert_eq!(statement.value_columns, ["locale", "code3", "language"]);
    assert_eq!(statement.return_columns, ["id"]);
}

#[test]
fn test_insert_with_explicit_key() {
    let statement = build_insert::<language::Entity>(&[], &["id"]);

    assert_eq!(
        statement.sql,
        "INSERT INTO \"languages\" (\"id\",\"locale\",\"code3\",\"language\") VALUES \
         ($1,$2,$3,$4)"
    );
    assert!(statement.return_columns.is_empty());
}

#[test]
fn test_insert_with_whitelist() {
    let statement = build_insert::<language::Entity>(&["code3"], &[]);

    assert_eq!(
        statement.sql,
        "INSERT INTO \"languages\" (\"code3\") VALUES ($1) RETURNING \"id\""
    );
}

#[test]
fn test_insert_only_defaults() {
    let statement = build_insert::<file_type::Entity>(&[], &[]);

    assert_eq!(statement.value_columns, ["extlist", "pic"]);
    assert_eq!(statement.return_columns, ["name"]);

    let statement = build_insert::<roles_user::Entity>(&[], &[]);
    assert_eq!(
        statement.sql,
        "INSERT INTO \"roles_users\" (\"role_id\",\"user_id\") VALUES ($1,$2)"
    );
}

#[test]
fn test_update() {
    let statement = build_update::<language::Entity>(&[]).expect("update statement");

    assert_eq!(
        statement.sql,
        "UPDATE \"languages\" SET \"locale\"=$1,\"code3\"=$2,\"language\"=$3 WHERE \"id\"=$4"
    );
    assert_eq!(
        statement.bind_columns,
        ["locale", "code3", "language", "id"]
    );
}

#[test]
fn test_update_composite_key() {
    assert!(matches!(
        build_update::<roles_user::Entity>(&[]),
        Err(Error::EmptyWhitelist {
            table: "roles_users"
        })
    ));

    let statement = build_update::<roles_user::Entity>(&["user_id"]).expect("update statement");
    assert_eq!(
        statement.sql,
        "UPDATE \"roles_users\" SET \"user_id\"=$1 WHERE \"role_id\"=$2 AND \"user_id\"=$3"
    );
    assert_eq!(statement.bind_columns, ["user_id", "role_id", "user_id"]);
}

#[test]
fn test_upsert() {
    let statement =
        build_upsert::<language::Entity>(true, &[], &[], &[], &[]).expect("upsert statement");

    assert_eq!(
        statement.sql,
        "INSERT INTO \"languages\" (\"locale\", \"code3\", \"language\") VALUES ($1,$2,$3) \
         ON CONFLICT (\"id\") DO UPDATE SET \"locale\" = EXCLUDED.\"locale\",\"code3\" = \
         EXCLUDED.\"code3\",\"language\" = EXCLUDED.\"language\" RETURNING \"id\""
    );
    assert_eq!(statement.value_columns, ["locale", "code3", "language"]);
}

#[test]
fn test_upsert_on_other_columns() {
    let statement = build_upsert::<language::Entity>(true, &["code3"], &["language"], &[], &[])
        .expect("upsert statement");
    assert!(statement.sql.ends_with(
        "ON CONFLICT (\"code3\") DO UPDATE SET \"language\" = EXCLUDED.\"language\" \
         RETURNING \"id\""
    ));

    let statement = build_upsert::<language::Entity>(false, &["code3"], &["language"], &[], &[])
        .expect("upsert statement");
    assert!(
        statement
            .sql
            .ends_with("ON CONFLICT DO NOTHING RETURNING \"id\"")
    );
}

#[test]
fn test_upsert_without_update_columns() {
    assert!(matches!(
        build_upsert::<roles_user::Entity>(true, &[], &[], &[], &[]),
        Err(Error::EmptyUpsertUpdate {
            table: "roles_users"
        })
    ));
}
