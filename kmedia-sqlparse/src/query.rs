use sqlparser::{
    ast::Statement,
    dialect::PostgreSqlDialect,
    parser::{Parser, ParserError},
};

use crate::schema::{SqlSchema, SqlTable};

/// Parse the first `CREATE TABLE` statement of `query`.
///
/// # Errors
///
/// If `query` is not valid PostgreSQL, or holds no `CREATE TABLE` statement.
pub fn parse_create_table(query: &str) -> Result<SqlTable, ParserError> {
    let ast = Parser::parse_sql(&PostgreSqlDialect {}, query)?;

    ast.iter()
        .find_map(|e| {
            if let Statement::CreateTable(statement) = e {
                Some(statement.into())
            } else {
                None
            }
        })
        .ok_or_else(|| ParserError::ParserError("no CREATE TABLE statement found".to_string()))
}

/// Parse every `CREATE TABLE` statement of a DDL script. Other statements are skipped.
///
/// # Errors
///
/// If `ddl` is not valid PostgreSQL.
pub fn parse_schema(ddl: &str) -> Result<SqlSchema, ParserError> {
    let ast = Parser::parse_sql(&PostgreSqlDialect {}, ddl)?;

    Ok(SqlSchema {
        tables: ast
            .iter()
            .filter_map(|e| {
                if let Statement::CreateTable(statement) = e {
                    Some(SqlTable::from(statement))
                } else {
                    None
                }
            })
            .collect(),
    })
}

#[cfg(test)]
mod test {
    use super::{parse_create_table, parse_schema};

    #[test]
    fn test_create_table() {
        let query = r#"CREATE TABLE "languages" (
          "id" SERIAL PRIMARY KEY,
          "locale" VARCHAR(10),
          "code3" VARCHAR(3) UNIQUE,
          "language" VARCHAR(100)
        )"#;

        let parsed = parse_create_table(query).expect("Failed to parse query");

        assert_eq!(parsed.name, "languages");
        assert_eq!(parsed.primary_key, vec!["id"]);
        assert_eq!(parsed.columns_with_default(), vec!["id"]);
        assert!(
            parsed
                .columns
                .iter()
                .any(|e| e.name.eq("id") && !e.nullable && e.primary_key)
        );
        assert!(
            parsed
                .columns
                .iter()
                .any(|e| e.name.eq("code3") && e.nullable && e.unique)
        );
    }

    #[test]
    fn test_no_create_table() {
        assert!(parse_create_table("SELECT 1").is_err());
    }

    #[test]
    fn test_schema() {
        let ddl = r"
          SET client_encoding = 'UTF8';

          CREATE TABLE public.roles_users (
            role_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL REFERENCES users (id),
            PRIMARY KEY (role_id, user_id)
          );

          CREATE TABLE catalogs (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL DEFAULT '',
            parent_id INTEGER,
            secure INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (parent_id) REFERENCES catalogs (id)
          );
        ";

        let schema = parse_schema(ddl).expect("Failed to parse schema");
        assert_eq!(schema.tables.len(), 2);

        let roles_users = schema.find_table("roles_users").expect("roles_users");
        assert_eq!(roles_users.primary_key, vec!["role_id", "user_id"]);
        assert!(roles_users.columns_with_default().is_empty());
        let user_id = roles_users.find_column("user_id").expect("user_id");
        assert_eq!(
            user_id.foreign_key.as_ref().map(|e| e.target_table.as_str()),
            Some("users")
        );

        let catalogs = schema.find_table("catalogs").expect("catalogs");
        assert_eq!(catalogs.columns_with_default(), vec!["id", "name", "secure"]);
        let parent_id = catalogs.find_column("parent_id").expect("parent_id");
        assert!(parent_id.nullable);
        assert_eq!(
            parent_id.foreign_key.as_ref().map(|e| e.target_column.as_str()),
            Some("id")
        );
    }

    #[test]
    fn test_schema_json() {
        let schema = parse_schema(
            "CREATE TABLE file_types (name VARCHAR(255) NOT NULL DEFAULT '' PRIMARY KEY, pic VARCHAR(255));",
        )
        .expect("Failed to parse schema");

        let json = serde_json::to_value(&schema).expect("Failed to serialize schema");

        assert_eq!(json["tables"][0]["name"], "file_types");
        assert_eq!(json["tables"][0]["primary_key"][0], "name");
        assert_eq!(json["tables"][0]["columns"][0]["has_default"], true);
        assert_eq!(json["tables"][0]["columns"][1]["nullable"], true);
    }
}
