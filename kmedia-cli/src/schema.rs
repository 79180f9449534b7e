use std::{
    fmt,
    path::{Path, PathBuf},
};

use clap::Parser;
use eyre::Context;
use kmedia::models::{JOIN_TABLES, JoinTableInfo, TABLES, TableInfo};
use kmedia_sqlparse::{
    query::parse_schema,
    schema::{SqlSchema, SqlTable},
};
use tracing::{info, warn};

/// Parse a DDL script and write the schema it describes in JSON format
#[derive(Parser, Debug)]
pub struct GenerateSchema {
    /// The SQL file holding the `CREATE TABLE` statements.
    #[arg(long, value_name = "FILE")]
    ddl: PathBuf,

    /// Where to write the schema. Defaults to `kmedia/schema.json` in the current directory.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl GenerateSchema {
    pub async fn run(&self) -> eyre::Result<()> {
        let schema = read_schema(&self.ddl).await?;

        let schema_file = if let Some(output) = &self.output {
            output.clone()
        } else {
            std::env::current_dir()
                .context("Failed to determine current directory")?
                .join("kmedia")
                .join("schema.json")
        };

        if let Some(dir) = schema_file.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .context("Failed to create schema directory")?;
        }

        tokio::fs::write(
            &schema_file,
            serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?,
        )
        .await
        .context("Failed to write schema")?;

        info!(
            "Schema file with {} tables updated under {}",
            schema.tables.len(),
            schema_file.display()
        );

        Ok(())
    }
}

/// Compare the tables the models declare against a DDL script
#[derive(Parser, Debug)]
pub struct CheckSchema {
    /// The SQL file holding the `CREATE TABLE` statements.
    #[arg(long, value_name = "FILE")]
    ddl: PathBuf,
}

impl CheckSchema {
    pub async fn run(&self) -> eyre::Result<()> {
        let schema = read_schema(&self.ddl).await?;
        let issues = check_schema(&schema);

        if issues.is_empty() {
            info!(
                "{} tables and {} join tables match {}",
                TABLES.len(),
                JOIN_TABLES.len(),
                self.ddl.display()
            );
            return Ok(());
        }

        for issue in &issues {
            warn!("{issue}");
        }

        Err(eyre::eyre!(
            "{} differences between the models and {}",
            issues.len(),
            self.ddl.display()
        ))
    }
}

async fn read_schema(path: &Path) -> eyre::Result<SqlSchema> {
    let ddl = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    parse_schema(&ddl).map_err(|e| eyre::eyre!("Failed to parse {}: {e}", path.display()))
}

/// A difference between a model and the database table behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaIssue {
    MissingTable(&'static str),
    /// The model has a column the table lacks.
    MissingColumn {
        table: &'static str,
        column: String,
    },
    /// The table has a column the model lacks.
    ExtraColumn {
        table: &'static str,
        column: String,
    },
    DefaultMismatch {
        table: &'static str,
        column: String,
        model: bool,
    },
    PrimaryKeyMismatch {
        table: &'static str,
        model: Vec<String>,
        database: Vec<String>,
    },
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTable(table) => write!(f, "table {table} is missing"),
            Self::MissingColumn { table, column } => {
                write!(f, "{table}.{column} is missing from the database")
            }
            Self::ExtraColumn { table, column } => {
                write!(f, "{table}.{column} is not declared by the model")
            }
            Self::DefaultMismatch {
                table,
                column,
                model: true,
            } => write!(f, "{table}.{column} has no default in the database"),
            Self::DefaultMismatch { table, column, .. } => {
                write!(f, "{table}.{column} has a default the model does not declare")
            }
            Self::PrimaryKeyMismatch {
                table,
                model,
                database,
            } => write!(
                f,
                "{table} primary key is ({}) in the model but ({}) in the database",
                model.join(", "),
                database.join(", ")
            ),
        }
    }
}

/// Every difference between the model registry and `schema`, in registry order.
pub fn check_schema(schema: &SqlSchema) -> Vec<SchemaIssue> {
    let mut issues = vec![];

    for info in TABLES {
        match schema.find_table(info.name) {
            Some(table) => check_table(info, table, &mut issues),
            None => issues.push(SchemaIssue::MissingTable(info.name)),
        }
    }

    for info in JOIN_TABLES {
        match schema.find_table(info.name) {
            Some(table) => check_join_table(info, table, &mut issues),
            None => issues.push(SchemaIssue::MissingTable(info.name)),
        }
    }

    issues
}

fn check_table(info: &TableInfo, table: &SqlTable, issues: &mut Vec<SchemaIssue>) {
    for column in info.columns {
        let Some(sql_column) = table.find_column(column) else {
            issues.push(SchemaIssue::MissingColumn {
                table: info.name,
                column: (*column).to_string(),
            });
            continue;
        };

        let model = info.columns_with_default.contains(column);
        if model != sql_column.has_default {
            issues.push(SchemaIssue::DefaultMismatch {
                table: info.name,
                column: (*column).to_string(),
                model,
            });
        }
    }

    for sql_column in &table.columns {
        if !info.columns.contains(&sql_column.name.as_str()) {
            issues.push(SchemaIssue::ExtraColumn {
                table: info.name,
                column: sql_column.name.clone(),
            });
        }
    }

    if !info.primary_key.iter().eq(table.primary_key.iter()) {
        issues.push(SchemaIssue::PrimaryKeyMismatch {
            table: info.name,
            model: info.primary_key.iter().map(ToString::to_string).collect(),
            database: table.primary_key.clone(),
        });
    }
}

fn check_join_table(info: &JoinTableInfo, table: &SqlTable, issues: &mut Vec<SchemaIssue>) {
    for column in info.columns {
        if table.find_column(column).is_none() {
            issues.push(SchemaIssue::MissingColumn {
                table: info.name,
                column: column.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod test {
    use kmedia_sqlparse::query::parse_schema;

    use super::{SchemaIssue, check_schema};

    const DDL: &str = include_str!("../../schema/kmedia.sql");

    #[test]
    fn test_bundled_schema_matches_models() {
        let schema = parse_schema(DDL).expect("Failed to parse bundled schema");

        assert_eq!(schema.tables.len(), 29);
        assert_eq!(check_schema(&schema), vec![]);
    }

    #[test]
    fn test_detects_differences() {
        let ddl = DDL
            .replace(
                "    ordnum INTEGER NOT NULL DEFAULT 0\n",
                "    ordnum INTEGER NOT NULL\n",
            )
            .replace("    pic VARCHAR(255)\n", "    pic VARCHAR(255),\n    icon VARCHAR(255)\n")
            .replace("    locale VARCHAR(10),\n", "")
            .replace(
                "    PRIMARY KEY (role_id, user_id)\n",
                "    PRIMARY KEY (user_id, role_id)\n",
            );
        let schema = parse_schema(&ddl).expect("Failed to parse schema");

        let issues = check_schema(&schema);

        assert_eq!(
            issues,
            vec![
                SchemaIssue::ExtraColumn {
                    table: "file_types",
                    column: "icon".to_string(),
                },
                SchemaIssue::MissingColumn {
                    table: "languages",
                    column: "locale".to_string(),
                },
                SchemaIssue::DefaultMismatch {
                    table: "lecturers",
                    column: "ordnum".to_string(),
                    model: true,
                },
                SchemaIssue::PrimaryKeyMismatch {
                    table: "roles_users",
                    model: vec!["role_id".to_string(), "user_id".to_string()],
                    database: vec!["user_id".to_string(), "role_id".to_string()],
                },
            ]
        );
        assert_eq!(
            issues[2].to_string(),
            "lecturers.ordnum has no default in the database"
        );
    }

    #[test]
    fn test_missing_tables() {
        let schema = parse_schema(
            "CREATE TABLE languages (id SERIAL PRIMARY KEY, locale VARCHAR(10), code3 VARCHAR(3), \"language\" VARCHAR(100));",
        )
        .expect("Failed to parse schema");

        let issues = check_schema(&schema);

        assert_eq!(issues.len(), 24 + 4);
        assert!(issues.contains(&SchemaIssue::MissingTable("catalogs_containers")));
        assert!(!issues.contains(&SchemaIssue::MissingTable("languages")));
    }
}
