use serde::{Deserialize, Serialize};
use sqlparser::ast::{
    ColumnDef, ColumnOption, CreateTable, DataType, Ident, ObjectName, ObjectNamePart,
    TableConstraint,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SqlForeignKey {
    pub target_table: String,
    pub target_column: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SqlColumn {
    pub name: String,
    pub column_type: DataType,
    pub nullable: bool,
    pub unique: bool,
    pub primary_key: bool,
    /// Whether the database fills the column in when an insert leaves it out, either through an
    /// explicit `DEFAULT` or a serial type.
    pub has_default: bool,
    pub foreign_key: Option<SqlForeignKey>,
}

/// The unquoted last part of a possibly schema-qualified name.
fn object_name(name: &ObjectName) -> Option<String> {
    name.0.last().map(|e| {
        let ObjectNamePart::Identifier(ident) = e;

        ident.value.clone()
    })
}

fn ident_names(idents: &[Ident]) -> Vec<String> {
    idents.iter().map(|e| e.value.clone()).collect()
}

impl From<&ColumnDef> for SqlColumn {
    fn from(value: &ColumnDef) -> Self {
        let primary_key = value.options.iter().any(|e| {
            matches!(
                e.option,
                ColumnOption::Unique {
                    is_primary: true,
                    ..
                }
            )
        });

        let serial = value
            .data_type
            .to_string()
            .to_lowercase()
            .contains("serial");

        Self {
            name: value.name.value.clone(),
            column_type: value.data_type.clone(),
            nullable: !primary_key
                && value
                    .options
                    .iter()
                    .find_map(|e| match e.option {
                        ColumnOption::Null => Some(true),
                        ColumnOption::NotNull => Some(false),
                        _ => None,
                    })
                    .unwrap_or(true),
            unique: value
                .options
                .iter()
                .any(|e| matches!(e.option, ColumnOption::Unique { .. })),
            primary_key,
            has_default: serial
                || value
                    .options
                    .iter()
                    .any(|e| matches!(e.option, ColumnOption::Default(_))),
            foreign_key: value.options.iter().find_map(|e| {
                if let ColumnOption::ForeignKey {
                    foreign_table,
                    referred_columns,
                    ..
                } = &e.option
                {
                    if let ([column], Some(target_table)) =
                        (referred_columns.as_slice(), object_name(foreign_table))
                    {
                        return Some(SqlForeignKey {
                            target_table,
                            target_column: column.value.clone(),
                        });
                    }
                }

                None
            }),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SqlTable {
    pub name: String,
    pub columns: Vec<SqlColumn>,
    /// Primary key columns, in key order. Empty if the table has none.
    pub primary_key: Vec<String>,
}

impl SqlTable {
    #[must_use]
    pub fn find_column(&self, name: &str) -> Option<&SqlColumn> {
        self.columns.iter().find(|e| e.name.eq(name))
    }

    /// Names of the columns the database can fill in on its own.
    #[must_use]
    pub fn columns_with_default(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|e| e.has_default)
            .map(|e| e.name.as_str())
            .collect()
    }
}

impl From<&CreateTable> for SqlTable {
    fn from(create_table: &CreateTable) -> Self {
        let mut columns: Vec<SqlColumn> =
            create_table.columns.iter().map(SqlColumn::from).collect();

        let mut primary_key = columns
            .iter()
            .filter(|e| e.primary_key)
            .map(|e| e.name.clone())
            .collect::<Vec<_>>();

        for constraint in &create_table.constraints {
            match constraint {
                TableConstraint::PrimaryKey {
                    columns: key_columns,
                    ..
                } => {
                    primary_key = ident_names(key_columns);
                }
                TableConstraint::ForeignKey {
                    columns: local_columns,
                    foreign_table,
                    referred_columns,
                    ..
                } => {
                    // Composite foreign keys are not tracked.
                    if let ([local], [column], Some(target_table)) = (
                        local_columns.as_slice(),
                        referred_columns.as_slice(),
                        object_name(foreign_table),
                    ) {
                        if let Some(e) = columns.iter_mut().find(|e| e.name == local.value) {
                            e.foreign_key = Some(SqlForeignKey {
                                target_table,
                                target_column: column.value.clone(),
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        for column in &mut columns {
            if primary_key.contains(&column.name) {
                column.primary_key = true;
                column.nullable = false;
            }
        }

        Self {
            name: object_name(&create_table.name).unwrap_or_default(),
            columns,
            primary_key,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SqlSchema {
    pub tables: Vec<SqlTable>,
}

impl SqlSchema {
    #[must_use]
    pub fn find_table(&self, name: &str) -> Option<&SqlTable> {
        self.tables.iter().find(|e| e.name.eq(name))
    }
}
