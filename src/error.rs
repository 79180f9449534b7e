use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The database rejected a statement, or its result could not be decoded.
    #[error("kmedia: unable to {action} {table}")]
    Query {
        action: &'static str,
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("kmedia: no rows found in {table}")]
    NotFound { table: &'static str },

    #[error("kmedia: unable to update {table}, could not build whitelist")]
    EmptyWhitelist { table: &'static str },

    #[error("kmedia: unable to upsert {table}, could not build update column list")]
    EmptyUpsertUpdate { table: &'static str },

    #[error("kmedia: update all requires at least one column argument")]
    NoAssignments,

    /// A whitelist or column selection named a column the table does not have.
    #[error("kmedia: {table} has no column {column:?}")]
    UnknownColumn { table: &'static str, column: String },

    /// A relationship operation needed a key that is `NULL`.
    #[error("kmedia: {table}.{column} holds no key")]
    MissingKey {
        table: &'static str,
        column: &'static str,
    },
}

impl Error {
    pub(crate) fn query(
        action: &'static str,
        table: &'static str,
    ) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Query {
            action,
            table,
            source,
        }
    }

    /// Whether this error means that a lookup matched no rows.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Query {
                    source: sqlx::Error::RowNotFound,
                    ..
                }
        )
    }
}
