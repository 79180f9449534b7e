pub mod column;
pub mod model;
pub mod relation;

use model::Model;
use sqlx::{PgConnection, Postgres};
use tracing::debug;

use crate::{
    error::{Error, Result},
    query::{cache::StatementCache, parse::ParseFromRow, select::Select, sql},
};

#[allow(async_fn_in_trait)]
pub trait Entity: Sized + Send + Sync + 'static {
    type Model: Model;

    /// The name of this entity's table in the database.
    const TABLE_NAME: &'static str;

    /// Every column of the table, in table order.
    const COLUMN_NAMES: &'static [&'static str];

    /// Columns the database fills in when an insert leaves them out.
    const COLUMNS_WITH_DEFAULT: &'static [&'static str];

    const COLUMNS_WITHOUT_DEFAULT: &'static [&'static str];

    const PRIMARY_KEY_COLUMNS: &'static [&'static str];

    /// Insert, update and upsert statements built for this table so far.
    fn statement_cache() -> &'static StatementCache;

    #[must_use]
    fn find() -> Select<Self> {
        Select::<Self>::new()
    }

    /// Retrieve a single record by its primary key. If `columns` is not empty, only those columns
    /// are selected and every other field keeps its default value.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if there is no such record, [`Error::UnknownColumn`] if `columns` names
    /// a column this table does not have, or any error reported by the database.
    async fn find_by_key(
        conn: &mut PgConnection,
        key: <Self::Model as Model>::PrimaryKey,
        columns: &[&str],
    ) -> Result<Self::Model> {
        let columns = sql::resolve_columns(Self::TABLE_NAME, Self::COLUMN_NAMES, columns)?;

        let selection = if columns.is_empty() {
            "*".to_string()
        } else {
            sql::quote_list(&columns)
        };

        let statement = format!(
            "SELECT {selection} FROM {} WHERE {}",
            sql::quote_ident(Self::TABLE_NAME),
            sql::where_clause(Self::PRIMARY_KEY_COLUMNS, 1),
        );
        debug!(target: "kmedia::sql", sql = %statement, "find by key");

        let query = <Self::Model as Model>::bind_primary_key(
            key,
            sqlx::query::<Postgres>(&statement),
        );

        let row = query
            .fetch_optional(&mut *conn)
            .await
            .map_err(Error::query("select from", Self::TABLE_NAME))?
            .ok_or(Error::NotFound {
                table: Self::TABLE_NAME,
            })?;

        if columns.is_empty() {
            return <Self::Model as ParseFromRow>::parse_from_row(&row)
                .map_err(Error::query("select from", Self::TABLE_NAME));
        }

        let mut model = Self::Model::default();
        for column in columns {
            model
                .assign_column(column, &row)
                .map_err(Error::query("select from", Self::TABLE_NAME))?;
        }

        Ok(model)
    }

    /// Check whether a record with the given primary key exists.
    ///
    /// # Errors
    ///
    /// If there's been a problem communicating with the database.
    async fn exists_by_key(
        conn: &mut PgConnection,
        key: <Self::Model as Model>::PrimaryKey,
    ) -> Result<bool> {
        let statement = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {} LIMIT 1)",
            sql::quote_ident(Self::TABLE_NAME),
            sql::where_clause(Self::PRIMARY_KEY_COLUMNS, 1),
        );
        debug!(target: "kmedia::sql", sql = %statement, "exists by key");

        <Self::Model as Model>::bind_primary_key(key, sqlx::query::<Postgres>(&statement))
            .fetch_one(&mut *conn)
            .await
            .and_then(|row| sqlx::Row::try_get::<bool, _>(&row, 0))
            .map_err(Error::query("check existence in", Self::TABLE_NAME))
    }
}
