use std::marker::PhantomData;

use futures::TryStreamExt;
use itertools::Itertools;
use sqlx::{PgConnection, Postgres, QueryBuilder, postgres::PgRow};
use tracing::debug;

use crate::{
    entity::{
        Entity,
        column::{Column, ColumnName, EntityConditionExpr},
        relation::Related,
    },
    error::{Error, Result},
};

use super::{
    BracketsExpr, PushToQuery, SubSelectExpr, assign::Assignments, parse::ParseFromRow,
    sql::quote_ident,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

#[derive(PartialEq, Eq, Hash)]
struct Join {
    table: &'static str,
    left: ColumnName,
    right: ColumnName,
}

pub struct Select<T>
where
    T: Entity + 'static,
{
    marker: PhantomData<T>,
    conditions: Vec<Box<dyn PushToQuery + Send + Sync>>,
    joins: Vec<Join>,
    extra_columns: Vec<(ColumnName, &'static str)>,
    order_by: Vec<(ColumnName, Order)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl<T> Select<T>
where
    T: Entity + 'static,
{
    pub(crate) fn new() -> Self {
        Self {
            marker: PhantomData,
            conditions: vec![],
            joins: vec![],
            extra_columns: vec![],
            order_by: vec![],
            limit: None,
            offset: None,
        }
    }

    /// Append a new `WHERE` condition using an `AND` statement as glue. The passed condition is
    /// wrapped in `()` brackets.
    #[must_use]
    pub fn filter<Q>(self, condition: EntityConditionExpr<Q, T>) -> Self
    where
        Q: PushToQuery + Send + Sync + 'static,
    {
        self.filter_raw(Box::new(condition))
    }

    pub(crate) fn filter_raw(mut self, condition: Box<dyn PushToQuery + Send + Sync>) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Join `table` on `left = right`. Repeating an identical join has no effect.
    pub(crate) fn inner_join(
        mut self,
        table: &'static str,
        left: ColumnName,
        right: ColumnName,
    ) -> Self {
        self.joins.push(Join { table, left, right });
        self
    }

    /// Select `column` as `alias` next to the entity's own columns.
    pub(crate) fn select_also(mut self, column: ColumnName, alias: &'static str) -> Self {
        self.extra_columns.push((column, alias));
        self
    }

    /// Keep only rows referenced by at least one row of `R` matching `condition` (the foreign key
    /// `C` is on `R`). Each row is returned once, no matter how many related rows match.
    ///
    /// Every call is a separate sub-select, so two calls may be satisfied by different related
    /// rows. Combine conditions with `and` to require a single related row to match all of them.
    #[must_use]
    pub fn where_relation<C, Q, R>(self, condition: EntityConditionExpr<Q, R>) -> Self
    where
        Q: PushToQuery + Send + Sync + 'static,
        R: Related<T, C>,
        C: Column<Entity = R>,
    {
        self.filter_raw(Box::new(SubSelectExpr::new(
            <R::TargetColumn as Column>::full_column_name(),
            C::full_column_name(),
            R::TABLE_NAME,
            Box::new(condition),
        )))
    }

    /// Keep only rows whose foreign key `C` points at a row of `R` matching `condition`.
    #[must_use]
    pub fn where_inverse_relation<C, Q, R>(self, condition: EntityConditionExpr<Q, R>) -> Self
    where
        Q: PushToQuery + Send + Sync + 'static,
        R: Entity,
        T: Related<R, C>,
        C: Column<Entity = T>,
    {
        self.filter_raw(Box::new(SubSelectExpr::new(
            C::full_column_name(),
            <T::TargetColumn as Column>::full_column_name(),
            R::TABLE_NAME,
            Box::new(condition),
        )))
    }

    /// Sort by `C`. Repeated calls add further sort keys.
    #[must_use]
    pub fn order_by<C>(mut self, order: Order) -> Self
    where
        C: Column<Entity = T>,
    {
        self.order_by.push((C::full_column_name(), order));
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Return the raw SQL query of this statement, with `$n` placeholders in place of the bound
    /// values.
    ///
    /// This is mainly useful for debugging purposes.
    #[must_use]
    pub fn query(&self) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("");
        self.push_to(&mut builder);
        builder.into_sql()
    }

    /// Execute the query, returning a single result.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no entry could be found, or if there's been a problem communicating
    /// with the database.
    pub async fn one(self, conn: &mut PgConnection) -> Result<T::Model> {
        self.limit(1)
            .fetch_rows(conn)
            .await?
            .first()
            .ok_or(Error::NotFound {
                table: T::TABLE_NAME,
            })
            .and_then(|row| {
                <T::Model as ParseFromRow>::parse_from_row(row)
                    .map_err(Error::query("select from", T::TABLE_NAME))
            })
    }

    /// Execute the query, returning all results.
    ///
    /// # Errors
    ///
    /// If there's been a problem communicating with the database.
    pub async fn all(self, conn: &mut PgConnection) -> Result<Vec<T::Model>> {
        self.fetch_rows(conn)
            .await?
            .iter()
            .map(<T::Model as ParseFromRow>::parse_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::query("select from", T::TABLE_NAME))
    }

    pub(crate) async fn fetch_rows(&self, conn: &mut PgConnection) -> Result<Vec<PgRow>> {
        let mut builder = QueryBuilder::<Postgres>::new("");
        self.push_to(&mut builder);

        debug!(target: "kmedia::sql", sql = builder.sql(), "select");

        builder
            .build()
            .fetch(conn)
            .try_collect()
            .await
            .map_err(Error::query("select from", T::TABLE_NAME))
    }

    /// Count the matching rows, ignoring `ORDER BY`, `LIMIT` and `OFFSET`.
    ///
    /// # Errors
    ///
    /// If there's been a problem communicating with the database.
    pub async fn count(self, conn: &mut PgConnection) -> Result<i64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*)");
        self.push_from_where(&mut builder);

        debug!(target: "kmedia::sql", sql = builder.sql(), "count");

        builder
            .build_query_scalar::<i64>()
            .fetch_one(conn)
            .await
            .map_err(Error::query("count rows in", T::TABLE_NAME))
    }

    /// Check whether any row matches.
    ///
    /// # Errors
    ///
    /// If there's been a problem communicating with the database.
    pub async fn exists(self, conn: &mut PgConnection) -> Result<bool> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT EXISTS(SELECT 1");
        self.push_from_where(&mut builder);
        builder.push(" LIMIT 1)");

        debug!(target: "kmedia::sql", sql = builder.sql(), "exists");

        builder
            .build_query_scalar::<bool>()
            .fetch_one(conn)
            .await
            .map_err(Error::query("check existence in", T::TABLE_NAME))
    }

    /// Delete every matching row, returning the number of deleted rows.
    ///
    /// # Errors
    ///
    /// If there's been a problem communicating with the database.
    pub async fn delete_all(self, conn: &mut PgConnection) -> Result<u64> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "DELETE FROM {}",
            quote_ident(T::TABLE_NAME)
        ));
        self.push_filter(&mut builder);

        debug!(target: "kmedia::sql", sql = builder.sql(), "delete all");

        builder
            .build()
            .execute(conn)
            .await
            .map(|e| e.rows_affected())
            .map_err(Error::query("delete all from", T::TABLE_NAME))
    }

    /// Apply `assignments` to every matching row, returning the number of updated rows.
    ///
    /// # Errors
    ///
    /// [`Error::NoAssignments`] if `assignments` is empty, or if there's been a problem
    /// communicating with the database.
    pub async fn update_all(
        self,
        conn: &mut PgConnection,
        assignments: Assignments<T>,
    ) -> Result<u64> {
        if assignments.is_empty() {
            return Err(Error::NoAssignments);
        }

        let mut builder =
            QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ", quote_ident(T::TABLE_NAME)));
        assignments.push_to(&mut builder);
        self.push_filter(&mut builder);

        debug!(target: "kmedia::sql", sql = builder.sql(), "update all");

        builder
            .build()
            .execute(conn)
            .await
            .map(|e| e.rows_affected())
            .map_err(Error::query("update all in", T::TABLE_NAME))
    }

    fn push_columns(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        T::COLUMN_NAMES.iter().enumerate().for_each(|(i, e)| {
            if i > 0 {
                builder.push(", ");
            }
            ColumnName::new_with_table_or_alias(T::TABLE_NAME, *e).push_to(builder);
        });

        self.extra_columns.iter().for_each(|(column, alias)| {
            builder.push(", ");
            column.push_to(builder);
            builder.push(format_args!(" AS {}", quote_ident(alias)));
        });
    }

    fn push_from_where(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(" FROM ");
        builder.push(quote_ident(T::TABLE_NAME));

        self.joins.iter().unique().for_each(|e| {
            builder.push(format_args!(" INNER JOIN {} ON ", quote_ident(e.table)));
            e.left.push_to(builder);
            builder.push(" = ");
            e.right.push_to(builder);
        });

        self.push_conditions(builder);
    }

    fn push_conditions(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        self.conditions.iter().enumerate().for_each(|(i, e)| {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            BracketsExpr::new(e).push_to(builder);
        });
    }

    /// The `WHERE` part of a bulk statement. Joined tables cannot be referenced directly there, so
    /// joined selects are narrowed through a primary key sub-select instead.
    fn push_filter(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        if self.joins.is_empty() {
            self.push_conditions(builder);
            return;
        }

        let key = T::PRIMARY_KEY_COLUMNS
            .iter()
            .map(|e| ColumnName::new_with_table_or_alias(T::TABLE_NAME, *e).to_string())
            .join(", ");

        builder.push(format_args!(" WHERE ({key}) IN (SELECT {key}"));
        self.push_from_where(builder);
        builder.push(")");
    }
}

impl<T> PushToQuery for Select<T>
where
    T: Entity + 'static,
{
    fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push("SELECT ");
        self.push_columns(builder);
        self.push_from_where(builder);

        self.order_by.iter().enumerate().for_each(|(i, (column, order))| {
            builder.push(if i == 0 { " ORDER BY " } else { ", " });
            column.push_to(builder);
            builder.push(match order {
                Order::Asc => " ASC",
                Order::Desc => " DESC",
            });
        });

        if let Some(limit) = self.limit {
            builder.push(format_args!(" LIMIT {limit}"));
        }

        if let Some(offset) = self.offset {
            builder.push(format_args!(" OFFSET {offset}"));
        }
    }
}

#[cfg(test)]
mod test {
    use super::Order;
    use crate::{
        entity::{
            Entity,
            column::{ComparableColumn, NullableColumn, RangeColumn, StringComparableColumn},
        },
        models::{catalog, container, file_type, language, user},
    };

    const LANGUAGE_COLUMNS: &str =
        "\"languages\".\"id\", \"languages\".\"locale\", \"languages\".\"code3\", \"languages\".\"language\"";

    #[test]
    fn test_plain_select() {
        assert_eq!(
            language::Entity::find().query(),
            format!("SELECT {LANGUAGE_COLUMNS} FROM \"languages\"")
        );
    }

    #[test]
    fn test_filters_are_bracketed_and_joined() {
        let query = language::Entity::find()
            .filter(language::columns::Code3::eq(Some("heb".to_string())))
            .filter(
                language::columns::Locale::is_null()
                    .or(language::columns::Locale::like("he%".to_string())),
            )
            .query();

        assert_eq!(
            query,
            format!(
                "SELECT {LANGUAGE_COLUMNS} FROM \"languages\" WHERE (\"languages\".\"code3\" = $1) \
                 AND (\"languages\".\"locale\" IS NULL OR \"languages\".\"locale\" LIKE $2)"
            )
        );
    }

    #[test]
    fn test_bracketed_condition() {
        let query = catalog::Entity::find()
            .filter(
                catalog::columns::Secure::eq(0)
                    .or(catalog::columns::Secure::eq(1))
                    .brackets()
                    .and(catalog::columns::Visible::eq(Some(true))),
            )
            .query();

        assert!(query.ends_with(
            "FROM \"catalogs\" WHERE ((\"catalogs\".\"secure\" = $1 OR \"catalogs\".\"secure\" \
             = $2) AND \"catalogs\".\"visible\" = $3)"
        ));
    }

    #[test]
    fn test_order_limit_offset() {
        let query = catalog::Entity::find()
            .filter(catalog::columns::Catorder::between(1, 10))
            .order_by::<catalog::columns::Catorder>(Order::Asc)
            .order_by::<catalog::columns::Id>(Order::Desc)
            .limit(20)
            .offset(40)
            .query();

        assert!(query.ends_with(
            "FROM \"catalogs\" WHERE (\"catalogs\".\"catorder\" BETWEEN $1 AND $2) \
             ORDER BY \"catalogs\".\"catorder\" ASC, \"catalogs\".\"id\" DESC LIMIT 20 OFFSET 40"
        ));
    }

    #[test]
    fn test_empty_in_list() {
        let query = file_type::Entity::find()
            .filter(file_type::columns::Name::is_in(vec![]))
            .query();

        assert!(query.ends_with("FROM \"file_types\" WHERE (FALSE)"));
    }

    #[test]
    fn test_where_inverse_relation() {
        let query = container::Entity::find()
            .where_inverse_relation::<container::columns::LangId, _, _>(
                language::columns::Locale::eq(Some("ru".to_string())),
            )
            .query();

        assert!(query.ends_with(
            "FROM \"containers\" WHERE (\"containers\".\"lang_id\" IN (SELECT \
             \"languages\".\"code3\" FROM \"languages\" WHERE \"languages\".\"locale\" = $1))"
        ));
    }

    #[test]
    fn test_where_inverse_relation_through_two_keys() {
        let query = container::Entity::find()
            .where_inverse_relation::<container::columns::UserId, _, _>(user::columns::Email::eq(
                "author@kab.info".to_string(),
            ))
            .where_inverse_relation::<container::columns::CensorId, _, _>(
                user::columns::Email::eq("censor@kab.info".to_string()),
            )
            .query();

        assert!(query.ends_with(
            "FROM \"containers\" WHERE (\"containers\".\"user_id\" IN (SELECT \
             \"users\".\"id\" FROM \"users\" WHERE \"users\".\"email\" = $1)) AND \
             (\"containers\".\"censor_id\" IN (SELECT \"users\".\"id\" FROM \"users\" WHERE \
             \"users\".\"email\" = $2))"
        ));
    }

    #[test]
    fn test_where_relation() {
        let query = language::Entity::find()
            .where_relation::<container::columns::LangId, _, _>(
                container::columns::Secure::gt(0).and(container::columns::Name::is_not_null()),
            )
            .query();

        assert_eq!(
            query,
            format!(
                "SELECT {LANGUAGE_COLUMNS} FROM \"languages\" WHERE (\"languages\".\"code3\" IN \
                 (SELECT \"containers\".\"lang_id\" FROM \"containers\" WHERE \
                 \"containers\".\"secure\" > $1 AND \"containers\".\"name\" IS NOT NULL))"
            )
        );
    }

    #[test]
    fn test_where_relation_on_self() {
        let query = catalog::Entity::find()
            .where_relation::<catalog::columns::ParentId, _, _>(catalog::columns::Secure::eq(1))
            .query();

        assert!(query.ends_with(
            "FROM \"catalogs\" WHERE (\"catalogs\".\"id\" IN (SELECT \
             \"catalogs\".\"parent_id\" FROM \"catalogs\" WHERE \"catalogs\".\"secure\" = $1))"
        ));
        assert!(!query.contains("JOIN"));
    }
}
