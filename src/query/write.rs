use chrono::Utc;
use sqlx::{PgConnection, Postgres};
use tracing::debug;

use crate::{
    entity::{
        Entity,
        model::{Model, PgQuery, Touch, Upsert},
    },
    error::{Error, Result},
    query::sql,
};

use super::{
    assign::Assignments,
    statement::{InsertStatement, build_insert, build_update, build_upsert},
};

fn bind_columns<'q, M: Model>(
    model: &M,
    columns: &[&'static str],
    mut query: PgQuery<'q>,
) -> Result<PgQuery<'q>> {
    for column in columns {
        query = model.bind_column(column, query)?;
    }
    Ok(query)
}

/// Run an insert-like statement and read the returned columns back into `model`. A missing row is
/// only acceptable for upserts that did nothing.
async fn run_insert<M: Model>(
    model: &mut M,
    conn: &mut PgConnection,
    statement: &InsertStatement,
    action: &'static str,
) -> Result<()> {
    let table = <M::Entity as Entity>::TABLE_NAME;

    debug!(target: "kmedia::sql", sql = %statement.sql, columns = ?statement.value_columns, "{action} {table}");

    let query = bind_columns(
        model,
        &statement.value_columns,
        sqlx::query::<Postgres>(&statement.sql),
    )?;

    if statement.return_columns.is_empty() {
        query
            .execute(&mut *conn)
            .await
            .map_err(Error::query(action, table))?;
        return Ok(());
    }

    let Some(row) = query
        .fetch_optional(&mut *conn)
        .await
        .map_err(Error::query(action, table))?
    else {
        return Ok(());
    };

    for column in &statement.return_columns {
        model
            .assign_column(column, &row)
            .map_err(Error::query(action, table))?;
    }

    Ok(())
}

pub(crate) async fn insert<M: Model>(
    model: &mut M,
    conn: &mut PgConnection,
    whitelist: &[&str],
) -> Result<()> {
    let whitelist =
        sql::resolve_columns(M::Entity::TABLE_NAME, M::Entity::COLUMN_NAMES, whitelist)?;

    model.touch_timestamps(Utc::now().naive_utc(), Touch::Insert);

    let non_zero_defaults = model.non_zero_defaults();
    let key = sql::cache_key(&whitelist, &non_zero_defaults);
    let statement = M::Entity::statement_cache()
        .insert
        .get_or_build(key, || {
            Ok::<_, Error>(build_insert::<M::Entity>(&whitelist, &non_zero_defaults))
        })?;

    run_insert(model, conn, statement.statement(), "insert into").await?;
    statement.commit();

    Ok(())
}

pub(crate) async fn update<M: Model>(
    model: &mut M,
    conn: &mut PgConnection,
    whitelist: &[&str],
) -> Result<u64> {
    let table = M::Entity::TABLE_NAME;
    let whitelist = sql::resolve_columns(table, M::Entity::COLUMN_NAMES, whitelist)?;

    model.touch_timestamps(Utc::now().naive_utc(), Touch::Update);

    let key = sql::cache_key(&whitelist, &[]);
    let cached = M::Entity::statement_cache()
        .update
        .get_or_build(key, || build_update::<M::Entity>(&whitelist))?;
    let statement = cached.statement();

    debug!(target: "kmedia::sql", sql = %statement.sql, columns = ?statement.bind_columns, "update {table}");

    let rows_affected = bind_columns(
        model,
        &statement.bind_columns,
        sqlx::query::<Postgres>(&statement.sql),
    )?
    .execute(&mut *conn)
    .await
    .map_err(Error::query("update", table))?
    .rows_affected();

    cached.commit();
    Ok(rows_affected)
}

pub(crate) async fn upsert<M: Model>(
    model: &mut M,
    conn: &mut PgConnection,
    options: &Upsert<'_>,
) -> Result<()> {
    let table = M::Entity::TABLE_NAME;
    let conflict = sql::resolve_columns(table, M::Entity::COLUMN_NAMES, options.conflict_columns)?;
    let update = sql::resolve_columns(table, M::Entity::COLUMN_NAMES, options.update_columns)?;
    let whitelist = sql::resolve_columns(table, M::Entity::COLUMN_NAMES, options.whitelist)?;

    model.touch_timestamps(Utc::now().naive_utc(), Touch::Upsert);

    let non_zero_defaults = model.non_zero_defaults();
    let key = sql::upsert_cache_key(
        options.update_on_conflict,
        &conflict,
        &update,
        &whitelist,
        &non_zero_defaults,
    );
    let statement = M::Entity::statement_cache().upsert.get_or_build(key, || {
        build_upsert::<M::Entity>(
            options.update_on_conflict,
            &conflict,
            &update,
            &whitelist,
            &non_zero_defaults,
        )
    })?;

    run_insert(model, conn, statement.statement(), "upsert").await?;
    statement.commit();

    Ok(())
}

pub(crate) async fn delete<M: Model>(model: &M, conn: &mut PgConnection) -> Result<u64> {
    let statement = format!(
        "DELETE FROM {} WHERE {}",
        sql::quote_ident(M::Entity::TABLE_NAME),
        sql::where_clause(M::Entity::PRIMARY_KEY_COLUMNS, 1)
    );
    debug!(target: "kmedia::sql", sql = %statement, "delete");

    Ok(
        M::bind_primary_key(model.primary_key(), sqlx::query::<Postgres>(&statement))
            .execute(&mut *conn)
            .await
            .map_err(Error::query("delete from", M::Entity::TABLE_NAME))?
            .rows_affected(),
    )
}

fn bind_primary_keys<'q, M: Model>(models: &[M], mut query: PgQuery<'q>) -> PgQuery<'q> {
    for model in models {
        query = M::bind_primary_key(model.primary_key(), query);
    }
    query
}

pub(crate) async fn update_all<M: Model>(
    models: &[M],
    conn: &mut PgConnection,
    assignments: &Assignments<M::Entity>,
) -> Result<u64> {
    if assignments.is_empty() {
        return Err(Error::NoAssignments);
    }
    if models.is_empty() {
        return Ok(0);
    }

    let columns = assignments.columns();
    let statement = format!(
        "UPDATE {} SET {} WHERE {}",
        sql::quote_ident(M::Entity::TABLE_NAME),
        sql::set_param_names(&columns, 1),
        sql::where_in_clause(M::Entity::PRIMARY_KEY_COLUMNS, columns.len() + 1, models.len())
    );
    debug!(target: "kmedia::sql", sql = %statement, "update all");

    let query = assignments.bind_to(sqlx::query::<Postgres>(&statement));

    Ok(bind_primary_keys(models, query)
        .execute(&mut *conn)
        .await
        .map_err(Error::query("update all in", M::Entity::TABLE_NAME))?
        .rows_affected())
}

pub(crate) async fn delete_all<M: Model>(models: &[M], conn: &mut PgConnection) -> Result<u64> {
    if models.is_empty() {
        return Ok(0);
    }

    let statement = format!(
        "DELETE FROM {} WHERE {}",
        sql::quote_ident(M::Entity::TABLE_NAME),
        sql::where_in_clause(M::Entity::PRIMARY_KEY_COLUMNS, 1, models.len())
    );
    debug!(target: "kmedia::sql", sql = %statement, "delete all");

    Ok(
        bind_primary_keys(models, sqlx::query::<Postgres>(&statement))
            .execute(&mut *conn)
            .await
            .map_err(Error::query("delete all from", M::Entity::TABLE_NAME))?
            .rows_affected(),
    )
}

pub(crate) async fn reload_all<M: Model>(models: &[M], conn: &mut PgConnection) -> Result<Vec<M>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let table = M::Entity::TABLE_NAME;
    let statement = format!(
        "SELECT {}.* FROM {} WHERE {}",
        sql::quote_ident(table),
        sql::quote_ident(table),
        sql::where_in_clause(M::Entity::PRIMARY_KEY_COLUMNS, 1, models.len())
    );
    debug!(target: "kmedia::sql", sql = %statement, "reload all");

    bind_primary_keys(models, sqlx::query::<Postgres>(&statement))
        .fetch_all(&mut *conn)
        .await
        .and_then(|rows| rows.iter().map(M::parse_from_row).collect())
        .map_err(Error::query("reload all in", table))
}
