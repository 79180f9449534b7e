//! Relationship helpers shared by every model.
//!
//! A relation is described by the foreign key column `C` on the owning entity `L`, pointing at
//! [`Related::TargetColumn`] on `R`. Loaded relations live in plain fields of the model, reached
//! through a [`Slot`].

use itertools::Itertools;
use sqlx::{PgConnection, Postgres, Row as _};
use tracing::debug;

use crate::{
    entity::{
        Entity,
        column::{Column, ColumnName},
        model::Model,
        relation::{ForeignKeyValue, KeyOf, ManyToMany, NullableForeignKey, Related},
    },
    error::{Error, Result},
};

use super::{key_condition, keys_condition, parse::ParseFromRow, select::Select, sql};

/// Accessor of the field holding a loaded relation.
pub type Slot<M, T> = fn(&mut M) -> &mut T;

type Target<L, R, C> = <L as Related<R, C>>::TargetColumn;

const JOIN_KEY_ALIAS: &str = "join_key";

fn missing_key<C: Column>() -> Error {
    Error::MissingKey {
        table: C::Entity::TABLE_NAME,
        column: C::NAME,
    }
}

/// `UPDATE table SET column=$1` for the row identified by `primary_key`, starting at `$2`.
fn set_key_statement(table: &str, column: &str, primary_key: &[&str]) -> String {
    format!(
        "UPDATE {} SET {} WHERE {}",
        sql::quote_ident(table),
        sql::set_param_names(&[column], 1),
        sql::where_clause(primary_key, 2)
    )
}

fn clear_key_statement(table: &str, column: &str) -> String {
    format!(
        "UPDATE {} SET {} = NULL WHERE {}",
        sql::quote_ident(table),
        sql::quote_ident(column),
        sql::where_clause(&[column], 1)
    )
}

fn join_insert_statement(join_table: &str, local: &str, foreign: &str) -> String {
    format!(
        "INSERT INTO {} ({}, {}) VALUES ($1, $2)",
        sql::quote_ident(join_table),
        sql::quote_ident(local),
        sql::quote_ident(foreign)
    )
}

fn join_clear_statement(join_table: &str, local: &str) -> String {
    format!(
        "DELETE FROM {} WHERE {}",
        sql::quote_ident(join_table),
        sql::where_clause(&[local], 1)
    )
}

/// Delete the join rows between `$1` and `count` foreign keys starting at `$2`.
fn join_remove_statement(join_table: &str, local: &str, foreign: &str, count: usize) -> String {
    format!(
        "DELETE FROM {} WHERE {} = $1 AND {} IN ({})",
        sql::quote_ident(join_table),
        sql::quote_ident(local),
        sql::quote_ident(foreign),
        sql::placeholders(count, 2, 1)
    )
}

/// Drop every record of `removed` from `loaded`, matching by primary key. The order of `loaded` is
/// not kept.
pub fn detach_by_key<M: Model>(loaded: &mut Vec<M>, removed: &[M]) {
    for e in removed {
        if let Some(i) = loaded
            .iter()
            .position(|loaded| loaded.primary_key() == e.primary_key())
        {
            loaded.swap_remove(i);
        }
    }
}

/// The record `model` points at through `C`. Matches nothing if the key is `NULL`.
#[must_use]
pub fn to_one<L, R, C>(model: &L::Model) -> Select<R>
where
    L: Related<R, C>,
    R: Entity,
    C: Column<Entity = L>,
    C::Type: ForeignKeyValue,
{
    R::find().filter_raw(key_condition(
        Target::<L, R, C>::full_column_name(),
        C::get(model).key(),
    ))
}

/// Every record of `L` pointing at `model` through `C`.
#[must_use]
pub fn to_many<L, R, C>(model: &R::Model) -> Select<L>
where
    L: Related<R, C>,
    R: Entity,
    C: Column<Entity = L>,
    C::Type: ForeignKeyValue,
    <Target<L, R, C> as Column>::Type: ForeignKeyValue<Key = KeyOf<C>>,
{
    L::find().filter_raw(key_condition(
        C::full_column_name(),
        Target::<L, R, C>::get(model).key(),
    ))
}

/// Every record of `R` joined to `model` through the join table.
#[must_use]
pub fn many_to_many<L, R>(model: &L::Model) -> Select<R>
where
    L: ManyToMany<R>,
    R: Entity,
    <L::LocalKey as Column>::Type: ForeignKeyValue,
{
    R::find()
        .inner_join(
            L::JOIN_TABLE,
            ColumnName::new_with_table_or_alias(L::JOIN_TABLE, L::FOREIGN_COLUMN),
            L::ForeignKey::full_column_name(),
        )
        .filter_raw(key_condition(
            ColumnName::new_with_table_or_alias(L::JOIN_TABLE, L::LOCAL_COLUMN),
            L::LocalKey::get(model).key(),
        ))
}

/// Point each model at the related record its key refers to, or at nothing.
pub fn attach_to_one<L, R, C>(
    models: &mut [L::Model],
    related: &[R::Model],
    slot: Slot<L::Model, Option<Box<R::Model>>>,
) where
    L: Related<R, C>,
    R: Entity,
    C: Column<Entity = L>,
    C::Type: ForeignKeyValue,
    <Target<L, R, C> as Column>::Type: ForeignKeyValue<Key = KeyOf<C>>,
{
    for model in models {
        let key = C::get(model).key();
        *slot(model) = key.and_then(|key| {
            related
                .iter()
                .find(|e| Target::<L, R, C>::get(*e).key().as_ref() == Some(&key))
                .map(|e| Box::new(e.clone()))
        });
    }
}

/// Collect, for each model, every related record pointing at it.
pub fn attach_to_many<L, R, C>(
    models: &mut [R::Model],
    related: &[L::Model],
    slot: Slot<R::Model, Vec<L::Model>>,
) where
    L: Related<R, C>,
    R: Entity,
    C: Column<Entity = L>,
    C::Type: ForeignKeyValue,
    <Target<L, R, C> as Column>::Type: ForeignKeyValue<Key = KeyOf<C>>,
{
    for model in models {
        let key = Target::<L, R, C>::get(model).key();
        *slot(model) = related
            .iter()
            .filter(|e| key.is_some() && C::get(*e).key() == key)
            .cloned()
            .collect();
    }
}

/// Collect, for each model, the related records paired with its join key.
pub fn attach_many_to_many<L, R>(
    models: &mut [L::Model],
    related: &[(KeyOf<L::LocalKey>, R::Model)],
    slot: Slot<L::Model, Vec<R::Model>>,
) where
    L: ManyToMany<R>,
    R: Entity,
    <L::LocalKey as Column>::Type: ForeignKeyValue,
{
    for model in models {
        let key = L::LocalKey::get(model).key();
        *slot(model) = related
            .iter()
            .filter(|(join_key, _)| key.as_ref() == Some(join_key))
            .map(|(_, e)| e.clone())
            .collect();
    }
}

/// Eager load the to-one relation of every model with a single query.
///
/// # Errors
///
/// If there's been a problem communicating with the database.
pub async fn load_to_one<L, R, C>(
    conn: &mut PgConnection,
    models: &mut [L::Model],
    slot: Slot<L::Model, Option<Box<R::Model>>>,
) -> Result<()>
where
    L: Related<R, C>,
    R: Entity,
    C: Column<Entity = L>,
    C::Type: ForeignKeyValue,
    <Target<L, R, C> as Column>::Type: ForeignKeyValue<Key = KeyOf<C>>,
{
    models.iter_mut().for_each(|e| *slot(e) = None);

    let keys = models
        .iter()
        .filter_map(|e| C::get(e).key())
        .unique()
        .collect::<Vec<_>>();
    if keys.is_empty() {
        return Ok(());
    }

    let related = R::find()
        .filter_raw(keys_condition(Target::<L, R, C>::full_column_name(), keys))
        .all(conn)
        .await?;

    attach_to_one::<L, R, C>(models, &related, slot);
    Ok(())
}

/// Eager load the to-many relation of every model with a single query.
///
/// # Errors
///
/// If there's been a problem communicating with the database.
pub async fn load_to_many<L, R, C>(
    conn: &mut PgConnection,
    models: &mut [R::Model],
    slot: Slot<R::Model, Vec<L::Model>>,
) -> Result<()>
where
    L: Related<R, C>,
    R: Entity,
    C: Column<Entity = L>,
    C::Type: ForeignKeyValue,
    <Target<L, R, C> as Column>::Type: ForeignKeyValue<Key = KeyOf<C>>,
{
    models.iter_mut().for_each(|e| slot(e).clear());

    let keys = models
        .iter()
        .filter_map(|e| Target::<L, R, C>::get(e).key())
        .unique()
        .collect::<Vec<_>>();
    if keys.is_empty() {
        return Ok(());
    }

    let related = L::find()
        .filter_raw(keys_condition(C::full_column_name(), keys))
        .all(conn)
        .await?;

    attach_to_many::<L, R, C>(models, &related, slot);
    Ok(())
}

/// Eager load the many-to-many relation of every model with a single query.
///
/// # Errors
///
/// If there's been a problem communicating with the database.
pub async fn load_many_to_many<L, R>(
    conn: &mut PgConnection,
    models: &mut [L::Model],
    slot: Slot<L::Model, Vec<R::Model>>,
) -> Result<()>
where
    L: ManyToMany<R>,
    R: Entity,
    <L::LocalKey as Column>::Type: ForeignKeyValue,
{
    models.iter_mut().for_each(|e| slot(e).clear());

    let keys = models
        .iter()
        .filter_map(|e| L::LocalKey::get(e).key())
        .unique()
        .collect::<Vec<_>>();
    if keys.is_empty() {
        return Ok(());
    }

    let local = ColumnName::new_with_table_or_alias(L::JOIN_TABLE, L::LOCAL_COLUMN);
    let rows = R::find()
        .inner_join(
            L::JOIN_TABLE,
            ColumnName::new_with_table_or_alias(L::JOIN_TABLE, L::FOREIGN_COLUMN),
            L::ForeignKey::full_column_name(),
        )
        .select_also(local.clone(), JOIN_KEY_ALIAS)
        .filter_raw(keys_condition(local, keys))
        .fetch_rows(conn)
        .await?;

    let related = rows
        .iter()
        .map(|row| {
            Ok((
                row.try_get::<KeyOf<L::LocalKey>, _>(JOIN_KEY_ALIAS)?,
                <R::Model as ParseFromRow>::parse_from_row(row)?,
            ))
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()
        .map_err(Error::query("load from", R::TABLE_NAME))?;

    attach_many_to_many::<L, R>(models, &related, slot);
    Ok(())
}

/// Point `model` at `related`, optionally inserting `related` first.
///
/// # Errors
///
/// [`Error::MissingKey`] if `related` has no key to point at, or any error reported by the
/// database.
pub async fn set_to_one<L, R, C>(
    model: &mut L::Model,
    conn: &mut PgConnection,
    insert: bool,
    related: &mut R::Model,
    slot: Slot<L::Model, Option<Box<R::Model>>>,
) -> Result<()>
where
    L: Related<R, C>,
    R: Entity,
    C: Column<Entity = L>,
    C::Type: ForeignKeyValue,
    <Target<L, R, C> as Column>::Type: ForeignKeyValue<Key = KeyOf<C>>,
{
    if insert {
        related.insert(conn, &[]).await?;
    }

    let key = Target::<L, R, C>::get(related)
        .key()
        .ok_or_else(missing_key::<Target<L, R, C>>)?;

    let statement = set_key_statement(L::TABLE_NAME, C::NAME, L::PRIMARY_KEY_COLUMNS);
    debug!(target: "kmedia::sql", sql = %statement, "set to one");

    let query = sqlx::query::<Postgres>(&statement).bind(key.clone());
    <L::Model as Model>::bind_primary_key(model.primary_key(), query)
        .execute(&mut *conn)
        .await
        .map_err(Error::query("update", L::TABLE_NAME))?;

    C::set(model, C::Type::from_key(key));
    *slot(model) = Some(Box::new(related.clone()));
    Ok(())
}

/// Clear the foreign key of `model`, leaving the related record in place.
///
/// # Errors
///
/// If there's been a problem communicating with the database.
pub async fn remove_to_one<L, R, C>(
    model: &mut L::Model,
    conn: &mut PgConnection,
    slot: Slot<L::Model, Option<Box<R::Model>>>,
) -> Result<()>
where
    L: Related<R, C>,
    R: Entity,
    C: Column<Entity = L>,
    C::Type: NullableForeignKey,
{
    C::set(model, C::Type::null());
    model.update(conn, &[C::NAME]).await?;

    *slot(model) = None;
    Ok(())
}

/// Point every record in `related` at `model`, inserting them first if `insert` is set.
///
/// # Errors
///
/// [`Error::MissingKey`] if `model` has no key to point at, or any error reported by the database.
pub async fn add_to_many<L, R, C>(
    model: &mut R::Model,
    conn: &mut PgConnection,
    insert: bool,
    related: &mut [L::Model],
    slot: Slot<R::Model, Vec<L::Model>>,
) -> Result<()>
where
    L: Related<R, C>,
    R: Entity,
    C: Column<Entity = L>,
    C::Type: ForeignKeyValue,
    <Target<L, R, C> as Column>::Type: ForeignKeyValue<Key = KeyOf<C>>,
{
    let key = Target::<L, R, C>::get(model)
        .key()
        .ok_or_else(missing_key::<Target<L, R, C>>)?;

    let statement = set_key_statement(L::TABLE_NAME, C::NAME, L::PRIMARY_KEY_COLUMNS);

    for e in related.iter_mut() {
        if insert {
            C::set(e, C::Type::from_key(key.clone()));
            e.insert(conn, &[]).await?;
        } else {
            debug!(target: "kmedia::sql", sql = %statement, "add to many");

            let query = sqlx::query::<Postgres>(&statement).bind(key.clone());
            <L::Model as Model>::bind_primary_key(e.primary_key(), query)
                .execute(&mut *conn)
                .await
                .map_err(Error::query("update", L::TABLE_NAME))?;

            C::set(e, C::Type::from_key(key.clone()));
        }
    }

    slot(model).extend(related.iter().cloned());
    Ok(())
}

/// Detach every record currently pointing at `model`, then add `related`.
///
/// # Errors
///
/// [`Error::MissingKey`] if `model` has no key to point at, or any error reported by the database.
pub async fn set_to_many<L, R, C>(
    model: &mut R::Model,
    conn: &mut PgConnection,
    insert: bool,
    related: &mut [L::Model],
    slot: Slot<R::Model, Vec<L::Model>>,
) -> Result<()>
where
    L: Related<R, C>,
    R: Entity,
    C: Column<Entity = L>,
    C::Type: NullableForeignKey,
    <Target<L, R, C> as Column>::Type: ForeignKeyValue<Key = KeyOf<C>>,
{
    let key = Target::<L, R, C>::get(model)
        .key()
        .ok_or_else(missing_key::<Target<L, R, C>>)?;

    let statement = clear_key_statement(L::TABLE_NAME, C::NAME);
    debug!(target: "kmedia::sql", sql = %statement, "set to many");

    sqlx::query::<Postgres>(&statement)
        .bind(key)
        .execute(&mut *conn)
        .await
        .map_err(Error::query("update", L::TABLE_NAME))?;

    slot(model).clear();
    add_to_many::<L, R, C>(model, conn, insert, related, slot).await
}

/// Clear the foreign key of every record in `related` and drop them from the loaded relation.
///
/// # Errors
///
/// If there's been a problem communicating with the database.
pub async fn remove_to_many<L, R, C>(
    model: &mut R::Model,
    conn: &mut PgConnection,
    related: &mut [L::Model],
    slot: Slot<R::Model, Vec<L::Model>>,
) -> Result<()>
where
    L: Related<R, C>,
    R: Entity,
    C: Column<Entity = L>,
    C::Type: NullableForeignKey,
{
    for e in related.iter_mut() {
        C::set(e, C::Type::null());
        e.update(conn, &[C::NAME]).await?;
    }

    detach_by_key(slot(model), related);

    Ok(())
}

/// Join every record in `related` to `model`, inserting them first if `insert` is set.
///
/// # Errors
///
/// [`Error::MissingKey`] if either side has no key, or any error reported by the database.
pub async fn add_many_to_many<L, R>(
    model: &mut L::Model,
    conn: &mut PgConnection,
    insert: bool,
    related: &mut [R::Model],
    slot: Slot<L::Model, Vec<R::Model>>,
) -> Result<()>
where
    L: ManyToMany<R>,
    R: Entity,
    <L::LocalKey as Column>::Type: ForeignKeyValue,
    <L::ForeignKey as Column>::Type: ForeignKeyValue,
{
    let key = L::LocalKey::get(model)
        .key()
        .ok_or_else(missing_key::<L::LocalKey>)?;

    let statement = join_insert_statement(L::JOIN_TABLE, L::LOCAL_COLUMN, L::FOREIGN_COLUMN);

    for e in related.iter_mut() {
        if insert {
            e.insert(conn, &[]).await?;
        }

        let foreign = L::ForeignKey::get(e)
            .key()
            .ok_or_else(missing_key::<L::ForeignKey>)?;

        debug!(target: "kmedia::sql", sql = %statement, "add many to many");

        sqlx::query::<Postgres>(&statement)
            .bind(key.clone())
            .bind(foreign)
            .execute(&mut *conn)
            .await
            .map_err(Error::query("insert into", L::JOIN_TABLE))?;
    }

    slot(model).extend(related.iter().cloned());
    Ok(())
}

/// Remove every join row of `model`, then add `related`.
///
/// # Errors
///
/// [`Error::MissingKey`] if either side has no key, or any error reported by the database.
pub async fn set_many_to_many<L, R>(
    model: &mut L::Model,
    conn: &mut PgConnection,
    insert: bool,
    related: &mut [R::Model],
    slot: Slot<L::Model, Vec<R::Model>>,
) -> Result<()>
where
    L: ManyToMany<R>,
    R: Entity,
    <L::LocalKey as Column>::Type: ForeignKeyValue,
    <L::ForeignKey as Column>::Type: ForeignKeyValue,
{
    let key = L::LocalKey::get(model)
        .key()
        .ok_or_else(missing_key::<L::LocalKey>)?;

    let statement = join_clear_statement(L::JOIN_TABLE, L::LOCAL_COLUMN);
    debug!(target: "kmedia::sql", sql = %statement, "set many to many");

    sqlx::query::<Postgres>(&statement)
        .bind(key)
        .execute(&mut *conn)
        .await
        .map_err(Error::query("delete from", L::JOIN_TABLE))?;

    slot(model).clear();
    add_many_to_many::<L, R>(model, conn, insert, related, slot).await
}

/// Remove the join rows between `model` and `related`. The related records themselves stay.
///
/// # Errors
///
/// [`Error::MissingKey`] if either side has no key, or any error reported by the database.
pub async fn remove_many_to_many<L, R>(
    model: &mut L::Model,
    conn: &mut PgConnection,
    related: &[R::Model],
    slot: Slot<L::Model, Vec<R::Model>>,
) -> Result<()>
where
    L: ManyToMany<R>,
    R: Entity,
    <L::LocalKey as Column>::Type: ForeignKeyValue,
    <L::ForeignKey as Column>::Type: ForeignKeyValue,
{
    if related.is_empty() {
        return Ok(());
    }

    let key = L::LocalKey::get(model)
        .key()
        .ok_or_else(missing_key::<L::LocalKey>)?;
    let foreign = related
        .iter()
        .map(|e| {
            L::ForeignKey::get(e)
                .key()
                .ok_or_else(missing_key::<L::ForeignKey>)
        })
        .collect::<Result<Vec<_>>>()?;

    let statement =
        join_remove_statement(L::JOIN_TABLE, L::LOCAL_COLUMN, L::FOREIGN_COLUMN, foreign.len());
    debug!(target: "kmedia::sql", sql = %statement, "remove many to many");

    foreign
        .into_iter()
        .fold(sqlx::query::<Postgres>(&statement).bind(key), |query, e| {
            query.bind(e)
        })
        .execute(&mut *conn)
        .await
        .map_err(Error::query("delete from", L::JOIN_TABLE))?;

    detach_by_key(slot(model), related);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::{
        attach_many_to_many, attach_to_many, attach_to_one, clear_key_statement, detach_by_key,
        join_clear_statement, join_insert_statement, join_remove_statement, many_to_many,
        set_key_statement, to_many, to_one,
    };
    use crate::{
        entity::Entity,
        models::{catalog, container, label, language, roles_user},
    };

    fn language(id: i32, code3: &str) -> language::Language {
        language::Language {
            id,
            code3: Some(code3.to_string()),
            ..Default::default()
        }
    }

    fn container(id: i32, lang_id: Option<&str>) -> container::Container {
        container::Container {
            id,
            lang_id: lang_id.map(ToString::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_to_one_query() {
        let query =
            to_one::<container::Entity, language::Entity, container::columns::LangId>(&container(
                1,
                Some("heb"),
            ))
            .query();
        assert!(query.ends_with("FROM \"languages\" WHERE (\"languages\".\"code3\" = $1)"));

        let query = to_one::<container::Entity, language::Entity, container::columns::LangId>(
            &container(1, None),
        )
        .query();
        assert!(query.ends_with("FROM \"languages\" WHERE (FALSE)"));
    }

    #[test]
    fn test_to_many_query() {
        let query = to_many::<container::Entity, language::Entity, container::columns::LangId>(
            &language(3, "rus"),
        )
        .query();
        assert!(query.ends_with("FROM \"containers\" WHERE (\"containers\".\"lang_id\" = $1)"));
    }

    #[test]
    fn test_many_to_many_query() {
        let query = many_to_many::<catalog::Entity, container::Entity>(&catalog::Catalog {
            id: 5,
            ..Default::default()
        })
        .query();
        assert!(query.ends_with(
            "FROM \"containers\" INNER JOIN \"catalogs_containers\" ON \
             \"catalogs_containers\".\"container_id\" = \"containers\".\"id\" WHERE \
             (\"catalogs_containers\".\"catalog_id\" = $1)"
        ));
    }

    #[test]
    fn test_attach_to_one() {
        let mut containers = vec![
            container(1, Some("heb")),
            container(2, Some("eng")),
            container(3, None),
        ];
        let languages = vec![language(1, "eng"), language(2, "heb")];

        attach_to_one::<container::Entity, language::Entity, container::columns::LangId>(
            &mut containers,
            &languages,
            |e| &mut e.r.lang,
        );

        assert_eq!(containers[0].r.lang.as_ref().map(|e| e.id), Some(2));
        assert_eq!(containers[1].r.lang.as_ref().map(|e| e.id), Some(1));
        assert!(containers[2].r.lang.is_none());
    }

    #[test]
    fn test_attach_to_many() {
        let mut languages = vec![language(1, "eng"), language(2, "heb")];
        let containers = vec![
            container(1, Some("heb")),
            container(2, Some("heb")),
            container(3, None),
        ];

        attach_to_many::<container::Entity, language::Entity, container::columns::LangId>(
            &mut languages,
            &containers,
            |e| &mut e.r.containers,
        );

        assert!(languages[0].r.containers.is_empty());
        assert_eq!(
            languages[1]
                .r
                .containers
                .iter()
                .map(|e| e.id)
                .collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_attach_many_to_many() {
        let mut catalogs = vec![
            catalog::Catalog {
                id: 1,
                ..Default::default()
            },
            catalog::Catalog {
                id: 2,
                ..Default::default()
            },
        ];
        let joined = vec![
            (2, container(10, None)),
            (1, container(11, None)),
            (2, container(12, None)),
        ];

        attach_many_to_many::<catalog::Entity, container::Entity>(&mut catalogs, &joined, |e| {
            &mut e.r.containers
        });

        assert_eq!(
            catalogs[0].r.containers.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![11]
        );
        assert_eq!(
            catalogs[1].r.containers.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![10, 12]
        );
    }

    #[test]
    fn test_set_key_statement() {
        assert_eq!(
            set_key_statement(
                container::Entity::TABLE_NAME,
                "lang_id",
                container::Entity::PRIMARY_KEY_COLUMNS
            ),
            "UPDATE \"containers\" SET \"lang_id\"=$1 WHERE \"id\"=$2"
        );
        assert_eq!(
            set_key_statement(
                roles_user::Entity::TABLE_NAME,
                "user_id",
                roles_user::Entity::PRIMARY_KEY_COLUMNS
            ),
            "UPDATE \"roles_users\" SET \"user_id\"=$1 WHERE \"role_id\"=$2 AND \"user_id\"=$3"
        );
    }

    #[test]
    fn test_clear_key_statement() {
        assert_eq!(
            clear_key_statement("containers", "censor_id"),
            "UPDATE \"containers\" SET \"censor_id\" = NULL WHERE \"censor_id\"=$1"
        );
    }

    #[test]
    fn test_join_table_statements() {
        assert_eq!(
            join_insert_statement("containers_labels", "container_id", "label_id"),
            "INSERT INTO \"containers_labels\" (\"container_id\", \"label_id\") VALUES ($1, $2)"
        );
        assert_eq!(
            join_clear_statement("containers_labels", "label_id"),
            "DELETE FROM \"containers_labels\" WHERE \"label_id\"=$1"
        );
        assert_eq!(
            join_remove_statement("catalogs_containers", "catalog_id", "container_id", 3),
            "DELETE FROM \"catalogs_containers\" WHERE \"catalog_id\" = $1 AND \
             \"container_id\" IN ($2,$3,$4)"
        );
    }

    #[test]
    fn test_detach_by_key() {
        let mut loaded = vec![
            container(1, None),
            container(2, None),
            container(3, None),
            container(4, None),
        ];

        detach_by_key(
            &mut loaded,
            &[container(1, Some("heb")), container(9, None), container(3, None)],
        );

        let mut ids = loaded.iter().map(|e| e.id).collect::<Vec<_>>();
        ids.sort_unstable();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_detach_by_composite_key() {
        let membership = |role_id, user_id| roles_user::RolesUser {
            role_id,
            user_id,
            ..Default::default()
        };
        let mut loaded = vec![membership(1, 7), membership(2, 7), membership(1, 8)];

        detach_by_key(&mut loaded, &[membership(2, 7)]);

        assert_eq!(loaded.len(), 2);
        assert!(
            loaded
                .iter()
                .all(|e| (e.role_id, e.user_id) != (2, 7))
        );
    }

    #[test]
    fn test_detach_from_empty() {
        let mut loaded: Vec<label::Label> = vec![];
        detach_by_key(
            &mut loaded,
            &[label::Label {
                id: 1,
                ..Default::default()
            }],
        );
        assert!(loaded.is_empty());
    }
}
