//! The kmedia tables.
//!
//! Every module declares one table: its model struct, the loaded relations of a record (`r`) and
//! the relationship accessors, loaders and mutators.

/// Accessors for foreign keys held by the model's own table.
macro_rules! belongs_to {
    ($model:ident {
        $(
            $name:ident: $target:ident via $column:ident
            [load = $load:ident, set = $set:ident $(, remove = $remove:ident)?];
        )*
    }) => {
        impl $model {
            $(
                #[doc = concat!("The `", stringify!($target), "` referenced by `", stringify!($column), "`.")]
                #[must_use]
                pub fn $name(&self) -> $crate::query::select::Select<$crate::models::$target::Entity> {
                    $crate::query::relation::to_one::<
                        Entity,
                        $crate::models::$target::Entity,
                        columns::$column,
                    >(self)
                }

                #[doc = concat!("Eager load `", stringify!($name), "` for every record in `models`.")]
                ///
                /// # Errors
                ///
                /// If there's been a problem communicating with the database.
                pub async fn $load(
                    conn: &mut $crate::sqlx::PgConnection,
                    models: &mut [Self],
                ) -> $crate::Result<()> {
                    $crate::query::relation::load_to_one::<
                        Entity,
                        $crate::models::$target::Entity,
                        columns::$column,
                    >(conn, models, |e| &mut e.r.$name)
                    .await
                }

                /// Point this record at `related`, optionally inserting it first.
                ///
                /// # Errors
                ///
                /// If `related` has no key, or if there's been a problem communicating with the
                /// database.
                pub async fn $set(
                    &mut self,
                    conn: &mut $crate::sqlx::PgConnection,
                    insert: bool,
                    related: &mut <$crate::models::$target::Entity as $crate::entity::Entity>::Model,
                ) -> $crate::Result<()> {
                    $crate::query::relation::set_to_one::<
                        Entity,
                        $crate::models::$target::Entity,
                        columns::$column,
                    >(self, conn, insert, related, |e| &mut e.r.$name)
                    .await
                }

                $(
                    #[doc = concat!("Set `", stringify!($column), "` to `NULL`.")]
                    ///
                    /// # Errors
                    ///
                    /// If there's been a problem communicating with the database.
                    pub async fn $remove(
                        &mut self,
                        conn: &mut $crate::sqlx::PgConnection,
                    ) -> $crate::Result<()> {
                        $crate::query::relation::remove_to_one::<
                            Entity,
                            $crate::models::$target::Entity,
                            columns::$column,
                        >(self, conn, |e| &mut e.r.$name)
                        .await
                    }
                )?
            )*
        }
    };
}

/// Accessors for records of other tables referencing the model.
macro_rules! has_many {
    ($model:ident {
        $(
            $name:ident: $target:ident via $column:ident
            [load = $load:ident, add = $add:ident $(, set = $set:ident, remove = $remove:ident)?];
        )*
    }) => {
        impl $model {
            $(
                #[doc = concat!("Every `", stringify!($target), "` whose `", stringify!($column), "` refers to this record.")]
                #[must_use]
                pub fn $name(&self) -> $crate::query::select::Select<$crate::models::$target::Entity> {
                    $crate::query::relation::to_many::<
                        $crate::models::$target::Entity,
                        Entity,
                        $crate::models::$target::columns::$column,
                    >(self)
                }

                #[doc = concat!("Eager load `", stringify!($name), "` for every record in `models`.")]
                ///
                /// # Errors
                ///
                /// If there's been a problem communicating with the database.
                pub async fn $load(
                    conn: &mut $crate::sqlx::PgConnection,
                    models: &mut [Self],
                ) -> $crate::Result<()> {
                    $crate::query::relation::load_to_many::<
                        $crate::models::$target::Entity,
                        Entity,
                        $crate::models::$target::columns::$column,
                    >(conn, models, |e| &mut e.r.$name)
                    .await
                }

                /// Point every record in `related` at this one, inserting them first if `insert`
                /// is set.
                ///
                /// # Errors
                ///
                /// If this record has no key, or if there's been a problem communicating with the
                /// database.
                pub async fn $add(
                    &mut self,
                    conn: &mut $crate::sqlx::PgConnection,
                    insert: bool,
                    related: &mut [<$crate::models::$target::Entity as $crate::entity::Entity>::Model],
                ) -> $crate::Result<()> {
                    $crate::query::relation::add_to_many::<
                        $crate::models::$target::Entity,
                        Entity,
                        $crate::models::$target::columns::$column,
                    >(self, conn, insert, related, |e| &mut e.r.$name)
                    .await
                }

                $(
                    /// Detach every record currently referring to this one, then add `related`.
                    ///
                    /// # Errors
                    ///
                    /// If this record has no key, or if there's been a problem communicating with
                    /// the database.
                    pub async fn $set(
                        &mut self,
                        conn: &mut $crate::sqlx::PgConnection,
                        insert: bool,
                        related: &mut [<$crate::models::$target::Entity as $crate::entity::Entity>::Model],
                    ) -> $crate::Result<()> {
                        $crate::query::relation::set_to_many::<
                            $crate::models::$target::Entity,
                            Entity,
                            $crate::models::$target::columns::$column,
                        >(self, conn, insert, related, |e| &mut e.r.$name)
                        .await
                    }

                    /// Detach `related` from this record.
                    ///
                    /// # Errors
                    ///
                    /// If there's been a problem communicating with the database.
                    pub async fn $remove(
                        &mut self,
                        conn: &mut $crate::sqlx::PgConnection,
                        related: &mut [<$crate::models::$target::Entity as $crate::entity::Entity>::Model],
                    ) -> $crate::Result<()> {
                        $crate::query::relation::remove_to_many::<
                            $crate::models::$target::Entity,
                            Entity,
                            $crate::models::$target::columns::$column,
                        >(self, conn, related, |e| &mut e.r.$name)
                        .await
                    }
                )?
            )*
        }
    };
}

/// Accessors for records joined to the model through a join table.
macro_rules! many_to_many {
    ($model:ident {
        $(
            $name:ident: $target:ident
            [load = $load:ident, add = $add:ident, set = $set:ident, remove = $remove:ident];
        )*
    }) => {
        impl $model {
            $(
                #[doc = concat!("Every `", stringify!($target), "` joined to this record.")]
                #[must_use]
                pub fn $name(&self) -> $crate::query::select::Select<$crate::models::$target::Entity> {
                    $crate::query::relation::many_to_many::<Entity, $crate::models::$target::Entity>(
                        self,
                    )
                }

                #[doc = concat!("Eager load `", stringify!($name), "` for every record in `models`.")]
                ///
                /// # Errors
                ///
                /// If there's been a problem communicating with the database.
                pub async fn $load(
                    conn: &mut $crate::sqlx::PgConnection,
                    models: &mut [Self],
                ) -> $crate::Result<()> {
                    $crate::query::relation::load_many_to_many::<
                        Entity,
                        $crate::models::$target::Entity,
                    >(conn, models, |e| &mut e.r.$name)
                    .await
                }

                /// Join `related` to this record, inserting them first if `insert` is set.
                ///
                /// # Errors
                ///
                /// If either side has no key, or if there's been a problem communicating with the
                /// database.
                pub async fn $add(
                    &mut self,
                    conn: &mut $crate::sqlx::PgConnection,
                    insert: bool,
                    related: &mut [<$crate::models::$target::Entity as $crate::entity::Entity>::Model],
                ) -> $crate::Result<()> {
                    $crate::query::relation::add_many_to_many::<
                        Entity,
                        $crate::models::$target::Entity,
                    >(self, conn, insert, related, |e| &mut e.r.$name)
                    .await
                }

                /// Replace every join of this record with `related`.
                ///
                /// # Errors
                ///
                /// If either side has no key, or if there's been a problem communicating with the
                /// database.
                pub async fn $set(
                    &mut self,
                    conn: &mut $crate::sqlx::PgConnection,
                    insert: bool,
                    related: &mut [<$crate::models::$target::Entity as $crate::entity::Entity>::Model],
                ) -> $crate::Result<()> {
                    $crate::query::relation::set_many_to_many::<
                        Entity,
                        $crate::models::$target::Entity,
                    >(self, conn, insert, related, |e| &mut e.r.$name)
                    .await
                }

                /// Remove the joins between this record and `related`.
                ///
                /// # Errors
                ///
                /// If either side has no key, or if there's been a problem communicating with the
                /// database.
                pub async fn $remove(
                    &mut self,
                    conn: &mut $crate::sqlx::PgConnection,
                    related: &[<$crate::models::$target::Entity as $crate::entity::Entity>::Model],
                ) -> $crate::Result<()> {
                    $crate::query::relation::remove_many_to_many::<
                        Entity,
                        $crate::models::$target::Entity,
                    >(self, conn, related, |e| &mut e.r.$name)
                    .await
                }
            )*
        }
    };
}

pub mod catalog;
pub mod catalog_description;
pub mod ckeditor_asset;
pub mod comment;
pub mod container;
pub mod container_description;
pub mod container_description_pattern;
pub mod container_transcript;
pub mod content_type;
pub mod department;
pub mod dictionary;
pub mod dictionary_description;
pub mod file_asset;
pub mod file_asset_description;
pub mod file_type;
pub mod label;
pub mod label_description;
pub mod language;
pub mod lecturer;
pub mod lecturer_description;
pub mod role;
pub mod roles_user;
pub mod server;
pub mod user;
pub mod virtual_lesson;

use crate::entity::{Entity, relation::ManyToMany};

/// The shape of a table as the models declare it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableInfo {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub columns_with_default: &'static [&'static str],
    pub primary_key: &'static [&'static str],
}

impl TableInfo {
    #[must_use]
    pub const fn of<E: Entity>() -> Self {
        Self {
            name: E::TABLE_NAME,
            columns: E::COLUMN_NAMES,
            columns_with_default: E::COLUMNS_WITH_DEFAULT,
            primary_key: E::PRIMARY_KEY_COLUMNS,
        }
    }
}

/// A join table backing a many-to-many relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinTableInfo {
    pub name: &'static str,
    pub columns: [&'static str; 2],
}

impl JoinTableInfo {
    #[must_use]
    pub const fn of<L, R>() -> Self
    where
        L: ManyToMany<R>,
        R: Entity,
    {
        Self {
            name: L::JOIN_TABLE,
            columns: [L::LOCAL_COLUMN, L::FOREIGN_COLUMN],
        }
    }
}

pub const TABLES: &[TableInfo] = &[
    TableInfo::of::<catalog::Entity>(),
    TableInfo::of::<catalog_description::Entity>(),
    TableInfo::of::<ckeditor_asset::Entity>(),
    TableInfo::of::<comment::Entity>(),
    TableInfo::of::<container::Entity>(),
    TableInfo::of::<container_description::Entity>(),
    TableInfo::of::<container_description_pattern::Entity>(),
    TableInfo::of::<container_transcript::Entity>(),
    TableInfo::of::<content_type::Entity>(),
    TableInfo::of::<department::Entity>(),
    TableInfo::of::<dictionary::Entity>(),
    TableInfo::of::<dictionary_description::Entity>(),
    TableInfo::of::<file_asset::Entity>(),
    TableInfo::of::<file_asset_description::Entity>(),
    TableInfo::of::<file_type::Entity>(),
    TableInfo::of::<label::Entity>(),
    TableInfo::of::<label_description::Entity>(),
    TableInfo::of::<language::Entity>(),
    TableInfo::of::<lecturer::Entity>(),
    TableInfo::of::<lecturer_description::Entity>(),
    TableInfo::of::<role::Entity>(),
    TableInfo::of::<roles_user::Entity>(),
    TableInfo::of::<server::Entity>(),
    TableInfo::of::<user::Entity>(),
    TableInfo::of::<virtual_lesson::Entity>(),
];

pub const JOIN_TABLES: &[JoinTableInfo] = &[
    JoinTableInfo::of::<catalog::Entity, container::Entity>(),
    JoinTableInfo::of::<catalog::Entity, container_description_pattern::Entity>(),
    JoinTableInfo::of::<container::Entity, label::Entity>(),
    JoinTableInfo::of::<container::Entity, file_asset::Entity>(),
];

#[cfg(test)]
mod test {
    use super::{JOIN_TABLES, TABLES};

    #[test]
    fn test_registry_is_complete() {
        assert_eq!(TABLES.len(), 25);
        assert_eq!(JOIN_TABLES.len(), 4);

        let mut names = TABLES.iter().map(|e| e.name).collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TABLES.len());
    }

    #[test]
    fn test_primary_keys_are_columns() {
        for table in TABLES {
            assert!(!table.primary_key.is_empty(), "{}", table.name);
            assert!(
                table
                    .primary_key
                    .iter()
                    .all(|e| table.columns.contains(e)),
                "{}",
                table.name
            );
        }
    }
}
