use chrono::NaiveDateTime;
use sqlx::{PgConnection, Postgres, postgres::{PgArguments, PgRow}};

use crate::{
    error::Result,
    query::{assign::Assignments, parse::ParseFromRow, write},
};

use super::Entity;

/// A prepared statement with its bound parameters.
pub type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// The write operation timestamps are being maintained for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touch {
    Insert,
    Update,
    Upsert,
}

/// A `created_at` / `updated_at` field.
pub trait Timestamp {
    fn is_unset(&self) -> bool;

    fn stamp(&mut self, now: NaiveDateTime);

    fn fill_if_unset(&mut self, now: NaiveDateTime) {
        if self.is_unset() {
            self.stamp(now);
        }
    }
}

impl Timestamp for NaiveDateTime {
    fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    fn stamp(&mut self, now: NaiveDateTime) {
        *self = now;
    }
}

impl Timestamp for Option<NaiveDateTime> {
    fn is_unset(&self) -> bool {
        self.is_none_or(|e| e.is_unset())
    }

    fn stamp(&mut self, now: NaiveDateTime) {
        *self = Some(now);
    }
}

/// Options of [`Model::upsert`].
///
/// Empty `conflict_columns` stand for the primary key, empty `update_columns` for every column
/// that is not part of it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Upsert<'a> {
    /// Whether to update the conflicting row, or leave it untouched.
    pub update_on_conflict: bool,
    pub conflict_columns: &'a [&'a str],
    pub update_columns: &'a [&'a str],
    /// Columns to insert; see [`Model::insert`].
    pub whitelist: &'a [&'a str],
}

#[allow(async_fn_in_trait)]
pub trait Model: ParseFromRow + Default + Clone + Send + Sync + 'static {
    type Entity: Entity<Model = Self>;

    /// The primary key's field type, or a tuple of them for composite keys.
    type PrimaryKey: Clone + PartialEq + Send + Sync + 'static;

    fn primary_key(&self) -> Self::PrimaryKey;

    /// Bind every part of `key`, in [`Entity::PRIMARY_KEY_COLUMNS`] order.
    fn bind_primary_key<'q>(key: Self::PrimaryKey, query: PgQuery<'q>) -> PgQuery<'q>;

    /// Bind the current value of `column`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownColumn`](crate::Error::UnknownColumn) if the table has no such column.
    fn bind_column<'q>(&self, column: &str, query: PgQuery<'q>) -> Result<PgQuery<'q>>;

    /// Overwrite the field of `column` with the value `row` holds for it.
    ///
    /// # Errors
    ///
    /// If the row has no such column, or its value cannot be decoded.
    fn assign_column(&mut self, column: &str, row: &PgRow) -> Result<(), sqlx::Error>;

    /// Columns with a database default whose field currently holds a non-zero value. These are
    /// inserted explicitly instead of being left to the database.
    fn non_zero_defaults(&self) -> Vec<&'static str>;

    /// Maintain `created_at` / `updated_at` before a write.
    fn touch_timestamps(&mut self, _now: NaiveDateTime, _touch: Touch) {}

    /// Insert this record.
    ///
    /// Without a whitelist, every column lacking a database default is inserted, together with
    /// defaulted columns that hold a non-zero value. The remaining defaulted columns are read
    /// back from the database afterwards.
    ///
    /// # Errors
    ///
    /// If the whitelist names an unknown column, or if the database rejects the statement.
    async fn insert(&mut self, conn: &mut PgConnection, whitelist: &[&str]) -> Result<()> {
        write::insert(self, conn, whitelist).await
    }

    /// Update this record. Without a whitelist, every column except the primary key is written.
    /// Returns the number of affected rows.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyWhitelist`](crate::Error::EmptyWhitelist) if there is nothing to update, or
    /// any error reported by the database.
    async fn update(&mut self, conn: &mut PgConnection, whitelist: &[&str]) -> Result<u64> {
        write::update(self, conn, whitelist).await
    }

    /// Insert this record, or update / ignore it on conflict.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyUpsertUpdate`](crate::Error::EmptyUpsertUpdate) if no update column list
    /// could be built, or any error reported by the database.
    async fn upsert(&mut self, conn: &mut PgConnection, options: &Upsert<'_>) -> Result<()> {
        write::upsert(self, conn, options).await
    }

    /// Delete this record by its primary key.
    ///
    /// # Errors
    ///
    /// If there's been a problem communicating with the database.
    async fn delete(&self, conn: &mut PgConnection) -> Result<u64> {
        write::delete(self, conn).await
    }

    /// Refetch this record from the database, dropping any cached relations.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`](crate::Error::NotFound) if the record no longer exists.
    async fn reload(&mut self, conn: &mut PgConnection) -> Result<()> {
        *self = Self::Entity::find_by_key(conn, self.primary_key(), &[]).await?;
        Ok(())
    }
}

/// Bulk operations over loaded records.
#[allow(async_fn_in_trait)]
pub trait Collection {
    type Model: Model;

    /// Apply `assignments` to every record in the collection, by primary key. The records in
    /// memory are left unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::NoAssignments`](crate::Error::NoAssignments) if `assignments` is empty, or any
    /// error reported by the database.
    async fn update_all(
        &self,
        conn: &mut PgConnection,
        assignments: Assignments<<Self::Model as Model>::Entity>,
    ) -> Result<u64>;

    /// Delete every record in the collection.
    ///
    /// # Errors
    ///
    /// If there's been a problem communicating with the database.
    async fn delete_all(&self, conn: &mut PgConnection) -> Result<u64>;

    /// Replace the collection with the current database state of its records. Records that no
    /// longer exist are dropped.
    ///
    /// # Errors
    ///
    /// If there's been a problem communicating with the database.
    async fn reload_all(&mut self, conn: &mut PgConnection) -> Result<()>;
}

impl<M: Model> Collection for Vec<M> {
    type Model = M;

    async fn update_all(
        &self,
        conn: &mut PgConnection,
        assignments: Assignments<M::Entity>,
    ) -> Result<u64> {
        write::update_all(self, conn, &assignments).await
    }

    async fn delete_all(&self, conn: &mut PgConnection) -> Result<u64> {
        write::delete_all(self, conn).await
    }

    async fn reload_all(&mut self, conn: &mut PgConnection) -> Result<()> {
        *self = write::reload_all(self, conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::Timestamp;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 5, 17)
            .and_then(|e| e.and_hms_opt(12, 0, 0))
            .expect("valid date")
    }

    #[test]
    fn test_fill_if_unset() {
        let mut stamp: Option<NaiveDateTime> = None;
        stamp.fill_if_unset(noon());
        assert_eq!(stamp, Some(noon()));

        let earlier = noon() - chrono::Duration::days(3);
        let mut stamp = Some(earlier);
        stamp.fill_if_unset(noon());
        assert_eq!(stamp, Some(earlier));

        let mut stamp = NaiveDateTime::default();
        stamp.fill_if_unset(noon());
        assert_eq!(stamp, noon());
    }

    #[test]
    fn test_stamp_overwrites() {
        let mut stamp = Some(noon() - chrono::Duration::hours(1));
        stamp.stamp(noon());
        assert_eq!(stamp, Some(noon()));
    }
}
