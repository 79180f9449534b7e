use std::hash::Hash;

use sqlx::{Decode, Encode, Postgres, Type};

use super::{Entity, column::Column};

/// A value that can identify a row on the other side of a relation.
pub trait SqlKey:
    for<'a> Encode<'a, Postgres>
    + for<'a> Decode<'a, Postgres>
    + Type<Postgres>
    + Clone
    + Eq
    + Hash
    + Send
    + Sync
    + 'static
{
}

impl<T> SqlKey for T where
    T: for<'a> Encode<'a, Postgres>
        + for<'a> Decode<'a, Postgres>
        + Type<Postgres>
        + Clone
        + Eq
        + Hash
        + Send
        + Sync
        + 'static
{
}

/// The type of a column that references, or is referenced by, another table.
///
/// Nullable columns share the key type of their non-null counterpart, so an `Option<i32>` foreign
/// key can point at an `i32` primary key.
pub trait ForeignKeyValue: Clone + Send + Sync + 'static {
    type Key: SqlKey;

    /// The key held by this value, or `None` if it is `NULL`.
    fn key(&self) -> Option<Self::Key>;

    fn from_key(key: Self::Key) -> Self;
}

impl ForeignKeyValue for i32 {
    type Key = Self;

    fn key(&self) -> Option<Self::Key> {
        Some(*self)
    }

    fn from_key(key: Self::Key) -> Self {
        key
    }
}

impl ForeignKeyValue for String {
    type Key = Self;

    fn key(&self) -> Option<Self::Key> {
        Some(self.clone())
    }

    fn from_key(key: Self::Key) -> Self {
        key
    }
}

impl<T> ForeignKeyValue for Option<T>
where
    T: ForeignKeyValue,
{
    type Key = T::Key;

    fn key(&self) -> Option<Self::Key> {
        self.as_ref().and_then(ForeignKeyValue::key)
    }

    fn from_key(key: Self::Key) -> Self {
        Some(T::from_key(key))
    }
}

/// A foreign key column that may be set to `NULL`.
pub trait NullableForeignKey: ForeignKeyValue {
    fn null() -> Self;
}

impl<T> NullableForeignKey for Option<T>
where
    T: ForeignKeyValue,
{
    fn null() -> Self {
        None
    }
}

/// The key type held by column `C`.
pub type KeyOf<C> = <<C as Column>::Type as ForeignKeyValue>::Key;

/// The owning side (= the side with the foreign key stored in its table) of a database relation.
/// `C` is the column on `Self` holding the foreign key, and [`Related::TargetColumn`] the column
/// of `R` it refers to.
///
/// Every implementation also describes the inverse, one-to-many relation from `R` to `Self`.
pub trait Related<R, C>: Entity
where
    R: Entity,
    C: Column<Entity = Self>,
{
    type TargetColumn: Column<Entity = R>;
}

/// A many-to-many relation between `Self` and `R` through a join table.
///
/// Implemented for both directions, with the join columns swapped.
pub trait ManyToMany<R>: Entity
where
    R: Entity,
{
    const JOIN_TABLE: &'static str;

    /// The join table column referring to `Self`.
    const LOCAL_COLUMN: &'static str;

    /// The join table column referring to `R`.
    const FOREIGN_COLUMN: &'static str;

    /// The column of `Self` that [`ManyToMany::LOCAL_COLUMN`] refers to.
    type LocalKey: Column<Entity = Self>;

    /// The column of `R` that [`ManyToMany::FOREIGN_COLUMN`] refers to.
    type ForeignKey: Column<Entity = R>;
}
