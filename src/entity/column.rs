use std::{fmt::Display, marker::PhantomData};

use crate::{
    entity::Entity,
    query::{
        BinaryExpr, BinaryExprOperand, BracketsExpr, InExpr, PushToQuery, QueryVariable,
        SingletonExpr, SingletonExprOperand,
    },
};
use sqlx::{Decode, Encode, Postgres, QueryBuilder, Row, Type, postgres::PgRow};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnName {
    table_or_alias: Option<String>,
    column_name: String,
}

impl ColumnName {
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            table_or_alias: None,
            column_name: column_name.into(),
        }
    }

    pub fn new_with_table_or_alias(
        table_or_alias: impl Into<String>,
        column_name: impl Into<String>,
    ) -> Self {
        Self {
            table_or_alias: Some(table_or_alias.into()),
            column_name: column_name.into(),
        }
    }
}

impl Display for ColumnName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(table_or_alias) = &self.table_or_alias {
            write!(f, "\"{table_or_alias}\".")?;
        }
        write!(f, "\"{}\"", self.column_name)
    }
}

impl PushToQuery for ColumnName {
    fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(self.to_string());
    }
}

pub struct EntityConditionExpr<Q, E>
where
    Q: PushToQuery,
    E: Entity,
{
    marker: PhantomData<E>,
    inner: Q,
}

impl<Q, E> EntityConditionExpr<Q, E>
where
    Q: PushToQuery,
    E: Entity,
{
    pub fn and<OQ>(
        self,
        other: EntityConditionExpr<OQ, E>,
    ) -> EntityConditionExpr<BinaryExpr<Q, EntityConditionExpr<OQ, E>>, E>
    where
        OQ: PushToQuery,
    {
        EntityConditionExpr {
            marker: PhantomData,
            inner: BinaryExpr::new(self.inner, other, BinaryExprOperand::And),
        }
    }

    pub fn or<OQ>(
        self,
        other: EntityConditionExpr<OQ, E>,
    ) -> EntityConditionExpr<BinaryExpr<Q, EntityConditionExpr<OQ, E>>, E>
    where
        OQ: PushToQuery,
    {
        EntityConditionExpr {
            marker: PhantomData,
            inner: BinaryExpr::new(self.inner, other, BinaryExprOperand::Or),
        }
    }

    /// Wrap the query into brackets `()`.
    pub fn brackets(self) -> EntityConditionExpr<BracketsExpr<Q>, E> {
        EntityConditionExpr {
            marker: PhantomData,
            inner: BracketsExpr::new(self.inner),
        }
    }
}

impl<Q, E> From<Q> for EntityConditionExpr<Q, E>
where
    Q: PushToQuery,
    E: Entity,
{
    fn from(value: Q) -> Self {
        Self {
            inner: value,
            marker: PhantomData,
        }
    }
}

impl<Q, E> PushToQuery for EntityConditionExpr<Q, E>
where
    Q: PushToQuery,
    E: Entity,
{
    fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        self.inner.push_to(builder);
    }
}

pub trait Column: Sized + Send + Sync + 'static {
    /// The underlying rust type of this column.
    type Type: for<'a> Encode<'a, Postgres>
        + for<'a> Decode<'a, Postgres>
        + Type<Postgres>
        + Clone
        + Send
        + Sync
        + 'static;

    /// The entity that this column belongs to.
    type Entity: Entity;

    /// The name this column has in the database.
    const NAME: &'static str;

    /// The fully qualified name of this column, usually something like
    /// `"entity_table_name"."column_name"`.
    fn full_column_name() -> ColumnName {
        ColumnName::new_with_table_or_alias(Self::Entity::TABLE_NAME, Self::NAME)
    }

    /// Parse a return value from a sqlx row into this column's rust type.
    ///
    /// # Errors
    ///
    /// If the row has no such column, or its value cannot be decoded.
    fn value_from_row(row: &PgRow) -> Result<Self::Type, sqlx::Error> {
        row.try_get(Self::NAME)
    }

    /// Borrow this column's field from a model.
    fn get(model: &<Self::Entity as Entity>::Model) -> &Self::Type;

    /// Overwrite this column's field on a model.
    fn set(model: &mut <Self::Entity as Entity>::Model, value: Self::Type);
}

pub trait NullableColumn: Column {
    fn is_null() -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity> {
        SingletonExpr::new(Self::full_column_name(), SingletonExprOperand::IsNull).into()
    }

    fn is_not_null() -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity> {
        SingletonExpr::new(Self::full_column_name(), SingletonExprOperand::IsNotNull).into()
    }
}

impl<T, Inner> NullableColumn for T where T: Column<Type = Option<Inner>> {}

pub trait ComparableColumn: Column {
    fn eq(other: Self::Type) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity>;

    fn not_eq(
        other: Self::Type,
    ) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity>;

    fn is_in(
        other: Vec<Self::Type>,
    ) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity>;

    fn is_not_in(
        other: Vec<Self::Type>,
    ) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity>;
}

impl<T> ComparableColumn for T
where
    T: Column,
    T::Type: PartialEq,
{
    fn eq(other: Self::Type) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity> {
        BinaryExpr::new(
            Self::full_column_name(),
            QueryVariable(other),
            BinaryExprOperand::Equals,
        )
        .into()
    }

    fn not_eq(
        other: Self::Type,
    ) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity> {
        BinaryExpr::new(
            Self::full_column_name(),
            QueryVariable(other),
            BinaryExprOperand::DoesNotEqual,
        )
        .into()
    }

    fn is_in(
        other: Vec<Self::Type>,
    ) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity> {
        InExpr::new(Self::full_column_name(), other, false).into()
    }

    fn is_not_in(
        other: Vec<Self::Type>,
    ) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity> {
        InExpr::new(Self::full_column_name(), other, true).into()
    }
}

/// Column types that hold text, nullable or not.
pub trait TextType {}

impl TextType for String {}
impl TextType for Option<String> {}

pub trait StringComparableColumn: Column {
    fn like(
        pattern: String,
    ) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity> {
        BinaryExpr::new(
            Self::full_column_name(),
            QueryVariable(pattern),
            BinaryExprOperand::Like,
        )
        .into()
    }

    fn ilike(
        pattern: String,
    ) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity> {
        BinaryExpr::new(
            Self::full_column_name(),
            QueryVariable(pattern),
            BinaryExprOperand::ILike,
        )
        .into()
    }
}

impl<T> StringComparableColumn for T
where
    T: Column,
    T::Type: TextType,
{
}

pub trait RangeColumn: Column {
    fn gt(other: Self::Type) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity>;

    fn lt(other: Self::Type) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity>;

    fn geq(other: Self::Type) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity>;

    fn leq(other: Self::Type) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity>;

    fn between(
        left: Self::Type,
        right: Self::Type,
    ) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity>;

    fn not_between(
        left: Self::Type,
        right: Self::Type,
    ) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity>;
}

impl<T> RangeColumn for T
where
    T: Column,
    T::Type: PartialOrd,
{
    fn gt(other: Self::Type) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity> {
        BinaryExpr::new(
            Self::full_column_name(),
            QueryVariable(other),
            BinaryExprOperand::Gt,
        )
        .into()
    }

    fn lt(other: Self::Type) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity> {
        BinaryExpr::new(
            Self::full_column_name(),
            QueryVariable(other),
            BinaryExprOperand::Lt,
        )
        .into()
    }

    fn geq(other: Self::Type) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity> {
        BinaryExpr::new(
            Self::full_column_name(),
            QueryVariable(other),
            BinaryExprOperand::Geq,
        )
        .into()
    }

    fn leq(other: Self::Type) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity> {
        BinaryExpr::new(
            Self::full_column_name(),
            QueryVariable(other),
            BinaryExprOperand::Leq,
        )
        .into()
    }

    fn between(
        left: Self::Type,
        right: Self::Type,
    ) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity> {
        BinaryExpr::new(
            Self::full_column_name(),
            BinaryExpr::new(
                QueryVariable(left),
                QueryVariable(right),
                BinaryExprOperand::And,
            ),
            BinaryExprOperand::Between,
        )
        .into()
    }

    fn not_between(
        left: Self::Type,
        right: Self::Type,
    ) -> EntityConditionExpr<impl PushToQuery + Send + Sync, Self::Entity> {
        BinaryExpr::new(
            Self::full_column_name(),
            BinaryExpr::new(
                QueryVariable(left),
                QueryVariable(right),
                BinaryExprOperand::And,
            ),
            BinaryExprOperand::NotBetween,
        )
        .into()
    }
}
