pub mod assign;
pub mod cache;
pub mod parse;
pub mod relation;
pub mod select;
pub mod sql;
pub mod statement;
pub(crate) mod write;

use std::fmt::Display;

use sqlx::{Encode, Postgres, QueryBuilder, Type};

use crate::entity::{column::ColumnName, relation::SqlKey};

pub trait PushToQuery {
    /// Push the object into a query builder.
    fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>);
}

impl<T: PushToQuery + ?Sized> PushToQuery for Box<T> {
    fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        self.as_ref().push_to(builder);
    }
}

impl<T: PushToQuery + ?Sized> PushToQuery for &T {
    fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        (**self).push_to(builder);
    }
}

/// A value that is sent to the database as a bound parameter.
pub struct QueryVariable<T>(pub(crate) T)
where
    T: for<'a> Encode<'a, Postgres> + Type<Postgres> + Clone + Send + Sync + 'static;

impl<T> PushToQuery for QueryVariable<T>
where
    T: for<'a> Encode<'a, Postgres> + Type<Postgres> + Clone + Send + Sync + 'static,
{
    fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push_bind(self.0.clone());
    }
}

/// A fixed SQL fragment such as `FALSE`.
pub struct Literal(pub(crate) &'static str);

impl PushToQuery for Literal {
    fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(self.0);
    }
}

pub struct BracketsExpr<T: PushToQuery>(T);

impl<T: PushToQuery> BracketsExpr<T> {
    pub(crate) const fn new(inner: T) -> Self {
        Self(inner)
    }
}

impl<T: PushToQuery> PushToQuery for BracketsExpr<T> {
    fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push("(");
        self.0.push_to(builder);
        builder.push(")");
    }
}

pub enum BinaryExprOperand {
    Equals,
    DoesNotEqual,
    Like,
    ILike,
    And,
    Or,
    Between,
    NotBetween,
    Gt,
    Lt,
    Geq,
    Leq,
}

impl Display for BinaryExprOperand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Equals => "=",
                Self::DoesNotEqual => "!=",
                Self::Like => "LIKE",
                Self::ILike => "ILIKE",
                Self::And => "AND",
                Self::Or => "OR",
                Self::Between => "BETWEEN",
                Self::NotBetween => "NOT BETWEEN",
                Self::Gt => ">",
                Self::Lt => "<",
                Self::Geq => ">=",
                Self::Leq => "<=",
            }
        )
    }
}

pub struct BinaryExpr<T, C>
where
    T: PushToQuery,
    C: PushToQuery,
{
    a: T,
    b: C,
    operand: BinaryExprOperand,
}

impl<T, C> BinaryExpr<T, C>
where
    T: PushToQuery,
    C: PushToQuery,
{
    pub(crate) const fn new(left: T, right: C, operand: BinaryExprOperand) -> Self {
        Self {
            a: left,
            b: right,
            operand,
        }
    }
}

impl<T, C> PushToQuery for BinaryExpr<T, C>
where
    T: PushToQuery,
    C: PushToQuery,
{
    fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        self.a.push_to(builder);
        builder.push(format_args!(" {} ", self.operand));
        self.b.push_to(builder);
    }
}

/// `column IN (...)` or `column NOT IN (...)`.
///
/// An empty list cannot be expressed in SQL, so it renders as `FALSE` (`TRUE` when negated).
pub struct InExpr<T>
where
    T: for<'a> Encode<'a, Postgres> + Type<Postgres> + Clone + Send + Sync + 'static,
{
    column: ColumnName,
    values: Vec<QueryVariable<T>>,
    negated: bool,
}

impl<T> InExpr<T>
where
    T: for<'a> Encode<'a, Postgres> + Type<Postgres> + Clone + Send + Sync + 'static,
{
    pub(crate) fn new(column: ColumnName, values: impl IntoIterator<Item = T>, negated: bool) -> Self {
        Self {
            column,
            values: values.into_iter().map(QueryVariable).collect(),
            negated,
        }
    }
}

impl<T> PushToQuery for InExpr<T>
where
    T: for<'a> Encode<'a, Postgres> + Type<Postgres> + Clone + Send + Sync + 'static,
{
    fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        if self.values.is_empty() {
            builder.push(if self.negated { "TRUE" } else { "FALSE" });
            return;
        }

        self.column.push_to(builder);
        builder.push(if self.negated { " NOT IN (" } else { " IN (" });
        self.values.iter().enumerate().for_each(|(i, e)| {
            if i > 0 {
                builder.push(", ");
            }
            e.push_to(builder);
        });
        builder.push(")");
    }
}

pub(crate) enum SingletonExprOperand {
    IsNull,
    IsNotNull,
}

impl Display for SingletonExprOperand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::IsNull => "IS NULL",
                Self::IsNotNull => "IS NOT NULL",
            }
        )
    }
}

pub(crate) struct SingletonExpr<T>
where
    T: PushToQuery,
{
    inner: T,
    operand: SingletonExprOperand,
}

impl<T> SingletonExpr<T>
where
    T: PushToQuery,
{
    pub const fn new(inner: T, operand: SingletonExprOperand) -> Self {
        Self { inner, operand }
    }
}

impl<T> PushToQuery for SingletonExpr<T>
where
    T: PushToQuery,
{
    fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        self.inner.push_to(builder);
        builder.push(format_args!(" {}", self.operand));
    }
}

/// `column IN (SELECT selected FROM table WHERE condition)`.
///
/// The sub-select has its own scope, so `condition` may name `table` even when it is the table of
/// the outer query.
pub(crate) struct SubSelectExpr {
    column: ColumnName,
    selected: ColumnName,
    table: &'static str,
    condition: Box<dyn PushToQuery + Send + Sync>,
}

impl SubSelectExpr {
    pub(crate) fn new(
        column: ColumnName,
        selected: ColumnName,
        table: &'static str,
        condition: Box<dyn PushToQuery + Send + Sync>,
    ) -> Self {
        Self {
            column,
            selected,
            table,
            condition,
        }
    }
}

impl PushToQuery for SubSelectExpr {
    fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        self.column.push_to(builder);
        builder.push(" IN (SELECT ");
        self.selected.push_to(builder);
        builder.push(format_args!(" FROM {} WHERE ", sql::quote_ident(self.table)));
        self.condition.push_to(builder);
        builder.push(")");
    }
}

/// `column = key`, or `FALSE` when there is no key to compare against.
pub(crate) fn key_condition<K: SqlKey>(
    column: ColumnName,
    key: Option<K>,
) -> Box<dyn PushToQuery + Send + Sync> {
    match key {
        Some(key) => Box::new(BinaryExpr::new(
            column,
            QueryVariable(key),
            BinaryExprOperand::Equals,
        )),
        None => Box::new(Literal("FALSE")),
    }
}

pub(crate) fn keys_condition<K: SqlKey>(
    column: ColumnName,
    keys: Vec<K>,
) -> Box<dyn PushToQuery + Send + Sync> {
    Box::new(InExpr::new(column, keys, false))
}

#[cfg(test)]
mod test {
    use sqlx::{Postgres, QueryBuilder};

    use super::{
        BinaryExpr, BinaryExprOperand, InExpr, Literal, PushToQuery, QueryVariable, SubSelectExpr,
        key_condition,
    };
    use crate::entity::column::ColumnName;

    fn render(expr: &impl PushToQuery) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("");
        expr.push_to(&mut builder);
        builder.into_sql()
    }

    #[test]
    fn test_in_expr() {
        let column = ColumnName::new_with_table_or_alias("labels", "id");
        assert_eq!(
            render(&InExpr::new(column, vec![1, 2, 3], false)),
            "\"labels\".\"id\" IN ($1, $2, $3)"
        );
    }

    #[test]
    fn test_empty_in_expr() {
        let column = ColumnName::new_with_table_or_alias("labels", "id");
        assert_eq!(render(&InExpr::<i32>::new(column, vec![], false)), "FALSE");

        let column = ColumnName::new_with_table_or_alias("labels", "id");
        assert_eq!(render(&InExpr::<i32>::new(column, vec![], true)), "TRUE");
    }

    #[test]
    fn test_nested_binary_expr() {
        let expr = BinaryExpr::new(
            BinaryExpr::new(
                ColumnName::new("catorder"),
                QueryVariable(3),
                BinaryExprOperand::Gt,
            ),
            BinaryExpr::new(
                ColumnName::new("secure"),
                QueryVariable(0),
                BinaryExprOperand::Equals,
            ),
            BinaryExprOperand::Or,
        );

        assert_eq!(render(&expr), "\"catorder\" > $1 OR \"secure\" = $2");
    }

    #[test]
    fn test_missing_key_matches_nothing() {
        let column = ColumnName::new_with_table_or_alias("languages", "code3");
        assert_eq!(render(&key_condition::<String>(column, None)), "FALSE");
    }

    #[test]
    fn test_sub_select() {
        let expr = SubSelectExpr::new(
            ColumnName::new_with_table_or_alias("catalogs", "id"),
            ColumnName::new_with_table_or_alias("catalogs", "parent_id"),
            "catalogs",
            Box::new(Literal("TRUE")),
        );

        assert_eq!(
            render(&expr),
            "\"catalogs\".\"id\" IN (SELECT \"catalogs\".\"parent_id\" FROM \"catalogs\" WHERE TRUE)"
        );
    }

    #[test]
    fn test_borrowed_expr() {
        let boxed: Box<dyn PushToQuery + Send + Sync> = Box::new(Literal("FALSE"));
        assert_eq!(render(&&boxed), "FALSE");
    }
}
