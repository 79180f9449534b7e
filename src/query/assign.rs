use std::marker::PhantomData;

use sqlx::{Encode, Postgres, QueryBuilder, Type};

use crate::entity::{Entity, column::Column, model::PgQuery};

use super::{PushToQuery, QueryVariable};

/// A value assigned by a bulk update.
pub trait AssignedValue: PushToQuery + Send + Sync {
    fn bind_to<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q>;
}

impl<T> AssignedValue for QueryVariable<T>
where
    T: for<'a> Encode<'a, Postgres> + Type<Postgres> + Clone + Send + Sync + 'static,
{
    fn bind_to<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(self.0.clone())
    }
}

/// Column assignments of a bulk `UPDATE` on `E`, in the order they were added.
pub struct Assignments<E: Entity> {
    marker: PhantomData<E>,
    values: Vec<(&'static str, Box<dyn AssignedValue>)>,
}

impl<E: Entity> Default for Assignments<E> {
    fn default() -> Self {
        Self {
            marker: PhantomData,
            values: Vec::new(),
        }
    }
}

impl<E: Entity> Assignments<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to the column `C`. Assigning the same column twice keeps the last value.
    #[must_use]
    pub fn set<C>(mut self, value: C::Type) -> Self
    where
        C: Column<Entity = E>,
    {
        let value: Box<dyn AssignedValue> = Box::new(QueryVariable(value));

        match self.values.iter_mut().find(|(name, _)| *name == C::NAME) {
            Some(slot) => slot.1 = value,
            None => self.values.push((C::NAME, value)),
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn columns(&self) -> Vec<&'static str> {
        self.values.iter().map(|(name, _)| *name).collect()
    }

    /// Bind every assigned value, in order.
    #[must_use]
    pub fn bind_to<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        self.values
            .iter()
            .fold(query, |query, (_, value)| value.bind_to(query))
    }

    /// Push `"a" = $1, "b" = $2` to a query builder.
    pub(crate) fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        self.values.iter().enumerate().for_each(|(i, (name, value))| {
            if i > 0 {
                builder.push(", ");
            }
            builder.push(super::sql::quote_ident(name));
            builder.push(" = ");
            value.push_to(builder);
        });
    }
}
