use crate::{
    entity::Entity,
    error::{Error, Result},
};

use super::sql;

/// A cached `INSERT`, possibly with a `RETURNING` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    pub sql: String,
    /// Columns bound as `$1..$n`, in order.
    pub value_columns: Vec<&'static str>,
    /// Columns read back from the returned row.
    pub return_columns: Vec<&'static str>,
}

/// A cached `UPDATE ... WHERE <primary key>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatement {
    pub sql: String,
    /// Updated columns followed by the primary key columns, bound as `$1..$n`.
    pub bind_columns: Vec<&'static str>,
}

#[must_use]
pub fn build_insert<E: Entity>(
    whitelist: &[&'static str],
    non_zero_defaults: &[&'static str],
) -> InsertStatement {
    let (insert, returning) = sql::insert_column_set(
        E::COLUMN_NAMES,
        E::COLUMNS_WITH_DEFAULT,
        E::COLUMNS_WITHOUT_DEFAULT,
        non_zero_defaults,
        whitelist,
    );

    let mut statement = if insert.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES", sql::quote_ident(E::TABLE_NAME))
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            sql::quote_ident(E::TABLE_NAME),
            sql::quote_list(&insert),
            sql::placeholders(insert.len(), 1, 1)
        )
    };

    if !returning.is_empty() {
        statement.push_str(" RETURNING ");
        statement.push_str(&sql::quote_list(&returning));
    }

    InsertStatement {
        sql: statement,
        value_columns: insert,
        return_columns: returning,
    }
}

/// # Errors
///
/// [`Error::EmptyWhitelist`] if every column is part of the primary key and no whitelist was
/// given.
pub fn build_update<E: Entity>(whitelist: &[&'static str]) -> Result<UpdateStatement> {
    let update = sql::update_column_set(E::COLUMN_NAMES, E::PRIMARY_KEY_COLUMNS, whitelist);

    if update.is_empty() {
        return Err(Error::EmptyWhitelist {
            table: E::TABLE_NAME,
        });
    }

    let statement = format!(
        "UPDATE {} SET {} WHERE {}",
        sql::quote_ident(E::TABLE_NAME),
        sql::set_param_names(&update, 1),
        sql::where_clause(E::PRIMARY_KEY_COLUMNS, update.len() + 1)
    );

    Ok(UpdateStatement {
        sql: statement,
        bind_columns: update
            .into_iter()
            .chain(E::PRIMARY_KEY_COLUMNS.iter().copied())
            .collect(),
    })
}

/// Empty `conflict_columns` fall back to the primary key.
///
/// # Errors
///
/// [`Error::EmptyUpsertUpdate`] if there are no columns to update on conflict.
pub fn build_upsert<E: Entity>(
    update_on_conflict: bool,
    conflict_columns: &[&'static str],
    update_columns: &[&'static str],
    whitelist: &[&'static str],
    non_zero_defaults: &[&'static str],
) -> Result<InsertStatement> {
    let (insert, returning) = sql::insert_column_set(
        E::COLUMN_NAMES,
        E::COLUMNS_WITH_DEFAULT,
        E::COLUMNS_WITHOUT_DEFAULT,
        non_zero_defaults,
        whitelist,
    );

    let update = sql::update_column_set(E::COLUMN_NAMES, E::PRIMARY_KEY_COLUMNS, update_columns);
    if update.is_empty() {
        return Err(Error::EmptyUpsertUpdate {
            table: E::TABLE_NAME,
        });
    }

    let conflict = if conflict_columns.is_empty() {
        E::PRIMARY_KEY_COLUMNS
    } else {
        conflict_columns
    };

    Ok(InsertStatement {
        sql: sql::upsert_query(
            E::TABLE_NAME,
            update_on_conflict,
            &returning,
            &update,
            conflict,
            &insert,
        ),
        value_columns: insert,
        return_columns: returning,
    })
}
