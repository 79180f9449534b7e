//! String helpers for hand-built statements. All identifiers are double-quoted and all values
//! are `$n` placeholders.

use itertools::Itertools;

use crate::error::{Error, Result};

#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `"a","b","c"`
#[must_use]
pub fn quote_list<S: AsRef<str>>(columns: &[S]) -> String {
    columns.iter().map(|e| quote_ident(e.as_ref())).join(",")
}

/// `$1,$2,$3` for a group size of 1, `($1,$2),($3,$4)` for a group size of 2.
#[must_use]
pub fn placeholders(count: usize, start: usize, group: usize) -> String {
    let mut out = String::new();

    for i in 0..count {
        if i != 0 {
            out.push(',');
        }
        if group > 1 && i % group == 0 {
            out.push('(');
        }
        out.push('$');
        out.push_str(&(start + i).to_string());
        if group > 1 && (i + 1) % group == 0 {
            out.push(')');
        }
    }

    out
}

/// `"a"=$1,"b"=$2`
#[must_use]
pub fn set_param_names<S: AsRef<str>>(columns: &[S], start: usize) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}=${}", quote_ident(e.as_ref()), start + i))
        .join(",")
}

/// `"a"=$1 AND "b"=$2`
#[must_use]
pub fn where_clause<S: AsRef<str>>(columns: &[S], start: usize) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}=${}", quote_ident(e.as_ref()), start + i))
        .join(" AND ")
}

/// `("a","b") IN (($1,$2),($3,$4))` matching `rows` tuples of `columns`.
#[must_use]
pub fn where_in_clause<S: AsRef<str>>(columns: &[S], start: usize, rows: usize) -> String {
    format!(
        "({}) IN ({})",
        quote_list(columns),
        placeholders(columns.len() * rows, start, columns.len())
    )
}

/// Elements of `a` that are not in `b`, in the order of `a`.
#[must_use]
pub fn set_complement<'a>(a: &[&'a str], b: &[&str]) -> Vec<&'a str> {
    a.iter().filter(|e| !b.contains(e)).copied().collect()
}

/// Compute the columns an insert writes, and the defaulted columns it reads back.
///
/// A non-empty whitelist is inserted as is. Otherwise every column without a default is inserted,
/// plus the defaulted columns listed in `non_zero_defaults`, in table order.
#[must_use]
pub fn insert_column_set<'a>(
    all: &[&'a str],
    with_default: &[&'a str],
    without_default: &[&'a str],
    non_zero_defaults: &[&'a str],
    whitelist: &[&'a str],
) -> (Vec<&'a str>, Vec<&'a str>) {
    if !whitelist.is_empty() {
        return (whitelist.to_vec(), set_complement(with_default, whitelist));
    }

    let insert = all
        .iter()
        .filter(|e| without_default.contains(e) || non_zero_defaults.contains(e))
        .copied()
        .collect::<Vec<_>>();
    let returning = set_complement(with_default, &insert);

    (insert, returning)
}

/// The whitelist if given, otherwise every column except the primary key.
#[must_use]
pub fn update_column_set<'a>(
    all: &[&'a str],
    primary_key: &[&'a str],
    whitelist: &[&'a str],
) -> Vec<&'a str> {
    if whitelist.is_empty() {
        set_complement(all, primary_key)
    } else {
        whitelist.to_vec()
    }
}

/// Key of a cached insert or update statement.
#[must_use]
pub fn cache_key(whitelist: &[&str], non_zero_defaults: &[&str]) -> String {
    format!("{}.{}", whitelist.join(","), non_zero_defaults.join(","))
}

/// Key of a cached upsert statement.
#[must_use]
pub fn upsert_cache_key(
    update_on_conflict: bool,
    conflict: &[&str],
    update: &[&str],
    whitelist: &[&str],
    non_zero_defaults: &[&str],
) -> String {
    format!(
        "{}.{}.{}.{}",
        if update_on_conflict { 't' } else { 'f' },
        conflict.join(","),
        update.join(","),
        cache_key(whitelist, non_zero_defaults),
    )
}

/// `INSERT ... ON CONFLICT ...` for PostgreSQL.
#[must_use]
pub fn upsert_query(
    table: &str,
    update_on_conflict: bool,
    returning: &[&str],
    update: &[&str],
    conflict: &[&str],
    insert: &[&str],
) -> String {
    let mut out = format!("INSERT INTO {}", quote_ident(table));

    if insert.is_empty() {
        out.push_str(" DEFAULT VALUES");
    } else {
        out.push_str(&format!(
            " ({}) VALUES ({})",
            insert.iter().map(|e| quote_ident(e)).join(", "),
            placeholders(insert.len(), 1, 1)
        ));
    }

    out.push_str(" ON CONFLICT ");
    if !update_on_conflict || update.is_empty() {
        out.push_str("DO NOTHING");
    } else {
        out.push_str(&format!(
            "({}) DO UPDATE SET {}",
            conflict.iter().map(|e| quote_ident(e)).join(", "),
            update
                .iter()
                .map(|e| {
                    let quoted = quote_ident(e);
                    format!("{quoted} = EXCLUDED.{quoted}")
                })
                .join(",")
        ));
    }

    if !returning.is_empty() {
        out.push_str(" RETURNING ");
        out.push_str(&returning.iter().map(|e| quote_ident(e)).join(", "));
    }

    out
}

/// Map user supplied column names onto the table's own names.
///
/// # Errors
///
/// [`Error::UnknownColumn`] for the first name that is not a column of `table`.
pub fn resolve_columns(
    table: &'static str,
    known: &'static [&'static str],
    columns: &[&str],
) -> Result<Vec<&'static str>> {
    columns
        .iter()
        .map(|column| {
            known
                .iter()
                .find(|e| **e == *column)
                .copied()
                .ok_or_else(|| Error::UnknownColumn {
                    table,
                    column: (*column).to_string(),
                })
        })
        .collect()
}
