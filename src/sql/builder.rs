//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for a table keyed by a single integer column.

use super::params::SqlValue;
use sqlx::{Postgres, QueryBuilder};

/// Quote identifier for PostgreSQL (only ever called with names from this crate).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Ordered column assignments for an insert or a partial update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Changeset {
    values: Vec<(&'static str, SqlValue)>,
}

impl Changeset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `column`, including an explicit NULL.
    pub fn set(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.values.push((column, value.into()));
        self
    }

    /// Assign `column` only when a value is present. Partial updates are built from these.
    pub fn set_some<T>(self, column: &'static str, value: Option<T>) -> Self
    where
        T: Into<SqlValue>,
    {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[cfg(test)]
    pub fn columns(&self) -> Vec<&'static str> {
        self.values.iter().map(|(c, _)| *c).collect()
    }
}

/// `INSERT INTO table (cols) VALUES (binds) RETURNING *`. An empty changeset inserts defaults.
pub fn insert(table: &str, changes: Changeset) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("INSERT INTO {}", quoted(table)));
    if changes.is_empty() {
        qb.push(" DEFAULT VALUES");
    } else {
        let cols: Vec<String> = changes.values.iter().map(|(c, _)| quoted(c)).collect();
        qb.push(format!(" ({}) VALUES (", cols.join(", ")));
        let mut sep = qb.separated(", ");
        for (_, v) in changes.values {
            v.push_separated(&mut sep);
        }
        qb.push(")");
    }
    qb.push(" RETURNING *");
    qb
}

/// `UPDATE table SET col = bind, ... WHERE pk = bind RETURNING *`.
/// Returns `None` for an empty changeset; callers then read the row unchanged.
pub fn update(table: &str, pk: &str, id: i32, changes: Changeset) -> Option<QueryBuilder<'static, Postgres>> {
    if changes.is_empty() {
        return None;
    }
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", quoted(table)));
    for (i, (col, v)) in changes.values.into_iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(format!("{} = ", quoted(col)));
        v.push_to(&mut qb);
    }
    qb.push(format!(" WHERE {} = ", quoted(pk)));
    qb.push_bind(id);
    qb.push(" RETURNING *");
    Some(qb)
}

/// SELECT by primary key. Caller binds the id as `$1`.
pub fn select_by_id(table: &str, pk: &str) -> String {
    format!("SELECT * FROM {} WHERE {} = $1", quoted(table), quoted(pk))
}

/// SELECT page ordered by primary key. Caller binds limit `$1` and offset `$2`.
pub fn select_page(table: &str, pk: &str) -> String {
    format!(
        "SELECT * FROM {} ORDER BY {} LIMIT $1 OFFSET $2",
        quoted(table),
        quoted(pk)
    )
}

/// DELETE by primary key returning the removed row. Caller binds the id as `$1`.
pub fn delete_by_id(table: &str, pk: &str) -> String {
    format!("DELETE FROM {} WHERE {} = $1 RETURNING *", quoted(table), quoted(pk))
}
