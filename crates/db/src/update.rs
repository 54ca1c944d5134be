//! Partial UPDATE statements built from the fields a caller supplied.
//!
//! Each update DTO implements [`Changeset`], naming its columns as string
//! literals, so request data never reaches the SQL text. A field is written
//! when it is present (`Some`), whatever its value: `0`, `""` and `false`
//! are stored like any other value.

use ccb_core::types::{Date, DbId};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

// ---------------------------------------------------------------------------
// Bind values
// ---------------------------------------------------------------------------

/// Typed bind value for a dynamically built SET clause.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    BigInt(i64),
    Int(i32),
    Text(String),
    Date(Date),
    Bool(bool),
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        Self::BigInt(v)
    }
}

impl From<i32> for BindValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Date> for BindValue {
    fn from(v: Date) -> Self {
        Self::Date(v)
    }
}

impl From<bool> for BindValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

// ---------------------------------------------------------------------------
// Changeset
// ---------------------------------------------------------------------------

/// An update DTO whose present fields map onto a fixed set of columns.
pub trait Changeset {
    /// Record every present field on `update`, in a stable column order.
    fn apply(&self, update: &mut PartialUpdate);

    /// Whether at least one updatable field is present.
    fn has_changes(&self) -> bool {
        let mut probe = PartialUpdate::new("", "");
        self.apply(&mut probe);
        !probe.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PartialUpdate
// ---------------------------------------------------------------------------

/// Collects `column = $n` assignments and their bind values for one table.
///
/// The row id is always bound last and used in the WHERE clause.
#[derive(Debug)]
pub struct PartialUpdate {
    table: &'static str,
    key_column: &'static str,
    columns: Vec<&'static str>,
    values: Vec<BindValue>,
}

impl PartialUpdate {
    pub fn new(table: &'static str, key_column: &'static str) -> Self {
        Self {
            table,
            key_column,
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Assign `column` if `value` is present; absent values are skipped.
    pub fn set<V>(&mut self, column: &'static str, value: &Option<V>) -> &mut Self
    where
        V: Clone + Into<BindValue>,
    {
        if let Some(v) = value {
            self.columns.push(column);
            self.values.push(v.clone().into());
        }
        self
    }

    /// True when no column has been assigned.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Assigned column names, in assignment order.
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// Bind values, in the same order as [`columns`](Self::columns).
    pub fn values(&self) -> &[BindValue] {
        &self.values
    }

    /// Render the statement text.
    ///
    /// `UPDATE {table} SET a = $1, b = $2 WHERE {key} = $3 RETURNING {returning}`
    pub fn to_sql(&self, returning: &str) -> String {
        let assignments: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ${}", i + 1))
            .collect();
        let key_idx = self.columns.len() + 1;
        format!(
            "UPDATE {} SET {} WHERE {} = ${key_idx} RETURNING {returning}",
            self.table,
            assignments.join(", "),
            self.key_column,
        )
    }

    /// Execute against the row identified by `id`.
    ///
    /// Returns `None` if no such row exists. Callers must not execute an
    /// empty update; repositories check [`is_empty`](Self::is_empty) first.
    pub async fn fetch_optional<T>(
        self,
        pool: &PgPool,
        id: DbId,
        returning: &str,
    ) -> Result<Option<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = self.to_sql(returning);
        tracing::debug!(table = self.table, columns = ?self.columns, id, "Partial update");

        let mut query = sqlx::query_as::<_, T>(&sql);
        for value in self.values {
            query = match value {
                BindValue::BigInt(v) => query.bind(v),
                BindValue::Int(v) => query.bind(v),
                BindValue::Text(v) => query.bind(v),
                BindValue::Date(v) => query.bind(v),
                BindValue::Bool(v) => query.bind(v),
            };
        }
        query.bind(id).fetch_optional(pool).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
