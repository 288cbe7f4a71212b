//! Query builder - Filtri, valori legati e paginazione offset/limit
//!
//! Tutte le query generate dal repository generico passano da qui:
//! `Filter` produce la clausola WHERE, `PageQuery` aggiunge il filtro
//! testuale e LIMIT/OFFSET, `PageInfo` descrive la pagina restituita.

use super::traits::Entity;
use crate::core::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite};

/// A value bound into a generated statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Null,
}

/// Column/value pairs for inserts and partial updates
pub type FieldMap = Vec<(&'static str, Value)>;

impl Value {
    pub(crate) fn push_bind_to(self, builder: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            Self::Int(v) => builder.push_bind(v),
            Self::Text(v) => builder.push_bind(v),
            Self::Timestamp(v) => builder.push_bind(v),
            Self::Null => builder.push("NULL"),
        };
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Resolves a caller-supplied field name to the entity's declared column.
pub(crate) fn resolve_column<E: Entity>(field: &str) -> StoreResult<&'static str> {
    E::COLUMNS
        .iter()
        .copied()
        .find(|column| *column == field)
        .ok_or_else(|| StoreError::InvalidField(format!("{}.{}", E::TABLE, field)))
}

/// Columns to select: everything when `fields` is empty, otherwise `id`
/// plus the requested fields.
pub(crate) fn projection<E: Entity>(fields: &[&str]) -> StoreResult<Vec<&'static str>> {
    if fields.is_empty() {
        return Ok(E::COLUMNS.to_vec());
    }
    let mut columns = vec!["id"];
    for field in fields {
        let column = resolve_column::<E>(field)?;
        if !columns.contains(&column) {
            columns.push(column);
        }
    }
    Ok(columns)
}

/// Equality conditions ANDed together.
///
/// Tombstoned rows are excluded unless [`Filter::including_deleted`] is used.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(&'static str, Value)>,
    include_deleted: bool,
}

impl Filter {
    /// Only rows not yet soft-deleted
    pub fn active() -> Self {
        Self::default()
    }

    /// `column = value`, or `column IS NULL` for [`Value::Null`]
    pub fn eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.clauses.push((column, value.into()));
        self
    }

    pub fn including_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    pub(crate) fn push_where(&self, builder: &mut QueryBuilder<'_, Sqlite>, text: Option<&TextFilter>) {
        let mut prefix = " WHERE ";

        if !self.include_deleted {
            builder.push(prefix).push("deleted_at IS NULL");
            prefix = " AND ";
        }

        for (column, value) in &self.clauses {
            builder.push(prefix).push(*column);
            match value {
                Value::Null => {
                    builder.push(" IS NULL");
                }
                other => {
                    builder.push(" = ");
                    other.clone().push_bind_to(builder);
                }
            }
            prefix = " AND ";
        }

        if let Some(text) = text {
            builder.push(prefix).push("(");
            for (i, column) in text.columns.iter().enumerate() {
                if i > 0 {
                    builder.push(" OR ");
                }
                // instr è case-sensitive, a differenza di LIKE in SQLite
                builder
                    .push("instr(")
                    .push(*column)
                    .push(", ")
                    .push_bind(text.needle.clone())
                    .push(") > 0");
            }
            builder.push(")");
        }
    }
}

/// Substring match of `needle` against any of `columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFilter {
    pub needle: String,
    pub columns: Vec<&'static str>,
}

/// Page request: 1-based page, page size, optional free-text query.
///
/// A `page_size <= 0` selects all remaining rows; only
/// [`PageQuery::unbounded`] produces it, external callers are clamped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageQuery {
    pub page: i64,
    pub page_size: i64,
    pub query: Option<String>,
    pub query_fields: Vec<String>,
}

impl PageQuery {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page,
            page_size,
            ..Self::default()
        }
    }

    /// Every row matching the filter, used by subtree walks.
    pub fn unbounded() -> Self {
        Self::new(1, 0)
    }

    pub fn with_query<I, S>(mut self, query: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query = Some(query.into());
        self.query_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Page number, with anything below 1 treated as the first page
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    pub fn is_unbounded(&self) -> bool {
        self.page_size <= 0
    }

    pub fn limit_offset(&self) -> Option<(i64, i64)> {
        if self.is_unbounded() {
            return None;
        }
        let offset = (self.page() - 1).saturating_mul(self.page_size);
        Some((self.page_size, offset))
    }

    /// Text predicate for `E`, or `None` when the query is missing or empty
    /// or no candidate field was given.
    pub fn text_filter<E: Entity>(&self) -> StoreResult<Option<TextFilter>> {
        let needle = match self.query.as_deref() {
            Some(needle) if !needle.is_empty() && !self.query_fields.is_empty() => needle,
            _ => return Ok(None),
        };
        let columns = self
            .query_fields
            .iter()
            .map(|field| resolve_column::<E>(field))
            .collect::<StoreResult<Vec<_>>>()?;

        Ok(Some(TextFilter {
            needle: needle.to_string(),
            columns,
        }))
    }

    pub fn page_info(&self, total: i64) -> PageInfo {
        PageInfo {
            page: self.page(),
            page_size: self.page_size.max(0),
            total,
        }
    }
}

/// Descriptor returned alongside every paginated fetch
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: i64,
    pub page_size: i64,
    /// Rows matching the filter, independent of the page bounds
    pub total: i64,
}
