//! Common repository traits
//!
//! This module defines the interfaces an entity implements to be handled by
//! the generic [`Repository`](super::Repository): table metadata, insert
//! values, tombstone rewriting, tree links and maintained counters.

use super::query::FieldMap;
use crate::entities::{Counter, ObjectType};
use sqlx::FromRow;
use sqlx::sqlite::SqliteRow;

/// A row type stored in its own table with an integer primary key `id`
/// and a nullable `deleted_at` tombstone timestamp.
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Send + Sync + Unpin + 'static {
    /// Table name
    const TABLE: &'static str;

    /// Name used in `NotFound` errors
    const NAME: &'static str;

    /// Every selectable column, in declaration order.
    ///
    /// Projections, partial updates and text filters are validated against
    /// this list before any SQL is built.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i64;
}

/// Trait for the data needed to insert a new `E`
///
/// # Type Parameters
/// * `E` - Entity created from these values (id and timestamps are assigned on insert)
pub trait Insertable<E: Entity> {
    /// Column/value pairs to insert, without `id`, `created_at` and `updated_at`
    fn values(&self) -> FieldMap;
}

/// Entities deleted logically rather than physically.
///
/// On delete every unique column is rewritten to `original-token` so that a
/// new active row may reuse the original value.
pub trait Tombstone: Entity {
    /// Columns read by [`Tombstone::tombstone_fields`]
    const UNIQUE_COLUMNS: &'static [&'static str] = &[];

    /// Rewritten unique columns for a tombstone carrying `token`
    fn tombstone_fields(&self, _token: &str) -> FieldMap {
        Vec::new()
    }
}

/// Node of a parent-pointer tree.
pub trait TreeNode: Entity {
    const PARENT_COLUMN: &'static str = "parent_id";
}

/// Entity owning one or more maintained counters.
pub trait Counted: Entity {
    const OBJECT_TYPE: ObjectType;

    /// Current value of `counter`, `None` if this entity does not carry it
    fn counter(&self, counter: Counter) -> Option<i64>;

    fn supports(counter: Counter) -> bool;
}

/// Typed join row recording that a user engaged with an object.
pub trait Engagement: Tombstone {
    /// Counter moved on the target when a row is created or tombstoned
    const COUNTER: Counter;

    fn user_id(&self) -> i64;
    fn object_id(&self) -> i64;
    fn object_type(&self) -> ObjectType;
}
