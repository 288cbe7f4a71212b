//! Tombstone - Soft delete che preserva i vincoli di unicità
//!
//! Al posto di cancellare la riga, i campi univoci vengono riscritti in
//! `valore-token` e `deleted_at` viene impostato nello stesso UPDATE: la
//! riga conserva id e riferimenti ma esce dallo spazio dei valori attivi.

use crate::core::error::StoreResult;
use crate::repositories::{Repository, Tombstone, Value};
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Fresh random suffix for a tombstone
pub fn fresh_token() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn tombstoned(value: &str, token: &str) -> String {
    format!("{value}-{token}")
}

/// Marks `entity` deleted, rewriting its unique columns in the same statement.
///
/// # Returns
/// * `Err(StoreError::NotFound)` - The row is missing or already tombstoned
#[instrument(skip(repo, conn, entity), fields(table = E::TABLE, id = entity.id()))]
pub async fn soft_delete<E: Tombstone>(
    repo: &Repository<E>,
    conn: &mut SqliteConnection,
    entity: &E,
) -> StoreResult<()> {
    let token = fresh_token();
    let mut fields = entity.tombstone_fields(&token);
    fields.push(("deleted_at", Value::Timestamp(Utc::now())));

    repo.update_by_id(conn, entity.id(), fields).await?;
    debug!("Row tombstoned");
    Ok(())
}
