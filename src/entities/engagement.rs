//! Engagement entities - Like e visualizzazioni di un utente su un oggetto
//!
//! Le due tabelle hanno la stessa forma; al più una riga attiva per
//! (user_id, object_id, object_type).

use super::enums::ObjectType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, sqlx::FromRow)]
#[sqlx(default)]
pub struct UserLike {
    pub id: i64,
    pub user_id: i64,
    pub object_id: i64,
    pub object_type: ObjectType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, sqlx::FromRow)]
#[sqlx(default)]
pub struct UserView {
    pub id: i64,
    pub user_id: i64,
    pub object_id: i64,
    pub object_type: ObjectType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Dati per registrare un nuovo engagement (like o view)
#[derive(Debug, Clone, Copy)]
pub struct NewEngagement {
    pub user_id: i64,
    pub object_id: i64,
    pub object_type: ObjectType,
}
