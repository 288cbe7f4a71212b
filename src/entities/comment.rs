//! Comment entity - Albero delle risposte, sempre relativo a un articolo

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, sqlx::FromRow)]
#[sqlx(default)]
pub struct Comment {
    pub id: i64,
    pub article_id: i64,
    /// `None` for a top-level comment on the article
    pub parent_id: Option<i64>,
    pub user_id: i64,
    pub content: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub article_id: i64,
    pub parent_id: Option<i64>,
    pub user_id: i64,
    pub content: String,
}
