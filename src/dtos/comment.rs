//! Comment DTOs - Data Transfer Objects per commenti

use crate::entities::Comment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CommentDTO {
    pub id: Option<i64>,
    pub article_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub user_id: Option<i64>,
    pub content: Option<String>,
    pub likes: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Comment> for CommentDTO {
    fn from(value: Comment) -> Self {
        Self {
            id: Some(value.id),
            article_id: Some(value.article_id),
            parent_id: value.parent_id,
            user_id: Some(value.user_id),
            content: Some(value.content),
            likes: Some(value.likes),
            created_at: Some(value.created_at),
        }
    }
}

/// DTO per creare un commento; l'articolo arriva dal path
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateCommentDTO {
    pub user_id: i64,

    /// Commento a cui si risponde, nello stesso articolo
    pub parent_id: Option<i64>,

    #[validate(length(min = 1, max = 5000, message = "Comment content must be between 1 and 5000 characters"))]
    pub content: String,
}
