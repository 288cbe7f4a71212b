//! Article DTOs - Data Transfer Objects per articoli

use crate::entities::{Article, NewArticle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ArticleDTO {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<i64>,
    pub likes: Option<i64>,
    pub views: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Article> for ArticleDTO {
    fn from(value: Article) -> Self {
        Self {
            id: Some(value.id),
            title: Some(value.title),
            content: Some(value.content),
            category_id: value.category_id,
            likes: Some(value.likes),
            views: Some(value.views),
            created_at: Some(value.created_at),
        }
    }
}

/// DTO per creare un nuovo articolo (senza id, contatori a zero)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateArticleDTO {
    #[validate(length(min = 1, max = 255, message = "Article title must be between 1 and 255 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Article content cannot be empty"))]
    pub content: String,

    pub category_id: Option<i64>,
}

impl From<CreateArticleDTO> for NewArticle {
    fn from(value: CreateArticleDTO) -> Self {
        Self {
            title: value.title,
            content: value.content,
            category_id: value.category_id,
        }
    }
}
