//! Category DTOs - Data Transfer Objects per categorie

use crate::entities::{Category, NewCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CategoryDTO {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub parent_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Category> for CategoryDTO {
    fn from(value: Category) -> Self {
        Self {
            id: Some(value.id),
            name: Some(value.name),
            slug: Some(value.slug),
            parent_id: value.parent_id,
            created_at: Some(value.created_at),
        }
    }
}

/// DTO per creare una nuova categoria (senza id)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateCategoryDTO {
    #[validate(length(min = 1, max = 100, message = "Category name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Category slug must be between 1 and 100 characters"))]
    pub slug: String,

    pub parent_id: Option<i64>,
}

impl From<CreateCategoryDTO> for NewCategory {
    fn from(value: CreateCategoryDTO) -> Self {
        Self {
            name: value.name,
            slug: value.slug,
            parent_id: value.parent_id,
        }
    }
}

/// DTO per rinominare una categoria (solo campi modificabili)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct UpdateCategoryDTO {
    #[validate(length(min = 1, max = 100, message = "Category name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Category slug must be between 1 and 100 characters"))]
    pub slug: Option<String>,
}
