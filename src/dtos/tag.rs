//! Tag DTOs - Data Transfer Objects per tag

use crate::entities::{NewTag, Tag};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TagDTO {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub likes: Option<i64>,
}

impl From<Tag> for TagDTO {
    fn from(value: Tag) -> Self {
        Self {
            id: Some(value.id),
            name: Some(value.name),
            likes: Some(value.likes),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateTagDTO {
    #[validate(length(min = 1, max = 50, message = "Tag name must be between 1 and 50 characters"))]
    pub name: String,
}

impl From<CreateTagDTO> for NewTag {
    fn from(value: CreateTagDTO) -> Self {
        Self { name: value.name }
    }
}
