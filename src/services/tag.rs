//! Tag services - Tag con nome univoco, cancellati tramite tombstone

use crate::core::{AppError, AppState};
use crate::dtos::{CreateTagDTO, TagDTO};
use crate::entities::NewTag;
use crate::lifecycle::tombstone;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

#[instrument(skip(state, body), fields(name = %body.name))]
pub async fn create_tag(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTagDTO>,
) -> Result<Json<TagDTO>, AppError> {
    debug!("Creating tag");
    body.validate()?;

    let mut conn = state.pool.acquire().await?;
    let tag = state.tags.create(&mut conn, &NewTag::from(body)).await?;

    info!("Tag created with id {}", tag.id);
    Ok(Json(TagDTO::from(tag)))
}

#[instrument(skip(state))]
pub async fn get_tag(
    State(state): State<Arc<AppState>>,
    Path(tag_id): Path<i64>,
) -> Result<Json<TagDTO>, AppError> {
    let mut conn = state.pool.acquire().await?;
    let tag = state.tags.get_by_id(&mut conn, tag_id, &[]).await?;
    Ok(Json(TagDTO::from(tag)))
}

/// Tombstones the tag; its name becomes available again.
#[instrument(skip(state))]
pub async fn delete_tag(
    State(state): State<Arc<AppState>>,
    Path(tag_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.pool.acquire().await?;
    let tag = state.tags.get_by_id(&mut conn, tag_id, &["name"]).await?;
    tombstone::soft_delete(&state.tags, &mut conn, &tag).await?;

    info!("Tag {} deleted", tag_id);
    Ok(StatusCode::NO_CONTENT)
}
