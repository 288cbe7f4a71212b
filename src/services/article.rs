//! Article services - Creazione e lettura degli articoli

use crate::core::{AppError, AppState};
use crate::dtos::{ArticleDTO, CreateArticleDTO, PageParams, Projected};
use crate::entities::NewArticle;
use axum::extract::{Json, Path, Query, State};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, body), fields(category_id = ?body.category_id))]
pub async fn create_article(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateArticleDTO>,
) -> Result<Json<ArticleDTO>, AppError> {
    debug!("Creating article");
    body.validate()?;

    let mut conn = state.pool.acquire().await?;
    if let Some(category_id) = body.category_id {
        state
            .categories
            .get_by_id(&mut conn, category_id, &["id"])
            .await
            .inspect_err(|_| warn!("Category {} not available", category_id))?;
    }

    let article = state
        .articles
        .create(&mut conn, &NewArticle::from(body))
        .await?;

    info!("Article created with id {}", article.id);
    Ok(Json(ArticleDTO::from(article)))
}

#[instrument(skip(state, params))]
pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<Json<Projected<ArticleDTO>>, AppError> {
    debug!("Fetching article");
    let fields = params.fields();
    let mut conn = state.pool.acquire().await?;
    let article = state
        .articles
        .get_by_id(&mut conn, article_id, &fields)
        .await?;
    Ok(Json(Projected::new(article, &fields)))
}
