//! Category services - Gestione dell'albero delle categorie

use crate::core::{AppError, AppState};
use crate::dtos::{
    CategoryDTO, CreateCategoryDTO, DeletedDTO, PageParams, Paginated, Projected,
    UpdateCategoryDTO,
};
use crate::entities::{Category, NewCategory};
use crate::lifecycle::Hierarchy;
use crate::repositories::{FieldMap, Value};
use axum::extract::{Json, Path, Query, State};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Campi su cui cerca il parametro `query`
const SEARCH_FIELDS: &[&str] = &["name", "slug"];

fn hierarchy(state: &AppState) -> Hierarchy<'_, Category> {
    Hierarchy::new(&state.pool, &state.categories, state.config.max_subtree_nodes)
}

#[instrument(skip(state, body), fields(name = %body.name))]
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateCategoryDTO>,
) -> Result<Json<CategoryDTO>, AppError> {
    debug!("Creating category");
    body.validate()?;

    let mut conn = state.pool.acquire().await?;

    // Il genitore deve esistere ed essere attivo
    if let Some(parent_id) = body.parent_id {
        state
            .categories
            .get_by_id(&mut conn, parent_id, &["id"])
            .await
            .inspect_err(|_| warn!("Parent category {} not available", parent_id))?;
    }

    let category = state
        .categories
        .create(&mut conn, &NewCategory::from(body))
        .await?;

    info!("Category created with id {}", category.id);
    Ok(Json(CategoryDTO::from(category)))
}

/// Root categories, paginated
#[instrument(skip(state, params))]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<Projected<CategoryDTO>>>, AppError> {
    debug!("Listing root categories");
    let page = params.to_page_query(&state.config, SEARCH_FIELDS);
    let fields = params.fields();

    let (roots, info) = hierarchy(&state)
        .paginate_children(None, &fields, &page)
        .await?;

    Ok(Json(Paginated::projected(roots, info, &fields)))
}

#[instrument(skip(state, params))]
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<Json<Projected<CategoryDTO>>, AppError> {
    debug!("Fetching category");
    let fields = params.fields();
    let category = hierarchy(&state).get(category_id, &fields).await?;
    Ok(Json(Projected::new(category, &fields)))
}

/// Renames a category; only the supplied fields are written.
#[instrument(skip(state, body))]
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i64>,
    Json(body): Json<UpdateCategoryDTO>,
) -> Result<Json<CategoryDTO>, AppError> {
    debug!("Updating category");
    body.validate()?;

    let mut fields: FieldMap = Vec::new();
    if let Some(name) = body.name {
        fields.push(("name", Value::Text(name)));
    }
    if let Some(slug) = body.slug {
        fields.push(("slug", Value::Text(slug)));
    }
    if fields.is_empty() {
        warn!("Update without any field");
        return Err(AppError::bad_request("Nothing to update."));
    }

    let mut conn = state.pool.acquire().await?;
    state
        .categories
        .update_by_id(&mut conn, category_id, fields)
        .await?;
    let category = state.categories.get_by_id(&mut conn, category_id, &[]).await?;

    info!("Category {} updated", category_id);
    Ok(Json(CategoryDTO::from(category)))
}

/// Direct children of a category, paginated
#[instrument(skip(state, params))]
pub async fn list_children(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<Projected<CategoryDTO>>>, AppError> {
    debug!("Listing children");
    let hierarchy = hierarchy(&state);
    hierarchy.get(category_id, &["id"]).await?;

    let page = params.to_page_query(&state.config, SEARCH_FIELDS);
    let fields = params.fields();
    let (children, info) = hierarchy
        .paginate_children(Some(category_id), &fields, &page)
        .await?;

    Ok(Json(Paginated::projected(children, info, &fields)))
}

/// Whole subtree below a category, breadth-first
#[instrument(skip(state, params))]
pub async fn list_descendants(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Projected<CategoryDTO>>>, AppError> {
    debug!("Collecting descendants");
    let hierarchy = hierarchy(&state);
    hierarchy.get(category_id, &["id"]).await?;

    let fields = params.fields();
    let descendants = hierarchy.collect_descendants(category_id, &fields).await?;

    info!("Category {} has {} descendants", category_id, descendants.len());
    Ok(Json(Projected::all(descendants, &fields)))
}

/// Soft-deletes the category and every descendant in one transaction.
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i64>,
) -> Result<Json<DeletedDTO>, AppError> {
    info!("Deleting category subtree");
    let deleted = hierarchy(&state).delete_subtree(category_id, &["id"]).await?;
    Ok(Json(DeletedDTO { deleted }))
}
