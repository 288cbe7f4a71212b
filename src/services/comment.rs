//! Comment services - Thread di commenti di un articolo
//!
//! Ogni operazione è limitata all'articolo del path: un commento di un altro
//! articolo risulta inesistente.

use crate::core::{AppError, AppState};
use crate::dtos::{
    CommentDTO, CreateCommentDTO, DeletedDTO, PageParams, Paginated, Projected, ThreadQuery,
};
use crate::entities::{Comment, NewComment};
use crate::lifecycle::Hierarchy;
use crate::repositories::Filter;
use axum::extract::{Json, Path, Query, State};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

const SEARCH_FIELDS: &[&str] = &["content"];

fn thread(state: &AppState, article_id: i64) -> Hierarchy<'_, Comment> {
    Hierarchy::new(&state.pool, &state.comments, state.config.max_subtree_nodes)
        .scoped(Filter::active().eq("article_id", article_id))
}

#[instrument(skip(state, body), fields(user_id = body.user_id))]
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<i64>,
    Json(body): Json<CreateCommentDTO>,
) -> Result<Json<CommentDTO>, AppError> {
    debug!("Creating comment");
    body.validate()?;

    let mut conn = state.pool.acquire().await?;
    state
        .articles
        .get_by_id(&mut conn, article_id, &["id"])
        .await?;

    if let Some(parent_id) = body.parent_id {
        let in_article = Filter::active()
            .eq("article_id", article_id)
            .eq("id", parent_id);
        state
            .comments
            .find_one(&mut conn, &["id"], &in_article)
            .await
            .inspect_err(|_| warn!("Parent comment {} not in article", parent_id))?;
    }

    let new_comment = NewComment {
        article_id,
        parent_id: body.parent_id,
        user_id: body.user_id,
        content: body.content,
    };
    let comment = state.comments.create(&mut conn, &new_comment).await?;

    info!("Comment created with id {}", comment.id);
    Ok(Json(CommentDTO::from(comment)))
}

/// Top-level comments of the article, or the replies to `parent_id`
#[instrument(skip(state, params, thread_query))]
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<i64>,
    Query(params): Query<PageParams>,
    Query(thread_query): Query<ThreadQuery>,
) -> Result<Json<Paginated<Projected<CommentDTO>>>, AppError> {
    debug!("Listing comments");
    let mut conn = state.pool.acquire().await?;
    state
        .articles
        .get_by_id(&mut conn, article_id, &["id"])
        .await?;
    drop(conn);

    let page = params.to_page_query(&state.config, SEARCH_FIELDS);
    let fields = params.fields();
    let (comments, info) = thread(&state, article_id)
        .paginate_children(thread_query.parent_id, &fields, &page)
        .await?;

    Ok(Json(Paginated::projected(comments, info, &fields)))
}

/// Soft-deletes a comment and all its replies.
#[instrument(skip(state))]
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Path((article_id, comment_id)): Path<(i64, i64)>,
) -> Result<Json<DeletedDTO>, AppError> {
    info!("Deleting comment thread");
    let deleted = thread(&state, article_id)
        .delete_subtree(comment_id, &["id"])
        .await?;
    Ok(Json(DeletedDTO { deleted }))
}
