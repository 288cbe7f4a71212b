//! Engagement services - Like e visualizzazioni con contatore transazionale

use crate::core::{AppError, AppState};
use crate::dtos::{EngagementDTO, EngagementRequestDTO};
use crate::entities::NewEngagement;
use crate::lifecycle::CounterMutator;
use crate::repositories::{Engagement, Insertable, Repository};
use axum::extract::{Json, State};
use std::sync::Arc;
use tracing::{debug, instrument};

#[instrument(skip(state, body), fields(user_id = body.user_id, object_id = body.object_id, undo = body.undo))]
pub async fn record_like(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EngagementRequestDTO>,
) -> Result<Json<EngagementDTO>, AppError> {
    mutate(&state, &state.likes, body).await
}

#[instrument(skip(state, body), fields(user_id = body.user_id, object_id = body.object_id, undo = body.undo))]
pub async fn record_view(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EngagementRequestDTO>,
) -> Result<Json<EngagementDTO>, AppError> {
    mutate(&state, &state.views, body).await
}

async fn mutate<G>(
    state: &AppState,
    engagements: &Repository<G>,
    body: EngagementRequestDTO,
) -> Result<Json<EngagementDTO>, AppError>
where
    G: Engagement,
    NewEngagement: Insertable<G>,
{
    debug!("Mutating {} counter", G::COUNTER.column());
    let mutator = CounterMutator::new(&state.pool, engagements, state.counter_targets());

    let value = if body.undo {
        mutator.undo(body.object_id, body.user_id, body.object_type).await?
    } else {
        mutator.apply(body.object_id, body.user_id, body.object_type).await?
    };

    Ok(Json(EngagementDTO {
        object_id: body.object_id,
        object_type: body.object_type,
        counter: G::COUNTER,
        value,
    }))
}
