//! Content core library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod lifecycle;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, Config, StoreError};
pub use services::root;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/categories", configure_category_routes())
        .nest("/articles", configure_article_routes())
        .nest("/tags", configure_tag_routes())
        .route("/likes", post(services::record_like))
        .route("/views", post(services::record_view))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Configura le routes dell'albero delle categorie
fn configure_category_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{category_id}",
            get(get_category)
                .patch(update_category)
                .delete(delete_category),
        )
        .route("/{category_id}/children", get(list_children))
        .route("/{category_id}/descendants", get(list_descendants))
}

/// Configura le routes per articoli e commenti
fn configure_article_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", post(create_article))
        .route("/{article_id}", get(get_article))
        .route(
            "/{article_id}/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/{article_id}/comments/{comment_id}",
            axum::routing::delete(delete_comment),
        )
}

/// Configura le routes dei tag
fn configure_tag_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", post(create_tag))
        .route("/{tag_id}", get(get_tag).delete(delete_tag))
}
