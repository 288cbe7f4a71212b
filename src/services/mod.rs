//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati per una migliore manutenibilità.
//! Ogni modulo gestisce gli endpoint HTTP per una specifica risorsa.

pub mod article;
pub mod category;
pub mod comment;
pub mod engagement;
pub mod tag;

// Re-exports per facilitare l'import
pub use article::{create_article, get_article};
pub use category::{
    create_category, delete_category, get_category, list_categories, list_children,
    list_descendants, update_category,
};
pub use comment::{create_comment, delete_comment, list_comments};
pub use engagement::{record_like, record_view};
pub use tag::{create_tag, delete_tag, get_tag};

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
