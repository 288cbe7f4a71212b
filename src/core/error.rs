//! Error handling - Tassonomia degli errori del core e mappatura HTTP
//!
//! `StoreError` è l'errore restituito da repository e orchestratori;
//! `AppError` è la sua rappresentazione verso il client.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::error::ErrorKind;
use thiserror::Error;
use tracing::warn;

/// Errors produced by the repository layer and the transactional orchestrators.
///
/// Every variant rolls back the enclosing transaction. Nothing here is retried.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique lookup matched no active row (includes undo without a prior apply).
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// A uniqueness, foreign-key or check constraint rejected the write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Any other failure of the storage backend.
    #[error("storage error: {0}")]
    Storage(#[source] sqlx::Error),

    /// A panic recovered inside a transaction body.
    #[error("runtime fault: {0}")]
    RuntimeFault(String),

    /// A column name that the entity does not declare.
    #[error("invalid field: {0}")]
    InvalidField(String),

    /// The parent links of a subtree loop back onto an already visited node.
    #[error("cycle detected at node {0}")]
    CycleDetected(i64),

    /// The subtree walk exceeded the configured node cap.
    #[error("subtree exceeds {0} nodes")]
    SubtreeTooLarge(usize),
}

impl StoreError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::not_found("row"),

            sqlx::Error::Database(ref db_err)
                if matches!(
                    db_err.kind(),
                    ErrorKind::UniqueViolation
                        | ErrorKind::ForeignKeyViolation
                        | ErrorKind::NotNullViolation
                        | ErrorKind::CheckViolation
                ) =>
            {
                Self::ConstraintViolation(db_err.message().to_string())
            }

            other => Self::Storage(other),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: &'static str,
    details: Option<String>,
}

impl AppError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            message,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    // Common error constructors
    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn conflict(message: &'static str) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn unprocessable(message: &'static str) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn internal_server_error(message: &'static str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn service_unavailable(message: &'static str) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity } => {
                Self::not_found("Resource not found").with_details(format!("{entity} not found"))
            }

            StoreError::ConstraintViolation(details) => {
                warn!(details = %details, "Constraint violation");
                Self::conflict("Constraint violation")
                    .with_details("the request conflicts with existing data")
            }

            StoreError::InvalidField(field) => {
                Self::bad_request("Invalid field").with_details(field)
            }

            StoreError::CycleDetected(id) => Self::conflict("Corrupted hierarchy")
                .with_details(format!("cycle detected at node {id}")),

            StoreError::SubtreeTooLarge(limit) => Self::unprocessable("Subtree too large")
                .with_details(format!("more than {limit} nodes")),

            StoreError::Storage(sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) => {
                Self::service_unavailable("Database unavailable")
            }

            StoreError::Storage(_) | StoreError::RuntimeFault(_) => {
                Self::internal_server_error("Internal server error")
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::from(err).into()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::bad_request("Validation error").with_details(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ErrorResponse {
            error: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}
