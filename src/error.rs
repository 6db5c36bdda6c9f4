//! Error type shared by the repository, service and HTTP layers.
//!
//! Calculation code never produces these; only I/O, lookups and request
//! validation do.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ReportKind;

// ---

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{kind} report {id} not found")]
    NotFound { kind: ReportKind, id: Uuid },

    /// A stored row whose document no longer decodes.
    #[error("{kind} report {id} has an unreadable document: {source}")]
    CorruptDocument {
        kind: ReportKind,
        id: Uuid,
        source: serde_json::Error,
    },

    #[error("Job {0} not found")]
    JobNotFound(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } | AppError::JobNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::Serialization(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database(_) | AppError::CorruptDocument { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        // Internal details stay in the log
        let message = match &self {
            AppError::Database(_) => "database error".to_string(),
            AppError::CorruptDocument { kind, id, .. } => {
                format!("{kind} report {id} could not be read")
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
