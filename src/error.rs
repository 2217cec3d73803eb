/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / `{"ok": false, "error": ...}` body)
 * - AuthError を 401 に変換 (ログレベルは種別ごと)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;

/// Failure envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Unauthorized(#[from] AuthError),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("not found")]
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized(err) => {
                // Unauthenticated traffic is routine; only infra faults get a warning.
                if err.is_infrastructure() {
                    tracing::warn!(kind = err.kind(), error = %err, "authentication aborted");
                } else {
                    tracing::debug!(kind = err.kind(), error = %err, "authentication rejected");
                }
                (StatusCode::UNAUTHORIZED, err.public_message())
            }
            AppError::Forbidden(message) => (StatusCode::FORBIDDEN, *message),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
