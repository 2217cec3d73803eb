/*
 * Responsibility
 * - GET /health (疎通用, 認証なし)
 */
use axum::Json;

use crate::api::dto::responses::HealthResponse;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        now: chrono::Utc::now(),
    })
}
