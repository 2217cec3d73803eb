/*
 * Responsibility
 * - GET /api/debug/headers: CORS / cookie 配送の切り分け用 (opt-in, ALLOW_DEBUG=true)
 * - 無効時は 403 "Debug disabled"
 */
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::dto::responses::DebugHeadersResponse;
use crate::error::AppError;
use crate::state::AppState;

pub async fn debug_headers(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Json<DebugHeadersResponse>, AppError> {
    if !state.allow_debug {
        return Err(AppError::Forbidden("Debug disabled"));
    }

    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    Ok(Json(DebugHeadersResponse {
        ok: true,
        origin: header_str(header::ORIGIN),
        cookie_header: header_str(header::COOKIE),
        cookies: jar
            .iter()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect(),
    }))
}
