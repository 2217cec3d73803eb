/*
 * Responsibility
 * - URL 構造を定義
 * - /health は公開、/api/me 系は require_auth の後ろ、/api/debug は opt-in
 * - 認証が必要な範囲は route_layer で protected router にだけ掛ける
 */
use axum::{Router, routing::get};

use crate::api::handlers::{
    debug::debug_headers,
    health::health,
    me::{admin_me, me},
};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route("/admin/me", get(admin_me));
    let protected = middleware::auth::access::apply(protected, state);

    let api = Router::new()
        .merge(protected)
        .route("/debug/headers", get(debug_headers));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
}
