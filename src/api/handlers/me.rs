/*
 * Responsibility
 * - GET /api/me: bind 済みの Principal をそのまま返す
 * - GET /api/admin/me: role == admin のときだけ返す (認可は handler 側)
 */
use axum::Json;

use crate::api::dto::responses::MeResponse;
use crate::api::extractors::{AdminUser, CurrentUser};

pub async fn me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse::new(user))
}

pub async fn admin_me(AdminUser(user): AdminUser) -> Json<MeResponse> {
    Json(MeResponse::new(user))
}
