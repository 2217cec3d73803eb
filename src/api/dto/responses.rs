/*
 * Responsibility
 * - 成功レスポンスの DTO (`{"ok": true, ...}` envelope)
 * - 失敗側は crate::error::ErrorResponse
 */
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::auth::Principal;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub ok: bool,
    pub user: Principal,
}

impl MeResponse {
    pub fn new(user: Principal) -> Self {
        Self { ok: true, user }
    }
}

#[derive(Debug, Serialize)]
pub struct DebugHeadersResponse {
    pub ok: bool,
    pub origin: Option<String>,
    #[serde(rename = "cookieHeader")]
    pub cookie_header: Option<String>,
    pub cookies: BTreeMap<String, String>,
}
