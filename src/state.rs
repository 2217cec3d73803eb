/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - ex: auth: AuthService (user store を内包), debug endpoint の可否
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - リクエスト間で共有される可変状態は持たない
 */
use std::sync::Arc;

use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub allow_debug: bool,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, allow_debug: bool) -> Self {
        Self { auth, allow_debug }
    }
}
