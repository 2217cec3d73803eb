//! Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::repos::user_repo::UserStore;
use crate::services::auth::AuthService;

pub fn build_auth_service(config: &Config, users: Arc<dyn UserStore>) -> Arc<AuthService> {
    if config.auth.uses_dev_fallback_secret() {
        tracing::warn!(
            "auth is using the development fallback JWT secret; do not deploy like this"
        );
    }

    tracing::info!(
        cookie_name = %config.auth.cookie_name,
        user_store = users.backend_name(),
        "auth service ready"
    );

    Arc::new(AuthService::new(&config.auth, users))
}
