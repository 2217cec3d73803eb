/*
 * Responsibility
 * - SQLx read access to the users table for request authentication
 * - Only the principal projection is selected (never password_hash)
 * - Pool acquisition is scoped to a single query; the pooled connection is
 *   returned on every exit path when the query future completes or is dropped
 */
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{FromRow, PgPool};

use crate::config::{AppEnv, DatabaseConfig};
use crate::repos::error::{RepoError, RepoResult};

/// Minimal projection of a `users` row needed to authorize a request.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PrincipalRow {
    pub id: i32,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
}

/// Lookup collaborator used by the principal resolver.
///
/// Implementations must be side-effect free: the same id always yields the
/// same answer for a given store state.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    // Backend name, for logging.
    fn backend_name(&self) -> &'static str;

    async fn find_principal(&self, user_id: i32) -> RepoResult<Option<PrincipalRow>>;
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find_principal(&self, user_id: i32) -> RepoResult<Option<PrincipalRow>> {
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT id, email, first_name, last_name, role
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }
}

/// Build the shared pool without connecting eagerly, so the process can start
/// while the database is still coming up.
pub fn connect_lazy(config: &DatabaseConfig, app_env: AppEnv) -> RepoResult<PgPool> {
    let mut options = PgConnectOptions::from_str(&config.url)?;
    if app_env.is_production() {
        // Managed Postgres terminates TLS with certificates we do not pin.
        options = options.ssl_mode(PgSslMode::Require);
        tracing::info!("DB: using TLS (sslmode=require) for Postgres connection");
    } else {
        tracing::info!("DB: running in development mode; TLS for Postgres is not required");
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect_lazy_with(options);

    Ok(pool)
}
