//! Helpers shared by the auth unit tests and the router tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderValue, header};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;

use crate::config::AuthConfig;
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::user_repo::{PrincipalRow, UserStore};
use crate::services::auth::AuthService;

pub const SECRET: &str = "test-signing-secret";

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn mint(secret: &str, claims: Value) -> String {
    mint_with(Algorithm::HS256, secret, claims)
}

pub fn mint_with(alg: Algorithm, secret: &str, claims: Value) -> String {
    jsonwebtoken::encode(
        &Header::new(alg),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("sign test token")
}

pub fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );
    headers
}

pub fn cookie(name: &str, token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_str(&format!("{name}={token}")).unwrap(),
    );
    headers
}

/// In-memory user store that counts lookups.
#[derive(Default)]
pub struct FakeUserStore {
    rows: HashMap<i32, PrincipalRow>,
    unavailable: bool,
    lookups: AtomicUsize,
}

impl FakeUserStore {
    /// Users 7 (admin) and 8 (user). 999 is absent.
    pub fn seeded() -> Self {
        let mut rows = HashMap::new();
        rows.insert(
            7,
            PrincipalRow {
                id: 7,
                email: "ada@example.com".into(),
                first_name: Some("Ada".into()),
                last_name: Some("Lovelace".into()),
                role: Some("admin".into()),
            },
        );
        rows.insert(
            8,
            PrincipalRow {
                id: 8,
                email: "alan@example.com".into(),
                first_name: Some("Alan".into()),
                last_name: None,
                role: Some("user".into()),
            },
        );
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for FakeUserStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn find_principal(&self, user_id: i32) -> RepoResult<Option<PrincipalRow>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(RepoError::Unavailable("connection refused".into()));
        }
        tokio::task::yield_now().await;
        Ok(self.rows.get(&user_id).cloned())
    }
}

pub fn auth_service(store: FakeUserStore) -> (Arc<AuthService>, Arc<FakeUserStore>) {
    let store = Arc::new(store);
    let svc = AuthService::new(&AuthConfig::new(SECRET, "nexa_token"), store.clone());
    (Arc::new(svc), store)
}
