use std::sync::Arc;

use axum::http::HeaderMap;

use crate::config::AuthConfig;
use crate::repos::user_repo::UserStore;
use crate::services::auth::access_jwt::TokenVerifier;
use crate::services::auth::credential::extract_credential;
use crate::services::auth::error::AuthError;
use crate::services::auth::principal::{Principal, principal_id};

/// Request authentication: extract → verify → resolve.
///
/// Immutable after construction; share it through `Arc`.
#[derive(Clone)]
pub struct AuthService {
    cookie_name: String,
    verifier: TokenVerifier,
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("cookie_name", &self.cookie_name)
            .field("verifier", &self.verifier)
            .field("users", &self.users.backend_name())
            .finish()
    }
}

impl AuthService {
    pub fn new(config: &AuthConfig, users: Arc<dyn UserStore>) -> Self {
        Self {
            cookie_name: config.cookie_name.clone(),
            verifier: TokenVerifier::new(config),
            users,
        }
    }

    /// Resolve the principal for a request, or say why there is none.
    ///
    /// The user lookup is the only suspension point. Dropping the returned
    /// future abandons the lookup and releases its pooled connection.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AuthError> {
        let credential =
            extract_credential(headers, &self.cookie_name).ok_or(AuthError::NotAuthenticated)?;

        let claims = self.verifier.verify(&credential.token)?;
        let user_id = principal_id(&claims)?;

        let row = self
            .users
            .find_principal(user_id)
            .await?
            .ok_or(AuthError::PrincipalNotFound { user_id })?;

        tracing::trace!(
            user_id,
            source = credential.source.as_str(),
            "request authenticated"
        );

        Ok(Principal::from(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::principal::Role;
    use crate::services::auth::test_support::{
        FakeUserStore, SECRET, auth_service, bearer, cookie, mint, now,
    };
    use serde_json::json;

    #[tokio::test]
    async fn no_credential_is_not_authenticated() {
        let (svc, store) = auth_service(FakeUserStore::seeded());
        let err = svc.authenticate(&HeaderMap::new()).await.unwrap_err();
        assert!(matches!(err, AuthError::NotAuthenticated));
        assert_eq!(store.lookups(), 0);
    }

    #[tokio::test]
    async fn bearer_token_resolves_principal() {
        let (svc, _) = auth_service(FakeUserStore::seeded());
        let token = mint(SECRET, json!({"userId": 7, "exp": now() + 600}));
        let p = svc.authenticate(&bearer(&token)).await.unwrap();
        assert_eq!(p.id, 7);
        assert_eq!(p.role, Role::Admin);
        assert_eq!(p.email, "ada@example.com");
    }

    #[tokio::test]
    async fn cookie_principal_wins_over_header_principal() {
        let (svc, _) = auth_service(FakeUserStore::seeded());
        let cookie_token = mint(SECRET, json!({"id": 8, "exp": now() + 600}));
        let header_token = mint(SECRET, json!({"id": 7, "exp": now() + 600}));

        let mut headers = cookie("nexa_token", &cookie_token);
        headers.extend(bearer(&header_token));

        let p = svc.authenticate(&headers).await.unwrap();
        assert_eq!(p.id, 8);
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid_token_and_skips_lookup() {
        let (svc, store) = auth_service(FakeUserStore::seeded());
        let token = mint("not-the-secret", json!({"userId": 7, "exp": now() + 600}));
        let err = svc.authenticate(&bearer(&token)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
        assert_eq!(store.lookups(), 0);
    }

    #[tokio::test]
    async fn claims_without_identifier_are_malformed() {
        let (svc, store) = auth_service(FakeUserStore::seeded());
        let token = mint(SECRET, json!({"email": "ada@example.com", "exp": now() + 600}));
        let err = svc.authenticate(&bearer(&token)).await.unwrap_err();
        assert!(matches!(err, AuthError::MalformedClaims));
        assert_eq!(store.lookups(), 0);
    }

    #[tokio::test]
    async fn non_positive_ids_are_looked_up_and_not_found() {
        let (svc, store) = auth_service(FakeUserStore::seeded());
        for user_id in [json!("0"), json!(-3)] {
            let token = mint(SECRET, json!({"userId": user_id, "exp": now() + 600}));
            let err = svc.authenticate(&bearer(&token)).await.unwrap_err();
            assert!(matches!(err, AuthError::PrincipalNotFound { .. }));
        }
        assert_eq!(store.lookups(), 2);
    }

    #[tokio::test]
    async fn unparseable_id_is_invalid_token_and_skips_lookup() {
        let (svc, store) = auth_service(FakeUserStore::seeded());
        let token = mint(SECRET, json!({"userId": "abc", "exp": now() + 600}));
        let err = svc.authenticate(&bearer(&token)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
        assert_eq!(store.lookups(), 0);
    }

    #[tokio::test]
    async fn integral_float_id_resolves_principal() {
        let (svc, _) = auth_service(FakeUserStore::seeded());
        let token = mint(SECRET, json!({"userId": 7.0, "exp": now() + 600}));
        let p = svc.authenticate(&bearer(&token)).await.unwrap();
        assert_eq!(p.id, 7);
    }

    #[tokio::test]
    async fn deleted_user_is_principal_not_found() {
        let (svc, store) = auth_service(FakeUserStore::seeded());
        let token = mint(SECRET, json!({"userId": 999, "exp": now() + 600}));
        let err = svc.authenticate(&cookie("nexa_token", &token)).await.unwrap_err();
        assert!(matches!(err, AuthError::PrincipalNotFound { user_id: 999 }));
        assert_eq!(store.lookups(), 1);
    }

    #[tokio::test]
    async fn store_outage_is_lookup_failure() {
        let (svc, _) = auth_service(FakeUserStore::unavailable());
        let token = mint(SECRET, json!({"userId": 7, "exp": now() + 600}));
        let err = svc.authenticate(&bearer(&token)).await.unwrap_err();
        assert!(matches!(err, AuthError::LookupFailure(_)));
        assert_eq!(err.public_message(), "Invalid token");
    }

    #[tokio::test]
    async fn concurrent_resolution_of_same_token_is_independent() {
        let (svc, store) = auth_service(FakeUserStore::seeded());
        let token = mint(SECRET, json!({"sub": "7", "exp": now() + 600}));
        let headers = bearer(&token);

        let (a, b) = tokio::join!(svc.authenticate(&headers), svc.authenticate(&headers));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a, b);
        assert_eq!(a.id, 7);
        assert_eq!(store.lookups(), 2);
    }
}
