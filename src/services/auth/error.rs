use thiserror::Error;

use crate::repos::error::RepoError;

/// Why a request could not be authenticated.
///
/// Every kind answers with the same HTTP status; the variants only differ in
/// the client-facing message and in how they are logged.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no credential in cookie or authorization header")]
    NotAuthenticated,

    #[error("token verification failed: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("token claims carry no user identifier")]
    MalformedClaims,

    #[error("no user with id {user_id}")]
    PrincipalNotFound { user_id: i32 },

    // Infra failure. Kept on the 401 path for client compatibility.
    #[error("user lookup failed: {0}")]
    LookupFailure(#[source] RepoError),
}

impl AuthError {
    /// Stable identifier for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::NotAuthenticated => "not_authenticated",
            AuthError::InvalidToken(_) => "invalid_token",
            AuthError::MalformedClaims => "malformed_claims",
            AuthError::PrincipalNotFound { .. } => "principal_not_found",
            AuthError::LookupFailure(_) => "lookup_failure",
        }
    }

    /// Message placed in the `error` field of the 401 body.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::NotAuthenticated => "Not authenticated",
            AuthError::MalformedClaims => "Invalid token payload",
            AuthError::PrincipalNotFound { .. } => "User not found",
            AuthError::InvalidToken(_) | AuthError::LookupFailure(_) => "Invalid token",
        }
    }

    pub fn is_infrastructure(&self) -> bool {
        matches!(self, AuthError::LookupFailure(_))
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        AuthError::InvalidToken(e)
    }
}

impl From<RepoError> for AuthError {
    fn from(e: RepoError) -> Self {
        AuthError::LookupFailure(e)
    }
}
