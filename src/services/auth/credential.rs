//! Credential extraction: cookie first, then `Authorization: Bearer`.
//!
//! The precedence is the order of [`EXTRACTION_ORDER`]; the first source that
//! yields a non-empty token wins.

use std::fmt;

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::CookieJar;

const BEARER_PREFIX: &str = "bearer ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Session cookie named by `AuthConfig::cookie_name`.
    Cookie,
    /// `Authorization: Bearer <token>`.
    BearerHeader,
}

/// Sources probed in order.
pub const EXTRACTION_ORDER: [CredentialSource; 2] =
    [CredentialSource::Cookie, CredentialSource::BearerHeader];

impl CredentialSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialSource::Cookie => "cookie",
            CredentialSource::BearerHeader => "bearer_header",
        }
    }

    fn extract(&self, headers: &HeaderMap, cookie_name: &str) -> Option<String> {
        let token = match self {
            CredentialSource::Cookie => CookieJar::from_headers(headers)
                .get(cookie_name)
                .map(|c| c.value().to_string()),
            CredentialSource::BearerHeader => headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(bearer_token)
                .map(str::to_string),
        };
        token.filter(|token| !token.is_empty())
    }
}

/// Signed token pulled from a request. Lives for one request only.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub source: CredentialSource,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the token itself
        f.debug_struct("Credential")
            .field("source", &self.source)
            .field("token_len", &self.token.len())
            .finish()
    }
}

/// Returns `None` when no source carries a token.
pub fn extract_credential(headers: &HeaderMap, cookie_name: &str) -> Option<Credential> {
    EXTRACTION_ORDER.iter().find_map(|source| {
        source
            .extract(headers, cookie_name)
            .map(|token| Credential {
                token,
                source: *source,
            })
    })
}

// Scheme match is case-insensitive; exactly one space separates scheme and token.
fn bearer_token(value: &str) -> Option<&str> {
    let scheme = value.get(..BEARER_PREFIX.len())?;
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }
    Some(value[BEARER_PREFIX.len()..].trim())
}
