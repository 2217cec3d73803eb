use jsonwebtoken::errors::ErrorKind;
use serde::Serialize;
use serde_json::Value;

use crate::repos::user_repo::PrincipalRow;
use crate::services::auth::access_jwt::Claims;
use crate::services::auth::error::AuthError;

/// Claim names that have carried the user id across issuer versions, probed in order.
pub const IDENTIFIER_CLAIMS: [&str; 3] = ["userId", "id", "sub"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    // Only the exact string "admin" is privileged; anything else is a plain user.
    pub fn from_db(raw: Option<&str>) -> Self {
        match raw {
            Some("admin") => Role::Admin,
            _ => Role::User,
        }
    }
}

/// The authenticated user bound to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: i32,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<PrincipalRow> for Principal {
    fn from(row: PrincipalRow) -> Self {
        Self {
            role: Role::from_db(row.role.as_deref()),
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

/// Pick the user id out of verified claims.
///
/// Null, `false`, `0` and `""` count as absent and move on to the next alias;
/// only when every alias is absent is the payload malformed. The first
/// present value must be an integer (an integral JSON number, or a string
/// holding one) that fits `users.id`, otherwise the token is invalid.
/// Zero or negative ids are passed through and simply match no user.
pub fn principal_id(claims: &Claims) -> Result<i32, AuthError> {
    let raw = IDENTIFIER_CLAIMS
        .iter()
        .filter_map(|name| claims.get(name))
        .find(|v| !is_blank(v))
        .ok_or(AuthError::MalformedClaims)?;

    parse_id(raw).ok_or_else(|| AuthError::InvalidToken(ErrorKind::InvalidToken.into()))
}

fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn parse_id(v: &Value) -> Option<i32> {
    let id = match v {
        Value::Number(n) => match n.as_i64() {
            Some(id) => id,
            // `7.0` is the integer 7; `1.5` is not an id.
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i32::MAX as f64)
                .map(|f| f as i64)?,
        },
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    i32::try_from(id).ok()
}
