/*
 * Responsibility
 * - Load environment variables once at startup (DATABASE_URL, JWT_SECRET, COOKIE_NAME, CORS ...)
 * - Validate settings (fail startup when something required is missing)
 * - Hand AuthConfig to the auth service; nothing on the request path reads env vars
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

/// Development-only signing secret used when `JWT_SECRET` is unset.
pub const DEV_FALLBACK_JWT_SECRET: &str = "please-set-a-secret";
pub const DEFAULT_COOKIE_NAME: &str = "nexa_token";
const DEFAULT_DATABASE_URL: &str = "postgresql://localhost:5432/nexa_db";
const DEFAULT_FRONTEND: &str = "http://localhost:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        // APP_ENV wins; NODE_ENV is still honoured for existing deployments.
        let raw = std::env::var("APP_ENV")
            .or_else(|_| std::env::var("NODE_ENV"))
            .unwrap_or_else(|_| "development".to_string());
        Self::parse(&raw)
    }

    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings consumed by the credential extractor and token verifier.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub cookie_name: String,
    pub leeway_seconds: u64,
    pub require_exp: bool,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, cookie_name: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            cookie_name: cookie_name.into(),
            leeway_seconds: 0,
            require_exp: true,
        }
    }

    pub fn uses_dev_fallback_secret(&self) -> bool {
        self.jwt_secret == DEV_FALLBACK_JWT_SECRET
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("cookie_name", &self.cookie_name)
            .field("leeway_seconds", &self.leeway_seconds)
            .field("require_exp", &self.require_exp)
            .finish()
    }
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The URL usually embeds the database password
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_seconds", &self.acquire_timeout_seconds)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,

    pub cors_allowed_origins: Vec<String>,
    pub allow_null_origin: bool,
    pub allow_debug: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(4000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ if app_env.is_production() => return Err(ConfigError::Missing("DATABASE_URL")),
            _ => {
                tracing::warn!(
                    default = DEFAULT_DATABASE_URL,
                    "DATABASE_URL is not set; using local development database"
                );
                DEFAULT_DATABASE_URL.to_string()
            }
        };

        let max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"))?,
            Err(_) => 5,
        };

        let acquire_timeout_seconds = std::env::var("DATABASE_ACQUIRE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5);

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if app_env.is_production() => return Err(ConfigError::Missing("JWT_SECRET")),
            _ => {
                tracing::warn!("JWT_SECRET is not set; using the development fallback secret");
                DEV_FALLBACK_JWT_SECRET.to_string()
            }
        };

        let cookie_name = std::env::var("COOKIE_NAME")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());

        let leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        // Tokens without `exp` never expire; only legacy issuers should need this off.
        let require_exp = std::env::var("ACCESS_TOKEN_REQUIRE_EXP")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        if !require_exp {
            tracing::warn!("ACCESS_TOKEN_REQUIRE_EXP=false; tokens without exp are accepted");
        }

        let frontend = std::env::var("FRONTEND_URL")
            .or_else(|_| std::env::var("FRONTEND"))
            .unwrap_or_else(|_| DEFAULT_FRONTEND.to_string());
        let cors_allowed_origins = split_origins(&frontend);

        let allow_null_origin = env_flag("ALLOW_NULL_ORIGIN") || !app_env.is_production();
        let allow_debug = env_flag("ALLOW_DEBUG");

        Ok(Self {
            addr,
            app_env,
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                acquire_timeout_seconds,
            },
            auth: AuthConfig {
                leeway_seconds,
                require_exp,
                ..AuthConfig::new(jwt_secret, cookie_name)
            },
            cors_allowed_origins,
            allow_null_origin,
            allow_debug,
        })
    }
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
