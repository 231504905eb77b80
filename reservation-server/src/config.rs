//! Server configuration

use crate::auth::JwtConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// `DATABASE_PATH` value that selects the in-memory engine
pub const MEMORY_DATABASE: &str = "memory";

/// Reservation server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP port
    pub http_port: u16,
    /// RocksDB directory, or `memory` for a throwaway store
    pub database_path: String,
    pub database_namespace: String,
    pub database_name: String,
    /// Token signing and lifetime settings
    pub jwt: JwtConfig,
    /// Upper bound on the duration of one request
    pub request_timeout_secs: u64,
    /// Log level (used when RUST_LOG is not set)
    pub log_level: String,
    /// Directory for daily rolling log files
    pub log_dir: Option<String>,
    /// Admin account seeded at startup when both are set
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for Config {
    /// Development defaults: in-memory store, placeholder secrets
    fn default() -> Self {
        Self {
            environment: "development".into(),
            http_port: 8000,
            database_path: MEMORY_DATABASE.into(),
            database_namespace: "hostel".into(),
            database_name: "reservations".into(),
            jwt: JwtConfig::default(),
            request_timeout_secs: 30,
            log_level: "info".into(),
            log_dir: None,
            admin_username: None,
            admin_password: None,
        }
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                tracing::warn!("{name} not set, generating a temporary key for development");
                crate::auth::jwt::generate_printable_secret()
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let defaults = Self::default();
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let jwt = JwtConfig {
            access_secret: Self::require_secret("JWT_SECRET_KEY", &environment)?,
            refresh_secret: Self::require_secret("JWT_REFRESH_SECRET_KEY", &environment)?,
            access_expiration_minutes: Self::parse_or(
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                defaults.jwt.access_expiration_minutes,
            ),
            refresh_expiration_minutes: Self::parse_or(
                "REFRESH_TOKEN_EXPIRE_MINUTES",
                defaults.jwt.refresh_expiration_minutes,
            ),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.jwt.issuer),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or(defaults.jwt.audience),
        };
        if jwt.access_secret == jwt.refresh_secret && environment != "development" {
            return Err("JWT_SECRET_KEY and JWT_REFRESH_SECRET_KEY must differ".into());
        }

        Ok(Self {
            http_port: Self::parse_or("HTTP_PORT", defaults.http_port),
            database_path: std::env::var("DATABASE_PATH")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "data/reservations.db".into()),
            database_namespace: std::env::var("DATABASE_NAMESPACE")
                .unwrap_or(defaults.database_namespace),
            database_name: std::env::var("DATABASE_NAME").unwrap_or(defaults.database_name),
            jwt,
            request_timeout_secs: Self::parse_or(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            admin_username: std::env::var("ADMIN_USERNAME").ok().filter(|s| !s.is_empty()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_path == MEMORY_DATABASE
    }
}
