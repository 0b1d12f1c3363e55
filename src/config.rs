//! Configuration module for LoreLibrary.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::{LoreError, Result};

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development: plain-HTTP cookies.
    Development,
    /// Production: HTTPS-only, cross-origin cookies.
    #[default]
    Production,
}

impl Environment {
    /// Parse an environment name.
    ///
    /// Anything other than `development`/`dev` is treated as production so that
    /// a typo never downgrades cookie security.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            _ => Environment::Production,
        }
    }

    /// Whether this is a production deployment.
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file (`:memory:` for a throwaway database).
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/lorelib.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Which Session Store backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Sessions kept in process memory; lost on restart.
    Memory,
    /// Sessions persisted in the SQLite database.
    Sqlite,
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Fixed session lifetime in seconds, measured from creation.
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    /// Cookie domain. When unset the cookie is host-only.
    #[serde(default)]
    pub domain: Option<String>,
    /// Session Store backend.
    #[serde(default = "default_session_backend")]
    pub store: SessionBackend,
    /// Interval between expired-session sweeps, in seconds.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

fn default_cookie_name() -> String {
    "lorelib.sid".to_string()
}

/// Longest accepted session lifetime (ten years).
pub const MAX_SESSION_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

fn default_session_ttl() -> u64 {
    7 * 24 * 60 * 60 // one week
}

fn default_session_backend() -> SessionBackend {
    SessionBackend::Sqlite
}

fn default_cleanup_interval() -> u64 {
    3600
}

impl SessionConfig {
    /// Session lifetime as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_secs: default_session_ttl(),
            domain: None,
            store: default_session_backend(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

/// Security configuration.
///
/// The Argon2 parameters are the cost factor of the password hasher.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 time cost (iterations).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2 parallelism.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
    /// Whether clients may self-register with the `admin` role.
    #[serde(default)]
    pub allow_admin_registration: bool,
}

fn default_argon2_memory() -> u32 {
    19456 // 19 MiB
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_argon2_parallelism() -> u32 {
    1
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            allow_admin_registration: false,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins. Empty means permissive mode without credentials.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional path to a log file; stdout only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Security settings.
    #[serde(default)]
    pub security: SecurityConfig,
    /// CORS settings.
    #[serde(default)]
    pub cors: CorsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(LoreError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| LoreError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `LORELIB_ENV` (or `NODE_ENV`): deployment environment
    /// - `PORT`: listen port
    /// - `LORELIB_DATABASE_PATH`: SQLite database path
    /// - `HTTP_SERVER_DOMAIN`: public URL whose host name scopes the session cookie
    /// - `LORELIB_CORS_ORIGINS`: comma-separated list of allowed origins
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        if let Some(env) = var("LORELIB_ENV").or_else(|| var("NODE_ENV")) {
            self.server.environment = Environment::from_name(&env);
        }

        if let Some(port) = var("PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid PORT"),
            }
        }

        if let Some(path) = var("LORELIB_DATABASE_PATH") {
            self.database.path = path;
        }

        if let Some(domain) = var("HTTP_SERVER_DOMAIN") {
            match cookie_domain_from_url(&domain) {
                Some(host) => self.session.domain = Some(host),
                None => tracing::warn!(value = %domain, "Ignoring unparseable HTTP_SERVER_DOMAIN"),
            }
        }

        if let Some(origins) = var("LORELIB_CORS_ORIGINS") {
            self.cors.allowed_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.session.ttl_secs == 0 {
            return Err(LoreError::Config(
                "session.ttl_secs must be greater than zero".to_string(),
            ));
        }
        if self.session.ttl_secs > MAX_SESSION_TTL_SECS {
            return Err(LoreError::Config(format!(
                "session.ttl_secs must be at most {MAX_SESSION_TTL_SECS}"
            )));
        }
        if self.session.cleanup_interval_secs == 0 {
            return Err(LoreError::Config(
                "session.cleanup_interval_secs must be greater than zero".to_string(),
            ));
        }
        let name = &self.session.cookie_name;
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(LoreError::Config(format!(
                "session.cookie_name {name:?} is not a valid cookie name"
            )));
        }
        if self.security.argon2_memory_kib == 0
            || self.security.argon2_iterations == 0
            || self.security.argon2_parallelism == 0
        {
            return Err(LoreError::Config(
                "argon2 parameters must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Extract the host name of a URL for use as a cookie domain.
pub fn cookie_domain_from_url(value: &str) -> Option<String> {
    url::Url::parse(value.trim())
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}
