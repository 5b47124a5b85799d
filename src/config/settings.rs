//! Application settings loaded from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use super::constants::{
    CORS_ANY_ORIGIN, DEFAULT_DATABASE_URL, DEFAULT_DB_CONN_MAX_LIFETIME_MINUTES,
    DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_DB_MIN_CONNECTIONS, DEFAULT_LOG_LEVEL,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, ENV_DEVELOPMENT, ENV_PRODUCTION, ENV_TEST,
};

/// Deployment environment the application runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    /// Stack traces are only rendered outside production.
    pub fn exposes_stack(&self) -> bool {
        !matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            ENV_DEVELOPMENT => Ok(Environment::Development),
            ENV_TEST => Ok(Environment::Test),
            ENV_PRODUCTION => Ok(Environment::Production),
            other => Err(format!("unknown environment `{}`", other)),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "{}", ENV_DEVELOPMENT),
            Environment::Test => write!(f, "{}", ENV_TEST),
            Environment::Production => write!(f, "{}", ENV_PRODUCTION),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub environment: Environment,
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    /// Connection lifetime in minutes
    pub db_conn_max_lifetime: u64,
    pub db_logging: bool,
    pub db_migrations_autorun: bool,
    pub log_level: String,
    pub cors_allowed_origins: Vec<String>,
    pub cors_allow_credentials: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("database_url", &"[REDACTED]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_conn_max_lifetime", &self.db_conn_max_lifetime)
            .field("db_logging", &self.db_logging)
            .field("db_migrations_autorun", &self.db_migrations_autorun)
            .field("log_level", &self.log_level)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("cors_allow_credentials", &self.cors_allow_credentials)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            db_min_connections: DEFAULT_DB_MIN_CONNECTIONS,
            db_conn_max_lifetime: DEFAULT_DB_CONN_MAX_LIFETIME_MINUTES,
            db_logging: true,
            db_migrations_autorun: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            cors_allowed_origins: vec![CORS_ANY_ORIGIN.to_string()],
            cors_allow_credentials: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// Missing or unparsable values fall back to the defaults in `constants`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let environment = env::var("ENV")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.environment);

        Self {
            environment,
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_env("SERVER_PORT").unwrap_or(defaults.server_port),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS")
                .unwrap_or(defaults.db_max_connections),
            db_min_connections: parse_env("DB_MIN_CONNECTIONS")
                .unwrap_or(defaults.db_min_connections),
            db_conn_max_lifetime: parse_env("DB_CONN_MAX_LIFETIME")
                .unwrap_or(defaults.db_conn_max_lifetime),
            // SQL statement logging is noisy, keep it off in production
            db_logging: parse_env("DB_LOGGING")
                .unwrap_or(environment != Environment::Production),
            db_migrations_autorun: parse_env("DB_MIGRATIONS_AUTORUN")
                .unwrap_or(defaults.db_migrations_autorun),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.cors_allowed_origins),
            cors_allow_credentials: parse_env("CORS_ALLOW_CREDENTIALS")
                .unwrap_or(defaults.cors_allow_credentials),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!("Production".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("test".parse::<Environment>(), Ok(Environment::Test));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn only_production_hides_stack() {
        assert!(Environment::Development.exposes_stack());
        assert!(Environment::Test.exposes_stack());
        assert!(!Environment::Production.exposes_stack());
    }

    #[test]
    fn origin_list_drops_blanks() {
        assert_eq!(
            split_list(" https://a.example.com, ,https://*.b.example.com "),
            vec!["https://a.example.com", "https://*.b.example.com"]
        );
    }

    #[test]
    fn debug_redacts_database_url() {
        let config = Config::default();
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains(DEFAULT_DATABASE_URL));
    }
}
