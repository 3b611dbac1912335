//! Marketplace configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JWT_SECRET` - Token signing secret shared with the auth collaborator
//!   (min 32 chars, high entropy)
//! - `DATABASE_URL` - `PostgreSQL` connection string, handed to the external
//!   persistence collaborator
//! - `HONDUMARKET_BASE_URL` - Public URL for the marketplace
//!
//! ## Optional
//! - `HONDUMARKET_HOST` - Bind address (default: 127.0.0.1)
//! - `HONDUMARKET_PORT` - Listen port (default: 3000)
//! - `APP_ENV` - `development`, `test`, or `production` (default: development)
//! - `SHARE_BASE_URL` - Base URL for social share links
//!   (default: `https://hondumarket.com`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Default base URL for public share links.
pub const DEFAULT_SHARE_BASE_URL: &str = "https://hondumarket.com";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Deployment environment, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    /// The environment name as it appears in `APP_ENV`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!("unknown environment: {s}")),
        }
    }
}

/// Marketplace application configuration.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// JWT signing secret, consumed by the external auth collaborator
    pub jwt_secret: SecretString,
    /// `PostgreSQL` connection URL (contains password)
    pub database_url: SecretString,
    /// Deployment environment
    pub environment: Environment,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the marketplace
    pub base_url: String,
    /// Base URL used to build public share links
    pub share_base_url: Url,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl MarketConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::load(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// `from_env` passes `std::env::var`; tests pass a map so validation is
    /// deterministic and free of process-global state.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::from_env`].
    pub fn load(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = get_validated_secret(&get, "JWT_SECRET")?;
        validate_jwt_secret(&jwt_secret, "JWT_SECRET")?;

        let database_url = get_required(&get, "DATABASE_URL").map(SecretString::from)?;

        let environment = get_or_default(&get, "APP_ENV", "development")
            .parse::<Environment>()
            .map_err(|e| ConfigError::InvalidEnvVar("APP_ENV".to_string(), e))?;

        let host = get_or_default(&get, "HONDUMARKET_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("HONDUMARKET_HOST".to_string(), e.to_string())
            })?;
        let port = get_or_default(&get, "HONDUMARKET_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("HONDUMARKET_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_required(&get, "HONDUMARKET_BASE_URL")?;

        let share_base_url = get_or_default(&get, "SHARE_BASE_URL", DEFAULT_SHARE_BASE_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHARE_BASE_URL".to_string(), e.to_string())
            })?;

        let sentry_dsn = get("SENTRY_DSN");

        Ok(Self {
            jwt_secret,
            database_url,
            environment,
            host,
            port,
            base_url,
            share_base_url,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Build the public share URL for a product slug.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the slug cannot be joined onto the
    /// configured base (e.g. a cannot-be-a-base URL was configured).
    pub fn share_url(&self, product_slug: &str) -> Result<Url, url::ParseError> {
        self.share_base_url.join(&format!("p/{product_slug}"))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required variable from the source.
fn get_required(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, ConfigError> {
    get(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a variable with a default value.
fn get_or_default(get: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get(key).unwrap_or_else(|| default.to_string())
}

/// Validate that the JWT secret meets the minimum length requirement.
fn validate_jwt_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_JWT_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like signing keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from the source.
fn get_validated_secret(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<SecretString, ConfigError> {
    let value = get_required(get, key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// A JWT secret that passes length, placeholder, and entropy checks.
    const STRONG_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%dF8(gH1)";

    fn test_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("JWT_SECRET", STRONG_SECRET),
            ("DATABASE_URL", "postgres://localhost/hondumarket_test"),
            ("APP_ENV", "test"),
            ("HONDUMARKET_BASE_URL", "http://localhost:3000"),
        ])
    }

    fn load_from(vars: &HashMap<&str, &str>) -> Result<MarketConfig, ConfigError> {
        MarketConfig::load(|key| vars.get(key).map(ToString::to_string))
    }

    #[test]
    fn test_load_minimal_test_environment() {
        let config = load_from(&test_vars()).unwrap();
        assert_eq!(config.environment, Environment::Test);
        assert!(config.jwt_secret.expose_secret().len() >= 32);
        assert_eq!(
            config.share_base_url.as_str(),
            "https://hondumarket.com/"
        );
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_missing_jwt_secret_fails() {
        let mut vars = test_vars();
        vars.remove("JWT_SECRET");
        assert!(matches!(
            load_from(&vars),
            Err(ConfigError::MissingEnvVar(key)) if key == "JWT_SECRET"
        ));
    }

    #[test]
    fn test_short_jwt_secret_fails() {
        let mut vars = test_vars();
        vars.insert("JWT_SECRET", "aB3$xY9!mK2@nL5#");
        assert!(matches!(
            load_from(&vars),
            Err(ConfigError::InsecureSecret(key, _)) if key == "JWT_SECRET"
        ));
    }

    #[test]
    fn test_missing_database_url_fails() {
        let mut vars = test_vars();
        vars.remove("DATABASE_URL");
        assert!(matches!(
            load_from(&vars),
            Err(ConfigError::MissingEnvVar(key)) if key == "DATABASE_URL"
        ));
    }

    #[test]
    fn test_invalid_app_env_fails() {
        let mut vars = test_vars();
        vars.insert("APP_ENV", "staging");
        assert!(matches!(
            load_from(&vars),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "APP_ENV"
        ));
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("test".parse::<Environment>().unwrap(), Environment::Test);
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
    }

    #[test]
    fn test_share_url_join() {
        let config = load_from(&test_vars()).unwrap();
        let url = config.share_url("producto-demo").unwrap();
        assert_eq!(url.as_str(), "https://hondumarket.com/p/producto-demo");
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-jwt-signing-key-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength(&"ab".repeat(20), "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength(STRONG_SECRET, "TEST_VAR").is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let mut vars = test_vars();
        vars.insert("HONDUMARKET_HOST", "0.0.0.0");
        vars.insert("HONDUMARKET_PORT", "8080");
        let config = load_from(&vars).unwrap();

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 8080);
    }
}
