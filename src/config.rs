//! Configuration management for the GLPI client.
//!
//! This module handles loading configuration from environment variables,
//! with validation to ensure all required values are present. Library users
//! that already hold credentials can build a [`Config`] directly instead.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::GlpiError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default directory downloaded documents are written to.
const DEFAULT_DOCUMENTS_DIR: &str = "./Documents";

/// Configuration for connecting to a GLPI instance.
///
/// The password and app token are stored but never logged or exposed in
/// error messages.
#[derive(Clone)]
pub struct Config {
    /// Host of the GLPI instance, with or without a scheme
    /// (e.g. `glpi.example.com` or `https://glpi.example.com`).
    pub host: String,

    /// Account user name, exchanged for a session token via Basic auth.
    pub user: String,

    /// Account password.
    /// This value must never be logged or included in error messages.
    pub password: String,

    /// Pre-shared application token sent with every request.
    /// This value must never be logged or included in error messages.
    pub app_token: String,

    /// When true, swallowed errors are logged at `debug` level visibility.
    /// Picks the default log filter in [`crate::logging`].
    pub debug_mode: bool,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Directory downloaded documents are written to.
    pub documents_dir: PathBuf,
}

impl Config {
    /// Creates a configuration from credentials, with default timeout,
    /// documents directory and debug mode off.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        app_token: impl Into<String>,
    ) -> Self {
        Config {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            app_token: app_token.into(),
            debug_mode: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            documents_dir: PathBuf::from(DEFAULT_DOCUMENTS_DIR),
        }
    }

    /// Enables or disables debug mode.
    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the directory downloaded documents are written to.
    pub fn with_documents_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.documents_dir = dir.into();
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `GLPI_HOST`: Host of the GLPI instance
    /// - `GLPI_USER`: Account user name
    /// - `GLPI_PASSWORD`: Account password
    /// - `GLPI_APP_TOKEN`: Application token
    ///
    /// # Optional Environment Variables
    ///
    /// - `GLPI_DEBUG_MODE`: `true`/`1` to log swallowed errors (default off)
    /// - `GLPI_TIMEOUT_SECS`: per-request timeout in seconds (default 30)
    /// - `GLPI_DOCUMENTS_DIR`: download directory (default `./Documents`)
    ///
    /// A `.env` file in the working directory is loaded first when
    /// present; real environment variables win over it.
    ///
    /// # Errors
    ///
    /// Returns `GlpiError::Config` if any required variable is missing
    /// or if values fail validation.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let config = Config::from_env()?;
    /// ```
    pub fn from_env() -> Result<Self, GlpiError> {
        dotenvy::dotenv().ok();

        let host = Self::get_required_env("GLPI_HOST")?;
        let user = Self::get_required_env("GLPI_USER")?;
        let password = Self::get_required_env("GLPI_PASSWORD")?;
        let app_token = Self::get_required_env("GLPI_APP_TOKEN")?;

        Self::validate_app_token(&app_token)?;

        let debug_mode = match env::var("GLPI_DEBUG_MODE") {
            Ok(value) => Self::parse_bool("GLPI_DEBUG_MODE", &value)?,
            Err(_) => false,
        };

        let timeout = match env::var("GLPI_TIMEOUT_SECS") {
            Ok(value) => {
                let secs = value.trim().parse::<u64>().map_err(|_| {
                    GlpiError::invalid_config("GLPI_TIMEOUT_SECS must be a whole number of seconds")
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let documents_dir = env::var("GLPI_DOCUMENTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DOCUMENTS_DIR));

        Ok(Config {
            host,
            user,
            password,
            app_token,
            debug_mode,
            timeout,
            documents_dir,
        })
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, GlpiError> {
        env::var(name)
            .map_err(|_| GlpiError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(GlpiError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Parses a boolean environment value.
    fn parse_bool(name: &str, value: &str) -> Result<bool, GlpiError> {
        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(GlpiError::invalid_config(format!(
                "{} must be a boolean, got: {:?}",
                name, value
            ))),
        }
    }

    /// Validates the app token is not a placeholder value.
    fn validate_app_token(token: &str) -> Result<(), GlpiError> {
        let token_lower = token.to_lowercase();
        let placeholder_patterns = [
            "your_app_token",
            "your_token",
            "placeholder",
            "xxx",
            "changeme",
        ];

        for pattern in placeholder_patterns {
            if token_lower.contains(pattern) {
                return Err(GlpiError::invalid_config(
                    "GLPI_APP_TOKEN appears to be a placeholder value",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: Tests that modify environment variables should not run in parallel.
    // Use `cargo test -- --test-threads=1` for full integration tests.

    #[test]
    fn test_new_defaults() {
        let config = Config::new("glpi.example.com", "tech", "pw", "token123");
        assert!(!config.debug_mode);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.documents_dir, PathBuf::from("./Documents"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::new("glpi.example.com", "tech", "pw", "token123")
            .with_debug_mode(true)
            .with_timeout(Duration::from_secs(5))
            .with_documents_dir("/tmp/docs");
        assert!(config.debug_mode);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.documents_dir, PathBuf::from("/tmp/docs"));
    }

    #[test]
    fn test_parse_bool_accepts_common_forms() {
        assert!(Config::parse_bool("X", "true").unwrap());
        assert!(Config::parse_bool("X", "1").unwrap());
        assert!(Config::parse_bool("X", "Yes").unwrap());
        assert!(!Config::parse_bool("X", "false").unwrap());
        assert!(!Config::parse_bool("X", "0").unwrap());
    }

    #[test]
    fn test_parse_bool_rejects_garbage() {
        let result = Config::parse_bool("GLPI_DEBUG_MODE", "maybe");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_app_token_rejects_placeholder() {
        let result = Config::validate_app_token("your_app_token_here");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_app_token_accepts_real_token() {
        let result = Config::validate_app_token("abc123def456");
        assert!(result.is_ok());
    }
}
