//! Application configuration loaded from environment variables.
//!
//! # Configuration Hierarchy
//!
//! All configuration is loaded from environment variables with sensible defaults
//! for development. In production, configure via environment variables or a `.env` file.
//!
//! # Security Configuration
//!
//! - `API_KEY`: Shared secret required on create/update/delete. When unset,
//!   those routes reject every request.
//! - `API_KEY_HEADER`: Header carrying the secret (default: `x-api-key`)
//! - `CORS_ALLOWED_ORIGINS`: Comma-separated list of allowed origins (default: `*` for dev)
//!
//! # Listing
//!
//! - `DEFAULT_PAGE_LIMIT`: Page size when `limit` is not given (default: 10)
//! - `MAX_PAGE_LIMIT`: Largest page size a client may request (default: unbounded)
//!
//! # Logging
//!
//! - `RUST_LOG`: Log filter directives (default: `info`)
//! - `LOG_FORMAT`: `text` or `json` (default: `text`)

use std::env;
use std::fmt;
use std::str::FromStr;

use axum::http::HeaderName;

use crate::error::{AppError, AppResult};
use crate::middleware::API_KEY_HEADER;
use crate::query::PageLimits;

/// Application configuration loaded from environment variables.
///
/// # Example
///
/// ```rust,ignore
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.server_addr());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Server host address (default: "0.0.0.0")
    pub host: String,

    /// Server port (default: 3000)
    pub port: u16,

    /// Maximum request body size in bytes (default: 1MB)
    pub max_request_body_size: usize,

    // =========================================================================
    // Catalog Configuration
    // =========================================================================
    /// Whether the store starts with the three seed products (default: true)
    pub seed_products: bool,

    /// Page size used when a listing request gives no valid `limit` (default: 10)
    pub default_page_limit: usize,

    /// Upper bound on the page size a client may request (default: none)
    pub max_page_limit: Option<usize>,

    // =========================================================================
    // Security Configuration
    // =========================================================================
    /// Shared secret guarding mutating routes
    pub api_key: Option<String>,

    /// Header name the secret is read from (default: "x-api-key")
    pub api_key_header: String,

    /// Comma-separated list of allowed CORS origins
    /// Use "*" to allow all origins (not recommended for production)
    pub cors_allowed_origins: Vec<String>,

    // =========================================================================
    // Observability Configuration
    // =========================================================================
    /// Log filter directives (e.g., "info", "product_catalog=debug")
    pub log_level: String,

    /// Log output format (default: text)
    pub log_format: LogFormat,

    /// Port for Prometheus metrics endpoint (default: 0 = disabled)
    pub metrics_port: u16,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` if any configuration value is invalid
    /// (e.g., non-numeric PORT value, zero page limit).
    pub fn from_env() -> AppResult<Self> {
        // Load an .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let config = Self {
            // Server
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: Self::parse_env("PORT", 3000)?,
            max_request_body_size: Self::parse_env("MAX_REQUEST_BODY_SIZE", 1024 * 1024)?,

            // Catalog
            seed_products: Self::parse_env("SEED_PRODUCTS", true)?,
            default_page_limit: Self::parse_env("DEFAULT_PAGE_LIMIT", 10)?,
            max_page_limit: Self::parse_optional_env("MAX_PAGE_LIMIT")?,

            // Security
            api_key: env::var("API_KEY").ok().filter(|k| !k.is_empty()),
            api_key_header: env::var("API_KEY_HEADER")
                .ok()
                .map(|h| h.trim().to_ascii_lowercase())
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| API_KEY_HEADER.to_string()),
            cors_allowed_origins: Self::parse_cors_origins(),

            // Observability
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: Self::parse_env("LOG_FORMAT", LogFormat::Text)?,
            metrics_port: Self::parse_env("METRICS_PORT", 0)?,
        };

        // Validate configuration before returning
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values for consistency and correctness.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` if validation fails.
    pub fn validate(&self) -> AppResult<()> {
        if self.default_page_limit == 0 {
            return Err(AppError::ConfigError(
                "DEFAULT_PAGE_LIMIT must be greater than 0".to_string(),
            ));
        }

        if let Some(max) = self.max_page_limit {
            if max == 0 {
                return Err(AppError::ConfigError(
                    "MAX_PAGE_LIMIT must be greater than 0".to_string(),
                ));
            }

            if self.default_page_limit > max {
                return Err(AppError::ConfigError(format!(
                    "DEFAULT_PAGE_LIMIT ({}) must be <= MAX_PAGE_LIMIT ({max})",
                    self.default_page_limit
                )));
            }
        }

        if self.max_request_body_size == 0 {
            return Err(AppError::ConfigError(
                "MAX_REQUEST_BODY_SIZE must be greater than 0".to_string(),
            ));
        }

        self.api_key_header_name()?;

        Ok(())
    }

    /// Get the full server address for binding.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if an API key is configured.
    pub fn auth_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Parsed header name for the API key.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` if `API_KEY_HEADER` is not a valid header name.
    pub fn api_key_header_name(&self) -> AppResult<HeaderName> {
        HeaderName::from_str(&self.api_key_header).map_err(|e| {
            AppError::ConfigError(format!(
                "Invalid API_KEY_HEADER '{}': {e}",
                self.api_key_header
            ))
        })
    }

    /// Page size bounds for product listings.
    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_limit: self.default_page_limit,
            max_limit: self.max_page_limit,
        }
    }

    /// Check if Prometheus metrics export is enabled.
    pub fn metrics_enabled(&self) -> bool {
        self.metrics_port > 0
    }

    /// Get the metrics endpoint address.
    ///
    /// Returns `None` if metrics are disabled (port = 0).
    pub fn metrics_addr(&self) -> Option<std::net::SocketAddr> {
        if self.metrics_enabled() {
            Some(std::net::SocketAddr::from((
                [0, 0, 0, 0],
                self.metrics_port,
            )))
        } else {
            None
        }
    }

    /// Parse an environment variable into the specified type with a default value.
    fn parse_env<T>(name: &str, default: T) -> AppResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(name) {
            Ok(val) => val
                .trim()
                .parse()
                .map_err(|e| AppError::ConfigError(format!("Invalid {name}: {e}"))),
            Err(_) => Ok(default),
        }
    }

    /// Parse an optional environment variable; unset or blank means `None`.
    fn parse_optional_env<T>(name: &str) -> AppResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(name) {
            Ok(val) if !val.trim().is_empty() => val
                .trim()
                .parse()
                .map(Some)
                .map_err(|e| AppError::ConfigError(format!("Invalid {name}: {e}"))),
            _ => Ok(None),
        }
    }

    /// Parse CORS allowed origins from environment variable.
    fn parse_cors_origins() -> Vec<String> {
        env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Default configuration for testing and development.
///
/// Production deployments should use `Config::from_env()` instead.
impl Default for Config {
    fn default() -> Self {
        Self {
            // Server
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_request_body_size: 1024 * 1024, // 1MB
            // Catalog
            seed_products: true,
            default_page_limit: 10,
            max_page_limit: None,
            // Security
            api_key: None,
            api_key_header: API_KEY_HEADER.to_string(),
            cors_allowed_origins: vec!["*".to_string()],
            // Observability
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            metrics_port: 0,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.default_page_limit, 10);
        assert_eq!(config.max_request_body_size, 1024 * 1024);
        assert!(config.seed_products);
        assert!(config.api_key.is_none());
        assert!(!config.metrics_enabled());
    }

    #[test]
    fn test_server_addr_format() {
        let config = Config {
            host: "localhost".to_string(),
            port: 3000,
            ..Config::default()
        };

        assert_eq!(config.server_addr(), "localhost:3000");
    }

    #[test]
    fn test_auth_enabled() {
        let config = Config::default();
        assert!(!config.auth_enabled());

        let config = Config {
            api_key: Some("secret-key".to_string()),
            ..Config::default()
        };
        assert!(config.auth_enabled());
    }

    #[test]
    fn test_page_limits() {
        let config = Config {
            default_page_limit: 5,
            max_page_limit: Some(20),
            ..Config::default()
        };

        assert_eq!(
            config.page_limits(),
            PageLimits {
                default_limit: 5,
                max_limit: Some(20)
            }
        );
    }

    #[test]
    fn test_page_limit_unbounded_by_default() {
        assert_eq!(Config::default().page_limits().max_limit, None);
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_max_page_limit() {
        let config = Config {
            max_page_limit: Some(0),
            ..Config::default()
        };

        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("MAX_PAGE_LIMIT"));
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }

    #[test]
    fn test_validate_zero_page_limit() {
        let config = Config {
            default_page_limit: 0,
            ..Config::default()
        };

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("DEFAULT_PAGE_LIMIT"));
    }

    #[test]
    fn test_validate_limit_ordering() {
        let config = Config {
            default_page_limit: 50,
            max_page_limit: Some(10),
            ..Config::default()
        };

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("MAX_PAGE_LIMIT"));
    }

    #[test]
    fn test_validate_invalid_header_name() {
        let config = Config {
            api_key_header: "bad header".to_string(),
            ..Config::default()
        };

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API_KEY_HEADER"));
    }

    #[test]
    fn test_metrics_addr() {
        let config = Config {
            metrics_port: 9100,
            ..Config::default()
        };
        assert_eq!(config.metrics_addr().unwrap().port(), 9100);
        assert!(Config::default().metrics_addr().is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_api_key_header() {
        let config = Config::default();
        assert_eq!(config.api_key_header, API_KEY_HEADER);
        assert_eq!(config.api_key_header_name().unwrap().as_str(), "x-api-key");
    }
}
