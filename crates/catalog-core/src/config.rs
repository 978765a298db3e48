//! Configuration management for the catalog console

use crate::types::{Role, SessionContext};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Environment variable prefix, e.g. `CATALOG_API__BASE_URL`
pub const ENV_PREFIX: &str = "CATALOG";

/// Default configuration file name, looked up without extension
pub const DEFAULT_CONFIG_FILE: &str = "catalog-console";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    #[validate(nested)]
    pub api: ApiConfig,

    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Dashboard configuration
    #[serde(default)]
    #[validate(nested)]
    pub dashboard: DashboardConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiConfig {
    /// Base URL of the backend, without trailing `/api`
    #[serde(default = "default_base_url")]
    #[validate(url)]
    pub base_url: String,

    /// Raw `Cookie` header value carrying the admin session
    #[serde(default)]
    pub session_cookie: Option<String>,

    /// Request timeout in seconds; unset means requests never time out
    #[serde(default)]
    #[validate(range(min = 1))]
    pub request_timeout_secs: Option<u64>,
}

/// Session configuration: who the console acts as
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Signed-in user id; unset means anonymous
    #[serde(default)]
    pub user_id: Option<i64>,

    /// Role of the signed-in user
    #[serde(default = "default_role")]
    pub role: String,
}

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DashboardConfig {
    /// Page requested when the dashboard mounts
    #[serde(default = "default_initial_page")]
    #[validate(range(min = 1))]
    pub initial_page: u32,

    /// Route of the product creation screen
    #[serde(default = "default_create_product_route")]
    pub create_product_route: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_role() -> String {
    "admin".to_string()
}

const fn default_initial_page() -> u32 {
    1
}

fn default_create_product_route() -> String {
    "/catlogue".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_cookie: None,
            request_timeout_secs: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_id: None,
            role: default_role(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            initial_page: default_initial_page(),
            create_product_route: default_create_product_route(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl SessionConfig {
    /// Build the session context the views are initialised with
    pub fn to_context(&self) -> SessionContext {
        self.user_id.map_or_else(SessionContext::anonymous, |id| {
            SessionContext::signed_in(id, Role::from(self.role.clone()))
        })
    }
}

impl Config {
    /// Load configuration from the default file and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (required when given) and the
    /// environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load_from(path: Option<&Path>) -> crate::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert!(config.api.session_cookie.is_none());
        assert!(config.api.request_timeout_secs.is_none());
        assert_eq!(config.session.role, "admin");
        assert!(config.session.user_id.is_none());
        assert_eq!(config.dashboard.initial_page, 1);
        assert_eq!(config.dashboard.create_product_route, "/catlogue");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json_str = r#"{
            "api": {"base_url": "https://shop.example.com"},
            "session": {"user_id": 9}
        }"#;

        let config: Config = serde_json::from_str(json_str).unwrap();

        assert_eq!(config.api.base_url, "https://shop.example.com");
        assert_eq!(config.session.user_id, Some(9));
        assert_eq!(config.session.role, "admin");
        assert_eq!(config.dashboard.initial_page, 1);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        config.dashboard.initial_page = 0;

        let err = crate::Error::from(config.validate().unwrap_err());
        let message = err.to_string();
        assert!(message.contains("Validation error"));
    }

    #[test]
    fn test_session_context_from_config() {
        let anonymous = SessionConfig::default().to_context();
        assert!(anonymous.user.is_none());

        let admin = SessionConfig {
            user_id: Some(1),
            role: "admin".to_string(),
        }
        .to_context();
        assert!(admin.is_admin());

        let seller = SessionConfig {
            user_id: Some(2),
            role: "seller".to_string(),
        }
        .to_context();
        assert!(!seller.is_admin());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "http://127.0.0.1:4000"
session_cookie = "sid=abc"

[session]
user_id = 5
role = "admin"

[dashboard]
initial_page = 2
"#
        )
        .unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();

        assert_eq!(config.api.base_url, "http://127.0.0.1:4000");
        assert_eq!(config.api.session_cookie.as_deref(), Some("sid=abc"));
        assert_eq!(config.session.user_id, Some(5));
        assert_eq!(config.dashboard.initial_page, 2);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let result = Config::load_from(Some(&missing));
        assert!(matches!(
            result,
            Err(crate::Error::Configuration { .. })
        ));
    }
}
