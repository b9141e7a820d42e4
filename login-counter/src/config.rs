//! Configuration for login-counter.

use chrono::{DateTime, NaiveDateTime};
use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub columns: ColumnsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database URL (`sqlite:` prefix optional, `:memory:` allowed)
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when RUST_LOG is not set (default: info)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Which wall clock login times are recorded in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockZone {
    /// Server local time.
    #[default]
    Local,
    Utc,
}

impl ClockZone {
    /// Wall-clock reading of `instant` in this zone.
    pub fn wall_clock(self, instant: DateTime<chrono::Utc>) -> NaiveDateTime {
        match self {
            ClockZone::Local => instant.with_timezone(&chrono::Local).naive_local(),
            ClockZone::Utc => instant.naive_utc(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Shown in the last login column for users who never logged in.
    #[serde(default = "default_never_label")]
    pub never_label: String,
    #[serde(default)]
    pub clock: ClockZone,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            never_label: default_never_label(),
            clock: ClockZone::default(),
        }
    }
}

/// Labels of the two user-list columns.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnsConfig {
    #[serde(default = "default_login_count_label")]
    pub login_count_label: String,
    #[serde(default = "default_last_login_label")]
    pub last_login_label: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            login_count_label: default_login_count_label(),
            last_login_label: default_last_login_label(),
        }
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_database_url() -> String {
    "sqlite:./data/login-counter.db".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_never_label() -> String {
    "Never".to_string()
}
fn default_login_count_label() -> String {
    "Login count".to_string()
}
fn default_last_login_label() -> String {
    "Last login".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (LOGIN_COUNTER__SECTION__KEY format)
    /// 2. login-counter.toml file (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("login-counter")
    }

    /// Like [`Config::load`], reading the given file name (extension optional).
    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix("LOGIN_COUNTER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "sqlite:./data/login-counter.db");
        assert_eq!(config.display.never_label, "Never");
        assert_eq!(config.display.clock, ClockZone::Local);
        assert_eq!(config.columns.login_count_label, "Login count");
        assert_eq!(config.columns.last_login_label, "Last login");
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9090

[display]
never_label = "-"
clock = "utc"

[columns]
login_count_label = "Logins"
"#,
        )
        .unwrap();

        let config = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.display.never_label, "-");
        assert_eq!(config.display.clock, ClockZone::Utc);
        assert_eq!(config.columns.login_count_label, "Logins");
        assert_eq!(config.columns.last_login_label, "Last login");
    }

    #[test]
    fn test_clock_zone_wall_clock() {
        use chrono::{Local, TimeZone, Utc};

        let instant = Utc.with_ymd_and_hms(2024, 8, 1, 12, 30, 0).unwrap();
        assert_eq!(ClockZone::Utc.wall_clock(instant), instant.naive_utc());
        assert_eq!(
            ClockZone::Local.wall_clock(instant),
            instant.with_timezone(&Local).naive_local()
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load_from("/nonexistent/login-counter-config").unwrap();
        assert_eq!(config.logging.level, "info");
    }
}
