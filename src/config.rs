//! Environment-driven configuration.

use std::env;
use std::net::SocketAddr;

const DEFAULT_SHEET_GID: &str = "0";
const DEFAULT_DATABASE_URL: &str = "sqlite://workout-log.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Missing configuration: {0}")]
  Missing(String),

  #[error("Invalid {name}: {message}")]
  Invalid { name: String, message: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub sheet_id: String,
  pub sheet_gid: String,
  pub database_url: String,
  pub anthropic_api_key: String,
  pub bind_addr: SocketAddr,
}

fn required(name: &str) -> Result<String, ConfigError> {
  env::var(name)
    .ok()
    .filter(|v| !v.trim().is_empty())
    .ok_or_else(|| ConfigError::Missing(name.to_string()))
}

fn optional(name: &str, default: &str) -> String {
  env::var(name)
    .ok()
    .filter(|v| !v.trim().is_empty())
    .unwrap_or_else(|| default.to_string())
}

impl AppConfig {
  /// Read configuration from the process environment. Call
  /// `dotenvy::dotenv()` first to pick up a local `.env`.
  pub fn from_env() -> Result<Self, ConfigError> {
    let bind = optional("BIND_ADDR", DEFAULT_BIND_ADDR);
    let bind_addr = bind.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
      name: "BIND_ADDR".into(),
      message: format!("{}: {}", bind, e),
    })?;

    Ok(Self {
      sheet_id: required("WORKOUT_SHEET_ID")?,
      sheet_gid: optional("WORKOUT_SHEET_GID", DEFAULT_SHEET_GID),
      database_url: optional("DATABASE_URL", DEFAULT_DATABASE_URL),
      anthropic_api_key: required("ANTHROPIC_API_KEY")?,
      bind_addr,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  const ALL_VARS: [&str; 5] = [
    "WORKOUT_SHEET_ID",
    "WORKOUT_SHEET_GID",
    "DATABASE_URL",
    "ANTHROPIC_API_KEY",
    "BIND_ADDR",
  ];

  fn with_vars<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
    let pairs: Vec<(&str, Option<&str>)> = ALL_VARS
      .iter()
      .map(|name| {
        let value = vars.iter().find(|(k, _)| k == name).map(|(_, v)| *v);
        (*name, value)
      })
      .collect();
    temp_env::with_vars(pairs, f);
  }

  #[test]
  #[serial]
  fn test_defaults_applied() {
    with_vars(
      &[("WORKOUT_SHEET_ID", "sheet-1"), ("ANTHROPIC_API_KEY", "key")],
      || {
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.sheet_id, "sheet-1");
        assert_eq!(config.sheet_gid, "0");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
      },
    );
  }

  #[test]
  #[serial]
  fn test_overrides_read() {
    with_vars(
      &[
        ("WORKOUT_SHEET_ID", "sheet-2"),
        ("WORKOUT_SHEET_GID", "1234"),
        ("DATABASE_URL", "sqlite::memory:"),
        ("ANTHROPIC_API_KEY", "key"),
        ("BIND_ADDR", "0.0.0.0:8080"),
      ],
      || {
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.sheet_gid, "1234");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr.port(), 8080);
      },
    );
  }

  #[test]
  #[serial]
  fn test_missing_sheet_id() {
    with_vars(&[("ANTHROPIC_API_KEY", "key")], || {
      let err = AppConfig::from_env().unwrap_err();
      assert!(matches!(err, ConfigError::Missing(ref name) if name == "WORKOUT_SHEET_ID"));
    });
  }

  #[test]
  #[serial]
  fn test_blank_api_key_is_missing() {
    with_vars(
      &[("WORKOUT_SHEET_ID", "sheet-1"), ("ANTHROPIC_API_KEY", "  ")],
      || {
        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ref name) if name == "ANTHROPIC_API_KEY"));
      },
    );
  }

  #[test]
  #[serial]
  fn test_invalid_bind_addr() {
    with_vars(
      &[
        ("WORKOUT_SHEET_ID", "sheet-1"),
        ("ANTHROPIC_API_KEY", "key"),
        ("BIND_ADDR", "localhost"),
      ],
      || {
        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref name, .. } if name == "BIND_ADDR"));
      },
    );
  }
}
