//! Configuration loading and typed config structures.
//!
//! The configuration lives in `dockify-config.yaml` (or the path named by
//! `DOCKIFY_CONFIG`). Every section and field has a default, so an empty
//! file, or no file at all, yields a runnable in-memory service.
//!
//! Environment variables override YAML values:
//! - `DATABASE_URL` sets `database.url` (creating the section if absent)
//! - `DOCKIFY_HOST` overrides `server.host`
//! - `DOCKIFY_PORT` overrides `server.port`

use std::path::Path;

use dockify_api::ServerConfig;
use dockify_db::PostgresConfig;
use dockify_proximity::EngineConfig;
use serde::Deserialize;

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "DOCKIFY_CONFIG";

/// Config file read when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "dockify-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid value for {key}: {value}")]
    Env {
        /// The variable name.
        key: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
///
/// Mirrors the structure of `dockify-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// `PostgreSQL` settings. Without them observations live in memory.
    #[serde(default)]
    pub database: Option<PostgresConfig>,

    /// Query engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Env`] if an override is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Env`] if an override is malformed.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml maps an empty document to unit, not to an empty map.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for when no file exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if an override is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Override config values with process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if `DOCKIFY_PORT` is not a port number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup("DATABASE_URL") {
            match &mut self.database {
                Some(database) => database.url = url,
                None => self.database = Some(PostgresConfig::new(&url)),
            }
        }
        if let Some(host) = lookup("DOCKIFY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("DOCKIFY_PORT") {
            match port.parse() {
                Ok(parsed) => self.server.port = parsed,
                Err(_) => {
                    return Err(ConfigError::Env {
                        key: "DOCKIFY_PORT",
                        value: port,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset (e.g. `info`, `dockify=debug`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dockify_types::SelectionPolicy;

    use super::*;

    fn parse_with(yaml: &str, vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let mut config: ServiceConfig = serde_yml::from_str(yaml)?;
        config.apply_overrides(|key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_owned())
        })?;
        Ok(config)
    }

    #[test]
    fn default_config_is_in_memory() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.engine.selection_policy, SelectionPolicy::MinDistance);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 9000
  shutdown_grace_secs: 10

database:
  url: "postgresql://dockify:secret@db:5432/dockify"
  max_connections: 4
  run_migrations: false

engine:
  selection_policy: most_recent

logging:
  level: "debug"
  format: json
"#;
        let config = parse_with(yaml, &[]).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.shutdown_grace_secs, 10);

        let database = config.database.unwrap();
        assert_eq!(database.url, "postgresql://dockify:secret@db:5432/dockify");
        assert_eq!(database.max_connections, 4);
        assert_eq!(database.connect_timeout_secs, 5);
        assert!(!database.run_migrations);

        assert_eq!(config.engine.selection_policy, SelectionPolicy::MostRecent);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let config = parse_with("server:\n  port: 3000\n", &[]).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.database.is_none());
    }

    #[test]
    fn database_url_override_creates_section() {
        let config = parse_with(
            "logging:\n  level: warn\n",
            &[("DATABASE_URL", "postgresql://localhost/dockify")],
        )
        .unwrap();
        let database = config.database.unwrap();
        assert_eq!(database.url, "postgresql://localhost/dockify");
        assert_eq!(database.max_connections, 10);
    }

    #[test]
    fn database_url_override_keeps_pool_settings() {
        let yaml = "database:\n  url: postgresql://a/b\n  max_connections: 2\n";
        let config = parse_with(yaml, &[("DATABASE_URL", "postgresql://c/d")]).unwrap();
        let database = config.database.unwrap();
        assert_eq!(database.url, "postgresql://c/d");
        assert_eq!(database.max_connections, 2);
    }

    #[test]
    fn host_and_port_overrides() {
        let config = parse_with(
            "server:\n  port: 3000\n",
            &[("DOCKIFY_HOST", "127.0.0.1"), ("DOCKIFY_PORT", "8181")],
        )
        .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8181);
    }

    #[test]
    fn bad_port_override_is_rejected() {
        let result = parse_with("{}", &[("DOCKIFY_PORT", "eighty")]);
        assert!(matches!(
            result,
            Err(ConfigError::Env {
                key: "DOCKIFY_PORT",
                ..
            })
        ));
    }

    #[test]
    fn unknown_policy_is_a_yaml_error() {
        let result = parse_with("engine:\n  selection_policy: random\n", &[]);
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
