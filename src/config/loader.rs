use std::collections::HashSet;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Why a config file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// `example-spa/config.toml` under the platform config dir
    /// (`~/.config` on Linux).
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("example-spa").join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Parses and validates `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects configs the server or client cannot start with:
    /// - At least one screen is configured, names are non-empty, unique and
    ///   usable as a path segment
    /// - The default screen is one of the configured screens
    /// - The bind address parses and timeouts are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let client = &self.client;
        if client.screens.is_empty() {
            return Err(invalid("At least one screen must be configured"));
        }

        let mut seen = HashSet::new();
        for name in &client.screens {
            if name.is_empty() || name.contains('/') {
                return Err(invalid(format!("Invalid screen name '{name}'")));
            }
            if !seen.insert(name.as_str()) {
                return Err(invalid(format!("Duplicate screen name '{name}'")));
            }
        }

        if !seen.contains(client.default_screen.as_str()) {
            return Err(invalid(format!(
                "Default screen '{}' not found in configured screens",
                client.default_screen
            )));
        }

        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(invalid(format!(
                "Invalid bind address '{}'",
                self.server.bind_addr
            )));
        }

        if client.request_timeout_seconds == 0 || client.connect_timeout_seconds == 0 {
            return Err(invalid("Timeouts must be greater than zero"));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_duplicate_screens() {
        let mut config = Config::default();
        config.client.screens.push("home".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate screen name 'home'"));
    }

    #[test]
    fn rejects_unknown_default_screen() {
        let mut config = Config::default();
        config.client.default_screen = "landing".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn rejects_screen_names_with_slash() {
        let mut config = Config::default();
        config.client.screens = vec!["home".to_string(), "a/b".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_bind_address() {
        let mut config = Config::default();
        config.server.bind_addr = "not-an-addr".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.client.default_screen, "home");
        assert_eq!(config.client.screens.len(), 6);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[server]
bind_addr = "127.0.0.1:9000"

[client]
screens = ["home", "foods"]
request_timeout_seconds = 3
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.client.screens, vec!["home", "foods"]);
        assert_eq!(config.client.request_timeout_seconds, 3);
        assert_eq!(config.client.connect_timeout_seconds, 5);
        assert!(config.directory.seed_file.is_none());
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[client\nscreens = ").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
