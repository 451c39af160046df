//! # Configuration
//!
//! Layered settings for the server binary.
//!
//! Precedence, lowest to highest:
//! 1. Built-in defaults
//! 2. TOML file passed with `--config`
//! 3. Environment variables (`ATOMSPACE_HOST`, `ATOMSPACE_PORT`,
//!    `ATOMSPACE_SCHEDULER_INTERVAL_MS`)
//! 4. CLI flags (applied by the caller)
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8100
//!
//! [scheduler]
//! interval_ms = 1000
//! autostart = false
//!
//! [inference]
//! history_capacity = 10000
//! ```
//!
//! Security settings (`ATOMSPACE_API_KEY`, `ATOMSPACE_RATE_LIMIT`,
//! `ATOMSPACE_CORS_ORIGINS`) are read by the router, not here.

use atomspace_core::AtomSpaceError;
use atomspace_core::primitives::DEFAULT_HISTORY_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8100,
        }
    }
}

/// Agent scheduler settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Delay between cycles in milliseconds. Must be at least 1.
    pub interval_ms: u64,
    /// Start the scheduler together with the server.
    pub autostart: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            autostart: false,
        }
    }
}

/// Inference log settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InferenceConfig {
    pub history_capacity: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Complete server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub scheduler: SchedulerConfig,
    pub inference: InferenceConfig,
}

impl Config {
    /// Defaults, then the optional file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, AtomSpaceError> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    AtomSpaceError::Io(format!("Cannot read config '{}': {}", path.display(), e))
                })?;
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, AtomSpaceError> {
        toml::from_str(text).map_err(|e| AtomSpaceError::Config(e.to_string()))
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, AtomSpaceError> {
        toml::to_string(self).map_err(|e| AtomSpaceError::Config(e.to_string()))
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), AtomSpaceError> {
        if let Some(host) = lookup("ATOMSPACE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("ATOMSPACE_PORT") {
            self.server.port = parse_var("ATOMSPACE_PORT", &port)?;
        }
        if let Some(interval) = lookup("ATOMSPACE_SCHEDULER_INTERVAL_MS") {
            self.scheduler.interval_ms = parse_var("ATOMSPACE_SCHEDULER_INTERVAL_MS", &interval)?;
        }
        Ok(())
    }

    /// Reject values the runtime cannot honour.
    pub fn validate(&self) -> Result<(), AtomSpaceError> {
        if self.scheduler.interval_ms == 0 {
            return Err(AtomSpaceError::Config(
                "scheduler.interval_ms must be at least 1".to_string(),
            ));
        }
        if self.inference.history_capacity == 0 {
            return Err(AtomSpaceError::Config(
                "inference.history_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port` for the listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, AtomSpaceError> {
    value
        .trim()
        .parse()
        .map_err(|_| AtomSpaceError::Config(format!("{} has invalid value '{}'", key, value)))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8100");
        assert_eq!(config.scheduler.interval_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml_str("[server]\nport = 9000\n").expect("parse");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.inference.history_capacity, DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(matches!(
            Config::from_toml_str("[server]\nprot = 1\n"),
            Err(AtomSpaceError::Config(_))
        ));
    }

    #[test]
    fn env_overrides_file() {
        let vars: HashMap<&str, &str> = [
            ("ATOMSPACE_HOST", "0.0.0.0"),
            ("ATOMSPACE_SCHEDULER_INTERVAL_MS", "250"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::from_toml_str("[server]\nhost = \"10.0.0.1\"\n").expect("parse");
        config
            .apply_env(|k| vars.get(k).map(|v| v.to_string()))
            .expect("env");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.scheduler.interval_ms, 250);
    }

    #[test]
    fn bad_env_value_is_config_error() {
        let mut config = Config::default();
        let result = config.apply_env(|k| (k == "ATOMSPACE_PORT").then(|| "eighty".to_string()));
        assert!(matches!(result, Err(AtomSpaceError::Config(_))));
    }

    #[test]
    fn zero_interval_rejected() {
        let config = Config::from_toml_str("[scheduler]\ninterval_ms = 0\n").expect("parse");
        assert!(config.validate().is_err());
    }

    #[test]
    fn toml_round_trip() {
        let mut config = Config::default();
        config.scheduler.autostart = true;
        let text = config.to_toml().expect("render");
        assert_eq!(Config::from_toml_str(&text).expect("parse"), config);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "[inference]\nhistory_capacity = 5").expect("write");
        let config = Config::load(Some(file.path())).expect("load");
        assert_eq!(config.inference.history_capacity, 5);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = Config::load(Some(Path::new("/nonexistent/atomspace.toml")));
        assert!(matches!(result, Err(AtomSpaceError::Io(_))));
    }
}
