//! Logging bootstrap.
//!
//! Library code only emits `tracing` events; applications that want them
//! printed call [`CommonsConfig::init_logging`](crate::CommonsConfig::init_logging),
//! which reads a [`LogConfig`] and installs a global subscriber once per
//! process.
//!
//! # Example YAML
//!
//! ```yaml
//! level: debug
//! format: json
//! ansi: false
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::trace;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

use crate::error::{ConfigError, Result};

static LOGGING_CONFIGURED: AtomicBool = AtomicBool::new(false);

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Settings for the process-wide subscriber, which writes to stderr.
///
/// `RUST_LOG`, when set, takes precedence over [`level`](Self::level).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// An `EnvFilter` directive such as `info` or `odt_commons_core=debug`.
    pub level: String,
    pub format: LogFormat,
    /// Emit ANSI colour codes.
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Loads logging settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](ConfigError::Io) if the file cannot be read, or
    /// [`Yaml`](ConfigError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let config = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|e| ConfigError::Logging(format!("invalid level {:?}: {e}", self.level)))
    }

    /// Installs the global subscriber described by this config.
    ///
    /// Returns `false` without touching the subscriber when logging was
    /// already configured by an earlier call.
    ///
    /// # Errors
    ///
    /// Returns [`Logging`](ConfigError::Logging) if the level is not a
    /// valid filter or another subscriber was installed outside this crate.
    pub fn install(&self) -> Result<bool> {
        let filter = self.env_filter()?;
        if LOGGING_CONFIGURED.swap(true, Ordering::AcqRel) {
            trace!("logging already configured, ignoring new configuration");
            return Ok(false);
        }

        let subscriber = Registry::default().with(filter);
        let layer = fmt::layer().with_writer(std::io::stderr);
        let installed = match self.format {
            LogFormat::Compact => tracing::subscriber::set_global_default(
                subscriber.with(layer.compact().with_ansi(self.ansi)),
            ),
            LogFormat::Pretty => tracing::subscriber::set_global_default(
                subscriber.with(layer.pretty().with_ansi(self.ansi)),
            ),
            LogFormat::Json => tracing::subscriber::set_global_default(
                subscriber.with(layer.json().with_ansi(false)),
            ),
        };

        installed.map(|()| true).map_err(|e| {
            LOGGING_CONFIGURED.store(false, Ordering::Release);
            ConfigError::Logging(e.to_string())
        })
    }
}

/// Returns `true` once a subscriber has been installed through this crate.
pub fn is_logging_configured() -> bool {
    LOGGING_CONFIGURED.load(Ordering::Acquire)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: LogConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn test_deserialize_complete() {
        let config: LogConfig =
            serde_yaml::from_str("level: debug\nformat: json\nansi: false\n").unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.ansi);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(serde_yaml::from_str::<LogConfig>("format: xml\n").is_err());
    }
}
