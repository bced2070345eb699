//! Per-component configuration handle.
//!
//! A [`CommonsConfig`] knows where a component keeps its files:
//!
//! - the **conf directory** (default `conf/`, relative to the working
//!   directory) holds operator overrides;
//! - the **resource directory** holds the defaults shipped with the
//!   component, including its build information.
//!
//! Handles are plain values; create one per component and pass it where
//! needed.
//!
//! # Example
//!
//! ```no_run
//! use odt_commons_config::{BuildInfoProvider, CommonsConfig};
//!
//! let config = CommonsConfig::new("harvester").with_resource_dir("resources");
//! config.init_logging().unwrap();
//! println!("version {}", config.build_info().unwrap().version);
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use odt_commons_core::CommonsError;
use tracing::{debug, info};

use crate::build_info::{BuildInfo, BuildInfoProvider};
use crate::error::{ConfigError, Result};
use crate::logging::LogConfig;

/// File name of the logging configuration.
pub const LOG_CONFIG_FILE: &str = "odt.commons.logging.yml";

/// File name of the build information.
pub const BUILD_INFO_FILE: &str = "odt.commons.build.yml";

/// Default directory searched first for overrides.
pub const DEFAULT_CONF_DIR: &str = "conf";

/// Default directory holding shipped resources.
pub const DEFAULT_RESOURCE_DIR: &str = "resources";

/// Locates and caches configuration for one named component.
#[derive(Debug)]
pub struct CommonsConfig {
    reference: String,
    conf_dir: PathBuf,
    resource_dir: PathBuf,
    build_info: OnceLock<BuildInfo>,
}

impl CommonsConfig {
    /// Creates a handle with the default directories.
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            conf_dir: PathBuf::from(DEFAULT_CONF_DIR),
            resource_dir: PathBuf::from(DEFAULT_RESOURCE_DIR),
            build_info: OnceLock::new(),
        }
    }

    pub fn with_conf_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.conf_dir = dir.into();
        self
    }

    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = dir.into();
        self
    }

    /// Name of the component this handle configures.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn conf_dir(&self) -> &Path {
        &self.conf_dir
    }

    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }

    /// Path of the build information file.
    pub fn build_info_path(&self) -> PathBuf {
        self.resource_dir.join(BUILD_INFO_FILE)
    }

    /// Finds the logging configuration, preferring the conf directory
    /// over the resource directory.
    pub fn find_log_config(&self) -> Option<PathBuf> {
        [&self.conf_dir, &self.resource_dir]
            .into_iter()
            .map(|dir| dir.join(LOG_CONFIG_FILE))
            .find(|path| path.is_file())
    }

    /// Loads the logging configuration, or the defaults when no file
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but can't be read or parsed.
    pub fn log_config(&self) -> Result<LogConfig> {
        self.resolve_log_config().map(|(_, config)| config)
    }

    fn resolve_log_config(&self) -> Result<(Option<PathBuf>, LogConfig)> {
        match self.find_log_config() {
            Some(path) => {
                let config = LogConfig::load(&path)?;
                Ok((Some(path), config))
            }
            None => Ok((None, LogConfig::default())),
        }
    }

    /// Installs the global subscriber from [`log_config`](Self::log_config).
    ///
    /// Only the first call in a process installs anything; later calls
    /// return `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration can't be loaded or the
    /// subscriber can't be installed.
    pub fn init_logging(&self) -> Result<bool> {
        let (source, config) = self.resolve_log_config()?;
        let installed = config.install()?;
        if installed {
            match source {
                Some(path) => info!(
                    reference = %self.reference,
                    path = %path.display(),
                    "configured logging"
                ),
                None => info!(
                    reference = %self.reference,
                    "no logging configuration found, using defaults"
                ),
            }
        }
        Ok(installed)
    }
}

impl BuildInfoProvider for CommonsConfig {
    /// Loads build information from the resource directory on first use
    /// and caches it. Failures are not cached.
    fn build_info(&self) -> Result<BuildInfo> {
        if let Some(info) = self.build_info.get() {
            return Ok(info.clone());
        }
        let path = self.build_info_path();
        let info = BuildInfo::load(&path).map_err(|e| match e {
            ConfigError::Commons(CommonsError::NotFound(_)) => {
                ConfigError::Commons(CommonsError::NotFound(format!(
                    "{BUILD_INFO_FILE} in resources of {}",
                    self.reference
                )))
            }
            other => other,
        })?;
        debug!(reference = %self.reference, "caching build info");
        Ok(self.build_info.get_or_init(|| info).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CommonsConfig::new("test");
        assert_eq!(config.reference(), "test");
        assert_eq!(config.conf_dir(), Path::new(DEFAULT_CONF_DIR));
        assert_eq!(
            config.build_info_path(),
            Path::new(DEFAULT_RESOURCE_DIR).join(BUILD_INFO_FILE)
        );
    }

    #[test]
    fn test_missing_build_info() {
        let config = CommonsConfig::new("test").with_resource_dir("/nonexistent");
        let err = config.build_info().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Commons(CommonsError::NotFound(ref msg)) if msg.contains("test")
        ));
    }

    #[test]
    fn test_missing_log_config_uses_defaults() {
        let config = CommonsConfig::new("test")
            .with_conf_dir("/nonexistent/conf")
            .with_resource_dir("/nonexistent/res");
        assert!(config.find_log_config().is_none());
        assert_eq!(config.log_config().unwrap(), LogConfig::default());
        let (source, log) = config.resolve_log_config().unwrap();
        assert!(source.is_none());
        assert_eq!(log, LogConfig::default());
    }

    #[test]
    fn test_resolve_log_config_reports_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(LOG_CONFIG_FILE);
        std::fs::write(&path, "level: warn\n").unwrap();

        let config = CommonsConfig::new("test")
            .with_conf_dir("/nonexistent/conf")
            .with_resource_dir(dir.path());
        let (source, log) = config.resolve_log_config().unwrap();
        assert_eq!(source, Some(path));
        assert_eq!(log.level, "warn");
        assert_eq!(config.log_config().unwrap(), log);
    }
}
