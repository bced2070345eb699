//! Build information, configuration lookup and logging bootstrap.
//!
//! This crate provides the collaborators a component needs at startup:
//!
//! - [`CommonsConfig`]: locates a component's override and resource
//!   directories and caches its [`BuildInfo`].
//! - [`LogConfig`]: YAML logging settings installed as a global `tracing`
//!   subscriber, at most once per process.
//!
//! # Quick start
//!
//! ```no_run
//! use odt_commons_config::{BuildInfoProvider, CommonsConfig};
//!
//! let config = CommonsConfig::new("harvester");
//! config.init_logging().unwrap();
//!
//! let info = config.build_info().unwrap();
//! println!("{} built from {}", info.version, info.git_sha);
//! ```

mod build_info;
mod config;
mod error;
mod logging;

pub use build_info::{BuildInfo, BuildInfoProvider};
pub use config::{
    BUILD_INFO_FILE, CommonsConfig, DEFAULT_CONF_DIR, DEFAULT_RESOURCE_DIR, LOG_CONFIG_FILE,
};
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, is_logging_configured};
