//! Build metadata shipped alongside a binary.
//!
//! # Example YAML
//!
//! ```yaml
//! build-jdk: "rustc 1.86.0"
//! built-by: ci
//! created-by: cargo
//! git-sha: 3f2a9c1
//! scm-url: https://github.com/opendatatrentino/odt-commons
//! timestamp: "2015-06-01T10:00:00Z"
//! version: 1.1.0
//! ```

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use odt_commons_core::{CommonsError, SemVersion};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Information about how and when a component was built.
///
/// Every field defaults to `""` when missing from the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BuildInfo {
    pub build_jdk: String,
    pub built_by: String,
    pub created_by: String,
    pub git_sha: String,
    pub scm_url: String,
    pub timestamp: String,
    pub version: String,
}

impl BuildInfo {
    /// Loads build information from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CommonsError::NotFound`] wrapped in
    /// [`Commons`](ConfigError::Commons) if the file does not exist,
    /// [`Io`](ConfigError::Io) if it cannot be read, or
    /// [`Yaml`](ConfigError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::Commons(CommonsError::NotFound(format!(
                "build info file {}",
                path.display()
            ))),
            _ => ConfigError::Io(e),
        })?;
        let info: Self = serde_yaml::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), version = %info.version, "loaded build info");
        Ok(info)
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Parses [`version`](Self::version) as a semantic version.
    ///
    /// # Errors
    ///
    /// Returns [`Commons`](ConfigError::Commons) if the version is not
    /// `MAJOR.MINOR.PATCH[-prerelease]`.
    pub fn semver(&self) -> Result<SemVersion> {
        Ok(SemVersion::parse(&self.version)?)
    }
}

/// Something that can report the [`BuildInfo`] of the component it
/// configures.
pub trait BuildInfoProvider {
    /// Returns the build information.
    ///
    /// # Errors
    ///
    /// Implementations fail when the information can't be located or read.
    fn build_info(&self) -> Result<BuildInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_complete() {
        let yaml = r#"
build-jdk: "rustc 1.86.0"
built-by: ci
created-by: cargo
git-sha: 3f2a9c1
scm-url: https://github.com/opendatatrentino/odt-commons
timestamp: "2015-06-01T10:00:00Z"
version: 1.1.0
"#;
        let info: BuildInfo = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(info.git_sha, "3f2a9c1");
        assert_eq!(info.scm_url, "https://github.com/opendatatrentino/odt-commons");
        assert_eq!(info.semver().unwrap(), SemVersion::release(1, 1, 0));
        assert!(!info.is_empty());
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let info: BuildInfo = serde_yaml::from_str("version: 2.0.0-SNAPSHOT\n").unwrap();
        assert_eq!(info.version, "2.0.0-SNAPSHOT");
        assert_eq!(info.built_by, "");
        assert_eq!(info.timestamp, "");
    }

    #[test]
    fn test_bad_version() {
        let info = BuildInfo {
            version: "1.0".into(),
            ..BuildInfo::default()
        };
        assert!(matches!(info.semver(), Err(ConfigError::Commons(_))));
        assert!(BuildInfo::default().is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = BuildInfo::load("/nonexistent/odt.commons.build.yml");
        assert!(matches!(
            result,
            Err(ConfigError::Commons(CommonsError::NotFound(_)))
        ));
    }
}
