//! Semantic versions of the form `major.minor.patch[-prerelease]`.
//!
//! See <https://semver.org>. Build metadata and dotted prerelease
//! identifiers are not supported: the prerelease is a single opaque
//! string.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CommonsError, Result};

/// An immutable semantic version.
///
/// # Examples
///
/// ```
/// use odt_commons_core::SemVersion;
///
/// let v: SemVersion = "1.2.3-SNAPSHOT".parse().unwrap();
/// assert_eq!(v.major(), 1);
/// assert_eq!(v.prerelease(), "SNAPSHOT");
/// assert_eq!(v.to_string(), "1.2.3-SNAPSHOT");
///
/// assert!(SemVersion::parse("1.2").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemVersion {
    major: u32,
    minor: u32,
    patch: u32,
    prerelease: String,
}

impl SemVersion {
    /// A release version with no prerelease suffix.
    pub fn release(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: String::new(),
        }
    }

    /// A version with a prerelease suffix such as `"RC1"` or `"alpha"`.
    ///
    /// # Errors
    ///
    /// Returns [`CommonsError::InvalidFormat`] if the prerelease contains
    /// a `.`, which would not survive a format/parse round trip.
    pub fn new(major: u32, minor: u32, patch: u32, prerelease: impl Into<String>) -> Result<Self> {
        let prerelease = prerelease.into();
        if prerelease.contains('.') {
            return Err(CommonsError::InvalidFormat(format!(
                "prerelease may not contain '.': {prerelease:?}"
            )));
        }
        Ok(Self {
            major,
            minor,
            patch,
            prerelease,
        })
    }

    /// Parses `x.y.z` or `x.y.z-p`, with `x`, `y`, `z` numbers and `p` any
    /// string. A trailing `-` yields an empty prerelease.
    ///
    /// # Errors
    ///
    /// Returns [`CommonsError::InvalidFormat`] unless the string has exactly
    /// three dot-separated tokens with numeric major, minor and patch.
    pub fn parse(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s.split('.').collect();
        let [major, minor, rest] = tokens.as_slice() else {
            return Err(CommonsError::InvalidFormat(format!(
                "couldn't find three numbers separated by dots in version string {s:?}"
            )));
        };

        let (patch, prerelease) = match rest.split_once('-') {
            Some((patch, prerelease)) => (patch, prerelease),
            None => (*rest, ""),
        };

        Ok(Self {
            major: parse_number(major, s)?,
            minor: parse_number(minor, s)?,
            patch: parse_number(patch, s)?,
            prerelease: prerelease.to_string(),
        })
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }

    /// The prerelease suffix, `""` for releases.
    pub fn prerelease(&self) -> &str {
        &self.prerelease
    }

    /// Returns `true` if the version carries a prerelease suffix.
    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }
}

fn parse_number(token: &str, version: &str) -> Result<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CommonsError::InvalidFormat(format!(
            "non-numeric component {token:?} in version string {version:?}"
        )));
    }
    token.parse().map_err(|_| {
        CommonsError::InvalidFormat(format!(
            "component {token:?} out of range in version string {version:?}"
        ))
    })
}

impl fmt::Display for SemVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease)?;
        }
        Ok(())
    }
}

impl FromStr for SemVersion {
    type Err = CommonsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SemVersion {
    type Error = CommonsError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<SemVersion> for String {
    fn from(version: SemVersion) -> Self {
        version.to_string()
    }
}

impl Ord for SemVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.prerelease.cmp(&other.prerelease),
            })
    }
}

impl PartialOrd for SemVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
