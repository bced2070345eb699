//! Language tags.
//!
//! [`Locale`] wraps a normalised BCP 47 style tag such as `"en"`,
//! `"it-IT"` or `"zh-Hant-TW"`. The empty tag is the *root* locale, used
//! when the language of a string is unknown.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CommonsError, Result};

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,8}(-[A-Za-z0-9]{1,8})*$").expect("language tag pattern is valid")
});

/// A language tag identifying the locale of a string.
///
/// # Examples
///
/// ```
/// use odt_commons_core::Locale;
///
/// let locale: Locale = "EN-us".parse().unwrap();
/// assert_eq!(locale.as_str(), "en-US");
/// assert_eq!(locale.language(), "en");
/// assert!(Locale::ROOT.is_root());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Locale(Cow<'static, str>);

impl Locale {
    /// The root locale (empty tag).
    pub const ROOT: Locale = Locale(Cow::Borrowed(""));
    /// English.
    pub const ENGLISH: Locale = Locale(Cow::Borrowed("en"));
    /// Italian.
    pub const ITALIAN: Locale = Locale(Cow::Borrowed("it"));
    /// French.
    pub const FRENCH: Locale = Locale(Cow::Borrowed("fr"));
    /// German.
    pub const GERMAN: Locale = Locale(Cow::Borrowed("de"));
    /// Chinese.
    pub const CHINESE: Locale = Locale(Cow::Borrowed("zh"));

    /// Parses and normalises a language tag.
    ///
    /// The empty string (after trimming) yields [`Locale::ROOT`]. `_` is
    /// accepted as a subtag separator.
    ///
    /// # Errors
    ///
    /// Returns [`CommonsError::InvalidArgument`] if the tag is malformed.
    pub fn parse(tag: &str) -> Result<Self> {
        let tag = tag.trim().replace('_', "-");
        if tag.is_empty() {
            return Ok(Self::ROOT);
        }
        if !TAG_PATTERN.is_match(&tag) {
            return Err(CommonsError::InvalidArgument(format!(
                "malformed language tag: {tag:?}"
            )));
        }

        let normalized = tag
            .split('-')
            .enumerate()
            .map(|(i, subtag)| normalize_subtag(i, subtag))
            .collect::<Vec<_>>()
            .join("-");
        Ok(Self(Cow::Owned(normalized)))
    }

    /// Returns the full tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the primary language subtag (`""` for root).
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or("")
    }

    /// Returns `true` for the root locale.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

fn normalize_subtag(index: usize, subtag: &str) -> String {
    if index == 0 {
        return subtag.to_ascii_lowercase();
    }
    match subtag.len() {
        2 if subtag.chars().all(|c| c.is_ascii_alphabetic()) => subtag.to_ascii_uppercase(),
        4 if subtag.chars().all(|c| c.is_ascii_alphabetic()) => {
            let lower = subtag.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => lower,
            }
        }
        _ => subtag.to_ascii_lowercase(),
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::ROOT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = CommonsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Self::parse(&tag).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case() {
        assert_eq!(Locale::parse("IT").unwrap(), Locale::ITALIAN);
        assert_eq!(Locale::parse("en_gb").unwrap().as_str(), "en-GB");
        assert_eq!(Locale::parse("zh-hant-tw").unwrap().as_str(), "zh-Hant-TW");
    }

    #[test]
    fn test_parse_empty_is_root() {
        assert_eq!(Locale::parse("").unwrap(), Locale::ROOT);
        assert_eq!(Locale::parse("   ").unwrap(), Locale::ROOT);
        assert_eq!(Locale::ROOT.language(), "");
    }

    #[test]
    fn test_parse_rejects_malformed_tags() {
        for bad in ["e", "en--US", "1234", "en-", "en US"] {
            assert!(
                matches!(Locale::parse(bad), Err(CommonsError::InvalidArgument(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Locale::FRENCH).unwrap();
        assert_eq!(json, "\"fr\"");
        let back: Locale = serde_json::from_str("\"FR\"").unwrap();
        assert_eq!(back, Locale::FRENCH);
    }
}
