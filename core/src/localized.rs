use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CommonsError, Result};
use crate::locale::Locale;

/// A string tagged with the locale it is written in.
///
/// The text is never absent; the default instance (root locale, empty
/// text) doubles as the "no string" value returned by
/// [`Dict::any_string`](crate::Dict::any_string) on an empty dictionary.
///
/// # Examples
///
/// ```
/// use odt_commons_core::{LocalizedString, Locale};
///
/// let ciao = LocalizedString::new(Locale::ITALIAN, "ciao");
/// assert_eq!(ciao.text(), "ciao");
///
/// let unknown = LocalizedString::of("string with unknown language");
/// assert_eq!(unknown.locale(), &Locale::ROOT);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LocalizedFields")]
pub struct LocalizedString {
    locale: Locale,
    text: String,
}

/// Deserialized shape of [`LocalizedString`]: a missing field takes the
/// default, an explicit `null` is rejected.
#[derive(Deserialize)]
struct LocalizedFields {
    #[serde(default = "root_locale")]
    locale: Option<Locale>,
    #[serde(default = "empty_text")]
    text: Option<String>,
}

fn root_locale() -> Option<Locale> {
    Some(Locale::ROOT)
}

fn empty_text() -> Option<String> {
    Some(String::new())
}

impl TryFrom<LocalizedFields> for LocalizedString {
    type Error = CommonsError;

    fn try_from(fields: LocalizedFields) -> Result<Self> {
        Self::try_of_optional(fields.locale, fields.text.as_deref())
    }
}

impl LocalizedString {
    /// Creates a string in the given locale.
    pub fn new(locale: Locale, text: impl Into<String>) -> Self {
        Self {
            locale,
            text: text.into(),
        }
    }

    /// Creates a string in the root locale.
    pub fn of(text: impl Into<String>) -> Self {
        Self::new(Locale::ROOT, text)
    }

    /// Creates a string from possibly-missing parts, as they arrive from
    /// loosely typed sources.
    ///
    /// # Errors
    ///
    /// Returns [`CommonsError::NullArgument`] if either part is `None`.
    pub fn try_of_optional(locale: Option<Locale>, text: Option<&str>) -> Result<Self> {
        let locale =
            locale.ok_or_else(|| CommonsError::NullArgument("locale of localized string".into()))?;
        let text =
            text.ok_or_else(|| CommonsError::NullArgument("text of localized string".into()))?;
        Ok(Self::new(locale, text))
    }

    /// The locale of the text.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The text, never absent.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Splits into locale and text.
    pub fn into_parts(self) -> (Locale, String) {
        (self.locale, self.text)
    }
}

impl fmt::Display for LocalizedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.locale.is_root() {
            write!(f, "{:?}", self.text)
        } else {
            write!(f, "{:?}@{}", self.text, self.locale)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_root_and_empty() {
        let empty = LocalizedString::default();
        assert_eq!(empty.locale(), &Locale::ROOT);
        assert_eq!(empty.text(), "");
        assert_eq!(LocalizedString::of(""), empty);
    }

    #[test]
    fn test_try_of_optional_rejects_missing_parts() {
        assert!(matches!(
            LocalizedString::try_of_optional(Some(Locale::ENGLISH), None),
            Err(CommonsError::NullArgument(_))
        ));
        assert!(matches!(
            LocalizedString::try_of_optional(None, Some("hi")),
            Err(CommonsError::NullArgument(_))
        ));
        assert_eq!(
            LocalizedString::try_of_optional(Some(Locale::ENGLISH), Some("hi")).unwrap(),
            LocalizedString::new(Locale::ENGLISH, "hi")
        );
    }

    #[test]
    fn test_serde_rejects_null_parts() {
        let err = serde_json::from_str::<LocalizedString>(r#"{"locale":"it","text":null}"#)
            .unwrap_err();
        assert!(err.to_string().contains("null argument"), "{err}");
        let err = serde_json::from_str::<LocalizedString>(r#"{"locale":null,"text":"a"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("null argument"), "{err}");
    }

    #[test]
    fn test_serde_missing_parts_default() {
        let only_text: LocalizedString = serde_json::from_str(r#"{"text":"a"}"#).unwrap();
        assert_eq!(only_text, LocalizedString::of("a"));
        let empty: LocalizedString = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, LocalizedString::default());

        let ciao = LocalizedString::new(Locale::ITALIAN, "ciao");
        let json = serde_json::to_string(&ciao).unwrap();
        assert_eq!(json, r#"{"locale":"it","text":"ciao"}"#);
        assert_eq!(serde_json::from_str::<LocalizedString>(&json).unwrap(), ciao);
    }

    #[test]
    fn test_display_marks_locale() {
        assert_eq!(LocalizedString::of("a").to_string(), "\"a\"");
        assert_eq!(
            LocalizedString::new(Locale::ITALIAN, "a").to_string(),
            "\"a\"@it"
        );
    }
}
