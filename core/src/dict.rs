//! Multilingual string dictionary.
//!
//! A [`Dict`] maps each [`Locale`] to an ordered list of strings. Lists
//! keep insertion order and duplicates; merging two dictionaries
//! concatenates the lists of shared locales. The order in which locales
//! were first added is remembered and drives fallback lookups, but two
//! dictionaries holding the same per-locale lists are equal regardless
//! of locale order.
//!
//! # Examples
//!
//! ```
//! use odt_commons_core::{Dict, Locale};
//!
//! let dict = Dict::builder()
//!     .put(Locale::ENGLISH, "hello")
//!     .put(Locale::ENGLISH, "hello again")
//!     .put(Locale::ITALIAN, "ciao")
//!     .build();
//!
//! assert_eq!(dict.string(&Locale::ENGLISH), "hello");
//! assert_eq!(dict.get(&Locale::ENGLISH)[1], "hello again");
//! assert_eq!(dict.any_string(&Locale::GERMAN).text(), "hello");
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CommonsError, Result};
use crate::locale::Locale;
use crate::localized::LocalizedString;

/// Immutable multi-valued mapping from locale to localized strings.
#[derive(Debug, Clone, Default)]
pub struct Dict {
    entries: Vec<(Locale, Vec<String>)>,
}

impl Dict {
    /// Returns a dictionary with no locales.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a builder accumulating `(locale, string)` pairs.
    pub fn builder() -> DictBuilder {
        DictBuilder::default()
    }

    /// A single string under the root locale.
    pub fn of(text: impl Into<String>) -> Self {
        Self::builder().put(Locale::ROOT, text).build()
    }

    /// One or more strings under the given locale.
    pub fn of_locale<I, S>(locale: Locale, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder().put_all(locale, texts).build()
    }

    /// Several strings under the root locale.
    pub fn of_strings<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::of_locale(Locale::ROOT, texts)
    }

    /// A dictionary holding exactly one localized string.
    pub fn from_localized(string: LocalizedString) -> Self {
        Self::builder().put_localized(string).build()
    }

    /// Merges dictionaries in the given order.
    pub fn of_dicts<'a, I>(dicts: I) -> Self
    where
        I: IntoIterator<Item = &'a Dict>,
    {
        dicts
            .into_iter()
            .fold(Self::builder(), |builder, dict| builder.put_dict(dict))
            .build()
    }

    /// Builds a dictionary from possibly-missing inputs.
    ///
    /// # Errors
    ///
    /// Returns [`CommonsError::NullArgument`] if the locale or any of the
    /// strings is `None`.
    pub fn try_of_optional<I, S>(locale: Option<Locale>, texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Ok(Self::builder().try_put_all(locale, texts)?.build())
    }

    /// Returns a new dictionary with `text` appended under the root locale.
    pub fn with(&self, text: impl Into<String>) -> Self {
        self.with_locale(Locale::ROOT, text)
    }

    /// Returns a new dictionary with `text` appended under `locale`.
    pub fn with_locale(&self, locale: Locale, text: impl Into<String>) -> Self {
        self.to_builder().put(locale, text).build()
    }

    /// Returns a new dictionary with `texts` appended under `locale`.
    pub fn with_locale_strings<I, S>(&self, locale: Locale, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to_builder().put_all(locale, texts).build()
    }

    /// Returns a new dictionary with `string` appended.
    pub fn with_localized(&self, string: LocalizedString) -> Self {
        self.to_builder().put_localized(string).build()
    }

    /// Returns the merge of `self` followed by `other`.
    pub fn with_dict(&self, other: &Dict) -> Self {
        self.to_builder().put_dict(other).build()
    }

    /// The strings stored under `locale`, empty if the locale is absent.
    pub fn get(&self, locale: &Locale) -> &[String] {
        self.entries
            .iter()
            .find(|(l, _)| l == locale)
            .map(|(_, strings)| strings.as_slice())
            .unwrap_or(&[])
    }

    /// The first string under `locale`, or `""`.
    pub fn string(&self, locale: &Locale) -> &str {
        self.get(locale).first().map(String::as_str).unwrap_or("")
    }

    /// The first non-empty string under `locale`, or `""`.
    ///
    /// # Examples
    ///
    /// ```
    /// use odt_commons_core::{Dict, Locale};
    ///
    /// let dict = Dict::of_locale(Locale::FRENCH, ["", "a"]);
    /// assert_eq!(dict.non_empty_string(&Locale::FRENCH), "a");
    /// assert_eq!(dict.non_empty_string(&Locale::ITALIAN), "");
    /// ```
    pub fn non_empty_string(&self, locale: &Locale) -> &str {
        self.get(locale)
            .iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Returns a string, preferring `preferred`.
    ///
    /// Falls back to the first string of the earliest-added locale that has
    /// any. An empty dictionary yields [`LocalizedString::default`].
    pub fn any_string(&self, preferred: &Locale) -> LocalizedString {
        if let Some(first) = self.get(preferred).first() {
            return LocalizedString::new(preferred.clone(), first.clone());
        }
        self.entries
            .iter()
            .find_map(|(locale, strings)| {
                strings
                    .first()
                    .map(|s| LocalizedString::new(locale.clone(), s.clone()))
            })
            .unwrap_or_default()
    }

    /// Alias of [`any_string`](Self::any_string).
    pub fn some(&self, preferred: &Locale) -> LocalizedString {
        self.any_string(preferred)
    }

    /// Case-insensitive substring search over every string.
    pub fn contains(&self, text: &str) -> bool {
        let needle = text.to_lowercase();
        self.entries
            .iter()
            .flat_map(|(_, strings)| strings)
            .any(|s| s.to_lowercase().contains(&needle))
    }

    /// `true` if no locale holds a non-empty string.
    pub fn is_empty(&self) -> bool {
        self.entries
            .iter()
            .all(|(_, strings)| strings.iter().all(String::is_empty))
    }

    /// Locales in the order they were first added.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.entries.iter().map(|(locale, _)| locale)
    }

    /// Iterates over `(locale, strings)` pairs in locale insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Locale, &[String])> {
        self.entries
            .iter()
            .map(|(locale, strings)| (locale, strings.as_slice()))
    }

    /// Flattens into localized strings, locale by locale.
    pub fn as_localized_strings(&self) -> Vec<LocalizedString> {
        self.entries
            .iter()
            .flat_map(|(locale, strings)| {
                strings
                    .iter()
                    .map(move |s| LocalizedString::new(locale.clone(), s.clone()))
            })
            .collect()
    }

    fn to_builder(&self) -> DictBuilder {
        DictBuilder {
            entries: self.entries.clone(),
        }
    }

    fn sorted_entries(&self) -> Vec<&(Locale, Vec<String>)> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        sorted
    }
}

impl PartialEq for Dict {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(locale, strings)| other.get(locale) == strings.as_slice())
    }
}

impl Eq for Dict {}

impl Hash for Dict {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted_entries().hash(state);
    }
}

impl From<LocalizedString> for Dict {
    fn from(string: LocalizedString) -> Self {
        Self::from_localized(string)
    }
}

impl FromIterator<LocalizedString> for Dict {
    fn from_iter<I: IntoIterator<Item = LocalizedString>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::builder(), DictBuilder::put_localized)
            .build()
    }
}

impl fmt::Display for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Dict{")?;
        for (i, (locale, strings)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{locale}={strings:?}")?;
        }
        f.write_str("}")
    }
}

impl Serialize for Dict {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (locale, strings) in &self.entries {
            map.serialize_entry(locale.as_str(), strings)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Dict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(DictVisitor)
    }
}

struct DictVisitor;

impl<'de> Visitor<'de> for DictVisitor {
    type Value = Dict;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from language tag to a list of strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Dict, A::Error> {
        let mut builder = Dict::builder();
        while let Some((tag, strings)) =
            map.next_entry::<String, Option<Vec<Option<String>>>>()?
        {
            let locale = Locale::parse(&tag).map_err(de::Error::custom)?;
            let strings = strings.ok_or_else(|| {
                de::Error::custom(CommonsError::NullArgument(format!(
                    "string list for locale {tag:?}"
                )))
            })?;
            builder = builder
                .try_put_all(Some(locale), strings)
                .map_err(de::Error::custom)?;
        }
        Ok(builder.build())
    }
}

/// Accumulates strings and dictionaries into a [`Dict`].
#[derive(Debug, Clone, Default)]
pub struct DictBuilder {
    entries: Vec<(Locale, Vec<String>)>,
}

impl DictBuilder {
    /// Appends `text` under the root locale.
    pub fn put_str(self, text: impl Into<String>) -> Self {
        self.put(Locale::ROOT, text)
    }

    /// Appends `text` under `locale`.
    pub fn put(mut self, locale: Locale, text: impl Into<String>) -> Self {
        self.slot(locale).push(text.into());
        self
    }

    /// Appends every string of `texts` under `locale`.
    pub fn put_all<I, S>(mut self, locale: Locale, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texts: Vec<String> = texts.into_iter().map(Into::into).collect();
        if !texts.is_empty() {
            self.slot(locale).extend(texts);
        }
        self
    }

    /// Appends a localized string.
    pub fn put_localized(self, string: LocalizedString) -> Self {
        let (locale, text) = string.into_parts();
        self.put(locale, text)
    }

    /// Appends every list of `dict`, locale by locale.
    pub fn put_dict(self, dict: &Dict) -> Self {
        dict.entries
            .iter()
            .fold(self, |builder, (locale, strings)| {
                builder.put_all(locale.clone(), strings.iter().cloned())
            })
    }

    /// Appends `text` under `locale`, rejecting missing inputs.
    ///
    /// # Errors
    ///
    /// Returns [`CommonsError::NullArgument`] if either input is `None`.
    pub fn try_put(self, locale: Option<Locale>, text: Option<&str>) -> Result<Self> {
        let string = LocalizedString::try_of_optional(locale, text)?;
        Ok(self.put_localized(string))
    }

    /// Appends `texts` under `locale`, rejecting missing inputs.
    ///
    /// Nothing is appended when any element is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CommonsError::NullArgument`] if the locale or any element
    /// is `None`.
    pub fn try_put_all<I, S>(self, locale: Option<Locale>, texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let locale = locale.ok_or_else(|| CommonsError::NullArgument("dict locale".into()))?;
        let texts = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                text.map(Into::into).ok_or_else(|| {
                    CommonsError::NullArgument(format!(
                        "string at index {i} for locale {locale:?}"
                    ))
                })
            })
            .collect::<Result<Vec<String>>>()?;
        Ok(self.put_all(locale, texts))
    }

    /// Finalises the immutable dictionary.
    pub fn build(self) -> Dict {
        Dict {
            entries: self.entries,
        }
    }

    fn slot(&mut self, locale: Locale) -> &mut Vec<String> {
        let index = match self.entries.iter().position(|(l, _)| *l == locale) {
            Some(index) => index,
            None => {
                self.entries.push((locale, Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }
}
