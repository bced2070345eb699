//! URL, identifier and language tag helpers.

use tracing::warn;
use url::Url;

use crate::error::{CommonsError, Result};
use crate::locale::Locale;

/// Tolerance used when validating probabilities and scores.
pub const TOLERANCE: f64 = 0.001;

/// Converts an optional language tag to a [`Locale`], falling back to the
/// root locale when the tag is missing or malformed.
pub fn language_tag_to_locale(tag: Option<&str>) -> Locale {
    let Some(tag) = tag else {
        warn!("found missing language tag, using root locale");
        return Locale::ROOT;
    };
    Locale::parse(tag).unwrap_or_else(|e| {
        warn!(tag, error = %e, "found malformed language tag, using root locale");
        Locale::ROOT
    })
}

/// Returns the primary language of an optional locale, `""` when missing.
pub fn locale_to_language_tag(locale: Option<&Locale>) -> String {
    match locale {
        Some(locale) => locale.language().to_string(),
        None => {
            warn!("found missing locale, returning root language tag");
            String::new()
        }
    }
}

/// Trims `url` and appends `/` unless it already ends with one.
///
/// ```
/// use odt_commons_core::add_slash;
///
/// assert_eq!(add_slash("a"), "a/");
/// assert_eq!(add_slash(" a/ "), "a/");
/// ```
pub fn add_slash(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

/// Trims `url` and strips every trailing `/`.
pub fn remove_trailing_slash(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// `true` if the string is present and non-empty.
pub fn is_not_empty(s: Option<&str>) -> bool {
    s.is_some_and(|s| !s.is_empty())
}

/// Parses the numeric id following `prefix` in `url`, e.g. `14324` from
/// `http://entitypedia.org/concepts/14324` with prefix
/// `http://entitypedia.org/concepts/`.
///
/// # Errors
///
/// Returns [`CommonsError::InvalidArgument`] if `url` is empty, does not
/// start with `prefix`, or the remainder is not an integer.
pub fn parse_numerical_id(prefix: &str, url: &str) -> Result<i64> {
    if url.is_empty() {
        return Err(CommonsError::InvalidArgument(
            "invalid url: found empty string".into(),
        ));
    }
    let id = url.strip_prefix(prefix).ok_or_else(|| {
        CommonsError::InvalidArgument(format!("invalid url for prefix {prefix:?}: {url:?}"))
    })?;
    id.parse().map_err(|_| {
        CommonsError::InvalidArgument(format!("invalid url for prefix {prefix:?}: {url:?}"))
    })
}

/// Extracts query parameters from `url`, grouping repeated names.
///
/// Names keep the order of their first appearance, values the order they
/// appear in. Parameters without a value map to `""`.
///
/// # Errors
///
/// Returns [`CommonsError::InvalidArgument`] if `url` is not an absolute URL.
///
/// # Examples
///
/// ```
/// use odt_commons_core::parse_url_params;
///
/// let params = parse_url_params("http://blabla.com/?a=1&b=2&b=3").unwrap();
/// assert_eq!(params[1], ("b".to_string(), vec!["2".to_string(), "3".to_string()]));
/// ```
pub fn parse_url_params(url: &str) -> Result<Vec<(String, Vec<String>)>> {
    let parsed = Url::parse(url)
        .map_err(|e| CommonsError::InvalidArgument(format!("ill formed url {url:?}: {e}")))?;

    let mut params: Vec<(String, Vec<String>)> = Vec::new();
    for (name, value) in parsed.query_pairs() {
        match params.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value.into_owned()),
            None => params.push((name.into_owned(), vec![value.into_owned()])),
        }
    }
    Ok(params)
}

/// Returns a copy of `entries` with `key` bound to `value`. An existing
/// binding is removed and the new one goes last.
pub fn put_key<K, V>(entries: &[(K, V)], key: K, value: V) -> Vec<(K, V)>
where
    K: PartialEq + Clone,
    V: Clone,
{
    let mut out: Vec<(K, V)> = entries
        .iter()
        .filter(|(k, _)| *k != key)
        .cloned()
        .collect();
    out.push((key, value));
    out
}
