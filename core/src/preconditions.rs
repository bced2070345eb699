//! Argument checks that return the validated value, so they can be used
//! inline:
//!
//! ```
//! use odt_commons_core::check_not_empty;
//!
//! let name = check_not_empty("dataset", "dataset name").unwrap();
//! assert_eq!(name, "dataset");
//! ```
//!
//! Failure messages read `"{prepended message} -- Reason: {detail}"`.

use std::fmt::Display;

use crate::error::{CommonsError, Result};
use crate::format::format_template;
use crate::util::TOLERANCE;

fn reject(message: impl Display, detail: impl Display) -> CommonsError {
    CommonsError::InvalidArgument(format!("{message} -- Reason: {detail}"))
}

/// Checks that `s` is non-empty.
///
/// # Errors
///
/// Returns [`CommonsError::InvalidArgument`] for an empty string.
pub fn check_not_empty<'a>(s: &'a str, message: impl Display) -> Result<&'a str> {
    if s.is_empty() {
        return Err(reject(message, "Found empty string."));
    }
    Ok(s)
}

/// Like [`check_not_empty`], with a `%s` message template.
///
/// # Errors
///
/// Returns [`CommonsError::InvalidArgument`] for an empty string.
pub fn check_not_empty_with<'a, T: Display>(
    s: &'a str,
    template: &str,
    args: &[T],
) -> Result<&'a str> {
    if s.is_empty() {
        return Err(reject(format_template(template, args), "Found empty string."));
    }
    Ok(s)
}

/// Checks that `items` has at least one element.
///
/// # Errors
///
/// Returns [`CommonsError::InvalidArgument`] for an empty slice.
pub fn check_not_empty_slice<'a, T>(items: &'a [T], message: impl Display) -> Result<&'a [T]> {
    if items.is_empty() {
        return Err(reject(message, "Found empty collection."));
    }
    Ok(items)
}

/// Checks that a present string is non-empty, rejecting `None` too.
///
/// # Errors
///
/// Returns [`CommonsError::NullArgument`] for `None` and
/// [`CommonsError::InvalidArgument`] for an empty string.
pub fn check_present<'a>(s: Option<&'a str>, message: impl Display) -> Result<&'a str> {
    match s {
        Some(s) => check_not_empty(s, message),
        None => Err(CommonsError::NullArgument(format!(
            "{message} -- Reason: Found null string."
        ))),
    }
}

/// Rejects URLs that are obviously dirty: empty, the literal `"null"`, or
/// ending with `/null`, ignoring case.
///
/// # Errors
///
/// Returns [`CommonsError::InvalidArgument`] if the URL fails any check.
///
/// # Examples
///
/// ```
/// use odt_commons_core::check_not_dirty_url;
///
/// assert!(check_not_dirty_url("http://example.org/NULL", "dataset url").is_err());
/// assert_eq!(check_not_dirty_url("a", "msg").unwrap(), "a");
/// ```
pub fn check_not_dirty_url<'a>(url: &'a str, message: impl Display) -> Result<&'a str> {
    let url = check_not_empty(url, &message)?;
    let lower = url.to_lowercase();
    if lower == "null" {
        return Err(reject(
            message,
            format!("Found URL with string {url:?} as content!"),
        ));
    }
    if lower.ends_with("/null") {
        return Err(reject(
            message,
            format!("Found URL ending with /\"null\": {url}"),
        ));
    }
    Ok(url)
}

/// Checks a score lies in `[0, 1]`; values within [`TOLERANCE`] of a
/// bound are clamped to it.
///
/// # Errors
///
/// Returns [`CommonsError::InvalidArgument`] for scores further out.
pub fn check_score(score: f64, message: impl Display) -> Result<f64> {
    if score.is_nan() {
        return Err(reject(message, "Score is not a number."));
    }
    if score < 0.0 {
        if score > -TOLERANCE {
            return Ok(0.0);
        }
        return Err(reject(
            message,
            format!("Score must be greater or equal than zero, found instead: {score}"),
        ));
    }
    if score > 1.0 {
        if score < 1.0 + TOLERANCE {
            return Ok(1.0);
        }
        return Err(reject(
            message,
            format!("Score must be less than or equal than 1.0, found instead: {score}"),
        ));
    }
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_not_empty() {
        assert!(check_not_empty("", "my string").is_err());
        assert_eq!(check_not_empty("a", "my string").unwrap(), "a");
        assert!(matches!(
            check_present(None, "my string"),
            Err(CommonsError::NullArgument(_))
        ));
    }

    #[test]
    fn test_check_not_empty_with_template() {
        let err = check_not_empty_with("", "a%s", &["bc"]).unwrap_err();
        assert!(err.to_string().contains("abc"));
        assert_eq!(check_not_empty_with("a", "a%s", &["bc"]).unwrap(), "a");
    }

    #[test]
    fn test_check_not_empty_slice() {
        assert!(check_not_empty_slice::<i32>(&[], "my list").is_err());
        assert_eq!(check_not_empty_slice(&[1], "my list").unwrap(), &[1]);
    }

    #[test]
    fn test_check_not_dirty_url() {
        for bad in ["", "null", "NULL", "adfasdf/null"] {
            assert!(check_not_dirty_url(bad, "").is_err(), "{bad:?}");
        }
        let err = check_not_dirty_url("null", "dataset url").unwrap_err();
        assert!(err.to_string().contains("dataset url -- Reason:"));
    }

    #[test]
    fn test_check_score() {
        assert_eq!(check_score(0.5, "").unwrap(), 0.5);
        assert_eq!(check_score(-0.0005, "").unwrap(), 0.0);
        assert_eq!(check_score(1.0005, "").unwrap(), 1.0);
        assert_eq!(check_score(1.0, "").unwrap(), 1.0);
        assert!(check_score(-0.1, "").is_err());
        assert!(check_score(1.1, "").is_err());
        assert!(check_score(f64::NAN, "").is_err());
    }
}
