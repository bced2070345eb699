//! Common value types for open data tooling.
//!
//! This crate defines small, immutable building blocks shared by catalog
//! harvesters and validators:
//!
//! - [`Dict`]: a multilingual dictionary mapping each [`Locale`] to an
//!   ordered list of strings, with [`LocalizedString`] as its single-entry
//!   counterpart.
//! - [`SemVersion`]: a `MAJOR.MINOR.PATCH[-prerelease]` version ordered by
//!   semver precedence.
//! - [`PeriodOfTime`] and [`PrecisePeriodOfTime`]: a time interval with
//!   sentinel bounds for unknown ([`UNKNOWN_DATE`]) and unbounded
//!   ([`UNBOUNDED_DATE`]) dates.
//! - [`Ref`] and [`ValidationError`]: a location inside a document and a
//!   problem found there.
//!
//! Argument checks ([`check_not_empty`], [`check_score`], ...) and URL
//! helpers ([`add_slash`], [`parse_url_params`], ...) round things out.
//!
//! # Example
//!
//! ```
//! use odt_commons_core::*;
//!
//! let title = Dict::builder()
//!     .put(Locale::ITALIAN, "Strade")
//!     .put(Locale::ENGLISH, "Roads")
//!     .build();
//! assert_eq!(title.any_string(&Locale::FRENCH).text(), "Strade");
//!
//! let v = SemVersion::parse("1.2.3-beta").unwrap();
//! assert!(v < SemVersion::release(1, 2, 3));
//!
//! let period = PeriodOfTime::of("2014-01-01", UNKNOWN_DATE).unwrap();
//! assert!(!period.end_bound().is_real());
//!
//! let location = Ref::builder()
//!     .document_id("data.csv")
//!     .physical_row(4)
//!     .build()
//!     .unwrap();
//! let error = ValidationError::builder(location)
//!     .reason("empty cell in column {col}")
//!     .arg("col", "name")
//!     .build();
//! assert_eq!(error.message(), "empty cell in column name");
//! ```

mod dict;
mod error;
mod format;
mod locale;
mod localized;
mod period;
mod preconditions;
mod util;
mod validation;
mod version;

pub use dict::{Dict, DictBuilder};
pub use error::{CommonsError, Result};
pub use format::format_template;
pub use locale::Locale;
pub use localized::LocalizedString;
pub use period::{
    DateBound, DatePrecision, ParsedDate, PeriodOfTime, PeriodOfTimeBuilder, PrecisePeriodOfTime,
    UNBOUNDED_DATE, UNKNOWN_DATE, join_raw_dates, parse_iso8601,
};
pub use preconditions::{
    check_not_dirty_url, check_not_empty, check_not_empty_slice, check_not_empty_with,
    check_present, check_score,
};
pub use util::{
    TOLERANCE, add_slash, is_not_empty, language_tag_to_locale, locale_to_language_tag,
    parse_numerical_id, parse_url_params, put_key, remove_trailing_slash,
};
pub use validation::{
    EVERYTHING, ErrorLevel, Ref, RefBuilder, UNSET_POSITION, ValidationError,
    ValidationErrorBuilder,
};
pub use version::SemVersion;
