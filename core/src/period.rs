//! Time intervals that may be bounded, unbounded, or partially unknown.
//!
//! Each side of an interval is a string in one of three states:
//!
//! | Field value      | Meaning                                   |
//! |------------------|-------------------------------------------|
//! | `"?"`            | unknown whether a bound exists            |
//! | `""`             | known to be unbounded on that side        |
//! | ISO 8601 date    | a known bound, at the precision given     |
//!
//! Known dates are parsed at construction and the interval is rejected
//! when its end precedes its start. [`PeriodOfTime`] additionally keeps
//! the original text it came from, so unparseable source data is never
//! lost; [`PrecisePeriodOfTime`] holds only the two dates.
//!
//! # Examples
//!
//! ```
//! use odt_commons_core::{PeriodOfTime, PrecisePeriodOfTime};
//!
//! let period = PeriodOfTime::of("2007-03-01T13:00:00Z", "2008-05-11").unwrap();
//! assert_eq!(period.to_formatted_string(), "2007-03-01T13:00:00Z/2008-05-11");
//!
//! assert!(PrecisePeriodOfTime::of("2015", "2010").is_err());
//! assert_eq!(PrecisePeriodOfTime::of("", "2010").unwrap().to_string(), "/2010");
//! ```

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CommonsError, Result};

/// Marks a date whose existence is unknown.
pub const UNKNOWN_DATE: &str = "?";

/// Marks a side known to be unbounded.
pub const UNBOUNDED_DATE: &str = "";

/// Joins the two dates in a raw string built by [`PeriodOfTime::of`].
const SEP: &str = "@joined@";

static YEAR_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("year-month pattern is valid"));
static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("year pattern is valid"));

/// Granularity of a parsed date, taken from the format that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePrecision {
    Year,
    Month,
    Day,
    Minute,
    Second,
}

/// A successfully parsed ISO 8601 date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedDate {
    /// The start of the denoted period, in UTC. Zone-less dates are read as UTC.
    pub instant: DateTime<Utc>,
    /// The precision of the source string.
    pub precision: DatePrecision,
}

/// Parses a date in the ISO 8601 family.
///
/// Formats are tried in this order, the first match wins:
/// datetime with zone (RFC 3339), `YYYY-MM-DDTHH:MM:SS`,
/// `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD`, `YYYY-MM`, `YYYY`.
///
/// # Errors
///
/// Returns [`CommonsError::Parse`] if no format matches.
///
/// # Examples
///
/// ```
/// use odt_commons_core::{parse_iso8601, DatePrecision};
///
/// assert_eq!(parse_iso8601("2014-07").unwrap().precision, DatePrecision::Month);
/// assert!(parse_iso8601("yesterday").is_err());
/// ```
pub fn parse_iso8601(s: &str) -> Result<ParsedDate> {
    let parsed = |instant, precision| ParsedDate { instant, precision };

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(parsed(dt.with_timezone(&Utc), DatePrecision::Second));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(parsed(dt.and_utc(), DatePrecision::Second));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(parsed(dt.and_utc(), DatePrecision::Minute));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(parsed(start_of_day(date), DatePrecision::Day));
    }
    if YEAR_MONTH.is_match(s) {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
            return Ok(parsed(start_of_day(date), DatePrecision::Month));
        }
    }
    if YEAR.is_match(s) {
        if let Some(date) = s
            .parse()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        {
            return Ok(parsed(start_of_day(date), DatePrecision::Year));
        }
    }

    Err(CommonsError::Parse(format!(
        "couldn't parse date as ISO 8601: {s:?}"
    )))
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// The parsed state of one side of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateBound {
    /// `"?"`: it is not known whether the bound exists.
    Unknown,
    /// `""`: the interval is open on this side.
    Unbounded,
    /// A real date.
    Known(ParsedDate),
}

impl DateBound {
    /// Parses a date field. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CommonsError::Parse`] for a non-sentinel string that is
    /// not an ISO 8601 date.
    pub fn parse(field: &str) -> Result<Self> {
        match field.trim() {
            UNKNOWN_DATE => Ok(Self::Unknown),
            UNBOUNDED_DATE => Ok(Self::Unbounded),
            date => parse_iso8601(date).map(Self::Known),
        }
    }

    /// Returns `true` for a known date.
    pub fn is_real(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// The parsed date, if known.
    pub fn date(&self) -> Option<&ParsedDate> {
        match self {
            Self::Known(date) => Some(date),
            Self::Unknown | Self::Unbounded => None,
        }
    }
}

fn check_bounds(start_date: &str, end_date: &str) -> Result<(DateBound, DateBound)> {
    let start = DateBound::parse(start_date)?;
    let end = DateBound::parse(end_date)?;
    if let (DateBound::Known(s), DateBound::Known(e)) = (&start, &end) {
        if e.instant < s.instant {
            debug!(start_date, end_date, "rejecting period ending before it starts");
            return Err(CommonsError::InvalidState(format!(
                "start date {start_date} is greater than end date {end_date}"
            )));
        }
    }
    Ok((start, end))
}

/// A time interval built from possibly dirty data.
///
/// Dates are stored as given, with their original precision; the
/// original text of the interval is kept in [`raw_string`](Self::raw_string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodFields", into = "PeriodFields")]
pub struct PeriodOfTime {
    start_date: String,
    end_date: String,
    raw_string: String,
    start: DateBound,
    end: DateBound,
}

impl PeriodOfTime {
    /// Builds a period setting all fields.
    ///
    /// # Errors
    ///
    /// Returns [`CommonsError::Parse`] if a date is not a sentinel nor an
    /// ISO 8601 date, or [`CommonsError::InvalidState`] if both dates are
    /// known and the end precedes the start.
    pub fn new(
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        raw_string: impl Into<String>,
    ) -> Result<Self> {
        let start_date = start_date.into();
        let end_date = end_date.into();
        let (start, end) = check_bounds(&start_date, &end_date)?;
        Ok(Self {
            start_date,
            end_date,
            raw_string: raw_string.into(),
            start,
            end,
        })
    }

    /// Builds a period from two dates; the raw string joins them with a
    /// private separator.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn of(start_date: impl Into<String>, end_date: impl Into<String>) -> Result<Self> {
        let start_date = start_date.into();
        let end_date = end_date.into();
        let raw = join_raw_dates(&start_date, &end_date);
        Self::new(start_date, end_date, raw)
    }

    /// Builds a completely unknown period remembering only its original text.
    pub fn of_raw(raw_string: impl Into<String>) -> Self {
        Self {
            raw_string: raw_string.into(),
            ..Self::default()
        }
    }

    /// Returns a builder starting from the default `"?"`/`"?"` period.
    pub fn builder() -> PeriodOfTimeBuilder {
        PeriodOfTimeBuilder::default()
    }

    /// The start field: a date, `""` or `"?"`.
    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    /// The end field: a date, `""` or `"?"`.
    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    /// The original interval text.
    pub fn raw_string(&self) -> &str {
        &self.raw_string
    }

    pub fn start_bound(&self) -> &DateBound {
        &self.start
    }

    pub fn end_bound(&self) -> &DateBound {
        &self.end
    }

    /// `"{start}/{end}"` from the stored date strings.
    pub fn to_formatted_string(&self) -> String {
        format!("{}/{}", self.start_date, self.end_date)
    }
}

/// Joins two raw dates the way [`PeriodOfTime::of`] does.
pub fn join_raw_dates(start_date: &str, end_date: &str) -> String {
    format!("{start_date}{SEP}{end_date}")
}

impl Default for PeriodOfTime {
    fn default() -> Self {
        Self {
            start_date: UNKNOWN_DATE.to_string(),
            end_date: UNKNOWN_DATE.to_string(),
            raw_string: String::new(),
            start: DateBound::Unknown,
            end: DateBound::Unknown,
        }
    }
}

impl fmt::Display for PeriodOfTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start_date, self.end_date)
    }
}

/// Serialized shape of [`PeriodOfTime`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PeriodFields {
    #[serde(default = "unknown_date")]
    start_date: String,
    #[serde(default = "unknown_date")]
    end_date: String,
    #[serde(default)]
    raw_string: String,
}

fn unknown_date() -> String {
    UNKNOWN_DATE.to_string()
}

impl TryFrom<PeriodFields> for PeriodOfTime {
    type Error = CommonsError;

    fn try_from(fields: PeriodFields) -> Result<Self> {
        Self::new(fields.start_date, fields.end_date, fields.raw_string)
    }
}

impl From<PeriodOfTime> for PeriodFields {
    fn from(period: PeriodOfTime) -> Self {
        Self {
            start_date: period.start_date,
            end_date: period.end_date,
            raw_string: period.raw_string,
        }
    }
}

/// Builder for [`PeriodOfTime`]; unset fields keep their defaults.
#[derive(Debug, Clone)]
pub struct PeriodOfTimeBuilder {
    start_date: String,
    end_date: String,
    raw_string: String,
}

impl Default for PeriodOfTimeBuilder {
    fn default() -> Self {
        Self {
            start_date: unknown_date(),
            end_date: unknown_date(),
            raw_string: String::new(),
        }
    }
}

impl PeriodOfTimeBuilder {
    pub fn start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = start_date.into();
        self
    }

    pub fn end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = end_date.into();
        self
    }

    pub fn raw_string(mut self, raw_string: impl Into<String>) -> Self {
        self.raw_string = raw_string.into();
        self
    }

    /// Validates and builds the period.
    ///
    /// # Errors
    ///
    /// Same as [`PeriodOfTime::new`].
    pub fn build(self) -> Result<PeriodOfTime> {
        PeriodOfTime::new(self.start_date, self.end_date, self.raw_string)
    }
}

/// A time interval whose dates are known to be clean.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PreciseFields", into = "PreciseFields")]
pub struct PrecisePeriodOfTime {
    start_date: String,
    end_date: String,
    start: DateBound,
    end: DateBound,
}

impl PrecisePeriodOfTime {
    /// Builds a period from two date fields.
    ///
    /// # Errors
    ///
    /// Same as [`PeriodOfTime::new`].
    pub fn of(start_date: impl Into<String>, end_date: impl Into<String>) -> Result<Self> {
        let start_date = start_date.into();
        let end_date = end_date.into();
        let (start, end) = check_bounds(&start_date, &end_date)?;
        Ok(Self {
            start_date,
            end_date,
            start,
            end,
        })
    }

    /// Projects a [`PeriodOfTime`], dropping its raw string.
    ///
    /// # Errors
    ///
    /// Same as [`PeriodOfTime::new`].
    pub fn from_period(period: &PeriodOfTime) -> Result<Self> {
        Self::of(period.start_date(), period.end_date())
    }

    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    pub fn start_bound(&self) -> &DateBound {
        &self.start
    }

    pub fn end_bound(&self) -> &DateBound {
        &self.end
    }

    /// `"{start}/{end}"`, e.g. `"2007-03-01T13:00:00Z/2008-05-11T15:30:00Z"`,
    /// `"/2010"` or `"?/?"`.
    pub fn to_formatted_string(&self) -> String {
        self.to_string()
    }
}

impl Default for PrecisePeriodOfTime {
    fn default() -> Self {
        Self {
            start_date: unknown_date(),
            end_date: unknown_date(),
            start: DateBound::Unknown,
            end: DateBound::Unknown,
        }
    }
}

impl fmt::Display for PrecisePeriodOfTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start_date, self.end_date)
    }
}

impl TryFrom<&PeriodOfTime> for PrecisePeriodOfTime {
    type Error = CommonsError;

    fn try_from(period: &PeriodOfTime) -> Result<Self> {
        Self::from_period(period)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreciseFields {
    #[serde(default = "unknown_date")]
    start_date: String,
    #[serde(default = "unknown_date")]
    end_date: String,
}

impl TryFrom<PreciseFields> for PrecisePeriodOfTime {
    type Error = CommonsError;

    fn try_from(fields: PreciseFields) -> Result<Self> {
        Self::of(fields.start_date, fields.end_date)
    }
}

impl From<PrecisePeriodOfTime> for PreciseFields {
    fn from(period: PrecisePeriodOfTime) -> Self {
        Self {
            start_date: period.start_date,
            end_date: period.end_date,
        }
    }
}
