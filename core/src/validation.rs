//! Validation error reporting.
//!
//! A [`ValidationError`] explains what is wrong with some input and
//! points at where, through a [`Ref`]: a logical location (document id
//! plus trace path) and, for textual files, a physical row and column.
//!
//! # Examples
//!
//! ```
//! use odt_commons_core::{ErrorLevel, Ref, ValidationError};
//!
//! let location = Ref::builder()
//!     .document_id("http://example.org/data.csv")
//!     .trace_path("rows[3].name")
//!     .physical_row(3)
//!     .build()
//!     .unwrap();
//! assert_eq!(location.uri().unwrap(), "http://example.org/data.csv#rows[3].name");
//!
//! let error = ValidationError::builder(location)
//!     .error_level(ErrorLevel::Warning)
//!     .reason("name {name} is too long")
//!     .arg("name", "Trentino-Alto Adige")
//!     .build();
//! assert_eq!(error.message(), "name Trentino-Alto Adige is too long");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CommonsError, Result};
use crate::format::interpolate_named;

/// Trace path selecting a whole document.
pub const EVERYTHING: &str = "*";

/// Row or column value meaning "not set".
pub const UNSET_POSITION: i64 = -1;

/// A logical and physical pointer into a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RefFields", into = "RefFields")]
pub struct Ref {
    document_id: String,
    trace_path: String,
    physical_row: i64,
    physical_column: i64,
}

impl Ref {
    /// A reference to everything in an unknown document.
    pub fn of() -> Self {
        Self::default()
    }

    /// A reference to a whole document.
    pub fn of_document_id(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            ..Self::default()
        }
    }

    /// A reference to a path inside an unknown document.
    ///
    /// # Errors
    ///
    /// Returns [`CommonsError::InvalidArgument`] if the path is blank.
    pub fn of_path(trace_path: impl Into<String>) -> Result<Self> {
        Self::builder().trace_path(trace_path).build()
    }

    pub fn builder() -> RefBuilder {
        RefBuilder::default()
    }

    /// Identifier of the document, possibly an IRI. `""` if unknown.
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Path to one or more elements of the document; [`EVERYTHING`] by default.
    pub fn trace_path(&self) -> &str {
        &self.trace_path
    }

    /// Zero-based row in a textual file, [`UNSET_POSITION`] if not set.
    pub fn physical_row(&self) -> i64 {
        self.physical_row
    }

    /// Zero-based column in a textual file, [`UNSET_POSITION`] if not set.
    pub fn physical_column(&self) -> i64 {
        self.physical_column
    }

    /// Builds `documentId#tracePath`, omitting `#` and the missing side
    /// when either one is absent.
    ///
    /// # Errors
    ///
    /// Returns [`CommonsError::InvalidState`] when there is neither a
    /// document id nor a specific path.
    pub fn uri(&self) -> Result<String> {
        let whole_document = self.trace_path == EVERYTHING;
        match (self.document_id.is_empty(), whole_document) {
            (true, true) => Err(CommonsError::InvalidState(
                "can't create an empty uri".into(),
            )),
            (true, false) => Ok(self.trace_path.clone()),
            (false, true) => Ok(self.document_id.clone()),
            (false, false) => Ok(format!("{}#{}", self.document_id, self.trace_path)),
        }
    }
}

impl Default for Ref {
    fn default() -> Self {
        Self {
            document_id: String::new(),
            trace_path: EVERYTHING.to_string(),
            physical_row: UNSET_POSITION,
            physical_column: UNSET_POSITION,
        }
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.uri() {
            Ok(uri) => f.write_str(&uri)?,
            Err(_) => f.write_str(EVERYTHING)?,
        }
        match (self.physical_row, self.physical_column) {
            (UNSET_POSITION, UNSET_POSITION) => Ok(()),
            (row, UNSET_POSITION) => write!(f, " (row {row})"),
            (UNSET_POSITION, col) => write!(f, " (column {col})"),
            (row, col) => write!(f, " (row {row}, column {col})"),
        }
    }
}

/// Builder for [`Ref`].
#[derive(Debug, Clone, Default)]
pub struct RefBuilder {
    inner: Ref,
}

impl RefBuilder {
    pub fn document_id(mut self, document_id: impl Into<String>) -> Self {
        self.inner.document_id = document_id.into();
        self
    }

    pub fn trace_path(mut self, trace_path: impl Into<String>) -> Self {
        self.inner.trace_path = trace_path.into();
        self
    }

    pub fn physical_row(mut self, row: i64) -> Self {
        self.inner.physical_row = row;
        self
    }

    pub fn physical_column(mut self, column: i64) -> Self {
        self.inner.physical_column = column;
        self
    }

    /// Validates and builds the reference.
    ///
    /// # Errors
    ///
    /// Returns [`CommonsError::InvalidArgument`] for a blank trace path and
    /// [`CommonsError::InvalidState`] for a row or column below `-1`.
    pub fn build(self) -> Result<Ref> {
        let r = self.inner;
        if r.trace_path.trim().is_empty() {
            return Err(CommonsError::InvalidArgument(format!(
                "trace path must not be blank, found {:?}",
                r.trace_path
            )));
        }
        if r.physical_row < UNSET_POSITION {
            return Err(CommonsError::InvalidState(format!(
                "physical row should be greater or equal to -1, found instead {}",
                r.physical_row
            )));
        }
        if r.physical_column < UNSET_POSITION {
            return Err(CommonsError::InvalidState(format!(
                "physical column should be greater or equal to -1, found instead {}",
                r.physical_column
            )));
        }
        Ok(r)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefFields {
    #[serde(default)]
    document_id: String,
    #[serde(default = "everything")]
    trace_path: String,
    #[serde(default = "unset_position")]
    physical_row: i64,
    #[serde(default = "unset_position")]
    physical_column: i64,
}

fn everything() -> String {
    EVERYTHING.to_string()
}

fn unset_position() -> i64 {
    UNSET_POSITION
}

impl TryFrom<RefFields> for Ref {
    type Error = CommonsError;

    fn try_from(fields: RefFields) -> Result<Self> {
        Ref::builder()
            .document_id(fields.document_id)
            .trace_path(fields.trace_path)
            .physical_row(fields.physical_row)
            .physical_column(fields.physical_column)
            .build()
    }
}

impl From<Ref> for RefFields {
    fn from(r: Ref) -> Self {
        Self {
            document_id: r.document_id,
            trace_path: r.trace_path,
            physical_row: r.physical_row,
            physical_column: r.physical_column,
        }
    }
}

/// Severity of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorLevel {
    /// The input can't be used (the default).
    #[default]
    Severe,
    /// The input is usable but suspicious.
    Warning,
    /// Informational remark.
    Info,
}

impl fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Severe => "SEVERE",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        };
        f.write_str(s)
    }
}

/// An immutable report of a problem found in some input.
///
/// The reason is stored as an unsubstituted template; [`message`](Self::message)
/// renders it with the named arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    #[serde(rename = "ref", default)]
    location: Ref,
    #[serde(default)]
    error_level: ErrorLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_code: Option<i32>,
    #[serde(default)]
    reason: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    reason_args: BTreeMap<String, Value>,
}

impl ValidationError {
    /// The "no error" value: default ref, severe level, empty reason.
    pub fn of() -> Self {
        Self::default()
    }

    /// A severe error with a reason and no arguments.
    pub fn new(location: Ref, reason: impl Into<String>) -> Self {
        Self::builder(location).reason(reason).build()
    }

    /// A severe error located by a trace path.
    ///
    /// # Errors
    ///
    /// Returns [`CommonsError::InvalidArgument`] if the path is blank.
    pub fn of_path(trace_path: impl Into<String>, reason: impl Into<String>) -> Result<Self> {
        Ok(Self::new(Ref::of_path(trace_path)?, reason))
    }

    pub fn builder(location: Ref) -> ValidationErrorBuilder {
        ValidationErrorBuilder {
            inner: Self {
                location,
                ..Self::default()
            },
        }
    }

    /// Where the error is.
    pub fn location(&self) -> &Ref {
        &self.location
    }

    pub fn error_level(&self) -> ErrorLevel {
        self.error_level
    }

    /// Application specific code, if any.
    pub fn error_code(&self) -> Option<i32> {
        self.error_code
    }

    /// The reason template, with `{name}` placeholders unsubstituted.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn reason_args(&self) -> &BTreeMap<String, Value> {
        &self.reason_args
    }

    /// Renders the reason, substituting arguments by name (or by position
    /// in name order). Unused arguments are appended in brackets.
    pub fn message(&self) -> String {
        let args: Vec<(&str, String)> = self
            .reason_args
            .iter()
            .map(|(name, value)| (name.as_str(), render_value(value)))
            .collect();
        interpolate_named(&self.reason, &args)
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.error_level, self.location)?;
        if let Some(code) = self.error_code {
            write!(f, " [{code}]")?;
        }
        write!(f, ": {}", self.message())
    }
}

/// Builder for [`ValidationError`].
#[derive(Debug, Clone)]
pub struct ValidationErrorBuilder {
    inner: ValidationError,
}

impl ValidationErrorBuilder {
    pub fn error_level(mut self, level: ErrorLevel) -> Self {
        self.inner.error_level = level;
        self
    }

    pub fn error_code(mut self, code: i32) -> Self {
        self.inner.error_code = Some(code);
        self
    }

    /// Sets the reason template, see [`ValidationError::message`].
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.inner.reason = reason.into();
        self
    }

    /// Adds a named argument; a repeated name replaces the earlier value.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inner.reason_args.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> ValidationError {
        self.inner
    }
}
