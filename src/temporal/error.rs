//! Error type for date/time intake.

use thiserror::Error;

/// Error returned when a non-empty textual date/time value matches none of
/// the accepted input formats.
///
/// This is a recoverable, field-level rejection: callers must refuse the
/// offending value and surface the failure, never substitute a default
/// instant in its place.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized date/time value: {0}")]
pub struct InvalidTemporalInput(pub String);

impl InvalidTemporalInput {
    /// Creates a rejection carrying the offending input text.
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}
