//! Opaque canonical instant.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A timezone-aware instant, canonical across the whole crate.
///
/// Produced only by the [`TemporalNormalizer`](super::TemporalNormalizer);
/// immutable once constructed. Equality and ordering compare the instant
/// itself, so two values parsed from different offset representations of
/// the same moment are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimePoint(DateTime<FixedOffset>);

impl TimePoint {
    /// Wraps a resolved date/time. Kept crate-private so construction stays
    /// inside the temporal module.
    pub(crate) const fn from_datetime(instant: DateTime<FixedOffset>) -> Self {
        Self(instant)
    }

    /// Returns the wrapped date/time.
    #[must_use]
    pub const fn into_inner(self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Returns the instant as seconds since the Unix epoch.
    #[must_use]
    pub fn timestamp(self) -> i64 {
        self.0.timestamp()
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
