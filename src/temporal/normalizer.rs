//! Parsing and rendering between text and [`TimePoint`].

use super::{InvalidTemporalInput, TimePoint};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc, Weekday};

/// ISO-8601 date-time layouts without an offset, interpreted in the
/// application zone. The single-space variants cover the canonical storage
/// format so storage strings round-trip through [`TemporalNormalizer::parse`].
const ISO_LOCAL_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Canonical persistence layout, local wall-clock time in the application
/// zone.
const STORAGE_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Presentation style for [`TemporalNormalizer::display_string`].
///
/// Display output is an explicit argument rather than ambient locale state,
/// so rendering stays deterministic under parallel callers. Display strings
/// are presentation-only and are never parsed, compared, or stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStyle {
    /// `DD/MM/YYYY`.
    Date,
    /// `DD/MM/YYYY HH:mm`.
    DateTime,
    /// Long Portuguese form, e.g. `sexta-feira, 07 de agosto de 2026`.
    Long,
}

/// Converts textual date/time values to and from the canonical
/// [`TimePoint`] instant.
///
/// The normalizer carries the zone the application runs in; zone-less
/// inputs are interpreted there and every rendered string is expressed in
/// it. There is no per-user zone concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalNormalizer {
    zone: FixedOffset,
}

impl TemporalNormalizer {
    /// Creates a normalizer for the given application zone.
    #[must_use]
    pub const fn new(zone: FixedOffset) -> Self {
        Self { zone }
    }

    /// Creates a normalizer pinned to UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// Returns the application zone.
    #[must_use]
    pub const fn zone(&self) -> FixedOffset {
        self.zone
    }

    /// Parses a textual date/time value into a canonical instant.
    ///
    /// Absent, empty, or all-whitespace input is `Ok(None)`: "no date set"
    /// is a valid state, not an error. Non-empty input is tried against the
    /// accepted layouts in fixed priority order, first full match wins:
    ///
    /// 1. ISO-8601 (`T` or single-space separator, optional seconds,
    ///    fraction, and `Z`/`±HH:MM` offset)
    /// 2. `DD/MM/YYYY HH:mm`
    /// 3. `DD/MM/YYYY`
    /// 4. `YYYY-MM-DD`
    ///
    /// Trying ISO first keeps day/month-ambiguous strings deterministic:
    /// `03/04/2025` is always day 3, month 4. Values without an offset are
    /// resolved in the application zone; date-only values resolve to local
    /// midnight. Invalid calendar dates never roll over.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTemporalInput`] when non-empty input matches none
    /// of the layouts. No default instant is ever substituted.
    pub fn parse(&self, raw: Option<&str>) -> Result<Option<TimePoint>, InvalidTemporalInput> {
        let Some(text) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(None);
        };

        if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
            return Ok(Some(TimePoint::from_datetime(
                instant.with_timezone(&self.zone),
            )));
        }

        for layout in ISO_LOCAL_LAYOUTS {
            if let Ok(wall) = NaiveDateTime::parse_from_str(text, layout) {
                return self.resolve_local(wall, text).map(Some);
            }
        }

        if let Ok(wall) = NaiveDateTime::parse_from_str(text, "%d/%m/%Y %H:%M") {
            return self.resolve_local(wall, text).map(Some);
        }

        for layout in ["%d/%m/%Y", "%Y-%m-%d"] {
            if let Ok(date) = NaiveDate::parse_from_str(text, layout) {
                return self
                    .resolve_local(date.and_time(chrono::NaiveTime::MIN), text)
                    .map(Some);
            }
        }

        Err(InvalidTemporalInput::new(text))
    }

    /// Adapts a clock reading into the application zone.
    ///
    /// Services obtain "now" through this method so [`TimePoint`]
    /// construction stays inside the temporal module.
    #[must_use]
    pub fn instant(&self, utc: DateTime<Utc>) -> TimePoint {
        TimePoint::from_datetime(utc.with_timezone(&self.zone))
    }

    /// Renders the canonical persistence string, `YYYY-MM-DD HH:mm:ss` in
    /// the application zone, whole-second precision.
    ///
    /// Parsing this string back yields the original instant for any
    /// whole-second [`TimePoint`].
    #[must_use]
    pub fn storage_string(&self, instant: TimePoint) -> String {
        instant
            .into_inner()
            .with_timezone(&self.zone)
            .format(STORAGE_LAYOUT)
            .to_string()
    }

    /// Renders a presentation string in the requested style.
    #[must_use]
    pub fn display_string(&self, instant: TimePoint, style: DisplayStyle) -> String {
        let local = instant.into_inner().with_timezone(&self.zone);
        match style {
            DisplayStyle::Date => local.format("%d/%m/%Y").to_string(),
            DisplayStyle::DateTime => local.format("%d/%m/%Y %H:%M").to_string(),
            DisplayStyle::Long => format!(
                "{}, {:02} de {} de {}",
                weekday_name_pt(local.weekday()),
                local.day(),
                month_name_pt(local.month0()),
                local.year()
            ),
        }
    }

    /// Calendar-day difference between `instant` and `now` in the
    /// application zone; negative once `instant`'s local date has passed.
    #[must_use]
    pub fn days_until(&self, instant: TimePoint, now: TimePoint) -> i64 {
        let target = instant.into_inner().with_timezone(&self.zone).date_naive();
        let today = now.into_inner().with_timezone(&self.zone).date_naive();
        target.signed_duration_since(today).num_days()
    }

    fn resolve_local(
        &self,
        wall: NaiveDateTime,
        text: &str,
    ) -> Result<TimePoint, InvalidTemporalInput> {
        wall.and_local_timezone(self.zone)
            .single()
            .map(TimePoint::from_datetime)
            .ok_or_else(|| InvalidTemporalInput::new(text))
    }
}

/// Portuguese weekday name for the long display style.
const fn weekday_name_pt(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// Portuguese month name, zero-based month index.
fn month_name_pt(month0: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "janeiro",
        "fevereiro",
        "março",
        "abril",
        "maio",
        "junho",
        "julho",
        "agosto",
        "setembro",
        "outubro",
        "novembro",
        "dezembro",
    ];
    NAMES
        .get(usize::try_from(month0).unwrap_or(usize::MAX))
        .copied()
        .unwrap_or("")
}
