//! Canonical date/time handling for time-bound records.
//!
//! User-supplied due dates and event instants arrive as text from two
//! producers: a date picker emitting ISO-8601 and free-text fields emitting
//! Brazilian `DD/MM/YYYY` values. This module disambiguates them
//! deterministically and owns every conversion between text and the
//! canonical [`TimePoint`] instant:
//!
//! - [`TemporalNormalizer::parse`] for intake
//! - [`TemporalNormalizer::storage_string`] for persistence hand-off
//! - [`TemporalNormalizer::display_string`] for presentation
//!
//! All functions are pure; the application zone and display style are
//! explicit arguments, never process-wide state.

mod error;
mod normalizer;
mod time_point;

pub use error::InvalidTemporalInput;
pub use normalizer::{DisplayStyle, TemporalNormalizer};
pub use time_point::TimePoint;

#[cfg(test)]
mod tests;
