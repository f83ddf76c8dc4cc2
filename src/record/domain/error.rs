//! Error types for record domain validation and parsing.

use super::{StoredStatus, TaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating record aggregates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordDomainError {
    /// The record title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The grade lies outside the 0.0–10.0 scale.
    #[error("grade of {0} tenths is out of range, expected 0..=100")]
    GradeOutOfRange(u16),

    /// The grade text is not a decimal with at most one fractional digit.
    #[error("invalid grade value: {0}")]
    InvalidGrade(String),

    /// The event's end instant precedes its start instant.
    #[error("event must not end before it starts")]
    EndsBeforeStart,

    /// The requested status change is not allowed by the storage state
    /// machine.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status the task currently holds.
        from: StoredStatus,
        /// Status the caller requested.
        to: StoredStatus,
    },
}

/// Error returned while parsing stored status wire values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseStoredStatusError(pub String);

/// Error returned while parsing priority wire values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing event kind wire values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown event kind: {0}")]
pub struct ParseEventKindError(pub String);
