//! Stored task status and its read-time derivation.

use super::ParseStoredStatusError;
use crate::temporal::TimePoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status actually written to the record store, always by explicit caller
/// action. Lateness is deliberately not representable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoredStatus {
    /// Work has not started.
    Pending,
    /// Work is underway.
    InProgress,
    /// The task is done; terminal.
    Completed,
}

impl StoredStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns whether the storage state machine allows moving to `to`.
    ///
    /// Allowed moves: `pending → in_progress`, `pending → completed`,
    /// `in_progress → completed`, `in_progress → pending`. Nothing leaves
    /// `completed`, and no transition is ever applied automatically.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::InProgress)
                | (Self::Pending, Self::Completed)
                | (Self::InProgress, Self::Completed)
                | (Self::InProgress, Self::Pending)
        )
    }

    /// Returns whether no further transitions are allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl TryFrom<&str> for StoredStatus {
    type Error = ParseStoredStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseStoredStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for StoredStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status a reader should see, derived fresh on every read and never
/// persisted or cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveStatus {
    /// Stored `pending`, not yet late.
    Pending,
    /// Stored `in_progress`, not yet late.
    InProgress,
    /// Stored `completed`.
    Completed,
    /// Not completed and the due/start instant has passed.
    Overdue,
}

impl EffectiveStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    /// Derives the status a reader should see.
    ///
    /// Pure and total: `now` is an explicit argument, never read from a
    /// clock inside. A completed record is completed no matter how late it
    /// was; a record without a due instant cannot be overdue; the boundary
    /// `due_or_start == now` is not overdue (strict `<`).
    #[must_use]
    pub fn resolve(
        stored: StoredStatus,
        due_or_start: Option<TimePoint>,
        now: TimePoint,
    ) -> Self {
        if stored == StoredStatus::Completed {
            return Self::Completed;
        }
        match due_or_start {
            Some(due) if due < now => Self::Overdue,
            _ => stored.into(),
        }
    }
}

impl From<StoredStatus> for EffectiveStatus {
    fn from(stored: StoredStatus) -> Self {
        match stored {
            StoredStatus::Pending => Self::Pending,
            StoredStatus::InProgress => Self::InProgress,
            StoredStatus::Completed => Self::Completed,
        }
    }
}

impl fmt::Display for EffectiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
