//! Calendar event aggregate root.
//!
//! Events carry no status concept; they are pure time-bound records with a
//! start and optional end instant.

use super::task::normalized_title;
use super::{EventId, ParseEventKindError, RecordDomainError, UserId};
use crate::temporal::TimePoint;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A lecture or regular class.
    Class,
    /// An exam sitting.
    Exam,
    /// An assignment hand-in.
    Assignment,
    /// A study group or advisor meeting.
    Meeting,
    /// Anything else.
    #[default]
    Other,
}

impl EventKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Exam => "exam",
            Self::Assignment => "assignment",
            Self::Meeting => "meeting",
            Self::Other => "other",
        }
    }
}

impl TryFrom<&str> for EventKind {
    type Error = ParseEventKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "class" => Ok(Self::Class),
            "exam" => Ok(Self::Exam),
            "assignment" => Ok(Self::Assignment),
            "meeting" => Ok(Self::Meeting),
            "other" => Ok(Self::Other),
            _ => Err(ParseEventKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter object for creating an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    /// Owning student.
    pub owner: UserId,
    /// Event title; must not be blank.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Event category.
    pub kind: EventKind,
    /// Normalized start instant.
    pub starts_at: TimePoint,
    /// Normalized end instant, if one was supplied.
    pub ends_at: Option<TimePoint>,
    /// Where the event takes place.
    pub location: Option<String>,
}

/// Parameter object for reconstructing a persisted event aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEventData {
    /// Persisted event identifier.
    pub id: EventId,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted category.
    pub kind: EventKind,
    /// Persisted start instant.
    pub starts_at: TimePoint,
    /// Persisted end instant.
    pub ends_at: Option<TimePoint>,
    /// Persisted location.
    pub location: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Calendar event aggregate root.
///
/// Invariant: when an end instant is present it does not precede the start
/// instant. Instants are replaced whole on each write operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    owner: UserId,
    title: String,
    description: Option<String>,
    kind: EventKind,
    starts_at: TimePoint,
    ends_at: Option<TimePoint>,
    location: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Event {
    /// Creates a new event.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::EmptyTitle`] when the title is blank
    /// and [`RecordDomainError::EndsBeforeStart`] when the end instant
    /// precedes the start instant.
    pub fn new(new_event: NewEvent, clock: &impl Clock) -> Result<Self, RecordDomainError> {
        validate_range(new_event.starts_at, new_event.ends_at)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: EventId::new(),
            owner: new_event.owner,
            title: normalized_title(new_event.title)?,
            description: new_event.description,
            kind: new_event.kind,
            starts_at: new_event.starts_at,
            ends_at: new_event.ends_at,
            location: new_event.location,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an event from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedEventData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            title: data.title,
            description: data.description,
            kind: data.kind,
            starts_at: data.starts_at,
            ends_at: data.ends_at,
            location: data.location,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// Returns the owning student.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the event category.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Returns the start instant.
    #[must_use]
    pub const fn starts_at(&self) -> TimePoint {
        self.starts_at
    }

    /// Returns the end instant, if one is set.
    #[must_use]
    pub const fn ends_at(&self) -> Option<TimePoint> {
        self.ends_at
    }

    /// Returns the location, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces both instants as one write.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::EndsBeforeStart`] when the new end
    /// precedes the new start; the aggregate is left untouched.
    pub fn reschedule(
        &mut self,
        starts_at: TimePoint,
        ends_at: Option<TimePoint>,
        clock: &impl Clock,
    ) -> Result<(), RecordDomainError> {
        validate_range(starts_at, ends_at)?;
        self.starts_at = starts_at;
        self.ends_at = ends_at;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the descriptive fields as one write.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::EmptyTitle`] when the new title is
    /// blank after trimming.
    pub fn edit_details(
        &mut self,
        title: String,
        description: Option<String>,
        kind: EventKind,
        location: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), RecordDomainError> {
        self.title = normalized_title(title)?;
        self.description = description;
        self.kind = kind;
        self.location = location;
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Rejects an end instant strictly before the start instant.
fn validate_range(
    starts_at: TimePoint,
    ends_at: Option<TimePoint>,
) -> Result<(), RecordDomainError> {
    if let Some(end) = ends_at
        && end < starts_at
    {
        return Err(RecordDomainError::EndsBeforeStart);
    }
    Ok(())
}
