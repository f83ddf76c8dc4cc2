//! Task aggregate root and related task value types.

use super::{EffectiveStatus, ParsePriorityError, RecordDomainError, StoredStatus, TaskId, UserId};
use crate::temporal::TimePoint;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task priority as chosen by the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// The default.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade on the 0.0–10.0 scale, held as validated tenths of a point.
///
/// Fixed-point keeps the aggregates `Eq` and the arithmetic exact; the
/// decimal rendering (`8.5`) is produced only on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grade(u16);

/// Largest representable grade: 10.0 points.
const MAX_GRADE_TENTHS: u16 = 100;

impl Grade {
    /// Creates a validated grade from tenths of a point.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::GradeOutOfRange`] when `tenths`
    /// exceeds 100.
    pub const fn from_tenths(tenths: u16) -> Result<Self, RecordDomainError> {
        if tenths > MAX_GRADE_TENTHS {
            return Err(RecordDomainError::GradeOutOfRange(tenths));
        }
        Ok(Self(tenths))
    }

    /// Returns the grade in tenths of a point.
    #[must_use]
    pub const fn value_tenths(self) -> u16 {
        self.0
    }

    /// Mean of the given grades, rounded to the nearest tenth.
    ///
    /// Returns `None` for an empty input.
    #[must_use]
    pub fn average<I: IntoIterator<Item = Self>>(grades: I) -> Option<Self> {
        let mut sum: u32 = 0;
        let mut count: u32 = 0;
        for grade in grades {
            sum += u32::from(grade.0);
            count += 1;
        }
        let rounded = sum
            .checked_add(count.checked_div(2)?)?
            .checked_div(count)?;
        u16::try_from(rounded).ok().map(Self)
    }
}

impl FromStr for Grade {
    type Err = RecordDomainError;

    /// Parses the boundary's decimal form: an integer part with at most
    /// one fractional digit, e.g. `8`, `8.5`, `10.0`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (whole, tenth) = match trimmed.split_once('.') {
            Some((whole, tenth)) => (whole, tenth),
            None => (trimmed, ""),
        };

        let is_decimal = !whole.is_empty()
            && whole.chars().all(|c| c.is_ascii_digit())
            && tenth.len() <= 1
            && tenth.chars().all(|c| c.is_ascii_digit());
        if !is_decimal {
            return Err(RecordDomainError::InvalidGrade(value.to_owned()));
        }

        let whole: u32 = whole
            .parse()
            .map_err(|_| RecordDomainError::InvalidGrade(value.to_owned()))?;
        let tenth: u32 = if tenth.is_empty() {
            0
        } else {
            tenth
                .parse()
                .map_err(|_| RecordDomainError::InvalidGrade(value.to_owned()))?
        };

        let tenths = whole
            .checked_mul(10)
            .and_then(|scaled| scaled.checked_add(tenth))
            .and_then(|total| u16::try_from(total).ok())
            .ok_or(RecordDomainError::GradeOutOfRange(u16::MAX))?;
        Self::from_tenths(tenths)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0.checked_div(10).unwrap_or(0);
        let tenth = self.0.checked_rem(10).unwrap_or(0);
        write!(f, "{whole}.{tenth}")
    }
}

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Owning student.
    pub owner: UserId,
    /// Task title; must not be blank.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Course subject the task belongs to.
    pub subject: Option<String>,
    /// Priority; defaults to [`Priority::Medium`] upstream when absent.
    pub priority: Priority,
    /// Normalized due instant, if one was supplied.
    pub due: Option<TimePoint>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted subject.
    pub subject: Option<String>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted stored status.
    pub status: StoredStatus,
    /// Persisted due instant.
    pub due: Option<TimePoint>,
    /// Persisted grade.
    pub grade: Option<Grade>,
    /// Persisted completion instant.
    pub completed_at: Option<TimePoint>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Task aggregate root.
///
/// Invariant: `completed_at` is present exactly when the stored status is
/// [`StoredStatus::Completed`]. Due and completion instants are replaced
/// whole on each write operation, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner: UserId,
    title: String,
    description: Option<String>,
    subject: Option<String>,
    priority: Priority,
    status: StoredStatus,
    due: Option<TimePoint>,
    grade: Option<Grade>,
    completed_at: Option<TimePoint>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::EmptyTitle`] when the title is blank
    /// after trimming.
    pub fn new(new_task: NewTask, clock: &impl Clock) -> Result<Self, RecordDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            owner: new_task.owner,
            title: normalized_title(new_task.title)?,
            description: new_task.description,
            subject: new_task.subject,
            priority: new_task.priority,
            status: StoredStatus::Pending,
            due: new_task.due,
            grade: None,
            completed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            title: data.title,
            description: data.description,
            subject: data.subject,
            priority: data.priority,
            status: data.status,
            due: data.due,
            grade: data.grade,
            completed_at: data.completed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
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

    /// Returns the subject, if any.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the stored status.
    #[must_use]
    pub const fn status(&self) -> StoredStatus {
        self.status
    }

    /// Returns the due instant, if one is set.
    #[must_use]
    pub const fn due(&self) -> Option<TimePoint> {
        self.due
    }

    /// Returns the recorded grade, if any.
    #[must_use]
    pub const fn grade(&self) -> Option<Grade> {
        self.grade
    }

    /// Returns the completion instant, present only for completed tasks.
    #[must_use]
    pub const fn completed_at(&self) -> Option<TimePoint> {
        self.completed_at
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

    /// Returns the status a reader should see at `now`.
    #[must_use]
    pub fn effective_status(&self, now: TimePoint) -> EffectiveStatus {
        EffectiveStatus::resolve(self.status, self.due, now)
    }

    /// Moves the task to `to`, stamping `completed_at` with `now` when the
    /// move completes the task.
    ///
    /// A rejected transition leaves the aggregate untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::InvalidStatusTransition`] when the
    /// storage state machine forbids the move.
    pub fn transition_to(
        &mut self,
        to: StoredStatus,
        now: TimePoint,
        clock: &impl Clock,
    ) -> Result<(), RecordDomainError> {
        if !self.status.can_transition_to(to) {
            return Err(RecordDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to,
            });
        }
        if to == StoredStatus::Completed {
            self.completed_at = Some(now);
        }
        self.status = to;
        self.touch(clock);
        Ok(())
    }

    /// Records a grade for the task.
    pub fn record_grade(&mut self, grade: Grade, clock: &impl Clock) {
        self.grade = Some(grade);
        self.touch(clock);
    }

    /// Replaces the due instant. `None` clears it.
    pub fn reschedule(&mut self, due: Option<TimePoint>, clock: &impl Clock) {
        self.due = due;
        self.touch(clock);
    }

    /// Replaces the descriptive fields as one write.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::EmptyTitle`] when the new title is
    /// blank after trimming; the aggregate is left untouched.
    pub fn edit_details(
        &mut self,
        title: String,
        description: Option<String>,
        subject: Option<String>,
        priority: Priority,
        clock: &impl Clock,
    ) -> Result<(), RecordDomainError> {
        self.title = normalized_title(title)?;
        self.description = description;
        self.subject = subject;
        self.priority = priority;
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Trims a title and rejects blank values.
pub(crate) fn normalized_title(raw: String) -> Result<String, RecordDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RecordDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}
