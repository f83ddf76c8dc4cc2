//! Read-side aggregation: dashboard summary and merged calendar view.
//!
//! Everything here is computed fresh per call from stored records and an
//! explicit `now`; derived values (effective status, tallies, display
//! strings) are never written back or cached.

use crate::record::domain::{
    EffectiveStatus, Event, EventId, EventKind, Grade, Priority, StoredStatus, Task, TaskId,
    UserId,
};
use crate::record::ports::{
    EventRepository, EventRepositoryError, TaskQuery, TaskRepository, TaskRepositoryError,
};
use crate::temporal::{DisplayStyle, InvalidTemporalInput, TemporalNormalizer, TimePoint};
use log::warn;
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Maximum number of records in each dashboard highlight list.
const HIGHLIGHT_LIMIT: usize = 5;

/// Task counts per effective status.
///
/// The overdue bucket is derived by the resolver at read time; storage
/// holds no lateness flag to count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    /// All tasks owned by the student.
    pub total: usize,
    /// Effectively pending tasks.
    pub pending: usize,
    /// Effectively in-progress tasks.
    pub in_progress: usize,
    /// Completed tasks.
    pub completed: usize,
    /// Effectively overdue tasks.
    pub overdue: usize,
}

impl StatusTally {
    fn count(&mut self, status: EffectiveStatus) {
        self.total += 1;
        match status {
            EffectiveStatus::Pending => self.pending += 1,
            EffectiveStatus::InProgress => self.in_progress += 1,
            EffectiveStatus::Completed => self.completed += 1,
            EffectiveStatus::Overdue => self.overdue += 1,
        }
    }
}

/// Presentation-ready task row for dashboard highlight lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskHighlight {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Task priority, for badge selection.
    pub priority: Priority,
    /// Status the reader should see.
    pub effective_status: EffectiveStatus,
    /// Due instant rendered for display, when one is set.
    pub due_display: Option<String>,
    /// Calendar days until (negative: since) the due date.
    pub days_remaining: Option<i64>,
}

/// Presentation-ready event row for dashboard highlight lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventHighlight {
    /// Event identifier.
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Event category, for badge selection.
    pub kind: EventKind,
    /// Start instant rendered for display.
    pub starts_display: String,
    /// Where the event takes place.
    pub location: Option<String>,
}

/// Aggregated dashboard payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Task counts per effective status.
    pub tally: StatusTally,
    /// Mean grade over completed, graded tasks.
    pub average_grade: Option<Grade>,
    /// Up to five not-completed tasks due at or after `now`, soonest first.
    pub upcoming: Vec<TaskHighlight>,
    /// Up to five not-completed tasks already past due, oldest first.
    pub overdue: Vec<TaskHighlight>,
    /// Up to five events starting at or after `now`, soonest first.
    pub next_events: Vec<EventHighlight>,
}

/// Which record a calendar entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarSource {
    /// A task, surfaced at its due instant.
    Task,
    /// A calendar event.
    Event,
}

/// One row of the merged calendar range view.
///
/// Tasks appear at their due instant with a derived status; events span
/// their start/end instants and carry no status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEntry {
    /// Origin of the entry.
    pub source: CalendarSource,
    /// Record title.
    pub title: String,
    /// Start (or due) instant.
    pub starts_at: TimePoint,
    /// End instant, events only.
    pub ends_at: Option<TimePoint>,
    /// Start instant rendered for display.
    pub starts_display: String,
    /// Derived status, tasks only.
    pub effective_status: Option<EffectiveStatus>,
}

/// Service-level errors for dashboard queries.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Event repository operation failed.
    #[error(transparent)]
    Events(#[from] EventRepositoryError),

    /// A calendar range bound was missing or empty.
    #[error("calendar range requires both bounds")]
    MissingRangeBound,

    /// The range start is not a recognized date/time value.
    #[error("range start rejected: {0}")]
    InvalidRangeStart(#[source] InvalidTemporalInput),

    /// The range end is not a recognized date/time value.
    #[error("range end rejected: {0}")]
    InvalidRangeEnd(#[source] InvalidTemporalInput),

    /// The range end precedes the range start.
    #[error("calendar range end precedes its start")]
    EmptyRange,
}

/// Result type for dashboard service operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Read-only aggregation service over both record repositories.
#[derive(Clone)]
pub struct DashboardService<T, E, C>
where
    T: TaskRepository,
    E: EventRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    events: Arc<E>,
    clock: Arc<C>,
    normalizer: TemporalNormalizer,
}

impl<T, E, C> DashboardService<T, E, C>
where
    T: TaskRepository,
    E: EventRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new dashboard service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        events: Arc<E>,
        clock: Arc<C>,
        normalizer: TemporalNormalizer,
    ) -> Self {
        Self {
            tasks,
            events,
            clock,
            normalizer,
        }
    }

    /// Builds the dashboard summary for one student at the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] when a repository lookup fails.
    pub async fn summary(&self, owner: UserId) -> DashboardResult<DashboardSummary> {
        let now = self.now();
        let all_tasks = self
            .tasks
            .list_for_owner(owner, &TaskQuery::new())
            .await?;

        let mut tally = StatusTally::default();
        for task in &all_tasks {
            tally.count(task.effective_status(now));
        }

        let average_grade = Grade::average(
            all_tasks
                .iter()
                .filter(|task| task.status() == StoredStatus::Completed)
                .filter_map(Task::grade),
        );

        let upcoming = self.task_highlights(&all_tasks, now, |due| due >= now);
        let overdue = self.task_highlights(&all_tasks, now, |due| due < now);

        let next_events = self
            .events
            .list_for_owner(owner)
            .await?
            .into_iter()
            .filter(|event| event.starts_at() >= now)
            .take(HIGHLIGHT_LIMIT)
            .map(|event| self.event_highlight(&event))
            .collect();

        Ok(DashboardSummary {
            tally,
            average_grade,
            upcoming,
            overdue,
            next_events,
        })
    }

    /// Merges the student's events and task due dates inside an inclusive
    /// range into one chronological view.
    ///
    /// The bounds arrive as boundary text and are normalized here; each
    /// bound is rejected individually on failure.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] when a bound is missing, unparseable, or
    /// inverted, or when a repository lookup fails.
    pub async fn calendar(
        &self,
        owner: UserId,
        from: &str,
        to: &str,
    ) -> DashboardResult<Vec<CalendarEntry>> {
        let from = self.parse_bound(from, DashboardError::InvalidRangeStart)?;
        let to = self.parse_bound(to, DashboardError::InvalidRangeEnd)?;
        if to < from {
            return Err(DashboardError::EmptyRange);
        }

        let now = self.now();
        let mut entries: Vec<CalendarEntry> = Vec::new();

        for event in self.events.starting_between(owner, from, to).await? {
            entries.push(CalendarEntry {
                source: CalendarSource::Event,
                title: event.title().to_owned(),
                starts_at: event.starts_at(),
                ends_at: event.ends_at(),
                starts_display: self
                    .normalizer
                    .display_string(event.starts_at(), DisplayStyle::DateTime),
                effective_status: None,
            });
        }

        for task in self.tasks.due_between(owner, from, to).await? {
            let Some(due) = task.due() else { continue };
            entries.push(CalendarEntry {
                source: CalendarSource::Task,
                title: task.title().to_owned(),
                starts_at: due,
                ends_at: None,
                starts_display: self.normalizer.display_string(due, DisplayStyle::DateTime),
                effective_status: Some(task.effective_status(now)),
            });
        }

        entries.sort_by(|a, b| {
            a.starts_at
                .cmp(&b.starts_at)
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(entries)
    }

    fn task_highlights(
        &self,
        tasks: &[Task],
        now: TimePoint,
        in_window: impl Fn(TimePoint) -> bool,
    ) -> Vec<TaskHighlight> {
        tasks
            .iter()
            .filter(|task| task.status() != StoredStatus::Completed)
            .filter(|task| task.due().is_some_and(&in_window))
            .take(HIGHLIGHT_LIMIT)
            .map(|task| self.task_highlight(task, now))
            .collect()
    }

    fn task_highlight(&self, task: &Task, now: TimePoint) -> TaskHighlight {
        TaskHighlight {
            id: task.id(),
            title: task.title().to_owned(),
            priority: task.priority(),
            effective_status: task.effective_status(now),
            due_display: task
                .due()
                .map(|due| self.normalizer.display_string(due, DisplayStyle::DateTime)),
            days_remaining: task.due().map(|due| self.normalizer.days_until(due, now)),
        }
    }

    fn event_highlight(&self, event: &Event) -> EventHighlight {
        EventHighlight {
            id: event.id(),
            title: event.title().to_owned(),
            kind: event.kind(),
            starts_display: self
                .normalizer
                .display_string(event.starts_at(), DisplayStyle::DateTime),
            location: event.location().map(str::to_owned),
        }
    }

    fn parse_bound(
        &self,
        raw: &str,
        reject: impl FnOnce(InvalidTemporalInput) -> DashboardError,
    ) -> DashboardResult<TimePoint> {
        self.normalizer
            .parse(Some(raw))
            .map_err(|err| {
                warn!("rejecting calendar range bound: {err}");
                reject(err)
            })?
            .ok_or(DashboardError::MissingRangeBound)
    }

    fn now(&self) -> TimePoint {
        self.normalizer.instant(self.clock.utc())
    }
}
