//! Repository port for task persistence and lookup.

use crate::record::domain::{Priority, StoredStatus, Task, TaskId, UserId};
use crate::temporal::TimePoint;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Filter for owner-scoped task listings.
///
/// Mirrors the query surface the surrounding application exposes: optional
/// stored-status, subject, and priority constraints, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    status: Option<StoredStatus>,
    subject: Option<String>,
    priority: Option<Priority>,
}

impl TaskQuery {
    /// Creates an unconstrained query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one stored status.
    #[must_use]
    pub fn with_status(mut self, status: StoredStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts results to one subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Restricts results to one priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Returns whether `task` satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self
                .subject
                .as_deref()
                .is_none_or(|subject| task.subject() == Some(subject))
            && self.priority.is_none_or(|priority| task.priority() == priority)
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the owner's tasks satisfying `query`, ordered by due instant
    /// ascending with undated tasks last.
    async fn list_for_owner(
        &self,
        owner: UserId,
        query: &TaskQuery,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the owner's tasks whose due instant lies in the inclusive
    /// range, ordered by due instant ascending.
    async fn due_between(
        &self,
        owner: UserId,
        from: TimePoint,
        to: TimePoint,
    ) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
