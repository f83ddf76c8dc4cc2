//! Repository port for calendar event persistence and lookup.

use crate::record::domain::{Event, EventId, UserId};
use crate::temporal::TimePoint;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event repository operations.
pub type EventRepositoryResult<T> = Result<T, EventRepositoryError>;

/// Event persistence contract.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Stores a new event.
    ///
    /// # Errors
    ///
    /// Returns [`EventRepositoryError::DuplicateEvent`] when the event ID
    /// already exists.
    async fn store(&self, event: &Event) -> EventRepositoryResult<()>;

    /// Persists changes to an existing event.
    ///
    /// # Errors
    ///
    /// Returns [`EventRepositoryError::NotFound`] when the event does not
    /// exist.
    async fn update(&self, event: &Event) -> EventRepositoryResult<()>;

    /// Deletes an event.
    ///
    /// # Errors
    ///
    /// Returns [`EventRepositoryError::NotFound`] when the event does not
    /// exist.
    async fn remove(&self, id: EventId) -> EventRepositoryResult<()>;

    /// Finds an event by identifier.
    ///
    /// Returns `None` when the event does not exist.
    async fn find_by_id(&self, id: EventId) -> EventRepositoryResult<Option<Event>>;

    /// Returns the owner's events ordered by start instant ascending.
    async fn list_for_owner(&self, owner: UserId) -> EventRepositoryResult<Vec<Event>>;

    /// Returns the owner's events whose start instant lies in the inclusive
    /// range, ordered by start instant ascending.
    async fn starting_between(
        &self,
        owner: UserId,
        from: TimePoint,
        to: TimePoint,
    ) -> EventRepositoryResult<Vec<Event>>;
}

/// Errors returned by event repository implementations.
#[derive(Debug, Clone, Error)]
pub enum EventRepositoryError {
    /// An event with the same identifier already exists.
    #[error("duplicate event identifier: {0}")]
    DuplicateEvent(EventId),

    /// The event was not found.
    #[error("event not found: {0}")]
    NotFound(EventId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EventRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
