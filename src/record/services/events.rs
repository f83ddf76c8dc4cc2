//! Service layer for calendar event intake and lifecycle.

use crate::record::domain::{
    Event, EventId, EventKind, NewEvent, ParseEventKindError, RecordDomainError, UserId,
};
use crate::record::ports::{EventRepository, EventRepositoryError};
use crate::temporal::{InvalidTemporalInput, TemporalNormalizer, TimePoint};
use log::{debug, warn};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating an event from boundary input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventRequest {
    owner: UserId,
    title: String,
    description: Option<String>,
    kind: Option<String>,
    starts_at: String,
    ends_at: Option<String>,
    location: Option<String>,
}

impl CreateEventRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(owner: UserId, title: impl Into<String>, starts_at: impl Into<String>) -> Self {
        Self {
            owner,
            title: title.into(),
            description: None,
            kind: None,
            starts_at: starts_at.into(),
            ends_at: None,
            location: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the raw event kind wire value.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets the raw end instant text.
    #[must_use]
    pub fn with_ends_at(mut self, ends_at: impl Into<String>) -> Self {
        self.ends_at = Some(ends_at.into());
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Request payload for editing an event; every field is supplied whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEventRequest {
    title: String,
    description: Option<String>,
    kind: Option<String>,
    starts_at: String,
    ends_at: Option<String>,
    location: Option<String>,
}

impl EditEventRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, starts_at: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            kind: None,
            starts_at: starts_at.into(),
            ends_at: None,
            location: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the raw event kind wire value.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets the raw end instant text.
    #[must_use]
    pub fn with_ends_at(mut self, ends_at: impl Into<String>) -> Self {
        self.ends_at = Some(ends_at.into());
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Service-level errors for event lifecycle operations.
#[derive(Debug, Error)]
pub enum EventServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] RecordDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] EventRepositoryError),

    /// Events require a start instant.
    #[error("start date is required")]
    MissingStartDate,

    /// The start field is not a recognized date/time value.
    #[error("start date rejected: {0}")]
    InvalidStartDate(#[source] InvalidTemporalInput),

    /// The end field is not a recognized date/time value.
    #[error("end date rejected: {0}")]
    InvalidEndDate(#[source] InvalidTemporalInput),

    /// The event kind wire value is unknown.
    #[error(transparent)]
    UnknownKind(#[from] ParseEventKindError),

    /// No event exists with the given identifier.
    #[error("event not found: {0}")]
    UnknownEvent(EventId),
}

/// Result type for event lifecycle service operations.
pub type EventServiceResult<T> = Result<T, EventServiceError>;

/// Event lifecycle orchestration service.
#[derive(Clone)]
pub struct EventLifecycleService<R, C>
where
    R: EventRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    normalizer: TemporalNormalizer,
}

impl<R, C> EventLifecycleService<R, C>
where
    R: EventRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new event lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, normalizer: TemporalNormalizer) -> Self {
        Self {
            repository,
            clock,
            normalizer,
        }
    }

    /// Creates an event from boundary input.
    ///
    /// # Errors
    ///
    /// Returns [`EventServiceError`] when a field fails validation or the
    /// repository rejects persistence. Each date field is rejected
    /// individually; nothing is stored on failure.
    pub async fn create(&self, request: CreateEventRequest) -> EventServiceResult<Event> {
        let (starts_at, ends_at) =
            self.parse_range(&request.starts_at, request.ends_at.as_deref())?;
        let kind = parse_kind(request.kind.as_deref())?;

        let event = Event::new(
            NewEvent {
                owner: request.owner,
                title: request.title,
                description: request.description,
                kind,
                starts_at,
                ends_at,
                location: request.location,
            },
            &*self.clock,
        )?;
        self.repository.store(&event).await?;
        debug!("created event {} for {}", event.id(), event.owner());
        Ok(event)
    }

    /// Replaces an event's descriptive fields and instants.
    ///
    /// # Errors
    ///
    /// Returns [`EventServiceError::UnknownEvent`] when the event does not
    /// exist, otherwise the same failures as [`Self::create`].
    pub async fn edit(&self, id: EventId, request: EditEventRequest) -> EventServiceResult<Event> {
        let (starts_at, ends_at) =
            self.parse_range(&request.starts_at, request.ends_at.as_deref())?;
        let kind = parse_kind(request.kind.as_deref())?;

        let mut event = self.fetch(id).await?;
        event.edit_details(
            request.title,
            request.description,
            kind,
            request.location,
            &*self.clock,
        )?;
        event.reschedule(starts_at, ends_at, &*self.clock)?;
        self.repository.update(&event).await?;
        Ok(event)
    }

    /// Deletes an event.
    ///
    /// # Errors
    ///
    /// Returns [`EventServiceError::Repository`] when the event does not
    /// exist or persistence fails.
    pub async fn remove(&self, id: EventId) -> EventServiceResult<()> {
        self.repository.remove(id).await?;
        Ok(())
    }

    /// Retrieves an event by identifier.
    ///
    /// Returns `Ok(None)` when no such event exists.
    ///
    /// # Errors
    ///
    /// Returns [`EventServiceError::Repository`] when the lookup fails.
    pub async fn get(&self, id: EventId) -> EventServiceResult<Option<Event>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists the owner's events, soonest first.
    ///
    /// # Errors
    ///
    /// Returns [`EventServiceError::Repository`] when the listing fails.
    pub async fn list(&self, owner: UserId) -> EventServiceResult<Vec<Event>> {
        Ok(self.repository.list_for_owner(owner).await?)
    }

    async fn fetch(&self, id: EventId) -> EventServiceResult<Event> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(EventServiceError::UnknownEvent(id))
    }

    fn parse_range(
        &self,
        starts_at: &str,
        ends_at: Option<&str>,
    ) -> EventServiceResult<(TimePoint, Option<TimePoint>)> {
        let starts_at = self
            .normalizer
            .parse(Some(starts_at))
            .map_err(|err| {
                warn!("rejecting event start date: {err}");
                EventServiceError::InvalidStartDate(err)
            })?
            .ok_or(EventServiceError::MissingStartDate)?;
        let ends_at = self.normalizer.parse(ends_at).map_err(|err| {
            warn!("rejecting event end date: {err}");
            EventServiceError::InvalidEndDate(err)
        })?;
        Ok((starts_at, ends_at))
    }
}

/// Parses an optional event kind wire value, defaulting to `other`.
fn parse_kind(raw: Option<&str>) -> Result<EventKind, ParseEventKindError> {
    raw.map_or(Ok(EventKind::default()), EventKind::try_from)
}
