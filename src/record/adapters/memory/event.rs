//! Thread-safe in-memory event repository.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::debug;

use crate::record::domain::{Event, EventId, UserId};
use crate::record::ports::{EventRepository, EventRepositoryError, EventRepositoryResult};
use crate::temporal::TimePoint;

/// Thread-safe in-memory event repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventRepository {
    state: Arc<RwLock<InMemoryEventState>>,
}

#[derive(Debug, Default)]
struct InMemoryEventState {
    events: HashMap<EventId, Event>,
    owner_index: HashMap<UserId, Vec<EventId>>,
}

impl InMemoryEventRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Removes an event ID from the owner index, cleaning up the entry if empty.
fn remove_from_index(index: &mut HashMap<UserId, Vec<EventId>>, owner: UserId, event_id: EventId) {
    if let Some(ids) = index.get_mut(&owner) {
        ids.retain(|id| *id != event_id);
        if ids.is_empty() {
            index.remove(&owner);
        }
    }
}

fn owned_events(state: &InMemoryEventState, owner: UserId) -> Vec<Event> {
    state
        .owner_index
        .get(&owner)
        .map(|ids| {
            ids.iter()
                .filter_map(|id| state.events.get(id).cloned())
                .collect()
        })
        .unwrap_or_default()
}

fn sort_by_start(events: &mut [Event]) {
    events.sort_by(|a, b| {
        a.starts_at()
            .cmp(&b.starts_at())
            .then_with(|| a.title().cmp(b.title()))
    });
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn store(&self, event: &Event) -> EventRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            EventRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.events.contains_key(&event.id()) {
            return Err(EventRepositoryError::DuplicateEvent(event.id()));
        }

        state
            .owner_index
            .entry(event.owner())
            .or_default()
            .push(event.id());
        state.events.insert(event.id(), event.clone());
        debug!("stored event {}", event.id());
        Ok(())
    }

    async fn update(&self, event: &Event) -> EventRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            EventRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.events.contains_key(&event.id()) {
            return Err(EventRepositoryError::NotFound(event.id()));
        }

        state.events.insert(event.id(), event.clone());
        Ok(())
    }

    async fn remove(&self, id: EventId) -> EventRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            EventRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let removed = state
            .events
            .remove(&id)
            .ok_or(EventRepositoryError::NotFound(id))?;

        remove_from_index(&mut state.owner_index, removed.owner(), id);
        debug!("removed event {id}");
        Ok(())
    }

    async fn find_by_id(&self, id: EventId) -> EventRepositoryResult<Option<Event>> {
        let state = self.state.read().map_err(|err| {
            EventRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.events.get(&id).cloned())
    }

    async fn list_for_owner(&self, owner: UserId) -> EventRepositoryResult<Vec<Event>> {
        let state = self.state.read().map_err(|err| {
            EventRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut events = owned_events(&state, owner);
        sort_by_start(&mut events);
        Ok(events)
    }

    async fn starting_between(
        &self,
        owner: UserId,
        from: TimePoint,
        to: TimePoint,
    ) -> EventRepositoryResult<Vec<Event>> {
        let state = self.state.read().map_err(|err| {
            EventRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut events: Vec<Event> = owned_events(&state, owner)
            .into_iter()
            .filter(|event| event.starts_at() >= from && event.starts_at() <= to)
            .collect();
        sort_by_start(&mut events);
        Ok(events)
    }
}
