//! Thread-safe in-memory task repository.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::debug;

use crate::record::domain::{Task, TaskId, UserId};
use crate::record::ports::{TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
use crate::temporal::TimePoint;

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    owner_index: HashMap<UserId, Vec<TaskId>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Removes a task ID from the owner index, cleaning up the entry if empty.
fn remove_from_index(index: &mut HashMap<UserId, Vec<TaskId>>, owner: UserId, task_id: TaskId) {
    if let Some(ids) = index.get_mut(&owner) {
        ids.retain(|id| *id != task_id);
        if ids.is_empty() {
            index.remove(&owner);
        }
    }
}

/// Due-ascending order with undated tasks last; title breaks ties so
/// listings are deterministic.
fn due_order(a: &Task, b: &Task) -> Ordering {
    match (a.due(), b.due()) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.title().cmp(b.title()))
}

fn owned_tasks(state: &InMemoryTaskState, owner: UserId) -> Vec<Task> {
    state
        .owner_index
        .get(&owner)
        .map(|ids| {
            ids.iter()
                .filter_map(|id| state.tasks.get(id).cloned())
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        state
            .owner_index
            .entry(task.owner())
            .or_default()
            .push(task.id());
        state.tasks.insert(task.id(), task.clone());
        debug!("stored task {}", task.id());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }

        // Owners are immutable, so the index needs no maintenance here.
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let removed = state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;

        remove_from_index(&mut state.owner_index, removed.owner(), id);
        debug!("removed task {id}");
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
        query: &TaskQuery,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tasks: Vec<Task> = owned_tasks(&state, owner)
            .into_iter()
            .filter(|task| query.matches(task))
            .collect();
        tasks.sort_by(due_order);
        Ok(tasks)
    }

    async fn due_between(
        &self,
        owner: UserId,
        from: TimePoint,
        to: TimePoint,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tasks: Vec<Task> = owned_tasks(&state, owner)
            .into_iter()
            .filter(|task| {
                task.due()
                    .is_some_and(|due| due >= from && due <= to)
            })
            .collect();
        tasks.sort_by(due_order);
        Ok(tasks)
    }
}
