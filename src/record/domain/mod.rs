//! Domain model for student task and event records.
//!
//! Aggregates validate their own invariants and stamp their own lifecycle
//! timestamps from an injected clock; everything infrastructure-shaped
//! stays outside the domain boundary.

mod error;
mod event;
mod ids;
mod status;
mod task;

pub use error::{
    ParseEventKindError, ParsePriorityError, ParseStoredStatusError, RecordDomainError,
};
pub use event::{Event, EventKind, NewEvent, PersistedEventData};
pub use ids::{EventId, TaskId, UserId};
pub use status::{EffectiveStatus, StoredStatus};
pub use task::{Grade, NewTask, PersistedTaskData, Priority, Task};
