//! Port contracts for record persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by record
//! services. The surrounding application's relational store implements
//! these contracts; this crate ships in-memory adapters for tests and
//! embedding.

pub mod events;
pub mod tasks;

pub use events::{EventRepository, EventRepositoryError, EventRepositoryResult};
pub use tasks::{TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
