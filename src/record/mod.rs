//! Task and event record tracking.
//!
//! Records are the time-bound rows the surrounding application stores on
//! behalf of a student: tasks with a due instant and a caller-driven
//! status, and calendar events with start/end instants. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//!
//! The one cross-cutting rule: lateness is never stored. A task's
//! `overdue` presentation is derived at read time by
//! [`domain::EffectiveStatus::resolve`] from the stored status, the due
//! instant, and an explicit `now`.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
