//! TaskMind: domain core for a student task and event tracker.
//!
//! This crate provides the time-handling and record-tracking core shared by
//! the surrounding CRUD and presentation layers: canonical date/time
//! normalization, read-time derived status, and the task/event/dashboard
//! services built on both.
//!
//! # Architecture
//!
//! TaskMind follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores)
//!
//! # Modules
//!
//! - [`temporal`]: canonical instant type, parsing, and rendering
//! - [`record`]: task/event aggregates, repositories, and services
//! - [`logging`]: process-wide logging bootstrap

pub mod logging;
pub mod record;
pub mod temporal;
