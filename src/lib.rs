//! Availability-slot scheduling engine.
//!
//! Keeps a set of non-overlapping, date-scoped windows for a single editor:
//! drag-to-create, boundary nudges, per-service capacity estimates, and
//! copy/delete of a window across the same weekday in a rolling horizon.
//! Everything is in memory and synchronous; callers persist or broadcast the
//! [`model::Event`]s the engine reports.

pub mod config;
pub mod engine;
pub mod limits;
pub mod model;
pub mod observability;
pub mod ports;

pub use config::{ConfigError, ScheduleConfig};
pub use engine::{Engine, EngineError};
