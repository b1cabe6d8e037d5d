//! Core types and engines for calwatch.
//!
//! This crate provides everything that does not touch the network:
//! - `extract` pulls a normalized schedule out of a CMS page export
//! - `diff` reconciles a new schedule against the previously stored one
//! - `pipeline` ties both together for a single tracked entity
//! - `store` persists schedules, change events and status summaries

pub mod accessor;
pub mod config;
pub mod constants;
pub mod diff;
pub mod entity;
pub mod error;
pub mod extract;
pub mod locate;
pub mod pipeline;
pub mod schedule;
pub mod store;
pub mod summary;

pub use entity::TrackedEntity;
pub use error::{CalWatchError, CalWatchResult};
pub use schedule::{ScheduleRecord, ScheduleStatus};
pub use summary::{EntityStatus, EntityStatusSummary};
