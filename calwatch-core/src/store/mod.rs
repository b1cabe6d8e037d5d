//! Persistence for schedules, change events and status summaries.

mod json_store;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::diff::ChangeEvent;
use crate::error::CalWatchResult;
use crate::schedule::ScheduleRecord;
use crate::summary::EntityStatusSummary;

pub use json_store::JsonStore;

/// A schedule record annotated with where and when it was collected.
/// Unique per `(entity_id, record.date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredScheduleRecord {
    pub entity_id: String,
    #[serde(flatten)]
    pub record: ScheduleRecord,
    pub source_location: String,
    pub collected_at: DateTime<Utc>,
}

/// A change event as appended to the change log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredChange {
    pub detected_at: DateTime<Utc>,
    #[serde(flatten)]
    pub change: ChangeEvent,
}

pub trait ScheduleStore {
    /// Stored records for `entity_id` dated on or after `from`, by date.
    fn load_prior_schedule(
        &self,
        entity_id: &str,
        from: NaiveDate,
    ) -> CalWatchResult<Vec<ScheduleRecord>>;

    /// Insert or replace rows keyed by `(entity_id, date)`.
    fn upsert_schedule(&self, rows: &[StoredScheduleRecord]) -> CalWatchResult<()>;

    /// Drop stored rows for dates the source no longer lists, so a removal
    /// is reported once.
    fn delete_schedule_dates(&self, entity_id: &str, dates: &[NaiveDate]) -> CalWatchResult<()>;

    fn append_changes(&self, changes: &[ChangeEvent], detected_at: DateTime<Utc>)
    -> CalWatchResult<()>;

    /// Insert or replace the summary keyed by entity id.
    fn upsert_summary(&self, summary: &EntityStatusSummary) -> CalWatchResult<()>;

    fn summaries(&self) -> CalWatchResult<Vec<EntityStatusSummary>>;

    /// Most recent changes first, optionally for one entity.
    fn changes(&self, entity_id: Option<&str>, limit: usize) -> CalWatchResult<Vec<StoredChange>>;
}
