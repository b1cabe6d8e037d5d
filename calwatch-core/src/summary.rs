//! Per-entity status summary derived from one run.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::TrackedEntity;
use crate::schedule::ScheduleRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    Active,
    TemporarilyClosed,
    Unknown,
}

impl EntityStatus {
    /// A closure notice outranks a schedule; no schedule at all is unknown.
    pub fn from_signals(temporarily_closed: bool, record_count: usize) -> Self {
        if temporarily_closed {
            EntityStatus::TemporarilyClosed
        } else if record_count > 0 {
            EntityStatus::Active
        } else {
            EntityStatus::Unknown
        }
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityStatus::Active => write!(f, "ACTIVE"),
            EntityStatus::TemporarilyClosed => write!(f, "TEMPORARILY_CLOSED"),
            EntityStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStatusSummary {
    pub entity_id: String,
    pub entity_name: String,
    pub current_status: EntityStatus,
    /// Earliest scheduled date on or after the run's reference date.
    pub next_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub total_dates: usize,
    pub checked_at: DateTime<Utc>,
}

impl EntityStatusSummary {
    pub fn build(
        entity: &TrackedEntity,
        records: &[ScheduleRecord],
        temporarily_closed: bool,
        today: NaiveDate,
        checked_at: DateTime<Utc>,
    ) -> Self {
        let next_date = records.iter().map(|r| r.date).filter(|d| *d >= today).min();
        let last_date = records.iter().map(|r| r.date).max();

        EntityStatusSummary {
            entity_id: entity.id.clone(),
            entity_name: entity.display_name.clone(),
            current_status: EntityStatus::from_signals(temporarily_closed, records.len()),
            next_date,
            last_date,
            total_dates: records.len(),
            checked_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleStatus;
    use chrono::TimeZone;

    fn entity() -> TrackedEntity {
        TrackedEntity {
            id: "e1".to_string(),
            display_name: "Entity One".to_string(),
            group_name: String::new(),
            category: String::new(),
            source_location: "file:///tmp/e1.json".to_string(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_status_precedence() {
        assert_eq!(EntityStatus::from_signals(true, 4), EntityStatus::TemporarilyClosed);
        assert_eq!(EntityStatus::from_signals(true, 0), EntityStatus::TemporarilyClosed);
        assert_eq!(EntityStatus::from_signals(false, 1), EntityStatus::Active);
        assert_eq!(EntityStatus::from_signals(false, 0), EntityStatus::Unknown);
    }

    #[test]
    fn test_summary_dates() {
        let records = vec![
            ScheduleRecord::new(day(20), "8:00 PM", ScheduleStatus::Scheduled),
            ScheduleRecord::new(day(2), "8:00 PM", ScheduleStatus::Scheduled),
            ScheduleRecord::new(day(12), "8:00 PM", ScheduleStatus::Tentative),
        ];
        let checked_at = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();

        let summary = EntityStatusSummary::build(&entity(), &records, false, day(10), checked_at);

        assert_eq!(summary.current_status, EntityStatus::Active);
        assert_eq!(summary.next_date, Some(day(12)));
        assert_eq!(summary.last_date, Some(day(20)));
        assert_eq!(summary.total_dates, 3);
        assert_eq!(summary.checked_at, checked_at);
    }

    #[test]
    fn test_summary_without_records() {
        let summary = EntityStatusSummary::build(&entity(), &[], false, day(1), Utc::now());
        assert_eq!(summary.current_status, EntityStatus::Unknown);
        assert_eq!(summary.next_date, None);
        assert_eq!(summary.last_date, None);
        assert_eq!(summary.total_dates, 0);
    }
}
