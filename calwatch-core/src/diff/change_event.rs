use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::CHANGE_CATEGORY;
use crate::diff::ChangeKind;
use crate::entity::TrackedEntity;
use crate::schedule::{ScheduleRecord, ScheduleStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
        }
    }
}

/// The part of a schedule record a change event talks about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ScheduleStatus>,
}

impl ScheduleSnapshot {
    pub fn full(record: &ScheduleRecord) -> Self {
        ScheduleSnapshot {
            display_time: Some(record.display_time.clone()),
            status: Some(record.status),
        }
    }

    pub fn display_time(record: &ScheduleRecord) -> Self {
        ScheduleSnapshot {
            display_time: Some(record.display_time.clone()),
            status: None,
        }
    }

    pub fn status(record: &ScheduleRecord) -> Self {
        ScheduleSnapshot {
            display_time: None,
            status: Some(record.status),
        }
    }
}

/// A single detected schedule change for one entity and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub category: String,
    pub kind: ChangeKind,
    pub entity_id: String,
    pub entity_name: String,
    pub affected_date: NaiveDate,
    pub description: String,
    pub previous_value: Option<ScheduleSnapshot>,
    pub new_value: Option<ScheduleSnapshot>,
    pub severity: Severity,
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.entity_name, self.description)
    }
}

impl ChangeEvent {
    fn new(
        entity: &TrackedEntity,
        kind: ChangeKind,
        affected_date: NaiveDate,
        description: String,
        previous_value: Option<ScheduleSnapshot>,
        new_value: Option<ScheduleSnapshot>,
    ) -> Self {
        ChangeEvent {
            category: CHANGE_CATEGORY.to_string(),
            kind,
            entity_id: entity.id.clone(),
            entity_name: entity.display_name.clone(),
            affected_date,
            description,
            previous_value,
            new_value,
            severity: kind.severity(),
        }
    }

    pub fn added(entity: &TrackedEntity, new: &ScheduleRecord) -> Self {
        let mut description = format!("New date added: {} at {}", new.date, new.display_time);
        if new.status == ScheduleStatus::Tentative {
            description.push_str(" (tentative)");
        }
        Self::new(
            entity,
            ChangeKind::Added,
            new.date,
            description,
            None,
            Some(ScheduleSnapshot::full(new)),
        )
    }

    pub fn time_changed(entity: &TrackedEntity, old: &ScheduleRecord, new: &ScheduleRecord) -> Self {
        Self::new(
            entity,
            ChangeKind::TimeChanged,
            new.date,
            format!(
                "Time changed on {}: {} -> {}",
                new.date, old.display_time, new.display_time
            ),
            Some(ScheduleSnapshot::display_time(old)),
            Some(ScheduleSnapshot::display_time(new)),
        )
    }

    pub fn status_changed(entity: &TrackedEntity, old: &ScheduleRecord, new: &ScheduleRecord) -> Self {
        Self::new(
            entity,
            ChangeKind::StatusChanged,
            new.date,
            format!("Status changed on {}: {} -> {}", new.date, old.status, new.status),
            Some(ScheduleSnapshot::status(old)),
            Some(ScheduleSnapshot::status(new)),
        )
    }

    pub fn removed(entity: &TrackedEntity, old: &ScheduleRecord) -> Self {
        Self::new(
            entity,
            ChangeKind::Removed,
            old.date,
            format!("Date removed: {} (was {})", old.date, old.display_time),
            Some(ScheduleSnapshot::full(old)),
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_snapshot_omits_absent_fields() {
        let record = ScheduleRecord::new(
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            "8:00 PM",
            ScheduleStatus::Scheduled,
        );
        let json = serde_json::to_value(ScheduleSnapshot::status(&record)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "SCHEDULED" }));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }
}
