//! Normalized schedule records.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    Scheduled,
    Tentative,
}

impl ScheduleStatus {
    pub fn from_tentative(is_tentative: bool) -> Self {
        if is_tentative {
            ScheduleStatus::Tentative
        } else {
            ScheduleStatus::Scheduled
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Scheduled => "SCHEDULED",
            ScheduleStatus::Tentative => "TENTATIVE",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scheduled date for a tracked entity.
///
/// `display_time` is the free-text label from the source ("8:00 PM",
/// "Doors at 7") and is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub date: NaiveDate,
    pub display_time: String,
    pub status: ScheduleStatus,
    pub is_available: bool,
}

impl ScheduleRecord {
    pub fn new(date: NaiveDate, display_time: impl Into<String>, status: ScheduleStatus) -> Self {
        ScheduleRecord {
            date,
            display_time: display_time.into(),
            status,
            is_available: status == ScheduleStatus::Scheduled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_follows_status() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert!(ScheduleRecord::new(date, "8:00 PM", ScheduleStatus::Scheduled).is_available);
        assert!(!ScheduleRecord::new(date, "8:00 PM", ScheduleStatus::Tentative).is_available);
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&ScheduleStatus::Tentative).unwrap();
        assert_eq!(json, "\"TENTATIVE\"");
    }
}
