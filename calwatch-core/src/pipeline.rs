//! Per-entity extraction and reconciliation.
//!
//! Everything here is pure: fetching the document and persisting the report
//! are left to the caller, so one entity's failure never touches another.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::diff::{ChangeEvent, diff_schedule};
use crate::entity::TrackedEntity;
use crate::extract::{extract_schedule, is_temporarily_closed};
use crate::schedule::ScheduleRecord;
use crate::summary::EntityStatusSummary;

/// Signals read from one page model document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<ScheduleRecord>,
    pub temporarily_closed: bool,
}

/// Outcome of one entity's run, ready to be persisted.
#[derive(Debug, Clone)]
pub struct EntityReport {
    pub entity: TrackedEntity,
    pub records: Vec<ScheduleRecord>,
    pub changes: Vec<ChangeEvent>,
    pub summary: EntityStatusSummary,
}

pub fn extract(document: &Value) -> Extraction {
    Extraction {
        records: extract_schedule(document),
        temporarily_closed: is_temporarily_closed(document),
    }
}

/// Diff an extraction against the prior snapshot and build the summary.
///
/// `prior` is expected to hold the stored records dated on or after `today`,
/// so only new records in that same window take part in the diff. All
/// records are kept in the report for persistence.
pub fn reconcile(
    entity: &TrackedEntity,
    extraction: Extraction,
    prior: &[ScheduleRecord],
    today: NaiveDate,
    checked_at: DateTime<Utc>,
) -> EntityReport {
    let upcoming: Vec<ScheduleRecord> = extraction
        .records
        .iter()
        .filter(|r| r.date >= today)
        .cloned()
        .collect();

    let changes = diff_schedule(entity, &upcoming, prior);
    let summary = EntityStatusSummary::build(
        entity,
        &extraction.records,
        extraction.temporarily_closed,
        today,
        checked_at,
    );

    EntityReport {
        entity: entity.clone(),
        records: extraction.records,
        changes,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{ChangeKind, Severity};
    use crate::schedule::ScheduleStatus;
    use crate::summary::EntityStatus;
    use serde_json::json;

    fn entity() -> TrackedEntity {
        TrackedEntity {
            id: "night-parade".to_string(),
            display_name: "Night Parade".to_string(),
            group_name: "Park".to_string(),
            category: "parade".to_string(),
            source_location: "https://example.com/night-parade.json".to_string(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    #[test]
    fn test_empty_document_is_unknown_with_no_changes() {
        let doc = json!({ "page": { "title": "Night Parade", "componentPresentations": [] } });

        let extraction = extract(&doc);
        assert!(extraction.records.is_empty());
        assert!(!extraction.temporarily_closed);

        let report = reconcile(&entity(), extraction, &[], day(1), Utc::now());
        assert_eq!(report.summary.current_status, EntityStatus::Unknown);
        assert!(report.records.is_empty());
        assert!(report.changes.is_empty());
    }

    #[test]
    fn test_time_change_scenario() {
        let doc = json!({
            "calendarConfig": {
                "entries": [{
                    "dates": ["2026-01-05T20:30:00-05:00"],
                    "block": { "entries": [{ "label": { "values": ["8:30 PM"] } }] }
                }]
            }
        });
        let prior = vec![ScheduleRecord::new(day(5), "8:00 PM", ScheduleStatus::Scheduled)];

        let report = reconcile(&entity(), extract(&doc), &prior, day(1), Utc::now());

        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.changes[0].kind, ChangeKind::TimeChanged);
        assert_eq!(report.changes[0].severity, Severity::Medium);
        assert_eq!(report.summary.current_status, EntityStatus::Active);
        assert_eq!(report.summary.next_date, Some(day(5)));
    }

    #[test]
    fn test_past_dates_are_kept_but_not_diffed() {
        let doc = json!({
            "calendarConfig": {
                "entries": [{ "dates": ["2026-01-02T19:00:00", "2026-01-09T19:00:00"] }]
            }
        });

        let report = reconcile(&entity(), extract(&doc), &[], day(5), Utc::now());

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.changes[0].affected_date, day(9));
        assert_eq!(report.summary.total_dates, 2);
    }

    #[test]
    fn test_closure_takes_precedence_over_schedule() {
        let doc = json!({
            "componentPresentations": [{
                "featureList": [{ "description": "Temporarily closed until spring" }]
            }],
            "calendarConfig": { "entries": [{ "dates": ["2026-01-09"] }] }
        });

        let report = reconcile(&entity(), extract(&doc), &[], day(1), Utc::now());

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.summary.current_status, EntityStatus::TemporarilyClosed);
    }
}
