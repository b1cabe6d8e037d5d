//! Schedule diff computation.

use std::collections::{HashMap, HashSet};

use crate::diff::ChangeEvent;
use crate::entity::TrackedEntity;
use crate::schedule::ScheduleRecord;

/// Compare a fresh extraction against the prior snapshot, keyed by date.
///
/// Additions and changes come first in `new_records` order, followed by
/// removals in `prior_records` order. A date whose time and status both
/// changed yields two separate events. Comparison is exact.
pub fn diff_schedule(
    entity: &TrackedEntity,
    new_records: &[ScheduleRecord],
    prior_records: &[ScheduleRecord],
) -> Vec<ChangeEvent> {
    let prior_by_date: HashMap<_, _> = prior_records.iter().map(|r| (r.date, r)).collect();
    let new_dates: HashSet<_> = new_records.iter().map(|r| r.date).collect();

    let mut changes = Vec::new();

    for new in new_records {
        let Some(old) = prior_by_date.get(&new.date) else {
            changes.push(ChangeEvent::added(entity, new));
            continue;
        };

        if old.display_time != new.display_time {
            changes.push(ChangeEvent::time_changed(entity, old, new));
        }
        if old.status != new.status {
            changes.push(ChangeEvent::status_changed(entity, old, new));
        }
    }

    for old in prior_records {
        if !new_dates.contains(&old.date) {
            changes.push(ChangeEvent::removed(entity, old));
        }
    }

    changes
}
