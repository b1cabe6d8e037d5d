//! Calendar root discovery and expansion into schedule records.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

use crate::accessor::{Entries, field, resolve_entries};
use crate::constants::{
    CALENDAR_ROOT_KEY, CALENDAR_SEARCH_EXCLUDED_KEYS, CALENDAR_SEARCH_MAX_DEPTH, FIELDS_KEY,
};
use crate::extract::block::decode_block;
use crate::schedule::{ScheduleRecord, ScheduleStatus};

const DATES_KEY: &str = "dates";
const BLOCK_KEY: &str = "block";

/// Find the calendar root anywhere in a page model document.
///
/// Each object is checked for `calendarConfig` directly and under its
/// `fields` wrapper before its children are searched. Known media and
/// metadata subtrees are skipped.
pub fn find_calendar_root(document: &Value) -> Option<&Value> {
    find_root_at(document, 0)
}

fn find_root_at(node: &Value, depth: usize) -> Option<&Value> {
    if depth > CALENDAR_SEARCH_MAX_DEPTH {
        return None;
    }

    match node {
        Value::Object(map) => {
            let direct = map.get(CALENDAR_ROOT_KEY).filter(|v| !v.is_null());
            let wrapped = || {
                map.get(FIELDS_KEY)
                    .and_then(|fields| fields.get(CALENDAR_ROOT_KEY))
                    .filter(|v| !v.is_null())
            };
            if let Some(root) = direct.or_else(wrapped) {
                return Some(root);
            }

            map.iter()
                .filter(|(key, _)| !CALENDAR_SEARCH_EXCLUDED_KEYS.contains(&key.as_str()))
                .find_map(|(_, child)| find_root_at(child, depth + 1))
        }
        Value::Array(items) => items.iter().find_map(|item| find_root_at(item, depth + 1)),
        _ => None,
    }
}

/// Expand a calendar root into one record per listed date.
///
/// Every date of an entry shares the entry's decoded block. Entries without
/// dates contribute nothing. Output follows entry order, then date order;
/// it is not sorted. A date repeated across entries keeps its first record.
pub fn expand_calendar(calendar: &Value) -> Vec<ScheduleRecord> {
    let entries = match resolve_entries(calendar) {
        Entries::Found(entries) => entries,
        Entries::Malformed { key } => {
            warn!(key, "calendar entry list is present but not iterable");
            return Vec::new();
        }
        Entries::Missing => {
            warn!("calendar root has no entry list");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for entry in entries {
        let dates = entry_dates(entry);
        if dates.is_empty() {
            continue;
        }

        let block = decode_block(field(entry, BLOCK_KEY));
        let status = ScheduleStatus::from_tentative(block.is_tentative);

        for raw in dates {
            let Some(date) = parse_calendar_date(raw) else {
                warn!(value = raw, "skipping unparseable calendar date");
                continue;
            };
            if !seen.insert(date) {
                debug!(%date, "dropping duplicate calendar date");
                continue;
            }
            records.push(ScheduleRecord::new(date, block.display_time.clone(), status));
        }
    }

    records
}

/// Locate and expand the calendar in a full document.
pub fn extract_schedule(document: &Value) -> Vec<ScheduleRecord> {
    match find_calendar_root(document) {
        Some(calendar) => expand_calendar(calendar),
        None => {
            debug!("document has no calendar root");
            Vec::new()
        }
    }
}

/// Date-time strings listed on an entry, as a bare array or `{"values": [..]}`.
fn entry_dates(entry: &Value) -> Vec<&str> {
    let list = match field(entry, DATES_KEY) {
        Some(Value::Array(items)) => items,
        Some(other) => match other.get("values").and_then(Value::as_array) {
            Some(items) => items,
            None => return Vec::new(),
        },
        None => return Vec::new(),
    };

    list.iter().filter_map(Value::as_str).collect()
}

/// Keep the calendar-date portion of a date-time string.
fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
