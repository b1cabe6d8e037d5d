//! File-backed store: one JSON document per collection under the data dir.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::diff::ChangeEvent;
use crate::error::{CalWatchError, CalWatchResult};
use crate::schedule::ScheduleRecord;
use crate::store::{ScheduleStore, StoredChange, StoredScheduleRecord};
use crate::summary::EntityStatusSummary;

const SCHEDULE_FILE: &str = "schedule.json";
const CHANGES_FILE: &str = "changes.json";
const SUMMARIES_FILE: &str = "summaries.json";

#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn open(dir: impl Into<PathBuf>) -> CalWatchResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            CalWatchError::Store(format!("Could not create {}: {e}", dir.display()))
        })?;
        Ok(JsonStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read<T: DeserializeOwned + Default>(&self, file: &str) -> CalWatchResult<T> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(T::default());
        }

        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| {
            CalWatchError::Store(format!("Could not parse {}: {e}", path.display()))
        })
    }

    fn write<T: Serialize>(&self, file: &str, value: &T) -> CalWatchResult<()> {
        let path = self.dir.join(file);
        let temp = self.dir.join(format!("{file}.tmp"));

        let content = serde_json::to_string_pretty(value)?;
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    fn schedule_rows(&self) -> CalWatchResult<BTreeMap<(String, NaiveDate), StoredScheduleRecord>> {
        let rows: Vec<StoredScheduleRecord> = self.read(SCHEDULE_FILE)?;
        Ok(rows
            .into_iter()
            .map(|row| ((row.entity_id.clone(), row.record.date), row))
            .collect())
    }

    fn write_schedule_rows(
        &self,
        rows: BTreeMap<(String, NaiveDate), StoredScheduleRecord>,
    ) -> CalWatchResult<()> {
        let rows: Vec<_> = rows.into_values().collect();
        self.write(SCHEDULE_FILE, &rows)
    }
}

impl ScheduleStore for JsonStore {
    fn load_prior_schedule(
        &self,
        entity_id: &str,
        from: NaiveDate,
    ) -> CalWatchResult<Vec<ScheduleRecord>> {
        Ok(self
            .schedule_rows()?
            .into_values()
            .filter(|row| row.entity_id == entity_id && row.record.date >= from)
            .map(|row| row.record)
            .collect())
    }

    fn upsert_schedule(&self, rows: &[StoredScheduleRecord]) -> CalWatchResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut stored = self.schedule_rows()?;
        for row in rows {
            stored.insert((row.entity_id.clone(), row.record.date), row.clone());
        }
        self.write_schedule_rows(stored)
    }

    fn delete_schedule_dates(&self, entity_id: &str, dates: &[NaiveDate]) -> CalWatchResult<()> {
        if dates.is_empty() {
            return Ok(());
        }

        let dates: HashSet<_> = dates.iter().collect();
        let mut stored = self.schedule_rows()?;
        stored.retain(|(id, date), _| !(id == entity_id && dates.contains(date)));
        self.write_schedule_rows(stored)
    }

    fn append_changes(
        &self,
        changes: &[ChangeEvent],
        detected_at: DateTime<Utc>,
    ) -> CalWatchResult<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut log: Vec<StoredChange> = self.read(CHANGES_FILE)?;
        log.extend(changes.iter().map(|change| StoredChange {
            detected_at,
            change: change.clone(),
        }));
        self.write(CHANGES_FILE, &log)
    }

    fn upsert_summary(&self, summary: &EntityStatusSummary) -> CalWatchResult<()> {
        let mut summaries: BTreeMap<String, EntityStatusSummary> = self.read(SUMMARIES_FILE)?;
        summaries.insert(summary.entity_id.clone(), summary.clone());
        self.write(SUMMARIES_FILE, &summaries)
    }

    fn summaries(&self) -> CalWatchResult<Vec<EntityStatusSummary>> {
        let summaries: BTreeMap<String, EntityStatusSummary> = self.read(SUMMARIES_FILE)?;
        Ok(summaries.into_values().collect())
    }

    fn changes(&self, entity_id: Option<&str>, limit: usize) -> CalWatchResult<Vec<StoredChange>> {
        let log: Vec<StoredChange> = self.read(CHANGES_FILE)?;
        Ok(log
            .into_iter()
            .rev()
            .filter(|c| entity_id.is_none_or(|id| c.change.entity_id == id))
            .take(limit)
            .collect())
    }
}
