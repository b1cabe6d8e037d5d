use anyhow::{Context, Result};
use calwatch_core::TrackedEntity;
use calwatch_core::config::WatchConfig;
use calwatch_core::diff::ChangeKind;
use calwatch_core::pipeline::{self, EntityReport};
use calwatch_core::store::{JsonStore, ScheduleStore, StoredScheduleRecord};
use chrono::{DateTime, Local, NaiveDate, Utc};
use owo_colors::OwoColorize;
use tracing::{info, warn};

use crate::fetch::Fetcher;
use crate::render::{Render, pluralize};
use crate::utils::tui::create_spinner;

/// Totals across one `check` run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub checked: usize,
    pub failed: usize,
    pub records: usize,
    pub changes: usize,
}

impl RunSummary {
    fn record(&mut self, report: &EntityReport) {
        self.checked += 1;
        self.records += report.records.len();
        self.changes += report.changes.len();
    }

    fn render(&self) -> String {
        let mut line = format!(
            "Checked {} {}: {} {}, {} {}",
            self.checked,
            pluralize("entity", self.checked),
            self.records,
            pluralize("date", self.records),
            self.changes,
            pluralize("change", self.changes)
        );
        if self.failed > 0 {
            line.push_str(&format!(", {}", format!("{} failed", self.failed).red()));
        }
        line
    }
}

pub async fn run(config: &WatchConfig, entities: Vec<&TrackedEntity>, dry_run: bool) -> Result<()> {
    let fetcher = Fetcher::new(config)?;
    let store = JsonStore::open(config.data_path())?;
    let today = Local::now().date_naive();

    let mut summary = RunSummary::default();

    for (i, entity) in entities.iter().enumerate() {
        let spinner = create_spinner(entity.render());
        let result = check_entity(&fetcher, &store, entity, today, dry_run).await;
        spinner.finish_and_clear();

        println!("{}", entity.render());

        match result {
            Ok(report) => {
                summary.record(&report);
                println!("{}", report.render());
            }
            Err(e) => {
                let message = format!("{e:#}");
                warn!(entity = %entity.id, error = %message, "entity check failed");
                summary.failed += 1;
                println!("   {}", message.red());
            }
        }

        // Add spacing between entities (but not after the last one)
        if i < entities.len() - 1 {
            println!();
        }
    }

    println!();
    println!("{}", summary.render());
    if dry_run {
        println!("{}", "Dry run: nothing was written".dimmed());
    }

    if summary.checked == 0 && summary.failed > 0 {
        anyhow::bail!("All {} entities failed", summary.failed);
    }

    Ok(())
}

async fn check_entity(
    fetcher: &Fetcher,
    store: &impl ScheduleStore,
    entity: &TrackedEntity,
    today: NaiveDate,
    dry_run: bool,
) -> Result<EntityReport> {
    let document = fetcher
        .fetch_document(&entity.source_location)
        .await
        .with_context(|| format!("Failed to fetch {}", entity.source_location))?;

    let extraction = pipeline::extract(&document);
    let prior = store
        .load_prior_schedule(&entity.id, today)
        .context("Failed to load stored schedule")?;

    let checked_at = Utc::now();
    let report = pipeline::reconcile(entity, extraction, &prior, today, checked_at);

    info!(
        entity = %entity.id,
        records = report.records.len(),
        changes = report.changes.len(),
        status = %report.summary.current_status,
        "entity checked"
    );

    if !dry_run {
        persist(store, &report, checked_at).context("Failed to save results")?;
    }

    Ok(report)
}

fn persist(
    store: &impl ScheduleStore,
    report: &EntityReport,
    checked_at: DateTime<Utc>,
) -> Result<()> {
    let rows: Vec<_> = report
        .records
        .iter()
        .map(|record| StoredScheduleRecord {
            entity_id: report.entity.id.clone(),
            record: record.clone(),
            source_location: report.entity.source_location.clone(),
            collected_at: checked_at,
        })
        .collect();
    store.upsert_schedule(&rows)?;

    let removed: Vec<NaiveDate> = report
        .changes
        .iter()
        .filter(|c| c.kind == ChangeKind::Removed)
        .map(|c| c.affected_date)
        .collect();
    store.delete_schedule_dates(&report.entity.id, &removed)?;

    store.append_changes(&report.changes, checked_at)?;
    store.upsert_summary(&report.summary)?;

    Ok(())
}
