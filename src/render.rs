//! TUI rendering traits for calwatch types.
//!
//! This module provides an extension trait that adds colored terminal
//! rendering to calwatch-core types using owo_colors.

use calwatch_core::diff::{ChangeEvent, ChangeKind, Severity};
use calwatch_core::pipeline::EntityReport;
use calwatch_core::store::StoredChange;
use calwatch_core::{EntityStatus, EntityStatusSummary, ScheduleRecord, ScheduleStatus, TrackedEntity};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ChangeKind {
    fn render(&self) -> String {
        colorize_change(*self, self.symbol())
    }
}

/// Colorize text according to the change kind
fn colorize_change(kind: ChangeKind, text: &str) -> String {
    match kind {
        ChangeKind::Added => text.green().to_string(),
        ChangeKind::TimeChanged | ChangeKind::StatusChanged => text.yellow().to_string(),
        ChangeKind::Removed => text.red().to_string(),
    }
}

impl Render for Severity {
    fn render(&self) -> String {
        match self {
            Severity::Low => self.to_string().dimmed().to_string(),
            Severity::Medium => self.to_string().yellow().to_string(),
            Severity::High => self.to_string().red().bold().to_string(),
        }
    }
}

impl Render for ChangeEvent {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.kind.render(),
            colorize_change(self.kind, &self.description),
            format!("[{}]", self.severity.render()).dimmed()
        )
    }
}

impl Render for StoredChange {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.detected_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            self.change.entity_name.bold(),
            self.change.render()
        )
    }
}

impl Render for TrackedEntity {
    fn render(&self) -> String {
        format!("📅 {}", self)
    }
}

impl Render for EntityStatus {
    fn render(&self) -> String {
        match self {
            EntityStatus::Active => self.to_string().green().to_string(),
            EntityStatus::TemporarilyClosed => self.to_string().red().to_string(),
            EntityStatus::Unknown => self.to_string().dimmed().to_string(),
        }
    }
}

impl Render for ScheduleRecord {
    fn render(&self) -> String {
        let line = format!("{}  {}", self.date.format("%a %Y-%m-%d"), self.display_time);
        match self.status {
            ScheduleStatus::Scheduled => line,
            ScheduleStatus::Tentative => format!("{} {}", line.dimmed(), "(tentative)".yellow()),
        }
    }
}

impl Render for EntityStatusSummary {
    fn render(&self) -> String {
        let next = self
            .next_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let last = self
            .last_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{} {}  next {}  last {}  {} {}  {}",
            self.entity_name.bold(),
            self.current_status.render(),
            next,
            last,
            self.total_dates,
            pluralize("date", self.total_dates),
            format!("checked {}", self.checked_at.format("%Y-%m-%d %H:%M")).dimmed()
        )
    }
}

/// Threshold for compact view (show counts instead of individual changes)
const COMPACT_THRESHOLD: usize = 8;

impl Render for EntityReport {
    fn render(&self) -> String {
        let mut lines = vec![format!(
            "   {} {} {}",
            self.summary.current_status.render(),
            self.records.len(),
            pluralize("date", self.records.len()).dimmed()
        )];

        if self.changes.is_empty() {
            lines.push("   No changes".dimmed().to_string());
        } else if self.changes.len() <= COMPACT_THRESHOLD {
            for change in &self.changes {
                lines.push(format!("   {}", change.render()));
            }
        } else {
            render_change_counts(&self.changes, &mut lines);
        }

        lines.join("\n")
    }
}

fn render_change_counts(changes: &[ChangeEvent], lines: &mut Vec<String>) {
    let count = |kinds: &[ChangeKind]| changes.iter().filter(|c| kinds.contains(&c.kind)).count();

    let added = count(&[ChangeKind::Added]);
    let changed = count(&[ChangeKind::TimeChanged, ChangeKind::StatusChanged]);
    let removed = count(&[ChangeKind::Removed]);

    if added > 0 {
        let label = format!("({} new {})", added, pluralize("date", added));
        lines.push(format!("   {} {}", "+".green(), label.green()));
    }
    if changed > 0 {
        let label = format!("({} {})", changed, pluralize("change", changed));
        lines.push(format!("   {} {}", "~".yellow(), label.yellow()));
    }
    if removed > 0 {
        let label = format!("({} removed {})", removed, pluralize("date", removed));
        lines.push(format!("   {} {}", "-".red(), label.red()));
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        return word.to_string();
    }
    match word.strip_suffix('y') {
        Some(stem) => format!("{stem}ies"),
        None => format!("{word}s"),
    }
}
