use anyhow::Result;
use calwatch_core::config::WatchConfig;
use calwatch_core::store::{JsonStore, ScheduleStore};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(config: &WatchConfig) -> Result<()> {
    let store = JsonStore::open(config.data_path())?;
    let summaries = store.summaries()?;

    if summaries.is_empty() {
        println!("{}", "No entities checked yet. Run `calwatch check` first.".dimmed());
        return Ok(());
    }

    for summary in &summaries {
        println!("{}", summary.render());
    }

    // Configured entities that have never produced a summary
    let unchecked: Vec<_> = config
        .entities
        .iter()
        .filter(|e| !summaries.iter().any(|s| s.entity_id == e.id))
        .map(|e| e.display_name.as_str())
        .collect();
    if !unchecked.is_empty() {
        println!();
        println!("{} {}", "Never checked:".dimmed(), unchecked.join(", "));
    }

    Ok(())
}
