use anyhow::Result;
use calwatch_core::config::WatchConfig;
use calwatch_core::store::{JsonStore, ScheduleStore};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(config: &WatchConfig, entity_id: Option<&str>, limit: usize) -> Result<()> {
    let store = JsonStore::open(config.data_path())?;
    let changes = store.changes(entity_id, limit)?;

    if changes.is_empty() {
        println!("{}", "No changes recorded".dimmed());
        return Ok(());
    }

    for change in &changes {
        println!("{}", change.render());
    }

    Ok(())
}
