use anyhow::Result;
use calwatch_core::config::WatchConfig;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(config: &WatchConfig) -> Result<()> {
    for entity in &config.entities {
        let mut details = vec![entity.id.clone()];
        if !entity.category.is_empty() {
            details.push(entity.category.clone());
        }

        println!("{} {}", entity.render(), format!("[{}]", details.join(", ")).dimmed());
        println!("   {}", entity.source_location.dimmed());
    }

    Ok(())
}
