use std::path::Path;

use anyhow::{Context, Result};
use calwatch_core::pipeline;
use calwatch_core::{EntityStatus, ScheduleRecord};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::fetch::read_document;
use crate::render::{Render, pluralize};

#[derive(Serialize)]
struct ExtractOutput<'a> {
    status: EntityStatus,
    temporarily_closed: bool,
    records: &'a [ScheduleRecord],
}

pub fn run(file: &Path, json: bool) -> Result<()> {
    let document =
        read_document(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let extraction = pipeline::extract(&document);
    let status = EntityStatus::from_signals(extraction.temporarily_closed, extraction.records.len());

    if json {
        let output = ExtractOutput {
            status,
            temporarily_closed: extraction.temporarily_closed,
            records: &extraction.records,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        status.render(),
        extraction.records.len(),
        pluralize("date", extraction.records.len()).dimmed()
    );
    if extraction.temporarily_closed {
        println!("   {}", "Closure notice found".red());
    }
    for record in &extraction.records {
        println!("   {}", record.render());
    }

    Ok(())
}
