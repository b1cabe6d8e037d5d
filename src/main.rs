mod commands;
mod fetch;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use calwatch_core::TrackedEntity;
use calwatch_core::config::WatchConfig;
use clap::{Parser, Subcommand};

/// Number of change events shown by `changes` unless overridden
const DEFAULT_CHANGE_LIMIT: usize = 20;

#[derive(Parser)]
#[command(name = "calwatch")]
#[command(about = "Extract event calendars from CMS page exports and track schedule changes")]
struct Cli {
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch each tracked entity, extract its schedule and record changes
    Check {
        /// Only check this entity (by id)
        #[arg(short, long)]
        entity: Option<String>,

        /// Show what changed without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Extract the schedule from a saved page model export
    Extract {
        /// Path to the JSON document
        file: PathBuf,

        /// Print records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the last known status of every tracked entity
    Status,
    /// Show recently detected schedule changes
    Changes {
        /// Only show changes for this entity (by id)
        #[arg(short, long)]
        entity: Option<String>,

        /// Maximum number of changes to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_CHANGE_LIMIT)]
        limit: usize,
    },
    /// List configured entities
    Entities,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    match cli.command {
        Commands::Extract { file, json } => commands::extract::run(&file, json),
        Commands::Check { entity, dry_run } => {
            let config = WatchConfig::load()?;
            require_entities(&config)?;
            let entities = resolve_entities(&config, entity.as_deref())?;
            commands::check::run(&config, entities, dry_run).await
        }
        Commands::Status => {
            let config = WatchConfig::load()?;
            commands::status::run(&config)
        }
        Commands::Changes { entity, limit } => {
            let config = WatchConfig::load()?;
            if let Some(id) = entity.as_deref() {
                config.entity(id)?;
            }
            commands::changes::run(&config, entity.as_deref(), limit)
        }
        Commands::Entities => {
            let config = WatchConfig::load()?;
            require_entities(&config)?;
            commands::entities::run(&config)
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CALWATCH_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn require_entities(config: &WatchConfig) -> Result<()> {
    if config.entities.is_empty() {
        let path = WatchConfig::config_path()?;
        anyhow::bail!(
            "No entities configured.\n\n\
            Add one to {}:\n\n  \
            [[entities]]\n  \
            id = \"evening-show\"\n  \
            display_name = \"Evening Show\"\n  \
            source_location = \"https://example.com/page-model/evening-show.json\"",
            path.display()
        );
    }

    Ok(())
}

fn resolve_entities<'a>(
    config: &'a WatchConfig,
    entity_filter: Option<&str>,
) -> Result<Vec<&'a TrackedEntity>> {
    match entity_filter {
        Some(id) => Ok(vec![config.entity(id)?]),
        None => Ok(config.entities.iter().collect()),
    }
}
