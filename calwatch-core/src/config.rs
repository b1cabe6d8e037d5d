//! Global calwatch configuration.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::entity::TrackedEntity;
use crate::error::{CalWatchError, CalWatchResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/calwatch";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const ENV_PREFIX: &str = "CALWATCH";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("calwatch/{}", env!("CARGO_PKG_VERSION"))
}

/// Configuration at ~/.config/calwatch/config.toml
///
/// Values can be overridden with `CALWATCH_*` environment variables, e.g.
/// `CALWATCH_DATA_DIR=/srv/calwatch`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WatchConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub entities: Vec<TrackedEntity>,
}

impl WatchConfig {
    pub fn config_path() -> CalWatchResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalWatchError::Config("Could not determine config directory".into()))?
            .join("calwatch");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/calwatch/config.toml, creating a commented default
    /// file on first use.
    pub fn load() -> CalWatchResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CalWatchResult<Self> {
        let config: WatchConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| CalWatchError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalWatchError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CalWatchResult<()> {
        let mut seen = HashSet::new();

        for entity in &self.entities {
            if entity.id.trim().is_empty() {
                return Err(CalWatchError::Config("Entity with empty id".into()));
            }
            if !seen.insert(entity.id.as_str()) {
                return Err(CalWatchError::Config(format!(
                    "Duplicate entity id '{}'",
                    entity.id
                )));
            }
            if entity.source_location.trim().is_empty() {
                return Err(CalWatchError::Config(format!(
                    "Entity '{}' has no source_location",
                    entity.id
                )));
            }
        }

        Ok(())
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn entity(&self, id: &str) -> CalWatchResult<&TrackedEntity> {
        self.entities.iter().find(|e| e.id == id).ok_or_else(|| {
            let available: Vec<_> = self.entities.iter().map(|e| e.id.as_str()).collect();
            CalWatchError::EntityNotFound(format!(
                "'{}' (available: {})",
                id,
                available.join(", ")
            ))
        })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalWatchResult<()> {
        let contents = format!(
            "\
# calwatch configuration

# Where schedules, change events and summaries are stored:
# data_dir = \"{}\"

# HTTP timeout for fetching page exports, in seconds:
# request_timeout_secs = {}

# Tracked entities, one table each:
# [[entities]]
# id = \"evening-show\"
# display_name = \"Evening Show\"
# group_name = \"Main Stage\"
# category = \"show\"
# source_location = \"https://example.com/page-model/evening-show.json\"
",
            DEFAULT_DATA_DIR, DEFAULT_REQUEST_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalWatchError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalWatchError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_default_config_loads_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        WatchConfig::create_default_config(&path).unwrap();

        let config = WatchConfig::load_from(&path).unwrap();

        assert!(config.entities.is_empty());
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert!(config.user_agent.starts_with("calwatch/"));
    }

    #[test]
    fn test_loads_entities() {
        let (_dir, path) = write_config(
            r#"
data_dir = "/srv/calwatch"

[[entities]]
id = "evening-show"
display_name = "Evening Show"
group_name = "Main Stage"
category = "show"
source_location = "https://example.com/evening-show.json"

[[entities]]
id = "parade"
display_name = "Parade"
source_location = "file:///tmp/parade.json"
"#,
        );

        let config = WatchConfig::load_from(&path).unwrap();

        assert_eq!(config.data_path(), PathBuf::from("/srv/calwatch"));
        assert_eq!(config.entities.len(), 2);
        assert_eq!(config.entity("parade").unwrap().display_name, "Parade");
        assert_eq!(config.entity("parade").unwrap().group_name, "");
        assert!(matches!(
            config.entity("missing"),
            Err(CalWatchError::EntityNotFound(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let (_dir, path) = write_config(
            r#"
[[entities]]
id = "a"
display_name = "A"
source_location = "https://example.com/a.json"

[[entities]]
id = "a"
display_name = "A again"
source_location = "https://example.com/a2.json"
"#,
        );

        assert!(matches!(
            WatchConfig::load_from(&path),
            Err(CalWatchError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_empty_source_location() {
        let (_dir, path) = write_config(
            r#"
[[entities]]
id = "a"
display_name = "A"
source_location = ""
"#,
        );

        assert!(WatchConfig::load_from(&path).is_err());
    }
}
