//! Tracked entity configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An entity whose schedule is tracked, e.g. one show or attraction.
///
/// Loaded from the `[[entities]]` tables in the config file and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedEntity {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub category: String,
    /// URL of the page model export (`https://` or `file://`).
    pub source_location: String,
}

impl fmt::Display for TrackedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group_name.is_empty() {
            write!(f, "{}", self.display_name)
        } else {
            write!(f, "{} ({})", self.display_name, self.group_name)
        }
    }
}
