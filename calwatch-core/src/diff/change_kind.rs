use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diff::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    TimeChanged,
    StatusChanged,
    Removed,
}

impl ChangeKind {
    pub fn severity(&self) -> Severity {
        match self {
            ChangeKind::Added => Severity::Low,
            ChangeKind::TimeChanged | ChangeKind::StatusChanged => Severity::Medium,
            ChangeKind::Removed => Severity::High,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ChangeKind::Added => "+",
            ChangeKind::TimeChanged | ChangeKind::StatusChanged => "~",
            ChangeKind::Removed => "-",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
