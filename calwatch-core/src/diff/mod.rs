//! Snapshot diff between a fresh extraction and the stored schedule.

mod change_event;
mod change_kind;
mod schedule_diff;

pub use change_event::{ChangeEvent, ScheduleSnapshot, Severity};
pub use change_kind::ChangeKind;
pub use schedule_diff::diff_schedule;
