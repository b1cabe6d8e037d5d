//! Schedule extraction from CMS page exports.

mod block;
mod calendar;
mod closure;

pub use block::{DecodedBlock, decode_block};
pub use calendar::{expand_calendar, extract_schedule, find_calendar_root};
pub use closure::is_temporarily_closed;
