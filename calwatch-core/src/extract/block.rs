//! Decoding of a calendar entry's block slot.

use serde_json::Value;

use crate::accessor::{any_text, field, listed_or_single_text, resolve_entries};
use crate::constants::{DEFAULT_MAX_DEPTH, DISABLED_STYLE_MARKER, UNKNOWN_DISPLAY_TIME};
use crate::locate::{locate, locate_matching};

const LABEL_KEY: &str = "label";
const STYLE_KEY: &str = "style";

/// Display label and tentativeness read from one block slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBlock {
    pub display_time: String,
    pub is_tentative: bool,
}

impl Default for DecodedBlock {
    fn default() -> Self {
        DecodedBlock {
            display_time: UNKNOWN_DISPLAY_TIME.to_string(),
            is_tentative: false,
        }
    }
}

/// Decode a block slot.
///
/// Only the first entry of the slot is read. The documented label/style
/// locations are tried first. A recursive search over the whole slot runs
/// for the label when none was found. When the slot is not yet marked
/// tentative, the search looks for any `style` in the slot that says
/// disabled.
pub fn decode_block(slot: Option<&Value>) -> DecodedBlock {
    let Some(slot) = slot.filter(|s| !is_empty(s)) else {
        return DecodedBlock::default();
    };

    let entry = resolve_entries(slot).first();

    let mut label = entry
        .and_then(|e| field(e, LABEL_KEY))
        .and_then(listed_or_single_text);
    let mut is_tentative = entry
        .and_then(|e| field(e, STYLE_KEY))
        .and_then(listed_or_single_text)
        .is_some_and(is_disabled_style);

    if label.is_none() {
        label = locate(slot, LABEL_KEY, DEFAULT_MAX_DEPTH).and_then(any_text);
    }
    if !is_tentative {
        is_tentative = locate_matching(slot, STYLE_KEY, DEFAULT_MAX_DEPTH, |style| {
            any_text(style).is_some_and(is_disabled_style)
        })
        .is_some();
    }

    DecodedBlock {
        display_time: label.unwrap_or(UNKNOWN_DISPLAY_TIME).to_string(),
        is_tentative,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn is_disabled_style(style: &str) -> bool {
    style.to_ascii_lowercase().contains(DISABLED_STYLE_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_slot_returns_defaults() {
        assert_eq!(decode_block(None), DecodedBlock::default());
        assert_eq!(decode_block(Some(&json!(null))), DecodedBlock::default());
        assert_eq!(decode_block(Some(&json!({}))), DecodedBlock::default());
        assert_eq!(decode_block(Some(&json!([]))), DecodedBlock::default());
    }

    #[test]
    fn test_listed_label_and_style_on_entry() {
        let slot = json!({
            "entries": [{
                "label": { "values": ["8:00 PM", "9:00 PM"] },
                "style": { "values": ["Style-Disabled"] }
            }]
        });
        let block = decode_block(Some(&slot));
        assert_eq!(block.display_time, "8:00 PM");
        assert!(block.is_tentative);
    }

    #[test]
    fn test_singular_label_under_fields_wrapper() {
        let slot = json!({
            "entry": {
                "fields": {
                    "label": { "value": "7:30 PM" },
                    "style": { "value": "primary" }
                }
            }
        });
        let block = decode_block(Some(&slot));
        assert_eq!(block.display_time, "7:30 PM");
        assert!(!block.is_tentative);
    }

    #[test]
    fn test_only_first_entry_is_read() {
        let slot = json!({
            "entries": [
                { "label": { "value": "first" } },
                { "label": { "value": "second" }, "style": { "value": "disabled" } }
            ]
        });
        let block = decode_block(Some(&slot));
        assert_eq!(block.display_time, "first");
        // style fallback searches the whole slot and finds the second entry's style
        assert!(block.is_tentative);
    }

    #[test]
    fn test_deep_label_found_by_fallback_search() {
        let slot = json!({
            "entries": [{
                "content": {
                    "presentation": { "label": "Matinee 2:00 PM" }
                }
            }]
        });
        let block = decode_block(Some(&slot));
        assert_eq!(block.display_time, "Matinee 2:00 PM");
        assert!(!block.is_tentative);
    }

    #[test]
    fn test_fast_path_label_wins_over_deeper_match() {
        let slot = json!({
            "entries": [{
                "nested": { "label": "deep" },
                "fields": { "label": { "values": ["fast"] } }
            }]
        });
        assert_eq!(decode_block(Some(&slot)).display_time, "fast");
    }

    #[test]
    fn test_fallback_when_slot_has_no_entry_list() {
        let slot = json!({ "wrapper": { "label": { "value": "6:00 PM" }, "style": "DISABLED" } });
        let block = decode_block(Some(&slot));
        assert_eq!(block.display_time, "6:00 PM");
        assert!(block.is_tentative);
    }

    #[test]
    fn test_enabled_fast_path_style_still_searches_for_disabled() {
        let slot = json!({
            "entries": [{
                "label": { "value": "8:00 PM" },
                "style": { "value": "primary" }
            }],
            "overlay": { "style": "btn--disabled" }
        });
        let block = decode_block(Some(&slot));
        assert_eq!(block.display_time, "8:00 PM");
        assert!(block.is_tentative);
    }

    #[test]
    fn test_disabled_style_nested_beside_enabled_fast_path_style() {
        let slot = json!({
            "entries": [{
                "label": { "value": "8:00 PM" },
                "style": { "value": "primary" },
                "extra": { "style": "disabled" }
            }]
        });
        assert!(decode_block(Some(&slot)).is_tentative);
    }

    #[test]
    fn test_enabled_styles_everywhere_stay_scheduled() {
        let slot = json!({
            "entries": [{
                "label": { "value": "8:00 PM" },
                "style": { "value": "primary" },
                "extra": { "style": "secondary" }
            }]
        });
        assert!(!decode_block(Some(&slot)).is_tentative);
    }

    #[test]
    fn test_unreadable_label_defaults_to_unknown() {
        let slot = json!({ "entries": [{ "label": { "values": [] } }] });
        assert_eq!(decode_block(Some(&slot)).display_time, UNKNOWN_DISPLAY_TIME);
    }
}
