//! Detection of an explicit "temporarily closed" notice.

use serde_json::Value;

use crate::accessor::{any_text, field, resolve_entries};
use crate::constants::{CLOSURE_MARKER, DEFAULT_MAX_DEPTH};
use crate::locate::locate;

const PRESENTATIONS_KEY: &str = "componentPresentations";
const COMPONENT_KEY: &str = "component";
const FEATURE_LIST_KEY: &str = "featureList";
const DESCRIPTION_KEY: &str = "description";

/// Whether any component feature announces a temporary closure.
///
/// Looks through the component presentations' feature lists for a
/// description mentioning "temporarily closed". Any missing piece of that
/// structure reads as "not closed".
pub fn is_temporarily_closed(document: &Value) -> bool {
    let Some(presentations) =
        locate(document, PRESENTATIONS_KEY, DEFAULT_MAX_DEPTH).and_then(Value::as_array)
    else {
        return false;
    };

    presentations
        .iter()
        .flat_map(features)
        .filter_map(|feature| field(feature, DESCRIPTION_KEY).and_then(any_text))
        .any(mentions_closure)
}

fn features(presentation: &Value) -> Vec<&Value> {
    let component = presentation
        .get(COMPONENT_KEY)
        .filter(|c| !c.is_null())
        .unwrap_or(presentation);
    match field(component, FEATURE_LIST_KEY) {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(list) => resolve_entries(list).into_vec(),
        None => Vec::new(),
    }
}

fn mentions_closure(text: &str) -> bool {
    text.to_lowercase().contains(CLOSURE_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn presentation(description: Value) -> Value {
        json!({
            "component": {
                "fields": {
                    "featureList": {
                        "linkedEntries": [
                            { "target": { "fields": { "description": "Runs 90 minutes" } } },
                            { "target": { "fields": { "description": description } } }
                        ]
                    }
                }
            }
        })
    }

    #[test]
    fn test_detects_closure_case_insensitively() {
        let doc = json!({
            "componentPresentations": [
                presentation(json!("This show is TEMPORARILY CLOSED for renovation."))
            ]
        });
        assert!(is_temporarily_closed(&doc));
    }

    #[test]
    fn test_detects_closure_in_structured_description() {
        let doc = json!({
            "page": {
                "componentPresentations": [
                    { "featureList": [ { "description": { "value": "Temporarily closed" } } ] }
                ]
            }
        });
        assert!(is_temporarily_closed(&doc));
    }

    #[test]
    fn test_open_entity_is_not_closed() {
        let doc = json!({ "componentPresentations": [ presentation(json!("Open daily")) ] });
        assert!(!is_temporarily_closed(&doc));
    }

    #[test]
    fn test_missing_structure_degrades_to_not_closed() {
        assert!(!is_temporarily_closed(&json!({})));
        assert!(!is_temporarily_closed(&json!({ "componentPresentations": [] })));
        assert!(!is_temporarily_closed(&json!({ "componentPresentations": "broken" })));
        assert!(!is_temporarily_closed(&json!({
            "componentPresentations": [ { "component": null }, 42, { "component": { "fields": {} } } ]
        })));
    }

    #[test]
    fn test_null_component_reads_presentation_feature_list() {
        let doc = json!({
            "componentPresentations": [{
                "component": null,
                "featureList": [ { "description": "Temporarily closed" } ]
            }]
        });
        assert!(is_temporarily_closed(&doc));
    }

    #[test]
    fn test_closure_is_independent_of_calendar() {
        use crate::extract::extract_schedule;

        let doc = json!({
            "componentPresentations": [ presentation(json!("Temporarily closed")) ],
            "body": {
                "calendarConfig": {
                    "entries": [ { "dates": ["2026-05-01T19:00:00"] } ]
                }
            }
        });
        assert!(is_temporarily_closed(&doc));
        assert_eq!(extract_schedule(&doc).len(), 1);
    }
}
