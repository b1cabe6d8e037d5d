//! Bounded-depth key search over arbitrary JSON.
//!
//! CMS exports move fields around between releases, so most lookups first try
//! the documented location and fall back to `locate` when it misses.

use serde_json::Value;

pub use crate::constants::DEFAULT_MAX_DEPTH;

/// Find the first value stored under `target_key` anywhere in `root`.
///
/// Traversal is depth-first: an object's own key is checked before its
/// children, children are visited in document order, and array items in
/// index order. The root is depth 0 and nothing deeper than `max_depth` is
/// inspected. `null` values count as absent.
pub fn locate<'a>(root: &'a Value, target_key: &str, max_depth: usize) -> Option<&'a Value> {
    locate_at(root, target_key, 0, max_depth, &|_: &Value| true)
}

/// Like [`locate`], but only values accepted by `accept` count as a match.
/// Rejected values are searched through like any other child.
pub fn locate_matching<'a>(
    root: &'a Value,
    target_key: &str,
    max_depth: usize,
    accept: impl Fn(&Value) -> bool,
) -> Option<&'a Value> {
    locate_at(root, target_key, 0, max_depth, &accept)
}

fn locate_at<'a>(
    node: &'a Value,
    target_key: &str,
    depth: usize,
    max_depth: usize,
    accept: &dyn Fn(&Value) -> bool,
) -> Option<&'a Value> {
    if depth > max_depth {
        return None;
    }

    match node {
        Value::Object(map) => {
            if let Some(found) = map
                .get(target_key)
                .filter(|v| !v.is_null() && accept(v))
            {
                return Some(found);
            }
            map.values()
                .find_map(|child| locate_at(child, target_key, depth + 1, max_depth, accept))
        }
        Value::Array(items) => items
            .iter()
            .find_map(|item| locate_at(item, target_key, depth + 1, max_depth, accept)),
        _ => None,
    }
}
