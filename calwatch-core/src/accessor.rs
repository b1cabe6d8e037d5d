//! Candidate accessors for fields the CMS has encoded several ways.
//!
//! An "entry list" has shipped as a plain list, as a single embedded entry,
//! and as a list of linked references. Every caller resolves it through
//! [`resolve_entries`] so the preference order lives in one place.

use serde_json::Value;

use crate::constants::FIELDS_KEY;

/// How the value under an accessor key is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// An array of entries.
    List,
    /// One entry object.
    Single,
    /// An array of reference wrappers; each item's `target` is the entry.
    Linked,
}

#[derive(Debug, Clone, Copy)]
pub struct Accessor {
    pub key: &'static str,
    pub shape: Shape,
}

/// Entry list encodings in preference order.
pub const ENTRY_ACCESSORS: &[Accessor] = &[
    Accessor {
        key: "entries",
        shape: Shape::List,
    },
    Accessor {
        key: "entry",
        shape: Shape::Single,
    },
    Accessor {
        key: "linkedEntries",
        shape: Shape::Linked,
    },
];

const LINK_TARGET_KEY: &str = "target";

/// Outcome of resolving an entry list on a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Entries<'a> {
    Found(Vec<&'a Value>),
    /// An accessor key was present but held something of the wrong shape.
    Malformed { key: &'static str },
    Missing,
}

impl<'a> Entries<'a> {
    pub fn first(&self) -> Option<&'a Value> {
        match self {
            Entries::Found(entries) => entries.first().copied(),
            _ => None,
        }
    }

    pub fn into_vec(self) -> Vec<&'a Value> {
        match self {
            Entries::Found(entries) => entries,
            _ => Vec::new(),
        }
    }
}

/// Resolve the entry list on `node` using [`ENTRY_ACCESSORS`].
pub fn resolve_entries(node: &Value) -> Entries<'_> {
    resolve_entries_with(node, ENTRY_ACCESSORS)
}

/// Resolve an entry list, trying each accessor on the node and then under
/// its `fields` wrapper before moving on to the next accessor.
pub fn resolve_entries_with<'a>(node: &'a Value, accessors: &[Accessor]) -> Entries<'a> {
    let mut malformed = None;

    for accessor in accessors {
        for candidate in [Some(node), node.get(FIELDS_KEY)].into_iter().flatten() {
            let Some(raw) = candidate.get(accessor.key).filter(|v| !v.is_null()) else {
                continue;
            };
            match apply_shape(raw, accessor.shape) {
                Some(entries) => return Entries::Found(entries),
                None => {
                    malformed.get_or_insert(accessor.key);
                }
            }
        }
    }

    match malformed {
        Some(key) => Entries::Malformed { key },
        None => Entries::Missing,
    }
}

fn apply_shape(raw: &Value, shape: Shape) -> Option<Vec<&Value>> {
    match (shape, raw) {
        (Shape::List, Value::Array(items)) => Some(items.iter().collect()),
        (Shape::Single, Value::Object(_)) => Some(vec![raw]),
        (Shape::Linked, Value::Array(items)) => Some(
            items
                .iter()
                .map(|item| item.get(LINK_TARGET_KEY).unwrap_or(item))
                .collect(),
        ),
        _ => None,
    }
}

/// Look up `key` on `node`, falling back to `node.fields.key`.
pub fn field<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.get(key)
        .filter(|v| !v.is_null())
        .or_else(|| {
            node.get(FIELDS_KEY)
                .and_then(|fields| fields.get(key))
                .filter(|v| !v.is_null())
        })
}

/// Read a text field stored as `{"values": [..]}` (first item) or
/// `{"value": ..}`. Empty strings count as missing.
pub fn listed_or_single_text(value: &Value) -> Option<&str> {
    let listed = value
        .get("values")
        .and_then(Value::as_array)
        .and_then(|values| values.first())
        .and_then(Value::as_str);

    listed
        .or_else(|| value.get("value").and_then(Value::as_str))
        .filter(|s| !s.is_empty())
}

/// Like [`listed_or_single_text`] but also accepts a bare string.
pub fn any_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.as_str()),
        _ => listed_or_single_text(value),
    }
}
