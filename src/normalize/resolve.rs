//! Candidate-path resolution and value coercion
//!
//! Each canonical field owns an ordered list of candidates: a dotted path
//! into the raw JSON record plus a transform. The first candidate that
//! yields a usable value wins. Path segments that parse as integers index
//! into arrays (`birthLocation.coordinates.0`).

use crate::record::{StrengthMap, SwitchPoint};
use serde_json::Value;
use std::collections::BTreeMap;

/// How a value found at a candidate path is turned into the field's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Use the value as found
    AsIs,
    /// An array contributes its first element; scalars pass through
    First,
    /// An object contributes its `position` member; scalars pass through
    Position,
}

/// One place a canonical field may be found in a raw record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: String,
    pub transform: Transform,
}

impl Candidate {
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            transform: Transform::AsIs,
        }
    }

    pub fn with(path: impl Into<String>, transform: Transform) -> Self {
        Self {
            path: path.into(),
            transform,
        }
    }

    /// Look up this candidate in `root` and apply its transform.
    ///
    /// `null` counts as absent.
    pub fn extract<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let found = lookup(root, &self.path)?;
        let value = match self.transform {
            Transform::AsIs => found,
            Transform::First => match found {
                Value::Array(items) => items.first()?,
                other => other,
            },
            Transform::Position => match found {
                Value::Object(map) => map.get("position")?,
                other => other,
            },
        };
        if value.is_null() {
            None
        } else {
            Some(value)
        }
    }
}

/// Shorthand for a list of plain candidates.
pub fn paths(candidates: &[&str]) -> Vec<Candidate> {
    candidates.iter().map(|p| Candidate::at(*p)).collect()
}

/// Navigate a dotted path through objects and arrays.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// First candidate whose extracted value `convert` accepts.
pub fn resolve_with<T>(
    root: &Value,
    candidates: &[Candidate],
    convert: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    candidates
        .iter()
        .filter_map(|c| c.extract(root))
        .find_map(convert)
}

/// Non-empty trimmed text. Numbers and booleans are rendered as text.
pub fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Finite number, parsing numeric strings.
pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if n.is_finite() {
        Some(n)
    } else {
        None
    }
}

/// Truncate to at most `max_chars` characters, never splitting a code point.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].trim_end().to_string(),
        None => text.to_string(),
    }
}

/// Array of text items; non-text items are skipped.
pub fn as_text_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(items.iter().filter_map(as_text).collect()),
        _ => None,
    }
}

/// Object of numeric scores. Non-numeric scores become 0.
pub fn as_score_map(value: &Value) -> Option<StrengthMap> {
    let map = value.as_object()?;
    Some(
        map.iter()
            .map(|(key, v)| (key.clone(), as_number(v).unwrap_or(0.0)))
            .collect(),
    )
}

/// Object of text values; non-text values are skipped.
pub fn as_text_map(value: &Value) -> Option<BTreeMap<String, String>> {
    let map = value.as_object()?;
    Some(
        map.iter()
            .filter_map(|(key, v)| as_text(v).map(|t| (key.clone(), t)))
            .collect(),
    )
}

/// Array of switch-point objects in either field-naming convention.
pub fn as_switch_points(value: &Value) -> Option<Vec<SwitchPoint>> {
    let items = value.as_array()?;
    let text = |item: &Value, key: &str| item.get(key).and_then(as_text).unwrap_or_default();
    Some(
        items
            .iter()
            .filter(|item| item.is_object())
            .map(|item| SwitchPoint {
                question: text(item, "question"),
                position: text(item, "position"),
                argument: text(item, "argument"),
                domain_cascades: item
                    .get("domainCascades")
                    .or_else(|| item.get("domain_cascades"))
                    .and_then(as_text_map)
                    .unwrap_or_default(),
            })
            .collect(),
    )
}
