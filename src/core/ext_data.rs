//! Extension data slots on participants and groups.
//!
//! The engine never reads these. Extensions store whatever per-participant or
//! per-group state they need under their own keys, conventionally prefixed
//! with the extension name (`"bounty.reward"`).
//!
//! ## ExtValue Types
//!
//! - `Int`: counters, scores
//! - `Float`: modifiers, chances
//! - `Bool`: flags
//! - `Text`: labels
//! - `TextList`: name lists (allies, grudges)

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A single extension-owned value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ExtValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    TextList(Vec<String>),
}

impl ExtValue {
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ExtValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ExtValue::Float(v) => Some(*v),
            ExtValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ExtValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ExtValue::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            ExtValue::TextList(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for ExtValue {
    fn from(v: i64) -> Self {
        ExtValue::Int(v)
    }
}

impl From<i32> for ExtValue {
    fn from(v: i32) -> Self {
        ExtValue::Int(v as i64)
    }
}

impl From<f64> for ExtValue {
    fn from(v: f64) -> Self {
        ExtValue::Float(v)
    }
}

impl From<bool> for ExtValue {
    fn from(v: bool) -> Self {
        ExtValue::Bool(v)
    }
}

impl From<String> for ExtValue {
    fn from(v: String) -> Self {
        ExtValue::Text(v)
    }
}

impl From<&str> for ExtValue {
    fn from(v: &str) -> Self {
        ExtValue::Text(v.to_string())
    }
}

impl From<Vec<String>> for ExtValue {
    fn from(v: Vec<String>) -> Self {
        ExtValue::TextList(v)
    }
}

/// String-keyed extension slots.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtensionData {
    slots: FxHashMap<String, ExtValue>,
}

impl ExtensionData {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ExtValue> {
        self.slots.get(key)
    }

    /// Store a value, returning the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ExtValue>) -> Option<ExtValue> {
        self.slots.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<ExtValue> {
        self.slots.remove(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Integer slot with a fallback.
    #[must_use]
    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(ExtValue::as_int).unwrap_or(default)
    }

    /// Add `delta` to an integer slot (missing or non-integer counts as 0).
    pub fn add_int(&mut self, key: &str, delta: i64) -> i64 {
        let value = self.int_or(key, 0) + delta;
        self.slots.insert(key.to_string(), ExtValue::Int(value));
        value
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtValue)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v))
    }
}
