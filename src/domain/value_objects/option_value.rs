//! Option value object - heterogeneous builder/deployer options
//!
//! Build and deploy specs carry free-form option maps whose values can be
//! strings, numbers, booleans, lists or nested maps. `OptionValue` makes the
//! shape explicit so every access site has to decide what it accepts.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered option mapping (option name → value)
pub type OptionMap = BTreeMap<String, OptionValue>;

/// A single option value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<OptionValue>),
    Map(OptionMap),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[OptionValue]> {
        match self {
            OptionValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&OptionMap> {
        match self {
            OptionValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Port-like integer view; accepts integers and numeric strings.
    pub fn as_port(&self) -> Option<u16> {
        match self {
            OptionValue::Integer(n) => u16::try_from(*n).ok(),
            OptionValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Scalar rendered as text, `None` for lists and maps.
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            OptionValue::Bool(b) => Some(b.to_string()),
            OptionValue::Integer(n) => Some(n.to_string()),
            OptionValue::Float(f) => Some(f.to_string()),
            OptionValue::String(s) => Some(s.clone()),
            OptionValue::List(_) | OptionValue::Map(_) => None,
        }
    }

    /// Non-empty string view. Empty strings count as unset.
    pub fn as_non_empty_str(&self) -> Option<&str> {
        self.as_str().filter(|s| !s.trim().is_empty())
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_scalar_string() {
            Some(s) => write!(f, "{}", s),
            None => write!(
                f,
                "{}",
                serde_json::to_string(self).map_err(|_| fmt::Error)?
            ),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Integer(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<OptionMap> for OptionValue {
    fn from(value: OptionMap) -> Self {
        OptionValue::Map(value)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(value: Vec<T>) -> Self {
        OptionValue::List(value.into_iter().map(Into::into).collect())
    }
}

/// Shallow merge: every key in `overlay` replaces the base entry wholesale.
///
/// Nested maps are not merged recursively; keys absent from the overlay keep
/// the base value.
pub fn merge_options(base: &OptionMap, overlay: Option<&OptionMap>) -> OptionMap {
    let mut merged = base.clone();
    if let Some(overlay) = overlay {
        for (key, value) in overlay {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Non-empty string option lookup.
pub fn string_option<'a>(options: &'a OptionMap, key: &str) -> Option<&'a str> {
    options.get(key).and_then(OptionValue::as_non_empty_str)
}

/// Lift one level of nested maps into the top level.
///
/// Top-level scalars win over lifted entries with the same name.
pub fn flatten_options(options: &OptionMap) -> OptionMap {
    let mut flat = OptionMap::new();
    for value in options.values() {
        if let OptionValue::Map(inner) = value {
            for (key, inner_value) in inner {
                flat.insert(key.clone(), inner_value.clone());
            }
        }
    }
    for (key, value) in options {
        if !matches!(value, OptionValue::Map(_)) {
            flat.insert(key.clone(), value.clone());
        }
    }
    flat
}
