use std::fmt;

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A respondent's answer to one input block: a single string, or a list of
/// strings for multi-valued answers such as uploaded files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Single(String),
    Many(Vec<String>),
}

impl ResponseValue {
    /// Number of individual values carried.
    pub fn len(&self) -> usize {
        match self {
            ResponseValue::Single(_) => 1,
            ResponseValue::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ResponseValue::Single(value) => value.is_empty(),
            ResponseValue::Many(values) => values.is_empty(),
        }
    }
}

impl fmt::Display for ResponseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseValue::Single(value) => write!(f, "{}", value),
            ResponseValue::Many(values) => write!(f, "{}", values.join(",")),
        }
    }
}

impl From<&str> for ResponseValue {
    fn from(value: &str) -> Self {
        ResponseValue::Single(value.to_string())
    }
}

impl From<String> for ResponseValue {
    fn from(value: String) -> Self {
        ResponseValue::Single(value)
    }
}

impl From<Vec<String>> for ResponseValue {
    fn from(values: Vec<String>) -> Self {
        ResponseValue::Many(values)
    }
}

/// A value held in the navigator's variable map.
///
/// Untagged on the wire, so snapshots round-trip the plain JSON shapes the
/// flow front ends store (`"x"`, `5`, `true`, `["a","b"]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Text(String),
    Number(f64),
    Bool(bool),
    List(Vec<String>),
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::Text(value) => write!(f, "{}", value),
            VariableValue::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            VariableValue::Bool(b) => write!(f, "{}", b),
            VariableValue::List(values) => write!(f, "{}", values.join(",")),
        }
    }
}

impl From<ResponseValue> for VariableValue {
    fn from(value: ResponseValue) -> Self {
        match value {
            ResponseValue::Single(value) => VariableValue::Text(value),
            ResponseValue::Many(values) => VariableValue::List(values),
        }
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        VariableValue::Text(value.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        VariableValue::Text(value)
    }
}

impl From<f64> for VariableValue {
    fn from(value: f64) -> Self {
        VariableValue::Number(value)
    }
}

impl From<bool> for VariableValue {
    fn from(value: bool) -> Self {
        VariableValue::Bool(value)
    }
}

/// The live variable map.
///
/// Keyed by BOTH variable id and resolved variable name; the two keys are
/// always written together (see `Navigator::write_variable`).
pub type VariableMap = AHashMap<String, VariableValue>;

/// One recorded answer, appended in traversal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub block_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_id: Option<String>,
    pub value: ResponseValue,
    pub timestamp: DateTime<Utc>,
}
