//! Blueprint document model.
//!
//! A catalog item's request template carries its machine layout under
//! `data` as an arbitrarily nested JSON object. `FieldValue` gives that tree
//! a shape: every JSON object becomes a `Container`, everything else is a
//! `Scalar`. Objects nested inside arrays stay scalar.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping of field name to value. Keeps the backend's field order.
pub type FieldMap = IndexMap<String, FieldValue>;

/// A single blueprint field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A nested component, e.g. `vSphere_Machine_1`.
    Container(FieldMap),
    /// Any non-object JSON value.
    Scalar(serde_json::Value),
}

impl FieldValue {
    /// Build a string scalar.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Scalar(serde_json::Value::String(value.into()))
    }

    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container(_))
    }

    #[must_use]
    pub fn as_container(&self) -> Option<&FieldMap> {
        match self {
            Self::Container(map) => Some(map),
            Self::Scalar(_) => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut FieldMap> {
        match self {
            Self::Container(map) => Some(map),
            Self::Scalar(_) => None,
        }
    }

    /// Render the value as plain text.
    ///
    /// Strings come back unquoted; everything else is rendered as JSON.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Scalar(serde_json::Value::String(s)) => s.clone(),
            other => serde_json::Value::from(other.clone()).to_string(),
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self::Container(
                map.into_iter()
                    .map(|(k, v)| (k, FieldValue::from(v)))
                    .collect(),
            ),
            other => Self::Scalar(other),
        }
    }
}

impl From<FieldValue> for serde_json::Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Scalar(v) => v,
            FieldValue::Container(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}
