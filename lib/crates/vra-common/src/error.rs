//! Structured error payload returned by the vRA REST API.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `{"errors": [{"code": ..., "message": ..., "systemMessage": ...}]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("vRealize API: {}", describe(.errors))]
pub struct ApiError {
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorEntry {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub system_message: Option<String>,
}

impl ApiError {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Parse an error body, returning `None` unless it carries at least one entry.
    #[must_use]
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|e| !e.is_empty())
    }
}

fn describe(errors: &[ApiErrorEntry]) -> String {
    let mut out = String::new();
    for (i, entry) in errors.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        let _ = write!(out, "[{}] {}", entry.code, entry.message);
        if let Some(system) = entry.system_message.as_deref().filter(|s| !s.is_empty()) {
            let _ = write!(out, " ({system})");
        }
    }
    out
}
