//! JSON output helpers.
//!
//! Every `--json` code path prints one pretty-printed object on stdout:
//! either the command result or the error object built here.

use anyhow::{Context, Result};
use vra_common::ApiError;

use crate::domain::{ConfigError, MachineState, ProvisionError};

/// Format a JSON error object.
///
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Stable machine-readable code for an error, derived from its kind.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<ProvisionError>() {
        return e.code();
    }
    if let Some(e) = err.downcast_ref::<ConfigError>() {
        return match e {
            ConfigError::UnknownMachine(_) => "UNKNOWN_MACHINE",
            _ => "INVALID_CONFIG",
        };
    }
    if err.downcast_ref::<ApiError>().is_some() {
        return "API_ERROR";
    }
    "ERROR"
}

/// Format the status document of one machine.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_status(state: &MachineState) -> Result<String> {
    let obj = serde_json::json!({
        "name": state.name,
        "request_id": state.request_id,
        "phase": state.phase_label(),
        "failed_message": state.failed_message,
        "catalog_id": state.catalog_id,
        "catalog_name": state.catalog_name,
        "updated_at": state.updated_at,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
