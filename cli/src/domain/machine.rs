//! Machine definition and persisted machine state.
//!
//! Pure types and validation. No I/O, no async.

use std::sync::LazyLock;

use anyhow::Result;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use vra_common::{FieldValue, RequestPhase};

use crate::domain::error::ConfigError;

/// Machine names double as state file names; keep them path-safe.
pub static MACHINE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern and cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]{0,62}$").expect("valid regex")
});

/// Default `wait_timeout`, in minutes.
pub const DEFAULT_WAIT_TIMEOUT_MINUTES: u64 = 15;

// ── Machine definition ───────────────────────────────────────────────────────

/// Declarative machine definition, read from a YAML file.
///
/// ```yaml
/// name: web-01
/// catalog_name: CentOS 7
/// wait_timeout: 20
/// resource_configuration:
///   vSphere_Machine_1.cpu: 2
/// deployment_configuration:
///   description: web tier
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Local name of the managed machine.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    /// Minutes to wait for the request to settle.
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout: u64,
    /// `"<container>.<field>"` overrides applied inside the blueprint.
    #[serde(default)]
    pub resource_configuration: IndexMap<String, FieldValue>,
    /// Request-level fields; only `description` and `reasons` are honoured.
    #[serde(default)]
    pub deployment_configuration: IndexMap<String, FieldValue>,
    /// Raw fields written to the top of the blueprint data.
    #[serde(default)]
    pub catalog_configuration: IndexMap<String, FieldValue>,
}

fn default_wait_timeout() -> u64 {
    DEFAULT_WAIT_TIMEOUT_MINUTES
}

impl MachineConfig {
    /// Catalog name, treating an empty string as absent.
    #[must_use]
    pub fn catalog_name(&self) -> Option<&str> {
        self.catalog_name.as_deref().filter(|s| !s.is_empty())
    }

    /// Catalog id, treating an empty string as absent.
    #[must_use]
    pub fn catalog_id(&self) -> Option<&str> {
        self.catalog_id.as_deref().filter(|s| !s.is_empty())
    }

    /// Validate the definition before any backend call.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not path-safe or no catalog is named.
    pub fn validate(&self) -> Result<()> {
        validate_machine_name(&self.name)?;
        if self.catalog_name().is_none() && self.catalog_id().is_none() {
            return Err(crate::domain::error::ProvisionError::MissingCatalog.into());
        }
        Ok(())
    }
}

/// Validates a machine name.
///
/// # Errors
///
/// Returns an error if the name does not match [`MACHINE_NAME_RE`].
pub fn validate_machine_name(name: &str) -> Result<()> {
    if !MACHINE_NAME_RE.is_match(name) {
        return Err(ConfigError::InvalidName(name.to_string()).into());
    }
    Ok(())
}

// ── Machine state ────────────────────────────────────────────────────────────

/// What is remembered about one managed machine between invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineState {
    pub name: String,
    /// Catalog request id; `None` once the machine is gone or never existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Last phase observed from the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<RequestPhase>,
    /// Completion details of a failed request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_name: Option<String>,
    /// The definition the machine was created from.
    pub config: MachineConfig,
    pub updated_at: DateTime<Utc>,
}

impl MachineState {
    /// Fresh state for a definition that has not been submitted yet.
    #[must_use]
    pub fn new(config: MachineConfig) -> Self {
        Self {
            name: config.name.clone(),
            request_id: None,
            phase: None,
            failed_message: None,
            catalog_id: config.catalog_id().map(str::to_string),
            catalog_name: config.catalog_name().map(str::to_string),
            config,
            updated_at: Utc::now(),
        }
    }

    /// Record a freshly submitted request.
    pub fn record_submission(&mut self, request_id: String) {
        self.request_id = Some(request_id);
        self.phase = Some(RequestPhase::Submitted);
        self.failed_message = None;
        self.touch();
    }

    /// Record an observed phase; failure details are kept only for `FAILED`.
    pub fn observe(&mut self, phase: RequestPhase, completion_details: Option<String>) {
        if phase == RequestPhase::Failed {
            self.failed_message = completion_details;
        }
        self.phase = Some(phase);
        self.touch();
    }

    /// Forget the request id so the machine is no longer tracked as created.
    pub fn clear_request(&mut self) {
        self.request_id = None;
        self.touch();
    }

    #[must_use]
    pub fn phase_label(&self) -> &str {
        self.phase.as_ref().map_or("UNKNOWN", RequestPhase::as_str)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
