//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator; callers recover the kind with `downcast_ref`.

use thiserror::Error;

// ── Provisioning errors ──────────────────────────────────────────────────────

/// Logical failures of the machine lifecycle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProvisionError {
    #[error("Either catalog_name or catalog_id should be present in the machine definition.")]
    MissingCatalog,

    #[error("No catalog item found with {lookup}.")]
    CatalogNotFound { lookup: String },

    #[error("Machine request failed while creating: {details}")]
    ProvisioningFailed { details: String },

    #[error(
        "Request {request_id} is still being processed.\n\n\
         Check it with 'vra7 status' before running create again."
    )]
    ProvisioningTimedOut { request_id: String },

    #[error("Machine cannot be deleted while its request is {phase}. Please try later.")]
    ResourceBusy { phase: String },

    #[error("Resource not found: no request is recorded for this machine.")]
    ResourceNotFound,

    #[error("Resource is not created or not found.")]
    ResourceNotProvisioned,

    #[error("Destroy machine operation failed: {reason}")]
    DestroyFailed { reason: String },

    #[error("Power-off machine operation failed: {reason}")]
    PowerOffFailed { reason: String },
}

impl ProvisionError {
    /// Stable identifier used in `--json` error objects.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCatalog => "MISSING_CATALOG",
            Self::CatalogNotFound { .. } => "CATALOG_NOT_FOUND",
            Self::ProvisioningFailed { .. } => "PROVISIONING_FAILED",
            Self::ProvisioningTimedOut { .. } => "PROVISIONING_TIMED_OUT",
            Self::ResourceBusy { .. } => "RESOURCE_BUSY",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::ResourceNotProvisioned => "RESOURCE_NOT_PROVISIONED",
            Self::DestroyFailed { .. } => "DESTROY_FAILED",
            Self::PowerOffFailed { .. } => "POWER_OFF_FAILED",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors in the machine definition or connection settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid machine name '{0}': must match ^[A-Za-z0-9][A-Za-z0-9_.-]{{0,62}}$")]
    InvalidName(String),

    #[error("Poll interval must be at least one second.")]
    InvalidPollInterval,

    #[error("No state recorded for machine '{0}'. Create it first: vra7 create -f <file>")]
    UnknownMachine(String),
}
