//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and the shared wire types,
//! never from `crate::infra`, `crate::commands`, or `crate::output`.

use std::time::Duration;

use anyhow::Result;
use vra_common::{ActionTemplate, RequestTemplate, ResourceViews};

use crate::domain::{MachineState, ProvisionRequest, RequestStatus};

// ── Gateway Port Traits ───────────────────────────────────────────────────────

/// Catalog lookups and blueprint retrieval.
#[allow(async_fn_in_trait)]
pub trait CatalogReader {
    /// Find the id of the entitled catalog item called `name`.
    async fn lookup_catalog_id(&self, name: &str) -> Result<Option<String>>;
    /// Find the name of the entitled catalog item `id`.
    async fn lookup_catalog_name(&self, id: &str) -> Result<Option<String>>;
    /// Fetch the default request template of a catalog item.
    async fn fetch_blueprint(&self, catalog_item_id: &str) -> Result<RequestTemplate>;
}

/// Request submission and status tracking.
#[allow(async_fn_in_trait)]
pub trait RequestTracker {
    /// Submit a provisioning request and return the backend request id.
    async fn submit_request(&self, request: &ProvisionRequest) -> Result<String>;
    /// Fetch the current status of a request.
    async fn fetch_request_status(&self, request_id: &str) -> Result<RequestStatus>;
}

/// Resource views and action invocation on provisioned resources.
#[allow(async_fn_in_trait)]
pub trait ResourceActions {
    /// Fetch the resources created by a request, with their actions.
    async fn fetch_resource_view(&self, request_id: &str) -> Result<ResourceViews>;
    /// Fetch the body required to invoke an action.
    async fn fetch_action_template(
        &self,
        resource_id: &str,
        action_id: &str,
    ) -> Result<ActionTemplate>;
    /// POST `template` to `url` and return the HTTP status.
    ///
    /// # Errors
    ///
    /// Returns `vra_common::ApiError` when the backend answers with a
    /// structured error payload; transport failures are returned as-is.
    async fn invoke_action(&self, url: &str, template: &ActionTemplate) -> Result<u16>;
}

/// Composite trait: any type implementing all three sub-traits is a `CatalogGateway`.
pub trait CatalogGateway: CatalogReader + RequestTracker + ResourceActions {}

/// Blanket implementation: any type implementing all three sub-traits is a `CatalogGateway`.
impl<T> CatalogGateway for T where T: CatalogReader + RequestTracker + ResourceActions {}

// ── Pause Port ────────────────────────────────────────────────────────────────

/// Suspends the poll loop between status checks.
///
/// Injected so tests can simulate elapsed time without real delays.
#[allow(async_fn_in_trait)]
pub trait Pause {
    async fn pause(&self, duration: Duration);
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── State Port ────────────────────────────────────────────────────────────────

/// Abstracts machine state persistence.
#[allow(async_fn_in_trait)]
pub trait MachineStateStore {
    /// Load the state of machine `name`, returning `None` if none exists.
    async fn load_async(&self, name: &str) -> Result<Option<MachineState>>;
    /// Persist the given machine state.
    async fn save_async(&self, state: &MachineState) -> Result<()>;
    /// Remove the state of machine `name`, if any.
    async fn remove_async(&self, name: &str) -> Result<()>;
}
