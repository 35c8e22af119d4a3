//! Machine creation: resolve the catalog item, merge the blueprint, submit
//! the request and poll it until it settles or the timeout runs out.

use anyhow::{Context, Result};

use crate::application::ports::{
    CatalogGateway, CatalogReader, Pause, ProgressReporter, RequestTracker,
};
use crate::domain::{
    MachineConfig, MachineState, PollPolicy, ProvisionError, ProvisionRequest, apply_overrides,
    inject_catalog_configuration,
};
use vra_common::RequestPhase;

/// Resolve the catalog item to provision, returning `(id, name)`.
///
/// A configured name wins and is looked up to find the id; otherwise the
/// configured id is looked up to recover the name for display.
///
/// # Errors
///
/// Returns [`ProvisionError::MissingCatalog`] if neither is configured,
/// [`ProvisionError::CatalogNotFound`] if the lookup yields nothing, or the
/// gateway error if the lookup itself fails.
pub async fn resolve_catalog(
    catalog: &impl CatalogReader,
    config: &MachineConfig,
) -> Result<(String, Option<String>)> {
    if let Some(name) = config.catalog_name() {
        let id = catalog
            .lookup_catalog_id(name)
            .await
            .with_context(|| format!("looking up catalog item '{name}'"))?
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProvisionError::CatalogNotFound {
                lookup: format!("name '{name}'"),
            })?;
        tracing::debug!(catalog_name = name, catalog_id = %id, "catalog item resolved");
        return Ok((id, Some(name.to_string())));
    }

    let id = config.catalog_id().ok_or(ProvisionError::MissingCatalog)?;
    let name = catalog
        .lookup_catalog_name(id)
        .await
        .with_context(|| format!("looking up catalog item {id}"))?
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ProvisionError::CatalogNotFound {
            lookup: format!("id '{id}'"),
        })?;
    Ok((id.to_string(), Some(name)))
}

/// Provision the machine described by `state.config`.
///
/// On return `state` reflects everything observed, whether or not the call
/// succeeded: the request id stays set on timeout (the request may still
/// complete) and is cleared when the backend reports `FAILED`.
///
/// # Errors
///
/// Returns a [`ProvisionError`] for logical failures and the gateway error,
/// with context, for transport failures.
pub async fn create(
    gateway: &impl CatalogGateway,
    pause: &impl Pause,
    reporter: &impl ProgressReporter,
    policy: PollPolicy,
    state: &mut MachineState,
) -> Result<()> {
    let config = state.config.clone();
    config.validate()?;

    let (catalog_id, catalog_name) = resolve_catalog(gateway, &config).await?;
    state.catalog_id = Some(catalog_id.clone());
    state.catalog_name = catalog_name;

    let mut template = gateway
        .fetch_blueprint(&catalog_id)
        .await
        .with_context(|| format!("invalid catalog item id {catalog_id}"))?;
    inject_catalog_configuration(&mut template, &config.catalog_configuration);
    let template = apply_overrides(
        template,
        config.resource_configuration,
        &config.deployment_configuration,
    );
    tracing::debug!(template = ?template, "merged request template");

    let request = ProvisionRequest::new(catalog_id, template)?;
    reporter.step("submitting machine request...");
    let request_id = gateway
        .submit_request(&request)
        .await
        .context("machine request failed")?;
    tracing::info!(machine = %state.name, request_id = %request_id, "request submitted");
    state.record_submission(request_id);
    reporter.success("machine request submitted");

    wait_for_completion(gateway, pause, reporter, policy, state).await
}

/// Poll the recorded request until it reaches a terminal phase.
///
/// Checks `policy.attempts()` times, pausing `policy.interval` before each
/// check. A failed status fetch ends the loop and is returned as-is.
///
/// # Errors
///
/// Returns [`ProvisionError::ProvisioningFailed`] when the request fails and
/// [`ProvisionError::ProvisioningTimedOut`] when it is still pending after
/// the last check.
pub async fn wait_for_completion(
    tracker: &impl RequestTracker,
    pause: &impl Pause,
    reporter: &impl ProgressReporter,
    policy: PollPolicy,
    state: &mut MachineState,
) -> Result<()> {
    let request_id = state
        .request_id
        .clone()
        .ok_or(ProvisionError::ResourceNotFound)?;
    let attempts = policy.attempts();
    reporter.step("waiting for the request to complete...");

    for attempt in 1..=attempts {
        pause.pause(policy.interval).await;
        let phase = super::status::read(tracker, state).await?;
        tracing::debug!(request_id = %request_id, attempt, attempts, %phase, "request polled");

        match phase {
            RequestPhase::Successful => {
                reporter.success("machine provisioned");
                return Ok(());
            }
            RequestPhase::Failed => {
                state.clear_request();
                let details = state
                    .failed_message
                    .clone()
                    .unwrap_or_else(|| "no completion details reported".to_string());
                return Err(ProvisionError::ProvisioningFailed { details }.into());
            }
            _ => {}
        }
    }

    reporter.warn("timed out waiting for the request; it may still complete");
    Err(ProvisionError::ProvisioningTimedOut { request_id }.into())
}
