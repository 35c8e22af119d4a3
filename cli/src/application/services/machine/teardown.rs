//! Machine teardown: destroy and power-off through resource actions.

use anyhow::{Context, Result};
use vra_common::{ApiError, RequestPhase};

use crate::application::ports::ResourceActions;
use crate::domain::{MachineAction, MachineState, ProvisionError, resolve_action};

/// HTTP status the backend answers with when it accepts an action request.
const ACTION_ACCEPTED: u16 = 201;

/// What `delete` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The destroy action was accepted by the backend.
    Destroyed,
    /// The request had failed; there was nothing to destroy.
    NothingToDelete,
}

/// Result of invoking a resolved action.
enum Invocation {
    Accepted,
    Rejected(String),
}

/// Destroy the machine recorded in `state`.
///
/// Only a request last observed as `SUCCESSFUL` is destroyed. A `FAILED`
/// request is simply forgotten. The request id is cleared only once the
/// backend accepts the destroy action, so a failed attempt can be retried.
///
/// # Errors
///
/// Returns [`ProvisionError::ResourceNotFound`] if no request is recorded,
/// [`ProvisionError::ResourceBusy`] if the request has not settled,
/// [`ProvisionError::ResourceNotProvisioned`] if no destroy action is
/// offered, [`ProvisionError::DestroyFailed`] if the backend rejects it, or
/// the gateway error, with context, for transport failures.
pub async fn delete(actions: &impl ResourceActions, state: &mut MachineState) -> Result<DeleteOutcome> {
    let request_id = state
        .request_id
        .clone()
        .ok_or(ProvisionError::ResourceNotFound)?;

    match state.phase {
        Some(RequestPhase::Successful) => {}
        Some(RequestPhase::Failed) => {
            tracing::info!(machine = %state.name, "request failed earlier, nothing to delete");
            state.clear_request();
            return Ok(DeleteOutcome::NothingToDelete);
        }
        _ => {
            return Err(ProvisionError::ResourceBusy {
                phase: state.phase_label().to_string(),
            }
            .into());
        }
    }

    match invoke(actions, &request_id, MachineAction::Destroy).await? {
        Invocation::Accepted => {
            tracing::info!(machine = %state.name, request_id = %request_id, "destroy accepted");
            state.clear_request();
            Ok(DeleteOutcome::Destroyed)
        }
        Invocation::Rejected(reason) => Err(ProvisionError::DestroyFailed { reason }.into()),
    }
}

/// Power off the machine recorded in `state`.
///
/// Independent of the create/delete lifecycle: the recorded phase and
/// request id are left untouched.
///
/// # Errors
///
/// Returns [`ProvisionError::ResourceNotFound`] if no request is recorded,
/// [`ProvisionError::ResourceNotProvisioned`] if no power-off action is
/// offered, [`ProvisionError::PowerOffFailed`] if the backend rejects it, or
/// the gateway error, with context, for transport failures.
pub async fn power_off(actions: &impl ResourceActions, state: &MachineState) -> Result<()> {
    let request_id = state
        .request_id
        .as_deref()
        .ok_or(ProvisionError::ResourceNotFound)?;

    match invoke(actions, request_id, MachineAction::PowerOff).await? {
        Invocation::Accepted => Ok(()),
        Invocation::Rejected(reason) => Err(ProvisionError::PowerOffFailed { reason }.into()),
    }
}

/// Resolve `action` on the request's resources, fetch its template and
/// invoke it.
async fn invoke(
    actions: &impl ResourceActions,
    request_id: &str,
    action: MachineAction,
) -> Result<Invocation> {
    let label = action.label();
    let view = actions
        .fetch_resource_view(request_id)
        .await
        .context("resource view failed to load")?;

    let resolved =
        resolve_action(&view, action.rel()).ok_or(ProvisionError::ResourceNotProvisioned)?;
    tracing::debug!(action = label, url = %resolved.url, "action resolved");

    let template = actions
        .fetch_action_template(&resolved.resource_id, &resolved.action_id)
        .await
        .with_context(|| format!("{label} action template failed to load"))?;

    match actions.invoke_action(&resolved.url, &template).await {
        Ok(ACTION_ACCEPTED) => Ok(Invocation::Accepted),
        Ok(status) => Ok(Invocation::Rejected(format!(
            "unexpected HTTP status {status}"
        ))),
        Err(err) => match err.downcast_ref::<ApiError>() {
            Some(api) => Ok(Invocation::Rejected(api.to_string())),
            None => Err(err.context(format!("{label} request failed"))),
        },
    }
}
