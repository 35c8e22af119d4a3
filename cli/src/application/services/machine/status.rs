//! Machine read: refresh the recorded request's phase from the backend.

use anyhow::{Context, Result};
use vra_common::RequestPhase;

use crate::application::ports::RequestTracker;
use crate::domain::{MachineState, ProvisionError};

/// Fetch the status of the recorded request and store what was observed.
///
/// # Errors
///
/// Returns [`ProvisionError::ResourceNotFound`] if no request is recorded,
/// or the gateway error, with context, if the status cannot be fetched.
pub async fn read(tracker: &impl RequestTracker, state: &mut MachineState) -> Result<RequestPhase> {
    let request_id = state
        .request_id
        .clone()
        .ok_or(ProvisionError::ResourceNotFound)?;
    let status = tracker
        .fetch_request_status(&request_id)
        .await
        .with_context(|| format!("request {request_id} status failed to load"))?;

    if state.phase.as_ref() != Some(&status.phase) {
        tracing::info!(
            machine = %state.name,
            request_id = %request_id,
            phase = %status.phase,
            "request phase changed"
        );
    }
    let phase = status.phase.clone();
    state.observe(status.phase, status.completion_details);
    Ok(phase)
}
