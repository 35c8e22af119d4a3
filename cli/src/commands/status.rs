//! `vra7 status <name>`: refresh and show the request status of a machine.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::MachineStateStore as _;
use crate::application::services::machine;
use crate::commands::{MachineArgs, load_state};
use crate::domain::ProvisionError;
use crate::output::json;

/// Run `vra7 status`.
///
/// # Errors
///
/// Returns an error if the machine is unknown, has no request on record, or
/// the status cannot be fetched.
pub async fn run(args: &MachineArgs, app: &AppContext) -> Result<ExitCode> {
    let mut state = load_state(app, &args.name).await?;
    if state.request_id.is_none() {
        return Err(ProvisionError::ResourceNotFound.into());
    }

    let connection = app.connection()?;
    let gateway = app.gateway(&connection).await?;
    let result = machine::read(&gateway, &mut state).await;
    app.state_mgr.save_async(&state).await?;
    result?;

    if app.is_json() {
        println!("{}", json::format_status(&state)?);
    } else {
        app.human().render_status(&state);
    }
    Ok(ExitCode::SUCCESS)
}
