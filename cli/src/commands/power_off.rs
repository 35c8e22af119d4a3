//! `vra7 power-off <name>`: power off a machine.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::machine;
use crate::commands::{MachineArgs, load_state};

/// Run `vra7 power-off`.
///
/// # Errors
///
/// Returns an error if the machine is unknown or the action is rejected.
pub async fn run(args: &MachineArgs, app: &AppContext) -> Result<ExitCode> {
    let state = load_state(app, &args.name).await?;
    let connection = app.connection()?;
    let gateway = app.gateway(&connection).await?;

    machine::power_off(&gateway, &state).await?;
    app.output
        .success(&format!("power-off request accepted for '{}'", state.name));
    Ok(ExitCode::SUCCESS)
}
