//! `vra7 delete <name> [--yes]`: destroy a machine.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::MachineStateStore as _;
use crate::application::services::machine::{self, DeleteOutcome};
use crate::commands::load_state;

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Machine name, as given in its definition file
    pub name: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Run `vra7 delete`.
///
/// Once the backend no longer tracks the machine its state file is removed;
/// otherwise the state is saved with whatever was observed.
///
/// # Errors
///
/// Returns an error if the machine is unknown or the destroy request fails.
pub async fn run(args: &DeleteArgs, app: &AppContext) -> Result<ExitCode> {
    let mut state = load_state(app, &args.name).await?;

    if !app.confirm(&format!("Destroy machine '{}'?", state.name), false)? {
        app.output.info("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    let connection = app.connection()?;
    let gateway = app.gateway(&connection).await?;
    let result = machine::delete(&gateway, &mut state).await;

    if state.request_id.is_none() {
        app.state_mgr.remove_async(&state.name).await?;
    } else {
        app.state_mgr.save_async(&state).await?;
    }

    match result? {
        DeleteOutcome::Destroyed => {
            app.output
                .success(&format!("destroy request accepted for '{}'", state.name));
        }
        DeleteOutcome::NothingToDelete => {
            app.output.info(&format!(
                "'{}' failed to provision; nothing to destroy",
                state.name
            ));
        }
    }
    Ok(ExitCode::SUCCESS)
}
