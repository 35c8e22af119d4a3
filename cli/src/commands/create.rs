//! `vra7 create -f <machine.yaml>`: request a machine and wait for it.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::MachineStateStore as _;
use crate::application::services::machine;
use crate::domain::{MachineState, ProvisionError};
use crate::infra::config::load_machine_config;
use crate::infra::pause::TokioPause;
use crate::output::{TerminalReporter, json, progress};

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Machine definition file (YAML)
    #[arg(short, long = "file", value_name = "FILE")]
    pub file: PathBuf,
}

/// Run `vra7 create`.
///
/// The machine state is saved whatever the outcome, so a timed-out request
/// can be followed up with `vra7 status`.
///
/// # Errors
///
/// Returns an error if the definition is invalid, the machine is already
/// tracked, or provisioning fails.
pub async fn run(args: &CreateArgs, app: &AppContext) -> Result<ExitCode> {
    let config = load_machine_config(&args.file)?;
    if let Some(existing) = app.state_mgr.load_async(&config.name).await?
        && let Some(request_id) = &existing.request_id
    {
        bail!(
            "machine '{}' is already tracked (request {request_id}, phase {}); run `vra7 status {}` or delete it first",
            existing.name,
            existing.phase_label(),
            existing.name,
        );
    }

    let connection = app.connection()?;
    let policy = app.poll_policy(&connection, &config)?;
    let gateway = app.gateway(&connection).await?;
    let mut state = MachineState::new(config);

    let mut reporter = TerminalReporter::new(&app.output);
    if app.output.show_progress() {
        reporter = reporter.with_spinner(progress::spinner("resolving catalog item..."));
    }

    let result = machine::create(&gateway, &TokioPause, &reporter, policy, &mut state).await;
    app.state_mgr.save_async(&state).await?;

    if let Some(pb) = reporter.spinner() {
        match &result {
            Ok(()) => progress::finish_ok(pb, &format!("machine '{}' is ready", state.name)),
            Err(_) => progress::finish_error(pb, &format!("machine '{}' was not created", state.name)),
        }
    }

    if let Err(e) = result {
        if matches!(
            e.downcast_ref::<ProvisionError>(),
            Some(ProvisionError::ProvisioningTimedOut { .. })
        ) {
            app.output
                .info(&format!("Check again later: vra7 status {}", state.name));
        }
        return Err(e);
    }

    if app.is_json() {
        println!("{}", json::format_status(&state)?);
    } else {
        app.output.success(&format!(
            "machine '{}' created (request {})",
            state.name,
            state.request_id.as_deref().unwrap_or("?")
        ));
    }
    Ok(ExitCode::SUCCESS)
}
