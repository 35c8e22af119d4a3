//! Command implementations

pub mod create;
pub mod delete;
pub mod power_off;
pub mod status;
pub mod version;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::MachineStateStore as _;
use crate::domain::{ConfigError, MachineState};

/// Arguments shared by commands that act on one known machine.
#[derive(Args)]
pub struct MachineArgs {
    /// Machine name, as given in its definition file
    pub name: String,
}

/// Load the persisted state of `name`.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownMachine`] if nothing is recorded for it.
pub async fn load_state(app: &AppContext, name: &str) -> Result<MachineState> {
    app.state_mgr
        .load_async(name)
        .await?
        .ok_or_else(|| ConfigError::UnknownMachine(name.to_string()).into())
}
