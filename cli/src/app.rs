//! Application context: unified state passed to every command handler.
//!
//! `AppContext` bundles the output context, the machine state store and the
//! interaction flags. The vRA connection is opened lazily by the commands
//! that need one, so `status` and `version` work without credentials.

use anyhow::Result;

use crate::domain::{ConnectionConfig, MachineConfig, PollPolicy};
use crate::infra::client::VraClient;
use crate::infra::config::connection_from_env;
use crate::infra::state::StateManager;
use crate::output::{HumanRenderer, OutputContext};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
    /// Skip interactive prompts.
    pub yes: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Per-machine state store.
    pub state_mgr: StateManager,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` is passed, or when the `CI` or `VRA7_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the state directory cannot be determined.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var_os("CI").is_some() || std::env::var_os("VRA7_YES").is_some();
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Ok(Self {
            // JSON output owns stdout; progress lines would corrupt it.
            output: OutputContext::new(flags.no_color, flags.quiet || flags.json),
            mode,
            state_mgr: StateManager::new()?,
            non_interactive: flags.yes || ci_env,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    #[must_use]
    pub fn human(&self) -> HumanRenderer<'_> {
        HumanRenderer::new(&self.output)
    }

    /// Read the connection settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required `VRA7_*` variable is missing.
    pub fn connection(&self) -> Result<ConnectionConfig> {
        connection_from_env()
    }

    /// Authenticate and return a gateway client.
    ///
    /// # Errors
    ///
    /// Returns an error if settings are missing or authentication fails.
    pub async fn gateway(&self, connection: &ConnectionConfig) -> Result<VraClient> {
        VraClient::connect(connection).await
    }

    /// Poll policy for a machine: interval from the connection, timeout from
    /// the definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the poll interval is zero.
    pub fn poll_policy(
        &self,
        connection: &ConnectionConfig,
        machine: &MachineConfig,
    ) -> Result<PollPolicy> {
        PollPolicy::new(connection.poll_interval_secs, machine.wait_timeout)
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true`, returns `default` without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
