//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::domain::MachineState;
use crate::output::OutputContext;

/// Renders machine state as human-readable terminal output.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version.
    pub fn render_version(&self, version: &str) {
        if !self.ctx.quiet {
            println!("vra7 {version}");
        }
    }

    /// Render what is known about one machine.
    pub fn render_status(&self, state: &MachineState) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.header(&state.name);
        let label = state.phase_label();
        self.ctx.kv(
            "Phase:",
            &label.style(self.ctx.styles.phase(label)).to_string(),
        );
        self.ctx
            .kv("Request:", state.request_id.as_deref().unwrap_or("(none)"));
        if let Some(catalog) = state.catalog_name.as_deref().or(state.catalog_id.as_deref()) {
            self.ctx.kv("Catalog:", catalog);
        }
        if let Some(message) = &state.failed_message {
            self.ctx.kv("Failure:", message);
        }
        self.ctx.kv(
            "Updated:",
            &state.updated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );
    }
}
