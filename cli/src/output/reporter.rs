//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` so application services can emit progress events
//! without depending on any presentation type directly. When a spinner is
//! attached, steps update the spinner message instead of printing lines.

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    spinner: Option<ProgressBar>,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx, spinner: None }
    }

    /// Route step messages through `spinner`.
    #[must_use]
    pub fn with_spinner(mut self, spinner: ProgressBar) -> Self {
        self.spinner = Some(spinner);
        self
    }

    #[must_use]
    pub fn spinner(&self) -> Option<&ProgressBar> {
        self.spinner.as_ref()
    }

    fn emit(&self, line: String) {
        if self.ctx.quiet {
            return;
        }
        match &self.spinner {
            Some(pb) => pb.println(format!("  {line}")),
            None => println!("  {line}"),
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        match &self.spinner {
            Some(pb) => pb.set_message(message.to_string()),
            None => self.emit(format!("{} {message}", "→".style(self.ctx.styles.info))),
        }
    }

    fn success(&self, message: &str) {
        self.emit(format!("{} {message}", "✓".style(self.ctx.styles.success)));
    }

    fn warn(&self, message: &str) {
        self.emit(format!("{} {message}", "!".style(self.ctx.styles.warning)));
    }
}
