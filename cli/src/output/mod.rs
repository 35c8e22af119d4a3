//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use human::HumanRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let mut styles = Styles::default();
        if !no_color && is_tty && std::env::var_os("NO_COLOR").is_none() {
            styles.colorize();
        }
        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Spinners only make sense on an interactive, non-quiet terminal.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// `✓ msg`, suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        self.line(&format!("{} {msg}", "✓".style(self.styles.success)));
    }

    /// `⚠ msg`, suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        self.line(&format!("{} {msg}", "⚠".style(self.styles.warning)));
    }

    /// `✗ msg` on stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// `ℹ msg`, suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        self.line(&format!("{} {msg}", "ℹ".style(self.styles.info)));
    }

    /// Section header, suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        self.line(&msg.style(self.styles.header).to_string());
    }

    /// Key-value pair with the key dimmed, suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        self.line(&format!("{:<14} {value}", key.style(self.styles.dim)));
    }

    fn line(&self, text: &str) {
        if !self.quiet {
            println!("  {text}");
        }
    }
}
