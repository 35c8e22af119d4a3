//! Output styles using owo-colors stylesheet pattern

use owo_colors::Style;

/// Centralized stylesheet for CLI output colors.
#[derive(Default, Clone)]
pub struct Styles {
    /// Success messages and `SUCCESSFUL` phases (green)
    pub success: Style,
    /// Warnings and in-flight phases (yellow)
    pub warning: Style,
    /// Errors and `FAILED` phases (red)
    pub error: Style,
    /// Info messages (blue)
    pub info: Style,
    /// Dimmed/secondary text
    pub dim: Style,
    /// Bold text
    pub bold: Style,
    /// Headers/section titles
    pub header: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red();
        self.info = Style::new().blue();
        self.dim = Style::new().dimmed();
        self.bold = Style::new().bold();
        self.header = Style::new().bold().cyan();
    }

    /// Style used to print a request phase label.
    #[must_use]
    pub fn phase(&self, label: &str) -> Style {
        match label {
            "SUCCESSFUL" => self.success,
            "FAILED" => self.error,
            "UNKNOWN" => self.dim,
            _ => self.warning,
        }
    }
}
