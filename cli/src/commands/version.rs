//! Version command

use std::process::ExitCode;

use crate::app::AppContext;

/// Run the version command.
#[must_use]
pub fn run(app: &AppContext) -> ExitCode {
    let version = env!("CARGO_PKG_VERSION");
    if app.is_json() {
        println!("{}", serde_json::json!({ "version": version }));
    } else {
        app.human().render_version(version);
    }
    ExitCode::SUCCESS
}
