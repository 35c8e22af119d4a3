//! vra7: declarative machine lifecycle for vRealize Automation 7

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vra7_cli::cli::Cli;
use vra7_cli::output::json;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_output = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            if json_output
                && let Ok(body) = json::format_error(&format!("{e:#}"), json::error_code(&e))
            {
                println!("{body}");
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
