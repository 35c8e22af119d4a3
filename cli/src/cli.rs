//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Declarative machine lifecycle for vRealize Automation 7
#[derive(Parser)]
#[command(
    name = "vra7",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Request a machine from the catalog and wait for it
    Create(commands::create::CreateArgs),

    /// Refresh and show the request status of a machine
    Status(commands::MachineArgs),

    /// Destroy a machine
    Delete(commands::delete::DeleteArgs),

    /// Power off a machine
    PowerOff(commands::MachineArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            command,
        } = self;
        let yes = matches!(&command, Command::Delete(args) if args.yes);
        let app = AppContext::new(&AppFlags {
            no_color,
            quiet,
            json,
            yes,
        })?;

        match command {
            Command::Create(args) => commands::create::run(&args, &app).await,
            Command::Status(args) => commands::status::run(&args, &app).await,
            Command::Delete(args) => commands::delete::run(&args, &app).await,
            Command::PowerOff(args) => commands::power_off::run(&args, &app).await,
            Command::Version => Ok(commands::version::run(&app)),
        }
    }
}
