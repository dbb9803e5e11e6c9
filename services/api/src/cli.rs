use crate::demo::{run_demo, run_validate, DemoArgs, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use investor_form::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Investor Form",
    about = "Serve, validate, and demonstrate the new-account investor form",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Validate an investment record stored as JSON
    Validate(ValidateArgs),
    /// Walk the acceptance scenarios through a live form controller
    Demo(DemoArgs),
}

/// How a command finished when it did not fail outright. `main` turns this into the
/// process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Completed,
    InvalidRecord,
}

impl CommandOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            CommandOutcome::Completed => 0,
            CommandOutcome::InvalidRecord => 2,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the simulated submission delay in milliseconds
    #[arg(long)]
    pub(crate) submit_delay_ms: Option<u64>,
}

pub(crate) async fn run() -> Result<CommandOutcome, AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await?,
        Command::Validate(args) => return run_validate(args),
        Command::Demo(args) => run_demo(args).await?,
    }

    Ok(CommandOutcome::Completed)
}
