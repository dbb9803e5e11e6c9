mod cli;
mod demo;
mod infra;
mod routes;
mod server;

pub use cli::CommandOutcome;

use investor_form::error::AppError;

pub async fn run() -> Result<CommandOutcome, AppError> {
    cli::run().await
}
