use investor_form_api::{run, CommandOutcome};

#[tokio::main]
async fn main() {
    match run().await {
        Ok(CommandOutcome::Completed) => {}
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(err) => {
            eprintln!("application error: {err}");
            std::process::exit(1);
        }
    }
}
