use crate::cli::CommandOutcome;
use crate::infra::read_record;
use chrono::Local;
use clap::Args;
use investor_form::error::AppError;
use investor_form::workflows::new_account::{
    ErrorSet, FieldUpdate, FormController, InvestmentRisk, SchemaValidator, SubmissionNotifier,
    SubmissionSettings, SubmissionState, TracingNotifier,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// JSON file holding a complete investment record (camelCase keys)
    pub(crate) path: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Simulated submission delay in milliseconds
    #[arg(long, default_value_t = 5_000)]
    pub(crate) submit_delay_ms: u64,
}

pub(crate) fn validate_record_file(path: &Path) -> Result<ErrorSet, AppError> {
    let record = read_record(path)?;
    Ok(SchemaValidator::default().validate(&record))
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<CommandOutcome, AppError> {
    let errors = validate_record_file(&args.path)?;

    if errors.is_empty() {
        println!("{}: record is valid", args.path.display());
        return Ok(CommandOutcome::Completed);
    }

    println!("{}: {} invalid field(s)", args.path.display(), errors.len());
    render_errors(&errors);
    Ok(CommandOutcome::InvalidRecord)
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let settings = SubmissionSettings::with_delay(Duration::from_millis(args.submit_delay_ms));
    let controller = Arc::new(FormController::new(Arc::new(TracingNotifier), settings));

    println!("New account form demo");
    println!("Submission delay: {} ms", args.submit_delay_ms);

    println!("\nScenario A: minimal valid record");
    enter_valid_record(&controller);
    render_errors(&controller.errors());
    submit_and_wait(&controller).await;

    println!("\nScenario B: High risk without a comment");
    enter_valid_record(&controller);
    controller.set_field(FieldUpdate::InvestmentRisk(InvestmentRisk::Low));
    controller.set_field(FieldUpdate::InvestmentRisk(InvestmentRisk::High));
    controller.set_field(FieldUpdate::CommentAboutInvestmentRisk(String::new()));
    render_errors(&controller.errors());
    submit_and_wait(&controller).await;

    println!("\nScenario C: toggling High risk with a 25 character comment");
    controller.set_field(FieldUpdate::CommentAboutInvestmentRisk("c".repeat(25)));
    println!("- High selected: {}", controller.record().has_high_risk());
    render_errors(&controller.errors());
    controller.set_field(FieldUpdate::InvestmentRisk(InvestmentRisk::High));
    controller.set_field(FieldUpdate::InvestmentRisk(InvestmentRisk::Medium));
    println!("- High selected: {}", controller.record().has_high_risk());
    render_errors(&controller.errors());

    println!("\nScenario D: six dependents");
    controller.set_field(FieldUpdate::Dependents(6));
    render_errors(&controller.errors());
    submit_and_wait(&controller).await;

    controller.reset();
    Ok(())
}

fn enter_valid_record(controller: &FormController<TracingNotifier>) {
    controller.reset();
    controller.set_field(FieldUpdate::FullName("Al".to_string()));
    controller.set_field(FieldUpdate::InitialInvestment(100.0));
    controller.set_field(FieldUpdate::InvestmentRisk(InvestmentRisk::Low));
    controller.set_field(FieldUpdate::CommentAboutInvestmentRisk("x".repeat(20)));
    controller.set_field(FieldUpdate::Dependents(0));
    controller.set_field(FieldUpdate::AcceptedTermsAndConditions(true));
}

async fn submit_and_wait<N>(controller: &Arc<FormController<N>>)
where
    N: SubmissionNotifier + 'static,
{
    let mut snapshots = controller.subscribe();

    match controller.spawn_submit() {
        Ok(notice) => {
            println!(
                "- submit accepted as {} at {} (state {})",
                notice.submission_id,
                notice
                    .submitted_at
                    .with_timezone(&Local)
                    .format("%H:%M:%S%.3f"),
                controller.submission_state().label()
            );
            let settled = snapshots
                .wait_for(|snapshot| snapshot.submission == SubmissionState::Idle)
                .await
                .map(|snapshot| snapshot.record.full_name.is_empty());
            if let Ok(reset) = settled {
                println!(
                    "- submission finished (state {}, form reset: {reset})",
                    controller.submission_state().label()
                );
            }
        }
        Err(rejected) => {
            println!(
                "- submit rejected: {rejected} (state {})",
                controller.submission_state().label()
            );
        }
    }
}

fn render_errors(errors: &ErrorSet) {
    if errors.is_empty() {
        println!("- errors: none");
        return;
    }

    for error in errors.iter() {
        println!("- {}: {}", error.field, error.message);
    }
}
