use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::new_account::notifier::{
    NotifyError, SubmissionNotice, SubmissionNotifier, SubmissionReceipt,
};
use crate::workflows::new_account::{
    FieldUpdate, FormController, InvestmentDetails, InvestmentRisk, RiskSelection,
    SchemaValidator, SubmissionSettings,
};

pub(super) const SUBMIT_DELAY: Duration = Duration::from_millis(5_000);

pub(super) fn chars(count: usize) -> String {
    "x".repeat(count)
}

/// Minimal record satisfying every rule with Low risk selected.
pub(super) fn valid_record() -> InvestmentDetails {
    InvestmentDetails {
        full_name: "Al".to_string(),
        initial_investment: 100.0,
        investment_risk: [InvestmentRisk::Low].into_iter().collect(),
        comment_about_investment_risk: chars(20),
        dependents: 0,
        accepted_terms_and_conditions: true,
    }
}

pub(super) fn high_risk_record(comment: &str) -> InvestmentDetails {
    InvestmentDetails {
        investment_risk: RiskSelection::from_iter([InvestmentRisk::High]),
        comment_about_investment_risk: comment.to_string(),
        ..valid_record()
    }
}

pub(super) fn validator() -> SchemaValidator {
    SchemaValidator::default()
}

pub(super) fn controller_with<N: SubmissionNotifier>(notifier: Arc<N>) -> FormController<N> {
    FormController::new(notifier, SubmissionSettings::with_delay(SUBMIT_DELAY))
}

/// Drive `controller` to `record` through field updates, the way a renderer would.
pub(super) fn fill<N: SubmissionNotifier>(controller: &FormController<N>, record: &InvestmentDetails) {
    controller.set_field(FieldUpdate::FullName(record.full_name.clone()));
    controller.set_field(FieldUpdate::InitialInvestment(record.initial_investment));
    for risk in record.investment_risk.iter() {
        controller.set_field(FieldUpdate::InvestmentRisk(risk));
    }
    controller.set_field(FieldUpdate::CommentAboutInvestmentRisk(
        record.comment_about_investment_risk.clone(),
    ));
    controller.set_field(FieldUpdate::Dependents(record.dependents));
    controller.set_field(FieldUpdate::AcceptedTermsAndConditions(
        record.accepted_terms_and_conditions,
    ));
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    submitted: Mutex<Vec<SubmissionNotice>>,
    completed: Mutex<Vec<SubmissionReceipt>>,
}

impl MemoryNotifier {
    pub(super) fn notices(&self) -> Vec<SubmissionNotice> {
        self.submitted.lock().expect("notifier mutex poisoned").clone()
    }

    pub(super) fn receipts(&self) -> Vec<SubmissionReceipt> {
        self.completed.lock().expect("notifier mutex poisoned").clone()
    }
}

impl SubmissionNotifier for MemoryNotifier {
    fn submitted(&self, notice: &SubmissionNotice) -> Result<(), NotifyError> {
        self.submitted
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice.clone());
        Ok(())
    }

    fn completed(&self, receipt: &SubmissionReceipt) -> Result<(), NotifyError> {
        self.completed
            .lock()
            .expect("notifier mutex poisoned")
            .push(receipt.clone());
        Ok(())
    }
}

pub(super) struct OfflineNotifier;

impl SubmissionNotifier for OfflineNotifier {
    fn submitted(&self, _notice: &SubmissionNotice) -> Result<(), NotifyError> {
        Err(NotifyError::Unavailable("telemetry sink offline".to_string()))
    }

    fn completed(&self, _receipt: &SubmissionReceipt) -> Result<(), NotifyError> {
        Err(NotifyError::Unavailable("telemetry sink offline".to_string()))
    }
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("valid json body");
    (status, value)
}
