use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{InvestmentDetails, SubmissionId};

/// Payload emitted when a submission starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionNotice {
    pub submission_id: SubmissionId,
    pub submitted_at: DateTime<Utc>,
    pub record: InvestmentDetails,
}

/// Returned once the simulated submission has finished and the form is reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub submission_id: SubmissionId,
    pub submitted_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub record: InvestmentDetails,
}

/// Outbound hook for submitted records (logging, telemetry, or a future transport).
/// Calls are fire-and-forget from the controller's point of view.
pub trait SubmissionNotifier: Send + Sync {
    fn submitted(&self, notice: &SubmissionNotice) -> Result<(), NotifyError>;
    fn completed(&self, receipt: &SubmissionReceipt) -> Result<(), NotifyError>;
}

/// Notifier dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notifier unavailable: {0}")]
    Unavailable(String),
    #[error("failed to encode submission payload")]
    Encode(#[from] serde_json::Error),
}

/// Writes submissions to the `tracing` pipeline as JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl SubmissionNotifier for TracingNotifier {
    fn submitted(&self, notice: &SubmissionNotice) -> Result<(), NotifyError> {
        let record = serde_json::to_string(&notice.record)?;
        info!(
            submission_id = %notice.submission_id,
            submitted_at = %notice.submitted_at,
            %record,
            "investment form submitted"
        );
        Ok(())
    }

    fn completed(&self, receipt: &SubmissionReceipt) -> Result<(), NotifyError> {
        info!(
            submission_id = %receipt.submission_id,
            completed_at = %receipt.completed_at,
            "investment form submission completed"
        );
        Ok(())
    }
}
