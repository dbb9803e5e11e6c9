use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::domain::{
    FieldName, FieldUpdate, InvestmentDetails, SubmissionId, SubmissionState,
};
use super::notifier::{SubmissionNotice, SubmissionNotifier, SubmissionReceipt};
use super::validation::{ErrorSet, SchemaValidator};

const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(5_000);

/// Timing of the simulated submission call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionSettings {
    pub delay: Duration,
}

impl SubmissionSettings {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self::with_delay(DEFAULT_SUBMIT_DELAY)
    }
}

/// Everything a renderer needs to draw the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub record: InvestmentDetails,
    pub errors: ErrorSet,
    pub submission: SubmissionState,
}

/// Why a submit call did not start a submission. Neither case changes the form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(ErrorSet),
    #[error("a submission is already in progress")]
    InProgress,
}

struct FormState {
    record: InvestmentDetails,
    errors: ErrorSet,
    submission: SubmissionState,
}

impl FormState {
    fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            record: self.record.clone(),
            errors: self.errors.clone(),
            submission: self.submission,
        }
    }
}

/// Owns the record under edit, its derived errors, and the submission lifecycle.
///
/// Every mutation revalidates the whole record and publishes a fresh [`FormSnapshot`] to
/// subscribers. The state lock is never held across an `.await`.
pub struct FormController<N> {
    state: Mutex<FormState>,
    snapshots: watch::Sender<FormSnapshot>,
    validator: SchemaValidator,
    notifier: Arc<N>,
    settings: SubmissionSettings,
    sequence: AtomicU64,
}

impl<N> FormController<N>
where
    N: SubmissionNotifier,
{
    pub fn new(notifier: Arc<N>, settings: SubmissionSettings) -> Self {
        Self::with_validator(SchemaValidator::default(), notifier, settings)
    }

    pub fn with_validator(
        validator: SchemaValidator,
        notifier: Arc<N>,
        settings: SubmissionSettings,
    ) -> Self {
        let record = InvestmentDetails::default();
        let errors = validator.validate(&record);
        let state = FormState {
            record,
            errors,
            submission: SubmissionState::Idle,
        };
        let (snapshots, _) = watch::channel(state.snapshot());

        Self {
            state: Mutex::new(state),
            snapshots,
            validator,
            notifier,
            settings,
            sequence: AtomicU64::new(1),
        }
    }

    pub fn validator(&self) -> &SchemaValidator {
        &self.validator
    }

    pub fn settings(&self) -> SubmissionSettings {
        self.settings
    }

    pub fn record(&self) -> InvestmentDetails {
        self.lock().record.clone()
    }

    pub fn errors(&self) -> ErrorSet {
        self.lock().errors.clone()
    }

    pub fn error_for(&self, field: FieldName) -> Option<String> {
        self.lock().errors.get(field).map(str::to_string)
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.lock().submission
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.lock().snapshot()
    }

    /// Receiver that observes a new snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.snapshots.subscribe()
    }

    /// Apply one field edit and revalidate the whole record, returning the new errors.
    /// Edits are accepted while a submission is in flight.
    pub fn set_field(&self, update: FieldUpdate) -> ErrorSet {
        let field = update.field();
        let mut state = self.lock();
        update.apply(&mut state.record);
        state.errors = self.validator.validate(&state.record);
        debug!(
            %field,
            invalid_fields = state.errors.len(),
            "investment form field updated"
        );
        self.publish(&state);
        state.errors.clone()
    }

    /// Restore the blank record and recompute its errors.
    pub fn reset(&self) -> FormSnapshot {
        let mut state = self.lock();
        self.reset_locked(&mut state);
        self.publish(&state);
        state.snapshot()
    }

    /// Run the full submission lifecycle, resolving once the simulated call has finished
    /// and the form has been reset.
    ///
    /// Dropping the returned future mid-flight skips the completion notice but still resets
    /// the record and returns the form to `Idle`.
    pub async fn submit(&self) -> Result<SubmissionReceipt, SubmitRejected> {
        let notice = self.begin_submit()?;
        Ok(self.finish_submit(notice).await)
    }

    /// Start a submission and complete it on a background task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_submit(self: &Arc<Self>) -> Result<SubmissionNotice, SubmitRejected>
    where
        N: 'static,
    {
        let notice = self.begin_submit()?;
        let controller = Arc::clone(self);
        let pending = notice.clone();
        tokio::spawn(async move {
            controller.finish_submit(pending).await;
        });
        Ok(notice)
    }

    fn begin_submit(&self) -> Result<SubmissionNotice, SubmitRejected> {
        let notice = {
            let mut state = self.lock();
            if state.submission == SubmissionState::Submitting {
                debug!("submit ignored, submission already in progress");
                return Err(SubmitRejected::InProgress);
            }
            if !state.errors.is_empty() {
                debug!(
                    invalid_fields = state.errors.len(),
                    "submit blocked by validation errors"
                );
                return Err(SubmitRejected::Invalid(state.errors.clone()));
            }

            state.submission = SubmissionState::Submitting;
            self.publish(&state);

            SubmissionNotice {
                submission_id: self.next_submission_id(),
                submitted_at: Utc::now(),
                record: state.record.clone(),
            }
        };

        info!(submission_id = %notice.submission_id, "investment form submission started");
        if let Err(err) = self.notifier.submitted(&notice) {
            warn!(submission_id = %notice.submission_id, error = %err, "submission notifier failed");
        }

        Ok(notice)
    }

    async fn finish_submit(&self, notice: SubmissionNotice) -> SubmissionReceipt {
        let in_flight = InFlightSubmission {
            controller: self,
            submission_id: &notice.submission_id,
            settled: false,
        };
        tokio::time::sleep(self.settings.delay).await;
        in_flight.settle();

        let receipt = SubmissionReceipt {
            submission_id: notice.submission_id,
            submitted_at: notice.submitted_at,
            completed_at: Utc::now(),
            record: notice.record,
        };

        info!(submission_id = %receipt.submission_id, "investment form submission finished");
        if let Err(err) = self.notifier.completed(&receipt) {
            warn!(submission_id = %receipt.submission_id, error = %err, "submission notifier failed");
        }

        receipt
    }

    fn settle_submission(&self) {
        let mut state = self.lock();
        self.reset_locked(&mut state);
        state.submission = SubmissionState::Idle;
        self.publish(&state);
    }

    fn reset_locked(&self, state: &mut FormState) {
        state.record = InvestmentDetails::default();
        state.errors = self.validator.validate(&state.record);
    }

    fn publish(&self, state: &FormState) {
        self.snapshots.send_replace(state.snapshot());
    }

    fn next_submission_id(&self) -> SubmissionId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        SubmissionId(format!("sub-{id:06}"))
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Settles the submission lifecycle even when the future driving it is dropped before the
/// delay elapses, so the form never stays in `Submitting`.
struct InFlightSubmission<'a, N: SubmissionNotifier> {
    controller: &'a FormController<N>,
    submission_id: &'a SubmissionId,
    settled: bool,
}

impl<N: SubmissionNotifier> InFlightSubmission<'_, N> {
    fn settle(mut self) {
        self.settled = true;
        self.controller.settle_submission();
    }
}

impl<N: SubmissionNotifier> Drop for InFlightSubmission<'_, N> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!(
            submission_id = %self.submission_id,
            "submission abandoned before completion, form reset to idle"
        );
        self.controller.settle_submission();
    }
}
