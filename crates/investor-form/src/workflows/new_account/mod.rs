//! New-account investor form: the record under edit, its rule-table validation, and the
//! controller that owns the submission lifecycle.
//!
//! Renderers drive the form through [`FormController::set_field`] and
//! [`FormController::submit`], and read it back through snapshots or a watch subscription.

pub mod controller;
pub mod domain;
pub mod notifier;
pub mod router;
pub mod validation;

#[cfg(test)]
mod tests;

pub use controller::{FormController, FormSnapshot, SubmissionSettings, SubmitRejected};
pub use domain::{
    FieldName, FieldUpdate, InvestmentDetails, InvestmentRisk, RiskSelection, SubmissionId,
    SubmissionState,
};
pub use notifier::{
    NotifyError, SubmissionNotice, SubmissionNotifier, SubmissionReceipt, TracingNotifier,
};
pub use router::form_router;
pub use validation::{ErrorSet, FieldValidationError, SchemaLimits, SchemaValidator};
