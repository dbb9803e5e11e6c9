use std::sync::Arc;
use std::time::Duration;

use super::common::*;
use crate::workflows::new_account::{
    FieldName, FieldUpdate, InvestmentDetails, InvestmentRisk, SubmissionState, SubmitRejected,
};

#[test]
fn starts_idle_with_blank_record() {
    let controller = controller_with(Arc::new(MemoryNotifier::default()));

    assert_eq!(controller.record(), InvestmentDetails::default());
    assert_eq!(controller.submission_state(), SubmissionState::Idle);
    assert!(controller.errors().contains(FieldName::FullName));
}

#[test]
fn set_field_revalidates_whole_record() {
    let controller = controller_with(Arc::new(MemoryNotifier::default()));

    let errors = controller.set_field(FieldUpdate::FullName("Al".to_string()));

    assert!(!errors.contains(FieldName::FullName));
    assert!(errors.contains(FieldName::InitialInvestment));
    assert_eq!(controller.errors(), errors);
    assert_eq!(controller.record().full_name, "Al");
}

#[test]
fn risk_updates_toggle_membership() {
    let controller = controller_with(Arc::new(MemoryNotifier::default()));

    controller.set_field(FieldUpdate::InvestmentRisk(InvestmentRisk::Medium));
    controller.set_field(FieldUpdate::InvestmentRisk(InvestmentRisk::Low));
    assert_eq!(controller.record().investment_risk.len(), 2);

    controller.set_field(FieldUpdate::InvestmentRisk(InvestmentRisk::Medium));
    let risk = controller.record().investment_risk;
    assert_eq!(risk.iter().collect::<Vec<_>>(), vec![InvestmentRisk::Low]);

    controller.set_field(FieldUpdate::InvestmentRisk(InvestmentRisk::Low));
    assert!(controller.record().investment_risk.is_empty());
    assert!(controller.errors().contains(FieldName::InvestmentRisk));
}

#[test]
fn toggling_high_risk_recomputes_comment_rule() {
    let controller = controller_with(Arc::new(MemoryNotifier::default()));
    fill(
        &controller,
        &InvestmentDetails {
            comment_about_investment_risk: chars(25),
            ..valid_record()
        },
    );

    controller.set_field(FieldUpdate::InvestmentRisk(InvestmentRisk::High));
    assert!(controller.record().has_high_risk());
    assert!(controller
        .error_for(FieldName::CommentAboutInvestmentRisk)
        .is_none());

    controller.set_field(FieldUpdate::InvestmentRisk(InvestmentRisk::High));
    assert!(!controller.record().has_high_risk());
    assert!(controller
        .error_for(FieldName::CommentAboutInvestmentRisk)
        .is_none());
}

#[test]
fn selecting_high_risk_flags_empty_comment() {
    let controller = controller_with(Arc::new(MemoryNotifier::default()));
    fill(
        &controller,
        &InvestmentDetails {
            comment_about_investment_risk: String::new(),
            ..valid_record()
        },
    );
    assert!(controller.errors().is_empty());

    let errors = controller.set_field(FieldUpdate::InvestmentRisk(InvestmentRisk::High));

    assert_eq!(errors.len(), 1);
    assert!(errors.contains(FieldName::CommentAboutInvestmentRisk));
}

#[tokio::test(start_paused = true)]
async fn submit_runs_lifecycle_and_resets() {
    let notifier = Arc::new(MemoryNotifier::default());
    let controller = controller_with(notifier.clone());
    fill(&controller, &valid_record());
    assert!(controller.errors().is_empty());

    let receipt = controller.submit().await.expect("valid form submits");

    assert_eq!(receipt.record, valid_record());
    assert_eq!(receipt.submission_id.0, "sub-000001");
    assert!(receipt.completed_at >= receipt.submitted_at);
    assert_eq!(controller.submission_state(), SubmissionState::Idle);
    assert_eq!(controller.record(), InvestmentDetails::default());

    let notices = notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].record, valid_record());
    assert_eq!(notifier.receipts(), vec![receipt]);
}

#[tokio::test(start_paused = true)]
async fn spawned_submit_is_observable_while_in_flight() {
    let notifier = Arc::new(MemoryNotifier::default());
    let controller = Arc::new(controller_with(notifier.clone()));
    fill(controller.as_ref(), &valid_record());
    let mut snapshots = controller.subscribe();

    let notice = controller.spawn_submit().expect("valid form submits");

    assert_eq!(controller.submission_state(), SubmissionState::Submitting);
    assert_eq!(controller.record(), valid_record());
    assert_eq!(notifier.notices(), vec![notice.clone()]);
    assert!(notifier.receipts().is_empty());

    let settled = snapshots
        .wait_for(|snapshot| snapshot.submission == SubmissionState::Idle)
        .await
        .expect("controller alive")
        .clone();

    assert_eq!(settled.record, InvestmentDetails::default());
    assert!(settled.errors.contains(FieldName::FullName));
    let receipts = notifier.receipts();
    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0].submission_id, notice.submission_id);
}

#[tokio::test(start_paused = true)]
async fn resubmitting_while_in_flight_is_rejected() {
    let notifier = Arc::new(MemoryNotifier::default());
    let controller = Arc::new(controller_with(notifier.clone()));
    fill(controller.as_ref(), &valid_record());

    controller.spawn_submit().expect("first submit accepted");
    let second = controller.submit().await;

    assert_eq!(second, Err(SubmitRejected::InProgress));
    assert_eq!(controller.submission_state(), SubmissionState::Submitting);
    assert_eq!(notifier.notices().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn invalid_submit_is_a_no_op() {
    let notifier = Arc::new(MemoryNotifier::default());
    let controller = controller_with(notifier.clone());
    let record = InvestmentDetails {
        dependents: 6,
        ..valid_record()
    };
    fill(&controller, &record);
    let mut snapshots = controller.subscribe();
    snapshots.borrow_and_update();

    let rejected = controller.submit().await;

    match rejected {
        Err(SubmitRejected::Invalid(errors)) => {
            assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FieldName::Dependents]);
        }
        other => panic!("expected validation rejection, got {other:?}"),
    }
    assert_eq!(controller.submission_state(), SubmissionState::Idle);
    assert_eq!(controller.record(), record);
    assert!(!snapshots.has_changed().expect("controller alive"));
    assert!(notifier.notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn edits_during_submission_are_accepted_then_cleared() {
    let controller = Arc::new(controller_with(Arc::new(MemoryNotifier::default())));
    fill(controller.as_ref(), &valid_record());
    let mut snapshots = controller.subscribe();

    controller.spawn_submit().expect("valid form submits");
    controller.set_field(FieldUpdate::FullName("Alice".to_string()));
    assert_eq!(controller.record().full_name, "Alice");
    assert_eq!(controller.submission_state(), SubmissionState::Submitting);

    snapshots
        .wait_for(|snapshot| snapshot.submission == SubmissionState::Idle)
        .await
        .expect("controller alive");

    assert_eq!(controller.record(), InvestmentDetails::default());
}

#[tokio::test(start_paused = true)]
async fn notifier_failures_do_not_block_submission() {
    let controller = controller_with(Arc::new(OfflineNotifier));
    fill(&controller, &valid_record());

    let receipt = controller.submit().await.expect("submission still completes");

    assert_eq!(receipt.record, valid_record());
    assert_eq!(controller.submission_state(), SubmissionState::Idle);
}

#[tokio::test(start_paused = true)]
async fn submission_ids_increase_per_controller() {
    let controller = controller_with(Arc::new(MemoryNotifier::default()));

    fill(&controller, &valid_record());
    let first = controller.submit().await.expect("first submits");
    fill(&controller, &valid_record());
    let second = controller.submit().await.expect("second submits");

    assert_eq!(first.submission_id.0, "sub-000001");
    assert_eq!(second.submission_id.0, "sub-000002");
}

#[tokio::test(start_paused = true)]
async fn cancelled_submit_returns_form_to_idle() {
    let notifier = Arc::new(MemoryNotifier::default());
    let controller = controller_with(notifier.clone());
    fill(&controller, &valid_record());

    let cancelled = tokio::time::timeout(Duration::from_secs(1), controller.submit()).await;
    assert!(cancelled.is_err(), "submit should still be waiting on its delay");

    assert_eq!(controller.submission_state(), SubmissionState::Idle);
    assert_eq!(controller.record(), InvestmentDetails::default());
    assert_eq!(notifier.notices().len(), 1);
    assert!(notifier.receipts().is_empty());

    tokio::time::sleep(SUBMIT_DELAY * 12).await;
    assert_eq!(controller.submission_state(), SubmissionState::Idle);

    fill(&controller, &valid_record());
    let receipt = controller.submit().await.expect("form accepts a new submission");
    assert_eq!(receipt.submission_id.0, "sub-000002");
}

#[test]
fn reset_restores_blank_form() {
    let controller = controller_with(Arc::new(MemoryNotifier::default()));
    fill(&controller, &valid_record());

    let snapshot = controller.reset();

    assert_eq!(snapshot.record, InvestmentDetails::default());
    assert_eq!(snapshot.submission, SubmissionState::Idle);
    assert_eq!(snapshot, controller.snapshot());
}
