use std::sync::Arc;
use std::time::{Duration, Instant};

use super::common::*;
use crate::api::ApiError;
use crate::workflows::applications::board::{
    AcceptError, BoardLoadError, RejectError, ReviewBoard, ACCEPT_SUCCESS_NOTICE,
};
use crate::workflows::applications::domain::{ApplicationId, ApplicationStatus};
use crate::workflows::applications::policy::POSITION_FILLED_TOOLTIP;
use crate::workflows::applications::scheduling::{InterviewForm, ScheduleField, DATE_REQUIRED};

fn pending_and_accepted() -> Vec<crate::workflows::applications::domain::Application> {
    vec![
        application("a", ApplicationStatus::Pending, "Alice"),
        application("b", ApplicationStatus::Accepted, "Bob"),
    ]
}

async fn loaded_board(api: Arc<MemoryJobBoard>) -> ReviewBoard<MemoryJobBoard> {
    let mut board = ReviewBoard::new(api, job_id());
    board.refresh().await.expect("board loads");
    board
}

fn valid_form() -> InterviewForm {
    InterviewForm::new("2026-03-11", "10:00", "", "")
}

#[tokio::test]
async fn refresh_derives_acceptance_from_the_collection() {
    let api = Arc::new(MemoryJobBoard::with_applications(pending_and_accepted()));
    let board = loaded_board(api).await;

    assert!(board.summary().has_accepted_candidate);
    assert_eq!(
        board.summary().accepted_candidate_name.as_deref(),
        Some("Bob")
    );
    assert_eq!(
        board.position_filled_banner().as_deref(),
        Some("Position Filled: Interview scheduled with Bob.")
    );
}

#[tokio::test]
async fn refresh_maps_load_failures_to_blocking_errors() {
    let api = Arc::new(MemoryJobBoard::default());

    *api.fail_next_for_job.lock().expect("fake mutex poisoned") = Some(ApiError::Forbidden);
    let mut board = ReviewBoard::new(api.clone(), job_id());
    let err = board.refresh().await.expect_err("forbidden");
    assert_eq!(err, BoardLoadError::Forbidden);
    assert_eq!(
        err.to_string(),
        "You do not have permission to view these applications"
    );

    *api.fail_next_for_job.lock().expect("fake mutex poisoned") = Some(ApiError::NotFound);
    let err = board.refresh().await.expect_err("missing job");
    assert_eq!(err, BoardLoadError::JobNotFound);
    assert_eq!(err.to_string(), "Job not found");

    *api.fail_next_for_job.lock().expect("fake mutex poisoned") =
        Some(ApiError::Transport("offline".to_string()));
    let err = board.refresh().await.expect_err("unavailable");
    assert_eq!(err, BoardLoadError::Unavailable);
    assert_eq!(err.to_string(), "Failed to load applications");
}

#[tokio::test]
async fn sibling_of_accepted_application_renders_the_filled_notice() {
    let api = Arc::new(MemoryJobBoard::with_applications(pending_and_accepted()));
    let board = loaded_board(api).await;
    let cards = board.card_views();

    let sibling = cards
        .iter()
        .find(|card| card.application_id.0 == "a")
        .expect("pending card present");
    assert!(sibling.decision_controls_visible);
    assert!(!sibling.accept_enabled);
    assert_eq!(
        sibling.position_filled_notice.as_deref(),
        Some("Position filled - interview scheduled with Bob")
    );
    assert_eq!(sibling.accept_tooltip, Some(POSITION_FILLED_TOOLTIP));

    let winner = cards
        .iter()
        .find(|card| card.application_id.0 == "b")
        .expect("accepted card present");
    assert!(!winner.decision_controls_visible);
    assert_eq!(winner.position_filled_notice, None);
    assert_eq!(winner.accept_tooltip, None);
}

#[tokio::test]
async fn accept_submits_the_validated_payload_and_refetches() {
    let api = Arc::new(MemoryJobBoard::with_applications(vec![application(
        "a",
        ApplicationStatus::Pending,
        "Alice",
    )]));
    let mut board = loaded_board(api.clone()).await;
    let mut form = InterviewForm::new("2026-03-11", "10:00", "   ", "");
    let now = Instant::now();

    let confirmation = board
        .accept(&ApplicationId("a".to_string()), &mut form, today(), now)
        .await
        .expect("accept succeeds");

    let calls = api.accept_requests();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0 .0, "a");
    assert_eq!(
        calls[0].1.interview_date.to_string(),
        "2026-03-11".to_string()
    );
    assert_eq!(calls[0].1.interview_time.format("%H:%M").to_string(), "10:00");
    assert_eq!(calls[0].1.location, None);
    assert_eq!(calls[0].1.notes, None);

    // Refetch-over-patch: the board reflects the server's new state.
    assert!(board.applications()[0].status.is_accepted());
    assert!(board.summary().has_accepted_candidate);
    assert_eq!(confirmation.interview.location, None);

    assert_eq!(board.success_notice(now), Some(ACCEPT_SUCCESS_NOTICE));
    assert_eq!(board.success_notice(now + Duration::from_secs(6)), None);
    assert_eq!(form, InterviewForm::default());
    assert!(!board.is_submitting());
}

#[tokio::test]
async fn accept_blocks_on_validation_without_calling_the_server() {
    let api = Arc::new(MemoryJobBoard::with_applications(vec![application(
        "a",
        ApplicationStatus::Pending,
        "Alice",
    )]));
    let mut board = loaded_board(api.clone()).await;
    let mut form = InterviewForm::new("", "10:00", "", "");

    let err = board
        .accept(
            &ApplicationId("a".to_string()),
            &mut form,
            today(),
            Instant::now(),
        )
        .await
        .expect_err("validation blocks");

    match err {
        AcceptError::Validation(errors) => {
            assert_eq!(
                errors.message_for(ScheduleField::InterviewDate),
                Some(DATE_REQUIRED)
            );
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(api.accept_requests().is_empty());
    assert!(!board.is_submitting());
}

#[tokio::test]
async fn accept_rejects_siblings_once_the_position_is_filled() {
    let api = Arc::new(MemoryJobBoard::with_applications(pending_and_accepted()));
    let mut board = loaded_board(api.clone()).await;
    let mut form = valid_form();

    let err = board
        .accept(
            &ApplicationId("a".to_string()),
            &mut form,
            today(),
            Instant::now(),
        )
        .await
        .expect_err("position filled");

    assert_eq!(
        err,
        AcceptError::PositionFilled {
            accepted_candidate: "Bob".to_string(),
        }
    );
    assert!(api.accept_requests().is_empty());
}

#[tokio::test]
async fn accept_requires_a_pending_application() {
    let api = Arc::new(MemoryJobBoard::with_applications(vec![application(
        "r",
        ApplicationStatus::Rejected,
        "Rae",
    )]));
    let mut board = loaded_board(api.clone()).await;
    let mut form = valid_form();

    let err = board
        .accept(
            &ApplicationId("r".to_string()),
            &mut form,
            today(),
            Instant::now(),
        )
        .await
        .expect_err("not pending");
    assert_eq!(err, AcceptError::NotPending);

    let err = board
        .accept(
            &ApplicationId("missing".to_string()),
            &mut form,
            today(),
            Instant::now(),
        )
        .await
        .expect_err("unknown application");
    assert_eq!(err, AcceptError::UnknownApplication);
}

#[tokio::test]
async fn failed_accept_keeps_the_form_open_with_the_server_message() {
    let api = Arc::new(MemoryJobBoard::with_applications(vec![application(
        "a",
        ApplicationStatus::Pending,
        "Alice",
    )]));
    *api.fail_next_accept.lock().expect("fake mutex poisoned") = Some(ApiError::Server {
        status: 500,
        message: "Interview slot unavailable".to_string(),
    });
    let mut board = loaded_board(api.clone()).await;
    let mut form = valid_form();

    let err = board
        .accept(
            &ApplicationId("a".to_string()),
            &mut form,
            today(),
            Instant::now(),
        )
        .await
        .expect_err("submit fails");

    assert_eq!(
        err,
        AcceptError::Submit {
            message: "Interview slot unavailable".to_string(),
        }
    );
    assert_eq!(
        form.submit_error.as_deref(),
        Some("Interview slot unavailable")
    );
    // Already-valid fields survive for correction and resubmission.
    assert_eq!(form.interview_date, "2026-03-11");
    assert_eq!(form.interview_time, "10:00");
    assert!(board.applications()[0].status.is_pending());
    assert!(!board.is_submitting());
}

#[tokio::test]
async fn failed_accept_falls_back_to_a_generic_message() {
    let api = Arc::new(MemoryJobBoard::with_applications(vec![application(
        "a",
        ApplicationStatus::Pending,
        "Alice",
    )]));
    *api.fail_next_accept.lock().expect("fake mutex poisoned") =
        Some(ApiError::Transport("timed out".to_string()));
    let mut board = loaded_board(api).await;
    let mut form = valid_form();

    let err = board
        .accept(
            &ApplicationId("a".to_string()),
            &mut form,
            today(),
            Instant::now(),
        )
        .await
        .expect_err("submit fails");

    assert_eq!(
        err,
        AcceptError::Submit {
            message: "Failed to schedule interview".to_string(),
        }
    );
}

#[tokio::test]
async fn reject_updates_status_and_refetches() {
    let api = Arc::new(MemoryJobBoard::with_applications(vec![application(
        "a",
        ApplicationStatus::Pending,
        "Alice",
    )]));
    let mut board = loaded_board(api.clone()).await;

    board
        .reject(&ApplicationId("a".to_string()))
        .await
        .expect("reject succeeds");

    let updates = api.update_requests();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0 .0, "a");
    assert_eq!(updates[0].1, ApplicationStatus::Rejected);
    assert_eq!(board.applications()[0].status, ApplicationStatus::Rejected);
}

#[tokio::test]
async fn reject_is_allowed_while_the_position_is_filled() {
    let api = Arc::new(MemoryJobBoard::with_applications(pending_and_accepted()));
    let mut board = loaded_board(api).await;

    board
        .reject(&ApplicationId("a".to_string()))
        .await
        .expect("reject is independent of the acceptance flag");
}

#[tokio::test]
async fn reject_requires_a_pending_application() {
    let api = Arc::new(MemoryJobBoard::with_applications(pending_and_accepted()));
    let mut board = loaded_board(api.clone()).await;

    let err = board
        .reject(&ApplicationId("b".to_string()))
        .await
        .expect_err("accepted application cannot be rejected");
    assert_eq!(err, RejectError::NotPending);
    assert!(api.update_requests().is_empty());
}
