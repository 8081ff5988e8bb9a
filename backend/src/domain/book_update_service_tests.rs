//! Tests for the book update service.

use std::sync::Arc;

use chrono::Duration;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{BookStoreError, MockBookStore};
use crate::domain::{
    BookEdit, DeleteState, ErrorCode, Rating, ReadingState, UpdateState, build_diff,
};
use crate::test_support::{FixedClock, RecordBuilder, fixture_timestamp};

fn service(store: MockBookStore) -> BookUpdateService<MockBookStore> {
    BookUpdateService::new(Arc::new(store), Arc::new(FixedClock::default()))
}

fn book_id(raw: &str) -> BookId {
    BookId::new(raw).expect("book id")
}

#[fixture]
fn unstarted_session() -> UpdateSession {
    UpdateSession::new(RecordBuilder::new("b-1", "u-1").build())
}

#[tokio::test]
async fn apply_skips_the_store_for_an_empty_diff() {
    let record = RecordBuilder::new("b-1", "u-1").notes("kept").rating(3).build();
    let diff = build_diff(&record, &BookEdit::unchanged(&record), fixture_timestamp());
    let mut store = MockBookStore::new();
    store.expect_update_fields().never();

    let outcome = service(store)
        .apply(&record.id, &diff)
        .await
        .expect("no-op apply");

    assert_eq!(outcome, UpdateOutcome::NoChanges);
}

#[tokio::test]
async fn apply_sends_only_changed_fields_once() {
    let record = RecordBuilder::new("b-1", "u-1").notes("old").build();
    let edit = BookEdit {
        notes: "new".to_owned(),
        ..BookEdit::unchanged(&record)
    };
    let diff = build_diff(&record, &edit, fixture_timestamp());
    let mut store = MockBookStore::new();
    store
        .expect_update_fields()
        .withf(|id, patch| {
            id.as_ref() == "b-1" && patch.field_names() == vec![crate::domain::NOTES_FIELD]
        })
        .times(1)
        .return_once(|_, _| Ok(()));

    let outcome = service(store)
        .apply(&record.id, &diff)
        .await
        .expect("applied");

    assert!(outcome.was_applied());
}

#[rstest]
#[tokio::test]
async fn submit_stamps_start_with_the_clock(mut unstarted_session: UpdateSession) {
    unstarted_session
        .set_notes("Great read")
        .expect("notes editable");
    unstarted_session
        .set_rating(Rating::new(4).expect("rating"))
        .expect("rating editable");
    unstarted_session.start_reading().expect("can start");

    let mut store = MockBookStore::new();
    store
        .expect_update_fields()
        .withf(|_, patch| {
            patch.started_reading == Some(fixture_timestamp())
                && patch.finished_reading.is_none()
                && patch.notes.as_deref() == Some("Great read")
        })
        .times(1)
        .return_once(|_, _| Ok(()));

    let outcome = service(store)
        .submit(&mut unstarted_session)
        .await
        .expect("submitted");

    assert!(outcome.was_applied());
    assert_eq!(unstarted_session.state(), UpdateState::Applied);
    assert_eq!(
        unstarted_session.record().reading_state(),
        ReadingState::InProgress
    );
    assert_eq!(unstarted_session.record().notes, "Great read");
}

#[rstest]
#[tokio::test]
async fn submit_without_edits_makes_no_call(mut unstarted_session: UpdateSession) {
    let mut store = MockBookStore::new();
    store.expect_update_fields().never();

    let outcome = service(store)
        .submit(&mut unstarted_session)
        .await
        .expect("no-op submit");

    assert_eq!(outcome, UpdateOutcome::NoChanges);
    assert_eq!(unstarted_session.state(), UpdateState::Viewing);
}

#[rstest]
#[tokio::test]
async fn submit_failure_keeps_edits_for_retry(mut unstarted_session: UpdateSession) {
    unstarted_session.set_notes("draft").expect("notes editable");
    let mut store = MockBookStore::new();
    store
        .expect_update_fields()
        .times(1)
        .return_once(|_, _| Err(BookStoreError::unavailable("timeout")));

    let err = service(store)
        .submit(&mut unstarted_session)
        .await
        .expect_err("store down");

    let UpdateSessionError::Store(error) = err else {
        panic!("expected store error");
    };
    assert!(error.is_retryable());
    assert_eq!(unstarted_session.state(), UpdateState::Failed);
    assert_eq!(unstarted_session.edit().notes, "draft");
    assert!(unstarted_session.record().notes.is_empty());
}

#[rstest]
#[tokio::test]
async fn submit_for_a_deleted_record_discards_edits(mut unstarted_session: UpdateSession) {
    unstarted_session.set_notes("draft").expect("notes editable");
    let mut store = MockBookStore::new();
    store
        .expect_update_fields()
        .times(1)
        .return_once(|id, _| Err(BookStoreError::not_found(id.as_ref())));

    let err = service(store)
        .submit(&mut unstarted_session)
        .await
        .expect_err("record gone");

    assert!(matches!(
        err,
        UpdateSessionError::Store(ref error) if error.code() == ErrorCode::NotFound
    ));
    assert!(unstarted_session.edit().notes.is_empty());
}

#[tokio::test]
async fn submit_preserves_existing_start_when_finishing() {
    let started = fixture_timestamp() - Duration::days(10);
    let mut session = UpdateSession::new(RecordBuilder::new("b-1", "u-1").started(started).build());
    session.finish_reading().expect("can finish");

    let mut store = MockBookStore::new();
    store
        .expect_update_fields()
        .withf(|_, patch| {
            patch.started_reading.is_none() && patch.finished_reading == Some(fixture_timestamp())
        })
        .times(1)
        .return_once(|_, _| Ok(()));

    service(store).submit(&mut session).await.expect("finished");

    assert_eq!(session.record().started_reading, Some(started));
    assert_eq!(session.record().reading_state(), ReadingState::Finished);
}

#[tokio::test]
async fn confirm_delete_issues_exactly_one_call() {
    let mut flow = DeleteFlow::new(book_id("b-1"));
    flow.request().expect("request");
    let mut store = MockBookStore::new();
    store
        .expect_delete()
        .withf(|id| id.as_ref() == "b-1")
        .times(1)
        .return_once(|_| Ok(()));

    service(store)
        .confirm_delete(&mut flow)
        .await
        .expect("deleted");

    assert_eq!(flow.state(), DeleteState::Removed);
}

#[tokio::test]
async fn confirm_delete_without_request_never_calls_store() {
    let mut flow = DeleteFlow::new(book_id("b-1"));
    let mut store = MockBookStore::new();
    store.expect_delete().never();

    let err = service(store)
        .confirm_delete(&mut flow)
        .await
        .expect_err("not requested");

    assert!(matches!(err, DeleteFlowError::InvalidTransition { .. }));
    assert_eq!(flow.state(), DeleteState::Idle);
}

#[rstest]
#[case(BookStoreError::unavailable("timeout"), ErrorCode::StoreUnavailable)]
#[case(BookStoreError::permission_denied("rules"), ErrorCode::PermissionDenied)]
#[case(BookStoreError::not_found("b-1"), ErrorCode::NotFound)]
#[tokio::test]
async fn delete_failures_are_surfaced(
    #[case] failure: BookStoreError,
    #[case] expected: ErrorCode,
) {
    let mut flow = DeleteFlow::new(book_id("b-1"));
    flow.request().expect("request");
    let mut store = MockBookStore::new();
    store
        .expect_delete()
        .times(1)
        .return_once(move |_| Err(failure));

    let err = service(store)
        .confirm_delete(&mut flow)
        .await
        .expect_err("delete failed");

    let DeleteFlowError::Store(error) = err else {
        panic!("expected store error");
    };
    assert_eq!(error.code(), expected);
    assert_eq!(flow.state(), DeleteState::Failed);
}
