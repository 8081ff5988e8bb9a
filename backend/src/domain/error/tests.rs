//! Tests for error classification and serialisation.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::store_unavailable("down"), true)]
#[case(Error::network("reset"), true)]
#[case(Error::rate_limited("slow down"), true)]
#[case(Error::not_found("gone"), false)]
#[case(Error::permission_denied("nope"), false)]
#[case(Error::invalid_request("blank"), false)]
fn retryable_codes_are_transient_failures(#[case] error: Error, #[case] expected: bool) {
    assert_eq!(error.is_retryable(), expected);
}

#[rstest]
#[case(Error::not_found("gone"), true)]
#[case(Error::store_unavailable("down"), false)]
#[case(Error::permission_denied("nope"), false)]
fn only_not_found_discards_local_edits(#[case] error: Error, #[case] expected: bool) {
    assert_eq!(error.discards_local_edits(), expected);
}

#[rstest]
fn display_uses_message() {
    let err = Error::internal("boom");
    assert_eq!(err.to_string(), "boom");
    assert_eq!(err.code().to_string(), "internal_error");
}

#[rstest]
fn serialises_code_and_details() {
    let err = Error::not_found("book b-1 not found").with_details(json!({"bookId": "b-1"}));
    let value = serde_json::to_value(&err).expect("serialise error");

    assert_eq!(
        value,
        json!({
            "code": "not_found",
            "message": "book b-1 not found",
            "details": {"bookId": "b-1"},
        })
    );
}

#[rstest]
fn omits_absent_details() {
    let value = serde_json::to_value(Error::unauthenticated("sign in")).expect("serialise error");
    assert!(value.get("details").is_none());
}
