#![allow(clippy::unwrap_used, clippy::expect_used)]

use snapdiff_core::errors::{ExError, ExErrorKind, SnapDiffError};
use snapdiff_core::logging_facility::test_capture::init_test_capture;
use snapdiff_core::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use snapdiff_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, dataset = "article");

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field("dataset"), Some("article"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ExError::new(ExErrorKind::Persistence).with_message("disk full");
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field("err.code"), Some("ERR_PERSISTENCE"));
    // Error is borrowed by the macro, still usable afterwards
    assert_eq!(err.message(), "disk full");
}

#[test]
fn test_log_op_error_accepts_domain_error() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    let err = SnapDiffError::EmptyCollection;
    log_op_error!(op_name, err, duration_ms = 1, dataset = "stock");

    capture.assert_event_exists(op_name, EVENT_END_ERROR);
    let events = capture.events_for_op(op_name);
    assert_eq!(events[0].field("err.code"), Some("ERR_INVALID_INPUT"));
    assert_eq!(events[0].field("dataset"), Some("stock"));
}
