//! Integration tests for error handling: service errors, decode and transport failures.

use crate::integration::mock_server::MockServerFixture;
use std::error::Error as _;
use wialon::{ErrorKind, Params, Wialon};

#[test]
fn test_service_error_code_and_reason() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_action("core/search_item", r#"{"error": 4}"#);

    let client = fixture.create_test_client().unwrap();
    let err = client
        .core_search_item(Params::named(serde_json::json!({"id": "x"})).unwrap())
        .unwrap_err();

    assert_eq!(err.code(), 4);
    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(err.reason(), Some("Invalid input"));
    assert!(err.to_string().contains("core_search_item"));
}

#[test]
fn test_error_classification_by_code() {
    let cases = [
        (1, "Invalid session"),
        (7, "Access denied"),
        (8, "Invalid user name or password"),
        (1003, "Only one request of given time is allowed at the moment"),
    ];

    for (code, reason) in cases {
        let mut fixture = MockServerFixture::new();
        let _mock = fixture.mock_action("core/login", &format!(r#"{{"error": {code}}}"#));
        let client = fixture.create_test_client().unwrap();

        let err = client.core_login(Params::empty()).unwrap_err();
        assert_eq!(err.code(), code);
        assert_eq!(err.reason(), Some(reason));
        assert_eq!(err.to_string(), format!("{reason} core_login ({code})"));
    }
}

#[test]
fn test_unknown_code_has_no_guessed_reason() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_action("core/login", r#"{"error": 2024}"#);

    let client = fixture.create_test_client().unwrap();
    let err = client.core_login(Params::empty()).unwrap_err();

    assert_eq!(err.code(), 2024);
    assert_eq!(err.reason(), None);
    assert_eq!(err.to_string(), "core_login (2024)");
}

#[test]
fn test_malformed_json_body_is_a_decode_error() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_raw("/ajax.html", 200, "application/json", "{\"eid\": ");

    let client = fixture.create_test_client().unwrap();
    let err = client.core_login(Params::empty()).unwrap_err();

    assert_eq!(err.code(), 0);
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.text().starts_with("Invalid response: "));
}

#[test]
fn test_http_error_status_without_json_is_a_transport_error() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_raw("/ajax.html", 503, "text/plain", "unavailable");

    let client = fixture.create_test_client().unwrap();
    let err = client.core_login(Params::empty()).unwrap_err();

    assert_eq!(err.code(), 0);
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.text(), "HTTP 503");
}

#[test]
fn test_http_error_status_with_json_error_keeps_service_code() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_raw("/ajax.html", 500, "application/json", r#"{"error": 7}"#);

    let client = fixture.create_test_client().unwrap();
    let err = client.core_login(Params::empty()).unwrap_err();

    assert_eq!(err.code(), 7);
    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(err.to_string(), "Access denied core_login (7)");
}

#[test]
fn test_strict_mode_rejects_non_json() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_raw("/avl_evts", 200, "text/html", "<html/>");

    let client = fixture.builder().strict_content_type(true).build().unwrap();
    let err = client.avl_evts().unwrap_err();

    assert_eq!(err.code(), 0);
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn test_connection_failure_is_code_zero() {
    // Nothing listens on port 1.
    let client = Wialon::builder()
        .base_url_override("http://127.0.0.1:1")
        .build()
        .unwrap();
    let err = client.core_logout(Params::empty()).unwrap_err();

    assert_eq!(err.code(), 0);
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!err.text().is_empty());
    assert!(err.source().is_some());
    assert_eq!(err.context().source.as_deref(), Some("transport"));
}
