//! End-to-end dispatch: encoding on the wire, session handling, event polling.

use crate::integration::mock_server::MockServerFixture;
use mockito::Matcher;
use serde_json::{json, Map, Value};
use wialon::{Params, Response};

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_keyword_call_is_sent_as_params_object() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture.mock_action_with_query(
        "core/login",
        vec![Matcher::UrlEncoded(
            "params".into(),
            r#"{"password":"test","user":"wialon_test"}"#.into(),
        )],
        r#"{"eid": "5a1c0e8f", "user": {"nm": "wialon_test"}}"#,
    );

    let client = fixture.create_test_client().unwrap();
    let resp = client
        .invoke(
            "core_login",
            vec![],
            object(json!({"password": "test", "user": "wialon_test"})),
        )
        .unwrap();

    mock.assert();
    assert_eq!(resp.get("eid"), Some(&json!("5a1c0e8f")));
}

#[test]
fn test_only_first_underscore_is_translated_on_the_wire() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture.mock_action("unit/update_name", r#"{"nm": "Truck 7"}"#);

    let client = fixture.create_test_client().unwrap();
    let params = Params::named(json!({"itemId": 734455, "name": "Truck 7"})).unwrap();
    client.unit_update_name(params).unwrap();

    mock.assert();
}

#[test]
fn test_login_then_poll_events_with_session() {
    let mut fixture = MockServerFixture::new();
    let login = fixture.mock_action("token/login", r#"{"eid": "sess-01", "tm": 1700000000}"#);
    let events = fixture
        .server
        .mock("GET", "/avl_evts")
        .match_query(Matcher::UrlEncoded("sid".into(), "sess-01".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"tm": 1700000001, "events": []}"#)
        .create();

    let client = fixture
        .builder()
        .extra_param("lang", "en")
        .build()
        .unwrap();
    client
        .login("token_login", Params::named(json!({"token": "abc"})).unwrap())
        .unwrap();
    let resp = client.avl_evts().unwrap();

    login.assert();
    events.assert();
    assert_eq!(resp.get("events"), Some(&json!([])));
}

#[test]
fn test_sdk_pro_sends_ssid_and_extra_params() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture.mock_action_with_query(
        "core/search_items",
        vec![
            Matcher::UrlEncoded("ssid".into(), "pro-session".into()),
            Matcher::UrlEncoded("lang".into(), "ru".into()),
        ],
        r#"{"items": [], "totalItemsCount": 0}"#,
    );

    let client = fixture
        .builder()
        .sdk_pro(true)
        .sid("pro-session")
        .extra_param("lang", "ru")
        .build()
        .unwrap();
    let resp = client
        .core_search_items(Params::named(json!({"spec": {}, "flags": 1})).unwrap())
        .unwrap();

    mock.assert();
    assert_eq!(resp.get("totalItemsCount"), Some(&json!(0)));
}

#[test]
fn test_unicode_params_arrive_intact() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture.mock_action_with_query(
        "unit/update_name",
        vec![Matcher::UrlEncoded(
            "params".into(),
            r#"{"itemId":1,"name":"Грузовик №1"}"#.into(),
        )],
        r#"{"nm": "Грузовик №1"}"#,
    );

    let client = fixture.create_test_client().unwrap();
    let resp = client
        .call(
            "unit_update_name",
            Params::named(json!({"itemId": 1, "name": "Грузовик №1"})).unwrap(),
        )
        .unwrap();

    mock.assert();
    assert_eq!(resp.get("nm"), Some(&json!("Грузовик №1")));
}

#[test]
fn test_non_json_response_is_returned_undecoded() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture.mock_raw("/ajax.html", 200, "text/html", "<html>maintenance</html>");

    let client = fixture.create_test_client().unwrap();
    let resp = client.call("core_get_time", Params::empty()).unwrap();

    mock.assert();
    assert!(resp.is_undecoded());
    assert_eq!(resp.clone().into_value(), None);
    assert!(matches!(resp, Response::Undecoded { ref body, .. } if body.contains("maintenance")));
}
