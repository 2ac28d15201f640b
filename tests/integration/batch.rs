//! Batch calls: positional arguments become one request with a JSON array.

use crate::integration::mock_server::MockServerFixture;
use mockito::Matcher;
use serde_json::{json, Map};
use wialon::ErrorKind;

#[test]
fn test_batch_is_one_round_trip_with_ordered_array() {
    let mut fixture = MockServerFixture::new();
    let sub_calls = vec![
        json!({"svc": "core/search_item", "params": {"id": 1, "flags": 1}}),
        json!({"svc": "core/search_item", "params": {"id": 2, "flags": 1}}),
    ];
    let mock = fixture.mock_action_with_query(
        "core/batch",
        vec![Matcher::UrlEncoded(
            "params".into(),
            serde_json::to_string(&sub_calls).unwrap(),
        )],
        r#"[{"item": {"id": 1}}, {"item": {"id": 2}}]"#,
    );

    let client = fixture.create_test_client().unwrap();
    let resp = client.invoke("core_batch", sub_calls, Map::new()).unwrap();

    mock.assert();
    let items = resp.as_list().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["item"]["id"], json!(2));
}

#[test]
fn test_batch_item_errors_are_merged_into_one_error() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_action("core/batch", r#"[{"error": 1}, {"ok": true}, {"error": 7}]"#);

    let client = fixture.create_test_client().unwrap();
    let err = client
        .invoke("core_batch", vec![json!({}), json!({}), json!({})], Map::new())
        .unwrap_err();

    assert_eq!(err.code(), 0);
    assert_eq!(err.kind(), ErrorKind::Batch);
    let text = err.to_string();
    assert!(text.contains("Invalid session (1)"), "{text}");
    assert!(text.contains("Access denied (7)"), "{text}");
    assert!(text.contains("core_batch"), "{text}");
}
