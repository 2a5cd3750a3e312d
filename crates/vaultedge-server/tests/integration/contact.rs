//! Contact form submissions.

use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::json;
use vaultedge_core::ContactLog;

use crate::common::{TestHarness, body_string, post_form, post_json};

#[tokio::test]
async fn test_form_contact_is_stored() {
    let harness = TestHarness::new();
    let resp = harness
        .send(post_form(
            "/contact",
            "name=Ann+Lee&email=ann%40example.com&subject=Hi&message=Call+me%2C+please",
        ))
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Thank you! We will get back to you soon.");

    let log = ContactLog::new(&harness.server.state().config.data.contacts_file);
    let stored = log.read_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Ann Lee");
    assert_eq!(stored[0].email, "ann@example.com");
    assert_eq!(stored[0].message, "Call me, please");
    assert!(stored[0].timestamp.ends_with('Z'));
}

#[tokio::test]
async fn test_json_contact_with_missing_fields() {
    let harness = TestHarness::new();
    let resp = harness
        .send(post_json("/contact", json!({"name": "Bo", "message": "quote \" here"})))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let path = &harness.server.state().config.data.contacts_file;
    let raw = std::fs::read_to_string(path).unwrap();
    let mut lines = raw.lines();
    assert_eq!(lines.next(), Some("timestamp,name,email,subject,message"));
    let row = lines.next().unwrap();
    assert!(row.ends_with(r#","Bo","","","quote "" here""#));
}

#[tokio::test]
async fn test_contact_failure_returns_json_500() {
    let harness = TestHarness::with_config(|c| {
        // Parent of the contacts file is a regular file, so the append fails.
        c.data.contacts_file = c.data.users_file.join("contacts.csv");
    });

    let resp = harness
        .send(post_json("/contact", json!({"name": "Bo"})))
        .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Something went wrong.");
}

#[tokio::test]
async fn test_plain_text_contact_stores_empty_row() {
    let harness = TestHarness::new();
    let req = Request::builder()
        .method("POST")
        .uri("/contact")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("hello"))
        .unwrap();
    let resp = harness.send(req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let log = ContactLog::new(&harness.server.state().config.data.contacts_file);
    let stored = log.read_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].name.is_empty());
    assert!(stored[0].message.is_empty());
}
