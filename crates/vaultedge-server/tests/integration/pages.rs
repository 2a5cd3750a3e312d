//! Public pages, static assets and health.

use http::{StatusCode, header};

use crate::common::{TestHarness, body_string, get, get_with_cookie, header_str};

#[tokio::test]
async fn test_landing_page_renders() {
    let harness = TestHarness::new();
    let resp = harness.send(get("/")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(header_str(&resp, header::CONTENT_TYPE).starts_with("text/html"));
    assert_eq!(body_string(resp).await, "<h1>VaultEdge</h1>");
}

#[tokio::test]
async fn test_login_page_has_empty_error() {
    let harness = TestHarness::new();
    let resp = harness.send(get("/login")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.starts_with("<main><form"));
    assert!(!body.contains("{{error}}"));
}

#[tokio::test]
async fn test_login_page_redirects_when_logged_in() {
    let harness = TestHarness::new();
    let cookie = harness.login_as("test", "Test User", "Premium");

    let resp = harness.send(get_with_cookie("/login", &cookie)).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(header_str(&resp, header::LOCATION), "/dashboard");
}

#[tokio::test]
async fn test_login_page_ignores_stale_cookie() {
    let harness = TestHarness::new();
    let resp = harness
        .send(get_with_cookie("/login", "vaultedge.sid=0123456789abcdef"))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_view_is_500() {
    let harness = TestHarness::new();
    std::fs::remove_file(harness.dir.path().join("views/landing.html")).unwrap();

    let resp = harness.send(get("/")).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(resp).await, "Internal Server Error");
}

#[tokio::test]
async fn test_static_assets_served() {
    let harness = TestHarness::new();
    let resp = harness.send(get("/static/app.js")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "console.log('vaultedge');");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let harness = TestHarness::new();
    let resp = harness.send(get("/nope")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let harness = TestHarness::new();
    let resp = harness.send(get("/health")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["server_name"], "VaultEdge");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
