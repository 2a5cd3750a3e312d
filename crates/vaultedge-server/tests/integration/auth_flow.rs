//! Login, the guarded dashboard and logout.

use http::{StatusCode, header};
use serde_json::json;

use axum::body::Body;
use http::Request;

use crate::common::{
    TestHarness, body_string, cookie_pair, get, get_with_cookie, header_str, post_form,
    post_json,
};

#[tokio::test]
async fn test_dashboard_requires_login() {
    let harness = TestHarness::new();
    let resp = harness.send(get("/dashboard")).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(header_str(&resp, header::LOCATION), "/login");
}

#[tokio::test]
async fn test_api_requires_login() {
    let harness = TestHarness::new();
    let resp = harness.send(get("/api/dashboard")).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_bad_password_rerenders_login_with_error() {
    let harness = TestHarness::new();
    let resp = harness
        .send(post_form("/login", "username=test&password=wrong"))
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    let body = body_string(resp).await;
    assert!(body.contains(r#"<div class="form-error">Invalid username or password</div>"#));
}

#[tokio::test]
async fn test_unknown_user_rerenders_login_with_error() {
    let harness = TestHarness::new();
    let resp = harness
        .send(post_json("/login", json!({"username": "ghost", "password": "x"})))
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("form-error"));
}

#[tokio::test]
async fn test_form_login_sets_cookie_and_redirects() {
    let harness = TestHarness::new();
    let resp = harness
        .send(post_form("/login", "username=test&password=test"))
        .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(header_str(&resp, header::LOCATION), "/dashboard");
    let set_cookie = header_str(&resp, header::SET_COOKIE);
    assert!(set_cookie.starts_with("vaultedge.sid="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=7200"));
    assert_eq!(harness.server.state().sessions.len(), 1);
}

#[tokio::test]
async fn test_username_is_matched_exactly() {
    let harness = TestHarness::new();
    let resp = harness
        .send(post_form("/login", "username=+test+&password=test"))
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    assert!(body_string(resp).await.contains("form-error"));
    assert!(harness.server.state().sessions.is_empty());
}

#[tokio::test]
async fn test_malformed_user_row_does_not_block_others() {
    let harness = TestHarness::new();
    let users_file = &harness.server.state().config.data.users_file;
    let mut content = std::fs::read_to_string(users_file).unwrap();
    content.push_str("broken,row\n");
    std::fs::write(users_file, content).unwrap();

    let resp = harness
        .send(post_form("/login", "username=test&password=test"))
        .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(header_str(&resp, header::LOCATION), "/dashboard");

    let resp = harness
        .send(post_form("/login", "username=broken&password=row"))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("form-error"));
}

#[tokio::test]
async fn test_login_without_content_type_shows_error() {
    let harness = TestHarness::new();
    let req = Request::builder()
        .method("POST")
        .uri("/login")
        .body(Body::from("username=test&password=test"))
        .unwrap();
    let resp = harness.send(req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("Invalid username or password"));
    assert!(harness.server.state().sessions.is_empty());
}

#[tokio::test]
async fn test_full_login_dashboard_logout_flow() {
    let harness = TestHarness::new();

    let login = harness
        .send(post_json(
            "/login",
            json!({"username": "jane", "password": "finance2"}),
        ))
        .await;
    assert_eq!(login.status(), StatusCode::FOUND);
    let cookie = cookie_pair(&login);

    let dash = harness.send(get_with_cookie("/dashboard", &cookie)).await;
    assert_eq!(dash.status(), StatusCode::OK);
    let body = body_string(dash).await;
    assert!(body.contains("<header>Jane Mitchell|JM|Standard Member|Jane</header>"));
    assert!(body.contains("data-target"));
    assert!(!body.contains("{{"));

    let logout = harness.send(get_with_cookie("/logout", &cookie)).await;
    assert_eq!(logout.status(), StatusCode::FOUND);
    assert_eq!(header_str(&logout, header::LOCATION), "/");
    assert!(header_str(&logout, header::SET_COOKIE).contains("Max-Age=0"));
    assert!(harness.server.state().sessions.is_empty());

    let after = harness.send(get_with_cookie("/dashboard", &cookie)).await;
    assert_eq!(after.status(), StatusCode::FOUND);
    assert_eq!(header_str(&after, header::LOCATION), "/login");
}

#[tokio::test]
async fn test_dashboard_escapes_display_name() {
    let harness = TestHarness::new();
    let cookie = harness.login_as("mallory", "<b>Mal</b> Lory", "Premium");

    let resp = harness.send(get_with_cookie("/dashboard", &cookie)).await;
    let body = body_string(resp).await;
    assert!(body.contains("&lt;b&gt;Mal&lt;/b&gt; Lory"));
    assert!(!body.contains("<b>Mal"));
}

#[tokio::test]
async fn test_logout_without_session_still_redirects() {
    let harness = TestHarness::new();
    let resp = harness.send(get("/logout")).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(header_str(&resp, header::LOCATION), "/");
}

#[tokio::test]
async fn test_expired_session_redirects_to_login() {
    let harness = TestHarness::with_config(|c| c.session.ttl_secs = 1);
    let cookie = harness.login_as("test", "Test User", "Premium");

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let resp = harness.send(get_with_cookie("/dashboard", &cookie)).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(header_str(&resp, header::SET_COOKIE).contains("Max-Age=0"));
}

#[tokio::test]
async fn test_api_dashboard_payload() {
    let harness = TestHarness::new();
    let cookie = harness.login_as("test", "Test User", "Premium");

    let resp = harness
        .send(get_with_cookie("/api/dashboard?width=600&height=300", &cookie))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(body["kpis"].as_array().unwrap().len(), 4);
    assert_eq!(body["transactions"].as_array().unwrap().len(), 7);
    assert_eq!(body["spending"].as_array().unwrap().len(), 4);
    assert_eq!(body["portfolio"]["width"], 600.0);
    assert_eq!(body["portfolio"]["height"], 300.0);
}

#[tokio::test]
async fn test_api_dashboard_defaults_size() {
    let harness = TestHarness::new();
    let cookie = harness.login_as("test", "Test User", "Premium");

    let resp = harness
        .send(get_with_cookie("/api/dashboard", &cookie))
        .await;
    let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(body["portfolio"]["width"], 720.0);
    assert_eq!(body["portfolio"]["height"], 280.0);
}
