//! Common test harness for the server integration tests.

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Request, Response, header};
use tempfile::TempDir;
use tower::ServiceExt;
use vaultedge_auth::SessionUser;
use vaultedge_core::config::{DataConfig, WebConfig};
use vaultedge_core::{UserRecord, UserStore, VaultConfig};
use vaultedge_server::Server;

/// Cheap bcrypt cost so tests stay fast.
pub const TEST_COST: u32 = 4;

const LANDING: &str = "<h1>VaultEdge</h1>";
const LOGIN: &str = "<main>{{error}}<form method=\"post\" action=\"/login\"></form></main>";
const DASHBOARD: &str = "<header>{{USER_NAME}}|{{USER_INITIALS}}|{{USER_ROLE}}|{{FIRST_NAME}}</header>\
<section>{{KPI_CARDS}}</section><ul>{{TRANSACTIONS}}</ul>";

/// A server over a throwaway directory holding views and seeded users.
pub struct TestHarness {
    pub dir: TempDir,
    pub server: Server,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Build the harness, letting the caller adjust the config first.
    pub fn with_config(adjust: impl FnOnce(&mut VaultConfig)) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let views = dir.path().join("views");
        let static_dir = dir.path().join("static");
        std::fs::create_dir_all(&views).unwrap();
        std::fs::create_dir_all(&static_dir).unwrap();
        std::fs::write(views.join("landing.html"), LANDING).unwrap();
        std::fs::write(views.join("login.html"), LOGIN).unwrap();
        std::fs::write(views.join("index.html"), DASHBOARD).unwrap();
        std::fs::write(static_dir.join("app.js"), "console.log('vaultedge');").unwrap();

        let mut config = VaultConfig {
            data: DataConfig::in_dir(dir.path().join("data")),
            web: WebConfig {
                views_dir: views,
                static_dir,
            },
            ..VaultConfig::default()
        };
        adjust(&mut config);

        let store = UserStore::new(&config.data.users_file);
        store
            .write_all(&[
                UserRecord::new("test", "test", "Test User", "Premium", TEST_COST).unwrap(),
                UserRecord::new("jane", "finance2", "Jane Mitchell", "Standard", TEST_COST)
                    .unwrap(),
            ])
            .unwrap();

        let server = Server::new(config).unwrap();
        Self { dir, server }
    }

    pub fn router(&self) -> Router {
        self.server.router()
    }

    /// Create a session directly and return the `Cookie` header for it.
    pub fn login_as(&self, username: &str, display_name: &str, role: &str) -> String {
        let state = self.server.state();
        let id = state.sessions.create(SessionUser {
            username: username.to_string(),
            display_name: display_name.to_string(),
            role: role.to_string(),
        });
        format!("{}={id}", state.auth.cookie_name)
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router().oneshot(req).await.unwrap()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn header_str<'a>(resp: &'a Response<Body>, name: header::HeaderName) -> &'a str {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// `name=value` part of a `Set-Cookie` header, ready to send back.
pub fn cookie_pair(resp: &Response<Body>) -> String {
    header_str(resp, header::SET_COOKIE)
        .split(';')
        .next()
        .unwrap_or("")
        .to_string()
}
