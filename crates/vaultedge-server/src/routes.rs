//! Route handlers.

use std::path::PathBuf;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use http::{HeaderMap, StatusCode, header};
use serde::{Deserialize, Serialize};
use vaultedge_auth::{SessionUser, removal_cookie, session_cookie, session_id_from_headers};
use vaultedge_core::dashboard::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};
use vaultedge_core::users::{first_name, initials, role_label};
use vaultedge_core::{ContactMessage, Context, DashboardPayload, template};

use crate::extract::FormOrJson;
use crate::state::AppState;
use crate::{Error, Result};

/// Shown above the login form after a failed attempt.
pub const LOGIN_ERROR_HTML: &str =
    r#"<div class="form-error">Invalid username or password</div>"#;

const CONTACT_OK: &str = "Thank you! We will get back to you soon.";
const CONTACT_FAILED: &str = "Something went wrong.";

const MIN_CHART_DIM: f64 = 100.0;
const MAX_CHART_DIM: f64 = 4096.0;

/// Credentials posted by the login form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Fields posted by the landing page contact form. Missing fields are empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Body of the `/contact` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

/// Canvas size the client wants chart geometry for.
#[derive(Debug, Default, Deserialize)]
pub struct ChartSize {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Body of `/health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub server_name: String,
    pub version: String,
}

/// `302 Found` to `location`.
pub fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

async fn render_view(path: PathBuf, ctx: &Context) -> Result<Html<String>> {
    let source = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| vaultedge_core::Error::io_with_path(e, &path))?;
    Ok(Html(template::render(&source, ctx)))
}

/// GET `/`
pub async fn landing(State(state): State<AppState>) -> Result<Html<String>> {
    render_view(state.config.web.landing_template(), &Context::new()).await
}

/// GET `/login`
pub async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    let logged_in = session_id_from_headers(&headers, &state.auth.cookie_name)
        .is_ok_and(|id| state.sessions.get(id).is_ok());
    if logged_in {
        return Ok(redirect("/dashboard"));
    }

    let ctx = Context::new().insert("error", "");
    Ok(render_view(state.config.web.login_template(), &ctx)
        .await?
        .into_response())
}

/// POST `/login`
pub async fn login_submit(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<LoginForm>,
) -> Result<Response> {
    let users = state.users.clone();
    let LoginForm { username, password } = form;
    let attempted = username.clone();
    // bcrypt verification blocks.
    let record = tokio::task::spawn_blocking(move || users.authenticate(&username, &password))
        .await??;

    let Some(record) = record else {
        tracing::info!("Failed login for '{attempted}'");
        let ctx = Context::new().insert("error", LOGIN_ERROR_HTML);
        return Ok(render_view(state.config.web.login_template(), &ctx)
            .await?
            .into_response());
    };

    tracing::info!("User '{}' logged in", record.username);
    let session_id = state.sessions.create(SessionUser {
        username: record.username,
        display_name: record.display_name,
        role: record.role,
    });

    let mut resp = redirect("/dashboard");
    resp.headers_mut()
        .insert(header::SET_COOKIE, session_cookie(&state.auth, &session_id));
    Ok(resp)
}

/// GET `/dashboard`
pub async fn dashboard(State(state): State<AppState>, user: SessionUser) -> Result<Html<String>> {
    let board = &state.dashboard;
    let ctx = Context::new()
        .insert_escaped("USER_NAME", &user.display_name)
        .insert_escaped("USER_INITIALS", &initials(&user.display_name))
        .insert_escaped("USER_ROLE", &role_label(&user.role))
        .insert_escaped("FIRST_NAME", first_name(&user.display_name))
        .insert("KPI_CARDS", board.kpi_cards_html())
        .insert("TRANSACTIONS", board.transactions_html())
        .insert("SPENDING_BARS", board.spending_html())
        .insert("DONUT_LEGEND", board.donut_legend_html());

    render_view(state.config.web.dashboard_template(), &ctx).await
}

fn chart_dim(requested: Option<f64>, default: f64) -> f64 {
    requested
        .filter(|v| v.is_finite() && *v > 0.0)
        .map_or(default, |v| v.clamp(MIN_CHART_DIM, MAX_CHART_DIM))
}

/// GET `/api/dashboard`
pub async fn dashboard_data(
    State(state): State<AppState>,
    user: SessionUser,
    Query(size): Query<ChartSize>,
) -> Json<DashboardPayload> {
    let width = chart_dim(size.width, DEFAULT_CHART_WIDTH);
    let height = chart_dim(size.height, DEFAULT_CHART_HEIGHT);
    tracing::debug!("Dashboard data for '{}' at {width}x{height}", user.username);
    Json(state.dashboard.payload(width, height))
}

/// POST `/contact`
pub async fn contact(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<ContactForm>,
) -> (StatusCode, Json<ContactResponse>) {
    let msg = ContactMessage::new(form.name, form.email, form.subject, form.message);
    let log = state.contacts.clone();

    let outcome = tokio::task::spawn_blocking(move || log.append(&msg)).await;
    match outcome {
        Ok(Ok(())) => {
            tracing::info!("Contact submission saved");
            (
                StatusCode::OK,
                Json(ContactResponse {
                    success: true,
                    message: CONTACT_OK.to_string(),
                }),
            )
        }
        Ok(Err(e)) => contact_failed(&Error::from(e)),
        Err(e) => contact_failed(&Error::from(e)),
    }
}

fn contact_failed(err: &Error) -> (StatusCode, Json<ContactResponse>) {
    tracing::error!("Contact submission failed: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ContactResponse {
            success: false,
            message: CONTACT_FAILED.to_string(),
        }),
    )
}

/// GET `/logout`
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Ok(id) = session_id_from_headers(&headers, &state.auth.cookie_name)
        && state.sessions.destroy(id)
    {
        tracing::info!("Session ended");
    }

    let mut resp = redirect("/");
    resp.headers_mut()
        .insert(header::SET_COOKIE, removal_cookie(&state.auth));
    resp
}

/// GET `/health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        server_name: state.config.site_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
