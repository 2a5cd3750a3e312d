//! Tower middleware guarding pages behind a login session.
//!
//! `AuthLayer` and `AuthService` wrap any inner service with session
//! resolution. Generic over `SessionResolver`, so tests can plug in a fake.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::{Request, StatusCode, header};
use tower::{Layer, Service};

use crate::cookie::{removal_cookie, session_id_from_headers};
use crate::{AuthConfig, SessionResolver};

/// Tower `Layer` that wraps services with session authentication.
#[derive(Clone)]
pub struct AuthLayer<R: SessionResolver> {
    resolver: Arc<R>,
    config: AuthConfig,
}

impl<R: SessionResolver> AuthLayer<R> {
    /// Create a new auth layer with the given resolver and config.
    pub fn new(resolver: Arc<R>, config: AuthConfig) -> Self {
        Self { resolver, config }
    }
}

impl<R: SessionResolver, S> Layer<S> for AuthLayer<R> {
    type Service = AuthService<R, S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            resolver: self.resolver.clone(),
            config: self.config.clone(),
        }
    }
}

/// Tower `Service` that resolves the session cookie before forwarding.
///
/// On success, inserts `SessionUser` into request extensions where it's
/// available to downstream handlers. Otherwise the client is redirected to
/// the login page.
#[derive(Clone)]
pub struct AuthService<R: SessionResolver, S> {
    inner: S,
    resolver: Arc<R>,
    config: AuthConfig,
}

impl<R, S> Service<Request<Body>> for AuthService<R, S>
where
    R: SessionResolver,
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let resolver = self.resolver.clone();
        let config = self.config.clone();

        Box::pin(async move {
            let session_id =
                session_id_from_headers(req.headers(), &config.cookie_name).map(str::to_owned);

            let result = match session_id {
                Ok(id) => resolver.resolve(&id).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                Err(auth_err) => {
                    log::debug!("Redirecting {} to login: {auth_err}", req.uri().path());
                    let mut resp = login_redirect(&config.login_path);
                    if auth_err.clears_cookie() {
                        resp.headers_mut()
                            .insert(header::SET_COOKIE, removal_cookie(&config));
                    }
                    Ok(resp)
                }
            }
        })
    }
}

/// `302 Found` to the login page.
pub fn login_redirect(login_path: &str) -> axum::response::Response {
    (StatusCode::FOUND, [(header::LOCATION, login_path.to_string())]).into_response()
}
