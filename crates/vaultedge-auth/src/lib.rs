//! Session authentication for VaultEdge.
//!
//! Provides:
//! - [`SessionUser`]: Identity attached to a logged-in session
//! - [`SessionResolver`]: Trait for async session lookup
//! - [`SessionStore`]: In-memory, TTL-bounded implementation
//! - [`AuthLayer`] / [`AuthService`]: Tower middleware parameterised over `SessionResolver`
//! - [`AuthConfig`]: Cookie and redirect settings
//! - [`AuthError`]: Auth-specific error types

mod cookie;
mod error;
mod middleware;
mod session;
mod user;

use std::time::Duration;

pub use cookie::{removal_cookie, session_cookie, session_id_from_headers};
pub use error::AuthError;
pub use middleware::{AuthLayer, AuthService, login_redirect};
pub use session::{MAX_SESSION_TTL, SessionStore};
pub use user::{SessionUser, user_from_parts, username_from_parts};

/// Configuration for the auth middleware and session cookie.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Name of the cookie carrying the session id.
    pub cookie_name: String,
    /// Where unauthenticated requests are redirected.
    pub login_path: String,
    /// Session lifetime; also the cookie's `Max-Age`.
    pub ttl: Duration,
    /// Add the `Secure` attribute to the cookie.
    pub secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: "vaultedge.sid".to_string(),
            login_path: "/login".to_string(),
            ttl: Duration::from_secs(2 * 60 * 60),
            secure: false,
        }
    }
}

/// Trait for resolving a session id into the logged-in user.
///
/// The middleware calls `resolve()` with the id from the session cookie.
pub trait SessionResolver: Send + Sync + 'static {
    /// Resolve a session id.
    fn resolve(
        &self,
        session_id: &str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<SessionUser, AuthError>> + Send + '_>,
    >;
}
