//! Auth-specific error types.

use axum::response::{IntoResponse, Response};
use http::StatusCode;

/// Errors that can occur while resolving a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No session cookie on the request.
    #[error("missing session cookie")]
    MissingSession,

    /// Cookie value is not a well-formed session id.
    #[error("invalid session cookie: {0}")]
    InvalidCookie(String),

    /// The id is not in the session store (logged out or server restarted).
    #[error("unknown session")]
    UnknownSession,

    /// The session existed but its lifetime ran out.
    #[error("session has expired")]
    Expired,
}

impl AuthError {
    /// Whether the client holds a stale cookie that should be cleared.
    pub fn clears_cookie(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCookie(_) | AuthError::UnknownSession | AuthError::Expired
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, self.to_string()).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(AuthError::MissingSession.to_string(), "missing session cookie");
        assert_eq!(
            AuthError::InvalidCookie("x y".into()).to_string(),
            "invalid session cookie: x y"
        );
    }

    #[test]
    fn test_clears_cookie() {
        assert!(!AuthError::MissingSession.clears_cookie());
        assert!(AuthError::Expired.clears_cookie());
        assert!(AuthError::UnknownSession.clears_cookie());
    }

    #[test]
    fn test_into_response_is_401() {
        let resp = AuthError::Expired.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
