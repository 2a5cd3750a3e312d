//! Logged-in user identity and extraction helpers.

use axum::extract::FromRequestParts;
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// The user attached to a live session.
///
/// Inserted into request extensions by [`AuthService`](crate::AuthService)
/// and available to handlers as an extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    pub display_name: String,
    pub role: String,
}

/// Extract the `SessionUser` from HTTP request `Parts`, if present.
pub fn user_from_parts(parts: &http::request::Parts) -> Option<&SessionUser> {
    parts.extensions.get::<SessionUser>()
}

/// Username from `Parts`, or `"anonymous"` on unguarded routes.
pub fn username_from_parts(parts: &http::request::Parts) -> &str {
    user_from_parts(parts)
        .map(|u| u.username.as_str())
        .unwrap_or("anonymous")
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        user_from_parts(parts)
            .cloned()
            .ok_or(AuthError::MissingSession)
    }
}
