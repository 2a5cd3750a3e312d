//! Session cookie parsing and `Set-Cookie` construction.

use http::{HeaderMap, HeaderValue, header};

use crate::{AuthConfig, AuthError};

/// Find `name` in the request's `Cookie` headers.
///
/// Returns `Err(MissingSession)` when absent and `Err(InvalidCookie)` when
/// the value is not a plausible session id.
pub fn session_id_from_headers<'a>(
    headers: &'a HeaderMap,
    name: &str,
) -> Result<&'a str, AuthError> {
    let value = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim_matches('"'))
        .ok_or(AuthError::MissingSession)?;

    if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(AuthError::InvalidCookie(value.to_string()));
    }
    Ok(value)
}

/// `Set-Cookie` value that establishes the session.
pub fn session_cookie(config: &AuthConfig, session_id: &str) -> HeaderValue {
    let mut cookie = format!(
        "{}={session_id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        config.cookie_name,
        config.ttl.as_secs()
    );
    if config.secure {
        cookie.push_str("; Secure");
    }
    to_header_value(cookie)
}

/// `Set-Cookie` value that removes the session cookie.
pub fn removal_cookie(config: &AuthConfig) -> HeaderValue {
    to_header_value(format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        config.cookie_name
    ))
}

fn to_header_value(cookie: String) -> HeaderValue {
    // Cookie names are validated at config load and ids are alphanumeric.
    HeaderValue::from_str(&cookie).unwrap_or_else(|e| {
        log::error!("Unrepresentable Set-Cookie value: {e}");
        HeaderValue::from_static("")
    })
}
