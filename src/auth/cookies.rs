//! Session cookie construction
//!
//! The session token is the only state this service keeps, and it lives in
//! the browser: one HTTP-only cookie with no server-side copy.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::common::config::SessionConfig;

/// Cookie carrying the Harvest access token.
///
/// No `Max-Age`: the cookie lives for the browser session.
pub fn session_cookie(config: &SessionConfig, token: &str) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token.to_string()))
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Removal cookie for the session.
pub fn clear_session_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), ""))
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}
