//! Authentication handlers

use axum::{
    extract::Extension,
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use tracing::{info, warn};

use super::cookies;
use crate::common::{safe_token_log, ApiError, QueryParams, SharedState};

/// `302 Found` with a `Location` header.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// GET /api/auth/login
/// Redirects the user agent to the Harvest authorize endpoint
pub async fn login_handler(
    Extension(state): Extension<SharedState>,
) -> Result<Response, ApiError> {
    let auth_url = state.oauth.authorization_url()?;

    info!("Redirecting to Harvest OAuth");
    Ok(found(&auth_url))
}

/// GET /api/auth/callback?code=...
/// Exchanges the authorization code for an access token and stores it in the
/// session cookie
///
/// # Response
/// `302` to the success page with `Set-Cookie`, or a JSON `{error}`.
pub async fn callback_handler(
    Extension(state): Extension<SharedState>,
    params: QueryParams,
    jar: CookieJar,
) -> Result<(CookieJar, Response), ApiError> {
    if let Some(error) = params.get("error") {
        warn!(oauth_error = %error, "Harvest OAuth returned error");
    }

    let code = match params.non_empty("code") {
        Some(code) => code,
        None => {
            warn!("No authorization code in OAuth callback");
            return Err(ApiError::InvalidRequest("No code provided".to_string()));
        }
    };

    info!("Received OAuth callback with authorization code");

    let token_response = state.oauth.exchange_code(code).await?;

    info!(
        token = %safe_token_log(&token_response.access_token),
        "Session token issued"
    );

    let jar = jar.add(cookies::session_cookie(
        &state.session,
        &token_response.access_token,
    ));

    Ok((jar, found(&state.session.success_path)))
}

/// POST /api/auth/logout
/// Clears the session cookie. Harvest is not contacted.
pub async fn logout_handler(
    Extension(state): Extension<SharedState>,
    jar: CookieJar,
) -> (CookieJar, Json<serde_json::Value>) {
    info!("User logout");
    let jar = jar.add(cookies::clear_session_cookie(&state.session));
    (jar, Json(serde_json::json!({ "message": "Logged out" })))
}
