//! Session extractor for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use tracing::{debug, warn};

use crate::common::{safe_token_log, ApiError, SharedState};

/// Bearer token read from the session cookie
///
/// Only presence is checked here. Whether Harvest still accepts the token is
/// discovered on the upstream call. As a parts extractor this runs before any
/// body extractor, so unauthenticated requests are rejected before their body
/// is looked at.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app_state): Extension<SharedState> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::ServerError("missing app state".to_string()))?;

        let jar = match CookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };

        let token = jar
            .get(&app_state.session.cookie_name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty());

        match token {
            Some(token) => {
                debug!(token = %safe_token_log(&token), "Session cookie present");
                Ok(SessionToken(token))
            }
            None => {
                warn!(path = %parts.uri.path(), "Authentication failed: missing session cookie");
                Err(ApiError::Unauthenticated("Not authenticated".into()))
            }
        }
    }
}
