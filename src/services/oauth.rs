// src/services/oauth.rs
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::common::config::HarvestConfig;
use crate::common::ApiError;

const TOKEN_FAILURE_MESSAGE: &str = "Failed to get token";

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("Missing OAuth env vars")]
    NotConfigured,

    #[error("Token endpoint returned HTTP {status}")]
    TokenRejected { status: u16 },

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<OAuthError> for ApiError {
    fn from(err: OAuthError) -> Self {
        match err {
            OAuthError::NotConfigured => ApiError::ConfigurationError(err.to_string()),
            OAuthError::TokenRejected { status } => {
                ApiError::upstream(status, TOKEN_FAILURE_MESSAGE)
            }
            OAuthError::RequestFailed(_) | OAuthError::SerializationError(_) => {
                error!(error = %err, "Token exchange failed");
                ApiError::ServerError(TOKEN_FAILURE_MESSAGE.to_string())
            }
        }
    }
}

/// Body of the authorization-code exchange.
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub code: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
    pub grant_type: &'static str,
}

/// Token endpoint response. Harvest also sends a refresh token, which is
/// dropped: sessions end when the access token expires.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Authorization-code flow against Harvest ID.
pub struct OAuthService {
    client: Client,
    config: HarvestConfig,
}

impl OAuthService {
    pub fn new(client: Client, config: HarvestConfig) -> Self {
        Self { client, config }
    }

    /// Builds the provider authorize URL. Needs the client id and redirect URI.
    pub fn authorization_url(&self) -> Result<String, OAuthError> {
        let (client_id, redirect_uri) =
            match (&self.config.client_id, &self.config.redirect_uri) {
                (Some(id), Some(uri)) => (id, uri),
                _ => return Err(OAuthError::NotConfigured),
            };

        Ok(format!(
            "{}?client_id={}&response_type=code&redirect_uri={}",
            self.config.authorize_url,
            urlencoding::encode(client_id),
            urlencoding::encode(redirect_uri)
        ))
    }

    /// Exchanges an authorization code for an access token. Single attempt.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, OAuthError> {
        let (client_id, client_secret, redirect_uri) = match (
            &self.config.client_id,
            &self.config.client_secret,
            &self.config.redirect_uri,
        ) {
            (Some(id), Some(secret), Some(uri)) => (id, secret, uri),
            _ => return Err(OAuthError::NotConfigured),
        };

        let request = TokenRequest {
            code,
            client_id,
            client_secret,
            redirect_uri,
            grant_type: "authorization_code",
        };

        debug!(token_url = %self.config.token_url, "Exchanging authorization code for token");

        let response = self
            .client
            .post(&self.config.token_url)
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .json(&request)
            .send()
            .await
            .map_err(|e| OAuthError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Token exchange rejected");
            return Err(OAuthError::TokenRejected {
                status: status.as_u16(),
            });
        }

        let token_response = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| OAuthError::SerializationError(e.to_string()))?;

        info!(
            token_type = token_response.token_type.as_deref().unwrap_or("unknown"),
            expires_in = ?token_response.expires_in,
            "Successfully exchanged authorization code for token"
        );
        Ok(token_response)
    }
}
