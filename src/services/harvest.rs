// src/services/harvest.rs
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::common::config::HarvestConfig;
use crate::common::ApiError;

const ACCOUNT_ID_HEADER: &str = "Harvest-Account-Id";

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Harvest rejected the access token (HTTP {0})")]
    Unauthorized(u16),

    #[error("Harvest API error: {0}")]
    Status(u16),

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response body: {0}")]
    InvalidResponse(String),
}

impl HarvestError {
    /// Maps to the local error taxonomy. `failure_message` is what the caller
    /// sees when the request itself broke.
    pub fn into_api_error(self, failure_message: &str) -> ApiError {
        match self {
            HarvestError::Unauthorized(status) => {
                warn!(status, "Harvest rejected session token");
                ApiError::Unauthenticated("Not authenticated with Harvest".to_string())
            }
            HarvestError::Status(status) => {
                warn!(status, "Harvest returned error status");
                ApiError::upstream(status, format!("Harvest API error: {}", status))
            }
            HarvestError::RequestFailed(_) | HarvestError::InvalidResponse(_) => {
                error!(error = %self, "{}", failure_message);
                ApiError::ServerError(failure_message.to_string())
            }
        }
    }
}

/// Thin bearer-authenticated client for the Harvest v2 REST API.
///
/// Every call is exactly one request; nothing is cached or retried.
pub struct HarvestClient {
    client: Client,
    base_url: String,
    account_id: Option<String>,
    user_agent: String,
}

impl HarvestClient {
    pub fn new(client: Client, config: &HarvestConfig) -> Self {
        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            account_id: config.account_id.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        let request = request
            .bearer_auth(token)
            .header(reqwest::header::USER_AGENT, &self.user_agent);
        match &self.account_id {
            Some(account_id) => request.header(ACCOUNT_ID_HEADER, account_id),
            None => request,
        }
    }

    /// GETs a list resource and returns the array under `field`.
    /// An absent or `null` field yields an empty array.
    pub async fn list(&self, token: &str, path: &str, field: &str) -> Result<Value, HarvestError> {
        let url = self.url(path);
        debug!(url = %url, field, "Fetching Harvest list resource");

        let response = self
            .authorize(self.client.get(&url), token)
            .send()
            .await
            .map_err(|e| HarvestError::RequestFailed(e.to_string()))?;

        let body = Self::json_body(response).await?;
        Ok(extract_list(body, field))
    }

    /// POSTs `body` verbatim and returns the created resource verbatim.
    pub async fn create(&self, token: &str, path: &str, body: &Value) -> Result<Value, HarvestError> {
        let url = self.url(path);
        debug!(url = %url, "Creating Harvest resource");

        let response = self
            .authorize(self.client.post(&url), token)
            .json(body)
            .send()
            .await
            .map_err(|e| HarvestError::RequestFailed(e.to_string()))?;

        Self::json_body(response).await
    }

    async fn json_body(response: Response) -> Result<Value, HarvestError> {
        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => HarvestError::Unauthorized(status.as_u16()),
                other => HarvestError::Status(other),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| HarvestError::InvalidResponse(e.to_string()))
    }
}

fn extract_list(mut body: Value, field: &str) -> Value {
    match body.get_mut(field).map(Value::take) {
        Some(Value::Null) | None => Value::Array(Vec::new()),
        Some(list) => list,
    }
}
