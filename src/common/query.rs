// Query string extractor with JSON rejections

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use tracing::warn;

use super::error::ApiError;

/// Decoded query string pairs.
///
/// A repeated key resolves to its first value, so `?code=a&code=b` reads as
/// `code=a` instead of being rejected.
#[derive(Debug, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Like `get`, with empty values treated as absent.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                warn!(error = %e, "Query string rejected");
                ApiError::InvalidRequest(format!("Invalid query string: {}", e.body_text()))
            })?;
        Ok(QueryParams(pairs))
    }
}
