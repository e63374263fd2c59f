// src/logging_middleware.rs
//! Middleware for logging proxied request and response bodies at debug level

use axum::body::{to_bytes, HttpBody};
use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::{debug, Level};

/// Paths whose bodies may carry credentials and are never logged.
const UNLOGGED_PREFIX: &str = "/api/auth/";

/// Largest body buffered for logging. Larger or unsized bodies stream through.
const MAX_LOGGED_BODY: usize = 1024 * 1024;

fn fits_log_limit(exact_size: Option<u64>) -> bool {
    exact_size.is_some_and(|size| size <= MAX_LOGGED_BODY as u64)
}

fn render_body(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let body_str = std::str::from_utf8(bytes).ok()?;
    // Pretty print JSON when possible
    Some(
        serde_json::from_str::<serde_json::Value>(body_str)
            .ok()
            .and_then(|json| serde_json::to_string_pretty(&json).ok())
            .unwrap_or_else(|| body_str.to_string()),
    )
}

/// Logs request and response bodies when debug logging is enabled.
/// Auth routes pass through untouched.
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !tracing::enabled!(Level::DEBUG) || request.uri().path().starts_with(UNLOGGED_PREFIX) {
        return Ok(next.run(request).await);
    }

    if !fits_log_limit(request.body().size_hint().exact()) {
        debug!(uri = %request.uri(), "Request body too large to log");
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_LOGGED_BODY)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if let Some(request_body) = render_body(&bytes) {
        debug!(
            method = %parts.method,
            uri = %parts.uri,
            request_body = %request_body,
            "📥 Request"
        );
    }

    let method = parts.method.clone();
    let uri = parts.uri.clone();
    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

    if !fits_log_limit(response.body().size_hint().exact()) {
        debug!(method = %method, uri = %uri, "Response body too large to log");
        return Ok(response);
    }

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, MAX_LOGGED_BODY)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if let Some(response_body) = render_body(&bytes) {
        debug!(
            method = %method,
            uri = %uri,
            status = %parts.status,
            response_body = %response_body,
            "📤 Response"
        );
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}
