//! Shared fixtures for handler tests: a stub Harvest server that records
//! every request it sees, and helpers to drive the real router.

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    middleware::{self, Next},
    Router,
};
use reqwest::Client;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::{net::TcpListener, task::JoinHandle};
use tower::ServiceExt;

use crate::common::{AppConfig, AppState};

pub const COOKIE_NAME: &str = "harvest_token";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub account_id: Option<String>,
}

/// Stub upstream bound to an ephemeral local port
pub struct StubUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl StubUpstream {
    pub async fn serve(router: Router) -> Self {
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));
        let recorder = requests.clone();

        let app = router.layer(middleware::from_fn(move |req: Request<Body>, next: Next| {
            let recorder = recorder.clone();
            async move {
                // Request<Body> is not Sync; the borrow must end before the await.
                let recorded = {
                    let header_value = |name: &str| {
                        req.headers()
                            .get(name)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string)
                    };
                    RecordedRequest {
                        method: req.method().clone(),
                        path: req.uri().path().to_string(),
                        authorization: header_value("authorization"),
                        account_id: header_value("harvest-account-id"),
                    }
                };
                recorder.lock().unwrap().push(recorded);
                next.run(req).await
            }
        }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
            handle,
        }
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for StubUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Base URL of a port that refuses connections.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Fully configured app pointed at `upstream` for both OAuth and the API.
pub fn test_config(upstream: &str) -> AppConfig {
    let mut config = AppConfig::from_lookup(|_| None);
    config.harvest.client_id = Some("client-123".to_string());
    config.harvest.client_secret = Some("secret-456".to_string());
    config.harvest.redirect_uri = Some("http://localhost:3000/api/auth/callback".to_string());
    config.harvest.authorize_url = format!("{}/oauth2/authorize", upstream);
    config.harvest.token_url = format!("{}/api/v2/oauth2/token", upstream);
    config.harvest.api_base_url = format!("{}/v2", upstream);
    config
}

pub fn test_app(config: &AppConfig) -> Router {
    let http = Client::builder().no_proxy().build().unwrap();
    crate::build_app(AppState::new(config, http).shared(), &config.cors_origins)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("{}={}", COOKIE_NAME, token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("{}={}", COOKIE_NAME, token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// Runs one request through `app`. Non-JSON bodies come back as `Null`.
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    TestResponse {
        status,
        headers,
        body,
    }
}
