//! Tests for auth module
//!
//! These tests drive the real router against a stub token endpoint:
//! - Login redirect and configuration checks
//! - Code exchange and session cookie attributes
//! - Logout cookie removal

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use crate::common::{run_mode::RunMode, AppConfig};
    use crate::test_support::{get, send, test_app, test_config, unreachable_base_url, StubUpstream};

    const TOKEN_PATH: &str = "/api/v2/oauth2/token";

    /// Token endpoint that only accepts the exact exchange body the app should send.
    async fn token_stub() -> StubUpstream {
        StubUpstream::serve(Router::new().route(
            TOKEN_PATH,
            post(|Json(body): Json<Value>| async move {
                let expected = json!({
                    "code": "ABC123",
                    "client_id": "client-123",
                    "client_secret": "secret-456",
                    "redirect_uri": "http://localhost:3000/api/auth/callback",
                    "grant_type": "authorization_code",
                });
                if body == expected {
                    (StatusCode::OK, Json(json!({ "access_token": "tok1", "token_type": "bearer" })))
                } else {
                    (StatusCode::BAD_REQUEST, Json(json!({ "error": "invalid_grant" })))
                }
            }),
        ))
        .await
    }

    async fn failing_token_stub(status: StatusCode) -> StubUpstream {
        StubUpstream::serve(Router::new().route(
            TOKEN_PATH,
            post(move || async move {
                (status, Json(json!({ "error": "invalid_client", "secret": "do-not-echo" })))
            }),
        ))
        .await
    }

    #[tokio::test]
    async fn test_login_without_configuration_returns_500() {
        let config = AppConfig::from_lookup(|_| None);
        let app = test_app(&config);

        let response = send(&app, get("/api/auth/login", None)).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body["error"], "Missing OAuth env vars");
        assert!(response.location().is_none());
    }

    #[tokio::test]
    async fn test_login_redirects_to_authorize_url() {
        let config = test_config("http://id.harvest.test");
        let app = test_app(&config);

        let response = send(&app, get("/api/auth/login", None)).await;

        assert_eq!(response.status, StatusCode::FOUND);
        assert_eq!(
            response.location(),
            Some(
                "http://id.harvest.test/oauth2/authorize?client_id=client-123&response_type=code\
                 &redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fapi%2Fauth%2Fcallback"
            )
        );
        assert!(response.set_cookies().is_empty());
    }

    #[tokio::test]
    async fn test_callback_sets_session_cookie() {
        let stub = token_stub().await;
        let app = test_app(&test_config(&stub.base_url));

        let response = send(&app, get("/api/auth/callback?code=ABC123", None)).await;

        assert_eq!(response.status, StatusCode::FOUND);
        assert_eq!(response.location(), Some("/auth-success"));

        let cookies = response.set_cookies();
        assert_eq!(cookies.len(), 1);
        let cookie = &cookies[0];
        assert!(cookie.starts_with("harvest_token=tok1;"), "cookie was {cookie}");
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Secure"));
        assert!(!cookie.contains("Max-Age"));

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, axum::http::Method::POST);
        assert_eq!(requests[0].path, TOKEN_PATH);
    }

    #[tokio::test]
    async fn test_callback_cookie_is_secure_in_production() {
        let stub = token_stub().await;
        let config = test_config(&stub.base_url).with_run_mode(RunMode::Production);
        let app = test_app(&config);

        let response = send(&app, get("/api/auth/callback?code=ABC123", None)).await;

        assert_eq!(response.status, StatusCode::FOUND);
        assert!(response.set_cookies()[0].contains("Secure"));
    }

    #[tokio::test]
    async fn test_callback_without_code_is_rejected_before_exchange() {
        let stub = token_stub().await;
        let app = test_app(&test_config(&stub.base_url));

        for uri in ["/api/auth/callback", "/api/auth/callback?code="] {
            let response = send(&app, get(uri, None)).await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST);
            assert_eq!(response.body["error"], "No code provided");
        }

        assert_eq!(stub.hits(), 0);
    }

    #[tokio::test]
    async fn test_callback_repeated_code_exchanges_first_value() {
        let stub = token_stub().await;
        let app = test_app(&test_config(&stub.base_url));

        let response = send(&app, get("/api/auth/callback?code=ABC123&code=other", None)).await;

        assert_eq!(response.status, StatusCode::FOUND);
        assert!(response.set_cookies()[0].starts_with("harvest_token=tok1;"));
        assert_eq!(stub.hits(), 1);
    }

    #[tokio::test]
    async fn test_callback_repeated_unknown_code_answers_json() {
        let stub = token_stub().await;
        let app = test_app(&test_config(&stub.base_url));

        let response = send(&app, get("/api/auth/callback?code=a&code=b", None)).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "Failed to get token");
        assert!(response.set_cookies().is_empty());
        assert_eq!(stub.hits(), 1);
    }

    #[tokio::test]
    async fn test_callback_without_secret_returns_500() {
        let stub = token_stub().await;
        let mut config = test_config(&stub.base_url);
        config.harvest.client_secret = None;
        let app = test_app(&config);

        let response = send(&app, get("/api/auth/callback?code=ABC123", None)).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body["error"], "Missing OAuth env vars");
        assert_eq!(stub.hits(), 0);
    }

    #[tokio::test]
    async fn test_callback_mirrors_token_endpoint_status() {
        for status in [StatusCode::BAD_REQUEST, StatusCode::UNAUTHORIZED, StatusCode::BAD_GATEWAY] {
            let stub = failing_token_stub(status).await;
            let app = test_app(&test_config(&stub.base_url));

            let response = send(&app, get("/api/auth/callback?code=ABC123", None)).await;

            assert_eq!(response.status, status);
            assert_eq!(response.body["error"], "Failed to get token");
            assert!(!response.body.to_string().contains("do-not-echo"));
            assert!(response.set_cookies().is_empty());
            assert_eq!(stub.hits(), 1);
        }
    }

    #[tokio::test]
    async fn test_callback_without_access_token_returns_500() {
        let stub = StubUpstream::serve(Router::new().route(
            TOKEN_PATH,
            post(|| async { Json(json!({ "token_type": "bearer" })) }),
        ))
        .await;
        let app = test_app(&test_config(&stub.base_url));

        let response = send(&app, get("/api/auth/callback?code=ABC123", None)).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body["error"], "Failed to get token");
        assert!(response.set_cookies().is_empty());
    }

    #[tokio::test]
    async fn test_callback_with_unreachable_provider_returns_500() {
        let base_url = unreachable_base_url().await;
        let app = test_app(&test_config(&base_url));

        let response = send(&app, get("/api/auth/callback?code=ABC123", None)).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body["error"], "Failed to get token");
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let config = test_config("http://id.harvest.test");
        let app = test_app(&config);

        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/api/auth/logout")
            .header("cookie", "harvest_token=tok1")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = send(&app, request).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["message"], "Logged out");
        let cookies = response.set_cookies();
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].starts_with("harvest_token=;"));
        assert!(cookies[0].contains("Max-Age=0"));
    }
}
