// src/main.rs
use axum::{extract::Extension, http::HeaderValue, middleware, routing::get, Json, Router};
use dotenv::dotenv;
use reqwest::Client;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod auth;
mod common;
mod logging_middleware;
mod projects;
mod services;
mod time_entries;

#[cfg(test)]
mod test_support;

// ============================================================================
// COMMON IMPORTS
// ============================================================================

use common::run_mode::{apply_cli_override, print_run_mode_status};
use common::{AppConfig, AppState, SharedState};

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let config = AppConfig::from_env();
    let run_mode = apply_cli_override(config.run_mode);
    let config = config.with_run_mode(run_mode);
    print_run_mode_status(run_mode);

    if config.harvest.client_id.is_none()
        || config.harvest.client_secret.is_none()
        || config.harvest.redirect_uri.is_none()
    {
        warn!("Harvest OAuth credentials incomplete; login and callback will fail until configured");
    }

    // ========================================================================
    // SERVICE INITIALIZATION
    // ========================================================================

    let mut http_builder = Client::builder();
    if let Some(timeout) = config.http_timeout {
        http_builder = http_builder.timeout(timeout);
    }
    let http_client = http_builder.build()?;

    let shared = AppState::new(&config, http_client).shared();
    info!(
        api_base_url = %config.harvest.api_base_url,
        cookie_name = %config.session.cookie_name,
        "AppState initialized"
    );

    let app = build_app(shared, &config.cors_origins);

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

// ============================================================================
// ROUTER COMPOSITION
// ============================================================================

pub fn build_app(state: SharedState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    Router::new()
        // ====================================================================
        // AUTHENTICATION ROUTES
        // ====================================================================
        .merge(auth::auth_routes())
        // ====================================================================
        // PROXY ROUTES (Project assignments, Time entries)
        // ====================================================================
        .merge(projects::projects_routes())
        .merge(time_entries::time_entries_routes())
        .route("/health", get(health))
        // ====================================================================
        // MIDDLEWARE AND LAYERS
        // ====================================================================
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(state))
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .allow_credentials(true),
        )
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
