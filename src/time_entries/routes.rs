// src/time_entries/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// Create the time entry router
pub fn time_entries_routes() -> Router {
    Router::new().route(
        "/api/time-entry",
        get(handlers::list_time_entries).post(handlers::create_time_entry),
    )
}
