//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `GET /api/auth/login` - Redirect to the Harvest authorize page
/// - `GET /api/auth/callback` - Exchange the code and set the session cookie
/// - `POST /api/auth/logout` - Clear the session cookie
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/login", get(handlers::login_handler))
        .route("/api/auth/callback", get(handlers::callback_handler))
        .route("/api/auth/logout", post(handlers::logout_handler))
}
