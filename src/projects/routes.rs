// src/projects/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// Create the projects router
pub fn projects_routes() -> Router {
    Router::new()
        .route(
            "/api/project-assignments",
            get(handlers::list_project_assignments),
        )
        .route("/api/projects", get(handlers::list_projects))
}
