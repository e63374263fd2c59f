//! Project assignment proxy handlers

use axum::extract::{Extension, Json};
use serde_json::Value;
use tracing::debug;

use super::catalog::{build_catalog, filter_projects, filter_tasks};
use super::models::{CatalogQuery, ProjectView};
use crate::auth::SessionToken;
use crate::common::{ApiError, QueryParams, SharedState};

const PROJECT_ASSIGNMENTS_PATH: &str = "/users/me/project_assignments";
const FETCH_FAILURE_MESSAGE: &str = "Failed to fetch project assignments";

async fn fetch_assignments(state: &SharedState, token: &SessionToken) -> Result<Value, ApiError> {
    state
        .harvest
        .list(token.as_str(), PROJECT_ASSIGNMENTS_PATH, "project_assignments")
        .await
        .map_err(|e| e.into_api_error(FETCH_FAILURE_MESSAGE))
}

/// GET /api/project-assignments
/// Returns the session user's project assignments as Harvest sends them
pub async fn list_project_assignments(
    Extension(state): Extension<SharedState>,
    token: SessionToken,
) -> Result<Json<Value>, ApiError> {
    let assignments = fetch_assignments(&state, &token).await?;
    Ok(Json(assignments))
}

/// GET /api/projects?search=...&task_search=...
/// Returns the assignments reshaped into a sorted, optionally filtered
/// project catalog
pub async fn list_projects(
    Extension(state): Extension<SharedState>,
    token: SessionToken,
    params: QueryParams,
) -> Result<Json<Vec<ProjectView>>, ApiError> {
    let query = CatalogQuery::from_params(&params);
    let assignments = fetch_assignments(&state, &token).await?;

    let raw = match assignments {
        Value::Array(items) => items,
        other => {
            return Err(ApiError::ServerError(format!(
                "{}: expected an array, got {}",
                FETCH_FAILURE_MESSAGE,
                json_kind(&other)
            )))
        }
    };

    let catalog = build_catalog(&raw);
    let catalog = match query.search.as_deref() {
        Some(search) => filter_projects(catalog, search),
        None => catalog,
    };
    let catalog = match query.task_search.as_deref() {
        Some(task_search) => filter_tasks(catalog, task_search),
        None => catalog,
    };

    debug!(projects = catalog.len(), "Built project catalog");
    Ok(Json(catalog.into_iter().map(|p| p.into_view()).collect()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
