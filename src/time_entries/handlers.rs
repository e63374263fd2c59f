//! Time entry proxy handlers

use axum::extract::{rejection::JsonRejection, Extension, Json};
use serde_json::Value;
use tracing::{info, warn};

use super::validators::TimeEntryValidator;
use crate::auth::SessionToken;
use crate::common::{ApiError, SharedState, Validator};

const TIME_ENTRIES_PATH: &str = "/time_entries";

/// GET /api/time-entry
/// Lists the user's time entries as returned by Harvest
pub async fn list_time_entries(
    Extension(state): Extension<SharedState>,
    token: SessionToken,
) -> Result<Json<Value>, ApiError> {
    let entries = state
        .harvest
        .list(token.as_str(), TIME_ENTRIES_PATH, "time_entries")
        .await
        .map_err(|e| e.into_api_error("Failed to fetch time entries"))?;

    Ok(Json(entries))
}

/// POST /api/time-entry
/// Creates a time entry
///
/// # Request Body
/// ```json
/// {
///   "project_id": 14307913,
///   "task_id": 8083365,
///   "hours": 1.5,
///   "spent_date": "2024-01-01",
///   "notes": "optional"
/// }
/// ```
///
/// The body is forwarded as received; the created entry is returned as
/// Harvest sends it.
pub async fn create_time_entry(
    Extension(state): Extension<SharedState>,
    token: SessionToken,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        warn!(error = %e, "Time entry body rejected");
        ApiError::InvalidRequest(format!("Invalid JSON body: {}", e.body_text()))
    })?;

    let validator = TimeEntryValidator;
    let validation_result = validator.validate(&request);
    if !validation_result.is_valid {
        warn!(
            missing = ?validation_result.fields(),
            "Time entry creation validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    info!(
        project_id = %request["project_id"],
        task_id = %request["task_id"],
        spent_date = %request["spent_date"],
        "Creating time entry"
    );

    let created = state
        .harvest
        .create(token.as_str(), TIME_ENTRIES_PATH, &request)
        .await
        .map_err(|e| e.into_api_error("Failed to create time entry"))?;

    Ok(Json(created))
}
