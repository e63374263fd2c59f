use serde_json::Value;

use crate::common::{ValidationResult, Validator};

/// Fields Harvest needs to create a time entry
pub const REQUIRED_FIELDS: [&str; 4] = ["project_id", "task_id", "hours", "spent_date"];

/// Presence-only check on a time-entry creation body.
///
/// Values are not type-checked; Harvest owns the schema and its rejections
/// surface as upstream errors.
pub struct TimeEntryValidator;

impl Validator<Value> for TimeEntryValidator {
    fn validate(&self, data: &Value) -> ValidationResult {
        let mut result = ValidationResult::new();

        match data.as_object() {
            Some(object) => result.require_present(object, &REQUIRED_FIELDS),
            None => result.add_error("body", "must be a JSON object"),
        }

        result
    }
}
