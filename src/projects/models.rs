//! Project assignment shapes as Harvest returns them, and the catalog shapes
//! served to the time entry form.

use serde::{Deserialize, Serialize};

use crate::common::QueryParams;

/// `{id, name}` reference used for clients, projects and tasks
#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskAssignment {
    #[serde(default)]
    pub billable: Option<bool>,
    #[serde(default)]
    pub task: Option<NamedRef>,
}

/// One entry of `/users/me/project_assignments`.
///
/// Everything is optional so one malformed assignment is skipped instead of
/// failing the whole list.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectAssignment {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub client: Option<NamedRef>,
    #[serde(default)]
    pub project: Option<NamedRef>,
    #[serde(default)]
    pub task_assignments: Option<Vec<TaskAssignment>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: u64,
    pub name: String,
    pub billable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskGroup {
    pub label: &'static str,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub client_name: String,
    pub tasks: Vec<Task>,
}

/// Catalog entry with tasks split for display
#[derive(Debug, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub task_groups: Vec<TaskGroup>,
}

/// Catalog filters: `search` narrows projects, `task_search` narrows the
/// tasks inside each project.
#[derive(Debug, Default)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub task_search: Option<String>,
}

impl CatalogQuery {
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            search: params.get("search").map(str::to_string),
            task_search: params.get("task_search").map(str::to_string),
        }
    }
}
