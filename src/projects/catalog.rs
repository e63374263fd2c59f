//! Project catalog built from project assignments
//!
//! Harvest returns one assignment per project with its task assignments
//! nested. The form wants projects keyed by id, ordered by client then
//! project name, searchable by either name.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use super::models::{Project, ProjectAssignment, ProjectView, Task, TaskGroup};

/// Groups raw assignments into sorted projects.
///
/// Assignments without a project or task list are skipped. Repeated project
/// ids merge, keeping task encounter order. `billable` is true unless
/// Harvest says `false`.
pub fn build_catalog(assignments: &[Value]) -> Vec<Project> {
    let mut order: Vec<u64> = Vec::new();
    let mut projects: HashMap<u64, Project> = HashMap::new();

    for raw in assignments {
        let assignment = match serde_json::from_value::<ProjectAssignment>(raw.clone()) {
            Ok(assignment) => assignment,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable project assignment");
                continue;
            }
        };

        let (project_ref, task_assignments) =
            match (assignment.project, assignment.task_assignments) {
                (Some(project), Some(tasks)) => (project, tasks),
                _ => {
                    warn!(assignment_id = ?assignment.id, "Invalid assignment data");
                    continue;
                }
            };

        let project = projects.entry(project_ref.id).or_insert_with(|| {
            order.push(project_ref.id);
            Project {
                id: project_ref.id,
                name: project_ref.name.clone(),
                client_name: assignment
                    .client
                    .as_ref()
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
                tasks: Vec::new(),
            }
        });

        project.tasks.extend(task_assignments.into_iter().filter_map(|ta| {
            ta.task.map(|task| Task {
                id: task.id,
                name: task.name,
                billable: ta.billable != Some(false),
            })
        }));
    }

    let mut catalog: Vec<Project> = order
        .into_iter()
        .filter_map(|id| projects.remove(&id))
        .collect();

    catalog.sort_by(|a, b| {
        a.client_name
            .to_lowercase()
            .cmp(&b.client_name.to_lowercase())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    catalog
}

fn contains_text(text: &str, search: &str) -> bool {
    text.to_lowercase().contains(&search.to_lowercase())
}

/// Keeps projects whose name or client name contains `search`, ignoring case.
pub fn filter_projects(projects: Vec<Project>, search: &str) -> Vec<Project> {
    let search = search.trim();
    if search.is_empty() {
        return projects;
    }

    projects
        .into_iter()
        .filter(|p| contains_text(&p.name, search) || contains_text(&p.client_name, search))
        .collect()
}

/// Keeps, in every project, the tasks whose name contains `task_search`,
/// ignoring case. Projects stay listed even when no task matches.
pub fn filter_tasks(projects: Vec<Project>, task_search: &str) -> Vec<Project> {
    let task_search = task_search.trim();
    if task_search.is_empty() {
        return projects;
    }

    projects
        .into_iter()
        .map(|mut project| {
            project.tasks.retain(|t| contains_text(&t.name, task_search));
            project
        })
        .collect()
}

impl Project {
    /// Billable tasks first, then non-billable; empty groups omitted.
    pub fn task_groups(&self) -> Vec<TaskGroup> {
        let (billable, non_billable): (Vec<Task>, Vec<Task>) =
            self.tasks.iter().cloned().partition(|t| t.billable);

        [("Billable", billable), ("Non-Billable", non_billable)]
            .into_iter()
            .filter(|(_, tasks)| !tasks.is_empty())
            .map(|(label, tasks)| TaskGroup { label, tasks })
            .collect()
    }

    pub fn into_view(self) -> ProjectView {
        let task_groups = self.task_groups();
        ProjectView {
            project: self,
            task_groups,
        }
    }
}
