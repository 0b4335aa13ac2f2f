//! Immutable per-refresh view of all active projects and tasks.

use super::{Project, ProjectId, Task, TaskId};
use std::collections::{HashMap, HashSet};

/// The coordinator's view of all active projects and tasks as of one
/// successful refresh.
///
/// A snapshot is built fresh on every refresh and replaced wholesale; it is
/// never mutated after publication. Completed tasks are excluded before a
/// snapshot is assembled, every task in the flattened map belongs to exactly
/// one project in the same snapshot, and task ids are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<TaskId, Task>,
}

impl Snapshot {
    /// Assembles a snapshot from a project map and the flattened task map.
    #[must_use]
    pub const fn new(projects: HashMap<ProjectId, Project>, tasks: HashMap<TaskId, Task>) -> Self {
        Self { projects, tasks }
    }

    /// Returns all projects keyed by id.
    #[must_use]
    pub const fn projects(&self) -> &HashMap<ProjectId, Project> {
        &self.projects
    }

    /// Returns the flattened view of all active tasks keyed by id.
    #[must_use]
    pub const fn tasks(&self) -> &HashMap<TaskId, Task> {
        &self.tasks
    }

    /// Looks up a project by id.
    #[must_use]
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.get(id)
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Returns the set of all active task ids.
    #[must_use]
    pub fn task_ids(&self) -> HashSet<TaskId> {
        self.tasks.keys().cloned().collect()
    }
}
