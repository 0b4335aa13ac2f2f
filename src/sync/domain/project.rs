//! Normalized project model and its derived counters.

use super::{ProjectId, ProjectRecord, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name used when the provider omits a project name.
const UNNAMED_PROJECT: &str = "Unknown";

/// Normalized project owning the active tasks that belonged to it at
/// snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    color: Option<String>,
    tasks: Vec<Task>,
}

impl Project {
    /// Builds a project from a wire record and its already-normalized tasks.
    #[must_use]
    pub fn from_record(record: ProjectRecord, tasks: Vec<Task>) -> Self {
        Self {
            id: ProjectId::new(record.id),
            name: record.name.unwrap_or_else(|| UNNAMED_PROJECT.to_owned()),
            color: record.color,
            tasks,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> &ProjectId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display colour, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the tasks owned by this project.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of active tasks in the project.
    #[must_use]
    pub const fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Counts tasks whose due timestamp lies strictly before `now`.
    ///
    /// Tasks without a due date never count as overdue.
    #[must_use]
    pub fn overdue_count(&self, now: DateTime<Utc>) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.due_date().is_some_and(|due| due < now))
            .count()
    }

    /// Counts tasks whose due date falls on `now`'s UTC calendar date.
    #[must_use]
    pub fn due_today_count(&self, now: DateTime<Utc>) -> usize {
        let today = now.date_naive();
        self.tasks
            .iter()
            .filter(|task| task.due_date().is_some_and(|due| due.date_naive() == today))
            .count()
    }
}
