//! Change notifications raised by the refresh cycle.

use super::{Priority, ProjectId, TaskId};
use serde::Serialize;

/// Notification emitted when consecutive refreshes observe a change.
///
/// Events are delivered through the host's
/// [`EventSink`](crate::sync::ports::EventSink). Timestamps are carried as
/// RFC 3339 strings so hosts can forward payloads without further
/// formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TaskEvent {
    /// A task id appeared that the previous refresh did not contain.
    TaskCreated {
        /// Identifier of the new task.
        task_id: TaskId,
        /// Identifier of the owning project.
        project_id: ProjectId,
        /// Task title.
        title: String,
        /// Due timestamp in RFC 3339, when the task has one.
        due_date: Option<String>,
        /// Task priority.
        priority: Priority,
    },
    /// A task id left the active set since the previous refresh.
    ///
    /// The task's own data is no longer available at this point, so the
    /// payload carries only the id and the observation time. This is a
    /// best-effort signal, not a precise completion event: a deleted task
    /// is indistinguishable from a completed one.
    TaskCompleted {
        /// Identifier of the task that left the active set.
        task_id: TaskId,
        /// Observation timestamp in RFC 3339.
        completed_at: String,
    },
    /// A task's due timestamp entered the configured due-soon window.
    ///
    /// Fired at most once per task while it remains in the active set.
    TaskDueSoon {
        /// Identifier of the task.
        task_id: TaskId,
        /// Identifier of the owning project.
        project_id: ProjectId,
        /// Task title.
        title: String,
        /// Due timestamp in RFC 3339.
        due_date: String,
        /// Whole minutes until the task is due, rounded down.
        minutes_until_due: i64,
    },
}
