//! Mutating task operations exposed to presentation adapters.
//!
//! Every operation is a thin pass-through to the API client followed by an
//! immediate refresh request, so the mutation becomes visible in the next
//! snapshot. Adapters never mutate a snapshot directly.

use super::coordinator::SyncCoordinator;
use crate::sync::domain::{NewTask, Priority, ProjectId, Task, TaskId, TaskPatch};
use crate::sync::ports::{EventSink, TaskApi, TaskApiError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

/// Result type for mutating task operations.
pub type ActionResult<T> = Result<T, ActionError>;

/// Errors surfaced by mutating task operations.
#[derive(Debug, Clone, Error)]
pub enum ActionError {
    /// The API client rejected the operation. Failed mutations are logged
    /// and never retried automatically.
    #[error(transparent)]
    Api(#[from] TaskApiError),

    /// No project id was given and no default project could be resolved
    /// from the current snapshot.
    #[error("no project specified and no default project found")]
    NoDefaultProject,
}

/// Request payload for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    project_id: Option<ProjectId>,
    content: Option<String>,
    due_date: Option<DateTime<Utc>>,
    priority: Priority,
    all_day: bool,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the target project. Without one, the coordinator's default
    /// project (the inbox) is used.
    #[must_use]
    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets free-text content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the due timestamp; `all_day` marks it as a whole-day task.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>, all_day: bool) -> Self {
        self.due_date = Some(due_date);
        self.all_day = all_day;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Request payload for updating a task; absent fields stay untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    project_id: ProjectId,
    title: Option<String>,
    content: Option<String>,
    due_date: Option<DateTime<Utc>>,
    priority: Option<Priority>,
}

impl UpdateTaskRequest {
    /// Creates a request targeting one task.
    #[must_use]
    pub const fn new(task_id: TaskId, project_id: ProjectId) -> Self {
        Self {
            task_id,
            project_id,
            title: None,
            content: None,
            due_date: None,
            priority: None,
        }
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets new free-text content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets a new due timestamp.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets a new priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Mutating task operations for presentation adapters.
#[derive(Clone)]
pub struct TaskActions<A, E, C>
where
    A: TaskApi,
    E: EventSink,
    C: Clock + Send + Sync,
{
    coordinator: Arc<SyncCoordinator<A, E, C>>,
}

impl<A, E, C> TaskActions<A, E, C>
where
    A: TaskApi,
    E: EventSink,
    C: Clock + Send + Sync,
{
    /// Creates the action service around a coordinator.
    #[must_use]
    pub const fn new(coordinator: Arc<SyncCoordinator<A, E, C>>) -> Self {
        Self { coordinator }
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NoDefaultProject`] when the request names no
    /// project and the current snapshot offers none, or
    /// [`ActionError::Api`] when the API client rejects the call.
    pub async fn create_task(&self, request: CreateTaskRequest) -> ActionResult<Task> {
        let project_id = match request.project_id {
            Some(project_id) => project_id,
            None => self.default_project_id().ok_or(ActionError::NoDefaultProject)?,
        };

        let payload = NewTask {
            title: request.title,
            project_id: project_id.as_str().to_owned(),
            content: request.content,
            due_date: request.due_date.map(|due| due.to_rfc3339()),
            priority: request.priority.ordinal(),
            is_all_day: request.due_date.is_some().then_some(request.all_day),
            parent_id: None,
        };

        let record = self
            .pass_through("create task", self.coordinator.api().create_task(&payload))
            .await?;
        self.request_refresh().await;
        Ok(Task::from_record(record))
    }

    /// Updates an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Api`] when the API client rejects the call.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> ActionResult<Task> {
        let patch = TaskPatch {
            id: request.task_id.as_str().to_owned(),
            project_id: request.project_id.as_str().to_owned(),
            title: request.title,
            content: request.content,
            due_date: request.due_date.map(|due| due.to_rfc3339()),
            priority: request.priority.map(Priority::ordinal),
        };

        let record = self
            .pass_through(
                "update task",
                self.coordinator.api().update_task(&request.task_id, &patch),
            )
            .await?;
        self.request_refresh().await;
        Ok(Task::from_record(record))
    }

    /// Marks a task as complete.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Api`] when the API client rejects the call.
    pub async fn complete_task(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
    ) -> ActionResult<()> {
        self.pass_through(
            "complete task",
            self.coordinator.api().complete_task(project_id, task_id),
        )
        .await?;
        self.request_refresh().await;
        Ok(())
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Api`] when the API client rejects the call.
    pub async fn delete_task(&self, project_id: &ProjectId, task_id: &TaskId) -> ActionResult<()> {
        self.pass_through(
            "delete task",
            self.coordinator.api().delete_task(project_id, task_id),
        )
        .await?;
        self.request_refresh().await;
        Ok(())
    }

    /// Creates a subtask under a parent task.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Api`] when the API client rejects the call.
    pub async fn create_subtask(
        &self,
        parent_task_id: &TaskId,
        project_id: &ProjectId,
        title: impl Into<String> + Send,
        content: Option<String>,
    ) -> ActionResult<Task> {
        let payload = NewTask {
            title: title.into(),
            project_id: project_id.as_str().to_owned(),
            content,
            due_date: None,
            priority: Priority::None.ordinal(),
            is_all_day: None,
            parent_id: Some(parent_task_id.as_str().to_owned()),
        };

        let record = self
            .pass_through("create subtask", self.coordinator.api().create_task(&payload))
            .await?;
        self.request_refresh().await;
        Ok(Task::from_record(record))
    }

    /// Marks a subtask as complete.
    ///
    /// Subtasks complete through the same endpoint as tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Api`] when the API client rejects the call.
    pub async fn complete_subtask(
        &self,
        project_id: &ProjectId,
        subtask_id: &TaskId,
    ) -> ActionResult<()> {
        self.complete_task(project_id, subtask_id).await
    }

    /// Resolves the default project from the current snapshot: the project
    /// named "inbox" (case-insensitive) when present, otherwise the first
    /// project by name.
    fn default_project_id(&self) -> Option<ProjectId> {
        let snapshot = self.coordinator.snapshot()?;
        let mut projects: Vec<_> = snapshot.projects().values().collect();
        projects.sort_by(|a, b| a.name().cmp(b.name()));
        projects
            .iter()
            .find(|project| project.name().eq_ignore_ascii_case("inbox"))
            .or_else(|| projects.first())
            .map(|project| project.id().clone())
    }

    /// Awaits one API call, logging a failure before surfacing it.
    async fn pass_through<T>(
        &self,
        operation: &str,
        call: impl Future<Output = Result<T, TaskApiError>> + Send,
    ) -> ActionResult<T> {
        call.await.map_err(|err| {
            error!(operation, %err, "task mutation failed");
            ActionError::Api(err)
        })
    }

    /// Requests an immediate refresh so the mutation shows up in the next
    /// snapshot. A refresh failure after a successful mutation is logged,
    /// not surfaced; the coordinator already reports degraded status.
    async fn request_refresh(&self) {
        if let Err(err) = self.coordinator.refresh().await {
            warn!(%err, "post-mutation refresh failed");
        }
    }
}
