//! Port for the remote task-management API and its error taxonomy.

use crate::sync::domain::{
    NewTask, ProjectData, ProjectId, ProjectRecord, TaskId, TaskPatch, TaskRecord,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote API operations.
pub type TaskApiResult<T> = Result<T, TaskApiError>;

/// Remote task-management API contract.
///
/// One method per remote operation, a single request/response per call: no
/// retries, no backoff, no pagination. Implementations attach the bearer
/// credential and a JSON content type to every request.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Lists all projects.
    async fn list_projects(&self) -> TaskApiResult<Vec<ProjectRecord>>;

    /// Fetches a single project.
    async fn get_project(&self, project_id: &ProjectId) -> TaskApiResult<ProjectRecord>;

    /// Fetches a project together with its tasks.
    async fn get_project_data(&self, project_id: &ProjectId) -> TaskApiResult<ProjectData>;

    /// Fetches a single task.
    async fn get_task(&self, project_id: &ProjectId, task_id: &TaskId)
    -> TaskApiResult<TaskRecord>;

    /// Creates a task (or a subtask when the payload carries a parent id).
    async fn create_task(&self, task: &NewTask) -> TaskApiResult<TaskRecord>;

    /// Updates an existing task.
    async fn update_task(&self, task_id: &TaskId, patch: &TaskPatch)
    -> TaskApiResult<TaskRecord>;

    /// Marks a task as complete.
    async fn complete_task(&self, project_id: &ProjectId, task_id: &TaskId)
    -> TaskApiResult<()>;

    /// Deletes a task.
    async fn delete_task(&self, project_id: &ProjectId, task_id: &TaskId) -> TaskApiResult<()>;

    /// Validates the bearer credential by listing projects.
    ///
    /// Returns the number of visible projects on success.
    async fn validate_credentials(&self) -> TaskApiResult<usize>;
}

/// Errors returned by remote API implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskApiError {
    /// The provider rejected the bearer credential (HTTP 401).
    #[error("invalid or expired access token")]
    Auth,

    /// The provider throttled the request (HTTP 429).
    #[error("Rate limit exceeded")]
    RateLimit,

    /// Any other failure status, with the response body preserved for
    /// diagnostics.
    #[error("API error {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Transport-level failure (DNS, TCP, TLS, malformed response body).
    #[error("Connection error: {0}")]
    Connection(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskApiError {
    /// Wraps a transport-level error.
    pub fn connection(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Connection(Arc::new(err))
    }

    /// Returns `true` when the error indicates a rejected credential.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Auth)
    }
}
