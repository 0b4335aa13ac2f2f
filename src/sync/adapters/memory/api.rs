//! In-memory fake of the remote API for coordinator and service tests.

use crate::sync::domain::{
    NewTask, ProjectData, ProjectId, ProjectRecord, TaskId, TaskPatch, TaskRecord,
};
use crate::sync::ports::{TaskApi, TaskApiError, TaskApiResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::Notify;

/// Thread-safe scriptable in-memory task API.
///
/// Tests seed it with project and task records, optionally script failures
/// per endpoint, and inspect the mutations it received.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskApi {
    state: Arc<RwLock<InMemoryApiState>>,
}

#[derive(Debug, Default)]
struct InMemoryApiState {
    projects: Vec<ProjectRecord>,
    tasks: HashMap<ProjectId, Vec<TaskRecord>>,
    list_failure: Option<TaskApiError>,
    data_failures: HashMap<ProjectId, TaskApiError>,
    data_gate: Option<Arc<Notify>>,
    mutation_failure: Option<TaskApiError>,
    list_calls: usize,
    next_task_number: u64,
    created: Vec<NewTask>,
    patched: Vec<TaskPatch>,
    completed: Vec<(ProjectId, TaskId)>,
    deleted: Vec<(ProjectId, TaskId)>,
}

impl InMemoryTaskApi {
    /// Creates an empty fake API.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all projects and their tasks.
    pub fn set_projects(&self, projects: Vec<(ProjectRecord, Vec<TaskRecord>)>) {
        let mut state = self.write();
        state.projects = projects.iter().map(|(project, _)| project.clone()).collect();
        state.tasks = projects
            .into_iter()
            .map(|(project, tasks)| (ProjectId::new(project.id), tasks))
            .collect();
    }

    /// Scripts a persistent failure for `list_projects`.
    pub fn set_list_failure(&self, failure: Option<TaskApiError>) {
        self.write().list_failure = failure;
    }

    /// Scripts a persistent failure for `get_project_data` on one project.
    pub fn set_data_failure(&self, project_id: ProjectId, failure: TaskApiError) {
        self.write().data_failures.insert(project_id, failure);
    }

    /// Installs a gate that every `get_project_data` call awaits before
    /// responding. An unnotified gate holds a refresh in flight so tests
    /// can abandon it mid-cycle.
    pub fn set_data_gate(&self, gate: Option<Arc<Notify>>) {
        self.write().data_gate = gate;
    }

    /// Scripts a persistent failure for every mutating call.
    pub fn set_mutation_failure(&self, failure: Option<TaskApiError>) {
        self.write().mutation_failure = failure;
    }

    /// Returns how many times `list_projects` was called.
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.read().list_calls
    }

    /// Returns the create payloads received so far.
    #[must_use]
    pub fn created(&self) -> Vec<NewTask> {
        self.read().created.clone()
    }

    /// Returns the update payloads received so far.
    #[must_use]
    pub fn patched(&self) -> Vec<TaskPatch> {
        self.read().patched.clone()
    }

    /// Returns the completion calls received so far.
    #[must_use]
    pub fn completed(&self) -> Vec<(ProjectId, TaskId)> {
        self.read().completed.clone()
    }

    /// Returns the deletion calls received so far.
    #[must_use]
    pub fn deleted(&self) -> Vec<(ProjectId, TaskId)> {
        self.read().deleted.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, InMemoryApiState> {
        self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, InMemoryApiState> {
        self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl TaskApi for InMemoryTaskApi {
    async fn list_projects(&self) -> TaskApiResult<Vec<ProjectRecord>> {
        let mut state = self.write();
        state.list_calls += 1;
        if let Some(failure) = &state.list_failure {
            return Err(failure.clone());
        }
        Ok(state.projects.clone())
    }

    async fn get_project(&self, project_id: &ProjectId) -> TaskApiResult<ProjectRecord> {
        let state = self.read();
        state
            .projects
            .iter()
            .find(|project| project.id == project_id.as_str())
            .cloned()
            .ok_or_else(|| TaskApiError::Api {
                status: 404,
                body: format!("project {project_id} not found"),
            })
    }

    async fn get_project_data(&self, project_id: &ProjectId) -> TaskApiResult<ProjectData> {
        // The guard must not be held across the await.
        let gate = self.read().data_gate.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let state = self.read();
        if let Some(failure) = state.data_failures.get(project_id) {
            return Err(failure.clone());
        }
        let project = state
            .projects
            .iter()
            .find(|record| record.id == project_id.as_str())
            .cloned()
            .unwrap_or_default();
        let tasks = state.tasks.get(project_id).cloned().unwrap_or_default();
        Ok(ProjectData { project, tasks })
    }

    async fn get_task(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
    ) -> TaskApiResult<TaskRecord> {
        let state = self.read();
        state
            .tasks
            .get(project_id)
            .and_then(|tasks| tasks.iter().find(|task| task.id == task_id.as_str()))
            .cloned()
            .ok_or_else(|| TaskApiError::Api {
                status: 404,
                body: format!("task {task_id} not found"),
            })
    }

    async fn create_task(&self, task: &NewTask) -> TaskApiResult<TaskRecord> {
        let mut state = self.write();
        if let Some(failure) = &state.mutation_failure {
            return Err(failure.clone());
        }
        state.next_task_number += 1;
        let record = TaskRecord {
            id: format!("mem-task-{}", state.next_task_number),
            project_id: task.project_id.clone(),
            title: task.title.clone(),
            content: task.content.clone(),
            due_date: task.due_date.clone(),
            priority: task.priority,
            is_all_day: task.is_all_day.unwrap_or(false),
            status: 0,
            parent_id: task.parent_id.clone(),
        };
        state
            .tasks
            .entry(ProjectId::new(task.project_id.clone()))
            .or_default()
            .push(record.clone());
        state.created.push(task.clone());
        Ok(record)
    }

    async fn update_task(
        &self,
        task_id: &TaskId,
        patch: &TaskPatch,
    ) -> TaskApiResult<TaskRecord> {
        let mut state = self.write();
        if let Some(failure) = &state.mutation_failure {
            return Err(failure.clone());
        }
        state.patched.push(patch.clone());
        let project_id = ProjectId::new(patch.project_id.clone());
        let record = state
            .tasks
            .get_mut(&project_id)
            .and_then(|tasks| tasks.iter_mut().find(|task| task.id == task_id.as_str()))
            .ok_or_else(|| TaskApiError::Api {
                status: 404,
                body: format!("task {task_id} not found"),
            })?;
        if let Some(title) = &patch.title {
            record.title.clone_from(title);
        }
        if let Some(content) = &patch.content {
            record.content = Some(content.clone());
        }
        if let Some(due_date) = &patch.due_date {
            record.due_date = Some(due_date.clone());
        }
        if let Some(priority) = patch.priority {
            record.priority = priority;
        }
        Ok(record.clone())
    }

    async fn complete_task(
        &self,
        project_id: &ProjectId,
        task_id: &TaskId,
    ) -> TaskApiResult<()> {
        let mut state = self.write();
        if let Some(failure) = &state.mutation_failure {
            return Err(failure.clone());
        }
        if let Some(tasks) = state.tasks.get_mut(project_id) {
            for task in tasks.iter_mut().filter(|task| task.id == task_id.as_str()) {
                task.status = 2;
            }
        }
        state.completed.push((project_id.clone(), task_id.clone()));
        Ok(())
    }

    async fn delete_task(&self, project_id: &ProjectId, task_id: &TaskId) -> TaskApiResult<()> {
        let mut state = self.write();
        if let Some(failure) = &state.mutation_failure {
            return Err(failure.clone());
        }
        if let Some(tasks) = state.tasks.get_mut(project_id) {
            tasks.retain(|task| task.id != task_id.as_str());
        }
        state.deleted.push((project_id.clone(), task_id.clone()));
        Ok(())
    }

    async fn validate_credentials(&self) -> TaskApiResult<usize> {
        let projects = self.list_projects().await?;
        Ok(projects.len())
    }
}
