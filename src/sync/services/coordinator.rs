//! Refresh coordination: fetch, diff, notify, publish.

use crate::sync::config::SyncConfig;
use crate::sync::domain::{
    Project, ProjectData, ProjectId, Snapshot, Task, TaskEvent, TaskId, TaskStatus,
};
use crate::sync::ports::{EventSink, TaskApi, TaskApiError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, warn};

/// Result type for refresh operations.
pub type RefreshResult<T> = Result<T, RefreshError>;

/// Errors surfaced when a refresh cycle fails as a whole.
///
/// A failed refresh publishes nothing: the previous snapshot remains
/// current and the host's scheduler owns retry timing.
#[derive(Debug, Clone, Error)]
pub enum RefreshError {
    /// The provider rejected the credential; re-authentication is needed
    /// upstream.
    #[error("authentication failed: {0}")]
    Auth(#[source] TaskApiError),

    /// Any other API failure during the mandatory top-level fetch.
    #[error("error communicating with TickTick: {0}")]
    Api(#[source] TaskApiError),
}

impl From<TaskApiError> for RefreshError {
    fn from(err: TaskApiError) -> Self {
        if err.is_auth() {
            Self::Auth(err)
        } else {
            Self::Api(err)
        }
    }
}

/// Diff state carried across refresh cycles.
#[derive(Debug, Default)]
struct DiffState {
    previous_task_ids: HashSet<TaskId>,
    notified_due_soon: HashSet<TaskId>,
}

/// Periodic refresh coordinator.
///
/// Each refresh fetches all projects and their tasks, rebuilds the snapshot
/// from active tasks only, diffs the task-id set against the previous
/// refresh to raise created/completed notifications, scans for tasks
/// entering the due-soon window, and finally publishes the new snapshot
/// atomically. Readers obtain the current snapshot via
/// [`SyncCoordinator::snapshot`] and never observe a partially built one.
pub struct SyncCoordinator<A, E, C>
where
    A: TaskApi,
    E: EventSink,
    C: Clock + Send + Sync,
{
    api: Arc<A>,
    events: Arc<E>,
    clock: Arc<C>,
    config: SyncConfig,
    state: Mutex<DiffState>,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    last_refresh_ok: AtomicBool,
}

impl<A, E, C> SyncCoordinator<A, E, C>
where
    A: TaskApi,
    E: EventSink,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator with injected collaborators.
    #[must_use]
    pub fn new(api: Arc<A>, events: Arc<E>, clock: Arc<C>, config: SyncConfig) -> Self {
        Self {
            api,
            events,
            clock,
            config,
            state: Mutex::new(DiffState::default()),
            snapshot: RwLock::new(None),
            last_refresh_ok: AtomicBool::new(false),
        }
    }

    /// Returns the injected API client.
    #[must_use]
    pub const fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Returns the snapshot of the last successful refresh, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns `true` when the most recent refresh succeeded.
    ///
    /// Presentation adapters use this as their availability signal.
    #[must_use]
    pub fn last_refresh_succeeded(&self) -> bool {
        self.last_refresh_ok.load(Ordering::Acquire)
    }

    /// Runs one refresh cycle.
    ///
    /// At most one refresh is in flight per coordinator; concurrent calls
    /// serialize. Dropping the returned future before completion discards
    /// all partially fetched data and leaves the previous snapshot
    /// authoritative.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError`] when the top-level project fetch fails; the
    /// previous snapshot then remains current. Per-project task fetches
    /// that fail are downgraded to an empty task list instead.
    pub async fn refresh(&self) -> RefreshResult<Arc<Snapshot>> {
        let mut state = self.state.lock().await;

        let fetched = match self.fetch_all().await {
            Ok(fetched) => fetched,
            Err(err) => {
                self.last_refresh_ok.store(false, Ordering::Release);
                error!(%err, "refresh failed");
                return Err(err);
            }
        };

        let now = self.clock.utc();
        let snapshot = Arc::new(self.reconcile(&mut state, fetched, now));
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&snapshot));
        self.last_refresh_ok.store(true, Ordering::Release);
        debug!(
            projects = snapshot.projects().len(),
            tasks = snapshot.tasks().len(),
            "refresh complete"
        );
        Ok(snapshot)
    }

    /// Fetches all projects and, per project, their tasks.
    ///
    /// A failing per-project fetch is logged and downgraded to an empty
    /// task list so one broken project cannot abort the whole refresh.
    async fn fetch_all(&self) -> RefreshResult<Vec<ProjectData>> {
        let projects = self.api.list_projects().await?;

        let mut fetched = Vec::with_capacity(projects.len());
        for record in projects {
            let project_id = ProjectId::new(record.id.clone());
            match self.api.get_project_data(&project_id).await {
                Ok(data) => fetched.push(data),
                Err(err) => {
                    warn!(%project_id, %err, "task fetch failed, treating project as empty");
                    fetched.push(ProjectData {
                        project: record,
                        tasks: Vec::new(),
                    });
                }
            }
        }
        Ok(fetched)
    }

    /// Builds the new snapshot, diffs it against the previous refresh, and
    /// emits the resulting notifications.
    fn reconcile(
        &self,
        state: &mut DiffState,
        fetched: Vec<ProjectData>,
        now: DateTime<Utc>,
    ) -> Snapshot {
        let snapshot = build_snapshot(fetched);
        let current_ids = snapshot.task_ids();

        self.emit_created(&current_ids, &state.previous_task_ids, &snapshot);
        self.emit_completed(&current_ids, &state.previous_task_ids, now);
        state.previous_task_ids = current_ids;

        self.scan_due_soon(state, &snapshot, now);

        // Forget departed tasks so the notified set cannot grow unbounded.
        let DiffState {
            previous_task_ids,
            notified_due_soon,
        } = state;
        notified_due_soon.retain(|id| previous_task_ids.contains(id));

        snapshot
    }

    /// Raises one `task_created` notification per id that is new relative
    /// to the previous refresh.
    fn emit_created(
        &self,
        current_ids: &HashSet<TaskId>,
        previous_ids: &HashSet<TaskId>,
        snapshot: &Snapshot,
    ) {
        let mut created: Vec<&TaskId> = current_ids.difference(previous_ids).collect();
        created.sort();
        for task_id in created {
            if let Some(task) = snapshot.task(task_id) {
                self.events.emit(TaskEvent::TaskCreated {
                    task_id: task.id().clone(),
                    project_id: task.project_id().clone(),
                    title: task.title().to_owned(),
                    due_date: task.due_date().map(|due| due.to_rfc3339()),
                    priority: task.priority(),
                });
            }
        }
    }

    /// Raises one `task_completed` notification per id that left the
    /// active set.
    ///
    /// The task's data is no longer available at this point, so the payload
    /// carries only the id and the observation time.
    fn emit_completed(
        &self,
        current_ids: &HashSet<TaskId>,
        previous_ids: &HashSet<TaskId>,
        now: DateTime<Utc>,
    ) {
        let mut completed: Vec<&TaskId> = previous_ids.difference(current_ids).collect();
        completed.sort();
        for task_id in completed {
            self.events.emit(TaskEvent::TaskCompleted {
                task_id: task_id.clone(),
                completed_at: now.to_rfc3339(),
            });
        }
    }

    /// Raises `task_due_soon` for tasks entering the due-soon window.
    ///
    /// A task qualifies when its due timestamp is strictly after `now` and
    /// at most the configured window later. Each id notifies at most once
    /// while it stays in the active set.
    fn scan_due_soon(&self, state: &mut DiffState, snapshot: &Snapshot, now: DateTime<Utc>) {
        let deadline = now + self.config.due_soon_window();

        let mut tasks: Vec<&Task> = snapshot.tasks().values().collect();
        tasks.sort_by(|a, b| a.id().cmp(b.id()));

        for task in tasks {
            let Some(due) = task.due_date() else {
                continue;
            };
            if due <= now || due > deadline || state.notified_due_soon.contains(task.id()) {
                continue;
            }
            self.events.emit(TaskEvent::TaskDueSoon {
                task_id: task.id().clone(),
                project_id: task.project_id().clone(),
                title: task.title().to_owned(),
                due_date: due.to_rfc3339(),
                minutes_until_due: (due - now).num_minutes(),
            });
            state.notified_due_soon.insert(task.id().clone());
        }
    }
}

/// Assembles a snapshot from fetched project data, keeping active tasks
/// only.
fn build_snapshot(fetched: Vec<ProjectData>) -> Snapshot {
    let mut projects: HashMap<ProjectId, Project> = HashMap::with_capacity(fetched.len());
    let mut all_tasks: HashMap<TaskId, Task> = HashMap::new();

    for ProjectData { project, tasks } in fetched {
        let active: Vec<Task> = tasks
            .into_iter()
            .filter(|record| !TaskStatus::from_ordinal(record.status).is_completed())
            .map(Task::from_record)
            .collect();
        for task in &active {
            if all_tasks.insert(task.id().clone(), task.clone()).is_some() {
                warn!(
                    task_id = %task.id(),
                    "duplicate task id across projects, keeping the last copy"
                );
            }
        }
        let built = Project::from_record(project, active);
        projects.insert(built.id().clone(), built);
    }

    Snapshot::new(projects, all_tasks)
}

/// Drives periodic refreshes until the shutdown channel fires.
///
/// The first tick is immediate, giving the eager startup refresh. Failed
/// refreshes are logged and the loop keeps polling; the next tick is the
/// retry. A shutdown signal cancels any in-flight refresh, discarding its
/// partially fetched data.
pub async fn run_poll_loop<A, E, C>(
    coordinator: Arc<SyncCoordinator<A, E, C>>,
    mut shutdown: watch::Receiver<bool>,
) where
    A: TaskApi,
    E: EventSink,
    C: Clock + Send + Sync,
{
    let mut ticker = tokio::time::interval(coordinator.config().poll_interval());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(err) = coordinator.refresh().await {
                    warn!(%err, "scheduled refresh failed, retrying next tick");
                }
            }
            _ = shutdown.changed() => break,
        }
    }
}
