//! Application services for TickTick synchronization.

mod actions;
mod coordinator;

pub use actions::{ActionError, ActionResult, CreateTaskRequest, TaskActions, UpdateTaskRequest};
pub use coordinator::{RefreshError, RefreshResult, SyncCoordinator, run_poll_loop};
