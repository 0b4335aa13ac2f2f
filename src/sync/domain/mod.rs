//! Domain model for TickTick synchronization.
//!
//! Pure data types built from the provider's loosely-typed wire payloads:
//! normalized tasks and projects, the immutable per-refresh snapshot, and
//! the change events the refresh cycle raises. No infrastructure concerns
//! cross this boundary.

mod event;
mod ids;
mod project;
mod record;
mod snapshot;
mod task;

pub use event::TaskEvent;
pub use ids::{ProjectId, TaskId};
pub use project::Project;
pub use record::{NewTask, ProjectData, ProjectRecord, TaskPatch, TaskRecord};
pub use snapshot::Snapshot;
pub use task::{Priority, Task, TaskStatus};
