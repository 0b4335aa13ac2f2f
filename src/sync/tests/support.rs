//! Shared fixtures for sync tests.

use crate::sync::adapters::memory::{FixedClock, InMemoryTaskApi, RecordingEventSink};
use crate::sync::config::SyncConfig;
use crate::sync::domain::{ProjectRecord, TaskRecord};
use crate::sync::services::SyncCoordinator;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Coordinator wired to in-memory collaborators.
pub type TestCoordinator = SyncCoordinator<InMemoryTaskApi, RecordingEventSink, FixedClock>;

/// Test harness bundling the coordinator with its scriptable collaborators.
pub struct Harness {
    pub api: Arc<InMemoryTaskApi>,
    pub sink: Arc<RecordingEventSink>,
    pub coordinator: Arc<TestCoordinator>,
}

/// The instant every test clock reports: 2024-06-01T12:00:00Z.
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

/// Builds a harness with the default configuration (30 minute window).
pub fn harness() -> Harness {
    harness_with_config(SyncConfig::default())
}

/// Builds a harness with an explicit configuration.
pub fn harness_with_config(config: SyncConfig) -> Harness {
    let api = Arc::new(InMemoryTaskApi::new());
    let sink = Arc::new(RecordingEventSink::new());
    let clock = Arc::new(FixedClock::new(fixed_now()));
    let coordinator = Arc::new(SyncCoordinator::new(
        Arc::clone(&api),
        Arc::clone(&sink),
        clock,
        config,
    ));
    Harness {
        api,
        sink,
        coordinator,
    }
}

/// Builds a minimal active task record.
pub fn task_record(id: &str, project_id: &str) -> TaskRecord {
    TaskRecord {
        id: id.to_owned(),
        project_id: project_id.to_owned(),
        title: format!("Task {id}"),
        ..TaskRecord::default()
    }
}

/// Builds a task record due `minutes` after the fixed test clock.
pub fn task_record_due_in(id: &str, project_id: &str, minutes: i64) -> TaskRecord {
    TaskRecord {
        due_date: Some((fixed_now() + Duration::minutes(minutes)).to_rfc3339()),
        ..task_record(id, project_id)
    }
}

/// Builds a project record.
pub fn project_record(id: &str, name: &str) -> ProjectRecord {
    ProjectRecord {
        id: id.to_owned(),
        name: Some(name.to_owned()),
        color: None,
    }
}
