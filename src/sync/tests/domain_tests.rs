//! Domain-focused tests for record normalization and derived counters.

use super::support::{fixed_now, project_record, task_record};
use crate::sync::domain::{
    Priority, Project, Task, TaskEvent, TaskRecord, TaskStatus,
};
use chrono::Duration;
use rstest::rstest;

#[rstest]
fn task_from_record_normalizes_all_fields() {
    let record = TaskRecord {
        id: "t1".to_owned(),
        project_id: "p1".to_owned(),
        title: "Water the plants".to_owned(),
        content: Some("balcony first".to_owned()),
        due_date: Some("2024-06-01T09:30:00Z".to_owned()),
        priority: 3,
        is_all_day: true,
        status: 0,
        parent_id: Some("t0".to_owned()),
    };

    let task = Task::from_record(record);

    assert_eq!(task.id().as_str(), "t1");
    assert_eq!(task.project_id().as_str(), "p1");
    assert_eq!(task.title(), "Water the plants");
    assert_eq!(task.content(), Some("balcony first"));
    assert_eq!(
        task.due_date().map(|due| due.to_rfc3339()),
        Some("2024-06-01T09:30:00+00:00".to_owned())
    );
    assert_eq!(task.priority(), Priority::Medium);
    assert!(task.all_day());
    assert_eq!(task.status(), TaskStatus::Active);
    assert_eq!(task.parent_id().map(|id| id.as_str()), Some("t0"));
}

#[rstest]
fn task_from_record_drops_unparsable_due_date() {
    let record = TaskRecord {
        due_date: Some("not-a-date".to_owned()),
        ..task_record("t1", "p1")
    };

    let task = Task::from_record(record);
    assert_eq!(task.due_date(), None);
}

#[rstest]
fn status_ordinal_two_means_completed() {
    assert!(TaskStatus::from_ordinal(2).is_completed());
    assert!(!TaskStatus::from_ordinal(0).is_completed());
    assert!(!TaskStatus::from_ordinal(1).is_completed());
}

#[rstest]
#[case(0, Priority::None)]
#[case(1, Priority::Low)]
#[case(3, Priority::Medium)]
#[case(5, Priority::High)]
#[case(2, Priority::None)]
#[case(-7, Priority::None)]
fn priority_from_ordinal_normalizes(#[case] ordinal: i64, #[case] expected: Priority) {
    assert_eq!(Priority::from_ordinal(ordinal), expected);
}

#[rstest]
fn priority_round_trips_known_ordinals() {
    for priority in [Priority::None, Priority::Low, Priority::Medium, Priority::High] {
        assert_eq!(Priority::from_ordinal(priority.ordinal()), priority);
    }
}

#[rstest]
fn project_without_name_displays_as_unknown() {
    let record = crate::sync::domain::ProjectRecord {
        id: "p1".to_owned(),
        name: None,
        color: None,
    };
    let project = Project::from_record(record, Vec::new());
    assert_eq!(project.name(), "Unknown");
}

#[rstest]
fn project_counters_apply_strict_overdue_and_date_equality() {
    let now = fixed_now();
    let make = |id: &str, offset_minutes: Option<i64>| {
        let mut record = task_record(id, "p1");
        record.due_date = offset_minutes.map(|offset| (now + Duration::minutes(offset)).to_rfc3339());
        Task::from_record(record)
    };

    let tasks = vec![
        make("overdue", Some(-60)),
        make("due-exactly-now", Some(0)),
        make("later-today", Some(60)),
        make("tomorrow", Some(24 * 60)),
        make("undated", None),
    ];
    let project = Project::from_record(project_record("p1", "Chores"), tasks);

    assert_eq!(project.task_count(), 5);
    // Strictly before now: the task due exactly now is not overdue.
    assert_eq!(project.overdue_count(now), 1);
    // Same UTC calendar date: overdue (today), exactly-now, and later-today.
    assert_eq!(project.due_today_count(now), 3);
}

#[rstest]
fn task_events_serialize_with_snake_case_names() {
    let created = TaskEvent::TaskCreated {
        task_id: "t1".into(),
        project_id: "p1".into(),
        title: "Task".to_owned(),
        due_date: None,
        priority: Priority::High,
    };
    let completed = TaskEvent::TaskCompleted {
        task_id: "t1".into(),
        completed_at: fixed_now().to_rfc3339(),
    };
    let due_soon = TaskEvent::TaskDueSoon {
        task_id: "t1".into(),
        project_id: "p1".into(),
        title: "Task".to_owned(),
        due_date: fixed_now().to_rfc3339(),
        minutes_until_due: 10,
    };

    let name = |event: &TaskEvent| {
        serde_json::to_value(event)
            .expect("event serializes")
            .get("event")
            .cloned()
            .expect("tagged payload")
    };
    assert_eq!(name(&created), "task_created");
    assert_eq!(name(&completed), "task_completed");
    assert_eq!(name(&due_soon), "task_due_soon");

    let payload = serde_json::to_value(&due_soon).expect("event serializes");
    assert_eq!(payload.get("minutes_until_due").cloned(), Some(10.into()));
    assert_eq!(payload.get("priority"), None);
}
