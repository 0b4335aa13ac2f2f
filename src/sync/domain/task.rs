//! Normalized task model built from wire records.

use super::{ProjectId, TaskId, TaskRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority as exposed by TickTick.
///
/// The provider encodes priority as the ordinals 0/1/3/5; any other ordinal
/// normalizes to [`Priority::None`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// No priority assigned (ordinal 0).
    #[default]
    None,
    /// Low priority (ordinal 1).
    Low,
    /// Medium priority (ordinal 3).
    Medium,
    /// High priority (ordinal 5).
    High,
}

impl Priority {
    /// Maps a provider ordinal to a priority, normalizing unknown ordinals
    /// to [`Priority::None`].
    #[must_use]
    pub const fn from_ordinal(ordinal: i64) -> Self {
        match ordinal {
            1 => Self::Low,
            3 => Self::Medium,
            5 => Self::High,
            _ => Self::None,
        }
    }

    /// Returns the provider ordinal for this priority.
    #[must_use]
    pub const fn ordinal(self) -> i64 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 3,
            Self::High => 5,
        }
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Task completion state derived from the provider's status ordinal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// The task is open (any ordinal other than 2).
    #[default]
    Active,
    /// The task has been completed (ordinal 2).
    Completed,
}

/// Status ordinal the provider uses for completed tasks.
const COMPLETED_ORDINAL: i64 = 2;

impl TaskStatus {
    /// Maps a provider status ordinal to a completion state.
    #[must_use]
    pub const fn from_ordinal(ordinal: i64) -> Self {
        if ordinal == COMPLETED_ORDINAL {
            Self::Completed
        } else {
            Self::Active
        }
    }

    /// Returns `true` when the status marks the task completed.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Normalized task as it appears in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    content: Option<String>,
    due_date: Option<DateTime<Utc>>,
    priority: Priority,
    all_day: bool,
    status: TaskStatus,
    parent_id: Option<TaskId>,
}

impl Task {
    /// Builds a task from a wire record.
    ///
    /// Construction never fails: an unparsable due-date string is dropped
    /// and treated as an absent due date.
    #[must_use]
    pub fn from_record(record: TaskRecord) -> Self {
        let due_date = record.due_date.as_deref().and_then(parse_due_date);
        Self {
            id: TaskId::new(record.id),
            project_id: ProjectId::new(record.project_id),
            title: record.title,
            content: record.content,
            due_date,
            priority: Priority::from_ordinal(record.priority),
            all_day: record.is_all_day,
            status: TaskStatus::from_ordinal(record.status),
            parent_id: record.parent_id.map(TaskId::new),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the identifier of the owning project.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the free-text content, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns the due timestamp, if one was present and parsable.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns `true` when the task spans the whole day.
    #[must_use]
    pub const fn all_day(&self) -> bool {
        self.all_day
    }

    /// Returns the completion state.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the parent task identifier when this is a subtask.
    #[must_use]
    pub const fn parent_id(&self) -> Option<&TaskId> {
        self.parent_id.as_ref()
    }
}

/// Parses a provider due-date string into a UTC instant.
///
/// Accepts RFC 3339 (a trailing `Z` reads as UTC) and TickTick's colon-less
/// offset form such as `2024-01-15T10:00:00.000+0000`. Returns `None` for
/// anything else.
fn parse_due_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}
