//! Loosely-typed wire records exchanged with the TickTick open API.
//!
//! The API is lenient about which fields it returns, so every read-side
//! record deserializes with defaults rather than failing on absent fields.
//! Write-side payloads omit `None` fields entirely.

use serde::{Deserialize, Serialize};

/// Raw task payload as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskRecord {
    /// Opaque task identifier.
    pub id: String,
    /// Identifier of the owning project.
    pub project_id: String,
    /// Task title; the API may omit it.
    pub title: String,
    /// Free-text content.
    pub content: Option<String>,
    /// Due timestamp as an ISO 8601 string.
    pub due_date: Option<String>,
    /// Priority ordinal (0/1/3/5).
    pub priority: i64,
    /// Whether the task spans the whole day.
    pub is_all_day: bool,
    /// Status ordinal; 2 means completed.
    pub status: i64,
    /// Identifier of the parent task when this is a subtask.
    pub parent_id: Option<String>,
}

/// Raw project payload as returned by `GET /project`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectRecord {
    /// Opaque project identifier.
    pub id: String,
    /// Display name; the API may omit it.
    pub name: Option<String>,
    /// Display colour.
    pub color: Option<String>,
}

/// Combined payload of `GET /project/{id}/data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectData {
    /// The project itself.
    pub project: ProjectRecord,
    /// Tasks belonging to the project.
    pub tasks: Vec<TaskRecord>,
}

/// Write payload for `POST /task`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Identifier of the owning project.
    pub project_id: String,
    /// Free-text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Due timestamp as an ISO 8601 string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Priority ordinal (0/1/3/5).
    pub priority: i64,
    /// All-day flag; only meaningful alongside a due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_all_day: Option<bool>,
    /// Parent task identifier; set to create a subtask.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Write payload for `POST /task/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// Identifier of the task being updated.
    pub id: String,
    /// Identifier of the owning project.
    pub project_id: String,
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New free-text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New due timestamp as an ISO 8601 string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// New priority ordinal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}
