//! Domain models shared by the remote API boundary and the local cache.
//!
//! Field names serialize in the wire format the board service speaks
//! (`boardId`, `columnId`, `createdAt`, `dueDate`). Timestamps are opaque
//! strings; the client stores and displays them but never interprets them.

use serde::{Deserialize, Serialize};

/// Opaque entity id. Assigned by the server on create, or kept as the
/// client-chosen value when an entity is created offline.
pub type Id = String;

/// Root aggregate. Owns zero or more columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: Id,
    pub name: String,
}

/// An ordered lane of tasks within a board.
///
/// `position` values among the columns of one board form a contiguous
/// zero-based sequence after any successful reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: Id,
    pub name: String,
    pub position: i64,
    pub board_id: Id,
}

/// An individual work item within a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Id,
    pub name: String,
    pub position: i64,
    pub created_at: String,
    pub due_date: String,
    pub completed: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub column_id: Id,
}

/// Partial task payload for cache upserts.
///
/// The cache shallow-merges a patch over the stored task with the same id,
/// so fields omitted from an update payload are preserved. Only tasks get
/// merge semantics; boards and columns are replaced whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_id: Option<Id>,
}

impl From<&Task> for TaskPatch {
    fn from(task: &Task) -> Self {
        Self {
            name: Some(task.name.clone()),
            position: Some(task.position),
            created_at: Some(task.created_at.clone()),
            due_date: Some(task.due_date.clone()),
            completed: Some(task.completed),
            tags: Some(task.tags.clone()),
            column_id: Some(task.column_id.clone()),
        }
    }
}

impl Task {
    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    pub(crate) fn apply(&mut self, patch: &TaskPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(created_at) = &patch.created_at {
            self.created_at = created_at.clone();
        }
        if let Some(due_date) = &patch.due_date {
            self.due_date = due_date.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
        if let Some(column_id) = &patch.column_id {
            self.column_id = column_id.clone();
        }
    }

    /// Materialize a task from a patch when no cached copy exists yet.
    pub(crate) fn from_patch(id: &str, patch: &TaskPatch) -> Self {
        let mut task = Self {
            id: id.to_string(),
            name: String::new(),
            position: 0,
            created_at: String::new(),
            due_date: String::new(),
            completed: false,
            tags: Vec::new(),
            column_id: String::new(),
        };
        task.apply(patch);
        task
    }
}
