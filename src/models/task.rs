use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input structure for creating or replacing a task.
///
/// Missing fields deserialize to their empty defaults so that an absent title is
/// reported by the task service as an empty title rather than as a malformed body.
/// Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Free-form status, e.g. "pending" or "done".
    #[serde(default)]
    pub status: String,
}

/// A task as returned by the API.
///
/// `id` is the sequential, user-facing identifier assigned by the task service. The
/// store's own record identifier is never part of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub status: String,
}

impl Task {
    pub fn new(id: i64, input: TaskInput) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            status: input.status,
        }
    }

    /// Replaces every mutable field, keeping `id`.
    pub fn apply(&mut self, input: TaskInput) {
        self.title = input.title;
        self.description = input.description;
        self.due_date = input.due_date;
        self.status = input.status;
    }
}
