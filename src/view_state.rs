//! Modal view state: the edit dialog draft and the delete confirmation.
//!
//! Both refer to their task by `TaskId`, never by position, and live apart
//! from the task list itself. Opening, editing or cancelling a modal never
//! touches committed task data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Task, TaskId, is_valid_entry};

/// Working copy of one task while the edit dialog is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditModal {
    pub task_id: TaskId,
    pub text: String,
    /// The date input can be emptied while editing.
    pub due_date: Option<NaiveDate>,
}

impl EditModal {
    pub fn open(task: &Task) -> Self {
        Self {
            task_id: task.id,
            text: task.text.clone(),
            due_date: Some(task.due_date),
        }
    }

    pub fn apply(&mut self, patch: EditPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
    }

    /// Whether the draft would be accepted by a commit.
    pub fn is_committable(&self) -> bool {
        is_valid_entry(&self.text, self.due_date)
    }
}

/// Partial update of an edit draft. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPatch {
    pub text: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl EditPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// A delete awaiting the user's yes/no.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub task_id: TaskId,
}
