//! Core types for the to-do list.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dates::{CountdownMode, countdown};

/// Stable identifier of a task within one controller.
///
/// Assigned from a monotonic counter at creation and never reused, so an id
/// stays valid while other tasks are added or deleted around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub due_date: NaiveDate,
    pub completed: bool,
}

/// Input fields of the add-task form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaskForm {
    pub text: String,
    pub due_date: Option<NaiveDate>,
}

impl NewTaskForm {
    /// Reset both fields after a successful submit.
    pub fn clear(&mut self) {
        self.text.clear();
        self.due_date = None;
    }
}

/// True if `text` has something besides whitespace and a date is set.
pub fn is_valid_entry(text: &str, due_date: Option<NaiveDate>) -> bool {
    !text.trim().is_empty() && due_date.is_some()
}

/// Per-row status line shown under a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum DueStatus {
    Completed,
    DaysLeft(i64),
    /// Due today, or already past due.
    DueToday,
}

impl DueStatus {
    pub fn for_task(task: &Task, now: DateTime<Utc>, mode: CountdownMode) -> Self {
        if task.completed {
            return DueStatus::Completed;
        }
        match countdown(task.due_date, now, mode) {
            days if days > 0 => DueStatus::DaysLeft(days),
            _ => DueStatus::DueToday,
        }
    }
}

/// Aggregate counts over the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Pending tasks whose due date is before the reference day.
    pub overdue: usize,
}
