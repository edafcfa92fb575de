//! Structured error types for controller operations.
//!
//! Validation failures on add and edit-commit are not errors: those operations
//! reject silently. `TaskError` covers what the host can get wrong, such as an
//! id that no longer names a task or a malformed date.

use serde::Serialize;
use std::fmt;

use crate::types::TaskId;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    InvalidFieldValue,

    // Not found errors
    TaskNotFound,
    NoActiveModal,

    // Host errors
    UnknownCommand,
}

/// Structured error for controller and host responses.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl TaskError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    // Convenience constructors

    pub fn invalid_value(field: &str, reason: &str) -> Self {
        Self::new(ErrorCode::InvalidFieldValue, reason).with_field(field)
    }

    pub fn task_not_found(id: TaskId) -> Self {
        Self::new(ErrorCode::TaskNotFound, format!("Task not found: {}", id))
    }

    pub fn position_out_of_range(position: usize, len: usize) -> Self {
        Self::new(
            ErrorCode::TaskNotFound,
            format!("No task at position {} (list has {})", position, len),
        )
    }

    pub fn no_active_modal(what: &str) -> Self {
        Self::new(ErrorCode::NoActiveModal, format!("No {} in progress", what))
    }

    pub fn unknown_command(name: &str) -> Self {
        Self::new(ErrorCode::UnknownCommand, format!("Unknown command: {}", name))
    }
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TaskError {}

/// Result type for controller operations.
pub type TaskResult<T> = std::result::Result<T, TaskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_code_in_screaming_case() {
        let err = TaskError::task_not_found(TaskId::new(7));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "TASK_NOT_FOUND");
        assert_eq!(json["message"], "Task not found: #7");
        assert!(json.get("field").is_none());
    }

    #[test]
    fn test_invalid_value_carries_field() {
        let err = TaskError::invalid_value("due_date", "bad date");
        assert_eq!(err.code, ErrorCode::InvalidFieldValue);
        assert_eq!(err.field.as_deref(), Some("due_date"));
        assert_eq!(err.to_string(), "bad date");
    }
}
