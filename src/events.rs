//! Inbound UI events and their dispatch onto the controller.
//!
//! A host produces four kinds of events: text-field changes, date-field
//! changes, form submits and button clicks. `dispatch` applies exactly one
//! event and reports what it did.

use serde::Serialize;
use tracing::debug;

use crate::controller::TaskListController;
use crate::dates::parse_due_date;
use crate::error::{TaskError, TaskResult};
use crate::types::{Task, TaskId};
use crate::view_state::EditPatch;

/// Which input a field event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The add-task form.
    NewTask,
    /// The edit dialog.
    Edit,
}

/// Which form a submit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    NewTask,
    Edit,
}

/// Clickable controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Toggle(TaskId),
    Edit(TaskId),
    Delete(TaskId),
    ConfirmDelete,
    CancelDelete,
    CancelEdit,
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    TextChanged { field: Field, value: String },
    /// Raw date input; an empty value clears the field.
    DateChanged { field: Field, value: String },
    Submit { form: Form },
    Click(Button),
}

/// What an event did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EventOutcome {
    /// A field of the form or the edit draft changed.
    FieldUpdated,
    Added { task_id: TaskId },
    Toggled { task_id: TaskId, completed: bool },
    DeleteRequested { task_id: TaskId },
    Deleted { task: Task },
    EditOpened { task_id: TaskId },
    Edited { task_id: TaskId },
    /// Add or edit-commit with blank text or no date. Inputs are kept.
    Rejected,
    /// The edit dialog or delete confirmation was closed without effect.
    DialogClosed,
    /// Nothing to act on (e.g. cancel with no modal open).
    Unchanged,
}

impl TaskListController {
    /// Apply one event.
    pub fn dispatch(&mut self, event: Event) -> TaskResult<EventOutcome> {
        debug!(?event, "Dispatching event");
        let outcome = match event {
            Event::TextChanged { field: Field::NewTask, value } => {
                self.set_form_text(value);
                EventOutcome::FieldUpdated
            }
            Event::TextChanged { field: Field::Edit, value } => {
                self.patch_edit(EditPatch::new().text(value))?
            }
            Event::DateChanged { field, value } => {
                let due_date = parse_due_date(&value)?;
                match field {
                    Field::NewTask => {
                        self.set_form_date(due_date);
                        EventOutcome::FieldUpdated
                    }
                    Field::Edit => self.patch_edit(EditPatch::new().due_date(due_date))?,
                }
            }
            Event::Submit { form: Form::NewTask } => match self.submit_form() {
                Some(task_id) => EventOutcome::Added { task_id },
                None => EventOutcome::Rejected,
            },
            Event::Submit { form: Form::Edit } => {
                let task_id = self
                    .edit_modal()
                    .map(|m| m.task_id)
                    .ok_or_else(|| TaskError::no_active_modal("edit"))?;
                if self.commit_edit()? {
                    EventOutcome::Edited { task_id }
                } else {
                    EventOutcome::Rejected
                }
            }
            Event::Click(button) => self.click(button)?,
        };
        Ok(outcome)
    }

    fn patch_edit(&mut self, patch: EditPatch) -> TaskResult<EventOutcome> {
        if self.update_edit_draft(patch) {
            Ok(EventOutcome::FieldUpdated)
        } else {
            Err(TaskError::no_active_modal("edit"))
        }
    }

    fn click(&mut self, button: Button) -> TaskResult<EventOutcome> {
        let outcome = match button {
            Button::Toggle(task_id) => {
                let completed = self.toggle_complete(task_id)?;
                EventOutcome::Toggled { task_id, completed }
            }
            Button::Edit(task_id) => {
                self.open_edit(task_id)?;
                EventOutcome::EditOpened { task_id }
            }
            Button::Delete(task_id) => {
                self.request_delete(task_id)?;
                EventOutcome::DeleteRequested { task_id }
            }
            Button::ConfirmDelete => match self.confirm_delete() {
                Some(task) => EventOutcome::Deleted { task },
                None => EventOutcome::Unchanged,
            },
            Button::CancelDelete => {
                if self.delete_confirmation().is_none() {
                    return Ok(EventOutcome::Unchanged);
                }
                self.cancel_delete();
                EventOutcome::DialogClosed
            }
            Button::CancelEdit => {
                if self.edit_modal().is_none() {
                    return Ok(EventOutcome::Unchanged);
                }
                self.cancel_edit();
                EventOutcome::DialogClosed
            }
        };
        Ok(outcome)
    }
}
