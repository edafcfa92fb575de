//! The task list and the operations that are allowed to change it.
//!
//! `TaskListController` owns the ordered task list, the add-task form and the
//! two modal view states. Every mutation goes through a method here; each runs
//! to completion before the next event is handled.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{TaskError, TaskResult};
use crate::types::{NewTaskForm, Task, TaskId, TaskStats, is_valid_entry};
use crate::view_state::{DeleteConfirmation, EditModal, EditPatch};

/// In-memory to-do list with its transient UI state.
#[derive(Debug, Clone, Default)]
pub struct TaskListController {
    tasks: Vec<Task>,
    next_id: u64,
    form: NewTaskForm,
    edit: Option<EditModal>,
    delete: Option<DeleteConfirmation>,
}

impl TaskListController {
    /// Create an empty controller. Instances are fully independent.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Id of the task currently rendered at `position` (0-based).
    pub fn id_at(&self, position: usize) -> Option<TaskId> {
        self.tasks.get(position).map(|t| t.id)
    }

    pub fn position_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn form(&self) -> &NewTaskForm {
        &self.form
    }

    pub fn edit_modal(&self) -> Option<&EditModal> {
        self.edit.as_ref()
    }

    pub fn delete_confirmation(&self) -> Option<&DeleteConfirmation> {
        self.delete.as_ref()
    }

    /// Counts over the list; `today` decides what is overdue.
    pub fn stats(&self, today: NaiveDate) -> TaskStats {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        let overdue = self
            .tasks
            .iter()
            .filter(|t| !t.completed && t.due_date < today)
            .count();
        TaskStats {
            total: self.tasks.len(),
            completed,
            pending: self.tasks.len() - completed,
            overdue,
        }
    }

    fn require(&self, id: TaskId) -> TaskResult<usize> {
        self.position_of(id)
            .ok_or_else(|| TaskError::task_not_found(id))
    }

    // ------------------------------------------------------------------
    // Add
    // ------------------------------------------------------------------

    /// Append a new, not yet completed task.
    ///
    /// Returns `None` without touching the list if `text` is blank or no date
    /// is given.
    pub fn add_task(&mut self, text: &str, due_date: Option<NaiveDate>) -> Option<TaskId> {
        if !is_valid_entry(text, due_date) {
            debug!(text_len = text.len(), has_date = due_date.is_some(), "Add rejected");
            return None;
        }
        let due_date = due_date?;

        self.next_id += 1;
        let id = TaskId::new(self.next_id);
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            due_date,
            completed: false,
        });
        debug!(task_id = %id, %due_date, position = self.tasks.len() - 1, "Task added");
        Some(id)
    }

    pub fn set_form_text(&mut self, text: impl Into<String>) {
        self.form.text = text.into();
    }

    pub fn set_form_date(&mut self, due_date: Option<NaiveDate>) {
        self.form.due_date = due_date;
    }

    /// Add a task from the form fields. The form is cleared only when the
    /// task was accepted; a rejected submit keeps what was typed.
    pub fn submit_form(&mut self) -> Option<TaskId> {
        let text = self.form.text.clone();
        let id = self.add_task(&text, self.form.due_date)?;
        self.form.clear();
        Some(id)
    }

    // ------------------------------------------------------------------
    // Complete
    // ------------------------------------------------------------------

    /// Flip the completed flag and return its new value.
    pub fn toggle_complete(&mut self, id: TaskId) -> TaskResult<bool> {
        let pos = self.require(id)?;
        let task = &mut self.tasks[pos];
        task.completed = !task.completed;
        debug!(task_id = %id, completed = task.completed, "Task toggled");
        Ok(task.completed)
    }

    // ------------------------------------------------------------------
    // Delete with confirmation
    // ------------------------------------------------------------------

    /// Ask for confirmation before deleting. The list is not changed yet.
    pub fn request_delete(&mut self, id: TaskId) -> TaskResult<()> {
        self.require(id)?;
        self.delete = Some(DeleteConfirmation { task_id: id });
        debug!(task_id = %id, "Delete requested");
        Ok(())
    }

    /// Remove the task awaiting confirmation and return it.
    ///
    /// Does nothing when no delete is pending.
    pub fn confirm_delete(&mut self) -> Option<Task> {
        let pending = self.delete.take()?;
        let pos = self.position_of(pending.task_id)?;
        let removed = self.tasks.remove(pos);
        debug!(task_id = %removed.id, position = pos, "Task deleted");

        // An open edit of the deleted task has nothing left to commit to.
        if self.edit.as_ref().is_some_and(|e| e.task_id == removed.id) {
            self.edit = None;
        }
        Some(removed)
    }

    pub fn cancel_delete(&mut self) {
        if let Some(pending) = self.delete.take() {
            debug!(task_id = %pending.task_id, "Delete cancelled");
        }
    }

    // ------------------------------------------------------------------
    // Edit
    // ------------------------------------------------------------------

    /// Open the edit dialog on a copy of the task's text and date.
    pub fn open_edit(&mut self, id: TaskId) -> TaskResult<()> {
        let pos = self.require(id)?;
        self.edit = Some(EditModal::open(&self.tasks[pos]));
        debug!(task_id = %id, "Edit opened");
        Ok(())
    }

    /// Change the draft. Returns `false` if no edit is open.
    pub fn update_edit_draft(&mut self, patch: EditPatch) -> bool {
        match self.edit.as_mut() {
            Some(modal) => {
                modal.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Write the draft back to its task, keeping the completed flag.
    ///
    /// Returns `Ok(false)` and leaves the dialog open when the draft text is
    /// blank or its date is cleared, and also when no edit is open.
    pub fn commit_edit(&mut self) -> TaskResult<bool> {
        let Some(modal) = self.edit.as_ref() else {
            return Ok(false);
        };
        if !modal.is_committable() {
            debug!(task_id = %modal.task_id, "Edit commit rejected");
            return Ok(false);
        }
        let Some(due_date) = modal.due_date else {
            return Ok(false);
        };

        let id = modal.task_id;
        let text = modal.text.clone();
        let pos = self.require(id)?;
        let task = &mut self.tasks[pos];
        task.text = text;
        task.due_date = due_date;
        self.edit = None;
        debug!(task_id = %id, "Edit committed");
        Ok(true)
    }

    pub fn cancel_edit(&mut self) {
        if let Some(modal) = self.edit.take() {
            debug!(task_id = %modal.task_id, "Edit cancelled");
        }
    }
}
