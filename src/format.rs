//! Rendering the controller state as plain text, markdown or JSON.

use crate::config::{Config, Labels};
use crate::controller::TaskListController;
use crate::dates::CountdownMode;
use crate::events::EventOutcome;
use crate::types::{DueStatus, NewTaskForm, TaskId, TaskStats};
use crate::view_state::{DeleteConfirmation, EditModal};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output format for the rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Some(OutputFormat::Text),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// One rendered row.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRow {
    /// 1-based, as shown to the user.
    pub position: usize,
    pub id: TaskId,
    pub text: String,
    pub due_date: NaiveDate,
    pub completed: bool,
    pub status: DueStatus,
}

/// Everything a renderer needs, computed once against a fixed `now`.
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub tasks: Vec<TaskRow>,
    pub form: NewTaskForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<EditModal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<DeleteConfirmation>,
    pub stats: TaskStats,
}

impl ListView {
    pub fn build(ctl: &TaskListController, now: DateTime<Utc>, mode: CountdownMode) -> Self {
        let tasks = ctl
            .tasks()
            .iter()
            .enumerate()
            .map(|(i, task)| TaskRow {
                position: i + 1,
                id: task.id,
                text: task.text.clone(),
                due_date: task.due_date,
                completed: task.completed,
                status: DueStatus::for_task(task, now, mode),
            })
            .collect();

        Self {
            tasks,
            form: ctl.form().clone(),
            edit: ctl.edit_modal().cloned(),
            delete: ctl.delete_confirmation().copied(),
            stats: ctl.stats(now.date_naive()),
        }
    }

    fn row(&self, id: TaskId) -> Option<&TaskRow> {
        self.tasks.iter().find(|r| r.id == id)
    }
}

/// Render the controller in the configured format.
pub fn render(ctl: &TaskListController, config: &Config, now: DateTime<Utc>) -> String {
    let view = ListView::build(ctl, now, config.display.countdown);
    match config.display.format {
        OutputFormat::Text => format_text(&view, config),
        OutputFormat::Markdown => format_markdown(&view, config),
        OutputFormat::Json => serde_json::to_string_pretty(&view).unwrap_or_default(),
    }
}

/// Compact single-line JSON snapshot.
pub fn render_json_line(ctl: &TaskListController, config: &Config, now: DateTime<Utc>) -> String {
    let view = ListView::build(ctl, now, config.display.countdown);
    serde_json::to_string(&view).unwrap_or_default()
}

fn status_label(status: DueStatus, labels: &Labels) -> String {
    match status {
        DueStatus::Completed => labels.completed.clone(),
        DueStatus::DaysLeft(days) => labels.days_left(days),
        DueStatus::DueToday => labels.due_today.clone(),
    }
}

/// Plain text, one line per task, followed by any open dialog.
pub fn format_text(view: &ListView, config: &Config) -> String {
    let labels = &config.labels;
    let mut out = String::new();

    out.push_str(&format!(
        "{} ({} open, {} done)\n",
        labels.title, view.stats.pending, view.stats.completed
    ));

    if view.tasks.is_empty() {
        out.push_str(&format!("  {}\n", labels.empty));
    }

    for row in &view.tasks {
        let check = if row.completed { "x" } else { " " };
        let id = if config.display.show_ids {
            format!(" {}", row.id)
        } else {
            String::new()
        };
        out.push_str(&format!(
            "{:>3}.{} [{}] {}  {}  ({})\n",
            row.position,
            id,
            check,
            row.text,
            row.due_date,
            status_label(row.status, labels)
        ));
    }

    if let Some(ref edit) = view.edit {
        out.push_str(&format!("\n== {} ==\n", labels.edit_title));
        out.push_str(&format!("  text: {}\n", edit.text));
        out.push_str(&format!(
            "  date: {}\n",
            edit.due_date.map(|d| d.to_string()).unwrap_or_default()
        ));
        out.push_str("  (edit-text / edit-date / save / cancel)\n");
    }

    if let Some(ref delete) = view.delete {
        let target = view
            .row(delete.task_id)
            .map(|r| format!("{}. {}", r.position, r.text))
            .unwrap_or_else(|| delete.task_id.to_string());
        out.push_str(&format!("\n{} {}\n", labels.confirm_delete, target));
        out.push_str("  (yes / no)\n");
    }

    out
}

/// Markdown, pending tasks before completed ones.
pub fn format_markdown(view: &ListView, config: &Config) -> String {
    let labels = &config.labels;
    let mut md = String::new();

    md.push_str(&format!("# {} ({})\n\n", labels.title, view.tasks.len()));

    let (done, open): (Vec<&TaskRow>, Vec<&TaskRow>) =
        view.tasks.iter().partition(|r| r.completed);

    for (heading, rows) in [("Open", open), ("Completed", done)] {
        if rows.is_empty() {
            continue;
        }
        md.push_str(&format!("## {}\n\n", heading));
        for row in rows {
            let check = if row.completed { "x" } else { " " };
            md.push_str(&format!(
                "- [{}] **{}** `{}` due {} _{}_\n",
                check,
                row.text,
                row.position,
                row.due_date,
                status_label(row.status, labels)
            ));
        }
        md.push('\n');
    }

    if let Some(ref edit) = view.edit {
        md.push_str(&format!("## {}\n", labels.edit_title));
        md.push_str(&format!("- **text**: {}\n", edit.text));
        if let Some(date) = edit.due_date {
            md.push_str(&format!("- **date**: {}\n", date));
        }
        md.push('\n');
    }

    if let Some(ref delete) = view.delete {
        md.push_str(&format!("> {} (`{}`)\n", labels.confirm_delete, delete.task_id));
    }

    md
}

/// Short confirmation line for an event, or `None` if nothing is worth saying.
pub fn describe_outcome(outcome: &EventOutcome, ctl: &TaskListController) -> Option<String> {
    let text_of = |id: TaskId| {
        ctl.get(id)
            .map(|t| format!("'{}'", t.text))
            .unwrap_or_else(|| id.to_string())
    };
    match outcome {
        EventOutcome::Added { task_id } => Some(format!("Added {}", text_of(*task_id))),
        EventOutcome::Toggled { task_id, completed } => Some(format!(
            "{} {}",
            if *completed { "Completed" } else { "Reopened" },
            text_of(*task_id)
        )),
        EventOutcome::Deleted { task } => Some(format!("Deleted '{}'", task.text)),
        EventOutcome::Edited { task_id } => Some(format!("Saved {}", text_of(*task_id))),
        EventOutcome::Rejected => Some("Text and date are both required.".to_string()),
        EventOutcome::Unchanged => Some("Nothing to do.".to_string()),
        EventOutcome::FieldUpdated
        | EventOutcome::DialogClosed
        | EventOutcome::DeleteRequested { .. }
        | EventOutcome::EditOpened { .. } => None,
    }
}

/// JSON form of an outcome, for `--format json` sessions.
pub fn outcome_to_json(outcome: &EventOutcome) -> Value {
    serde_json::to_value(outcome).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
    }

    fn sample() -> TaskListController {
        let mut ctl = TaskListController::new();
        ctl.add_task("Pay rent", NaiveDate::from_ymd_opt(2030, 1, 4));
        ctl.add_task("Call plumber", NaiveDate::from_ymd_opt(2030, 1, 1));
        let id = ctl.add_task("File taxes", NaiveDate::from_ymd_opt(2030, 2, 1)).unwrap();
        ctl.toggle_complete(id).unwrap();
        ctl
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("md"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::from_str("plain"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_str("xml"), None);
    }

    #[test]
    fn test_text_rendering() {
        let out = render(&sample(), &Config::default(), now());
        assert!(out.starts_with("To-do List (2 open, 1 done)\n"));
        assert!(out.contains("  1. [ ] Pay rent  2030-01-04  (3 days left)"));
        assert!(out.contains("  2. [ ] Call plumber  2030-01-01  (Due today)"));
        assert!(out.contains("  3. [x] File taxes  2030-02-01  (Task complete!)"));
        assert!(!out.contains("yes / no"));
    }

    #[test]
    fn test_text_shows_open_dialogs() {
        let mut ctl = sample();
        ctl.request_delete(ctl.id_at(1).unwrap()).unwrap();
        ctl.open_edit(ctl.id_at(0).unwrap()).unwrap();

        let out = render(&ctl, &Config::default(), now());
        assert!(out.contains("== Edit Task =="));
        assert!(out.contains("  text: Pay rent"));
        assert!(out.contains("Are you sure you want to delete this task? 2. Call plumber"));
    }

    #[test]
    fn test_empty_list() {
        let out = render(&TaskListController::new(), &Config::default(), now());
        assert!(out.contains("No tasks yet."));
    }

    #[test]
    fn test_markdown_groups_by_completion() {
        let mut config = Config::default();
        config.display.format = OutputFormat::Markdown;
        let md = render(&sample(), &config, now());

        let open = md.find("## Open").unwrap();
        let done = md.find("## Completed").unwrap();
        assert!(open < done);
        assert!(md.contains("- [x] **File taxes**"));
    }

    #[test]
    fn test_json_rendering() {
        let mut config = Config::default();
        config.display.format = OutputFormat::Json;
        let json: Value = serde_json::from_str(&render(&sample(), &config, now())).unwrap();

        assert_eq!(json["tasks"].as_array().unwrap().len(), 3);
        assert_eq!(json["tasks"][0]["position"], 1);
        assert_eq!(json["tasks"][0]["due_date"], "2030-01-04");
        assert_eq!(json["tasks"][0]["status"]["kind"], "days_left");
        assert_eq!(json["tasks"][0]["status"]["days"], 3);
        assert_eq!(json["tasks"][2]["status"]["kind"], "completed");
        assert_eq!(json["stats"]["completed"], 1);
        assert!(json.get("edit").is_none());
    }

    #[test]
    fn test_json_line_has_no_newlines() {
        let line = render_json_line(&sample(), &Config::default(), now());
        assert!(!line.contains('\n'));
        let json: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(json["stats"]["total"], 3);
    }

    #[test]
    fn test_describe_outcome() {
        let ctl = sample();
        let id = ctl.id_at(0).unwrap();
        assert_eq!(
            describe_outcome(&EventOutcome::Added { task_id: id }, &ctl).as_deref(),
            Some("Added 'Pay rent'")
        );
        assert_eq!(describe_outcome(&EventOutcome::FieldUpdated, &ctl), None);
        assert_eq!(
            outcome_to_json(&EventOutcome::Rejected),
            serde_json::json!({"outcome": "rejected"})
        );
    }
}
