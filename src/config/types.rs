//! Configuration types.

use crate::dates::CountdownMode;
use crate::format::OutputFormat;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub shell: ShellConfig,
}

/// How the task list is rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Output format: text, markdown or json.
    #[serde(default)]
    pub format: OutputFormat,

    /// Remaining-days arithmetic (timestamp or calendar).
    #[serde(default)]
    pub countdown: CountdownMode,

    /// Show task ids next to positions.
    #[serde(default)]
    pub show_ids: bool,
}

/// User-facing strings. `{days}` in `days_left` is replaced by the count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Labels {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_completed")]
    pub completed: String,
    #[serde(default = "default_days_left")]
    pub days_left: String,
    #[serde(default = "default_due_today")]
    pub due_today: String,
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: String,
    #[serde(default = "default_edit_title")]
    pub edit_title: String,
    #[serde(default = "default_empty")]
    pub empty: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: default_title(),
            completed: default_completed(),
            days_left: default_days_left(),
            due_today: default_due_today(),
            confirm_delete: default_confirm_delete(),
            edit_title: default_edit_title(),
            empty: default_empty(),
        }
    }
}

impl Labels {
    pub fn days_left(&self, days: i64) -> String {
        self.days_left.replace("{days}", &days.to_string())
    }
}

fn default_title() -> String {
    "To-do List".to_string()
}

fn default_completed() -> String {
    "Task complete!".to_string()
}

fn default_days_left() -> String {
    "{days} days left".to_string()
}

fn default_due_today() -> String {
    "Due today".to_string()
}

fn default_confirm_delete() -> String {
    "Are you sure you want to delete this task?".to_string()
}

fn default_edit_title() -> String {
    "Edit Task".to_string()
}

fn default_empty() -> String {
    "No tasks yet.".to_string()
}

/// Interactive shell settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Print the list after every event that changes it.
    #[serde(default = "default_true")]
    pub render_after_change: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            render_after_change: true,
        }
    }
}

fn default_prompt() -> String {
    "todo> ".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
display:
  format: markdown
labels:
  completed: "Tugas Selesai!"
  days_left: "{days} hari tersisa"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.display.format, OutputFormat::Markdown);
        assert_eq!(config.display.countdown, CountdownMode::Timestamp);
        assert_eq!(config.labels.completed, "Tugas Selesai!");
        assert_eq!(config.labels.due_today, "Due today");
        assert_eq!(config.labels.days_left(3), "3 hari tersisa");
        assert_eq!(config.shell.prompt, "todo> ");
    }

    #[test]
    fn test_display_defaults() {
        let display = DisplayConfig::default();
        assert_eq!(display.format, OutputFormat::Text);
        assert_eq!(display.countdown, CountdownMode::Timestamp);
        assert!(!display.show_ids);
    }
}
