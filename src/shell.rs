//! Interactive line-oriented host.
//!
//! Each input line becomes zero or more events for the controller. Task
//! numbers typed by the user are the 1-based positions shown in the last
//! listing and are resolved to ids before dispatch, so nothing holds on to a
//! position across a mutation.

use anyhow::Result;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::config::Config;
use crate::controller::TaskListController;
use crate::dates::parse_due_date;
use crate::error::{TaskError, TaskResult};
use crate::events::{Button, Event, EventOutcome, Field, Form};
use crate::format::{self, OutputFormat};
use crate::types::TaskId;

pub const HELP: &str = "\
Commands:
  text <words>              set the new task's text
  date [YYYY-MM-DD]         set (or clear) the new task's due date
  add [YYYY-MM-DD] [words]  add a task from the form, filling it first if given
  toggle <n>                mark task n complete / not complete
  edit <n>                  open task n for editing
  edit-text <words>         change the text being edited
  edit-date [YYYY-MM-DD]    change (or clear) the date being edited
  save                      save the edit
  delete <n>                ask to delete task n
  yes | no                  confirm or cancel the delete
  cancel                    close whichever dialog is open
  list                      show the list
  help                      show this help
  quit                      leave (nothing is saved)
";

/// Errors in what the user typed, before anything reaches the controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs {what}")]
    MissingArgument { command: String, what: &'static str },

    #[error("'{0}' is not a task number")]
    BadNumber(String),

    #[error("no task number {position} (list has {len})")]
    NoSuchTask { position: usize, len: usize },

    #[error("nothing to cancel")]
    NothingToCancel,
}

impl From<CommandError> for TaskError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Unknown(name) => TaskError::unknown_command(&name),
            CommandError::NoSuchTask { position, len } => {
                TaskError::position_out_of_range(position, len)
            }
            CommandError::NothingToCancel => TaskError::no_active_modal("dialog"),
            other @ (CommandError::MissingArgument { .. } | CommandError::BadNumber(_)) => {
                TaskError::invalid_value("command", &other.to_string())
            }
        }
    }
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Events(Vec<Event>),
    List,
    Help,
    Quit,
}

/// Parse one line against the current list (for task numbers).
pub fn parse_line(line: &str, ctl: &TaskListController) -> Result<ShellCommand, CommandError> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let text = |field: Field| Event::TextChanged {
        field,
        value: rest.to_string(),
    };
    let date = |field: Field| Event::DateChanged {
        field,
        value: rest.to_string(),
    };

    let events = match name {
        "" | "list" | "ls" => return Ok(ShellCommand::List),
        "help" | "?" => return Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => return Ok(ShellCommand::Quit),
        "text" => vec![text(Field::NewTask)],
        "date" => vec![date(Field::NewTask)],
        "add" => parse_add(rest),
        "toggle" | "done" => vec![Event::Click(Button::Toggle(task_arg(name, rest, ctl)?))],
        "edit" => vec![Event::Click(Button::Edit(task_arg(name, rest, ctl)?))],
        "edit-text" => vec![text(Field::Edit)],
        "edit-date" => vec![date(Field::Edit)],
        "save" => vec![Event::Submit { form: Form::Edit }],
        "delete" | "rm" => vec![Event::Click(Button::Delete(task_arg(name, rest, ctl)?))],
        "yes" | "y" => vec![Event::Click(Button::ConfirmDelete)],
        "no" | "n" => vec![Event::Click(Button::CancelDelete)],
        "cancel" => {
            // Delete confirmation sits on top when both are open.
            if ctl.delete_confirmation().is_some() {
                vec![Event::Click(Button::CancelDelete)]
            } else if ctl.edit_modal().is_some() {
                vec![Event::Click(Button::CancelEdit)]
            } else {
                return Err(CommandError::NothingToCancel);
            }
        }
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(ShellCommand::Events(events))
}

/// `add`, `add <date>`, `add <words>` or `add <date> <words>`.
fn parse_add(rest: &str) -> Vec<Event> {
    let mut events = Vec::new();
    if !rest.is_empty() {
        let (first, tail) = match rest.split_once(char::is_whitespace) {
            Some((first, tail)) => (first, tail.trim()),
            None => (rest, ""),
        };
        // A malformed date still goes through as a date so dispatch rejects it.
        let (date, words) = if looks_like_date(first) {
            (Some(first), tail)
        } else {
            (None, rest)
        };
        if let Some(date) = date {
            events.push(Event::DateChanged {
                field: Field::NewTask,
                value: date.to_string(),
            });
        }
        if !words.is_empty() {
            events.push(Event::TextChanged {
                field: Field::NewTask,
                value: words.to_string(),
            });
        }
    }
    events.push(Event::Submit {
        form: Form::NewTask,
    });
    events
}

/// `NNNN-NN-NN`, or anything that parses as a date.
fn looks_like_date(token: &str) -> bool {
    let shaped = token.len() == 10
        && token.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
    shaped || matches!(parse_due_date(token), Ok(Some(_)))
}

fn task_arg(command: &str, rest: &str, ctl: &TaskListController) -> Result<TaskId, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument {
            command: command.to_string(),
            what: "a task number",
        });
    }
    let position: usize = rest
        .parse()
        .map_err(|_| CommandError::BadNumber(rest.to_string()))?;
    position
        .checked_sub(1)
        .and_then(|i| ctl.id_at(i))
        .ok_or(CommandError::NoSuchTask {
            position,
            len: ctl.len(),
        })
}

/// Result of handling one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub output: String,
    pub quit: bool,
}

/// The shell: a controller plus the configuration used to render it.
pub struct Shell {
    controller: TaskListController,
    config: Config,
}

impl Shell {
    pub fn new(config: Config) -> Self {
        Self {
            controller: TaskListController::new(),
            config,
        }
    }

    pub fn controller(&self) -> &TaskListController {
        &self.controller
    }

    /// Render the list. JSON snapshots stay on one line so a JSON session
    /// can be read line by line.
    pub fn render(&self, now: DateTime<Utc>) -> String {
        match self.config.display.format {
            OutputFormat::Json => format::render_json_line(&self.controller, &self.config, now),
            _ => format::render(&self.controller, &self.config, now),
        }
    }

    /// Apply one line of input and produce the text to show for it.
    pub fn handle_line(&mut self, line: &str, now: DateTime<Utc>) -> Reply {
        let command = match parse_line(line, &self.controller) {
            Ok(command) => command,
            Err(e) => return self.error_reply(e.into()),
        };

        match command {
            ShellCommand::Quit => Reply {
                output: String::new(),
                quit: true,
            },
            ShellCommand::Help => Reply {
                output: HELP.to_string(),
                quit: false,
            },
            ShellCommand::List => Reply {
                output: with_newline(self.render(now)),
                quit: false,
            },
            ShellCommand::Events(events) => match self.apply(events) {
                Ok(outcomes) => self.outcome_reply(&outcomes, now),
                Err(e) => self.error_reply(e),
            },
        }
    }

    /// Dispatch events in order, stopping at the first error.
    fn apply(&mut self, events: Vec<Event>) -> TaskResult<Vec<EventOutcome>> {
        let mut outcomes = Vec::with_capacity(events.len());
        for event in events {
            outcomes.push(self.controller.dispatch(event)?);
        }
        Ok(outcomes)
    }

    fn outcome_reply(&self, outcomes: &[EventOutcome], now: DateTime<Utc>) -> Reply {
        let mut output = String::new();
        let mut changed = false;

        for outcome in outcomes {
            debug!(?outcome, "Event applied");
            if self.config.display.format == OutputFormat::Json {
                output.push_str(&format::outcome_to_json(outcome).to_string());
                output.push('\n');
            } else if let Some(message) = format::describe_outcome(outcome, &self.controller) {
                output.push_str(&message);
                output.push('\n');
            }
            changed |= is_visible_change(outcome);
        }

        if changed && self.config.shell.render_after_change {
            output.push_str(&with_newline(self.render(now)));
        }
        Reply {
            output,
            quit: false,
        }
    }

    fn error_reply(&self, err: TaskError) -> Reply {
        debug!(code = ?err.code, error = %err, "Command failed");
        let output = if self.config.display.format == OutputFormat::Json {
            let json = serde_json::to_string(&err)
                .unwrap_or_else(|_| serde_json::json!({ "error": err.to_string() }).to_string());
            format!("{}\n", json)
        } else {
            format!("error: {}\n", err)
        };
        Reply {
            output,
            quit: false,
        }
    }

    /// Read lines from `input` until EOF or `quit`, writing replies to
    /// `output`. Lines are handled strictly one at a time.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Shell started");
        output
            .write_all(with_newline(self.render(Utc::now())).as_bytes())
            .await?;

        let mut lines = input.lines();
        loop {
            output.write_all(self.config.shell.prompt.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let reply = self.handle_line(&line, Utc::now());
            output.write_all(reply.output.as_bytes()).await?;
            if reply.quit {
                break;
            }
        }
        output.flush().await?;

        info!(tasks = self.controller.len(), "Shell finished");
        Ok(())
    }
}

fn is_visible_change(outcome: &EventOutcome) -> bool {
    !matches!(
        outcome,
        EventOutcome::FieldUpdated | EventOutcome::Rejected | EventOutcome::Unchanged
    )
}

fn with_newline(mut s: String) -> String {
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}
