//! CLI command definitions for todo-list
//!
//! The binary opens an interactive shell by default; `days` is a one-shot
//! helper around the countdown arithmetic.

pub mod days;

use crate::dates::CountdownMode;
use crate::format::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use days::DaysArgs;

/// Output format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Plain text list (default)
    Text,
    /// Markdown list grouped by completion
    Markdown,
    /// Pretty-printed JSON snapshot
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Countdown arithmetic selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CountdownArg {
    /// Due date at midnight UTC against the current timestamp, rounded up
    Timestamp,
    /// Whole calendar days
    Calendar,
}

impl From<CountdownArg> for CountdownMode {
    fn from(arg: CountdownArg) -> Self {
        match arg {
            CountdownArg::Timestamp => CountdownMode::Timestamp,
            CountdownArg::Calendar => CountdownMode::Calendar,
        }
    }
}

/// In-memory to-do list with due dates
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output format (overrides config)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<FormatArg>,

    /// Remaining-days arithmetic (overrides config)
    #[arg(long, value_enum, global = true)]
    pub countdown: Option<CountdownArg>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off (default), 1/stdout, 2/stderr, or filename
    #[arg(short, long, default_value = "0", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the interactive shell (default if no subcommand given)
    Shell,

    /// Print how many days remain until a due date
    Days(DaysArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_shell() {
        let cli = Cli::try_parse_from(["todo-list"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log, "0");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "todo-list", "shell", "--format", "markdown", "--countdown", "calendar", "-v",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Command::Shell)));
        assert_eq!(cli.format.map(OutputFormat::from), Some(OutputFormat::Markdown));
        assert_eq!(cli.countdown.map(CountdownMode::from), Some(CountdownMode::Calendar));
        assert!(cli.verbose);
    }

    #[test]
    fn test_days_subcommand() {
        let cli = Cli::try_parse_from(["todo-list", "days", "2030-01-04", "--from", "2030-01-01"])
            .unwrap();
        match cli.command {
            Some(Command::Days(args)) => {
                assert_eq!(args.due, "2030-01-04");
                assert_eq!(args.from.as_deref(), Some("2030-01-01"));
            }
            other => panic!("expected days, got {:?}", other),
        }
    }
}
