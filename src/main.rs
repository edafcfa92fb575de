//! todo-list
//!
//! Interactive in-memory to-do list. Nothing is persisted: the list lives
//! exactly as long as the shell session.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use todo_list::cli::{Cli, Command};
use todo_list::config::{Config, ConfigLoader, ConfigPaths};
use todo_list::logging::{self, LogTarget};
use todo_list::shell::Shell;
use tracing::{debug, info};

/// Load the merged configuration and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    // An explicit --config replaces the project and user tiers.
    let mut paths = ConfigPaths::discover();
    if let Some(config_path) = &cli.config {
        paths = paths.with_file(config_path);
    }
    let loader = ConfigLoader::load(paths)?;
    for (tier, path) in loader.sources() {
        debug!(tier = %tier, path = %path.display(), "Config source");
    }

    let mut config = loader.into_config();
    if let Some(format) = cli.format {
        config.display.format = format.into();
    }
    if let Some(countdown) = cli.countdown {
        config.display.countdown = countdown.into();
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log)?, cli.verbose)?;
    let config = load_config(&cli)?;

    match cli.command {
        Some(Command::Days(args)) => {
            let days = args.compute(Utc::now(), config.display.countdown)?;
            println!("{}", days);
        }
        Some(Command::Shell) | None => {
            info!(format = ?config.display.format, countdown = ?config.display.countdown, "Starting shell");
            let mut shell = Shell::new(config);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell.run(stdin, tokio::io::stdout()).await?;
        }
    }

    Ok(())
}
