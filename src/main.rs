mod config;
mod dedup;
mod error;
mod exec;
mod history;
mod logger;
mod selector;

use std::process;

use clap::{App, AppSettings};
use tracing::debug;

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::selector::Selection;

/// Runs the whole pipeline and returns the status to exit with.
fn run() -> Result<i32> {
    let config = RunConfig::from_env()?;

    let entries = history::load(&config.history_file)?;
    if entries.is_empty() {
        return Err(Error::EmptyHistory);
    }

    let total = entries.len();
    let unique = dedup::dedup_and_sort(entries);
    debug!(total, unique = unique.len(), "deduplicated history");

    match selector::select(&config.selector, &config.settings, &unique)? {
        Selection::Cancelled => {
            debug!("nothing selected");
            Ok(0)
        }
        Selection::Chosen(command) => exec::run_in_shell(&config.settings.shell, &command),
    }
}

fn main() {
    App::new("historik")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Fuzzy search your zsh history and run the selected command")
        .setting(AppSettings::ColoredHelp)
        .after_help(
            "Reads $HISTFILE or ~/.zsh_history, removes duplicates (newest wins) and \
             opens the list in fzf.\nOptional settings are read from ~/.historikrc.",
        )
        .get_matches();

    logger::init_logging();

    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };
    process::exit(code);
}
