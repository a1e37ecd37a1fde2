use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every way a historik run can fail. All of them end the run with status 1.
#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "Zsh history file not found.\n\
         Historik only supports zsh history and requires a non-empty HISTFILE \
         environment variable or a default .zsh_history file."
    )]
    HistoryNotFound,

    #[error("{program} is not installed. Please install it to use this tool")]
    SelectorNotFound { program: String },

    #[error("Invalid settings in {}: {source}", .path.display())]
    Settings {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Could not read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("History is empty")]
    EmptyHistory,

    #[error("{0}")]
    Selector(String),

    #[error("failed to run {program}: {source}")]
    Execution { program: String, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
