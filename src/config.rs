use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

const SETTINGS_FILE: &str = ".historikrc";
const DEFAULT_HISTORY_FILE: &str = ".zsh_history";

/// Optional overrides read from `~/.historikrc`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub selector: String,
    pub height: String,
    pub prompt: String,
    pub shell: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            selector: "fzf".to_string(),
            height: "40%".to_string(),
            prompt: "Historik > ".to_string(),
            shell: "zsh".to_string(),
        }
    }
}

impl Settings {
    /// Loads the settings file from `home`, falling back to defaults when absent.
    pub fn load(home: Option<&Path>) -> Result<Self> {
        let Some(home) = home else {
            return Ok(Settings::default());
        };
        let path = home.join(SETTINGS_FILE);

        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!(path = %path.display(), "using settings file");
                toml::from_str(&text).map_err(|source| Error::Settings { path, source })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(source) => Err(Error::Io { path, source }),
        }
    }

    /// Resolves the selector executable on `PATH`.
    pub fn selector_path(&self) -> Result<PathBuf> {
        which::which(&self.selector).map_err(|_| Error::SelectorNotFound {
            program: self.selector.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryLocation {
    Found(PathBuf),
    NotFound,
}

/// Picks the history file: `histfile` when it names an existing file,
/// otherwise `.zsh_history` under `home`.
pub fn resolve_history_file(histfile: Option<&str>, home: Option<&Path>) -> HistoryLocation {
    if let Some(histfile) = histfile.filter(|h| !h.is_empty()) {
        let path = PathBuf::from(histfile);
        if path.exists() {
            return HistoryLocation::Found(path);
        }
        debug!(histfile, "HISTFILE does not exist, trying the default");
    }

    match home.map(|h| h.join(DEFAULT_HISTORY_FILE)) {
        Some(path) if path.exists() => HistoryLocation::Found(path),
        _ => HistoryLocation::NotFound,
    }
}

/// Everything a run needs to know before touching the history.
#[derive(Debug)]
pub struct RunConfig {
    pub history_file: PathBuf,
    pub selector: PathBuf,
    pub settings: Settings,
}

impl RunConfig {
    pub fn from_env() -> Result<Self> {
        let home = dirs::home_dir();
        let histfile = env::var("HISTFILE").ok();

        let history_file = match resolve_history_file(histfile.as_deref(), home.as_deref()) {
            HistoryLocation::Found(path) => path,
            HistoryLocation::NotFound => return Err(Error::HistoryNotFound),
        };
        let settings = Settings::load(home.as_deref())?;
        let selector = settings.selector_path()?;

        debug!(
            history = %history_file.display(),
            selector = %selector.display(),
            shell = %settings.shell,
            "resolved configuration"
        );
        Ok(RunConfig { history_file, selector, settings })
    }
}
