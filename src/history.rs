use std::borrow::Cow;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Commands starting with this are historik's own invocations and never listed.
pub const SELF_NAME: &str = "historik";

lazy_static! {
    // ": <timestamp>:<elapsed>;<command>"
    static ref EXTENDED_HEADER: Regex = Regex::new(r"^: ([0-9]+):[0-9]+;(.*)$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub timestamp: Option<DateTime<Utc>>,
    pub command: String,
}

impl Entry {
    fn is_listable(&self) -> bool {
        !self.command.is_empty() && !self.command.starts_with(SELF_NAME)
    }
}

/// Reads the history file at `path` and parses it.
pub fn load(path: &Path) -> Result<Vec<Entry>> {
    let bytes = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let text = String::from_utf8_lossy(&bytes);
    if matches!(text, Cow::Owned(_)) {
        warn!(
            "{} contains invalid UTF-8, affected bytes were replaced",
            path.display()
        );
    }

    let entries = parse(&text);
    debug!(path = %path.display(), entries = entries.len(), "loaded history");
    Ok(entries)
}

/// Rebuilds logical entries from zsh extended history text, in file order.
///
/// A header line starts an entry; every other line is appended to the entry
/// being built as `"\n" + line`. Lines before the first header are dropped.
/// Only the text captured on the header line is trimmed.
pub fn parse(text: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut current: Option<Entry> = None;

    for line in text.lines() {
        if let Some(caps) = EXTENDED_HEADER.captures(line) {
            if let Some(done) = current.take() {
                push_listable(&mut entries, done);
            }

            // Overflowing digit strings still start an entry, just without a time.
            let timestamp = caps[1]
                .parse::<i64>()
                .ok()
                .and_then(|secs| DateTime::from_timestamp(secs, 0));

            current = Some(Entry {
                timestamp,
                command: caps[2].trim().to_string(),
            });
        } else if let Some(entry) = current.as_mut() {
            entry.command.push('\n');
            entry.command.push_str(line);
        }
    }

    if let Some(done) = current {
        push_listable(&mut entries, done);
    }

    entries
}

fn push_listable(entries: &mut Vec<Entry>, entry: Entry) {
    if entry.is_listable() {
        entries.push(entry);
    }
}
