//! Hands the deduplicated history to an external fuzzy selector (`fzf` by
//! default) and reads back the chosen line.
//!
//! Both pipes of the child can fill up: the selector stops reading its input
//! until someone drains its output, and vice versa. The list is therefore fed
//! from a dedicated writer thread while the calling thread reads stdout.

use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::history::Entry;

/// Exit status the selector uses when the user aborts (ESC / CTRL-C).
pub const CANCELLED_EXIT_CODE: i32 = 130;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Chosen(String),
    Cancelled,
}

pub fn selector_args(settings: &Settings) -> Vec<String> {
    vec![
        format!("--height={}", settings.height),
        "--reverse".to_string(),
        "--border".to_string(),
        format!("--prompt={}", settings.prompt),
        "--bind=ctrl-r:toggle-sort".to_string(),
        "--header=CTRL-R: toggle sort, ESC: quit".to_string(),
    ]
}

/// One command per line. Embedded newlines are passed through untouched, so
/// the selector shows each line of a multi-line command on its own.
fn selector_input(entries: &[Entry]) -> String {
    let mut input = String::new();
    for entry in entries {
        input.push_str(&entry.command);
        input.push('\n');
    }
    input
}

pub fn select(program: &Path, settings: &Settings, entries: &[Entry]) -> Result<Selection> {
    let args = selector_args(settings);
    debug!(program = %program.display(), ?args, "starting selector");

    let mut child = Command::new(program)
        .args(&args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| Error::Selector(format!("failed to start {}: {}", program.display(), e)))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| Error::Selector("failed to create stdin pipe for selector".to_string()))?;
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| Error::Selector("failed to create stdout pipe for selector".to_string()))?;

    let input = selector_input(entries);
    // Dropping `stdin` at the end of the thread signals end of input.
    let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

    let mut output = Vec::new();
    let read = stdout.read_to_end(&mut output);

    match writer.join() {
        Ok(Ok(())) => {}
        // The selector may exit before consuming the whole list.
        Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("selector closed its input early");
        }
        Ok(Err(e)) => warn!("failed to write history to selector: {}", e),
        Err(_) => return Err(Error::Selector("selector writer thread panicked".to_string())),
    }

    let status = child
        .wait()
        .map_err(|e| Error::Selector(format!("failed to wait for selector: {}", e)))?;
    read.map_err(|e| Error::Selector(format!("failed to read selector output: {}", e)))?;
    debug!(?status, "selector exited");

    if status.success() {
        let chosen = String::from_utf8_lossy(&output).trim().to_string();
        if chosen.is_empty() {
            return Ok(Selection::Cancelled);
        }
        return Ok(Selection::Chosen(chosen));
    }

    match status.code() {
        Some(CANCELLED_EXIT_CODE) => Ok(Selection::Cancelled),
        _ => Err(Error::Selector(format!("selector failed: {}", status))),
    }
}
