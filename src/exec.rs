use std::os::unix::process::ExitStatusExt;
use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::error::{Error, Result};

/// Runs `command` through `shell -c`, wired to this process's terminal, and
/// returns the status historik should exit with.
pub fn run_in_shell(shell: &str, command: &str) -> Result<i32> {
    debug!(shell, command, "executing selection");

    let status = Command::new(shell)
        .arg("-c")
        .arg(command)
        .status()
        .map_err(|source| Error::Execution {
            program: shell.to_string(),
            source,
        })?;

    debug!(?status, "command finished");
    Ok(exit_code(status))
}

/// Exit code to mirror: the command's own code, `128 + signal` when it was
/// killed, 1 when neither is known.
pub fn exit_code(status: ExitStatus) -> i32 {
    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}
