// External editor and desktop notification launchers

use eyre::{Context, Result, eyre};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Build the command that opens `path` in `editor`
///
/// `editor` may carry its own arguments, e.g. `code -w`.
pub fn editor_command(editor: &str, path: &Path) -> Result<Command> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or_else(|| eyre!("Editor command is empty"))?;

    let mut cmd = Command::new(program);
    cmd.args(parts).arg(path);
    Ok(cmd)
}

/// Build a `notify-send` invocation
pub fn notify_command(summary: &str, body: &str) -> Command {
    let mut cmd = Command::new("notify-send");
    cmd.arg(summary).arg(body);
    cmd
}

/// Run `cmd` to completion, failing on a non-zero exit status
pub fn run(mut cmd: Command) -> Result<()> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    debug!(program = %program, "Launching");

    let status = cmd.status().with_context(|| format!("Failed to launch {}", program))?;
    if !status.success() {
        return Err(eyre!("{} exited with {}", program, status));
    }
    Ok(())
}
