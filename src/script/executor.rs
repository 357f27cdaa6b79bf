// Host shell execution
use crate::script::platform::Platform;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::process::{Command, ExitStatus, Stdio};

/// Runs a fully processed command line through the host shell.
///
/// stderr shares the pipe with stdout, and the merged stream is copied line by
/// line to `out` while the child is still running.
pub fn run_in_shell(
    command: &str,
    platform: &Platform,
    env_vars: &HashMap<String, String>,
    out: &mut dyn Write,
) -> Result<i32> {
    let (shell, flag) = platform.shell();

    let (reader, writer) = os_pipe::pipe().context("Failed to create output pipe")?;
    let writer_err = writer
        .try_clone()
        .context("Failed to clone output pipe")?;

    let mut cmd = Command::new(shell);
    cmd.arg(flag);
    push_command_arg(&mut cmd, command, platform);
    cmd.envs(env_vars)
        .stdin(Stdio::inherit())
        .stdout(writer)
        .stderr(writer_err);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("Failed to spawn shell process: {}", shell))?;

    // Our copies of the write ends must go, or the reader never sees EOF
    drop(cmd);

    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    loop {
        line.clear();
        let n = reader
            .read_until(b'\n', &mut line)
            .context("Failed to read command output")?;
        if n == 0 {
            break;
        }
        out.write_all(&line)?;
        out.flush()?;
    }

    let status = child.wait().context("Failed to wait for command")?;
    Ok(exit_code(status))
}

#[cfg(windows)]
fn push_command_arg(cmd: &mut Command, command: &str, platform: &Platform) {
    use std::os::windows::process::CommandExt;
    // cmd.exe does its own parsing, default quoting would break it
    if platform.is_windows() {
        cmd.raw_arg(command);
    } else {
        cmd.arg(command);
    }
}

#[cfg(not(windows))]
fn push_command_arg(cmd: &mut Command, command: &str, _platform: &Platform) {
    cmd.arg(command);
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|s| 128 + s))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
