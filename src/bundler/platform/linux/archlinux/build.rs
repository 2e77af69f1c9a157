//! makepkg execution.
//!
//! Runs the package build tool inside the generated package directory and
//! turns a nonzero exit into an error carrying the captured output.
//!
//! On Unix the tool leads its own process group. makepkg forks subshells,
//! fakeroot and compressors; the whole group is killed once the tool exits or
//! the timeout elapses, so nothing outlives the scratch directory or keeps the
//! output pipes open.

use crate::bundler::error::{Error, Result};
use std::{io, path::Path, process::Stdio, time::Duration};
use tokio::{io::AsyncReadExt, task::JoinHandle};

/// Run the build tool in `pkg_dir` and wait for it to exit.
///
/// # Arguments
/// - `tool` - Command name or path of the tool
/// - `args` - Arguments, passed without a shell
/// - `pkg_dir` - Working directory containing the PKGBUILD
/// - `extension` - Package extension, exported as `PKGEXT`
/// - `timeout` - Optional upper bound; the process tree is killed when it elapses
pub async fn run_makepkg(
    tool: &Path,
    args: &[String],
    pkg_dir: &Path,
    extension: &str,
    timeout: Option<Duration>,
) -> Result<()> {
    let command = tool.display().to_string();
    log::info!("Running {} {}", command, args.join(" "));

    let mut cmd = tokio::process::Command::new(tool);
    cmd.args(args)
        .current_dir(pkg_dir)
        .env("PKGEXT", format!(".{extension}"))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    #[cfg(unix)]
    cmd.process_group(0);

    let mut child = cmd.spawn().map_err(|error| Error::CommandFailed {
        command: command.clone(),
        error,
    })?;
    let group = child.id();

    // Pipes are drained on their own tasks so a full pipe never stalls the tool.
    let stdout_task = drain(child.stdout.take());
    let stderr_task = drain(child.stderr.take());

    let waited = match timeout {
        Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
            Ok(waited) => waited,
            Err(_) => {
                kill_process_group(group);
                if let Err(e) = child.kill().await {
                    log::warn!("Failed to reap {} after timeout: {}", command, e);
                }
                return Err(Error::BuildToolTimedOut {
                    command,
                    timeout: limit,
                });
            }
        },
        None => child.wait().await,
    };
    kill_process_group(group);

    let status = waited.map_err(|error| Error::CommandFailed {
        command: command.clone(),
        error,
    })?;
    let stdout = collect(&command, stdout_task).await?;
    let stderr = collect(&command, stderr_task).await?;
    log::debug!("{} stdout:\n{}", command, stdout);
    log::debug!("{} stderr:\n{}", command, stderr);

    if !status.success() {
        return Err(Error::BuildToolFailed {
            command,
            status: status.code(),
            stdout,
            stderr,
        });
    }

    Ok(())
}

fn drain<R>(pipe: Option<R>) -> JoinHandle<io::Result<Vec<u8>>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf).await?;
        }
        Ok(buf)
    })
}

async fn collect(command: &str, task: JoinHandle<io::Result<Vec<u8>>>) -> Result<String> {
    let bytes = task
        .await
        .map_err(io::Error::other)
        .and_then(|read| read)
        .map_err(|error| Error::CommandFailed {
            command: command.to_string(),
            error,
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Sends SIGKILL to the tool's process group. A group with no members left is fine.
#[cfg(unix)]
fn kill_process_group(group: Option<u32>) {
    use nix::{
        errno::Errno,
        sys::signal::{Signal, killpg},
        unistd::Pid,
    };

    let Some(pgid) = group.and_then(|id| i32::try_from(id).ok()) else {
        return;
    };
    match killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
        Ok(()) => log::debug!("Killed remaining processes in group {}", pgid),
        Err(Errno::ESRCH) => {}
        Err(e) => log::warn!("Failed to kill process group {}: {}", pgid, e),
    }
}

#[cfg(not(unix))]
fn kill_process_group(_group: Option<u32>) {}
