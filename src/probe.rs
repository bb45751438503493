//! Subprocess access to the target CLI.
//!
//! Every introspection read is a blocking call to the external binary:
//! `<cli> --tldr` for the global index and `<cli> a b --tldr` for a
//! command declared as `a.b`. Calls are independent reads with no shared
//! state; results are recombined by command name, never by call order.
//!
//! Each call is bounded by a timeout. A timed-out or non-zero-exiting call
//! is an error for that call only; the fan-out loop in [`crate::tldr`]
//! decides whether that aborts the run (global call) or just marks one
//! command unreachable (per-command call).

use anyhow::{bail, Context};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Handle to a resolved target CLI binary.
#[derive(Debug, Clone)]
pub struct CliProbe {
    program: PathBuf,
    timeout: Duration,
}

impl CliProbe {
    /// Resolve `name` to an executable via PATH lookup (absolute and
    /// relative paths are accepted as-is when they point at an
    /// executable).
    ///
    /// # Errors
    ///
    /// Fails when no executable can be found; this is the setup error that
    /// terminates a run before any parsing is attempted.
    pub fn resolve(name: &str) -> anyhow::Result<Self> {
        let program =
            which::which(name).with_context(|| format!("'{name}' command not found"))?;
        debug!(program = %program.display(), "resolved target CLI");
        Ok(CliProbe {
            program,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Replace the per-call timeout (default 10s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Fetch the global TLDR index: `<cli> --tldr`.
    pub fn global_tldr(&self) -> anyhow::Result<String> {
        self.run(&[])
    }

    /// Fetch one command's TLDR: dot segments become argv words, so
    /// `node.read` is invoked as `<cli> node read --tldr`.
    pub fn command_tldr(&self, command: &str) -> anyhow::Result<String> {
        let segments: Vec<&str> = command.split('.').filter(|s| !s.is_empty()).collect();
        self.run(&segments)
    }

    fn run(&self, leading: &[&str]) -> anyhow::Result<String> {
        let mut child = Command::new(&self.program)
            .args(leading)
            .arg("--tldr")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to launch {}", self.program.display()))?;

        // Drain both pipes off-thread so a chatty child cannot deadlock on
        // a full pipe while we wait for it to exit.
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let stdout_reader = thread::spawn(move || read_pipe(stdout_pipe));
        let stderr_reader = thread::spawn(move || read_pipe(stderr_pipe));

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait().context("failed to wait on target CLI")? {
                break status;
            }
            if Instant::now() >= deadline {
                child.kill().ok();
                child.wait().ok();
                bail!(
                    "{} {} --tldr timed out after {:?}",
                    self.program.display(),
                    leading.join(" "),
                    self.timeout
                );
            }
            thread::sleep(WAIT_POLL_INTERVAL);
        };

        let stdout = stdout_reader.join().unwrap_or_default();
        let stderr = stderr_reader.join().unwrap_or_default();
        debug!(args = ?leading, status = %status, bytes = stdout.len(), "target CLI call finished");

        if !status.success() {
            bail!(
                "{} {} --tldr exited with {}: {}",
                self.program.display(),
                leading.join(" "),
                status,
                stderr.trim()
            );
        }
        Ok(stdout.trim().to_string())
    }
}

fn read_pipe(pipe: Option<impl Read>) -> String {
    let mut buf = String::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_string(&mut buf).ok();
    }
    buf
}
