//! External process invocation
//!
//! Every toolchain call goes through a [`CommandRunner`] so the orchestrator
//! can be driven by a fake in tests. Invocations run synchronously, one at a
//! time; a non-zero exit becomes [`BuildError::ToolFailed`] via
//! [`Invocation::check`].

use crate::error::{BuildError, BuildResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Runs an executable and captures its output
pub trait CommandRunner {
    fn run(&self, program: &Path, args: &[&str], cwd: &Path) -> BuildResult<Invocation>;
}

/// Record of one finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl Invocation {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Short tool name (`cargo`, `rustup`, ...)
    pub fn tool(&self) -> String {
        self.program
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Command line as it would be typed
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Get combined output
    pub fn output(&self) -> String {
        let mut output = String::new();
        if !self.stdout.is_empty() {
            output.push_str("STDOUT:\n");
            output.push_str(&self.stdout);
            output.push('\n');
        }
        if !self.stderr.is_empty() {
            output.push_str("STDERR:\n");
            output.push_str(&self.stderr);
        }
        output
    }

    /// Turn a non-zero exit into an error
    pub fn check(self) -> BuildResult<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(BuildError::tool_failed(self.tool(), self.exit_code, self.output()))
        }
    }
}

/// Runs real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[&str], cwd: &Path) -> BuildResult<Invocation> {
        let tool = program
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::info!(command = %format!("{} {}", program.display(), args.join(" ")), cwd = %cwd.display(), "running {tool}");

        let start = Instant::now();
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .and_then(|child| child.wait_with_output())
            .map_err(|error| BuildError::ToolLaunch {
                tool: tool.clone(),
                error,
            })?;

        let invocation = Invocation {
            program: program.to_path_buf(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: cwd.to_path_buf(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration: start.elapsed(),
        };

        if !invocation.stdout.is_empty() {
            tracing::debug!(tool = %tool, "{}", invocation.stdout.trim_end());
        }
        if !invocation.stderr.is_empty() {
            if invocation.success() {
                tracing::debug!(tool = %tool, "{}", invocation.stderr.trim_end());
            } else {
                tracing::warn!(tool = %tool, "{}", invocation.stderr.trim_end());
            }
        }

        Ok(invocation)
    }
}
