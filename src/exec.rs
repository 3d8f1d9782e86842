/// Subprocess runner: explicit working directory, optional timeout.
///
/// Every external tool (git, go, capslock) goes through [`ToolCommand`].
/// The working directory is always passed explicitly to the child; the
/// process-wide current directory is never mutated, so two acquisitions
/// cannot race on it.
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

/// Poll interval while waiting on a child with a deadline.
const WAIT_POLL: Duration = Duration::from_millis(25);

/// Errors from running an external tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The child process could not be spawned.
    #[error("running `{command}`: {source}")]
    Spawn {
        /// The rendered command line.
        command: String,
        /// The underlying spawn failure.
        source: std::io::Error,
    },

    /// The child exited with a non-zero status.
    #[error("`{command}` exited with {status}")]
    Failed {
        /// The rendered command line.
        command: String,
        /// The child's exit status.
        status: ExitStatus,
    },

    /// The child did not finish before the configured deadline and was killed.
    #[error("`{command}` did not finish within {}s and was killed", .timeout.as_secs())]
    Timeout {
        /// The rendered command line.
        command: String,
        /// The configured timeout.
        timeout: Duration,
    },

    /// The child's output could not be collected.
    #[error("collecting output of `{command}`: {source}")]
    Output {
        /// The rendered command line.
        command: String,
        /// The underlying I/O failure.
        source: std::io::Error,
    },
}

/// Builder for one external tool invocation.
#[derive(Debug)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl ToolCommand {
    /// Start building an invocation of `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            timeout: None,
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the child in `dir` instead of the caller's current directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Kill the child if it runs longer than `timeout`. `None` waits forever.
    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The command line as shown in logs and error messages.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Run the child with stdout captured and stderr inherited.
    /// Returns the captured stdout bytes.
    ///
    /// # Errors
    ///
    /// Returns `ToolError` if the child cannot be spawned, times out, exits
    /// non-zero, or its output cannot be collected.
    pub fn output(&self) -> Result<Vec<u8>, ToolError> {
        let mut child = self.spawn(Stdio::piped())?;
        let command = self.command_line();

        // Drain stdout on a separate thread so a full pipe can never block
        // the child while we poll for exit.
        let reader = child.stdout.take().map(|mut stdout| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                stdout.read_to_end(&mut buf).map(|_| buf)
            })
        });

        let status = self.wait(&mut child, &command)?;

        let stdout = match reader {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdout reader panicked")))
                .map_err(|source| ToolError::Output {
                    command: command.clone(),
                    source,
                })?,
            None => Vec::new(),
        };

        if status.success() {
            Ok(stdout)
        } else {
            Err(ToolError::Failed { command, status })
        }
    }

    /// Run the child with stdio inherited, requiring a zero exit status.
    ///
    /// # Errors
    ///
    /// Returns `ToolError` if the child cannot be spawned, times out, or
    /// exits non-zero.
    pub fn run(&self) -> Result<(), ToolError> {
        let status = self.passthrough()?;
        if status.success() {
            Ok(())
        } else {
            Err(ToolError::Failed {
                command: self.command_line(),
                status,
            })
        }
    }

    /// Run the child with stdio inherited and return its exit status without
    /// interpreting it. Used for the analyzer's comparison mode, whose
    /// non-zero exit codes are meaningful rather than fatal.
    ///
    /// # Errors
    ///
    /// Returns `ToolError` only if the child cannot be spawned or times out.
    pub fn passthrough(&self) -> Result<ExitStatus, ToolError> {
        let mut child = self.spawn(Stdio::inherit())?;
        let command = self.command_line();
        self.wait(&mut child, &command)
    }

    fn spawn(&self, stdout: Stdio) -> Result<Child, ToolError> {
        debug!(
            command = %self.command_line(),
            cwd = ?self.cwd,
            "running external tool"
        );
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).stdout(stdout).stderr(Stdio::inherit());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd.spawn().map_err(|source| ToolError::Spawn {
            command: self.command_line(),
            source,
        })
    }

    fn wait(&self, child: &mut Child, command: &str) -> Result<ExitStatus, ToolError> {
        let io_err = |source| ToolError::Output {
            command: command.to_owned(),
            source,
        };
        let Some(timeout) = self.timeout else {
            return child.wait().map_err(io_err);
        };
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait().map_err(io_err)? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ToolError::Timeout {
                    command: command.to_owned(),
                    timeout,
                });
            }
            std::thread::sleep(WAIT_POLL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_captures_stdout() {
        let out = ToolCommand::new("echo").arg("hello").output().unwrap();
        assert_eq!(String::from_utf8_lossy(&out).trim_end(), "hello");
    }

    #[test]
    fn test_nonzero_exit_is_failed() {
        let err = ToolCommand::new("false").output().unwrap_err();
        assert!(matches!(err, ToolError::Failed { .. }));
    }

    #[test]
    fn test_missing_program_is_spawn() {
        let err = ToolCommand::new("capdiff-no-such-tool").run().unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }

    #[test]
    fn test_timeout_kills_child() {
        let err = ToolCommand::new("sleep")
            .arg("5")
            .timeout(Some(Duration::from_millis(100)))
            .run()
            .unwrap_err();
        assert!(matches!(err, ToolError::Timeout { .. }));
    }

    #[test]
    fn test_explicit_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = ToolCommand::new("pwd")
            .current_dir(dir.path())
            .output()
            .unwrap();
        let reported = String::from_utf8_lossy(&out);
        let reported = Path::new(reported.trim_end());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_command_line_rendering() {
        let cmd = ToolCommand::new("git").args(["rev-parse", "--git-dir"]);
        assert_eq!(cmd.command_line(), "git rev-parse --git-dir");
    }
}
