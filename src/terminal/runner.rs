//! Execution of AppleScript against the running system.

use async_trait::async_trait;
use std::process::ExitStatus;
use std::time::Duration;
use tokio::process::Command;

/// Error raised when a script could not be executed.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Failed to run osascript: {0}")]
    Io(#[from] std::io::Error),

    #[error("osascript exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("osascript did not finish within {0:?}")]
    Timeout(Duration),
}

/// Something that can execute an AppleScript and return its stdout.
///
/// [`OsascriptRunner`] is the real implementation; tests substitute a fake
/// that records the scripts it was handed.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Run `script` to completion and return what it printed.
    async fn run(&self, script: &str) -> Result<String, ScriptError>;
}

/// Runs scripts with `osascript -e`.
///
/// The script is passed as a single argument, not through a shell, so it
/// needs no escaping beyond its own string literals.
#[derive(Debug, Clone)]
pub struct OsascriptRunner {
    program: String,
    timeout: Option<Duration>,
}

impl OsascriptRunner {
    pub fn new() -> Self {
        Self {
            program: "osascript".to_string(),
            timeout: None,
        }
    }

    /// Give up on scripts that run longer than `timeout`.
    ///
    /// The script is not cancelled inside the terminal host; only the wait is
    /// abandoned.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a different interpreter binary.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for OsascriptRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScriptRunner for OsascriptRunner {
    async fn run(&self, script: &str) -> Result<String, ScriptError> {
        tracing::debug!("Running AppleScript ({} bytes) via {}", script.len(), self.program);

        let mut command = Command::new(&self.program);
        command.arg("-e").arg(script).kill_on_drop(true);
        let output = command.output();

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, output)
                .await
                .map_err(|_| ScriptError::Timeout(limit))??,
            None => output.await?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ScriptError::Failed {
                status: output.status,
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
