//! Spawning Claude Code sessions and listing iTerm2 windows.
//!
//! These functions connect the pure command/script builders in
//! [`crate::terminal`] to a [`ScriptRunner`]. Defaults that would otherwise
//! come from the environment (home directory, window title) are passed in as
//! [`SpawnDefaults`].

use serde::Serialize;
use std::path::PathBuf;

use crate::terminal::{
    build_full_command, build_spawn_script, parse_window_list, ScriptError, ScriptRunner,
    TerminalWindow, LIST_WINDOWS_SCRIPT,
};

/// Window title used when neither the request nor the config names one.
pub const DEFAULT_WINDOW_TITLE: &str = "Claude Coder";

/// A request to open a new iTerm2 window running Claude on a task.
#[derive(Debug, Clone, Default)]
pub struct SpawnRequest {
    /// Task handed to Claude as its initial prompt
    pub prompt: String,
    pub working_directory: Option<PathBuf>,
    pub window_title: Option<String>,
    /// Pass `--dangerously-skip-permissions` to the spawned Claude
    pub skip_permissions: bool,
}

impl SpawnRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = Some(title.into());
        self
    }

    pub fn skip_permissions(mut self, skip: bool) -> Self {
        self.skip_permissions = skip;
        self
    }
}

/// Values used for fields a [`SpawnRequest`] leaves empty.
///
/// Built by the caller, usually through
/// [`Config::spawn_defaults`](crate::Config::spawn_defaults).
#[derive(Debug, Clone)]
pub struct SpawnDefaults {
    pub working_directory: PathBuf,
    pub window_title: String,
}

/// Outcome of a spawn attempt.
///
/// `success` only means iTerm2 accepted the script. What Claude does in the
/// new window afterwards is not tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpawnResult {
    pub success: bool,
    pub window_title: String,
    pub working_directory: String,
    pub prompt: String,
    pub skip_permissions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SpawnResult {
    /// Human-readable description of the permission mode.
    pub fn mode_label(&self) -> &'static str {
        mode_label(self.skip_permissions)
    }
}

/// Describe a permission mode the way the CLI and server report it.
pub fn mode_label(skip_permissions: bool) -> &'static str {
    if skip_permissions {
        "with --dangerously-skip-permissions"
    } else {
        "in normal mode"
    }
}

/// Open a new iTerm2 window and start Claude in it.
///
/// Never returns an error: a runner failure, or a working directory that is
/// not valid UTF-8, is reported through [`SpawnResult::error`] with
/// `success == false`.
pub async fn spawn_claude_coder(
    runner: &dyn ScriptRunner,
    request: &SpawnRequest,
    defaults: &SpawnDefaults,
) -> SpawnResult {
    let window_title = request
        .window_title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(defaults.window_title.as_str())
        .to_string();
    let working_dir = request
        .working_directory
        .as_ref()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or(&defaults.working_directory);

    let mut result = SpawnResult {
        success: false,
        window_title,
        working_directory: working_dir.display().to_string(),
        prompt: request.prompt.clone(),
        skip_permissions: request.skip_permissions,
        error: None,
    };

    // `display()` would replace invalid bytes and `cd` somewhere else.
    let Some(dir) = working_dir.to_str() else {
        let message = format!("Working directory is not valid UTF-8: {}", result.working_directory);
        tracing::warn!("Failed to spawn Claude: {}", message);
        result.error = Some(message);
        return result;
    };

    let command = build_full_command(&request.prompt, dir, request.skip_permissions);
    let script = build_spawn_script(&command, &result.window_title);

    tracing::info!(
        "Spawning Claude in iTerm2 window '{}' at {} ({})",
        result.window_title,
        dir,
        mode_label(request.skip_permissions)
    );

    match runner.run(&script).await {
        Ok(_) => result.success = true,
        Err(e) => {
            tracing::warn!("Failed to spawn Claude: {}", e);
            result.error = Some(e.to_string());
        }
    }

    result
}

/// List all iTerm2 windows and their sessions.
pub async fn list_iterm_windows(runner: &dyn ScriptRunner) -> Result<Vec<TerminalWindow>, ScriptError> {
    let output = runner.run(LIST_WINDOWS_SCRIPT).await?;
    let windows = parse_window_list(&output);
    tracing::debug!("Found {} iTerm2 window(s)", windows.len());
    Ok(windows)
}
