//! Settings configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::spawn::DEFAULT_WINDOW_TITLE;

/// Defaults applied to spawn requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnSettings {
    /// Title for new iTerm2 windows
    #[serde(default = "default_window_title")]
    pub window_title: String,

    /// Starting directory for Claude; unset or empty means the home directory
    #[serde(default)]
    pub working_directory: Option<PathBuf>,
}

/// MCP server settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Spawn every Claude with `--dangerously-skip-permissions`
    #[serde(default)]
    pub dangerously_skip_permissions: bool,
}

/// AppleScript runner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerSettings {
    /// Seconds to wait for `osascript`; 0 disables the limit
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_window_title() -> String {
    DEFAULT_WINDOW_TITLE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            working_directory: None,
        }
    }
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}
