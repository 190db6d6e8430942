//! Configuration loading and management

mod settings;

pub use settings::{RunnerSettings, ServerSettings, SpawnSettings};

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::spawn::SpawnDefaults;

/// Default configuration content for `claude-coder init`
pub const DEFAULT_CONFIG: &str = r#"# claude-coder configuration
# ===========================

# Defaults for newly spawned Claude sessions.
[spawn]
# Title given to new iTerm2 windows when the caller does not pick one
window_title = "Claude Coder"
# Directory Claude starts in when the caller does not pick one.
# Leave empty to use your home directory.
working_directory = ""

# MCP server (`claude-coder mcp`)
[server]
# Start every spawned Claude with --dangerously-skip-permissions.
# Claude will then act without asking for approval. The --dangerously-skip-permissions
# flag on the command line turns this on as well.
dangerously_skip_permissions = false

# AppleScript execution
[runner]
# Seconds to wait for osascript before giving up (0 waits forever)
timeout_secs = 30
"#;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub spawn: SpawnSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub runner: RunnerSettings,
}

impl Config {
    /// Get the global config directory path (~/.claude-coder/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".claude-coder")
    }

    /// Get the global config file path (~/.claude-coder/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load the config at `path`, or the global config when `path` is `None`.
    ///
    /// A missing global config yields the defaults. An explicitly requested
    /// path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let global = Self::global_config_path();
        if global.exists() {
            tracing::debug!("Loading config from {}", global.display());
            Self::from_file(&global)
        } else {
            Ok(Self::default())
        }
    }

    /// Write [`DEFAULT_CONFIG`] to `path`, refusing to overwrite unless `force`.
    pub fn write_default(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            anyhow::bail!(
                "Configuration already exists: {}\nUse --force to overwrite.",
                path.display()
            );
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
        }

        std::fs::write(path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Resolve spawn defaults, falling back to `home` for an unset directory.
    pub fn spawn_defaults(&self, home: Option<PathBuf>) -> SpawnDefaults {
        let working_directory = match &self.spawn.working_directory {
            Some(dir) if !dir.as_os_str().is_empty() => dir.clone(),
            _ => home.unwrap_or_else(|| PathBuf::from("/")),
        };
        SpawnDefaults {
            working_directory,
            window_title: self.spawn.window_title.clone(),
        }
    }

    /// How long to wait for `osascript`, `None` for no limit.
    pub fn runner_timeout(&self) -> Option<Duration> {
        match self.runner.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
