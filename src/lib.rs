//! claude-coder - spawn Claude Code in iTerm2
//!
//! Opens a new iTerm2 window on macOS, changes into a working directory, and
//! starts the Claude Code CLI on a task. Sessions are launched from the
//! command line or by an MCP client such as Claude Desktop, which can also
//! list the iTerm2 windows that are open.
//!
//! ## Layers
//!
//! 1. [`terminal`]: command-line and AppleScript construction with two
//!    independent escaping passes, plus parsing of the window listing
//! 2. [`spawn`]: ties those builders to a [`terminal::ScriptRunner`]
//! 3. [`mcp`] and the `claude-coder` binary: the two front ends
//!
//! A spawned session runs detached. Once iTerm2 accepts the script nothing
//! here tracks or controls it.

pub mod check;
pub mod config;
pub mod mcp;
pub mod spawn;
pub mod terminal;

pub use config::Config;
pub use spawn::{list_iterm_windows, spawn_claude_coder, SpawnDefaults, SpawnRequest, SpawnResult};
pub use terminal::{TerminalSession, TerminalWindow};
