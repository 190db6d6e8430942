//! iTerm2 integration on macOS.
//!
//! This module builds the text that drives iTerm2 and parses the text it
//! returns. Spawning a Claude session works by:
//! 1. Composing a shell command line (`cd <dir> && claude <prompt>`) with
//!    every untrusted field shell-escaped
//! 2. Embedding that command and a window title in an AppleScript that opens
//!    a new iTerm2 window and types the command into it
//! 3. Handing the script to a [`ScriptRunner`], normally `osascript`
//!
//! Listing windows runs [`LIST_WINDOWS_SCRIPT`] and parses its line output
//! with [`parse_window_list`].
//!
//! Everything except the [`ScriptRunner`] is pure string work and never fails.

mod command;
mod escape;
mod listing;
mod runner;
mod script;

pub use command::{build_claude_command, build_full_command, CLAUDE_BINARY, SKIP_PERMISSIONS_FLAG};
pub use escape::{applescript_escape, shell_escape};
pub use listing::{format_window_list, parse_window_list, TerminalSession, TerminalWindow};
pub use runner::{OsascriptRunner, ScriptError, ScriptRunner};
pub use script::{build_spawn_script, AUTOMATION_PROBE_SCRIPT, LIST_WINDOWS_SCRIPT};
