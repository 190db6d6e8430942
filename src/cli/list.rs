//! List command implementation

use anyhow::{Context, Result};
use std::path::Path;

use claude_coder::spawn::list_iterm_windows;
use claude_coder::terminal::format_window_list;

/// Print the open iTerm2 windows and their sessions.
pub async fn list_command(config_path: Option<&Path>, json: bool) -> Result<()> {
    let (_, runner) = super::load(config_path)?;

    let windows = list_iterm_windows(&runner)
        .await
        .context("Failed to list iTerm2 windows")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&windows)?);
    } else {
        println!("{}", format_window_list(&windows));
    }

    Ok(())
}
