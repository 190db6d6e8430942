//! CLI command implementations

pub mod check;
pub mod init;
pub mod list;
pub mod serve;
pub mod spawn;

use anyhow::Result;
use std::path::Path;

use claude_coder::terminal::OsascriptRunner;
use claude_coder::Config;

/// Load the config and build an `osascript` runner from it.
fn load(config_path: Option<&Path>) -> Result<(Config, OsascriptRunner)> {
    let config = Config::load(config_path)?;
    let runner = OsascriptRunner::new().with_timeout(config.runner_timeout());
    Ok((config, runner))
}
