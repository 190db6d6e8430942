//! Spawn command implementation

use anyhow::Result;
use std::path::{Path, PathBuf};

use claude_coder::spawn::{mode_label, spawn_claude_coder, SpawnRequest};

/// Arguments of `claude-coder spawn`.
pub struct SpawnArgs {
    pub prompt: String,
    pub directory: Option<PathBuf>,
    pub title: Option<String>,
    pub skip_permissions: bool,
}

/// Spawn one Claude session. Returns `false` if iTerm2 rejected the script.
pub async fn spawn_command(config_path: Option<&Path>, args: SpawnArgs) -> Result<bool> {
    let (config, runner) = super::load(config_path)?;
    let defaults = config.spawn_defaults(dirs::home_dir());

    let request = SpawnRequest {
        prompt: args.prompt,
        working_directory: args.directory,
        window_title: args.title,
        skip_permissions: args.skip_permissions,
    };

    println!("Spawning Claude Code instance ({})...", mode_label(request.skip_permissions));

    let result = spawn_claude_coder(&runner, &request, &defaults).await;

    if result.success {
        println!("Success!");
        println!("  Window title: {}", result.window_title);
        println!("  Working directory: {}", result.working_directory);
        println!("  Mode: {}", result.mode_label());
        println!("  Prompt: {}", result.prompt);
    } else {
        eprintln!("Failed: {}", result.error.as_deref().unwrap_or("unknown error"));
    }

    Ok(result.success)
}
