//! MCP server command implementation

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use claude_coder::mcp::{McpServer, ServerOptions};
use claude_coder::spawn::mode_label;

/// Run the MCP server on stdio until the client disconnects.
///
/// Autonomous mode is on if either the flag or the config asks for it.
pub async fn serve_command(config_path: Option<&Path>, dangerously_skip_permissions: bool) -> Result<()> {
    let (config, runner) = super::load(config_path)?;

    let options = ServerOptions {
        skip_permissions: dangerously_skip_permissions || config.server.dangerously_skip_permissions,
        defaults: config.spawn_defaults(dirs::home_dir()),
    };

    info!(
        "claude-coder MCP server v{} running on stdio ({})",
        env!("CARGO_PKG_VERSION"),
        mode_label(options.skip_permissions)
    );

    let server = McpServer::new(options, Arc::new(runner));
    server.run_stdio().await?;

    Ok(())
}
