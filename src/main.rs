use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "claude-coder")]
#[command(about = "Spawn Claude Code instances in iTerm2, from the shell or via MCP")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.claude-coder/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server on stdio (for Claude Desktop)
    #[command(alias = "serve")]
    Mcp {
        /// Pass --dangerously-skip-permissions to spawned Claude instances
        #[arg(long)]
        dangerously_skip_permissions: bool,
    },

    /// Spawn a Claude Code instance in a new iTerm2 window
    Spawn {
        /// The prompt/task to give to Claude Code
        prompt: String,

        /// Working directory (defaults to the configured directory or $HOME)
        #[arg(short, long)]
        directory: Option<PathBuf>,

        /// Window title
        #[arg(short, long)]
        title: Option<String>,

        /// Pass --dangerously-skip-permissions to the Claude instance
        #[arg(long)]
        dangerously_skip_permissions: bool,
    },

    /// List iTerm2 windows and sessions
    #[command(alias = "ls")]
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check that macOS, iTerm2, and the Claude CLI are ready
    Check,

    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is reserved for output and MCP frames
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Mcp {
            dangerously_skip_permissions,
        } => {
            cli::serve::serve_command(config_path, dangerously_skip_permissions).await?;
        }
        Commands::Spawn {
            prompt,
            directory,
            title,
            dangerously_skip_permissions,
        } => {
            let args = cli::spawn::SpawnArgs {
                prompt,
                directory,
                title,
                skip_permissions: dangerously_skip_permissions,
            };
            if !cli::spawn::spawn_command(config_path, args).await? {
                std::process::exit(1);
            }
        }
        Commands::List { json } => {
            cli::list::list_command(config_path, json).await?;
        }
        Commands::Check => {
            if !cli::check::check_command(config_path).await? {
                std::process::exit(1);
            }
        }
        Commands::Init { force } => {
            cli::init::init_command(config_path, force)?;
        }
    }

    Ok(())
}
