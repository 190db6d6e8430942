//! Tool descriptors and dispatch for the MCP server.
//!
//! Two tools are exposed: `spawn_claude_coder` opens a new iTerm2 window
//! running Claude on a prompt, and `list_iterm_windows` reports the windows
//! and sessions that are currently open.

use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

use super::ServerOptions;
use crate::spawn::{list_iterm_windows, spawn_claude_coder, SpawnRequest};
use crate::terminal::{format_window_list, ScriptRunner};

pub const SPAWN_TOOL: &str = "spawn_claude_coder";
pub const LIST_TOOL: &str = "list_iterm_windows";

const AUTONOMOUS_MODE_TEXT: &str = "AUTONOMOUS MODE (--dangerously-skip-permissions): Claude will act without user approval. Be specific to prevent unintended actions.";
const INTERACTIVE_MODE_TEXT: &str = "INTERACTIVE MODE: User must approve each action in the spawned terminal.";

const PROMPT_GUIDANCE: &str = r#"PROMPT BEST PRACTICES:
- Be specific: "Run npm test, fix any failing tests" rather than "fix tests"
- Include context Claude can't see: "This is a Next.js app using Prisma and PostgreSQL"
- Set success criteria: "Done when all tests pass and npm run build succeeds"
- Mention key files: "The API routes are in src/app/api/"
- One focused task works better than several vague ones

EXAMPLE PROMPT:
"In this TypeScript Express project, add a GET /api/health endpoint that returns {status: 'ok', timestamp: Date.now()}. Follow the pattern in src/routes/users.ts. Run npm test when done."

ALWAYS specify workingDirectory so Claude starts in the correct project folder. If you do not know it, make the first instruction in the prompt to find the project and cd into it."#;

/// Arguments accepted by `spawn_claude_coder`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpawnArgs {
    prompt: String,
    #[serde(default)]
    working_directory: Option<String>,
    #[serde(default)]
    window_title: Option<String>,
}

// ---------------------------------------------------------------------------
// Tool descriptors
// ---------------------------------------------------------------------------

fn spawn_tool_description(skip_permissions: bool) -> String {
    let mode = if skip_permissions {
        AUTONOMOUS_MODE_TEXT
    } else {
        INTERACTIVE_MODE_TEXT
    };
    format!(
        "Spawn a new Claude Code instance in an iTerm2 window to work on a task.\n\n{mode}\n\n{PROMPT_GUIDANCE}"
    )
}

fn spawn_tool(skip_permissions: bool) -> Value {
    serde_json::json!({
        "name": SPAWN_TOOL,
        "title": "Spawn Claude Coder",
        "description": spawn_tool_description(skip_permissions),
        "inputSchema": {
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "The prompt/task to give to the new Claude Code instance"
                },
                "workingDirectory": {
                    "type": "string",
                    "description": "The working directory for the Claude Code instance (defaults to home directory)"
                },
                "windowTitle": {
                    "type": "string",
                    "description": "Custom title for the iTerm2 window (defaults to 'Claude Coder')"
                }
            },
            "required": ["prompt"]
        },
        "annotations": {
            "title": "Spawn Claude Coder",
            "readOnlyHint": false,
            "destructiveHint": skip_permissions,
            "idempotentHint": false,
            "openWorldHint": true
        }
    })
}

fn list_tool() -> Value {
    serde_json::json!({
        "name": LIST_TOOL,
        "title": "List iTerm2 Windows",
        "description": "List all iTerm2 windows and their sessions (useful to see running Claude instances)",
        "inputSchema": {
            "type": "object",
            "properties": {}
        },
        "annotations": {
            "title": "List iTerm2 Windows",
            "readOnlyHint": true,
            "destructiveHint": false,
            "idempotentHint": true,
            "openWorldHint": true
        }
    })
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Handle the `tools/list` request.
pub fn handle_tools_list(options: &ServerOptions) -> Value {
    serde_json::json!({
        "tools": [spawn_tool(options.skip_permissions), list_tool()]
    })
}

/// Handle the `tools/call` request.
///
/// Problems with the call itself (unknown tool, bad arguments) and failures
/// while running it are both reported as tool results with `isError` set.
pub async fn handle_tools_call(
    options: &ServerOptions,
    runner: &dyn ScriptRunner,
    params: Option<Value>,
) -> Value {
    let Some(params) = params else {
        return tool_error("Missing params for tools/call");
    };

    let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()));

    tracing::info!("Tool call: {}", name);

    match name {
        SPAWN_TOOL => handle_spawn(options, runner, arguments).await,
        LIST_TOOL => handle_list(runner).await,
        _ => tool_error(&format!("Unknown tool: {name}")),
    }
}

async fn handle_spawn(options: &ServerOptions, runner: &dyn ScriptRunner, arguments: Value) -> Value {
    let args: SpawnArgs = match serde_json::from_value(arguments) {
        Ok(args) => args,
        Err(e) => return tool_error(&format!("Invalid arguments for {SPAWN_TOOL}: {e}")),
    };

    let request = SpawnRequest {
        prompt: args.prompt,
        working_directory: args.working_directory.map(PathBuf::from),
        window_title: args.window_title,
        skip_permissions: options.skip_permissions,
    };

    let result = spawn_claude_coder(runner, &request, &options.defaults).await;

    if result.success {
        tool_text(&format!(
            "Successfully spawned Claude Code in iTerm2 ({})!\n\n\
             Window title: {}\n\
             Working directory: {}\n\
             Prompt: {}\n\n\
             The Claude Code instance is now running interactively in iTerm2.",
            result.mode_label(),
            result.window_title,
            result.working_directory,
            result.prompt
        ))
    } else {
        tool_error(&format!(
            "Failed to spawn Claude Code: {}\n\n\
             Make sure iTerm2 is installed and you have granted automation permissions in \
             System Settings > Privacy & Security > Automation.",
            result.error.as_deref().unwrap_or("unknown error")
        ))
    }
}

async fn handle_list(runner: &dyn ScriptRunner) -> Value {
    match list_iterm_windows(runner).await {
        Ok(windows) => tool_text(&format_window_list(&windows)),
        Err(e) => tool_error(&format!("Failed to list iTerm windows: {e}")),
    }
}

// ---------------------------------------------------------------------------
// Result helpers
// ---------------------------------------------------------------------------

/// Build a successful text tool result.
pub fn tool_text(text: &str) -> Value {
    serde_json::json!({
        "content": [{
            "type": "text",
            "text": text
        }]
    })
}

/// Build a tool error result.
pub fn tool_error(message: &str) -> Value {
    serde_json::json!({
        "isError": true,
        "content": [{
            "type": "text",
            "text": message
        }]
    })
}
