//! MCP (Model Context Protocol) server over stdio.
//!
//! Reads line-delimited JSON-RPC 2.0 from stdin and writes responses to
//! stdout. Logging goes to stderr so stdout carries protocol frames only.
//!
//! # Module layout
//!
//! - [`jsonrpc`] - wire types, response helpers, and line framing
//! - [`tools`] - tool descriptors and `tools/call` dispatch
//!
//! Requests are handled one at a time in arrival order.

pub mod jsonrpc;
pub mod tools;

use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite};

use crate::spawn::SpawnDefaults;
use crate::terminal::ScriptRunner;
use jsonrpc::{
    invalid_request, method_not_found, parse_error, send_response, success_response, IncomingMessage,
    Response,
};

/// MCP protocol version.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name reported during initialization.
pub const SERVER_NAME: &str = "claude-coder";

/// Settings fixed for the lifetime of a server.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Spawn every Claude with `--dangerously-skip-permissions`.
    /// Callers of the tool cannot change this.
    pub skip_permissions: bool,
    pub defaults: SpawnDefaults,
}

pub struct McpServer {
    options: ServerOptions,
    runner: Arc<dyn ScriptRunner>,
}

impl McpServer {
    pub fn new(options: ServerOptions, runner: Arc<dyn ScriptRunner>) -> Self {
        Self { options, runner }
    }

    /// Handle one line of input. Returns `None` when nothing should be sent
    /// back: blank lines, notifications, and messages without a method.
    ///
    /// Text that is not JSON gets a parse error; JSON that is not a JSON-RPC
    /// 2.0 message object gets an invalid-request error.
    pub async fn handle_line(&self, line: &str) -> Option<Response> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        tracing::debug!("<- {}", trimmed);

        let value: Value = match serde_json::from_str(trimmed) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Parse error: {}", e);
                return Some(parse_error());
            }
        };

        // Echo the id back when there is a usable one, even if the rest is malformed.
        let id_hint = value.get("id").cloned().unwrap_or(Value::Null);
        let msg: IncomingMessage = match serde_json::from_value(value) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("Invalid request: {}", e);
                return Some(invalid_request(id_hint, &e.to_string()));
            }
        };

        if msg.jsonrpc.as_deref() != Some("2.0") {
            tracing::warn!("Invalid request: jsonrpc version {:?}", msg.jsonrpc);
            return Some(invalid_request(
                msg.id.unwrap_or(Value::Null),
                "jsonrpc must be \"2.0\"",
            ));
        }

        let Some(method) = msg.method.as_deref() else {
            tracing::debug!("Ignoring message without method");
            return None;
        };

        let Some(id) = msg.id else {
            tracing::debug!("Notification: {}", method);
            return None;
        };

        let response = match method {
            "initialize" => success_response(id, handle_initialize()),
            "ping" => success_response(id, serde_json::json!({})),
            "tools/list" => success_response(id, tools::handle_tools_list(&self.options)),
            "tools/call" => {
                let result = tools::handle_tools_call(&self.options, self.runner.as_ref(), msg.params).await;
                success_response(id, result)
            }
            _ => method_not_found(id, method),
        };

        Some(response)
    }

    /// Serve requests from `reader` until it is closed.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(response) = self.handle_line(&line).await {
                send_response(&mut writer, &response).await?;
            }
        }
        tracing::info!("stdin closed, exiting");
        Ok(())
    }

    /// Serve on the process's stdin and stdout.
    pub async fn run_stdio(&self) -> std::io::Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.serve(stdin, tokio::io::stdout()).await
    }
}

/// Handle the `initialize` JSON-RPC request.
fn handle_initialize() -> Value {
    serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}
