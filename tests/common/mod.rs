//! Shared test utilities: a fake script runner that records what it is given

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;

use claude_coder::terminal::{ScriptError, ScriptRunner};

/// Records every script and answers with a canned result.
pub struct RecordingRunner {
    scripts: Mutex<Vec<String>>,
    reply: Reply,
}

enum Reply {
    Output(String),
    Fail(String),
}

impl RecordingRunner {
    /// A runner whose scripts all succeed and print `output`.
    pub fn ok(output: &str) -> Self {
        Self {
            scripts: Mutex::new(Vec::new()),
            reply: Reply::Output(output.to_string()),
        }
    }

    /// A runner whose scripts all fail with an I/O error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            scripts: Mutex::new(Vec::new()),
            reply: Reply::Fail(message.to_string()),
        }
    }

    pub fn scripts(&self) -> Vec<String> {
        self.scripts.lock().unwrap().clone()
    }

    pub fn last_script(&self) -> String {
        self.scripts().pop().expect("no script was run")
    }
}

#[async_trait]
impl ScriptRunner for RecordingRunner {
    async fn run(&self, script: &str) -> Result<String, ScriptError> {
        self.scripts.lock().unwrap().push(script.to_string());
        match &self.reply {
            Reply::Output(out) => Ok(out.clone()),
            Reply::Fail(msg) => Err(ScriptError::Io(std::io::Error::other(msg.clone()))),
        }
    }
}
