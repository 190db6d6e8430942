//! Environment checks for `claude-coder check`.
//!
//! Verifies that the machine can actually spawn sessions: macOS, the
//! `osascript` interpreter, iTerm2, the Claude CLI, and permission to
//! automate iTerm2.

use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

use crate::terminal::{ScriptRunner, AUTOMATION_PROBE_SCRIPT, CLAUDE_BINARY};

const ITERM_APP_PATH: &str = "/Applications/iTerm.app";

/// Upper bound for `which` and `claude --version`.
const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    /// Could not be verified, but is not known to be broken
    Warn,
    Fail,
}

impl CheckStatus {
    fn icon(self) -> &'static str {
        match self {
            CheckStatus::Pass => "[OK]",
            CheckStatus::Warn => "[!!]",
            CheckStatus::Fail => "[X]",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Warn => "warn",
            CheckStatus::Fail => "fail",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentReport {
    /// True when no check failed; warnings still count as passing
    pub all_passed: bool,
    pub checks: Vec<CheckResult>,
}

impl EnvironmentReport {
    pub fn from_checks(checks: Vec<CheckResult>) -> Self {
        let all_passed = checks.iter().all(|c| c.status != CheckStatus::Fail);
        Self { all_passed, checks }
    }
}

/// Check that we are running on macOS.
pub fn check_macos() -> CheckResult {
    check_platform(std::env::consts::OS)
}

fn check_platform(os: &str) -> CheckResult {
    if os == "macos" {
        CheckResult::new("macOS", CheckStatus::Pass, "Running on macOS")
    } else {
        CheckResult::new(
            "macOS",
            CheckStatus::Fail,
            format!("This tool requires macOS. Current platform: {}", os),
        )
    }
}

/// Check that the `osascript` interpreter is on `PATH`.
pub async fn check_osascript() -> CheckResult {
    match which("osascript").await {
        Some(path) => CheckResult::new("osascript", CheckStatus::Pass, format!("osascript found at {}", path)),
        None => CheckResult::new(
            "osascript",
            CheckStatus::Fail,
            "osascript was not found on PATH. It ships with macOS at /usr/bin/osascript.",
        ),
    }
}

/// Check that iTerm2 is installed in `/Applications`.
pub fn check_iterm2() -> CheckResult {
    check_iterm2_at(Path::new(ITERM_APP_PATH))
}

fn check_iterm2_at(app: &Path) -> CheckResult {
    if app.is_dir() {
        CheckResult::new(
            "iTerm2",
            CheckStatus::Pass,
            format!("iTerm2 is installed at {}", app.display()),
        )
    } else {
        CheckResult::new(
            "iTerm2",
            CheckStatus::Fail,
            "iTerm2 is not installed. Download from https://iterm2.com/ or install via: brew install --cask iterm2",
        )
    }
}

/// Check that the Claude Code CLI is on `PATH`, reporting its version if it has one.
pub async fn check_claude_cli() -> CheckResult {
    const NAME: &str = "Claude Code CLI";

    let Some(path) = which(CLAUDE_BINARY).await else {
        return CheckResult::new(
            NAME,
            CheckStatus::Fail,
            "Claude Code CLI is not installed. Install from https://claude.ai/code",
        );
    };

    let version = output_within(Command::new(CLAUDE_BINARY).arg("--version"), CHECK_TIMEOUT)
        .await
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|v| !v.is_empty());

    let message = match version {
        Some(version) => format!("Claude Code CLI found at {} ({})", path, version),
        None => format!("Claude Code CLI found at {}", path),
    };
    CheckResult::new(NAME, CheckStatus::Pass, message)
}

/// Check that this process may send Apple Events to iTerm2.
pub async fn check_automation_permissions(runner: &dyn ScriptRunner) -> CheckResult {
    match runner.run(AUTOMATION_PROBE_SCRIPT).await {
        Ok(_) => CheckResult::new(
            "Automation Permissions",
            CheckStatus::Pass,
            "Automation permissions for iTerm2 are granted",
        ),
        Err(e) => classify_automation_error(&e.to_string()),
    }
}

/// Map an automation probe failure to a check result.
///
/// Error -1743 is macOS refusing the Apple Event. Error -600 means iTerm2 is
/// not running, in which case permission is asked for on first use.
pub fn classify_automation_error(message: &str) -> CheckResult {
    const NAME: &str = "Automation Permissions";

    if message.contains("not allowed") || message.contains("1743") {
        CheckResult::new(
            NAME,
            CheckStatus::Fail,
            "Automation permissions not granted. Go to System Settings > Privacy & Security > Automation and enable iTerm2 for your terminal/app.",
        )
    } else if message.contains("not running") || message.contains("(-600)") {
        CheckResult::new(
            NAME,
            CheckStatus::Warn,
            "Could not verify automation permissions (iTerm2 is not running). Permissions will be requested on first use.",
        )
    } else {
        CheckResult::new(
            NAME,
            CheckStatus::Warn,
            format!("Could not verify automation permissions: {}", message),
        )
    }
}

/// Run every check in order.
pub async fn run_all_checks(runner: &dyn ScriptRunner) -> EnvironmentReport {
    let checks = vec![
        check_macos(),
        check_osascript().await,
        check_iterm2(),
        check_claude_cli().await,
        check_automation_permissions(runner).await,
    ];

    for check in &checks {
        tracing::debug!("check {}: {} - {}", check.name, check.status, check.message);
    }

    EnvironmentReport::from_checks(checks)
}

/// Render a report as a block of text for the terminal.
pub fn format_check_results(report: &EnvironmentReport) -> String {
    let rule = "=".repeat(50);
    let mut lines = vec!["Environment Check Results".to_string(), rule.clone(), String::new()];

    for check in &report.checks {
        lines.push(format!("{} {}", check.status.icon(), check.name));
        lines.push(format!("    {}", check.message));
        lines.push(String::new());
    }

    lines.push(rule);
    if report.all_passed {
        lines.push("All checks passed! Environment is ready.".to_string());
    } else {
        lines.push("Some checks failed. Please fix the issues above.".to_string());
    }

    lines.join("\n")
}

/// Run `command` and collect its output, or `None` if it could not be
/// started or did not finish within `limit`. The child is killed on timeout.
async fn output_within(command: &mut Command, limit: Duration) -> Option<Output> {
    command.kill_on_drop(true);
    let finished = tokio::time::timeout(limit, command.output()).await;
    match finished {
        Ok(result) => result.ok(),
        Err(_) => {
            tracing::warn!("{:?} did not finish within {:?}", command.as_std().get_program(), limit);
            None
        }
    }
}

/// Resolve a binary on `PATH` using `which`.
async fn which(binary: &str) -> Option<String> {
    let output = output_within(Command::new("which").arg(binary), CHECK_TIMEOUT).await?;
    if !output.status.success() {
        return None;
    }
    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!path.is_empty()).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_output_within_gives_up_on_hung_command() {
        let started = std::time::Instant::now();
        let output = output_within(Command::new("sleep").arg("10"), Duration::from_millis(100)).await;
        assert!(output.is_none());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_output_within_returns_output() {
        let output = output_within(Command::new("echo").arg("2.0.1"), CHECK_TIMEOUT)
            .await
            .unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "2.0.1");
    }

    #[test]
    fn test_platform_check() {
        assert_eq!(check_platform("macos").status, CheckStatus::Pass);

        let linux = check_platform("linux");
        assert_eq!(linux.status, CheckStatus::Fail);
        assert!(linux.message.contains("linux"));
    }

    #[test]
    fn test_iterm2_check_missing_app() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("iTerm.app");
        assert_eq!(check_iterm2_at(&missing).status, CheckStatus::Fail);

        std::fs::create_dir(&missing).unwrap();
        assert_eq!(check_iterm2_at(&missing).status, CheckStatus::Pass);
    }

    #[test]
    fn test_classify_permission_denied() {
        let result = classify_automation_error(
            "osascript exited with exit status: 1: execution error: Not authorized to send Apple events to iTerm. (-1743)",
        );
        assert_eq!(result.status, CheckStatus::Fail);

        let result = classify_automation_error("osascript is not allowed assistive access");
        assert_eq!(result.status, CheckStatus::Fail);
    }

    #[test]
    fn test_classify_not_running() {
        let result = classify_automation_error("execution error: iTerm got an error: Application isn't running. (-600)");
        assert_eq!(result.status, CheckStatus::Warn);
        assert!(result.message.contains("not running"));
    }

    #[test]
    fn test_classify_unknown_error() {
        let result = classify_automation_error("something odd");
        assert_eq!(result.status, CheckStatus::Warn);
        assert!(result.message.ends_with("something odd"));
    }

    #[test]
    fn test_report_warnings_still_pass() {
        let report = EnvironmentReport::from_checks(vec![
            CheckResult::new("a", CheckStatus::Pass, "ok"),
            CheckResult::new("b", CheckStatus::Warn, "meh"),
        ]);
        assert!(report.all_passed);

        let report = EnvironmentReport::from_checks(vec![
            CheckResult::new("a", CheckStatus::Pass, "ok"),
            CheckResult::new("b", CheckStatus::Fail, "broken"),
        ]);
        assert!(!report.all_passed);
    }

    #[test]
    fn test_format_check_results() {
        let report = EnvironmentReport::from_checks(vec![
            CheckResult::new("macOS", CheckStatus::Pass, "Running on macOS"),
            CheckResult::new("iTerm2", CheckStatus::Fail, "missing"),
            CheckResult::new("Automation Permissions", CheckStatus::Warn, "unknown"),
        ]);

        let text = format_check_results(&report);

        assert!(text.starts_with("Environment Check Results\n"));
        assert!(text.contains("[OK] macOS\n    Running on macOS"));
        assert!(text.contains("[X] iTerm2\n    missing"));
        assert!(text.contains("[!!] Automation Permissions"));
        assert!(text.ends_with("Some checks failed. Please fix the issues above."));
    }
}
