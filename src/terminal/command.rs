//! Shell command composition for the spawned Claude session.

use super::escape::shell_escape;

/// Name of the Claude Code CLI binary, resolved through the shell's `PATH`.
pub const CLAUDE_BINARY: &str = "claude";

/// Flag that lets the spawned Claude act without per-action approval.
pub const SKIP_PERMISSIONS_FLAG: &str = "--dangerously-skip-permissions";

/// Build the `claude` invocation for a prompt.
///
/// The prompt is shell-escaped into a single word. The permissions flag is a
/// trusted constant and goes in verbatim.
pub fn build_claude_command(prompt: &str, skip_permissions: bool) -> String {
    let mut command = String::from(CLAUDE_BINARY);
    command.push(' ');
    if skip_permissions {
        command.push_str(SKIP_PERMISSIONS_FLAG);
        command.push(' ');
    }
    command.push_str(&shell_escape(prompt));
    command
}

/// Build the full command line: change into the working directory, then run Claude.
///
/// `working_directory` and `prompt` are escaped separately so neither can
/// close the other's quoting.
pub fn build_full_command(prompt: &str, working_directory: &str, skip_permissions: bool) -> String {
    format!(
        "cd {} && {}",
        shell_escape(working_directory),
        build_claude_command(prompt, skip_permissions)
    )
}
