//! AppleScript templates for driving iTerm2.

use super::escape::applescript_escape;

/// Enumerates every iTerm2 window and its sessions.
///
/// Output is one `WINDOW:<id>` line per window followed by one
/// `SESSION:<name>|<tty>` line per session, parsed by
/// [`parse_window_list`](super::parse_window_list).
pub const LIST_WINDOWS_SCRIPT: &str = r#"
tell application "iTerm"
  set output to ""
  repeat with w in windows
    set output to output & "WINDOW:" & (id of w) & linefeed
    repeat with t in tabs of w
      repeat with s in sessions of t
        set output to output & "SESSION:" & (name of s) & "|" & (tty of s) & linefeed
      end repeat
    end repeat
  end repeat
  return output
end tell
"#;

/// Probe used to verify that automation of iTerm2 is permitted.
pub const AUTOMATION_PROBE_SCRIPT: &str = r#"tell application "iTerm2" to get name"#;

/// Build the AppleScript that opens a new iTerm2 window and runs `command` in it.
///
/// `command` is expected to be shell-escaped already (see
/// [`build_full_command`](super::build_full_command)). Both arguments are
/// escaped here again for the AppleScript string literals they land in.
/// `write text` submits the line as if Enter were pressed.
pub fn build_spawn_script(command: &str, window_title: &str) -> String {
    format!(
        r#"
tell application "iTerm"
  activate
  set newWindow to (create window with default profile)
  tell current session of newWindow
    set name to "{}"
    write text "{}"
  end tell
end tell
"#,
        applescript_escape(window_title),
        applescript_escape(command)
    )
}
