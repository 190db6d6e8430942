//! Parsing of the iTerm2 window listing.
//!
//! The listing is the line protocol printed by
//! [`LIST_WINDOWS_SCRIPT`](super::LIST_WINDOWS_SCRIPT):
//!
//! ```text
//! WINDOW:<id>
//! SESSION:<name>|<tty>
//! SESSION:<name>|<tty>
//! WINDOW:<id>
//! ...
//! ```
//!
//! Fields are not quoted. A session name containing `|` is split at the first
//! `|`, and names containing a newline arrive as two lines. Both are
//! limitations of the protocol and are not reinterpreted here.

use serde::Serialize;

const WINDOW_PREFIX: &str = "WINDOW:";
const SESSION_PREFIX: &str = "SESSION:";

/// An iTerm2 window and the sessions in its tabs, in host order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalWindow {
    /// Window id assigned by iTerm2
    pub id: String,
    pub sessions: Vec<TerminalSession>,
}

/// A single iTerm2 session (one pane of one tab).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalSession {
    pub name: String,
    /// Controlling tty, e.g. `/dev/ttys001`. Empty when iTerm2 reported none.
    pub tty: String,
}

impl TerminalSession {
    /// Split a `name|tty` record at the first `|`.
    fn from_record(record: &str) -> Self {
        let (name, tty) = record.split_once('|').unwrap_or((record, ""));
        Self {
            name: name.to_string(),
            tty: tty.to_string(),
        }
    }
}

/// Parse the window listing into windows, preserving emission order.
///
/// Never fails. Blank lines and unknown record types are skipped, and
/// `SESSION:` lines that appear before any `WINDOW:` line are dropped since
/// they have no window to belong to.
pub fn parse_window_list(output: &str) -> Vec<TerminalWindow> {
    let mut windows = Vec::new();
    let mut current: Option<TerminalWindow> = None;

    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        if let Some(id) = line.strip_prefix(WINDOW_PREFIX) {
            if let Some(window) = current.take() {
                windows.push(window);
            }
            current = Some(TerminalWindow {
                id: id.to_string(),
                sessions: Vec::new(),
            });
        } else if let Some(record) = line.strip_prefix(SESSION_PREFIX) {
            match current.as_mut() {
                Some(window) => window.sessions.push(TerminalSession::from_record(record)),
                None => tracing::debug!("Dropping session line with no window: {}", line),
            }
        }
    }

    if let Some(window) = current {
        windows.push(window);
    }

    windows
}

/// Render windows for display, one indented line per session.
pub fn format_window_list(windows: &[TerminalWindow]) -> String {
    if windows.is_empty() {
        return "No iTerm2 windows found.".to_string();
    }

    let mut lines = Vec::new();
    for window in windows {
        lines.push(format!("Window: {}", window.id));
        for session in &window.sessions {
            lines.push(format!("  Session: {} - {}", session.name, session.tty));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(name: &str, tty: &str) -> TerminalSession {
        TerminalSession {
            name: name.to_string(),
            tty: tty.to_string(),
        }
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_window_list("").is_empty());
        assert!(parse_window_list("\n  \n\t\n").is_empty());
    }

    #[test]
    fn test_parse_single_window_single_session() {
        let windows = parse_window_list("WINDOW:12345\nSESSION:My Session|/dev/ttys001");

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].id, "12345");
        assert_eq!(windows[0].sessions, vec![session("My Session", "/dev/ttys001")]);
    }

    #[test]
    fn test_parse_multiple_windows_in_order() {
        let output = "WINDOW:111\n\
                      SESSION:Session A|/dev/ttys001\n\
                      SESSION:Session B|/dev/ttys002\n\
                      WINDOW:222\n\
                      SESSION:Session C|/dev/ttys003\n";

        let windows = parse_window_list(output);

        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].id, "111");
        assert_eq!(
            windows[0].sessions,
            vec![session("Session A", "/dev/ttys001"), session("Session B", "/dev/ttys002")]
        );
        assert_eq!(windows[1].id, "222");
        assert_eq!(windows[1].sessions, vec![session("Session C", "/dev/ttys003")]);
    }

    #[test]
    fn test_parse_window_without_sessions() {
        let windows = parse_window_list("WINDOW:1\nWINDOW:2\nSESSION:A|/dev/ttys0");
        assert_eq!(windows.len(), 2);
        assert!(windows[0].sessions.is_empty());
        assert_eq!(windows[1].sessions.len(), 1);
    }

    #[test]
    fn test_parse_session_without_tty() {
        let windows = parse_window_list("WINDOW:123\nSESSION:Test|");
        assert_eq!(windows[0].sessions, vec![session("Test", "")]);
    }

    #[test]
    fn test_parse_session_without_separator() {
        let windows = parse_window_list("WINDOW:123\nSESSION:Bare");
        assert_eq!(windows[0].sessions, vec![session("Bare", "")]);
    }

    #[test]
    fn test_parse_drops_orphan_session() {
        assert!(parse_window_list("SESSION:orphan|/dev/ttys9").is_empty());

        let windows = parse_window_list("SESSION:orphan|/dev/ttys9\nWINDOW:1\nSESSION:A|/dev/ttys0");
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].sessions, vec![session("A", "/dev/ttys0")]);
    }

    #[test]
    fn test_parse_ignores_blank_and_unknown_lines() {
        let output = "WINDOW:123\n\nTAB:7\nSESSION:Test|/dev/ttys001\n   \n";
        let windows = parse_window_list(output);

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].sessions.len(), 1);
    }

    #[test]
    fn test_parse_splits_on_first_pipe() {
        let windows = parse_window_list("WINDOW:1\nSESSION:a|b|/dev/ttys4");
        assert_eq!(windows[0].sessions, vec![session("a", "b|/dev/ttys4")]);
    }

    #[test]
    fn test_parse_handles_crlf() {
        let windows = parse_window_list("WINDOW:1\r\nSESSION:A|/dev/ttys0\r\n");
        assert_eq!(windows[0].id, "1");
        assert_eq!(windows[0].sessions, vec![session("A", "/dev/ttys0")]);
    }

    #[test]
    fn test_format_no_windows() {
        assert_eq!(format_window_list(&[]), "No iTerm2 windows found.");
    }

    #[test]
    fn test_format_multiple_windows_with_indentation() {
        let windows = vec![
            TerminalWindow {
                id: "111".to_string(),
                sessions: vec![session("A", "/dev/ttys001"), session("B", "/dev/ttys002")],
            },
            TerminalWindow {
                id: "222".to_string(),
                sessions: vec![session("C", "/dev/ttys003")],
            },
        ];

        let formatted = format_window_list(&windows);
        let lines: Vec<_> = formatted.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Window: 111",
                "  Session: A - /dev/ttys001",
                "  Session: B - /dev/ttys002",
                "Window: 222",
                "  Session: C - /dev/ttys003",
            ]
        );
    }
}
