//! Shell and AppleScript escaping.
//!
//! These two functions are the only places untrusted text is made safe for
//! execution. A spawn runs text through both layers in a fixed order: first
//! [`shell_escape`] for every untrusted field of the command line, then
//! [`applescript_escape`] over the finished command when it is embedded in
//! the automation script.

/// Escape a string for safe shell use.
///
/// Wraps the string in single quotes and escapes embedded single quotes
/// using the `'"'"'` technique (end quote, double-quoted quote, start quote).
/// The result is always exactly one shell word, `''` for empty input.
///
/// # Example
///
/// ```
/// use claude_coder::terminal::shell_escape;
///
/// assert_eq!(shell_escape("hello"), "'hello'");
/// assert_eq!(shell_escape("it's"), "'it'\"'\"'s'");
/// ```
pub fn shell_escape(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\"'\"'"))
}

/// Escape a string for placement inside an AppleScript string literal.
///
/// Backslashes are doubled first so the escapes inserted for double quotes
/// and newlines are not escaped a second time. The caller supplies the
/// surrounding double quotes.
pub fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    /// Run the escaped word through `sh` and return what the shell saw.
    fn shell_round_trip(s: &str) -> String {
        let output = Command::new("sh")
            .arg("-c")
            .arg(format!("printf '%s' {}", shell_escape(s)))
            .output()
            .expect("failed to run sh");
        assert!(output.status.success());
        String::from_utf8(output.stdout).expect("non-utf8 shell output")
    }

    /// Reverse the AppleScript escapes, the way the interpreter reads a literal.
    fn applescript_unescape(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        }
        out
    }

    #[test]
    fn test_shell_escape_wraps_in_single_quotes() {
        assert_eq!(shell_escape("hello"), "'hello'");
    }

    #[test]
    fn test_shell_escape_single_quotes() {
        assert_eq!(shell_escape("it's working"), "'it'\"'\"'s working'");
        assert_eq!(
            shell_escape("don't won't can't"),
            "'don'\"'\"'t won'\"'\"'t can'\"'\"'t'"
        );
    }

    #[test]
    fn test_shell_escape_empty() {
        assert_eq!(shell_escape(""), "''");
    }

    #[test]
    fn test_shell_escape_keeps_metacharacters_inert() {
        assert_eq!(shell_escape("$HOME && rm -rf /"), "'$HOME && rm -rf /'");
        assert_eq!(shell_escape("`whoami`"), "'`whoami`'");
    }

    #[test]
    fn test_shell_escape_round_trips_through_sh() {
        let inputs = [
            "",
            "plain",
            "it's",
            "''",
            "$HOME && echo pwned; `id` | cat",
            "line one\nline two",
            "back\\slash \"double\"",
            "tab\there * ? [a-z] ~user",
            "unicode: héllo ✓",
        ];
        for input in inputs {
            assert_eq!(shell_round_trip(input), input, "input: {input:?}");
        }
    }

    #[test]
    fn test_applescript_escape_backslashes() {
        assert_eq!(applescript_escape("path\\to\\file"), "path\\\\to\\\\file");
    }

    #[test]
    fn test_applescript_escape_double_quotes() {
        assert_eq!(applescript_escape("say \"hello\""), "say \\\"hello\\\"");
    }

    #[test]
    fn test_applescript_escape_newlines() {
        assert_eq!(applescript_escape("line1\nline2"), "line1\\nline2");
    }

    #[test]
    fn test_applescript_escape_combined() {
        assert_eq!(
            applescript_escape("path\\to\n\"file\""),
            "path\\\\to\\n\\\"file\\\""
        );
    }

    #[test]
    fn test_applescript_escape_unchanged() {
        assert_eq!(applescript_escape("simple text"), "simple text");
    }

    #[test]
    fn test_applescript_escape_backslash_before_quote() {
        // A trailing backslash must not swallow the closing quote.
        assert_eq!(applescript_escape("a\\\""), "a\\\\\\\"");
    }

    #[test]
    fn test_applescript_escape_reverses() {
        let inputs = ["", "plain", "\\n literal", "\"\\\"", "multi\nline\n", "'single'"];
        for input in inputs {
            let escaped = applescript_escape(input);
            assert!(!escaped.contains('\n'));
            assert_eq!(applescript_unescape(&escaped), input, "input: {input:?}");
        }
    }
}
