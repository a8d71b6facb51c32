//! Compiled regex patterns shared across hookkit modules.
//!
//! These patterns are compiled once on first use and reused throughout.
//! Update them together with the session template or hook input formats.

use once_cell::sync::Lazy;
use regex::Regex;

// ═══════════════════════════════════════════════════════════════════════════════
// Command Validation
// ═══════════════════════════════════════════════════════════════════════════════

/// Names allowed through `command_exists`. Anything else never reaches a
/// subprocess.
pub static RE_COMMAND_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_.-]+$").unwrap());

// ═══════════════════════════════════════════════════════════════════════════════
// Session Record Regexes
// ═══════════════════════════════════════════════════════════════════════════════

/// The header line rewritten on every session-end. Matches raw bytes up to
/// the newline, so records with non-UTF-8 notes are still updated in place.
pub static RE_LAST_UPDATED: Lazy<regex::bytes::Regex> =
    Lazy::new(|| regex::bytes::Regex::new(r"\*\*Last Updated:\*\*(?-u:.)*").unwrap());

// ═══════════════════════════════════════════════════════════════════════════════
// Transcript Regexes
// ═══════════════════════════════════════════════════════════════════════════════

/// One match per user message in a JSONL transcript.
pub static RE_USER_MESSAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""type":"user""#).unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_name_rejects_shell_metacharacters() {
        assert!(RE_COMMAND_NAME.is_match("pnpm"));
        assert!(RE_COMMAND_NAME.is_match("node_modules.bin-x"));
        assert!(!RE_COMMAND_NAME.is_match("; rm -rf /"));
        assert!(!RE_COMMAND_NAME.is_match("npm && echo"));
        assert!(!RE_COMMAND_NAME.is_match("$(whoami)"));
        assert!(!RE_COMMAND_NAME.is_match(""));
    }

    #[test]
    fn test_last_updated_matches_single_line() {
        let text = b"**Last Updated:** 09:15\n\n---";
        let m = RE_LAST_UPDATED.find(text).unwrap();
        assert_eq!(m.as_bytes(), b"**Last Updated:** 09:15");
    }

    #[test]
    fn test_user_message_counts_compact_json() {
        let line = r#"{"type":"user","message":"hi"}"#;
        assert_eq!(RE_USER_MESSAGE.find_iter(line).count(), 1);
        assert_eq!(RE_USER_MESSAGE.find_iter(r#"{"type": "user"}"#).count(), 0);
    }
}
