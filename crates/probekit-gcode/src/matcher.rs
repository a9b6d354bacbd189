//! Tool change directive recognition
//!
//! A tool change is written `T<tool>M<code>`, e.g. `T5M6`. Post-processors
//! may put other words in front of it on the same line, so the directive is
//! accepted anywhere as long as it ends the (comment-free) line.

use regex::Regex;
use std::sync::OnceLock;

/// Full-line, case-insensitive tool change pattern
///
/// The prefix may not span a line terminator (`\r`, `\n`, NEL, LS, PS).
const TOOL_CHANGE_PATTERN: &str = r"(?i)^[^\r\n\x{85}\x{2028}\x{2029}]*T([0-9]+)M[0-9]+$";

fn tool_change_regex() -> &'static Regex {
    static TOOL_CHANGE_REGEX: OnceLock<Regex> = OnceLock::new();
    TOOL_CHANGE_REGEX
        .get_or_init(|| Regex::new(TOOL_CHANGE_PATTERN).expect("invalid tool change pattern"))
}

/// Recognizes tool change directives in comment-free command lines
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolChangeMatcher;

impl ToolChangeMatcher {
    /// Create a new matcher
    pub fn new() -> Self {
        Self
    }

    /// Check whether `stripped` is a tool change line
    pub fn matches(&self, stripped: &str) -> bool {
        tool_change_regex().is_match(stripped)
    }

    /// Tool index of a tool change line, for diagnostics
    ///
    /// Returns `None` when the line does not match or the index does not fit
    /// in a `u32`.
    pub fn tool_number(&self, stripped: &str) -> Option<u32> {
        tool_change_regex()
            .captures(stripped)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}
