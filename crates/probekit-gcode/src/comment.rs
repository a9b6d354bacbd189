//! G-code comment removal
//!
//! Comments in G-code can be:
//! - Parentheses: (this is a comment)
//! - Semicolon: G01 X10 ; move to X10
//! - Program delimiter: a trailing `%`

use probekit_core::CommandProcessingError;

/// Removes comments from a raw command line
///
/// Processors that need to look at the instruction part of a line go through
/// this trait, so a pipeline can swap in a different comment dialect.
pub trait CommentStripper: Send + Sync {
    /// Return `raw` without comments and surrounding whitespace
    fn strip(&self, raw: &str) -> Result<String, CommandProcessingError>;
}

/// Strips parenthesized and semicolon comments
///
/// Parenthesized comments do not nest. Anything after the first `;` that is
/// not inside parentheses is discarded, including stray parentheses.
#[derive(Debug, Clone, Copy, Default)]
pub struct GcodeCommentStripper;

impl GcodeCommentStripper {
    /// Create a new comment stripper
    pub fn new() -> Self {
        Self
    }
}

impl CommentStripper for GcodeCommentStripper {
    fn strip(&self, raw: &str) -> Result<String, CommandProcessingError> {
        let mut stripped = String::with_capacity(raw.len());
        let mut open_paren: Option<usize> = None;

        for (column, ch) in raw.char_indices() {
            match (open_paren, ch) {
                (None, ';') => break,
                (None, '(') => open_paren = Some(column),
                (None, ')') => {
                    return Err(CommandProcessingError::UnexpectedCommentClose { column });
                }
                (None, _) => stripped.push(ch),
                (Some(_), ')') => open_paren = None,
                (Some(_), _) => {}
            }
        }

        if let Some(column) = open_paren {
            return Err(CommandProcessingError::UnterminatedComment { column });
        }

        let trimmed = stripped.trim();
        let trimmed = trimmed
            .strip_suffix('%')
            .map(str::trim_end)
            .unwrap_or(trimmed);

        Ok(trimmed.to_string())
    }
}
