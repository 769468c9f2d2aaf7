//! Formatting error types.

use js_ir::TokenKind;
use js_lexer::LexError;
use thiserror::Error;

/// Errors that abort a formatting attempt.
///
/// There is never a partial result: callers treat formatting as
/// all-or-nothing and fall back to displaying the unformatted original.
/// None of these are retried — the transform is deterministic, so
/// re-running it on the same input cannot succeed where it just failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The scanner or token adapter could not classify the input.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The grammar walker required a specific token and found another.
    #[error("expected {expected}, found {found} at offset {offset}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
        offset: u32,
    },

    /// The token stream ended while more tokens were required.
    #[error("unexpected end of input while expecting {expected} at offset {offset}")]
    UnexpectedEof { expected: &'static str, offset: u32 },
}

impl FormatError {
    /// Byte offset of the offending position in the original source.
    pub fn offset(&self) -> u32 {
        match self {
            FormatError::Lex(err) => err.offset(),
            FormatError::UnexpectedToken { offset, .. }
            | FormatError::UnexpectedEof { offset, .. } => *offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FormatError::UnexpectedToken {
            expected: "`)`",
            found: TokenKind::Semicolon,
            offset: 9,
        };
        assert_eq!(format!("{err}"), "expected `)`, found `;` at offset 9");
        assert_eq!(err.offset(), 9);
    }

    #[test]
    fn test_lex_error_propagates_offset() {
        let err = FormatError::from(LexError::UnterminatedString { offset: 4 });
        assert_eq!(err.offset(), 4);
    }
}
