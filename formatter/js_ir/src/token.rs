//! Classified tokens.

use std::fmt;

use crate::{Comment, Span, TokenKind};

/// A classified lexical token.
///
/// `newline_before` records whether at least one line terminator occurred
/// between the previous token and this one in the original source (gaps
/// around attached comments included). It drives restricted-production
/// decisions (`return`/`break`/`continue` operands) and nothing else; the
/// output's actual line breaks are derived from the line fields.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Line the token starts on (0-based).
    pub start_line: u32,
    /// Line the token ends on; multi-line string literals and the like end
    /// on a later line than they start.
    pub end_line: u32,
    pub newline_before: bool,
    /// Leading comments, in source order.
    pub comments: Vec<Comment>,
}

impl Token {
    /// The token's verbatim source text.
    #[inline]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.to_range()]
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {} (line {})", self.kind, self.span, self.start_line)?;
        if !self.comments.is_empty() {
            write!(f, " +{} comments", self.comments.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_text() {
        let source = "var x";
        let token = Token {
            kind: TokenKind::Var,
            span: Span::new(0, 3),
            start_line: 0,
            end_line: 0,
            newline_before: false,
            comments: Vec::new(),
        };
        assert_eq!(token.text(source), "var");
    }
}
