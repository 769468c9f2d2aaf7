//! Comment types.
//!
//! Comments are captured by the token adapter and attached to the token
//! that follows them. The formatter replays them into the output ahead of
//! that token; they are never dropped and never reordered.

use std::fmt;

use crate::Span;

/// Style discriminator for a comment.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CommentStyle {
    /// Single-line comment: `// text` (runs to end of line).
    Line,
    /// Block comment: `/* text */` (may span several lines).
    Block,
}

/// A source comment.
///
/// The span covers the entire comment including its `//` or `/* */`
/// markers, so slicing the source with it reproduces the comment verbatim.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Comment {
    pub span: Span,
    /// Line the comment starts on (0-based).
    pub line: u32,
    /// Line the comment ends on; differs from `line` only for block
    /// comments that span several lines.
    pub end_line: u32,
    pub style: CommentStyle,
}

impl Comment {
    /// Create a new comment.
    #[inline]
    pub fn new(span: Span, line: u32, end_line: u32, style: CommentStyle) -> Self {
        Comment {
            span,
            line,
            end_line,
            style,
        }
    }

    /// Check if this is a single-line comment.
    #[inline]
    pub fn is_line(&self) -> bool {
        self.style == CommentStyle::Line
    }

    /// The comment's verbatim text, markers included.
    #[inline]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.to_range()]
    }
}

impl fmt::Debug for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {} ({:?})", self.style, self.span, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_text() {
        let source = "a; // tail";
        let comment = Comment::new(Span::new(3, 10), 0, 0, CommentStyle::Line);
        assert_eq!(comment.text(source), "// tail");
        assert!(comment.is_line());
    }

    #[test]
    fn test_block_comment_span() {
        let source = "/* a\n   b */ x";
        let comment = Comment::new(Span::new(0, 12), 0, 1, CommentStyle::Block);
        assert_eq!(comment.text(source), "/* a\n   b */");
        assert!(!comment.is_line());
        assert_eq!(comment.end_line, 1);
    }
}
