//! Layout builder.
//!
//! The append-only output accumulator. It has no grammar knowledge; it
//! only knows how to place tokens, comments, spaces, newlines, and
//! indentation, and to record the original ↔ formatted offset mapping as
//! it goes. The grammar walker is the only caller, and the builder is the
//! only component that touches the output buffer and the mapping.
//!
//! The builder mirrors the *original* line number of the material it has
//! emitted so far: when the next token starts on a later original line,
//! exactly the line difference in newlines is inserted (preserving blank
//! lines), followed by the current indentation. Layout-driven breaks are
//! requested with [`LayoutBuilder::request_newline`] and deferred until
//! the next emission, so repeated requests coalesce into a single break.

use js_ir::{Comment, CommentStyle, SourceMapping, Token};

/// Depths up to this bound get their indent string memoized. Deeper
/// nesting recomputes on demand; same output, just not cached.
const MAX_CACHED_INDENT: usize = 20;

/// Append-only layout accumulator with offset-mapping recording.
///
/// Single-use: construct, drive via the emit operations, then call
/// [`LayoutBuilder::finish`].
pub struct LayoutBuilder<'a> {
    source: &'a str,
    indent_unit: &'a str,
    out: String,
    /// Current nesting depth; moved only by `enter_block`/`exit_block`.
    depth: usize,
    /// Deferred layout break; coalesces until the next emission.
    pending_newline: bool,
    /// Set after a block comment so a same-line follower does not abut
    /// the `*/`.
    pending_space: bool,
    /// Original line number of the last emitted material.
    line: u32,
    indent_cache: Vec<String>,
    mapping: SourceMapping,
    last_original: u32,
    last_formatted: u32,
}

impl<'a> LayoutBuilder<'a> {
    /// Create a builder over `source`, indenting with `indent_unit` per
    /// nesting level.
    pub fn new(source: &'a str, indent_unit: &'a str) -> Self {
        LayoutBuilder {
            source,
            indent_unit,
            out: String::with_capacity(source.len() + source.len() / 8),
            depth: 0,
            pending_newline: false,
            pending_space: false,
            line: 0,
            indent_cache: Vec::new(),
            mapping: SourceMapping::new(),
            last_original: 0,
            last_formatted: 0,
        }
    }

    /// Current nesting depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Emit a token: flush its leading comments, place it on the right
    /// output line, record a mapping pair if needed, then append the
    /// verbatim source slice.
    pub fn emit_token(&mut self, token: &Token) {
        for comment in &token.comments {
            self.emit_comment(comment);
        }
        self.place(token.start_line);
        if !token.span.is_empty() {
            self.record_mapping(token.span.start);
            self.out.push_str(&self.source[token.span.to_range()]);
        }
        // Tokens may span lines (string literals with continuations).
        self.line = token.end_line;
    }

    /// Flush only a token's leading comments. Used for the end-of-input
    /// token, which carries the file's trailing comments.
    pub fn flush_comments(&mut self, token: &Token) {
        for comment in &token.comments {
            self.emit_comment(comment);
        }
    }

    /// Append a single space. Never triggers indentation or mapping
    /// changes.
    #[inline]
    pub fn add_space(&mut self) {
        self.out.push(' ');
    }

    /// Request a layout line break before the next emission. Consecutive
    /// requests coalesce into one break.
    #[inline]
    pub fn request_newline(&mut self) {
        self.pending_newline = true;
    }

    /// Increase nesting depth by one.
    #[inline]
    pub fn enter_block(&mut self) {
        self.depth += 1;
    }

    /// Decrease nesting depth by one.
    ///
    /// Pairing is the walker's responsibility; a negative depth is an
    /// internal bug, not a property of the input, and aborts.
    #[inline]
    pub fn exit_block(&mut self) {
        assert!(self.depth > 0, "nesting depth underflow");
        self.depth -= 1;
    }

    /// Finish and return the accumulated text and mapping. The builder is
    /// consumed; a pending newline at end of input is not materialized.
    pub fn finish(self) -> (String, SourceMapping) {
        (self.out, self.mapping)
    }

    /// Place the next emission on the output line for original line
    /// `line`: advance by the exact number of newlines when the original
    /// moved to a later line (preserving blank lines), or honor a pending
    /// layout break, or a pending separator space.
    fn place(&mut self, line: u32) {
        debug_assert!(self.line <= line, "tokens must arrive in line order");
        if self.line < line {
            for _ in self.line..line {
                self.out.push('\n');
            }
            self.push_indent();
            self.pending_newline = false;
            self.pending_space = false;
            self.line = line;
        } else if self.pending_newline {
            self.out.push('\n');
            self.push_indent();
            self.pending_newline = false;
            self.pending_space = false;
        } else if self.pending_space {
            self.out.push(' ');
            self.pending_space = false;
        }
    }

    /// Replay one leading comment, preserving its original line spacing
    /// relative to the previous emitted line.
    ///
    /// A comment on the same original line as already-emitted material
    /// stays on that line (one separating space), even when a layout
    /// break is pending — the pending break then applies to whatever
    /// follows the comment.
    fn emit_comment(&mut self, comment: &Comment) {
        if self.line < comment.line {
            for _ in self.line..comment.line {
                self.out.push('\n');
            }
            self.push_indent();
            self.pending_newline = false;
            self.pending_space = false;
            self.line = comment.line;
        } else if self.needs_separator() {
            self.out.push(' ');
            self.pending_space = false;
        }

        self.record_mapping(comment.span.start);
        self.out.push_str(&self.source[comment.span.to_range()]);

        match comment.style {
            // A line comment owns the rest of its output line.
            CommentStyle::Line => self.pending_newline = true,
            CommentStyle::Block => {
                self.line = comment.end_line;
                self.pending_space = true;
            }
        }
    }

    fn needs_separator(&self) -> bool {
        self.pending_space || !(self.out.is_empty() || self.out.ends_with([' ', '\n']))
    }

    /// Record a mapping pair iff the offset delta changed since the last
    /// recorded pair, i.e. iff `original` no longer lines up with the
    /// running extrapolation.
    fn record_mapping(&mut self, original: u32) {
        let formatted = self.out_len();
        if original - self.last_original == formatted - self.last_formatted {
            return;
        }
        self.mapping.push(original, formatted);
        self.last_original = original;
        self.last_formatted = formatted;
    }

    fn push_indent(&mut self) {
        if self.depth == 0 {
            return;
        }
        if self.depth <= MAX_CACHED_INDENT {
            while self.indent_cache.len() < self.depth {
                let repeats = self.indent_cache.len() + 1;
                self.indent_cache.push(self.indent_unit.repeat(repeats));
            }
            self.out.push_str(&self.indent_cache[self.depth - 1]);
        } else {
            for _ in 0..self.depth {
                self.out.push_str(self.indent_unit);
            }
        }
    }

    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "output length is bounded by u32 spans over the input"
    )]
    fn out_len(&self) -> u32 {
        self.out.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use js_ir::{Span, TokenKind};
    use pretty_assertions::assert_eq;

    fn token(kind: TokenKind, span: Span, line: u32) -> Token {
        Token {
            kind,
            span,
            start_line: line,
            end_line: line,
            newline_before: false,
            comments: Vec::new(),
        }
    }

    #[test]
    fn test_emit_verbatim_slices() {
        let source = "var x";
        let mut builder = LayoutBuilder::new(source, "    ");
        builder.emit_token(&token(TokenKind::Var, Span::new(0, 3), 0));
        builder.add_space();
        builder.emit_token(&token(TokenKind::Identifier, Span::new(4, 5), 0));
        let (text, mapping) = builder.finish();
        assert_eq!(text, "var x");
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_pending_newline_coalesces() {
        let source = "a b";
        let mut builder = LayoutBuilder::new(source, "    ");
        builder.emit_token(&token(TokenKind::Identifier, Span::new(0, 1), 0));
        builder.request_newline();
        builder.request_newline();
        builder.emit_token(&token(TokenKind::Identifier, Span::new(2, 3), 0));
        let (text, _) = builder.finish();
        assert_eq!(text, "a\nb");
    }

    #[test]
    fn test_line_advance_preserves_blank_lines() {
        let source = "a\n\n\nb";
        let mut builder = LayoutBuilder::new(source, "    ");
        builder.emit_token(&token(TokenKind::Identifier, Span::new(0, 1), 0));
        builder.request_newline();
        let mut b = token(TokenKind::Identifier, Span::new(4, 5), 3);
        b.newline_before = true;
        builder.emit_token(&b);
        let (text, _) = builder.finish();
        // Three newlines from the source, the pending request coalesced.
        assert_eq!(text, "a\n\n\nb");
    }

    #[test]
    fn test_indentation_applied_on_break() {
        let source = "a b";
        let mut builder = LayoutBuilder::new(source, "    ");
        builder.emit_token(&token(TokenKind::Identifier, Span::new(0, 1), 0));
        builder.enter_block();
        builder.request_newline();
        builder.emit_token(&token(TokenKind::Identifier, Span::new(2, 3), 0));
        builder.exit_block();
        let (text, _) = builder.finish();
        assert_eq!(text, "a\n    b");
    }

    #[test]
    fn test_deep_indent_beyond_cache() {
        let source = "a b";
        let mut builder = LayoutBuilder::new(source, " ");
        builder.emit_token(&token(TokenKind::Identifier, Span::new(0, 1), 0));
        for _ in 0..(MAX_CACHED_INDENT + 5) {
            builder.enter_block();
        }
        builder.request_newline();
        builder.emit_token(&token(TokenKind::Identifier, Span::new(2, 3), 0));
        for _ in 0..(MAX_CACHED_INDENT + 5) {
            builder.exit_block();
        }
        let (text, _) = builder.finish();
        assert_eq!(text, format!("a\n{}b", " ".repeat(MAX_CACHED_INDENT + 5)));
    }

    #[test]
    #[should_panic(expected = "nesting depth underflow")]
    fn test_depth_underflow_aborts() {
        let mut builder = LayoutBuilder::new("", "    ");
        builder.exit_block();
    }

    #[test]
    fn test_mapping_recorded_on_delta_change() {
        // source:    var a=1;
        // formatted: var a = 1;
        let source = "var a=1;";
        let mut builder = LayoutBuilder::new(source, "    ");
        builder.emit_token(&token(TokenKind::Var, Span::new(0, 3), 0));
        builder.add_space();
        builder.emit_token(&token(TokenKind::Identifier, Span::new(4, 5), 0));
        builder.add_space();
        builder.emit_token(&token(TokenKind::Eq, Span::new(5, 6), 0));
        builder.add_space();
        builder.emit_token(&token(TokenKind::Number, Span::new(6, 7), 0));
        builder.emit_token(&token(TokenKind::Semicolon, Span::new(7, 8), 0));
        let (text, mapping) = builder.finish();
        assert_eq!(text, "var a = 1;");
        let pairs: Vec<_> = mapping.pairs().collect();
        assert_eq!(pairs, vec![(5, 6), (6, 8)]);
        // Recorded pairs point at identical characters.
        for (orig, fmt) in pairs {
            assert_eq!(
                source.as_bytes()[orig as usize],
                text.as_bytes()[fmt as usize]
            );
        }
    }

    #[test]
    fn test_trailing_comment_stays_on_its_line() {
        let source = "a; // tail\nb;";
        let mut builder = LayoutBuilder::new(source, "    ");
        builder.emit_token(&token(TokenKind::Identifier, Span::new(0, 1), 0));
        builder.emit_token(&token(TokenKind::Semicolon, Span::new(1, 2), 0));
        builder.request_newline();
        let mut b = token(TokenKind::Identifier, Span::new(11, 12), 1);
        b.comments
            .push(Comment::new(Span::new(3, 10), 0, 0, CommentStyle::Line));
        builder.emit_token(&b);
        builder.emit_token(&token(TokenKind::Semicolon, Span::new(12, 13), 1));
        let (text, _) = builder.finish();
        assert_eq!(text, "a; // tail\nb;");
    }

    #[test]
    fn test_block_comment_separated_from_follower() {
        let source = "/* c */ a";
        let mut builder = LayoutBuilder::new(source, "    ");
        let mut a = token(TokenKind::Identifier, Span::new(8, 9), 0);
        a.comments
            .push(Comment::new(Span::new(0, 7), 0, 0, CommentStyle::Block));
        builder.emit_token(&a);
        let (text, _) = builder.finish();
        assert_eq!(text, "/* c */ a");
    }

    #[test]
    fn test_comment_blank_line_preserved() {
        let source = "a;\n\n// note\nb;";
        let mut builder = LayoutBuilder::new(source, "    ");
        builder.emit_token(&token(TokenKind::Identifier, Span::new(0, 1), 0));
        builder.emit_token(&token(TokenKind::Semicolon, Span::new(1, 2), 0));
        builder.request_newline();
        let mut b = token(TokenKind::Identifier, Span::new(12, 13), 3);
        b.comments
            .push(Comment::new(Span::new(4, 11), 2, 2, CommentStyle::Line));
        builder.emit_token(&b);
        builder.emit_token(&token(TokenKind::Semicolon, Span::new(13, 14), 3));
        let (text, _) = builder.finish();
        assert_eq!(text, "a;\n\n// note\nb;");
    }
}
