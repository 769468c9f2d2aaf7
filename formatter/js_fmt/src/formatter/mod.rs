//! Formatter grammar walker.
//!
//! A recursive-descent walker over the token stream: mutually recursive
//! procedures, one per nonterminal, with exactly one token of lookahead.
//! For every token it keeps, the walker forwards it to the layout builder
//! together with the token's attached comments, plus the layout decisions
//! (spaces, line-break requests, nesting changes) the grammar position
//! implies. The builder is the only component that touches the output.
//!
//! The one wrinkle in the token plumbing is `/`: division operator or
//! start of a regex literal, decided by grammar position. Pulls made in
//! primary-expression position use regex mode; when the cached lookahead
//! was scanned under the wrong mode and actually starts with `/`, it is
//! re-scanned from its start offset under the right one.

mod expressions;
mod operators;
mod statements;

use js_ir::{Token, TokenKind};
use js_lexer::TokenStream;

use crate::builder::LayoutBuilder;
use crate::{FormatError, FormatOptions, FormattedSource};

/// Recursive-descent formatter over a single source text.
///
/// Single-use: all state (lookahead, nesting, mapping) is scoped to one
/// invocation of [`Formatter::format`].
pub struct Formatter<'a> {
    source: &'a str,
    stream: TokenStream<'a>,
    builder: LayoutBuilder<'a>,
    lookahead: Option<Token>,
    /// `/`-disambiguation mode the lookahead was scanned under.
    lookahead_regex: bool,
    /// Count of consumed tokens; labelled-statement detection compares
    /// positions around an expression parse.
    consumed: usize,
}

impl<'a> Formatter<'a> {
    /// Create a formatter over `source`.
    pub fn new(source: &'a str, options: &'a FormatOptions) -> Self {
        Formatter {
            source,
            stream: TokenStream::new(source),
            builder: LayoutBuilder::new(source, &options.indent_unit),
            lookahead: None,
            lookahead_regex: false,
            consumed: 0,
        }
    }

    /// Walk the whole program and return the formatted text and mapping.
    pub fn format(mut self) -> Result<FormattedSource, FormatError> {
        while self.peek(false)?.kind != TokenKind::Eof {
            self.parse_statement()?;
        }
        // The end-of-input token carries the file's trailing comments.
        let eof = self.advance(false)?;
        self.builder.flush_comments(&eof);
        let (text, mapping) = self.builder.finish();
        Ok(FormattedSource { text, mapping })
    }

    // ─── token plumbing ─────────────────────────────────────────────────

    /// Ensure the lookahead slot is filled under the given mode.
    fn fill(&mut self, regex_ok: bool) -> Result<(), FormatError> {
        match &self.lookahead {
            Some(cached) if regex_ok != self.lookahead_regex && mode_sensitive(cached.kind) => {}
            Some(_) => return Ok(()),
            None => {
                self.lookahead = Some(self.stream.next(regex_ok)?);
                self.lookahead_regex = regex_ok;
                return Ok(());
            }
        }
        // Cached under the wrong mode and it matters: re-scan the token
        // from its start offset, keeping the comments and newline flag
        // gathered on the first pull (they precede the token either way).
        let Some(prev) = self.lookahead.take() else {
            unreachable!("checked above");
        };
        self.stream.set_position(prev.span.start, prev.start_line);
        let mut fresh = self.stream.next(regex_ok)?;
        fresh.comments = prev.comments;
        fresh.newline_before = prev.newline_before;
        self.lookahead = Some(fresh);
        self.lookahead_regex = regex_ok;
        Ok(())
    }

    /// One-token lookahead.
    fn peek(&mut self, regex_ok: bool) -> Result<&Token, FormatError> {
        self.fill(regex_ok)?;
        match &self.lookahead {
            Some(token) => Ok(token),
            None => unreachable!("fill always populates the lookahead"),
        }
    }

    fn peek_kind(&mut self) -> Result<TokenKind, FormatError> {
        Ok(self.peek(false)?.kind)
    }

    fn peek_kind_regex(&mut self) -> Result<TokenKind, FormatError> {
        Ok(self.peek(true)?.kind)
    }

    /// Original-source line-break flag on the lookahead token. Drives the
    /// restricted productions, nothing else.
    fn peek_newline_before(&mut self) -> Result<bool, FormatError> {
        Ok(self.peek(false)?.newline_before)
    }

    /// Consume the lookahead token.
    fn advance(&mut self, regex_ok: bool) -> Result<Token, FormatError> {
        self.fill(regex_ok)?;
        match self.lookahead.take() {
            Some(token) => {
                self.consumed += 1;
                Ok(token)
            }
            None => unreachable!("fill always populates the lookahead"),
        }
    }

    /// Consume the next token and hand it to the builder.
    fn emit_next(&mut self, regex_ok: bool) -> Result<Token, FormatError> {
        let token = self.advance(regex_ok)?;
        self.builder.emit_token(&token);
        Ok(token)
    }

    /// Consume and emit under division mode; the common case.
    fn emit(&mut self) -> Result<(), FormatError> {
        self.emit_next(false)?;
        Ok(())
    }

    /// Require `kind` next; consume and emit it.
    fn expect(&mut self, kind: TokenKind) -> Result<(), FormatError> {
        if self.peek(false)?.kind == kind {
            self.emit()
        } else {
            Err(self.unexpected(kind.display_name()))
        }
    }

    /// Build the failure for an unsatisfied expectation.
    ///
    /// Split out of the hot path so the error construction does not get
    /// inlined into every `expect` call.
    #[cold]
    #[inline(never)]
    fn unexpected(&self, expected: &'static str) -> FormatError {
        let (found, offset) = match &self.lookahead {
            Some(token) => (token.kind, token.span.start),
            None => (TokenKind::Eof, 0),
        };
        if found == TokenKind::Eof {
            FormatError::UnexpectedEof { expected, offset }
        } else {
            FormatError::UnexpectedToken {
                expected,
                found,
                offset,
            }
        }
    }

    /// Verbatim source text of a token.
    fn text(&self, token: &Token) -> &'a str {
        token.text(self.source)
    }
}

/// Kinds whose scan depends on the `/`-disambiguation mode.
fn mode_sensitive(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Slash | TokenKind::SlashEq | TokenKind::Regex
    )
}
