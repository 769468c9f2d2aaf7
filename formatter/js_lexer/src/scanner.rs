//! Hand-written raw scanner.
//!
//! Produces one [`RawToken`] per call, skipping whitespace and tracking
//! line numbers. The scanner is deliberately byte-oriented: offsets are
//! byte offsets, identifiers follow the pragmatic rule "ASCII identifier
//! characters plus any non-ASCII byte", and string/comment bodies are
//! passed through verbatim, so UTF-8 survives untouched.
//!
//! `/` cannot be classified without grammar context (division operator vs
//! start of a regex literal); the caller supplies `regex_allowed` on every
//! pull, and can reposition the scanner with [`Scanner::set_position`] to
//! re-scan under the other mode.

use js_ir::Span;
use memchr::{memchr, memchr2};

use crate::cursor::Cursor;
use crate::LexError;

/// Coarse classification produced by the scanner.
///
/// Punctuators and keywords are both covered by `Punct`/`Ident` here; the
/// token adapter refines them to exact kinds by lexeme text.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum RawTag {
    Eof,
    Ident,
    Number,
    Str,
    Regex,
    Punct,
    LineComment,
    BlockComment,
}

/// A raw token with its span and line information.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct RawToken {
    pub tag: RawTag,
    pub span: Span,
    /// Line the token starts on (0-based).
    pub line: u32,
    /// Line the token ends on.
    pub end_line: u32,
    /// Whether a line terminator occurred between the previous raw token
    /// and this one.
    pub newline_before: bool,
}

/// Hand-written scanner over JavaScript source text.
pub struct Scanner<'a> {
    source: &'a str,
    cursor: Cursor<'a>,
    line: u32,
}

impl<'a> Scanner<'a> {
    /// Create a scanner at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            cursor: Cursor::new(source),
            line: 0,
        }
    }

    /// Reposition the scanner. `line` must be the 0-based line number of
    /// `offset` in the source; the caller re-scanning a token it already
    /// saw passes the token's recorded start line back in.
    pub fn set_position(&mut self, offset: u32, line: u32) {
        self.cursor.set_pos(offset);
        self.line = line;
    }

    /// Scan the next raw token.
    ///
    /// `regex_allowed` selects the interpretation of a leading `/` that is
    /// not a comment: `true` scans a regex literal, `false` a division
    /// punctuator.
    pub fn next_raw(&mut self, regex_allowed: bool) -> Result<RawToken, LexError> {
        let newline_before = self.skip_whitespace();
        let start = self.cursor.pos();
        let start_line = self.line;

        if self.cursor.is_eof() {
            return Ok(RawToken {
                tag: RawTag::Eof,
                span: Span::new(start, start),
                line: start_line,
                end_line: start_line,
                newline_before,
            });
        }

        let b = self.cursor.current();
        let tag = match b {
            b'/' if self.cursor.peek() == b'/' => self.scan_line_comment(),
            b'/' if self.cursor.peek() == b'*' => self.scan_block_comment(start)?,
            b'/' if regex_allowed => self.scan_regex(start)?,
            b'\'' | b'"' => self.scan_string(start)?,
            b'0'..=b'9' => self.scan_number(),
            b'.' if self.cursor.peek().is_ascii_digit() => self.scan_number(),
            c if is_ident_start(c) => self.scan_ident(),
            _ => self.scan_punct(start)?,
        };

        Ok(RawToken {
            tag,
            span: Span::new(start, self.cursor.pos()),
            line: start_line,
            end_line: self.line,
            newline_before,
        })
    }

    /// Skip whitespace and line terminators, returning whether at least
    /// one line terminator was crossed.
    fn skip_whitespace(&mut self) -> bool {
        let mut saw_newline = false;
        loop {
            match self.cursor.current() {
                b' ' | b'\t' | 0x0B | 0x0C => self.cursor.advance(),
                b'\r' => {
                    // \r\n counts once; the \n branch does the counting.
                    if self.cursor.peek() != b'\n' {
                        self.line += 1;
                        saw_newline = true;
                    }
                    self.cursor.advance();
                }
                b'\n' => {
                    self.line += 1;
                    saw_newline = true;
                    self.cursor.advance();
                }
                _ => break,
            }
        }
        saw_newline
    }

    fn scan_line_comment(&mut self) -> RawTag {
        self.cursor.advance_n(2);
        // Runs to the next line terminator (not consumed).
        match memchr2(b'\n', b'\r', self.cursor.rest()) {
            Some(idx) => self.cursor.advance_n(idx_u32(idx)),
            None => self.cursor.advance_n(idx_u32(self.cursor.rest().len())),
        }
        RawTag::LineComment
    }

    fn scan_block_comment(&mut self, start: u32) -> Result<RawTag, LexError> {
        self.cursor.advance_n(2);
        loop {
            let rest = self.cursor.rest();
            match memchr(b'*', rest) {
                None => return Err(LexError::UnterminatedComment { offset: start }),
                Some(idx) => {
                    self.line += count_line_terminators(&rest[..idx]);
                    self.cursor.advance_n(idx_u32(idx));
                    if self.cursor.peek() == b'/' {
                        self.cursor.advance_n(2);
                        return Ok(RawTag::BlockComment);
                    }
                    self.cursor.advance();
                }
            }
        }
    }

    fn scan_string(&mut self, start: u32) -> Result<RawTag, LexError> {
        let quote = self.cursor.current();
        self.cursor.advance();
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::UnterminatedString { offset: start });
            }
            match self.cursor.current() {
                b'\\' => {
                    self.cursor.advance();
                    // Escaped line terminator: legal line continuation.
                    match self.cursor.current() {
                        b'\r' => {
                            self.cursor.advance();
                            if self.cursor.current() == b'\n' {
                                self.cursor.advance();
                            }
                            self.line += 1;
                        }
                        b'\n' => {
                            self.cursor.advance();
                            self.line += 1;
                        }
                        _ => self.cursor.advance(),
                    }
                }
                b'\n' | b'\r' => {
                    return Err(LexError::UnterminatedString { offset: start });
                }
                c if c == quote => {
                    self.cursor.advance();
                    return Ok(RawTag::Str);
                }
                _ => self.cursor.advance(),
            }
        }
    }

    fn scan_number(&mut self) -> RawTag {
        if self.cursor.current() == b'0'
            && matches!(self.cursor.peek(), b'x' | b'X')
            && self.cursor.peek2().is_ascii_hexdigit()
        {
            self.cursor.advance_n(2);
            while self.cursor.current().is_ascii_hexdigit() {
                self.cursor.advance();
            }
            return RawTag::Number;
        }

        while self.cursor.current().is_ascii_digit() {
            self.cursor.advance();
        }
        if self.cursor.current() == b'.' {
            self.cursor.advance();
            while self.cursor.current().is_ascii_digit() {
                self.cursor.advance();
            }
        }
        if matches!(self.cursor.current(), b'e' | b'E') {
            if self.cursor.peek().is_ascii_digit() {
                self.cursor.advance();
                while self.cursor.current().is_ascii_digit() {
                    self.cursor.advance();
                }
            } else if matches!(self.cursor.peek(), b'+' | b'-')
                && self.cursor.peek2().is_ascii_digit()
            {
                self.cursor.advance_n(2);
                while self.cursor.current().is_ascii_digit() {
                    self.cursor.advance();
                }
            }
        }
        RawTag::Number
    }

    fn scan_ident(&mut self) -> RawTag {
        while is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }
        RawTag::Ident
    }

    fn scan_regex(&mut self, start: u32) -> Result<RawTag, LexError> {
        self.cursor.advance();
        let mut in_class = false;
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::UnterminatedRegex { offset: start });
            }
            match self.cursor.current() {
                b'\\' => {
                    self.cursor.advance();
                    if matches!(self.cursor.current(), b'\n' | b'\r') {
                        return Err(LexError::UnterminatedRegex { offset: start });
                    }
                    self.cursor.advance();
                }
                b'[' => {
                    in_class = true;
                    self.cursor.advance();
                }
                b']' => {
                    in_class = false;
                    self.cursor.advance();
                }
                b'/' if !in_class => {
                    self.cursor.advance();
                    break;
                }
                b'\n' | b'\r' => {
                    return Err(LexError::UnterminatedRegex { offset: start });
                }
                _ => self.cursor.advance(),
            }
        }
        // Flags
        while is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }
        Ok(RawTag::Regex)
    }

    fn scan_punct(&mut self, start: u32) -> Result<RawTag, LexError> {
        match punct_len(self.cursor.rest()) {
            Some(len) => {
                self.cursor.advance_n(len);
                Ok(RawTag::Punct)
            }
            None => {
                let lexeme = self.source[start as usize..]
                    .chars()
                    .next()
                    .unwrap_or('\u{FFFD}')
                    .to_string();
                Err(LexError::UnknownLexeme {
                    lexeme,
                    offset: start,
                })
            }
        }
    }
}

/// Maximal-munch length of the punctuator at the head of `rest`.
fn punct_len(rest: &[u8]) -> Option<u32> {
    if rest.starts_with(b">>>=") {
        return Some(4);
    }
    for three in [&b"==="[..], b"!==", b">>>", b"<<=", b">>="] {
        if rest.starts_with(three) {
            return Some(3);
        }
    }
    for two in [
        &b"=="[..],
        b"!=",
        b"<=",
        b">=",
        b"&&",
        b"||",
        b"++",
        b"--",
        b"<<",
        b">>",
        b"+=",
        b"-=",
        b"*=",
        b"%=",
        b"&=",
        b"|=",
        b"^=",
        b"/=",
    ] {
        if rest.starts_with(two) {
            return Some(2);
        }
    }
    match rest.first() {
        Some(
            b'{' | b'}' | b'(' | b')' | b'[' | b']' | b';' | b',' | b'.' | b'<' | b'>' | b'+'
            | b'-' | b'*' | b'/' | b'%' | b'&' | b'|' | b'^' | b'!' | b'~' | b'?' | b':' | b'=',
        ) => Some(1),
        _ => None,
    }
}

/// Count line terminators in a byte slice (`\n`, plus `\r` not followed by
/// `\n`).
fn count_line_terminators(bytes: &[u8]) -> u32 {
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => count += 1,
            b'\r' => {
                if bytes.get(i + 1) != Some(&b'\n') {
                    count += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    count
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

#[inline]
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

#[inline]
#[expect(
    clippy::cast_possible_truncation,
    reason = "source length is bounded by u32 spans"
)]
fn idx_u32(idx: usize) -> u32 {
    idx as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect(source: &str) -> Vec<RawToken> {
        let mut scanner = Scanner::new(source);
        let mut out = Vec::new();
        loop {
            let tok = match scanner.next_raw(false) {
                Ok(tok) => tok,
                Err(err) => panic!("scan error: {err}"),
            };
            let done = tok.tag == RawTag::Eof;
            out.push(tok);
            if done {
                break;
            }
        }
        out
    }

    fn tags(source: &str) -> Vec<RawTag> {
        collect(source).iter().map(|t| t.tag).collect()
    }

    #[test]
    fn test_basic_stream() {
        assert_eq!(
            tags("var x = 1;"),
            vec![
                RawTag::Ident,
                RawTag::Ident,
                RawTag::Punct,
                RawTag::Number,
                RawTag::Punct,
                RawTag::Eof,
            ]
        );
    }

    #[test]
    fn test_spans_and_lines() {
        let tokens = collect("a\n  bb");
        assert_eq!(tokens[0].span, Span::new(0, 1));
        assert_eq!(tokens[0].line, 0);
        assert!(!tokens[0].newline_before);
        assert_eq!(tokens[1].span, Span::new(4, 6));
        assert_eq!(tokens[1].line, 1);
        assert!(tokens[1].newline_before);
    }

    #[test]
    fn test_crlf_counts_one_line() {
        let tokens = collect("a\r\nb");
        assert_eq!(tokens[1].line, 1);
        assert!(tokens[1].newline_before);
    }

    #[test]
    fn test_division_vs_regex() {
        let mut scanner = Scanner::new("/ab/g");
        let tok = match scanner.next_raw(false) {
            Ok(tok) => tok,
            Err(err) => panic!("{err}"),
        };
        assert_eq!(tok.tag, RawTag::Punct);
        assert_eq!(tok.span, Span::new(0, 1));

        scanner.set_position(0, 0);
        let tok = match scanner.next_raw(true) {
            Ok(tok) => tok,
            Err(err) => panic!("{err}"),
        };
        assert_eq!(tok.tag, RawTag::Regex);
        assert_eq!(tok.span, Span::new(0, 5));
    }

    #[test]
    fn test_regex_character_class() {
        let tokens = collect_regex("/[/]/");
        assert_eq!(tokens[0].tag, RawTag::Regex);
        assert_eq!(tokens[0].span, Span::new(0, 5));
    }

    fn collect_regex(source: &str) -> Vec<RawToken> {
        let mut scanner = Scanner::new(source);
        let mut out = Vec::new();
        loop {
            let tok = match scanner.next_raw(true) {
                Ok(tok) => tok,
                Err(err) => panic!("scan error: {err}"),
            };
            let done = tok.tag == RawTag::Eof;
            out.push(tok);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn test_line_comment_stops_before_newline() {
        let tokens = collect("a // tail\nb");
        assert_eq!(tokens[1].tag, RawTag::LineComment);
        assert_eq!(tokens[1].span, Span::new(2, 9));
        assert_eq!(tokens[2].line, 1);
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let tokens = collect("/* a\n b */ x");
        assert_eq!(tokens[0].tag, RawTag::BlockComment);
        assert_eq!(tokens[0].line, 0);
        assert_eq!(tokens[0].end_line, 1);
        assert_eq!(tokens[1].line, 1);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let mut scanner = Scanner::new("/* never closed");
        assert_eq!(
            scanner.next_raw(false),
            Err(LexError::UnterminatedComment { offset: 0 })
        );
    }

    #[test]
    fn test_string_with_escapes() {
        let tokens = collect(r#"'a\'b' "c\"d""#);
        assert_eq!(tokens[0].tag, RawTag::Str);
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].tag, RawTag::Str);
    }

    #[test]
    fn test_string_line_continuation() {
        let tokens = collect("'a\\\nb' c");
        assert_eq!(tokens[0].tag, RawTag::Str);
        assert_eq!(tokens[0].end_line, 1);
        assert_eq!(tokens[1].line, 1);
    }

    #[test]
    fn test_unterminated_string() {
        let mut scanner = Scanner::new("'oops\nnext");
        assert_eq!(
            scanner.next_raw(false),
            Err(LexError::UnterminatedString { offset: 0 })
        );
    }

    #[test]
    fn test_number_shapes() {
        for source in ["42", "0x1f", ".5", "1.25", "1e9", "1.5e-3", "2E+8"] {
            let tokens = collect(source);
            assert_eq!(tokens[0].tag, RawTag::Number, "source {source:?}");
            assert_eq!(
                tokens[0].span,
                Span::new(0, idx_u32(source.len())),
                "source {source:?}"
            );
        }
    }

    #[test]
    fn test_number_then_dot_member() {
        // `1..toString` is a number `1.` followed by `.` and an identifier.
        assert_eq!(
            tags("1..toString"),
            vec![RawTag::Number, RawTag::Punct, RawTag::Ident, RawTag::Eof]
        );
    }

    #[test]
    fn test_punct_maximal_munch() {
        let tokens = collect(">>>= >>> >> >");
        let lens: Vec<u32> = tokens.iter().map(|t| t.span.len()).collect();
        assert_eq!(lens, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_unknown_lexeme() {
        let mut scanner = Scanner::new("a # b");
        let first = scanner.next_raw(false);
        assert!(first.is_ok());
        assert_eq!(
            scanner.next_raw(false),
            Err(LexError::UnknownLexeme {
                lexeme: "#".to_string(),
                offset: 2,
            })
        );
    }

    #[test]
    fn test_dollar_and_unicode_identifiers() {
        assert_eq!(tags("$x _y zé"), vec![
            RawTag::Ident,
            RawTag::Ident,
            RawTag::Ident,
            RawTag::Eof,
        ]);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_identifier_scans_as_single_token(
            input in "[A-Za-z_$][A-Za-z0-9_$]{0,24}",
        ) {
            let mut scanner = Scanner::new(&input);
            let expected = RawToken {
                tag: RawTag::Ident,
                span: Span::new(0, idx_u32(input.len())),
                line: 0,
                end_line: 0,
                newline_before: false,
            };
            prop_assert_eq!(scanner.next_raw(false), Ok(expected));
        }

        #[test]
        fn prop_line_comment_never_swallows_next_line(
            body in "[ -~]{0,30}",
            next in "[a-z]{1,8}",
        ) {
            let source = format!("//{body}\n{next}");
            let mut scanner = Scanner::new(&source);
            let comment = scanner.next_raw(false);
            let comment_ok = matches!(
                comment,
                Ok(RawToken { tag: RawTag::LineComment, .. })
            );
            prop_assert!(comment_ok);
            let ident = scanner.next_raw(false);
            let ident_ok = matches!(
                ident,
                Ok(RawToken { tag: RawTag::Ident, line: 1, newline_before: true, .. })
            );
            prop_assert!(ident_ok);
        }
    }
}
