//! Token adapter: raw scanner output → classified tokens.
//!
//! Wraps the scanner and normalizes its heterogeneous raw tokens into the
//! closed [`TokenKind`] set. Classification is a two-stage lookup: the
//! scanner's own tag first (end-of-input, identifier, number, string,
//! regex), then exact lexeme text for punctuators and the keyword set.
//! Leading comments are accumulated and attached to the next real token.

use js_ir::{Comment, CommentStyle, Token, TokenKind};

use crate::scanner::{RawTag, RawToken, Scanner};
use crate::LexError;

/// Pull-based stream of classified tokens.
pub struct TokenStream<'a> {
    source: &'a str,
    scanner: Scanner<'a>,
}

impl<'a> TokenStream<'a> {
    /// Create a token stream over `source`.
    pub fn new(source: &'a str) -> Self {
        TokenStream {
            source,
            scanner: Scanner::new(source),
        }
    }

    /// The source text this stream reads from.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Pull the next token, attaching any leading comments.
    ///
    /// `force_regex` is the grammar's `/`-disambiguation hint: the parser
    /// passes `true` when the next token sits in primary-expression
    /// position, where `/` starts a regex literal rather than a division
    /// operator.
    ///
    /// The produced token's `newline_before` flag is true when any line
    /// terminator occurred between the previous real token and this one,
    /// including gaps around the attached comments.
    pub fn next(&mut self, force_regex: bool) -> Result<Token, LexError> {
        let mut comments = Vec::new();
        let mut newline_before = false;

        loop {
            let raw = self.scanner.next_raw(force_regex)?;
            newline_before |= raw.newline_before;
            match raw.tag {
                RawTag::LineComment => {
                    comments.push(Comment::new(
                        raw.span,
                        raw.line,
                        raw.end_line,
                        CommentStyle::Line,
                    ));
                }
                RawTag::BlockComment => {
                    comments.push(Comment::new(
                        raw.span,
                        raw.line,
                        raw.end_line,
                        CommentStyle::Block,
                    ));
                }
                _ => {
                    let kind = self.classify(&raw)?;
                    return Ok(Token {
                        kind,
                        span: raw.span,
                        start_line: raw.line,
                        end_line: raw.end_line,
                        newline_before,
                        comments,
                    });
                }
            }
        }
    }

    /// Reposition the underlying scanner, for re-scanning a token under
    /// the other `/`-disambiguation mode.
    pub fn set_position(&mut self, offset: u32, line: u32) {
        self.scanner.set_position(offset, line);
    }

    /// Classify a raw token's kind.
    ///
    /// Stage one is the scanner's tag; stage two is exact lexeme text for
    /// identifiers (keyword set) and punctuators. An unclassifiable lexeme
    /// is fatal — a silent default kind would corrupt every grammar
    /// decision downstream.
    fn classify(&self, raw: &RawToken) -> Result<TokenKind, LexError> {
        let kind = match raw.tag {
            RawTag::Eof => TokenKind::Eof,
            RawTag::Number => TokenKind::Number,
            RawTag::Str => TokenKind::String,
            RawTag::Regex => TokenKind::Regex,
            RawTag::Ident => {
                let text = &self.source[raw.span.to_range()];
                keyword_kind(text).unwrap_or(TokenKind::Identifier)
            }
            RawTag::Punct => {
                let text = &self.source[raw.span.to_range()];
                match punct_kind(text) {
                    Some(kind) => kind,
                    None => {
                        return Err(LexError::UnknownLexeme {
                            lexeme: text.to_string(),
                            offset: raw.span.start,
                        });
                    }
                }
            }
            RawTag::LineComment | RawTag::BlockComment => {
                unreachable!("comments are attached, never classified")
            }
        };
        Ok(kind)
    }
}

/// Keyword lookup by exact lexeme.
fn keyword_kind(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "break" => TokenKind::Break,
        "case" => TokenKind::Case,
        "catch" => TokenKind::Catch,
        "const" => TokenKind::Const,
        "continue" => TokenKind::Continue,
        "debugger" => TokenKind::Debugger,
        "default" => TokenKind::Default,
        "delete" => TokenKind::Delete,
        "do" => TokenKind::Do,
        "else" => TokenKind::Else,
        "false" => TokenKind::False,
        "finally" => TokenKind::Finally,
        "for" => TokenKind::For,
        "function" => TokenKind::Function,
        "if" => TokenKind::If,
        "in" => TokenKind::In,
        "instanceof" => TokenKind::InstanceOf,
        "new" => TokenKind::New,
        "null" => TokenKind::Null,
        "return" => TokenKind::Return,
        "switch" => TokenKind::Switch,
        "this" => TokenKind::This,
        "throw" => TokenKind::Throw,
        "true" => TokenKind::True,
        "try" => TokenKind::Try,
        "typeof" => TokenKind::TypeOf,
        "var" => TokenKind::Var,
        "void" => TokenKind::Void,
        "while" => TokenKind::While,
        "with" => TokenKind::With,
        _ => return None,
    };
    Some(kind)
}

/// Punctuator lookup by exact lexeme.
fn punct_kind(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "{" => TokenKind::LBrace,
        "}" => TokenKind::RBrace,
        "(" => TokenKind::LParen,
        ")" => TokenKind::RParen,
        "[" => TokenKind::LBracket,
        "]" => TokenKind::RBracket,
        ";" => TokenKind::Semicolon,
        "," => TokenKind::Comma,
        "." => TokenKind::Dot,
        "<" => TokenKind::Lt,
        ">" => TokenKind::Gt,
        "<=" => TokenKind::LtEq,
        ">=" => TokenKind::GtEq,
        "==" => TokenKind::EqEq,
        "!=" => TokenKind::NotEq,
        "===" => TokenKind::EqEqEq,
        "!==" => TokenKind::NotEqEq,
        "+" => TokenKind::Plus,
        "-" => TokenKind::Minus,
        "*" => TokenKind::Star,
        "%" => TokenKind::Percent,
        "++" => TokenKind::PlusPlus,
        "--" => TokenKind::MinusMinus,
        "<<" => TokenKind::Shl,
        ">>" => TokenKind::Shr,
        ">>>" => TokenKind::UShr,
        "&" => TokenKind::Amp,
        "|" => TokenKind::Pipe,
        "^" => TokenKind::Caret,
        "!" => TokenKind::Bang,
        "~" => TokenKind::Tilde,
        "&&" => TokenKind::AmpAmp,
        "||" => TokenKind::PipePipe,
        "?" => TokenKind::Question,
        ":" => TokenKind::Colon,
        "=" => TokenKind::Eq,
        "+=" => TokenKind::PlusEq,
        "-=" => TokenKind::MinusEq,
        "*=" => TokenKind::StarEq,
        "%=" => TokenKind::PercentEq,
        "<<=" => TokenKind::ShlEq,
        ">>=" => TokenKind::ShrEq,
        ">>>=" => TokenKind::UShrEq,
        "&=" => TokenKind::AmpEq,
        "|=" => TokenKind::PipeEq,
        "^=" => TokenKind::CaretEq,
        "/" => TokenKind::Slash,
        "/=" => TokenKind::SlashEq,
        _ => return None,
    };
    Some(kind)
}
