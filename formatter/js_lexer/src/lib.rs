//! Lexical scanner and token adapter for the jsfmt formatter.
//!
//! Two layers, consumed bottom-up:
//!
//! - [`Scanner`]: a hand-written byte scanner producing [`RawToken`]s with
//!   a coarse tag (identifier, number, string, regex, punctuator, comment)
//!   and exact byte spans. `/` is context-sensitive in JavaScript
//!   (division operator vs start of a regex literal), so every pull takes
//!   a `regex_allowed` flag and the cursor is resumable via
//!   [`Scanner::set_position`] for the rare re-scan.
//! - [`TokenStream`]: the token adapter. It pulls raw tokens, attaches
//!   leading comments to the next real token, and classifies the kind by a
//!   two-stage lookup: the scanner's tag first, then exact lexeme text for
//!   punctuators and the full keyword set. A lexeme neither stage can
//!   classify is a fatal [`LexError::UnknownLexeme`] — never a silent
//!   default, since the formatter's grammar decisions are kind-driven.

mod cursor;
mod lex_error;
mod scanner;
mod token_stream;

pub use cursor::Cursor;
pub use lex_error::LexError;
pub use scanner::{RawTag, RawToken, Scanner};
pub use token_stream::TokenStream;
