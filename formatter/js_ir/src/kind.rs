//! Token kinds for the JavaScript formatter.

use std::fmt;

/// The closed set of token kinds the formatter dispatches on.
///
/// Kinds carry no payload: the token's text is always recovered by slicing
/// the original source with the token's span, so there is nothing to intern.
///
/// Operator precedence is deliberately *not* encoded in the declaration
/// order of this enum; the grammar walker owns an explicit kind → tier
/// lookup instead, so reordering variants here can never silently change
/// parsing behavior.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Identifier: `foo`, `$elem`, `_tmp`
    Identifier,
    /// Numeric literal: `42`, `0x1f`, `.5`, `1e9`
    Number,
    /// String literal: `'a'`, `"b"`
    String,
    /// Regular expression literal: `/ab+c/gi`
    Regex,

    // Keywords
    Break,
    Case,
    Catch,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    False,
    Finally,
    For,
    Function,
    If,
    In,
    InstanceOf,
    New,
    Null,
    Return,
    Switch,
    This,
    Throw,
    True,
    Try,
    TypeOf,
    Var,
    Void,
    While,
    With,

    // Punctuators
    LBrace,     // {
    RBrace,     // }
    LParen,     // (
    RParen,     // )
    LBracket,   // [
    RBracket,   // ]
    Semicolon,  // ;
    Comma,      // ,
    Dot,        // .
    Lt,         // <
    Gt,         // >
    LtEq,       // <=
    GtEq,       // >=
    EqEq,       // ==
    NotEq,      // !=
    EqEqEq,     // ===
    NotEqEq,    // !==
    Plus,       // +
    Minus,      // -
    Star,       // *
    Percent,    // %
    PlusPlus,   // ++
    MinusMinus, // --
    Shl,        // <<
    Shr,        // >>
    UShr,       // >>>
    Amp,        // &
    Pipe,       // |
    Caret,      // ^
    Bang,       // !
    Tilde,      // ~
    AmpAmp,     // &&
    PipePipe,   // ||
    Question,   // ?
    Colon,      // :
    Eq,         // =
    PlusEq,     // +=
    MinusEq,    // -=
    StarEq,     // *=
    PercentEq,  // %=
    ShlEq,      // <<=
    ShrEq,      // >>=
    UShrEq,     // >>>=
    AmpEq,      // &=
    PipeEq,     // |=
    CaretEq,    // ^=
    Slash,      // /
    SlashEq,    // /=

    Eof,
}

impl TokenKind {
    /// Human-readable name for diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number literal",
            TokenKind::String => "string literal",
            TokenKind::Regex => "regular expression literal",
            TokenKind::Eof => "end of input",
            TokenKind::Break => "`break`",
            TokenKind::Case => "`case`",
            TokenKind::Catch => "`catch`",
            TokenKind::Const => "`const`",
            TokenKind::Continue => "`continue`",
            TokenKind::Debugger => "`debugger`",
            TokenKind::Default => "`default`",
            TokenKind::Delete => "`delete`",
            TokenKind::Do => "`do`",
            TokenKind::Else => "`else`",
            TokenKind::False => "`false`",
            TokenKind::Finally => "`finally`",
            TokenKind::For => "`for`",
            TokenKind::Function => "`function`",
            TokenKind::If => "`if`",
            TokenKind::In => "`in`",
            TokenKind::InstanceOf => "`instanceof`",
            TokenKind::New => "`new`",
            TokenKind::Null => "`null`",
            TokenKind::Return => "`return`",
            TokenKind::Switch => "`switch`",
            TokenKind::This => "`this`",
            TokenKind::Throw => "`throw`",
            TokenKind::True => "`true`",
            TokenKind::Try => "`try`",
            TokenKind::TypeOf => "`typeof`",
            TokenKind::Var => "`var`",
            TokenKind::Void => "`void`",
            TokenKind::While => "`while`",
            TokenKind::With => "`with`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::Dot => "`.`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::LtEq => "`<=`",
            TokenKind::GtEq => "`>=`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::EqEqEq => "`===`",
            TokenKind::NotEqEq => "`!==`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Percent => "`%`",
            TokenKind::PlusPlus => "`++`",
            TokenKind::MinusMinus => "`--`",
            TokenKind::Shl => "`<<`",
            TokenKind::Shr => "`>>`",
            TokenKind::UShr => "`>>>`",
            TokenKind::Amp => "`&`",
            TokenKind::Pipe => "`|`",
            TokenKind::Caret => "`^`",
            TokenKind::Bang => "`!`",
            TokenKind::Tilde => "`~`",
            TokenKind::AmpAmp => "`&&`",
            TokenKind::PipePipe => "`||`",
            TokenKind::Question => "`?`",
            TokenKind::Colon => "`:`",
            TokenKind::Eq => "`=`",
            TokenKind::PlusEq => "`+=`",
            TokenKind::MinusEq => "`-=`",
            TokenKind::StarEq => "`*=`",
            TokenKind::PercentEq => "`%=`",
            TokenKind::ShlEq => "`<<=`",
            TokenKind::ShrEq => "`>>=`",
            TokenKind::UShrEq => "`>>>=`",
            TokenKind::AmpEq => "`&=`",
            TokenKind::PipeEq => "`|=`",
            TokenKind::CaretEq => "`^=`",
            TokenKind::Slash => "`/`",
            TokenKind::SlashEq => "`/=`",
        }
    }

    /// Check if this kind is a keyword.
    #[inline]
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Break
                | TokenKind::Case
                | TokenKind::Catch
                | TokenKind::Const
                | TokenKind::Continue
                | TokenKind::Debugger
                | TokenKind::Default
                | TokenKind::Delete
                | TokenKind::Do
                | TokenKind::Else
                | TokenKind::False
                | TokenKind::Finally
                | TokenKind::For
                | TokenKind::Function
                | TokenKind::If
                | TokenKind::In
                | TokenKind::InstanceOf
                | TokenKind::New
                | TokenKind::Null
                | TokenKind::Return
                | TokenKind::Switch
                | TokenKind::This
                | TokenKind::Throw
                | TokenKind::True
                | TokenKind::Try
                | TokenKind::TypeOf
                | TokenKind::Var
                | TokenKind::Void
                | TokenKind::While
                | TokenKind::With
        )
    }

    /// Check if this kind is an assignment operator (`=` and compounds).
    #[inline]
    pub fn is_assignment_op(self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::PercentEq
                | TokenKind::ShlEq
                | TokenKind::ShrEq
                | TokenKind::UShrEq
                | TokenKind::AmpEq
                | TokenKind::PipeEq
                | TokenKind::CaretEq
                | TokenKind::SlashEq
        )
    }

    /// Check if this kind is a symbolic unary prefix operator.
    ///
    /// Word operators (`delete`, `typeof`, `void`) are deliberately not in
    /// this set; they need a separating space after them.
    #[inline]
    pub fn is_unary_op(self) -> bool {
        matches!(
            self,
            TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Tilde
                | TokenKind::Bang
        )
    }

    /// Check if this kind is a word unary prefix operator.
    #[inline]
    pub fn is_word_unary_op(self) -> bool {
        matches!(
            self,
            TokenKind::Delete | TokenKind::TypeOf | TokenKind::Void
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
