//! Operator precedence lookup.
//!
//! Precedence tiers are an explicit kind → tier table rather than numeric
//! ranges over the kind enumeration's declaration order, so reordering
//! the kind set can never silently change how expressions parse.

use js_ir::TokenKind;

/// Precedence tier of a binary operator kind; higher binds tighter.
///
/// Returns `None` for non-operators, and for `in` when `no_in` suppresses
/// it (the init clause of a `for` head).
pub(super) fn binary_precedence(kind: TokenKind, no_in: bool) -> Option<u8> {
    let tier = match kind {
        TokenKind::PipePipe => 1,
        TokenKind::AmpAmp => 2,
        TokenKind::Pipe => 3,
        TokenKind::Caret => 4,
        TokenKind::Amp => 5,
        TokenKind::EqEq | TokenKind::NotEq | TokenKind::EqEqEq | TokenKind::NotEqEq => 6,
        TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq
        | TokenKind::InstanceOf => 7,
        TokenKind::In if !no_in => 7,
        TokenKind::Shl | TokenKind::Shr | TokenKind::UShr => 8,
        TokenKind::Plus | TokenKind::Minus => 9,
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => 10,
        _ => return None,
    };
    Some(tier)
}
