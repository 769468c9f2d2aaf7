//! Expression-level grammar walking.
//!
//! Binary operators are handled by precedence climbing over the explicit
//! kind → tier table in [`super::operators`]; member/call/index chains by
//! a single iterative postfix loop, so chain length never costs stack
//! depth. Binary and assignment operators get spaces on both sides; unary
//! prefix operators abut their operand, except the word operators
//! (`delete`, `typeof`, `void`), which need a separating space.

use js_ir::TokenKind;

use super::operators::binary_precedence;
use super::Formatter;
use crate::FormatError;

impl Formatter<'_> {
    /// Full expression, comma operator included.
    ///
    /// `no_in` suppresses the `in` operator for a `for`-statement head;
    /// it propagates through every level that can reach a binary parse.
    pub(super) fn parse_expression(&mut self, no_in: bool) -> Result<(), FormatError> {
        self.parse_assignment(no_in)?;
        while self.peek_kind()? == TokenKind::Comma {
            self.emit()?;
            self.builder.add_space();
            self.parse_assignment(no_in)?;
        }
        Ok(())
    }

    /// Assignment expression; right-associative over the whole
    /// assignment-operator set.
    pub(super) fn parse_assignment(&mut self, no_in: bool) -> Result<(), FormatError> {
        self.parse_conditional(no_in)?;
        if self.peek_kind()?.is_assignment_op() {
            self.builder.add_space();
            self.emit()?;
            self.builder.add_space();
            self.parse_assignment(no_in)?;
        }
        Ok(())
    }

    /// Conditional `? :`. The true branch always allows `in` again (it is
    /// parenthesized by the `?`/`:` pair); the else branch keeps `no_in`.
    fn parse_conditional(&mut self, no_in: bool) -> Result<(), FormatError> {
        self.parse_binary(0, no_in)?;
        if self.peek_kind()? == TokenKind::Question {
            self.builder.add_space();
            self.emit()?;
            self.builder.add_space();
            self.parse_assignment(false)?;
            self.builder.add_space();
            self.expect(TokenKind::Colon)?;
            self.builder.add_space();
            self.parse_assignment(no_in)?;
        }
        Ok(())
    }

    /// Precedence climbing: consume operators while the peeked kind's
    /// tier stays at or above `min_tier`, recursing one tier tighter for
    /// the right operand (left associativity).
    fn parse_binary(&mut self, min_tier: u8, no_in: bool) -> Result<(), FormatError> {
        self.parse_unary()?;
        loop {
            let kind = self.peek_kind()?;
            let Some(tier) = binary_precedence(kind, no_in) else {
                break;
            };
            if tier < min_tier {
                break;
            }
            self.builder.add_space();
            self.emit()?;
            self.builder.add_space();
            self.parse_binary(tier + 1, no_in)?;
        }
        Ok(())
    }

    fn parse_unary(&mut self) -> Result<(), FormatError> {
        let kind = self.peek_kind()?;
        if kind.is_word_unary_op() {
            self.emit()?;
            self.builder.add_space();
            self.parse_unary()
        } else if kind.is_unary_op() {
            self.emit()?;
            self.parse_unary()
        } else {
            self.parse_postfix()
        }
    }

    fn parse_postfix(&mut self) -> Result<(), FormatError> {
        self.parse_member_or_call()?;
        while matches!(
            self.peek_kind()?,
            TokenKind::PlusPlus | TokenKind::MinusMinus
        ) {
            self.emit()?;
        }
        Ok(())
    }

    /// Unified postfix loop: any sequence of `[...]` indexing, `(...)`
    /// argument lists, and `.name` member access, in any order and any
    /// repetition. Iterative on purpose — the grammar's member/call
    /// production is left-recursive, and a loop matches it without stack
    /// growth proportional to the chain.
    fn parse_member_or_call(&mut self) -> Result<(), FormatError> {
        while self.peek_kind()? == TokenKind::New {
            self.emit()?;
            self.builder.add_space();
        }
        self.parse_primary()?;
        loop {
            match self.peek_kind()? {
                TokenKind::Dot => {
                    self.emit()?;
                    self.expect_member_name()?;
                }
                TokenKind::LBracket => {
                    self.emit()?;
                    self.parse_expression(false)?;
                    self.expect(TokenKind::RBracket)?;
                }
                TokenKind::LParen => self.parse_arguments()?,
                _ => break,
            }
        }
        Ok(())
    }

    /// Member name after `.`: an IdentifierName, so keywords are fine.
    fn expect_member_name(&mut self) -> Result<(), FormatError> {
        let kind = self.peek_kind()?;
        if kind == TokenKind::Identifier || kind.is_keyword() {
            self.emit()
        } else {
            Err(self.unexpected("property name"))
        }
    }

    fn parse_arguments(&mut self) -> Result<(), FormatError> {
        self.expect(TokenKind::LParen)?;
        if self.peek_kind()? != TokenKind::RParen {
            loop {
                self.parse_assignment(false)?;
                if self.peek_kind()? == TokenKind::Comma {
                    self.emit()?;
                    self.builder.add_space();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)
    }

    /// Primary expression — the one grammar position where `/` starts a
    /// regex literal, so the lookahead here is pulled under regex mode.
    fn parse_primary(&mut self) -> Result<(), FormatError> {
        match self.peek_kind_regex()? {
            TokenKind::This
            | TokenKind::Null
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::Regex
            | TokenKind::Identifier => {
                self.emit_next(true)?;
                Ok(())
            }
            TokenKind::LParen => {
                self.emit_next(true)?;
                self.parse_expression(false)?;
                self.expect(TokenKind::RParen)
            }
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::Function => self.parse_function_expression(),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Array literal, elisions tolerated: an empty slot between commas
    /// produces no expression and is simply skipped.
    fn parse_array_literal(&mut self) -> Result<(), FormatError> {
        self.expect(TokenKind::LBracket)?;
        loop {
            match self.peek_kind()? {
                TokenKind::RBracket => break,
                TokenKind::Comma => {
                    self.emit()?;
                    if self.peek_kind()? != TokenKind::RBracket {
                        self.builder.add_space();
                    }
                }
                _ => {
                    self.parse_assignment(false)?;
                    if self.peek_kind()? == TokenKind::Comma {
                        self.emit()?;
                        if self.peek_kind()? != TokenKind::RBracket {
                            self.builder.add_space();
                        }
                    } else {
                        break;
                    }
                }
            }
        }
        self.expect(TokenKind::RBracket)
    }

    fn parse_object_literal(&mut self) -> Result<(), FormatError> {
        self.expect(TokenKind::LBrace)?;
        if self.peek_kind()? != TokenKind::RBrace {
            loop {
                self.parse_property()?;
                if self.peek_kind()? == TokenKind::Comma {
                    self.emit()?;
                    if self.peek_kind()? == TokenKind::RBrace {
                        break;
                    }
                    self.builder.add_space();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RBrace)
    }

    /// One object-literal property: `name: value`, or a `get`/`set`
    /// accessor. The identifier `get`/`set` followed by anything other
    /// than `:` introduces an accessor method rather than a property
    /// named "get"/"set" — decided after consuming it, which is all one
    /// token of lookahead allows.
    fn parse_property(&mut self) -> Result<(), FormatError> {
        self.check_property_name()?;
        let name = self.emit_next(false)?;
        let accessor = name.kind == TokenKind::Identifier
            && matches!(self.text(&name), "get" | "set")
            && self.peek_kind()? != TokenKind::Colon;
        if accessor {
            self.builder.add_space();
            self.check_property_name()?;
            self.emit()?;
            self.expect(TokenKind::LParen)?;
            self.parse_parameters()?;
            self.expect(TokenKind::RParen)?;
            self.builder.add_space();
            self.parse_block()
        } else {
            self.expect(TokenKind::Colon)?;
            self.builder.add_space();
            self.parse_assignment(false)
        }
    }

    /// Property names are IdentifierName, string, or number literals.
    fn check_property_name(&mut self) -> Result<(), FormatError> {
        let kind = self.peek_kind()?;
        if matches!(
            kind,
            TokenKind::Identifier | TokenKind::String | TokenKind::Number
        ) || kind.is_keyword()
        {
            Ok(())
        } else {
            Err(self.unexpected("property name"))
        }
    }

    fn parse_function_expression(&mut self) -> Result<(), FormatError> {
        self.emit()?; // function
        if self.peek_kind()? == TokenKind::Identifier {
            self.builder.add_space();
            self.emit()?;
        }
        self.expect(TokenKind::LParen)?;
        self.parse_parameters()?;
        self.expect(TokenKind::RParen)?;
        self.builder.add_space();
        self.parse_block()
    }

    pub(super) fn parse_parameters(&mut self) -> Result<(), FormatError> {
        while self.peek_kind()? == TokenKind::Identifier {
            self.emit()?;
            if self.peek_kind()? == TokenKind::Comma {
                self.emit()?;
                self.builder.add_space();
            } else {
                break;
            }
        }
        Ok(())
    }
}
