//! Statement-level grammar walking.
//!
//! One procedure per statement shape, dispatched on the lookahead kind.
//! Trailing semicolons are consumed where the grammar makes them optional
//! but never synthesized when absent: the formatter is lexically faithful
//! and only re-derives whitespace.

use js_ir::TokenKind;
use tracing::trace;

use super::Formatter;
use crate::FormatError;

impl Formatter<'_> {
    /// Dispatch one statement by its leading token kind.
    pub(super) fn parse_statement(&mut self) -> Result<(), FormatError> {
        let kind = self.peek_kind()?;
        trace!(?kind, "statement");
        match kind {
            TokenKind::LBrace => {
                self.parse_block()?;
                self.builder.request_newline();
                Ok(())
            }
            TokenKind::Var | TokenKind::Const => self.parse_variable_statement(),
            TokenKind::Semicolon => {
                self.emit()?;
                self.builder.request_newline();
                Ok(())
            }
            TokenKind::If => self.parse_if(),
            TokenKind::Do => self.parse_do_while(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Continue | TokenKind::Break | TokenKind::Return => self.parse_jump(kind),
            TokenKind::With => self.parse_with(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::Throw => self.parse_throw(),
            TokenKind::Try => self.parse_try(),
            TokenKind::Function => self.parse_function_declaration(),
            TokenKind::Debugger => {
                self.emit()?;
                self.finish_statement()
            }
            _ => self.parse_expression_or_labelled_statement(),
        }
    }

    /// Consume an optional statement terminator and request the break to
    /// the next statement.
    fn finish_statement(&mut self) -> Result<(), FormatError> {
        if self.peek_kind()? == TokenKind::Semicolon {
            self.emit()?;
        }
        self.builder.request_newline();
        Ok(())
    }

    /// `{ statements }` — the brace pair brackets one nesting level.
    pub(super) fn parse_block(&mut self) -> Result<(), FormatError> {
        self.expect(TokenKind::LBrace)?;
        self.builder.request_newline();
        self.builder.enter_block();
        while !matches!(self.peek_kind()?, TokenKind::RBrace | TokenKind::Eof) {
            self.parse_statement()?;
        }
        self.builder.exit_block();
        self.expect(TokenKind::RBrace)
    }

    /// Statement body of `if`/`while`/`for`/`do`/`with`: a braced block
    /// stays a block (space before `{`), a single statement is forced
    /// onto its own indented line so layout is uniform regardless of the
    /// author's brace choice. Returns whether the body was a block.
    fn parse_body(&mut self) -> Result<bool, FormatError> {
        if self.peek_kind()? == TokenKind::LBrace {
            self.builder.add_space();
            self.parse_block()?;
            Ok(true)
        } else {
            self.builder.request_newline();
            self.builder.enter_block();
            self.parse_statement()?;
            self.builder.exit_block();
            Ok(false)
        }
    }

    fn parse_variable_statement(&mut self) -> Result<(), FormatError> {
        self.emit()?; // var | const
        self.builder.add_space();
        self.parse_variable_declaration_list(false)?;
        self.finish_statement()
    }

    /// `x = init, y, z = init` — initializers are assignment expressions,
    /// so the list comma stays a list comma.
    fn parse_variable_declaration_list(&mut self, no_in: bool) -> Result<(), FormatError> {
        loop {
            self.expect(TokenKind::Identifier)?;
            if self.peek_kind()? == TokenKind::Eq {
                self.builder.add_space();
                self.emit()?;
                self.builder.add_space();
                self.parse_assignment(no_in)?;
            }
            if self.peek_kind()? == TokenKind::Comma {
                self.emit()?;
                self.builder.add_space();
            } else {
                return Ok(());
            }
        }
    }

    /// Dangling `else` associates with the nearest unmatched `if` simply
    /// because this parser consumes it greedily right here.
    fn parse_if(&mut self) -> Result<(), FormatError> {
        self.emit()?; // if
        self.builder.add_space();
        self.expect(TokenKind::LParen)?;
        self.parse_expression(false)?;
        self.expect(TokenKind::RParen)?;
        let was_block = self.parse_body()?;
        if self.peek_kind()? == TokenKind::Else {
            if was_block {
                self.builder.add_space();
            }
            // After a braceless body the pending break puts `else` on its
            // own line at the outer depth.
            self.emit()?; // else
            if self.peek_kind()? == TokenKind::If {
                self.builder.add_space();
                self.parse_if()
            } else if self.parse_body()? {
                self.builder.request_newline();
                Ok(())
            } else {
                Ok(())
            }
        } else {
            if was_block {
                self.builder.request_newline();
            }
            Ok(())
        }
    }

    fn parse_do_while(&mut self) -> Result<(), FormatError> {
        self.emit()?; // do
        if self.parse_body()? {
            self.builder.add_space();
        }
        self.expect(TokenKind::While)?;
        self.builder.add_space();
        self.expect(TokenKind::LParen)?;
        self.parse_expression(false)?;
        self.expect(TokenKind::RParen)?;
        self.finish_statement()
    }

    fn parse_while(&mut self) -> Result<(), FormatError> {
        self.emit()?; // while
        self.builder.add_space();
        self.expect(TokenKind::LParen)?;
        self.parse_expression(false)?;
        self.expect(TokenKind::RParen)?;
        if self.parse_body()? {
            self.builder.request_newline();
        }
        Ok(())
    }

    fn parse_with(&mut self) -> Result<(), FormatError> {
        self.emit()?; // with
        self.builder.add_space();
        self.expect(TokenKind::LParen)?;
        self.parse_expression(false)?;
        self.expect(TokenKind::RParen)?;
        if self.parse_body()? {
            self.builder.request_newline();
        }
        Ok(())
    }

    /// `for` heads come in three shapes: classic three-clause, `for-in`,
    /// and the `var` variants of both. The init clause is parsed with
    /// `in` suppressed so a following `in` stays visible to this level.
    fn parse_for(&mut self) -> Result<(), FormatError> {
        self.emit()?; // for
        self.builder.add_space();
        self.expect(TokenKind::LParen)?;
        match self.peek_kind()? {
            TokenKind::Semicolon => {}
            TokenKind::Var | TokenKind::Const => {
                self.emit()?;
                self.builder.add_space();
                self.parse_variable_declaration_list(true)?;
            }
            _ => self.parse_expression(true)?,
        }
        if self.peek_kind()? == TokenKind::In {
            self.builder.add_space();
            self.emit()?;
            self.builder.add_space();
            self.parse_expression(false)?;
        } else {
            self.expect(TokenKind::Semicolon)?;
            if self.peek_kind()? != TokenKind::Semicolon {
                self.builder.add_space();
                self.parse_expression(false)?;
            }
            self.expect(TokenKind::Semicolon)?;
            if self.peek_kind()? != TokenKind::RParen {
                self.builder.add_space();
                self.parse_expression(false)?;
            }
        }
        self.expect(TokenKind::RParen)?;
        if self.parse_body()? {
            self.builder.request_newline();
        }
        Ok(())
    }

    /// `continue`/`break`/`return` — restricted productions: the operand
    /// attaches only when no line terminator preceded the lookahead token
    /// in the *original* source. The formatted layout plays no part in
    /// the decision.
    fn parse_jump(&mut self, kind: TokenKind) -> Result<(), FormatError> {
        self.emit()?; // continue | break | return
        let terminated = self.peek_newline_before()?;
        if kind == TokenKind::Return {
            if !terminated
                && !matches!(
                    self.peek_kind()?,
                    TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
                )
            {
                self.builder.add_space();
                self.parse_expression(false)?;
            }
        } else if !terminated && self.peek_kind()? == TokenKind::Identifier {
            self.builder.add_space();
            self.emit()?;
        }
        self.finish_statement()
    }

    fn parse_switch(&mut self) -> Result<(), FormatError> {
        self.emit()?; // switch
        self.builder.add_space();
        self.expect(TokenKind::LParen)?;
        self.parse_expression(false)?;
        self.expect(TokenKind::RParen)?;
        self.builder.add_space();
        self.expect(TokenKind::LBrace)?;
        self.builder.request_newline();
        self.builder.enter_block();
        loop {
            match self.peek_kind()? {
                TokenKind::Case => {
                    self.emit()?;
                    self.builder.add_space();
                    self.parse_expression(false)?;
                    self.parse_case_body()?;
                }
                TokenKind::Default => {
                    self.emit()?;
                    self.parse_case_body()?;
                }
                _ => break,
            }
        }
        self.builder.exit_block();
        self.expect(TokenKind::RBrace)?;
        self.builder.request_newline();
        Ok(())
    }

    fn parse_case_body(&mut self) -> Result<(), FormatError> {
        self.expect(TokenKind::Colon)?;
        self.builder.request_newline();
        self.builder.enter_block();
        while !matches!(
            self.peek_kind()?,
            TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
        ) {
            self.parse_statement()?;
        }
        self.builder.exit_block();
        Ok(())
    }

    fn parse_throw(&mut self) -> Result<(), FormatError> {
        self.emit()?; // throw
        self.builder.add_space();
        self.parse_expression(false)?;
        self.finish_statement()
    }

    fn parse_try(&mut self) -> Result<(), FormatError> {
        self.emit()?; // try
        self.builder.add_space();
        self.parse_block()?;
        if self.peek_kind()? == TokenKind::Catch {
            self.builder.add_space();
            self.emit()?;
            self.builder.add_space();
            self.expect(TokenKind::LParen)?;
            self.expect(TokenKind::Identifier)?;
            self.expect(TokenKind::RParen)?;
            self.builder.add_space();
            self.parse_block()?;
        }
        if self.peek_kind()? == TokenKind::Finally {
            self.builder.add_space();
            self.emit()?;
            self.builder.add_space();
            self.parse_block()?;
        }
        self.builder.request_newline();
        Ok(())
    }

    fn parse_function_declaration(&mut self) -> Result<(), FormatError> {
        self.emit()?; // function
        self.builder.add_space();
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::LParen)?;
        self.parse_parameters()?;
        self.expect(TokenKind::RParen)?;
        self.builder.add_space();
        self.parse_block()?;
        self.builder.request_newline();
        Ok(())
    }

    /// Fallback: an expression statement, unless the expression turns out
    /// to be a single identifier followed by `:` — then it was a label.
    /// One token of lookahead cannot tell the two apart up front, so the
    /// label is recognized after the fact by how much the expression
    /// parse consumed.
    fn parse_expression_or_labelled_statement(&mut self) -> Result<(), FormatError> {
        let first = self.peek_kind()?;
        let before = self.consumed;
        self.parse_expression(false)?;
        if first == TokenKind::Identifier
            && self.consumed == before + 1
            && self.peek_kind()? == TokenKind::Colon
        {
            self.emit()?; // :
            self.builder.request_newline();
            return self.parse_statement();
        }
        self.finish_statement()
    }
}
