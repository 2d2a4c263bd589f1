//! Statement parsing.
//!
//! Dispatch is on the first token of the statement. Errors carry the
//! position of that token.

use bc_ir::{
    Block, Call, Ident, MacroCall, MacroKind, Position, StmtId, StmtKind, TokenKind, TypeName,
    VarDecl,
};
use bc_stack::ensure_sufficient_stack;

use crate::{ParseError, ParseErrorKind, ParseFailure, Parser};

type StmtResult = Result<Option<StmtId>, ParseFailure>;

impl<'a> Parser<'a> {
    /// Parse one statement.
    ///
    /// Returns `Ok(None)` for statements that produce no node: a stray `;`
    /// or a bare `name;` reference.
    pub(crate) fn parse_statement(&mut self) -> StmtResult {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> StmtResult {
        let Some(token) = self.cursor.current() else {
            return Ok(None);
        };
        let start = token.pos;

        match &token.kind {
            TokenKind::Asm => self.parse_macro(MacroKind::Asm, start).map(Some),
            TokenKind::Include => self.parse_macro(MacroKind::Include, start).map(Some),
            TokenKind::Int => self.parse_var_decl(TypeName::Int, start).map(Some),
            TokenKind::String => self.parse_var_decl(TypeName::String, start).map(Some),
            TokenKind::Ident(name) => self.parse_ident_statement(name, start),
            TokenKind::If => self.parse_if(start).map(Some),
            TokenKind::While => self.parse_while(start).map(Some),
            TokenKind::Fn => self.parse_function(start).map(Some),
            TokenKind::Return => self.parse_return(start).map(Some),
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                Ok(Some(self.alloc_stmt(StmtKind::Scope(block), start)?))
            }
            TokenKind::Semicolon => {
                self.cursor.advance();
                Ok(None)
            }
            other => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    found: other.clone(),
                },
                start,
            )
            .with_hint(other.to_string())
            .into()),
        }
    }

    /// `asm!("...");` / `include!("...");`
    ///
    /// Any argument list is accepted here; its shape is checked during
    /// code generation.
    fn parse_macro(&mut self, kind: MacroKind, start: Position) -> Result<StmtId, ParseFailure> {
        self.cursor.advance();
        let error = || ParseError::new(ParseErrorKind::InvalidMacroCall, start).with_hint(kind.as_str());

        if !self.cursor.eat(&TokenKind::LParen) {
            return Err(error().into());
        }
        let args = self.parse_call_args().map_err(|e| e.or_fail(error()))?;
        if !self.cursor.eat(&TokenKind::Semicolon) {
            return Err(error().into());
        }

        Ok(self.alloc_stmt(StmtKind::Macro(MacroCall { kind, args }), start)?)
    }

    /// `int x;`, `string s = "text";`
    fn parse_var_decl(&mut self, ty: TypeName, start: Position) -> Result<StmtId, ParseFailure> {
        self.cursor.advance();
        let Some((name, name_pos)) = self.cursor.eat_ident() else {
            return Err(ParseError::new(ParseErrorKind::InvalidVariableDeclaration, start)
                .with_hint(ty.as_str())
                .into());
        };
        let declared = format!("{ty} {name}");

        let init = if self.cursor.eat(&TokenKind::Eq) {
            let value = self.parse_expr().map_err(|e| {
                e.or_fail(
                    ParseError::new(ParseErrorKind::InvalidExpression, start)
                        .with_hint(format!("{declared} =")),
                )
            })?;
            Some(value)
        } else {
            None
        };

        if !self.cursor.eat(&TokenKind::Semicolon) {
            let hint = match init {
                Some(value) => format!("{declared} = {}", self.render_expr(value)),
                None => declared,
            };
            return Err(ParseError::new(ParseErrorKind::MissingSemicolon, start)
                .with_hint(hint)
                .into());
        }

        let decl = VarDecl {
            ty,
            name: Ident::new(name, name_pos),
            init,
        };
        Ok(self.alloc_stmt(StmtKind::DeclareVariable(decl), start)?)
    }

    /// `name(args);`, `name = expr;` or `name;`
    fn parse_ident_statement(&mut self, name: &'a str, start: Position) -> StmtResult {
        self.cursor.advance();
        let ident = Ident::new(name, start);

        match self.cursor.current_kind() {
            Some(TokenKind::Semicolon) => {
                self.cursor.advance();
                Ok(None)
            }
            Some(TokenKind::LParen) => {
                self.cursor.advance();
                let args = self.parse_call_args().map_err(|e| {
                    e.or_fail(
                        ParseError::new(ParseErrorKind::InvalidFunctionCall, start).with_hint(name),
                    )
                })?;
                if !self.cursor.eat(&TokenKind::Semicolon) {
                    let hint = self.render_call(name, &args);
                    return Err(ParseError::new(ParseErrorKind::MissingSemicolon, start)
                        .with_hint(hint)
                        .into());
                }
                let call = Call {
                    callee: ident,
                    args,
                };
                Ok(Some(self.alloc_stmt(StmtKind::Call(call), start)?))
            }
            Some(TokenKind::Eq) => {
                self.cursor.advance();
                let value = self.parse_expr().map_err(|e| {
                    e.or_fail(
                        ParseError::new(ParseErrorKind::InvalidExpression, start)
                            .with_hint(format!("{name} =")),
                    )
                })?;
                if !self.cursor.eat(&TokenKind::Semicolon) {
                    let hint = format!("{name} = {}", self.render_expr(value));
                    return Err(ParseError::new(ParseErrorKind::MissingSemicolon, start)
                        .with_hint(hint)
                        .into());
                }
                let stmt = StmtKind::AssignVariable { name: ident, value };
                Ok(Some(self.alloc_stmt(stmt, start)?))
            }
            _ => Err(ParseError::new(ParseErrorKind::MissingSemicolon, start)
                .with_hint(name)
                .into()),
        }
    }

    /// `if cond { ... } [else { ... }]`
    fn parse_if(&mut self, start: Position) -> Result<StmtId, ParseFailure> {
        self.cursor.advance();
        let cond = self
            .parse_expr()
            .map_err(|e| e.or_fail(ParseError::new(ParseErrorKind::IfInvalidCondition, start)))?;

        if !self.cursor.check(&TokenKind::LBrace) {
            let hint = self.render_expr(cond);
            return Err(ParseError::new(ParseErrorKind::IfInvalidScope, start)
                .with_hint(hint)
                .into());
        }
        let then_block = self.parse_block()?;

        let else_block = if self.cursor.eat(&TokenKind::Else) {
            if !self.cursor.check(&TokenKind::LBrace) {
                return Err(ParseError::new(ParseErrorKind::IfInvalidScope, start)
                    .with_hint("else")
                    .into());
            }
            Some(self.parse_block()?)
        } else {
            None
        };

        let stmt = StmtKind::If {
            cond,
            then_block,
            else_block,
        };
        Ok(self.alloc_stmt(stmt, start)?)
    }

    /// `while cond { ... }`
    fn parse_while(&mut self, start: Position) -> Result<StmtId, ParseFailure> {
        self.cursor.advance();
        let cond = self.parse_expr().map_err(|e| {
            e.or_fail(ParseError::new(ParseErrorKind::WhileInvalidCondition, start))
        })?;

        if !self.cursor.check(&TokenKind::LBrace) {
            let hint = self.render_expr(cond);
            return Err(ParseError::new(ParseErrorKind::WhileInvalidScope, start)
                .with_hint(hint)
                .into());
        }
        let body = self.parse_block()?;

        Ok(self.alloc_stmt(StmtKind::While { cond, body }, start)?)
    }

    /// `return expr;`
    fn parse_return(&mut self, start: Position) -> Result<StmtId, ParseFailure> {
        self.cursor.advance();
        let value = self
            .parse_expr()
            .map_err(|e| e.or_fail(ParseError::new(ParseErrorKind::InvalidExpression, start)))?;

        if !self.cursor.eat(&TokenKind::Semicolon) {
            let hint = self.render_expr(value);
            return Err(ParseError::new(ParseErrorKind::MissingSemicolon, start)
                .with_hint(hint)
                .into());
        }

        Ok(self.alloc_stmt(StmtKind::Return(value), start)?)
    }

    /// `{ stmt* }`, with the cursor on the `{`.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseFailure> {
        let open = self.cursor.current_position();
        self.cursor.eat(&TokenKind::LBrace);

        let mut block = Block::default();
        loop {
            if self.cursor.eat(&TokenKind::RBrace) {
                return Ok(block);
            }
            if self.cursor.is_at_end() {
                let hint = self.printer().block(&block);
                return Err(ParseError::new(ParseErrorKind::ScopeNotClosed, open)
                    .with_hint(hint)
                    .into());
            }
            if let Some(stmt) = self.parse_statement()? {
                block.stmts.push(stmt);
            }
        }
    }
}
