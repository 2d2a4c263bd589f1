//! Function definitions: `fn <type> name(<type> a, <type> b) { ... }`.

use bc_ir::{FunctionDef, Ident, Param, Position, StmtId, StmtKind, TokenKind, TypeName};

use crate::{ParseError, ParseErrorKind, ParseFailure, Parser};

impl Parser<'_> {
    pub(crate) fn parse_function(&mut self, start: Position) -> Result<StmtId, ParseFailure> {
        self.cursor.advance();

        let Some(return_ty) = self.cursor.current_kind().and_then(TypeName::from_token) else {
            return Err(
                ParseError::new(ParseErrorKind::InvalidFunctionDefinitionReturn, start).into(),
            );
        };
        self.cursor.advance();

        let Some((name, name_pos)) = self.cursor.eat_ident() else {
            return Err(
                ParseError::new(ParseErrorKind::InvalidFunctionDefinitionName, start)
                    .with_hint(return_ty.as_str())
                    .into(),
            );
        };

        if !self.cursor.eat(&TokenKind::LParen) {
            return Err(
                ParseError::new(ParseErrorKind::InvalidFunctionDefinitionOpenBracket, start)
                    .with_hint(name)
                    .into(),
            );
        }

        let params = self.parse_params(start, &format!("fn {return_ty} {name}"))?;

        if !self.cursor.check(&TokenKind::LBrace) {
            let hint = format!("fn {return_ty} {name}({})", render_params(&params));
            return Err(
                ParseError::new(ParseErrorKind::InvalidFunctionDefinitionBody, start)
                    .with_hint(hint)
                    .into(),
            );
        }
        let body = self.parse_block()?;

        let def = FunctionDef {
            return_ty,
            name: Ident::new(name, name_pos),
            params,
            body,
        };
        Ok(self.alloc_stmt(StmtKind::FunctionDefinition(def), start)?)
    }

    /// Parse `<type> a, <type> b)` after the opening `(`.
    fn parse_params(&mut self, start: Position, signature: &str) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();
        if self.cursor.eat(&TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            let ty = self.cursor.current_kind().and_then(TypeName::from_token);
            let Some(ty) = ty else {
                return Err(invalid_params(start, signature, &params));
            };
            self.cursor.advance();

            let Some((name, pos)) = self.cursor.eat_ident() else {
                return Err(invalid_params(start, signature, &params));
            };
            params.push(Param {
                ty,
                name: Ident::new(name, pos),
            });

            if self.cursor.eat(&TokenKind::Comma) {
                continue;
            }
            if self.cursor.eat(&TokenKind::RParen) {
                return Ok(params);
            }
            return Err(invalid_params(start, signature, &params));
        }
    }
}

fn render_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|param| format!("{} {}", param.ty, param.name.name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cold]
fn invalid_params(start: Position, signature: &str, params: &[Param]) -> ParseError {
    ParseError::new(ParseErrorKind::InvalidFunctionDefinitionParameters, start)
        .with_hint(format!("{signature}({}", render_params(params)))
}
