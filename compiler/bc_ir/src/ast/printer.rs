//! Render AST nodes back to source-like text.
//!
//! Binary operands that are themselves binary operations are wrapped in
//! parentheses, so the rendered text shows how the expression was grouped:
//! `1 + 2 * 3` renders as `1 + (2 * 3)`. Statements render one per line
//! with four-space indentation inside blocks.

use super::{Block, Call, ExprId, ExprKind, Literal, StmtId, StmtKind};
use crate::AstArena;

const INDENT: &str = "    ";

/// Renders expressions and statements stored in an [`AstArena`].
pub struct AstPrinter<'a> {
    arena: &'a AstArena,
}

impl<'a> AstPrinter<'a> {
    pub fn new(arena: &'a AstArena) -> Self {
        AstPrinter { arena }
    }

    /// Render one expression.
    pub fn expr(&self, id: ExprId) -> String {
        let mut out = String::new();
        self.write_expr(&mut out, id);
        out
    }

    /// Render one statement at indentation level zero.
    pub fn stmt(&self, id: StmtId) -> String {
        let mut out = String::new();
        self.write_stmt(&mut out, id, 0);
        out
    }

    /// Render a block, including its braces.
    pub fn block(&self, block: &Block) -> String {
        let mut out = String::new();
        self.write_block(&mut out, block, 0);
        out
    }

    /// Render a statement list, one statement per line.
    pub fn program(&self, stmts: &[StmtId]) -> String {
        let mut out = String::new();
        for &stmt in stmts {
            self.write_stmt(&mut out, stmt, 0);
            out.push('\n');
        }
        out
    }

    fn write_expr(&self, out: &mut String, id: ExprId) {
        match &self.arena.get_expr(id).kind {
            ExprKind::Literal(Literal::Number(digits)) => out.push_str(digits),
            ExprKind::Literal(Literal::Str(text)) => {
                out.push('"');
                out.push_str(text);
                out.push('"');
            }
            ExprKind::Ident(ident) => out.push_str(&ident.name),
            ExprKind::Brackets(inner) => {
                out.push('(');
                self.write_expr(out, *inner);
                out.push(')');
            }
            ExprKind::Call(call) => self.write_call(out, call),
            ExprKind::Binary { op, lhs, rhs } => {
                self.write_operand(out, *lhs);
                out.push(' ');
                out.push_str(op.as_symbol());
                out.push(' ');
                self.write_operand(out, *rhs);
            }
        }
    }

    fn write_operand(&self, out: &mut String, id: ExprId) {
        if matches!(self.arena.get_expr(id).kind, ExprKind::Binary { .. }) {
            out.push('(');
            self.write_expr(out, id);
            out.push(')');
        } else {
            self.write_expr(out, id);
        }
    }

    fn write_call(&self, out: &mut String, call: &Call) {
        out.push_str(&call.callee.name);
        self.write_args(out, &call.args);
    }

    fn write_args(&self, out: &mut String, args: &[ExprId]) {
        out.push('(');
        for (i, &arg) in args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_expr(out, arg);
        }
        out.push(')');
    }

    fn write_block(&self, out: &mut String, block: &Block, depth: usize) {
        if block.stmts.is_empty() {
            out.push_str("{}");
            return;
        }
        out.push_str("{\n");
        for &stmt in &block.stmts {
            push_indent(out, depth + 1);
            self.write_stmt(out, stmt, depth + 1);
            out.push('\n');
        }
        push_indent(out, depth);
        out.push('}');
    }

    fn write_stmt(&self, out: &mut String, id: StmtId, depth: usize) {
        match &self.arena.get_stmt(id).kind {
            StmtKind::Return(value) => {
                out.push_str("return ");
                self.write_expr(out, *value);
                out.push(';');
            }
            StmtKind::DeclareVariable(decl) => {
                out.push_str(decl.ty.as_str());
                out.push(' ');
                out.push_str(&decl.name.name);
                if let Some(init) = decl.init {
                    out.push_str(" = ");
                    self.write_expr(out, init);
                }
                out.push(';');
            }
            StmtKind::AssignVariable { name, value } => {
                out.push_str(&name.name);
                out.push_str(" = ");
                self.write_expr(out, *value);
                out.push(';');
            }
            StmtKind::Scope(block) => self.write_block(out, block, depth),
            StmtKind::If {
                cond,
                then_block,
                else_block,
            } => {
                out.push_str("if ");
                self.write_expr(out, *cond);
                out.push(' ');
                self.write_block(out, then_block, depth);
                if let Some(else_block) = else_block {
                    out.push_str(" else ");
                    self.write_block(out, else_block, depth);
                }
            }
            StmtKind::While { cond, body } => {
                out.push_str("while ");
                self.write_expr(out, *cond);
                out.push(' ');
                self.write_block(out, body, depth);
            }
            StmtKind::FunctionDefinition(def) => {
                out.push_str("fn ");
                out.push_str(def.return_ty.as_str());
                out.push(' ');
                out.push_str(&def.name.name);
                out.push('(');
                for (i, param) in def.params.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(param.ty.as_str());
                    out.push(' ');
                    out.push_str(&param.name.name);
                }
                out.push_str(") ");
                self.write_block(out, &def.body, depth);
            }
            StmtKind::Macro(mac) => {
                out.push_str(mac.kind.as_str());
                self.write_args(out, &mac.args);
                out.push(';');
            }
            StmtKind::Call(call) => {
                self.write_call(out, call);
                out.push(';');
            }
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
