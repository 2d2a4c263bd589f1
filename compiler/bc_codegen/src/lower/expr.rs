//! Expression lowering.
//!
//! Every expression is evaluated into a target register. Binary operations
//! evaluate the left operand into `rax` and park it on the stack while the
//! right operand is evaluated into `rbx`, so nested operands never clobber
//! each other. Comparisons materialize a 1/0 through a branch.

use bc_ir::{BinaryOp, Call, ExprId, ExprKind, Literal, Position, TypeName};
use bc_stack::ensure_sufficient_stack;

use crate::context::Reg;
use crate::error::{CodegenError, CodegenErrorKind};
use crate::frame::call_slots;
use crate::scope::{ArgTypes, CallSite};
use crate::Generator;

impl Generator<'_> {
    /// Evaluate `id` into `target`.
    pub(crate) fn lower_expr(&mut self, id: ExprId, target: Reg) {
        ensure_sufficient_stack(|| self.lower_expr_inner(id, target));
    }

    fn lower_expr_inner(&mut self, id: ExprId, target: Reg) {
        let program = self.program;
        let expr = program.expr(id);
        match &expr.kind {
            ExprKind::Literal(Literal::Number(digits)) => {
                self.ctx.ins(format_args!("mov {target}, {digits}"));
            }
            ExprKind::Literal(Literal::Str(text)) => {
                let symbol = self.ctx.string_literal(text);
                self.ctx.ins(format_args!("mov {target}, {symbol}"));
            }
            ExprKind::Ident(ident) => match self.scopes.lookup_variable(&ident.name) {
                Some(variable) => {
                    let slot = self.ctx.access(variable.slot);
                    self.ctx.ins(format_args!("mov {target}, {slot}"));
                }
                None => self.error(CodegenError::new(
                    CodegenErrorKind::UndeclaredVariable,
                    &ident.name,
                    ident.pos,
                )),
            },
            ExprKind::Brackets(inner) => self.lower_expr(*inner, target),
            ExprKind::Call(call) => self.lower_call(call, expr.pos, target),
            ExprKind::Binary { op, lhs, rhs } => self.lower_binary(*op, *lhs, *rhs, target),
        }
    }

    fn lower_binary(&mut self, op: BinaryOp, lhs: ExprId, rhs: ExprId, target: Reg) {
        self.lower_expr(lhs, Reg::Rax);
        self.ctx.push(Reg::Rax);
        self.lower_expr(rhs, Reg::Rbx);
        self.ctx.pop(Reg::Rax);

        match op {
            BinaryOp::Add => self.ctx.ins("add rax, rbx"),
            BinaryOp::Sub => self.ctx.ins("sub rax, rbx"),
            BinaryOp::Mul => self.ctx.ins("imul rax, rbx"),
            BinaryOp::Div => {
                self.ctx.ins("cqo");
                self.ctx.ins("idiv rbx");
            }
            BinaryOp::Gt => self.lower_comparison("jg"),
            BinaryOp::Lt => self.lower_comparison("jl"),
            BinaryOp::Eq => self.lower_comparison("je"),
            BinaryOp::NotEq => self.lower_comparison("jne"),
        }

        self.move_result(target);
    }

    /// `rax = (rax <cond> rbx) ? 1 : 0`
    fn lower_comparison(&mut self, jump: &str) {
        let when_true = self.ctx.fresh_label();
        let end = self.ctx.fresh_label();
        self.ctx.ins("cmp rax, rbx");
        self.ctx.ins(format_args!("{jump} {when_true}"));
        self.ctx.ins("mov rax, 0");
        self.ctx.ins(format_args!("jmp {end}"));
        self.ctx.label(&when_true);
        self.ctx.ins("mov rax, 1");
        self.ctx.label(&end);
    }

    /// Push the arguments left to right, call, and pop the result.
    ///
    /// A call without arguments pushes one placeholder slot for the callee
    /// to return through. The callee drops every argument slot but the one
    /// holding the result, which is popped here.
    pub(crate) fn lower_call(&mut self, call: &Call, pos: Position, target: Reg) {
        let arg_types: ArgTypes = call.args.iter().map(|&arg| self.infer_type(arg)).collect();

        for &arg in &call.args {
            self.lower_expr(arg, Reg::Rax);
            self.ctx.push(Reg::Rax);
        }
        if call.args.is_empty() {
            self.ctx.push(0);
        }

        self.ctx.ins(format_args!("call {}", call.callee.name));
        self.ctx.pop(Reg::Rax);
        self.ctx.forget(call_slots(call.args.len()) - 1);

        self.scopes.record_call(CallSite {
            name: call.callee.name.clone(),
            arg_types,
            position: pos,
        });
        self.move_result(target);
    }

    fn move_result(&mut self, target: Reg) {
        if target != Reg::Rax {
            self.ctx.ins(format_args!("mov {target}, {}", Reg::Rax));
        }
    }

    /// Best-effort static type of an argument, `None` if unknown.
    fn infer_type(&self, id: ExprId) -> Option<TypeName> {
        let program = self.program;
        let mut expr = program.expr(id);
        while let ExprKind::Brackets(inner) = expr.kind {
            expr = program.expr(inner);
        }
        match &expr.kind {
            ExprKind::Literal(Literal::Number(_)) | ExprKind::Binary { .. } => Some(TypeName::Int),
            ExprKind::Literal(Literal::Str(_)) => Some(TypeName::String),
            ExprKind::Ident(ident) => self
                .scopes
                .lookup_variable(&ident.name)
                .map(|variable| variable.ty),
            ExprKind::Call(call) => self
                .scopes
                .lookup_function(self.scopes.current(), &call.callee.name)
                .map(|signature| signature.return_ty),
            ExprKind::Brackets(_) => None,
        }
    }
}
