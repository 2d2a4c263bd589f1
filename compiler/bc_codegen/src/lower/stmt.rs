//! Statement lowering.

use bc_ir::{
    Block, ExprId, ExprKind, Ident, Literal, MacroCall, MacroKind, Position, StmtId, StmtKind,
    VarDecl,
};
use bc_stack::ensure_sufficient_stack;

use crate::context::Reg;
use crate::error::{CodegenError, CodegenErrorKind};
use crate::frame::SLOT_SIZE;
use crate::scope::{ScopeKind, Variable};
use crate::Generator;

impl<'a> Generator<'a> {
    /// Lower one statement.
    pub(crate) fn lower_stmt(&mut self, id: StmtId) {
        ensure_sufficient_stack(|| self.lower_stmt_inner(id));
    }

    fn lower_stmt_inner(&mut self, id: StmtId) {
        let program = self.program;
        let stmt = program.stmt(id);
        match &stmt.kind {
            StmtKind::Return(value) => self.lower_return(*value),
            StmtKind::DeclareVariable(decl) => self.lower_declaration(decl),
            StmtKind::AssignVariable { name, value } => self.lower_assignment(name, *value),
            StmtKind::Scope(block) => self.lower_block(block),
            StmtKind::If {
                cond,
                then_block,
                else_block,
            } => self.lower_if(*cond, then_block, else_block.as_ref()),
            StmtKind::While { cond, body } => self.lower_while(*cond, body),
            StmtKind::FunctionDefinition(def) => self.lower_function(def),
            StmtKind::Macro(mac) => self.lower_macro(mac, stmt.pos),
            StmtKind::Call(call) => self.lower_call(call, stmt.pos, Reg::Rax),
        }
    }

    /// Lower a block in a scope of its own.
    pub(crate) fn lower_block(&mut self, block: &Block) {
        self.enter_scope(ScopeKind::Block);
        for &stmt in &block.stmts {
            self.lower_stmt(stmt);
        }
        self.exit_scope();
    }

    fn enter_scope(&mut self, kind: ScopeKind) {
        self.scopes.enter(kind, self.ctx.depth());
    }

    /// Drop the scope's slots and return to its parent.
    fn exit_scope(&mut self) {
        let floor = self.scopes.exit();
        let slots = self.ctx.depth().saturating_sub(floor);
        if slots > 0 {
            self.ctx.ins(format_args!("add rsp, {}", slots * SLOT_SIZE));
        }
        self.ctx.set_depth(floor);
    }

    /// `int x;` pushes a zeroed slot; `int x = e;` then assigns `e` to it.
    fn lower_declaration(&mut self, decl: &VarDecl) {
        let name = &decl.name;
        if self.scopes.local_variable(&name.name).is_some() {
            self.error(CodegenError::new(
                CodegenErrorKind::VariableAlreadyDefined,
                &name.name,
                name.pos,
            ));
            return;
        }

        let variable = Variable {
            slot: self.ctx.depth(),
            ty: decl.ty,
        };
        self.scopes.define_variable(&name.name, variable);
        self.ctx.ins(format_args!(
            "mov rax, 0 ; Declaring variable named `{}`",
            name.name
        ));
        self.ctx.push(Reg::Rax);

        if let Some(init) = decl.init {
            self.store(variable, init);
        }
    }

    fn lower_assignment(&mut self, name: &Ident, value: ExprId) {
        let Some(variable) = self.scopes.lookup_variable(&name.name) else {
            self.error(CodegenError::new(
                CodegenErrorKind::UndeclaredVariable,
                &name.name,
                name.pos,
            ));
            return;
        };
        self.store(variable, value);
    }

    /// Write the value of `value` into `variable`'s slot.
    ///
    /// Literals are stored directly; anything else goes through `rax`.
    fn store(&mut self, variable: Variable, value: ExprId) {
        let program = self.program;
        match &program.expr(value).kind {
            ExprKind::Literal(Literal::Number(digits)) if digits.parse::<i32>().is_ok() => {
                let slot = self.ctx.access(variable.slot);
                self.ctx.ins(format_args!("mov {slot}, {digits}"));
            }
            ExprKind::Literal(Literal::Str(text)) => {
                let symbol = self.ctx.string_literal(text);
                self.ctx.ins(format_args!("mov {}, {symbol}", Reg::Rdx));
                let slot = self.ctx.access(variable.slot);
                self.ctx.ins(format_args!("mov {slot}, {}", Reg::Rdx));
            }
            _ => {
                self.lower_expr(value, Reg::Rax);
                let slot = self.ctx.access(variable.slot);
                self.ctx.ins(format_args!("mov {slot}, {}", Reg::Rax));
            }
        }
    }

    fn lower_if(&mut self, cond: ExprId, then_block: &Block, else_block: Option<&Block>) {
        let end = self.ctx.fresh_label();
        let else_branch = else_block.map(|block| (block, self.ctx.fresh_label()));

        self.lower_expr(cond, Reg::Rax);
        self.ctx.ins("test rax, rax");
        let on_false = else_branch.as_ref().map_or(&end, |(_, label)| label);
        self.ctx.ins(format_args!("jz {on_false}"));

        self.lower_block(then_block);
        if let Some((block, label)) = else_branch {
            self.ctx.ins(format_args!("jmp {end}"));
            self.ctx.label(&label);
            self.lower_block(block);
        }
        self.ctx.label(&end);
    }

    fn lower_while(&mut self, cond: ExprId, body: &Block) {
        let start = self.ctx.fresh_label();
        let end = self.ctx.fresh_label();

        self.ctx.label(&start);
        self.lower_expr(cond, Reg::Rax);
        self.ctx.ins("test rax, rax");
        self.ctx.ins(format_args!("jz {end}"));
        self.lower_block(body);
        self.ctx.ins(format_args!("jmp {start}"));
        self.ctx.label(&end);
    }

    fn lower_macro(&mut self, mac: &MacroCall, pos: Position) {
        let name = mac.kind.as_str();
        match (mac.kind, self.string_argument(mac)) {
            (MacroKind::Asm, Ok(code)) => self.ctx.raw(code),
            (MacroKind::Include, Ok(_)) => {
                self.error(CodegenError::new(CodegenErrorKind::UnsupportedMacro, name, pos));
            }
            (_, Err(kind)) => self.error(CodegenError::new(kind, name, pos)),
        }
    }

    /// The text of a macro's single string literal argument.
    fn string_argument(&self, mac: &MacroCall) -> Result<&'a str, CodegenErrorKind> {
        let program = self.program;
        let [arg] = mac.args.as_slice() else {
            return Err(CodegenErrorKind::MacroArgumentCount {
                found: mac.args.len(),
            });
        };
        match &program.expr(*arg).kind {
            ExprKind::Literal(Literal::Str(text)) => Ok(text),
            _ => Err(CodegenErrorKind::MacroArgumentNotString),
        }
    }
}
