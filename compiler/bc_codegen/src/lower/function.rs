//! Function definitions and returns.
//!
//! A definition is emitted inline where it appears, behind a jump that
//! skips over it. Its parameters and body share one scope whose floor is
//! the depth at the definition; the body is lowered as if entered by a
//! call, at [`FrameLayout::entry_depth`].

use bc_ir::{ExprId, FunctionDef};
use tracing::debug;

use crate::context::Reg;
use crate::error::{CodegenError, CodegenErrorKind};
use crate::frame::FrameLayout;
use crate::runtime;
use crate::scope::{ScopeKind, Signature, Variable};
use crate::Generator;

impl Generator<'_> {
    pub(crate) fn lower_function(&mut self, def: &FunctionDef) {
        let name = &def.name;
        if self.frame.is_some() {
            self.error(CodegenError::new(
                CodegenErrorKind::NestedFunctionDefinition,
                &name.name,
                name.pos,
            ));
            return;
        }

        let end = self.ctx.fresh_label();
        self.ctx.blank_line();
        self.ctx
            .ins(format_args!("jmp {end} ; Skip the function definition"));

        // Defined before the body so the function can call itself.
        self.scopes.define_function(
            &name.name,
            Signature {
                params: def.params.iter().map(|param| param.ty).collect(),
                return_ty: def.return_ty,
                position: name.pos,
            },
        );

        let floor = self.ctx.depth();
        let frame = FrameLayout::new(floor, def.params.len());
        self.scopes.enter(ScopeKind::Function, floor);
        self.ctx.label(&name.name);
        self.ctx.set_depth(frame.entry_depth());
        debug!(name = %name.name, ?frame, "lowering function");

        for (index, param) in def.params.iter().enumerate() {
            if self.scopes.local_variable(&param.name.name).is_some() {
                self.error(CodegenError::new(
                    CodegenErrorKind::VariableAlreadyDefined,
                    &param.name.name,
                    param.name.pos,
                ));
                continue;
            }
            let variable = Variable {
                slot: frame.param_slot(index),
                ty: param.ty,
            };
            self.scopes.define_variable(&param.name.name, variable);
        }

        self.frame = Some(frame);
        for &stmt in &def.body.stmts {
            self.lower_stmt(stmt);
        }

        // Falling off the end returns 0.
        self.ctx.section_comment("Implicit return");
        self.ctx.ins("mov rax, 0");
        self.emit_frame_return(frame);
        self.frame = None;

        // The frame was collapsed by the return, so there is nothing to pop.
        self.scopes.exit();
        self.ctx.set_depth(floor);
        self.ctx.label(&end);
    }

    /// `return e;` leaves the function, or the program on the top level.
    pub(crate) fn lower_return(&mut self, value: ExprId) {
        self.ctx.section_comment("Return");
        self.lower_expr(value, Reg::Rax);
        match self.frame {
            Some(frame) => self.emit_frame_return(frame),
            None => runtime::emit_exit(&mut self.ctx, Reg::Rax),
        }
    }

    /// Collapse the frame to `[return address][rax]` and return.
    fn emit_frame_return(&mut self, frame: FrameLayout) {
        let depth = self.ctx.depth();
        let return_address = frame.return_address_offset(depth);
        let collapse = frame.collapse_bytes(depth);

        self.ctx.ins(format_args!(
            "mov {}, QWORD [rsp + {return_address}]",
            Reg::Rcx
        ));
        if collapse > 0 {
            self.ctx.ins(format_args!("add rsp, {collapse}"));
        }
        self.ctx.ins(format_args!("mov QWORD [rsp + 8], {}", Reg::Rax));
        self.ctx.ins(format_args!("mov QWORD [rsp], {}", Reg::Rcx));
        self.ctx.ins("ret");
    }
}
