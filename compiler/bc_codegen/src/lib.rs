//! x86-64 NASM code generation for bc.
//!
//! A single forward pass over the program lowers every statement to
//! assembly for the Windows x64 runtime. Values live on the machine stack;
//! the generator tracks the stack depth in 8-byte slots and addresses
//! variables relative to `rsp`, so there is no base pointer and no register
//! allocation.
//!
//! # Architecture
//!
//! ```text
//! Program (AST arena + top-level statements)
//!        ↓
//!   runtime prologue     (.data slots, imports, _start, handle setup)
//!        ↓
//!   lowering             (one top-level statement at a time;
//!        ↓                errors are collected, not fatal)
//!   runtime epilogue     (exit 0)
//!        ↓
//!   call validation      (a mismatch discards the assembly)
//!        ↓
//!   CodegenOutput
//! ```

mod context;
mod error;
pub mod frame;
mod lower;
mod runtime;
pub mod scope;
mod validate;

pub use context::{CodegenContext, Reg};
pub use error::{CodegenError, CodegenErrorKind, InvalidCall, InvalidCallReason};
pub use frame::FrameLayout;
pub use validate::{check_call, validate_calls};

use bc_diagnostic::Diagnostic;
use bc_ir::Program;
use tracing::{debug, warn};

use crate::scope::ScopeTree;

/// Generator settings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CodegenConfig {
    /// Validate calls recorded inside blocks and function bodies too, not
    /// only those on the top level.
    pub validate_nested_calls: bool,
}

/// Result of code generation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CodegenOutput {
    /// The assembly file (empty if call validation failed).
    pub assembly: String,
    /// Non-fatal errors, in the order their statements were lowered.
    pub errors: Vec<CodegenError>,
    /// The call that made validation fail, if any.
    pub invalid_call: Option<InvalidCall>,
}

impl CodegenOutput {
    /// No errors of any kind.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.invalid_call.is_none()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors
            .iter()
            .map(CodegenError::to_diagnostic)
            .chain(self.invalid_call.iter().map(InvalidCall::to_diagnostic))
            .collect()
    }
}

/// Lower a parsed program to assembly.
#[tracing::instrument(level = "debug", skip_all, fields(stmts = program.stmts.len()))]
pub fn generate(program: &Program, config: &CodegenConfig) -> CodegenOutput {
    Generator::new(program).run(config)
}

/// Lowering state for one program.
pub(crate) struct Generator<'a> {
    program: &'a Program,
    ctx: CodegenContext,
    scopes: ScopeTree,
    /// Layout of the function being lowered, `None` on the top level.
    frame: Option<FrameLayout>,
    /// Errors of the top-level statement being lowered.
    pending: Vec<CodegenError>,
    errors: Vec<CodegenError>,
}

impl<'a> Generator<'a> {
    pub(crate) fn new(program: &'a Program) -> Self {
        Generator {
            program,
            ctx: CodegenContext::new(),
            scopes: ScopeTree::new(),
            frame: None,
            pending: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn run(mut self, config: &CodegenConfig) -> CodegenOutput {
        runtime::emit_prologue(&mut self.ctx);

        let program = self.program;
        for &stmt in &program.stmts {
            self.lower_stmt(stmt);
            debug!(?stmt, depth = self.ctx.depth(), "lowered top-level statement");
            self.report_pending();
        }

        runtime::emit_epilogue(&mut self.ctx);

        match validate_calls(&self.scopes, config) {
            Ok(()) => CodegenOutput {
                assembly: self.ctx.finish(),
                errors: self.errors,
                invalid_call: None,
            },
            Err(invalid) => {
                warn!(name = %invalid.name, reason = %invalid.reason, "invalid function call");
                CodegenOutput {
                    assembly: String::new(),
                    errors: self.errors,
                    invalid_call: Some(invalid),
                }
            }
        }
    }

    #[cold]
    fn error(&mut self, error: CodegenError) {
        self.pending.push(error);
    }

    /// Move the current statement's errors to the program's list.
    fn report_pending(&mut self) {
        for error in self.pending.drain(..) {
            warn!(%error, position = %error.position, "generation error");
            self.errors.push(error);
        }
    }
}

#[cfg(test)]
mod tests;
