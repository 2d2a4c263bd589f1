//! The bc compiler.
//!
//! [`compile`] runs the whole pipeline on one source text without touching
//! the file system:
//!
//! ```text
//! source ─▶ bc_lexer::lex ─▶ bc_parse::parse ─▶ bc_codegen::generate ─▶ assembly
//! ```
//!
//! Parse errors and arena exhaustion stop the pipeline. Generation errors
//! do not: the assembly is still produced, but the compilation counts as
//! failed. A call validation failure discards the assembly.
//!
//! The `bcc` binary is a thin wrapper over [`cli`].

pub mod cli;

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Once;

use bc_codegen::CodegenConfig;
use bc_diagnostic::emitter::{ColorMode, TerminalEmitter};
use bc_diagnostic::Diagnostic;
use bc_ir::{Program, Token};
use bc_parse::{ParseConfig, ParseFailure};
use tracing::debug;

/// Pipeline settings.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CompileConfig {
    /// Path shown in diagnostics.
    pub file_path: String,
    pub parse: ParseConfig,
    pub codegen: CodegenConfig,
}

/// The stage a failed compilation stopped in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorPhase {
    Parse,
    /// The AST arena ran out of space while parsing.
    Arena,
    /// Lowering reported errors; assembly was still produced.
    Codegen,
    /// A call did not match its function's signature.
    Validation,
}

impl ErrorPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorPhase::Parse => "parse",
            ErrorPhase::Arena => "arena",
            ErrorPhase::Codegen => "codegen",
            ErrorPhase::Validation => "validation",
        }
    }
}

impl fmt::Display for ErrorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one compilation produced.
#[derive(Debug)]
pub struct CompileOutput {
    pub success: bool,
    /// Empty when parsing or call validation failed.
    pub assembly: String,
    pub tokens: Vec<Token>,
    /// `None` when parsing failed.
    pub program: Option<Program>,
    pub diagnostics: Vec<Diagnostic>,
    pub error_phase: Option<ErrorPhase>,
}

/// Compile one source text to assembly.
#[tracing::instrument(level = "debug", skip_all, fields(path = %config.file_path))]
pub fn compile(source: &str, config: &CompileConfig) -> CompileOutput {
    let tokens = bc_lexer::lex(source);

    let program = match bc_parse::parse(&tokens, &config.parse) {
        Ok(program) => program,
        Err(failure) => {
            let phase = match failure {
                ParseFailure::Syntax(_) => ErrorPhase::Parse,
                ParseFailure::Arena(_) => ErrorPhase::Arena,
            };
            debug!(%phase, "compilation stopped");
            return CompileOutput {
                success: false,
                assembly: String::new(),
                tokens,
                program: None,
                diagnostics: vec![failure.to_diagnostic()],
                error_phase: Some(phase),
            };
        }
    };

    let output = bc_codegen::generate(&program, &config.codegen);
    let error_phase = if output.invalid_call.is_some() {
        Some(ErrorPhase::Validation)
    } else if !output.errors.is_empty() {
        Some(ErrorPhase::Codegen)
    } else {
        None
    };
    debug!(
        bytes = output.assembly.len(),
        errors = output.errors.len(),
        "generated assembly"
    );

    CompileOutput {
        success: error_phase.is_none(),
        diagnostics: output.diagnostics(),
        assembly: output.assembly,
        tokens,
        program: Some(program),
        error_phase,
    }
}

/// Render diagnostics the way the terminal emitter prints them, followed by
/// a summary line.
///
/// The text is not written to a terminal, so [`ColorMode::Auto`] renders
/// without colors.
pub fn render_diagnostics(
    source: &str,
    file_path: &str,
    diagnostics: &[Diagnostic],
    color: ColorMode,
) -> String {
    let mut emitter =
        TerminalEmitter::with_color_mode(Vec::new(), color, false).with_source(file_path, source);
    emitter.emit_report(diagnostics);
    String::from_utf8_lossy(&emitter.into_inner()).into_owned()
}

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical stderr subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
/// Enable with e.g. `RUST_LOG=bc_codegen=debug` or `RUST_LOG=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
