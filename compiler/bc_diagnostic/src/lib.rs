//! Diagnostics for the bc compiler.
//!
//! Every stage reports problems as a [`Diagnostic`]. All diagnostics are
//! errors; each one carries:
//! - an [`ErrorCode`] naming the problem (`E1xxx` parse, `E2xxx` generation,
//!   `E3xxx` call validation, `E9xxx` internal)
//! - a message saying what went wrong
//! - labels pointing at source positions
//! - hints and notes with extra context
//!
//! Stage-specific error types (`ParseError`, `CodegenError`, ...) live with
//! their stage and convert into a `Diagnostic` through `to_diagnostic()`.
//! [`emitter::TerminalEmitter`] renders them for humans.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
