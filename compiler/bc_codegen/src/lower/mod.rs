//! Statement and expression lowering.
//!
//! Each submodule adds methods to [`Generator`](crate::Generator):
//! statements and blocks in `stmt`, expressions and calls in `expr`,
//! function definitions and returns in `function`.

mod expr;
mod function;
mod stmt;
