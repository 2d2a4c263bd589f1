//! Grammar productions, split by construct.
//!
//! Each submodule adds methods to [`Parser`](crate::Parser).

mod expr;
mod function;
mod stmt;

