//! Output buffers and simulated stack state.
//!
//! `CodegenContext` owns the three sections of the output file, the string
//! literal table and the label counter, and tracks the simulated stack
//! depth in 8-byte slots. Every `push`/`pop` goes through it so the depth
//! always matches the emitted code.

use std::fmt::{self, Write as _};

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::frame::SLOT_SIZE;

/// General purpose registers the lowering uses.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Reg {
    Rax,
    Rbx,
    Rcx,
    Rdx,
}

impl Reg {
    pub const fn as_str(self) -> &'static str {
        match self {
            Reg::Rax => "rax",
            Reg::Rbx => "rbx",
            Reg::Rcx => "rcx",
            Reg::Rdx => "rdx",
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code generation state for one program.
pub struct CodegenContext {
    /// `.data` lines.
    data: String,
    /// String literals in first-use order; index `i` is named `strLit{i}`.
    strings: Vec<String>,
    string_index: FxHashMap<String, usize>,
    /// `.text` contents.
    text: String,
    label_counter: u32,
    /// Simulated stack depth in slots.
    depth: usize,
}

impl CodegenContext {
    pub fn new() -> Self {
        CodegenContext {
            data: String::new(),
            strings: Vec::new(),
            string_index: FxHashMap::default(),
            text: String::with_capacity(4096),
            label_counter: 0,
            depth: 0,
        }
    }

    // ===== Text section =====

    /// Write one tab-indented instruction.
    pub fn ins(&mut self, instruction: impl fmt::Display) {
        let _ = writeln!(self.text, "\t{instruction}");
    }

    /// Write a label definition.
    pub fn label(&mut self, name: &str) {
        let _ = writeln!(self.text, "{name}:");
    }

    /// Write a line exactly as given.
    pub fn raw(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    /// Write a blank line followed by a comment line.
    pub fn section_comment(&mut self, comment: &str) {
        let _ = write!(self.text, "\n\t; {comment}\n");
    }

    pub fn blank_line(&mut self) {
        self.text.push('\n');
    }

    /// A label name not used before in this program.
    pub fn fresh_label(&mut self) -> String {
        let n = self.label_counter;
        self.label_counter += 1;
        format!("label{n}")
    }

    // ===== Data sections =====

    /// Declare a `.data` entry.
    pub fn data(&mut self, line: &str) {
        let _ = writeln!(self.data, "\t{line}");
    }

    /// Symbol of the read-only string `text`, defining it on first use.
    pub fn string_literal(&mut self, text: &str) -> String {
        let index = match self.string_index.get(text) {
            Some(&index) => index,
            None => {
                let index = self.strings.len();
                self.strings.push(text.to_string());
                self.string_index.insert(text.to_string(), index);
                trace!(index, text, "string literal");
                index
            }
        };
        string_symbol(index)
    }

    // ===== Simulated stack =====

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// `push` an operand (register or immediate).
    pub fn push(&mut self, operand: impl fmt::Display) {
        self.ins(format_args!("push {operand}"));
        self.depth += 1;
        trace!(depth = self.depth, "push");
    }

    pub fn pop(&mut self, reg: Reg) {
        self.ins(format_args!("pop {reg}"));
        self.depth = self.depth.saturating_sub(1);
        trace!(depth = self.depth, "pop");
    }

    /// Account for `slots` that the callee removed from the stack.
    pub fn forget(&mut self, slots: usize) {
        self.depth = self.depth.saturating_sub(slots);
    }

    /// Memory operand of the variable in `slot` at the current depth.
    pub fn access(&self, slot: usize) -> String {
        let offset = self.depth.saturating_sub(slot + 1) * SLOT_SIZE;
        format!("QWORD [rsp + {offset}]")
    }

    /// Assemble `.data`, `.rodata` and `.text` into the output file.
    pub fn finish(self) -> String {
        let mut program = String::with_capacity(self.data.len() + self.text.len() + 256);
        if !self.data.is_empty() {
            program.push_str("section .data\n");
            program.push_str(&self.data);
            program.push('\n');
        }
        if !self.strings.is_empty() {
            program.push_str("section .rodata\n");
            for (index, text) in self.strings.iter().enumerate() {
                let name = string_symbol(index);
                let _ = writeln!(program, "\t{name} db `{}`, 0", escape_backquotes(text));
                let _ = writeln!(program, "\t{name}_len equ $-{name}");
            }
            program.push('\n');
        }
        program.push_str(&self.text);
        program
    }
}

impl Default for CodegenContext {
    fn default() -> Self {
        Self::new()
    }
}

fn string_symbol(index: usize) -> String {
    format!("strLit{index}")
}

/// NASM back-quoted strings take C-style escapes, which source strings
/// already use; only a bare backquote would end the string early.
fn escape_backquotes(text: &str) -> String {
    text.replace('`', "\\`")
}
