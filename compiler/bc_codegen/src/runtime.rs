//! Host runtime glue.
//!
//! The generated program runs on the Windows x64 API: it imports the
//! console, heap and process functions, stores the standard handles and the
//! process heap in `.data` slots on entry, and leaves through `ExitProcess`.

use crate::context::{CodegenContext, Reg};

/// Entry symbol of the generated program.
pub const ENTRY_LABEL: &str = "_start";

pub const EXIT_PROCESS: &str = "ExitProcess";

/// Every host function the runtime glue may call.
pub const EXTERNS: [&str; 7] = [
    EXIT_PROCESS,
    "GetStdHandle",
    "WriteFile",
    "ReadFile",
    "GetProcessHeap",
    "HeapAlloc",
    "HeapFree",
];

const DATA_SLOTS: [&str; 4] = [
    "stdout dq 0",
    "stdin dq 0",
    "bytesWritten dw 0",
    "heapHandle dq 0",
];

/// `GetStdHandle` argument for standard output.
const STD_OUTPUT_HANDLE: i32 = -11;
/// `GetStdHandle` argument for standard input.
const STD_INPUT_HANDLE: i32 = -10;

/// Data slots, imports, the entry label and handle setup.
pub fn emit_prologue(ctx: &mut CodegenContext) {
    for slot in DATA_SLOTS {
        ctx.data(slot);
    }

    ctx.raw("section .text");
    ctx.ins(format_args!("global {ENTRY_LABEL}"));
    for name in EXTERNS {
        ctx.ins(format_args!("extern {name}"));
    }
    ctx.label(ENTRY_LABEL);

    ctx.ins("; Get stdout");
    emit_std_handle(ctx, STD_OUTPUT_HANDLE, "stdout");
    ctx.ins("; Get stdin");
    emit_std_handle(ctx, STD_INPUT_HANDLE, "stdin");
    ctx.ins("; Get heap handle");
    ctx.ins("call GetProcessHeap");
    ctx.ins("mov [rel heapHandle], rax");
}

fn emit_std_handle(ctx: &mut CodegenContext, which: i32, slot: &str) {
    ctx.ins(format_args!("mov {}, {which}", Reg::Rcx));
    ctx.ins("call GetStdHandle");
    ctx.ins(format_args!("mov [rel {slot}], rax"));
}

/// Terminate the process with `code` (a register or an immediate).
pub fn emit_exit(ctx: &mut CodegenContext, code: impl std::fmt::Display) {
    ctx.ins(format_args!("mov {}, {code}", Reg::Rcx));
    ctx.ins(format_args!("call {EXIT_PROCESS}"));
}

/// Exit with status 0 once the last top-level statement has run.
pub fn emit_epilogue(ctx: &mut CodegenContext) {
    ctx.section_comment("Default return");
    emit_exit(ctx, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prologue_imports_every_host_function() {
        let mut ctx = CodegenContext::new();
        emit_prologue(&mut ctx);
        let out = ctx.finish();

        assert!(out.starts_with("section .data\n\tstdout dq 0\n"));
        assert!(out.contains("\tbytesWritten dw 0\n\theapHandle dq 0\n"));
        assert!(out.contains("section .text\n\tglobal _start\n"));
        for name in EXTERNS {
            assert!(out.contains(&format!("\textern {name}\n")), "missing {name}");
        }
        assert!(out.contains("_start:\n\t; Get stdout\n\tmov rcx, -11\n\tcall GetStdHandle\n"));
        assert!(out.contains("\tmov rcx, -10\n"));
        assert!(out.ends_with("\tcall GetProcessHeap\n\tmov [rel heapHandle], rax\n"));
    }

    #[test]
    fn test_epilogue_exits_with_zero() {
        let mut ctx = CodegenContext::new();
        emit_epilogue(&mut ctx);
        assert_eq!(
            ctx.finish(),
            "\n\t; Default return\n\tmov rcx, 0\n\tcall ExitProcess\n"
        );
    }
}
