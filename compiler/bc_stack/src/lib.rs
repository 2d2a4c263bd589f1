//! Stack growth for recursive compiler stages.
//!
//! The parser descends once per nested expression, block and call argument,
//! and code generation walks the same tree recursively. Source like
//! `((((((...))))))` would overflow the thread stack long before the arena
//! budget runs out, so every recursive entry point runs its body through
//! [`ensure_sufficient_stack`], which switches to a freshly allocated stack
//! segment when the current one is close to full.

/// Remaining stack below which a new segment is allocated (100 KiB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1 MiB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn lower_expr(&mut self, id: ExprId) -> Result<(), CodegenError> {
///     ensure_sufficient_stack(|| self.lower_expr_inner(id))
/// }
/// ```
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}
