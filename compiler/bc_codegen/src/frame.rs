//! Flat function frames.
//!
//! There is no base pointer. A called function sees, from `rsp` upwards:
//!
//! ```text
//! [locals ...][return address][arg n-1] ... [arg 0][caller's stack]
//!                                                  ^ frame floor
//! ```
//!
//! The caller always pushes at least one argument slot (a placeholder for
//! zero-argument calls), so returning can collapse the frame down to the
//! two bottom slots and rewrite them as `[return address][return value]`.
//! `ret` pops the address and leaves the value for the caller's `pop`.

/// Bytes per stack slot.
pub const SLOT_SIZE: usize = 8;

/// Slots taken by the pushed return address.
pub const RETURN_ADDRESS_SLOTS: usize = 1;

/// Argument slots a call pushes for `args` arguments.
#[inline]
pub const fn call_slots(args: usize) -> usize {
    if args == 0 {
        1
    } else {
        args
    }
}

/// Slot arithmetic for one function definition.
///
/// Depths and slots are counted in 8-byte slots from the bottom of the
/// simulated stack, the same units the generator tracks.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct FrameLayout {
    floor: usize,
    params: usize,
    arg_slots: usize,
}

impl FrameLayout {
    /// Layout of a function with `params` parameters defined at depth `floor`.
    pub const fn new(floor: usize, params: usize) -> Self {
        FrameLayout {
            floor,
            params,
            arg_slots: call_slots(params),
        }
    }

    #[inline]
    pub const fn floor(&self) -> usize {
        self.floor
    }

    #[inline]
    pub const fn params(&self) -> usize {
        self.params
    }

    #[inline]
    pub const fn arg_slots(&self) -> usize {
        self.arg_slots
    }

    /// Depth right after the `call` instruction landed in the function.
    #[inline]
    pub const fn entry_depth(&self) -> usize {
        self.floor + self.arg_slots + RETURN_ADDRESS_SLOTS
    }

    /// Slot of parameter `index`; parameter 0 is pushed first, so deepest.
    #[inline]
    pub const fn param_slot(&self, index: usize) -> usize {
        self.floor + index
    }

    /// Slots pushed inside the function at `depth`.
    #[inline]
    pub const fn locals(&self, depth: usize) -> usize {
        depth.saturating_sub(self.entry_depth())
    }

    /// `rsp`-relative byte offset of the return address at `depth`.
    #[inline]
    pub const fn return_address_offset(&self, depth: usize) -> usize {
        self.locals(depth) * SLOT_SIZE
    }

    /// Bytes to drop so only the two bottom frame slots remain.
    #[inline]
    pub const fn collapse_bytes(&self, depth: usize) -> usize {
        (self.locals(depth) + self.arg_slots - 1) * SLOT_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_slots_reserve_a_placeholder() {
        assert_eq!(call_slots(0), 1);
        assert_eq!(call_slots(1), 1);
        assert_eq!(call_slots(3), 3);
    }

    #[test]
    fn test_two_params_no_locals() {
        let frame = FrameLayout::new(4, 2);
        assert_eq!(frame.entry_depth(), 7);
        assert_eq!(frame.param_slot(0), 4);
        assert_eq!(frame.param_slot(1), 5);
        // [ret][b][a]: the return address is on top.
        assert_eq!(frame.return_address_offset(7), 0);
        assert_eq!(frame.collapse_bytes(7), 8);
    }

    #[test]
    fn test_zero_params_uses_placeholder_slot() {
        let frame = FrameLayout::new(0, 0);
        assert_eq!(frame.arg_slots(), 1);
        assert_eq!(frame.entry_depth(), 2);
        // Zero locals: nothing to drop, the placeholder becomes the result.
        assert_eq!(frame.collapse_bytes(2), 0);
    }

    #[test]
    fn test_locals_shift_the_return_address() {
        let frame = FrameLayout::new(1, 1);
        let depth = frame.entry_depth() + 3;
        assert_eq!(frame.locals(depth), 3);
        assert_eq!(frame.return_address_offset(depth), 24);
        assert_eq!(frame.collapse_bytes(depth), 24);
    }

    #[test]
    fn test_locals_never_underflow() {
        let frame = FrameLayout::new(5, 2);
        assert_eq!(frame.locals(0), 0);
    }
}
