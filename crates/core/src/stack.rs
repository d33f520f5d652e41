//! Bounded Value Stack
//!
//! A fixed-capacity contiguous array of `f64` slots. Capacity is chosen once
//! by the owner and never grows; running out of room is an error, not a
//! reallocation.
//!
//! ## Stack Layout
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┬─────────┐
//! │   v0     │   v1     │   v2     │  stale   │  ...    │
//! │ (bottom) │          │  (top)   │          │         │
//! └──────────┴──────────┴──────────┴──────────┴─────────┘
//!                                   ↑ sp
//!
//! - Grows upward
//! - sp is the live count and the index of the next free slot
//! - Slots at index >= sp hold stale values and are never read
//! ```
//!
//! All operations are O(1) except [`Stack::rot`], which shifts the live
//! region by one slot.

use crate::error::{CalcError, CalcResult};

/// Default capacity used by one-shot evaluation
pub const DEFAULT_STACK_CAPACITY: usize = 10;

/// Largest capacity [`Stack::new`] will allocate
pub const MAX_STACK_CAPACITY: usize = 1 << 20;

/// Fixed-capacity stack of doubles
#[derive(Debug, Clone)]
pub struct Stack {
    slots: Box<[f64]>,
    sp: usize,
}

impl Stack {
    /// Create a stack with room for `capacity` values, 1 to [`MAX_STACK_CAPACITY`]
    pub fn new(capacity: usize) -> CalcResult<Self> {
        if capacity > MAX_STACK_CAPACITY {
            return Err(CalcError::InvalidCapacity(capacity));
        }
        Self::from_buffer(vec![0.0; capacity])
    }

    /// Take ownership of a caller-supplied buffer; its length is the capacity
    pub fn from_buffer(buffer: impl Into<Box<[f64]>>) -> CalcResult<Self> {
        let slots = buffer.into();
        if slots.is_empty() {
            return Err(CalcError::InvalidCapacity(0));
        }
        Ok(Stack { slots, sp: 0 })
    }

    /// Current stack depth
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.sp
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.sp == self.slots.len()
    }

    /// Live values, bottom first
    pub fn as_slice(&self) -> &[f64] {
        &self.slots[..self.sp]
    }

    /// Forget every live value
    pub fn clear(&mut self) {
        self.sp = 0;
    }

    pub fn push(&mut self, val: f64) -> CalcResult<()> {
        if self.is_full() {
            return Err(CalcError::StackFull);
        }
        self.slots[self.sp] = val;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> CalcResult<f64> {
        if self.is_empty() {
            return Err(CalcError::StackEmpty);
        }
        self.sp -= 1;
        Ok(self.slots[self.sp])
    }

    /// Copy the top value into a new slot: ( a -- a a )
    pub fn dup(&mut self) -> CalcResult<()> {
        if self.is_empty() {
            return Err(CalcError::StackEmpty);
        }
        if self.is_full() {
            return Err(CalcError::StackFull);
        }
        self.slots[self.sp] = self.slots[self.sp - 1];
        self.sp += 1;
        Ok(())
    }

    /// Exchange the two topmost values: ( a b -- b a )
    pub fn swap(&mut self) -> CalcResult<()> {
        if self.sp < 2 {
            return Err(CalcError::Underflow);
        }
        self.slots.swap(self.sp - 1, self.sp - 2);
        Ok(())
    }

    /// Move the bottom value to the top, shifting everything else down one.
    ///
    /// `1 2 3 rot` leaves `2 3 1`. Fewer than two values is a no-op.
    pub fn rot(&mut self) {
        if self.sp >= 2 {
            self.slots[..self.sp].rotate_left(1);
        }
    }

    /// Discard the top value
    pub fn drop_top(&mut self) -> CalcResult<()> {
        if self.is_empty() {
            return Err(CalcError::StackEmpty);
        }
        self.sp -= 1;
        Ok(())
    }

    /// Replace the top `how_many` values with `val`.
    ///
    /// This is how every N-ary operator commits its result: the operands are
    /// read with [`Stack::peek`], validated, and only then replaced. Depth
    /// changes by `1 - how_many`.
    pub fn replace(&mut self, how_many: usize, val: f64) -> CalcResult<()> {
        if how_many == 0 {
            return self.push(val);
        }
        if self.sp < how_many {
            return Err(CalcError::Underflow);
        }
        self.sp -= how_many - 1;
        self.slots[self.sp - 1] = val;
        Ok(())
    }

    /// Read the value `down` slots below the top (0 is the top itself)
    pub fn peek(&self, down: usize) -> CalcResult<f64> {
        if down >= self.sp {
            return Err(CalcError::Underflow);
        }
        Ok(self.slots[self.sp - 1 - down])
    }

    /// Remove `n` values from the top without reading them
    pub(crate) fn discard(&mut self, n: usize) -> CalcResult<()> {
        if self.sp < n {
            return Err(CalcError::Underflow);
        }
        self.sp -= n;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
