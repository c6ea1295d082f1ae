//! Validity-bit scoreboard for register dependency tracking.
//!
//! Each architectural register carries one bit: valid when its value in the
//! register file is final, invalid while an issued instruction that will write
//! it has not yet reached Writeback. Execute1 reserves the destination,
//! Writeback releases it, and Decode refuses to issue while any register it
//! depends on is reserved.

use crate::common::constants::NUM_REGS;

/// Validity-bit scoreboard: `pending[r]` is set while register `r` has an
/// outstanding writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    pending: [bool; NUM_REGS],
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    /// Create a new scoreboard with every register valid.
    pub const fn new() -> Self {
        Self {
            pending: [false; NUM_REGS],
        }
    }

    /// Mark a register as having an outstanding writer.
    pub fn reserve(&mut self, reg: usize) {
        self.pending[reg] = true;
    }

    /// Mark a register's value as final.
    pub fn release(&mut self, reg: usize) {
        self.pending[reg] = false;
    }

    /// Returns `true` when the register file holds the register's final value.
    #[inline]
    pub fn is_valid(&self, reg: usize) -> bool {
        !self.pending[reg]
    }

    /// Number of registers currently awaiting a writer.
    pub fn pending_count(&self) -> usize {
        self.pending.iter().filter(|&&p| p).count()
    }
}
