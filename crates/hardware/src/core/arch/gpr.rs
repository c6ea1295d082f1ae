//! APEX General-Purpose Register values.
//!
//! This module implements the value half of the APEX register file. It performs the following:
//! 1. **Storage:** Maintains 32 signed integer registers (`R0`-`R31`).
//! 2. **Access:** Plain reads and writes; APEX has no hardwired zero register.
//! 3. **Debugging:** Provides a snapshot of all register values.

use crate::common::constants::NUM_REGS;

/// General-Purpose Register file.
///
/// Every register is an ordinary 32-bit signed word, `R0` included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [i32; NUM_REGS],
}

impl Gpr {
    /// Creates a new register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a register value.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not below [`NUM_REGS`]; register ids are range-checked at load time.
    #[inline]
    pub fn read(&self, idx: usize) -> i32 {
        self.regs[idx]
    }

    /// Writes a register value.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not below [`NUM_REGS`].
    #[inline]
    pub fn write(&mut self, idx: usize, val: i32) {
        self.regs[idx] = val;
    }

    /// Returns a copy of every register value, indexed by register id.
    pub const fn snapshot(&self) -> [i32; NUM_REGS] {
        self.regs
    }
}
