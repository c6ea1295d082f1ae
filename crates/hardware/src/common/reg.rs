//! Unified Register File.
//!
//! This module provides the `RegisterFile` struct, which pairs the APEX register values with
//! their validity bits. It provides:
//! 1. **Unified Storage:** Register values and scoreboard state behind one interface.
//! 2. **Hazard Queries:** Validity checks consulted by the Decode stage every cycle.
//! 3. **Observability:** A dump of registers for the final-state report.

use serde::Serialize;

use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::scoreboard::Scoreboard;

/// Observable state of one architectural register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterState {
    /// Register id.
    pub index: usize,
    /// Current value.
    pub value: i32,
    /// `false` while an in-flight instruction still owes this register a result.
    pub valid: bool,
}

/// Register file: 32 values, each with a validity bit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: Gpr,
    scoreboard: Scoreboard,
}

impl RegisterFile {
    /// Creates a register file with every register zero and valid.
    pub const fn new() -> Self {
        Self {
            gpr: Gpr::new(),
            scoreboard: Scoreboard::new(),
        }
    }

    /// Reads a register value regardless of validity.
    #[inline]
    pub fn read(&self, idx: usize) -> i32 {
        self.gpr.read(idx)
    }

    /// Writes a register value without touching its validity bit.
    #[inline]
    pub fn write(&mut self, idx: usize, val: i32) {
        self.gpr.write(idx, val);
    }

    /// Returns `true` if the register holds its final value.
    #[inline]
    pub fn is_valid(&self, idx: usize) -> bool {
        self.scoreboard.is_valid(idx)
    }

    /// Marks a register invalid until its pending writer commits.
    pub fn reserve(&mut self, idx: usize) {
        self.scoreboard.reserve(idx);
    }

    /// Marks a register valid again.
    pub fn commit(&mut self, idx: usize) {
        self.scoreboard.release(idx);
    }

    /// Returns the state of registers `0..count`.
    pub fn dump(&self, count: usize) -> Vec<RegisterState> {
        let values = self.gpr.snapshot();
        values
            .iter()
            .take(count)
            .enumerate()
            .map(|(index, &value)| RegisterState {
                index,
                value,
                valid: self.scoreboard.is_valid(index),
            })
            .collect()
    }
}
