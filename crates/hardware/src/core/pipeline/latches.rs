//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the state carried between the seven APEX stages:
//! Fetch → Decode/RF → Execute1 → Execute2 → Memory1 → Memory2 → Writeback.
//!
//! 1. **Stage Identity:** The [`Stage`] enumeration in pipeline order.
//! 2. **Instruction Flow:** [`PipelineEntry`] carries an in-flight instruction and its working state.
//! 3. **Empty Slots:** [`Latch`] distinguishes startup (`Busy`), bubbles and real instructions.

use std::fmt;

use crate::core::pipeline::signals::ControlSignals;
use crate::isa::Instruction;

/// One pipeline stage, in program-flow order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Instruction fetch.
    Fetch,
    /// Decode and register fetch.
    Decode,
    /// First execute stage: ALU, address generation, destination reservation.
    Execute1,
    /// Second execute stage: branch and jump resolution.
    Execute2,
    /// First memory stage: data memory access.
    Memory1,
    /// Second memory stage: pass-through.
    Memory2,
    /// Register writeback and retirement.
    Writeback,
}

impl Stage {
    /// Every stage, head to tail.
    pub const ALL: [Self; 7] = [
        Self::Fetch,
        Self::Decode,
        Self::Execute1,
        Self::Execute2,
        Self::Memory1,
        Self::Memory2,
        Self::Writeback,
    ];

    /// Position of the stage in [`Stage::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name used in stage traces.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fetch => "Fetch",
            Self::Decode => "Decode/RF",
            Self::Execute1 => "Execute1",
            Self::Execute2 => "Execute2",
            Self::Memory1 => "Memory1",
            Self::Memory2 => "Memory2",
            Self::Writeback => "Writeback",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An in-flight instruction and the working state accumulated so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineEntry {
    /// Index of the instruction in the instruction table.
    pub index: usize,
    /// Program counter the instruction was fetched from.
    pub pc: u32,
    /// The decoded instruction.
    pub inst: Instruction,
    /// Control signals, filled in by Decode.
    pub ctrl: ControlSignals,
    /// Value read from rs1 register.
    pub rv1: i32,
    /// Value read from rs2 register.
    pub rv2: i32,
    /// Value read from rs3 register.
    pub rv3: i32,
    /// ALU result, or the loaded value once Memory1 has run.
    pub result: i32,
    /// Resolved data-memory address for loads and stores.
    pub mem_addr: i64,
    /// Table index of the next instruction in program order when this one is a
    /// taken branch or jump; set by Execute2.
    pub redirect_index: Option<usize>,
    /// Decode is holding this instruction this cycle.
    pub stalled: bool,
}

impl PipelineEntry {
    /// Creates the entry Fetch hands to Decode.
    pub fn fetched(index: usize, pc: u32, inst: Instruction) -> Self {
        Self {
            index,
            pc,
            inst,
            ..Self::default()
        }
    }

    /// Table index of the instruction that follows this one once it retires.
    pub fn next_index(&self) -> usize {
        self.redirect_index.unwrap_or(self.index + 1)
    }
}

/// Contents of one pipeline latch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Latch {
    /// Startup slot: the pipeline has not filled this far yet.
    #[default]
    Busy,
    /// Empty slot injected by a stall, a drain, a flush or the end of fetch.
    Bubble,
    /// A real instruction.
    Occupied(PipelineEntry),
}

impl Latch {
    /// Returns `true` when the latch carries a real instruction.
    #[inline]
    pub const fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied(_))
    }

    /// The in-flight instruction, if any.
    #[inline]
    pub const fn entry(&self) -> Option<&PipelineEntry> {
        match self {
            Self::Occupied(entry) => Some(entry),
            Self::Busy | Self::Bubble => None,
        }
    }

    /// Removes the contents, leaving a bubble behind.
    #[inline]
    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Self::Bubble)
    }
}
