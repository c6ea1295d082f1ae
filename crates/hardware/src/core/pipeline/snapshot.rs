//! Per-cycle pipeline observations.
//!
//! A [`CycleSnapshot`] records what every stage processed during one cycle,
//! plus the control events (stall, redirect) that shaped it. The engine
//! builds one per tick; reporters read it and never mutate the machine.

use crate::core::pipeline::hazards::StallCause;
use crate::core::pipeline::latches::{Latch, Stage};

/// A taken branch or jump resolved in Execute2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redirect {
    /// Table index of the branch or jump.
    pub branch_index: usize,
    /// PC of the branch or jump.
    pub branch_pc: u32,
    /// PC Fetch resumes from.
    pub target_pc: u32,
    /// Table index Fetch resumes from.
    pub target_index: usize,
}

/// Everything observable about one simulated cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleSnapshot {
    /// 1-based cycle number.
    pub cycle: u64,
    /// What each stage held while it was evaluated, indexed by [`Stage::index`].
    pub stages: [Latch; 7],
    /// Why Decode held its instruction, if it did.
    pub stall: Option<StallCause>,
    /// The control transfer that flushed Fetch, Decode and Execute1 this cycle.
    pub redirect: Option<Redirect>,
    /// Number of real instructions discarded by that flush.
    pub squashed: usize,
    /// Fetch PC after the cycle.
    pub pc: u32,
    /// Zero flag after the cycle.
    pub zero_flag: bool,
    /// Completed-instruction count after the cycle.
    pub completed: usize,
}

impl CycleSnapshot {
    /// Starts an empty record for `cycle`.
    pub fn new(cycle: u64) -> Self {
        Self {
            cycle,
            stages: std::array::from_fn(|_| Latch::Bubble),
            stall: None,
            redirect: None,
            squashed: 0,
            pc: 0,
            zero_flag: false,
            completed: 0,
        }
    }

    /// Records what `stage` processed.
    #[inline]
    pub fn record(&mut self, stage: Stage, latch: Latch) {
        self.stages[stage.index()] = latch;
    }

    /// What `stage` processed this cycle.
    #[inline]
    pub const fn stage(&self, stage: Stage) -> &Latch {
        &self.stages[stage.index()]
    }
}
