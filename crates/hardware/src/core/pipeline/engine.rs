//! Pipeline engine: per-cycle stage advance and flush handling.
//!
//! This module owns the seven inter-stage latches and defines the order in
//! which stages are evaluated within a cycle:
//! 1. **Tail First:** Writeback, Memory2, Memory1, Execute2, Execute1, Decode, Fetch.
//!    Each stage reads its latch before the predecessor overwrites it, so one
//!    sequential pass models all seven stages working in parallel.
//! 2. **Stall Propagation:** A held Decode instruction sends a bubble to Execute1 and freezes Fetch.
//! 3. **Flush:** A taken transfer in Execute2 discards Execute1, Decode and Fetch and redirects the PC.
//! 4. **Startup:** Latches beyond Fetch start `Busy` and are cleared after the pipeline depth is reached.

use crate::common::constants::PIPELINE_DEPTH;
use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::latches::{Latch, PipelineEntry, Stage};
use crate::core::pipeline::snapshot::{CycleSnapshot, Redirect};
use crate::core::pipeline::stages::{
    decode_stage, execute1_stage, execute2_stage, fetch_stage, memory1_stage, memory2_stage,
    writeback_stage,
};

/// The seven pipeline latches.
///
/// Each field holds what the named stage will process on the next cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pipeline {
    /// What Fetch read on the last cycle.
    pub fetch: Latch,
    /// Fetch → Decode latch.
    pub decode: Latch,
    /// Decode → Execute1 latch.
    pub execute1: Latch,
    /// Execute1 → Execute2 latch.
    pub execute2: Latch,
    /// Execute2 → Memory1 latch.
    pub memory1: Latch,
    /// Memory1 → Memory2 latch.
    pub memory2: Latch,
    /// Memory2 → Writeback latch.
    pub writeback: Latch,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Creates a pipeline in its startup state: Fetch empty, every later stage `Busy`.
    pub const fn new() -> Self {
        Self {
            fetch: Latch::Bubble,
            decode: Latch::Busy,
            execute1: Latch::Busy,
            execute2: Latch::Busy,
            memory1: Latch::Busy,
            memory2: Latch::Busy,
            writeback: Latch::Busy,
        }
    }

    /// The latch feeding `stage`.
    pub const fn latch(&self, stage: Stage) -> &Latch {
        match stage {
            Stage::Fetch => &self.fetch,
            Stage::Decode => &self.decode,
            Stage::Execute1 => &self.execute1,
            Stage::Execute2 => &self.execute2,
            Stage::Memory1 => &self.memory1,
            Stage::Memory2 => &self.memory2,
            Stage::Writeback => &self.writeback,
        }
    }

    /// Instructions that have passed Execute1 but not yet retired, i.e. whose
    /// destination is currently reserved in the scoreboard.
    pub fn issued(&self) -> impl Iterator<Item = &PipelineEntry> {
        [&self.execute2, &self.memory1, &self.memory2, &self.writeback]
            .into_iter()
            .filter_map(Latch::entry)
    }

    /// Returns `true` if no latch beyond Fetch carries a real instruction.
    pub fn is_drained(&self) -> bool {
        [
            &self.decode,
            &self.execute1,
            &self.execute2,
            &self.memory1,
            &self.memory2,
            &self.writeback,
        ]
        .into_iter()
        .all(|latch| !latch.is_occupied())
    }

    /// Runs one cycle of the entire pipeline.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError`] from Memory1 (bad data address) or Execute2
    /// (bad branch target). The machine state is then mid-cycle and the run
    /// must not continue.
    pub fn tick(&mut self, cpu: &mut Cpu) -> Result<CycleSnapshot, SimError> {
        cpu.stats.cycles += 1;
        let mut snapshot = CycleSnapshot::new(cpu.stats.cycles);

        writeback_stage(cpu, &mut self.writeback, &mut snapshot);
        memory2_stage(&mut self.memory2, &mut self.writeback, &mut snapshot);
        memory1_stage(cpu, &mut self.memory1, &mut self.memory2, &mut snapshot)?;
        let redirect = execute2_stage(cpu, &mut self.execute2, &mut self.memory1, &mut snapshot)?;

        if let Some(redirect) = redirect {
            self.flush(cpu, redirect, &mut snapshot);
        } else {
            execute1_stage(cpu, &mut self.execute1, &mut self.execute2, &mut snapshot);
            let downstream = [&self.execute2, &self.memory1, &self.memory2, &self.writeback];
            let stall = decode_stage(
                cpu,
                &mut self.decode,
                &mut self.execute1,
                downstream,
                &mut snapshot,
            );
            fetch_stage(
                cpu,
                &mut self.fetch,
                &mut self.decode,
                stall.is_some(),
                &mut snapshot,
            );
            snapshot.stall = stall;
        }

        if cpu.stats.cycles == PIPELINE_DEPTH {
            self.clear_busy();
        }

        snapshot.pc = cpu.pc;
        snapshot.zero_flag = cpu.zero_flag;
        snapshot.completed = cpu.completed;
        Ok(snapshot)
    }

    /// Discards Execute1, Decode and Fetch after a taken transfer and points Fetch at the target.
    ///
    /// The discarded instructions never reached Execute1's evaluation, so none
    /// of them reserved a register or touched memory.
    fn flush(&mut self, cpu: &mut Cpu, redirect: Redirect, snapshot: &mut CycleSnapshot) {
        let squashed = [&self.execute1, &self.decode]
            .into_iter()
            .filter(|latch| latch.is_occupied())
            .count();

        snapshot.record(Stage::Execute1, self.execute1.take());
        snapshot.record(Stage::Decode, self.decode.take());
        self.fetch = Latch::Bubble;
        snapshot.redirect = Some(redirect);
        snapshot.squashed = squashed;

        cpu.pc = redirect.target_pc;
        if cpu.halt_fetched {
            cpu.restore_fetch();
            tracing::debug!("flushed a decoded HALT, fetch resumed");
        }
        cpu.stats.flushes += 1;
        cpu.stats.flushed_instructions += squashed as u64;

        tracing::debug!(
            from = redirect.branch_pc,
            to = redirect.target_pc,
            squashed,
            "pipeline flush"
        );
    }

    /// Turns every remaining startup slot into a bubble.
    fn clear_busy(&mut self) {
        for latch in [
            &mut self.fetch,
            &mut self.decode,
            &mut self.execute1,
            &mut self.execute2,
            &mut self.memory1,
            &mut self.memory2,
            &mut self.writeback,
        ] {
            if *latch == Latch::Busy {
                *latch = Latch::Bubble;
            }
        }
        tracing::debug!("pipeline filled, busy state cleared");
    }
}
