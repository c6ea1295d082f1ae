//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline.
//! It reads the instruction addressed by the program counter from the
//! instruction table, hands it to Decode and advances the PC by one
//! instruction width. Fetch is frozen while Decode holds an instruction and
//! stops for good once HALT has been decoded.

use crate::common::constants::INSTRUCTION_WIDTH;
use crate::core::Cpu;
use crate::core::pipeline::latches::{Latch, PipelineEntry, Stage};
use crate::core::pipeline::snapshot::CycleSnapshot;

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `latch` - The Fetch latch, holding what Fetch read this cycle
/// * `output` - The Fetch → Decode latch
/// * `frozen` - Decode is holding its instruction; neither the latch nor the PC advances
/// * `snapshot` - Record of the current cycle
///
/// # Behavior
///
/// - Produces a bubble once HALT has been decoded, or when the PC has run past
///   the last reachable instruction
/// - Otherwise reads the instruction at the PC; if Decode is free, passes it on
///   and advances the PC
pub fn fetch_stage(
    cpu: &mut Cpu,
    latch: &mut Latch,
    output: &mut Latch,
    frozen: bool,
    snapshot: &mut CycleSnapshot,
) {
    let fetched = if cpu.halt_fetched {
        None
    } else {
        cpu.index_of(cpu.pc)
            .filter(|&index| index < cpu.logical_size)
            .and_then(|index| {
                cpu.program
                    .get(index)
                    .map(|inst| PipelineEntry::fetched(index, cpu.pc, *inst))
            })
    };
    *latch = fetched.map_or(Latch::Bubble, Latch::Occupied);
    snapshot.record(Stage::Fetch, latch.clone());

    if frozen {
        return;
    }

    *output = latch.clone();
    if let Latch::Occupied(entry) = latch {
        tracing::trace!(pc = entry.pc, inst = %entry.inst, "IF");
        cpu.pc += INSTRUCTION_WIDTH;
    }
}
