//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline.
//! It commits results to the register file, releases the destination in the
//! scoreboard, updates the zero flag for arithmetic results, advances the
//! completion count, and ends the run when HALT retires.

use crate::core::Cpu;
use crate::core::pipeline::latches::{Latch, Stage};
use crate::core::pipeline::snapshot::CycleSnapshot;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `input` - The Memory2 → Writeback latch; left holding a bubble
/// * `snapshot` - Record of the current cycle
///
/// # Behavior
///
/// - Writes the ALU result to `rd` (loads already wrote theirs in Memory1)
/// - Marks `rd` valid again, which may release a stalled Decode this same cycle
/// - Sets the zero flag from arithmetic results
/// - Sets the completed count to the index of the next instruction in program order
/// - Stops the run when HALT retires
pub fn writeback_stage(cpu: &mut Cpu, input: &mut Latch, snapshot: &mut CycleSnapshot) {
    let latch = input.take();

    if let Latch::Occupied(wb) = &latch {
        if wb.ctrl.reg_write {
            if !wb.ctrl.mem_read {
                cpu.regs.write(wb.inst.rd, wb.result);
            }
            cpu.regs.commit(wb.inst.rd);
        }
        if wb.ctrl.sets_zero {
            cpu.zero_flag = wb.result == 0;
        }
        cpu.completed = wb.next_index();
        cpu.stats.record_retire(wb.inst.opcode);

        tracing::trace!(
            index = wb.index,
            pc = wb.pc,
            inst = %wb.inst,
            result = wb.result,
            "WB retire"
        );

        if wb.ctrl.halt {
            cpu.halted = true;
            tracing::debug!(pc = wb.pc, "HALT retired");
        }
    }

    snapshot.record(Stage::Writeback, latch);
}
