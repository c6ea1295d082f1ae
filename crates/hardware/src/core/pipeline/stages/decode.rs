//! Decode/Register-Fetch (DRF) Stage.
//!
//! This module implements the second stage of the pipeline. It performs the following:
//! 1. **Decoding:** Derives control signals from the opcode.
//! 2. **Hazard Detection:** Holds the instruction while a register it depends on is pending,
//!    or while a conditional branch waits for older instructions to drain.
//! 3. **Register Read:** Reads source operands from the register file once the instruction may issue.
//! 4. **Halt Detection:** Stops fetch when HALT issues.

use crate::core::Cpu;
use crate::core::pipeline::hazards::{self, StallCause};
use crate::core::pipeline::latches::{Latch, Stage};
use crate::core::pipeline::signals::ControlSignals;
use crate::core::pipeline::snapshot::CycleSnapshot;

/// Executes the decode stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `input` - The Fetch → Decode latch; refilled with the held instruction on a stall
/// * `output` - The Decode → Execute1 latch
/// * `downstream` - Execute2, Memory1, Memory2 and Writeback latches as filled this cycle
/// * `snapshot` - Record of the current cycle
///
/// # Returns
///
/// The reason the instruction was held, or `None` if Decode advanced. A held
/// instruction sends a bubble to Execute1 and freezes Fetch.
pub fn decode_stage(
    cpu: &mut Cpu,
    input: &mut Latch,
    output: &mut Latch,
    downstream: [&Latch; 4],
    snapshot: &mut CycleSnapshot,
) -> Option<StallCause> {
    let mut latch = input.take();

    let cause = match &mut latch {
        Latch::Occupied(id) => {
            id.ctrl = ControlSignals::for_opcode(id.inst.opcode);
            let cause = hazards::stall_cause(&id.inst, &cpu.regs, downstream);
            id.stalled = cause.is_some();
            if cause.is_none() {
                id.rv1 = cpu.regs.read(id.inst.rs1);
                id.rv2 = cpu.regs.read(id.inst.rs2);
                id.rv3 = cpu.regs.read(id.inst.rs3);
                if id.ctrl.halt {
                    cpu.halt_fetched = true;
                    cpu.logical_size = id.index + 1;
                    tracing::debug!(pc = id.pc, "HALT decoded, fetch stopped");
                }
                tracing::trace!(pc = id.pc, inst = %id.inst, "DRF issue");
            }
            cause
        }
        Latch::Busy | Latch::Bubble => None,
    };

    snapshot.record(Stage::Decode, latch.clone());

    match cause {
        Some(cause) => {
            match cause {
                StallCause::Data { register } => {
                    cpu.stats.stalls_data += 1;
                    tracing::trace!(register, "DRF stall on pending register");
                }
                StallCause::Drain => {
                    cpu.stats.stalls_control += 1;
                    tracing::trace!("DRF branch waiting for pipeline drain");
                }
            }
            *input = latch;
            *output = Latch::Bubble;
        }
        None => *output = latch,
    }
    cause
}
