//! Memory Stages (MEM1, MEM2).
//!
//! Memory1 performs the single data-memory access of LOAD, LDR, STORE and STR.
//! A loaded value is written into the register file immediately; its validity
//! bit is restored only when the load reaches Writeback. Memory2 is a
//! pass-through stage that models the second half of the memory access.

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::latches::{Latch, Stage};
use crate::core::pipeline::snapshot::CycleSnapshot;

/// Executes the Memory1 stage.
///
/// # Errors
///
/// Returns [`SimError::DataAddressOutOfRange`] if the resolved address lies
/// outside data memory.
pub fn memory1_stage(
    cpu: &mut Cpu,
    input: &mut Latch,
    output: &mut Latch,
    snapshot: &mut CycleSnapshot,
) -> Result<(), SimError> {
    let mut latch = input.take();

    if let Latch::Occupied(m1) = &mut latch {
        let fault = SimError::DataAddressOutOfRange {
            pc: m1.pc,
            address: m1.mem_addr,
            size: cpu.memory.size(),
        };
        if m1.ctrl.mem_write {
            cpu.memory.write(m1.mem_addr, m1.rv1).ok_or(fault)?;
            tracing::trace!(pc = m1.pc, addr = m1.mem_addr, value = m1.rv1, "M1 store");
        } else if m1.ctrl.mem_read {
            let value = cpu.memory.read(m1.mem_addr).ok_or(fault)?;
            m1.result = value;
            cpu.regs.write(m1.inst.rd, value);
            tracing::trace!(pc = m1.pc, addr = m1.mem_addr, value, "M1 load");
        }
    }

    snapshot.record(Stage::Memory1, latch.clone());
    *output = latch;
    Ok(())
}

/// Executes the Memory2 stage.
pub fn memory2_stage(input: &mut Latch, output: &mut Latch, snapshot: &mut CycleSnapshot) {
    let latch = input.take();
    snapshot.record(Stage::Memory2, latch.clone());
    *output = latch;
}
