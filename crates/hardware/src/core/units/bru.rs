//! Branch Resolution Unit (BRU).
//!
//! Evaluates conditional branches against the zero flag and computes control
//! transfer targets in Execute2. There is no prediction: fetch always proceeds
//! sequentially and a taken transfer flushes the younger stages.

use crate::core::pipeline::latches::PipelineEntry;
use crate::isa::Opcode;

/// Returns the target address of a taken branch or jump, or `None` if control
/// continues sequentially.
///
/// BZ is taken when the zero flag is set and BNZ when it is clear; both are
/// relative to the branch's own PC. JUMP is always taken to `rs1 + imm`.
pub fn resolve(entry: &PipelineEntry, zero_flag: bool) -> Option<i64> {
    let relative = i64::from(entry.pc) + i64::from(entry.inst.imm);
    match entry.inst.opcode {
        Opcode::Bz if zero_flag => Some(relative),
        Opcode::Bnz if !zero_flag => Some(relative),
        Opcode::Jump => Some(i64::from(entry.rv1) + i64::from(entry.inst.imm)),
        _ => None,
    }
}
