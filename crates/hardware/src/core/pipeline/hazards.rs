//! Data and Control Hazard Detection.
//!
//! This module implements the checks Decode runs before issuing an instruction.
//! The pipeline has no forwarding, so every hazard is resolved by stalling. It provides:
//! 1. **Source Readiness:** Read-after-write hazards against the scoreboard, per opcode class.
//! 2. **Destination Readiness:** Write-after-write hazards, keeping one outstanding writer per register.
//! 3. **Branch Drain:** Conditional branches wait until every older instruction has retired.

use crate::common::RegisterFile;
use crate::core::pipeline::latches::Latch;
use crate::isa::Instruction;

/// Why Decode is holding its instruction this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StallCause {
    /// A source or destination register has an outstanding writer.
    Data {
        /// The first register found pending.
        register: usize,
    },
    /// A conditional branch is waiting for older instructions to drain.
    Drain,
}

/// Returns the first register that blocks `inst` from issuing, if any.
///
/// Sources are checked per opcode class (see [`Instruction::sources`]); the
/// destination of a register-writing instruction must also be valid, so at
/// most one writer per register is ever in flight.
///
/// # Examples
///
/// ```
/// use apex_core::common::RegisterFile;
/// use apex_core::core::pipeline::hazards::blocking_register;
/// use apex_core::isa::{Instruction, Opcode};
///
/// let mut regs = RegisterFile::new();
/// regs.reserve(2);
///
/// let add = Instruction::new(Opcode::Add).with_rd(3).with_rs1(1).with_rs2(2);
/// assert_eq!(blocking_register(&add, &regs), Some(2));
///
/// let movc = Instruction::new(Opcode::Movc).with_rd(4).with_imm(7);
/// assert_eq!(blocking_register(&movc, &regs), None);
/// ```
pub fn blocking_register(inst: &Instruction, regs: &RegisterFile) -> Option<usize> {
    inst.sources()
        .into_iter()
        .flatten()
        .chain(inst.destination())
        .find(|&reg| !regs.is_valid(reg))
}

/// Returns `true` while a conditional branch at Decode must keep waiting.
///
/// `downstream` holds the latches of the four stages the branch would follow
/// (Execute2, Memory1, Memory2 and Writeback, as filled this cycle). The branch
/// issues only once all of them are empty, so the zero flag it reads in
/// Execute2 reflects every older instruction.
pub fn branch_must_drain(downstream: [&Latch; 4]) -> bool {
    downstream.iter().any(|latch| latch.is_occupied())
}

/// Evaluates the stall rules for `inst`, checking the branch drain first.
pub fn stall_cause(
    inst: &Instruction,
    regs: &RegisterFile,
    downstream: [&Latch; 4],
) -> Option<StallCause> {
    if inst.opcode.is_conditional_branch() && branch_must_drain(downstream) {
        return Some(StallCause::Drain);
    }
    blocking_register(inst, regs).map(|register| StallCause::Data { register })
}
