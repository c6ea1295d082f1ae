//! Load/Store Unit (LSU) address generation.
//!
//! Computes the data-memory address of LOAD, LDR, STORE and STR in Execute1.
//! The address is kept as an `i64` so that Memory1 can reject negative or
//! oversized results instead of wrapping them.

use crate::core::pipeline::latches::PipelineEntry;
use crate::isa::Opcode;

/// Returns the effective address of a memory instruction, or `None` for any other opcode.
///
/// | Opcode | Address     |
/// |--------|-------------|
/// | LOAD   | `rs1 + imm` |
/// | LDR    | `rs1 + rs2` |
/// | STORE  | `rs2 + imm` |
/// | STR    | `rs3 + rs2` |
pub fn effective_address(entry: &PipelineEntry) -> Option<i64> {
    let (base, offset) = match entry.inst.opcode {
        Opcode::Load => (entry.rv1, entry.inst.imm),
        Opcode::Ldr => (entry.rv1, entry.rv2),
        Opcode::Store => (entry.rv2, entry.inst.imm),
        Opcode::Str => (entry.rv3, entry.rv2),
        _ => return None,
    };
    Some(i64::from(base) + i64::from(offset))
}
