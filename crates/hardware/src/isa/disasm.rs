//! Instruction formatter for APEX.
//!
//! Renders a decoded [`Instruction`] back into the comma-separated source form
//! accepted by the loader, for stage traces, logging and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use apex_core::isa::disasm::disassemble;
//! use apex_core::isa::{Instruction, Opcode};
//!
//! let inst = Instruction::new(Opcode::Addl).with_rd(1).with_rs1(2).with_imm(-3);
//! assert_eq!(disassemble(&inst), "ADDL,R1,R2,#-3");
//! ```

use std::fmt;

use super::instruction::Instruction;
use super::opcode::Format;

/// Returns the source-text form of `inst`, e.g. `STORE,R1,R2,#8`.
pub fn disassemble(inst: &Instruction) -> String {
    let op = inst.opcode.mnemonic();
    match inst.format() {
        Format::RdImm => format!("{op},R{},#{}", inst.rd, inst.imm),
        Format::RdRs1Rs2 => format!("{op},R{},R{},R{}", inst.rd, inst.rs1, inst.rs2),
        Format::RdRs1Imm => format!("{op},R{},R{},#{}", inst.rd, inst.rs1, inst.imm),
        Format::Rs1Rs2Imm => format!("{op},R{},R{},#{}", inst.rs1, inst.rs2, inst.imm),
        Format::Rs1Rs2Rs3 => format!("{op},R{},R{},R{}", inst.rs1, inst.rs2, inst.rs3),
        Format::Imm => format!("{op},#{}", inst.imm),
        Format::Rs1Imm => format!("{op},R{},#{}", inst.rs1, inst.imm),
        Format::Bare => op.to_string(),
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&disassemble(self))
    }
}
