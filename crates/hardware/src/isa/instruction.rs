//! Decoded APEX instruction record.
//!
//! An [`Instruction`] is the fixed-form record produced by the program loader:
//! an opcode plus every field any opcode might use. Which fields are meaningful
//! depends on the opcode's [`Format`](super::opcode::Format).

use super::opcode::{Format, Opcode};

/// One decoded instruction.
///
/// Unused fields are zero. The record is immutable once placed in an
/// [`InstructionTable`](super::table::InstructionTable).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// Operation.
    pub opcode: Opcode,
    /// Destination register.
    pub rd: usize,
    /// First source register (the stored value for STORE/STR, the base for JUMP).
    pub rs1: usize,
    /// Second source register (the base for STORE).
    pub rs2: usize,
    /// Third source register (the base for STR).
    pub rs3: usize,
    /// Signed immediate.
    pub imm: i32,
}

impl Instruction {
    /// Creates an instruction with every field zero.
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            ..Self::default()
        }
    }

    /// Sets the destination register.
    #[must_use]
    pub const fn with_rd(mut self, rd: usize) -> Self {
        self.rd = rd;
        self
    }

    /// Sets the first source register.
    #[must_use]
    pub const fn with_rs1(mut self, rs1: usize) -> Self {
        self.rs1 = rs1;
        self
    }

    /// Sets the second source register.
    #[must_use]
    pub const fn with_rs2(mut self, rs2: usize) -> Self {
        self.rs2 = rs2;
        self
    }

    /// Sets the third source register.
    #[must_use]
    pub const fn with_rs3(mut self, rs3: usize) -> Self {
        self.rs3 = rs3;
        self
    }

    /// Sets the immediate.
    #[must_use]
    pub const fn with_imm(mut self, imm: i32) -> Self {
        self.imm = imm;
        self
    }

    /// Source registers that must be valid before Decode may issue the instruction.
    ///
    /// STR waits on all three sources; ADDL, SUBL, LOAD and JUMP on `rs1`;
    /// MOVC, BZ, BNZ, HALT and NOP on nothing; everything else on `rs1` and `rs2`.
    pub const fn sources(&self) -> [Option<usize>; 3] {
        match self.opcode {
            Opcode::Str => [Some(self.rs1), Some(self.rs2), Some(self.rs3)],
            Opcode::Addl | Opcode::Subl | Opcode::Load | Opcode::Jump => {
                [Some(self.rs1), None, None]
            }
            Opcode::Movc | Opcode::Bz | Opcode::Bnz | Opcode::Halt | Opcode::Nop => [None; 3],
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Ldr
            | Opcode::Store => [Some(self.rs1), Some(self.rs2), None],
        }
    }

    /// Register written by the instruction, if any.
    pub const fn destination(&self) -> Option<usize> {
        if self.opcode.writes_register() {
            Some(self.rd)
        } else {
            None
        }
    }

    /// Operand layout of the instruction's opcode.
    pub const fn format(&self) -> Format {
        self.opcode.format()
    }
}
