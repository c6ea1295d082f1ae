//! APEX opcode set.
//!
//! This module defines the closed enumeration of APEX opcodes together with the
//! static properties the pipeline keys off: operand layout, mnemonic text and
//! instruction class.

use std::fmt;

/// Every operation the APEX machine understands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `rd <- imm`.
    Movc,
    /// `rd <- rs1 + rs2`.
    Add,
    /// `rd <- rs1 - rs2`.
    Sub,
    /// `rd <- rs1 * rs2`.
    Mul,
    /// `rd <- rs1 & rs2`.
    And,
    /// `rd <- rs1 | rs2`.
    Or,
    /// `rd <- rs1 ^ rs2`.
    Xor,
    /// `rd <- rs1 + imm`.
    Addl,
    /// `rd <- rs1 - imm`.
    Subl,
    /// `rd <- mem[rs1 + imm]`.
    Load,
    /// `rd <- mem[rs1 + rs2]`.
    Ldr,
    /// `mem[rs2 + imm] <- rs1`.
    Store,
    /// `mem[rs3 + rs2] <- rs1`.
    Str,
    /// Branch to `pc + imm` when the zero flag is set.
    Bz,
    /// Branch to `pc + imm` when the zero flag is clear.
    Bnz,
    /// Jump to `rs1 + imm`.
    Jump,
    /// Stop fetching and drain the pipeline.
    Halt,
    /// No architectural effect.
    #[default]
    Nop,
}

/// Which instruction fields an opcode reads, in source-text order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// `rd, #imm` (MOVC).
    RdImm,
    /// `rd, rs1, rs2` (three-register ALU, LDR).
    RdRs1Rs2,
    /// `rd, rs1, #imm` (ADDL, SUBL, LOAD).
    RdRs1Imm,
    /// `rs1, rs2, #imm` (STORE).
    Rs1Rs2Imm,
    /// `rs1, rs2, rs3` (STR).
    Rs1Rs2Rs3,
    /// `#imm` (BZ, BNZ).
    Imm,
    /// `rs1, #imm` (JUMP).
    Rs1Imm,
    /// No operands (HALT, NOP).
    Bare,
}

impl Format {
    /// Number of operands the format carries.
    pub const fn operand_count(self) -> usize {
        match self {
            Self::RdRs1Rs2 | Self::RdRs1Imm | Self::Rs1Rs2Imm | Self::Rs1Rs2Rs3 => 3,
            Self::RdImm | Self::Rs1Imm => 2,
            Self::Imm => 1,
            Self::Bare => 0,
        }
    }
}

impl Opcode {
    /// All opcodes, in table order.
    pub const ALL: [Self; 18] = [
        Self::Movc,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Addl,
        Self::Subl,
        Self::Load,
        Self::Ldr,
        Self::Store,
        Self::Str,
        Self::Bz,
        Self::Bnz,
        Self::Jump,
        Self::Halt,
        Self::Nop,
    ];

    /// Canonical upper-case mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Movc => "MOVC",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Addl => "ADDL",
            Self::Subl => "SUBL",
            Self::Load => "LOAD",
            Self::Ldr => "LDR",
            Self::Store => "STORE",
            Self::Str => "STR",
            Self::Bz => "BZ",
            Self::Bnz => "BNZ",
            Self::Jump => "JUMP",
            Self::Halt => "HALT",
            Self::Nop => "NOP",
        }
    }

    /// Looks up an opcode by mnemonic, ignoring ASCII case.
    ///
    /// Accepts the historical spellings `EX-OR` for XOR and `HLT` for HALT.
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        let upper = text.trim().to_ascii_uppercase();
        match upper.as_str() {
            "EX-OR" => Some(Self::Xor),
            "HLT" => Some(Self::Halt),
            other => Self::ALL.into_iter().find(|op| op.mnemonic() == other),
        }
    }

    /// Operand layout of the opcode.
    pub const fn format(self) -> Format {
        match self {
            Self::Movc => Format::RdImm,
            Self::Add | Self::Sub | Self::Mul | Self::And | Self::Or | Self::Xor | Self::Ldr => {
                Format::RdRs1Rs2
            }
            Self::Addl | Self::Subl | Self::Load => Format::RdRs1Imm,
            Self::Store => Format::Rs1Rs2Imm,
            Self::Str => Format::Rs1Rs2Rs3,
            Self::Bz | Self::Bnz => Format::Imm,
            Self::Jump => Format::Rs1Imm,
            Self::Halt | Self::Nop => Format::Bare,
        }
    }

    /// Returns `true` for opcodes whose Writeback updates the zero flag.
    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Sub
                | Self::Mul
                | Self::And
                | Self::Or
                | Self::Xor
                | Self::Addl
                | Self::Subl
        )
    }

    /// Returns `true` for opcodes that produce a value in `rd`.
    pub const fn writes_register(self) -> bool {
        matches!(
            self.format(),
            Format::RdImm | Format::RdRs1Rs2 | Format::RdRs1Imm
        )
    }

    /// Returns `true` for LOAD and LDR.
    pub const fn is_load(self) -> bool {
        matches!(self, Self::Load | Self::Ldr)
    }

    /// Returns `true` for STORE and STR.
    pub const fn is_store(self) -> bool {
        matches!(self, Self::Store | Self::Str)
    }

    /// Returns `true` for the conditional branches BZ and BNZ.
    pub const fn is_conditional_branch(self) -> bool {
        matches!(self, Self::Bz | Self::Bnz)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
