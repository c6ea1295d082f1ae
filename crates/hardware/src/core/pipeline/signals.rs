//! Pipeline control signals and operation types.
//!
//! This module defines the signals that control instruction execution. It performs:
//! 1. **Operation Classification:** Maps each opcode onto the ALU operation it needs.
//! 2. **Operand Selection:** Defines sources for ALU inputs (registers, zero, or immediate).
//! 3. **Stage Enables:** Register write, memory read/write, zero-flag update and control transfer.
//!
//! Decode derives a [`ControlSignals`] for every instruction it issues; the later
//! stages consult only these signals, never the opcode directly.

use crate::isa::Opcode;

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// No ALU work (memory, control and no-op instructions).
    #[default]
    None,

    /// Integer addition.
    Add,

    /// Integer subtraction.
    Sub,

    /// Integer multiply (low 32 bits).
    Mul,

    /// Bitwise AND.
    And,

    /// Bitwise OR.
    Or,

    /// Bitwise XOR.
    Xor,
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Use `rs1` register value.
    #[default]
    Reg1,

    /// Use zero.
    Zero,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Use the immediate value.
    #[default]
    Imm,

    /// Use `rs2` register value.
    Reg2,
}

/// Control signals attached to an instruction at Decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Instruction writes `rd`.
    pub reg_write: bool,
    /// Enable memory read operation (load).
    pub mem_read: bool,
    /// Enable memory write operation (store).
    pub mem_write: bool,
    /// Writeback updates the zero flag from the result.
    pub sets_zero: bool,
    /// Instruction is a conditional branch (BZ/BNZ).
    pub branch: bool,
    /// Instruction is HALT.
    pub halt: bool,
    /// ALU operation to perform.
    pub alu: AluOp,
    /// Source selection for ALU operand A.
    pub a_src: OpASrc,
    /// Source selection for ALU operand B.
    pub b_src: OpBSrc,
}

impl ControlSignals {
    /// Derives the control signals for `op`.
    pub fn for_opcode(op: Opcode) -> Self {
        let alu = match op {
            Opcode::Movc | Opcode::Add | Opcode::Addl => AluOp::Add,
            Opcode::Sub | Opcode::Subl => AluOp::Sub,
            Opcode::Mul => AluOp::Mul,
            Opcode::And => AluOp::And,
            Opcode::Or => AluOp::Or,
            Opcode::Xor => AluOp::Xor,
            Opcode::Load
            | Opcode::Ldr
            | Opcode::Store
            | Opcode::Str
            | Opcode::Bz
            | Opcode::Bnz
            | Opcode::Jump
            | Opcode::Halt
            | Opcode::Nop => AluOp::None,
        };
        let a_src = if op == Opcode::Movc {
            OpASrc::Zero
        } else {
            OpASrc::Reg1
        };
        let b_src = match op {
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::And | Opcode::Or | Opcode::Xor => {
                OpBSrc::Reg2
            }
            _ => OpBSrc::Imm,
        };
        Self {
            reg_write: op.writes_register(),
            mem_read: op.is_load(),
            mem_write: op.is_store(),
            sets_zero: op.is_arithmetic(),
            branch: op.is_conditional_branch(),
            halt: op == Opcode::Halt,
            alu,
            a_src,
            b_src,
        }
    }
}
