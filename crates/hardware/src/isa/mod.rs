//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the APEX opcode set, the decoded instruction record, the instruction
//! table a program is loaded into, and the formatter used by traces.
//!
//! # Instruction classes
//!
//! * Moves: `MOVC`.
//! * Arithmetic and logic: `ADD`, `SUB`, `MUL`, `AND`, `OR`, `XOR`, `ADDL`, `SUBL`.
//! * Memory: `LOAD`, `LDR`, `STORE`, `STR`.
//! * Control: `BZ`, `BNZ`, `JUMP`, `HALT`, `NOP`.

/// Source-text formatter for decoded instructions.
pub mod disasm;

/// The decoded instruction record.
pub mod instruction;

/// Opcode enumeration and static opcode properties.
pub mod opcode;

/// Immutable instruction table addressed by PC-derived index.
pub mod table;

pub use instruction::Instruction;
pub use opcode::{Format, Opcode};
pub use table::InstructionTable;
