//! Load-time and run-time error definitions.
//!
//! This module defines the error types surfaced by the simulator. It provides:
//! 1. **Load Errors:** Unreadable or empty programs and malformed instruction text.
//! 2. **Simulation Errors:** Resolved data addresses or branch targets outside the machine.
//! 3. **Configuration Errors:** Malformed JSON configuration documents.
//!
//! Hazard stalls and taken branches are ordinary control flow and never appear here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning program text into an instruction table.
///
/// Any of these is fatal: no simulation is performed on a program that failed to load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program source could not be read.
    #[error("could not read program `{}`: {source}", path.display())]
    Unreadable {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The program contained no instructions.
    #[error("program contains no instructions")]
    Empty,

    /// A line starts with a mnemonic outside the APEX opcode set.
    #[error("line {line}: unknown opcode `{mnemonic}`")]
    InvalidOpcode {
        /// 1-based source line.
        line: usize,
        /// The offending mnemonic as written.
        mnemonic: String,
    },

    /// An instruction has the wrong number of operands for its opcode.
    #[error("line {line}: {mnemonic} expects {expected} operand(s), found {found}")]
    OperandCount {
        /// 1-based source line.
        line: usize,
        /// Canonical mnemonic of the instruction.
        mnemonic: &'static str,
        /// Operands required by the opcode.
        expected: usize,
        /// Operands present on the line.
        found: usize,
    },

    /// An operand is neither a register (`Rn`) nor an immediate (`#n`) where one is expected.
    #[error("line {line}: malformed operand `{text}`")]
    BadOperand {
        /// 1-based source line.
        line: usize,
        /// The offending operand text.
        text: String,
    },

    /// A register operand names a register outside `R0`-`R31`.
    #[error("line {line}: register R{register} does not exist")]
    RegisterOutOfRange {
        /// 1-based source line.
        line: usize,
        /// The register number as written.
        register: usize,
    },
}

/// Errors raised while the pipeline is running.
///
/// These indicate that a program drove the model outside its fixed arrays. The run is
/// aborted at the offending cycle; nothing is wrapped or truncated.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// A load or store resolved to an address outside data memory.
    #[error("instruction at pc {pc} accessed data address {address}, outside memory of {size} words")]
    DataAddressOutOfRange {
        /// PC of the memory instruction.
        pc: u32,
        /// Resolved address.
        address: i64,
        /// Number of words in data memory.
        size: usize,
    },

    /// A taken branch or jump resolved to a PC that does not name an instruction slot.
    #[error("control transfer at pc {pc} targets {target}, outside code memory")]
    BranchTargetOutOfRange {
        /// PC of the branch or jump.
        pc: u32,
        /// Resolved target address.
        target: i64,
    },
}

/// Errors raised while reading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read configuration `{}`: {source}", path.display())]
    Unreadable {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The document is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The program does not fit in the 32-bit address space above the code base.
    #[error("{instructions} instruction(s) at code base {code_base} run past the end of the address space")]
    CodeRangeOverflow {
        /// Configured address of instruction 0.
        code_base: u32,
        /// Number of instructions in the program.
        instructions: usize,
    },
}
