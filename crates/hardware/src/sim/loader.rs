//! Program Loader.
//!
//! This module turns APEX assembly text into an [`InstructionTable`]. It performs:
//! 1. **Tokenizing:** Splits each line into a mnemonic and operands on commas and whitespace.
//! 2. **Operand decoding:** Reads `Rn` registers and `#n` immediates in the order the opcode's format dictates.
//! 3. **Validation:** Rejects unknown mnemonics, wrong operand counts, malformed operands and
//!    register ids outside the register file, reporting the 1-based source line.
//!
//! Blank lines and lines starting with `;` or `//` are skipped.

use std::fs;
use std::path::Path;

use crate::common::constants::NUM_REGS;
use crate::common::error::LoadError;
use crate::isa::{Format, Instruction, InstructionTable, Opcode};

/// Reads and parses a program file.
///
/// # Errors
///
/// Returns [`LoadError::Unreadable`] if the file cannot be read, and any
/// error [`parse_program`] reports for its contents.
pub fn load_program(path: impl AsRef<Path>) -> Result<InstructionTable, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_program(&text)?;
    tracing::info!(path = %path.display(), instructions = table.len(), "program loaded");
    Ok(table)
}

/// Parses a whole program.
///
/// # Errors
///
/// Returns the first per-line error, or [`LoadError::Empty`] if no line holds an instruction.
///
/// # Examples
///
/// ```
/// use apex_core::isa::Opcode;
/// use apex_core::sim::loader::parse_program;
///
/// let table = parse_program("MOVC,R1,#5\nADDL R2, R1, #-1\nHALT\n").unwrap();
/// assert_eq!(table.len(), 3);
/// assert_eq!(table[1].opcode, Opcode::Addl);
/// assert_eq!(table[1].imm, -1);
/// ```
pub fn parse_program(text: &str) -> Result<InstructionTable, LoadError> {
    let mut instructions = Vec::new();
    for (n, line) in text.lines().enumerate() {
        if let Some(inst) = parse_line(n + 1, line)? {
            instructions.push(inst);
        }
    }
    InstructionTable::new(instructions)
}

/// Parses one source line; `line_no` is 1-based and only used in errors.
///
/// Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// See [`LoadError`] for the malformed-line cases.
pub fn parse_line(line_no: usize, text: &str) -> Result<Option<Instruction>, LoadError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with(';') || text.starts_with("//") {
        return Ok(None);
    }

    let mut tokens = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());
    let Some(mnemonic) = tokens.next() else {
        return Ok(None);
    };
    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| LoadError::InvalidOpcode {
        line: line_no,
        mnemonic: mnemonic.to_string(),
    })?;
    let operands: Vec<&str> = tokens.collect();

    let format = opcode.format();
    if operands.len() != format.operand_count() {
        return Err(LoadError::OperandCount {
            line: line_no,
            mnemonic: opcode.mnemonic(),
            expected: format.operand_count(),
            found: operands.len(),
        });
    }

    let reg = |i: usize| register(line_no, operands[i]);
    let imm = |i: usize| immediate(line_no, operands[i]);
    let inst = Instruction::new(opcode);
    let inst = match format {
        Format::RdImm => inst.with_rd(reg(0)?).with_imm(imm(1)?),
        Format::RdRs1Rs2 => inst
            .with_rd(reg(0)?)
            .with_rs1(reg(1)?)
            .with_rs2(reg(2)?),
        Format::RdRs1Imm => inst
            .with_rd(reg(0)?)
            .with_rs1(reg(1)?)
            .with_imm(imm(2)?),
        Format::Rs1Rs2Imm => inst
            .with_rs1(reg(0)?)
            .with_rs2(reg(1)?)
            .with_imm(imm(2)?),
        Format::Rs1Rs2Rs3 => inst
            .with_rs1(reg(0)?)
            .with_rs2(reg(1)?)
            .with_rs3(reg(2)?),
        Format::Imm => inst.with_imm(imm(0)?),
        Format::Rs1Imm => inst.with_rs1(reg(0)?).with_imm(imm(1)?),
        Format::Bare => inst,
    };
    Ok(Some(inst))
}

/// Decodes an `Rn` operand.
fn register(line: usize, text: &str) -> Result<usize, LoadError> {
    let bad = || LoadError::BadOperand {
        line,
        text: text.to_string(),
    };
    let digits = text
        .strip_prefix('R')
        .or_else(|| text.strip_prefix('r'))
        .ok_or_else(bad)?;
    let register: usize = digits.parse().map_err(|_| bad())?;
    if register >= NUM_REGS {
        return Err(LoadError::RegisterOutOfRange { line, register });
    }
    Ok(register)
}

/// Decodes a `#n` operand.
fn immediate(line: usize, text: &str) -> Result<i32, LoadError> {
    text.strip_prefix('#')
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| LoadError::BadOperand {
            line,
            text: text.to_string(),
        })
}
