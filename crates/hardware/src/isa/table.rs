//! Instruction table.
//!
//! The immutable, randomly indexable sequence of decoded instructions a program
//! consists of. Index `i` is fetched from `code_base + i * INSTRUCTION_WIDTH`.

use std::ops::Index;

use super::instruction::Instruction;
use crate::common::error::LoadError;

/// Ordered, zero-indexed, non-empty list of instructions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionTable {
    instructions: Vec<Instruction>,
}

impl InstructionTable {
    /// Wraps a list of instructions.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Empty`] if `instructions` is empty.
    pub fn new(instructions: Vec<Instruction>) -> Result<Self, LoadError> {
        if instructions.is_empty() {
            return Err(LoadError::Empty);
        }
        Ok(Self { instructions })
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Always `false`; an empty table cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Iterates over the instructions in program order.
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }
}

impl Index<usize> for InstructionTable {
    type Output = Instruction;

    fn index(&self, index: usize) -> &Instruction {
        &self.instructions[index]
    }
}

impl<'a> IntoIterator for &'a InstructionTable {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}
