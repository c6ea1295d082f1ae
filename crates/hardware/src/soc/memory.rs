//! Data Memory.
//!
//! This module implements the APEX data memory. It provides:
//! 1. **Storage:** A flat, zero-initialized array of 32-bit words.
//! 2. **Checked Access:** Word-addressed reads and writes that reject addresses outside the array.
//! 3. **Observability:** A dump of every non-zero word for the final-state report.
//!
//! Addresses are word indices: address `n` names the `n`-th word.

use serde::Serialize;

/// A non-zero word of data memory, as reported in the final-state dump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MemoryWord {
    /// Word address.
    pub address: usize,
    /// Stored value.
    pub value: i32,
}

/// Flat word-addressed data memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    words: Vec<i32>,
}

impl DataMemory {
    /// Creates a zero-filled memory of `size` words.
    pub fn new(size: usize) -> Self {
        Self {
            words: vec![0; size],
        }
    }

    /// Number of words.
    pub fn size(&self) -> usize {
        self.words.len()
    }

    /// Converts a resolved address into a word index, if it lies inside memory.
    #[inline]
    pub fn slot(&self, address: i64) -> Option<usize> {
        usize::try_from(address)
            .ok()
            .filter(|&idx| idx < self.words.len())
    }

    /// Reads the word at `address`, or `None` if the address is out of range.
    #[inline]
    pub fn read(&self, address: i64) -> Option<i32> {
        self.slot(address).map(|idx| self.words[idx])
    }

    /// Writes `value` at `address`, returning `None` if the address is out of range.
    #[inline]
    pub fn write(&mut self, address: i64, value: i32) -> Option<()> {
        let idx = self.slot(address)?;
        self.words[idx] = value;
        Some(())
    }

    /// Every non-zero word, in address order.
    pub fn dump(&self) -> Vec<MemoryWord> {
        self.words
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != 0)
            .map(|(address, &value)| MemoryWord { address, value })
            .collect()
    }
}
