//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! architectural state of the APEX machine. It coordinates the following:
//! 1. **State Management:** Maintains registers, the zero flag and the program counter.
//! 2. **Code Memory:** Maps program counters onto instruction-table indices.
//! 3. **Run Control:** Tracks HALT, the logical program size and completion accounting.
//! 4. **Data Memory:** Owns the flat word array serviced by Memory1.
//!
//! The pipeline latches live beside the `Cpu` in [`Pipeline`](crate::core::pipeline::engine::Pipeline);
//! each stage function receives the `Cpu` mutably and touches only the state its contract permits.

use crate::common::constants::INSTRUCTION_WIDTH;
use crate::common::error::ConfigError;
use crate::common::{RegisterFile, RegisterState};
use crate::config::Config;
use crate::isa::InstructionTable;
use crate::soc::{DataMemory, MemoryWord};
use crate::stats::SimStats;

/// Main CPU structure containing all architectural state.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// The program being executed.
    pub program: InstructionTable,
    /// Register values and validity bits.
    pub regs: RegisterFile,
    /// Data memory.
    pub memory: DataMemory,
    /// Program counter of the next instruction Fetch will read.
    pub pc: u32,
    /// PC of instruction 0.
    pub code_base: u32,
    /// Set when the last arithmetic result written back was zero. Written only by Writeback.
    pub zero_flag: bool,
    /// HALT has passed Decode; Fetch is stopped. Written only by Decode (and cleared by a flush).
    pub halt_fetched: bool,
    /// HALT has retired; the run is over.
    pub halted: bool,
    /// Number of table entries that can still be reached; truncated when HALT is decoded.
    pub logical_size: usize,
    /// Completed-instruction count: the table index execution has progressed to.
    pub completed: usize,
    /// Number of registers included in the final-state dump.
    pub dump_registers: usize,
    /// Performance statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates the architectural state for `program`.
    ///
    /// Registers and memory start zeroed and valid, the zero flag starts set,
    /// and the PC points at instruction 0.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CodeRangeOverflow`] if the program does not fit
    /// above the configured code base.
    pub fn new(program: InstructionTable, config: &Config) -> Result<Self, ConfigError> {
        config.check_code_range(program.len())?;
        let logical_size = program.len();
        Ok(Self {
            program,
            regs: RegisterFile::new(),
            memory: DataMemory::new(config.memory.data_words),
            pc: config.general.code_base,
            code_base: config.general.code_base,
            zero_flag: true,
            halt_fetched: false,
            halted: false,
            logical_size,
            completed: 0,
            dump_registers: config.report.dump_registers,
            stats: SimStats::default(),
        })
    }

    /// Instruction-table index addressed by `pc`, or `None` if `pc` is below the
    /// code base or not on an instruction boundary.
    pub const fn index_of(&self, pc: u32) -> Option<usize> {
        if pc < self.code_base {
            return None;
        }
        let offset = pc - self.code_base;
        if offset % INSTRUCTION_WIDTH != 0 {
            return None;
        }
        Some((offset / INSTRUCTION_WIDTH) as usize)
    }

    /// Validates a resolved control-transfer target.
    ///
    /// Returns the target PC and its table index when the target names an
    /// instruction slot or the slot one past the last instruction.
    pub fn resolve_target(&self, target: i64) -> Option<(u32, usize)> {
        let pc = u32::try_from(target).ok()?;
        let index = self.index_of(pc)?;
        (index <= self.program.len()).then_some((pc, index))
    }

    /// Returns `true` once HALT has retired or execution has progressed past the
    /// last reachable instruction.
    pub const fn is_finished(&self) -> bool {
        self.halted || self.completed >= self.logical_size
    }

    /// Undoes the effect of a decoded HALT that has just been flushed.
    pub fn restore_fetch(&mut self) {
        self.halt_fetched = false;
        self.logical_size = self.program.len();
    }

    /// Register values and validity for the final-state dump.
    pub fn register_dump(&self) -> Vec<RegisterState> {
        self.regs.dump(self.dump_registers)
    }

    /// Every non-zero data-memory word.
    pub fn memory_dump(&self) -> Vec<MemoryWord> {
        self.memory.dump()
    }
}
