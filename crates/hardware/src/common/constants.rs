//! Global Architectural Constants.
//!
//! This module defines the fixed parameters of the APEX machine. It includes:
//! 1. **Code Memory:** Base address and instruction width used to map PCs onto table indices.
//! 2. **Register File:** Number of architectural registers and how many are dumped.
//! 3. **Data Memory:** Default size of the flat word array.
//! 4. **Pipeline:** Depth of the in-order pipeline (number of stages).

/// PC of the first instruction in code memory.
pub const CODE_BASE: u32 = 4000;

/// Size of one instruction slot in code memory, in address units.
pub const INSTRUCTION_WIDTH: u32 = 4;

/// Number of architectural integer registers (`R0`-`R31`).
pub const NUM_REGS: usize = 32;

/// Number of registers printed in the final-state dump (`R0`-`R15`).
pub const DUMP_REGS: usize = 16;

/// Default number of words in data memory.
pub const DATA_MEMORY_WORDS: usize = 4096;

/// Number of stages in the pipeline (F, DRF, EX1, EX2, MEM1, MEM2, WB).
///
/// The startup "busy" state is cleared once this many cycles have elapsed.
pub const PIPELINE_DEPTH: u64 = 7;
