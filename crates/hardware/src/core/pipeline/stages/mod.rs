//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the seven stages of the
//! instruction pipeline. It includes:
//! 1. **Fetch:** Reads the instruction at the PC from the instruction table.
//! 2. **Decode/RF:** Derives control signals, checks hazards and reads operands.
//! 3. **Execute1/Execute2:** Performs ALU operations, then resolves branch targets.
//! 4. **Memory1/Memory2:** Handles data load and store operations.
//! 5. **Writeback:** Commits results to the register file and retires instructions.
//!
//! Every stage takes its input latch, leaving a bubble, and writes its
//! successor's latch. The engine calls them tail first.

/// Instruction decode stage implementation.
pub mod decode;

/// Execute1 and Execute2 stage implementations.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory1 and Memory2 stage implementations.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (DRF stage).
pub use decode::decode_stage;
/// Execute stage entry points (EX1, EX2 stages).
pub use execute::{execute1_stage, execute2_stage};
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry points (MEM1, MEM2 stages).
pub use memory::{memory1_stage, memory2_stage};
/// Writeback stage entry point (WB stage).
pub use writeback::writeback_stage;
