//! APEX pipeline simulator library.
//!
//! This crate implements a cycle-accurate simulator of the seven-stage in-order
//! APEX pipeline with the following:
//! 1. **Core:** Fetch, Decode/RF, Execute1/2, Memory1/2 and Writeback with a register scoreboard,
//!    no forwarding, and branch resolution in Execute2 followed by a flush.
//! 2. **ISA:** The APEX opcode set, instruction records and the instruction table.
//! 3. **Memory:** A flat word-addressed data memory.
//! 4. **Simulation:** Program loader, run driver, trace reporters, configuration and statistics.

/// Common types and constants (errors, register file, architectural constants).
pub mod common;
/// Simulator configuration (defaults and JSON loading).
pub mod config;
/// CPU core (architectural state, pipeline, execution units).
pub mod core;
/// Instruction set (opcodes, instructions, instruction table, formatting).
pub mod isa;
/// Program loader, simulator driver and reporters.
pub mod sim;
/// Data memory.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or parse one from JSON.
pub use crate::config::Config;
/// Architectural state: registers, memory, PC and stats.
pub use crate::core::Cpu;
/// Top-level run driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
