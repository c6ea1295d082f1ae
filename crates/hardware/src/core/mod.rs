//! Core processor implementation.
//!
//! This module contains the APEX core: the architectural state, the seven-stage
//! in-order pipeline that advances it, and the combinational execution units the
//! stages call into.

/// Architecture-specific components (register values).
pub mod arch;

/// CPU architectural state and code-memory addressing.
pub mod cpu;

/// Instruction pipeline implementation (engine, stages, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, LSU address generation, branch resolution).
pub mod units;

pub use self::cpu::Cpu;
