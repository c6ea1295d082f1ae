//! Common utilities and types used throughout the APEX simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Code base, instruction width, register count and pipeline depth.
//! 2. **Error Handling:** Load, simulation and configuration error types.
//! 3. **Register Management:** Register values paired with their validity bits.

/// Architectural constants of the APEX machine.
pub mod constants;

/// Error types for loading, configuring and running programs.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{CODE_BASE, INSTRUCTION_WIDTH, NUM_REGS, PIPELINE_DEPTH};
pub use error::{ConfigError, LoadError, SimError};
pub use reg::{RegisterFile, RegisterState};
