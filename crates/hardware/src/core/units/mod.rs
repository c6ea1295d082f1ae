//! Execution units and functional components.
//!
//! This module contains the combinational units the execute and memory stages
//! call into: the integer ALU, load/store address generation and branch
//! resolution.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit: condition evaluation and target computation.
pub mod bru;

/// Load/Store Unit address generation.
pub mod lsu;
