//! System components around the APEX core.
//!
//! The APEX machine has no bus or devices; its only peripheral is the flat
//! word-addressed data memory serviced by the Memory1 stage.

/// Flat word-addressed data memory.
pub mod memory;

pub use memory::{DataMemory, MemoryWord};
