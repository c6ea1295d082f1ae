//! Architectural state owned by the APEX core.
//!
//! The register values live here; their validity bits are tracked by the
//! pipeline [`Scoreboard`](crate::core::pipeline::scoreboard::Scoreboard) and the two
//! are combined by [`RegisterFile`](crate::common::RegisterFile).

/// General-purpose register values.
pub mod gpr;
