//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the seven-stage APEX pipeline.
//! It includes the following components:
//! 1. **Engine:** The latch set and the tail-first per-cycle evaluation order.
//! 2. **Hazards:** Scoreboard stalls and the conditional-branch drain.
//! 3. **Latches:** Stage identities and the entries carried between stages.
//! 4. **Scoreboard:** Per-register validity bits.
//! 5. **Signals:** Control signals generated during instruction decoding.
//! 6. **Snapshot:** Read-only record of each cycle for reporters.
//! 7. **Stages:** Fetch, Decode/RF, Execute1/2, Memory1/2 and Writeback.

/// Pipeline latches and per-cycle stage evaluation.
pub mod engine;

/// Pipeline hazard detection (data stalls and branch drain).
pub mod hazards;

/// Inter-stage pipeline latches.
pub mod latches;

/// Register validity scoreboard.
pub mod scoreboard;

/// Control signals generated during instruction decode.
pub mod signals;

/// Per-cycle observation record.
pub mod snapshot;

/// Pipeline stage implementations.
pub mod stages;

pub use engine::Pipeline;
pub use latches::{Latch, PipelineEntry, Stage};
pub use snapshot::{CycleSnapshot, Redirect};
