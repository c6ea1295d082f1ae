//! Simulation driver, program loading and trace reporting.
//!
//! 1. **Loader:** Parses APEX assembly text into an instruction table.
//! 2. **Simulator:** Owns the CPU and pipeline and runs them under a cycle budget.
//! 3. **Reporter:** Observes the program listing, each cycle and the final state.

pub mod loader;
pub mod reporter;
pub mod simulator;

pub use reporter::{NullReporter, Reporter, TextReporter};
pub use simulator::{RunSummary, Simulator, StopReason};
