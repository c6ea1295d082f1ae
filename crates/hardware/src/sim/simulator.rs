//! Simulator: owns the CPU, the pipeline and the reporter side-by-side.
//!
//! The pipeline latches and the architectural state are separate values so a
//! stage can borrow its latches and the `Cpu` mutably at the same time.

use std::fmt;

use serde::Serialize;

use crate::common::error::{ConfigError, SimError};
use crate::common::RegisterState;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::{CycleSnapshot, Pipeline};
use crate::isa::InstructionTable;
use crate::sim::reporter::{NullReporter, Reporter};
use crate::soc::MemoryWord;

/// Why a run returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// HALT reached Writeback.
    Halted,
    /// Execution progressed past the last reachable instruction.
    Completed,
    /// The cycle budget ran out first.
    CycleBudget,
}

/// Final state of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Completed-instruction count.
    pub completed_count: usize,
    /// Cycles simulated so far.
    pub cycles: u64,
    /// Why the run returned.
    pub stop_reason: StopReason,
    /// Dumped registers with their validity.
    pub registers: Vec<RegisterState>,
    /// Every non-zero data-memory word.
    pub memory: Vec<MemoryWord>,
}

/// Top-level simulator: CPU architectural state + pipeline latches + trace observer.
pub struct Simulator {
    /// CPU architectural state (registers, memory, PC, stats).
    pub cpu: Cpu,
    /// Pipeline latches.
    pub pipeline: Pipeline,
    reporter: Box<dyn Reporter>,
    trace_forced: bool,
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("cpu", &self.cpu)
            .field("pipeline", &self.pipeline)
            .field("trace_forced", &self.trace_forced)
            .finish_non_exhaustive()
    }
}

impl Simulator {
    /// Creates a simulator for `program` with a [`NullReporter`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CodeRangeOverflow`] if the program does not fit
    /// above the configured code base.
    pub fn new(program: InstructionTable, config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            cpu: Cpu::new(program, config)?,
            pipeline: Pipeline::new(),
            reporter: Box::new(NullReporter),
            trace_forced: config.general.trace_instructions,
        })
    }

    /// Replaces the trace observer.
    pub fn with_reporter(mut self, reporter: Box<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::tick`].
    pub fn tick(&mut self) -> Result<CycleSnapshot, SimError> {
        self.pipeline.tick(&mut self.cpu)
    }

    /// Runs until HALT retires, execution completes, or `max_cycles` more cycles have elapsed.
    ///
    /// With `trace` set (or `trace_instructions` configured) the reporter sees the
    /// program listing before the first cycle and a snapshot after every cycle.
    /// The final summary is always reported. Tracing never changes the results.
    ///
    /// # Errors
    ///
    /// Returns the [`SimError`] that aborted the run; the reporter's
    /// `on_finish` is not called in that case.
    pub fn run(&mut self, max_cycles: u64, trace: bool) -> Result<RunSummary, SimError> {
        let trace = trace || self.trace_forced;
        if trace && self.cpu.stats.cycles == 0 {
            self.reporter
                .on_program(&self.cpu.program, self.cpu.code_base);
        }

        let mut elapsed = 0;
        while !self.cpu.is_finished() && elapsed < max_cycles {
            let snapshot = self.tick()?;
            elapsed += 1;
            if trace {
                self.reporter.on_cycle(&snapshot);
            }
        }

        let summary = self.summary();
        tracing::info!(
            cycles = summary.cycles,
            completed = summary.completed_count,
            reason = ?summary.stop_reason,
            "simulation finished"
        );
        self.reporter.on_finish(&summary);
        Ok(summary)
    }

    /// The machine state as it stands now.
    pub fn summary(&self) -> RunSummary {
        let stop_reason = if self.cpu.halted {
            StopReason::Halted
        } else if self.cpu.is_finished() {
            StopReason::Completed
        } else {
            StopReason::CycleBudget
        };
        RunSummary {
            completed_count: self.cpu.completed,
            cycles: self.cpu.stats.cycles,
            stop_reason,
            registers: self.cpu.register_dump(),
            memory: self.cpu.memory_dump(),
        }
    }
}
