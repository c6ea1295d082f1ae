//! Trace and final-state reporting.
//!
//! A [`Reporter`] observes a run without touching it: it receives the program
//! listing, a [`CycleSnapshot`] after each traced cycle, and the [`RunSummary`]
//! when the run returns. [`TextReporter`] renders the classic APEX console
//! trace; [`NullReporter`] discards everything.

use std::io::{self, Write};

use crate::common::constants::INSTRUCTION_WIDTH;
use crate::core::pipeline::hazards::StallCause;
use crate::core::pipeline::{CycleSnapshot, Latch, Stage};
use crate::isa::InstructionTable;
use crate::sim::simulator::{RunSummary, StopReason};

const RULE: &str = "--------------------------------";

/// Read-only observer of a simulation run.
pub trait Reporter {
    /// Called once before the first traced cycle with the loaded program.
    fn on_program(&mut self, _program: &InstructionTable, _code_base: u32) {}

    /// Called after every cycle while tracing is enabled.
    fn on_cycle(&mut self, snapshot: &CycleSnapshot);

    /// Called when a run returns normally.
    fn on_finish(&mut self, summary: &RunSummary);
}

/// Reporter that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn on_cycle(&mut self, _snapshot: &CycleSnapshot) {}

    fn on_finish(&mut self, _summary: &RunSummary) {}
}

/// Renders the stage trace and final-state dump as text.
///
/// Write failures are logged and otherwise ignored; they never affect the run.
#[derive(Debug)]
pub struct TextReporter<W: Write> {
    out: W,
}

impl TextReporter<io::Stdout> {
    /// A reporter writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextReporter<W> {
    /// Creates a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, what: &str, result: io::Result<()>) {
        if let Err(err) = result {
            tracing::warn!(%err, what, "failed to write report");
        }
    }

    fn write_program(&mut self, program: &InstructionTable, code_base: u32) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out, "APEX_CPU : Code Memory")?;
        writeln!(
            out,
            "{:<9} {:<9} {:<9} {:<9} {:<9} {:<9} {:<9}",
            "index", "address", "opcode", "rd", "rs1", "rs2", "imm"
        )?;
        let mut address = u64::from(code_base);
        for (index, inst) in program.iter().enumerate() {
            writeln!(
                out,
                "{:<9} {:<9} {:<9} {:<9} {:<9} {:<9} {:<9}",
                index,
                address,
                inst.opcode.mnemonic(),
                inst.rd,
                inst.rs1,
                inst.rs2,
                inst.imm
            )?;
            address += u64::from(INSTRUCTION_WIDTH);
        }
        Ok(())
    }

    fn write_cycle(&mut self, snapshot: &CycleSnapshot) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out, "{RULE}")?;
        writeln!(out, "Clock Cycle #: {}", snapshot.cycle)?;
        writeln!(out, "{RULE}")?;
        for stage in Stage::ALL {
            write!(out, "{:<15}: ", stage.name())?;
            match snapshot.stage(stage) {
                Latch::Busy => writeln!(out, "(Idle)")?,
                Latch::Bubble => writeln!(out, "EMPTY")?,
                Latch::Occupied(entry) => {
                    write!(out, "(I{}: {}) {}", entry.index, entry.pc, entry.inst)?;
                    if entry.stalled {
                        write!(out, " [stalled]")?;
                    }
                    writeln!(out)?;
                }
            }
        }
        match snapshot.stall {
            Some(StallCause::Data { register }) => {
                writeln!(out, "Decode stalled: R{register} not valid.")?;
            }
            Some(StallCause::Drain) => {
                writeln!(out, "Decode stalled: branch waiting for pipeline to drain.")?;
            }
            None => {}
        }
        if let Some(redirect) = snapshot.redirect {
            writeln!(
                out,
                "Instructions in F, DRF and EX1 stage flushed as the branch is taken. PC -> {}",
                redirect.target_pc
            )?;
        }
        Ok(())
    }

    fn write_summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out)?;
        match summary.stop_reason {
            StopReason::Halted | StopReason::Completed => {
                writeln!(out, "(apex) >> Simulation Complete")?;
            }
            StopReason::CycleBudget => {
                writeln!(out, "(apex) >> Cycle budget exhausted")?;
            }
        }
        writeln!(
            out,
            "cycles = {} completed = {}",
            summary.cycles, summary.completed_count
        )?;

        writeln!(
            out,
            "\n================State of architectural register file============="
        )?;
        for reg in &summary.registers {
            let status = if reg.valid { "VALID\t" } else { "INVALID" };
            writeln!(
                out,
                "|\tREG[{}]\t|\tValue = {}\t|Status = {}\t|",
                reg.index, reg.value, status
            )?;
        }
        writeln!(
            out,
            "=================================================================\n"
        )?;

        writeln!(out, "================State of Data Memory=============")?;
        for word in &summary.memory {
            writeln!(out, "|\tMEM[{}]\t|\tDataValue = {}\t|", word.address, word.value)?;
        }
        writeln!(out, "=================================================")?;
        writeln!(out, "Other data memories are 0.")?;
        out.flush()
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn on_program(&mut self, program: &InstructionTable, code_base: u32) {
        let result = self.write_program(program, code_base);
        self.emit("program listing", result);
    }

    fn on_cycle(&mut self, snapshot: &CycleSnapshot) {
        let result = self.write_cycle(snapshot);
        self.emit("cycle trace", result);
    }

    fn on_finish(&mut self, summary: &RunSummary) {
        let result = self.write_summary(summary);
        self.emit("final state", result);
    }
}
