//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the APEX pipeline. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (CPI, IPC).
//! 2. **Instruction mix:** Counts by category (ALU, move, load, store, branch, system).
//! 3. **Stalls:** Data-hazard and branch-drain stall cycles.
//! 4. **Control flow:** Taken branches, flushes and the instructions they discarded.

use std::fmt;
use std::time::Instant;

use crate::isa::Opcode;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions that reached Writeback.
    pub instructions_retired: u64,

    /// Count of register-register and register-literal arithmetic/logic instructions retired.
    pub inst_alu: u64,
    /// Count of MOVC instructions retired.
    pub inst_move: u64,
    /// Count of LOAD/LDR instructions retired.
    pub inst_load: u64,
    /// Count of STORE/STR instructions retired.
    pub inst_store: u64,
    /// Count of BZ/BNZ/JUMP instructions retired.
    pub inst_branch: u64,
    /// Count of HALT/NOP instructions retired.
    pub inst_system: u64,

    /// Cycles Decode held an instruction on a pending register.
    pub stalls_data: u64,
    /// Cycles Decode held a conditional branch while older instructions drained.
    pub stalls_control: u64,

    /// Branches and jumps resolved taken in Execute2.
    pub branches_taken: u64,
    /// Pipeline flushes.
    pub flushes: u64,
    /// Real instructions discarded by flushes.
    pub flushed_instructions: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_move: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_system: 0,
            stalls_data: 0,
            stalls_control: 0,
            branches_taken: 0,
            flushes: 0,
            flushed_instructions: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"pipeline"`, `"instruction_mix"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "pipeline", "instruction_mix"];

impl SimStats {
    /// Counts one retired instruction in the mix.
    pub fn record_retire(&mut self, opcode: Opcode) {
        self.instructions_retired += 1;
        match opcode {
            Opcode::Movc => self.inst_move += 1,
            Opcode::Load | Opcode::Ldr => self.inst_load += 1,
            Opcode::Store | Opcode::Str => self.inst_store += 1,
            Opcode::Bz | Opcode::Bnz | Opcode::Jump => self.inst_branch += 1,
            Opcode::Halt | Opcode::Nop => self.inst_system += 1,
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Addl
            | Opcode::Subl => self.inst_alu += 1,
        }
    }

    /// Retired instructions per cycle; zero before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Writes the requested statistics sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]; an empty
    /// slice selects all of them.
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    pub fn write_sections(&self, out: &mut impl fmt::Write, sections: &[String]) -> fmt::Result {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;

        writeln!(out, "==========================================================")?;
        writeln!(out, "APEX PIPELINE SIMULATION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        if want("summary") {
            writeln!(out, "host_seconds             {seconds:.4} s")?;
            writeln!(out, "sim_cycles               {}", self.cycles)?;
            writeln!(out, "sim_insts                {}", self.instructions_retired)?;
            writeln!(out, "sim_ipc                  {:.4}", self.ipc())?;
            writeln!(out, "sim_cpi                  {:.4}", self.cycles as f64 / instr)?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("pipeline") {
            writeln!(out, "PIPELINE")?;
            let pct = |n: u64| (n as f64 / cyc) * 100.0;
            writeln!(
                out,
                "  stalls.data            {} ({:.2}%)",
                self.stalls_data,
                pct(self.stalls_data)
            )?;
            writeln!(
                out,
                "  stalls.control         {} ({:.2}%)",
                self.stalls_control,
                pct(self.stalls_control)
            )?;
            writeln!(out, "  branches.taken         {}", self.branches_taken)?;
            writeln!(out, "  flushes                {}", self.flushes)?;
            writeln!(out, "  flushed.insts          {}", self.flushed_instructions)?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("instruction_mix") {
            writeln!(out, "INSTRUCTION MIX")?;
            for (name, count) in [
                ("op.alu", self.inst_alu),
                ("op.move", self.inst_move),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.system", self.inst_system),
            ] {
                writeln!(
                    out,
                    "  {name:<22} {count} ({:.2}%)",
                    (count as f64 / instr) * 100.0
                )?;
            }
        }
        writeln!(out, "==========================================================")
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        let mut out = String::new();
        if self.write_sections(&mut out, sections).is_ok() {
            print!("{out}");
        }
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_sections(f, &[])
    }
}
