//! Execute Stages (EX1, EX2).
//!
//! Execute1 runs the ALU, generates memory addresses and reserves the
//! destination register in the scoreboard. Execute2 resolves branches and
//! jumps: a taken transfer redirects the PC and tells the engine to flush the
//! three younger stages.

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::latches::{Latch, Stage};
use crate::core::pipeline::signals::{OpASrc, OpBSrc};
use crate::core::pipeline::snapshot::{CycleSnapshot, Redirect};
use crate::core::units::alu::Alu;
use crate::core::units::{bru, lsu};

/// Executes the Execute1 stage.
///
/// Computes the ALU result and effective address, then marks `rd` invalid
/// for every register-writing instruction.
pub fn execute1_stage(
    cpu: &mut Cpu,
    input: &mut Latch,
    output: &mut Latch,
    snapshot: &mut CycleSnapshot,
) {
    let mut latch = input.take();

    if let Latch::Occupied(ex) = &mut latch {
        let a = match ex.ctrl.a_src {
            OpASrc::Reg1 => ex.rv1,
            OpASrc::Zero => 0,
        };
        let b = match ex.ctrl.b_src {
            OpBSrc::Reg2 => ex.rv2,
            OpBSrc::Imm => ex.inst.imm,
        };
        ex.result = Alu::execute(ex.ctrl.alu, a, b);
        if let Some(addr) = lsu::effective_address(ex) {
            ex.mem_addr = addr;
        }
        if ex.ctrl.reg_write {
            cpu.regs.reserve(ex.inst.rd);
        }
        tracing::trace!(pc = ex.pc, inst = %ex.inst, result = ex.result, "EX1");
    }

    snapshot.record(Stage::Execute1, latch.clone());
    *output = latch;
}

/// Executes the Execute2 stage.
///
/// # Returns
///
/// The redirect to apply when the instruction is a taken branch or a jump.
///
/// # Errors
///
/// Returns [`SimError::BranchTargetOutOfRange`] if the target is not an
/// instruction slot of the loaded program (or the slot just past its end).
pub fn execute2_stage(
    cpu: &mut Cpu,
    input: &mut Latch,
    output: &mut Latch,
    snapshot: &mut CycleSnapshot,
) -> Result<Option<Redirect>, SimError> {
    let mut latch = input.take();
    let mut redirect = None;

    if let Latch::Occupied(ex) = &mut latch {
        if let Some(target) = bru::resolve(ex, cpu.zero_flag) {
            let (target_pc, target_index) =
                cpu.resolve_target(target)
                    .ok_or(SimError::BranchTargetOutOfRange { pc: ex.pc, target })?;
            ex.redirect_index = Some(target_index);
            cpu.stats.branches_taken += 1;
            redirect = Some(Redirect {
                branch_index: ex.index,
                branch_pc: ex.pc,
                target_pc,
                target_index,
            });
            tracing::debug!(pc = ex.pc, target = target_pc, inst = %ex.inst, "EX2 taken");
        } else if ex.ctrl.branch {
            tracing::trace!(pc = ex.pc, inst = %ex.inst, "EX2 not taken");
        }
    }

    snapshot.record(Stage::Execute2, latch.clone());
    *output = latch;
    Ok(redirect)
}
