//! Pipeline Stage Unit Tests.
//!
//! Drives each stage function directly against a fresh `Cpu`:
//!   1. Fetch: hands the PC's instruction to Decode, freezes on a stall, stops after HALT
//!   2. Decode: reads operands, stalls on pending registers, truncates on HALT
//!   3. Execute1: ALU result, effective address, destination reservation
//!   4. Memory1: stores, loads written early but left invalid, address faults
//!   5. Writeback: commit, zero flag, completion count, HALT

use apex_core::common::SimError;
use apex_core::config::Config;
use apex_core::core::Cpu;
use apex_core::core::pipeline::hazards::StallCause;
use apex_core::core::pipeline::signals::ControlSignals;
use apex_core::core::pipeline::stages::{
    decode_stage, execute1_stage, fetch_stage, memory1_stage, writeback_stage,
};
use apex_core::core::pipeline::{CycleSnapshot, Latch, PipelineEntry};
use apex_core::isa::{Instruction, Opcode};

use crate::common::builder::ProgramBuilder;

// ══════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════

fn cpu(program: ProgramBuilder) -> Cpu {
    Cpu::new(program.table(), &Config::default()).unwrap()
}

fn three_nops() -> Cpu {
    cpu(ProgramBuilder::new().nop().nop().nop())
}

/// An entry as Decode would have issued it.
fn issued(index: usize, inst: Instruction) -> PipelineEntry {
    PipelineEntry {
        ctrl: ControlSignals::for_opcode(inst.opcode),
        ..PipelineEntry::fetched(index, 4000 + 4 * index as u32, inst)
    }
}

fn entry_of(latch: &Latch) -> &PipelineEntry {
    latch.entry().expect("latch should be occupied")
}

const NO_DOWNSTREAM: [&Latch; 4] = [&Latch::Bubble, &Latch::Bubble, &Latch::Bubble, &Latch::Bubble];

// ══════════════════════════════════════════════════════════
// Fetch
// ══════════════════════════════════════════════════════════

#[test]
fn test_fetch_passes_instruction_and_advances() {
    let mut cpu = three_nops();
    let (mut latch, mut output) = (Latch::Bubble, Latch::Busy);
    let mut snap = CycleSnapshot::new(1);

    fetch_stage(&mut cpu, &mut latch, &mut output, false, &mut snap);

    assert_eq!(entry_of(&output).index, 0);
    assert_eq!(latch, output);
    assert_eq!(cpu.pc, 4004);
}

#[test]
fn test_fetch_frozen_keeps_decode_and_pc() {
    let mut cpu = three_nops();
    let held = Latch::Occupied(issued(0, Instruction::new(Opcode::Nop)));
    let (mut latch, mut output) = (Latch::Bubble, held.clone());
    let mut snap = CycleSnapshot::new(1);

    fetch_stage(&mut cpu, &mut latch, &mut output, true, &mut snap);

    assert_eq!(output, held);
    assert_eq!(cpu.pc, 4000);
    assert!(latch.is_occupied());
}

#[test]
fn test_fetch_stops_after_halt_decoded() {
    let mut cpu = three_nops();
    cpu.halt_fetched = true;
    let (mut latch, mut output) = (Latch::Bubble, Latch::Bubble);
    let mut snap = CycleSnapshot::new(1);

    fetch_stage(&mut cpu, &mut latch, &mut output, false, &mut snap);

    assert_eq!(output, Latch::Bubble);
    assert_eq!(cpu.pc, 4000);
}

#[test]
fn test_fetch_past_end_yields_bubble() {
    let mut cpu = three_nops();
    cpu.pc = 4012;
    let (mut latch, mut output) = (Latch::Bubble, Latch::Busy);
    let mut snap = CycleSnapshot::new(1);

    fetch_stage(&mut cpu, &mut latch, &mut output, false, &mut snap);

    assert_eq!(output, Latch::Bubble);
    assert_eq!(cpu.pc, 4012);
}

// ══════════════════════════════════════════════════════════
// Decode
// ══════════════════════════════════════════════════════════

#[test]
fn test_decode_reads_operands() {
    let mut cpu = three_nops();
    cpu.regs.write(1, 6);
    cpu.regs.write(2, 7);
    let add = Instruction::new(Opcode::Add).with_rd(3).with_rs1(1).with_rs2(2);
    let mut input = Latch::Occupied(PipelineEntry::fetched(0, 4000, add));
    let mut output = Latch::Bubble;
    let mut snap = CycleSnapshot::new(1);

    let cause = decode_stage(&mut cpu, &mut input, &mut output, NO_DOWNSTREAM, &mut snap);

    assert_eq!(cause, None);
    assert_eq!(input, Latch::Bubble);
    let ex = entry_of(&output);
    assert_eq!((ex.rv1, ex.rv2), (6, 7));
    assert!(ex.ctrl.reg_write);
    assert!(!ex.stalled);
}

#[test]
fn test_decode_stall_holds_instruction() {
    let mut cpu = three_nops();
    cpu.regs.reserve(1);
    let add = Instruction::new(Opcode::Add).with_rd(3).with_rs1(1).with_rs2(2);
    let mut input = Latch::Occupied(PipelineEntry::fetched(0, 4000, add));
    let mut output = Latch::Busy;
    let mut snap = CycleSnapshot::new(1);

    let cause = decode_stage(&mut cpu, &mut input, &mut output, NO_DOWNSTREAM, &mut snap);

    assert_eq!(cause, Some(StallCause::Data { register: 1 }));
    assert_eq!(output, Latch::Bubble);
    assert!(entry_of(&input).stalled);
    assert_eq!(cpu.stats.stalls_data, 1);
}

#[test]
fn test_decode_halt_truncates_program() {
    let mut cpu = cpu(ProgramBuilder::new().nop().halt().nop().nop());
    let mut input = Latch::Occupied(PipelineEntry::fetched(1, 4004, Instruction::new(Opcode::Halt)));
    let mut output = Latch::Bubble;
    let mut snap = CycleSnapshot::new(1);

    let _ = decode_stage(&mut cpu, &mut input, &mut output, NO_DOWNSTREAM, &mut snap);

    assert!(cpu.halt_fetched);
    assert_eq!(cpu.logical_size, 2);
}

// ══════════════════════════════════════════════════════════
// Execute1
// ══════════════════════════════════════════════════════════

#[test]
fn test_execute1_computes_and_reserves() {
    let mut cpu = three_nops();
    let subl = Instruction::new(Opcode::Subl).with_rd(4).with_rs1(1).with_imm(3);
    let mut input = Latch::Occupied(PipelineEntry {
        rv1: 10,
        ..issued(0, subl)
    });
    let mut output = Latch::Bubble;
    let mut snap = CycleSnapshot::new(1);

    execute1_stage(&mut cpu, &mut input, &mut output, &mut snap);

    assert_eq!(entry_of(&output).result, 7);
    assert!(!cpu.regs.is_valid(4));
}

#[test]
fn test_execute1_movc_ignores_rs1() {
    let mut cpu = three_nops();
    let movc = Instruction::new(Opcode::Movc).with_rd(2).with_imm(42);
    let mut input = Latch::Occupied(PipelineEntry {
        rv1: 1000,
        ..issued(0, movc)
    });
    let mut output = Latch::Bubble;
    let mut snap = CycleSnapshot::new(1);

    execute1_stage(&mut cpu, &mut input, &mut output, &mut snap);

    assert_eq!(entry_of(&output).result, 42);
}

#[test]
fn test_execute1_str_address() {
    let mut cpu = three_nops();
    let str_ = Instruction::new(Opcode::Str).with_rs1(1).with_rs2(2).with_rs3(3);
    let mut input = Latch::Occupied(PipelineEntry {
        rv1: 5,
        rv2: 6,
        rv3: 100,
        ..issued(0, str_)
    });
    let mut output = Latch::Bubble;
    let mut snap = CycleSnapshot::new(1);

    execute1_stage(&mut cpu, &mut input, &mut output, &mut snap);

    assert_eq!(entry_of(&output).mem_addr, 106);
    assert!(cpu.regs.is_valid(0));
}

// ══════════════════════════════════════════════════════════
// Memory1
// ══════════════════════════════════════════════════════════

#[test]
fn test_memory1_store_writes_value() {
    let mut cpu = three_nops();
    let store = Instruction::new(Opcode::Store).with_rs1(1).with_rs2(2).with_imm(8);
    let mut input = Latch::Occupied(PipelineEntry {
        rv1: 77,
        mem_addr: 8,
        ..issued(0, store)
    });
    let mut output = Latch::Bubble;
    let mut snap = CycleSnapshot::new(1);

    memory1_stage(&mut cpu, &mut input, &mut output, &mut snap).unwrap();

    assert_eq!(cpu.memory.read(8), Some(77));
}

#[test]
fn test_memory1_load_writes_register_but_stays_invalid() {
    let mut cpu = three_nops();
    cpu.memory.write(12, -5).unwrap();
    cpu.regs.reserve(2);
    let load = Instruction::new(Opcode::Load).with_rd(2).with_rs1(1).with_imm(12);
    let mut input = Latch::Occupied(PipelineEntry {
        mem_addr: 12,
        ..issued(0, load)
    });
    let mut output = Latch::Bubble;
    let mut snap = CycleSnapshot::new(1);

    memory1_stage(&mut cpu, &mut input, &mut output, &mut snap).unwrap();

    assert_eq!(cpu.regs.read(2), -5);
    assert!(!cpu.regs.is_valid(2));
    assert_eq!(entry_of(&output).result, -5);
}

#[test]
fn test_memory1_rejects_out_of_range_address() {
    let mut cpu = three_nops();
    let load = Instruction::new(Opcode::Load).with_rd(2).with_rs1(1);
    let mut input = Latch::Occupied(PipelineEntry {
        mem_addr: -1,
        ..issued(0, load)
    });
    let mut output = Latch::Bubble;
    let mut snap = CycleSnapshot::new(1);

    let err = memory1_stage(&mut cpu, &mut input, &mut output, &mut snap).unwrap_err();

    assert_eq!(
        err,
        SimError::DataAddressOutOfRange {
            pc: 4000,
            address: -1,
            size: 4096
        }
    );
}

// ══════════════════════════════════════════════════════════
// Writeback
// ══════════════════════════════════════════════════════════

#[test]
fn test_writeback_commits_and_sets_zero_flag() {
    let mut cpu = three_nops();
    cpu.zero_flag = true;
    cpu.regs.reserve(3);
    let sub = Instruction::new(Opcode::Sub).with_rd(3).with_rs1(1).with_rs2(2);
    let mut input = Latch::Occupied(PipelineEntry {
        result: -2,
        ..issued(1, sub)
    });
    let mut snap = CycleSnapshot::new(1);

    writeback_stage(&mut cpu, &mut input, &mut snap);

    assert_eq!(cpu.regs.read(3), -2);
    assert!(cpu.regs.is_valid(3));
    assert!(!cpu.zero_flag);
    assert_eq!(cpu.completed, 2);
    assert_eq!(cpu.stats.inst_alu, 1);
    assert_eq!(input, Latch::Bubble);
}

#[test]
fn test_writeback_movc_leaves_zero_flag() {
    let mut cpu = three_nops();
    cpu.zero_flag = false;
    cpu.regs.reserve(1);
    let movc = Instruction::new(Opcode::Movc).with_rd(1);
    let mut input = Latch::Occupied(PipelineEntry {
        result: 0,
        ..issued(0, movc)
    });
    let mut snap = CycleSnapshot::new(1);

    writeback_stage(&mut cpu, &mut input, &mut snap);

    assert!(!cpu.zero_flag);
    assert_eq!(cpu.stats.inst_move, 1);
}

#[test]
fn test_writeback_taken_branch_sets_completion_to_target() {
    let mut cpu = three_nops();
    let bz = Instruction::new(Opcode::Bz).with_imm(-4);
    let mut input = Latch::Occupied(PipelineEntry {
        redirect_index: Some(0),
        ..issued(1, bz)
    });
    let mut snap = CycleSnapshot::new(1);

    writeback_stage(&mut cpu, &mut input, &mut snap);

    assert_eq!(cpu.completed, 0);
    assert_eq!(cpu.stats.inst_branch, 1);
}

#[test]
fn test_writeback_halt_ends_run() {
    let mut cpu = three_nops();
    let mut input = Latch::Occupied(issued(2, Instruction::new(Opcode::Halt)));
    let mut snap = CycleSnapshot::new(1);

    writeback_stage(&mut cpu, &mut input, &mut snap);

    assert!(cpu.halted);
    assert!(cpu.is_finished());
    assert_eq!(cpu.completed, 3);
}

#[test]
fn test_bubble_has_no_effect() {
    let mut cpu = three_nops();
    let before = cpu.regs.clone();
    let mut input = Latch::Bubble;
    let mut snap = CycleSnapshot::new(1);

    writeback_stage(&mut cpu, &mut input, &mut snap);

    assert_eq!(cpu.regs, before);
    assert_eq!(cpu.completed, 0);
    assert_eq!(cpu.stats.instructions_retired, 0);
}
