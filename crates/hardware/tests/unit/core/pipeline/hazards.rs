//! Hazard Detection Unit Tests.
//!
//! Verifies the per-opcode source rules, the single-writer destination rule
//! and the conditional-branch drain.

use apex_core::common::RegisterFile;
use apex_core::core::pipeline::hazards::{StallCause, blocking_register, branch_must_drain, stall_cause};
use apex_core::core::pipeline::{Latch, PipelineEntry};
use apex_core::isa::{Instruction, Opcode};
use rstest::rstest;

fn pending(regs: &[usize]) -> RegisterFile {
    let mut file = RegisterFile::new();
    for &r in regs {
        file.reserve(r);
    }
    file
}

fn occupied() -> Latch {
    Latch::Occupied(PipelineEntry::fetched(
        0,
        4000,
        Instruction::new(Opcode::Movc).with_rd(1),
    ))
}

#[rstest]
#[case::str_waits_on_base(Instruction::new(Opcode::Str).with_rs1(1).with_rs2(2).with_rs3(3), vec![3], Some(3))]
#[case::str_waits_on_value(Instruction::new(Opcode::Str).with_rs1(1).with_rs2(2).with_rs3(3), vec![1], Some(1))]
#[case::addl_ignores_rs2(Instruction::new(Opcode::Addl).with_rd(4).with_rs1(1).with_rs2(2), vec![2], None)]
#[case::load_waits_on_base(Instruction::new(Opcode::Load).with_rd(4).with_rs1(1), vec![1], Some(1))]
#[case::jump_waits_on_rs1(Instruction::new(Opcode::Jump).with_rs1(5), vec![5], Some(5))]
#[case::add_waits_on_rs2(Instruction::new(Opcode::Add).with_rd(3).with_rs1(1).with_rs2(2), vec![2], Some(2))]
#[case::ldr_waits_on_rs2(Instruction::new(Opcode::Ldr).with_rd(3).with_rs1(1).with_rs2(2), vec![2], Some(2))]
#[case::store_waits_on_value(Instruction::new(Opcode::Store).with_rs1(1).with_rs2(2), vec![1], Some(1))]
#[case::bz_has_no_sources(Instruction::new(Opcode::Bz).with_rs1(1), vec![1], None)]
#[case::halt_has_no_sources(Instruction::new(Opcode::Halt), vec![0, 1, 2], None)]
#[case::movc_waits_on_destination(Instruction::new(Opcode::Movc).with_rd(6).with_imm(1), vec![6], Some(6))]
#[case::store_has_no_destination(Instruction::new(Opcode::Store).with_rd(6).with_rs1(1).with_rs2(2), vec![6], None)]
fn test_blocking_register(
    #[case] inst: Instruction,
    #[case] reserved: Vec<usize>,
    #[case] expected: Option<usize>,
) {
    assert_eq!(blocking_register(&inst, &pending(&reserved)), expected);
}

#[test]
fn test_drain_ignores_busy_and_bubbles() {
    let busy = Latch::Busy;
    let bubble = Latch::Bubble;
    assert!(!branch_must_drain([&busy, &bubble, &busy, &bubble]));
}

#[test]
fn test_drain_waits_for_any_older_instruction() {
    let bubble = Latch::Bubble;
    let entry = occupied();
    assert!(branch_must_drain([&bubble, &bubble, &bubble, &entry]));
    assert!(branch_must_drain([&entry, &bubble, &bubble, &bubble]));
}

#[test]
fn test_drain_applies_to_conditional_branches_only() {
    let bubble = Latch::Bubble;
    let entry = occupied();
    let downstream = [&entry, &bubble, &bubble, &bubble];
    let regs = RegisterFile::new();

    let bnz = Instruction::new(Opcode::Bnz).with_imm(8);
    assert_eq!(stall_cause(&bnz, &regs, downstream), Some(StallCause::Drain));

    let jump = Instruction::new(Opcode::Jump).with_rs1(1);
    assert_eq!(stall_cause(&jump, &regs, downstream), None);
}

#[test]
fn test_data_stall_reports_first_pending_register() {
    let bubble = Latch::Bubble;
    let regs = pending(&[1, 2]);
    let add = Instruction::new(Opcode::Add).with_rd(3).with_rs1(1).with_rs2(2);
    assert_eq!(
        stall_cause(&add, &regs, [&bubble, &bubble, &bubble, &bubble]),
        Some(StallCause::Data { register: 1 })
    );
}
