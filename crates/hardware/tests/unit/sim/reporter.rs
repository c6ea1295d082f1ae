//! Reporter Tests.
//!
//! Verifies that tracing only toggles observation (never results), and that the
//! text reporter renders stages, stalls, flushes and the final state dump.

use apex_core::config::Config;
use apex_core::core::pipeline::CycleSnapshot;
use apex_core::isa::InstructionTable;
use apex_core::sim::{Reporter, RunSummary, Simulator, StopReason, TextReporter};
use mockall::mock;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;

use crate::common::builder::ProgramBuilder;
use crate::common::harness::{BUDGET, TestContext};

mock! {
    pub Observer {}

    impl Reporter for Observer {
        fn on_program(&mut self, program: &InstructionTable, code_base: u32);
        fn on_cycle(&mut self, snapshot: &CycleSnapshot);
        fn on_finish(&mut self, summary: &RunSummary);
    }
}

fn add_program() -> ProgramBuilder {
    ProgramBuilder::new().movc(1, 5).movc(2, 10).add(3, 1, 2).halt()
}

fn render(f: impl FnOnce(&mut TextReporter<Vec<u8>>)) -> String {
    let mut reporter = TextReporter::new(Vec::new());
    f(&mut reporter);
    String::from_utf8(reporter.into_inner()).unwrap()
}

#[test]
fn test_silent_run_only_reports_final_state() {
    let mut observer = MockObserver::new();
    let _ = observer.expect_on_program().times(0);
    let _ = observer.expect_on_cycle().times(0);
    let _ = observer
        .expect_on_finish()
        .withf(|summary| summary.completed_count == 4)
        .times(1)
        .return_const(());

    let mut sim = Simulator::new(add_program().table(), &Config::default())
        .unwrap()
        .with_reporter(Box::new(observer));
    let _ = sim.run(BUDGET, false).unwrap();
}

#[test]
fn test_traced_run_reports_every_cycle() {
    let mut observer = MockObserver::new();
    let _ = observer
        .expect_on_program()
        .with(mockall::predicate::always(), eq(4000))
        .times(1)
        .return_const(());
    let _ = observer.expect_on_cycle().times(14).return_const(());
    let _ = observer.expect_on_finish().times(1).return_const(());

    let mut sim = Simulator::new(add_program().table(), &Config::default())
        .unwrap()
        .with_reporter(Box::new(observer));
    let summary = sim.run(BUDGET, true).unwrap();
    assert_eq!(summary.cycles, 14);
}

#[test]
fn test_trace_instructions_config_forces_trace() {
    let mut observer = MockObserver::new();
    let _ = observer.expect_on_program().times(1).return_const(());
    let _ = observer.expect_on_cycle().times(3).return_const(());
    let _ = observer.expect_on_finish().times(1).return_const(());

    let mut config = Config::default();
    config.general.trace_instructions = true;
    let mut sim = Simulator::new(add_program().table(), &config)
        .unwrap()
        .with_reporter(Box::new(observer));
    let summary = sim.run(3, false).unwrap();
    assert_eq!(summary.stop_reason, StopReason::CycleBudget);
}

#[test]
fn test_trace_does_not_change_results() {
    let mut silent = TestContext::new(add_program());
    let mut traced = Simulator::new(add_program().table(), &Config::default())
        .unwrap()
        .with_reporter(Box::new(TextReporter::new(std::io::sink())));

    let a = silent.sim.run(BUDGET, false).unwrap();
    let b = traced.run(BUDGET, true).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_text_reporter_renders_stages_and_stall() {
    let mut ctx = TestContext::new(add_program());
    let cycles = ctx.trace(BUDGET);
    let text = render(|r| {
        for c in &cycles[..4] {
            r.on_cycle(c);
        }
    });

    assert!(text.contains("Clock Cycle #: 1\n"));
    assert!(text.contains(&format!("{:<15}: (I0: 4000) MOVC,R1,#5\n", "Fetch")));
    assert!(text.contains(&format!("{:<15}: (Idle)\n", "Writeback")));
    assert!(text.contains(&format!(
        "{:<15}: (I2: 4008) ADD,R3,R1,R2 [stalled]\n",
        "Decode/RF"
    )));
    assert!(text.contains("Decode stalled: R1 not valid.\n"));
}

#[test]
fn test_text_reporter_marks_flush() {
    let program = ProgramBuilder::new().movc(1, 0).bz(8).movc(2, 99).movc(3, 1).halt();
    let mut ctx = TestContext::new(program);
    let cycles = ctx.trace(BUDGET);
    let text = render(|r| cycles.iter().for_each(|c| r.on_cycle(c)));

    assert!(text.contains(
        "Instructions in F, DRF and EX1 stage flushed as the branch is taken. PC -> 4012\n"
    ));
    assert!(text.contains("Decode stalled: branch waiting for pipeline to drain.\n"));
    assert!(text.contains(&format!("{:<15}: EMPTY\n", "Decode/RF")));
}

#[test]
fn test_text_reporter_final_dump() {
    let mut ctx = TestContext::new(add_program().store(3, 0, 7).halt()).with_memory(2, -1);
    let summary = ctx.run(BUDGET);
    let text = render(|r| r.on_finish(&summary));

    assert!(text.contains("(apex) >> Simulation Complete\n"));
    assert!(text.contains("|\tREG[3]\t|\tValue = 15\t|Status = VALID\t\t|\n"));
    assert!(text.contains("|\tREG[15]\t|\tValue = 0\t|Status = VALID\t\t|\n"));
    assert!(!text.contains("REG[16]"));
    assert!(text.contains("|\tMEM[2]\t|\tDataValue = -1\t|\n"));
    assert!(!text.contains("MEM[7]"));
}

#[test]
fn test_text_reporter_program_listing() {
    let text = render(|r| r.on_program(&add_program().table(), 4000));
    assert!(text.contains("APEX_CPU : Code Memory\n"));
    let add_row = format!(
        "{:<9} {:<9} {:<9} {:<9} {:<9} {:<9} {:<9}",
        2, 4008, "ADD", 3, 1, 2, 0
    );
    assert!(text.contains(&add_row));
}
