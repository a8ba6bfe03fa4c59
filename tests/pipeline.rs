use minil::pipeline::{CompileError, Compilation, Pipeline};
use minil::tac::Tac;
use minil::vm::{InputStream, RuntimeError, Vm};

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_branch_and_loop() {
    let outputs = run(
        "read a; read b; c = a + b * 2; \
         if c >= 10 { print c; } else { print 0; } \
         i = 0; while i < c { print i; i = i + 1; } end",
        &[3, 7],
    );
    let mut expected = vec![17];
    expected.extend(0..17);
    assert_eq!(outputs, expected);
}

#[test]
fn test_nested_conditionals() {
    let outputs = run(
        "read x; read y; \
         if x < y { if x + y > 10 { print x + y; } else { print x; } } \
         else { print y; } \
         if x == y { print 1; } else { print 0; } end",
        &[5, 10],
    );
    assert_eq!(outputs, vec![15, 0]);
}

#[test]
fn test_zero_trip_loop() {
    let outputs = run(
        "read n; i = 0; while i < n { print i; i = i + 1; } print 999; end",
        &[0],
    );
    assert_eq!(outputs, vec![999]);
}

#[test]
fn test_constant_expressions() {
    let outputs = run(
        "print 2+3*4; print 20/5; print 2+(3+1); print (2+3)*4; \
         print (1<2); print (3==3); end",
        &[],
    );
    assert_eq!(outputs, vec![14, 4, 6, 20, 1, 1]);
}

#[test]
fn test_interleaved_read_print() {
    let outputs = run("read a; print a; read b; print b; read c; print c; end", &[42, 7, 0]);
    assert_eq!(outputs, vec![42, 7, 0]);
}

#[test]
fn test_division_by_zero_is_a_runtime_error() {
    // With and without folding: the divide is never folded away.
    for fold in [true, false] {
        let compilation = Pipeline::new(fold)
            .compile("read x; y = x / 0; print y; end")
            .unwrap();
        let mut vm = Vm::new(&compilation.machine, InputStream::batch(&[1]));
        let result = vm.run();
        assert!(
            matches!(result, Err(RuntimeError::DivideByZero { .. })),
            "fold={fold}: {result:?}"
        );
    }
}

// ============================================================================
// Folding equivalence and determinism
// ============================================================================

#[test]
fn test_folded_and_unfolded_agree() {
    let source = "read a; print a + 2 * 3; print -(4 - 9); \
                  if 1 < 2 { print 100 / 7; } else { print 0; } end";
    assert_eq!(run_with(source, &[5], true), run_with(source, &[5], false));
}

#[test]
fn test_identical_runs_produce_identical_traces() {
    let source = "read n; i = 0; while i < n { print i * i; i = i + 1; } end";
    let compilation = Pipeline::new(true).compile(source).unwrap();
    //
    let mut first = Vm::new(&compilation.machine, InputStream::batch(&[4])).with_trace();
    first.run().unwrap();
    let mut second = Vm::new(&compilation.machine, InputStream::batch(&[4])).with_trace();
    second.run().unwrap();
    //
    assert_eq!(first.outputs(), second.outputs());
    assert_eq!(first.trace(), second.trace());
}

// ============================================================================
// Artifacts and errors
// ============================================================================

#[test]
fn test_compilation_keeps_every_artifact() {
    let compilation = compile("read a; print a; end");
    assert!(!compilation.tokens.is_empty());
    assert_eq!(compilation.ast.stmts.len(), 2);
    assert_eq!(
        compilation.tac.last(),
        Some(&Tac::Label("END".to_string()))
    );
    assert!(!compilation.asm.code.is_empty());
    assert!(compilation.machine.labels.contains_key("END"));
    // Two code slots per instruction
    assert_eq!(compilation.machine.code.len() % 2, 0);
}

#[test]
fn test_warnings_ride_in_the_successful_result() {
    let compilation = compile("print x; end");
    assert_eq!(compilation.warnings.len(), 1);
    assert_eq!(
        compilation.warnings[0].message,
        "variable 'x' may be uninitialized"
    );
}

#[test]
fn test_lex_errors_abort_the_pipeline() {
    let result = Pipeline::new(true).compile("print @; end");
    assert!(matches!(result, Err(CompileError::Lex(_))));
}

#[test]
fn test_parse_errors_abort_the_pipeline() {
    let result = Pipeline::new(true).compile("print 1");
    assert!(matches!(result, Err(CompileError::Parse(_))));
}

#[test]
fn test_compile_errors_render_with_an_excerpt() {
    let message = Pipeline::new(true)
        .compile("x = @;\nend")
        .unwrap_err()
        .to_string();
    assert!(message.contains("unexpected character '@'"));
    assert!(message.contains("x = @;"));
    assert!(message.contains('^'));
}

#[test]
fn test_machine_serialization_is_stable() {
    let first = compile("read a; print a + 1; end").machine.to_string();
    let second = compile("read a; print a + 1; end").machine.to_string();
    assert_eq!(first, second);
    assert!(first.starts_with("code:"));
    assert!(first.contains("symbols:"));
    assert!(first.contains("labels:"));
    assert!(first.contains("init:"));
}

// ============================================================================
// Helpers
// ============================================================================

fn compile(source: &str) -> Compilation {
    Pipeline::new(true).compile(source).unwrap()
}

fn run(source: &str, inputs: &[i64]) -> Vec<i64> {
    run_with(source, inputs, true)
}

fn run_with(source: &str, inputs: &[i64], fold: bool) -> Vec<i64> {
    let compilation = Pipeline::new(fold).compile(source).unwrap();
    let mut vm = Vm::new(&compilation.machine, InputStream::batch(inputs));
    vm.run().unwrap();
    vm.outputs().to_vec()
}
