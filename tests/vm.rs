use std::collections::BTreeMap;

use minil::vm::{opcode, InputStream, MachineProgram, RuntimeError, Vm};

// ============================================================================
// Data movement and arithmetic
// ============================================================================

#[test]
fn test_load_store_out() {
    let program = program(
        vec![
            opcode::LOAD,
            0,
            opcode::STORE,
            1,
            opcode::OUT,
            1,
            opcode::HALT,
            -1,
        ],
        2,
        &[(0, 42)],
    );
    assert_eq!(run(&program, &[]), vec![42]);
}

#[test]
fn test_arithmetic_ops() {
    // 10 (+ - * /) 3
    let program = program(
        vec![
            opcode::LOAD,
            0,
            opcode::ADD,
            1,
            opcode::STORE,
            2,
            opcode::OUT,
            2,
            opcode::LOAD,
            0,
            opcode::SUB,
            1,
            opcode::STORE,
            2,
            opcode::OUT,
            2,
            opcode::LOAD,
            0,
            opcode::MUL,
            1,
            opcode::STORE,
            2,
            opcode::OUT,
            2,
            opcode::LOAD,
            0,
            opcode::DIV,
            1,
            opcode::STORE,
            2,
            opcode::OUT,
            2,
            opcode::HALT,
            -1,
        ],
        3,
        &[(0, 10), (1, 3)],
    );
    assert_eq!(run(&program, &[]), vec![13, 7, 30, 3]);
}

#[test]
fn test_division_truncates_toward_zero() {
    let cases = [(-7, 2, -3), (7, -2, -3), (-7, -2, 3), (7, 2, 3)];
    for (dividend, divisor, expected) in cases {
        let program = program(
            vec![
                opcode::LOAD,
                0,
                opcode::DIV,
                1,
                opcode::STORE,
                2,
                opcode::OUT,
                2,
                opcode::HALT,
                -1,
            ],
            3,
            &[(0, dividend), (1, divisor)],
        );
        assert_eq!(run(&program, &[]), vec![expected]);
    }
}

#[test]
fn test_division_by_zero() {
    let program = program(
        vec![opcode::LOAD, 0, opcode::DIV, 1, opcode::HALT, -1],
        2,
        &[(0, 5)],
    );
    let mut vm = Vm::new(&program, InputStream::empty());
    // The DIV sits at instruction index 1, byte pc 2
    assert_eq!(vm.run(), Err(RuntimeError::DivideByZero { pc: 2 }));
}

// ============================================================================
// Jumps
// ============================================================================

#[test]
fn test_unconditional_jump_skips() {
    // JMP over the OUT straight to the HALT
    let program = program(
        vec![opcode::JMP, 2, opcode::OUT, 0, opcode::HALT, -1],
        1,
        &[(0, 9)],
    );
    assert_eq!(run(&program, &[]), Vec::<i64>::new());
}

#[test]
fn test_conditional_jump_table() {
    // For each jump and accumulator value: does it branch?
    let cases = [
        (opcode::JLT, -1, true),
        (opcode::JLT, 0, false),
        (opcode::JGT, 1, true),
        (opcode::JGT, 0, false),
        (opcode::JLE, 0, true),
        (opcode::JLE, 1, false),
        (opcode::JGE, 0, true),
        (opcode::JGE, -1, false),
        (opcode::JEQ, 0, true),
        (opcode::JEQ, 1, false),
        (opcode::JNE, 1, true),
        (opcode::JNE, 0, false),
    ];
    for (jump, acc, taken) in cases {
        // LOAD acc; J<cond> over the OUT; HALT
        let program = program(
            vec![
                opcode::LOAD,
                0,
                jump,
                3,
                opcode::OUT,
                1,
                opcode::HALT,
                -1,
            ],
            2,
            &[(0, acc), (1, 5)],
        );
        let outputs = run(&program, &[]);
        if taken {
            assert_eq!(outputs, Vec::<i64>::new(), "op {jump} acc {acc}");
        } else {
            assert_eq!(outputs, vec![5], "op {jump} acc {acc}");
        }
    }
}

#[test]
fn test_backward_jump_loops() {
    // Count 3, 2, 1 by looping back until ACC reaches zero.
    // mem0 = counter, mem1 = 1
    let program = program(
        vec![
            opcode::OUT,
            0,
            opcode::LOAD,
            0,
            opcode::SUB,
            1,
            opcode::STORE,
            0,
            opcode::JNE,
            0,
            opcode::HALT,
            -1,
        ],
        2,
        &[(0, 3), (1, 1)],
    );
    assert_eq!(run(&program, &[]), vec![3, 2, 1]);
}

// ============================================================================
// Termination
// ============================================================================

#[test]
fn test_halt_stops_execution() {
    let program = program(
        vec![opcode::HALT, -1, opcode::OUT, 0],
        1,
        &[(0, 1)],
    );
    assert_eq!(run(&program, &[]), Vec::<i64>::new());
}

#[test]
fn test_pc_walking_off_the_end_terminates() {
    let program = program(vec![opcode::LOAD, 0], 1, &[]);
    let mut vm = Vm::new(&program, InputStream::empty());
    assert_eq!(vm.run(), Ok(()));
}

#[test]
fn test_unknown_opcode() {
    let program = program(vec![99, 0], 1, &[]);
    let mut vm = Vm::new(&program, InputStream::empty());
    assert_eq!(vm.run(), Err(RuntimeError::UnknownOpcode { pc: 0, opcode: 99 }));
}

// ============================================================================
// Input / output
// ============================================================================

#[test]
fn test_inputs_are_consumed_in_order() {
    let program = program(
        vec![
            opcode::IN,
            0,
            opcode::OUT,
            0,
            opcode::IN,
            0,
            opcode::OUT,
            0,
            opcode::HALT,
            -1,
        ],
        1,
        &[],
    );
    assert_eq!(run(&program, &[7, 9]), vec![7, 9]);
}

#[test]
fn test_input_exhausted() {
    let program = program(vec![opcode::IN, 0, opcode::HALT, -1], 1, &[]);
    let mut vm = Vm::new(&program, InputStream::empty());
    assert_eq!(vm.run(), Err(RuntimeError::InputExhausted { pc: 0 }));
}

#[test]
fn test_memory_is_preloaded_from_init() {
    let program = program(vec![opcode::OUT, 0, opcode::HALT, -1], 1, &[(0, -12)]);
    assert_eq!(run(&program, &[]), vec![-12]);
}

// ============================================================================
// Trace
// ============================================================================

#[test]
fn test_trace_records_every_instruction() {
    let program = program(
        vec![opcode::LOAD, 0, opcode::STORE, 1, opcode::HALT, -1],
        2,
        &[(0, 5)],
    );
    let mut vm = Vm::new(&program, InputStream::empty()).with_trace();
    vm.run().unwrap();
    let trace = vm.trace();
    assert_eq!(trace.len(), 3);
    // Byte program counters, stride two
    assert_eq!(trace[0].pc_before, 0);
    assert_eq!(trace[1].pc_before, 2);
    assert_eq!(trace[2].pc_before, 4);
    // The accumulator snapshot follows execution
    assert_eq!(trace[0].acc, 5);
    assert_eq!(trace[0].mem, vec![5, 0]);
    assert_eq!(trace[1].mem, vec![5, 5]);
}

#[test]
fn test_trace_window_caps_at_32_cells() {
    let program = program(vec![opcode::HALT, -1], 40, &[]);
    let mut vm = Vm::new(&program, InputStream::empty()).with_trace();
    vm.run().unwrap();
    assert_eq!(vm.trace()[0].mem.len(), 32);
}

#[test]
fn test_runs_are_deterministic() {
    let program = program(
        vec![
            opcode::IN,
            0,
            opcode::OUT,
            0,
            opcode::LOAD,
            0,
            opcode::MUL,
            0,
            opcode::STORE,
            1,
            opcode::OUT,
            1,
            opcode::HALT,
            -1,
        ],
        2,
        &[],
    );
    let mut first = Vm::new(&program, InputStream::batch(&[6])).with_trace();
    first.run().unwrap();
    let mut second = Vm::new(&program, InputStream::batch(&[6])).with_trace();
    second.run().unwrap();
    assert_eq!(first.outputs(), second.outputs());
    assert_eq!(first.trace(), second.trace());
}

// ============================================================================
// Helpers
// ============================================================================

/// A raw machine program over `cells` anonymous memory cells.
fn program(code: Vec<i64>, cells: usize, init: &[(usize, i64)]) -> MachineProgram {
    let mut symbols = BTreeMap::new();
    for address in 0..cells {
        symbols.insert(format!("m{address}"), address);
    }
    MachineProgram {
        code,
        symbols,
        mem_init: init.iter().copied().collect(),
        labels: BTreeMap::new(),
    }
}

fn run(program: &MachineProgram, inputs: &[i64]) -> Vec<i64> {
    let mut vm = Vm::new(program, InputStream::batch(inputs));
    vm.run().unwrap();
    vm.outputs().to_vec()
}
