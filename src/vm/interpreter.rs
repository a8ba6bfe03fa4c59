// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::collections::VecDeque;
use std::fmt;
use std::io;

use crate::vm::opcode;
use crate::vm::MachineProgram;

// ===================================================================
// Errors
// ===================================================================

/// A runtime failure, distinct from successful termination.  Each
/// variant carries the byte index of the faulting instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum RuntimeError {
    /// `DIV` with a zero divisor.
    DivideByZero { pc: usize },
    /// `IN` with no remaining input.
    InputExhausted { pc: usize },
    /// The code array contained an opcode the machine does not define.
    UnknownOpcode { pc: usize, opcode: i64 },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuntimeError::DivideByZero { pc } => {
                write!(f, "runtime error: division by zero at pc {}", pc)
            }
            RuntimeError::InputExhausted { pc } => {
                write!(f, "runtime error: input exhausted at pc {}", pc)
            }
            RuntimeError::UnknownOpcode { pc, opcode } => {
                write!(f, "runtime error: unknown opcode {} at pc {}", opcode, pc)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

pub type Result<T> = std::result::Result<T, RuntimeError>;

// ===================================================================
// Input
// ===================================================================

/// Where `IN` reads from: a pre-supplied batch of values, or the
/// host's standard input.  Either source can run dry, which surfaces
/// as `InputExhausted`.
#[derive(Clone, Debug)]
pub enum InputStream {
    Batch(VecDeque<i64>),
    Interactive,
}

impl InputStream {
    pub fn batch(values: &[i64]) -> Self {
        InputStream::Batch(values.iter().copied().collect())
    }

    pub fn empty() -> Self {
        InputStream::Batch(VecDeque::new())
    }

    fn next_input(&mut self) -> Option<i64> {
        match self {
            InputStream::Batch(values) => values.pop_front(),
            InputStream::Interactive => read_stdin_value(),
        }
    }
}

fn read_stdin_value() -> Option<i64> {
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => line.trim().parse().ok(),
    }
}

// ===================================================================
// Trace
// ===================================================================

/// How many leading memory cells a trace record snapshots.
const TRACE_WINDOW: usize = 32;

/// One executed instruction: the program counter before the fetch,
/// the decoded opcode and operand, the accumulator after execution,
/// and a snapshot of the leading memory cells.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceRecord {
    pub pc_before: usize,
    pub op: i64,
    pub arg: i64,
    pub acc: i64,
    pub mem: Vec<i64>,
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = opcode::mnemonic(self.op).unwrap_or("???");
        write!(
            f,
            "pc={:<4} {:<5} {:<6} acc={:<6} mem={:?}",
            self.pc_before, name, self.arg, self.acc, self.mem
        )
    }
}

// ===================================================================
// VM
// ===================================================================

/// The accumulator machine.  The program counter is a byte index with
/// a stride of two; jump operands are instruction indices, multiplied
/// by two on use.  Memory is sized at construction and never grows.
pub struct Vm<'a> {
    program: &'a MachineProgram,
    inputs: InputStream,
    pc: usize,
    acc: i64,
    mem: Vec<i64>,
    outputs: Vec<i64>,
    trace: Option<Vec<TraceRecord>>,
}

impl<'a> Vm<'a> {
    pub fn new(program: &'a MachineProgram, inputs: InputStream) -> Self {
        // Pre-populate the constant pool
        let mut mem = vec![0; program.memory_size()];
        for (&address, &value) in &program.mem_init {
            mem[address] = value;
        }
        Self {
            program,
            inputs,
            pc: 0,
            acc: 0,
            mem,
            outputs: Vec::new(),
            trace: None,
        }
    }

    /// Record every executed instruction.
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    /// The values printed so far, in order.
    pub fn outputs(&self) -> &[i64] {
        &self.outputs
    }

    pub fn trace(&self) -> &[TraceRecord] {
        self.trace.as_deref().unwrap_or(&[])
    }

    /// Run the program to completion: until `HALT`, the program
    /// counter walks off the end of the code array, or a runtime
    /// error occurs.
    pub fn run(&mut self) -> Result<()> {
        let program = self.program;
        while self.pc < program.code.len() {
            let pc_before = self.pc;
            let op = program.code[self.pc];
            let arg = program.code[self.pc + 1];
            self.pc += 2;
            self.dispatch(pc_before, op, arg)?;
            if self.trace.is_some() {
                self.record(pc_before, op, arg);
            }
            if op == opcode::HALT {
                break;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, pc: usize, op: i64, arg: i64) -> Result<()> {
        match op {
            opcode::LOAD => self.acc = self.mem[arg as usize],
            opcode::STORE => self.mem[arg as usize] = self.acc,
            opcode::ADD => self.acc = self.acc.wrapping_add(self.mem[arg as usize]),
            opcode::SUB => self.acc = self.acc.wrapping_sub(self.mem[arg as usize]),
            opcode::MUL => self.acc = self.acc.wrapping_mul(self.mem[arg as usize]),
            opcode::DIV => {
                let divisor = self.mem[arg as usize];
                if divisor == 0 {
                    return Err(RuntimeError::DivideByZero { pc });
                }
                // Truncates toward zero
                self.acc = self.acc.wrapping_div(divisor);
            }
            opcode::JMP => self.pc = (arg as usize) * 2,
            opcode::JLT => {
                if self.acc < 0 {
                    self.pc = (arg as usize) * 2;
                }
            }
            opcode::JGT => {
                if self.acc > 0 {
                    self.pc = (arg as usize) * 2;
                }
            }
            opcode::JLE => {
                if self.acc <= 0 {
                    self.pc = (arg as usize) * 2;
                }
            }
            opcode::JGE => {
                if self.acc >= 0 {
                    self.pc = (arg as usize) * 2;
                }
            }
            opcode::JEQ => {
                if self.acc == 0 {
                    self.pc = (arg as usize) * 2;
                }
            }
            opcode::JNE => {
                if self.acc != 0 {
                    self.pc = (arg as usize) * 2;
                }
            }
            opcode::IN => match self.inputs.next_input() {
                Some(value) => self.mem[arg as usize] = value,
                None => return Err(RuntimeError::InputExhausted { pc }),
            },
            opcode::OUT => self.outputs.push(self.mem[arg as usize]),
            opcode::HALT => {}
            _ => return Err(RuntimeError::UnknownOpcode { pc, opcode: op }),
        }
        Ok(())
    }

    fn record(&mut self, pc_before: usize, op: i64, arg: i64) {
        let window = self.mem[..self.mem.len().min(TRACE_WINDOW)].to_vec();
        let record = TraceRecord {
            pc_before,
            op,
            arg,
            acc: self.acc,
            mem: window,
        };
        if let Some(trace) = &mut self.trace {
            trace.push(record);
        }
    }
}
