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
use std::collections::BTreeMap;
use std::fmt;

use crate::asm::{AsmInstruction, Assembly, Symbol};
use crate::vm::opcode;
use crate::vm::MachineProgram;

// ============================================================================
// Errors
// ============================================================================

/// Errors arising while linking.  Either variant indicates a bug in an
/// earlier stage, since the generator registers every symbol and label
/// it references.
#[derive(Clone, Debug, PartialEq)]
pub enum LinkError {
    /// A jump targets a label that was never defined.
    UnresolvedLabel(String),
    /// An instruction references a symbol missing from the symbol set.
    UnresolvedSymbol(String),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinkError::UnresolvedLabel(name) => {
                write!(f, "link error: unresolved label '{}'", name)
            }
            LinkError::UnresolvedSymbol(name) => {
                write!(f, "link error: unresolved symbol '{}'", name)
            }
        }
    }
}

impl std::error::Error for LinkError {}

pub type Result<T> = std::result::Result<T, LinkError>;

// ============================================================================
// Assembler
// ============================================================================

/// Assemble and link an assembly into an executable machine program.
///
/// Phase one scans the instruction stream: labels record the index of
/// the next instruction and occupy no code space; every other
/// mnemonic becomes one instruction of two code slots.  Phase two
/// lays out memory (constants by value, then variables
/// lexicographically, then temporaries by id), preloads the constant
/// pool, and resolves every operand: a memory address for data
/// movement, arithmetic and I/O, an instruction index for jumps, and
/// `-1` for `HALT`.
pub fn assemble(assembly: &Assembly) -> Result<MachineProgram> {
    // Phase one: separate labels from instructions.
    let mut labels = BTreeMap::new();
    let mut instructions = Vec::new();
    for insn in &assembly.code {
        match insn {
            AsmInstruction::Label(name) => {
                labels.insert(name.clone(), instructions.len());
            }
            _ => instructions.push(insn.clone()),
        }
    }
    // Phase two: lay out memory.  The symbol set already iterates in
    // layout order.
    let mut symbols = BTreeMap::new();
    let mut mem_init = BTreeMap::new();
    for (address, symbol) in assembly.symbols.iter().enumerate() {
        symbols.insert(symbol.name(), address);
        if let Symbol::Const(value) = symbol {
            mem_init.insert(address, *value);
        }
    }
    // Resolve operands and emit the flat code array.
    let mut code = Vec::with_capacity(instructions.len() * 2);
    for insn in &instructions {
        let (op, arg) = encode(insn, &symbols, &labels)?;
        code.push(op);
        code.push(arg);
    }
    Ok(MachineProgram {
        code,
        symbols,
        mem_init,
        labels,
    })
}

fn encode(
    insn: &AsmInstruction,
    symbols: &BTreeMap<String, usize>,
    labels: &BTreeMap<String, usize>,
) -> Result<(i64, i64)> {
    use AsmInstruction::*;
    let encoded = match insn {
        Load(s) => (opcode::LOAD, address(s, symbols)?),
        Store(s) => (opcode::STORE, address(s, symbols)?),
        Add(s) => (opcode::ADD, address(s, symbols)?),
        Sub(s) => (opcode::SUB, address(s, symbols)?),
        Mul(s) => (opcode::MUL, address(s, symbols)?),
        Div(s) => (opcode::DIV, address(s, symbols)?),
        Jmp(l) => (opcode::JMP, target(l, labels)?),
        Jlt(l) => (opcode::JLT, target(l, labels)?),
        Jgt(l) => (opcode::JGT, target(l, labels)?),
        Jle(l) => (opcode::JLE, target(l, labels)?),
        Jge(l) => (opcode::JGE, target(l, labels)?),
        Jeq(l) => (opcode::JEQ, target(l, labels)?),
        Jne(l) => (opcode::JNE, target(l, labels)?),
        In(s) => (opcode::IN, address(s, symbols)?),
        Out(s) => (opcode::OUT, address(s, symbols)?),
        Halt => (opcode::HALT, -1),
        Label(_) => unreachable!("labels are consumed during scanning"),
    };
    Ok(encoded)
}

fn address(symbol: &Symbol, symbols: &BTreeMap<String, usize>) -> Result<i64> {
    match symbols.get(&symbol.name()) {
        Some(address) => Ok(*address as i64),
        None => Err(LinkError::UnresolvedSymbol(symbol.name())),
    }
}

fn target(label: &str, labels: &BTreeMap<String, usize>) -> Result<i64> {
    match labels.get(label) {
        Some(index) => Ok(*index as i64),
        None => Err(LinkError::UnresolvedLabel(label.to_string())),
    }
}
