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
use std::fmt;

// ===================================================================
// Symbols
// ===================================================================

/// A named memory cell.  Symbols stay tagged through linking, so a
/// program variable spelled `t1` can never collide with temporary
/// `t1`.  The derived ordering is the linker's memory layout:
/// constants by value, then variables lexicographically, then
/// temporaries by id.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Symbol {
    /// A named constant `const_<k>`, preloaded with the value `k`.
    Const(i64),
    /// A program variable.
    Var(String),
    /// A compiler temporary `t<N>`.
    Temp(usize),
}

impl Symbol {
    /// The symbol's name as it appears in the linked symbol table.
    pub fn name(&self) -> String {
        match self {
            Symbol::Const(value) => format!("const_{}", value),
            Symbol::Var(name) => name.clone(),
            Symbol::Temp(id) => format!("t{}", id),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name())
    }
}

// ===================================================================
// Instructions
// ===================================================================

/// One accumulator-machine assembly instruction.  Data movement,
/// arithmetic and I/O operate on a symbol; jumps target a label by
/// name; `Label` marks a position and occupies no code space.
#[derive(Clone, Debug, PartialEq)]
pub enum AsmInstruction {
    Load(Symbol),
    Store(Symbol),
    Add(Symbol),
    Sub(Symbol),
    Mul(Symbol),
    Div(Symbol),
    Jmp(String),
    Jlt(String),
    Jgt(String),
    Jle(String),
    Jge(String),
    Jeq(String),
    Jne(String),
    In(Symbol),
    Out(Symbol),
    Label(String),
    Halt,
}

impl AsmInstruction {
    /// Mnemonic as written in listings.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            AsmInstruction::Load(_) => "LOAD",
            AsmInstruction::Store(_) => "STORE",
            AsmInstruction::Add(_) => "ADD",
            AsmInstruction::Sub(_) => "SUB",
            AsmInstruction::Mul(_) => "MUL",
            AsmInstruction::Div(_) => "DIV",
            AsmInstruction::Jmp(_) => "JMP",
            AsmInstruction::Jlt(_) => "JLT",
            AsmInstruction::Jgt(_) => "JGT",
            AsmInstruction::Jle(_) => "JLE",
            AsmInstruction::Jge(_) => "JGE",
            AsmInstruction::Jeq(_) => "JEQ",
            AsmInstruction::Jne(_) => "JNE",
            AsmInstruction::In(_) => "IN",
            AsmInstruction::Out(_) => "OUT",
            AsmInstruction::Label(_) => "LABEL",
            AsmInstruction::Halt => "HALT",
        }
    }
}

impl fmt::Display for AsmInstruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AsmInstruction::Load(s)
            | AsmInstruction::Store(s)
            | AsmInstruction::Add(s)
            | AsmInstruction::Sub(s)
            | AsmInstruction::Mul(s)
            | AsmInstruction::Div(s)
            | AsmInstruction::In(s)
            | AsmInstruction::Out(s) => write!(f, "{} {}", self.mnemonic(), s),
            AsmInstruction::Jmp(l)
            | AsmInstruction::Jlt(l)
            | AsmInstruction::Jgt(l)
            | AsmInstruction::Jle(l)
            | AsmInstruction::Jge(l)
            | AsmInstruction::Jeq(l)
            | AsmInstruction::Jne(l)
            | AsmInstruction::Label(l) => write!(f, "{} {}", self.mnemonic(), l),
            AsmInstruction::Halt => f.write_str("HALT"),
        }
    }
}
