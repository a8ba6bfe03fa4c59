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
use std::collections::BTreeSet;
use std::fmt;

use crate::asm::{AsmInstruction, Symbol};
use crate::lang::BinOp;
use crate::tac::{Operand, Tac};

// ============================================================================
// Assembly
// ============================================================================

/// The assembly generator's artifact: the instruction stream plus
/// every symbol it references.  Constants appear in the symbol set
/// with their value, ready for the linker to preload.
#[derive(Clone, Debug, PartialEq)]
pub struct Assembly {
    pub code: Vec<AsmInstruction>,
    pub symbols: BTreeSet<Symbol>,
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for insn in &self.code {
            writeln!(f, "{}", insn)?;
        }
        Ok(())
    }
}

/// Lower three-address code to accumulator assembly.
pub fn generate(tac: &[Tac]) -> Assembly {
    AsmGenerator::new().lower(tac)
}

// ============================================================================
// Generator
// ============================================================================

pub struct AsmGenerator {
    code: Vec<AsmInstruction>,
    symbols: BTreeSet<Symbol>,
    /// Counts comparison lowerings, for their internal label pairs.
    comparisons: usize,
}

impl AsmGenerator {
    pub fn new() -> Self {
        Self {
            code: Vec::new(),
            symbols: BTreeSet::new(),
            comparisons: 0,
        }
    }

    pub fn lower(mut self, tac: &[Tac]) -> Assembly {
        for insn in tac {
            self.lower_insn(insn);
        }
        // Execution falls through the terminal END label into the halt.
        self.code.push(AsmInstruction::Halt);
        Assembly {
            code: self.code,
            symbols: self.symbols,
        }
    }

    /// Register and translate a TAC operand.  Literals become named
    /// constants which the linker preloads.
    fn operand(&mut self, operand: &Operand) -> Symbol {
        let symbol = match operand {
            Operand::Var(name) => Symbol::Var(name.clone()),
            Operand::Temp(id) => Symbol::Temp(*id),
            Operand::Literal(value) => Symbol::Const(*value),
        };
        self.symbols.insert(symbol.clone());
        symbol
    }

    fn constant(&mut self, value: i64) -> Symbol {
        let symbol = Symbol::Const(value);
        self.symbols.insert(symbol.clone());
        symbol
    }

    /// Label pair for one comparison lowering.  The `cmp` prefix keeps
    /// them clear of the TAC generator's `L<N>` names and the `END`
    /// sentinel.
    fn fresh_labels(&mut self) -> (String, String) {
        self.comparisons += 1;
        (
            format!("cmp{}_true", self.comparisons),
            format!("cmp{}_end", self.comparisons),
        )
    }

    fn lower_insn(&mut self, insn: &Tac) {
        use AsmInstruction::*;
        match insn {
            Tac::Assign { src, dest } => {
                let src = self.operand(src);
                let dest = self.operand(dest);
                self.code.push(Load(src));
                self.code.push(Store(dest));
            }
            Tac::Binary { op, lhs, rhs, dest } => {
                if op.is_arithmetic() {
                    self.lower_arithmetic(*op, lhs, rhs, dest);
                } else {
                    self.lower_comparison(*op, lhs, rhs, dest);
                }
            }
            Tac::Negate { src, dest } => {
                // 0 - src
                let zero = self.constant(0);
                let src = self.operand(src);
                let dest = self.operand(dest);
                self.code.push(Load(zero));
                self.code.push(Sub(src));
                self.code.push(Store(dest));
            }
            Tac::Label(name) => self.code.push(Label(name.clone())),
            Tac::Goto(target) => self.code.push(Jmp(target.clone())),
            Tac::IfNotZero { cond, target } => {
                let cond = self.operand(cond);
                self.code.push(Load(cond));
                self.code.push(Jne(target.clone()));
            }
            Tac::Read(name) => {
                let symbol = Symbol::Var(name.clone());
                self.symbols.insert(symbol.clone());
                self.code.push(In(symbol));
            }
            Tac::Print(value) => {
                let symbol = self.operand(value);
                self.code.push(Out(symbol));
            }
        }
    }

    fn lower_arithmetic(&mut self, op: BinOp, lhs: &Operand, rhs: &Operand, dest: &Operand) {
        use AsmInstruction::*;
        let lhs = self.operand(lhs);
        let rhs = self.operand(rhs);
        let dest = self.operand(dest);
        self.code.push(Load(lhs));
        self.code.push(match op {
            BinOp::Add => Add(rhs),
            BinOp::Subtract => Sub(rhs),
            BinOp::Multiply => Mul(rhs),
            BinOp::Divide => Div(rhs),
            _ => unreachable!(),
        });
        self.code.push(Store(dest));
    }

    /// ACC is set to `lhs - rhs` and the truth jump tests it against
    /// zero; the fall-through path stores 0, the jump target stores 1.
    fn lower_comparison(&mut self, op: BinOp, lhs: &Operand, rhs: &Operand, dest: &Operand) {
        use AsmInstruction::*;
        let (lab_true, lab_end) = self.fresh_labels();
        let zero = self.constant(0);
        let one = self.constant(1);
        let lhs = self.operand(lhs);
        let rhs = self.operand(rhs);
        let dest = self.operand(dest);
        self.code.push(Load(lhs));
        self.code.push(Sub(rhs));
        self.code.push(match op {
            BinOp::LessThan => Jlt(lab_true.clone()),
            BinOp::GreaterThan => Jgt(lab_true.clone()),
            BinOp::LessThanOrEquals => Jle(lab_true.clone()),
            BinOp::GreaterThanOrEquals => Jge(lab_true.clone()),
            BinOp::Equals => Jeq(lab_true.clone()),
            BinOp::NotEquals => Jne(lab_true.clone()),
            _ => unreachable!(),
        });
        self.code.push(Load(zero));
        self.code.push(Store(dest.clone()));
        self.code.push(Jmp(lab_end.clone()));
        self.code.push(Label(lab_true));
        self.code.push(Load(one));
        self.code.push(Store(dest));
        self.code.push(Label(lab_end));
    }
}

impl Default for AsmGenerator {
    fn default() -> Self {
        Self::new()
    }
}
