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

use crate::lang::BinOp;

/// Name of the sentinel label appended at the end of every TAC
/// program.
pub const END_LABEL: &str = "END";

// ===================================================================
// Operands
// ===================================================================

/// A TAC operand.  Variables, temporaries and literals are tagged
/// rather than conflated into strings, so later stages dispatch with
/// a match instead of re-parsing names.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// A program variable.
    Var(String),
    /// A compiler temporary, rendered `t<N>`.
    Temp(usize),
    /// An integer literal.
    Literal(i64),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Var(name) => f.write_str(name),
            Operand::Temp(id) => write!(f, "t{}", id),
            Operand::Literal(value) => write!(f, "{}", value),
        }
    }
}

// ===================================================================
// Instructions
// ===================================================================

/// A three-address instruction.  Destinations are always variables or
/// temporaries, never literals.
#[derive(Clone, Debug, PartialEq)]
pub enum Tac {
    /// Copy the source operand into the destination.
    Assign { src: Operand, dest: Operand },
    /// Apply a binary operator; comparators store 0 or 1.
    Binary {
        op: BinOp,
        lhs: Operand,
        rhs: Operand,
        dest: Operand,
    },
    /// Arithmetic negation.
    Negate { src: Operand, dest: Operand },
    /// Mark a jump target.
    Label(String),
    /// Unconditional jump.
    Goto(String),
    /// Jump to the target when the condition operand is non-zero.
    IfNotZero { cond: Operand, target: String },
    /// Read one input into a variable.
    Read(String),
    /// Append the operand's value to the program output.
    Print(Operand),
}

impl fmt::Display for Tac {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tac::Assign { src, dest } => write!(f, "{} = {}", dest, src),
            Tac::Binary { op, lhs, rhs, dest } => {
                write!(f, "{} = {} {} {}", dest, lhs, op.symbol(), rhs)
            }
            Tac::Negate { src, dest } => write!(f, "{} = -{}", dest, src),
            Tac::Label(name) => write!(f, "{}:", name),
            Tac::Goto(target) => write!(f, "goto {}", target),
            Tac::IfNotZero { cond, target } => write!(f, "ifnz {} goto {}", cond, target),
            Tac::Read(name) => write!(f, "read {}", name),
            Tac::Print(value) => write!(f, "print {}", value),
        }
    }
}
