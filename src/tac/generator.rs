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
use crate::lang::{Expr, Program, Stmt, UnOp};
use crate::tac::{Operand, Tac, END_LABEL};

/// Lower a program to three-address code.  The result ends with the
/// sentinel `END` label.
pub fn generate(program: &Program) -> Vec<Tac> {
    TacGenerator::new().lower(program)
}

// ============================================================================
// Generator
// ============================================================================

/// Lowers an AST into three-address code.  The counters for
/// temporaries (`t1, t2, ...`) and labels (`L1, L2, ...`) live on the
/// generator instance, scoped to one compilation.
pub struct TacGenerator {
    code: Vec<Tac>,
    temps: usize,
    labels: usize,
}

impl TacGenerator {
    pub fn new() -> Self {
        Self {
            code: Vec::new(),
            temps: 0,
            labels: 0,
        }
    }

    pub fn lower(mut self, program: &Program) -> Vec<Tac> {
        for stmt in &program.stmts {
            self.lower_stmt(stmt);
        }
        self.code.push(Tac::Label(END_LABEL.to_string()));
        self.code
    }

    fn fresh_temp(&mut self) -> Operand {
        self.temps += 1;
        Operand::Temp(self.temps)
    }

    fn fresh_label(&mut self) -> String {
        self.labels += 1;
        format!("L{}", self.labels)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn lower_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Read(name) => self.code.push(Tac::Read(name.clone())),
            Stmt::Print(expr) => {
                let value = self.lower_expr(expr);
                self.code.push(Tac::Print(value));
            }
            Stmt::Assign(name, expr) => {
                let value = self.lower_expr(expr);
                self.code.push(Tac::Assign {
                    src: value,
                    dest: Operand::Var(name.clone()),
                });
            }
            Stmt::IfElse(cond, then_body, else_body) => {
                self.lower_if_else(cond, then_body, else_body)
            }
            Stmt::While(cond, body) => self.lower_while(cond, body),
        }
    }

    /// The else branch sits on the fall-through path; a non-zero
    /// condition jumps over it to the then branch.
    fn lower_if_else(&mut self, cond: &Expr, then_body: &[Stmt], else_body: &[Stmt]) {
        let lab_true = self.fresh_label();
        let lab_end = self.fresh_label();
        let cond = self.lower_expr(cond);
        self.code.push(Tac::IfNotZero {
            cond,
            target: lab_true.clone(),
        });
        for stmt in else_body {
            self.lower_stmt(stmt);
        }
        self.code.push(Tac::Goto(lab_end.clone()));
        self.code.push(Tac::Label(lab_true));
        for stmt in then_body {
            self.lower_stmt(stmt);
        }
        self.code.push(Tac::Label(lab_end));
    }

    /// The condition is re-evaluated at the loop head on every
    /// iteration.
    fn lower_while(&mut self, cond: &Expr, body: &[Stmt]) {
        let lab_start = self.fresh_label();
        let lab_body = self.fresh_label();
        let lab_end = self.fresh_label();
        self.code.push(Tac::Label(lab_start.clone()));
        let cond = self.lower_expr(cond);
        self.code.push(Tac::IfNotZero {
            cond,
            target: lab_body.clone(),
        });
        self.code.push(Tac::Goto(lab_end.clone()));
        self.code.push(Tac::Label(lab_body));
        for stmt in body {
            self.lower_stmt(stmt);
        }
        self.code.push(Tac::Goto(lab_start));
        self.code.push(Tac::Label(lab_end));
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Post-order emission: every computed result lands in a fresh
    /// temporary, and literals are materialized with an assignment.
    /// A bare variable reference is used as an operand directly.
    fn lower_expr(&mut self, expr: &Expr) -> Operand {
        match expr {
            Expr::Number(value) => {
                let dest = self.fresh_temp();
                self.code.push(Tac::Assign {
                    src: Operand::Literal(*value),
                    dest: dest.clone(),
                });
                dest
            }
            Expr::Var(name) => Operand::Var(name.clone()),
            Expr::Unary(UnOp::Negate, inner) => {
                let src = self.lower_expr(inner);
                let dest = self.fresh_temp();
                self.code.push(Tac::Negate {
                    src,
                    dest: dest.clone(),
                });
                dest
            }
            Expr::Binary(op, lhs, rhs) => {
                let lhs = self.lower_expr(lhs);
                let rhs = self.lower_expr(rhs);
                let dest = self.fresh_temp();
                self.code.push(Tac::Binary {
                    op: *op,
                    lhs,
                    rhs,
                    dest: dest.clone(),
                });
                dest
            }
        }
    }
}

impl Default for TacGenerator {
    fn default() -> Self {
        Self::new()
    }
}
