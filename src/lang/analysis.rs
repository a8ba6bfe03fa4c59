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
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::lang::{Expr, Program, Stmt};

// ============================================================================
// Symbol table
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymbolInfo {
    pub declared: bool,
    pub initialized: bool,
}

/// Names live in a single global namespace; declaration is implicit
/// on first `read` or assignment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SymbolTable {
    entries: BTreeMap<String, SymbolInfo>,
}

impl SymbolTable {
    pub fn get(&self, name: &str) -> Option<SymbolInfo> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SymbolInfo)> {
        self.entries.iter()
    }

    fn declare_initialized(&mut self, name: &str) {
        let info = self.entries.entry(name.to_string()).or_insert(SymbolInfo {
            declared: true,
            initialized: false,
        });
        info.initialized = true;
    }

    fn declare_uninitialized(&mut self, name: &str) {
        self.entries.entry(name.to_string()).or_insert(SymbolInfo {
            declared: true,
            initialized: false,
        });
    }
}

// ============================================================================
// Warnings
// ============================================================================

/// A non-fatal finding from the semantic analysis.  Warnings are
/// accumulated and never abort compilation.
#[derive(Clone, Debug, PartialEq)]
pub struct Warning {
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ============================================================================
// Analysis
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub symbols: SymbolTable,
    pub warnings: Vec<Warning>,
}

/// Populate the symbol table and warn about reads of possibly
/// uninitialized variables.  The analysis tracks the set of variables
/// definitely initialized at each program point; it is deliberately
/// conservative, making one pass with no fixed-point for loops.
pub fn analyze(program: &Program) -> Analysis {
    let mut analyzer = Analyzer::default();
    let mut init = BTreeSet::new();
    analyzer.check_stmts(&program.stmts, &mut init);
    Analysis {
        symbols: analyzer.symbols,
        warnings: analyzer.warnings,
    }
}

#[derive(Default)]
struct Analyzer {
    symbols: SymbolTable,
    warnings: Vec<Warning>,
}

impl Analyzer {
    fn check_stmts(&mut self, stmts: &[Stmt], init: &mut BTreeSet<String>) {
        for stmt in stmts {
            self.check_stmt(stmt, init);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt, init: &mut BTreeSet<String>) {
        match stmt {
            Stmt::Read(name) => {
                self.symbols.declare_initialized(name);
                init.insert(name.clone());
            }
            Stmt::Assign(name, expr) => {
                // The right-hand side is checked against the state
                // before the assignment takes effect.
                self.check_expr(expr, init);
                self.symbols.declare_initialized(name);
                init.insert(name.clone());
            }
            Stmt::Print(expr) => self.check_expr(expr, init),
            Stmt::IfElse(cond, then_body, else_body) => {
                self.check_expr(cond, init);
                let mut init_then = init.clone();
                self.check_stmts(then_body, &mut init_then);
                let mut init_else = init.clone();
                self.check_stmts(else_body, &mut init_else);
                // Only variables assigned on both paths remain
                // definitely initialized.
                *init = init_then.intersection(&init_else).cloned().collect();
            }
            Stmt::While(cond, body) => {
                self.check_expr(cond, init);
                // The body may execute zero times, so its assignments
                // do not survive the loop.
                let mut init_body = init.clone();
                self.check_stmts(body, &mut init_body);
            }
        }
    }

    fn check_expr(&mut self, expr: &Expr, init: &BTreeSet<String>) {
        match expr {
            Expr::Number(_) => {}
            Expr::Var(name) => {
                if !init.contains(name) {
                    self.symbols.declare_uninitialized(name);
                    self.warnings.push(Warning {
                        message: format!("variable '{}' may be uninitialized", name),
                    });
                }
            }
            Expr::Unary(_, inner) => self.check_expr(inner, init),
            Expr::Binary(_, lhs, rhs) => {
                self.check_expr(lhs, init);
                self.check_expr(rhs, init);
            }
        }
    }
}
