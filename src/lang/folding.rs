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
use crate::lang::{BinOp, Expr, Program, Stmt, UnOp};

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluate a binary operator over constant operands with the exact
/// semantics the VM uses at runtime: wrapping two's-complement i64
/// arithmetic, truncating division, comparators yielding 0 or 1.
/// Returns `None` for a zero divisor, which is a runtime-only error.
pub fn eval_binary(op: BinOp, lhs: i64, rhs: i64) -> Option<i64> {
    let value = match op {
        BinOp::Add => lhs.wrapping_add(rhs),
        BinOp::Subtract => lhs.wrapping_sub(rhs),
        BinOp::Multiply => lhs.wrapping_mul(rhs),
        BinOp::Divide => {
            if rhs == 0 {
                return None;
            }
            lhs.wrapping_div(rhs)
        }
        BinOp::LessThan => (lhs < rhs) as i64,
        BinOp::LessThanOrEquals => (lhs <= rhs) as i64,
        BinOp::GreaterThan => (lhs > rhs) as i64,
        BinOp::GreaterThanOrEquals => (lhs >= rhs) as i64,
        BinOp::Equals => (lhs == rhs) as i64,
        BinOp::NotEquals => (lhs != rhs) as i64,
    };
    Some(value)
}

/// Arithmetic negation with the runtime's wrapping semantics.
pub fn eval_negate(value: i64) -> i64 {
    value.wrapping_neg()
}

// ============================================================================
// Folding
// ============================================================================

/// Transform a program by evaluating constant subexpressions bottom-up
/// and pruning `if` branches whose condition folds to a constant.
/// Folding is idempotent.
pub fn fold_program(program: &Program) -> Program {
    Program {
        stmts: fold_stmts(&program.stmts),
    }
}

fn fold_stmts(stmts: &[Stmt]) -> Vec<Stmt> {
    let mut out = Vec::new();
    for stmt in stmts {
        fold_stmt(stmt, &mut out);
    }
    out
}

fn fold_stmt(stmt: &Stmt, out: &mut Vec<Stmt>) {
    match stmt {
        Stmt::Read(name) => out.push(Stmt::Read(name.clone())),
        Stmt::Print(expr) => out.push(Stmt::Print(fold_expr(expr))),
        Stmt::Assign(name, expr) => out.push(Stmt::Assign(name.clone(), fold_expr(expr))),
        Stmt::IfElse(cond, then_body, else_body) => match fold_expr(cond) {
            // A constant condition selects one branch, which is
            // inlined in place of the conditional.
            Expr::Number(0) => out.extend(fold_stmts(else_body)),
            Expr::Number(_) => out.extend(fold_stmts(then_body)),
            cond => out.push(Stmt::IfElse(
                cond,
                fold_stmts(then_body),
                fold_stmts(else_body),
            )),
        },
        Stmt::While(cond, body) => {
            out.push(Stmt::While(fold_expr(cond), fold_stmts(body)));
        }
    }
}

fn fold_expr(expr: &Expr) -> Expr {
    match expr {
        Expr::Number(value) => Expr::Number(*value),
        Expr::Var(name) => Expr::Var(name.clone()),
        Expr::Unary(UnOp::Negate, inner) => match fold_expr(inner) {
            Expr::Number(value) => Expr::Number(eval_negate(value)),
            folded => Expr::Unary(UnOp::Negate, Box::new(folded)),
        },
        Expr::Binary(op, lhs, rhs) => {
            let lhs = fold_expr(lhs);
            let rhs = fold_expr(rhs);
            if let (Expr::Number(a), Expr::Number(b)) = (&lhs, &rhs) {
                // Division by a literal zero is left in place so the
                // runtime error is preserved.
                if let Some(value) = eval_binary(*op, *a, *b) {
                    return Expr::Number(value);
                }
            }
            Expr::Binary(*op, Box::new(lhs), Box::new(rhs))
        }
    }
}
