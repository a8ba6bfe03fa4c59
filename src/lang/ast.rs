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

// ============================================================================
// Expressions
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(i64),
    Var(String),
    Unary(UnOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UnOp {
    Negate,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    // Comparators
    LessThan,
    LessThanOrEquals,
    GreaterThan,
    GreaterThanOrEquals,
    Equals,
    NotEquals,
}

impl BinOp {
    /// The operator as written in source and in listings.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::LessThan => "<",
            BinOp::LessThanOrEquals => "<=",
            BinOp::GreaterThan => ">",
            BinOp::GreaterThanOrEquals => ">=",
            BinOp::Equals => "==",
            BinOp::NotEquals => "!=",
        }
    }

    /// True for `+ - * /`, false for the comparators.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinOp::Add | BinOp::Subtract | BinOp::Multiply | BinOp::Divide
        )
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Read(String),
    Print(Expr),
    Assign(String, Expr),
    /// Both branches are always present; the grammar requires `else`.
    IfElse(Expr, Vec<Stmt>, Vec<Stmt>),
    While(Expr, Vec<Stmt>),
}

/// An ordered sequence of statements.  The terminating `end` keyword
/// is part of the concrete syntax only.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

// ============================================================================
// Serialization
// ============================================================================

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for stmt in &self.stmts {
            write_stmt(f, stmt, 0)?;
        }
        Ok(())
    }
}

fn write_stmt(f: &mut fmt::Formatter, stmt: &Stmt, depth: usize) -> fmt::Result {
    let pad = "  ".repeat(depth);
    match stmt {
        Stmt::Read(name) => writeln!(f, "{}read {}", pad, name),
        Stmt::Print(expr) => {
            writeln!(f, "{}print", pad)?;
            write_expr(f, expr, depth + 1)
        }
        Stmt::Assign(name, expr) => {
            writeln!(f, "{}assign {}", pad, name)?;
            write_expr(f, expr, depth + 1)
        }
        Stmt::IfElse(cond, then_body, else_body) => {
            writeln!(f, "{}if", pad)?;
            write_expr(f, cond, depth + 1)?;
            writeln!(f, "{}then", pad)?;
            for stmt in then_body {
                write_stmt(f, stmt, depth + 1)?;
            }
            writeln!(f, "{}else", pad)?;
            for stmt in else_body {
                write_stmt(f, stmt, depth + 1)?;
            }
            Ok(())
        }
        Stmt::While(cond, body) => {
            writeln!(f, "{}while", pad)?;
            write_expr(f, cond, depth + 1)?;
            writeln!(f, "{}do", pad)?;
            for stmt in body {
                write_stmt(f, stmt, depth + 1)?;
            }
            Ok(())
        }
    }
}

fn write_expr(f: &mut fmt::Formatter, expr: &Expr, depth: usize) -> fmt::Result {
    let pad = "  ".repeat(depth);
    match expr {
        Expr::Number(value) => writeln!(f, "{}number {}", pad, value),
        Expr::Var(name) => writeln!(f, "{}var {}", pad, name),
        Expr::Unary(UnOp::Negate, inner) => {
            writeln!(f, "{}negate", pad)?;
            write_expr(f, inner, depth + 1)
        }
        Expr::Binary(op, lhs, rhs) => {
            writeln!(f, "{}binary {}", pad, op.symbol())?;
            write_expr(f, lhs, depth + 1)?;
            write_expr(f, rhs, depth + 1)
        }
    }
}
