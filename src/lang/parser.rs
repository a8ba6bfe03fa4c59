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

use crate::lang::{BinOp, Expr, Program, Stmt, Token, TokenKind, UnOp};
use crate::util::caret_excerpt;

// =========================================================================
// Error
// =========================================================================

/// An error produced by the parser: an unexpected token, a missing
/// required token, or end of input in the middle of a construct.
/// Messages name the expected kind and the found token.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub excerpt: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "parse error: {} at line {}, column {}\n{}",
            self.message, self.line, self.column, self.excerpt
        )
    }
}

impl std::error::Error for ParseError {}

pub type Result<T> = std::result::Result<T, ParseError>;

// =========================================================================
// Parser
// =========================================================================

/// A recursive-descent LL(1) parser over a token stream.  The source
/// text is kept only for rendering caret excerpts in errors.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            position: 0,
        }
    }

    /// Parse a complete program: statements up to the terminating
    /// `end` keyword.
    pub fn parse(mut self) -> Result<Program> {
        let mut stmts = Vec::new();
        while self.peek().kind != TokenKind::End {
            if self.peek().kind == TokenKind::Eof {
                let found = self.peek().clone();
                return Err(self.error_at(&found, "expected 'end', found end of file".to_string()));
            }
            stmts.push(self.parse_stmt()?);
        }
        // Consume the terminating keyword
        self.advance();
        Ok(Program { stmts })
    }

    // =====================================================================
    // Statements
    // =====================================================================

    fn parse_stmt(&mut self) -> Result<Stmt> {
        match self.peek().kind {
            TokenKind::Read => self.parse_stmt_read(),
            TokenKind::Print => self.parse_stmt_print(),
            TokenKind::If => self.parse_stmt_if(),
            TokenKind::While => self.parse_stmt_while(),
            TokenKind::Ident => self.parse_stmt_assign(),
            _ => {
                let found = self.peek().clone();
                Err(self.error_at(
                    &found,
                    format!("expected a statement, found {}", found.kind),
                ))
            }
        }
    }

    fn parse_stmt_read(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::Read)?;
        let name = self.expect_ident()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Read(name))
    }

    fn parse_stmt_print(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::Print)?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Print(expr))
    }

    fn parse_stmt_assign(&mut self) -> Result<Stmt> {
        let name = self.expect_ident()?;
        self.expect(TokenKind::Assign)?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Assign(name, expr))
    }

    fn parse_stmt_if(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::If)?;
        let cond = self.parse_expr()?;
        let then_body = self.parse_block()?;
        // The else clause is mandatory
        self.expect(TokenKind::Else)?;
        let else_body = self.parse_block()?;
        Ok(Stmt::IfElse(cond, then_body, else_body))
    }

    fn parse_stmt_while(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::While)?;
        let cond = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::While(cond, body))
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>> {
        self.expect(TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while self.peek().kind != TokenKind::RBrace {
            if self.peek().kind == TokenKind::Eof {
                let found = self.peek().clone();
                return Err(self.error_at(&found, "expected '}', found end of file".to_string()));
            }
            stmts.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(stmts)
    }

    // =====================================================================
    // Expressions
    // =====================================================================

    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> Result<Expr> {
        let mut expr = self.parse_comparison()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::EqEq => BinOp::Equals,
                TokenKind::NotEq => BinOp::NotEquals,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_comparison()?;
            expr = Expr::Binary(op, Box::new(expr), Box::new(rhs));
        }
        Ok(expr)
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let mut expr = self.parse_term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Lt => BinOp::LessThan,
                TokenKind::LtEq => BinOp::LessThanOrEquals,
                TokenKind::Gt => BinOp::GreaterThan,
                TokenKind::GtEq => BinOp::GreaterThanOrEquals,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_term()?;
            expr = Expr::Binary(op, Box::new(expr), Box::new(rhs));
        }
        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut expr = self.parse_factor()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Subtract,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_factor()?;
            expr = Expr::Binary(op, Box::new(expr), Box::new(rhs));
        }
        Ok(expr)
    }

    fn parse_factor(&mut self) -> Result<Expr> {
        let mut expr = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinOp::Multiply,
                TokenKind::Slash => BinOp::Divide,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            expr = Expr::Binary(op, Box::new(expr), Box::new(rhs));
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if self.peek().kind == TokenKind::Minus {
            self.advance();
            let inner = self.parse_unary()?;
            Ok(Expr::Unary(UnOp::Negate, Box::new(inner)))
        } else {
            self.parse_primary()
        }
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.peek().kind {
            TokenKind::Number(value) => {
                self.advance();
                Ok(Expr::Number(value))
            }
            TokenKind::Ident => {
                let token = self.advance();
                Ok(Expr::Var(token.lexeme))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => {
                let found = self.peek().clone();
                Err(self.error_at(
                    &found,
                    format!("expected an expression, found {}", found.kind),
                ))
            }
        }
    }

    // =====================================================================
    // Helpers
    // =====================================================================

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.peek().kind == kind {
            Ok(self.advance())
        } else {
            let found = self.peek().clone();
            Err(self.error_at(
                &found,
                format!("expected {}, found {}", kind, found.kind),
            ))
        }
    }

    fn expect_ident(&mut self) -> Result<String> {
        if self.peek().kind == TokenKind::Ident {
            Ok(self.advance().lexeme)
        } else {
            let found = self.peek().clone();
            Err(self.error_at(
                &found,
                format!("expected identifier, found {}", found.kind),
            ))
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// Consume the current token.  The final `Eof` token is never
    /// advanced past, so `peek` always has something to return.
    fn advance(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn error_at(&self, token: &Token, message: String) -> ParseError {
        ParseError {
            line: token.line,
            column: token.column,
            message,
            excerpt: caret_excerpt(self.source, token.line, token.column),
        }
    }
}
