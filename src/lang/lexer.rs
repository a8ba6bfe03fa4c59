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

use crate::lang::{Token, TokenKind};
use crate::util::caret_excerpt;

// ===================================================================
// Error
// ===================================================================

/// An error produced during lexical analysis: an invalid character, a
/// malformed operator, an unterminated block comment, or an oversized
/// integer literal.  The excerpt is the offending source line with a
/// caret under the column.
#[derive(Clone, Debug, PartialEq)]
pub struct LexError {
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub excerpt: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "lexical error: {} at line {}, column {}\n{}",
            self.message, self.line, self.column, self.excerpt
        )
    }
}

impl std::error::Error for LexError {}

type Result<T> = std::result::Result<T, LexError>;

// ===================================================================
// Lexer
// ===================================================================

/// Translate source text into a token stream ending in `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).tokenize()
}

/// A single forward pass over the source with one character of
/// lookahead.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Vec<char>,
    index: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let chars = source.chars().collect();
        Self {
            source,
            chars,
            index: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        self.skip_trivia()?;
        // Record the start of this token
        let (line, column) = (self.line, self.column);
        //
        let c = match self.peek() {
            Some(c) => c,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    lexeme: String::new(),
                    line,
                    column,
                })
            }
        };
        // Dispatch on the first character
        match c {
            '(' => Ok(self.single(TokenKind::LParen, line, column)),
            ')' => Ok(self.single(TokenKind::RParen, line, column)),
            '{' => Ok(self.single(TokenKind::LBrace, line, column)),
            '}' => Ok(self.single(TokenKind::RBrace, line, column)),
            ';' => Ok(self.single(TokenKind::Semicolon, line, column)),
            '+' => Ok(self.single(TokenKind::Plus, line, column)),
            '-' => Ok(self.single(TokenKind::Minus, line, column)),
            '*' => Ok(self.single(TokenKind::Star, line, column)),
            // Comments were consumed as trivia, so a slash here is the
            // division operator.
            '/' => Ok(self.single(TokenKind::Slash, line, column)),
            '=' => Ok(self.one_or_two(TokenKind::EqEq, TokenKind::Assign, line, column)),
            '<' => Ok(self.one_or_two(TokenKind::LtEq, TokenKind::Lt, line, column)),
            '>' => Ok(self.one_or_two(TokenKind::GtEq, TokenKind::Gt, line, column)),
            '!' => {
                self.advance();
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token {
                        kind: TokenKind::NotEq,
                        lexeme: "!=".to_string(),
                        line,
                        column,
                    })
                } else {
                    Err(self.error_at(line, column, "expected '=' after '!'".to_string()))
                }
            }
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.scan_word(line, column)),
            '0'..='9' => self.scan_number(line, column),
            _ => Err(self.error_at(line, column, format!("unexpected character '{}'", c))),
        }
    }

    /// Scan an identifier or keyword.
    fn scan_word(&mut self, line: usize, column: usize) -> Token {
        let start = self.index;
        while let Some(c) = self.peek() {
            if c == '_' || c.is_ascii_alphanumeric() {
                self.advance();
            } else {
                break;
            }
        }
        let lexeme: String = self.chars[start..self.index].iter().collect();
        // Reserved words take their keyword kind
        let kind = match lexeme.as_str() {
            "read" => TokenKind::Read,
            "print" => TokenKind::Print,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "end" => TokenKind::End,
            _ => TokenKind::Ident,
        };
        Token {
            kind,
            lexeme,
            line,
            column,
        }
    }

    /// Scan a non-negative decimal literal.
    fn scan_number(&mut self, line: usize, column: usize) -> Result<Token> {
        let start = self.index;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }
        let lexeme: String = self.chars[start..self.index].iter().collect();
        // The literal must fit the width used for compile-time
        // evaluation.
        let value = match lexeme.parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                return Err(self.error_at(
                    line,
                    column,
                    format!("integer literal '{}' is too large", lexeme),
                ))
            }
        };
        Ok(Token {
            kind: TokenKind::Number(value),
            lexeme,
            line,
            column,
        })
    }

    /// Skip whitespace and both comment forms.  A block comment left
    /// open at end of input is an error reported at its opening.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            while let Some(c) = self.peek() {
                if c.is_ascii_whitespace() {
                    self.advance();
                } else {
                    break;
                }
            }
            if self.peek() == Some('/') && self.peek_next() == Some('/') {
                // Line comment runs to the end of the line
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else if self.peek() == Some('/') && self.peek_next() == Some('*') {
                let (line, column) = (self.line, self.column);
                self.advance();
                self.advance();
                loop {
                    match self.peek() {
                        None => {
                            return Err(self.error_at(
                                line,
                                column,
                                "unterminated block comment".to_string(),
                            ))
                        }
                        Some('*') if self.peek_next() == Some('/') => {
                            self.advance();
                            self.advance();
                            break;
                        }
                        Some(_) => {
                            self.advance();
                        }
                    }
                }
            } else {
                return Ok(());
            }
        }
    }

    // ===============================================================
    // Helpers
    // ===============================================================

    fn single(&mut self, kind: TokenKind, line: usize, column: usize) -> Token {
        let c = self.advance();
        Token {
            kind,
            lexeme: c.to_string(),
            line,
            column,
        }
    }

    /// Consume one character, and a trailing '=' if present, choosing
    /// between the two-character and one-character kinds.
    fn one_or_two(
        &mut self,
        long: TokenKind,
        short: TokenKind,
        line: usize,
        column: usize,
    ) -> Token {
        let mut lexeme = String::new();
        lexeme.push(self.advance());
        if self.peek() == Some('=') {
            lexeme.push(self.advance());
            Token {
                kind: long,
                lexeme,
                line,
                column,
            }
        } else {
            Token {
                kind: short,
                lexeme,
                line,
                column,
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.index + 1).copied()
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.index];
        self.index += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn error_at(&self, line: usize, column: usize, message: String) -> LexError {
        LexError {
            line,
            column,
            message,
            excerpt: caret_excerpt(self.source, line, column),
        }
    }
}
