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
// Token kinds
// ===================================================================

/// The lexical categories MiniLang recognises.  Number literals carry
/// their parsed value; every other kind is fully described by the
/// token's lexeme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    // Keywords
    Read,
    Print,
    If,
    Else,
    While,
    End,
    // Identifiers and literals
    Ident,
    Number(i64),
    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Assign,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    // End of input
    Eof,
}

impl TokenKind {
    /// Short kind name used when serializing a token stream.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Read => "read",
            TokenKind::Print => "print",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::End => "end",
            TokenKind::Ident => "ident",
            TokenKind::Number(_) => "number",
            TokenKind::Plus => "plus",
            TokenKind::Minus => "minus",
            TokenKind::Star => "star",
            TokenKind::Slash => "slash",
            TokenKind::Assign => "assign",
            TokenKind::EqEq => "eq",
            TokenKind::NotEq => "neq",
            TokenKind::Lt => "lt",
            TokenKind::LtEq => "le",
            TokenKind::Gt => "gt",
            TokenKind::GtEq => "ge",
            TokenKind::LParen => "lparen",
            TokenKind::RParen => "rparen",
            TokenKind::LBrace => "lbrace",
            TokenKind::RBrace => "rbrace",
            TokenKind::Semicolon => "semi",
            TokenKind::Eof => "eof",
        }
    }
}

/// Writes the kind the way error messages spell it, e.g. `expected
/// ';', found number`.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            TokenKind::Read => "'read'",
            TokenKind::Print => "'print'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::End => "'end'",
            TokenKind::Ident => "identifier",
            TokenKind::Number(_) => "number",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Assign => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::LtEq => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::GtEq => "'>='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Semicolon => "';'",
            TokenKind::Eof => "end of file",
        };
        f.write_str(text)
    }
}

// ===================================================================
// Token
// ===================================================================

/// A lexeme tagged with its kind and 1-indexed source location.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{}\t{}\t{}",
            self.line,
            self.column,
            self.kind.name(),
            self.lexeme
        )
    }
}
