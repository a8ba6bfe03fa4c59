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

use log::info;

use crate::asm::{self, Assembly, LinkError};
use crate::lang::{self, LexError, ParseError, Parser, Program, Token, Warning};
use crate::tac::{self, Tac};
use crate::vm::MachineProgram;

// ============================================================================
// Errors
// ============================================================================

/// A failure from any aborting compilation stage.  Semantic warnings
/// are not errors; they ride in the successful result.
#[derive(Clone, Debug, PartialEq)]
pub enum CompileError {
    Lex(LexError),
    Parse(ParseError),
    Link(LinkError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompileError::Lex(e) => e.fmt(f),
            CompileError::Parse(e) => e.fmt(f),
            CompileError::Link(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<LexError> for CompileError {
    fn from(e: LexError) -> CompileError {
        CompileError::Lex(e)
    }
}

impl From<ParseError> for CompileError {
    fn from(e: ParseError) -> CompileError {
        CompileError::Parse(e)
    }
}

impl From<LinkError> for CompileError {
    fn from(e: LinkError) -> CompileError {
        CompileError::Link(e)
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;

// ============================================================================
// Pipeline
// ============================================================================

/// Every artifact of a successful compilation.  Each stage produces a
/// fresh value; nothing is mutated in place, so the artifacts can be
/// serialized independently.  When folding ran, `ast` is the folded
/// tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub ast: Program,
    pub warnings: Vec<Warning>,
    pub tac: Vec<Tac>,
    pub asm: Assembly,
    pub machine: MachineProgram,
}

/// Composes the compilation stages.
pub struct Pipeline {
    /// Whether the constant folding pass runs.
    pub fold: bool,
}

impl Pipeline {
    pub fn new(fold: bool) -> Self {
        Self { fold }
    }

    pub fn compile(&self, source: &str) -> Result<Compilation> {
        let tokens = lang::tokenize(source)?;
        info!("lexed {} tokens", tokens.len());
        //
        let ast = Parser::new(source, tokens.clone()).parse()?;
        info!("parsed {} top-level statements", ast.stmts.len());
        //
        let analysis = lang::analyze(&ast);
        info!("analysis produced {} warnings", analysis.warnings.len());
        //
        let ast = if self.fold {
            lang::fold_program(&ast)
        } else {
            ast
        };
        //
        let tac = tac::generate(&ast);
        info!("generated {} tac instructions", tac.len());
        //
        let assembly = asm::generate(&tac);
        info!(
            "generated {} assembly instructions over {} symbols",
            assembly.code.len(),
            assembly.symbols.len()
        );
        //
        let machine = asm::assemble(&assembly)?;
        info!(
            "linked {} code words, {} memory cells",
            machine.code.len(),
            machine.memory_size()
        );
        //
        Ok(Compilation {
            tokens,
            ast,
            warnings: analysis.warnings,
            tac,
            asm: assembly,
            machine,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self { fold: true }
    }
}
