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

/// Functionality for lowering three-address code onto the accumulator
/// machine, and for assembling / linking the result into an executable
/// machine program with a fixed memory layout.
pub mod asm;
/// The MiniLang front end: tokens, lexer, abstract syntax tree,
/// recursive-descent parser, the flow-sensitive initialization
/// analysis and the constant folder.
pub mod lang;
/// Composition of the compilation stages into a single driver, along
/// with the unified compile-time error type.
pub mod pipeline;
/// The three-address intermediate code and its generator.  Operands
/// are tagged (variable / temporary / literal) rather than strings.
pub mod tac;
/// Shared helpers, such as rendering caret-pointed source excerpts
/// for diagnostics.
pub mod util;
/// The bytecode virtual machine: the opcode table, the linked machine
/// program container, and the interpreter itself.
pub mod vm;
