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

// Data movement
pub const LOAD: i64 = 1;
pub const STORE: i64 = 2;
// Arithmetic
pub const ADD: i64 = 3;
pub const SUB: i64 = 4;
pub const MUL: i64 = 5;
pub const DIV: i64 = 6;
// Control flow
pub const JMP: i64 = 7;
pub const JLT: i64 = 8;
pub const JGT: i64 = 9;
pub const JLE: i64 = 10;
pub const JGE: i64 = 11;
pub const JEQ: i64 = 12;
pub const JNE: i64 = 13;
// Input / output
pub const IN: i64 = 14;
pub const OUT: i64 = 15;
// Termination
pub const HALT: i64 = 16;

/// Mnemonic for a given opcode, if the machine defines one.
pub fn mnemonic(op: i64) -> Option<&'static str> {
    let name = match op {
        LOAD => "LOAD",
        STORE => "STORE",
        ADD => "ADD",
        SUB => "SUB",
        MUL => "MUL",
        DIV => "DIV",
        JMP => "JMP",
        JLT => "JLT",
        JGT => "JGT",
        JLE => "JLE",
        JGE => "JGE",
        JEQ => "JEQ",
        JNE => "JNE",
        IN => "IN",
        OUT => "OUT",
        HALT => "HALT",
        _ => {
            return None;
        }
    };
    Some(name)
}
