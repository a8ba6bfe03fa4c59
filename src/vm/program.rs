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
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Machine program
// ============================================================================

/// A linked, executable program: the flat code array of
/// `[opcode, operand]` pairs, the memory address of every symbol, the
/// initial values of the constant pool, and the instruction index of
/// every label.  The driver owns the program; the VM borrows it
/// read-only.
#[derive(Clone, Debug, PartialEq)]
pub struct MachineProgram {
    pub code: Vec<i64>,
    pub symbols: BTreeMap<String, usize>,
    pub mem_init: BTreeMap<usize, i64>,
    pub labels: BTreeMap<String, usize>,
}

impl MachineProgram {
    /// Number of memory cells the program addresses.
    pub fn memory_size(&self) -> usize {
        self.symbols.values().map(|address| address + 1).max().unwrap_or(0)
    }

    /// Number of instructions in the code array.
    pub fn len(&self) -> usize {
        self.code.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

/// The stable textual serialization: the code array as
/// whitespace-separated decimal integers, then the symbol table
/// ordered by address, the label map ordered by index, and the
/// constant-initialization map ordered by address.
impl fmt::Display for MachineProgram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "code:")?;
        for word in &self.code {
            write!(f, " {}", word)?;
        }
        writeln!(f)?;
        //
        writeln!(f, "symbols:")?;
        let mut symbols: Vec<_> = self.symbols.iter().collect();
        symbols.sort_by_key(|(_, address)| **address);
        for (name, address) in symbols {
            writeln!(f, "{} {}", name, address)?;
        }
        //
        writeln!(f, "labels:")?;
        let mut labels: Vec<_> = self.labels.iter().collect();
        labels.sort_by_key(|(_, index)| **index);
        for (name, index) in labels {
            writeln!(f, "{} {}", name, index)?;
        }
        //
        writeln!(f, "init:")?;
        for (address, value) in &self.mem_init {
            writeln!(f, "{} {}", address, value)?;
        }
        Ok(())
    }
}
