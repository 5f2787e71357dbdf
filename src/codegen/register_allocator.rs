use std::slice::Iter;

use crate::prelude::*;

use super::machine::Register;

/// Hands out registers from the fixed register file. Registers are not tied to
/// names: every value is loaded from memory when needed, so all registers can be
/// released once an instruction has been emitted.
pub struct RegisterAllocator {
    iterator: Iter<'static, Register>,
}
impl RegisterAllocator {
    pub fn new() -> Self {
        Self {
            iterator: Register::iter(),
        }
    }

    pub fn allocate(&mut self) -> Result<Register> {
        self.iterator
            .next()
            .copied()
            .ok_or_else(|| anyhow!("register pool exhausted"))
    }

    /// Make every register available again.
    pub fn release_all(&mut self) {
        self.iterator = Register::iter();
    }
}
