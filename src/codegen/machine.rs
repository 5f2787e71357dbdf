use std::{
    fmt::{self, Display, Formatter},
    slice::Iter,
};

/// The general-purpose registers of the target machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}
impl Register {
    pub fn iter() -> Iter<'static, Register> {
        use Register::*;
        [R0, R1, R2, R3, R4, R5, R6, R7].iter()
    }
}
impl Display for Register {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Register::R0 => "R0",
            Register::R1 => "R1",
            Register::R2 => "R2",
            Register::R3 => "R3",
            Register::R4 => "R4",
            Register::R5 => "R5",
            Register::R6 => "R6",
            Register::R7 => "R7",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    // Memory
    Load,
    Store,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    Mov,
    // Comparison
    Cmp,
    SetEq,
    SetNe,
    SetLt,
    SetGt,
    // Jumps
    Jmp,
    Jz,
    Jnz,
    // Misc
    Print,
}
impl Display for Op {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Op::Load => "LOAD",
            Op::Store => "STORE",
            Op::Add => "ADD",
            Op::Sub => "SUB",
            Op::Mul => "MUL",
            Op::Div => "DIV",
            Op::Neg => "NEG",
            Op::Mov => "MOV",
            Op::Cmp => "CMP",
            Op::SetEq => "SETEQ",
            Op::SetNe => "SETNE",
            Op::SetLt => "SETLT",
            Op::SetGt => "SETGT",
            Op::Jmp => "JMP",
            Op::Jz => "JZ",
            Op::Jnz => "JNZ",
            Op::Print => "PRINT",
        })
    }
}
