//! Assembly listings for the register machine.

use std::fmt::{self, Display, Formatter};

use crate::{il::Number, listing::Listing};

use super::machine::{Op, Register};

/// A complete assembly program.
#[derive(Debug, Default)]
pub struct Program {
    lines: Listing<Line>,
}
impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: Op, operands: Vec<Operand>) -> &mut Self {
        self.lines.push(Line::new(Item::Instr(Instr::new(op, operands))));
        self
    }

    pub fn push_cmt<S: Into<String>>(
        &mut self,
        op: Op,
        operands: Vec<Operand>,
        comment: S,
    ) -> &mut Self {
        self.lines.push(Line::new_cmt(
            Item::Instr(Instr::new(op, operands)),
            comment.into(),
        ));
        self
    }

    pub fn label<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.lines.push(Line::new(Item::Label(name.into())));
        self
    }

    /// The labels and instructions of this program, without comments.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.lines.iter().map(|line| &line.item)
    }
}
impl Display for Program {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.lines)
    }
}

/// A line of assembly, consisting of a label or instruction and an optional comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    item: Item,
    comment: Option<String>,
}
impl Line {
    /// Construct a new line without comment.
    pub fn new(item: Item) -> Self {
        Self {
            item,
            comment: None,
        }
    }
    /// Construct a new line with a comment.
    pub fn new_cmt(item: Item, comment: String) -> Self {
        Self {
            item,
            comment: Some(comment),
        }
    }
}
impl Display for Line {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.comment {
            None => write!(f, "{}", self.item),
            Some(cmt) => write!(f, "{:32}; {}", self.item.to_string(), cmt),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Label(String),
    Instr(Instr),
}
impl Display for Item {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Item::Label(name) => write!(f, "{}:", name),
            Item::Instr(instr) => write!(f, "{}", instr),
        }
    }
}

/// A single instruction, consisting of an operator and zero or more operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Instr {
    operator: Op,
    operands: Vec<Operand>,
}
impl Instr {
    pub fn new(operator: Op, operands: Vec<Operand>) -> Instr {
        Self { operator, operands }
    }
}
impl Display for Instr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let operator = self.operator.to_string();
        write!(f, "    {:7} ", operator)?;
        let operands = self
            .operands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&operands)
    }
}

/// An operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A register
    Reg(Register),
    /// An immediate value
    Imm(Number),
    /// A named memory location
    Mem(String),
    /// A jump target
    Lbl(String),
}
impl Display for Operand {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Operand::Reg(reg) => write!(f, "{}", reg),
            Operand::Imm(imm) => write!(f, "#{}", imm),
            Operand::Mem(name) => f.write_str(name),
            Operand::Lbl(lbl) => f.write_str(lbl),
        }
    }
}
