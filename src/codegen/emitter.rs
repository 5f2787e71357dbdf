use std::collections::HashMap;

use crate::{
    ast::{BinOp, UnOp},
    il::*,
    prelude::*,
};

use super::{
    assembly::*,
    machine::{Op, Register},
    register_allocator::RegisterAllocator,
};

use Operand::*;

/// Translates a TAC listing into assembly for the register machine.
///
/// Every value lives in memory; registers only hold values for the duration of
/// a single TAC instruction. Fails if the listing jumps to a label it does not
/// define, or if an instruction needs more registers than the machine has.
pub fn emit(listing: &TacListing) -> Result<Program> {
    let program = Emitter::new(listing).compile()?;
    debug!("Emitted assembly for {} TAC instructions", listing.len());
    Ok(program)
}

struct Emitter<'a> {
    listing: &'a TacListing,
    labels: HashMap<Label, String>,
    allocator: RegisterAllocator,
    program: Program,
}
impl<'a> Emitter<'a> {
    fn new(listing: &'a TacListing) -> Self {
        let mut labels = HashMap::new();
        for instr in listing.iter() {
            if let TacInstr::Label(label) = instr {
                let next = format!("L{}", labels.len());
                labels.entry(*label).or_insert(next);
            }
        }

        Self {
            listing,
            labels,
            allocator: RegisterAllocator::new(),
            program: Program::new(),
        }
    }

    /// Compile a three-address code listing.
    fn compile(mut self) -> Result<Program> {
        let listing = self.listing;
        for (position, instr) in listing.iter_lines() {
            self.compile_instr(instr)
                .with_context(|| format!("Failed to emit '{}' at line {}", instr, position))?;
            self.allocator.release_all();
        }
        Ok(self.program)
    }

    /// Compile a single TAC instruction.
    fn compile_instr(&mut self, instr: &TacInstr) -> Result<()> {
        let comment = instr.to_string();
        match instr {
            TacInstr::Assign(target, value) => {
                let reg = self.load(value, Some(comment))?;
                self.store(reg, target);
            }
            TacInstr::Bin(target, op, lhs, rhs) => {
                let lhs = self.load(lhs, Some(comment))?;
                let rhs = self.load(rhs, None)?;
                let dst = self.allocator.allocate()?;
                self.compile_bin(*op, dst, lhs, rhs);
                self.store(dst, target);
            }
            TacInstr::Unary(target, op, value) => {
                let src = self.load(value, Some(comment))?;
                let dst = self.allocator.allocate()?;
                let op = match op {
                    UnOp::Negate => Op::Neg,
                    UnOp::Plus => Op::Mov,
                };
                self.program.push(op, vec![Reg(dst), Reg(src)]);
                self.store(dst, target);
            }
            TacInstr::Print(value) => {
                let reg = self.load(value, Some(comment))?;
                self.program.push(Op::Print, vec![Reg(reg)]);
            }
            TacInstr::Label(label) => {
                let name = self.resolve(*label)?;
                self.program.label(name);
            }
            TacInstr::Goto(label) => {
                let name = self.resolve(*label)?;
                self.program.push_cmt(Op::Jmp, vec![Lbl(name)], comment);
            }
            TacInstr::CondJump {
                condition,
                negated,
                target,
            } => {
                let name = self.resolve(*target)?;
                let reg = self.load(condition, Some(comment))?;
                let op = if *negated { Op::Jz } else { Op::Jnz };
                self.program.push(op, vec![Reg(reg), Lbl(name)]);
            }
        }
        Ok(())
    }

    fn compile_bin(&mut self, op: BinOp, dst: Register, lhs: Register, rhs: Register) {
        if op.is_comparison() {
            // Comparisons set the flags, then materialise the result as 0 or 1.
            self.program.push(Op::Cmp, vec![Reg(lhs), Reg(rhs)]);
            self.program.push(select_op(op), vec![Reg(dst)]);
        } else {
            self.program
                .push(select_op(op), vec![Reg(dst), Reg(lhs), Reg(rhs)]);
        }
    }

    /// Load a value into a fresh register. The first line emitted for a TAC
    /// instruction carries that instruction as a comment.
    fn load(&mut self, value: &Value, comment: Option<String>) -> Result<Register> {
        let reg = self.allocator.allocate()?;
        let source = match value {
            Value::Const(number) => Imm(*number),
            Value::Name(name) => Mem(memory_name(name)),
        };
        match comment {
            Some(comment) => self.program.push_cmt(Op::Load, vec![Reg(reg), source], comment),
            None => self.program.push(Op::Load, vec![Reg(reg), source]),
        };
        Ok(reg)
    }

    fn store(&mut self, reg: Register, target: &Name) {
        self.program
            .push(Op::Store, vec![Reg(reg), Mem(memory_name(target))]);
    }

    fn resolve(&self, label: Label) -> Result<String> {
        match self.labels.get(&label) {
            Some(name) => Ok(name.clone()),
            None => bail!("jump to undefined label {}", label),
        }
    }
}

fn select_op(op: BinOp) -> Op {
    match op {
        BinOp::Add => Op::Add,
        BinOp::Subtract => Op::Sub,
        BinOp::Multiply => Op::Mul,
        BinOp::Divide => Op::Div,
        BinOp::Equal => Op::SetEq,
        BinOp::NotEqual => Op::SetNe,
        BinOp::LessThan => Op::SetLt,
        BinOp::GreaterThan => Op::SetGt,
    }
}

/// The memory location backing a name. Temporaries use a prefix that is not a
/// valid identifier, so they never share storage with a variable.
fn memory_name(name: &Name) -> String {
    match name {
        Name::Var(var) => var.clone(),
        Name::Temp(temp) => format!("%t{}", temp),
    }
}
