//! Direct execution of three-address code.
use std::collections::HashMap;

use crate::{
    ast::{BinOp, UnOp},
    il::{Label, Name, TacInstr, TacListing, Value},
    listing::Position,
    prelude::*,
};

/// The observable result of running a listing.
#[derive(Debug, Default)]
pub struct Execution {
    output: Vec<f64>,
    store: HashMap<Name, f64>,
}
impl Execution {
    /// Every value printed, in order.
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// The final value of a source variable, if it was ever assigned.
    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.store.get(&Name::Var(name.to_string())).copied()
    }
}

/// Executes a TAC listing against a flat store of numeric values.
///
/// The runtime is permissive: unknown names read as `0.0` and division by zero
/// yields `0.0`. Comparisons produce `1.0` or `0.0`.
pub struct Interpreter<'a> {
    listing: &'a TacListing,
    labels: HashMap<Label, Position>,
    execution: Execution,
}
impl<'a> Interpreter<'a> {
    pub fn run(listing: &'a TacListing) -> Execution {
        let mut interpreter = Self::new(listing);
        interpreter.execute();
        interpreter.execution
    }

    fn new(listing: &'a TacListing) -> Self {
        let labels = listing
            .iter_lines()
            .filter_map(|(position, instr)| match instr {
                TacInstr::Label(label) => Some((*label, position)),
                _ => None,
            })
            .collect();

        Self {
            listing,
            labels,
            execution: Execution::default(),
        }
    }

    fn execute(&mut self) {
        let listing = self.listing;
        let mut pc = Position(0);
        while let Some(instr) = listing.get(pc) {
            pc = match self.step(instr) {
                Some(target) => match self.labels.get(&target) {
                    Some(position) => *position,
                    None => {
                        warn!("Jump to undefined label {}, halting", target);
                        return;
                    }
                },
                None => pc + 1,
            };
        }
    }

    /// Execute a single instruction. Returns the label to jump to, if any.
    fn step(&mut self, instr: &TacInstr) -> Option<Label> {
        match instr {
            TacInstr::Assign(target, value) => {
                let value = self.value(value);
                self.store(target, value);
            }
            TacInstr::Bin(target, op, lhs, rhs) => {
                let value = binary(*op, self.value(lhs), self.value(rhs));
                self.store(target, value);
            }
            TacInstr::Unary(target, op, operand) => {
                let operand = self.value(operand);
                let value = match op {
                    UnOp::Plus => operand,
                    UnOp::Negate => -operand,
                };
                self.store(target, value);
            }
            TacInstr::Print(value) => {
                let value = self.value(value);
                info!("{}", value);
                self.execution.output.push(value);
            }
            TacInstr::Label(_) => (),
            TacInstr::Goto(target) => return Some(*target),
            TacInstr::CondJump {
                condition,
                negated,
                target,
            } => {
                let truthy = self.value(condition) != 0.0;
                if truthy != *negated {
                    return Some(*target);
                }
            }
        }
        None
    }

    fn value(&self, value: &Value) -> f64 {
        match value {
            Value::Const(number) => number.as_f64(),
            Value::Name(name) => self.execution.store.get(name).copied().unwrap_or(0.0),
        }
    }

    fn store(&mut self, target: &Name, value: f64) {
        trace!("{} <- {}", target, value);
        self.execution.store.insert(target.clone(), value);
    }
}

fn binary(op: BinOp, lhs: f64, rhs: f64) -> f64 {
    let truth = |b: bool| if b { 1.0 } else { 0.0 };
    match op {
        BinOp::Add => lhs + rhs,
        BinOp::Subtract => lhs - rhs,
        BinOp::Multiply => lhs * rhs,
        BinOp::Divide if rhs == 0.0 => 0.0,
        BinOp::Divide => lhs / rhs,
        BinOp::Equal => truth(lhs == rhs),
        BinOp::NotEqual => truth(lhs != rhs),
        BinOp::LessThan => truth(lhs < rhs),
        BinOp::GreaterThan => truth(lhs > rhs),
    }
}

#[cfg(test)]
mod tests {
    use crate::il::Number;

    use super::*;

    fn var(name: &str) -> Name {
        Name::Var(name.to_string())
    }

    fn int(i: i64) -> Value {
        Value::Const(Number::Integer(i))
    }

    #[test]
    fn prints_assigned_values() {
        let listing: TacListing = vec![
            TacInstr::Bin(Name::Temp(0), BinOp::Add, int(2), int(3)),
            TacInstr::Assign(var("x"), Value::Name(Name::Temp(0))),
            TacInstr::Print(Value::Name(var("x"))),
        ]
        .into_iter()
        .collect();

        let execution = Interpreter::run(&listing);
        assert_eq!(&[5.0], execution.output());
        assert_eq!(Some(5.0), execution.value_of("x"));
        assert_eq!(None, execution.value_of("t0"));
    }

    #[test]
    fn division_by_zero_yields_zero() {
        let listing: TacListing = vec![
            TacInstr::Bin(Name::Temp(0), BinOp::Divide, int(5), int(0)),
            TacInstr::Assign(var("x"), Value::Name(Name::Temp(0))),
        ]
        .into_iter()
        .collect();

        assert_eq!(Some(0.0), Interpreter::run(&listing).value_of("x"));
    }

    #[test]
    fn unknown_names_read_as_zero() {
        let listing: TacListing = vec![TacInstr::Print(Value::Name(var("nowhere")))]
            .into_iter()
            .collect();

        assert_eq!(&[0.0], Interpreter::run(&listing).output());
    }

    #[test]
    fn negated_jump_is_taken_on_zero() {
        let listing: TacListing = vec![
            TacInstr::Bin(Name::Temp(0), BinOp::GreaterThan, int(0), int(1)),
            TacInstr::CondJump {
                condition: Value::Name(Name::Temp(0)),
                negated: true,
                target: Label(0),
            },
            TacInstr::Print(int(1)),
            TacInstr::Label(Label(0)),
            TacInstr::Print(int(2)),
        ]
        .into_iter()
        .collect();

        assert_eq!(&[2.0], Interpreter::run(&listing).output());
    }

    #[test]
    fn loops_until_condition_fails() {
        // i = 0; while (i < 3) { print i; i = i + 1; }
        let listing: TacListing = vec![
            TacInstr::Assign(var("i"), int(0)),
            TacInstr::Label(Label(0)),
            TacInstr::Bin(Name::Temp(0), BinOp::LessThan, Value::Name(var("i")), int(3)),
            TacInstr::CondJump {
                condition: Value::Name(Name::Temp(0)),
                negated: true,
                target: Label(1),
            },
            TacInstr::Print(Value::Name(var("i"))),
            TacInstr::Bin(Name::Temp(1), BinOp::Add, Value::Name(var("i")), int(1)),
            TacInstr::Assign(var("i"), Value::Name(Name::Temp(1))),
            TacInstr::Goto(Label(0)),
            TacInstr::Label(Label(1)),
        ]
        .into_iter()
        .collect();

        let execution = Interpreter::run(&listing);
        assert_eq!(&[0.0, 1.0, 2.0], execution.output());
        assert_eq!(Some(3.0), execution.value_of("i"));
    }

    #[test]
    fn jump_to_undefined_label_halts() {
        let listing: TacListing = vec![
            TacInstr::Print(int(1)),
            TacInstr::Goto(Label(7)),
            TacInstr::Print(int(2)),
        ]
        .into_iter()
        .collect();

        assert_eq!(&[1.0], Interpreter::run(&listing).output());
    }
}
