//! Three-Address Code

use std::fmt::{self, Display, Formatter};

use crate::{
    ast::{BinOp, Literal, UnOp},
    listing::Listing,
};

pub type TacListing = Listing<TacInstr>;

/// A label which can be jumped to. Labels are unique within a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(pub usize);
impl Display for Label {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// A single TAC instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum TacInstr {
    /// Assign a value to a name.
    Assign(Name, Value),
    /// Perform a binary operation.
    Bin(Name, BinOp, Value, Value),
    /// Perform a unary operation.
    Unary(Name, UnOp, Value),
    /// Print a value.
    Print(Value),
    /// A label which can be jumped to.
    Label(Label),
    /// Jump to a label.
    Goto(Label),
    /// Jump to a label if a value is false (`negated`) or true.
    CondJump {
        condition: Value,
        negated: bool,
        target: Label,
    },
}
impl TacInstr {
    /// The names this instruction reads from.
    pub fn reads(&self) -> Vec<&Name> {
        let values: Vec<&Value> = match self {
            Self::Assign(_, value) => vec![value],
            Self::Bin(_, _, lhs, rhs) => vec![lhs, rhs],
            Self::Unary(_, _, value) => vec![value],
            Self::Print(value) => vec![value],
            Self::Label(_) | Self::Goto(_) => vec![],
            Self::CondJump { condition, .. } => vec![condition],
        };
        values.into_iter().filter_map(Value::as_name).collect()
    }

    /// The name this instruction writes to, if any.
    pub fn write(&self) -> Option<&Name> {
        match self {
            Self::Assign(target, _) => Some(target),
            Self::Bin(target, _, _, _) => Some(target),
            Self::Unary(target, _, _) => Some(target),
            Self::Print(_) | Self::Label(_) | Self::Goto(_) | Self::CondJump { .. } => None,
        }
    }

    /// The label this instruction may jump to, if any.
    pub fn jump_target(&self) -> Option<Label> {
        match self {
            Self::Goto(target) => Some(*target),
            Self::CondJump { target, .. } => Some(*target),
            _ => None,
        }
    }
}
impl Display for TacInstr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Assign(target, value) => write!(f, "{} = {}", target, value),
            Self::Bin(target, op, lhs, rhs) => {
                write!(f, "{} = {} {} {}", target, lhs, op, rhs)
            }
            Self::Unary(target, op, value) => write!(f, "{} = {}{}", target, op, value),
            Self::Print(value) => write!(f, "print {}", value),
            Self::Label(lbl) => write!(f, "{}:", lbl),
            Self::Goto(lbl) => write!(f, "goto {}", lbl),
            Self::CondJump {
                condition,
                negated: true,
                target,
            } => write!(f, "if_false {} goto {}", condition, target),
            Self::CondJump {
                condition,
                negated: false,
                target,
            } => write!(f, "if_true {} goto {}", condition, target),
        }
    }
}

/// A TAC name. Names are symbolic addresses and may represent variables in the original source
/// code, or intermediate values of complex computations that have been broken down.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum Name {
    /// A variable declared in the source program.
    Var(String),
    /// A generated, temporary name.
    Temp(usize),
}
impl Name {
    pub fn is_temp(&self) -> bool {
        matches!(self, Name::Temp(_))
    }
}
impl Display for Name {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Name::Var(var) => f.write_str(var),
            Name::Temp(temp) => write!(f, "t{}", temp),
        }
    }
}

/// A numeric constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}
impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => i as f64,
            Number::Float(x) => x,
        }
    }

    pub fn is_zero(self) -> bool {
        self.as_f64() == 0.0
    }
}
impl Display for Number {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            // Keep floats recognisable as floats.
            Number::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}
impl From<Literal> for Number {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Integer(i) => Number::Integer(i),
            Literal::Float(x) => Number::Float(x),
        }
    }
}

/// A TAC value. Values can be constants, or references to names that were
/// defined earlier.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An immediate numeric constant.
    Const(Number),
    /// A name, representing either a temporary name or a variable in the source program.
    Name(Name),
}
impl Value {
    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Value::Const(_) => None,
            Value::Name(n) => Some(n),
        }
    }
}
impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::Const(lit) => write!(f, "{}", lit),
            Value::Name(name) => write!(f, "{}", name),
        }
    }
}
impl From<Literal> for Value {
    fn from(value: Literal) -> Self {
        Value::Const(value.into())
    }
}
