use crate::ast::{BinExpr, BinOp, TypeSpec};

use super::error::*;

/// Describes how the domain (input) types of an operation relate to its codomain (output) type.
enum Operation {
    /// An associative operation; `a -> a -> a`, for any type `a`.
    /// Its input types are the same as the output type.
    Semigroup,
    /// A binary function; `a -> a -> r`, for any type `a`.
    /// Both operands must be of the same type, but the output type is fixed.
    BinFunc(TypeSpec),
}

/// Checks whether an operation can be applied to its operands.
pub struct BinOpChecker<'a> {
    expr: &'a BinExpr,
    lhs_type: TypeSpec,
    rhs_type: TypeSpec,
}

impl<'a> BinOpChecker<'a> {
    /// Given an operation and two well-typed operands, checks whether the operation can be applied
    /// to its operands, and returns the resulting type if it can.
    pub fn check(
        expr: &'a BinExpr,
        lhs_type: TypeSpec,
        rhs_type: TypeSpec,
    ) -> Result<TypeSpec, SemanticErrorKind> {
        Self {
            expr,
            lhs_type,
            rhs_type,
        }
        .check_internal()
    }

    fn check_internal(self) -> Result<TypeSpec, SemanticErrorKind> {
        // There is no implicit conversion between integers and floats.
        if self.lhs_type != self.rhs_type {
            return Err(SemanticErrorKind::OperandMismatch(
                self.expr.op,
                self.lhs_type,
                self.rhs_type,
            ));
        }

        Ok(match self.get_op() {
            Operation::Semigroup => self.lhs_type,
            Operation::BinFunc(ret) => ret,
        })
    }

    /// Determines the operation type for the operator we've received.
    fn get_op(&self) -> Operation {
        use BinOp::*;
        match self.expr.op {
            // int + int -> int
            // float + float -> float
            Add | Subtract | Multiply | Divide => Operation::Semigroup,
            // int < int -> boolean
            // float < float -> boolean
            Equal | NotEqual | LessThan | GreaterThan => Operation::BinFunc(TypeSpec::Boolean),
        }
    }
}
