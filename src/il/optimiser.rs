use std::collections::HashSet;

use crate::{ast::BinOp, prelude::*};

use super::{Name, Number, TacInstr, TacListing, Value};

/// Runs constant folding followed by dead-code elimination, each as a single pass.
pub fn optimise(listing: TacListing) -> TacListing {
    let mut optimiser = Optimiser::new(listing);
    optimiser.optimise();
    optimiser.listing
}

struct Optimiser {
    listing: TacListing,
}
impl Optimiser {
    pub fn new(listing: TacListing) -> Self {
        Self { listing }
    }

    pub fn optimise(&mut self) {
        let before = self.listing.len();
        let folded = self.fold_constants();
        let removed = self.eliminate_dead_code();
        debug!(
            "Optimised {} instructions: folded {}, removed {}",
            before, folded, removed
        );
    }

    /// Replace arithmetic on two constants with an assignment of its result.
    /// Optimises:
    /// ```text
    /// t0 = 2 + 3
    /// ```
    /// To:
    /// ```text
    /// t0 = 5
    /// ```
    /// Comparisons are left alone, as is division by zero. Returns the number of
    /// folded instructions.
    fn fold_constants(&mut self) -> usize {
        let mut folded = 0;
        for instr in self.listing.iter_mut() {
            let replacement = match instr {
                TacInstr::Bin(target, op, Value::Const(lhs), Value::Const(rhs)) => {
                    fold(*op, *lhs, *rhs).map(|n| TacInstr::Assign(target.clone(), Value::Const(n)))
                }
                _ => None,
            };
            if let Some(replacement) = replacement {
                trace!("Folding '{}' into '{}'", instr, replacement);
                *instr = replacement;
                folded += 1;
            }
        }
        folded
    }

    /// Remove writes to temporaries that are never read anywhere in the listing.
    /// Optimises:
    /// ```text
    /// t0 = 5
    /// t1 = x + 1
    /// x = t1
    /// ```
    /// To:
    /// ```text
    /// t1 = x + 1
    /// x = t1
    /// ```
    /// Writes to variables are always kept. Returns the number of removed instructions.
    fn eliminate_dead_code(&mut self) -> usize {
        let used: HashSet<Name> = self
            .listing
            .iter()
            .flat_map(|instr| instr.reads())
            .cloned()
            .collect();

        let before = self.listing.len();
        self.listing.retain(|instr| match instr.write() {
            Some(target) if target.is_temp() => used.contains(target),
            _ => true,
        });
        before - self.listing.len()
    }
}

/// Evaluate an arithmetic operation on two constants. Returns [`None`] if the
/// operation should not be folded.
fn fold(op: BinOp, lhs: Number, rhs: Number) -> Option<Number> {
    use Number::*;
    match (op, lhs, rhs) {
        (BinOp::Divide, _, rhs) if rhs.is_zero() => None,
        // Division always produces a float, even for two integers.
        (BinOp::Divide, lhs, rhs) => Some(Float(lhs.as_f64() / rhs.as_f64())),
        (BinOp::Add, Integer(a), Integer(b)) => a.checked_add(b).map(Integer),
        (BinOp::Subtract, Integer(a), Integer(b)) => a.checked_sub(b).map(Integer),
        (BinOp::Multiply, Integer(a), Integer(b)) => a.checked_mul(b).map(Integer),
        (BinOp::Add, a, b) => Some(Float(a.as_f64() + b.as_f64())),
        (BinOp::Subtract, a, b) => Some(Float(a.as_f64() - b.as_f64())),
        (BinOp::Multiply, a, b) => Some(Float(a.as_f64() * b.as_f64())),
        (BinOp::Equal | BinOp::NotEqual | BinOp::LessThan | BinOp::GreaterThan, _, _) => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::{ast::UnOp, il::generate, lexer::lex, parser::parse};

    use super::*;

    macro_rules! assert_optimises {
        ($source:expr, $expected:expr) => {{
            let tokens = lex($source).unwrap();
            let ast = parse(&tokens).unwrap();
            let tac = generate(ast);
            let tac = optimise(tac)
                .into_vec()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();

            assert_eq!($expected, tac)
        }};
    }

    fn int(i: i64) -> Value {
        Value::Const(Number::Integer(i))
    }

    fn float(x: f64) -> Value {
        Value::Const(Number::Float(x))
    }

    fn var(name: &str) -> Name {
        Name::Var(name.to_string())
    }

    fn folded(instrs: Vec<TacInstr>) -> Vec<TacInstr> {
        let mut optimiser = Optimiser::new(instrs.into_iter().collect());
        optimiser.fold_constants();
        optimiser.listing.into_vec()
    }

    #[test]
    fn sum_of_constants_is_folded() {
        assert_optimises!(
            "tongtongsahur x = bombardino; x = 2 + 3; drip(x);",
            vec!["t0 = 5", "x = t0", "print x"]
        );
    }

    #[test]
    fn division_by_zero_is_not_folded() {
        assert_optimises!(
            "tongtongsahur x = bombardino; x = 5 / 0;",
            vec!["t0 = 5 / 0", "x = t0"]
        );
        assert_eq!(
            vec![TacInstr::Bin(Name::Temp(0), BinOp::Divide, float(1.5), float(0.0))],
            folded(vec![TacInstr::Bin(Name::Temp(0), BinOp::Divide, float(1.5), float(0.0))])
        );
    }

    #[test]
    fn division_folds_to_float() {
        assert_eq!(
            vec![TacInstr::Assign(Name::Temp(0), float(3.5))],
            folded(vec![TacInstr::Bin(Name::Temp(0), BinOp::Divide, int(7), int(2))])
        );
        assert_eq!(
            vec![TacInstr::Assign(Name::Temp(0), float(2.0))],
            folded(vec![TacInstr::Bin(Name::Temp(0), BinOp::Divide, int(4), int(2))])
        );
    }

    #[test]
    fn comparisons_are_not_folded() {
        assert_optimises!(
            "chimpanzini (1 < 2) { drip(1); }",
            vec!["t0 = 1 < 2", "if_false t0 goto L0", "print 1", "goto L1", "L0:", "L1:"]
        );
    }

    #[test]
    fn mixed_operands_fold_as_float() {
        assert_eq!(
            vec![TacInstr::Assign(Name::Temp(0), float(3.5))],
            folded(vec![TacInstr::Bin(Name::Temp(0), BinOp::Add, int(1), float(2.5))])
        );
    }

    #[test]
    fn integer_overflow_is_not_folded() {
        let instr = TacInstr::Bin(Name::Temp(0), BinOp::Multiply, int(i64::MAX), int(2));
        assert_eq!(vec![instr.clone()], folded(vec![instr]));
    }

    #[test]
    fn folding_is_idempotent() {
        let instrs = vec![
            TacInstr::Bin(Name::Temp(0), BinOp::Add, int(2), int(3)),
            TacInstr::Bin(Name::Temp(1), BinOp::Divide, int(1), int(0)),
            TacInstr::Bin(Name::Temp(2), BinOp::GreaterThan, int(1), int(0)),
            TacInstr::Bin(Name::Temp(3), BinOp::Subtract, Value::Name(var("x")), int(1)),
            TacInstr::Unary(Name::Temp(4), UnOp::Negate, int(3)),
            TacInstr::Print(Value::Name(Name::Temp(0))),
        ];
        let once = folded(instrs);
        let twice = folded(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn only_folds_in_a_single_pass() {
        // t1 only becomes foldable once t0 has been propagated, which this pass does not do.
        let instrs = vec![
            TacInstr::Bin(Name::Temp(0), BinOp::Add, int(1), int(2)),
            TacInstr::Bin(Name::Temp(1), BinOp::Add, Value::Name(Name::Temp(0)), int(3)),
        ];
        assert_eq!(
            vec![
                TacInstr::Assign(Name::Temp(0), int(3)),
                TacInstr::Bin(Name::Temp(1), BinOp::Add, Value::Name(Name::Temp(0)), int(3)),
            ],
            folded(instrs)
        );
    }

    #[test]
    fn unread_temporaries_are_removed() {
        let mut optimiser = Optimiser::new(
            vec![
                TacInstr::Assign(Name::Temp(0), int(5)),
                TacInstr::Unary(Name::Temp(1), UnOp::Negate, Value::Name(var("x"))),
                TacInstr::Bin(Name::Temp(2), BinOp::Add, Value::Name(var("x")), int(1)),
                TacInstr::Assign(var("x"), Value::Name(Name::Temp(2))),
            ]
            .into_iter()
            .collect(),
        );

        assert_eq!(2, optimiser.eliminate_dead_code());
        assert_eq!(
            vec![
                TacInstr::Bin(Name::Temp(2), BinOp::Add, Value::Name(var("x")), int(1)),
                TacInstr::Assign(var("x"), Value::Name(Name::Temp(2))),
            ],
            optimiser.listing.into_vec()
        );
    }

    #[test]
    fn variable_writes_are_never_removed() {
        let instrs: Vec<_> = vec![
            TacInstr::Assign(var("x"), int(1)),
            TacInstr::Assign(var("x"), int(2)),
            TacInstr::Unary(var("t0"), UnOp::Plus, int(3)),
        ];
        let mut optimiser = Optimiser::new(instrs.clone().into_iter().collect());

        assert_eq!(0, optimiser.eliminate_dead_code());
        assert_eq!(instrs, optimiser.listing.into_vec());
    }

    #[test]
    fn temporaries_read_by_jumps_are_kept() {
        assert_optimises!(
            "tongtongsahur i = bombardino; patapim (i < 3) { i = i + 1; }",
            vec![
                "L0:",
                "t0 = i < 3",
                "if_false t0 goto L1",
                "t1 = i + 1",
                "i = t1",
                "goto L0",
                "L1:",
            ]
        );
    }
}
