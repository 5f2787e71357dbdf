use crate::{ast::*, location::Location, prelude::*};

use super::{bin_op_checker::BinOpChecker, error::*, symbol_table::*};

/// Verifies that a program is well-formed: every variable is declared exactly once,
/// every referenced variable is declared, and every statement is well-typed.
///
/// Analysis stops at the first error.
pub fn analyze(program: &Program) -> Result<(), SemanticError> {
    let mut analyzer = SemanticAnalyzer::new(program);
    analyzer.run()?;
    debug!(
        "Semantic analysis passed with {} declared variables",
        analyzer.symbols.len()
    );
    Ok(())
}

struct SemanticAnalyzer<'a> {
    symbols: SymbolTable,
    program: &'a Program,
}

impl<'a> SemanticAnalyzer<'a> {
    fn new(program: &'a Program) -> Self {
        Self {
            symbols: SymbolTable::new(),
            program,
        }
    }

    fn run(&mut self) -> Result<(), SemanticError> {
        self.declare_variables()?;
        self.check_statements(&self.program.statements)
    }

    /// Write all variable declarations to the symbol table. This happens before
    /// any statement is examined.
    fn declare_variables(&mut self) -> Result<(), SemanticError> {
        for var_decl in &self.program.var_decls {
            trace!("Declaring {} at {}", var_decl, var_decl.location);
            self.symbols
                .declare(Symbol {
                    name: var_decl.name.clone(),
                    type_spec: var_decl.type_spec,
                    location: var_decl.location,
                })
                .add_location(var_decl.location)?;
        }
        Ok(())
    }

    fn check_statements(&self, statements: &[Statement]) -> Result<(), SemanticError> {
        statements.iter().try_for_each(|s| self.check_statement(s))
    }

    /// Verify that a statement is well-typed.
    fn check_statement(&self, statement: &Statement) -> Result<(), SemanticError> {
        let location = statement.location;
        match &statement.stmt_kind {
            StmtKind::Assign(assign) => self.check_assign_stmt(assign, location),
            StmtKind::If(if_stmt) => {
                self.check_condition(&if_stmt.condition, location)?;
                self.check_statements(&if_stmt.block.statements)?;
                for elif in &if_stmt.elifs {
                    self.check_condition(&elif.condition, elif.condition.location)?;
                    self.check_statements(&elif.block.statements)?;
                }
                if let Some(else_block) = &if_stmt.else_block {
                    self.check_statements(&else_block.statements)?;
                }
                Ok(())
            }
            StmtKind::While(while_stmt) => {
                self.check_condition(&while_stmt.condition, location)?;
                self.check_statements(&while_stmt.body.statements)
            }
            StmtKind::Print(expr) => self.check_expression(expr).map(|_| ()),
        }
    }

    /// Verify that assignment to a variable is well-typed. Integers and floats
    /// do not convert into each other.
    fn check_assign_stmt(&self, assign: &Assign, location: Location) -> Result<(), SemanticError> {
        let target = self.symbols.lookup(&assign.target).add_location(location)?;
        let expr_type = self.check_expression(&assign.value)?;

        if target.type_spec != expr_type {
            return error(
                SemanticErrorKind::AssignMismatch {
                    name: assign.target.clone(),
                    expected: target.type_spec,
                    actual: expr_type,
                },
                location,
            );
        }
        Ok(())
    }

    /// Conditions must be comparisons; numbers are not implicitly truthy.
    fn check_condition(&self, condition: &Expr, location: Location) -> Result<(), SemanticError> {
        match self.check_expression(condition)? {
            TypeSpec::Boolean => Ok(()),
            other => error(SemanticErrorKind::NonBooleanCondition(other), location),
        }
    }

    /// Verify that an expression is well-typed, returning its type.
    fn check_expression(&self, expression: &Expr) -> Result<TypeSpec, SemanticError> {
        let location = expression.location;
        match &expression.expr_kind {
            ExprKind::Literal(lit) => Ok(lit.type_spec()),
            ExprKind::Identifier(id) => Ok(self.symbols.lookup(id).add_location(location)?.type_spec),
            ExprKind::Unary(un) => self.check_unary(un, location),
            ExprKind::Binary(bin) => self.check_binary(bin, location),
        }
    }

    /// Verify that a unary expression is well-typed.
    fn check_unary(&self, un: &UnExpr, location: Location) -> Result<TypeSpec, SemanticError> {
        let expr_type = self.check_expression(&un.rhs)?;

        if expr_type.is_numeric() {
            Ok(expr_type)
        } else {
            error(SemanticErrorKind::UnaryOperand(un.op, expr_type), location)
        }
    }

    /// Verify that a binary expression is well-typed. Operand mismatches are
    /// reported at the operator.
    fn check_binary(&self, bin: &BinExpr, location: Location) -> Result<TypeSpec, SemanticError> {
        let lhs = self.check_expression(&bin.lhs)?;
        let rhs = self.check_expression(&bin.rhs)?;

        BinOpChecker::check(bin, lhs, rhs).add_location(location)
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::PositionalError, lexer::lex, parser::parse};

    use super::*;

    macro_rules! make_program {
        ($source:expr) => {{
            let tokens = lex($source).unwrap();
            parse(&tokens).unwrap()
        }};
    }

    macro_rules! assert_analyzes {
        ($source:expr) => {{
            let prg = make_program!($source);
            if let Err(err) = analyze(&prg) {
                panic!(
                    "\n\nExpected analysis to succeed, but found the following error:\n\t{}\nat {}\n\n",
                    err,
                    err.location()
                );
            }
        }};
    }

    macro_rules! assert_type_error {
        ($source:expr, $expected_err:expr, $line:expr, $column:expr) => {{
            let prg = make_program!($source);
            let err = match analyze(&prg) {
                Ok(()) => panic!("\n\nExpected to find a semantic error, but found none.\n\n"),
                Err(err) => err,
            };
            assert_eq!(
                &$expected_err,
                err.kind(),
                "\n\nExpected to find this error:\n\t{}\n\nbut found:\n\t{}\n\n",
                &$expected_err,
                err.kind(),
            );
            assert_eq!(Location::new($line, $column), err.location());
        }};
    }

    #[test]
    fn empty_program_analyzes() {
        assert_analyzes!("");
    }

    #[test]
    fn valid_program_analyzes() {
        assert_analyzes!(
            r#"
tongtongsahur a = bombardino;
tongtongsahur b = bombardino;
tongtongsahur f = crocodilo;
a = 10;
b = (a + a) * 9 - -a;
f = 2.5 / 0.5;
patapim (a > 0) {
    a = a - 1;
    chimpanzini (f == 5.0) { drip(f); } chimpanzini (b != a) { drip(b); } bananini { drip(a); }
}
drip(a < b);
"#
        );
    }

    #[test]
    fn integer_assignment_passes() {
        assert_analyzes!("tongtongsahur x = bombardino; x = 2 + 3; drip(x);");
    }

    #[test]
    fn duplicate_declaration_names_original() {
        assert_type_error!(
            "tongtongsahur x = bombardino;\ntongtongsahur x = crocodilo;",
            SemanticErrorKind::DuplicateDeclaration {
                name: "x".to_string(),
                original: Location::new(1, 15),
            },
            2,
            15
        );
    }

    #[test]
    fn duplicate_message_mentions_original_location() {
        let prg = make_program!("tongtongsahur x = bombardino; tongtongsahur x = crocodilo;");
        let err = analyze(&prg).unwrap_err();
        assert_eq!(
            "variable 'x' is already declared at line 1, column 15",
            err.to_string()
        );
    }

    #[test]
    fn float_to_integer_assignment_is_mismatch() {
        assert_type_error!(
            "tongtongsahur x = bombardino;\nx = 1.5;",
            SemanticErrorKind::AssignMismatch {
                name: "x".to_string(),
                expected: TypeSpec::Integer,
                actual: TypeSpec::Float,
            },
            2,
            1
        );
    }

    #[test]
    fn integer_to_float_assignment_is_mismatch() {
        let prg = make_program!("tongtongsahur f = crocodilo; f = 1;");
        let err = analyze(&prg).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'bombardino'"), "{}", message);
        assert!(message.contains("'crocodilo'"), "{}", message);
    }

    #[test]
    fn undeclared_assignment_target() {
        assert_type_error!(
            "y = 1;",
            SemanticErrorKind::UndeclaredVariable("y".to_string()),
            1,
            1
        );
    }

    #[test]
    fn undeclared_reference_is_located_at_identifier() {
        assert_type_error!(
            "tongtongsahur x = bombardino; x = 1 + y;",
            SemanticErrorKind::UndeclaredVariable("y".to_string()),
            1,
            39
        );
    }

    #[test]
    fn mixed_operands_are_rejected_at_operator() {
        assert_type_error!(
            "tongtongsahur x = crocodilo; x = 1.0 * 2;",
            SemanticErrorKind::OperandMismatch(BinOp::Multiply, TypeSpec::Float, TypeSpec::Integer),
            1,
            38
        );
        assert_type_error!(
            "drip(1 < 2.0);",
            SemanticErrorKind::OperandMismatch(BinOp::LessThan, TypeSpec::Integer, TypeSpec::Float),
            1,
            8
        );
    }

    #[test]
    fn numeric_condition_is_rejected() {
        assert_type_error!(
            "tongtongsahur x = bombardino;\npatapim (x) { }",
            SemanticErrorKind::NonBooleanCondition(TypeSpec::Integer),
            2,
            1
        );
    }

    #[test]
    fn elif_conditions_are_checked() {
        assert_type_error!(
            "chimpanzini (1 > 0) { } chimpanzini (2.0) { }",
            SemanticErrorKind::NonBooleanCondition(TypeSpec::Float),
            1,
            38
        );
    }

    #[test]
    fn nested_blocks_are_checked() {
        assert_type_error!(
            "chimpanzini (1 > 0) { } bananini { patapim (1 == 1) { z = 1; } }",
            SemanticErrorKind::UndeclaredVariable("z".to_string()),
            1,
            55
        );
    }

    #[test]
    fn negating_a_comparison_is_rejected() {
        assert_type_error!(
            "drip(-(1 < 2));",
            SemanticErrorKind::UnaryOperand(UnOp::Negate, TypeSpec::Boolean),
            1,
            6
        );
    }

    #[test]
    fn comparison_cannot_be_assigned() {
        assert_type_error!(
            "tongtongsahur x = bombardino; x = 1 < 2;",
            SemanticErrorKind::AssignMismatch {
                name: "x".to_string(),
                expected: TypeSpec::Integer,
                actual: TypeSpec::Boolean,
            },
            1,
            31
        );
    }
}
