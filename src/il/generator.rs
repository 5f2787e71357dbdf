use crate::{ast::*, prelude::*};

use super::{label_generator::*, name_generator::*, tac::*};

/// Lowers a program to a three-address code listing.
///
/// The program must have passed semantic analysis. Declarations carry no
/// runtime behaviour, so only statements produce instructions.
pub fn generate(program: Program) -> TacListing {
    let listing = TacGenerator::generate(program);
    debug!("Generated {} TAC instructions", listing.len());
    listing
}

struct TacGenerator {
    listing: TacListing,
    name_generator: NameGenerator,
    label_generator: LabelGenerator,
}
impl TacGenerator {
    /// Generate a three-address code listing for a program.
    fn generate(program: Program) -> TacListing {
        let mut tac = Self {
            listing: TacListing::new(),
            name_generator: NameGenerator::new(),
            label_generator: LabelGenerator::new(),
        };

        for stmt in program.statements {
            tac.lower_stmt(stmt);
        }

        tac.listing
    }

    fn lower_stmt(&mut self, stmt: Statement) {
        match stmt.stmt_kind {
            StmtKind::Assign(assign) => self.lower_assign(assign),
            StmtKind::If(if_stmt) => self.lower_if(if_stmt),
            StmtKind::While(while_stmt) => self.lower_while(while_stmt),
            StmtKind::Print(expr) => {
                let value = self.lower_expr(expr);
                self.emit(TacInstr::Print(value));
            }
        }
    }

    fn lower_block(&mut self, block: Block) {
        for stmt in block.statements {
            self.lower_stmt(stmt);
        }
    }

    /// Lower a variable assignment by evaluating an expression and assigning its result to a
    /// variable.
    fn lower_assign(&mut self, assign: Assign) {
        let result = self.lower_expr(assign.value);
        self.emit(TacInstr::Assign(Name::Var(assign.target), result));
    }

    /// Lower an if-statement. Each branch is guarded by a negated conditional jump to the next
    /// branch, and ends with a jump to the end of the statement:
    /// ```text
    /// if_false c0 goto L0
    /// <block 0>
    /// goto L1
    /// L0:
    /// if_false c1 goto L2
    /// <block 1>
    /// goto L1
    /// L2:
    /// <else block>
    /// L1:
    /// ```
    fn lower_if(&mut self, if_stmt: If) {
        let cond = self.lower_expr(if_stmt.condition);
        let mut else_lbl = self.label_generator.next_label();
        let end_lbl = self.label_generator.next_label();

        self.emit_branch(cond, if_stmt.block, else_lbl, end_lbl);

        for elif in if_stmt.elifs {
            let cond = self.lower_expr(elif.condition);
            else_lbl = self.label_generator.next_label();
            self.emit_branch(cond, elif.block, else_lbl, end_lbl);
        }

        if let Some(else_block) = if_stmt.else_block {
            self.lower_block(else_block);
        }
        self.emit(TacInstr::Label(end_lbl));
    }

    /// Emit a single branch of an if-statement, followed by the label of the next branch.
    fn emit_branch(&mut self, cond: Value, block: Block, else_lbl: Label, end_lbl: Label) {
        self.emit(TacInstr::CondJump {
            condition: cond,
            negated: true,
            target: else_lbl,
        });
        self.lower_block(block);
        self.emit(TacInstr::Goto(end_lbl));
        self.emit(TacInstr::Label(else_lbl));
    }

    /// Lower a while-loop. The condition is re-evaluated at the start of every iteration.
    fn lower_while(&mut self, while_stmt: While) {
        let start_lbl = self.label_generator.next_label();
        let end_lbl = self.label_generator.next_label();

        self.emit(TacInstr::Label(start_lbl));
        let cond = self.lower_expr(while_stmt.condition);
        self.emit(TacInstr::CondJump {
            condition: cond,
            negated: true,
            target: end_lbl,
        });
        self.lower_block(while_stmt.body);
        self.emit(TacInstr::Goto(start_lbl));
        self.emit(TacInstr::Label(end_lbl));
    }

    /// Lower an expression. Literals and identifiers are converted to values directly,
    /// without emitting any instructions.
    fn lower_expr(&mut self, expr: Expr) -> Value {
        match expr.expr_kind {
            ExprKind::Literal(lit) => Value::from(lit),
            ExprKind::Identifier(id) => Value::Name(Name::Var(id)),
            ExprKind::Unary(un) => self.lower_unexpr(*un),
            ExprKind::Binary(bin) => self.lower_binexpr(*bin),
        }
    }

    fn lower_unexpr(&mut self, expr: UnExpr) -> Value {
        let operand = self.lower_expr(expr.rhs);

        let res_name = self.name_generator.next_temp();
        self.emit(TacInstr::Unary(res_name.clone(), expr.op, operand));

        Value::Name(res_name)
    }

    fn lower_binexpr(&mut self, expr: BinExpr) -> Value {
        let lhs = self.lower_expr(expr.lhs);
        let rhs = self.lower_expr(expr.rhs);

        let res_name = self.name_generator.next_temp();
        self.emit(TacInstr::Bin(res_name.clone(), expr.op, lhs, rhs));

        Value::Name(res_name)
    }

    /// Emit an instruction, adding it to the listing.
    fn emit(&mut self, instr: TacInstr) {
        trace!("Emitting {}", instr);
        self.listing.push(instr);
    }
}
