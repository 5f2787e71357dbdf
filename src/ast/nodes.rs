//! Abstract Syntax Tree nodes.
//!
//! Every node owns its children and carries the location it was parsed from.
use std::fmt::{self, Display};

use crate::{lexer::tokens::Keyword, location::Location};

use super::TypeSpec;

#[derive(Debug, Default)]
pub struct Program {
    pub var_decls: Vec<VarDecl>,
    pub statements: Vec<Statement>,
}
impl Program {
    pub fn new() -> Self {
        Self {
            var_decls: vec![],
            statements: vec![],
        }
    }

    pub fn add_var_decl(&mut self, var_decl: VarDecl) {
        self.var_decls.push(var_decl);
    }

    pub fn add_statement(&mut self, statement: Statement) {
        self.statements.push(statement);
    }
}
impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for var in &self.var_decls {
            writeln!(f, "{}", var)?;
        }
        for stmt in &self.statements {
            writeln!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct VarDecl {
    pub name: String,
    pub type_spec: TypeSpec,
    pub location: Location,
}
impl Display for VarDecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} = {};", Keyword::Var, self.name, self.type_spec)
    }
}

#[derive(Debug, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}
impl Block {
    pub fn new() -> Self {
        Self { statements: vec![] }
    }
}
impl Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("{")?;
        for stmt in &self.statements {
            write!(f, " {}", stmt)?;
        }
        f.write_str(" }")
    }
}

#[derive(Debug)]
pub struct Statement {
    pub location: Location,
    pub stmt_kind: StmtKind,
}
impl Statement {
    pub fn new(stmt_kind: StmtKind, location: Location) -> Self {
        Self {
            location,
            stmt_kind,
        }
    }
}
impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.stmt_kind)
    }
}

#[derive(Debug)]
pub enum StmtKind {
    Assign(Assign),
    If(If),
    While(While),
    Print(Expr),
}
impl Display for StmtKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use StmtKind::*;
        match self {
            Assign(assign) => write!(f, "{}", assign),
            If(if_stmt) => write!(f, "{}", if_stmt),
            While(while_stmt) => write!(f, "{}", while_stmt),
            Print(expr) => write!(f, "{}({});", Keyword::Print, expr),
        }
    }
}

#[derive(Debug)]
pub struct Assign {
    pub target: String,
    pub value: Expr,
}
impl Display for Assign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {};", self.target, self.value)
    }
}

/// An if-statement. Each bare `if` that directly follows the closing brace of
/// the previous branch is parsed as an [`Elif`].
#[derive(Debug)]
pub struct If {
    pub condition: Expr,
    pub block: Block,
    pub elifs: Vec<Elif>,
    pub else_block: Option<Block>,
}
impl Display for If {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", Keyword::If, self.condition, self.block)?;
        for elif in &self.elifs {
            write!(f, " {} {} {}", Keyword::If, elif.condition, elif.block)?;
        }
        if let Some(else_block) = &self.else_block {
            write!(f, " {} {}", Keyword::Else, else_block)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Elif {
    pub condition: Expr,
    pub block: Block,
}

#[derive(Debug)]
pub struct While {
    pub condition: Expr,
    pub body: Block,
}
impl Display for While {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", Keyword::While, self.condition, self.body)
    }
}

#[derive(Debug)]
pub struct Expr {
    pub expr_kind: ExprKind,
    pub location: Location,
}
impl Expr {
    pub fn new(expr_kind: ExprKind, location: Location) -> Self {
        Self {
            expr_kind,
            location,
        }
    }
}
impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.expr_kind)
    }
}

#[derive(Debug)]
pub enum ExprKind {
    Literal(Literal),
    Identifier(String),
    Unary(Box<UnExpr>),
    Binary(Box<BinExpr>),
}
impl Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ExprKind::*;
        match self {
            Literal(lit) => write!(f, "{}", lit),
            Identifier(id) => write!(f, "{}", id),
            Binary(bin) => write!(f, "{}", bin),
            Unary(un) => write!(f, "{}", un),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
}
impl Literal {
    /// The type of a literal follows from its lexical form.
    pub fn type_spec(&self) -> TypeSpec {
        match self {
            Literal::Integer(_) => TypeSpec::Integer,
            Literal::Float(_) => TypeSpec::Float,
        }
    }
}
impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Float(x) => write!(f, "{:?}", x),
        }
    }
}

#[derive(Debug)]
pub struct UnExpr {
    pub op: UnOp,
    pub rhs: Expr,
}
impl Display for UnExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}{})", self.op, self.rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Plus,
    Negate,
}
impl Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            UnOp::Plus => "+",
            UnOp::Negate => "-",
        })
    }
}

#[derive(Debug)]
pub struct BinExpr {
    pub lhs: Expr,
    pub op: BinOp,
    pub rhs: Expr,
}
impl Display for BinExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({} {} {})", self.lhs, self.op, self.rhs)
    }
}

/// A binary operator. `<=` and `>=` are lexed, but no grammar rule produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
}
impl BinOp {
    pub fn is_comparison(&self) -> bool {
        use BinOp::*;
        matches!(self, Equal | NotEqual | LessThan | GreaterThan)
    }
}
impl Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use BinOp::*;
        let ch = match self {
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Equal => "==",
            NotEqual => "!=",
            LessThan => "<",
            GreaterThan => ">",
        };
        f.write_str(ch)
    }
}
