use crate::{
    ast::*,
    lexer::tokens::{self, Keyword, Symbol, Token, TokenKind},
    prelude::*,
};

use super::{error::*, parser_base::Parser};

type ParseResult<T> = Result<T, ParseError>;

/// Parses a token stream into a [`Program`].
///
/// Parsing stops at the first error. The stream should be terminated by a
/// [`TokenKind::Eof`] token, as produced by [`crate::lexer::lex`].
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens);
    let program = parse_program(&mut parser)?;
    debug!(
        "Parsed {} declarations and {} statements",
        program.var_decls.len(),
        program.statements.len()
    );
    Ok(program)
}

fn parse_program(parser: &mut Parser) -> ParseResult<Program> {
    let mut program = Program::new();

    while parser.at_keyword(Keyword::Var) {
        program.add_var_decl(parse_var_decl(parser)?);
    }
    while !parser.at(&TokenKind::Eof) {
        program.add_statement(parse_statement(parser)?);
    }

    Ok(program)
}

fn parse_var_decl(parser: &mut Parser) -> ParseResult<VarDecl> {
    trace!("Parsing variable declaration at {}", parser.peek().location);
    let stage = Stage::VarDecl;

    parser.expect_keyword(Keyword::Var).add_stage(stage)?;
    let (name, location) = parser.expect_identifier().add_stage(stage)?;
    parser.expect_symbol(Symbol::Assign).add_stage(stage)?;

    let type_spec = match &parser.peek().kind {
        TokenKind::Keyword(kw) => TypeSpec::from_keyword(*kw),
        _ => None,
    };
    let type_spec = match type_spec {
        Some(type_spec) => {
            parser.next();
            type_spec
        }
        None => return failure(stage, Reason::ExpectedType(parser.peek().clone())),
    };
    parser.expect_symbol(Symbol::Semicolon).add_stage(stage)?;

    Ok(VarDecl {
        name,
        type_spec,
        location,
    })
}

fn parse_statement(parser: &mut Parser) -> ParseResult<Statement> {
    let token = parser.peek().clone();
    let location = token.location;
    trace!("Parsing statement starting with {} at {}", token, location);

    let stmt_kind = match &token.kind {
        TokenKind::Identifier(_) => StmtKind::Assign(parse_assignment(parser)?),
        TokenKind::Keyword(Keyword::If) => StmtKind::If(parse_if(parser)?),
        TokenKind::Keyword(Keyword::While) => StmtKind::While(parse_while(parser)?),
        TokenKind::Keyword(Keyword::Print) => StmtKind::Print(parse_print(parser)?),
        _ => return failure(Stage::Statement, Reason::UnexpectedToken(token.clone())),
    };

    Ok(Statement::new(stmt_kind, location))
}

fn parse_assignment(parser: &mut Parser) -> ParseResult<Assign> {
    let stage = Stage::Assign;

    let (target, _) = parser.expect_identifier().add_stage(stage)?;
    parser.expect_symbol(Symbol::Assign).add_stage(stage)?;
    let value = parse_expression(parser)?;
    parser.expect_symbol(Symbol::Semicolon).add_stage(stage)?;

    Ok(Assign { target, value })
}

/// Parses a parenthesised condition, as used by if-statements and while-loops.
fn parse_condition(parser: &mut Parser, stage: Stage) -> ParseResult<Expr> {
    parser.expect_symbol(Symbol::OpenParen).add_stage(stage)?;
    let condition = parse_expression(parser)?;
    parser.expect_symbol(Symbol::CloseParen).add_stage(stage)?;
    Ok(condition)
}

fn parse_if(parser: &mut Parser) -> ParseResult<If> {
    let stage = Stage::If;

    parser.expect_keyword(Keyword::If).add_stage(stage)?;
    let condition = parse_condition(parser, stage)?;
    let block = parse_block(parser)?;

    // There is no dedicated elif keyword: any if directly following
    // a branch continues the chain.
    let mut elifs = vec![];
    while parser.at_keyword(Keyword::If) {
        parser.next();
        let condition = parse_condition(parser, stage)?;
        let block = parse_block(parser)?;
        elifs.push(Elif { condition, block });
    }

    let else_block = if parser.at_keyword(Keyword::Else) {
        parser.next();
        Some(parse_block(parser)?)
    } else {
        None
    };

    Ok(If {
        condition,
        block,
        elifs,
        else_block,
    })
}

fn parse_while(parser: &mut Parser) -> ParseResult<While> {
    let stage = Stage::While;

    parser.expect_keyword(Keyword::While).add_stage(stage)?;
    let condition = parse_condition(parser, stage)?;
    let body = parse_block(parser)?;

    Ok(While { condition, body })
}

fn parse_print(parser: &mut Parser) -> ParseResult<Expr> {
    let stage = Stage::Print;

    parser.expect_keyword(Keyword::Print).add_stage(stage)?;
    let expr = parse_condition(parser, stage)?;
    parser.expect_symbol(Symbol::Semicolon).add_stage(stage)?;

    Ok(expr)
}

fn parse_block(parser: &mut Parser) -> ParseResult<Block> {
    let stage = Stage::Block;

    let open = parser.expect_symbol(Symbol::OpenBrace).add_stage(stage)?;
    parser.descend(&open).add_stage(stage)?;
    let mut block = Block::new();
    while !parser.at_symbol(Symbol::CloseBrace) {
        block.statements.push(parse_statement(parser)?);
    }
    parser.expect_symbol(Symbol::CloseBrace).add_stage(stage)?;
    parser.ascend(1);

    Ok(block)
}

pub fn parse_expression(parser: &mut Parser) -> ParseResult<Expr> {
    parse_comparison(parser)
}

/// Parses a left-associative chain of binary operators. `operator` maps
/// a token to the operator it represents at this precedence level, and
/// `operand` parses the next-tighter level.
fn parse_binary_chain(
    parser: &mut Parser,
    operator: fn(Symbol) -> Option<BinOp>,
    operand: fn(&mut Parser) -> ParseResult<Expr>,
) -> ParseResult<Expr> {
    let mut lhs = operand(parser)?;
    // Each operator deepens the left spine of the tree.
    let mut levels = 0;

    loop {
        let op = match parser.peek().kind {
            TokenKind::Symbol(symbol) => operator(symbol),
            _ => None,
        };
        let op = match op {
            Some(op) => op,
            None => break,
        };
        let token = parser.next();
        parser.descend(&token).add_stage(Stage::Expr)?;
        levels += 1;
        let location = token.location;
        let rhs = operand(parser)?;

        lhs = Expr::new(
            ExprKind::Binary(Box::new(BinExpr { lhs, op, rhs })),
            location,
        );
    }
    parser.ascend(levels);

    Ok(lhs)
}

fn parse_comparison(parser: &mut Parser) -> ParseResult<Expr> {
    parse_binary_chain(
        parser,
        |symbol| match symbol {
            Symbol::Eq => Some(BinOp::Equal),
            Symbol::Neq => Some(BinOp::NotEqual),
            Symbol::Lt => Some(BinOp::LessThan),
            Symbol::Gt => Some(BinOp::GreaterThan),
            _ => None,
        },
        parse_additive,
    )
}

fn parse_additive(parser: &mut Parser) -> ParseResult<Expr> {
    parse_binary_chain(
        parser,
        |symbol| match symbol {
            Symbol::Plus => Some(BinOp::Add),
            Symbol::Minus => Some(BinOp::Subtract),
            _ => None,
        },
        parse_multiplicative,
    )
}

fn parse_multiplicative(parser: &mut Parser) -> ParseResult<Expr> {
    parse_binary_chain(
        parser,
        |symbol| match symbol {
            Symbol::Asterisk => Some(BinOp::Multiply),
            Symbol::Slash => Some(BinOp::Divide),
            _ => None,
        },
        parse_primary,
    )
}

fn parse_primary(parser: &mut Parser) -> ParseResult<Expr> {
    let token = parser.next();
    let location = token.location;

    let expr_kind = match &token.kind {
        TokenKind::Literal(tokens::Literal::Integer(i)) => ExprKind::Literal(Literal::Integer(*i)),
        TokenKind::Literal(tokens::Literal::Float(x)) => ExprKind::Literal(Literal::Float(*x)),
        TokenKind::Identifier(name) => ExprKind::Identifier(name.clone()),
        TokenKind::Symbol(Symbol::OpenParen) => {
            parser.descend(&token).add_stage(Stage::Expr)?;
            let expr = parse_expression(parser)?;
            parser
                .expect_symbol(Symbol::CloseParen)
                .add_stage(Stage::ParenExprEnd)?;
            parser.ascend(1);
            return Ok(expr);
        }
        TokenKind::Symbol(sym @ (Symbol::Plus | Symbol::Minus)) => {
            let op = if *sym == Symbol::Plus {
                UnOp::Plus
            } else {
                UnOp::Negate
            };
            parser.descend(&token).add_stage(Stage::Expr)?;
            let rhs = parse_primary(parser)?;
            parser.ascend(1);
            ExprKind::Unary(Box::new(UnExpr { op, rhs }))
        }
        _ => return failure(Stage::Expr, Reason::UnexpectedToken(token.clone())),
    };

    Ok(Expr::new(expr_kind, location))
}

#[cfg(test)]
mod tests {
    use crate::{
        error::PositionalError,
        lexer::lex,
        location::Location,
        parser::parser_base::MAX_NESTING,
    };

    use super::*;

    macro_rules! assert_parses {
        ($source:expr, $expected:expr) => {{
            let tokens = lex($source).unwrap();
            let program = match parse(&tokens) {
                Ok(program) => program,
                Err(err) => {
                    panic!(
                        "\n\nEncountered error:\n{:#?}\nWhen parsing:\n    {}\n\n",
                        err, $source,
                    );
                }
            };
            let pretty = program.to_string();
            let pretty = pretty.trim_end();

            assert_eq!(
                $expected, pretty,
                "\n\nWhen parsing:\n    {}\nExpected to find:\n    {}\nBut found:\n    {}\n\n",
                $source, $expected, pretty
            );
        }};
    }

    macro_rules! assert_parse_error {
        ($source:expr, $stage:expr, $line:expr, $column:expr) => {{
            let tokens = lex($source).unwrap();
            match parse(&tokens) {
                Ok(program) => panic!(
                    "\n\nExpected a parse error, but parsed:\n    {}\nInto:\n{}\n\n",
                    $source, program
                ),
                Err(err) => {
                    assert_eq!($stage, err.stage(), "wrong stage for {}", err);
                    assert_eq!(Location::new($line, $column), err.location(), "{}", err);
                    err
                }
            }
        }};
    }

    fn parse_expr(source: &str) -> String {
        let tokens = lex(source).unwrap();
        let mut parser = Parser::new(&tokens);
        let expr = parse_expression(&mut parser).unwrap();
        assert_eq!(TokenKind::Eof, parser.peek().kind, "trailing input in {}", source);
        expr.to_string()
    }

    #[test]
    fn parses_empty_program() {
        let tokens = lex("").unwrap();
        let program = parse(&tokens).unwrap();
        assert!(program.var_decls.is_empty());
        assert!(program.statements.is_empty());
    }

    #[test]
    fn parses_declarations_and_assignment() {
        assert_parses!(
            "tongtongsahur x = bombardino; x = 5;",
            "tongtongsahur x = bombardino;\nx = 5;"
        );
        assert_parses!(
            "TongTongSahur y = CROCODILO;",
            "tongtongsahur y = crocodilo;"
        );
    }

    #[test]
    fn declaration_records_name_location() {
        let tokens = lex("tongtongsahur x = bombardino;\n  tongtongsahur y = crocodilo;").unwrap();
        let program = parse(&tokens).unwrap();
        assert_eq!(Location::new(1, 15), program.var_decls[0].location);
        assert_eq!(Location::new(2, 17), program.var_decls[1].location);
        assert_eq!(TypeSpec::Float, program.var_decls[1].type_spec);
    }

    #[test]
    fn additive_operators_are_left_associative() {
        assert_eq!("((a + b) - c)", parse_expr("a + b - c"));
        assert_eq!("((a - b) + c)", parse_expr("a - b + c"));
    }

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        assert_eq!("(2 + (3 * 4))", parse_expr("2 + 3 * 4"));
        assert_eq!("((2 / 3) - 4)", parse_expr("2 / 3 - 4"));
        assert_eq!("((a * b) / c)", parse_expr("a * b / c"));
    }

    #[test]
    fn comparison_binds_loosest() {
        assert_eq!("((a + 1) > (b * 2))", parse_expr("a + 1 > b * 2"));
        assert_eq!("((a == b) != c)", parse_expr("a == b != c"));
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!("((2 + 3) * 4)", parse_expr("(2 + 3) * 4"));
        assert_eq!("x", parse_expr("((x))"));
    }

    #[test]
    fn unary_operators_apply_to_primaries() {
        assert_eq!("(-x)", parse_expr("-x"));
        assert_eq!("(+1.5)", parse_expr("+1.5"));
        assert_eq!("(-(-x))", parse_expr("--x"));
        assert_eq!("((-a) * b)", parse_expr("-a * b"));
        assert_eq!("(-(a + b))", parse_expr("-(a + b)"));
    }

    #[test]
    fn binary_expression_is_located_at_operator() {
        let tokens = lex("a +\n b").unwrap();
        let mut parser = Parser::new(&tokens);
        let expr = parse_expression(&mut parser).unwrap();
        assert_eq!(Location::new(1, 3), expr.location);
    }

    #[test]
    fn parses_if_with_else() {
        assert_parses!(
            "chimpanzini (x > 0) { drip(1); } bananini { drip(0); }",
            "chimpanzini (x > 0) { drip(1); } bananini { drip(0); }"
        );
    }

    #[test]
    fn consecutive_ifs_form_an_elif_chain() {
        let tokens = lex(
            "chimpanzini (a) { drip(1); } chimpanzini (b) { drip(2); } chimpanzini (c) { } bananini { }",
        )
        .unwrap();
        let program = parse(&tokens).unwrap();
        assert_eq!(1, program.statements.len());
        match &program.statements[0].stmt_kind {
            StmtKind::If(if_stmt) => {
                assert_eq!(2, if_stmt.elifs.len());
                assert_eq!("b", if_stmt.elifs[0].condition.to_string());
                assert_eq!("c", if_stmt.elifs[1].condition.to_string());
                assert!(if_stmt.else_block.is_some());
            }
            other => panic!("Expected an if-statement, found {}", other),
        }
    }

    #[test]
    fn parses_nested_while() {
        assert_parses!(
            "patapim (i < 10) { i = i + 1; patapim (j > 0) { j = j - 1; } }",
            "patapim (i < 10) { i = (i + 1); patapim (j > 0) { j = (j - 1); } }"
        );
    }

    #[test]
    fn statement_is_located_at_first_token() {
        let tokens = lex("x = 1;\n  drip(x);").unwrap();
        let program = parse(&tokens).unwrap();
        assert_eq!(Location::new(1, 1), program.statements[0].location);
        assert_eq!(Location::new(2, 3), program.statements[1].location);
    }

    #[test]
    fn less_equal_is_not_part_of_the_grammar() {
        let err = assert_parse_error!("chimpanzini (x <= 1) { }", Stage::If, 1, 16);
        match err.reason() {
            Reason::Expected(TokenKind::Symbol(Symbol::CloseParen), found) => {
                assert_eq!(TokenKind::Symbol(Symbol::Lte), found.kind)
            }
            other => panic!("Unexpected reason: {}", other),
        }
        assert_parse_error!("x = a >= b;", Stage::Assign, 1, 7);
    }

    #[test]
    fn missing_semicolon_is_reported_at_next_token() {
        assert_parse_error!("x = 5\ndrip(x);", Stage::Assign, 2, 1);
    }

    #[test]
    fn missing_type_name() {
        let err = assert_parse_error!("tongtongsahur x = y;", Stage::VarDecl, 1, 19);
        assert!(matches!(err.reason(), Reason::ExpectedType(_)));
    }

    #[test]
    fn declaration_after_statement_is_rejected() {
        assert_parse_error!(
            "x = 1; tongtongsahur y = bombardino;",
            Stage::Statement,
            1,
            8
        );
    }

    #[test]
    fn unterminated_block_reports_end_of_input() {
        let err = assert_parse_error!("patapim (x) { x = 1;", Stage::Statement, 1, 21);
        assert_eq!(TokenKind::Eof, err.reason().token().kind);
        assert!(err.to_string().contains("end of input"));
    }

    #[test]
    fn missing_operand() {
        assert_parse_error!("x = 1 + ;", Stage::Expr, 1, 9);
        assert_parse_error!("x = (1 + 2;", Stage::ParenExprEnd, 1, 11);
    }

    #[test]
    fn bare_expression_is_not_a_statement() {
        assert_parse_error!("5;", Stage::Statement, 1, 1);
    }

    fn nested_parens(depth: usize) -> String {
        format!("drip({}1{});", "(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn nesting_up_to_the_limit_parses() {
        let tokens = lex(&nested_parens(MAX_NESTING)).unwrap();
        assert!(parse(&tokens).is_ok());
    }

    #[test]
    fn deeply_nested_parentheses_are_rejected() {
        let source = nested_parens(10_000);
        // The first inner parenthesis sits at column 6.
        let err = assert_parse_error!(&source, Stage::Expr, 1, 6 + MAX_NESTING);
        assert!(matches!(err.reason(), Reason::TooDeeplyNested(_)));
    }

    #[test]
    fn long_unary_runs_are_rejected() {
        let source = format!("drip({}1);", "-".repeat(10_000));
        let tokens = lex(&source).unwrap();
        let err = parse(&tokens).unwrap_err();
        assert!(matches!(err.reason(), Reason::TooDeeplyNested(_)));
    }

    #[test]
    fn long_operator_chains_are_rejected() {
        let source = format!("drip(1{});", " + 1".repeat(10_000));
        let tokens = lex(&source).unwrap();
        let err = parse(&tokens).unwrap_err();
        assert!(matches!(err.reason(), Reason::TooDeeplyNested(_)));
    }

    #[test]
    fn deeply_nested_blocks_are_rejected() {
        let source = format!(
            "{}{}",
            "patapim (x) { ".repeat(10_000),
            "} ".repeat(10_000)
        );
        let err = assert_parse_error!(&source, Stage::Block, 1, 13 + 14 * MAX_NESTING);
        assert!(matches!(err.reason(), Reason::TooDeeplyNested(_)));
    }

    #[test]
    fn sibling_blocks_do_not_accumulate_depth() {
        let source = "patapim (x) { x = 1; } ".repeat(MAX_NESTING * 2);
        let tokens = lex(&source).unwrap();
        assert!(parse(&tokens).is_ok());
    }
}
