use minil::lang::{fold_program, tokenize, BinOp, Expr, Parser, Program, Stmt};

// ============================================================================
// Constant expressions
// ============================================================================

#[test]
fn test_folds_arithmetic() {
    assert_eq!(folded_expr("x = 2 + 3 * 4; end"), Expr::Number(14));
}

#[test]
fn test_folds_negation() {
    assert_eq!(folded_expr("x = -(2 + 3); end"), Expr::Number(-5));
}

#[test]
fn test_folds_comparators_to_zero_or_one() {
    assert_eq!(folded_expr("x = 1 < 2; end"), Expr::Number(1));
    assert_eq!(folded_expr("x = 3 == 4; end"), Expr::Number(0));
    assert_eq!(folded_expr("x = 5 != 4; end"), Expr::Number(1));
}

#[test]
fn test_division_truncates_toward_zero() {
    assert_eq!(folded_expr("x = 7 / 2; end"), Expr::Number(3));
    assert_eq!(folded_expr("x = -7 / 2; end"), Expr::Number(-3));
}

#[test]
fn test_division_by_literal_zero_is_not_folded() {
    // The runtime error must be preserved; only the children fold.
    assert_eq!(
        folded_expr("x = (2 - 1) / 0; end"),
        Expr::Binary(
            BinOp::Divide,
            Box::new(Expr::Number(1)),
            Box::new(Expr::Number(0)),
        )
    );
}

#[test]
fn test_variables_block_folding() {
    assert_eq!(
        folded_expr("x = y + 1; end"),
        Expr::Binary(
            BinOp::Add,
            Box::new(Expr::Var("y".to_string())),
            Box::new(Expr::Number(1)),
        )
    );
}

#[test]
fn test_constant_subtrees_fold_under_variables() {
    // (2 * 3) folds even though the whole expression cannot
    assert_eq!(
        folded_expr("x = y + 2 * 3; end"),
        Expr::Binary(
            BinOp::Add,
            Box::new(Expr::Var("y".to_string())),
            Box::new(Expr::Number(6)),
        )
    );
}

// ============================================================================
// Branch pruning
// ============================================================================

#[test]
fn test_true_condition_keeps_then_branch() {
    let program = fold(parse("if 1 { print 5; } else { print 6; } end"));
    assert_eq!(program.stmts, vec![Stmt::Print(Expr::Number(5))]);
}

#[test]
fn test_false_condition_keeps_else_branch() {
    let program = fold(parse("if 0 { print 5; } else { print 6; } end"));
    assert_eq!(program.stmts, vec![Stmt::Print(Expr::Number(6))]);
}

#[test]
fn test_condition_folds_before_pruning() {
    let program = fold(parse("if 2 - 2 { print 5; } else { print 6; } end"));
    assert_eq!(program.stmts, vec![Stmt::Print(Expr::Number(6))]);
}

#[test]
fn test_selected_branch_is_spliced_in_place() {
    let program = fold(parse(
        "print 0; if 1 { print 1; print 2; } else { print 3; } print 4; end",
    ));
    assert_eq!(
        program.stmts,
        vec![
            Stmt::Print(Expr::Number(0)),
            Stmt::Print(Expr::Number(1)),
            Stmt::Print(Expr::Number(2)),
            Stmt::Print(Expr::Number(4)),
        ]
    );
}

#[test]
fn test_variable_condition_is_kept() {
    let program = fold(parse("read c; if c { print 1; } else { print 2; } end"));
    assert!(matches!(program.stmts[1], Stmt::IfElse(..)));
}

#[test]
fn test_while_body_folds_but_loop_remains() {
    let program = fold(parse("read n; while n { print 2 + 2; } end"));
    match &program.stmts[1] {
        Stmt::While(_, body) => {
            assert_eq!(body, &vec![Stmt::Print(Expr::Number(4))]);
        }
        stmt => panic!("expected a while loop, got {:?}", stmt),
    }
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_folding_twice_equals_folding_once() {
    let source = "read y; x = y + 2 * 3; if 1 { print x; } else { print 0; } \
                  while y > 0 { y = y - 1; print -(2 + 2); } x = 1 / 0; end";
    let once = fold(parse(source));
    let twice = fold(once.clone());
    assert_eq!(once, twice);
}

// ============================================================================
// Helpers
// ============================================================================

fn parse(source: &str) -> Program {
    let tokens = tokenize(source).unwrap();
    Parser::new(source, tokens).parse().unwrap()
}

fn fold(program: Program) -> Program {
    fold_program(&program)
}

/// The folded right-hand side of a program's single assignment.
fn folded_expr(source: &str) -> Expr {
    match fold(parse(source)).stmts.into_iter().next().unwrap() {
        Stmt::Assign(_, expr) => expr,
        stmt => panic!("expected an assignment, got {:?}", stmt),
    }
}
