//! Integration tests for whole-program binding.
//!
//! These tests build small programs by hand, bind them into a root
//! environment, and check which diagnostics the pass produces.

use std::rc::Rc;

use sema::{
    ast::{
        ast::{Expr, Node, Stmt},
        expressions::{BoolLiteralExpr, CallExpr, IntLiteralExpr, LambdaExpr, NullExpr, VariableExpr},
        statements::{
            AssignmentStmt, BlockStmt, ExpressionStmt, IfStmt, ReturnStmt, StructDeclStmt, VarDeclStmt,
            WhileStmt,
        },
        types::Type,
    },
    errors::errors::ErrorCategory,
    type_checker::{
        environment::{Environment, Symbol},
        type_checker::type_check,
    },
    Position, Span,
};

fn span(line: u32) -> Span {
    let file = Rc::new("test.lang".to_string());
    Span::new(
        Position::new(line, 1, Rc::clone(&file)),
        Position::new(line, 40, file),
    )
}

fn var(line: u32, name: &str) -> Expr {
    VariableExpr::new(span(line), name).into()
}

fn boolean(line: u32, value: bool) -> Expr {
    BoolLiteralExpr::new(span(line), value).into()
}

/// var x = true;
/// while (x) { x = <value>; }
fn loop_program(mutable: bool, value: Expr) -> BlockStmt {
    let mut declaration = VarDeclStmt::new(span(1), "x", Some(boolean(1, true)));
    if mutable {
        declaration = declaration.mutable();
    }

    BlockStmt::new(
        span(1),
        vec![
            declaration.into(),
            WhileStmt::new(
                span(2),
                var(2, "x"),
                BlockStmt::new(
                    span(3),
                    vec![AssignmentStmt::new(span(3), var(3, "x"), value).into()],
                ),
            )
            .into(),
        ],
    )
}

#[test]
fn test_mutable_loop_variable() {
    let mut program = loop_program(true, boolean(3, false));
    let type_checker = type_check(&mut program, &Environment::universe());
    assert!(type_checker.diagnostics.is_empty(), "{:?}", type_checker.diagnostics.messages());
}

#[test]
fn test_immutable_loop_variable() {
    let mut program = loop_program(false, boolean(3, false));
    let type_checker = type_check(&mut program, &Environment::universe());

    assert!(!type_checker.diagnostics.is_empty());
    assert_eq!(type_checker.diagnostics.count(ErrorCategory::Mutability), 1);
    assert_eq!(
        type_checker.diagnostics.messages(),
        vec!["test.lang:3:1: variable \"x\" is immutable".to_string()]
    );
}

#[test]
fn test_null_assigned_to_loop_variable() {
    let mut program = loop_program(true, NullExpr::new(span(3)).into());
    let type_checker = type_check(&mut program, &Environment::universe());
    assert!(type_checker.diagnostics.is_empty());
}

#[test]
fn test_integer_assigned_to_boolean_variable() {
    let mut program = loop_program(true, IntLiteralExpr::i32(span(3), "123").into());
    let type_checker = type_check(&mut program, &Environment::universe());

    assert_eq!(type_checker.diagnostics.count(ErrorCategory::TypeMismatch), 1);
    assert_eq!(
        type_checker.diagnostics.messages(),
        vec!["test.lang:3:1: type mismatch, expected: bool, actual: i32".to_string()]
    );
}

#[test]
fn test_condition_on_undeclared_variable() {
    // if (x) {} else {}
    let mut program = IfStmt::new(
        span(1),
        var(1, "x"),
        BlockStmt::new(span(1), vec![]),
        Some(BlockStmt::new(span(1), vec![])),
    );
    let type_checker = type_check(&mut program, &Environment::universe());

    assert_eq!(type_checker.diagnostics.len(), 1);
    assert_eq!(type_checker.diagnostics.all()[0].category(), ErrorCategory::Resolution);
    assert!(program.then_body.scope.is_some());
    assert!(program.else_body.unwrap().scope.is_some());
}

#[test]
fn test_lambda_with_condition_on_undeclared_variable() {
    let mut lambda = LambdaExpr::new(
        span(1),
        vec![],
        BlockStmt::new(
            span(1),
            vec![IfStmt::new(
                span(2),
                var(2, "var"),
                BlockStmt::new(span(2), vec![]),
                Some(BlockStmt::new(span(2), vec![])),
            )
            .into()],
        ),
    );
    let type_checker = type_check(&mut lambda, &Environment::universe());

    assert!(!type_checker.diagnostics.is_empty());
    assert_eq!(lambda.ty, Some(Type::function(vec![], Type::void())));
}

#[test]
fn test_lambda_with_condition_on_declared_variable() {
    let universe = Environment::universe();
    universe
        .declare(Symbol::variable("var", Type::boolean(), false), &Position::null())
        .unwrap();

    let mut lambda = LambdaExpr::new(
        span(1),
        vec![],
        BlockStmt::new(
            span(1),
            vec![IfStmt::new(
                span(2),
                var(2, "var"),
                BlockStmt::new(span(2), vec![]),
                Some(BlockStmt::new(span(2), vec![])),
            )
            .into()],
        ),
    );
    let type_checker = type_check(&mut lambda, &universe);
    assert!(type_checker.diagnostics.is_empty());
}

#[test]
fn test_self_referential_struct() {
    // struct Node { value: i32 = 0; next: Node = null; }
    let mut program = BlockStmt::new(
        span(1),
        vec![StructDeclStmt::new(
            span(1),
            "Node",
            vec![
                VarDeclStmt::new(span(2), "value", Some(IntLiteralExpr::i32(span(2), "0").into()))
                    .with_type(Type::unresolved("i32")),
                VarDeclStmt::new(span(3), "next", Some(NullExpr::new(span(3)).into()))
                    .with_type(Type::unresolved("Node")),
            ],
        )
        .into()],
    );
    let type_checker = type_check(&mut program, &Environment::universe());

    assert!(type_checker.diagnostics.is_empty(), "{:?}", type_checker.diagnostics.messages());
    let Stmt::Declaration(declaration) = &program.body[0] else {
        panic!("expected a declaration");
    };
    assert_eq!(declaration.get_name(), "Node");
    assert!(declaration.get_environment().is_some());
}

#[test]
fn test_struct_typed_variable() {
    // struct Node { next: Node = null; }
    // var head: Node = null;
    // var flag: Node = true;
    let mut program = BlockStmt::new(
        span(1),
        vec![
            StructDeclStmt::new(
                span(1),
                "Node",
                vec![VarDeclStmt::new(span(2), "next", None).with_type(Type::unresolved("Node"))],
            )
            .into(),
            VarDeclStmt::new(span(4), "head", None)
                .with_type(Type::unresolved("Node"))
                .into(),
            VarDeclStmt::new(span(5), "flag", Some(boolean(5, true)))
                .with_type(Type::unresolved("Node"))
                .into(),
        ],
    );
    let type_checker = type_check(&mut program, &Environment::universe());

    assert_eq!(
        type_checker.diagnostics.messages(),
        vec!["test.lang:5:1: type mismatch, expected: Node, actual: bool".to_string()]
    );
}

#[test]
fn test_many_independent_errors_in_one_pass() {
    // var count = 0;
    // if (count) { missing = true; }
    // while (null) { count(); }
    // var label: Text = null;
    let mut program = BlockStmt::new(
        span(1),
        vec![
            VarDeclStmt::new(span(1), "count", Some(IntLiteralExpr::i32(span(1), "0").into())).into(),
            IfStmt::new(
                span(2),
                var(2, "count"),
                BlockStmt::new(
                    span(2),
                    vec![AssignmentStmt::new(span(2), var(2, "missing"), boolean(2, true)).into()],
                ),
                None,
            )
            .into(),
            WhileStmt::new(
                span(3),
                NullExpr::new(span(3)).into(),
                BlockStmt::new(
                    span(3),
                    vec![ExpressionStmt::new(span(3), CallExpr::new(span(3), var(3, "count"), vec![]).into())
                        .into()],
                ),
            )
            .into(),
            VarDeclStmt::new(span(4), "label", None)
                .with_type(Type::unresolved("Text"))
                .into(),
        ],
    );
    let type_checker = type_check(&mut program, &Environment::universe());

    let errors: Vec<&str> = type_checker
        .diagnostics
        .iter()
        .map(|error| error.get_error_name())
        .collect();
    assert_eq!(
        errors,
        vec![
            "ConditionNotBoolean",
            "VariableNotDeclared",
            "ConditionNotBoolean",
            "NotCallable",
            "UnknownType",
        ]
    );
}

#[test]
fn test_function_declared_as_global() {
    // Globals are supplied by declaring them in the root environment.
    let universe = Environment::universe();
    universe
        .declare(
            Symbol::variable("print", Type::function(vec![Type::int(true, 32)], Type::void()), false),
            &Position::null(),
        )
        .unwrap();

    let mut program = BlockStmt::new(
        span(1),
        vec![
            ExpressionStmt::new(
                span(1),
                CallExpr::new(span(1), var(1, "print"), vec![IntLiteralExpr::i32(span(1), "1").into()]).into(),
            )
            .into(),
            ExpressionStmt::new(
                span(2),
                CallExpr::new(span(2), var(2, "print"), vec![boolean(2, false)]).into(),
            )
            .into(),
            ReturnStmt::new(span(3), NullExpr::new(span(3)).into()).into(),
        ],
    );
    let type_checker = type_check(&mut program, &universe);

    assert_eq!(
        type_checker.diagnostics.messages(),
        vec!["test.lang:2:1: argument types do not match: expected i32, received bool".to_string()]
    );
}

#[test]
fn test_checkers_do_not_share_diagnostics() {
    let mut bad = loop_program(false, boolean(3, false));
    let mut good = loop_program(true, boolean(3, false));

    let first = type_check(&mut bad, &Environment::universe());
    let second = type_check(&mut good, &Environment::universe());

    assert_eq!(first.diagnostics.len(), 1);
    assert!(second.diagnostics.is_empty());
}
