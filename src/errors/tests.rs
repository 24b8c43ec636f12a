//! Unit tests for error handling.
//!
//! This module contains tests for error types and the diagnostics sink.

use crate::errors::diagnostics::Diagnostics;
use crate::errors::errors::{Error, ErrorCategory, ErrorImpl, ErrorTip};
use crate::Position;
use expect_test::expect;
use std::rc::Rc;

fn position(line: u32) -> Position {
    Position::new(line, 1, Rc::new("test.lang".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::VariableNotDeclared {
            variable: "foo".to_string(),
        },
        position(10),
    );

    assert_eq!(error.get_error_name(), "VariableNotDeclared");
    assert_eq!(error.get_position().line, 10);
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::TypeMatchError {
            expected: "bool".to_string(),
            received: "i32".to_string(),
        },
        position(3),
    );

    assert_eq!(error.get_error_name(), "TypeMatchError");
    assert_eq!(error.category(), ErrorCategory::TypeMismatch);
}

#[test]
fn test_error_categories() {
    let cases = [
        (
            ErrorImpl::UnknownType {
                type_: "Point".to_string(),
            },
            ErrorCategory::Resolution,
        ),
        (
            ErrorImpl::AlreadyDeclared {
                name: "x".to_string(),
            },
            ErrorCategory::Resolution,
        ),
        (
            ErrorImpl::MissingArguments {
                expected: 2,
                received: 1,
            },
            ErrorCategory::TypeMismatch,
        ),
        (
            ErrorImpl::AssignToImmutable {
                variable: "x".to_string(),
            },
            ErrorCategory::Mutability,
        ),
        (
            ErrorImpl::ConditionNotBoolean {
                received: "i32".to_string(),
            },
            ErrorCategory::Kind,
        ),
        (
            ErrorImpl::NotCallable {
                received: "bool".to_string(),
            },
            ErrorCategory::Kind,
        ),
    ];

    for (error_impl, category) in cases {
        assert_eq!(Error::new(error_impl, Position::null()).category(), category);
    }
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(ErrorImpl::InvalidAssignmentTarget, Position::null());

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::AssignToImmutable {
            variable: "counter".to_string(),
        },
        Position::null(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("counter")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_display_has_header() {
    let error = Error::new(
        ErrorImpl::TypeMatchError {
            expected: "bool".to_string(),
            received: "i32".to_string(),
        },
        position(7),
    );

    expect!["test.lang:7:1: type mismatch, expected: bool, actual: i32"]
        .assert_eq(&error.to_string());
}

#[test]
fn test_diagnostics_record_and_clear() {
    let mut diagnostics = Diagnostics::new();
    assert!(diagnostics.is_empty());

    diagnostics.record(Error::new(
        ErrorImpl::VariableNotDeclared {
            variable: "x".to_string(),
        },
        position(1),
    ));
    diagnostics.record(Error::new(
        ErrorImpl::AssignToImmutable {
            variable: "y".to_string(),
        },
        position(2),
    ));

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.all()[0].get_error_name(), "VariableNotDeclared");
    assert_eq!(diagnostics.all()[1].get_error_name(), "AssignToImmutable");
    assert_eq!(diagnostics.count(ErrorCategory::Mutability), 1);

    expect![[r#"
        [
            "test.lang:1:1: variable \"x\" not declared",
            "test.lang:2:1: variable \"y\" is immutable",
        ]
    "#]]
    .assert_debug_eq(&diagnostics.messages());

    diagnostics.clear();
    assert!(diagnostics.is_empty());
    assert!(diagnostics.messages().is_empty());
}
