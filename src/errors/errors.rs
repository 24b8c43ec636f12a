use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A semantic diagnostic: what went wrong, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// The four diagnostic classes the binder can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A referenced name has no visible declaration.
    Resolution,
    /// A value's type is incompatible with the type expected of it.
    TypeMismatch,
    /// Assignment to an immutable variable.
    Mutability,
    /// An expression has the wrong shape for its position.
    Kind,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::NotAVariable { .. } => "NotAVariable",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::NotAType { .. } => "NotAType",
            ErrorImpl::CyclicTypeAlias { .. } => "CyclicTypeAlias",
            ErrorImpl::AlreadyDeclared { .. } => "AlreadyDeclared",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::AssignToImmutable { .. } => "AssignToImmutable",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::ConditionNotBoolean { .. } => "ConditionNotBoolean",
            ErrorImpl::NotCallable { .. } => "NotCallable",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::UnknownType { .. }
            | ErrorImpl::CyclicTypeAlias { .. }
            | ErrorImpl::AlreadyDeclared { .. } => ErrorCategory::Resolution,
            ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::ArgumentTypeMatchError { .. }
            | ErrorImpl::UnexpectedArguments { .. }
            | ErrorImpl::MissingArguments { .. } => ErrorCategory::TypeMismatch,
            ErrorImpl::AssignToImmutable { .. } => ErrorCategory::Mutability,
            ErrorImpl::NotAVariable { .. }
            | ErrorImpl::NotAType { .. }
            | ErrorImpl::InvalidAssignmentTarget
            | ErrorImpl::ConditionNotBoolean { .. }
            | ErrorImpl::NotCallable { .. } => ErrorCategory::Kind,
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::NotAVariable { name } => ErrorTip::Suggestion(format!(
                "`{}` names a type, not a variable",
                name
            )),
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::NotAType { name } => ErrorTip::Suggestion(format!(
                "`{}` names a variable, not a type",
                name
            )),
            ErrorImpl::CyclicTypeAlias { name } => ErrorTip::Suggestion(format!(
                "Type alias `{}` refers back to itself",
                name
            )),
            ErrorImpl::AlreadyDeclared { name } => ErrorTip::Suggestion(format!(
                "`{}` already declared in this scope",
                name
            )),
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ArgumentTypeMatchError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected argument type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::UnexpectedArguments { expected, received }
            | ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(
                format!("Expected {} arguments, received {}", expected, received),
            ),
            ErrorImpl::AssignToImmutable { variable } => ErrorTip::Suggestion(format!(
                "Declare `{}` as mutable to assign to it",
                variable
            )),
            ErrorImpl::InvalidAssignmentTarget => ErrorTip::None,
            ErrorImpl::ConditionNotBoolean { .. } => ErrorTip::None,
            ErrorImpl::NotCallable { received } => ErrorTip::Suggestion(format!(
                "Only functions can be called, `{}` is not a function type",
                received
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.position.error_header(), self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("{name:?} is not a variable")]
    NotAVariable { name: String },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("{name:?} is not a type")]
    NotAType { name: String },
    #[error("type alias {name:?} is cyclic")]
    CyclicTypeAlias { name: String },
    #[error("{name:?} already declared")]
    AlreadyDeclared { name: String },
    #[error("type mismatch, expected: {expected}, actual: {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("argument types do not match: expected {expected}, received {received}")]
    ArgumentTypeMatchError { expected: String, received: String },
    #[error("unexpected arguments: expected {expected:?}, received {received:?}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("missing arguments: expected {expected:?}, received {received:?}")]
    MissingArguments { expected: usize, received: usize },
    #[error("variable {variable:?} is immutable")]
    AssignToImmutable { variable: String },
    #[error("only variables can be assigned to")]
    InvalidAssignmentTarget,
    #[error("condition must be boolean, not {received}")]
    ConditionNotBoolean { received: String },
    #[error("the function call receiver should be a function, not {received}")]
    NotCallable { received: String },
}
