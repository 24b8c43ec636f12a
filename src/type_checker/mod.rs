//! Scope binding and type checking.
//!
//! Binding walks an AST top-down, opening a child environment for every
//! block, lambda and struct body, and records on the way:
//!
//! - Names that do not resolve to a visible declaration
//! - Values whose type does not match the type expected of them
//! - Assignments to immutable variables
//! - Conditions that are not boolean and calls of non-functions
//!
//! Nothing here aborts on a semantic error; every problem found in one pass
//! ends up in the checker's diagnostics.

pub mod environment;
pub mod type_checker;
