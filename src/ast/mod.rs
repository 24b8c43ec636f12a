/// AST (Abstract Syntax Tree) module
/// Contains every node the binder walks, and the types they carry
///
/// Submodules:
/// - ast: The node trait and the expression, statement and declaration enums
/// - expressions: Definitions for the expression nodes
/// - statements: Definitions for the statement and declaration nodes
/// - types: Definitions for type representations
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
