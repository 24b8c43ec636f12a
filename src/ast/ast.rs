use std::{fmt::Debug, rc::Rc};

use crate::{
    type_checker::{
        environment::{Environment, Modifier},
        type_checker::TypeChecker,
    },
    Span,
};

use super::{
    expressions::{BoolLiteralExpr, CallExpr, IntLiteralExpr, LambdaExpr, NullExpr, VariableExpr},
    statements::{
        AssignmentStmt, BlockStmt, ExpressionStmt, IfStmt, MacroDeclStmt, ReturnStmt, StructDeclStmt,
        TypeDeclStmt, VarDeclStmt, WhileStmt,
    },
    types::Type,
};

/// Node Trait
///
/// Behaviour shared by every expression and statement in the AST.
pub trait Node: Debug {
    /// Returns the span of the node.
    fn get_span(&self) -> &Span;
    /// Returns the environment the node was bound into, if it has been bound.
    fn get_environment(&self) -> Option<&Rc<Environment>>;
    /// Attaches the node, and recursively its children, to `environment`.
    ///
    /// Expressions compute and cache their type; statements run their checks.
    /// Violations are recorded on `type_checker` and binding carries on.
    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker);
}

/// Expression
///
/// Every expression kind the binder understands.
#[derive(Debug, Clone)]
pub enum Expr {
    Null(NullExpr),
    IntLiteral(IntLiteralExpr),
    BoolLiteral(BoolLiteralExpr),
    Variable(VariableExpr),
    Lambda(LambdaExpr),
    Call(CallExpr),
}

impl Expr {
    /// The cached type of this expression, or `None` if it has not been bound
    /// or its type could not be computed.
    pub fn try_get_type(&self) -> Option<&Type> {
        match self {
            Expr::Null(expr) => Some(&expr.ty),
            Expr::IntLiteral(expr) => Some(&expr.ty),
            Expr::BoolLiteral(expr) => Some(&expr.ty),
            Expr::Variable(expr) => expr.ty.as_ref(),
            Expr::Lambda(expr) => expr.ty.as_ref(),
            Expr::Call(expr) => expr.ty.as_ref(),
        }
    }

    /// The cached type of this expression.
    ///
    /// Panics if the expression is unbound or its type could not be computed.
    pub fn get_type(&self) -> &Type {
        match self.try_get_type() {
            Some(ty) => ty,
            None => panic!(
                "{}attempted to read the type of an expression that has none",
                self.get_span().start.error_header()
            ),
        }
    }
}

impl Node for Expr {
    fn get_span(&self) -> &Span {
        match self {
            Expr::Null(expr) => expr.get_span(),
            Expr::IntLiteral(expr) => expr.get_span(),
            Expr::BoolLiteral(expr) => expr.get_span(),
            Expr::Variable(expr) => expr.get_span(),
            Expr::Lambda(expr) => expr.get_span(),
            Expr::Call(expr) => expr.get_span(),
        }
    }

    fn get_environment(&self) -> Option<&Rc<Environment>> {
        match self {
            Expr::Null(expr) => expr.get_environment(),
            Expr::IntLiteral(expr) => expr.get_environment(),
            Expr::BoolLiteral(expr) => expr.get_environment(),
            Expr::Variable(expr) => expr.get_environment(),
            Expr::Lambda(expr) => expr.get_environment(),
            Expr::Call(expr) => expr.get_environment(),
        }
    }

    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker) {
        match self {
            Expr::Null(expr) => expr.bind(environment, type_checker),
            Expr::IntLiteral(expr) => expr.bind(environment, type_checker),
            Expr::BoolLiteral(expr) => expr.bind(environment, type_checker),
            Expr::Variable(expr) => expr.bind(environment, type_checker),
            Expr::Lambda(expr) => expr.bind(environment, type_checker),
            Expr::Call(expr) => expr.bind(environment, type_checker),
        }
    }
}

/// Statement
///
/// Every statement kind the binder understands. Declarations are statements.
#[derive(Debug, Clone)]
pub enum Stmt {
    Block(BlockStmt),
    Expression(ExpressionStmt),
    If(IfStmt),
    While(WhileStmt),
    Return(ReturnStmt),
    Assignment(AssignmentStmt),
    Declaration(Declaration),
}

impl Node for Stmt {
    fn get_span(&self) -> &Span {
        match self {
            Stmt::Block(stmt) => stmt.get_span(),
            Stmt::Expression(stmt) => stmt.get_span(),
            Stmt::If(stmt) => stmt.get_span(),
            Stmt::While(stmt) => stmt.get_span(),
            Stmt::Return(stmt) => stmt.get_span(),
            Stmt::Assignment(stmt) => stmt.get_span(),
            Stmt::Declaration(stmt) => stmt.get_span(),
        }
    }

    fn get_environment(&self) -> Option<&Rc<Environment>> {
        match self {
            Stmt::Block(stmt) => stmt.get_environment(),
            Stmt::Expression(stmt) => stmt.get_environment(),
            Stmt::If(stmt) => stmt.get_environment(),
            Stmt::While(stmt) => stmt.get_environment(),
            Stmt::Return(stmt) => stmt.get_environment(),
            Stmt::Assignment(stmt) => stmt.get_environment(),
            Stmt::Declaration(stmt) => stmt.get_environment(),
        }
    }

    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker) {
        match self {
            Stmt::Block(stmt) => stmt.bind(environment, type_checker),
            Stmt::Expression(stmt) => stmt.bind(environment, type_checker),
            Stmt::If(stmt) => stmt.bind(environment, type_checker),
            Stmt::While(stmt) => stmt.bind(environment, type_checker),
            Stmt::Return(stmt) => stmt.bind(environment, type_checker),
            Stmt::Assignment(stmt) => stmt.bind(environment, type_checker),
            Stmt::Declaration(stmt) => stmt.bind(environment, type_checker),
        }
    }
}

/// Declaration
///
/// Statements that introduce a name into the enclosing scope.
#[derive(Debug, Clone)]
pub enum Declaration {
    Variable(VarDeclStmt),
    TypeAlias(TypeDeclStmt),
    Struct(StructDeclStmt),
    /// Never survives macro expansion; binding one is a no-op.
    Macro(MacroDeclStmt),
}

impl Declaration {
    pub fn get_name(&self) -> &str {
        match self {
            Declaration::Variable(decl) => &decl.name,
            Declaration::TypeAlias(decl) => &decl.name,
            Declaration::Struct(decl) => &decl.name,
            Declaration::Macro(decl) => &decl.name,
        }
    }

    pub fn get_modifier(&self) -> Modifier {
        match self {
            Declaration::Variable(decl) => decl.modifier,
            Declaration::TypeAlias(decl) => decl.modifier,
            Declaration::Struct(decl) => decl.modifier,
            Declaration::Macro(decl) => decl.modifier,
        }
    }
}

// Declarations are identified by name alone.
impl PartialEq for Declaration {
    fn eq(&self, other: &Self) -> bool {
        self.get_name() == other.get_name()
    }
}

impl Node for Declaration {
    fn get_span(&self) -> &Span {
        match self {
            Declaration::Variable(decl) => decl.get_span(),
            Declaration::TypeAlias(decl) => decl.get_span(),
            Declaration::Struct(decl) => decl.get_span(),
            Declaration::Macro(decl) => decl.get_span(),
        }
    }

    fn get_environment(&self) -> Option<&Rc<Environment>> {
        match self {
            Declaration::Variable(decl) => decl.get_environment(),
            Declaration::TypeAlias(decl) => decl.get_environment(),
            Declaration::Struct(decl) => decl.get_environment(),
            Declaration::Macro(decl) => decl.get_environment(),
        }
    }

    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker) {
        match self {
            Declaration::Variable(decl) => decl.bind(environment, type_checker),
            Declaration::TypeAlias(decl) => decl.bind(environment, type_checker),
            Declaration::Struct(decl) => decl.bind(environment, type_checker),
            Declaration::Macro(decl) => decl.bind(environment, type_checker),
        }
    }
}

macro_rules! impl_from {
    ($target:ident :: $variant:ident ($node:ty)) => {
        impl From<$node> for $target {
            fn from(node: $node) -> Self {
                $target::$variant(node)
            }
        }
    };
}

impl_from!(Expr::Null(NullExpr));
impl_from!(Expr::IntLiteral(IntLiteralExpr));
impl_from!(Expr::BoolLiteral(BoolLiteralExpr));
impl_from!(Expr::Variable(VariableExpr));
impl_from!(Expr::Lambda(LambdaExpr));
impl_from!(Expr::Call(CallExpr));

impl_from!(Stmt::Block(BlockStmt));
impl_from!(Stmt::Expression(ExpressionStmt));
impl_from!(Stmt::If(IfStmt));
impl_from!(Stmt::While(WhileStmt));
impl_from!(Stmt::Return(ReturnStmt));
impl_from!(Stmt::Assignment(AssignmentStmt));
impl_from!(Stmt::Declaration(Declaration));

impl_from!(Declaration::Variable(VarDeclStmt));
impl_from!(Declaration::TypeAlias(TypeDeclStmt));
impl_from!(Declaration::Struct(StructDeclStmt));
impl_from!(Declaration::Macro(MacroDeclStmt));

impl From<VarDeclStmt> for Stmt {
    fn from(decl: VarDeclStmt) -> Self {
        Stmt::Declaration(Declaration::Variable(decl))
    }
}

impl From<TypeDeclStmt> for Stmt {
    fn from(decl: TypeDeclStmt) -> Self {
        Stmt::Declaration(Declaration::TypeAlias(decl))
    }
}

impl From<StructDeclStmt> for Stmt {
    fn from(decl: StructDeclStmt) -> Self {
        Stmt::Declaration(Declaration::Struct(decl))
    }
}

impl From<MacroDeclStmt> for Stmt {
    fn from(decl: MacroDeclStmt) -> Self {
        Stmt::Declaration(Declaration::Macro(decl))
    }
}
