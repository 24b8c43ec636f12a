use std::{
    rc::Rc,
    slice::{Iter, IterMut},
};

use tracing::warn;

use crate::{
    errors::errors::ErrorImpl,
    type_checker::{
        environment::{Environment, Modifier, Symbol, SymbolKind},
        type_checker::TypeChecker,
    },
    Span,
};

use super::{
    ast::{Expr, Node, Stmt},
    expressions::NullExpr,
    types::Type,
};

/// Block Statement
/// A sequence of statements sharing one freshly opened scope.
#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
    pub scope: Option<Rc<Environment>>,
}

impl BlockStmt {
    pub fn new(span: Span, body: Vec<Stmt>) -> Self {
        BlockStmt {
            body,
            span,
            environment: None,
            scope: None,
        }
    }

    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
    pub fn iter_mut(&mut self) -> IterMut<'_, Stmt> {
        self.body.iter_mut()
    }
}

impl Node for BlockStmt {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker) {
        self.environment = Some(Rc::clone(environment));

        let scope = Environment::child(environment);
        for stmt in self.body.iter_mut() {
            stmt.bind(&scope, type_checker);
        }
        self.scope = Some(scope);
    }
}

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
}

impl ExpressionStmt {
    pub fn new(span: Span, expression: Expr) -> Self {
        ExpressionStmt {
            expression,
            span,
            environment: None,
        }
    }
}

impl Node for ExpressionStmt {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker) {
        self.environment = Some(Rc::clone(environment));
        self.expression.bind(environment, type_checker);
    }
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: BlockStmt,
    pub else_body: Option<BlockStmt>,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
}

impl IfStmt {
    pub fn new(span: Span, condition: Expr, then_body: BlockStmt, else_body: Option<BlockStmt>) -> Self {
        IfStmt {
            condition,
            then_body,
            else_body,
            span,
            environment: None,
        }
    }
}

impl Node for IfStmt {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker) {
        self.environment = Some(Rc::clone(environment));

        self.condition.bind(environment, type_checker);
        type_checker.check_condition(&self.condition);

        self.then_body.bind(environment, type_checker);
        if let Some(else_body) = self.else_body.as_mut() {
            else_body.bind(environment, type_checker);
        }
    }
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
}

impl WhileStmt {
    pub fn new(span: Span, condition: Expr, body: BlockStmt) -> Self {
        WhileStmt {
            condition,
            body,
            span,
            environment: None,
        }
    }
}

impl Node for WhileStmt {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker) {
        self.environment = Some(Rc::clone(environment));

        self.condition.bind(environment, type_checker);
        type_checker.check_condition(&self.condition);

        self.body.bind(environment, type_checker);
    }
}

/// Return Statement
/// Only a `return` in the last position of a lambda body decides the
/// lambda's return type.
#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Expr,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
}

impl ReturnStmt {
    pub fn new(span: Span, value: Expr) -> Self {
        ReturnStmt {
            value,
            span,
            environment: None,
        }
    }
}

impl Node for ReturnStmt {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker) {
        self.environment = Some(Rc::clone(environment));
        self.value.bind(environment, type_checker);
    }
}

#[derive(Debug, Clone)]
pub struct AssignmentStmt {
    pub target: Expr,
    pub value: Expr,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
}

impl AssignmentStmt {
    pub fn new(span: Span, target: Expr, value: Expr) -> Self {
        AssignmentStmt {
            target,
            value,
            span,
            environment: None,
        }
    }
}

impl Node for AssignmentStmt {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker) {
        self.environment = Some(Rc::clone(environment));

        self.target.bind(environment, type_checker);
        self.value.bind(environment, type_checker);

        let Expr::Variable(target) = &self.target else {
            type_checker.report(ErrorImpl::InvalidAssignmentTarget, &self.target.get_span().start);
            return;
        };

        // Mutability and type are checked independently; both may fail.
        if target.is_mutable() == Some(false) {
            type_checker.report(
                ErrorImpl::AssignToImmutable {
                    variable: target.name.clone(),
                },
                &self.span.start,
            );
        }

        if let (Some(expected), Some(received)) = (target.ty.as_ref(), self.value.try_get_type()) {
            type_checker.check_assignable(expected, received, &self.value.get_span().start);
        }
    }
}

// DECLARATIONS

/// Variable Declaration
/// Takes its explicit type when one is given, otherwise the type of its
/// initializer. Without an initializer the value is null.
#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub name: String,
    pub modifier: Modifier,
    pub value: Expr,
    pub mutable: bool,
    pub explicit_type: Option<Type>,
    /// The declaration's final type, set by `bind`.
    pub ty: Option<Type>,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
}

impl VarDeclStmt {
    pub fn new(span: Span, name: impl Into<String>, value: Option<Expr>) -> Self {
        VarDeclStmt {
            name: name.into(),
            modifier: Modifier::default(),
            value: value.unwrap_or_else(|| Expr::Null(NullExpr::new(span.clone()))),
            mutable: false,
            explicit_type: None,
            ty: None,
            span,
            environment: None,
        }
    }

    pub fn mutable(mut self) -> Self {
        self.mutable = true;
        self
    }

    pub fn with_type(mut self, ty: Type) -> Self {
        self.explicit_type = Some(ty);
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn get_type(&self) -> Option<&Type> {
        self.ty.as_ref()
    }
}

impl Node for VarDeclStmt {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker) {
        self.environment = Some(Rc::clone(environment));

        self.value.bind(environment, type_checker);
        let value_type = self.value.try_get_type().cloned();

        let ty = match &self.explicit_type {
            Some(explicit_type) => {
                let ty = type_checker.resolve_type(explicit_type, environment, &self.span.start);
                if let Some(value_type) = &value_type {
                    type_checker.check_assignable(&ty, value_type, &self.value.get_span().start);
                }
                ty
            }
            None => value_type.unwrap_or_else(Type::invalid),
        };

        type_checker.declare(
            environment,
            Symbol::variable(self.name.clone(), ty.clone(), self.mutable).with_modifier(self.modifier),
            &self.span.start,
        );
        self.ty = Some(ty);
    }
}

/// Type Alias Declaration
/// The aliased type is resolved lazily, each time the alias is used.
#[derive(Debug, Clone)]
pub struct TypeDeclStmt {
    pub name: String,
    pub modifier: Modifier,
    pub ty: Type,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
}

impl TypeDeclStmt {
    pub fn new(span: Span, name: impl Into<String>, ty: Type) -> Self {
        TypeDeclStmt {
            name: name.into(),
            modifier: Modifier::default(),
            ty,
            span,
            environment: None,
        }
    }
}

impl Node for TypeDeclStmt {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker) {
        self.environment = Some(Rc::clone(environment));
        type_checker.declare(
            environment,
            Symbol::type_alias(self.name.clone(), self.ty.clone()).with_modifier(self.modifier),
            &self.span.start,
        );
    }
}

/// Struct Declaration
/// Declares its own named type before its fields are bound, so fields may
/// refer to the struct itself.
#[derive(Debug, Clone)]
pub struct StructDeclStmt {
    pub name: String,
    pub modifier: Modifier,
    pub fields: Vec<VarDeclStmt>,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
    pub scope: Option<Rc<Environment>>,
}

impl StructDeclStmt {
    pub fn new(span: Span, name: impl Into<String>, fields: Vec<VarDeclStmt>) -> Self {
        StructDeclStmt {
            name: name.into(),
            modifier: Modifier::default(),
            fields,
            span,
            environment: None,
            scope: None,
        }
    }

    /// The struct's own named type.
    pub fn get_type(&self) -> Type {
        Type::named(self.name.clone())
    }
}

impl Node for StructDeclStmt {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker) {
        self.environment = Some(Rc::clone(environment));

        let symbol = Symbol {
            name: self.name.clone(),
            modifier: self.modifier,
            kind: SymbolKind::Struct { ty: self.get_type() },
        };
        type_checker.declare(environment, symbol, &self.span.start);

        let scope = Environment::child(environment);
        for field in self.fields.iter_mut() {
            field.bind(&scope, type_checker);
        }
        self.scope = Some(scope);
    }
}

/// Macro Declaration
/// Macros are expanded before binding, so one reaching the binder is only
/// logged and never declared.
#[derive(Debug, Clone)]
pub struct MacroDeclStmt {
    pub name: String,
    pub modifier: Modifier,
    pub content: String,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
}

impl MacroDeclStmt {
    pub fn new(span: Span, name: impl Into<String>, content: impl Into<String>) -> Self {
        MacroDeclStmt {
            name: name.into(),
            modifier: Modifier::default(),
            content: content.into(),
            span,
            environment: None,
        }
    }
}

impl Node for MacroDeclStmt {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, _type_checker: &mut TypeChecker) {
        warn!(name = %self.name, "unexpanded macro reached the binder");
        self.environment = Some(Rc::clone(environment));
    }
}
