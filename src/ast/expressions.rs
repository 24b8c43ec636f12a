use std::rc::Rc;

use crate::{
    errors::errors::ErrorImpl,
    type_checker::{
        environment::{Environment, Symbol, SymbolKind},
        type_checker::{is_assignable, TypeChecker},
    },
    Span,
};

use super::{
    ast::{Expr, Node, Stmt},
    statements::{BlockStmt, VarDeclStmt},
    types::{PrimitiveType, Type},
};

// LITERALS

/// Null Expression
/// Has the null type, which is assignable to every other type.
#[derive(Debug, Clone)]
pub struct NullExpr {
    pub ty: Type,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
}

impl NullExpr {
    pub fn new(span: Span) -> Self {
        NullExpr {
            ty: Type::null(),
            span,
            environment: None,
        }
    }
}

impl Node for NullExpr {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, _type_checker: &mut TypeChecker) {
        self.environment = Some(Rc::clone(environment));
    }
}

/// Integer Expression
/// An integer literal whose type is fixed by its signedness and width.
#[derive(Debug, Clone)]
pub struct IntLiteralExpr {
    pub value: String,
    pub ty: Type,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
}

impl IntLiteralExpr {
    pub fn new(span: Span, value: impl Into<String>, signed: bool, bits: u16) -> Self {
        IntLiteralExpr {
            value: value.into(),
            ty: Type::Primitive(PrimitiveType::Int { signed, bits }),
            span,
            environment: None,
        }
    }

    /// A signed 32 bit literal.
    pub fn i32(span: Span, value: impl Into<String>) -> Self {
        IntLiteralExpr::new(span, value, true, 32)
    }
}

impl Node for IntLiteralExpr {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, _type_checker: &mut TypeChecker) {
        self.environment = Some(Rc::clone(environment));
    }
}

/// Boolean Expression
#[derive(Debug, Clone)]
pub struct BoolLiteralExpr {
    pub value: bool,
    pub ty: Type,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
}

impl BoolLiteralExpr {
    pub fn new(span: Span, value: bool) -> Self {
        BoolLiteralExpr {
            value,
            ty: Type::boolean(),
            span,
            environment: None,
        }
    }
}

impl Node for BoolLiteralExpr {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, _type_checker: &mut TypeChecker) {
        self.environment = Some(Rc::clone(environment));
    }
}

/// Variable Expression
/// A reference to a variable by name. Takes the type of the declaration
/// it resolves to.
#[derive(Debug, Clone)]
pub struct VariableExpr {
    pub name: String,
    pub ty: Option<Type>,
    /// The variable declaration this name resolved to.
    pub declaration: Option<Symbol>,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
}

impl VariableExpr {
    pub fn new(span: Span, name: impl Into<String>) -> Self {
        VariableExpr {
            name: name.into(),
            ty: None,
            declaration: None,
            span,
            environment: None,
        }
    }

    /// Whether the resolved declaration may be assigned to.
    pub fn is_mutable(&self) -> Option<bool> {
        match &self.declaration {
            Some(Symbol {
                kind: SymbolKind::Variable { mutable, .. },
                ..
            }) => Some(*mutable),
            _ => None,
        }
    }
}

impl Node for VariableExpr {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker) {
        self.environment = Some(Rc::clone(environment));
        self.ty = None;
        self.declaration = None;

        match environment.lookup(&self.name) {
            Some(symbol) => {
                if let SymbolKind::Variable { ty, .. } = &symbol.kind {
                    self.ty = Some(ty.clone());
                    self.declaration = Some(symbol);
                } else {
                    type_checker.report(
                        ErrorImpl::NotAVariable {
                            name: self.name.clone(),
                        },
                        &self.span.start,
                    );
                }
            }
            None => type_checker.report(
                ErrorImpl::VariableNotDeclared {
                    variable: self.name.clone(),
                },
                &self.span.start,
            ),
        }
    }
}

/// Lambda Expression
/// An anonymous function. Its return type is the type of the trailing
/// `return` of the body, or `void` when the body does not end in one.
#[derive(Debug, Clone)]
pub struct LambdaExpr {
    pub parameters: Vec<VarDeclStmt>,
    pub body: BlockStmt,
    pub ty: Option<Type>,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
    /// Scope holding the parameters; the body's scope is nested inside it.
    pub scope: Option<Rc<Environment>>,
}

impl LambdaExpr {
    pub fn new(span: Span, parameters: Vec<VarDeclStmt>, body: BlockStmt) -> Self {
        LambdaExpr {
            parameters,
            body,
            ty: None,
            span,
            environment: None,
            scope: None,
        }
    }

    fn infer_return_type(&self) -> Type {
        match self.body.body.last() {
            Some(Stmt::Return(return_stmt)) => return_stmt
                .value
                .try_get_type()
                .cloned()
                .unwrap_or_else(Type::invalid),
            _ => Type::void(),
        }
    }
}

impl Node for LambdaExpr {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker) {
        self.environment = Some(Rc::clone(environment));

        let scope = Environment::child(environment);
        for parameter in self.parameters.iter_mut() {
            parameter.bind(&scope, type_checker);
        }
        self.body.bind(&scope, type_checker);

        let parameters = self
            .parameters
            .iter()
            .map(|parameter| parameter.get_type().cloned().unwrap_or_else(Type::invalid))
            .collect();
        self.ty = Some(Type::function(parameters, self.infer_return_type()));
        self.scope = Some(scope);
    }
}

/// Call Expression
/// Calls `callee` with `arguments`; has the callee's return type.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub ty: Option<Type>,
    pub span: Span,
    pub environment: Option<Rc<Environment>>,
}

impl CallExpr {
    pub fn new(span: Span, callee: Expr, arguments: Vec<Expr>) -> Self {
        CallExpr {
            callee: Box::new(callee),
            arguments,
            ty: None,
            span,
            environment: None,
        }
    }
}

impl Node for CallExpr {
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn get_environment(&self) -> Option<&Rc<Environment>> {
        self.environment.as_ref()
    }
    fn bind(&mut self, environment: &Rc<Environment>, type_checker: &mut TypeChecker) {
        self.environment = Some(Rc::clone(environment));
        self.ty = None;

        self.callee.bind(environment, type_checker);
        for argument in self.arguments.iter_mut() {
            argument.bind(environment, type_checker);
        }

        let function = match self.callee.try_get_type() {
            Some(Type::Function(function)) => function.clone(),
            Some(ty) if ty.is_invalid() => {
                self.ty = Some(Type::invalid());
                return;
            }
            Some(ty) => {
                type_checker.report(
                    ErrorImpl::NotCallable {
                        received: ty.to_string(),
                    },
                    &self.callee.get_span().start,
                );
                return;
            }
            // The callee's own bind already reported why it has no type.
            None => return,
        };

        let expected = function.parameters.len();
        let received = self.arguments.len();
        if received > expected {
            type_checker.report(
                ErrorImpl::UnexpectedArguments { expected, received },
                &self.arguments[expected].get_span().start,
            );
        } else if received < expected {
            type_checker.report(
                ErrorImpl::MissingArguments { expected, received },
                &self.span.end,
            );
        }

        for (parameter, argument) in function.parameters.iter().zip(self.arguments.iter()) {
            if let Some(argument_type) = argument.try_get_type() {
                if !is_assignable(parameter, argument_type) {
                    type_checker.report(
                        ErrorImpl::ArgumentTypeMatchError {
                            expected: parameter.to_string(),
                            received: argument_type.to_string(),
                        },
                        &argument.get_span().start,
                    );
                }
            }
        }

        self.ty = Some(*function.return_type);
    }
}
