use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{
        ast::{Expr, Node},
        types::{FunctionType, Type},
    },
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    Position,
};

use super::environment::{Environment, Symbol, SymbolKind};

/// State shared by every node during one bind pass.
#[derive(Debug, Default)]
pub struct TypeChecker {
    pub diagnostics: Diagnostics,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn report(&mut self, error: ErrorImpl, position: &Position) {
        self.diagnostics.record(Error::new(error, position.clone()));
    }

    /// Registers `symbol` in `environment`, reporting a duplicate instead of failing.
    pub fn declare(&mut self, environment: &Environment, symbol: Symbol, position: &Position) {
        if let Err(error) = environment.declare(symbol, position) {
            self.diagnostics.record(error);
        }
    }

    /// Turns every unresolved name inside `ty` into the type it denotes in
    /// `environment`. Already resolved types come back unchanged. A name
    /// that cannot be resolved is reported and becomes the invalid type.
    pub fn resolve_type(&mut self, ty: &Type, environment: &Rc<Environment>, position: &Position) -> Type {
        self.resolve_in(ty, environment, position, &mut vec![])
    }

    fn resolve_in(
        &mut self,
        ty: &Type,
        environment: &Rc<Environment>,
        position: &Position,
        aliases: &mut Vec<String>,
    ) -> Type {
        match ty {
            Type::Unresolved(unresolved) => {
                self.resolve_name(&unresolved.name, environment, position, aliases)
            }
            Type::Function(function) => Type::Function(FunctionType {
                parameters: function
                    .parameters
                    .iter()
                    .map(|parameter| self.resolve_in(parameter, environment, position, aliases))
                    .collect(),
                return_type: Box::new(self.resolve_in(&function.return_type, environment, position, aliases)),
            }),
            _ => ty.clone(),
        }
    }

    fn resolve_name(
        &mut self,
        name: &str,
        environment: &Rc<Environment>,
        position: &Position,
        aliases: &mut Vec<String>,
    ) -> Type {
        if aliases.iter().any(|alias| alias == name) {
            self.report(ErrorImpl::CyclicTypeAlias { name: name.to_string() }, position);
            return Type::invalid();
        }

        match environment.lookup_with_scope(name) {
            Some((symbol, scope)) => match symbol.kind {
                SymbolKind::Struct { ty } => ty,
                // The alias target is resolved where the alias was declared.
                SymbolKind::TypeAlias { ty } => {
                    aliases.push(name.to_string());
                    let resolved = self.resolve_in(&ty, &scope, position, aliases);
                    aliases.pop();
                    resolved
                }
                SymbolKind::Variable { .. } => {
                    self.report(ErrorImpl::NotAType { name: name.to_string() }, position);
                    Type::invalid()
                }
            },
            None => {
                self.report(ErrorImpl::UnknownType { type_: name.to_string() }, position);
                Type::invalid()
            }
        }
    }

    /// Checks that a value of type `received` may be stored where `expected`
    /// is required, reporting a `TypeMatchError` if not.
    pub fn check_assignable(&mut self, expected: &Type, received: &Type, position: &Position) -> bool {
        if is_assignable(expected, received) {
            return true;
        }
        self.report(
            ErrorImpl::TypeMatchError {
                expected: expected.to_string(),
                received: received.to_string(),
            },
            position,
        );
        false
    }

    /// Branch and loop conditions must be boolean. Conditions without a type
    /// have already been reported.
    pub fn check_condition(&mut self, condition: &Expr) {
        if let Some(ty) = condition.try_get_type() {
            if !ty.is_boolean() && !ty.is_invalid() {
                self.report(
                    ErrorImpl::ConditionNotBoolean { received: ty.to_string() },
                    &condition.get_span().start,
                );
            }
        }
    }
}

/// The null type fits anywhere; otherwise the types must be equal. Types
/// that already failed to resolve are let through, their failure having
/// been reported where it happened.
pub fn is_assignable(expected: &Type, received: &Type) -> bool {
    received.is_null() || expected.is_invalid() || received.is_invalid() || expected == received
}

/// Binds `ast` into `environment` and returns the checker holding every
/// diagnostic the pass raised.
pub fn type_check<T: Node>(ast: &mut T, environment: &Rc<Environment>) -> TypeChecker {
    let mut type_checker = TypeChecker::new();
    ast.bind(environment, &mut type_checker);
    debug!(diagnostics = type_checker.diagnostics.len(), "type check finished");
    type_checker
}
