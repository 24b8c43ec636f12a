use std::{cell::RefCell, rc::Rc};

use indexmap::IndexMap;
use tracing::trace;

use crate::{
    ast::types::{Type, BUILTIN_TYPES},
    errors::errors::{Error, ErrorImpl},
    Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modifier {
    #[default]
    Private,
    Public,
}

#[derive(Debug, Clone)]
pub enum SymbolKind {
    Variable { ty: Type, mutable: bool },
    TypeAlias { ty: Type },
    /// `ty` is the struct's own named type.
    Struct { ty: Type },
}

/// What a scope records about one declaration.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub modifier: Modifier,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn variable(name: impl Into<String>, ty: Type, mutable: bool) -> Self {
        Symbol {
            name: name.into(),
            modifier: Modifier::default(),
            kind: SymbolKind::Variable { ty, mutable },
        }
    }

    pub fn type_alias(name: impl Into<String>, ty: Type) -> Self {
        Symbol {
            name: name.into(),
            modifier: Modifier::default(),
            kind: SymbolKind::TypeAlias { ty },
        }
    }

    pub fn structure(name: impl Into<String>) -> Self {
        let name = name.into();
        Symbol {
            kind: SymbolKind::Struct {
                ty: Type::named(name.clone()),
            },
            name,
            modifier: Modifier::default(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }
}

// Declarations are identified by name alone.
impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// One lexical scope: an ordered name table chained to its enclosing scope.
#[derive(Debug, Default)]
pub struct Environment {
    symbols: RefCell<IndexMap<String, Symbol>>,
    parent: Option<Rc<Environment>>,
    depth: usize,
}

impl Environment {
    /// An empty root scope.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment::default())
    }

    /// The root scope with every built-in primitive type declared.
    pub fn universe() -> Rc<Self> {
        let mut symbols = IndexMap::new();
        for (name, primitive) in BUILTIN_TYPES.iter() {
            symbols.insert(
                name.to_string(),
                Symbol::type_alias(*name, Type::Primitive(*primitive)).with_modifier(Modifier::Public),
            );
        }

        Rc::new(Environment {
            symbols: RefCell::new(symbols),
            parent: None,
            depth: 0,
        })
    }

    pub fn child(parent: &Rc<Environment>) -> Rc<Self> {
        trace!(depth = parent.depth + 1, "opening scope");
        Rc::new(Environment {
            symbols: RefCell::new(IndexMap::new()),
            parent: Some(Rc::clone(parent)),
            depth: parent.depth + 1,
        })
    }

    pub fn parent(&self) -> Option<&Rc<Environment>> {
        self.parent.as_ref()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Registers `symbol` in this scope. A name may only be declared once
    /// per scope; the first declaration is kept.
    pub fn declare(&self, symbol: Symbol, position: &Position) -> Result<(), Error> {
        let mut symbols = self.symbols.borrow_mut();
        if symbols.contains_key(&symbol.name) {
            Err(Error::new(
                ErrorImpl::AlreadyDeclared { name: symbol.name },
                position.clone(),
            ))
        } else {
            symbols.insert(symbol.name.clone(), symbol);
            Ok(())
        }
    }

    pub fn get_local(&self, name: &str) -> Option<Symbol> {
        self.symbols.borrow().get(name).cloned()
    }

    /// Finds the nearest declaration of `name`, walking outwards to the root.
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        let mut current = Some(self);
        while let Some(environment) = current {
            if let Some(symbol) = environment.get_local(name) {
                return Some(symbol);
            }
            current = environment.parent.as_deref();
        }
        None
    }

    /// Like `lookup`, but also returns the scope the declaration lives in.
    pub fn lookup_with_scope(self: &Rc<Self>, name: &str) -> Option<(Symbol, Rc<Environment>)> {
        let mut current = Some(Rc::clone(self));
        while let Some(environment) = current {
            if let Some(symbol) = environment.get_local(name) {
                return Some((symbol, environment));
            }
            current = environment.parent.clone();
        }
        None
    }

    /// Names declared directly in this scope, in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.symbols.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.symbols.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.borrow().is_empty()
    }
}
