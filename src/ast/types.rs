//! Type system definitions for the AST.
//!
//! This module defines the closed set of types the binder works with:
//!
//! - Primitive types (integers by signedness and width, booleans, void, null)
//! - Named types backed by a struct declaration
//! - Function types
//! - Unresolved type names that still need an environment to resolve against
//!
//! Two types are equal exactly when their canonical signatures (their
//! `Display` output) match. The invalid placeholder is the one exception:
//! it never compares equal to anything, itself included.

use std::fmt::Display;

use indexmap::IndexMap;
use lazy_static::lazy_static;

lazy_static! {
    /// Primitive types a program can spell by name, in the order the root
    /// environment declares them.
    pub static ref BUILTIN_TYPES: IndexMap<&'static str, PrimitiveType> = {
        let mut map = IndexMap::new();
        map.insert("i8", PrimitiveType::Int { signed: true, bits: 8 });
        map.insert("i16", PrimitiveType::Int { signed: true, bits: 16 });
        map.insert("i32", PrimitiveType::Int { signed: true, bits: 32 });
        map.insert("i64", PrimitiveType::Int { signed: true, bits: 64 });
        map.insert("u8", PrimitiveType::Int { signed: false, bits: 8 });
        map.insert("u16", PrimitiveType::Int { signed: false, bits: 16 });
        map.insert("u32", PrimitiveType::Int { signed: false, bits: 32 });
        map.insert("u64", PrimitiveType::Int { signed: false, bits: 64 });
        map.insert("bool", PrimitiveType::Boolean);
        map.insert("void", PrimitiveType::Void);
        map
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Int { signed: bool, bits: u16 },
    Boolean,
    Void,
    /// The type of the null expression, assignable to every type.
    Null,
    /// Placeholder left behind by a failed resolution.
    Invalid,
}

impl PrimitiveType {
    pub fn from_name(name: &str) -> Option<Self> {
        BUILTIN_TYPES.get(name).copied()
    }
}

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimitiveType::Int { signed: true, bits } => write!(f, "i{}", bits),
            PrimitiveType::Int { signed: false, bits } => write!(f, "u{}", bits),
            PrimitiveType::Boolean => write!(f, "bool"),
            PrimitiveType::Void => write!(f, "void"),
            PrimitiveType::Null => write!(f, "nulltype"),
            PrimitiveType::Invalid => write!(f, "<error>"),
        }
    }
}

/// A nominal type. Refers to its struct declaration by name only, so a
/// struct can mention its own type without owning itself.
#[derive(Debug, Clone)]
pub struct NamedType {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct FunctionType {
    pub parameters: Vec<Type>,
    pub return_type: Box<Type>,
}

/// A type annotation as written, before it has been looked up.
#[derive(Debug, Clone)]
pub struct UnresolvedType {
    pub name: String,
}

#[derive(Debug, Clone)]
pub enum Type {
    Primitive(PrimitiveType),
    Named(NamedType),
    Function(FunctionType),
    Unresolved(UnresolvedType),
}

impl Type {
    pub fn int(signed: bool, bits: u16) -> Self {
        Type::Primitive(PrimitiveType::Int { signed, bits })
    }

    pub fn boolean() -> Self {
        Type::Primitive(PrimitiveType::Boolean)
    }

    pub fn void() -> Self {
        Type::Primitive(PrimitiveType::Void)
    }

    pub fn null() -> Self {
        Type::Primitive(PrimitiveType::Null)
    }

    pub fn invalid() -> Self {
        Type::Primitive(PrimitiveType::Invalid)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(NamedType { name: name.into() })
    }

    pub fn function(parameters: Vec<Type>, return_type: Type) -> Self {
        Type::Function(FunctionType {
            parameters,
            return_type: Box::new(return_type),
        })
    }

    pub fn unresolved(name: impl Into<String>) -> Self {
        Type::Unresolved(UnresolvedType { name: name.into() })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Type::Primitive(PrimitiveType::Null))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Type::Primitive(PrimitiveType::Boolean))
    }

    /// Whether this type is, or contains, the invalid placeholder.
    pub fn is_invalid(&self) -> bool {
        match self {
            Type::Primitive(PrimitiveType::Invalid) => true,
            Type::Function(function) => {
                function.parameters.iter().any(Type::is_invalid) || function.return_type.is_invalid()
            }
            _ => false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        match self {
            Type::Unresolved(_) => false,
            Type::Function(function) => {
                function.parameters.iter().all(Type::is_resolved) && function.return_type.is_resolved()
            }
            _ => true,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Type::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Canonical textual form; the basis of type equality.
    pub fn signature(&self) -> String {
        self.to_string()
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Primitive(primitive) => write!(f, "{}", primitive),
            Type::Named(named) => write!(f, "{}", named.name),
            Type::Function(function) => {
                write!(f, "fn(")?;
                for (index, parameter) in function.parameters.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", parameter)?;
                }
                write!(f, ") -> {}", function.return_type)
            }
            Type::Unresolved(unresolved) => write!(f, "?{}", unresolved.name),
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        !self.is_invalid() && !other.is_invalid() && self.signature() == other.signature()
    }
}

impl From<PrimitiveType> for Type {
    fn from(primitive: PrimitiveType) -> Self {
        Type::Primitive(primitive)
    }
}
