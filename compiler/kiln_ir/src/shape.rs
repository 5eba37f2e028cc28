//! Type shapes and tri-state truth values.

use std::fmt;

/// Statically known shape of the value an expression produces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// A materialized, ordered sequence (result of the eager range builtin).
    List,
    /// A non-materialized range descriptor (result of the lazy range builtin).
    Range,
    Int,
    Float,
    Bool,
    Str,
    NoneType,
    /// Nothing is known about the value.
    Unknown,
}

impl TypeShape {
    /// Returns `true` if iterating a value of this shape can never fail.
    pub const fn is_known_iterable(self) -> bool {
        matches!(self, TypeShape::List | TypeShape::Range | TypeShape::Str)
    }

    /// Runtime type name, for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            TypeShape::List => "list",
            TypeShape::Range => "range",
            TypeShape::Int => "int",
            TypeShape::Float => "float",
            TypeShape::Bool => "bool",
            TypeShape::Str => "str",
            TypeShape::NoneType => "NoneType",
            TypeShape::Unknown => "<unknown>",
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compile-time truth value of an expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Truth {
    True,
    False,
    Unknown,
}

impl Truth {
    /// `None` maps to `Unknown`.
    pub const fn from_option(value: Option<bool>) -> Self {
        match value {
            Some(true) => Truth::True,
            Some(false) => Truth::False,
            None => Truth::Unknown,
        }
    }

    pub const fn to_option(self) -> Option<bool> {
        match self {
            Truth::True => Some(true),
            Truth::False => Some(false),
            Truth::Unknown => None,
        }
    }
}
