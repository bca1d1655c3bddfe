//! Primitive scalar kinds.

use std::fmt;

/// One of the four built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Bool,
    /// 32-bit signed integer.
    Int,
    /// 32-bit float.
    Float,
    String,
}

impl Primitive {
    pub const ALL: [Primitive; 4] = [
        Primitive::Bool,
        Primitive::Int,
        Primitive::Float,
        Primitive::String,
    ];

    /// Display spelling.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Bool => "Bool",
            Primitive::Int => "Int",
            Primitive::Float => "Float",
            Primitive::String => "String",
        }
    }

    /// Lookup key, see [`crate::normalize`].
    pub fn normalized_name(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::String => "string",
        }
    }

    /// Resolve a type name written in any case.
    pub fn from_name(name: &str) -> Option<Primitive> {
        Self::ALL
            .into_iter()
            .find(|p| p.normalized_name().eq_ignore_ascii_case(name))
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Primitive::Int | Primitive::Float)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(Primitive::from_name("INT"), Some(Primitive::Int));
        assert_eq!(Primitive::from_name("float"), Some(Primitive::Float));
        assert_eq!(Primitive::from_name("String"), Some(Primitive::String));
        assert_eq!(Primitive::from_name("Actor"), None);
    }

    #[test]
    fn numeric_kinds() {
        assert!(Primitive::Int.is_numeric());
        assert!(Primitive::Float.is_numeric());
        assert!(!Primitive::Bool.is_numeric());
        assert!(!Primitive::String.is_numeric());
    }
}
