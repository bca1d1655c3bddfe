//! Node identity and the small leaf nodes shared by every other node kind.

use std::fmt;

use papyrus_core::Span;

/// Stable identity of a syntax node.
///
/// The checker keys its result tables by `NodeId`. Ids are unique within one
/// [`crate::AstBuilder`] and therefore within one checking run.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ident<'ast> {
    /// The identifier as written (allocated in the arena).
    pub name: &'ast str,
    pub span: Span,
}

impl<'ast> Ident<'ast> {
    pub fn new(name: &'ast str, span: Span) -> Self {
        Self { name, span }
    }
}

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A written type, e.g. `Int`, `Actor` or `Float[]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeRef<'ast> {
    pub name: Ident<'ast>,
    pub is_array: bool,
    pub span: Span,
}

impl fmt::Display for TypeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array {
            write!(f, "{}[]", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}
