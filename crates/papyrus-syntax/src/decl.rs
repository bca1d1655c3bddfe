//! Declaration nodes: scripts and their members.

use bitflags::bitflags;
use papyrus_core::{InvokableKind, Span};

use crate::{Expr, Ident, LiteralExpr, NodeId, Stmt, TypeRef};

/// One script: a named object type with its members.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Script<'ast> {
    pub id: NodeId,
    /// Source file the script was parsed from.
    pub file: &'ast str,
    pub name: Ident<'ast>,
    /// The script named after `extends`.
    pub parent: Option<Ident<'ast>>,
    pub members: &'ast [Member<'ast>],
    pub span: Span,
}

/// A top-level statement of a script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Member<'ast> {
    Import(ImportDecl<'ast>),
    Comment(CommentNode<'ast>),
    Variable(&'ast VariableDecl<'ast>),
    Property(&'ast PropertyDecl<'ast>),
    State(&'ast StateDecl<'ast>),
    /// A function or event declared outside any explicit state.
    Invokable(&'ast InvokableDecl<'ast>),
}

impl Member<'_> {
    pub fn span(&self) -> Span {
        match self {
            Member::Import(m) => m.span,
            Member::Comment(m) => m.span,
            Member::Variable(m) => m.span,
            Member::Property(m) => m.span,
            Member::State(m) => m.span,
            Member::Invokable(m) => m.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportDecl<'ast> {
    pub id: NodeId,
    pub name: Ident<'ast>,
    pub span: Span,
}

/// A doc comment kept by the parser for tooling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommentNode<'ast> {
    pub id: NodeId,
    pub text: &'ast str,
    pub span: Span,
}

/// A variable, either script-level or block-local.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableDecl<'ast> {
    pub id: NodeId,
    pub ty: TypeRef<'ast>,
    pub name: Ident<'ast>,
    pub initial: Option<Expr<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Backed by a hidden variable, readable and writable.
    Auto,
    /// Backed by a hidden variable, fixed at its initial value.
    AutoReadOnly,
    /// Backed by explicit `Get`/`Set` functions.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDecl<'ast> {
    pub id: NodeId,
    pub ty: TypeRef<'ast>,
    pub name: Ident<'ast>,
    pub kind: PropertyKind,
    /// Initial value of an auto property.
    pub initial: Option<LiteralExpr<'ast>>,
    /// Accessor functions of a full property.
    pub accessors: &'ast [&'ast InvokableDecl<'ast>],
    pub span: Span,
}

impl PropertyDecl<'_> {
    pub fn is_full(&self) -> bool {
        self.kind == PropertyKind::Full
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateDecl<'ast> {
    pub id: NodeId,
    pub name: Ident<'ast>,
    /// The state the object starts in.
    pub is_auto: bool,
    pub invokables: &'ast [&'ast InvokableDecl<'ast>],
    pub span: Span,
}

bitflags! {
    /// Modifiers written after a function or event header.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InvokableFlags: u8 {
        /// Implemented by the engine; has no body.
        const NATIVE = 1 << 0;
        /// Callable without an object.
        const GLOBAL = 1 << 1;
    }
}

/// A function or event declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvokableDecl<'ast> {
    pub id: NodeId,
    pub kind: InvokableKind,
    pub name: Ident<'ast>,
    /// Always `None` for events.
    pub return_type: Option<TypeRef<'ast>>,
    pub params: &'ast [ParamDecl<'ast>],
    pub flags: InvokableFlags,
    /// `None` for native declarations.
    pub body: Option<&'ast [Stmt<'ast>]>,
    pub span: Span,
}

impl InvokableDecl<'_> {
    pub fn is_native(&self) -> bool {
        self.flags.contains(InvokableFlags::NATIVE)
    }

    pub fn is_global(&self) -> bool {
        self.flags.contains(InvokableFlags::GLOBAL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDecl<'ast> {
    pub id: NodeId,
    pub ty: TypeRef<'ast>,
    pub name: Ident<'ast>,
    pub default: Option<LiteralExpr<'ast>>,
    pub span: Span,
}
