//! Expression nodes.
//!
//! Every expression carries a [`NodeId`] so the checker can record its type.
//! Compound variants point into the arena, which keeps `Expr` itself `Copy`.

use papyrus_core::Span;

use crate::{BinaryOp, Ident, NodeId, TypeRef, UnaryOp};

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    /// A bare name: variable, parameter, property or function.
    Ident(IdentExpr<'ast>),
    /// `base.member`
    Access(&'ast AccessExpr<'ast>),
    /// `base[index]`
    Index(&'ast IndexExpr<'ast>),
    /// `expr as Type`
    Cast(&'ast CastExpr<'ast>),
    Unary(&'ast UnaryExpr<'ast>),
    Binary(&'ast BinaryExpr<'ast>),
    /// `callee(args...)`
    Call(&'ast CallExpr<'ast>),
    /// `new Type[length]`
    NewArray(&'ast NewArrayExpr<'ast>),
    Literal(LiteralExpr<'ast>),
    /// `( inner )`
    Paren(&'ast ParenExpr<'ast>),
    /// `Self`
    SelfRef(KeywordExpr),
    /// `Parent`
    Parent(KeywordExpr),
}

impl<'ast> Expr<'ast> {
    pub fn id(&self) -> NodeId {
        match self {
            Self::Ident(e) => e.id,
            Self::Access(e) => e.id,
            Self::Index(e) => e.id,
            Self::Cast(e) => e.id,
            Self::Unary(e) => e.id,
            Self::Binary(e) => e.id,
            Self::Call(e) => e.id,
            Self::NewArray(e) => e.id,
            Self::Literal(e) => e.id,
            Self::Paren(e) => e.id,
            Self::SelfRef(e) | Self::Parent(e) => e.id,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Ident(e) => e.name.span,
            Self::Access(e) => e.span,
            Self::Index(e) => e.span,
            Self::Cast(e) => e.span,
            Self::Unary(e) => e.span,
            Self::Binary(e) => e.span,
            Self::Call(e) => e.span,
            Self::NewArray(e) => e.span,
            Self::Literal(e) => e.span,
            Self::Paren(e) => e.span,
            Self::SelfRef(e) | Self::Parent(e) => e.span,
        }
    }

    /// Strip any enclosing parentheses.
    pub fn unparenthesized(&self) -> &Expr<'ast> {
        let mut expr = self;
        while let Expr::Paren(paren) = expr {
            expr = &paren.inner;
        }
        expr
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdentExpr<'ast> {
    pub id: NodeId,
    pub name: Ident<'ast>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessExpr<'ast> {
    pub id: NodeId,
    pub base: Expr<'ast>,
    pub member: Ident<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexExpr<'ast> {
    pub id: NodeId,
    pub base: Expr<'ast>,
    pub index: Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastExpr<'ast> {
    pub id: NodeId,
    pub expr: Expr<'ast>,
    pub target: TypeRef<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnaryExpr<'ast> {
    pub id: NodeId,
    pub op: UnaryOp,
    pub operand: Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpr<'ast> {
    pub id: NodeId,
    pub left: Expr<'ast>,
    pub op: BinaryOp,
    pub right: Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpr<'ast> {
    pub id: NodeId,
    /// An [`Expr::Ident`] or [`Expr::Access`] naming a function.
    pub callee: Expr<'ast>,
    pub args: &'ast [Expr<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewArrayExpr<'ast> {
    pub id: NodeId,
    /// Element type; `is_array` is never set here.
    pub element: TypeRef<'ast>,
    pub length: LiteralExpr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParenExpr<'ast> {
    pub id: NodeId,
    pub inner: Expr<'ast>,
    pub span: Span,
}

/// `Self` or `Parent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordExpr {
    pub id: NodeId,
    pub span: Span,
}

/// A literal, still in its source spelling.
///
/// The checker parses `text` according to `kind`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiteralExpr<'ast> {
    pub id: NodeId,
    pub kind: LiteralKind,
    pub text: &'ast str,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Bool,
    Int,
    Float,
    String,
    /// The `none` keyword.
    None,
}
