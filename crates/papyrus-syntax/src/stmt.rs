//! Statement nodes found inside function and event bodies.

use papyrus_core::Span;

use crate::{AssignOp, Expr, NodeId, VariableDecl};

/// A statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'ast> {
    Expr(ExprStmt<'ast>),
    Return(ReturnStmt<'ast>),
    Assign(&'ast AssignStmt<'ast>),
    /// Block-local variable declaration.
    Variable(&'ast VariableDecl<'ast>),
    If(&'ast IfStmt<'ast>),
    While(&'ast WhileStmt<'ast>),
}

impl Stmt<'_> {
    pub fn id(&self) -> NodeId {
        match self {
            Stmt::Expr(s) => s.id,
            Stmt::Return(s) => s.id,
            Stmt::Assign(s) => s.id,
            Stmt::Variable(s) => s.id,
            Stmt::If(s) => s.id,
            Stmt::While(s) => s.id,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Stmt::Expr(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Assign(s) => s.span,
            Stmt::Variable(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::While(s) => s.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExprStmt<'ast> {
    pub id: NodeId,
    pub expr: Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStmt<'ast> {
    pub id: NodeId,
    pub value: Option<Expr<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignStmt<'ast> {
    pub id: NodeId,
    pub target: Expr<'ast>,
    pub op: AssignOp,
    pub value: Expr<'ast>,
    pub span: Span,
}

/// `if` with its `elseif` chain and optional `else`.
///
/// Each block introduces its own scope; all of them share the enclosing
/// scope as parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfStmt<'ast> {
    pub id: NodeId,
    pub condition: Expr<'ast>,
    pub body: &'ast [Stmt<'ast>],
    pub else_ifs: &'ast [ElseIfBlock<'ast>],
    pub else_block: Option<ElseBlock<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElseIfBlock<'ast> {
    pub id: NodeId,
    pub condition: Expr<'ast>,
    pub body: &'ast [Stmt<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElseBlock<'ast> {
    pub id: NodeId,
    pub body: &'ast [Stmt<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhileStmt<'ast> {
    pub id: NodeId,
    pub condition: Expr<'ast>,
    pub body: &'ast [Stmt<'ast>],
    pub span: Span,
}
