//! Programmatic construction of syntax trees.
//!
//! Parsing happens outside this workspace. `AstBuilder` is how hosts, tests
//! and benchmarks hand-assemble trees: it allocates nodes in a bumpalo arena,
//! hands out fresh [`NodeId`]s and gives every node its own synthetic line so
//! that diagnostics point at distinct locations.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use papyrus_syntax::{AstBuilder, Expr};
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let body = [b.ret(Some(Expr::Literal(b.int_lit("0x1A"))))];
//! let get = b.function("GetValue", Some(b.ty("Int")), &[], &body);
//! let script = b.script("counter.psc", "Counter", None, &[get.into()]);
//! assert_eq!(script.members.len(), 1);
//! ```

use std::cell::Cell;

use bumpalo::Bump;
use papyrus_core::{InvokableKind, Span};

use crate::{
    AccessExpr, AssignOp, AssignStmt, BinaryExpr, BinaryOp, CallExpr, CastExpr, CommentNode,
    ElseBlock, ElseIfBlock, Expr, ExprStmt, Ident, IdentExpr, IfStmt, ImportDecl, IndexExpr,
    InvokableDecl, InvokableFlags, KeywordExpr, LiteralExpr, LiteralKind, Member, NewArrayExpr,
    NodeId, ParamDecl, ParenExpr, PropertyDecl, PropertyKind, ReturnStmt, Script, StateDecl, Stmt,
    TypeRef, UnaryExpr, UnaryOp, VariableDecl, WhileStmt,
};

/// Allocates syntax nodes with unique ids.
pub struct AstBuilder<'ast> {
    arena: &'ast Bump,
    next_id: Cell<u32>,
    next_line: Cell<u32>,
}

impl<'ast> AstBuilder<'ast> {
    pub fn new(arena: &'ast Bump) -> Self {
        Self {
            arena,
            next_id: Cell::new(0),
            next_line: Cell::new(1),
        }
    }

    /// Number of ids handed out so far.
    pub fn node_count(&self) -> u32 {
        self.next_id.get()
    }

    fn id(&self) -> NodeId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        NodeId::new(id)
    }

    fn span(&self, len: usize) -> Span {
        let line = self.next_line.get();
        self.next_line.set(line + 1);
        Span::new(line, 1, len as u32)
    }

    fn alloc_str(&self, text: &str) -> &'ast str {
        self.arena.alloc_str(text)
    }

    fn slice<T: Copy>(&self, items: &[T]) -> &'ast [T] {
        self.arena.alloc_slice_copy(items)
    }

    // ========================================================================
    // Leaves
    // ========================================================================

    pub fn ident(&self, name: &str) -> Ident<'ast> {
        Ident::new(self.alloc_str(name), self.span(name.len()))
    }

    pub fn ty(&self, name: &str) -> TypeRef<'ast> {
        let name = self.ident(name);
        TypeRef {
            name,
            is_array: false,
            span: name.span,
        }
    }

    pub fn array_ty(&self, name: &str) -> TypeRef<'ast> {
        TypeRef {
            is_array: true,
            ..self.ty(name)
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub fn script(
        &self,
        file: &str,
        name: &str,
        parent: Option<&str>,
        members: &[Member<'ast>],
    ) -> &'ast Script<'ast> {
        self.arena.alloc(Script {
            id: self.id(),
            file: self.alloc_str(file),
            name: self.ident(name),
            parent: parent.map(|p| self.ident(p)),
            members: self.slice(members),
            span: self.span(name.len()),
        })
    }

    pub fn import(&self, name: &str) -> Member<'ast> {
        Member::Import(ImportDecl {
            id: self.id(),
            name: self.ident(name),
            span: self.span(name.len()),
        })
    }

    pub fn comment(&self, text: &str) -> Member<'ast> {
        Member::Comment(CommentNode {
            id: self.id(),
            text: self.alloc_str(text),
            span: self.span(text.len()),
        })
    }

    pub fn variable(
        &self,
        ty: TypeRef<'ast>,
        name: &str,
        initial: Option<Expr<'ast>>,
    ) -> &'ast VariableDecl<'ast> {
        self.arena.alloc(VariableDecl {
            id: self.id(),
            ty,
            name: self.ident(name),
            initial,
            span: self.span(name.len()),
        })
    }

    /// An `Auto` property.
    pub fn property(
        &self,
        ty: TypeRef<'ast>,
        name: &str,
        initial: Option<LiteralExpr<'ast>>,
    ) -> &'ast PropertyDecl<'ast> {
        self.property_of_kind(ty, name, PropertyKind::Auto, initial, &[])
    }

    pub fn read_only_property(
        &self,
        ty: TypeRef<'ast>,
        name: &str,
        initial: LiteralExpr<'ast>,
    ) -> &'ast PropertyDecl<'ast> {
        self.property_of_kind(ty, name, PropertyKind::AutoReadOnly, Some(initial), &[])
    }

    pub fn full_property(
        &self,
        ty: TypeRef<'ast>,
        name: &str,
        accessors: &[&'ast InvokableDecl<'ast>],
    ) -> &'ast PropertyDecl<'ast> {
        self.property_of_kind(ty, name, PropertyKind::Full, None, accessors)
    }

    fn property_of_kind(
        &self,
        ty: TypeRef<'ast>,
        name: &str,
        kind: PropertyKind,
        initial: Option<LiteralExpr<'ast>>,
        accessors: &[&'ast InvokableDecl<'ast>],
    ) -> &'ast PropertyDecl<'ast> {
        self.arena.alloc(PropertyDecl {
            id: self.id(),
            ty,
            name: self.ident(name),
            kind,
            initial,
            accessors: self.slice(accessors),
            span: self.span(name.len()),
        })
    }

    pub fn state(
        &self,
        name: &str,
        is_auto: bool,
        invokables: &[&'ast InvokableDecl<'ast>],
    ) -> &'ast StateDecl<'ast> {
        self.arena.alloc(StateDecl {
            id: self.id(),
            name: self.ident(name),
            is_auto,
            invokables: self.slice(invokables),
            span: self.span(name.len()),
        })
    }

    pub fn function(
        &self,
        name: &str,
        return_type: Option<TypeRef<'ast>>,
        params: &[ParamDecl<'ast>],
        body: &[Stmt<'ast>],
    ) -> &'ast InvokableDecl<'ast> {
        let body = self.slice(body);
        self.invokable(
            InvokableKind::Function,
            name,
            return_type,
            params,
            InvokableFlags::empty(),
            Some(body),
        )
    }

    pub fn native_function(
        &self,
        name: &str,
        return_type: Option<TypeRef<'ast>>,
        params: &[ParamDecl<'ast>],
    ) -> &'ast InvokableDecl<'ast> {
        self.invokable(
            InvokableKind::Function,
            name,
            return_type,
            params,
            InvokableFlags::NATIVE,
            None,
        )
    }

    pub fn event(
        &self,
        name: &str,
        params: &[ParamDecl<'ast>],
        body: &[Stmt<'ast>],
    ) -> &'ast InvokableDecl<'ast> {
        let body = self.slice(body);
        self.invokable(
            InvokableKind::Event,
            name,
            None,
            params,
            InvokableFlags::empty(),
            Some(body),
        )
    }

    pub fn native_event(&self, name: &str, params: &[ParamDecl<'ast>]) -> &'ast InvokableDecl<'ast> {
        self.invokable(
            InvokableKind::Event,
            name,
            None,
            params,
            InvokableFlags::NATIVE,
            None,
        )
    }

    /// Fully general function or event constructor.
    pub fn invokable(
        &self,
        kind: InvokableKind,
        name: &str,
        return_type: Option<TypeRef<'ast>>,
        params: &[ParamDecl<'ast>],
        flags: InvokableFlags,
        body: Option<&'ast [Stmt<'ast>]>,
    ) -> &'ast InvokableDecl<'ast> {
        self.arena.alloc(InvokableDecl {
            id: self.id(),
            kind,
            name: self.ident(name),
            return_type,
            params: self.slice(params),
            flags,
            body,
            span: self.span(name.len()),
        })
    }

    pub fn param(&self, ty: TypeRef<'ast>, name: &str) -> ParamDecl<'ast> {
        ParamDecl {
            id: self.id(),
            ty,
            name: self.ident(name),
            default: None,
            span: self.span(name.len()),
        }
    }

    pub fn param_with_default(
        &self,
        ty: TypeRef<'ast>,
        name: &str,
        default: LiteralExpr<'ast>,
    ) -> ParamDecl<'ast> {
        ParamDecl {
            default: Some(default),
            ..self.param(ty, name)
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn expr_stmt(&self, expr: Expr<'ast>) -> Stmt<'ast> {
        Stmt::Expr(ExprStmt {
            id: self.id(),
            expr,
            span: expr.span(),
        })
    }

    pub fn ret(&self, value: Option<Expr<'ast>>) -> Stmt<'ast> {
        Stmt::Return(ReturnStmt {
            id: self.id(),
            value,
            span: self.span("return".len()),
        })
    }

    pub fn assign(&self, target: Expr<'ast>, value: Expr<'ast>) -> Stmt<'ast> {
        self.compound_assign(target, AssignOp::Assign, value)
    }

    pub fn compound_assign(&self, target: Expr<'ast>, op: AssignOp, value: Expr<'ast>) -> Stmt<'ast> {
        Stmt::Assign(self.arena.alloc(AssignStmt {
            id: self.id(),
            target,
            op,
            value,
            span: target.span().to(value.span()),
        }))
    }

    /// A block-local variable declaration.
    pub fn local(&self, ty: TypeRef<'ast>, name: &str, initial: Option<Expr<'ast>>) -> Stmt<'ast> {
        Stmt::Variable(self.variable(ty, name, initial))
    }

    pub fn if_stmt(
        &self,
        condition: Expr<'ast>,
        body: &[Stmt<'ast>],
        else_ifs: &[ElseIfBlock<'ast>],
        else_block: Option<ElseBlock<'ast>>,
    ) -> Stmt<'ast> {
        Stmt::If(self.arena.alloc(IfStmt {
            id: self.id(),
            condition,
            body: self.slice(body),
            else_ifs: self.slice(else_ifs),
            else_block,
            span: self.span("if".len()),
        }))
    }

    pub fn else_if(&self, condition: Expr<'ast>, body: &[Stmt<'ast>]) -> ElseIfBlock<'ast> {
        ElseIfBlock {
            id: self.id(),
            condition,
            body: self.slice(body),
            span: self.span("elseif".len()),
        }
    }

    pub fn else_block(&self, body: &[Stmt<'ast>]) -> ElseBlock<'ast> {
        ElseBlock {
            id: self.id(),
            body: self.slice(body),
            span: self.span("else".len()),
        }
    }

    pub fn while_stmt(&self, condition: Expr<'ast>, body: &[Stmt<'ast>]) -> Stmt<'ast> {
        Stmt::While(self.arena.alloc(WhileStmt {
            id: self.id(),
            condition,
            body: self.slice(body),
            span: self.span("while".len()),
        }))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub fn name(&self, name: &str) -> Expr<'ast> {
        Expr::Ident(IdentExpr {
            id: self.id(),
            name: self.ident(name),
        })
    }

    pub fn access(&self, base: Expr<'ast>, member: &str) -> Expr<'ast> {
        let member = self.ident(member);
        Expr::Access(self.arena.alloc(AccessExpr {
            id: self.id(),
            base,
            member,
            span: base.span().to(member.span),
        }))
    }

    pub fn index(&self, base: Expr<'ast>, index: Expr<'ast>) -> Expr<'ast> {
        Expr::Index(self.arena.alloc(IndexExpr {
            id: self.id(),
            base,
            index,
            span: base.span().to(index.span()),
        }))
    }

    pub fn cast(&self, expr: Expr<'ast>, target: TypeRef<'ast>) -> Expr<'ast> {
        Expr::Cast(self.arena.alloc(CastExpr {
            id: self.id(),
            expr,
            target,
            span: expr.span().to(target.span),
        }))
    }

    pub fn unary(&self, op: UnaryOp, operand: Expr<'ast>) -> Expr<'ast> {
        Expr::Unary(self.arena.alloc(UnaryExpr {
            id: self.id(),
            op,
            operand,
            span: operand.span(),
        }))
    }

    pub fn neg(&self, operand: Expr<'ast>) -> Expr<'ast> {
        self.unary(UnaryOp::Neg, operand)
    }

    pub fn not(&self, operand: Expr<'ast>) -> Expr<'ast> {
        self.unary(UnaryOp::Not, operand)
    }

    pub fn binary(&self, left: Expr<'ast>, op: BinaryOp, right: Expr<'ast>) -> Expr<'ast> {
        Expr::Binary(self.arena.alloc(BinaryExpr {
            id: self.id(),
            left,
            op,
            right,
            span: left.span().to(right.span()),
        }))
    }

    pub fn call(&self, callee: Expr<'ast>, args: &[Expr<'ast>]) -> Expr<'ast> {
        Expr::Call(self.arena.alloc(CallExpr {
            id: self.id(),
            callee,
            args: self.slice(args),
            span: callee.span(),
        }))
    }

    /// `name(args...)`
    pub fn call_named(&self, name: &str, args: &[Expr<'ast>]) -> Expr<'ast> {
        let callee = self.name(name);
        self.call(callee, args)
    }

    /// `base.name(args...)`
    pub fn method(&self, base: Expr<'ast>, name: &str, args: &[Expr<'ast>]) -> Expr<'ast> {
        let callee = self.access(base, name);
        self.call(callee, args)
    }

    pub fn new_array(&self, element: &str, length: &str) -> Expr<'ast> {
        let element = self.ty(element);
        let length = self.int_lit(length);
        Expr::NewArray(self.arena.alloc(NewArrayExpr {
            id: self.id(),
            element,
            length,
            span: element.span.to(length.span),
        }))
    }

    pub fn paren(&self, inner: Expr<'ast>) -> Expr<'ast> {
        Expr::Paren(self.arena.alloc(ParenExpr {
            id: self.id(),
            inner,
            span: inner.span(),
        }))
    }

    pub fn self_ref(&self) -> Expr<'ast> {
        Expr::SelfRef(KeywordExpr {
            id: self.id(),
            span: self.span("self".len()),
        })
    }

    pub fn parent_ref(&self) -> Expr<'ast> {
        Expr::Parent(KeywordExpr {
            id: self.id(),
            span: self.span("parent".len()),
        })
    }

    pub fn literal(&self, kind: LiteralKind, text: &str) -> LiteralExpr<'ast> {
        LiteralExpr {
            id: self.id(),
            kind,
            text: self.alloc_str(text),
            span: self.span(text.len()),
        }
    }

    pub fn bool_lit(&self, text: &str) -> LiteralExpr<'ast> {
        self.literal(LiteralKind::Bool, text)
    }

    pub fn int_lit(&self, text: &str) -> LiteralExpr<'ast> {
        self.literal(LiteralKind::Int, text)
    }

    pub fn float_lit(&self, text: &str) -> LiteralExpr<'ast> {
        self.literal(LiteralKind::Float, text)
    }

    /// `text` is the quoted source spelling, e.g. `"\"hi\""`.
    pub fn string_lit(&self, text: &str) -> LiteralExpr<'ast> {
        self.literal(LiteralKind::String, text)
    }

    pub fn none_lit(&self) -> LiteralExpr<'ast> {
        self.literal(LiteralKind::None, "none")
    }

    pub fn int(&self, text: &str) -> Expr<'ast> {
        Expr::Literal(self.int_lit(text))
    }

    pub fn float(&self, text: &str) -> Expr<'ast> {
        Expr::Literal(self.float_lit(text))
    }

    pub fn boolean(&self, text: &str) -> Expr<'ast> {
        Expr::Literal(self.bool_lit(text))
    }

    pub fn string(&self, text: &str) -> Expr<'ast> {
        Expr::Literal(self.string_lit(text))
    }

    pub fn none(&self) -> Expr<'ast> {
        Expr::Literal(self.none_lit())
    }
}

impl<'ast> From<&'ast VariableDecl<'ast>> for Member<'ast> {
    fn from(value: &'ast VariableDecl<'ast>) -> Self {
        Member::Variable(value)
    }
}

impl<'ast> From<&'ast PropertyDecl<'ast>> for Member<'ast> {
    fn from(value: &'ast PropertyDecl<'ast>) -> Self {
        Member::Property(value)
    }
}

impl<'ast> From<&'ast StateDecl<'ast>> for Member<'ast> {
    fn from(value: &'ast StateDecl<'ast>) -> Self {
        Member::State(value)
    }
}

impl<'ast> From<&'ast InvokableDecl<'ast>> for Member<'ast> {
    fn from(value: &'ast InvokableDecl<'ast>) -> Self {
        Member::Invokable(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_sequential() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let x = b.name("x");
        let y = b.name("y");
        assert_ne!(x.id(), y.id());
        assert_eq!(b.node_count(), 2);
    }

    #[test]
    fn spans_are_distinct() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let a = b.name("a");
        let c = b.name("c");
        assert_ne!(a.span(), c.span());
    }

    #[test]
    fn builds_script_with_state() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let on_init = b.event("OnInit", &[], &[]);
        let busy = b.state("Busy", false, &[on_init]);
        let script = b.script("quest.psc", "MyQuest", Some("Quest"), &[busy.into()]);

        assert_eq!(script.name.name, "MyQuest");
        assert_eq!(script.parent.map(|p| p.name), Some("Quest"));
        assert!(matches!(script.members[0], Member::State(s) if s.invokables.len() == 1));
    }

    #[test]
    fn native_invokables_have_no_body() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let f = b.native_function("GetActor", Some(b.ty("Actor")), &[]);
        assert!(f.is_native());
        assert!(f.body.is_none());
    }

    #[test]
    fn unparenthesized_strips_nesting() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let inner = b.name("x");
        let wrapped = b.paren(b.paren(inner));
        assert_eq!(wrapped.unparenthesized().id(), inner.id());
    }
}
