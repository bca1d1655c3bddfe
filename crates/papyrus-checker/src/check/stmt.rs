//! Body pass: parameters, block scopes and statements.

use papyrus_core::{CheckError, Span, Type};
use papyrus_syntax::{AssignStmt, Expr, IfStmt, NodeId, ReturnStmt, Stmt, WhileStmt};
use tracing::trace;

use super::operators::{binary_result, is_acceptable};
use super::{CheckContext, PendingBody};
use crate::scope::{Declaration, ScopeId, ScopeKind, SymbolKind};

impl<'ast> CheckContext<'_, 'ast> {
    /// Check every body queued by the member pass, in declaration order.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub(super) fn check_bodies(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        trace!(bodies = pending.len(), "checking bodies");
        for body in pending {
            self.check_invokable_body(body);
        }
    }

    fn check_invokable_body(&mut self, pending: PendingBody<'ast>) {
        self.enter_script(pending.file, pending.script);
        let decl = pending.decl;

        for (param, ty) in decl.params.iter().zip(pending.params) {
            let Some(ty) = ty else {
                self.result.record_symbol(param.id, None);
                continue;
            };
            let declaration = Declaration::new(SymbolKind::Parameter, param.name.name, param.name.span)
                .with_type(ty)
                .with_node(param.id);
            let symbol = self.declare_in(pending.scope, declaration);
            self.result.record_symbol(param.id, symbol);
        }

        if let Some(body) = decl.body {
            self.check_block(pending.scope, body);
        }
    }

    fn check_block(&mut self, scope: ScopeId, body: &'ast [Stmt<'ast>]) {
        for stmt in body {
            self.check_stmt(scope, stmt);
        }
    }

    fn check_stmt(&mut self, scope: ScopeId, stmt: &'ast Stmt<'ast>) {
        match stmt {
            Stmt::Expr(s) => {
                self.type_of(scope, &s.expr);
            }
            Stmt::Return(s) => self.check_return(scope, s),
            Stmt::Assign(s) => self.check_assign(scope, s),
            Stmt::Variable(variable) => {
                self.declare_variable(scope, *variable);
            }
            Stmt::If(s) => self.check_if(scope, s),
            Stmt::While(s) => self.check_while(scope, s),
        }
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    /// Each branch gets its own scope under `scope`. Conditions are typed in
    /// `scope` itself.
    fn check_if(&mut self, scope: ScopeId, stmt: &'ast IfStmt<'ast>) {
        self.type_of(scope, &stmt.condition);
        if let Some(block) = self.open_block(scope, ScopeKind::If, stmt.id, stmt.span) {
            self.check_block(block, stmt.body);
        }

        for branch in stmt.else_ifs {
            self.type_of(scope, &branch.condition);
            if let Some(block) = self.open_block(scope, ScopeKind::ElseIf, branch.id, branch.span) {
                self.check_block(block, branch.body);
            }
        }

        if let Some(branch) = &stmt.else_block {
            if let Some(block) = self.open_block(scope, ScopeKind::Else, branch.id, branch.span) {
                self.check_block(block, branch.body);
            }
        }
    }

    fn check_while(&mut self, scope: ScopeId, stmt: &'ast WhileStmt<'ast>) {
        self.type_of(scope, &stmt.condition);
        if let Some(block) = self.open_block(scope, ScopeKind::While, stmt.id, stmt.span) {
            self.check_block(block, stmt.body);
        }
    }

    fn open_block(
        &mut self,
        parent: ScopeId,
        kind: ScopeKind,
        node: NodeId,
        span: Span,
    ) -> Option<ScopeId> {
        match self.tree_mut().create_anonymous(parent, kind, node, span) {
            Ok(block) => {
                self.result.record_scope(node, block);
                Some(block)
            }
            Err(error) => self.fail(error),
        }
    }

    // ========================================================================
    // Stores
    // ========================================================================

    fn check_assign(&mut self, scope: ScopeId, stmt: &'ast AssignStmt<'ast>) {
        let target = self.type_of(scope, &stmt.target);
        let value = self.type_of(scope, &stmt.value);
        if !self.options.validate_operators {
            return;
        }

        if !matches!(
            stmt.target.unparenthesized(),
            Expr::Ident(_) | Expr::Access(_) | Expr::Index(_)
        ) {
            self.report(CheckError::NotAssignable {
                span: stmt.target.span(),
            });
            return;
        }

        let (Some(target), Some(value)) = (target, value) else {
            return;
        };
        let stored = match stmt.op.binary_op() {
            None => value,
            Some(op) => match binary_result(op, &target, &value) {
                Some(result) => result,
                None => {
                    self.report(CheckError::OperatorMismatch {
                        op: stmt.op.as_str(),
                        left: target.to_string(),
                        right: value.to_string(),
                        span: stmt.span,
                    });
                    return;
                }
            },
        };
        if !is_acceptable(&target, &stored) {
            self.report(CheckError::TypeMismatch {
                expected: target.to_string(),
                found: stored.to_string(),
                span: stmt.value.span(),
            });
        }
    }

    fn check_return(&mut self, scope: ScopeId, stmt: &'ast ReturnStmt<'ast>) {
        let value = stmt.value.as_ref().map(|value| self.type_of(scope, value));
        if !self.options.validate_operators {
            return;
        }

        let Some(body) = self.tree().enclosing_body(scope) else {
            self.report(CheckError::internal("return outside of a function", stmt.span));
            return;
        };
        // A body whose declaration failed has no signature to match.
        let Some(owner) = self.tree().scope(body).owner else {
            return;
        };
        let Some(signature) = self
            .tree()
            .symbol(owner)
            .ty
            .as_ref()
            .and_then(Type::as_signature)
            .cloned()
        else {
            self.report(CheckError::internal("function has no signature", stmt.span));
            return;
        };

        let message = match (signature.return_type(), value) {
            (None, None) | (Some(_), Some(None)) => return,
            (None, Some(_)) => format!("'{}' does not return a value", signature.name()),
            (Some(expected), None) => {
                format!("'{}' must return a value of type '{expected}'", signature.name())
            }
            (Some(expected), Some(Some(found))) => {
                if is_acceptable(expected, &found) {
                    return;
                }
                format!(
                    "'{}' returns '{expected}', found '{found}'",
                    signature.name()
                )
            }
        };
        self.report(CheckError::ReturnMismatch {
            message,
            span: stmt.span,
        });
    }
}
