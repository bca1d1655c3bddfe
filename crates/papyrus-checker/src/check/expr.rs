//! Expression typing.
//!
//! [`CheckContext::type_of`] computes the type of any expression, records it
//! against the node and returns it. A sub-expression that already failed
//! yields `None` and its parent fails quietly; only the node where a rule is
//! actually broken reports an issue.

use std::sync::Arc;

use papyrus_core::{CheckError, InvokableKind, Primitive, Signature, Span, Type};
use papyrus_syntax::{
    AccessExpr, BinaryExpr, CallExpr, CastExpr, Expr, IdentExpr, IndexExpr, KeywordExpr,
    LiteralExpr, LiteralKind, NewArrayExpr, UnaryExpr, UnaryOp,
};

use super::operators::{binary_result, is_acceptable};
use super::CheckContext;
use crate::literal::parse_literal;
use crate::scope::{Namespace, ScopeId, SymbolKind};

impl<'ast> CheckContext<'_, 'ast> {
    /// Type `expr` as seen from `scope` and record the outcome.
    pub(super) fn type_of(&mut self, scope: ScopeId, expr: &Expr<'ast>) -> Option<Type> {
        let ty = match expr {
            Expr::Ident(e) => self.type_ident(scope, e),
            Expr::Access(e) => self.type_access(scope, e),
            Expr::Index(e) => self.type_index(scope, e),
            Expr::Cast(e) => self.type_cast(scope, e),
            Expr::Unary(e) => self.type_unary(scope, e),
            Expr::Binary(e) => self.type_binary(scope, e),
            Expr::Call(e) => self.type_call(scope, e),
            Expr::NewArray(e) => self.type_new_array(e),
            Expr::Literal(e) => self.literal(e),
            Expr::Paren(e) => self.type_of(scope, &e.inner),
            Expr::SelfRef(e) => self.type_self(e),
            Expr::Parent(e) => self.type_parent(e),
        };
        self.result.record_type(expr.id(), ty.clone());
        ty
    }

    /// Parse a literal, recording both its value and its type.
    pub(super) fn literal(&mut self, literal: &LiteralExpr<'ast>) -> Option<Type> {
        let ty = match parse_literal(literal) {
            Ok(value) => {
                let ty = match &value {
                    Some(value) => value.ty(),
                    None => Type::None,
                };
                self.result.record_value(literal.id, value);
                Some(ty)
            }
            Err(error) => {
                self.result.record_value(literal.id, None);
                self.fail(error.into())
            }
        };
        self.result.record_type(literal.id, ty.clone());
        ty
    }

    // ========================================================================
    // Names
    // ========================================================================

    fn type_ident(&mut self, scope: ScopeId, ident: &IdentExpr<'ast>) -> Option<Type> {
        let name = ident.name;
        match self.tree().resolve(scope, name.name, Namespace::Values) {
            Some(symbol) => {
                self.result.record_symbol(ident.id, Some(symbol));
                self.tree().symbol(symbol).ty.clone()
            }
            None => self.fail(CheckError::UnresolvedIdentifier {
                name: name.name.to_owned(),
                span: name.span,
            }),
        }
    }

    fn type_self(&mut self, keyword: &KeywordExpr) -> Option<Type> {
        match self.script {
            Some(script) => self.tree().symbol(script).ty.clone(),
            None => self.internal("Self outside of a script", keyword.span),
        }
    }

    fn type_parent(&mut self, keyword: &KeywordExpr) -> Option<Type> {
        let object = self.type_self(keyword)?;
        let Some(object) = object.as_object() else {
            return self.internal("script type is not an object", keyword.span);
        };
        match object.parent() {
            Some(parent) => Some(Type::Object(parent.clone())),
            None => self.fail(CheckError::NoParent {
                script: object.name().to_string(),
                span: keyword.span,
            }),
        }
    }

    /// Scope of the script behind an Object-typed access base.
    fn member_scope(&mut self, base: &Type, span: Span) -> Option<ScopeId> {
        let Some(object) = base.as_object() else {
            return self.fail(CheckError::NotAnObject {
                found: base.to_string(),
                span,
            });
        };
        match self.tree().script_scope(object.name().as_str()) {
            Some(scope) => Some(scope),
            None => self.internal(format!("script '{}' has no scope", object.name()), span),
        }
    }

    fn type_access(&mut self, scope: ScopeId, access: &AccessExpr<'ast>) -> Option<Type> {
        let base = self.type_of(scope, &access.base)?;
        let target_scope = self.member_scope(&base, access.base.span())?;
        let member = access.member;

        let found = self
            .tree()
            .resolve(target_scope, member.name, Namespace::Values)
            .filter(|symbol| self.tree().symbol(*symbol).kind != SymbolKind::Script);
        let Some(symbol) = found else {
            return self.fail(CheckError::UnknownMember {
                member: member.name.to_owned(),
                ty: base.to_string(),
                span: member.span,
            });
        };

        if self.tree().symbol(symbol).kind == SymbolKind::Variable {
            let owner = self.tree().owning_script(symbol);
            if owner != self.script {
                let owner = owner
                    .map(|owner| self.tree().symbol(owner).name.to_string())
                    .unwrap_or_default();
                return self.fail(CheckError::PrivateVariable {
                    name: member.name.to_owned(),
                    owner,
                    span: member.span,
                });
            }
        }

        self.result.record_symbol(access.id, Some(symbol));
        self.tree().symbol(symbol).ty.clone()
    }

    // ========================================================================
    // Calls
    // ========================================================================

    /// Resolve a callee in the invokable namespace and record its type.
    fn callee(&mut self, scope: ScopeId, callee: &Expr<'ast>) -> Option<Arc<Signature>> {
        let resolved = match callee {
            Expr::Ident(ident) => {
                let name = ident.name;
                match self.resolve_invokable(scope, name.name) {
                    Some(symbol) => Some((symbol, name.name, name.span)),
                    None => {
                        return self.fail_callee(callee, CheckError::UnresolvedFunction {
                            name: name.name.to_owned(),
                            span: name.span,
                        });
                    }
                }
            }
            Expr::Access(access) => {
                let base = self.type_of(scope, &access.base);
                let Some(base) = base else {
                    self.result.record_type(callee.id(), None);
                    return None;
                };
                let target = match self.member_scope(&base, access.base.span()) {
                    Some(target) => target,
                    None => {
                        self.result.record_type(callee.id(), None);
                        return None;
                    }
                };
                let member = access.member;
                match self.method_scope(target, member.span) {
                    Some(state) => match self.tree().resolve(state, member.name, Namespace::Invokables) {
                        Some(symbol) => Some((symbol, member.name, member.span)),
                        None => {
                            return self.fail_callee(callee, CheckError::UnresolvedFunction {
                                name: format!("{base}.{}", member.name),
                                span: member.span,
                            });
                        }
                    },
                    None => None,
                }
            }
            other => {
                let found = self.type_of(scope, other)?;
                return self.fail(CheckError::TypeMismatch {
                    expected: "function".to_owned(),
                    found: found.to_string(),
                    span: other.span(),
                });
            }
        };

        let (symbol, name, span) = resolved?;
        self.result.record_symbol(callee.id(), Some(symbol));
        let ty = self.tree().symbol(symbol).ty.clone();
        self.result.record_type(callee.id(), ty.clone());
        let signature = ty.as_ref().and_then(Type::as_signature).cloned()?;
        if signature.kind() == InvokableKind::Event {
            return self.fail(CheckError::EventNotCallable {
                name: name.to_owned(),
                span,
            });
        }
        Some(signature)
    }

    fn fail_callee<T>(&mut self, callee: &Expr<'ast>, error: CheckError) -> Option<T> {
        self.result.record_type(callee.id(), None);
        self.fail(error)
    }

    /// Functions reachable through `obj.f()` live in the empty state.
    fn method_scope(&mut self, script_scope: ScopeId, span: Span) -> Option<ScopeId> {
        let state = self.tree().empty_state(script_scope);
        match state.and_then(|state| self.tree().symbol(state).defines) {
            Some(scope) => Some(scope),
            None => self.internal("script has no empty state", span),
        }
    }

    fn type_call(&mut self, scope: ScopeId, call: &CallExpr<'ast>) -> Option<Type> {
        let signature = self.callee(scope, &call.callee);
        let args: Vec<Option<Type>> = call.args.iter().map(|arg| self.type_of(scope, arg)).collect();
        let signature = signature?;
        let result = signature.return_type().cloned().unwrap_or(Type::Void);
        if !self.options.validate_operators {
            return Some(result);
        }

        let max = signature.params().len();
        let min = signature.required();
        if args.len() < min || args.len() > max {
            return self.fail(CheckError::ArgumentCount {
                name: signature.name().to_string(),
                min,
                max,
                got: args.len(),
                span: call.span,
            });
        }

        let mut ok = true;
        for (index, ((arg, ty), param)) in call
            .args
            .iter()
            .zip(&args)
            .zip(signature.params())
            .enumerate()
        {
            let Some(ty) = ty else {
                ok = false;
                continue;
            };
            if !is_acceptable(param, ty) {
                ok = false;
                self.report(CheckError::ArgumentMismatch {
                    name: signature.name().to_string(),
                    index: index + 1,
                    expected: param.to_string(),
                    found: ty.to_string(),
                    span: arg.span(),
                });
            }
        }
        ok.then_some(result)
    }

    // ========================================================================
    // Operators
    // ========================================================================

    fn type_index(&mut self, scope: ScopeId, index: &IndexExpr<'ast>) -> Option<Type> {
        let base = self.type_of(scope, &index.base);
        let position = self.type_of(scope, &index.index);

        let element = match &base {
            Some(Type::Array(array)) => Some(array.element().clone()),
            Some(other) => {
                self.report(CheckError::TargetNotArray {
                    found: other.to_string(),
                    span: index.base.span(),
                });
                None
            }
            None => None,
        };
        match &position {
            Some(ty) if ty.is_primitive(Primitive::Int) => {}
            Some(other) => {
                return self.fail(CheckError::IndexNotInt {
                    found: other.to_string(),
                    span: index.index.span(),
                });
            }
            None => return None,
        }
        element
    }

    fn type_cast(&mut self, scope: ScopeId, cast: &CastExpr<'ast>) -> Option<Type> {
        let from = self.type_of(scope, &cast.expr);
        let to = self.resolve_type(&cast.target)?;
        let from = from?;
        if from.is_convertible(&to) {
            Some(to)
        } else {
            self.fail(CheckError::NotConvertible {
                from: from.to_string(),
                to: to.to_string(),
                span: cast.span,
            })
        }
    }

    fn type_unary(&mut self, scope: ScopeId, unary: &UnaryExpr<'ast>) -> Option<Type> {
        let operand = self.type_of(scope, &unary.operand)?;
        match unary.op {
            UnaryOp::Neg if !operand.is_numeric() => self.fail(CheckError::NotNumeric {
                op: unary.op.as_str(),
                found: operand.to_string(),
                span: unary.span,
            }),
            // `!` forwards its operand's type
            UnaryOp::Neg | UnaryOp::Not => Some(operand),
        }
    }

    fn type_binary(&mut self, scope: ScopeId, binary: &BinaryExpr<'ast>) -> Option<Type> {
        let left = self.type_of(scope, &binary.left);
        let right = self.type_of(scope, &binary.right);
        if !self.options.validate_operators {
            return None;
        }
        let (left, right) = (left?, right?);
        match binary_result(binary.op, &left, &right) {
            Some(ty) => Some(ty),
            None => self.fail(CheckError::OperatorMismatch {
                op: binary.op.as_str(),
                left: left.to_string(),
                right: right.to_string(),
                span: binary.span,
            }),
        }
    }

    fn type_new_array(&mut self, array: &NewArrayExpr<'ast>) -> Option<Type> {
        let element = self.resolve_type(&array.element);
        let length = self.literal(&array.length);

        if self.options.enforce_array_bounds {
            let max = self.options.max_array_length;
            let in_bounds = array.length.kind == LiteralKind::Int
                && self
                    .result
                    .value_of(array.length.id)
                    .and_then(|value| value.as_int())
                    .is_some_and(|n| n >= 1 && i64::from(n) <= i64::from(max));
            // An unparsable length has already been reported.
            if length.is_some() && !in_bounds {
                return self.fail(CheckError::ArrayLength {
                    length: array.length.text.to_owned(),
                    max,
                    span: array.length.span,
                });
            }
        }

        let element = element?;
        match Type::array_of(element) {
            Some(ty) => Some(ty),
            None => self.internal("array element must be a scalar", array.span),
        }
    }
}
