//! Script and member passes: everything that declares a symbol outside a
//! function body.

use papyrus_core::{CheckError, InvokableKind, Name, ObjectType, Primitive, Signature, Span, Type};
use papyrus_syntax::{
    Expr, InvokableDecl, LiteralExpr, Member, PropertyDecl, Script, StateDecl, TypeRef,
    VariableDecl,
};
use tracing::trace;

use super::operators::is_acceptable;
use super::{CheckContext, PendingBody};
use crate::scope::{Declaration, Namespace, ScopeId, ScopeKind, SymbolId, SymbolKind};

impl<'ast> CheckContext<'_, 'ast> {
    // ========================================================================
    // Script pass
    // ========================================================================

    /// Register `script` in Global. Its parent has already been registered.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub(super) fn declare_script(&mut self, script: &'ast Script<'ast>) -> Option<SymbolId> {
        self.file = script.file;
        self.script = None;

        let symbol = self.declare_script_symbol(script);
        self.result.record_symbol(script.id, symbol);
        let symbol = symbol?;

        let scope = self.defined_scope(symbol, script.span)?;
        self.result.record_scope(script.id, scope);
        if self.tree().empty_state(scope).is_none() {
            return self.internal(
                format!("script '{}' has no empty state", script.name.name),
                script.span,
            );
        }
        trace!(script = script.name.name, file = script.file, "script declared");
        Some(symbol)
    }

    fn declare_script_symbol(&mut self, script: &'ast Script<'ast>) -> Option<SymbolId> {
        let global = self.tree().global();
        if let Err(error) = self.tree().ensure_accepts(global, SymbolKind::Script, script.span) {
            return self.fail(error);
        }

        let parent = match script.parent {
            Some(parent) => match self.tree().script_type(parent.name) {
                Some(object) => Some(object.clone()),
                None => {
                    return self.fail(CheckError::UnresolvedType {
                        name: parent.name.to_owned(),
                        span: parent.span,
                    });
                }
            },
            None => None,
        };
        let name = Name::new(script.name.name);
        let ty = Type::object(ObjectType::new(name.clone(), parent));
        let decl = Declaration::new(SymbolKind::Script, name, script.name.span)
            .with_type(ty)
            .with_node(script.id)
            .opening_scope();
        self.declare_in(global, decl)
    }

    // ========================================================================
    // Member pass
    // ========================================================================

    /// Declare the top-level members of `script`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub(super) fn declare_members(&mut self, script: &'ast Script<'ast>, symbol: SymbolId) {
        self.enter_script(script.file, symbol);
        let Some(scope) = self.defined_scope(symbol, script.span) else {
            return;
        };
        let Some(empty_state) = self.empty_state_scope(scope, script) else {
            return;
        };

        for member in script.members {
            match member {
                Member::Import(_) | Member::Comment(_) => {}
                Member::Variable(variable) => {
                    self.declare_variable(scope, *variable);
                }
                Member::Property(property) => self.declare_property(scope, *property),
                Member::State(state) => self.declare_state(scope, *state),
                Member::Invokable(invokable) => self.declare_invokable(empty_state, *invokable),
            }
        }
        trace!(
            script = script.name.name,
            members = script.members.len(),
            "members declared"
        );
    }

    fn empty_state_scope(&mut self, scope: ScopeId, script: &Script<'_>) -> Option<ScopeId> {
        match self.tree().empty_state(scope) {
            Some(state) => self.defined_scope(state, script.span),
            None => self.internal(
                format!("script '{}' has no empty state", script.name.name),
                script.span,
            ),
        }
    }

    /// Declare a script-level or block-local variable.
    ///
    /// The initializer is typed before the name exists, so it cannot refer
    /// to the variable it initializes. It is typed even when the variable
    /// itself fails.
    pub(super) fn declare_variable(
        &mut self,
        scope: ScopeId,
        variable: &'ast VariableDecl<'ast>,
    ) -> Option<SymbolId> {
        let symbol = self.declare_variable_symbol(scope, variable);
        self.result.record_symbol(variable.id, symbol);
        symbol
    }

    fn declare_variable_symbol(
        &mut self,
        scope: ScopeId,
        variable: &'ast VariableDecl<'ast>,
    ) -> Option<SymbolId> {
        let accepted = self.accepts(scope, SymbolKind::Variable, variable.span);
        let ty = self.resolve_type(&variable.ty);
        if let Some(initial) = &variable.initial {
            self.check_initializer(scope, ty.as_ref(), initial);
        }
        let ty = ty.filter(|_| accepted)?;
        let decl = Declaration::new(SymbolKind::Variable, variable.name.name, variable.name.span)
            .with_type(ty)
            .with_node(variable.id);
        self.declare_in(scope, decl)
    }

    fn check_initializer(&mut self, scope: ScopeId, target: Option<&Type>, initial: &Expr<'ast>) {
        let value = self.type_of(scope, initial);
        if let (Some(target), Some(value)) = (target, value) {
            self.check_store(target, &value, initial.span());
        }
    }

    /// Type a property initial value or parameter default.
    fn check_default(&mut self, target: Option<&Type>, literal: &LiteralExpr<'ast>) {
        let value = self.literal(literal);
        if let (Some(target), Some(value)) = (target, value) {
            self.check_store(target, &value, literal.span);
        }
    }

    fn check_store(&mut self, target: &Type, value: &Type, span: Span) {
        if self.options.validate_operators && !is_acceptable(target, value) {
            self.report(CheckError::TypeMismatch {
                expected: target.to_string(),
                found: value.to_string(),
                span,
            });
        }
    }

    fn declare_property(&mut self, scope: ScopeId, property: &'ast PropertyDecl<'ast>) {
        let symbol = self.declare_property_symbol(scope, property);
        self.result.record_symbol(property.id, symbol);
        if !property.is_full() {
            return;
        }
        let property_scope = match symbol {
            Some(symbol) => match self.defined_scope(symbol, property.span) {
                Some(property_scope) => property_scope,
                None => return,
            },
            None => self
                .tree_mut()
                .create_unowned(scope, ScopeKind::Property, property.id),
        };
        self.result.record_scope(property.id, property_scope);
        for accessor in property.accessors {
            self.declare_invokable(property_scope, *accessor);
        }
    }

    fn declare_property_symbol(
        &mut self,
        scope: ScopeId,
        property: &'ast PropertyDecl<'ast>,
    ) -> Option<SymbolId> {
        let accepted = self.accepts(scope, SymbolKind::Property, property.span);
        let ty = self.resolve_type(&property.ty);
        if let Some(initial) = &property.initial {
            self.check_default(ty.as_ref(), initial);
        }
        let ty = ty.filter(|_| accepted)?;
        let mut decl = Declaration::new(SymbolKind::Property, property.name.name, property.name.span)
            .with_type(ty)
            .with_node(property.id);
        if property.is_full() {
            decl = decl.opening_scope();
        }
        self.declare_in(scope, decl)
    }

    /// A state whose name collides keeps its functions in a scope of its own.
    fn declare_state(&mut self, scope: ScopeId, state: &'ast StateDecl<'ast>) {
        let decl = Declaration::new(SymbolKind::State, state.name.name, state.name.span)
            .with_node(state.id)
            .opening_scope();
        let symbol = self.declare_in(scope, decl);
        self.result.record_symbol(state.id, symbol);
        let state_scope = match symbol {
            Some(symbol) => match self.defined_scope(symbol, state.span) {
                Some(state_scope) => state_scope,
                None => return,
            },
            None => self.tree_mut().create_unowned(scope, ScopeKind::State, state.id),
        };
        self.result.record_scope(state.id, state_scope);
        for invokable in state.invokables {
            self.declare_invokable(state_scope, *invokable);
        }
    }

    /// Declare a function or event and queue its body.
    ///
    /// A body is queued even when the declaration fails. It is then checked
    /// in a scope no symbol owns, with only the parameters that resolved.
    pub(super) fn declare_invokable(&mut self, scope: ScopeId, invokable: &'ast InvokableDecl<'ast>) {
        let (kind, scope_kind) = match invokable.kind {
            InvokableKind::Function => (SymbolKind::Function, ScopeKind::Function),
            InvokableKind::Event => (SymbolKind::Event, ScopeKind::Event),
        };
        let accepted = self.accepts(scope, kind, invokable.span);
        let header = self.header(invokable);

        let symbol = match header.signature(invokable) {
            Some(signature) if accepted => {
                let mut decl = Declaration::new(kind, invokable.name.name, invokable.name.span)
                    .with_type(Type::invokable(signature))
                    .with_node(invokable.id);
                if invokable.body.is_some() {
                    decl = decl.opening_scope();
                }
                self.declare_in(scope, decl)
            }
            _ => None,
        };
        self.result.record_symbol(invokable.id, symbol);

        let Some(body) = invokable.body else {
            return;
        };
        let body_scope = match symbol {
            Some(symbol) => match self.defined_scope(symbol, invokable.span) {
                Some(body_scope) => body_scope,
                None => return,
            },
            None => self.tree_mut().create_unowned(scope, scope_kind, invokable.id),
        };
        self.result.record_scope(invokable.id, body_scope);

        let Some(script) = self.script else {
            return;
        };
        trace!(
            name = invokable.name.name,
            statements = body.len(),
            declared = symbol.is_some(),
            "body queued"
        );
        self.pending.push(PendingBody {
            decl: invokable,
            scope: body_scope,
            file: self.file,
            script,
            params: header.params,
        });
    }

    /// Resolve return and parameter types. Every part is resolved so that
    /// all unknown types are reported, not just the first.
    fn header(&mut self, invokable: &'ast InvokableDecl<'ast>) -> Header {
        let mut complete = true;
        let returns = match (invokable.kind, &invokable.return_type) {
            (InvokableKind::Function, Some(ty)) => {
                let resolved = self.resolve_type(ty);
                complete &= resolved.is_some();
                resolved
            }
            _ => None,
        };

        let mut params = Vec::with_capacity(invokable.params.len());
        let mut required = invokable.params.len();
        for (index, param) in invokable.params.iter().enumerate() {
            let ty = self.resolve_type(&param.ty);
            complete &= ty.is_some();
            if let Some(default) = &param.default {
                self.check_default(ty.as_ref(), default);
                required = required.min(index);
            }
            params.push(ty);
        }

        Header {
            returns,
            params,
            required,
            complete,
        }
    }

        // ========================================================================
    // Shared helpers
    // ========================================================================

    /// Whether `scope` may hold a symbol of `kind`. Reports when it may not.
    fn accepts(&mut self, scope: ScopeId, kind: SymbolKind, span: Span) -> bool {
        match self.tree().ensure_accepts(scope, kind, span) {
            Ok(()) => true,
            Err(error) => {
                self.report(error);
                false
            }
        }
    }

    /// Declare `decl` in `scope`, reporting failures.
    pub(super) fn declare_in(&mut self, scope: ScopeId, decl: Declaration) -> Option<SymbolId> {
        match self.tree_mut().declare(scope, decl) {
            Ok(symbol) => Some(symbol),
            Err(error) => self.fail(error),
        }
    }

    /// Resolve a written type: a primitive or a known script.
    pub(super) fn resolve_type(&mut self, ty: &TypeRef<'ast>) -> Option<Type> {
        let base = match Primitive::from_name(ty.name.name) {
            Some(primitive) => Type::Primitive(primitive),
            None => match self.tree().script_type(ty.name.name) {
                Some(object) => Type::Object(object.clone()),
                None => {
                    return self.fail(CheckError::UnresolvedType {
                        name: ty.name.name.to_owned(),
                        span: ty.span,
                    });
                }
            },
        };
        if !ty.is_array {
            return Some(base);
        }
        match Type::array_of(base) {
            Some(array) => Some(array),
            None => self.internal(format!("'{}' cannot be an array element", ty.name.name), ty.span),
        }
    }

    /// Resolve a function name as seen from `scope`.
    ///
    /// The calling script is searched first, and within it the script's
    /// empty state comes right after the script scope. Only then does the
    /// search move on to the parent scripts, so an override always wins over
    /// the inherited function.
    pub(super) fn resolve_invokable(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let tree = self.tree();
        let Some(script_scope) = tree.enclosing(scope, ScopeKind::Script) else {
            return tree.resolve(scope, name, Namespace::Invokables);
        };
        let empty_state = tree
            .empty_state(script_scope)
            .and_then(|state| tree.symbol(state).defines);

        let own = tree
            .chain(scope)
            .take_while(|id| *id != script_scope)
            .chain(std::iter::once(script_scope))
            .chain(empty_state)
            .find_map(|id| tree.lookup(id, name, Namespace::Invokables));
        own.or_else(|| {
            let inherited = tree.scope(script_scope).parent?;
            tree.resolve(inherited, name, Namespace::Invokables)
        })
    }
}

/// Types resolved from a function or event header.
struct Header {
    returns: Option<Type>,
    /// One entry per parameter, absent where the type failed to resolve.
    params: Vec<Option<Type>>,
    required: usize,
    complete: bool,
}

impl Header {
    /// The signature, when every type resolved.
    fn signature(&self, invokable: &InvokableDecl<'_>) -> Option<Signature> {
        if !self.complete {
            return None;
        }
        let params: Vec<Type> = self.params.iter().flatten().cloned().collect();
        let name = Name::new(invokable.name.name);
        let signature = match invokable.kind {
            InvokableKind::Function => Signature::function(name, params, self.returns.clone()),
            InvokableKind::Event => Signature::event(name, params),
        };
        Some(signature.with_required(self.required))
    }
}
