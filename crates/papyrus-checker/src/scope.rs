//! Scope tree and symbol tables.
//!
//! Scopes live in a single arena owned by [`ScopeTree`] and refer to each
//! other by [`ScopeId`]. Symbols are stored in a second arena and addressed
//! by [`SymbolId`]. Every scope keeps its own table keyed by normalized name
//! and [`Namespace`], so a property and a function may share a name.
//!
//! ```text
//! Global
//! └── Script Foo                      (symbol Foo lives in Global)
//!     ├── State ""                    implicit empty state
//!     │   └── Function Bar
//!     │       └── If / ElseIf / Else / While (anonymous)
//!     ├── State Busy
//!     └── Property Health             full properties only
//! Script Child extends Foo            parent scope is Foo's empty state
//! ```

use bitflags::bitflags;
use papyrus_core::{CheckError, Name, ObjectType, Span, Type, normalize};
use papyrus_syntax::NodeId;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Handles
// ============================================================================

/// Handle to a scope in a [`ScopeTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

/// Handle to a symbol in a [`ScopeTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "symbol#{}", self.0)
    }
}

// ============================================================================
// Kinds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Global,
    Script,
    State,
    Function,
    Event,
    Property,
    If,
    ElseIf,
    Else,
    While,
}

impl ScopeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScopeKind::Global => "global",
            ScopeKind::Script => "script",
            ScopeKind::State => "state",
            ScopeKind::Function => "function",
            ScopeKind::Event => "event",
            ScopeKind::Property => "property",
            ScopeKind::If => "if",
            ScopeKind::ElseIf => "elseif",
            ScopeKind::Else => "else",
            ScopeKind::While => "while",
        }
    }

    /// Block scopes that belong to no symbol.
    pub fn is_anonymous(self) -> bool {
        matches!(
            self,
            ScopeKind::If | ScopeKind::ElseIf | ScopeKind::Else | ScopeKind::While
        )
    }

    /// Symbol kinds that may be declared directly in a scope of this kind.
    pub fn accepts(self) -> SymbolKinds {
        match self {
            ScopeKind::Global => SymbolKinds::SCRIPT,
            ScopeKind::Script => SymbolKinds::STATE | SymbolKinds::PROPERTY | SymbolKinds::VARIABLE,
            ScopeKind::State => SymbolKinds::FUNCTION | SymbolKinds::EVENT,
            ScopeKind::Property => SymbolKinds::FUNCTION,
            ScopeKind::Function | ScopeKind::Event => {
                SymbolKinds::PARAMETER | SymbolKinds::VARIABLE
            }
            ScopeKind::If | ScopeKind::ElseIf | ScopeKind::Else | ScopeKind::While => {
                SymbolKinds::VARIABLE
            }
        }
    }
}

/// Symbol tables are partitioned so that names only collide within a
/// namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Scripts, properties, variables and parameters.
    Values,
    /// Functions and events.
    Invokables,
    States,
}

impl Namespace {
    const COUNT: usize = 3;

    fn slot(self) -> usize {
        match self {
            Namespace::Values => 0,
            Namespace::Invokables => 1,
            Namespace::States => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Script,
    State,
    Function,
    Event,
    Property,
    Variable,
    Parameter,
}

impl SymbolKind {
    pub fn namespace(self) -> Namespace {
        match self {
            SymbolKind::Function | SymbolKind::Event => Namespace::Invokables,
            SymbolKind::State => Namespace::States,
            SymbolKind::Script
            | SymbolKind::Property
            | SymbolKind::Variable
            | SymbolKind::Parameter => Namespace::Values,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Script => "script",
            SymbolKind::State => "state",
            SymbolKind::Function => "function",
            SymbolKind::Event => "event",
            SymbolKind::Property => "property",
            SymbolKind::Variable => "variable",
            SymbolKind::Parameter => "parameter",
        }
    }

    fn flag(self) -> SymbolKinds {
        match self {
            SymbolKind::Script => SymbolKinds::SCRIPT,
            SymbolKind::State => SymbolKinds::STATE,
            SymbolKind::Function => SymbolKinds::FUNCTION,
            SymbolKind::Event => SymbolKinds::EVENT,
            SymbolKind::Property => SymbolKinds::PROPERTY,
            SymbolKind::Variable => SymbolKinds::VARIABLE,
            SymbolKind::Parameter => SymbolKinds::PARAMETER,
        }
    }

    /// Kind of the scope a symbol of this kind opens, if any.
    fn scope_kind(self) -> Option<ScopeKind> {
        match self {
            SymbolKind::Script => Some(ScopeKind::Script),
            SymbolKind::State => Some(ScopeKind::State),
            SymbolKind::Function => Some(ScopeKind::Function),
            SymbolKind::Event => Some(ScopeKind::Event),
            SymbolKind::Property => Some(ScopeKind::Property),
            SymbolKind::Variable | SymbolKind::Parameter => None,
        }
    }
}

bitflags! {
    /// Set of [`SymbolKind`]s, used for scope acceptance.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SymbolKinds: u8 {
        const SCRIPT = 1 << 0;
        const STATE = 1 << 1;
        const FUNCTION = 1 << 2;
        const EVENT = 1 << 3;
        const PROPERTY = 1 << 4;
        const VARIABLE = 1 << 5;
        const PARAMETER = 1 << 6;
    }
}

// ============================================================================
// Symbols and scopes
// ============================================================================

/// A declared name.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: Name,
    /// Absent only for states.
    pub ty: Option<Type>,
    /// Scope the symbol is declared in.
    pub scope: ScopeId,
    /// Scope the symbol opens, if any.
    pub defines: Option<ScopeId>,
    /// Declaring node. The implicit empty state has none.
    pub node: Option<NodeId>,
    pub span: Span,
}

/// A symbol about to be declared.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub kind: SymbolKind,
    pub name: Name,
    pub ty: Option<Type>,
    pub node: Option<NodeId>,
    pub span: Span,
    /// Whether the symbol opens a scope of its own.
    pub opens_scope: bool,
}

impl Declaration {
    pub fn new(kind: SymbolKind, name: impl Into<Name>, span: Span) -> Self {
        Self {
            kind,
            name: name.into(),
            ty: None,
            node: None,
            span,
            opens_scope: false,
        }
    }

    pub fn with_type(mut self, ty: Type) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    pub fn opening_scope(mut self) -> Self {
        self.opens_scope = true;
        self
    }
}

type Slots = [Option<SymbolId>; Namespace::COUNT];

#[derive(Debug, Clone)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// The symbol that opened this scope. `None` for Global and blocks.
    pub owner: Option<SymbolId>,
    /// Node that introduced the scope.
    pub node: Option<NodeId>,
    children: Vec<ScopeId>,
    table: FxHashMap<String, Slots>,
    /// Symbols in declaration order.
    declared: Vec<SymbolId>,
}

impl Scope {
    fn new(kind: ScopeKind, parent: Option<ScopeId>, node: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            owner: None,
            node,
            children: Vec::new(),
            table: FxHashMap::default(),
            declared: Vec::new(),
        }
    }

    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    /// Symbols declared directly in this scope, oldest first.
    pub fn symbols(&self) -> &[SymbolId] {
        &self.declared
    }

    fn get(&self, normalized: &str, namespace: Namespace) -> Option<SymbolId> {
        self.table
            .get(normalized)
            .and_then(|slots| slots[namespace.slot()])
    }
}

// ============================================================================
// ScopeTree
// ============================================================================

/// Arena of scopes rooted at the Global scope.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Global, None, None)],
            symbols: Vec::new(),
        }
    }

    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Scopes from `scope` up to Global, `scope` first.
    pub fn chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |id| self.scope(*id).parent)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Look `name` up in `scope` only.
    pub fn lookup(&self, scope: ScopeId, name: &str, namespace: Namespace) -> Option<SymbolId> {
        self.scope(scope).get(&normalize(name), namespace)
    }

    /// Look `name` up in `scope` and its ancestors, nearest first.
    ///
    /// Once the walk has left a Script scope, Variable symbols are skipped:
    /// script variables are visible only inside their own script.
    pub fn resolve(&self, scope: ScopeId, name: &str, namespace: Namespace) -> Option<SymbolId> {
        let key = normalize(name);
        let mut left_script = false;
        for id in self.chain(scope) {
            let current = self.scope(id);
            if let Some(symbol) = current.get(&key, namespace) {
                if !(left_script && self.symbol(symbol).kind == SymbolKind::Variable) {
                    return Some(symbol);
                }
            }
            if current.kind == ScopeKind::Script {
                left_script = true;
            }
        }
        None
    }

    /// The script symbol registered in Global under `name`.
    pub fn script(&self, name: &str) -> Option<SymbolId> {
        self.lookup(self.global(), name, Namespace::Values)
            .filter(|id| self.symbol(*id).kind == SymbolKind::Script)
    }

    /// The Object type of the script named `name`.
    pub fn script_type(&self, name: &str) -> Option<&Arc<ObjectType>> {
        self.script(name)
            .and_then(|id| self.symbol(id).ty.as_ref())
            .and_then(Type::as_object)
    }

    /// Scope opened by the script named `name`.
    pub fn script_scope(&self, name: &str) -> Option<ScopeId> {
        self.script(name).and_then(|id| self.symbol(id).defines)
    }

    /// The implicit empty state of a script scope.
    pub fn empty_state(&self, script_scope: ScopeId) -> Option<SymbolId> {
        self.scope(script_scope).get("", Namespace::States)
    }

    /// Nearest enclosing scope of `kind`, starting at `scope` itself.
    pub fn enclosing(&self, scope: ScopeId, kind: ScopeKind) -> Option<ScopeId> {
        self.chain(scope).find(|id| self.scope(*id).kind == kind)
    }

    /// Script symbol owning `scope`.
    pub fn enclosing_script(&self, scope: ScopeId) -> Option<SymbolId> {
        self.enclosing(scope, ScopeKind::Script)
            .and_then(|id| self.scope(id).owner)
    }

    /// Nearest Function or Event scope containing `scope`.
    pub fn enclosing_body(&self, scope: ScopeId) -> Option<ScopeId> {
        self.chain(scope)
            .find(|id| matches!(self.scope(*id).kind, ScopeKind::Function | ScopeKind::Event))
    }

    /// Function or event symbol whose body contains `scope`.
    pub fn enclosing_invokable(&self, scope: ScopeId) -> Option<SymbolId> {
        self.enclosing_body(scope).and_then(|id| self.scope(id).owner)
    }

    /// Script that declares `symbol`, for symbols below Global.
    pub fn owning_script(&self, symbol: SymbolId) -> Option<SymbolId> {
        self.enclosing_script(self.symbol(symbol).scope)
    }

    // ========================================================================
    // Declaration
    // ========================================================================

    /// Fail unless `scope` may hold a symbol of `kind`.
    pub fn ensure_accepts(
        &self,
        scope: ScopeId,
        kind: SymbolKind,
        span: Span,
    ) -> Result<(), CheckError> {
        let scope_kind = self.scope(scope).kind;
        if scope_kind.accepts().contains(kind.flag()) {
            Ok(())
        } else {
            Err(CheckError::UnsupportedInScope {
                declaration: kind.as_str(),
                scope: scope_kind.as_str(),
                span,
            })
        }
    }

    /// Declare a symbol in `scope`.
    ///
    /// Fails when the scope does not accept the symbol's kind or when the
    /// name is already taken. A Script always lands in Global; its scope
    /// hangs under the parent script's empty state and receives an empty
    /// state of its own.
    pub fn declare(&mut self, scope: ScopeId, decl: Declaration) -> Result<SymbolId, CheckError> {
        self.ensure_accepts(scope, decl.kind, decl.span)?;

        if let Some(existing) = self.colliding(scope, &decl) {
            let existing = self.symbol(existing);
            return Err(CheckError::NameCollision {
                name: decl.name.to_string(),
                existing: existing.kind.as_str(),
                span: decl.span,
                previous: Some(existing.span),
            });
        }

        let scope_parent = match decl.kind {
            SymbolKind::Script if decl.opens_scope => self.script_scope_parent(&decl)?,
            _ => scope,
        };

        let id = SymbolId(self.symbols.len() as u32);
        let key = decl.name.normalized().to_owned();
        let namespace = decl.kind.namespace();
        let defines = match decl.kind.scope_kind().filter(|_| decl.opens_scope) {
            Some(scope_kind) => {
                let child = self.push_scope(scope_kind, scope_parent, decl.node);
                self.scopes[child.index()].owner = Some(id);
                Some(child)
            }
            None => None,
        };

        self.symbols.push(Symbol {
            kind: decl.kind,
            name: decl.name,
            ty: decl.ty,
            scope,
            defines,
            node: decl.node,
            span: decl.span,
        });
        let target = &mut self.scopes[scope.index()];
        target.table.entry(key).or_default()[namespace.slot()] = Some(id);
        target.declared.push(id);

        if let (SymbolKind::Script, Some(script_scope)) = (self.symbols[id.index()].kind, defines) {
            let span = self.symbols[id.index()].span;
            let empty = Declaration::new(SymbolKind::State, Name::empty(), span).opening_scope();
            self.declare(script_scope, empty)?;
        }

        Ok(id)
    }

    /// Open an If, ElseIf, Else or While scope under `parent`.
    pub fn create_anonymous(
        &mut self,
        parent: ScopeId,
        kind: ScopeKind,
        node: NodeId,
        span: Span,
    ) -> Result<ScopeId, CheckError> {
        if !kind.is_anonymous() {
            return Err(CheckError::internal(
                format!("{} scopes must belong to a symbol", kind.as_str()),
                span,
            ));
        }
        Ok(self.push_scope(kind, parent, Some(node)))
    }

    /// Open a scope of any kind that no symbol owns.
    ///
    /// Members of a declaration that failed still get checked in one of
    /// these. No name leads to it, so nothing outside can see its contents.
    pub fn create_unowned(&mut self, parent: ScopeId, kind: ScopeKind, node: NodeId) -> ScopeId {
        self.push_scope(kind, parent, Some(node))
    }

    fn push_scope(&mut self, kind: ScopeKind, parent: ScopeId, node: Option<NodeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(kind, Some(parent), node));
        self.scopes[parent.index()].children.push(id);
        id
    }

    /// Existing symbol that `decl` would clash with.
    fn colliding(&self, scope: ScopeId, decl: &Declaration) -> Option<SymbolId> {
        let key = decl.name.normalized();
        let namespace = decl.kind.namespace();
        match decl.kind {
            // States only clash within their own script.
            SymbolKind::State => self.scope(scope).get(key, namespace),
            // Stop at the declaring script so that children may override.
            SymbolKind::Function | SymbolKind::Event => {
                for id in self.chain(scope) {
                    let current = self.scope(id);
                    if let Some(found) = current.get(key, namespace) {
                        return Some(found);
                    }
                    if current.kind == ScopeKind::Script {
                        break;
                    }
                }
                None
            }
            SymbolKind::Script
            | SymbolKind::Property
            | SymbolKind::Variable
            | SymbolKind::Parameter => self.resolve(scope, key, namespace),
        }
    }

    /// A child script's scope continues from its parent's empty state.
    fn script_scope_parent(&self, decl: &Declaration) -> Result<ScopeId, CheckError> {
        let Some(parent) = decl
            .ty
            .as_ref()
            .and_then(Type::as_object)
            .and_then(|object| object.parent())
        else {
            return Ok(self.global());
        };

        self.script_scope(parent.name().as_str())
            .and_then(|scope| self.empty_state(scope))
            .and_then(|state| self.symbol(state).defines)
            .ok_or_else(|| {
                CheckError::internal(
                    format!("parent script '{}' has no empty state", parent.name()),
                    decl.span,
                )
            })
    }
}
