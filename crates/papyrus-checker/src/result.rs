//! What a checking run learned about each node.

use papyrus_core::{Type, Value};
use papyrus_syntax::NodeId;
use rustc_hash::FxHashMap;

use crate::scope::{Scope, ScopeId, ScopeTree, Symbol, SymbolId};

/// Node-keyed tables produced by a run, plus the scope tree they point into.
///
/// Nodes that were visited but failed stay in the tables with an absent
/// entry: [`CheckResult::type_of`] answers `None` for them while
/// [`CheckResult::was_visited`] answers `true`.
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    tree: ScopeTree,
    symbols: FxHashMap<NodeId, Option<SymbolId>>,
    scopes: FxHashMap<NodeId, ScopeId>,
    types: FxHashMap<NodeId, Option<Type>>,
    values: FxHashMap<NodeId, Option<Value>>,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope_tree(&self) -> &ScopeTree {
        &self.tree
    }

    pub(crate) fn scope_tree_mut(&mut self) -> &mut ScopeTree {
        &mut self.tree
    }

    pub fn global_scope(&self) -> ScopeId {
        self.tree.global()
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        self.tree.scope(id)
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        self.tree.symbol(id)
    }

    /// Symbols declared directly in the Global scope, i.e. the scripts.
    pub fn global_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.tree
            .scope(self.tree.global())
            .symbols()
            .iter()
            .map(|id| self.tree.symbol(*id))
    }

    // ========================================================================
    // Per-node lookups
    // ========================================================================

    /// Symbol created for a declaration node.
    pub fn symbol_of(&self, node: NodeId) -> Option<&Symbol> {
        self.symbol_id_of(node).map(|id| self.tree.symbol(id))
    }

    pub fn symbol_id_of(&self, node: NodeId) -> Option<SymbolId> {
        self.symbols.get(&node).copied().flatten()
    }

    /// Scope opened by a declaration or block node.
    pub fn scope_of(&self, node: NodeId) -> Option<ScopeId> {
        self.scopes.get(&node).copied()
    }

    /// Type of an expression node.
    pub fn type_of(&self, node: NodeId) -> Option<&Type> {
        self.types.get(&node).and_then(Option::as_ref)
    }

    /// Parsed value of a literal node.
    pub fn value_of(&self, node: NodeId) -> Option<&Value> {
        self.values.get(&node).and_then(Option::as_ref)
    }

    /// Whether the checker reached `node`, successfully or not.
    pub fn was_visited(&self, node: NodeId) -> bool {
        self.symbols.contains_key(&node)
            || self.scopes.contains_key(&node)
            || self.types.contains_key(&node)
            || self.values.contains_key(&node)
    }

    /// Number of expression nodes with an entry, absent or not.
    pub fn typed_node_count(&self) -> usize {
        self.types.len()
    }

    // ========================================================================
    // Recording
    // ========================================================================

    pub(crate) fn record_symbol(&mut self, node: NodeId, symbol: Option<SymbolId>) {
        self.symbols.insert(node, symbol);
    }

    pub(crate) fn record_scope(&mut self, node: NodeId, scope: ScopeId) {
        self.scopes.insert(node, scope);
    }

    pub(crate) fn record_type(&mut self, node: NodeId, ty: Option<Type>) {
        self.types.insert(node, ty);
    }

    pub(crate) fn record_value(&mut self, node: NodeId, value: Option<Value>) {
        self.values.insert(node, value);
    }
}
