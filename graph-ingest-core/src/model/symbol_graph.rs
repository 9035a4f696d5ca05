//! The authoritative in-memory result of the Index Parser: a frozen,
//! cross-linked map of every parsed symbol.

use crate::model::symbol::Symbol;
use crate::model::symbol_id::SymbolId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Owns every parsed [`Symbol`]. Built mutably by the parser's merge and link
/// phases, then treated as immutable by every downstream pass (§3 Lifecycle).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolGraph {
    symbols: HashMap<SymbolId, Symbol>,
    /// True iff at least one linked Reference carried a non-zero container_id.
    pub has_container_field: bool,
}

impl SymbolGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, id: &SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn get_mut(&mut self, id: &SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Symbol> {
        self.symbols.values_mut()
    }

    pub fn contains(&self, id: &SymbolId) -> bool {
        self.symbols.contains_key(id)
    }

    /// Insert a freshly parsed symbol (no references attached yet). Returns
    /// the previous value if `id` already existed — callers use this to
    /// detect `DuplicateSymbolId` during the merge phase.
    pub fn insert(&mut self, symbol: Symbol) -> Option<Symbol> {
        self.symbols.insert(symbol.id, symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::symbol::SymbolKind;

    #[test]
    fn insert_detects_duplicate_ids() {
        let mut g = SymbolGraph::new();
        let id = SymbolId::parse("a0a0a0a0a0a0a0a0").unwrap();
        assert!(g.insert(Symbol::new(id, "foo", SymbolKind::Function)).is_none());
        assert!(g.insert(Symbol::new(id, "bar", SymbolKind::Function)).is_some());
    }

    #[test]
    fn empty_graph_has_no_container_field_by_default() {
        let g = SymbolGraph::new();
        assert!(!g.has_container_field);
        assert!(g.is_empty());
    }
}
