//! Container strategy (§4.4.a): O(N_refs) in-memory lookup using the
//! `container_id` the index already carries.

use crate::model::reference::is_modern_call;
use crate::model::{CallRelation, SymbolGraph, SymbolKind};
use tracing::warn;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ContainerStats {
    /// `UnresolvedContainer`: container_id pointed outside the indexed set.
    pub unresolved_container: usize,
    /// The resolved caller existed but wasn't a Function (data error).
    pub non_function_caller: usize,
}

pub fn extract(graph: &SymbolGraph) -> (Vec<CallRelation>, ContainerStats) {
    let mut relations = Vec::new();
    let mut stats = ContainerStats::default();

    for symbol in graph.iter() {
        for r in &symbol.references {
            if !is_modern_call(r.kind_bits) {
                continue;
            }
            let Some(caller_id) = r.container_id else {
                continue;
            };

            match graph.get(&caller_id) {
                None => stats.unresolved_container += 1,
                Some(caller) if caller.kind != SymbolKind::Function => {
                    warn!(caller = %caller_id, kind = ?caller.kind, "container points at a non-function symbol");
                    stats.non_function_caller += 1;
                }
                Some(_) => {
                    relations.push(CallRelation::new(caller_id, symbol.id, r.location.clone()));
                }
            }
        }
    }

    (relations, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Location, Reference, Symbol, SymbolId};

    fn id(hex: &str) -> SymbolId {
        SymbolId::parse(hex).unwrap()
    }

    #[test]
    fn emits_a_call_relation_for_a_modern_call_with_container() {
        let mut graph = SymbolGraph::new();
        let caller_id = id("a0a0a0a0a0a0a0a0");
        let callee_id = id("b0b0b0b0b0b0b0b0");
        graph.insert(Symbol::new(caller_id, "A", SymbolKind::Function));
        let mut callee = Symbol::new(callee_id, "B", SymbolKind::Function);
        callee.references.push(Reference::new(
            20,
            Location::new("file:///src/x.c", 12, 9),
            Some(caller_id),
        ));
        graph.insert(callee);

        let (relations, stats) = extract(&graph);
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].caller, caller_id);
        assert_eq!(relations[0].callee, callee_id);
        assert_eq!(stats, ContainerStats::default());
    }

    #[test]
    fn drops_relation_silently_when_container_is_unresolved() {
        let mut graph = SymbolGraph::new();
        let callee_id = id("b0b0b0b0b0b0b0b0");
        let mut callee = Symbol::new(callee_id, "B", SymbolKind::Function);
        callee.references.push(Reference::new(
            20,
            Location::new("file:///src/x.c", 12, 9),
            Some(id("ffffffffffffffff")),
        ));
        graph.insert(callee);

        let (relations, stats) = extract(&graph);
        assert!(relations.is_empty());
        assert_eq!(stats.unresolved_container, 1);
    }

    #[test]
    fn drops_relation_when_caller_kind_is_not_function() {
        let mut graph = SymbolGraph::new();
        let caller_id = id("a0a0a0a0a0a0a0a0");
        let callee_id = id("b0b0b0b0b0b0b0b0");
        graph.insert(Symbol::new(caller_id, "A", SymbolKind::Variable));
        let mut callee = Symbol::new(callee_id, "B", SymbolKind::Function);
        callee.references.push(Reference::new(
            28,
            Location::new("file:///src/x.c", 12, 9),
            Some(caller_id),
        ));
        graph.insert(callee);

        let (relations, stats) = extract(&graph);
        assert!(relations.is_empty());
        assert_eq!(stats.non_function_caller, 1);
    }

    #[test]
    fn ignores_references_without_a_container() {
        let mut graph = SymbolGraph::new();
        let callee_id = id("b0b0b0b0b0b0b0b0");
        let mut callee = Symbol::new(callee_id, "B", SymbolKind::Function);
        callee.references.push(Reference::new(
            20,
            Location::new("file:///src/x.c", 12, 9),
            None,
        ));
        graph.insert(callee);

        let (relations, _) = extract(&graph);
        assert!(relations.is_empty());
    }

    #[test]
    fn ignores_non_call_and_legacy_call_kinds() {
        let mut graph = SymbolGraph::new();
        let caller_id = id("a0a0a0a0a0a0a0a0");
        let callee_id = id("b0b0b0b0b0b0b0b0");
        graph.insert(Symbol::new(caller_id, "A", SymbolKind::Function));
        let mut callee = Symbol::new(callee_id, "B", SymbolKind::Function);
        callee
            .references
            .push(Reference::new(4, Location::new("file:///x.c", 1, 1), Some(caller_id)));
        callee
            .references
            .push(Reference::new(1, Location::new("file:///x.c", 1, 1), Some(caller_id)));
        graph.insert(callee);

        let (relations, _) = extract(&graph);
        assert!(relations.is_empty());
    }
}
