//! Call-Graph Extractor (§4.4): picks Container or Spatial strategy
//! adaptively, based on whether the index carries a `Container` field at all.

pub mod container;
pub mod spatial;

use crate::model::{CallRelation, SymbolGraph};
use crate::span::SpanIncludeProvider;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The index carries `Container` on at least one reference: O(N_refs)
    /// lookup, no source parsing needed (§4.4.a).
    Container,
    /// No reference carries a container: function bodies must be matched
    /// spatially against legacy call sites (§4.4.b).
    Spatial,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CallGraphStats {
    pub unresolved_container: usize,
    pub non_function_caller: usize,
    pub span_mismatches: usize,
    pub unresolved_site: usize,
}

/// Choose a strategy for `graph` without running it.
pub fn choose_strategy(graph: &SymbolGraph) -> Strategy {
    if graph.has_container_field {
        Strategy::Container
    } else {
        Strategy::Spatial
    }
}

/// Extract every [`CallRelation`] the graph's references describe, adapting
/// to whichever strategy [`choose_strategy`] selects. The Spatial strategy
/// mutates `graph` in place to attach body spans before it can resolve sites.
#[tracing::instrument(level = "info", skip_all)]
pub fn extract(graph: &mut SymbolGraph, spans: &dyn SpanIncludeProvider) -> (Vec<CallRelation>, CallGraphStats) {
    match choose_strategy(graph) {
        Strategy::Container => {
            info!("using container strategy");
            let (relations, stats) = container::extract(graph);
            (
                relations,
                CallGraphStats {
                    unresolved_container: stats.unresolved_container,
                    non_function_caller: stats.non_function_caller,
                    ..Default::default()
                },
            )
        }
        Strategy::Spatial => {
            info!("using spatial strategy");
            let mismatches = spatial::attach_spans(graph, &spans.function_spans());
            let (relations, stats) = spatial::extract(graph);
            (
                relations,
                CallGraphStats {
                    span_mismatches: mismatches,
                    unresolved_site: stats.unresolved_site,
                    ..Default::default()
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Location, Reference, Symbol, SymbolId, SymbolKind};
    use crate::span::NoopSpanIncludeProvider;

    fn id(hex: &str) -> SymbolId {
        SymbolId::parse(hex).unwrap()
    }

    #[test]
    fn chooses_container_strategy_when_flag_is_set() {
        let mut graph = SymbolGraph::new();
        graph.has_container_field = true;
        assert_eq!(choose_strategy(&graph), Strategy::Container);
    }

    #[test]
    fn chooses_spatial_strategy_when_flag_is_unset() {
        let graph = SymbolGraph::new();
        assert_eq!(choose_strategy(&graph), Strategy::Spatial);
    }

    #[test]
    fn container_strategy_runs_end_to_end_through_the_dispatcher() {
        let mut graph = SymbolGraph::new();
        graph.has_container_field = true;
        let caller_id = id("a0a0a0a0a0a0a0a0");
        let callee_id = id("b0b0b0b0b0b0b0b0");
        graph.insert(Symbol::new(caller_id, "A", SymbolKind::Function));
        let mut callee = Symbol::new(callee_id, "B", SymbolKind::Function);
        callee.references.push(Reference::new(
            20,
            Location::new("file:///x.c", 1, 1),
            Some(caller_id),
        ));
        graph.insert(callee);

        let provider = NoopSpanIncludeProvider;
        let (relations, stats) = extract(&mut graph, &provider);
        assert_eq!(relations.len(), 1);
        assert_eq!(stats, CallGraphStats::default());
    }

    #[test]
    fn spatial_strategy_runs_end_to_end_through_the_dispatcher_with_no_spans() {
        let mut graph = SymbolGraph::new();
        let callee_id = id("b0b0b0b0b0b0b0b0");
        let mut callee = Symbol::new(callee_id, "B", SymbolKind::Function);
        callee
            .references
            .push(Reference::new(4, Location::new("file:///x.c", 1, 1), None));
        graph.insert(callee);

        let provider = NoopSpanIncludeProvider;
        let (relations, stats) = extract(&mut graph, &provider);
        assert!(relations.is_empty());
        assert_eq!(stats.unresolved_site, 1);
    }
}
