//! `RunSummary` (§10): everything a caller needs to know about one run,
//! independent of whatever logging sink is attached.

use crate::callgraph::CallGraphStats;
use crate::graph::BuildStats;
use crate::ingest::IngestSummary;
use crate::model::{GraphNodeLabel, SymbolGraph};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct RunSummary {
    pub symbols_parsed: usize,
    pub references_linked: usize,
    pub has_container_field: bool,

    pub nodes_by_label: HashMap<GraphNodeLabel, usize>,
    pub contains_edges: usize,
    pub defines_edges: usize,
    pub includes_edges: usize,
    pub calls_edges: usize,
    pub orphans_removed: usize,

    /// Counted-filtered conditions from the §7 taxonomy, keyed by kind name.
    pub filtered_counts: HashMap<&'static str, usize>,

    pub phase_durations: HashMap<&'static str, Duration>,
}

impl RunSummary {
    pub fn record_parse(&mut self, graph: &SymbolGraph) {
        self.symbols_parsed = graph.len();
        self.has_container_field = graph.has_container_field;
        self.references_linked = graph.iter().map(|s| s.references.len()).sum();
    }

    pub fn record_build(&mut self, nodes_by_label: HashMap<GraphNodeLabel, usize>, stats: &BuildStats) {
        self.nodes_by_label = nodes_by_label;
        self.orphans_removed = stats.orphans_removed;
        self.filtered_counts.insert("unplaceable_symbol", stats.unplaceable_symbols);
        self.filtered_counts.insert("external_include", stats.external_includes);
    }

    pub fn record_call_graph(&mut self, stats: &CallGraphStats) {
        self.filtered_counts.insert("unresolved_container", stats.unresolved_container);
        self.filtered_counts.insert("non_function_caller", stats.non_function_caller);
        self.filtered_counts.insert("span_mismatch", stats.span_mismatches);
        self.filtered_counts.insert("unresolved_call_site", stats.unresolved_site);
    }

    pub fn record_ingest(&mut self, summary: &IngestSummary) {
        self.contains_edges = summary.contains_edges;
        self.defines_edges = summary.defines_edges;
        self.calls_edges = summary.calls_edges;
    }

    pub fn record_phase(&mut self, phase: &'static str, duration: Duration) {
        self.phase_durations.insert(phase, duration);
    }
}
