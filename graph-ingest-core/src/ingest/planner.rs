//! The Ingestion Planner (§4.6): converts Graph Builder batches and extracted
//! call relations into Graph Store Adapter mutations, grouping high-volume
//! edge sets by shared endpoint to avoid write-lock deadlocks on the server.

use crate::errors::Result;
use crate::graph::{EdgeRecord, GraphBatches, NodeRef};
use crate::ingest::store::GraphStoreAdapter;
use crate::ingest::strategy::{server_batch_size, IngestStrategy};
use crate::model::{CallRelation, GraphEdgeLabel};
use std::collections::HashMap;
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct PlannerConfig {
    pub defines_strategy: IngestStrategy,
    pub calls_strategy: IngestStrategy,
    pub cypher_tx_size: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            defines_strategy: IngestStrategy::ParallelCreate,
            calls_strategy: IngestStrategy::ParallelCreate,
            cypher_tx_size: 2000,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub nodes: usize,
    pub contains_edges: usize,
    pub includes_edges: usize,
    pub defines_edges: usize,
    pub defines_groups: usize,
    pub calls_edges: usize,
    pub calls_groups: usize,
    /// A call relation whose caller symbol has no known defining file, so it
    /// couldn't be grouped by caller file and went into a catch-all group.
    pub calls_without_known_caller_file: usize,
}

/// Run the full plan against `store`. Does not reset the store — the
/// orchestrator does that once per run, before any pass runs.
#[tracing::instrument(level = "info", skip_all)]
pub fn run(
    store: &mut dyn GraphStoreAdapter,
    batches: &GraphBatches,
    call_relations: &[CallRelation],
    config: &PlannerConfig,
) -> Result<IngestSummary> {
    let mut summary = IngestSummary::default();

    store.create_nodes(&batches.nodes)?;
    summary.nodes = batches.nodes.len();

    let other_edges: Vec<EdgeRecord> = batches
        .edges
        .iter()
        .filter(|e| matches!(e.label, GraphEdgeLabel::Contains | GraphEdgeLabel::Includes))
        .cloned()
        .collect();
    store.create_edges_unwind(&other_edges)?;
    summary.contains_edges = other_edges.iter().filter(|e| e.label == GraphEdgeLabel::Contains).count();
    summary.includes_edges = other_edges.iter().filter(|e| e.label == GraphEdgeLabel::Includes).count();

    let defines_edges: Vec<EdgeRecord> = batches
        .edges
        .iter()
        .filter(|e| e.label == GraphEdgeLabel::Defines)
        .cloned()
        .collect();
    summary.defines_edges = defines_edges.len();
    summary.defines_groups = submit_edges(store, &defines_edges, config.defines_strategy, config.cypher_tx_size, |e| e.from.clone())?;

    let caller_file = caller_file_index(&defines_edges);
    let calls_edges: Vec<EdgeRecord> = call_relations
        .iter()
        .map(|r| EdgeRecord {
            from: NodeRef::Symbol(r.caller),
            to: NodeRef::Symbol(r.callee),
            label: GraphEdgeLabel::Calls,
        })
        .collect();
    summary.calls_edges = calls_edges.len();
    summary.calls_without_known_caller_file = calls_edges
        .iter()
        .filter(|e| matches!(&e.from, NodeRef::Symbol(id) if !caller_file.contains_key(id)))
        .count();
    summary.calls_groups = submit_edges(store, &calls_edges, config.calls_strategy, config.cypher_tx_size, |e| {
        match &e.from {
            NodeRef::Symbol(id) => caller_file.get(id).cloned().unwrap_or(NodeRef::Project),
            other => other.clone(),
        }
    })?;

    info!(
        nodes = summary.nodes,
        defines = summary.defines_edges,
        calls = summary.calls_edges,
        "ingestion complete"
    );
    Ok(summary)
}

/// Caller symbol id -> the file `NodeRef` that defines it, derived from the
/// already-emitted defines edges so the calls pass doesn't recompute paths.
fn caller_file_index(defines_edges: &[EdgeRecord]) -> HashMap<crate::model::SymbolId, NodeRef> {
    defines_edges
        .iter()
        .filter_map(|e| match &e.to {
            NodeRef::Symbol(id) => Some((*id, e.from.clone())),
            _ => None,
        })
        .collect()
}

/// Submit one edge batch under the given strategy. Returns the number of
/// groups submitted (1 for `UnwindCreate`, since it's a single submission).
fn submit_edges(
    store: &mut dyn GraphStoreAdapter,
    edges: &[EdgeRecord],
    strategy: IngestStrategy,
    cypher_tx_size: usize,
    group_key: impl Fn(&EdgeRecord) -> NodeRef,
) -> Result<usize> {
    if edges.is_empty() {
        return Ok(0);
    }
    if !strategy.is_grouped() {
        store.create_edges_unwind(edges)?;
        return Ok(1);
    }

    let mut grouped: HashMap<NodeRef, Vec<EdgeRecord>> = HashMap::new();
    for edge in edges {
        grouped.entry(group_key(edge)).or_default().push(edge.clone());
    }
    let groups: Vec<Vec<EdgeRecord>> = grouped.into_values().collect();
    let batch_size = server_batch_size(cypher_tx_size, groups.len(), edges.len());
    store.ingest_grouped(&groups, batch_size, strategy.uses_merge())?;
    Ok(groups.len())
}
