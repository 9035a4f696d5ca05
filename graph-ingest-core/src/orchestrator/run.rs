//! Top-level orchestration (§10): parse, build, extract the call graph, then
//! ingest — in the order §5's ordering guarantee requires.

use crate::callgraph;
use crate::errors::Result;
use crate::graph::{self, EdgeRecord, NodeRef};
use crate::ingest;
use crate::ingest::GraphStoreAdapter;
use crate::index;
use crate::model::{GraphEdgeLabel, GraphNodeLabel};
use crate::orchestrator::config::OrchestratorConfig;
use crate::orchestrator::summary::RunSummary;
use crate::span::SpanIncludeProvider;
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;

/// Run the full pipeline against `config`, using `provider` for span/include
/// data and `store` as the write target. Both collaborators are interface
/// boundaries (§2): the orchestrator only depends on their traits.
#[tracing::instrument(level = "info", skip_all, fields(index_path = %config.index_path.display()))]
pub fn run(
    config: &OrchestratorConfig,
    provider: &dyn SpanIncludeProvider,
    store: &mut dyn GraphStoreAdapter,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    // 1. The orchestrator assumes exclusive access for the run and starts
    //    from an empty graph.
    store.reset()?;

    // 2. Parse the index into a fully cross-linked symbol graph.
    let t0 = Instant::now();
    let mut symbol_graph = index::parse(&config.index_path, config.parser.workers)?;
    summary.record_parse(&symbol_graph);
    summary.record_phase("parse", t0.elapsed());
    info!(symbols = symbol_graph.len(), "parsed index");

    // 3. Graph Builder Passes P1-P4 (P5 runs after the call-graph pass).
    let t1 = Instant::now();
    let (mut batches, build_stats) = graph::build(&symbol_graph, provider, &config.project_root);
    summary.includes_edges = batches
        .edges
        .iter()
        .filter(|e| e.label == GraphEdgeLabel::Includes)
        .count();
    summary.record_phase("graph_build", t1.elapsed());
    info!(nodes = batches.nodes.len(), edges = batches.edges.len(), "built graph batches");

    // 4. Extract the call graph, adaptively, then fold CALLS edges into the
    //    batch so Pass P5 doesn't mistake a call-only symbol for an orphan.
    let t2 = Instant::now();
    let (call_relations, call_stats) = callgraph::extract(&mut symbol_graph, provider);
    for relation in &call_relations {
        batches.edges.push(EdgeRecord {
            from: NodeRef::Symbol(relation.caller),
            to: NodeRef::Symbol(relation.callee),
            label: GraphEdgeLabel::Calls,
        });
    }
    summary.record_call_graph(&call_stats);
    summary.record_phase("call_graph", t2.elapsed());
    info!(relations = call_relations.len(), "extracted call graph");

    // 5. Pass P5: orphan cleanup, unless the caller asked to keep them.
    let mut build_stats = build_stats;
    if !config.keep_orphans {
        graph::orphan_cleanup(&mut batches, &mut build_stats);
    }
    summary.record_build(count_nodes_by_label(&batches), &build_stats);

    // 6. Plan and submit the ingestion.
    let t3 = Instant::now();
    let ingest_summary = ingest::run(store, &batches, &call_relations, &config.planner)?;
    summary.record_ingest(&ingest_summary);
    summary.record_phase("ingest", t3.elapsed());
    info!("ingestion complete");

    Ok(summary)
}

fn count_nodes_by_label(batches: &graph::GraphBatches) -> HashMap<GraphNodeLabel, usize> {
    let mut counts = HashMap::new();
    for node in &batches.nodes {
        *counts.entry(node.label).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::RecordingGraphStoreAdapter;
    use crate::span::NoopSpanIncludeProvider;

    #[test]
    fn run_against_an_empty_index_produces_an_empty_but_successful_summary() {
        let tmp = tempfile::tempdir().unwrap();
        let index_path = tmp.path().join("index.yaml");
        std::fs::write(&index_path, b"").unwrap();

        let config = OrchestratorConfig::new(index_path, tmp.path().to_path_buf());
        let provider = NoopSpanIncludeProvider;
        let mut store = RecordingGraphStoreAdapter::default();

        let summary = run(&config, &provider, &mut store).unwrap();
        assert_eq!(summary.symbols_parsed, 0);
        assert_eq!(store.reset_count, 1);
    }

    #[test]
    fn run_ingests_a_small_symbol_graph_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("x.c"), b"").unwrap();
        let index_path = tmp.path().join("index.yaml");
        std::fs::write(
            &index_path,
            format!(
                "---\n!Symbol\nID: 'a0a0a0a0a0a0a0a0'\nName: foo\nSymInfo:\n  Kind: Function\nDefinition:\n  FileURI: 'file://{}'\n  Start:\n    Line: 1\n    Column: 1\n",
                tmp.path().join("x.c").display()
            ),
        )
        .unwrap();

        let config = OrchestratorConfig::new(index_path, tmp.path().to_path_buf());
        let provider = NoopSpanIncludeProvider;
        let mut store = RecordingGraphStoreAdapter::default();

        let summary = run(&config, &provider, &mut store).unwrap();
        assert_eq!(summary.symbols_parsed, 1);
        assert!(store.nodes_created > 0);
    }
}
