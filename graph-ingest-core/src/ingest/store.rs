//! Graph Store Adapter: a thin trait isolating the rest of the crate from
//! whichever graph database a caller wires in (§2 #4, non-goal: the database
//! itself). Mirrors the facade-over-client shape used elsewhere in this
//! ecosystem for external stores — one struct, one method per operation kind,
//! every database-specific detail kept on the other side of the trait.

use crate::errors::Result;
use crate::graph::{EdgeRecord, NodeRecord};

/// One committed unit of work, as the planner hands it to the adapter.
pub trait GraphStoreAdapter {
    /// Drop every node and edge. The orchestrator calls this once at the
    /// start of a run (§5: "assumes exclusive access and resets the database
    /// at start").
    fn reset(&mut self) -> Result<()>;

    /// Single-threaded unwind-create of a node batch (§4.3 P1/P2).
    fn create_nodes(&mut self, nodes: &[NodeRecord]) -> Result<()>;

    /// Single-threaded unwind-create of an edge batch with no grouping
    /// (CONTAINS/INCLUDES, and the unwind-create defines/calls strategy).
    fn create_edges_unwind(&mut self, edges: &[EdgeRecord]) -> Result<()>;

    /// Parallel, deadlock-safe ingestion: each inner `Vec` shares one
    /// endpoint, so the adapter may process different groups concurrently
    /// without two workers ever write-locking the same node (§4.6). `merge`
    /// selects MERGE (idempotent) vs CREATE (duplicating, faster) semantics.
    fn ingest_grouped(&mut self, groups: &[Vec<EdgeRecord>], server_batch_size: usize, merge: bool) -> Result<()>;
}

/// A no-op adapter that records every call instead of talking to a database.
/// Used to wire the pipeline end to end, and in tests, when no real adapter
/// is attached.
#[derive(Debug, Default)]
pub struct RecordingGraphStoreAdapter {
    pub reset_count: usize,
    pub nodes_created: usize,
    pub edges_created_unwind: usize,
    pub grouped_submissions: usize,
    pub edges_created_grouped: usize,
}

impl GraphStoreAdapter for RecordingGraphStoreAdapter {
    fn reset(&mut self) -> Result<()> {
        self.reset_count += 1;
        Ok(())
    }

    fn create_nodes(&mut self, nodes: &[NodeRecord]) -> Result<()> {
        self.nodes_created += nodes.len();
        Ok(())
    }

    fn create_edges_unwind(&mut self, edges: &[EdgeRecord]) -> Result<()> {
        self.edges_created_unwind += edges.len();
        Ok(())
    }

    fn ingest_grouped(&mut self, groups: &[Vec<EdgeRecord>], _server_batch_size: usize, _merge: bool) -> Result<()> {
        self.grouped_submissions += groups.len();
        self.edges_created_grouped += groups.iter().map(Vec::len).sum::<usize>();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GraphEdgeLabel, SymbolId};
    use crate::graph::NodeRef;

    #[test]
    fn recording_adapter_tallies_every_call() {
        let mut store = RecordingGraphStoreAdapter::default();
        store.reset().unwrap();
        store
            .create_edges_unwind(&[EdgeRecord {
                from: NodeRef::Project,
                to: NodeRef::Folder("src".into()),
                label: GraphEdgeLabel::Contains,
            }])
            .unwrap();
        store
            .ingest_grouped(
                &[vec![EdgeRecord {
                    from: NodeRef::File("x.c".into()),
                    to: NodeRef::Symbol(SymbolId::parse("a0a0a0a0a0a0a0a0").unwrap()),
                    label: GraphEdgeLabel::Defines,
                }]],
                10,
                true,
            )
            .unwrap();

        assert_eq!(store.reset_count, 1);
        assert_eq!(store.edges_created_unwind, 1);
        assert_eq!(store.grouped_submissions, 1);
        assert_eq!(store.edges_created_grouped, 1);
    }
}
