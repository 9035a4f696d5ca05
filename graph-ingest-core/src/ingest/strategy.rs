//! The three ingestion strategies and their batch-size math (§4.6).

/// Configurable per edge pass (defines-edges and calls-edges each pick one
/// independently).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestStrategy {
    /// Single client batch, server-side MATCH+CREATE, no grouping. Idempotent
    /// only on an empty graph.
    UnwindCreate,
    /// Grouped by shared endpoint, MERGE semantics. Idempotent, deadlock-safe.
    ParallelMerge,
    /// Grouped by shared endpoint, CREATE semantics. Fastest, not idempotent.
    #[default]
    ParallelCreate,
}

impl IngestStrategy {
    pub fn is_grouped(self) -> bool {
        !matches!(self, IngestStrategy::UnwindCreate)
    }

    pub fn uses_merge(self) -> bool {
        matches!(self, IngestStrategy::ParallelMerge)
    }
}

/// Client batch size `B_c`: roughly `cypher_tx_size * parse_workers` (§4.6).
pub fn client_batch_size(cypher_tx_size: usize, parse_workers: usize) -> usize {
    cypher_tx_size.saturating_mul(parse_workers.max(1))
}

/// Server batch size `B_s = max(1, cypher_tx_size / avg_edges_per_group)`.
pub fn server_batch_size(cypher_tx_size: usize, group_count: usize, total_edges: usize) -> usize {
    if group_count == 0 || total_edges == 0 {
        return cypher_tx_size.max(1);
    }
    let avg_edges_per_group = (total_edges as f64 / group_count as f64).max(1.0);
    ((cypher_tx_size as f64 / avg_edges_per_group).floor() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwind_create_is_the_only_ungrouped_strategy() {
        assert!(!IngestStrategy::UnwindCreate.is_grouped());
        assert!(IngestStrategy::ParallelMerge.is_grouped());
        assert!(IngestStrategy::ParallelCreate.is_grouped());
    }

    #[test]
    fn only_parallel_merge_uses_merge_semantics() {
        assert!(!IngestStrategy::UnwindCreate.uses_merge());
        assert!(IngestStrategy::ParallelMerge.uses_merge());
        assert!(!IngestStrategy::ParallelCreate.uses_merge());
    }

    #[test]
    fn client_batch_size_scales_with_workers() {
        assert_eq!(client_batch_size(2000, 4), 8000);
        assert_eq!(client_batch_size(2000, 0), 2000);
    }

    #[test]
    fn server_batch_size_divides_by_group_average() {
        // 2000 / (1000 edges / 10 groups = 100 avg) = 20
        assert_eq!(server_batch_size(2000, 10, 1000), 20);
    }

    #[test]
    fn server_batch_size_never_drops_below_one() {
        assert_eq!(server_batch_size(2000, 1, 1_000_000), 1);
        assert_eq!(server_batch_size(2000, 0, 0), 2000);
    }
}
