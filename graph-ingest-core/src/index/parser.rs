//! Public entry point for the Index Parser (§4.2): cache lookup, chunking,
//! parallel parsing, merge, and the single-threaded link phase.

use crate::errors::Result;
use crate::index::{cache, chunking, link, worker};
use crate::model::SymbolGraph;
use std::path::Path;
use tracing::info;

/// Parse `index_path` into a fully cross-linked [`SymbolGraph`], using
/// `workers` parallel chunk workers. Transparently serves a fresh on-disk
/// cache instead of re-reading the YAML when one exists.
#[tracing::instrument(level = "info", skip_all, fields(index_path = %index_path.display(), workers))]
pub fn parse(index_path: &Path, workers: usize) -> Result<SymbolGraph> {
    let cache_path = cache::cache_path_for(index_path);

    if cache::is_fresh(index_path, &cache_path) {
        match cache::load(&cache_path) {
            Ok(graph) => {
                info!(symbols = graph.len(), "served from cache");
                return Ok(graph);
            }
            Err(err) => {
                // Discard and fall back to a full parse (§7 CacheCorrupted policy).
                tracing::warn!(error = %err, "cache corrupted, reparsing");
            }
        }
    }

    let chunks = chunking::read_and_chunk(index_path, workers)?;
    info!(chunks = chunks.len(), "chunked index file");

    let outputs = worker::parse_chunks_parallel(&chunks)?;
    let (graph, unlinked) = worker::merge_symbols(&outputs)?;
    info!(symbols = graph.len(), refs = unlinked.len(), "merged worker output");

    let graph = link::link(graph, unlinked);
    info!(
        symbols = graph.len(),
        has_container_field = graph.has_container_field,
        "linked symbol graph"
    );

    if let Err(err) = cache::store(&cache_path, &graph) {
        tracing::warn!(error = %err, "failed to write parse cache");
    }

    Ok(graph)
}
