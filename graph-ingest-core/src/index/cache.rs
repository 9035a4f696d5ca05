//! Persistent parse cache, keyed on source freshness (§4.2 step 1, §6).
//!
//! The cache path is derived deterministically from the input path by
//! replacing its extension. The binary format is self-describing enough to
//! fail cleanly (as `CacheCorrupted`, never a panic) on a version mismatch or
//! truncated write.

use crate::errors::{GraphIngestError, Result};
use crate::model::SymbolGraph;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bumped whenever `CachePayload`'s shape changes incompatibly.
const CACHE_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct CachePayload {
    format_version: u32,
    graph: SymbolGraph,
}

pub fn cache_path_for(index_path: &Path) -> PathBuf {
    index_path.with_extension("graphcache")
}

/// `true` iff a readable cache exists and is newer than the input file.
pub fn is_fresh(index_path: &Path, cache_path: &Path) -> bool {
    let (Ok(index_meta), Ok(cache_meta)) = (index_path.metadata(), cache_path.metadata()) else {
        return false;
    };
    let (Ok(index_mtime), Ok(cache_mtime)) = (index_meta.modified(), cache_meta.modified()) else {
        return false;
    };
    cache_mtime > index_mtime
}

/// Load and deserialise the cache. Returns `CacheCorrupted` (never panics)
/// on a truncated file, a version mismatch, or any other decode failure —
/// callers fall back to a full parse.
pub fn load(cache_path: &Path) -> Result<SymbolGraph> {
    let bytes = std::fs::read(cache_path)?;
    let payload: CachePayload = bincode::deserialize(&bytes)
        .map_err(|e| GraphIngestError::CacheCorrupted(e.to_string()))?;
    if payload.format_version != CACHE_FORMAT_VERSION {
        return Err(GraphIngestError::CacheCorrupted(format!(
            "cache format version {} does not match expected {}",
            payload.format_version, CACHE_FORMAT_VERSION
        )));
    }
    Ok(payload.graph)
}

pub fn store(cache_path: &Path, graph: &SymbolGraph) -> Result<()> {
    let payload = CachePayload {
        format_version: CACHE_FORMAT_VERSION,
        graph: graph.clone(),
    };
    let bytes = bincode::serialize(&payload)
        .map_err(|e| GraphIngestError::CacheCorrupted(e.to_string()))?;
    std::fs::write(cache_path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Symbol, SymbolId, SymbolKind};
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn cache_path_replaces_extension() {
        let p = cache_path_for(Path::new("/data/project.index.yaml"));
        assert_eq!(p, PathBuf::from("/data/project.index.graphcache"));
    }

    #[test]
    fn store_then_load_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let cache_path = tmp.path().join("x.graphcache");

        let mut graph = SymbolGraph::new();
        graph.insert(Symbol::new(
            SymbolId::parse("a0a0a0a0a0a0a0a0").unwrap(),
            "foo",
            SymbolKind::Function,
        ));
        graph.has_container_field = true;

        store(&cache_path, &graph).unwrap();
        let loaded = load(&cache_path).unwrap();
        assert_eq!(loaded, graph);
    }

    #[test]
    fn corrupted_cache_is_reported_not_panicked() {
        let tmp = tempfile::tempdir().unwrap();
        let cache_path = tmp.path().join("x.graphcache");
        std::fs::write(&cache_path, b"not a valid payload").unwrap();
        let err = load(&cache_path).unwrap_err();
        assert!(matches!(err, GraphIngestError::CacheCorrupted(_)));
    }

    #[test]
    fn freshness_requires_cache_newer_than_input() {
        let tmp = tempfile::tempdir().unwrap();
        let index_path = tmp.path().join("x.yaml");
        let cache_path = tmp.path().join("x.graphcache");

        std::fs::write(&index_path, b"---\n!Symbol\nID: a\n").unwrap();
        assert!(!is_fresh(&index_path, &cache_path));

        sleep(Duration::from_millis(10));
        std::fs::write(&cache_path, b"stub").unwrap();
        assert!(is_fresh(&index_path, &cache_path));

        sleep(Duration::from_millis(10));
        std::fs::write(&index_path, b"---\n!Symbol\nID: b\n").unwrap();
        assert!(!is_fresh(&index_path, &cache_path));
    }
}
