//! Single-threaded chunking phase (§4.2 step 2): read the index file once,
//! normalise tabs to spaces, and slice it at document boundaries into W·k
//! owned byte buffers for the parallel parsing phase.

use crate::errors::Result;
use std::path::Path;

/// Target chunk count is `workers * LOAD_FACTOR`, keeping chunk granularity
/// finer than the worker count for load balance (§4.2: "typically k∈[2,4]").
const LOAD_FACTOR: usize = 3;

pub struct DocChunk {
    /// Index of the first document in this chunk (0-based, across the whole file).
    pub start_doc: usize,
    /// Index one past the last document in this chunk.
    pub end_doc: usize,
    /// The raw, `---`-delimited YAML text for this chunk's documents.
    pub text: String,
}

/// Read `index_path`, convert tabs to spaces (the upstream producer emits
/// tabs that strict YAML rejects), and split it into chunks at `---`
/// document boundaries. Never splits a document across two chunks.
pub fn read_and_chunk(index_path: &Path, workers: usize) -> Result<Vec<DocChunk>> {
    let raw = std::fs::read_to_string(index_path)?;
    let normalised = raw.replace('\t', "    ");

    let doc_bounds = document_boundaries(&normalised);
    if doc_bounds.is_empty() {
        return Ok(Vec::new());
    }

    let target_chunks = (workers.max(1) * LOAD_FACTOR).max(1);
    let docs_per_chunk = (doc_bounds.len() + target_chunks - 1) / target_chunks;
    let docs_per_chunk = docs_per_chunk.max(1);

    let mut chunks = Vec::new();
    for (chunk_idx, group) in doc_bounds.chunks(docs_per_chunk).enumerate() {
        let start_doc = chunk_idx * docs_per_chunk;
        let end_doc = start_doc + group.len();
        let byte_start = group.first().unwrap().0;
        let byte_end = group.last().unwrap().1;
        chunks.push(DocChunk {
            start_doc,
            end_doc,
            text: normalised[byte_start..byte_end].to_string(),
        });
    }
    Ok(chunks)
}

/// Find the `(start_byte, end_byte)` of every `---`-delimited document in
/// `text`. A document starts at a `---` line (or the start of the file) and
/// ends just before the next `---` line or end of file.
fn document_boundaries(text: &str) -> Vec<(usize, usize)> {
    let mut separator_starts = vec![0usize];
    for (offset, _) in text.match_indices("\n---") {
        // +1 to skip the newline and point at the `---` itself.
        separator_starts.push(offset + 1);
    }

    let mut bounds = Vec::with_capacity(separator_starts.len());
    for window in separator_starts.windows(2) {
        bounds.push((window[0], window[1]));
    }
    if let Some(&last) = separator_starts.last() {
        if last < text.len() {
            bounds.push((last, text.len()));
        }
    }
    bounds.retain(|(s, e)| text[*s..*e].trim() != "---" && !text[*s..*e].trim().is_empty());
    bounds
}
