//! Error types shared across the index parser, graph builder, and ingestion planner.

use thiserror::Error;

/// Fatal failure kinds, plus `PathOutsideProject` and `CacheCorrupted`, whose
/// callers always handle the `Err` locally (skip the path, discard the
/// cache) rather than propagating it — they're never surfaced to a run's
/// caller. `UnresolvedContainer` and `SpanMismatch` don't even get that much:
/// they're counted directly into a [`crate::orchestrator::summary::RunSummary`]
/// at the point of occurrence and never constructed as error values at all.
#[derive(Error, Debug)]
pub enum GraphIngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml syntax error in chunk (docs {doc_start}..{doc_end}): {source}")]
    YamlSyntax {
        doc_start: usize,
        doc_end: usize,
        #[source]
        source: serde_yml::Error,
    },

    #[error("duplicate symbol id `{0}` produced by two workers")]
    DuplicateSymbolId(String),

    #[error("worker crashed: {0}")]
    WorkerCrashed(String),

    #[error("path `{0}` escapes the project root")]
    PathOutsideProject(String),

    #[error("ingestion timed out after {0:?}")]
    IngestTimeout(std::time::Duration),

    #[error("cache file corrupted: {0}")]
    CacheCorrupted(String),
}

pub type Result<T> = std::result::Result<T, GraphIngestError>;
