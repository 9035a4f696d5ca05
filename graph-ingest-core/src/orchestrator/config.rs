//! `OrchestratorConfig`: environment defaults overridden by CLI flags (§10
//! step 4), grouped the way the rest of this codebase structures config.

use crate::ingest::{IngestStrategy, PlannerConfig};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub index_path: PathBuf,
    pub project_root: PathBuf,
    pub parser: ParserConfig,
    pub planner: PlannerConfig,
    pub keep_orphans: bool,
}

#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub workers: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { workers: default_workers() }
    }
}

impl OrchestratorConfig {
    pub fn new(index_path: PathBuf, project_root: PathBuf) -> Self {
        Self {
            index_path,
            project_root,
            parser: ParserConfig::default(),
            planner: PlannerConfig::default(),
            keep_orphans: false,
        }
    }

    /// Overlay environment-variable defaults onto `self`. Unknown or
    /// unparseable variables are ignored; CLI flags (applied by the caller
    /// after this) always win.
    ///
    /// Supported ENV vars (all optional):
    /// - `GRAPH_INGEST_WORKERS`            (usize)
    /// - `GRAPH_INGEST_CYPHER_TX_SIZE`     (usize)
    /// - `GRAPH_INGEST_DEFINES_STRATEGY`   (unwind-create|parallel-merge|parallel-create)
    /// - `GRAPH_INGEST_CALLS_STRATEGY`     (unwind-create|parallel-merge|parallel-create)
    /// - `GRAPH_INGEST_KEEP_ORPHANS`       (bool: true/false/1/0)
    pub fn with_env_defaults(mut self) -> Self {
        if let Some(v) = env_usize("GRAPH_INGEST_WORKERS") {
            self.parser.workers = v;
        }
        if let Some(v) = env_usize("GRAPH_INGEST_CYPHER_TX_SIZE") {
            self.planner.cypher_tx_size = v;
        }
        if let Some(v) = env_strategy("GRAPH_INGEST_DEFINES_STRATEGY") {
            self.planner.defines_strategy = v;
        }
        if let Some(v) = env_strategy("GRAPH_INGEST_CALLS_STRATEGY") {
            self.planner.calls_strategy = v;
        }
        if let Some(v) = env_bool("GRAPH_INGEST_KEEP_ORPHANS") {
            self.keep_orphans = v;
        }
        self
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4)
}

fn env_bool(key: &str) -> Option<bool> {
    env::var(key).ok().and_then(|s| match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    })
}

fn env_usize(key: &str) -> Option<usize> {
    env::var(key).ok().and_then(|s| s.trim().parse::<usize>().ok())
}

fn env_strategy(key: &str) -> Option<IngestStrategy> {
    env::var(key).ok().and_then(|s| match s.trim() {
        "unwind-create" => Some(IngestStrategy::UnwindCreate),
        "parallel-merge" => Some(IngestStrategy::ParallelMerge),
        "parallel-create" => Some(IngestStrategy::ParallelCreate),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = OrchestratorConfig::new(PathBuf::from("index.yaml"), PathBuf::from("."));
        assert!(cfg.parser.workers >= 1);
        assert_eq!(cfg.planner.cypher_tx_size, 2000);
        assert!(!cfg.keep_orphans);
    }

    #[test]
    fn env_strategy_parses_known_values_and_ignores_unknown() {
        assert_eq!(env_strategy_from("unwind-create"), Some(IngestStrategy::UnwindCreate));
        assert_eq!(env_strategy_from("bogus"), None);
    }

    fn env_strategy_from(v: &str) -> Option<IngestStrategy> {
        match v {
            "unwind-create" => Some(IngestStrategy::UnwindCreate),
            "parallel-merge" => Some(IngestStrategy::ParallelMerge),
            "parallel-create" => Some(IngestStrategy::ParallelCreate),
            _ => None,
        }
    }
}
