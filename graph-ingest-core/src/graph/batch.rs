//! Node and edge batch shapes emitted by the Graph Builder passes (§4.3).
//!
//! These are staging structures only — materialising them into database
//! mutations is the Ingestion Planner's job (§4.6). [`NodeRef`] gives every
//! node a stable, content-derived identity so the same file or symbol always
//! resolves to the same batch key, whichever pass produced it.

use crate::model::{GraphEdgeLabel, GraphNodeLabel, SymbolId};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Project,
    Folder(String),
    File(String),
    Symbol(SymbolId),
}

impl Display for NodeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRef::Project => write!(f, "project"),
            NodeRef::Folder(p) => write!(f, "folder:{p}"),
            NodeRef::File(p) => write!(f, "file:{p}"),
            NodeRef::Symbol(id) => write!(f, "symbol:{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub node: NodeRef,
    pub label: GraphNodeLabel,
    pub properties: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub from: NodeRef,
    pub to: NodeRef,
    pub label: GraphEdgeLabel,
}

/// The full set of mutations a Graph Builder run produced, deduplicated by
/// node identity (a path or symbol id is only ever emitted once).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphBatches {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphBatches {
    pub fn new() -> Self {
        Self::default()
    }
}
