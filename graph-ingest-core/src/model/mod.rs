//! Data model shared by every subsystem: the atomic `Symbol`/`Reference`
//! types, the frozen `SymbolGraph` they live in, and the file-system and
//! graph-edge shapes the Graph Builder passes emit.

pub mod call_relation;
pub mod fs_entities;
pub mod graph_edge;
pub mod include_edge;
pub mod location;
pub mod reference;
pub mod symbol;
pub mod symbol_graph;
pub mod symbol_id;

pub use call_relation::CallRelation;
pub use fs_entities::ProjectEntry;
pub use graph_edge::{GraphEdgeLabel, GraphNodeLabel};
pub use include_edge::IncludeEdge;
pub use location::{BodyLocation, Location, RelativeLocation};
pub use reference::Reference;
pub use symbol::{Symbol, SymbolKind};
pub use symbol_graph::SymbolGraph;
pub use symbol_id::SymbolId;
