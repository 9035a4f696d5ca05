//! The Graph Builder (§4.3): Passes P1-P5 turning a frozen `SymbolGraph` into
//! node/edge batches ready for the Ingestion Planner.

pub mod batch;
pub mod builder;

pub use batch::{EdgeRecord, GraphBatches, NodeRecord, NodeRef};
pub use builder::{build, orphan_cleanup, BuildStats};
