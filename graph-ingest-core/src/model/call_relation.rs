//! The output of the Call-Graph Extractor: a directed caller→callee edge.

use crate::model::location::Location;
use crate::model::symbol_id::SymbolId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRelation {
    pub caller: SymbolId,
    pub callee: SymbolId,
    pub site: Location,
}

impl CallRelation {
    pub fn new(caller: SymbolId, callee: SymbolId, site: Location) -> Self {
        Self { caller, callee, site }
    }
}
