//! The atomic indexed entity: a declared or defined code symbol.

use crate::model::location::{BodyLocation, Location};
use crate::model::reference::Reference;
use crate::model::symbol_id::SymbolId;
use serde::{Deserialize, Serialize};

/// Closed tagged variant for symbol kinds, replacing the index's integer-bag
/// representation. Only the node-worthy kinds become graph nodes (§3, §4.3 P2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Class,
    Struct,
    Union,
    Enum,
    Variable,
    Field,
    Macro,
    Other,
}

impl SymbolKind {
    /// Whether a Symbol of this kind becomes a graph node in Pass P2.
    pub fn is_node_kind(self) -> bool {
        matches!(
            self,
            SymbolKind::Function
                | SymbolKind::Class
                | SymbolKind::Struct
                | SymbolKind::Union
                | SymbolKind::Enum
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
    pub canonical_declaration: Option<Location>,
    pub definition: Option<Location>,
    pub signature: Option<String>,
    pub return_type: Option<String>,
    pub scope: Option<String>,
    /// Usage sites *of* this symbol, appended only during the link phase.
    #[serde(default)]
    pub references: Vec<Reference>,
    /// Attached exactly once, only by the Spatial strategy's matching pass.
    #[serde(default)]
    pub body_location: Option<BodyLocation>,
}

impl Symbol {
    pub fn new(id: SymbolId, name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            canonical_declaration: None,
            definition: None,
            signature: None,
            return_type: None,
            scope: None,
            references: Vec::new(),
            body_location: None,
        }
    }

    /// The site used to place this symbol in the file hierarchy: the
    /// definition if present, else the canonical declaration (§4.3 P2).
    pub fn placement_site(&self) -> Option<&Location> {
        self.definition.as_ref().or(self.canonical_declaration.as_ref())
    }

    pub fn is_graph_node(&self) -> bool {
        self.kind.is_node_kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(hex: &str) -> SymbolId {
        SymbolId::parse(hex).unwrap()
    }

    #[test]
    fn placement_site_prefers_definition_over_declaration() {
        let mut s = Symbol::new(id("a0a0a0a0a0a0a0a0"), "foo", SymbolKind::Function);
        s.canonical_declaration = Some(Location::new("file:///a.h", 1, 1));
        s.definition = Some(Location::new("file:///a.c", 10, 5));
        assert_eq!(s.placement_site().unwrap().file_uri, "file:///a.c");
    }

    #[test]
    fn placement_site_falls_back_to_declaration() {
        let mut s = Symbol::new(id("a0a0a0a0a0a0a0a0"), "foo", SymbolKind::Function);
        s.canonical_declaration = Some(Location::new("file:///a.h", 1, 1));
        assert_eq!(s.placement_site().unwrap().file_uri, "file:///a.h");
    }

    #[test]
    fn only_node_kinds_become_graph_nodes() {
        assert!(SymbolKind::Function.is_node_kind());
        assert!(SymbolKind::Struct.is_node_kind());
        assert!(!SymbolKind::Variable.is_node_kind());
        assert!(!SymbolKind::Macro.is_node_kind());
    }
}
