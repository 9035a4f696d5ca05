//! Single-threaded link phase (§4.2 step 5): attach every unlinked reference
//! to its target symbol's reference list, and derive `has_container_field`.
//!
//! Kept single-threaded deliberately: this is one dictionary insertion per
//! reference into a shared mutable map-of-vectors, and the useful
//! parallelism already happened during YAML tokenisation.

use crate::index::worker::UnlinkedReference;
use crate::model::{Reference, SymbolGraph};

pub fn link(mut graph: SymbolGraph, unlinked: Vec<&UnlinkedReference>) -> SymbolGraph {
    let mut has_container_field = false;

    for u in unlinked {
        if u.container_id.is_some() {
            has_container_field = true;
        }
        if let Some(symbol) = graph.get_mut(&u.target) {
            symbol
                .references
                .push(Reference::new(u.kind_bits, u.location.clone(), u.container_id));
        }
        // Target absent from the map: tolerated (§8 boundary 9 / scenario S5).
    }

    graph.has_container_field = has_container_field;
    graph
}
