//! Spatial strategy (§4.4.b): used when the index carries no `Container`
//! field at all. Function bodies are attached from a [`SpanIncludeProvider`]
//! first, then each legacy-call reference is resolved to its enclosing
//! function by a per-file binary search over sorted body spans.

use crate::model::reference::is_legacy_call;
use crate::model::{BodyLocation, CallRelation, RelativeLocation, SymbolGraph, SymbolId, SymbolKind};
use crate::span::FunctionSpan;
use std::collections::HashMap;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SpatialStats {
    /// A `FunctionSpan` the provider reported didn't match any parsed symbol
    /// by `(file_uri, name, name_location)` — `SpanMismatch`, counted not errored.
    pub span_mismatches: usize,
    /// A legacy-call reference whose location fell inside no known body.
    pub unresolved_site: usize,
}

/// Attach `body_location` to the Function symbols the given spans describe.
/// Returns the number of spans that matched no symbol (`span_mismatches`).
///
/// Matches against the symbol's *definition*, not its canonical declaration:
/// for a function declared in a header and defined in a `.c`/`.cpp` file, the
/// Span Provider's `name_location` is parsed from the definition site, and
/// `canonical_declaration` would point at the header instead and never match.
pub fn attach_spans(graph: &mut SymbolGraph, spans: &[FunctionSpan]) -> usize {
    let mut mismatches = 0;
    for span in spans {
        let hit = graph.iter_mut().find(|s| {
            s.kind == SymbolKind::Function
                && s.name == span.name
                && s.definition.as_ref() == Some(&span.name_location)
        });
        match hit {
            Some(symbol) => symbol.body_location = Some(span.body_location.clone()),
            None => mismatches += 1,
        }
    }
    mismatches
}

/// A file's function bodies, sorted by start position for binary search.
struct FileIndex {
    entries: Vec<(BodyLocation, SymbolId)>,
}

impl FileIndex {
    fn lookup(&self, loc: &RelativeLocation) -> Option<SymbolId> {
        let idx = self.entries.partition_point(|(b, _)| b.start <= *loc);
        self.entries[..idx]
            .iter()
            .rev()
            .find(|(b, _)| b.contains(loc))
            .map(|(_, id)| *id)
    }
}

fn build_index(graph: &SymbolGraph) -> HashMap<String, FileIndex> {
    let mut by_file: HashMap<String, Vec<(BodyLocation, SymbolId)>> = HashMap::new();
    for symbol in graph.iter() {
        if symbol.kind != SymbolKind::Function {
            continue;
        }
        if let Some(body) = &symbol.body_location {
            by_file
                .entry(body.file_uri.clone())
                .or_default()
                .push((body.clone(), symbol.id));
        }
    }
    by_file
        .into_iter()
        .map(|(file, mut entries)| {
            entries.sort_by(|a, b| a.0.start.cmp(&b.0.start));
            (file, FileIndex { entries })
        })
        .collect()
}

pub fn extract(graph: &SymbolGraph) -> (Vec<CallRelation>, SpatialStats) {
    let index = build_index(graph);
    let mut relations = Vec::new();
    let mut stats = SpatialStats::default();

    for symbol in graph.iter() {
        for r in &symbol.references {
            if !is_legacy_call(r.kind_bits) {
                continue;
            }
            let file_index = index.get(&r.location.file_uri);
            let caller = file_index.and_then(|fi| fi.lookup(&r.location.to_relative()));
            match caller {
                Some(caller_id) => {
                    relations.push(CallRelation::new(caller_id, symbol.id, r.location.clone()));
                }
                None => stats.unresolved_site += 1,
            }
        }
    }

    (relations, stats)
}
