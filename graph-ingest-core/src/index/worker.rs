//! Parallel parsing phase (§4.2 step 3): pure, side-effect-free workers that
//! turn one owned chunk into a partial symbol map and a flat unlinked
//! reference list. Workers never reopen the file and never see each other's
//! state — `rayon` fans this out across the worker pool.

use crate::errors::{GraphIngestError, Result};
use crate::index::chunking::DocChunk;
use crate::index::doc::{decode_tagged_document, location_from_raw, symbol_kind_from_str, IndexDoc};
use crate::model::{Symbol, SymbolGraph, SymbolId};
use rayon::prelude::*;
use serde_yml::Deserializer;

/// A reference whose target symbol hasn't been resolved yet — it still
/// carries the target id instead of living inside that symbol's list.
#[derive(Debug)]
pub struct UnlinkedReference {
    pub target: SymbolId,
    pub kind_bits: u32,
    pub location: crate::model::Location,
    pub container_id: Option<SymbolId>,
}

pub struct WorkerOutput {
    pub symbols: Vec<Symbol>,
    pub unlinked: Vec<UnlinkedReference>,
}

/// Parse every chunk in parallel. Each worker is a pure function of its
/// chunk; a worker's YAML error aborts the whole parse (§4.2 step 3).
pub fn parse_chunks_parallel(chunks: &[DocChunk]) -> Result<Vec<WorkerOutput>> {
    chunks
        .par_iter()
        .map(parse_one_chunk)
        .collect::<Result<Vec<_>>>()
}

fn parse_one_chunk(chunk: &DocChunk) -> Result<WorkerOutput> {
    let mut symbols = Vec::new();
    let mut unlinked = Vec::new();

    for (offset, document) in Deserializer::from_str(&chunk.text).enumerate() {
        let doc_index = chunk.start_doc + offset;
        let value: serde_yml::Value =
            serde::Deserialize::deserialize(document).map_err(|source| GraphIngestError::YamlSyntax {
                doc_start: doc_index,
                doc_end: doc_index + 1,
                source,
            })?;

        let decoded = decode_tagged_document(value).map_err(|source| GraphIngestError::YamlSyntax {
            doc_start: doc_index,
            doc_end: doc_index + 1,
            source,
        })?;

        match decoded {
            Some(IndexDoc::Symbol(raw)) => {
                let id = SymbolId::parse(&raw.id).ok_or_else(|| GraphIngestError::YamlSyntax {
                    doc_start: doc_index,
                    doc_end: doc_index + 1,
                    source: <serde_yml::Error as serde::de::Error>::custom(format!("invalid symbol id `{}`", raw.id)),
                })?;
                let kind = raw
                    .sym_info
                    .as_ref()
                    .map(|si| symbol_kind_from_str(&si.kind))
                    .unwrap_or(crate::model::SymbolKind::Other);
                let mut symbol = Symbol::new(id, raw.name, kind);
                symbol.canonical_declaration = raw.canonical_declaration.as_ref().map(location_from_raw);
                symbol.definition = raw.definition.as_ref().map(location_from_raw);
                symbols.push(symbol);
            }
            Some(IndexDoc::Refs(raw)) => {
                let target = SymbolId::parse(&raw.id).ok_or_else(|| GraphIngestError::YamlSyntax {
                    doc_start: doc_index,
                    doc_end: doc_index + 1,
                    source: <serde_yml::Error as serde::de::Error>::custom(format!("invalid ref target id `{}`", raw.id)),
                })?;
                for r in raw.references {
                    let container_id = match r.container {
                        Some(c) => {
                            let parsed = SymbolId::parse(&c).ok_or_else(|| GraphIngestError::YamlSyntax {
                                doc_start: doc_index,
                                doc_end: doc_index + 1,
                                source: <serde_yml::Error as serde::de::Error>::custom(format!(
                                    "invalid container id `{}`",
                                    c
                                )),
                            })?;
                            // The zero id means "no container" (§8 boundary 11).
                            if parsed.is_zero() { None } else { Some(parsed) }
                        }
                        None => None,
                    };
                    unlinked.push(UnlinkedReference {
                        target,
                        kind_bits: r.kind,
                        location: location_from_raw(&r.location),
                        container_id,
                    });
                }
            }
            None => continue,
        }
    }

    Ok(WorkerOutput { symbols, unlinked })
}

/// Fold per-worker symbol lists into one `SymbolGraph`, failing on id
/// collisions (§4.2 step 4 — illegal by construction of the index).
pub fn merge_symbols(outputs: &[WorkerOutput]) -> Result<(SymbolGraph, Vec<&UnlinkedReference>)> {
    let mut graph = SymbolGraph::new();
    let mut unlinked = Vec::new();

    for output in outputs {
        for symbol in &output.symbols {
            if let Some(previous) = graph.insert(symbol.clone()) {
                return Err(GraphIngestError::DuplicateSymbolId(format!(
                    "{} (previously `{}`, now `{}`)",
                    symbol.id, previous.name, symbol.name
                )));
            }
        }
        unlinked.extend(output.unlinked.iter());
    }

    Ok((graph, unlinked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::chunking::DocChunk;

    fn chunk(text: &str) -> DocChunk {
        DocChunk {
            start_doc: 0,
            end_doc: 1,
            text: text.to_string(),
        }
    }

    #[test]
    fn parses_a_symbol_document() {
        let out = parse_one_chunk(&chunk(
            "!Symbol\nID: 'a0a0a0a0a0a0a0a0'\nName: foo\nSymInfo:\n  Kind: Function\n",
        ))
        .unwrap();
        assert_eq!(out.symbols.len(), 1);
        assert_eq!(out.symbols[0].name, "foo");
        assert_eq!(out.unlinked.len(), 0);
    }

    #[test]
    fn parses_a_refs_document() {
        let out = parse_one_chunk(&chunk(
            "!Refs\nID: 'b0b0b0b0b0b0b0b0'\nReferences:\n  - Kind: 20\n    Location:\n      FileURI: 'file:///x.c'\n      Start:\n        Line: 1\n        Column: 1\n    Container: 'a0a0a0a0a0a0a0a0'\n",
        ))
        .unwrap();
        assert_eq!(out.symbols.len(), 0);
        assert_eq!(out.unlinked.len(), 1);
        assert_eq!(out.unlinked[0].kind_bits, 20);
    }

    #[test]
    fn unknown_tag_document_is_skipped() {
        let out = parse_one_chunk(&chunk("!SomethingElse\nfoo: bar\n")).unwrap();
        assert_eq!(out.symbols.len(), 0);
        assert_eq!(out.unlinked.len(), 0);
    }

    #[test]
    fn merge_detects_duplicate_symbol_ids_across_workers() {
        let a = parse_one_chunk(&chunk("!Symbol\nID: 'a0a0a0a0a0a0a0a0'\nName: foo\n")).unwrap();
        let b = parse_one_chunk(&chunk("!Symbol\nID: 'a0a0a0a0a0a0a0a0'\nName: bar\n")).unwrap();
        let err = merge_symbols(&[a, b]).unwrap_err();
        assert!(matches!(err, GraphIngestError::DuplicateSymbolId(_)));
    }

    #[test]
    fn merge_is_invariant_under_worker_grouping() {
        let both_in_one_chunk = parse_one_chunk(&chunk(
            "!Symbol\nID: 'a0a0a0a0a0a0a0a0'\nName: foo\n---\n!Symbol\nID: 'b0b0b0b0b0b0b0b0'\nName: bar\n",
        ))
        .unwrap();
        let (single_worker, _) = merge_symbols(&[both_in_one_chunk]).unwrap();

        let a = parse_one_chunk(&chunk("!Symbol\nID: 'a0a0a0a0a0a0a0a0'\nName: foo\n")).unwrap();
        let b = parse_one_chunk(&chunk("!Symbol\nID: 'b0b0b0b0b0b0b0b0'\nName: bar\n")).unwrap();
        let (two_workers, _) = merge_symbols(&[a, b]).unwrap();

        assert_eq!(single_worker.len(), two_workers.len());
        for s in two_workers.iter() {
            assert_eq!(single_worker.get(&s.id).map(|x| &x.name), Some(&s.name));
        }
    }
}
