//! Graph Builder passes P1-P5 (§4.3): pure transformations from the frozen
//! `SymbolGraph` plus Span/Include Provider output into node/edge batches.

use crate::graph::batch::{EdgeRecord, GraphBatches, NodeRecord, NodeRef};
use crate::model::{GraphEdgeLabel, GraphNodeLabel, IncludeEdge, ProjectEntry, SymbolGraph, SymbolKind};
use crate::path::normalize::{to_project_relative, uri_to_path};
use crate::span::SpanIncludeProvider;
use serde_json::{json, Value};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// A node-worthy symbol had neither a definition nor a declaration site.
    pub unplaceable_symbols: usize,
    /// An include edge endpoint normalised outside the project root.
    pub external_includes: usize,
    /// Nodes removed by Pass P5 (only populated when orphan cleanup runs).
    pub orphans_removed: usize,
}

/// Run Passes P1-P4 over `graph`, producing node/edge batches. Pass P5
/// (orphan cleanup) is deliberately not run here — the ordering guarantee
/// (§5) places it after the call-graph pass, so callers run
/// [`orphan_cleanup`] once CALLS edges have been folded into the batch.
pub fn build(
    graph: &SymbolGraph,
    provider: &dyn SpanIncludeProvider,
    project_root: &Path,
) -> (GraphBatches, BuildStats) {
    let mut stats = BuildStats::default();
    let include_edges = provider.include_edges();

    let mut batches = GraphBatches::new();
    let known_files = pass_p1_file_hierarchy(graph, &include_edges, project_root, &mut batches);
    pass_p2_symbol_nodes(graph, project_root, &mut batches, &mut stats);
    pass_p3_defines_edges(graph, project_root, &mut batches);
    pass_p4_include_edges(&include_edges, project_root, &known_files, &mut batches, &mut stats);

    (batches, stats)
}

/// Pass P5: remove every node whose total degree is zero. Runs after the
/// call-graph pass has folded its CALLS edges into `batches` so a
/// call-only symbol isn't mistaken for an orphan.
pub fn orphan_cleanup(batches: &mut GraphBatches, stats: &mut BuildStats) {
    pass_p5_orphan_cleanup(batches, stats);
}

/// Every project-relative directory ancestor of `file`, shallowest first,
/// excluding the file itself. `"src/a/b.c"` yields `["src", "src/a"]`.
fn ancestor_dirs(file: &str) -> Vec<String> {
    let segments: Vec<&str> = file.split('/').collect();
    let mut dirs = Vec::new();
    for depth in 1..segments.len() {
        dirs.push(segments[..depth].join("/"));
    }
    dirs
}

fn parent_of(path: &str) -> NodeRef {
    match path.rsplit_once('/') {
        Some((parent, _)) => NodeRef::Folder(parent.to_string()),
        None => NodeRef::Project,
    }
}

fn pass_p1_file_hierarchy(
    graph: &SymbolGraph,
    include_edges: &[(std::path::PathBuf, std::path::PathBuf)],
    project_root: &Path,
    batches: &mut GraphBatches,
) -> BTreeSet<String> {
    let mut files: BTreeSet<String> = BTreeSet::new();

    for symbol in graph.iter() {
        if let Some(site) = symbol.placement_site() {
            let abs = uri_to_path(&site.file_uri);
            if let Ok(rel) = to_project_relative(project_root, &abs) {
                files.insert(rel);
            }
        }
    }
    for (including, included) in include_edges {
        if let Ok(rel) = to_project_relative(project_root, including) {
            files.insert(rel);
        }
        if let Ok(rel) = to_project_relative(project_root, included) {
            files.insert(rel);
        }
    }

    let mut dirs: BTreeSet<String> = BTreeSet::new();
    for file in &files {
        dirs.extend(ancestor_dirs(file));
    }

    // Ascending depth so a folder's parent is always emitted first.
    let mut dirs: Vec<String> = dirs.into_iter().collect();
    dirs.sort_by_key(|d| d.matches('/').count());

    let project = ProjectEntry::new(project_root.display().to_string());
    batches.nodes.push(NodeRecord {
        node: NodeRef::Project,
        label: GraphNodeLabel::Project,
        properties: json_props(&[("root", json!(project.root)), ("vcs_commit", json!(project.vcs_commit))]),
    });

    for dir in &dirs {
        batches.nodes.push(NodeRecord {
            node: NodeRef::Folder(dir.clone()),
            label: GraphNodeLabel::Folder,
            properties: json_props(&[("path", json!(dir))]),
        });
        batches.edges.push(EdgeRecord {
            from: parent_of(dir),
            to: NodeRef::Folder(dir.clone()),
            label: GraphEdgeLabel::Contains,
        });
    }

    for file in &files {
        batches.nodes.push(NodeRecord {
            node: NodeRef::File(file.clone()),
            label: GraphNodeLabel::File,
            properties: json_props(&[("path", json!(file))]),
        });
        batches.edges.push(EdgeRecord {
            from: parent_of(file),
            to: NodeRef::File(file.clone()),
            label: GraphEdgeLabel::Contains,
        });
    }

    files
}

fn pass_p2_symbol_nodes(
    graph: &SymbolGraph,
    project_root: &Path,
    batches: &mut GraphBatches,
    stats: &mut BuildStats,
) {
    for symbol in graph.iter() {
        if !symbol.is_graph_node() {
            continue;
        }
        let Some(site) = symbol.placement_site() else {
            stats.unplaceable_symbols += 1;
            continue;
        };
        let abs = uri_to_path(&site.file_uri);
        let Ok(path) = to_project_relative(project_root, &abs) else {
            stats.unplaceable_symbols += 1;
            continue;
        };

        let mut properties = json_props(&[
            ("id", json!(symbol.id.to_string())),
            ("name", json!(symbol.name)),
            ("kind", json!(symbol.kind)),
            ("path", json!(path)),
            ("location", json!({"line": site.line, "column": site.column})),
        ]);
        if let Some(sig) = &symbol.signature {
            properties.insert("signature".into(), json!(sig));
        }
        if let Some(rt) = &symbol.return_type {
            properties.insert("return_type".into(), json!(rt));
        }
        if let Some(scope) = &symbol.scope {
            properties.insert("scope".into(), json!(scope));
        }
        if let Some(body) = &symbol.body_location {
            properties.insert(
                "body_location".into(),
                json!({
                    "start": {"line": body.start.line, "column": body.start.column},
                    "end": {"line": body.end.line, "column": body.end.column},
                }),
            );
        }

        let label = match symbol.kind {
            SymbolKind::Function => GraphNodeLabel::Function,
            _ => GraphNodeLabel::DataStructure,
        };

        batches.nodes.push(NodeRecord {
            node: NodeRef::Symbol(symbol.id),
            label,
            properties,
        });
    }
}

fn pass_p3_defines_edges(graph: &SymbolGraph, project_root: &Path, batches: &mut GraphBatches) {
    for symbol in graph.iter() {
        if !symbol.is_graph_node() {
            continue;
        }
        let Some(site) = symbol.placement_site() else {
            continue;
        };
        let abs = uri_to_path(&site.file_uri);
        let Ok(path) = to_project_relative(project_root, &abs) else {
            continue;
        };
        batches.edges.push(EdgeRecord {
            from: NodeRef::File(path),
            to: NodeRef::Symbol(symbol.id),
            label: GraphEdgeLabel::Defines,
        });
    }
}

fn pass_p4_include_edges(
    include_edges: &[(std::path::PathBuf, std::path::PathBuf)],
    project_root: &Path,
    known_files: &BTreeSet<String>,
    batches: &mut GraphBatches,
    stats: &mut BuildStats,
) {
    for (including, included) in include_edges {
        let from = to_project_relative(project_root, including);
        let to = to_project_relative(project_root, included);
        match (from, to) {
            (Ok(from), Ok(to)) if known_files.contains(&from) && known_files.contains(&to) => {
                let edge = IncludeEdge::new(from, to);
                batches.edges.push(EdgeRecord {
                    from: NodeRef::File(edge.including_file),
                    to: NodeRef::File(edge.included_file),
                    label: GraphEdgeLabel::Includes,
                });
            }
            _ => {
                warn!(?including, ?included, "include edge endpoint outside project root");
                stats.external_includes += 1;
            }
        }
    }
}

fn pass_p5_orphan_cleanup(batches: &mut GraphBatches, stats: &mut BuildStats) {
    let mut degree: HashMap<NodeRef, usize> = HashMap::new();
    for edge in &batches.edges {
        *degree.entry(edge.from.clone()).or_insert(0) += 1;
        *degree.entry(edge.to.clone()).or_insert(0) += 1;
    }

    let before = batches.nodes.len();
    batches
        .nodes
        .retain(|n| degree.get(&n.node).copied().unwrap_or(0) > 0);
    stats.orphans_removed = before - batches.nodes.len();
}

fn json_props(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}
