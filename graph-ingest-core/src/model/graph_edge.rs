//! Unified graph edge label used by the Graph Builder passes and the
//! Ingestion Planner's batch grouping.
//!
//! Modelled as a compact enum that serialises to a snake_case string, so the
//! same label is stable whether it ends up in a log field, a batch payload,
//! or a test assertion.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphEdgeLabel {
    Contains,
    Defines,
    Includes,
    Calls,
}

impl Display for GraphEdgeLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use GraphEdgeLabel::*;
        let s = match self {
            Contains => "contains",
            Defines => "defines",
            Includes => "includes",
            Calls => "calls",
        };
        f.write_str(s)
    }
}

/// Node labels emitted by the Graph Builder passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphNodeLabel {
    Project,
    Folder,
    File,
    Function,
    DataStructure,
}

impl Display for GraphNodeLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use GraphNodeLabel::*;
        let s = match self {
            Project => "project",
            Folder => "folder",
            File => "file",
            Function => "function",
            DataStructure => "data_structure",
        };
        f.write_str(s)
    }
}
