//! The root Project node's own properties (§3, §4.3 P1). Folder and File
//! nodes carry no data beyond the path [`crate::graph::NodeRef`] already
//! holds, so only the project itself needs a dedicated shape.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub root: String,
    /// Left `None` here: populating it is the VCS diff producer's job.
    pub vcs_commit: Option<String>,
}

impl ProjectEntry {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            vcs_commit: None,
        }
    }
}
