//! The `#include`-style directed edge produced by the Include Provider.

use serde::{Deserialize, Serialize};

/// Both endpoints are already project-relative and in-project by the time
/// this type is constructed — the Graph Builder's Pass P4 filters external
/// paths at normalisation, before an `IncludeEdge` is ever built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeEdge {
    pub including_file: String,
    pub included_file: String,
}

impl IncludeEdge {
    pub fn new(including_file: impl Into<String>, included_file: impl Into<String>) -> Self {
        Self {
            including_file: including_file.into(),
            included_file: included_file.into(),
        }
    }
}
