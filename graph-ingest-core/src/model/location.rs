//! Source location model.
//!
//! A [`Location`] is an immutable triple of (file URI, 1-based line, 1-based
//! column). [`RelativeLocation`] drops the URI when the surrounding context
//! (a per-file spatial index, say) already supplies it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file_uri: String,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(file_uri: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file_uri: file_uri.into(),
            line,
            column,
        }
    }

    pub fn to_relative(&self) -> RelativeLocation {
        RelativeLocation {
            line: self.line,
            column: self.column,
        }
    }

    /// Ordering used by the spatial index: by line first, then column.
    pub fn as_tuple(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RelativeLocation {
    pub line: usize,
    pub column: usize,
}

impl RelativeLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A function body's extent in a single file, produced by the Span Provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyLocation {
    pub file_uri: String,
    pub start: RelativeLocation,
    pub end: RelativeLocation,
}

impl BodyLocation {
    pub fn contains(&self, loc: &RelativeLocation) -> bool {
        (self.start.line, self.start.column) <= (loc.line, loc.column)
            && (loc.line, loc.column) <= (self.end.line, self.end.column)
    }
}
