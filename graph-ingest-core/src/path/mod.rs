//! Path Normaliser (§4.1): URI/absolute/project-relative conversions.

pub mod normalize;

pub use normalize::{is_external, to_absolute, to_project_relative, to_unix_sep, uri_to_path};
