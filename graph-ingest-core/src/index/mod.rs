//! The Index Parser (§4.2): streaming chunked YAML → a fully cross-linked
//! `SymbolGraph`, with a persistent mtime-keyed cache.

pub mod cache;
pub mod chunking;
pub mod doc;
pub mod link;
pub mod parser;
pub mod worker;

pub use parser::parse;
