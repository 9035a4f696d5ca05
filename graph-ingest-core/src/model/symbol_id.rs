//! Stable symbol identifiers.
//!
//! The index assigns every symbol a 16-hex-character id. We store it as a
//! fixed-width `[u8; 8]` rather than a heap `String` — the symbol map can hold
//! millions of entries on a large codebase, and a byte array avoids both the
//! allocation and the indirection of a string key.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(#[serde(with = "hex_bytes")] [u8; 8]);

/// The sentinel container id meaning "no container" (§4.2, boundary 11).
pub const ZERO: SymbolId = SymbolId([0u8; 8]);

impl SymbolId {
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 8]
    }

    pub fn parse(hex: &str) -> Option<Self> {
        if hex.len() != 16 {
            return None;
        }
        let mut bytes = [0u8; 8];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let s = std::str::from_utf8(chunk).ok()?;
            bytes[i] = u8::from_str_radix(s, 16).ok()?;
        }
        Some(Self(bytes))
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 8], s: S) -> Result<S::Ok, S::Error> {
        let mut hex = String::with_capacity(16);
        for b in bytes {
            hex.push_str(&format!("{:02x}", b));
        }
        hex.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 8], D::Error> {
        let hex = String::deserialize(d)?;
        super::SymbolId::parse(&hex)
            .map(|id| id.0)
            .ok_or_else(|| serde::de::Error::custom("invalid 16-hex-char symbol id"))
    }
}
