//! Reference (usage-site) model and the call-kind bit predicate (§4.5).

use crate::model::location::Location;
use crate::model::symbol_id::SymbolId;
use serde::{Deserialize, Serialize};

/// Legacy call, without container (§4.5).
pub const KIND_LEGACY_CALL: u32 = 4;
/// Legacy call with reference flag.
pub const KIND_LEGACY_CALL_REF: u32 = 12;
/// Modern call, with container.
pub const KIND_MODERN_CALL: u32 = 20;
/// Modern call with reference flag.
pub const KIND_MODERN_CALL_REF: u32 = 28;

/// True for any of the four bit-values this system recognises as a call.
/// Anything else (declaration, definition, address-taken, ...) is not a call.
pub fn is_call(kind_bits: u32) -> bool {
    matches!(
        kind_bits,
        KIND_LEGACY_CALL | KIND_LEGACY_CALL_REF | KIND_MODERN_CALL | KIND_MODERN_CALL_REF
    )
}

/// True for the "modern" (container-carrying) call bits, consumed by the
/// Container strategy (§4.4.a).
pub fn is_modern_call(kind_bits: u32) -> bool {
    matches!(kind_bits, KIND_MODERN_CALL | KIND_MODERN_CALL_REF)
}

/// True for the "legacy" call bits, consumed by the Spatial strategy (§4.4.b).
pub fn is_legacy_call(kind_bits: u32) -> bool {
    matches!(kind_bits, KIND_LEGACY_CALL | KIND_LEGACY_CALL_REF)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub kind_bits: u32,
    pub location: Location,
    /// `None` both when the index omits Container and when it's the zero id
    /// (§8 boundary 11) — both mean "no container".
    pub container_id: Option<SymbolId>,
}

impl Reference {
    pub fn new(kind_bits: u32, location: Location, container_id: Option<SymbolId>) -> Self {
        let container_id = container_id.filter(|id| !id.is_zero());
        Self {
            kind_bits,
            location,
            container_id,
        }
    }

    pub fn is_call(&self) -> bool {
        is_call(self.kind_bits)
    }
}
