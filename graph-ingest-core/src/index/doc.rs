//! Raw shapes of the two document kinds the index stream carries, and the
//! tag-dispatch that turns a parsed YAML document into one of them.
//!
//! A `!Symbol` document's field names mirror what the upstream compiler
//! index actually emits (`ID`, `SymInfo.Kind`, `CanonicalDeclaration`,
//! `Definition`, each a `{FileURI, Start: {Line, Column}}` location). A
//! `!Refs` document carries `ID` plus a `References` list, each with `Kind`,
//! `Location`, and an optional `Container`.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawPosition {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawLocation {
    #[serde(rename = "FileURI")]
    pub file_uri: String,
    pub start: RawPosition,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawSymInfo {
    pub kind: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawSymbolDoc {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sym_info: Option<RawSymInfo>,
    #[serde(default)]
    pub canonical_declaration: Option<RawLocation>,
    #[serde(default)]
    pub definition: Option<RawLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawReference {
    pub kind: u32,
    pub location: RawLocation,
    #[serde(default)]
    pub container: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawRefsDoc {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default, rename = "References")]
    pub references: Vec<RawReference>,
}

/// One decoded document from the index stream, after tag dispatch.
pub enum IndexDoc {
    Symbol(RawSymbolDoc),
    Refs(RawRefsDoc),
}

/// Parse one already-split YAML document into an [`IndexDoc`], or `None` if
/// its tag is not `!Symbol`/`!Refs` (unknown tags are skipped silently, per
/// the input contract).
pub fn decode_tagged_document(value: serde_yml::Value) -> Result<Option<IndexDoc>, serde_yml::Error> {
    let tagged = match value {
        serde_yml::Value::Tagged(t) => t,
        _ => return Ok(None),
    };

    match tagged.tag.to_string().as_str() {
        "!Symbol" => {
            let raw: RawSymbolDoc = serde_yml::from_value(tagged.value)?;
            Ok(Some(IndexDoc::Symbol(raw)))
        }
        "!Refs" => {
            let raw: RawRefsDoc = serde_yml::from_value(tagged.value)?;
            Ok(Some(IndexDoc::Refs(raw)))
        }
        _ => Ok(None),
    }
}

pub fn symbol_kind_from_str(s: &str) -> crate::model::SymbolKind {
    use crate::model::SymbolKind::*;
    match s {
        "Function" => Function,
        "Class" => Class,
        "Struct" => Struct,
        "Union" => Union,
        "Enum" => Enum,
        "Variable" => Variable,
        "Field" => Field,
        "Macro" => Macro,
        _ => Other,
    }
}

pub fn location_from_raw(raw: &RawLocation) -> crate::model::Location {
    crate::model::Location::new(raw.file_uri.clone(), raw.start.line, raw.start.column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_kind_maps_known_strings() {
        assert_eq!(symbol_kind_from_str("Function"), crate::model::SymbolKind::Function);
        assert_eq!(symbol_kind_from_str("Struct"), crate::model::SymbolKind::Struct);
    }

    #[test]
    fn symbol_kind_falls_back_to_other() {
        assert_eq!(symbol_kind_from_str("Namespace"), crate::model::SymbolKind::Other);
    }

    #[test]
    fn decode_untagged_document_is_skipped() {
        let value: serde_yml::Value = serde_yml::from_str("just: a-plain-mapping\n").unwrap();
        let decoded = decode_tagged_document(value).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn decode_symbol_document() {
        let yaml = "!Symbol\nID: 'a0a0a0a0a0a0a0a0'\nName: foo\nSymInfo:\n  Kind: Function\nDefinition:\n  FileURI: 'file:///src/x.c'\n  Start:\n    Line: 10\n    Column: 5\n";
        let value: serde_yml::Value = serde_yml::from_str(yaml).unwrap();
        match decode_tagged_document(value).unwrap() {
            Some(IndexDoc::Symbol(raw)) => {
                assert_eq!(raw.id, "a0a0a0a0a0a0a0a0");
                assert_eq!(raw.name, "foo");
            }
            _ => panic!("expected a Symbol document"),
        }
    }

    #[test]
    fn decode_refs_document() {
        let yaml = "!Refs\nID: 'b0b0b0b0b0b0b0b0'\nReferences:\n  - Kind: 20\n    Location:\n      FileURI: 'file:///src/x.c'\n      Start:\n        Line: 12\n        Column: 9\n    Container: 'a0a0a0a0a0a0a0a0'\n";
        let value: serde_yml::Value = serde_yml::from_str(yaml).unwrap();
        match decode_tagged_document(value).unwrap() {
            Some(IndexDoc::Refs(raw)) => {
                assert_eq!(raw.id, "b0b0b0b0b0b0b0b0");
                assert_eq!(raw.references.len(), 1);
                assert_eq!(raw.references[0].kind, 20);
            }
            _ => panic!("expected a Refs document"),
        }
    }

    #[test]
    fn unknown_tag_is_skipped_silently() {
        let yaml = "!SomeOtherThing\nfoo: bar\n";
        let value: serde_yml::Value = serde_yml::from_str(yaml).unwrap();
        assert!(decode_tagged_document(value).unwrap().is_none());
    }
}
