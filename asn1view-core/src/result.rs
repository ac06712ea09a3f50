//! Decode result DTO returned to callers

use crate::node::TlvNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Metadata key: byte length of the decoded input buffer
pub const META_ORIGINAL_LENGTH: &str = "originalLength";
/// Metadata key: name of the input text encoding (HEX/BASE64/RAW)
pub const META_ENCODING_TYPE: &str = "encodingType";
/// Metadata key: wall-clock decode timestamp, epoch milliseconds
pub const META_ENCODING_TIMESTAMP: &str = "encodingTimestamp";
/// Metadata key: probable wire encoding guess (BER/DER/Unknown)
pub const META_PROBABLE_ENCODING: &str = "probableEncoding";
/// Metadata key: total node count in the result tree
pub const META_TOTAL_OBJECTS: &str = "totalObjects";
/// Metadata key: maximum depth of the result tree
pub const META_MAX_DEPTH: &str = "maxDepth";
/// Metadata key: parsing strategy description
pub const META_PARSING_STRATEGY: &str = "parsingStrategy";

/// Constant value of the `parsingStrategy` metadata entry
pub const PARSING_STRATEGY_DESC: &str = "multi-strategy (standard/fault-tolerant/segmented)";

/// Result of a decode call
///
/// Either the whole tree decoded (`success = true`) or the call failed with
/// a `DecodeError`; a half-built tree is never returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeResult {
    /// Whether decoding succeeded
    pub success: bool,
    /// Human-readable status message
    pub message: String,
    /// Root of the decoded tree
    pub root: TlvNode,
    /// Diagnostic warnings collected during decoding, in order
    pub warnings: Vec<String>,
    /// Decode metadata, keyed by the `META_*` constants
    pub metadata: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{TagClass, TlvNode};

    #[test]
    fn test_result_serializes_metadata_keys() {
        let mut metadata = BTreeMap::new();
        metadata.insert(META_ORIGINAL_LENGTH.to_string(), Value::from(5));
        metadata.insert(META_ENCODING_TYPE.to_string(), Value::from("HEX"));
        let result = DecodeResult {
            success: true,
            message: "ok".to_string(),
            root: TlvNode::primitive("NULL", 5, TagClass::Universal, "NULL", 0, 2),
            warnings: vec![],
            metadata,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["metadata"]["originalLength"], 5);
        assert_eq!(json["metadata"]["encodingType"], "HEX");
    }
}
