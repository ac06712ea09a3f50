//! Fault-tolerant BER/DER TLV structure decoding engine
//!
//! Turns a byte buffer claimed to contain BER/DER-encoded data into a typed,
//! navigable tree, tolerating truncated, malformed and ambiguous input.
//!
//! # Architecture
//!
//! - `ber` — wire primitives, the length/offset calculator, typed unit
//!   decoding and nested-content re-interpretation
//! - `strategy` — the standard / fault-tolerant / segmented strategy cascade
//! - `input` — HEX/BASE64/RAW input text decoding
//! - `stats` — tree statistics and the BER/DER classification heuristic
//!
//! # Usage Example
//!
//! ```rust
//! use asn1view_decoder::{decode, InputEncoding};
//!
//! let result = decode("3003020105", InputEncoding::Hex, false).unwrap();
//! assert_eq!(result.root.tag, "SEQUENCE");
//! ```
//!
//! Each decode call is a pure function of the input text and the `verbose`
//! flag; no state is shared across calls, so callers may decode from many
//! threads concurrently.

pub mod ber;
pub mod input;
pub mod stats;
pub mod strategy;

pub use asn1view_core::{Asn1Result, DecodeError, DecodeResult, TagClass, TlvNode};
pub use input::InputEncoding;

use asn1view_core::result::{
    META_ENCODING_TIMESTAMP, META_ENCODING_TYPE, META_MAX_DEPTH, META_ORIGINAL_LENGTH,
    META_PARSING_STRATEGY, META_PROBABLE_ENCODING, META_TOTAL_OBJECTS, PARSING_STRATEGY_DESC,
};
use chrono::Utc;
use serde_json::Value;
use std::collections::BTreeMap;

/// Decode input text into a TLV structure tree
///
/// # Arguments
/// * `raw_text` - The input text (hex digits, base64, or raw bytes)
/// * `encoding` - How to turn the text into the byte buffer
/// * `verbose` - Attach diagnostic `properties` to every node
///
/// # Returns
/// A fully populated [`DecodeResult`]; a half-built tree is never returned.
///
/// # Error Handling
/// - `InvalidInput` for blank input
/// - `InvalidEncoding` for malformed hex/base64
/// - `Exhausted` when all three strategies produce nothing
pub fn decode(raw_text: &str, encoding: InputEncoding, verbose: bool) -> Asn1Result<DecodeResult> {
    let buffer = input::decode_input(raw_text, encoding)?;
    log::debug!(
        "Decoding {} byte(s) of {} input (verbose: {})",
        buffer.len(),
        encoding.name(),
        verbose
    );

    let (root, warnings) = strategy::decode_structures(&buffer, verbose)?;

    let total_objects = stats::count_total_objects(&root);
    let max_depth = stats::calculate_max_depth(&root);

    let mut metadata: BTreeMap<String, Value> = BTreeMap::new();
    metadata.insert(META_ORIGINAL_LENGTH.to_string(), Value::from(buffer.len()));
    metadata.insert(META_ENCODING_TYPE.to_string(), Value::from(encoding.name()));
    metadata.insert(
        META_ENCODING_TIMESTAMP.to_string(),
        Value::from(Utc::now().timestamp_millis()),
    );
    metadata.insert(
        META_PROBABLE_ENCODING.to_string(),
        Value::from(stats::probable_encoding(&buffer)),
    );
    metadata.insert(META_TOTAL_OBJECTS.to_string(), Value::from(total_objects));
    metadata.insert(META_MAX_DEPTH.to_string(), Value::from(max_depth));
    metadata.insert(
        META_PARSING_STRATEGY.to_string(),
        Value::from(PARSING_STRATEGY_DESC),
    );

    Ok(DecodeResult {
        success: true,
        message: format!("Decoded {} object(s)", total_objects),
        root,
        warnings,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_sequence() {
        let result = decode("3003020105", InputEncoding::Hex, false).unwrap();
        assert!(result.success);
        assert_eq!(result.root.tag, "SEQUENCE");
        assert_eq!(result.root.length, 5);
        assert_eq!(result.root.children.len(), 1);
        assert_eq!(result.root.children[0].tag, "INTEGER");
        assert_eq!(result.root.children[0].value, "5");
        assert_eq!(result.root.children[0].length, 3);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_decode_metadata_keys() {
        let result = decode("3003020105", InputEncoding::Hex, false).unwrap();
        let metadata = &result.metadata;
        assert_eq!(metadata["originalLength"], 5);
        assert_eq!(metadata["encodingType"], "HEX");
        assert!(metadata["encodingTimestamp"].as_i64().unwrap() > 0);
        assert_eq!(metadata["probableEncoding"], "DER");
        assert_eq!(metadata["totalObjects"], 2);
        assert_eq!(metadata["maxDepth"], 2);
        assert_eq!(
            metadata["parsingStrategy"],
            "multi-strategy (standard/fault-tolerant/segmented)"
        );
    }

    #[test]
    fn test_decode_concatenated_units_yields_container() {
        let result = decode("020105020107", InputEncoding::Hex, false).unwrap();
        assert!(result.root.is_container());
        assert_eq!(result.root.length, 2);
        assert_eq!(result.root.value, "2 top-level objects");
        assert_eq!(result.metadata["totalObjects"], 3);
    }

    #[test]
    fn test_decode_base64_input() {
        let result = decode("MAMCAQU=", InputEncoding::Base64, false).unwrap();
        assert_eq!(result.root.tag, "SEQUENCE");
        assert_eq!(result.metadata["encodingType"], "BASE64");
    }

    #[test]
    fn test_empty_input_invalid_for_every_encoding() {
        for encoding in [InputEncoding::Hex, InputEncoding::Base64, InputEncoding::Raw] {
            let err = decode("", encoding, false).unwrap_err();
            assert!(matches!(err, DecodeError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_invalid_hex_surfaces_invalid_encoding() {
        let err = decode("GG", InputEncoding::Hex, false).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEncoding(_)));
    }

    #[test]
    fn test_truncated_unit_exhausts_strategies() {
        let err = decode("01", InputEncoding::Hex, false).unwrap_err();
        assert!(matches!(err, DecodeError::Exhausted(_)));
    }

    #[test]
    fn test_oid_round_trip() {
        let result = decode("06092a864886f70d01010b", InputEncoding::Hex, false).unwrap();
        assert_eq!(result.root.value, "1.2.840.113549.1.1.11");
    }

    #[test]
    fn test_idempotent_decoding() {
        let first = decode("3003020105", InputEncoding::Hex, false).unwrap();
        let second = decode("3003020105", InputEncoding::Hex, false).unwrap();
        // Trees are structurally identical; only the timestamp may differ
        assert_eq!(first.root, second.root);
        assert_eq!(first.warnings, second.warnings);
        assert_eq!(
            first.metadata["totalObjects"],
            second.metadata["totalObjects"]
        );
    }

    #[test]
    fn test_verbose_populates_properties_throughout() {
        let result = decode("3003020105", InputEncoding::Hex, true).unwrap();
        assert!(result.root.properties.is_some());
        assert!(result.root.children[0].properties.is_some());
    }

    #[test]
    fn test_octet_string_nested_reinterpretation() {
        // OCTET STRING wrapping SEQUENCE { INTEGER 5 }
        let result = decode("04053003020105", InputEncoding::Hex, false).unwrap();
        assert_eq!(result.root.tag, "OCTET STRING");
        assert_eq!(result.root.value, "1 nested objects");
        assert_eq!(result.root.children.len(), 1);
        assert_eq!(result.root.children[0].tag, "SEQUENCE");
        assert_eq!(result.metadata["maxDepth"], 3);
    }
}
