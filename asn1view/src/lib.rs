//! asn1view - fault-tolerant BER/DER TLV structure viewer
//!
//! Decodes an arbitrary byte buffer claimed to contain BER/DER-encoded data
//! into a typed, navigable tree, tolerating truncated, malformed and
//! ambiguous input.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `asn1view-core`: decoded-tree data model, result DTO, error handling
//! - `asn1view-decoder`: the decoding engine (length calculator, typed
//!   decoders, strategy cascade, input handling)
//!
//! # Usage
//!
//! ```rust
//! use asn1view::{decode, InputEncoding};
//!
//! let result = decode("3003020105", InputEncoding::Hex, false).unwrap();
//! assert_eq!(result.root.tag, "SEQUENCE");
//! assert_eq!(result.root.children[0].value, "5");
//! ```

// Re-export core types
pub use asn1view_core::{Asn1Result, DecodeError, DecodeResult, TagClass, TlvNode};

// Re-export the decoding API
pub use asn1view_decoder::{decode, InputEncoding};

// Re-export the engine internals for callers that need them
pub mod decoder {
    pub use asn1view_decoder::{ber, input, stats, strategy};
}
