//! BER (Basic Encoding Rules) TLV structure decoding
//!
//! Each BER/DER value is a TLV (Tag-Length-Value) triplet:
//!
//! ```text
//! [Tag] [Length] [Value]
//! ```
//!
//! ## Tag Encoding
//!
//! The tag byte identifies the type of the data:
//! - **Class** (2 bits): Universal (00), Application (01), Context-specific
//!   (10), Private (11)
//! - **Constructed/Primitive** (1 bit): 0 = Primitive, 1 = Constructed
//! - **Tag Number** (5 bits): the actual tag number
//!
//! ## Length Encoding
//!
//! - **Short form** (1 byte): lengths 0-127, bit 7 = 0
//! - **Long form**: first byte has bit 7 = 1 and carries the count of
//!   subsequent big-endian length octets (1-4 supported)
//!
//! # Implementation Notes
//!
//! 1. **Two-byte header model**: the length/offset calculator reads exactly
//!    one tag byte and one length byte at the unit start; extended-form tags
//!    and indefinite lengths are rejected.
//! 2. **Fault tolerance**: the unit decoder itself is strict; recovery from
//!    corrupt input lives in the scanning strategies, which swallow per-unit
//!    failures and keep going.
//! 3. **Nested content**: OCTET STRING and BIT STRING payloads that look
//!    like TLV data are re-decoded as independent buffers.

pub mod length;
pub mod nested;
pub mod types;
pub mod value;

pub use types::{BerLength, BerTag, UniversalTag};
pub use value::{decode_unit, MAX_NESTING_DEPTH};
