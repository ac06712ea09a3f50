//! Nested-content re-interpretation for byte-string payloads
//!
//! OCTET STRING and BIT STRING payloads frequently carry further TLV-encoded
//! data (wrapped keys, extension values). When a payload passes a cheap
//! "looks like ASN.1 data" gate, it is decoded as an independent buffer and
//! the decoded units become the node's children. This is advisory: any
//! failure keeps the original hex rendering and never reaches the caller.
//!
//! Offsets of re-interpreted children are local to the payload, not to the
//! top-level input buffer.

use crate::ber::types::BerLength;
use crate::ber::value;
use asn1view_core::TlvNode;

/// Universal tag bytes a re-interpretable payload may start with
pub const REINTERPRET_TAGS: [u8; 13] = [
    0x30, // SEQUENCE
    0x31, // SET
    0x02, // INTEGER
    0x04, // OCTET STRING
    0x05, // NULL
    0x06, // OBJECT IDENTIFIER
    0x13, // PrintableString
    0x16, // IA5String
    0x17, // UTCTime
    0x18, // GeneralizedTime
    0x03, // BIT STRING
    0x01, // BOOLEAN
    0x0C, // UTF8String
];

/// Upper bound on the declared content length of a plausible nested unit
const MAX_NESTED_CONTENT: usize = 10_000;

/// Whether `payload` plausibly starts with a TLV unit
///
/// Requires at least two bytes, a first byte from [`REINTERPRET_TAGS`], and
/// a length field that decodes to a content length in (0, 10000] fitting the
/// remaining payload.
pub fn looks_like_asn1(payload: &[u8]) -> bool {
    if payload.len() < 2 {
        return false;
    }
    if !REINTERPRET_TAGS.contains(&payload[0]) {
        return false;
    }
    match BerLength::decode(&payload[1..]) {
        Ok((length, length_octets)) => {
            let content_len = length.value();
            content_len > 0
                && content_len <= MAX_NESTED_CONTENT
                && 1 + length_octets + content_len <= payload.len()
        }
        Err(_) => false,
    }
}

/// Try to decode `payload` as TLV data and graft the result onto `node`
///
/// On success the node's children are replaced by the decoded units and its
/// value becomes a count description. On failure the node is left untouched.
pub fn reinterpret(node: &mut TlvNode, payload: &[u8], verbose: bool, depth: usize) {
    if payload.is_empty() || !looks_like_asn1(payload) {
        return;
    }

    let mut units = Vec::new();
    let mut pos = 0;
    while pos < payload.len() {
        match value::decode_unit(payload, pos, verbose, depth) {
            Ok(unit) => {
                let next = crate::ber::length::next_offset(payload, pos, &unit);
                units.push(unit);
                if next <= pos {
                    break;
                }
                pos = next;
            }
            Err(err) => {
                log::debug!(
                    "Nested re-interpretation stopped at payload offset {}: {}",
                    pos,
                    err
                );
                break;
            }
        }
    }

    if !units.is_empty() {
        node.value = format!("{} nested objects", units.len());
        node.children = units;
    }
}
