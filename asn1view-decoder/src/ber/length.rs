//! Length/offset calculator for TLV units
//!
//! Computes the exact byte span (tag + length header + content) of the unit
//! starting at a given position, per the BER length rules. When the header
//! is malformed, a size estimate keyed on the decoded node kind is used
//! instead so that scanning strategies can still make forward progress.

use crate::ber::types::BerLength;
use asn1view_core::{Asn1Result, DecodeError, TlvNode};
use num_bigint::BigInt;

/// Exact byte span of the TLV unit starting at `offset`
///
/// Reads the byte at `offset` as the tag byte and the byte at `offset + 1`
/// as the length byte:
/// - short form: span = 2 + length
/// - long form with n octets (1-4): span = 2 + n + content length
///
/// # Error Handling
/// Returns error if the header does not fit in the buffer, the long form
/// has 0 or more than 4 length octets, or the form is otherwise invalid.
pub fn unit_length(buffer: &[u8], offset: usize) -> Asn1Result<usize> {
    if offset + 1 >= buffer.len() {
        return Err(DecodeError::InvalidData(format!(
            "No length byte at offset {} (buffer is {} bytes)",
            offset,
            buffer.len()
        )));
    }

    let (length, length_octets) = BerLength::decode(&buffer[offset + 1..])?;
    Ok(1 + length_octets + length.value())
}

/// Header span (tag byte + length field) of the unit at `offset`
///
/// 2 for the short form, `2 + n` for the long form with n length octets.
/// The content of a constructed unit starts at `offset + header_length`.
pub fn header_length(buffer: &[u8], offset: usize) -> Asn1Result<usize> {
    if offset + 1 >= buffer.len() {
        return Err(DecodeError::InvalidData(format!(
            "No length byte at offset {} (buffer is {} bytes)",
            offset,
            buffer.len()
        )));
    }

    let (_, length_octets) = BerLength::decode(&buffer[offset + 1..])?;
    Ok(1 + length_octets)
}

/// Size estimate for a decoded node whose length header could not be read
///
/// Keyed on node kind:
/// - SEQUENCE/SET: `children * 10 + 4`
/// - OCTET STRING / BIT STRING: payload bytes + 2
/// - INTEGER: big integer byte width + 2
/// - everything else: 10
pub fn estimated_length(node: &TlvNode) -> usize {
    match node.tag.as_str() {
        "SEQUENCE" | "SET" => node.children.len() * 10 + 4,
        "OCTET STRING" | "BIT STRING" => hex_payload_len(&node.value) + 2,
        "INTEGER" => integer_byte_len(&node.value) + 2,
        _ => 10,
    }
}

/// Byte count of a `0x`-prefixed hex rendering; 0 when the value is not hex
/// (e.g. a re-interpreted node whose value is a count description)
fn hex_payload_len(value: &str) -> usize {
    value
        .strip_prefix("0x")
        .map(|digits| digits.len() / 2)
        .unwrap_or(0)
}

/// Width in bytes of the two's complement encoding of a decimal value
fn integer_byte_len(value: &str) -> usize {
    BigInt::parse_bytes(value.as_bytes(), 10)
        .map(|big| big.to_signed_bytes_be().len())
        .unwrap_or(1)
}

/// Byte span of the unit at `offset`, falling back to the node-kind estimate
pub fn unit_length_or_estimate(buffer: &[u8], offset: usize, node: &TlvNode) -> usize {
    unit_length(buffer, offset).unwrap_or_else(|_| estimated_length(node))
}

/// Offset of the unit following the one at `offset`
///
/// Clamped to the buffer end; never decreasing.
pub fn next_offset(buffer: &[u8], offset: usize, node: &TlvNode) -> usize {
    (offset + unit_length_or_estimate(buffer, offset, node)).min(buffer.len())
}
