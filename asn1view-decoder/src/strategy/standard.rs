//! Standard strategy: strict sequential decode from offset 0

use crate::ber::{length, value};
use asn1view_core::{Asn1Result, DecodeError, TlvNode};

/// Decode consecutive TLV units covering the whole buffer
///
/// Starts at offset 0 and advances by each unit's calculated length until
/// the buffer end. Any per-unit failure fails the whole strategy; recovery
/// belongs to the fault-tolerant and segmented strategies.
///
/// # Error Handling
/// Fails if zero units were produced or a unit does not decode.
pub fn decode_all(buffer: &[u8], verbose: bool) -> Asn1Result<Vec<TlvNode>> {
    let mut units = Vec::new();
    let mut offset = 0;

    while offset < buffer.len() {
        let unit = value::decode_unit(buffer, offset, verbose, 0)?;
        let next = length::next_offset(buffer, offset, &unit);
        units.push(unit);
        if next <= offset {
            break;
        }
        offset = next;
    }

    if units.is_empty() {
        return Err(DecodeError::InvalidData(
            "No TLV unit at buffer start".to_string(),
        ));
    }

    log::debug!(
        "Standard strategy decoded {} unit(s) over {} bytes",
        units.len(),
        buffer.len()
    );
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sequence() {
        let buffer = hex::decode("3003020105").unwrap();
        let units = decode_all(&buffer, false).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].tag, "SEQUENCE");
    }

    #[test]
    fn test_concatenated_top_level_units() {
        let buffer = hex::decode("020105020107").unwrap();
        let units = decode_all(&buffer, false).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].value, "5");
        assert_eq!(units[1].value, "7");
        assert_eq!(units[1].offset, 3);
    }

    #[test]
    fn test_fails_on_empty_or_corrupt_buffer() {
        assert!(decode_all(&[], false).is_err());
        assert!(decode_all(&[0x01], false).is_err()); // truncated BOOLEAN
        // Valid first unit, garbage tail
        let buffer = hex::decode("020105ff").unwrap();
        assert!(decode_all(&buffer, false).is_err());
    }
}
