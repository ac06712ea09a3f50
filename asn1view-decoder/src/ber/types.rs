//! BER wire primitives (tag and length octets)

use asn1view_core::{Asn1Result, DecodeError, TagClass};

/// BER Tag
///
/// A BER tag identifies the type of a TLV unit. It consists of:
/// - **Class**: Universal, Application, Context-specific, or Private
/// - **Constructed/Primitive**: whether the unit contains other units
/// - **Tag Number**: the actual tag number
///
/// # Encoding Format
///
/// ```text
/// Bits: 8 7 6 5 4 3 2 1
///       C C P T T T T T
/// ```
///
/// Only the single-byte form (tag number 0-30) is decoded. The whole engine
/// works on the two-byte tag+length header model, so an extended-form tag
/// byte (low five bits all set) is rejected here and surfaces as an UNKNOWN
/// node further up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BerTag {
    class: TagClass,
    constructed: bool,
    number: u32,
}

impl BerTag {
    /// Get tag class
    pub fn class(&self) -> TagClass {
        self.class
    }

    /// Check if tag is constructed
    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Get tag number
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Decode a single-byte tag
    ///
    /// # Returns
    /// Returns `Ok(BerTag)` for a single-byte tag, `Err` for an empty buffer
    /// or an extended-form tag byte.
    pub fn decode(data: &[u8]) -> Asn1Result<Self> {
        if data.is_empty() {
            return Err(DecodeError::InvalidData(
                "Empty buffer for tag decoding".to_string(),
            ));
        }

        let first_byte = data[0];
        let class = match (first_byte >> 6) & 0x03 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            3 => TagClass::Private,
            _ => unreachable!(), // only 2 bits
        };
        let constructed = (first_byte & 0x20) != 0;
        let tag_bits = first_byte & 0x1F;

        if tag_bits == 0x1F {
            return Err(DecodeError::InvalidData(
                "Extended-form tag numbers are not supported".to_string(),
            ));
        }

        Ok(Self {
            class,
            constructed,
            number: tag_bits as u32,
        })
    }
}

/// BER Length encoding
///
/// BER length comes in two forms:
/// - **Short form** (1 byte): for lengths 0-127, bit 7 = 0
/// - **Long form**: first byte has bit 7 = 1 and bits 6-0 holding the number
///   of subsequent big-endian length octets (1-4 supported here)
///
/// Indefinite length (long form with zero octets) is not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BerLength {
    /// Short form: length 0-127
    Short(u8),
    /// Long form: length encoded in 1-4 octets
    Long(usize),
}

impl BerLength {
    /// Get the content length value
    pub fn value(&self) -> usize {
        match self {
            BerLength::Short(l) => *l as usize,
            BerLength::Long(l) => *l,
        }
    }

    /// Decode a length field
    ///
    /// # Returns
    /// Returns `Ok((BerLength, bytes_consumed))` if successful, `Err` otherwise.
    ///
    /// # Error Handling
    /// Returns error if:
    /// - Buffer is empty or too short for the long form
    /// - Indefinite length encoding (0 length octets)
    /// - More than 4 length octets
    pub fn decode(data: &[u8]) -> Asn1Result<(Self, usize)> {
        if data.is_empty() {
            return Err(DecodeError::InvalidData(
                "Empty buffer for length decoding".to_string(),
            ));
        }

        let first_byte = data[0];

        if (first_byte & 0x80) == 0 {
            // Short form: length is in bits 6-0
            return Ok((BerLength::Short(first_byte & 0x7F), 1));
        }

        // Long form: bits 6-0 indicate number of length octets
        let num_bytes = (first_byte & 0x7F) as usize;

        if num_bytes == 0 {
            return Err(DecodeError::InvalidData(
                "Indefinite length encoding not supported".to_string(),
            ));
        }

        if num_bytes > 4 {
            return Err(DecodeError::InvalidData(format!(
                "Length encoding too large: {} octets (max 4)",
                num_bytes
            )));
        }

        if data.len() < 1 + num_bytes {
            return Err(DecodeError::InvalidData(format!(
                "Buffer too short for long form length: need {} bytes, got {}",
                1 + num_bytes,
                data.len()
            )));
        }

        // Decode length value (big-endian)
        let mut length = 0usize;
        for i in 0..num_bytes {
            length = (length << 8) | (data[1 + i] as usize);
        }

        Ok((BerLength::Long(length), 1 + num_bytes))
    }
}

/// Supported ASN.1 universal types, decoded once from the raw tag number
///
/// Closed enum over the types the structure decoder renders. Anything not
/// listed here becomes an UNKNOWN node; there is no open-ended fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniversalTag {
    Boolean,
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    Utf8String,
    Sequence,
    Set,
    PrintableString,
    Ia5String,
    UtcTime,
    GeneralizedTime,
}

impl UniversalTag {
    /// Look up a universal tag by its BER tag number
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(UniversalTag::Boolean),
            2 => Some(UniversalTag::Integer),
            3 => Some(UniversalTag::BitString),
            4 => Some(UniversalTag::OctetString),
            5 => Some(UniversalTag::Null),
            6 => Some(UniversalTag::ObjectIdentifier),
            12 => Some(UniversalTag::Utf8String),
            16 => Some(UniversalTag::Sequence),
            17 => Some(UniversalTag::Set),
            19 => Some(UniversalTag::PrintableString),
            22 => Some(UniversalTag::Ia5String),
            23 => Some(UniversalTag::UtcTime),
            24 => Some(UniversalTag::GeneralizedTime),
            _ => None,
        }
    }

    /// BER tag number of this type
    pub fn number(&self) -> u32 {
        match self {
            UniversalTag::Boolean => 1,
            UniversalTag::Integer => 2,
            UniversalTag::BitString => 3,
            UniversalTag::OctetString => 4,
            UniversalTag::Null => 5,
            UniversalTag::ObjectIdentifier => 6,
            UniversalTag::Utf8String => 12,
            UniversalTag::Sequence => 16,
            UniversalTag::Set => 17,
            UniversalTag::PrintableString => 19,
            UniversalTag::Ia5String => 22,
            UniversalTag::UtcTime => 23,
            UniversalTag::GeneralizedTime => 24,
        }
    }

    /// Human-readable tag name used in the decoded tree
    pub fn name(&self) -> &'static str {
        match self {
            UniversalTag::Boolean => "BOOLEAN",
            UniversalTag::Integer => "INTEGER",
            UniversalTag::BitString => "BIT STRING",
            UniversalTag::OctetString => "OCTET STRING",
            UniversalTag::Null => "NULL",
            UniversalTag::ObjectIdentifier => "OBJECT IDENTIFIER",
            UniversalTag::Utf8String => "UTF8String",
            UniversalTag::Sequence => "SEQUENCE",
            UniversalTag::Set => "SET",
            UniversalTag::PrintableString => "PrintableString",
            UniversalTag::Ia5String => "IA5String",
            UniversalTag::UtcTime => "UTCTime",
            UniversalTag::GeneralizedTime => "GeneralizedTime",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ber_tag_decode() {
        let (tag, class) = (BerTag::decode(&[0x02]).unwrap(), TagClass::Universal);
        assert_eq!(tag.class(), class);
        assert!(!tag.is_constructed());
        assert_eq!(tag.number(), 2);
    }

    #[test]
    fn test_ber_tag_constructed() {
        let tag = BerTag::decode(&[0x30]).unwrap(); // SEQUENCE
        assert_eq!(tag.class(), TagClass::Universal);
        assert!(tag.is_constructed());
        assert_eq!(tag.number(), 16);
    }

    #[test]
    fn test_ber_tag_context_specific() {
        let tag = BerTag::decode(&[0xA0]).unwrap(); // [0] constructed
        assert_eq!(tag.class(), TagClass::ContextSpecific);
        assert!(tag.is_constructed());
        assert_eq!(tag.number(), 0);
    }

    #[test]
    fn test_ber_tag_extended_rejected() {
        assert!(BerTag::decode(&[0x1F, 0x81, 0x00]).is_err());
        assert!(BerTag::decode(&[]).is_err());
    }

    #[test]
    fn test_ber_length_short_form() {
        let (length, consumed) = BerLength::decode(&[100]).unwrap();
        assert_eq!(consumed, 1);
        assert_eq!(length.value(), 100);
    }

    #[test]
    fn test_ber_length_long_form() {
        let (length, consumed) = BerLength::decode(&[0x82, 0x03, 0xE8]).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(length.value(), 1000);
    }

    #[test]
    fn test_ber_length_rejects_indefinite_and_oversized() {
        assert!(BerLength::decode(&[0x80]).is_err()); // indefinite
        assert!(BerLength::decode(&[0x85, 1, 2, 3, 4, 5]).is_err()); // 5 octets
        assert!(BerLength::decode(&[0x82, 0x01]).is_err()); // truncated
    }

    #[test]
    fn test_universal_tag_round_trip() {
        for number in [1u32, 2, 3, 4, 5, 6, 12, 16, 17, 19, 22, 23, 24] {
            let tag = UniversalTag::from_number(number).unwrap();
            assert_eq!(tag.number(), number);
        }
        assert_eq!(UniversalTag::from_number(10), None); // ENUMERATED unsupported
    }
}
