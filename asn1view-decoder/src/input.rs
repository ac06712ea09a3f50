//! Input text decoding (HEX / BASE64 / RAW)

use asn1view_core::{Asn1Result, DecodeError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fmt;
use std::str::FromStr;

/// Supported encodings of the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEncoding {
    /// Pairs of hex digits; an odd-length string is left-padded with '0'
    Hex,
    /// Standard base64
    Base64,
    /// The UTF-8 bytes of the text itself
    Raw,
}

impl InputEncoding {
    /// Encoding name as reported in result metadata
    pub fn name(&self) -> &'static str {
        match self {
            InputEncoding::Hex => "HEX",
            InputEncoding::Base64 => "BASE64",
            InputEncoding::Raw => "RAW",
        }
    }
}

impl fmt::Display for InputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for InputEncoding {
    type Err = DecodeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_uppercase().as_str() {
            "HEX" => Ok(InputEncoding::Hex),
            "BASE64" => Ok(InputEncoding::Base64),
            "RAW" => Ok(InputEncoding::Raw),
            other => Err(DecodeError::InvalidInput(format!(
                "Unsupported encoding: {}",
                other
            ))),
        }
    }
}

/// Decode the input text to the byte buffer handed to the strategies
///
/// Whitespace (leading, trailing, internal) is stripped before hex and
/// base64 decoding; RAW takes the trimmed text's UTF-8 bytes literally.
///
/// # Error Handling
/// Returns `InvalidInput` for blank input and `InvalidEncoding` for
/// malformed hex or base64.
pub fn decode_input(raw_text: &str, encoding: InputEncoding) -> Asn1Result<Vec<u8>> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::InvalidInput("Input text is empty".to_string()));
    }

    match encoding {
        InputEncoding::Hex => {
            let mut compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
            if compact.len() % 2 != 0 {
                compact.insert(0, '0');
            }
            hex::decode(&compact)
                .map_err(|err| DecodeError::InvalidEncoding(format!("Invalid hex input: {}", err)))
        }
        InputEncoding::Base64 => {
            let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
            STANDARD.decode(&compact).map_err(|err| {
                DecodeError::InvalidEncoding(format!("Invalid base64 input: {}", err))
            })
        }
        InputEncoding::Raw => Ok(trimmed.as_bytes().to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_decode_with_whitespace() {
        let bytes = decode_input(" 30 03\n02 01 05 ", InputEncoding::Hex).unwrap();
        assert_eq!(bytes, hex::decode("3003020105").unwrap());
    }

    #[test]
    fn test_odd_length_hex_left_padded() {
        let bytes = decode_input("105", InputEncoding::Hex).unwrap();
        assert_eq!(bytes, vec![0x01, 0x05]);
    }

    #[test]
    fn test_invalid_hex_rejected() {
        let err = decode_input("GG", InputEncoding::Hex).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEncoding(_)));
    }

    #[test]
    fn test_base64_decode() {
        let bytes = decode_input("MAMCAQU=", InputEncoding::Base64).unwrap();
        assert_eq!(bytes, hex::decode("3003020105").unwrap());

        let err = decode_input("@@@@", InputEncoding::Base64).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEncoding(_)));
    }

    #[test]
    fn test_raw_takes_utf8_bytes() {
        let bytes = decode_input("abc", InputEncoding::Raw).unwrap();
        assert_eq!(bytes, b"abc");
    }

    #[test]
    fn test_blank_input_rejected_for_every_encoding() {
        for encoding in [InputEncoding::Hex, InputEncoding::Base64, InputEncoding::Raw] {
            let err = decode_input("   ", encoding).unwrap_err();
            assert!(matches!(err, DecodeError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_encoding_name_parsing() {
        assert_eq!("hex".parse::<InputEncoding>().unwrap(), InputEncoding::Hex);
        assert_eq!(
            "BASE64".parse::<InputEncoding>().unwrap(),
            InputEncoding::Base64
        );
        assert!("pem".parse::<InputEncoding>().is_err());
    }
}
