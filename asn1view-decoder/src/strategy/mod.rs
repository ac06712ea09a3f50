//! Decoding strategy orchestration
//!
//! Three strategies run in priority order over the input buffer:
//!
//! 1. **Standard** — strict sequential decode from offset 0
//! 2. **Fault-tolerant** — cursor scan that skips corrupt stretches
//! 3. **Segmented** — whole-buffer candidate scan with plausibility scoring
//!
//! The first strategy producing at least one unit wins. Multiple top-level
//! units are wrapped in a synthetic container node so callers always get a
//! single root. Each strategy returns `Result` rather than signalling "try
//! the next one" by exception.

pub mod segmented;
pub mod standard;
pub mod tolerant;

use crate::ber::{length, value};
use asn1view_core::{Asn1Result, DecodeError, TlvNode};

/// Common universal (and leading context-specific) tag bytes used by the
/// scanning strategies to spot plausible unit starts
pub const COMMON_TAGS: [u8; 19] = [
    0x01, // BOOLEAN
    0x02, // INTEGER
    0x03, // BIT STRING
    0x04, // OCTET STRING
    0x05, // NULL
    0x06, // OBJECT IDENTIFIER
    0x0A, // ENUMERATED
    0x0C, // UTF8String
    0x12, // NumericString
    0x13, // PrintableString
    0x14, // TeletexString
    0x16, // IA5String
    0x17, // UTCTime
    0x18, // GeneralizedTime
    0x1E, // BMPString
    0x30, // SEQUENCE
    0x31, // SET
    0xA0, // [0] constructed
    0xA1, // [1] constructed
];

/// Whether the tag/length byte pair at `pos` passes the validity checks
/// shared by the fault-tolerant and segmented strategies
pub(crate) fn plausible_header(buffer: &[u8], pos: usize) -> bool {
    if pos + 1 >= buffer.len() || !COMMON_TAGS.contains(&buffer[pos]) {
        return false;
    }
    let length_byte = buffer[pos + 1];
    if (length_byte & 0x80) == 0 {
        length_byte != 0
    } else {
        (1..=4).contains(&(length_byte & 0x7F))
    }
}

/// Decode the buffer with the strategy cascade
///
/// # Returns
/// Returns the root node plus the warnings accumulated while falling back
/// to the recovery strategies.
///
/// # Error Handling
/// Returns `DecodeError::Exhausted` with every strategy's failure reason
/// when all three produce nothing.
pub fn decode_structures(buffer: &[u8], verbose: bool) -> Asn1Result<(TlvNode, Vec<String>)> {
    let mut failures = Vec::new();
    let mut warnings = Vec::new();

    match standard::decode_all(buffer, verbose) {
        Ok(units) => return Ok((promote_standard(buffer, units, verbose), warnings)),
        Err(err) => {
            log::debug!("Standard strategy failed: {}", err);
            failures.push(format!("standard: {}", err));
        }
    }

    warnings.push("standard decode failed; recovered by fault-tolerant scan".to_string());
    match tolerant::decode_all(buffer, verbose) {
        Ok(units) => return Ok((promote(units), warnings)),
        Err(err) => {
            log::debug!("Fault-tolerant strategy failed: {}", err);
            failures.push(format!("fault-tolerant: {}", err));
            warnings.pop();
        }
    }

    warnings.push("sequential decodes failed; recovered by segmented candidate scan".to_string());
    match segmented::decode_all(buffer, verbose) {
        Ok(units) => return Ok((promote(units), warnings)),
        Err(err) => {
            log::debug!("Segmented strategy failed: {}", err);
            failures.push(format!("segmented: {}", err));
        }
    }

    Err(DecodeError::Exhausted(failures.join("; ")))
}

/// Wrap multiple top-level units in a container; promote a single unit
fn promote(mut units: Vec<TlvNode>) -> TlvNode {
    if units.len() == 1 {
        units.remove(0)
    } else {
        TlvNode::container(units)
    }
}

/// Standard-strategy promotion with the single-structure retry
///
/// A buffer that is really one well-formed SEQUENCE can come back mis-split
/// into several units; when the whole buffer's declared length matches its
/// actual length, decode it once more as a single object instead of
/// containerizing the fragments.
fn promote_standard(buffer: &[u8], units: Vec<TlvNode>, verbose: bool) -> TlvNode {
    if units.len() > 1 && looks_like_single_structure(buffer) {
        if let Ok(root) = value::decode_unit(buffer, 0, verbose, 0) {
            return root;
        }
    }
    promote(units)
}

/// Whether the buffer is exactly one well-formed SEQUENCE
fn looks_like_single_structure(buffer: &[u8]) -> bool {
    buffer.len() >= 2
        && buffer[0] == 0x30
        && length::unit_length(buffer, 0).is_ok_and(|span| span == buffer.len())
}
