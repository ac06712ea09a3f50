//! Segmented strategy: whole-buffer candidate scan with plausibility scoring
//!
//! Last-resort strategy for heavily corrupted buffers. Every position whose
//! byte matches a common universal tag becomes a scored candidate; the best
//! candidates (SEQUENCE and SET first) are decoded once each, and consumed
//! byte ranges suppress overlapping candidates.

use crate::ber::types::BerLength;
use crate::ber::{length, value};
use crate::strategy::COMMON_TAGS;
use asn1view_core::{Asn1Result, DecodeError, TlvNode};

/// Decode window cap per candidate
const MAX_WINDOW: usize = 5000;
/// Window size of the last-resort byte-by-byte scan
const FALLBACK_WINDOW: usize = 100;
/// Position limit of the last-resort byte-by-byte scan
const FALLBACK_SCAN_LIMIT: usize = 1000;
/// Plausibility cap on a candidate's declared content length
const MAX_PLAUSIBLE_CONTENT: usize = 10_000;

/// A position hypothesized to start a valid TLV unit
#[derive(Debug, Clone, Copy)]
struct Candidate {
    pos: usize,
    tag: u8,
    confidence: i32,
}

/// Scan the whole buffer for candidate units and decode the plausible ones
///
/// # Error Handling
/// Fails only if no candidate (and no byte-by-byte fallback window) decodes;
/// individual candidate failures are swallowed.
pub fn decode_all(buffer: &[u8], verbose: bool) -> Asn1Result<Vec<TlvNode>> {
    let mut candidates = collect_candidates(buffer);
    candidates.sort_by_key(|candidate| (tag_priority(candidate.tag), candidate.pos));

    let mut consumed: Vec<(usize, usize)> = Vec::new();
    let mut units = Vec::new();

    for candidate in &candidates {
        if consumed
            .iter()
            .any(|&(start, end)| candidate.pos >= start && candidate.pos < end)
        {
            continue;
        }

        let window = length::unit_length(buffer, candidate.pos)
            .unwrap_or(MAX_WINDOW)
            .min(MAX_WINDOW);
        let window_end = (candidate.pos + window).min(buffer.len());

        match value::decode_unit(&buffer[..window_end], candidate.pos, verbose, 0) {
            Ok(unit) => {
                let span = length::unit_length_or_estimate(buffer, candidate.pos, &unit).max(1);
                consumed.push((candidate.pos, candidate.pos + span));
                units.push(unit);
            }
            Err(err) => {
                log::debug!(
                    "Segmented candidate at offset {} (confidence {}) failed: {}",
                    candidate.pos,
                    candidate.confidence,
                    err
                );
            }
        }
    }

    if units.is_empty() {
        units = byte_by_byte_scan(buffer, verbose);
    }

    if units.is_empty() {
        return Err(DecodeError::InvalidData(
            "No candidate position yielded a TLV unit".to_string(),
        ));
    }

    units.sort_by_key(|unit| unit.offset);
    log::debug!(
        "Segmented strategy recovered {} unit(s) from {} candidate(s)",
        units.len(),
        candidates.len()
    );
    Ok(units)
}

/// Collect and score every common-tag position in the buffer
fn collect_candidates(buffer: &[u8]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for (pos, &tag) in buffer.iter().enumerate() {
        if !COMMON_TAGS.contains(&tag) {
            continue;
        }
        let confidence = candidate_confidence(buffer, pos);
        if confidence > 0 {
            candidates.push(Candidate {
                pos,
                tag,
                confidence,
            });
        }
    }
    candidates
}

/// Plausibility score of a candidate position
///
/// +1 baseline; +2 for a sane length byte (nonzero short form, or long form
/// with 1-4 octets); +1 when the decoded content length is in (0, 10000)
/// and fits the buffer; +2 for SEQUENCE/SET tags; +1 for INTEGER.
fn candidate_confidence(buffer: &[u8], pos: usize) -> i32 {
    let mut confidence = 1;

    if pos + 1 < buffer.len() {
        let length_byte = buffer[pos + 1];
        let short_form = (length_byte & 0x80) == 0;
        let long_octets = (length_byte & 0x7F) as usize;
        if (short_form && length_byte != 0) || (!short_form && (1..=4).contains(&long_octets)) {
            confidence += 2;
        }
        if let Ok((decoded, length_octets)) = BerLength::decode(&buffer[pos + 1..]) {
            let content_len = decoded.value();
            if content_len > 0
                && content_len < MAX_PLAUSIBLE_CONTENT
                && pos + 1 + length_octets + content_len <= buffer.len()
            {
                confidence += 1;
            }
        }
    }

    match buffer[pos] {
        0x30 | 0x31 => confidence += 2,
        0x02 => confidence += 1,
        _ => {}
    }

    confidence
}

/// Candidate ordering: SEQUENCE first, then SET, then everything else
fn tag_priority(tag: u8) -> u8 {
    match tag {
        0x30 => 0,
        0x31 => 1,
        _ => 2,
    }
}

/// Last resort: try a short decode window at each of the first positions
fn byte_by_byte_scan(buffer: &[u8], verbose: bool) -> Vec<TlvNode> {
    for pos in 0..buffer.len().min(FALLBACK_SCAN_LIMIT) {
        let window_end = (pos + FALLBACK_WINDOW).min(buffer.len());
        if let Ok(unit) = value::decode_unit(&buffer[..window_end], pos, verbose, 0) {
            log::debug!("Byte-by-byte scan found a unit at offset {}", pos);
            return vec![unit];
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_sequence_candidates() {
        // INTEGER 5 at offset 0, SEQUENCE { INTEGER 7 } at offset 3
        let buffer = hex::decode("0201053003020107").unwrap();
        let units = decode_all(&buffer, false).unwrap();

        // The SEQUENCE consumed its INTEGER child's range; both top-level
        // units survive, ordered by offset.
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].tag, "INTEGER");
        assert_eq!(units[1].tag, "SEQUENCE");
        assert_eq!(units[1].offset, 3);
    }

    #[test]
    fn test_consumed_ranges_suppress_inner_candidates() {
        let buffer = hex::decode("3003020105").unwrap();
        let units = decode_all(&buffer, false).unwrap();
        // The INTEGER at offset 2 lies inside the decoded SEQUENCE's range
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].tag, "SEQUENCE");
    }

    #[test]
    fn test_recovers_unit_inside_garbage() {
        let mut buffer = vec![0xFF, 0xFE, 0x00, 0xFB];
        buffer.extend_from_slice(&hex::decode("3003020105").unwrap());
        buffer.extend_from_slice(&[0xFA, 0xF9]);
        let units = decode_all(&buffer, false).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].tag, "SEQUENCE");
        assert_eq!(units[0].offset, 4);
    }

    #[test]
    fn test_confidence_scoring() {
        let buffer = hex::decode("3003020105").unwrap();
        // SEQUENCE with sane, fitting length: 1 + 2 + 1 + 2
        assert_eq!(candidate_confidence(&buffer, 0), 6);
        // INTEGER with sane, fitting length: 1 + 2 + 1 + 1
        assert_eq!(candidate_confidence(&buffer, 2), 5);

        // Tag at the last byte: baseline only
        let buffer = [0x02];
        assert_eq!(candidate_confidence(&buffer, 0), 2);
    }

    #[test]
    fn test_fails_on_pure_garbage() {
        assert!(decode_all(&[0xFF, 0xFE, 0xFD], false).is_err());
        assert!(decode_all(&[], false).is_err());
    }
}
