//! Fault-tolerant strategy: scan for plausible units, skip corruption

use crate::ber::{length, value};
use crate::strategy::plausible_header;
use asn1view_core::{Asn1Result, DecodeError, TlvNode};

/// Decode window cap; a single recovered unit never reads past this
const MAX_WINDOW: usize = 2000;

/// Scan the buffer for decodable units, skipping over corrupt stretches
///
/// The cursor jumps to the next position whose tag and length bytes look
/// plausible, decodes a bounded window there, and on failure advances by a
/// single byte. The iteration count is capped at the buffer length, so the
/// scan always terminates.
///
/// # Error Handling
/// Fails only if zero units were recovered; per-window failures are
/// swallowed.
pub fn decode_all(buffer: &[u8], verbose: bool) -> Asn1Result<Vec<TlvNode>> {
    let mut units = Vec::new();
    let mut cursor = 0;

    for _ in 0..buffer.len() {
        if cursor >= buffer.len() {
            break;
        }
        let Some(pos) = next_plausible(buffer, cursor) else {
            break;
        };

        let window_end = (pos + MAX_WINDOW).min(buffer.len());
        match value::decode_unit(&buffer[..window_end], pos, verbose, 0) {
            Ok(unit) => {
                let advance = length::unit_length_or_estimate(buffer, pos, &unit).max(1);
                cursor = (pos + advance).min(buffer.len());
                units.push(unit);
            }
            Err(err) => {
                log::debug!("Fault-tolerant scan skipping offset {}: {}", pos, err);
                cursor = pos + 1;
            }
        }
    }

    if units.is_empty() {
        return Err(DecodeError::InvalidData(
            "No recoverable TLV unit found by scanning".to_string(),
        ));
    }

    log::debug!(
        "Fault-tolerant strategy recovered {} unit(s) over {} bytes",
        units.len(),
        buffer.len()
    );
    Ok(units)
}

/// First position at or after `from` whose header bytes look plausible
fn next_plausible(buffer: &[u8], from: usize) -> Option<usize> {
    (from..buffer.len()).find(|&pos| plausible_header(buffer, pos))
}
