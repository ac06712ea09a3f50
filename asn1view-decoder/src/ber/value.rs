//! Typed decoding of TLV units into tree nodes
//!
//! Decodes one unit at a buffer position, dispatching on the universal tag
//! to render a value and, for constructed types, recurse into children.

use crate::ber::length;
use crate::ber::nested;
use crate::ber::types::{BerLength, BerTag, UniversalTag};
use asn1view_core::{Asn1Result, DecodeError, TagClass, TlvNode};
use num_bigint::BigInt;

/// Maximum nesting depth across SEQUENCE/SET recursion and nested-content
/// re-interpretation; guarantees termination on adversarial input.
pub const MAX_NESTING_DEPTH: usize = 10;

/// Decode the TLV unit starting at `offset`
///
/// # Arguments
/// * `buffer` - Buffer containing the unit (offsets in the returned node are
///   relative to this buffer)
/// * `offset` - Start position of the unit
/// * `verbose` - Attach diagnostic `properties` to every node
/// * `depth` - Current recursion depth, bounded by [`MAX_NESTING_DEPTH`]
///
/// # Error Handling
/// Returns error if the tag or length header is malformed, the declared
/// content overruns the buffer, or the depth bound is exceeded.
pub fn decode_unit(
    buffer: &[u8],
    offset: usize,
    verbose: bool,
    depth: usize,
) -> Asn1Result<TlvNode> {
    if depth > MAX_NESTING_DEPTH {
        return Err(DecodeError::InvalidData(format!(
            "Nesting depth exceeds {}",
            MAX_NESTING_DEPTH
        )));
    }
    if offset >= buffer.len() {
        return Err(DecodeError::InvalidData(format!(
            "Offset {} past end of {} byte buffer",
            offset,
            buffer.len()
        )));
    }

    let tag = BerTag::decode(&buffer[offset..])?;
    let (ber_length, length_octets) = BerLength::decode(&buffer[offset + 1..])?;

    let content_start = offset + 1 + length_octets;
    let content_len = ber_length.value();
    let content_end = content_start
        .checked_add(content_len)
        .filter(|&end| end <= buffer.len())
        .ok_or_else(|| {
            DecodeError::InvalidData(format!(
                "Declared content length {} overruns buffer at offset {}",
                content_len, offset
            ))
        })?;
    let content = &buffer[content_start..content_end];
    let span = 1 + length_octets + content_len;

    let mut node = match tag.class() {
        TagClass::Universal => {
            decode_universal(buffer, offset, span, content_start, content, tag, verbose, depth)?
        }
        _ => decode_tagged(buffer, offset, span, content_start, content, tag, verbose, depth),
    };

    if verbose {
        attach_diagnostics(&mut node, buffer[offset]);
    }

    Ok(node)
}

/// Decode a unit of a universal tag
#[allow(clippy::too_many_arguments)]
fn decode_universal(
    buffer: &[u8],
    offset: usize,
    span: usize,
    content_start: usize,
    content: &[u8],
    tag: BerTag,
    verbose: bool,
    depth: usize,
) -> Asn1Result<TlvNode> {
    let Some(universal) = UniversalTag::from_number(tag.number()) else {
        // Not in the closed set of supported types: explicit UNKNOWN node
        return Ok(TlvNode::primitive(
            "UNKNOWN",
            -1,
            TagClass::Unknown,
            render_hex(content),
            offset,
            span,
        ));
    };

    let name = universal.name();
    let number = universal.number() as i32;

    let node = match universal {
        UniversalTag::Sequence | UniversalTag::Set => {
            let children = decode_elements(
                buffer,
                content_start,
                content_start + content.len(),
                verbose,
                depth + 1,
            )?;
            let value = format!("{} elements", children.len());
            TlvNode::constructed(name, number, TagClass::Universal, value, offset, span, children)
        }
        UniversalTag::Integer => {
            let value = BigInt::from_signed_bytes_be(content).to_string();
            TlvNode::primitive(name, number, TagClass::Universal, value, offset, span)
        }
        UniversalTag::OctetString => {
            let mut node = TlvNode::primitive(
                name,
                number,
                TagClass::Universal,
                render_hex(content),
                offset,
                span,
            );
            nested::reinterpret(&mut node, content, verbose, depth + 1);
            node
        }
        UniversalTag::BitString => {
            // First content octet is the unused-bits count; the bit data
            // follows it.
            let data = content.split_first().map(|(_, rest)| rest).unwrap_or(&[]);
            let mut node = TlvNode::primitive(
                name,
                number,
                TagClass::Universal,
                render_hex(data),
                offset,
                span,
            );
            nested::reinterpret(&mut node, data, verbose, depth + 1);
            node
        }
        UniversalTag::Boolean => {
            let byte = content.first().ok_or_else(|| {
                DecodeError::InvalidData("Empty BOOLEAN content".to_string())
            })?;
            let value = if *byte != 0 { "TRUE" } else { "FALSE" };
            TlvNode::primitive(name, number, TagClass::Universal, value, offset, span)
        }
        UniversalTag::Null => {
            TlvNode::primitive(name, number, TagClass::Universal, "NULL", offset, span)
        }
        UniversalTag::ObjectIdentifier => {
            let value = decode_oid(content)?;
            TlvNode::primitive(name, number, TagClass::Universal, value, offset, span)
        }
        UniversalTag::Utf8String
        | UniversalTag::PrintableString
        | UniversalTag::Ia5String
        | UniversalTag::UtcTime
        | UniversalTag::GeneralizedTime => {
            let value = String::from_utf8_lossy(content).into_owned();
            TlvNode::primitive(name, number, TagClass::Universal, value, offset, span)
        }
    };

    Ok(node)
}

/// Decode a context-specific, application or private wrapper
///
/// Primitive wrappers are implicit-tagged byte blobs; constructed wrappers
/// are decoded recursively and the inner type/value/children copied up. An
/// undecodable constructed payload keeps the hex rendering.
#[allow(clippy::too_many_arguments)]
fn decode_tagged(
    buffer: &[u8],
    offset: usize,
    span: usize,
    content_start: usize,
    content: &[u8],
    tag: BerTag,
    verbose: bool,
    depth: usize,
) -> TlvNode {
    let mut node = TlvNode::primitive(
        "TAGGED",
        tag.number() as i32,
        tag.class(),
        render_hex(content),
        offset,
        span,
    );

    if !tag.is_constructed() {
        node.type_name = "IMPLICIT OCTET STRING".to_string();
        return node;
    }

    if !content.is_empty() {
        match decode_unit(buffer, content_start, verbose, depth + 1) {
            Ok(inner) => {
                node.type_name = inner.type_name;
                node.value = inner.value;
                node.children = inner.children;
            }
            Err(err) => {
                log::debug!(
                    "Keeping hex rendering for tagged unit at offset {}: {}",
                    offset,
                    err
                );
            }
        }
    }

    node
}

/// Decode consecutive elements of a constructed unit's content region
///
/// Walks from `start` to `end`, advancing by the calculated length of each
/// element. A non-advancing step terminates the walk.
pub fn decode_elements(
    buffer: &[u8],
    start: usize,
    end: usize,
    verbose: bool,
    depth: usize,
) -> Asn1Result<Vec<TlvNode>> {
    let end = end.min(buffer.len());
    let mut children = Vec::new();
    let mut pos = start;

    while pos < end {
        let child = decode_unit(buffer, pos, verbose, depth)?;
        let next = length::next_offset(buffer, pos, &child).min(end);
        children.push(child);
        if next <= pos {
            break;
        }
        pos = next;
    }

    Ok(children)
}

/// Render raw octets as a lowercase hex string with `0x` prefix
pub fn render_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode OID content octets to the dotted-decimal string
///
/// First octet packs the first two components as `40 * X + Y`; the rest are
/// base-128 with a continuation bit.
fn decode_oid(content: &[u8]) -> Asn1Result<String> {
    if content.is_empty() {
        return Err(DecodeError::InvalidData(
            "Empty object identifier encoding".to_string(),
        ));
    }

    let first_byte = content[0];
    let mut components: Vec<u32> = vec![(first_byte / 40) as u32, (first_byte % 40) as u32];

    let mut pos = 1;
    while pos < content.len() {
        let mut component = 0u32;
        let mut has_more = true;

        while has_more && pos < content.len() {
            let byte = content[pos];
            has_more = (byte & 0x80) != 0;
            component = component
                .checked_mul(128)
                .and_then(|x| x.checked_add((byte & 0x7F) as u32))
                .ok_or_else(|| {
                    DecodeError::InvalidData("OID component overflow".to_string())
                })?;
            pos += 1;
        }

        if has_more {
            return Err(DecodeError::InvalidData(
                "Truncated OID component".to_string(),
            ));
        }

        components.push(component);
    }

    let dotted: Vec<String> = components.iter().map(|c| c.to_string()).collect();
    Ok(dotted.join("."))
}

/// Attach verbose-mode diagnostics: the decoder kind and an identity hash
///
/// Purely informational; carries no structural meaning.
fn attach_diagnostics(node: &mut TlvNode, tag_byte: u8) {
    let class = decoder_class(node);
    let hash = identity_hash(tag_byte, node.offset, node.length, &class);
    node.set_property("decoderClass", class);
    node.set_property("identityHash", format!("{:08x}", hash));
}

/// Decoder kind name derived from the node's tag, e.g. "OctetStringDecoder"
fn decoder_class(node: &TlvNode) -> String {
    let mut name = String::new();
    let mut upper_next = true;
    for ch in node.tag.chars() {
        if ch == ' ' {
            upper_next = true;
        } else if upper_next {
            name.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            name.extend(ch.to_lowercase());
        }
    }
    name.push_str("Decoder");
    name
}

/// FNV-1a hash over the node's identifying facts
fn identity_hash(tag_byte: u8, offset: usize, length: usize, class: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = FNV_OFFSET;
    let mut mix = |byte: u8| {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    };
    mix(tag_byte);
    for byte in offset.to_be_bytes() {
        mix(byte);
    }
    for byte in length.to_be_bytes() {
        mix(byte);
    }
    for byte in class.bytes() {
        mix(byte);
    }
    hash
}
