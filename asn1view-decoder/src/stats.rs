//! Tree statistics and wire-encoding classification

use asn1view_core::TlvNode;

/// Total node count of the tree rooted at `root` (root included)
pub fn count_total_objects(root: &TlvNode) -> usize {
    1 + root
        .children
        .iter()
        .map(count_total_objects)
        .sum::<usize>()
}

/// Maximum depth of the tree rooted at `root` (a leaf has depth 1)
pub fn calculate_max_depth(root: &TlvNode) -> usize {
    1 + root
        .children
        .iter()
        .map(calculate_max_depth)
        .max()
        .unwrap_or(0)
}

/// Guess whether the buffer is DER or BER encoded
///
/// Looks only at the first unit's header: when the low five bits of byte 0
/// match the SEQUENCE tag pattern, a short-form length or a minimal long
/// form (1-4 octets, no leading zero octet) reads as DER, anything else as
/// BER. Buffers not starting with a SEQUENCE pattern are "Unknown".
pub fn probable_encoding(buffer: &[u8]) -> &'static str {
    if buffer.len() < 2 || (buffer[0] & 0x1F) != 0x10 {
        return "Unknown";
    }

    let length_byte = buffer[1];
    if (length_byte & 0x80) == 0 {
        return "DER";
    }

    let length_octets = (length_byte & 0x7F) as usize;
    let minimal = (1..=4).contains(&length_octets)
        && buffer.get(2).is_some_and(|&first_octet| first_octet != 0);
    if minimal { "DER" } else { "BER" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asn1view_core::TagClass;

    fn leaf(offset: usize) -> TlvNode {
        TlvNode::primitive("INTEGER", 2, TagClass::Universal, "1", offset, 3)
    }

    #[test]
    fn test_count_total_objects() {
        assert_eq!(count_total_objects(&leaf(0)), 1);

        let seq = TlvNode::constructed(
            "SEQUENCE",
            16,
            TagClass::Universal,
            "2 elements",
            0,
            8,
            vec![leaf(2), leaf(5)],
        );
        assert_eq!(count_total_objects(&seq), 3);

        let container = TlvNode::container(vec![seq, leaf(8)]);
        assert_eq!(count_total_objects(&container), 5);
    }

    #[test]
    fn test_calculate_max_depth() {
        assert_eq!(calculate_max_depth(&leaf(0)), 1);

        let inner = TlvNode::constructed(
            "SEQUENCE",
            16,
            TagClass::Universal,
            "1 elements",
            2,
            5,
            vec![leaf(4)],
        );
        let outer = TlvNode::constructed(
            "SEQUENCE",
            16,
            TagClass::Universal,
            "2 elements",
            0,
            10,
            vec![inner, leaf(7)],
        );
        assert_eq!(calculate_max_depth(&outer), 3);
    }

    #[test]
    fn test_probable_encoding() {
        assert_eq!(probable_encoding(&hex::decode("3003020105").unwrap()), "DER");
        // Long form with a leading zero octet is non-minimal
        assert_eq!(probable_encoding(&[0x30, 0x82, 0x00, 0x10]), "BER");
        assert_eq!(probable_encoding(&[0x30, 0x81, 0x80]), "DER");
        assert_eq!(probable_encoding(&[0x30, 0x80]), "BER"); // indefinite
        assert_eq!(probable_encoding(&[0x02, 0x01, 0x05]), "Unknown");
        assert_eq!(probable_encoding(&[]), "Unknown");
    }
}
