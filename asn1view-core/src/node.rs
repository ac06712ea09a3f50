//! Decoded TLV tree node types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// BER tag class of a decoded node
///
/// ASN.1 defines four tag classes on the wire. Two extra variants exist only
/// in the decoded tree:
/// - **Unknown**: the tag byte could not be classified (corrupt input)
/// - **Container**: a synthetic node holding multiple independent top-level
///   units found in one buffer; it corresponds to no byte range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagClass {
    /// Universal class (00)
    Universal,
    /// Application class (01)
    Application,
    /// Context-specific class (10)
    ContextSpecific,
    /// Private class (11)
    Private,
    /// Unclassifiable tag byte
    Unknown,
    /// Synthetic container for multiple top-level units
    Container,
}

impl fmt::Display for TagClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TagClass::Universal => "UNIVERSAL",
            TagClass::Application => "APPLICATION",
            TagClass::ContextSpecific => "CONTEXT_SPECIFIC",
            TagClass::Private => "PRIVATE",
            TagClass::Unknown => "UNKNOWN",
            TagClass::Container => "CONTAINER",
        };
        write!(f, "{}", name)
    }
}

/// A decoded TLV structure unit
///
/// One node per TLV unit in the input buffer. Constructed types (SEQUENCE,
/// SET, constructed TAGGED wrappers) carry their elements in `children`;
/// primitives carry a rendered `value` string. A tree is built once per
/// decode call and never mutated afterwards.
///
/// # Offset semantics
///
/// `offset` and `length` describe the byte span of the unit (tag + length
/// header + content) in the buffer it was decoded from. For nodes produced
/// by nested-content re-interpretation of an OCTET STRING or BIT STRING
/// payload, offsets are local to that payload, not to the top-level buffer.
/// Synthetic container nodes carry `offset = 0` and `length` equal to their
/// child count; both are metadata, not a byte range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TlvNode {
    /// Human-readable tag name, e.g. "SEQUENCE", "INTEGER", "TAGGED"
    pub tag: String,
    /// BER tag number; -1 for synthetic or unknown nodes
    pub tag_number: i32,
    /// Tag class
    pub tag_class: TagClass,
    /// Decoded semantic type name; mirrors `tag` except for wrappers such as
    /// "IMPLICIT OCTET STRING"
    #[serde(rename = "type")]
    pub type_name: String,
    /// Rendered value: decimal for integers, hex for byte blobs, element
    /// count description for aggregates
    pub value: String,
    /// Byte offset of the unit in its buffer
    pub offset: usize,
    /// Byte span of the unit (container nodes: child count)
    pub length: usize,
    /// Child nodes, ordered by ascending offset
    pub children: Vec<TlvNode>,
    /// Diagnostic properties, populated only in verbose mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
}

impl TlvNode {
    /// Create a primitive node with no children
    pub fn primitive(
        tag: impl Into<String>,
        tag_number: i32,
        tag_class: TagClass,
        value: impl Into<String>,
        offset: usize,
        length: usize,
    ) -> Self {
        let tag = tag.into();
        Self {
            type_name: tag.clone(),
            tag,
            tag_number,
            tag_class,
            value: value.into(),
            offset,
            length,
            children: Vec::new(),
            properties: None,
        }
    }

    /// Create a constructed node holding `children`
    pub fn constructed(
        tag: impl Into<String>,
        tag_number: i32,
        tag_class: TagClass,
        value: impl Into<String>,
        offset: usize,
        length: usize,
        children: Vec<TlvNode>,
    ) -> Self {
        let tag = tag.into();
        Self {
            type_name: tag.clone(),
            tag,
            tag_number,
            tag_class,
            value: value.into(),
            offset,
            length,
            children,
            properties: None,
        }
    }

    /// Create the synthetic container node for multiple top-level units
    ///
    /// The container's `length` is the child count, not a byte length.
    pub fn container(children: Vec<TlvNode>) -> Self {
        let count = children.len();
        Self {
            tag: "CONTAINER".to_string(),
            tag_number: -1,
            tag_class: TagClass::Container,
            type_name: "CONTAINER".to_string(),
            value: format!("{} top-level objects", count),
            offset: 0,
            length: count,
            children,
            properties: None,
        }
    }

    /// Whether this node is a synthetic container
    pub fn is_container(&self) -> bool {
        self.tag_class == TagClass::Container
    }

    /// Attach a diagnostic property (verbose mode)
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }
}
