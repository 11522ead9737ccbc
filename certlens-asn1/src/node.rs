//! Value tree built on top of the TLV reader.

use crate::{
    bit_string::BitString,
    date::{decode_generalized_time, decode_utc_time},
    error::{Asn1Error, Result},
    integer::{decode_big_integer, decode_i64},
    oid::ObjectIdentifier,
    reader::{TlvItem, TlvReader},
    restricted_string::decode_string,
    tag::Tag,
};
use num_bigint_dig::BigInt;
use std::borrow::Cow;
use time::OffsetDateTime;

/// Maximum number of nested levels, root included.
pub const MAX_DEPTH: usize = 64;

/// One element of a decoded DER tree.
///
/// Nodes borrow their bytes from the input buffer; constructed elements own
/// their children in encoding order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsnNode<'a> {
    Leaf(TlvItem<'a>),
    Container {
        item: TlvItem<'a>,
        children: Vec<AsnNode<'a>>,
    },
}

impl<'a> AsnNode<'a> {
    /// Decodes `buffer` as exactly one DER element and everything below it.
    pub fn build(buffer: &'a [u8]) -> Result<Self> {
        let mut reader = TlvReader::new(buffer);

        let root = reader.read_tlv()?.ok_or(Asn1Error::TruncatedInput {
            offset: 0,
            needed: 1,
            available: 0,
        })?;

        if !reader.is_empty() {
            return Err(Asn1Error::TrailingData {
                offset: reader.offset(),
            });
        }

        Self::from_item(root, 0)
    }

    fn from_item(item: TlvItem<'a>, depth: usize) -> Result<Self> {
        if depth >= MAX_DEPTH {
            return Err(Asn1Error::DepthExceeded {
                offset: item.offset(),
                max: MAX_DEPTH,
            });
        }

        debug_log!("{} at {}", item.tag(), item.offset());

        if !item.tag().is_constructed() {
            return Ok(AsnNode::Leaf(item));
        }

        let children = TlvReader::with_base(item.content(), item.content_offset())
            .map(|child| child.and_then(|child| Self::from_item(child, depth + 1)))
            .collect::<Result<Vec<_>>>()?;

        Ok(AsnNode::Container { item, children })
    }

    #[inline]
    pub fn item(&self) -> &TlvItem<'a> {
        match self {
            AsnNode::Leaf(item) | AsnNode::Container { item, .. } => item,
        }
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.item().tag()
    }

    /// Absolute offset of the identifier octet.
    #[inline]
    pub fn offset(&self) -> usize {
        self.item().offset()
    }

    #[inline]
    pub fn content_offset(&self) -> usize {
        self.item().content_offset()
    }

    #[inline]
    pub fn content(&self) -> &'a [u8] {
        self.item().content()
    }

    /// Full TLV encoding of this node.
    #[inline]
    pub fn encoded(&self) -> &'a [u8] {
        self.item().encoded()
    }

    /// Children of a constructed node; empty for leaves.
    pub fn children(&self) -> &[AsnNode<'a>] {
        match self {
            AsnNode::Leaf(_) => &[],
            AsnNode::Container { children, .. } => children,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, AsnNode::Container { .. })
    }

    /// Checks the tag (class, form and number) of this node.
    pub fn expect_tag(&self, expected: Tag) -> Result<&Self> {
        if self.tag() == expected {
            Ok(self)
        } else {
            Err(Asn1Error::UnexpectedTag {
                offset: self.offset(),
                expected,
                found: self.tag(),
            })
        }
    }

    pub fn to_integer(&self) -> Result<BigInt> {
        self.expect_tag(Tag::INTEGER)?;
        decode_big_integer(self.content(), self.offset())
    }

    pub fn to_small_integer(&self) -> Result<i64> {
        self.expect_tag(Tag::INTEGER)?;
        decode_i64(self.content(), self.offset())
    }

    pub fn to_oid(&self) -> Result<ObjectIdentifier> {
        self.expect_tag(Tag::OID)?;
        ObjectIdentifier::from_der_content(self.content(), self.offset())
    }

    pub fn to_bit_string(&self) -> Result<BitString<'a>> {
        self.expect_tag(Tag::BIT_STRING)?;
        BitString::decode(self.content(), self.offset())
    }

    pub fn to_octet_string(&self) -> Result<&'a [u8]> {
        self.expect_tag(Tag::OCTET_STRING)?;
        Ok(self.content())
    }

    /// DER BOOLEAN: a single octet, `0x00` or `0xFF`.
    pub fn to_boolean(&self) -> Result<bool> {
        self.expect_tag(Tag::BOOLEAN)?;
        match self.content() {
            [0x00] => Ok(false),
            [0xFF] => Ok(true),
            _ => Err(Asn1Error::InvalidBoolean { offset: self.offset() }),
        }
    }

    pub fn to_null(&self) -> Result<()> {
        self.expect_tag(Tag::NULL)?;
        if self.content().is_empty() {
            Ok(())
        } else {
            Err(Asn1Error::InvalidNull { offset: self.offset() })
        }
    }

    /// UTCTime or GeneralizedTime, normalized to UTC.
    pub fn to_time(&self) -> Result<OffsetDateTime> {
        match self.tag() {
            Tag::UTC_TIME => decode_utc_time(self.content(), self.offset()),
            Tag::GENERALIZED_TIME => decode_generalized_time(self.content(), self.offset()),
            found => Err(Asn1Error::UnexpectedTag {
                offset: self.offset(),
                expected: Tag::UTC_TIME,
                found,
            }),
        }
    }

    /// Any of the character string types.
    pub fn to_string_value(&self) -> Result<Cow<'a, str>> {
        decode_string(self.tag(), self.content(), self.offset())
    }
}
