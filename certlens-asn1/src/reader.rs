//! Tag-Length-Value tokenizer.
//!
//! The reader only slices the input: it classifies identifier octets, decodes
//! definite lengths and hands out borrowed content spans. It gives no meaning
//! to the content itself.

use crate::{
    error::{Asn1Error, Result},
    tag::{Tag, TagClass},
};
use std::ops::Range;

/// High-tag-number forms longer than this are refused (28 bits of tag number).
pub const MAX_TAG_OCTETS: usize = 4;

/// One TLV element borrowed from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvItem<'a> {
    tag: Tag,
    offset: usize,
    header_len: usize,
    encoded: &'a [u8],
}

impl<'a> TlvItem<'a> {
    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Absolute offset of the identifier octet.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Absolute offset of the first content octet.
    #[inline]
    pub fn content_offset(&self) -> usize {
        self.offset + self.header_len
    }

    #[inline]
    pub fn header_len(&self) -> usize {
        self.header_len
    }

    #[inline]
    pub fn content(&self) -> &'a [u8] {
        &self.encoded[self.header_len..]
    }

    /// Identifier, length and content octets.
    #[inline]
    pub fn encoded(&self) -> &'a [u8] {
        self.encoded
    }

    /// Absolute byte range covered by [`TlvItem::encoded`].
    #[inline]
    pub fn encoded_span(&self) -> Range<usize> {
        self.offset..self.offset + self.encoded.len()
    }
}

/// Streams [`TlvItem`]s out of a byte slice.
#[derive(Debug, Clone)]
pub struct TlvReader<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
    failed: bool,
}

impl<'a> TlvReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_base(data, 0)
    }

    /// Reader over a sub-slice that starts `base` bytes into the original
    /// buffer, so that reported offsets stay absolute.
    pub fn with_base(data: &'a [u8], base: usize) -> Self {
        Self {
            data,
            pos: 0,
            base,
            failed: false,
        }
    }

    /// Absolute offset of the next unread byte.
    #[inline]
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos.min(self.data.len())..]
    }

    /// Reads the next element; `Ok(None)` marks the end of input.
    pub fn read_tlv(&mut self) -> Result<Option<TlvItem<'a>>> {
        if self.is_empty() {
            return Ok(None);
        }

        let start = self.pos;
        let offset = self.offset();
        let tag = self.read_tag()?;
        let len = self.read_length()?;
        let header_len = self.pos - start;

        let available = self.data.len() - self.pos;
        if len > available {
            debug_log!("read_tlv: TRUNCATED ({} declares {} bytes, {} left)", tag, len, available);
            return Err(Asn1Error::TruncatedInput {
                offset: self.offset(),
                needed: len,
                available,
            });
        }

        self.pos += len;
        let item = TlvItem {
            tag,
            offset,
            header_len,
            encoded: &self.data[start..self.pos],
        };
        debug_log!("read_tlv: {} at {} ({} content bytes)", tag, offset, len);

        Ok(Some(item))
    }

    fn read_byte(&mut self) -> Result<u8> {
        match self.data.get(self.pos) {
            Some(byte) => {
                self.pos += 1;
                Ok(*byte)
            }
            None => Err(Asn1Error::TruncatedInput {
                offset: self.offset(),
                needed: 1,
                available: 0,
            }),
        }
    }

    fn read_tag(&mut self) -> Result<Tag> {
        let offset = self.offset();
        let first = self.read_byte()?;

        let class = TagClass::from_identifier_octet(first);
        let constructed = first & 0x20 != 0;
        let low = first & 0x1F;

        if low != 0x1F {
            return Ok(Tag::new(class, constructed, u32::from(low)));
        }

        let mut number: u32 = 0;
        for _ in 0..MAX_TAG_OCTETS {
            let octet = self.read_byte()?;
            number = (number << 7) | u32::from(octet & 0x7F);
            if octet & 0x80 == 0 {
                return Ok(Tag::new(class, constructed, number));
            }
        }

        debug_log!("read_tag: OVERSIZED tag at {}", offset);
        Err(Asn1Error::OversizedTag { offset })
    }

    fn read_length(&mut self) -> Result<usize> {
        let offset = self.offset();
        let first = self.read_byte()?;

        match first {
            0x00..=0x7F => Ok(usize::from(first)),
            // indefinite form (BER only) and the reserved value
            0x80 | 0xFF => Err(Asn1Error::InvalidLength { offset }),
            _ => {
                let count = usize::from(first & 0x7F);
                if count > std::mem::size_of::<usize>() || count > self.data.len() - self.pos {
                    return Err(Asn1Error::InvalidLength { offset });
                }

                let len = self.data[self.pos..self.pos + count]
                    .iter()
                    .fold(0usize, |acc, byte| (acc << 8) | usize::from(*byte));
                self.pos += count;

                Ok(len)
            }
        }
    }
}

impl<'a> Iterator for TlvReader<'a> {
    type Item = Result<TlvItem<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.read_tlv() {
            Ok(item) => item.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
