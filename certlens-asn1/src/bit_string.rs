use crate::error::{Asn1Error, Result};
use std::{borrow::Cow, fmt};

/// A BIT STRING with its exact bit length.
///
/// The unused-bit count is kept alongside the payload octets: key material
/// and signatures are defined in bits, not bytes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitString<'a> {
    unused_bits: u8,
    data: Cow<'a, [u8]>,
}

impl<'a> BitString<'a> {
    /// Decodes BIT STRING content octets (leading unused-bit count included).
    pub fn decode(content: &'a [u8], offset: usize) -> Result<Self> {
        let invalid = |reason| Asn1Error::InvalidBitString { offset, reason };

        let (&unused_bits, data) = content.split_first().ok_or_else(|| invalid("empty content"))?;

        if unused_bits > 7 {
            return Err(invalid("unused bit count above 7"));
        }
        if data.is_empty() && unused_bits != 0 {
            return Err(invalid("unused bits declared on an empty string"));
        }

        Ok(Self {
            unused_bits,
            data: Cow::Borrowed(data),
        })
    }

    /// Detaches the bit string from the buffer it was decoded from.
    pub fn into_owned(self) -> BitString<'static> {
        BitString {
            unused_bits: self.unused_bits,
            data: Cow::Owned(self.data.into_owned()),
        }
    }

    #[inline]
    pub fn unused_bits(&self) -> u8 {
        self.unused_bits
    }

    /// Payload octets; the low `unused_bits` of the last one carry no data.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn bit_len(&self) -> usize {
        self.data.len() * 8 - usize::from(self.unused_bits)
    }

    /// Significant bits, most significant first.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_len()).map(move |i| self.data[i / 8] & (0x80 >> (i % 8)) != 0)
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.data.into_owned()
    }
}

impl fmt::Debug for BitString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString({} bits, ", self.bit_len())?;
        for byte in self.data.iter() {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}
