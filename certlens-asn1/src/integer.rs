//! INTEGER content decoding.

use crate::error::{Asn1Error, Result};
use num_bigint_dig::BigInt;

/// Decodes big-endian two's-complement content into an arbitrary precision
/// integer. A 0x00 pad in front of an octet with its high bit set is part of
/// the encoding and does not change the value.
pub fn decode_big_integer(content: &[u8], offset: usize) -> Result<BigInt> {
    if content.is_empty() {
        return Err(Asn1Error::InvalidInteger { offset });
    }

    Ok(BigInt::from_signed_bytes_be(content))
}

/// Decodes INTEGER content that must fit in an `i64`.
pub fn decode_i64(content: &[u8], offset: usize) -> Result<i64> {
    let significant = strip_sign_padding(content);
    if significant.is_empty() || significant.len() > 8 {
        return Err(Asn1Error::InvalidInteger { offset });
    }

    let init: i64 = if significant[0] & 0x80 != 0 { -1 } else { 0 };
    Ok(significant
        .iter()
        .fold(init, |acc, byte| (acc << 8) | i64::from(*byte)))
}

/// Minimal two's-complement encoding of `value`, as DER requires it.
pub fn encode_big_integer(value: &BigInt) -> Vec<u8> {
    let bytes = value.to_signed_bytes_be();
    strip_sign_padding(&bytes).to_vec()
}

/// Removes redundant leading 0x00 / 0xFF octets that only repeat the sign.
fn strip_sign_padding(content: &[u8]) -> &[u8] {
    let mut start = 0;
    while start + 1 < content.len() {
        let redundant = (content[start] == 0x00 && content[start + 1] & 0x80 == 0)
            || (content[start] == 0xFF && content[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    &content[start..]
}
