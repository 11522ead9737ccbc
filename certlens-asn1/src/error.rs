use crate::tag::Tag;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Asn1Error>;

/// Every way a DER buffer can fail to decode.
///
/// Offsets are absolute positions in the buffer handed to the reader or the
/// tree builder, pointing at the identifier octet of the element at fault
/// (or at the first content octet for truncations).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Asn1Error {
    #[error("truncated input at offset {offset}: {needed} bytes declared, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("invalid length field at offset {offset}")]
    InvalidLength { offset: usize },

    #[error("tag number at offset {offset} does not fit in the supported number of octets")]
    OversizedTag { offset: usize },

    #[error("nesting deeper than {max} levels at offset {offset}")]
    DepthExceeded { offset: usize, max: usize },

    #[error("unexpected data after the root element at offset {offset}")]
    TrailingData { offset: usize },

    #[error("expected {expected}, found {found} at offset {offset}")]
    UnexpectedTag { offset: usize, expected: Tag, found: Tag },

    #[error("invalid INTEGER at offset {offset}")]
    InvalidInteger { offset: usize },

    #[error("invalid OBJECT IDENTIFIER at offset {offset}: {reason}")]
    InvalidOid { offset: usize, reason: &'static str },

    #[error("invalid BIT STRING at offset {offset}: {reason}")]
    InvalidBitString { offset: usize, reason: &'static str },

    #[error("invalid time at offset {offset}: {reason}")]
    InvalidTime { offset: usize, reason: &'static str },

    #[error("invalid BOOLEAN at offset {offset}")]
    InvalidBoolean { offset: usize },

    #[error("invalid NULL at offset {offset}")]
    InvalidNull { offset: usize },

    #[error("invalid {kind} content at offset {offset}")]
    InvalidString { offset: usize, kind: Tag },
}

impl Asn1Error {
    /// Offset of the element the error refers to.
    pub fn offset(&self) -> usize {
        match *self {
            Asn1Error::TruncatedInput { offset, .. }
            | Asn1Error::InvalidLength { offset }
            | Asn1Error::OversizedTag { offset }
            | Asn1Error::DepthExceeded { offset, .. }
            | Asn1Error::TrailingData { offset }
            | Asn1Error::UnexpectedTag { offset, .. }
            | Asn1Error::InvalidInteger { offset }
            | Asn1Error::InvalidOid { offset, .. }
            | Asn1Error::InvalidBitString { offset, .. }
            | Asn1Error::InvalidTime { offset, .. }
            | Asn1Error::InvalidBoolean { offset }
            | Asn1Error::InvalidNull { offset }
            | Asn1Error::InvalidString { offset, .. } => offset,
        }
    }
}
