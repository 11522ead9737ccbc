//! OBJECT IDENTIFIER values.

use crate::error::{Asn1Error, Result};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// An object identifier as its sequence of arcs.
///
/// The dotted form is always derived from the arcs, never stored.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectIdentifier(Vec<u64>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseOidError {
    #[error("object identifier needs at least two arcs")]
    TooShort,

    #[error("`{0}` is not a valid arc")]
    InvalidArc(String),

    #[error("first arc must be 0, 1 or 2 (got {0})")]
    InvalidFirstArc(u64),

    #[error("second arc must be below 40 when the first arc is 0 or 1 (got {0})")]
    InvalidSecondArc(u64),

    #[error("first two arcs do not fit in a single sub-identifier")]
    Overflow,
}

impl ObjectIdentifier {
    /// Builds an identifier from its arcs, checking the two leading ones.
    pub fn from_arcs<A: Into<Vec<u64>>>(arcs: A) -> std::result::Result<Self, ParseOidError> {
        let arcs = arcs.into();
        check_leading_arcs(&arcs)?;
        Ok(Self(arcs))
    }

    /// Decodes the content octets of an OBJECT IDENTIFIER.
    pub fn from_der_content(content: &[u8], offset: usize) -> Result<Self> {
        let invalid = |reason| Asn1Error::InvalidOid { offset, reason };

        if content.is_empty() {
            return Err(invalid("empty content"));
        }

        let mut arcs = Vec::with_capacity(content.len() + 1);
        let mut value: u64 = 0;
        let mut in_progress = false;

        for &octet in content {
            if !in_progress && octet == 0x80 {
                return Err(invalid("sub-identifier is not minimally encoded"));
            }
            if value > (u64::MAX >> 7) {
                return Err(invalid("arc does not fit in 64 bits"));
            }

            value = (value << 7) | u64::from(octet & 0x7F);

            if octet & 0x80 == 0 {
                if arcs.is_empty() {
                    // first sub-identifier packs the two leading arcs
                    let (first, second) = match value {
                        0..=39 => (0, value),
                        40..=79 => (1, value - 40),
                        _ => (2, value - 80),
                    };
                    arcs.push(first);
                    arcs.push(second);
                } else {
                    arcs.push(value);
                }
                value = 0;
                in_progress = false;
            } else {
                in_progress = true;
            }
        }

        if in_progress {
            return Err(invalid("last octet has its continuation bit set"));
        }

        Ok(Self(arcs))
    }

    /// Minimal base-128 encoding of the arcs (content octets only).
    pub fn to_der_content(&self) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(self.0.len() * 2);

        let first = self.0[0] * 40 + self.0[1];
        push_base128(&mut encoded, first);
        for &arc in &self.0[2..] {
            push_base128(&mut encoded, arc);
        }

        encoded
    }

    #[inline]
    pub fn arcs(&self) -> &[u64] {
        &self.0
    }
}

fn check_leading_arcs(arcs: &[u64]) -> std::result::Result<(), ParseOidError> {
    match arcs {
        [] | [_] => Err(ParseOidError::TooShort),
        [first, ..] if *first > 2 => Err(ParseOidError::InvalidFirstArc(*first)),
        [first, second, ..] if *first < 2 && *second >= 40 => Err(ParseOidError::InvalidSecondArc(*second)),
        [_, second, ..] if *second > u64::MAX - 80 => Err(ParseOidError::Overflow),
        _ => Ok(()),
    }
}

fn push_base128(out: &mut Vec<u8>, mut value: u64) {
    let mut chunk = [0u8; 10];
    let mut len = 0;
    loop {
        chunk[len] = (value & 0x7F) as u8;
        len += 1;
        value >>= 7;
        if value == 0 {
            break;
        }
    }

    for i in (0..len).rev() {
        let continuation = if i == 0 { 0x00 } else { 0x80 };
        out.push(chunk[i] | continuation);
    }
}

impl FromStr for ObjectIdentifier {
    type Err = ParseOidError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let arcs = s
            .split('.')
            .map(|arc| {
                if arc.is_empty() || !arc.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ParseOidError::InvalidArc(arc.to_owned()));
                }
                arc.parse::<u64>().map_err(|_| ParseOidError::InvalidArc(arc.to_owned()))
            })
            .collect::<std::result::Result<Vec<u64>, _>>()?;

        Self::from_arcs(arcs)
    }
}

impl TryFrom<&str> for ObjectIdentifier {
    type Error = ParseOidError;

    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ObjectIdentifier> for String {
    fn from(oid: ObjectIdentifier) -> Self {
        oid.to_string()
    }
}

impl AsRef<[u64]> for ObjectIdentifier {
    fn as_ref(&self) -> &[u64] {
        &self.0
    }
}

impl PartialEq<[u64]> for ObjectIdentifier {
    fn eq(&self, other: &[u64]) -> bool {
        self.0 == other
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut arcs = self.0.iter();
        if let Some(first) = arcs.next() {
            write!(f, "{}", first)?;
        }
        for arc in arcs {
            write!(f, ".{}", arc)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectIdentifier({})", self)
    }
}
