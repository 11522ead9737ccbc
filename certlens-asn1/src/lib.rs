//! Zero-copy reader for ASN.1 DER.
//!
//! Decoding happens in three layers: [`TlvReader`] slices a buffer into
//! tag-length-value items, [`AsnNode::build`] turns them into a tree of
//! borrowed nodes, and the primitive decoders give meaning to leaf content
//! (INTEGER, OBJECT IDENTIFIER, BIT STRING, times and character strings).
//!
//! ```
//! use certlens_asn1::{AsnNode, Tag};
//!
//! let encoded = [0x30, 0x06, 0x06, 0x01, 0x2A, 0x02, 0x01, 0x05];
//! let root = AsnNode::build(&encoded).unwrap();
//!
//! assert_eq!(root.tag(), Tag::SEQUENCE);
//! assert_eq!(root.children()[0].to_oid().unwrap().to_string(), "1.2");
//! assert_eq!(root.children()[1].to_small_integer().unwrap(), 5);
//! ```

#[macro_use]
mod debug_log;

pub mod bit_string;
pub mod date;
pub mod error;
pub mod integer;
pub mod node;
pub mod oid;
pub mod reader;
pub mod restricted_string;
pub mod tag;

pub use bit_string::BitString;
pub use error::{Asn1Error, Result};
pub use node::{AsnNode, MAX_DEPTH};
pub use oid::{ObjectIdentifier, ParseOidError};
pub use reader::{TlvItem, TlvReader, MAX_TAG_OCTETS};
pub use tag::{Tag, TagClass};

pub use num_bigint_dig::BigInt;
pub use time::OffsetDateTime;
