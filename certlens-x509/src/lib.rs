//! X.509 certificate structures mapped from a `certlens-asn1` value tree.
//!
//! Each structure is read positionally from the children of its SEQUENCE.
//! Primitive decoding failures surface as [`CertificateError::Asn1`], grammar
//! violations as [`CertificateError::MalformedCertificate`] naming the
//! offending field, and any failure inside one extension entry as
//! [`CertificateError::InvalidExtension`].

mod fields;

pub mod algorithm_identifier;
pub mod certificate;
pub mod error;
pub mod extension;
pub mod name;
pub mod oids;

pub use algorithm_identifier::AlgorithmIdentifier;
pub use certificate::{Certificate, SubjectPublicKeyInfo, Validity};
pub use error::{CertificateError, ShapeError};
pub use extension::Extension;
pub use name::{AttributeTypeAndValue, AttributeValue, Name, NamePrettyFormatter, RelativeDistinguishedName};

pub use certlens_asn1;
