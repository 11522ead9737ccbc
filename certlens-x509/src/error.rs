use certlens_asn1::{Asn1Error, Tag};
use thiserror::Error;

/// Why a node does not fit the place it occupies in the certificate grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("missing {expected}")]
    Missing { expected: Tag },

    #[error("expected {expected}, found {found} at offset {offset}")]
    WrongTag { expected: Tag, found: Tag, offset: usize },

    #[error("unexpected trailing {found} at offset {offset}")]
    Trailing { found: Tag, offset: usize },

    #[error("{0}")]
    Invalid(&'static str),

    #[error(transparent)]
    Content(#[from] Asn1Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertificateError {
    /// Encoding-level failure: truncation, bad lengths, malformed primitives.
    #[error(transparent)]
    Asn1(#[from] Asn1Error),

    #[error("malformed certificate field `{field}`")]
    MalformedCertificate {
        field: &'static str,
        #[source]
        reason: ShapeError,
    },

    #[error("invalid extension #{index}")]
    InvalidExtension {
        index: usize,
        #[source]
        reason: ShapeError,
    },
}

pub(crate) fn malformed(field: &'static str) -> impl FnOnce(ShapeError) -> CertificateError {
    move |reason| CertificateError::MalformedCertificate { field, reason }
}
