use crate::{
    error::{malformed, CertificateError},
    fields::Fields,
    oids,
};
use certlens_asn1::{AsnNode, ObjectIdentifier, Tag};
use std::fmt;

/// [RFC 5280 #4.1.1.2](https://tools.ietf.org/html/rfc5280#section-4.1.1.2)
///
/// ```not_rust
/// AlgorithmIdentifier  ::=  SEQUENCE  {
///      algorithm               OBJECT IDENTIFIER,
///      parameters              ANY DEFINED BY algorithm OPTIONAL  }
/// ```
///
/// Parameters are kept as their raw DER encoding (`05 00` for NULL, a curve
/// OID for EC keys, a SEQUENCE for RSASSA-PSS...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    pub algorithm: ObjectIdentifier,
    pub parameters: Option<Vec<u8>>,
}

impl AlgorithmIdentifier {
    pub(crate) fn from_node(node: &AsnNode<'_>, field: &'static str) -> Result<Self, CertificateError> {
        let mut fields = Fields::of(node, Tag::SEQUENCE).map_err(malformed(field))?;

        let algorithm = fields.next(Tag::OID).map_err(malformed(field))?.to_oid()?;
        let parameters = fields.next_any().map(|parameters| parameters.encoded().to_vec());
        fields.finish().map_err(malformed(field))?;

        Ok(Self { algorithm, parameters })
    }

    pub fn oid(&self) -> &ObjectIdentifier {
        &self.algorithm
    }

    /// Raw parameters, `None` when the field is absent.
    pub fn parameters(&self) -> Option<&[u8]> {
        self.parameters.as_deref()
    }

    /// Named curve of an EC public key, when the parameters are a known curve OID.
    pub fn named_curve(&self) -> Option<&'static str> {
        let parameters = self.parameters.as_deref()?;
        let node = AsnNode::build(parameters).ok()?;
        let curve = node.to_oid().ok()?;
        oids::curve_name(curve.arcs())
    }
}

impl fmt::Display for AlgorithmIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match oids::algorithm_name(self.algorithm.arcs()) {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.algorithm),
        }
    }
}
