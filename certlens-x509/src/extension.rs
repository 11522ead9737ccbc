use crate::{
    error::{CertificateError, ShapeError},
    fields::Fields,
    oids,
};
use certlens_asn1::{AsnNode, ObjectIdentifier, Tag};

/// [RFC 5280 #4.1.2.9](https://tools.ietf.org/html/rfc5280#section-4.1.2.9)
///
/// ```not_rust
/// Extension  ::=  SEQUENCE  {
///      extnID      OBJECT IDENTIFIER,
///      critical    BOOLEAN DEFAULT FALSE,
///      extnValue   OCTET STRING
///                  -- contains the DER encoding of an ASN.1 value
///                  -- corresponding to the extension type identified
///                  -- by extnID
///      }
/// ```
///
/// The value is kept as opaque octets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extension {
    pub extn_id: ObjectIdentifier,
    pub critical: bool,
    pub extn_value: Vec<u8>,
}

impl Extension {
    /// Maps one entry of the extensions list; `index` is its position in it.
    pub(crate) fn from_node(node: &AsnNode<'_>, index: usize) -> Result<Self, CertificateError> {
        Self::decode(node).map_err(|reason| CertificateError::InvalidExtension { index, reason })
    }

    fn decode(node: &AsnNode<'_>) -> Result<Self, ShapeError> {
        let mut fields = Fields::of(node, Tag::SEQUENCE)?;

        let extn_id = fields.next(Tag::OID)?.to_oid()?;
        let critical = match fields.next_if(Tag::BOOLEAN) {
            Some(critical) => critical.to_boolean()?,
            None => {
                log::debug!("extension {}: no critical flag, defaulting to false", extn_id);
                false
            }
        };
        let extn_value = fields.next(Tag::OCTET_STRING)?.to_octet_string()?.to_vec();
        fields.finish()?;

        log::trace!(
            "extension {} ({}), critical: {}, {} value bytes",
            extn_id,
            oids::extension_name(extn_id.arcs()).unwrap_or("unknown"),
            critical,
            extn_value.len()
        );

        Ok(Self {
            extn_id,
            critical,
            extn_value,
        })
    }

    pub fn extn_id(&self) -> &ObjectIdentifier {
        &self.extn_id
    }

    pub fn critical(&self) -> bool {
        self.critical
    }

    /// Content of the `extnValue` OCTET STRING.
    pub fn extn_value(&self) -> &[u8] {
        &self.extn_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certlens_asn1::Asn1Error;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn extension(der: &[u8]) -> Result<Extension, CertificateError> {
        let node = AsnNode::build(der).unwrap();
        Extension::from_node(&node, 3)
    }

    #[test]
    fn critical_defaults_to_false() {
        // SEQUENCE { OID 1.2.86.11.7.9, OCTET STRING { 0C 01 61 } }
        let der = hex::decode("300c06052a560b07090403 0c0161".replace(' ', "")).unwrap();
        let extension = extension(&der).unwrap();

        assert_eq!(extension.extn_id().to_string(), "1.2.86.11.7.9");
        assert!(!extension.critical());
        assert_eq!(extension.extn_value(), &[0x0C, 0x01, 0x61]);
    }

    #[test]
    fn explicit_critical_flag() {
        // keyUsage, critical, digitalSignature | keyEncipherment
        let der = hex::decode("300e0603551d0f0101ff040403020520").unwrap();
        let extension = extension(&der).unwrap();

        assert!(extension.critical());
        assert_eq!(extension.extn_value(), &[0x03, 0x02, 0x05, 0x20]);
    }

    #[rstest]
    // critical encoded as INTEGER
    #[case("300e0603551d0f020101040403020520", ShapeError::WrongTag {
        expected: Tag::OCTET_STRING,
        found: Tag::INTEGER,
        offset: 7,
    })]
    // no extnValue
    #[case("30080603551d0f0101ff", ShapeError::Missing { expected: Tag::OCTET_STRING })]
    // trailing element
    #[case("30100603551d0f0101ff0404030205200500", ShapeError::Trailing {
        found: Tag::NULL,
        offset: 16,
    })]
    // BOOLEAN that is neither 0x00 nor 0xFF
    #[case("300e0603551d0f010101040403020520", ShapeError::Content(Asn1Error::InvalidBoolean { offset: 7 }))]
    fn malformed(#[case] der: &str, #[case] reason: ShapeError) {
        let der = hex::decode(der).unwrap();
        assert_eq!(
            extension(&der),
            Err(CertificateError::InvalidExtension { index: 3, reason })
        );
    }
}
