use crate::{
    algorithm_identifier::AlgorithmIdentifier,
    error::{malformed, CertificateError, ShapeError},
    extension::Extension,
    fields::Fields,
    name::Name,
};
use certlens_asn1::{AsnNode, BitString, ObjectIdentifier, Tag};
use num_bigint_dig::BigInt;
use time::OffsetDateTime;

/// ```not_rust
/// Validity ::= SEQUENCE {
///      notBefore      Time,
///      notAfter       Time }
/// ```
///
/// Both instants are in UTC. Their order is not checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validity {
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
}

/// ```not_rust
/// SubjectPublicKeyInfo  ::=  SEQUENCE  {
///      algorithm            AlgorithmIdentifier,
///      subjectPublicKey     BIT STRING  }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectPublicKeyInfo {
    pub algorithm: AlgorithmIdentifier,
    pub subject_public_key: BitString<'static>,
    /// Whole `SubjectPublicKeyInfo` element, header included.
    pub encoded: Vec<u8>,
}

/// [RFC 5280 #4.1](https://tools.ietf.org/html/rfc5280#section-4.1)
///
/// ```not_rust
/// Certificate  ::=  SEQUENCE  {
///      tbsCertificate       TBSCertificate,
///      signatureAlgorithm   AlgorithmIdentifier,
///      signatureValue       BIT STRING  }
///
/// TBSCertificate  ::=  SEQUENCE  {
///      version         [0]  EXPLICIT Version DEFAULT v1,
///      serialNumber         CertificateSerialNumber,
///      signature            AlgorithmIdentifier,
///      issuer               Name,
///      validity             Validity,
///      subject              Name,
///      subjectPublicKeyInfo SubjectPublicKeyInfo,
///      issuerUniqueID  [1]  IMPLICIT UniqueIdentifier OPTIONAL,
///      subjectUniqueID [2]  IMPLICIT UniqueIdentifier OPTIONAL,
///      extensions      [3]  EXPLICIT Extensions OPTIONAL }
/// ```
///
/// The `tbsCertificate` fields are flattened into this record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Certificate {
    /// Raw version number: 0 for v1, 2 for v3.
    pub version: u8,
    pub serial_number: BigInt,
    /// `signature` field of the `tbsCertificate`.
    pub signature: AlgorithmIdentifier,
    pub issuer: Name,
    pub validity: Validity,
    pub subject: Name,
    pub subject_public_key_info: SubjectPublicKeyInfo,
    pub issuer_unique_id: Option<BitString<'static>>,
    pub subject_unique_id: Option<BitString<'static>>,
    pub extensions: Vec<Extension>,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature_value: BitString<'static>,
}

const VERSION_TAG: Tag = Tag::explicit(0);
const ISSUER_UNIQUE_ID_TAG: Tag = Tag::context_specific(1);
const SUBJECT_UNIQUE_ID_TAG: Tag = Tag::context_specific(2);
const EXTENSIONS_TAG: Tag = Tag::explicit(3);

impl Certificate {
    pub fn from_der<T: ?Sized + AsRef<[u8]>>(der: &T) -> Result<Self, CertificateError> {
        let root = AsnNode::build(der.as_ref())?;
        Self::from_node(&root)
    }

    /// Maps a value tree onto the certificate grammar.
    pub fn from_node(root: &AsnNode<'_>) -> Result<Self, CertificateError> {
        let mut certificate = Fields::of(root, Tag::SEQUENCE).map_err(malformed("certificate"))?;

        let tbs_certificate = certificate
            .next(Tag::SEQUENCE)
            .map_err(malformed("tbsCertificate"))?;
        let signature_algorithm = certificate
            .next(Tag::SEQUENCE)
            .map_err(malformed("signatureAlgorithm"))?;
        let signature_value = certificate
            .next(Tag::BIT_STRING)
            .map_err(malformed("signatureValue"))?;
        certificate.finish().map_err(malformed("certificate"))?;

        let mut tbs = Fields::of(tbs_certificate, Tag::SEQUENCE).map_err(malformed("tbsCertificate"))?;

        let version = match tbs.next_if(VERSION_TAG) {
            Some(node) => decode_version(node)?,
            None => {
                log::debug!("no version field, defaulting to v1");
                0
            }
        };

        let serial_number = tbs
            .next(Tag::INTEGER)
            .map_err(malformed("serialNumber"))?
            .to_integer()?;

        let signature = tbs.next(Tag::SEQUENCE).map_err(malformed("signature"))?;
        let signature = AlgorithmIdentifier::from_node(signature, "signature")?;

        let issuer = tbs.next(Tag::SEQUENCE).map_err(malformed("issuer"))?;
        let issuer = Name::from_node(issuer, "issuer")?;

        let validity = tbs.next(Tag::SEQUENCE).map_err(malformed("validity"))?;
        let validity = decode_validity(validity)?;

        let subject = tbs.next(Tag::SEQUENCE).map_err(malformed("subject"))?;
        let subject = Name::from_node(subject, "subject")?;

        let subject_public_key_info = tbs
            .next(Tag::SEQUENCE)
            .map_err(malformed("subjectPublicKeyInfo"))?;
        let subject_public_key_info = decode_subject_public_key_info(subject_public_key_info)?;

        let issuer_unique_id = tbs.next_if(ISSUER_UNIQUE_ID_TAG).map(decode_unique_id).transpose()?;
        let subject_unique_id = tbs.next_if(SUBJECT_UNIQUE_ID_TAG).map(decode_unique_id).transpose()?;

        let extensions = match tbs.next_if(EXTENSIONS_TAG) {
            Some(node) => decode_extensions(node)?,
            None => Vec::new(),
        };

        tbs.finish().map_err(malformed("tbsCertificate"))?;

        let signature_algorithm = AlgorithmIdentifier::from_node(signature_algorithm, "signatureAlgorithm")?;
        let signature_value = signature_value.to_bit_string()?.into_owned();

        Ok(Self {
            version,
            serial_number,
            signature,
            issuer,
            validity,
            subject,
            subject_public_key_info,
            issuer_unique_id,
            subject_unique_id,
            extensions,
            signature_algorithm,
            signature_value,
        })
    }

    /// First extension carrying `oid`, in encoding order.
    pub fn extension<O: ?Sized + AsRef<[u64]>>(&self, oid: &O) -> Option<&Extension> {
        let oid = oid.as_ref();
        self.extensions.iter().find(|extension| extension.extn_id.arcs() == oid)
    }

    /// Every extension carrying `oid`, in encoding order. Duplicates are kept.
    pub fn extensions_by_oid<'c, O: ?Sized + AsRef<[u64]> + 'c>(
        &'c self,
        oid: &'c O,
    ) -> impl Iterator<Item = &'c Extension> + 'c {
        self.extensions
            .iter()
            .filter(move |extension| extension.extn_id.arcs() == oid.as_ref())
    }
}

// [0] EXPLICIT INTEGER { v1(0), v2(1), v3(2) }
fn decode_version(node: &AsnNode<'_>) -> Result<u8, CertificateError> {
    let mut fields = Fields::of(node, VERSION_TAG).map_err(malformed("version"))?;
    let version = fields.next(Tag::INTEGER).map_err(malformed("version"))?.to_small_integer()?;
    fields.finish().map_err(malformed("version"))?;

    match version {
        0..=2 => Ok(version as u8),
        _ => Err(malformed("version")(ShapeError::Invalid("unknown version number"))),
    }
}

fn decode_validity(node: &AsnNode<'_>) -> Result<Validity, CertificateError> {
    let mut fields = Fields::of(node, Tag::SEQUENCE).map_err(malformed("validity"))?;

    let not_before = next_time(&mut fields)?;
    let not_after = next_time(&mut fields)?;
    fields.finish().map_err(malformed("validity"))?;

    Ok(Validity { not_before, not_after })
}

// Time ::= CHOICE { utcTime UTCTime, generalTime GeneralizedTime }
fn next_time(fields: &mut Fields<'_, '_>) -> Result<OffsetDateTime, CertificateError> {
    match fields.next_any() {
        Some(node) if matches!(node.tag(), Tag::UTC_TIME | Tag::GENERALIZED_TIME) => Ok(node.to_time()?),
        Some(node) => Err(malformed("validity")(ShapeError::WrongTag {
            expected: Tag::UTC_TIME,
            found: node.tag(),
            offset: node.offset(),
        })),
        None => Err(malformed("validity")(ShapeError::Missing {
            expected: Tag::UTC_TIME,
        })),
    }
}

fn decode_subject_public_key_info(node: &AsnNode<'_>) -> Result<SubjectPublicKeyInfo, CertificateError> {
    let mut fields = Fields::of(node, Tag::SEQUENCE).map_err(malformed("subjectPublicKeyInfo"))?;

    let algorithm = fields.next(Tag::SEQUENCE).map_err(malformed("subjectPublicKeyInfo"))?;
    let algorithm = AlgorithmIdentifier::from_node(algorithm, "subjectPublicKeyInfo")?;
    let subject_public_key = fields
        .next(Tag::BIT_STRING)
        .map_err(malformed("subjectPublicKeyInfo"))?
        .to_bit_string()?
        .into_owned();
    fields.finish().map_err(malformed("subjectPublicKeyInfo"))?;

    Ok(SubjectPublicKeyInfo {
        algorithm,
        subject_public_key,
        encoded: node.encoded().to_vec(),
    })
}

// [n] IMPLICIT BIT STRING
fn decode_unique_id(node: &AsnNode<'_>) -> Result<BitString<'static>, CertificateError> {
    Ok(BitString::decode(node.content(), node.offset())?.into_owned())
}

// [3] EXPLICIT SEQUENCE OF Extension
fn decode_extensions(node: &AsnNode<'_>) -> Result<Vec<Extension>, CertificateError> {
    let mut fields = Fields::of(node, EXTENSIONS_TAG).map_err(malformed("extensions"))?;
    let list = fields.next(Tag::SEQUENCE).map_err(malformed("extensions"))?;
    fields.finish().map_err(malformed("extensions"))?;

    if list.children().is_empty() {
        log::debug!("empty extensions list at offset {}", list.offset());
    }

    list.children()
        .iter()
        .enumerate()
        .map(|(index, extension)| Extension::from_node(extension, index))
        .collect()
}

impl SubjectPublicKeyInfo {
    pub fn algorithm_oid(&self) -> &ObjectIdentifier {
        self.algorithm.oid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certlens_asn1::Asn1Error;
    use certlens_test_data::{EC_MULTI_RDN_DER, V1_RSA_DER};
    use pretty_assertions::assert_eq;

    fn patched(der: &[u8], offset: usize, byte: u8) -> Vec<u8> {
        let mut der = der.to_vec();
        der[offset] = byte;
        der
    }

    fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
        let mut out = vec![tag];
        match content.len() {
            len @ 0..=0x7F => out.push(len as u8),
            len @ 0x80..=0xFF => out.extend_from_slice(&[0x81, len as u8]),
            len => out.extend_from_slice(&[0x82, (len >> 8) as u8, len as u8]),
        }
        out.extend_from_slice(content);
        out
    }

    fn extension(oid: &[u8], value: &[u8]) -> Vec<u8> {
        tlv(0x30, &[tlv(0x06, oid), tlv(0x04, value)].concat())
    }

    // re-encodes `der` with its extensions list replaced by `extensions`
    fn with_extensions(der: &[u8], extensions: &[Vec<u8>]) -> Vec<u8> {
        let root = AsnNode::build(der).unwrap();
        let tbs = &root.children()[0];

        let mut tbs_content: Vec<u8> = tbs
            .children()
            .iter()
            .filter(|field| field.tag() != EXTENSIONS_TAG)
            .flat_map(|field| field.encoded().iter().copied())
            .collect();
        tbs_content.extend(tlv(0xA3, &tlv(0x30, &extensions.concat())));

        let mut content = tlv(0x30, &tbs_content);
        for field in &root.children()[1..] {
            content.extend_from_slice(field.encoded());
        }
        tlv(0x30, &content)
    }

    #[test]
    fn absent_version_defaults_to_v1() {
        let certificate = Certificate::from_der(V1_RSA_DER).unwrap();
        assert_eq!(certificate.version, 0);
        assert!(certificate.extensions.is_empty());
        assert_eq!(certificate.issuer_unique_id, None);
        assert_eq!(certificate.subject_unique_id, None);
    }

    #[test]
    fn unknown_version_number() {
        // [0] { INTEGER 2 } -> INTEGER 3
        let der = patched(EC_MULTI_RDN_DER, 12, 0x03);
        assert_eq!(
            Certificate::from_der(&der),
            Err(CertificateError::MalformedCertificate {
                field: "version",
                reason: ShapeError::Invalid("unknown version number"),
            })
        );
    }

    #[test]
    fn serial_number_must_be_an_integer() {
        let der = patched(EC_MULTI_RDN_DER, 13, 0x04);
        assert_eq!(
            Certificate::from_der(&der),
            Err(CertificateError::MalformedCertificate {
                field: "serialNumber",
                reason: ShapeError::WrongTag {
                    expected: Tag::INTEGER,
                    found: Tag::OCTET_STRING,
                    offset: 13,
                },
            })
        );
    }

    #[test]
    fn bad_critical_flag_names_the_extension() {
        // basicConstraints, BOOLEAN 0xFF -> 0x01
        let der = patched(EC_MULTI_RDN_DER, 332, 0x01);
        assert_eq!(
            Certificate::from_der(&der),
            Err(CertificateError::InvalidExtension {
                index: 0,
                reason: ShapeError::Content(Asn1Error::InvalidBoolean { offset: 330 }),
            })
        );
    }

    #[test]
    fn signature_longer_than_its_container() {
        // BIT STRING 03 81 81 -> 03 81 82, enclosing lengths untouched
        let der = patched(V1_RSA_DER, 452, 0x82);
        assert_eq!(
            Certificate::from_der(&der),
            Err(CertificateError::Asn1(Asn1Error::TruncatedInput {
                offset: 453,
                needed: 130,
                available: 129,
            }))
        );
    }

    #[test]
    fn truncated_buffer() {
        assert_eq!(
            Certificate::from_der(&V1_RSA_DER[..300]),
            Err(CertificateError::Asn1(Asn1Error::TruncatedInput {
                offset: 4,
                needed: 578,
                available: 296,
            }))
        );
    }

    #[test]
    fn trailing_bytes_after_certificate() {
        let mut der = EC_MULTI_RDN_DER.to_vec();
        der.push(0x00);
        assert_eq!(
            Certificate::from_der(&der),
            Err(CertificateError::Asn1(Asn1Error::TrailingData { offset: 534 }))
        );
    }

    #[test]
    fn duplicate_extension_oids_keep_encoding_order() {
        // 1.2.86.11.7.9 twice, 1.2.86.11.7.2 in between
        let duplicated = [0x2A, 0x56, 0x0B, 0x07, 0x09];
        let der = with_extensions(
            EC_MULTI_RDN_DER,
            &[
                extension(&duplicated, b"first"),
                extension(&[0x2A, 0x56, 0x0B, 0x07, 0x02], b"other"),
                extension(&duplicated, b"second"),
            ],
        );
        let certificate = Certificate::from_der(&der).unwrap();
        assert_eq!(certificate.extensions.len(), 3);

        let oid: ObjectIdentifier = "1.2.86.11.7.9".parse().unwrap();
        assert_eq!(certificate.extension(&oid).unwrap().extn_value(), b"first");

        let values: Vec<&[u8]> = certificate
            .extensions_by_oid(&oid)
            .map(Extension::extn_value)
            .collect();
        assert_eq!(values, [&b"first"[..], &b"second"[..]]);
    }

    #[test]
    fn public_key_info_keeps_its_encoding() {
        let certificate = Certificate::from_der(EC_MULTI_RDN_DER).unwrap();
        let spki = &certificate.subject_public_key_info;

        assert_eq!(spki.encoded, &EC_MULTI_RDN_DER[228..319]);
        assert!(spki.encoded.ends_with(spki.subject_public_key.payload()));
    }

    #[test]
    fn notafter_as_generalized_time() {
        let certificate = Certificate::from_der(EC_MULTI_RDN_DER).unwrap();
        assert_eq!(certificate.validity.not_after.year(), 2136);
    }
}
