use crate::pem::{parse_pem, Pem, PemError};
use certlens_asn1::ObjectIdentifier;
use certlens_x509::{AlgorithmIdentifier, Certificate, CertificateError, Extension, Name, SubjectPublicKeyInfo};
use num_bigint_dig::BigInt;
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertError {
    /// couldn't decode the certificate
    #[error("couldn't decode certificate: {source}")]
    Decoding {
        #[from]
        source: CertificateError,
    },

    /// couldn't read the pem armor
    #[error("couldn't read pem: {source}")]
    Pem {
        #[from]
        source: PemError,
    },

    /// the pem block does not hold a certificate
    #[error("invalid PEM label: {label}")]
    InvalidPemLabel { label: String },
}

pub const CERT_PEM_LABEL: &str = "CERTIFICATE";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cert(Certificate);

impl From<Certificate> for Cert {
    fn from(certificate: Certificate) -> Self {
        Self(certificate)
    }
}

impl From<Cert> for Certificate {
    fn from(cert: Cert) -> Self {
        cert.0
    }
}

impl Cert {
    pub fn from_der<T: ?Sized + AsRef<[u8]>>(der: &T) -> Result<Self, CertError> {
        Ok(Self(Certificate::from_der(der)?))
    }

    pub fn from_pem(pem: &Pem) -> Result<Self, CertError> {
        match pem.label() {
            CERT_PEM_LABEL => Self::from_der(pem.data()),
            _ => Err(CertError::InvalidPemLabel {
                label: pem.label().to_owned(),
            }),
        }
    }

    pub fn from_pem_str(pem_str: &str) -> Result<Self, CertError> {
        let pem = parse_pem(pem_str)?;
        Self::from_pem(&pem)
    }

    pub fn certificate(&self) -> &Certificate {
        &self.0
    }

    /// 1-based version, as written on certificates (`3` for v3).
    pub fn version(&self) -> u8 {
        self.0.version + 1
    }

    pub fn serial_number(&self) -> &BigInt {
        &self.0.serial_number
    }

    pub fn signature_algorithm(&self) -> &AlgorithmIdentifier {
        &self.0.signature_algorithm
    }

    pub fn issuer_name(&self) -> &Name {
        &self.0.issuer
    }

    pub fn subject_name(&self) -> &Name {
        &self.0.subject
    }

    pub fn valid_not_before(&self) -> OffsetDateTime {
        self.0.validity.not_before
    }

    pub fn valid_not_after(&self) -> OffsetDateTime {
        self.0.validity.not_after
    }

    pub fn public_key(&self) -> &SubjectPublicKeyInfo {
        &self.0.subject_public_key_info
    }

    pub fn signature(&self) -> &[u8] {
        self.0.signature_value.payload()
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.0.extensions
    }

    /// Extension carrying `oid`, if the certificate has one.
    pub fn extension(&self, oid: &ObjectIdentifier) -> Option<&Extension> {
        self.0.extension(oid)
    }
}
