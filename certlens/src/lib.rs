//! Read X.509 certificates from DER or PEM and render them as text.
//!
//! ```
//! use certlens::{Cert, CertificateReport};
//!
//! let cert = Cert::from_pem_str(certlens_test_data::EC_MULTI_RDN_PEM).unwrap();
//! assert_eq!(cert.version(), 3);
//! assert_eq!(cert.subject_name().to_string(), "C=CN,O=Certlens Lab,OU=Decoding+CN=ec.certlens.test");
//!
//! let oid = "1.2.86.11.7.9".parse().unwrap();
//! assert!(cert.extension(&oid).is_some());
//!
//! let report = CertificateReport::new(&cert, &[oid]).to_string();
//! assert!(report.contains("Extension 1.2.86.11.7.9:"));
//! ```

pub mod cert;
pub mod pem;
pub mod text;

pub use cert::{Cert, CertError, CERT_PEM_LABEL};
pub use pem::{parse_pem, Pem, PemError};
pub use text::CertificateReport;

pub use certlens_asn1 as asn1;
pub use certlens_x509 as x509;
