//! Certificates shared between the tests of the certlens crates.

// RSA 2048 leaf issued by "contoso.local Authority": v3, four extensions
// (basicConstraints, keyUsage, subjectKeyIdentifier, authorityKeyIdentifier).
pub const CONTOSO_LEAF_PEM: &str = include_str!("../test_assets/contoso_leaf.crt");

// Self-signed RSA 1024 key, serial 0xC0FFEE, sha256WithRSAEncryption.
// No version field (v1) and no extensions.
pub const V1_RSA_PEM: &str = include_str!("../test_assets/v1_rsa.crt");
pub const V1_RSA_DER: &[u8] = include_bytes!("../test_assets/v1_rsa.der");

// Self-signed P-256 key under ecdsa-with-SHA384, notAfter as GeneralizedTime,
// a multi-valued last RDN (OU + CN), three standard extensions and two private ones:
// 1.2.86.11.7.9 (UTF8String) and 1.2.86.11.7.1.8 (PrintableString, critical).
pub const EC_MULTI_RDN_PEM: &str = include_str!("../test_assets/ec_multi_rdn.crt");
pub const EC_MULTI_RDN_DER: &[u8] = include_bytes!("../test_assets/ec_multi_rdn.der");
