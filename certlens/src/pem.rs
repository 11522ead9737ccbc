use base64::{engine::general_purpose, Engine as _};
use std::borrow::Cow;
use thiserror::Error;

const BEGIN_MARKER: &str = "-----BEGIN";
const END_MARKER: &str = "-----END";
const DASHES: &str = "-----";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PemError {
    /// no `-----BEGIN` marker in the input
    #[error("pem header not found")]
    HeaderNotFound,

    /// the begin line is not closed by dashes
    #[error("invalid pem header")]
    InvalidHeader,

    /// no `-----END` marker after the header
    #[error("pem footer not found")]
    FooterNotFound,

    #[error("couldn't decode base64: {source}")]
    Base64Decoding { source: base64::DecodeError },
}

/// One armored block ([RFC 7468](https://tools.ietf.org/html/rfc7468)): its label and decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pem<'a> {
    label: String,
    data: Cow<'a, [u8]>,
}

impl<'a> Pem<'a> {
    pub fn new<S: Into<String>, D: Into<Cow<'a, [u8]>>>(label: S, data: D) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Cow<'a, [u8]> {
        self.data
    }
}

/// Reads the first armored block of `input`.
///
/// Text around the block is ignored. ASCII whitespace inside the body,
/// CR/LF line breaks included, is dropped before base64 decoding.
pub fn parse_pem<T: ?Sized + AsRef<[u8]>>(input: &T) -> Result<Pem<'static>, PemError> {
    let input = input.as_ref();

    let begin = find(input, BEGIN_MARKER.as_bytes()).ok_or(PemError::HeaderNotFound)?;
    let after_begin = &input[begin + BEGIN_MARKER.len()..];

    let label_len = find(after_begin, b"-").ok_or(PemError::InvalidHeader)?;
    let label = String::from_utf8_lossy(&after_begin[..label_len]).trim().to_owned();

    let closing = find(&after_begin[label_len..], DASHES.as_bytes()).ok_or(PemError::InvalidHeader)?;
    let body = &after_begin[label_len + closing + DASHES.len()..];

    let body_len = find(body, END_MARKER.as_bytes()).ok_or(PemError::FooterNotFound)?;
    let encoded: Vec<u8> = body[..body_len]
        .iter()
        .copied()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect();

    let data = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|source| PemError::Base64Decoding { source })?;

    log::trace!("pem block `{}`: {} bytes", label, data.len());

    Ok(Pem::new(label, data))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Whether `input` looks like PEM text rather than DER.
pub fn is_pem(input: &[u8]) -> bool {
    let start = input.iter().position(|byte| !byte.is_ascii_whitespace()).unwrap_or(input.len());
    input[start..].starts_with(BEGIN_MARKER.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use certlens_test_data::{EC_MULTI_RDN_DER, EC_MULTI_RDN_PEM, V1_RSA_DER, V1_RSA_PEM};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const FLATTENED_PEM: &str = "-----BEGIN GARBAGE-----R0FSQkFHRQ==-----END GARBAGE-----";

    #[test]
    fn read_pem() {
        let pem_from_bytes = parse_pem(EC_MULTI_RDN_PEM.as_bytes()).unwrap();
        assert_eq!(pem_from_bytes.label(), "CERTIFICATE");
        assert_eq!(pem_from_bytes.data(), EC_MULTI_RDN_DER);

        let pem_from_str = parse_pem(EC_MULTI_RDN_PEM).unwrap();
        assert_eq!(pem_from_bytes, pem_from_str);
    }

    #[test]
    fn surrounding_text_is_ignored() {
        let input = format!("subject: v1.certlens.test\n{}\ntrailer\n", V1_RSA_PEM);
        assert_eq!(parse_pem(&input).unwrap().into_data(), V1_RSA_DER);
    }

    #[test]
    fn flattened_pem() {
        let pem = parse_pem(FLATTENED_PEM).unwrap();
        assert_eq!(pem.label(), "GARBAGE");
        assert_eq!(pem.data(), b"GARBAGE");
    }

    #[test]
    fn crlf_line_endings() {
        let pem = parse_pem(&EC_MULTI_RDN_PEM.replace('\n', "\r\n")).unwrap();
        assert_eq!(pem.data(), EC_MULTI_RDN_DER);
    }

    #[rstest]
    #[case("no armor at all", PemError::HeaderNotFound)]
    #[case("-----BEGIN CERTIFICATE", PemError::InvalidHeader)]
    #[case("-----BEGIN CERTIFICATE-----\nAAAA\n", PemError::FooterNotFound)]
    fn malformed_armor(#[case] input: &str, #[case] expected: PemError) {
        assert_eq!(parse_pem(input), Err(expected));
    }

    #[test]
    fn bad_base64() {
        let err = parse_pem("-----BEGIN CERTIFICATE-----\n*not base64*\n-----END CERTIFICATE-----").unwrap_err();
        assert!(matches!(err, PemError::Base64Decoding { .. }));
    }

    #[rstest]
    #[case(b"-----BEGIN CERTIFICATE-----", true)]
    #[case(b"\n\t  -----BEGIN X-----", true)]
    #[case(&[0x30, 0x82, 0x02, 0x12], false)]
    #[case(b"", false)]
    fn sniffing(#[case] input: &[u8], #[case] expected: bool) {
        assert_eq!(is_pem(input), expected);
    }
}
