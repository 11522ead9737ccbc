//! Plain-text report of a decoded certificate.

use crate::cert::Cert;
use certlens_asn1::ObjectIdentifier;
use certlens_x509::oids;
use std::fmt;
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

const INDENT: &str = "    ";
const HEX_BYTES_PER_LINE: usize = 16;
const NOT_PRESENT: &str = "<not present>";
const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]/[month]/[day]");

/// Renders a certificate field by field, then every requested extension.
///
/// ```
/// use certlens::{Cert, CertificateReport};
///
/// let cert = Cert::from_der(certlens_test_data::V1_RSA_DER).unwrap();
/// let report = CertificateReport::new(&cert, &[]).to_string();
/// assert!(report.starts_with("Version:\n    1 (0x0)\n"));
/// ```
pub struct CertificateReport<'a> {
    cert: &'a Cert,
    extensions: &'a [ObjectIdentifier],
}

impl<'a> CertificateReport<'a> {
    pub fn new(cert: &'a Cert, extensions: &'a [ObjectIdentifier]) -> Self {
        Self { cert, extensions }
    }
}

impl fmt::Display for CertificateReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let certificate = self.cert.certificate();

        section(f, "Version")?;
        writeln!(f, "{}{} (0x{:x})", INDENT, self.cert.version(), certificate.version)?;

        section(f, "Serial Number")?;
        // signed hex: a negative serial reads `-255 (0x-ff)`
        writeln!(
            f,
            "{}{} (0x{})",
            INDENT,
            certificate.serial_number,
            certificate.serial_number.to_str_radix(16)
        )?;

        section(f, "Signature Algorithm ID")?;
        writeln!(f, "{}{}", INDENT, certificate.signature.oid())?;

        section(f, "Issuer")?;
        writeln!(f, "{}{}", INDENT, certificate.issuer)?;

        section(f, "Not Before")?;
        writeln!(f, "{}{}", INDENT, date(certificate.validity.not_before)?)?;

        section(f, "Not After")?;
        writeln!(f, "{}{}", INDENT, date(certificate.validity.not_after)?)?;

        section(f, "Subject")?;
        writeln!(f, "{}{}", INDENT, certificate.subject)?;

        let spki = &certificate.subject_public_key_info;
        section(f, "Public Key Algorithm")?;
        match spki.algorithm.named_curve() {
            Some(curve) => writeln!(f, "{}{} ({})", INDENT, spki.algorithm, curve)?,
            None => writeln!(f, "{}{}", INDENT, spki.algorithm)?,
        }

        section(f, "Subject Public Key")?;
        write_hex(f, &spki.encoded)?;

        section(f, "Signature Algorithm")?;
        writeln!(f, "{}{}", INDENT, certificate.signature_algorithm)?;

        section(f, "Signature")?;
        write_hex(f, certificate.signature_value.payload())?;

        for oid in self.extensions {
            match oids::extension_name(oid.arcs()) {
                Some(name) => writeln!(f, "Extension {} ({}):", oid, name)?,
                None => writeln!(f, "Extension {}:", oid)?,
            }

            match self.cert.extension(oid) {
                Some(extension) => {
                    if extension.critical() {
                        writeln!(f, "{}critical", INDENT)?;
                    }
                    write_hex(f, extension.extn_value())?;
                }
                None => writeln!(f, "{}{}", INDENT, NOT_PRESENT)?,
            }
        }

        Ok(())
    }
}

fn section(f: &mut fmt::Formatter<'_>, label: &str) -> fmt::Result {
    writeln!(f, "{}:", label)
}

fn date(instant: OffsetDateTime) -> Result<String, fmt::Error> {
    instant.format(DATE_FORMAT).map_err(|_| fmt::Error)
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    if bytes.is_empty() {
        return writeln!(f, "{}", INDENT);
    }

    for line in bytes.chunks(HEX_BYTES_PER_LINE) {
        writeln!(f, "{}{}", INDENT, hex::encode(line))?;
    }
    Ok(())
}
