//! `certlens` command line: reads one certificate and prints its fields.

pub mod config;
pub mod logging;

use anyhow::Context;
use certlens::{pem, Cert, CertificateReport};
use config::{Config, InputFormat};

/// Decodes `input` according to `format`.
pub fn decode(input: &[u8], format: InputFormat) -> anyhow::Result<Cert> {
    let pem = match format {
        InputFormat::Pem => true,
        InputFormat::Der => false,
        InputFormat::Auto => pem::is_pem(input),
    };

    if pem {
        log::debug!("decoding PEM input");
        let pem = pem::parse_pem(input).context("couldn't read PEM input")?;
        Cert::from_pem(&pem).context("couldn't decode certificate")
    } else {
        log::debug!("decoding DER input");
        Cert::from_der(input).context("couldn't decode certificate")
    }
}

/// Reads the configured file and renders its report.
pub fn run(config: &Config) -> anyhow::Result<String> {
    log::info!("parsing certificate file {}", config.input.display());

    let input = std::fs::read(&config.input)
        .with_context(|| format!("couldn't read {}", config.input.display()))?;
    let cert = decode(&input, config.format)?;

    Ok(CertificateReport::new(&cert, &config.extensions).to_string())
}
