use anyhow::{anyhow, Context};
use certlens::asn1::ObjectIdentifier;
use clap::{crate_authors, crate_description, crate_version, App, Arg, ArgMatches};
use log::LevelFilter;
use std::{ffi::OsString, path::PathBuf, str::FromStr};

pub const DEFAULT_INPUT: &str = "test/ca.cer";

pub const ARG_INPUT: &str = "input";
pub const ARG_EXTENSION: &str = "extension";

pub const ARG_FORMAT: &str = "format";
pub const ARG_FORMAT_AUTO: &str = "auto";
pub const ARG_FORMAT_DER: &str = "der";
pub const ARG_FORMAT_PEM: &str = "pem";

pub const ARG_LOGGING: &str = "logging";
pub const ARG_LOGGING_TRACE: &str = "trace";
pub const ARG_LOGGING_DEBUG: &str = "debug";
pub const ARG_LOGGING_INFO: &str = "info";
pub const ARG_LOGGING_WARN: &str = "warn";
pub const ARG_LOGGING_ERR: &str = "err";
pub const ARG_LOGGING_OFF: &str = "off";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// PEM when the file starts with a PEM header, DER otherwise.
    Auto,
    Der,
    Pem,
}

impl FromStr for InputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ARG_FORMAT_AUTO => Ok(Self::Auto),
            ARG_FORMAT_DER => Ok(Self::Der),
            ARG_FORMAT_PEM => Ok(Self::Pem),
            _ => Err(anyhow!("unknown input format `{}`", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    /// Whether `input` is the fallback path rather than one given on the command line.
    pub default_input: bool,
    pub format: InputFormat,
    pub extensions: Vec<ObjectIdentifier>,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_args() -> anyhow::Result<Self> {
        Self::from_matches(&app().get_matches())
    }

    pub fn from_args_iter<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().get_matches_from_safe(args)?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches<'_>) -> anyhow::Result<Self> {
        let (input, default_input) = match matches.value_of(ARG_INPUT) {
            Some(input) => (PathBuf::from(input), false),
            None => (PathBuf::from(DEFAULT_INPUT), true),
        };

        let format = matches.value_of(ARG_FORMAT).unwrap_or(ARG_FORMAT_AUTO).parse()?;

        let extensions = matches
            .values_of(ARG_EXTENSION)
            .into_iter()
            .flatten()
            .map(|oid| {
                oid.parse::<ObjectIdentifier>()
                    .with_context(|| format!("invalid extension OID `{}`", oid))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let log_level = match matches.value_of(ARG_LOGGING).unwrap_or(ARG_LOGGING_OFF) {
            ARG_LOGGING_TRACE => LevelFilter::Trace,
            ARG_LOGGING_DEBUG => LevelFilter::Debug,
            ARG_LOGGING_INFO => LevelFilter::Info,
            ARG_LOGGING_WARN => LevelFilter::Warn,
            ARG_LOGGING_ERR => LevelFilter::Error,
            ARG_LOGGING_OFF => LevelFilter::Off,
            other => return Err(anyhow!("unexpected log level `{}`", other)),
        };

        Ok(Self {
            input,
            default_input,
            format,
            extensions,
            log_level,
        })
    }
}

pub fn app() -> App<'static, 'static> {
    let validate_oid = |oid: String| match oid.parse::<ObjectIdentifier>() {
        Ok(_) => Ok(()),
        Err(e) => Err(format!("`{}` is not a dotted OID: {}", oid, e)),
    };

    App::new("certlens")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::with_name(ARG_INPUT)
                .value_name("CERTIFICATE")
                .help("Path to a DER or PEM certificate")
                .long_help("Path to a DER or PEM certificate. When omitted, `test/ca.cer` is read.")
                .index(1),
        )
        .arg(
            Arg::with_name(ARG_EXTENSION)
                .short("e")
                .long(ARG_EXTENSION)
                .value_name("OID")
                .help("Print the raw value of the extension with this OID")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .validator(validate_oid)
                .display_order(0),
        )
        .arg(
            Arg::with_name(ARG_FORMAT)
                .short("f")
                .long(ARG_FORMAT)
                .value_name("FORMAT")
                .help("Input encoding")
                .takes_value(true)
                .possible_values(&[ARG_FORMAT_AUTO, ARG_FORMAT_DER, ARG_FORMAT_PEM])
                .default_value(ARG_FORMAT_AUTO)
                .display_order(1),
        )
        .arg(
            Arg::with_name(ARG_LOGGING)
                .short("l")
                .long(ARG_LOGGING)
                .value_name("LOG_LEVEL")
                .help("Turn on decoder logging with provided level")
                .takes_value(true)
                .possible_values(&[
                    ARG_LOGGING_TRACE,
                    ARG_LOGGING_DEBUG,
                    ARG_LOGGING_INFO,
                    ARG_LOGGING_WARN,
                    ARG_LOGGING_ERR,
                    ARG_LOGGING_OFF,
                ])
                .display_order(2),
        )
}
