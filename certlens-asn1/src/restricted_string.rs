//! Character string types found in directory names.

use crate::{
    error::{Asn1Error, Result},
    tag::Tag,
};
use std::borrow::Cow;

/// Decodes the content of a character string element into text.
///
/// Single-byte types borrow from the input; wide types (BMPString,
/// UniversalString) and TeletexString are transcoded.
pub fn decode_string(tag: Tag, content: &[u8], offset: usize) -> Result<Cow<'_, str>> {
    let invalid = || Asn1Error::InvalidString { offset, kind: tag };

    match tag {
        Tag::UTF8_STRING => std::str::from_utf8(content).map(Cow::Borrowed).map_err(|_| invalid()),
        Tag::PRINTABLE_STRING | Tag::IA5_STRING | Tag::VISIBLE_STRING => {
            if !content.is_ascii() {
                return Err(invalid());
            }
            std::str::from_utf8(content).map(Cow::Borrowed).map_err(|_| invalid())
        }
        Tag::NUMERIC_STRING => {
            if !content.iter().all(|b| b.is_ascii_digit() || *b == b' ') {
                return Err(invalid());
            }
            std::str::from_utf8(content).map(Cow::Borrowed).map_err(|_| invalid())
        }
        // T.61 proper is rarely honored in practice; read it as Latin-1
        Tag::TELETEX_STRING => Ok(Cow::Owned(content.iter().map(|b| char::from(*b)).collect())),
        Tag::BMP_STRING => {
            if content.len() % 2 != 0 {
                return Err(invalid());
            }
            let units = content.chunks_exact(2).map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
            char::decode_utf16(units)
                .collect::<std::result::Result<String, _>>()
                .map(Cow::Owned)
                .map_err(|_| invalid())
        }
        Tag::UNIVERSAL_STRING => {
            if content.len() % 4 != 0 {
                return Err(invalid());
            }
            content
                .chunks_exact(4)
                .map(|quad| char::from_u32(u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]])))
                .collect::<Option<String>>()
                .map(Cow::Owned)
                .ok_or_else(invalid)
        }
        found => Err(Asn1Error::UnexpectedTag {
            offset,
            expected: Tag::UTF8_STRING,
            found,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Tag::UTF8_STRING, "Île-de-France".as_bytes(), "Île-de-France")]
    #[case(Tag::PRINTABLE_STRING, b"*.contoso.local", "*.contoso.local")]
    #[case(Tag::IA5_STRING, b"admin@certlens.test", "admin@certlens.test")]
    #[case(Tag::NUMERIC_STRING, b"0123 456", "0123 456")]
    #[case(Tag::TELETEX_STRING, &[0x4D, 0xFC, 0x6E, 0x63, 0x68, 0x65, 0x6E], "München")]
    #[case(Tag::BMP_STRING, &[0x00, 0x50, 0x00, 0xE9, 0x00, 0x6B, 0x4E, 0x2D], "Pék中")]
    #[case(Tag::BMP_STRING, &[0xD8, 0x3D, 0xDE, 0x00], "\u{1F600}")]
    #[case(Tag::UNIVERSAL_STRING, &[0x00, 0x00, 0x00, 0x41, 0x00, 0x01, 0xF6, 0x00], "A\u{1F600}")]
    fn decodes(#[case] tag: Tag, #[case] content: &[u8], #[case] expected: &str) {
        assert_eq!(decode_string(tag, content, 0).unwrap(), expected);
    }

    #[test]
    fn single_byte_types_borrow() {
        assert!(matches!(
            decode_string(Tag::PRINTABLE_STRING, b"NL", 0),
            Ok(Cow::Borrowed("NL"))
        ));
    }

    #[rstest]
    #[case(Tag::UTF8_STRING, &[0xC3, 0x28])]
    #[case(Tag::PRINTABLE_STRING, &[0x41, 0xE9])]
    #[case(Tag::IA5_STRING, &[0x80])]
    #[case(Tag::NUMERIC_STRING, b"12-34")]
    #[case(Tag::BMP_STRING, &[0x00, 0x41, 0x00])]
    #[case(Tag::BMP_STRING, &[0xD8, 0x3D])]
    #[case(Tag::UNIVERSAL_STRING, &[0x00, 0x00, 0x41])]
    #[case(Tag::UNIVERSAL_STRING, &[0x00, 0x11, 0x00, 0x00])]
    fn rejects(#[case] tag: Tag, #[case] content: &[u8]) {
        assert_eq!(
            decode_string(tag, content, 4),
            Err(Asn1Error::InvalidString { offset: 4, kind: tag })
        );
    }

    #[test]
    fn not_a_string_type() {
        assert!(matches!(
            decode_string(Tag::OCTET_STRING, b"abc", 0),
            Err(Asn1Error::UnexpectedTag { found: Tag::OCTET_STRING, .. })
        ));
    }
}
