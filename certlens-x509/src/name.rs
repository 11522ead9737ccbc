use crate::{
    error::{malformed, CertificateError, ShapeError},
    fields::{self, Fields},
    oids,
};
use certlens_asn1::{AsnNode, ObjectIdentifier, Tag};
use std::fmt;

/// [RFC 5280 #4.1.2.4](https://tools.ietf.org/html/rfc5280#section-4.1.2.4)
///
/// ```not_rust
/// Name ::= CHOICE { -- only one possibility for now --
///       rdnSequence  RDNSequence }
///
/// RDNSequence ::= SEQUENCE OF RelativeDistinguishedName
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Name(pub Vec<RelativeDistinguishedName>);

/// ```not_rust
/// RelativeDistinguishedName ::= SET SIZE (1..MAX) OF AttributeTypeAndValue
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelativeDistinguishedName(pub Vec<AttributeTypeAndValue>);

/// ```not_rust
/// AttributeTypeAndValue ::= SEQUENCE {
///       type     AttributeType,
///       value    AttributeValue }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeTypeAndValue {
    pub ty: ObjectIdentifier,
    pub value: AttributeValue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeValue {
    /// A directory string, decoded to text. `tag` keeps the original string type.
    Text { tag: Tag, value: String },
    /// Anything else, as its complete DER encoding.
    Other(Vec<u8>),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text { value, .. } => Some(value),
            AttributeValue::Other(_) => None,
        }
    }
}

impl Name {
    /// Decodes a standalone DER-encoded `Name`.
    pub fn from_der(der: &[u8]) -> Result<Self, CertificateError> {
        let root = AsnNode::build(der)?;
        Self::from_node(&root, "name")
    }

    pub(crate) fn from_node(node: &AsnNode<'_>, field: &'static str) -> Result<Self, CertificateError> {
        fields::expect(node, Tag::SEQUENCE).map_err(malformed(field))?;

        node.children()
            .iter()
            .map(|rdn| RelativeDistinguishedName::from_node(rdn, field))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every attribute, flattened in encoding order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeTypeAndValue> {
        self.0.iter().flat_map(|rdn| rdn.0.iter())
    }

    /// Find the first common name contained in this `Name`
    pub fn find_common_name(&self) -> Option<&str> {
        self.attributes()
            .find(|attribute| attribute.ty == *oids::AT_COMMON_NAME)
            .and_then(|attribute| attribute.value.as_str())
    }
}

impl RelativeDistinguishedName {
    fn from_node(node: &AsnNode<'_>, field: &'static str) -> Result<Self, CertificateError> {
        fields::expect(node, Tag::SET).map_err(malformed(field))?;
        if node.children().is_empty() {
            return Err(malformed(field)(ShapeError::Invalid("empty relative distinguished name")));
        }

        node.children()
            .iter()
            .map(|attribute| AttributeTypeAndValue::from_node(attribute, field))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl AttributeTypeAndValue {
    fn from_node(node: &AsnNode<'_>, field: &'static str) -> Result<Self, CertificateError> {
        let mut fields = Fields::of(node, Tag::SEQUENCE).map_err(malformed(field))?;

        let ty = fields.next(Tag::OID).map_err(malformed(field))?.to_oid()?;
        let value_node = match fields.next_any() {
            Some(value_node) => value_node,
            None => return Err(malformed(field)(ShapeError::Missing { expected: Tag::UTF8_STRING })),
        };
        fields.finish().map_err(malformed(field))?;

        let value = if value_node.tag().is_string() {
            AttributeValue::Text {
                tag: value_node.tag(),
                value: value_node.to_string_value()?.into_owned(),
            }
        } else {
            AttributeValue::Other(value_node.encoded().to_vec())
        };

        Ok(Self { ty, value })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&NamePrettyFormatter(self), f)
    }
}

/// RFC 4514 style rendering, RDNs in encoding order.
pub struct NamePrettyFormatter<'a>(pub &'a Name);

impl fmt::Display for NamePrettyFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rdn) in self.0 .0.iter().enumerate() {
            if i != 0 {
                write!(f, ",")?;
            }

            for (j, attribute) in rdn.0.iter().enumerate() {
                if j != 0 {
                    write!(f, "+")?;
                }
                write!(f, "{}", attribute)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for AttributeTypeAndValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match oids::attribute_label(self.ty.arcs()) {
            Some(label) => write!(f, "{}=", label)?,
            None => write!(f, "{}=", self.ty)?,
        }

        match &self.value {
            AttributeValue::Text { value, .. } => write_escaped(f, value),
            AttributeValue::Other(der) => {
                write!(f, "#")?;
                for byte in der {
                    write!(f, "{:02X}", byte)?;
                }
                Ok(())
            }
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    let last = value.chars().count().saturating_sub(1);
    for (i, c) in value.chars().enumerate() {
        let escape = match c {
            ',' | '+' | '"' | '\\' | '<' | '>' | ';' => true,
            '#' | ' ' if i == 0 => true,
            ' ' if i == last => true,
            _ => false,
        };

        if c == '\0' {
            write!(f, "\\00")?;
        } else if escape {
            write!(f, "\\{}", c)?;
        } else {
            write!(f, "{}", c)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(ty: &[u64], value: &str) -> AttributeTypeAndValue {
        AttributeTypeAndValue {
            ty: ObjectIdentifier::from_arcs(ty).unwrap(),
            value: AttributeValue::Text {
                tag: Tag::UTF8_STRING,
                value: value.to_owned(),
            },
        }
    }

    #[test]
    fn multi_valued_rdn_keeps_source_order() {
        // SEQUENCE { SET { C=NL }, SET { OU=Decoding, CN=ec } }
        let der = hex::decode(
            "3030310b3009060355040613024e4c3121300f060355040b0c084465636f64696e67300e06035504030c0765632e74657374",
        )
        .unwrap();

        let name = Name::from_der(&der).unwrap();
        assert_eq!(name.0.len(), 2);
        assert_eq!(name.0[1].0.len(), 2);
        assert_eq!(name.to_string(), "C=NL,OU=Decoding+CN=ec.test");
        assert_eq!(name.find_common_name(), Some("ec.test"));
    }

    #[test]
    fn unknown_attribute_type_renders_dotted() {
        let name = Name(vec![RelativeDistinguishedName(vec![text(&[1, 2, 86, 11, 1], "x")])]);
        assert_eq!(name.to_string(), "1.2.86.11.1=x");
    }

    #[test]
    fn non_string_value_renders_as_hex() {
        let name = Name(vec![RelativeDistinguishedName(vec![AttributeTypeAndValue {
            ty: ObjectIdentifier::from_arcs(oids::AT_COMMON_NAME).unwrap(),
            value: AttributeValue::Other(vec![0x02, 0x01, 0x05]),
        }])]);
        assert_eq!(name.to_string(), "CN=#020105");
        assert_eq!(name.find_common_name(), None);
    }

    #[rstest]
    #[case("Sales, Inc.", r"CN=Sales\, Inc.")]
    #[case("a+b", r"CN=a\+b")]
    #[case("#1", r"CN=\#1")]
    #[case(" padded ", r"CN=\ padded\ ")]
    #[case("x#y z", "CN=x#y z")]
    #[case(r#"say "hi"; <ok>"#, r#"CN=say \"hi\"\; \<ok\>"#)]
    fn escaping(#[case] value: &str, #[case] expected: &str) {
        let name = Name(vec![RelativeDistinguishedName(vec![text(oids::AT_COMMON_NAME, value)])]);
        assert_eq!(name.to_string(), expected);
    }

    #[test]
    fn empty_name() {
        let name = Name::from_der(&[0x30, 0x00]).unwrap();
        assert!(name.is_empty());
        assert_eq!(name.to_string(), "");
    }

    #[test]
    fn empty_rdn_set_is_malformed() {
        let err = Name::from_der(&[0x30, 0x02, 0x31, 0x00]).unwrap_err();
        assert_eq!(
            err,
            CertificateError::MalformedCertificate {
                field: "name",
                reason: ShapeError::Invalid("empty relative distinguished name"),
            }
        );
    }

    #[test]
    fn rdn_must_be_a_set() {
        // SEQUENCE { SEQUENCE { OID 2.5.4.3, UTF8String "a" } }
        let der = [0x30, 0x0A, 0x30, 0x08, 0x06, 0x03, 0x55, 0x04, 0x03, 0x0C, 0x01, 0x61];
        let err = Name::from_der(&der).unwrap_err();
        assert_eq!(
            err,
            CertificateError::MalformedCertificate {
                field: "name",
                reason: ShapeError::WrongTag {
                    expected: Tag::SET,
                    found: Tag::SEQUENCE,
                    offset: 2,
                },
            }
        );
    }

    #[test]
    fn invalid_string_content_is_a_primitive_error() {
        // SEQUENCE { SET { SEQUENCE { OID 2.5.4.6, PrintableString 0xE9 } } }
        let der = [
            0x30, 0x0C, 0x31, 0x0A, 0x30, 0x08, 0x06, 0x03, 0x55, 0x04, 0x06, 0x13, 0x01, 0xE9,
        ];
        assert!(matches!(
            Name::from_der(&der),
            Err(CertificateError::Asn1(certlens_asn1::Asn1Error::InvalidString { offset: 11, .. }))
        ));
    }
}
