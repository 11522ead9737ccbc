use std::fmt;

/// The two high bits of an identifier octet.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl TagClass {
    #[inline]
    pub const fn from_identifier_octet(octet: u8) -> Self {
        match octet >> 6 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }
}

/// An ASN.1 identifier: class, primitive/constructed form and tag number.
///
/// Tag numbers above 30 use the multi-octet form on the wire; the reader
/// bounds them to 28 bits so they always fit in a `u32`.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Tag {
    class: TagClass,
    constructed: bool,
    number: u32,
}

impl Tag {
    pub const BOOLEAN: Self = Tag::universal(0x01);
    pub const INTEGER: Self = Tag::universal(0x02);
    pub const BIT_STRING: Self = Tag::universal(0x03);
    pub const OCTET_STRING: Self = Tag::universal(0x04);
    pub const NULL: Self = Tag::universal(0x05);
    pub const OID: Self = Tag::universal(0x06);
    pub const UTF8_STRING: Self = Tag::universal(0x0C);
    pub const NUMERIC_STRING: Self = Tag::universal(0x12);
    pub const PRINTABLE_STRING: Self = Tag::universal(0x13);
    pub const TELETEX_STRING: Self = Tag::universal(0x14);
    pub const IA5_STRING: Self = Tag::universal(0x16);
    pub const UTC_TIME: Self = Tag::universal(0x17);
    pub const GENERALIZED_TIME: Self = Tag::universal(0x18);
    pub const VISIBLE_STRING: Self = Tag::universal(0x1A);
    pub const UNIVERSAL_STRING: Self = Tag::universal(0x1C);
    pub const BMP_STRING: Self = Tag::universal(0x1E);
    pub const SEQUENCE: Self = Tag::universal(0x10).into_constructed();
    pub const SET: Self = Tag::universal(0x11).into_constructed();

    #[inline]
    pub const fn new(class: TagClass, constructed: bool, number: u32) -> Self {
        Self {
            class,
            constructed,
            number,
        }
    }

    /// Primitive universal tag.
    #[inline]
    pub const fn universal(number: u32) -> Self {
        Self::new(TagClass::Universal, false, number)
    }

    /// Primitive context-specific tag, as used by IMPLICIT tagging of scalars.
    #[inline]
    pub const fn context_specific(number: u32) -> Self {
        Self::new(TagClass::ContextSpecific, false, number)
    }

    /// Constructed context-specific tag, as used by EXPLICIT tagging.
    #[inline]
    pub const fn explicit(number: u32) -> Self {
        Self::new(TagClass::ContextSpecific, true, number)
    }

    #[inline]
    pub const fn application(number: u32) -> Self {
        Self::new(TagClass::Application, false, number)
    }

    #[inline]
    pub const fn into_constructed(self) -> Self {
        Self::new(self.class, true, self.number)
    }

    #[inline]
    pub const fn class(self) -> TagClass {
        self.class
    }

    #[inline]
    pub const fn number(self) -> u32 {
        self.number
    }

    #[inline]
    pub const fn is_constructed(self) -> bool {
        self.constructed
    }

    #[inline]
    pub fn is_universal(self) -> bool {
        self.class == TagClass::Universal
    }

    #[inline]
    pub fn is_application(self) -> bool {
        self.class == TagClass::Application
    }

    #[inline]
    pub fn is_context_specific(self) -> bool {
        self.class == TagClass::ContextSpecific
    }

    #[inline]
    pub fn is_private(self) -> bool {
        self.class == TagClass::Private
    }

    /// Whether the tag denotes one of the character string types that can
    /// appear as a directory string value.
    pub fn is_string(self) -> bool {
        matches!(
            self,
            Tag::UTF8_STRING
                | Tag::NUMERIC_STRING
                | Tag::PRINTABLE_STRING
                | Tag::TELETEX_STRING
                | Tag::IA5_STRING
                | Tag::VISIBLE_STRING
                | Tag::UNIVERSAL_STRING
                | Tag::BMP_STRING
        )
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Tag::BOOLEAN => write!(f, "BOOLEAN"),
            Tag::INTEGER => write!(f, "INTEGER"),
            Tag::BIT_STRING => write!(f, "BIT STRING"),
            Tag::OCTET_STRING => write!(f, "OCTET STRING"),
            Tag::NULL => write!(f, "NULL"),
            Tag::OID => write!(f, "OBJECT IDENTIFIER"),
            Tag::UTF8_STRING => write!(f, "UTF8String"),
            Tag::NUMERIC_STRING => write!(f, "NumericString"),
            Tag::PRINTABLE_STRING => write!(f, "PrintableString"),
            Tag::TELETEX_STRING => write!(f, "TeletexString"),
            Tag::IA5_STRING => write!(f, "IA5String"),
            Tag::UTC_TIME => write!(f, "UTCTime"),
            Tag::GENERALIZED_TIME => write!(f, "GeneralizedTime"),
            Tag::VISIBLE_STRING => write!(f, "VisibleString"),
            Tag::UNIVERSAL_STRING => write!(f, "UniversalString"),
            Tag::BMP_STRING => write!(f, "BMPString"),
            Tag::SEQUENCE => write!(f, "SEQUENCE"),
            Tag::SET => write!(f, "SET"),
            other => {
                let form = if other.constructed { "" } else { " IMPLICIT" };
                match other.class {
                    TagClass::Universal => {
                        let form = if other.constructed { "constructed" } else { "primitive" };
                        write!(f, "UNIVERSAL {} ({})", other.number, form)
                    }
                    TagClass::Application => write!(f, "[APPLICATION {}]{}", other.number, form),
                    TagClass::ContextSpecific => write!(f, "[{}]{}", other.number, form),
                    TagClass::Private => write!(f, "[PRIVATE {}]{}", other.number, form),
                }
            }
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Tag({}[{:?}, {}, {}])",
            self,
            self.class,
            if self.constructed { "constructed" } else { "primitive" },
            self.number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_octet_classes() {
        assert_eq!(TagClass::from_identifier_octet(0x30), TagClass::Universal);
        assert_eq!(TagClass::from_identifier_octet(0x61), TagClass::Application);
        assert_eq!(TagClass::from_identifier_octet(0xA3), TagClass::ContextSpecific);
        assert_eq!(TagClass::from_identifier_octet(0xC0), TagClass::Private);
    }

    #[test]
    fn display() {
        assert_eq!(Tag::SEQUENCE.to_string(), "SEQUENCE");
        assert_eq!(Tag::BMP_STRING.to_string(), "BMPString");
        assert_eq!(Tag::explicit(3).to_string(), "[3]");
        assert_eq!(Tag::context_specific(1).to_string(), "[1] IMPLICIT");
        assert_eq!(Tag::application(2).into_constructed().to_string(), "[APPLICATION 2]");
        assert_eq!(Tag::universal(0x10).to_string(), "UNIVERSAL 16 (primitive)");
    }

    #[test]
    fn string_tags() {
        assert!(Tag::PRINTABLE_STRING.is_string());
        assert!(Tag::BMP_STRING.is_string());
        assert!(!Tag::OCTET_STRING.is_string());
        assert!(!Tag::UTF8_STRING.into_constructed().is_string());
    }
}
