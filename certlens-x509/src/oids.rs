//! OIDs commonly found in X.509 certificates, and their display names.

macro_rules! define_oid {
    ( $( $uppercase:ident => [$($arc:literal),+], )+ ) => {
        $( pub const $uppercase: &[u64] = &[$($arc),+]; )+
    };
}

macro_rules! define_oid_names {
    ($(#[$meta:meta])* $fn_name:ident { $( $oid:expr => $name:literal, )+ }) => {
        $(#[$meta])*
        pub fn $fn_name(oid: &[u64]) -> Option<&'static str> {
            const NAMES: &[(&[u64], &str)] = &[ $( ($oid, $name), )+ ];
            NAMES.iter().find(|(arcs, _)| *arcs == oid).map(|(_, name)| *name)
        }
    };
}

define_oid! {
    // ANSI-X962
    EC_PUBLIC_KEY => [1, 2, 840, 10045, 2, 1],
    ECDSA_WITH_SHA1 => [1, 2, 840, 10045, 4, 1],
    ECDSA_WITH_SHA224 => [1, 2, 840, 10045, 4, 3, 1],
    ECDSA_WITH_SHA256 => [1, 2, 840, 10045, 4, 3, 2],
    ECDSA_WITH_SHA384 => [1, 2, 840, 10045, 4, 3, 3],
    ECDSA_WITH_SHA512 => [1, 2, 840, 10045, 4, 3, 4],
    SECP192R1 => [1, 2, 840, 10045, 3, 1, 1],
    SECP256R1 => [1, 2, 840, 10045, 3, 1, 7],

    // ANSI-X957
    DSA => [1, 2, 840, 10040, 4, 1],
    DSA_WITH_SHA1 => [1, 2, 840, 10040, 4, 3],

    // RSADSI
    RSA_ENCRYPTION => [1, 2, 840, 113549, 1, 1, 1],
    MD5_WITH_RSA_ENCRYPTION => [1, 2, 840, 113549, 1, 1, 4],
    SHA1_WITH_RSA_ENCRYPTION => [1, 2, 840, 113549, 1, 1, 5],
    RSASSA_PSS => [1, 2, 840, 113549, 1, 1, 10],
    SHA256_WITH_RSA_ENCRYPTION => [1, 2, 840, 113549, 1, 1, 11],
    SHA384_WITH_RSA_ENCRYPTION => [1, 2, 840, 113549, 1, 1, 12],
    SHA512_WITH_RSA_ENCRYPTION => [1, 2, 840, 113549, 1, 1, 13],
    SHA224_WITH_RSA_ENCRYPTION => [1, 2, 840, 113549, 1, 1, 14],
    EMAIL_ADDRESS => [1, 2, 840, 113549, 1, 9, 1], // deprecated

    // Certicom Object Identifiers
    SECP224R1 => [1, 3, 132, 0, 33],
    SECP384R1 => [1, 3, 132, 0, 34],
    SECP521R1 => [1, 3, 132, 0, 35],

    // RFC 8410
    X25519 => [1, 3, 101, 110],
    X448 => [1, 3, 101, 111],
    ED25519 => [1, 3, 101, 112],
    ED448 => [1, 3, 101, 113],

    // attribute types
    AT_COMMON_NAME => [2, 5, 4, 3],
    AT_SURNAME => [2, 5, 4, 4],
    AT_SERIAL_NUMBER => [2, 5, 4, 5],
    AT_COUNTRY_NAME => [2, 5, 4, 6],
    AT_LOCALITY_NAME => [2, 5, 4, 7],
    AT_STATE_OR_PROVINCE_NAME => [2, 5, 4, 8],
    AT_STREET_NAME => [2, 5, 4, 9],
    AT_ORGANIZATION_NAME => [2, 5, 4, 10],
    AT_ORGANIZATIONAL_UNIT_NAME => [2, 5, 4, 11],
    AT_TITLE => [2, 5, 4, 12],
    AT_POSTAL_CODE => [2, 5, 4, 17],
    AT_GIVEN_NAME => [2, 5, 4, 42],
    AT_INITIALS => [2, 5, 4, 43],
    AT_GENERATION_QUALIFIER => [2, 5, 4, 44],
    AT_DN_QUALIFIER => [2, 5, 4, 46],
    AT_PSEUDONYM => [2, 5, 4, 65],
    AT_USER_ID => [0, 9, 2342, 19200300, 100, 1, 1],
    AT_DOMAIN_COMPONENT => [0, 9, 2342, 19200300, 100, 1, 25],

    // certificate extensions
    SUBJECT_KEY_IDENTIFIER => [2, 5, 29, 14],
    KEY_USAGE => [2, 5, 29, 15],
    SUBJECT_ALTERNATIVE_NAME => [2, 5, 29, 17],
    ISSUER_ALTERNATIVE_NAME => [2, 5, 29, 18],
    BASIC_CONSTRAINTS => [2, 5, 29, 19],
    NAME_CONSTRAINTS => [2, 5, 29, 30],
    CRL_DISTRIBUTION_POINTS => [2, 5, 29, 31],
    CERTIFICATE_POLICIES => [2, 5, 29, 32],
    AUTHORITY_KEY_IDENTIFIER => [2, 5, 29, 35],
    EXTENDED_KEY_USAGE => [2, 5, 29, 37],
    AUTHORITY_INFO_ACCESS => [1, 3, 6, 1, 5, 5, 7, 1, 1],
}

define_oid_names! {
    /// Short label of a name attribute (`CN`, `O`, ...), RFC 4514 where it
    /// defines one.
    attribute_label {
        AT_COMMON_NAME => "CN",
        AT_SURNAME => "SURNAME",
        AT_SERIAL_NUMBER => "SERIALNUMBER",
        AT_COUNTRY_NAME => "C",
        AT_LOCALITY_NAME => "L",
        AT_STATE_OR_PROVINCE_NAME => "ST",
        AT_STREET_NAME => "STREET",
        AT_ORGANIZATION_NAME => "O",
        AT_ORGANIZATIONAL_UNIT_NAME => "OU",
        AT_TITLE => "T",
        AT_POSTAL_CODE => "POSTALCODE",
        AT_GIVEN_NAME => "GIVENNAME",
        AT_INITIALS => "INITIALS",
        AT_GENERATION_QUALIFIER => "GENERATION",
        AT_DN_QUALIFIER => "DNQ",
        AT_PSEUDONYM => "PSEUDONYM",
        AT_USER_ID => "UID",
        AT_DOMAIN_COMPONENT => "DC",
        EMAIL_ADDRESS => "EMAILADDRESS",
    }
}

define_oid_names! {
    /// Name of a signature or public key algorithm, in the `SHA256withRSA`
    /// style used by most certificate viewers.
    algorithm_name {
        RSA_ENCRYPTION => "RSA",
        MD5_WITH_RSA_ENCRYPTION => "MD5withRSA",
        SHA1_WITH_RSA_ENCRYPTION => "SHA1withRSA",
        RSASSA_PSS => "RSASSA-PSS",
        SHA224_WITH_RSA_ENCRYPTION => "SHA224withRSA",
        SHA256_WITH_RSA_ENCRYPTION => "SHA256withRSA",
        SHA384_WITH_RSA_ENCRYPTION => "SHA384withRSA",
        SHA512_WITH_RSA_ENCRYPTION => "SHA512withRSA",
        EC_PUBLIC_KEY => "EC",
        ECDSA_WITH_SHA1 => "SHA1withECDSA",
        ECDSA_WITH_SHA224 => "SHA224withECDSA",
        ECDSA_WITH_SHA256 => "SHA256withECDSA",
        ECDSA_WITH_SHA384 => "SHA384withECDSA",
        ECDSA_WITH_SHA512 => "SHA512withECDSA",
        DSA => "DSA",
        DSA_WITH_SHA1 => "SHA1withDSA",
        X25519 => "X25519",
        X448 => "X448",
        ED25519 => "Ed25519",
        ED448 => "Ed448",
    }
}

define_oid_names! {
    curve_name {
        SECP192R1 => "secp192r1",
        SECP224R1 => "secp224r1",
        SECP256R1 => "secp256r1",
        SECP384R1 => "secp384r1",
        SECP521R1 => "secp521r1",
    }
}

define_oid_names! {
    extension_name {
        SUBJECT_KEY_IDENTIFIER => "subjectKeyIdentifier",
        KEY_USAGE => "keyUsage",
        SUBJECT_ALTERNATIVE_NAME => "subjectAltName",
        ISSUER_ALTERNATIVE_NAME => "issuerAltName",
        BASIC_CONSTRAINTS => "basicConstraints",
        NAME_CONSTRAINTS => "nameConstraints",
        CRL_DISTRIBUTION_POINTS => "cRLDistributionPoints",
        CERTIFICATE_POLICIES => "certificatePolicies",
        AUTHORITY_KEY_IDENTIFIER => "authorityKeyIdentifier",
        EXTENDED_KEY_USAGE => "extKeyUsage",
        AUTHORITY_INFO_ACCESS => "authorityInfoAccess",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certlens_asn1::ObjectIdentifier;

    #[test]
    fn lookups() {
        let cn: ObjectIdentifier = "2.5.4.3".parse().unwrap();
        assert_eq!(attribute_label(cn.arcs()), Some("CN"));
        assert_eq!(algorithm_name(SHA256_WITH_RSA_ENCRYPTION), Some("SHA256withRSA"));
        assert_eq!(curve_name(SECP256R1), Some("secp256r1"));
        assert_eq!(extension_name(&[2, 5, 29, 19]), Some("basicConstraints"));
        assert_eq!(extension_name(&[1, 2, 86, 11, 7, 9]), None);
    }
}
