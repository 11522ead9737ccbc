//! Walks the whole tree of a real certificate and checks the positions the
//! reader reports against hand-verified offsets.

use base64::{engine::general_purpose, Engine as _};
use certlens_asn1::{Asn1Error, AsnNode, BigInt, Tag, TlvReader};
use pretty_assertions::assert_eq;
use time::macros::datetime;

fn contoso_der() -> Vec<u8> {
    let body: String = certlens_test_data::CONTOSO_LEAF_PEM
        .lines()
        .filter(|line| !line.starts_with("-----"))
        .collect();
    general_purpose::STANDARD.decode(body).expect("contoso base64")
}

#[test]
fn top_level_layout() {
    let encoded = contoso_der();
    assert_eq!(encoded.len(), 1054);

    let root = AsnNode::build(&encoded).expect("contoso tree");
    assert_eq!(root.tag(), Tag::SEQUENCE);
    assert_eq!(root.children().len(), 3);

    let [tbs, signature_algorithm, signature] = root.children() else {
        panic!("certificate has three parts");
    };
    assert_eq!(tbs.item().encoded_span(), 4..522);
    assert_eq!(signature_algorithm.item().encoded_span(), 522..537);
    assert_eq!(signature.offset(), 537);

    let signature = signature.to_bit_string().unwrap();
    assert_eq!(signature.unused_bits(), 0);
    assert_eq!(signature.payload(), &encoded[542..1054]);
}

#[test]
fn tbs_fields() {
    let encoded = contoso_der();
    let root = AsnNode::build(&encoded).unwrap();
    let tbs = &root.children()[0];

    let fields = tbs.children();
    assert_eq!(fields.len(), 8);

    assert_eq!(fields[0].tag(), Tag::explicit(0));
    assert_eq!(fields[0].children()[0].to_small_integer().unwrap(), 2);
    assert_eq!(fields[1].to_integer().unwrap(), BigInt::from(0x37C3_57C4));
    assert_eq!(
        fields[2].children()[0].to_oid().unwrap().to_string(),
        "1.2.840.113549.1.1.11"
    );
    assert_eq!(fields[3].item().encoded_span(), 34..70);
    assert_eq!(fields[4].item().encoded_span(), 70..102);
    assert_eq!(fields[5].item().encoded_span(), 102..133);
    assert_eq!(fields[6].item().encoded_span(), 133..427);
    assert_eq!(fields[7].tag(), Tag::explicit(3));
    assert_eq!(fields[7].children()[0].item().encoded_span(), 429..522);

    let validity = fields[4].children();
    assert_eq!(validity[0].to_time().unwrap(), datetime!(2019-10-17 17:41:28 UTC));
    assert_eq!(validity[1].to_time().unwrap(), datetime!(2022-10-16 17:41:28 UTC));

    let issuer_cn = &fields[3].children()[0].children()[0].children()[1];
    assert_eq!(issuer_cn.tag(), Tag::UTF8_STRING);
    assert_eq!(issuer_cn.to_string_value().unwrap(), "contoso.local Authority");
}

#[test]
fn extension_values() {
    let encoded = contoso_der();
    let root = AsnNode::build(&encoded).unwrap();
    let extensions = root.children()[0].children()[7].children()[0].children();
    assert_eq!(extensions.len(), 4);

    // keyUsage is the only one flagged critical
    let key_usage = extensions[1].children();
    assert_eq!(key_usage[0].to_oid().unwrap().to_string(), "2.5.29.15");
    assert!(key_usage[1].to_boolean().unwrap());
    assert_eq!(key_usage[2].to_octet_string().unwrap(), &encoded[454..458]);

    let basic_constraints = extensions[0].children();
    assert_eq!(basic_constraints.len(), 2);
    assert_eq!(basic_constraints[1].to_octet_string().unwrap(), &encoded[440..442]);
}

#[test]
fn flat_reader_over_tbs_content() {
    let encoded = contoso_der();
    let tbs = &encoded[4..522];

    let mut reader = TlvReader::with_base(tbs, 4);
    let header = reader.read_tlv().unwrap().unwrap();
    assert_eq!(header.content_offset(), 8);

    let items = TlvReader::with_base(header.content(), header.content_offset())
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let offsets: Vec<usize> = items.iter().map(|item| item.offset()).collect();
    assert_eq!(offsets, vec![8, 13, 19, 34, 70, 102, 133, 427]);
}

#[test]
fn truncated_certificate() {
    let encoded = contoso_der();
    assert_eq!(
        AsnNode::build(&encoded[..600]),
        Err(Asn1Error::TruncatedInput {
            offset: 4,
            needed: 1050,
            available: 596,
        })
    );
}
