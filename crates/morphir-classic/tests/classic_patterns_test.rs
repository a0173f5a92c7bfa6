use morphir_classic::codec::{FormatVersion, Options, SerdeAttrs, decode_pattern, encode_pattern};
use morphir_classic::ir::{Literal, Pattern};
use morphir_classic::naming::{FQName, Name};
use morphir_classic::traversal::equal_pattern;
use morphir_classic::Error;
use rstest::rstest;

fn same(a: &String, b: &String) -> bool {
    a == b
}

fn attrs(label: &str) -> String {
    label.to_string()
}

/// `Currency ((_, ()), 123 :: []) "valueInUSD" as usd`
fn usd_pattern() -> Pattern<String> {
    let fq: FQName = "Morphir.Reference.Model:Currency:currency"
        .parse()
        .expect("valid FQName");
    Pattern::as_pattern(
        attrs("as"),
        Pattern::Constructor(
            attrs("ctor"),
            fq,
            vec![
                Pattern::Tuple(
                    attrs("tuple"),
                    vec![Pattern::Wildcard(attrs("wild")), Pattern::Unit(attrs("unit"))],
                ),
                Pattern::head_tail(
                    attrs("cons"),
                    Pattern::Literal(attrs("head"), Literal::WholeNumber(123)),
                    Pattern::EmptyList(attrs("nil")),
                ),
                Pattern::Literal(attrs("label"), Literal::String("valueInUSD".to_string())),
            ],
        ),
        Name::from_str("usd"),
    )
}

#[test]
fn test_as_pattern_end_to_end() {
    let options = Options::v3();
    let pattern = usd_pattern();
    let bytes = encode_pattern(&options, &SerdeAttrs, &pattern).expect("encode");
    let back: Pattern<String> = decode_pattern(&options, &SerdeAttrs, &bytes).expect("decode");
    assert!(equal_pattern(&pattern, &back, &same));
    assert_eq!(back, pattern);
}

#[rstest]
#[case(FormatVersion::V1)]
#[case(FormatVersion::V2)]
#[case(FormatVersion::V3)]
fn test_round_trip_every_version(#[case] version: FormatVersion) {
    let options = Options::new(version);
    let bytes = encode_pattern(&options, &SerdeAttrs, &usd_pattern()).unwrap();
    let back: Pattern<String> = decode_pattern(&options, &SerdeAttrs, &bytes).unwrap();
    assert!(equal_pattern(&usd_pattern(), &back, &same));
}

#[rstest]
#[case(FormatVersion::V1, r#"["wildcard_pattern","w"]"#)]
#[case(FormatVersion::V2, r#"["WildcardPattern","w"]"#)]
#[case(FormatVersion::V3, r#"["WildcardPattern","w"]"#)]
fn test_wildcard_tag_per_version(#[case] version: FormatVersion, #[case] expected: &str) {
    let bytes = encode_pattern(&Options::new(version), &SerdeAttrs, &Pattern::Wildcard(attrs("w")))
        .unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), expected);
}

#[test]
fn test_v1_constructor_pattern_shape() {
    let fq: FQName = "P:M:just".parse().unwrap();
    let pattern = Pattern::Constructor(attrs("c"), fq, vec![Pattern::Unit(attrs("u"))]);
    let bytes = encode_pattern(&Options::v1(), &SerdeAttrs, &pattern).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"["constructor_pattern","c",[[["p"]],[["m"]],["just"]],[["unit_pattern","u"]]]"#
    );
}

#[test]
fn test_tuple_pattern_equality_is_order_sensitive() {
    let ordered = Pattern::Tuple(
        attrs("t"),
        vec![Pattern::Wildcard(attrs("w")), Pattern::Unit(attrs("u"))],
    );
    let swapped = Pattern::Tuple(
        attrs("t"),
        vec![Pattern::Unit(attrs("u")), Pattern::Wildcard(attrs("w"))],
    );
    assert!(equal_pattern(&ordered, &ordered.clone(), &same));
    assert!(!equal_pattern(&ordered, &swapped, &same));
}

#[test]
fn test_v3_payload_is_rejected_under_v1() {
    let bytes = encode_pattern(&Options::v3(), &SerdeAttrs, &usd_pattern()).unwrap();
    let err = decode_pattern::<String, _>(&Options::v1(), &SerdeAttrs, &bytes).unwrap_err();
    assert!(matches!(err, Error::UnknownTag { tree: "Pattern", .. }));
}

#[test]
fn test_as_pattern_requires_four_elements() {
    let payload = br#"["AsPattern","a",["WildcardPattern","w"]]"#;
    let err = decode_pattern::<String, _>(&Options::v3(), &SerdeAttrs, payload).unwrap_err();
    assert!(matches!(err, Error::Arity { kind: "AsPattern", expected: 4, actual: 3 }));
}
