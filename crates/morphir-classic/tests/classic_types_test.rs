use morphir_classic::codec::{
    self, FormatVersion, Options, SerdeAttrs, UnitAttrs, decode_type, encode_type,
};
use morphir_classic::ir::{Constructor, Field, Type};
use morphir_classic::naming::{FQName, Name};
use morphir_classic::traversal::equal_type;
use morphir_classic::Error;
use rstest::rstest;

fn fq(text: &str) -> FQName {
    text.parse().expect("valid FQName")
}

fn var(attrs: u32, name: &str) -> Type<u32> {
    Type::Variable(attrs, Name::from_str(name))
}

/// `List { a : (a, ()), b : { r | c : a -> () } } -> Maybe a`
fn deep_type() -> Type<u32> {
    let record = Type::Record(
        3,
        vec![
            Field::new(
                Name::from_str("a"),
                Type::Tuple(4, vec![var(5, "a"), Type::Unit(6)]),
            ),
            Field::new(
                Name::from_str("b"),
                Type::ExtensibleRecord(
                    7,
                    Name::from_str("r"),
                    vec![Field::new(
                        Name::from_str("c"),
                        Type::function(8, var(9, "a"), Type::Unit(10)),
                    )],
                ),
            ),
        ],
    );
    Type::function(
        1,
        Type::Reference(2, fq("Morphir.SDK:List:list"), vec![record]),
        Type::Reference(11, fq("Morphir.SDK:Maybe:maybe"), vec![var(12, "a")]),
    )
}

#[rstest]
#[case(FormatVersion::V1)]
#[case(FormatVersion::V2)]
#[case(FormatVersion::V3)]
fn test_deep_type_round_trip(#[case] version: FormatVersion) {
    let options = Options::new(version);
    let tpe = deep_type();
    let bytes = encode_type(&options, &SerdeAttrs, &tpe).expect("encode");
    let back: Type<u32> = decode_type(&options, &SerdeAttrs, &bytes).expect("decode");
    assert!(equal_type(&tpe, &back, &|a: &u32, b: &u32| a == b));
}

#[rstest]
#[case(FormatVersion::V1, r#"["record",[],[[["first","name"],["unit",[]]]]]"#)]
#[case(FormatVersion::V2, r#"["Record",[],[{"name":["first","name"],"tpe":["Unit",[]]}]]"#)]
#[case(FormatVersion::V3, r#"["Record",[],[{"name":["first","name"],"tpe":["Unit",[]]}]]"#)]
fn test_record_field_shape(#[case] version: FormatVersion, #[case] expected: &str) {
    let tpe: Type<()> = Type::Record(
        (),
        vec![Field::new(Name::from_str("firstName"), Type::Unit(()))],
    );
    let bytes = encode_type(&Options::new(version), &UnitAttrs, &tpe).expect("encode");
    assert_eq!(String::from_utf8(bytes).unwrap(), expected);
}

#[test]
fn test_reference_wire_shape() {
    let tpe = Type::Reference(0u32, fq("My:Mod:my_type"), vec![var(1, "a")]);
    let bytes = encode_type(&Options::v3(), &SerdeAttrs, &tpe).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"["Reference",0,[[["my"]],[["mod"]],["my","type"]],[["Variable",1,["a"]]]]"#
    );
}

#[test]
fn test_v3_payload_is_rejected_under_v1() {
    let bytes = encode_type(&Options::v3(), &SerdeAttrs, &deep_type()).unwrap();
    let err = decode_type::<u32, _>(&Options::v1(), &SerdeAttrs, &bytes).unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownTag { tree: "Type", version: FormatVersion::V1, .. }
    ));
}

#[test]
fn test_v1_field_tuple_is_rejected_under_v2() {
    let payload = br#"["Record",[],[[["a"],["Unit",[]]]]]"#;
    assert!(decode_type::<(), _>(&Options::v2(), &UnitAttrs, payload).is_err());
}

#[test]
fn test_unit_type_arity() {
    let options = Options::v3();
    decode_type::<(), _>(&options, &UnitAttrs, br#"["Unit",[]]"#).expect("two elements");
    let err = decode_type::<(), _>(&options, &UnitAttrs, br#"["Unit",[],[]]"#).unwrap_err();
    assert_eq!(err.to_string(), "Unit expects 2 elements, got 3");
}

#[test]
fn test_short_node_is_rejected() {
    let err = decode_type::<(), _>(&Options::v3(), &UnitAttrs, br#"["Unit"]"#).unwrap_err();
    assert!(matches!(err, Error::Shape(_)));
    assert!(decode_type::<(), _>(&Options::v3(), &UnitAttrs, b"null").is_err());
    assert!(decode_type::<(), _>(&Options::v3(), &UnitAttrs, br#"{"Unit":[]}"#).is_err());
}

#[test]
fn test_attribute_decoder_failure_is_reported() {
    let decode = |data: &[u8]| -> anyhow::Result<u32> {
        let n: u32 = serde_json::from_slice(data)?;
        anyhow::ensure!(n < 100, "attribute {n} out of range");
        Ok(n)
    };
    let payload = br#"["Function",1,["Unit",2],["Unit",200]]"#;
    let err = decode_type(&Options::v2(), &decode, payload).unwrap_err();
    assert_eq!(
        err.to_string(),
        "decode Function result: decode Type attributes: decode attributes: attribute 200 out of range"
    );
}

#[test]
fn test_empty_attribute_encoding_is_rejected() {
    let encode = |_: &u32| -> anyhow::Result<Vec<u8>> { Ok(Vec::new()) };
    let err = encode_type(&Options::v3(), &encode, &var(1, "a")).unwrap_err();
    assert!(matches!(err.root_cause(), Error::EmptyAttributes));
}

#[rstest]
#[case(FormatVersion::V1)]
#[case(FormatVersion::V3)]
fn test_type_constructors_round_trip(#[case] version: FormatVersion) {
    let ctors = vec![
        Constructor::new(Name::from_str("Nothing"), vec![]),
        Constructor::new(
            Name::from_str("Just"),
            vec![(Name::from_str("value"), var(0, "a"))],
        ),
    ];
    let options = Options::new(version);
    let bytes = codec::encode_type_constructors(&options, &SerdeAttrs, &ctors).unwrap();
    let back: Vec<Constructor<u32>> =
        codec::decode_type_constructors(&options, &SerdeAttrs, &bytes).unwrap();
    assert_eq!(back, ctors);
}
