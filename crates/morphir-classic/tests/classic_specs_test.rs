use morphir_classic::codec::{
    FormatVersion, Options, SerdeAttrs, UnitAttrs, decode_type_definition,
    decode_type_specification, decode_value_specification, encode_type_definition,
    encode_type_specification, encode_value_specification,
};
use morphir_classic::ir::{
    AccessControlled, Constructor, DerivedTypeDetails, Type, TypeDefinition, TypeSpecification,
    ValueSpecification,
};
use morphir_classic::naming::{FQName, Name};
use morphir_classic::Error;
use rstest::rstest;

fn fq(text: &str) -> FQName {
    text.parse().expect("valid FQName")
}

fn var(name: &str) -> Type<()> {
    Type::Variable((), Name::from_str(name))
}

fn params() -> Vec<Name> {
    vec![Name::from_str("a")]
}

fn maybe_constructors() -> Vec<Constructor<()>> {
    vec![
        Constructor::new(Name::from_str("Nothing"), vec![]),
        Constructor::new(Name::from_str("Just"), vec![(Name::from_str("value"), var("a"))]),
    ]
}

fn every_specification() -> Vec<TypeSpecification<()>> {
    vec![
        TypeSpecification::TypeAlias(params(), Type::Tuple((), vec![var("a"), var("a")])),
        TypeSpecification::Opaque(params()),
        TypeSpecification::Custom(params(), maybe_constructors()),
        TypeSpecification::Derived(
            vec![],
            DerivedTypeDetails {
                base_type: Type::Reference((), fq("Morphir.SDK:String:string"), vec![]),
                from_base_type: fq("My.Pkg:Email:fromString"),
                to_base_type: fq("My.Pkg:Email:toString"),
            },
        ),
    ]
}

#[rstest]
#[case(FormatVersion::V1)]
#[case(FormatVersion::V2)]
#[case(FormatVersion::V3)]
fn test_type_specifications_round_trip(#[case] version: FormatVersion) {
    let options = Options::new(version);
    for spec in every_specification() {
        let bytes = encode_type_specification(&options, &UnitAttrs, &spec).expect("encode");
        let back = decode_type_specification(&options, &UnitAttrs, &bytes).expect("decode");
        assert_eq!(back, spec);
    }
}

#[rstest]
#[case(
    FormatVersion::V1,
    r#"["type_alias_specification",[["a"]],["variable",[],["a"]]]"#
)]
#[case(
    FormatVersion::V3,
    r#"["TypeAliasSpecification",[["a"]],["Variable",[],["a"]]]"#
)]
fn test_type_alias_specification_shape(#[case] version: FormatVersion, #[case] expected: &str) {
    let spec = TypeSpecification::TypeAlias(params(), var("a"));
    let bytes = encode_type_specification(&Options::new(version), &UnitAttrs, &spec).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), expected);
}

#[test]
fn test_derived_specification_fields() {
    let spec = &every_specification()[3];
    let bytes = encode_type_specification(&Options::v3(), &UnitAttrs, spec).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with(r#"["DerivedTypeSpecification",[],{"baseType":"#), "{text}");
    assert!(text.contains(r#""fromBaseType":[[["my"],["pkg"]],[["email"]],["from","string"]]"#));
}

#[rstest]
#[case(FormatVersion::V1)]
#[case(FormatVersion::V2)]
#[case(FormatVersion::V3)]
fn test_type_definitions_round_trip(#[case] version: FormatVersion) {
    let options = Options::new(version);
    let definitions = [
        TypeDefinition::TypeAlias(params(), var("a")),
        TypeDefinition::Custom(params(), AccessControlled::public(maybe_constructors())),
        TypeDefinition::Custom(params(), AccessControlled::private(maybe_constructors())),
    ];
    for def in definitions {
        let bytes = encode_type_definition(&options, &UnitAttrs, &def).expect("encode");
        let back = decode_type_definition(&options, &UnitAttrs, &bytes).expect("decode");
        assert_eq!(back, def);
    }
}

#[test]
fn test_private_constructors_specify_an_opaque_type() {
    let def = TypeDefinition::Custom(params(), AccessControlled::private(maybe_constructors()));
    let spec = def.to_specification();
    assert_eq!(spec, TypeSpecification::Opaque(params()));
    let bytes = encode_type_specification(&Options::v2(), &UnitAttrs, &spec).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), r#"["OpaqueTypeSpecification",[["a"]]]"#);
}

#[test]
fn test_definition_tag_is_not_a_specification() {
    let def = TypeDefinition::TypeAlias(params(), var("a"));
    let bytes = encode_type_definition(&Options::v3(), &UnitAttrs, &def).unwrap();
    let err = decode_type_specification::<(), _>(&Options::v3(), &UnitAttrs, &bytes).unwrap_err();
    assert!(matches!(err, Error::UnknownTag { tree: "TypeSpecification", .. }));
}

#[rstest]
#[case(FormatVersion::V1)]
#[case(FormatVersion::V3)]
fn test_value_specification_round_trip(#[case] version: FormatVersion) {
    let options = Options::new(version);
    let spec: ValueSpecification<u32> = ValueSpecification::new(
        vec![
            (Name::from_str("amount"), Type::Variable(1, Name::from_str("a"))),
            (Name::from_str("rate"), Type::Unit(2)),
        ],
        Type::function(3, Type::Unit(4), Type::Variable(5, Name::from_str("a"))),
    );
    let bytes = encode_value_specification(&options, &SerdeAttrs, &spec).unwrap();
    let back = decode_value_specification(&options, &SerdeAttrs, &bytes).unwrap();
    assert_eq!(back, spec);
}
