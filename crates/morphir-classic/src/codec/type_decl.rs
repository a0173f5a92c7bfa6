//! Type specifications and type definitions: `[tag, typeParams, ...]`.
//!
//! These nodes carry no attributes of their own; the attribute coder applies to
//! the types inside them.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use tracing::trace;

use super::access::{read_access_controlled, write_access_controlled};
use super::attributes::{AttrDecoder, AttrEncoder};
use super::naming::{read_fqname, read_names, write_fqname, write_names};
use super::options::{FormatVersion, Options};
use super::raw::{into_bytes, parse_node, parse_object, parse_root, to_raw, write_node};
use super::tags::versioned_tags;
use super::types::{read_constructors, read_type, write_constructors, write_type};
use crate::error::{Result, ResultExt};
use crate::ir::{DerivedTypeDetails, TypeDefinition, TypeSpecification};

versioned_tags! {
    enum TypeSpecKind in "TypeSpecification" {
        TypeAlias => ("type_alias_specification", "TypeAliasSpecification", 3),
        Opaque => ("opaque_type_specification", "OpaqueTypeSpecification", 2),
        Custom => ("custom_type_specification", "CustomTypeSpecification", 3),
        // Version 1 files were written with both spellings.
        Derived => (
            "DerivedTypeSpecification" | "derived_type_specification",
            "DerivedTypeSpecification",
            3
        ),
    }
}

versioned_tags! {
    enum TypeDefKind in "TypeDefinition" {
        TypeAlias => ("type_alias_definition", "TypeAliasDefinition", 3),
        Custom => ("custom_type_definition", "CustomTypeDefinition", 3),
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DerivedObject<'a> {
    #[serde(borrow)]
    base_type: &'a RawValue,
    #[serde(borrow)]
    from_base_type: &'a RawValue,
    #[serde(borrow)]
    to_base_type: &'a RawValue,
}

pub(crate) fn write_type_specification<A, E>(
    version: FormatVersion,
    encode: &E,
    spec: &TypeSpecification<A>,
) -> Result<Box<RawValue>>
where
    E: AttrEncoder<A> + ?Sized,
{
    let params = write_names(spec.type_params())?;
    match spec {
        TypeSpecification::TypeAlias(_, tpe) => write_node(
            TypeSpecKind::TypeAlias,
            version,
            vec![
                params,
                write_type(version, encode, tpe).context("encode TypeAliasSpecification type")?,
            ],
        ),
        TypeSpecification::Opaque(_) => write_node(TypeSpecKind::Opaque, version, vec![params]),
        TypeSpecification::Custom(_, ctors) => write_node(
            TypeSpecKind::Custom,
            version,
            vec![
                params,
                write_constructors(version, encode, ctors)
                    .context("encode CustomTypeSpecification constructors")?,
            ],
        ),
        TypeSpecification::Derived(_, details) => {
            let base_type = write_type(version, encode, &details.base_type)
                .context("encode DerivedTypeSpecification baseType")?;
            let from_base_type = write_fqname(&details.from_base_type)?;
            let to_base_type = write_fqname(&details.to_base_type)?;
            let details = to_raw(&DerivedObject {
                base_type: &base_type,
                from_base_type: &from_base_type,
                to_base_type: &to_base_type,
            })?;
            write_node(TypeSpecKind::Derived, version, vec![params, details])
        }
    }
}

pub(crate) fn read_type_specification<A, D>(
    version: FormatVersion,
    decode: &D,
    raw: &RawValue,
) -> Result<TypeSpecification<A>>
where
    D: AttrDecoder<A> + ?Sized,
{
    let (kind, items) = parse_node::<TypeSpecKind>(raw, version)?;
    let params = read_names(items[1]).context("decode type parameters")?;
    let spec = match kind {
        TypeSpecKind::TypeAlias => TypeSpecification::TypeAlias(
            params,
            read_type(version, decode, items[2]).context("decode TypeAliasSpecification type")?,
        ),
        TypeSpecKind::Opaque => TypeSpecification::Opaque(params),
        TypeSpecKind::Custom => TypeSpecification::Custom(
            params,
            read_constructors(version, decode, items[2])
                .context("decode CustomTypeSpecification constructors")?,
        ),
        TypeSpecKind::Derived => {
            let object: DerivedObject = parse_object(items[2], "derived type details")?;
            TypeSpecification::Derived(
                params,
                DerivedTypeDetails {
                    base_type: read_type(version, decode, object.base_type)
                        .context("decode DerivedTypeSpecification baseType")?,
                    from_base_type: read_fqname(object.from_base_type)
                        .context("decode DerivedTypeSpecification fromBaseType")?,
                    to_base_type: read_fqname(object.to_base_type)
                        .context("decode DerivedTypeSpecification toBaseType")?,
                },
            )
        }
    };
    Ok(spec)
}

pub(crate) fn write_type_definition<A, E>(
    version: FormatVersion,
    encode: &E,
    def: &TypeDefinition<A>,
) -> Result<Box<RawValue>>
where
    E: AttrEncoder<A> + ?Sized,
{
    match def {
        TypeDefinition::TypeAlias(params, tpe) => write_node(
            TypeDefKind::TypeAlias,
            version,
            vec![
                write_names(params)?,
                write_type(version, encode, tpe).context("encode TypeAliasDefinition type")?,
            ],
        ),
        TypeDefinition::Custom(params, ctors) => write_node(
            TypeDefKind::Custom,
            version,
            vec![
                write_names(params)?,
                write_access_controlled(version, ctors, |ctors| {
                    write_constructors(version, encode, ctors)
                })
                .context("encode CustomTypeDefinition constructors")?,
            ],
        ),
    }
}

pub(crate) fn read_type_definition<A, D>(
    version: FormatVersion,
    decode: &D,
    raw: &RawValue,
) -> Result<TypeDefinition<A>>
where
    D: AttrDecoder<A> + ?Sized,
{
    let (kind, items) = parse_node::<TypeDefKind>(raw, version)?;
    let params = read_names(items[1]).context("decode type parameters")?;
    let def = match kind {
        TypeDefKind::TypeAlias => TypeDefinition::TypeAlias(
            params,
            read_type(version, decode, items[2]).context("decode TypeAliasDefinition type")?,
        ),
        TypeDefKind::Custom => TypeDefinition::Custom(
            params,
            read_access_controlled(version, items[2], |raw| {
                read_constructors(version, decode, raw)
            })
            .context("decode CustomTypeDefinition constructors")?,
        ),
    };
    Ok(def)
}

pub fn encode_type_specification<A, E>(
    options: &Options,
    encode_attrs: &E,
    spec: &TypeSpecification<A>,
) -> Result<Vec<u8>>
where
    E: AttrEncoder<A> + ?Sized,
{
    trace!(version = %options.format_version, "encode TypeSpecification");
    Ok(into_bytes(write_type_specification(
        options.format_version,
        encode_attrs,
        spec,
    )?))
}

pub fn decode_type_specification<A, D>(
    options: &Options,
    decode_attrs: &D,
    data: &[u8],
) -> Result<TypeSpecification<A>>
where
    D: AttrDecoder<A> + ?Sized,
{
    trace!(version = %options.format_version, len = data.len(), "decode TypeSpecification");
    read_type_specification(
        options.format_version,
        decode_attrs,
        parse_root(options, data, "TypeSpecification")?,
    )
}

pub fn encode_type_definition<A, E>(
    options: &Options,
    encode_attrs: &E,
    def: &TypeDefinition<A>,
) -> Result<Vec<u8>>
where
    E: AttrEncoder<A> + ?Sized,
{
    trace!(version = %options.format_version, "encode TypeDefinition");
    Ok(into_bytes(write_type_definition(
        options.format_version,
        encode_attrs,
        def,
    )?))
}

pub fn decode_type_definition<A, D>(
    options: &Options,
    decode_attrs: &D,
    data: &[u8],
) -> Result<TypeDefinition<A>>
where
    D: AttrDecoder<A> + ?Sized,
{
    trace!(version = %options.format_version, len = data.len(), "decode TypeDefinition");
    read_type_definition(
        options.format_version,
        decode_attrs,
        parse_root(options, data, "TypeDefinition")?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::UnitAttrs;
    use crate::error::Error;
    use crate::ir::{AccessControlled, Constructor, Type};
    use crate::naming::{FQName, Name};

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_opaque_specification_has_no_body() {
        let spec: TypeSpecification<()> = TypeSpecification::Opaque(vec![Name::from_str("a")]);
        let v1 = encode_type_specification(&Options::v1(), &UnitAttrs, &spec).unwrap();
        assert_eq!(text(v1), r#"["opaque_type_specification",[["a"]]]"#);
        let v3 = encode_type_specification(&Options::v3(), &UnitAttrs, &spec).unwrap();
        assert_eq!(text(v3), r#"["OpaqueTypeSpecification",[["a"]]]"#);
    }

    #[test]
    fn test_derived_specification_accepts_both_v1_spellings() -> anyhow::Result<()> {
        let spec: TypeSpecification<()> = TypeSpecification::Derived(
            vec![],
            DerivedTypeDetails {
                base_type: Type::Unit(()),
                from_base_type: "My.Pkg:Codec:fromUnit".parse()?,
                to_base_type: "My.Pkg:Codec:toUnit".parse()?,
            },
        );
        let encoded = text(encode_type_specification(&Options::v1(), &UnitAttrs, &spec)?);
        assert!(encoded.starts_with(r#"["DerivedTypeSpecification",[],{"baseType":["unit",[]]"#));

        let snake = encoded.replacen("DerivedTypeSpecification", "derived_type_specification", 1);
        for payload in [&encoded, &snake] {
            let back = decode_type_specification(&Options::v1(), &UnitAttrs, payload.as_bytes())?;
            assert_eq!(back, spec);
        }
        let v3 = decode_type_specification::<(), _>(&Options::v3(), &UnitAttrs, snake.as_bytes());
        assert!(v3.is_err());
        Ok(())
    }

    #[test]
    fn test_custom_definition_wraps_constructors_in_access() -> anyhow::Result<()> {
        let def: TypeDefinition<()> = TypeDefinition::Custom(
            vec![],
            AccessControlled::private(vec![Constructor::new(
                Name::from_str("just"),
                vec![(Name::from_str("value"), Type::Unit(()))],
            )]),
        );
        let v1 = text(encode_type_definition(&Options::v1(), &UnitAttrs, &def)?);
        assert_eq!(
            v1,
            r#"["custom_type_definition",[],["private",[[["just"],[[["value"],["unit",[]]]]]]]]"#
        );
        let v2 = text(encode_type_definition(&Options::v2(), &UnitAttrs, &def)?);
        assert_eq!(
            v2,
            r#"["CustomTypeDefinition",[],{"access":"Private","value":[[["just"],[[["value"],["Unit",[]]]]]]}]"#
        );
        assert_eq!(decode_type_definition(&Options::v1(), &UnitAttrs, v1.as_bytes())?, def);
        assert_eq!(decode_type_definition(&Options::v2(), &UnitAttrs, v2.as_bytes())?, def);
        Ok(())
    }

    #[test]
    fn test_alias_definition_requires_body() {
        let err = decode_type_definition::<(), _>(
            &Options::v3(),
            &UnitAttrs,
            br#"["TypeAliasDefinition",[]]"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Arity { expected: 3, actual: 2, .. }));
    }

    #[test]
    fn test_reference_in_alias_keeps_fqname() -> anyhow::Result<()> {
        let fq: FQName = "Morphir.SDK:Basics:int".parse()?;
        let def: TypeDefinition<()> =
            TypeDefinition::TypeAlias(vec![], Type::Reference((), fq, vec![]));
        let bytes = encode_type_definition(&Options::v3(), &UnitAttrs, &def)?;
        assert_eq!(decode_type_definition(&Options::v3(), &UnitAttrs, &bytes)?, def);
        Ok(())
    }
}
