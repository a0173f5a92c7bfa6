//! Module specifications and definitions.
//!
//! Both are objects with `types`, `values` and `doc`. Each member list is
//! `[[name, entry], ...]` in declaration order; `doc` is a string or `null`.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use tracing::trace;

use super::access::{read_access_controlled, write_access_controlled};
use super::attributes::{AttrDecoder, AttrEncoder};
use super::documented::{read_documented, write_documented};
use super::naming::{read_name, write_name};
use super::options::{FormatVersion, Options};
use super::raw::{into_bytes, parse_object, parse_root, read_map, to_raw, write_map};
use super::type_decl::{
    read_type_definition, read_type_specification, write_type_definition,
    write_type_specification,
};
use super::value::{
    read_value_definition, read_value_specification, write_value_definition,
    write_value_specification,
};
use crate::error::{Result, ResultExt};
use crate::ir::{ModuleDefinition, ModuleSpecification};

#[derive(Serialize)]
struct ModuleObjectOut<'a> {
    types: &'a RawValue,
    values: &'a RawValue,
    doc: Option<&'a str>,
}

#[derive(Deserialize)]
struct ModuleObjectIn<'a> {
    #[serde(borrow)]
    types: &'a RawValue,
    #[serde(borrow)]
    values: &'a RawValue,
    #[serde(default)]
    doc: Option<String>,
}

pub(crate) fn write_module_specification<TA, E>(
    version: FormatVersion,
    encode: &E,
    spec: &ModuleSpecification<TA>,
) -> Result<Box<RawValue>>
where
    E: AttrEncoder<TA> + ?Sized,
{
    let types = write_map(&spec.types, "type", write_name, |documented| {
        write_documented(documented, |spec| write_type_specification(version, encode, spec))
    })
    .context("encode ModuleSpecification types")?;
    let values = write_map(&spec.values, "value", write_name, |documented| {
        write_documented(documented, |spec| write_value_specification(version, encode, spec))
    })
    .context("encode ModuleSpecification values")?;
    to_raw(&ModuleObjectOut {
        types: &types,
        values: &values,
        doc: spec.doc.as_deref(),
    })
}

pub(crate) fn read_module_specification<TA, D>(
    version: FormatVersion,
    decode: &D,
    raw: &RawValue,
) -> Result<ModuleSpecification<TA>>
where
    D: AttrDecoder<TA> + ?Sized,
{
    let object: ModuleObjectIn = parse_object(raw, "ModuleSpecification")?;
    let types = read_map(object.types, "type", read_name, |raw| {
        read_documented(raw, |raw| read_type_specification(version, decode, raw))
    })
    .context("decode ModuleSpecification types")?;
    let values = read_map(object.values, "value", read_name, |raw| {
        read_documented(raw, |raw| read_value_specification(version, decode, raw))
    })
    .context("decode ModuleSpecification values")?;
    Ok(ModuleSpecification {
        types,
        values,
        doc: object.doc,
    })
}

pub(crate) fn write_module_definition<TA, VA, ET, EV>(
    version: FormatVersion,
    encode_ta: &ET,
    encode_va: &EV,
    def: &ModuleDefinition<TA, VA>,
) -> Result<Box<RawValue>>
where
    ET: AttrEncoder<TA> + ?Sized,
    EV: AttrEncoder<VA> + ?Sized,
{
    let types = write_map(&def.types, "type", write_name, |ac| {
        write_access_controlled(version, ac, |documented| {
            write_documented(documented, |def| write_type_definition(version, encode_ta, def))
        })
    })
    .context("encode ModuleDefinition types")?;
    let values = write_map(&def.values, "value", write_name, |ac| {
        write_access_controlled(version, ac, |documented| {
            write_documented(documented, |def| {
                write_value_definition(version, encode_ta, encode_va, def)
            })
        })
    })
    .context("encode ModuleDefinition values")?;
    to_raw(&ModuleObjectOut {
        types: &types,
        values: &values,
        doc: def.doc.as_deref(),
    })
}

pub(crate) fn read_module_definition<TA, VA, DT, DV>(
    version: FormatVersion,
    decode_ta: &DT,
    decode_va: &DV,
    raw: &RawValue,
) -> Result<ModuleDefinition<TA, VA>>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    let object: ModuleObjectIn = parse_object(raw, "ModuleDefinition")?;
    let types = read_map(object.types, "type", read_name, |raw| {
        read_access_controlled(version, raw, |raw| {
            read_documented(raw, |raw| read_type_definition(version, decode_ta, raw))
        })
    })
    .context("decode ModuleDefinition types")?;
    let values = read_map(object.values, "value", read_name, |raw| {
        read_access_controlled(version, raw, |raw| {
            read_documented(raw, |raw| {
                read_value_definition(version, decode_ta, decode_va, raw)
            })
        })
    })
    .context("decode ModuleDefinition values")?;
    Ok(ModuleDefinition {
        types,
        values,
        doc: object.doc,
    })
}

pub fn encode_module_specification<TA, E>(
    options: &Options,
    encode_attrs: &E,
    spec: &ModuleSpecification<TA>,
) -> Result<Vec<u8>>
where
    E: AttrEncoder<TA> + ?Sized,
{
    trace!(
        version = %options.format_version,
        types = spec.types.len(),
        values = spec.values.len(),
        "encode ModuleSpecification"
    );
    Ok(into_bytes(write_module_specification(
        options.format_version,
        encode_attrs,
        spec,
    )?))
}

pub fn decode_module_specification<TA, D>(
    options: &Options,
    decode_attrs: &D,
    data: &[u8],
) -> Result<ModuleSpecification<TA>>
where
    D: AttrDecoder<TA> + ?Sized,
{
    trace!(version = %options.format_version, len = data.len(), "decode ModuleSpecification");
    read_module_specification(
        options.format_version,
        decode_attrs,
        parse_root(options, data, "ModuleSpecification")?,
    )
}

pub fn encode_module_definition<TA, VA, ET, EV>(
    options: &Options,
    encode_ta: &ET,
    encode_va: &EV,
    def: &ModuleDefinition<TA, VA>,
) -> Result<Vec<u8>>
where
    ET: AttrEncoder<TA> + ?Sized,
    EV: AttrEncoder<VA> + ?Sized,
{
    trace!(
        version = %options.format_version,
        types = def.types.len(),
        values = def.values.len(),
        "encode ModuleDefinition"
    );
    Ok(into_bytes(write_module_definition(
        options.format_version,
        encode_ta,
        encode_va,
        def,
    )?))
}

pub fn decode_module_definition<TA, VA, DT, DV>(
    options: &Options,
    decode_ta: &DT,
    decode_va: &DV,
    data: &[u8],
) -> Result<ModuleDefinition<TA, VA>>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    trace!(version = %options.format_version, len = data.len(), "decode ModuleDefinition");
    read_module_definition(
        options.format_version,
        decode_ta,
        decode_va,
        parse_root(options, data, "ModuleDefinition")?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::UnitAttrs;
    use crate::ir::{AccessControlled, Documented, Type, TypeSpecification, ValueSpecification};
    use crate::naming::Name;

    #[test]
    fn test_empty_specification_writes_null_doc() {
        let spec: ModuleSpecification<()> = ModuleSpecification::new();
        let bytes = encode_module_specification(&Options::v3(), &UnitAttrs, &spec).unwrap();
        assert_eq!(bytes, br#"{"types":[],"values":[],"doc":null}"#);
    }

    #[test]
    fn test_missing_doc_decodes_as_none() -> anyhow::Result<()> {
        let spec: ModuleSpecification<()> =
            decode_module_specification(&Options::v3(), &UnitAttrs, br#"{"types":[],"values":[]}"#)?;
        assert_eq!(spec.doc, None);
        Ok(())
    }

    #[test]
    fn test_specification_members_keep_order() -> anyhow::Result<()> {
        let mut spec: ModuleSpecification<()> = ModuleSpecification::new();
        spec.doc = Some("Shapes.".to_string());
        spec.types.insert(
            Name::from_str("zeta"),
            Documented::new("", TypeSpecification::Opaque(vec![])),
        );
        spec.types.insert(
            Name::from_str("alpha"),
            Documented::new("First.", TypeSpecification::Opaque(vec![])),
        );
        spec.values.insert(
            Name::from_str("origin"),
            Documented::new("", ValueSpecification::new(vec![], Type::Unit(()))),
        );

        for options in [Options::v1(), Options::v2(), Options::v3()] {
            let bytes = encode_module_specification(&options, &UnitAttrs, &spec)?;
            let back = decode_module_specification(&options, &UnitAttrs, &bytes)?;
            assert_eq!(back, spec);
            let names: Vec<_> = back.types.keys().map(|n| n.to_string()).collect();
            assert_eq!(names, ["zeta", "alpha"]);
        }
        Ok(())
    }

    #[test]
    fn test_definition_v1_access_arrays() -> anyhow::Result<()> {
        let mut def: ModuleDefinition<(), ()> = ModuleDefinition::new();
        def.types.insert(
            Name::from_str("id"),
            AccessControlled::private(Documented::new(
                "",
                crate::ir::TypeDefinition::TypeAlias(vec![], Type::Unit(())),
            )),
        );
        let bytes = encode_module_definition(&Options::v1(), &UnitAttrs, &UnitAttrs, &def)?;
        assert_eq!(
            String::from_utf8(bytes.clone())?,
            r#"{"types":[[["id"],["private",{"doc":"","value":["type_alias_definition",[],["unit",[]]]}]]],"values":[],"doc":null}"#
        );
        assert_eq!(decode_module_definition(&Options::v1(), &UnitAttrs, &UnitAttrs, &bytes)?, def);
        Ok(())
    }

    #[test]
    fn test_duplicate_member_is_rejected() {
        let payload = br#"{"types":[
            [["a"],{"doc":"","value":["OpaqueTypeSpecification",[]]}],
            [["a"],{"doc":"","value":["OpaqueTypeSpecification",[]]}]
        ],"values":[]}"#;
        let result = decode_module_specification::<(), _>(&Options::v3(), &UnitAttrs, payload);
        assert!(result.is_err());
    }
}
