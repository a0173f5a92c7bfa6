//! Package specifications and definitions: `{"modules": [[path, module], ...]}`.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use tracing::trace;

use super::access::{read_access_controlled, write_access_controlled};
use super::attributes::{AttrDecoder, AttrEncoder};
use super::module::{
    read_module_definition, read_module_specification, write_module_definition,
    write_module_specification,
};
use super::naming::{read_path, write_path};
use super::options::{FormatVersion, Options};
use super::raw::{into_bytes, parse_object, parse_root, read_map, to_raw, write_map};
use crate::error::{Result, ResultExt};
use crate::ir::{PackageDefinition, PackageSpecification};

#[derive(Serialize, Deserialize)]
struct PackageObject<'a> {
    #[serde(borrow)]
    modules: &'a RawValue,
}

pub(crate) fn write_package_specification<TA, E>(
    version: FormatVersion,
    encode: &E,
    spec: &PackageSpecification<TA>,
) -> Result<Box<RawValue>>
where
    E: AttrEncoder<TA> + ?Sized,
{
    let modules = write_map(&spec.modules, "module", write_path, |module| {
        write_module_specification(version, encode, module)
    })
    .context("encode PackageSpecification modules")?;
    to_raw(&PackageObject { modules: &modules })
}

pub(crate) fn read_package_specification<TA, D>(
    version: FormatVersion,
    decode: &D,
    raw: &RawValue,
) -> Result<PackageSpecification<TA>>
where
    D: AttrDecoder<TA> + ?Sized,
{
    let object: PackageObject = parse_object(raw, "PackageSpecification")?;
    let modules = read_map(object.modules, "module", read_path, |raw| {
        read_module_specification(version, decode, raw)
    })
    .context("decode PackageSpecification modules")?;
    Ok(PackageSpecification { modules })
}

pub(crate) fn write_package_definition<TA, VA, ET, EV>(
    version: FormatVersion,
    encode_ta: &ET,
    encode_va: &EV,
    def: &PackageDefinition<TA, VA>,
) -> Result<Box<RawValue>>
where
    ET: AttrEncoder<TA> + ?Sized,
    EV: AttrEncoder<VA> + ?Sized,
{
    let modules = write_map(&def.modules, "module", write_path, |ac| {
        write_access_controlled(version, ac, |module| {
            write_module_definition(version, encode_ta, encode_va, module)
        })
    })
    .context("encode PackageDefinition modules")?;
    to_raw(&PackageObject { modules: &modules })
}

pub(crate) fn read_package_definition<TA, VA, DT, DV>(
    version: FormatVersion,
    decode_ta: &DT,
    decode_va: &DV,
    raw: &RawValue,
) -> Result<PackageDefinition<TA, VA>>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    let object: PackageObject = parse_object(raw, "PackageDefinition")?;
    let modules = read_map(object.modules, "module", read_path, |raw| {
        read_access_controlled(version, raw, |raw| {
            read_module_definition(version, decode_ta, decode_va, raw)
        })
    })
    .context("decode PackageDefinition modules")?;
    Ok(PackageDefinition { modules })
}

pub fn encode_package_specification<TA, E>(
    options: &Options,
    encode_attrs: &E,
    spec: &PackageSpecification<TA>,
) -> Result<Vec<u8>>
where
    E: AttrEncoder<TA> + ?Sized,
{
    trace!(version = %options.format_version, modules = spec.modules.len(), "encode PackageSpecification");
    Ok(into_bytes(write_package_specification(
        options.format_version,
        encode_attrs,
        spec,
    )?))
}

pub fn decode_package_specification<TA, D>(
    options: &Options,
    decode_attrs: &D,
    data: &[u8],
) -> Result<PackageSpecification<TA>>
where
    D: AttrDecoder<TA> + ?Sized,
{
    trace!(version = %options.format_version, len = data.len(), "decode PackageSpecification");
    read_package_specification(
        options.format_version,
        decode_attrs,
        parse_root(options, data, "PackageSpecification")?,
    )
}

pub fn encode_package_definition<TA, VA, ET, EV>(
    options: &Options,
    encode_ta: &ET,
    encode_va: &EV,
    def: &PackageDefinition<TA, VA>,
) -> Result<Vec<u8>>
where
    ET: AttrEncoder<TA> + ?Sized,
    EV: AttrEncoder<VA> + ?Sized,
{
    trace!(version = %options.format_version, modules = def.modules.len(), "encode PackageDefinition");
    Ok(into_bytes(write_package_definition(
        options.format_version,
        encode_ta,
        encode_va,
        def,
    )?))
}

pub fn decode_package_definition<TA, VA, DT, DV>(
    options: &Options,
    decode_ta: &DT,
    decode_va: &DV,
    data: &[u8],
) -> Result<PackageDefinition<TA, VA>>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    trace!(version = %options.format_version, len = data.len(), "decode PackageDefinition");
    read_package_definition(
        options.format_version,
        decode_ta,
        decode_va,
        parse_root(options, data, "PackageDefinition")?,
    )
}
