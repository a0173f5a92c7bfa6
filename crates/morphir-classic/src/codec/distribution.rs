//! Distribution codec.
//!
//! A library distribution is `["Library", packageName, dependencies, definition]`.
//! Types carry no attributes (`[]`) and every value is annotated with its
//! type, encoded inline in the same format version. Distribution files wrap
//! this in `{"formatVersion": n, "distribution": ...}`.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use tracing::{debug, trace};

use super::attributes::{AttrDecoder, AttrEncoder, UnitAttrs};
use super::naming::{read_path, write_path};
use super::options::{FormatVersion, Options};
use super::package::{
    read_package_definition, read_package_specification, write_package_definition,
    write_package_specification,
};
use super::raw::{
    into_bytes, parse_array, parse_object, parse_root, parse_string, read_map, to_raw, write_map,
};
use super::types::{read_type, write_type};
use crate::error::{Error, Result, ResultExt};
use crate::ir::{Distribution, Type};

const LIBRARY_TAG: &str = "Library";

/// Value attributes of a distribution: the value's type, in the same format
/// version as the surrounding payload.
struct InlineTypeAttrs {
    version: FormatVersion,
}

impl AttrEncoder<Type<()>> for InlineTypeAttrs {
    fn encode_attrs(&self, tpe: &Type<()>) -> anyhow::Result<Vec<u8>> {
        Ok(into_bytes(write_type(self.version, &UnitAttrs, tpe)?))
    }
}

impl AttrDecoder<Type<()>> for InlineTypeAttrs {
    fn decode_attrs(&self, data: &[u8]) -> anyhow::Result<Type<()>> {
        let raw: &RawValue = serde_json::from_slice(data)?;
        Ok(read_type(self.version, &UnitAttrs, raw)?)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionedObject<'a> {
    format_version: FormatVersion,
    #[serde(borrow)]
    distribution: &'a RawValue,
}

pub(crate) fn write_distribution(
    version: FormatVersion,
    distribution: &Distribution,
) -> Result<Box<RawValue>> {
    match distribution {
        Distribution::Library(package_name, dependencies, definition) => {
            let dependencies = write_map(dependencies, "dependency", write_path, |spec| {
                write_package_specification(version, &UnitAttrs, spec)
            })
            .context("encode Library dependencies")?;
            let definition = write_package_definition(
                version,
                &UnitAttrs,
                &InlineTypeAttrs { version },
                definition,
            )
            .context("encode Library definition")?;
            to_raw(&[
                to_raw(LIBRARY_TAG)?,
                write_path(package_name)?,
                dependencies,
                definition,
            ])
        }
    }
}

pub(crate) fn read_distribution(version: FormatVersion, raw: &RawValue) -> Result<Distribution> {
    let items = parse_array(raw, "Distribution")?;
    let Some(tag) = items.first() else {
        return Err(Error::Shape(
            "expected Distribution array [tag, ...], got empty array".to_string(),
        ));
    };
    match parse_string(tag, "tag")?.as_str() {
        "Library" | "library" => {}
        other => {
            return Err(Error::UnknownTag {
                tree: "Distribution",
                tag: other.to_string(),
                version,
            });
        }
    }
    let [_, package_name, dependencies, definition] =
        <[&RawValue; 4]>::try_from(items).map_err(|items| Error::Arity {
            kind: LIBRARY_TAG,
            expected: 4,
            actual: items.len(),
        })?;

    let package_name = read_path(package_name).context("decode Library package name")?;
    let dependencies = read_map(dependencies, "dependency", read_path, |raw| {
        read_package_specification(version, &UnitAttrs, raw)
    })
    .context("decode Library dependencies")?;
    let definition =
        read_package_definition(version, &UnitAttrs, &InlineTypeAttrs { version }, definition)
            .context("decode Library definition")?;
    Ok(Distribution::Library(package_name, dependencies, definition))
}

pub fn encode_distribution(options: &Options, distribution: &Distribution) -> Result<Vec<u8>> {
    debug!(
        version = %options.format_version,
        package = %distribution.package_name(),
        "encode Distribution"
    );
    Ok(into_bytes(write_distribution(options.format_version, distribution)?))
}

pub fn decode_distribution(options: &Options, data: &[u8]) -> Result<Distribution> {
    trace!(version = %options.format_version, len = data.len(), "decode Distribution");
    read_distribution(options.format_version, parse_root(options, data, "Distribution")?)
}

/// Encodes `{"formatVersion": n, "distribution": ...}`, the layout of
/// `morphir-ir.json` files.
pub fn encode_versioned_distribution(
    options: &Options,
    distribution: &Distribution,
) -> Result<Vec<u8>> {
    let body = write_distribution(options.format_version, distribution)?;
    let wrapped = to_raw(&VersionedObject {
        format_version: options.format_version,
        distribution: &body,
    })?;
    debug!(
        version = %options.format_version,
        package = %distribution.package_name(),
        "encoded versioned Distribution"
    );
    Ok(into_bytes(wrapped))
}

/// Decodes a versioned distribution. The `formatVersion` in the payload must
/// match the caller's options.
pub fn decode_versioned_distribution(options: &Options, data: &[u8]) -> Result<Distribution> {
    let raw = parse_root(options, data, "Distribution")?;
    let object: VersionedObject = parse_object(raw, "versioned Distribution")?;
    if object.format_version != options.format_version {
        return Err(Error::Invalid {
            what: "formatVersion",
            reason: format!(
                "payload declares format version {}, expected {}",
                object.format_version, options.format_version
            ),
        });
    }
    let distribution = read_distribution(options.format_version, object.distribution)?;
    debug!(
        version = %options.format_version,
        package = %distribution.package_name(),
        "decoded versioned Distribution"
    );
    Ok(distribution)
}
