//! Name, Path, QName and FQName. Their JSON shape is the same in every
//! format version, so only [`Options::max_depth`] applies to them.
//!
//! Every decoded word is interned for the life of the process (see
//! [`crate::naming::interner`]).

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use tracing::trace;

use super::options::Options;
use super::raw::{into_bytes, parse_root, reject_null, to_raw};
use crate::error::{Error, Result};
use crate::naming::{FQName, Name, Path, QName};

fn read_serde<T: DeserializeOwned>(raw: &RawValue, what: &'static str) -> Result<T> {
    reject_null(raw, what)?;
    serde_json::from_str(raw.get())
        .map_err(|e| Error::Shape(format!("expected {what}: {e}")))
}

pub(crate) fn read_name(raw: &RawValue) -> Result<Name> {
    read_serde(raw, "Name")
}

pub(crate) fn read_path(raw: &RawValue) -> Result<Path> {
    read_serde(raw, "Path")
}

pub(crate) fn read_fqname(raw: &RawValue) -> Result<FQName> {
    read_serde(raw, "FQName")
}

pub(crate) fn write_name(name: &Name) -> Result<Box<RawValue>> {
    to_raw(name)
}

pub(crate) fn write_path(path: &Path) -> Result<Box<RawValue>> {
    to_raw(path)
}

pub(crate) fn write_fqname(fqname: &FQName) -> Result<Box<RawValue>> {
    to_raw(fqname)
}

/// Encodes a list of names, e.g. type parameters.
pub(crate) fn write_names(names: &[Name]) -> Result<Box<RawValue>> {
    to_raw(names)
}

pub(crate) fn read_names(raw: &RawValue) -> Result<Vec<Name>> {
    read_serde(raw, "Name list")
}

pub fn encode_name(_options: &Options, name: &Name) -> Result<Vec<u8>> {
    Ok(into_bytes(write_name(name)?))
}

pub fn decode_name(options: &Options, data: &[u8]) -> Result<Name> {
    read_name(parse_root(options, data, "Name")?)
}

pub fn encode_path(_options: &Options, path: &Path) -> Result<Vec<u8>> {
    Ok(into_bytes(write_path(path)?))
}

pub fn decode_path(options: &Options, data: &[u8]) -> Result<Path> {
    read_path(parse_root(options, data, "Path")?)
}

pub fn encode_qname(_options: &Options, qname: &QName) -> Result<Vec<u8>> {
    Ok(into_bytes(to_raw(qname)?))
}

pub fn decode_qname(options: &Options, data: &[u8]) -> Result<QName> {
    trace!(len = data.len(), "decode QName");
    read_serde(parse_root(options, data, "QName")?, "QName")
}

pub fn encode_fqname(_options: &Options, fqname: &FQName) -> Result<Vec<u8>> {
    Ok(into_bytes(write_fqname(fqname)?))
}

pub fn decode_fqname(options: &Options, data: &[u8]) -> Result<FQName> {
    trace!(len = data.len(), "decode FQName");
    read_fqname(parse_root(options, data, "FQName")?)
}
