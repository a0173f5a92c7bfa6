//! `Documented` wrapper: `{"doc": "...", "value": ...}` in every format version.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use super::raw::{parse_object, to_raw};
use crate::error::{Result, ResultExt};
use crate::ir::Documented;

#[derive(Serialize, Deserialize)]
struct DocumentedObject<'a> {
    #[serde(borrow)]
    doc: Cow<'a, str>,
    #[serde(borrow)]
    value: &'a RawValue,
}

pub(crate) fn write_documented<T, F>(documented: &Documented<T>, write_value: F) -> Result<Box<RawValue>>
where
    F: FnOnce(&T) -> Result<Box<RawValue>>,
{
    let value = write_value(&documented.value).context("encode Documented value")?;
    to_raw(&DocumentedObject {
        doc: Cow::Borrowed(&documented.doc),
        value: &value,
    })
}

pub(crate) fn read_documented<'a, T, F>(raw: &'a RawValue, read_value: F) -> Result<Documented<T>>
where
    F: FnOnce(&'a RawValue) -> Result<T>,
{
    let object: DocumentedObject = parse_object(raw, "Documented")?;
    let value = read_value(object.value).context("decode Documented value")?;
    Ok(Documented::new(object.doc.into_owned(), value))
}
