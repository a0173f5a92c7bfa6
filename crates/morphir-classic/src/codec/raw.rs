//! Raw JSON plumbing shared by the encoders and decoders.
//!
//! Encoders build `Box<RawValue>` fragments bottom-up so attribute payloads and
//! nested nodes are embedded verbatim. Decoders split borrowed `&RawValue`
//! slices one level at a time and hand the children to their own decoders.
//!
//! Splitting re-scans a node's children at every level and writing copies each
//! finished child into its parent, so both directions cost O(size × depth)
//! rather than linear time. `serde_json` skips its own recursion
//! limit for raw values; [`parse_root`] applies [`Options::max_depth`] instead.

use std::fmt::Display;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::value::{RawValue, to_raw_value};

use super::options::{FormatVersion, Options};
use super::tags::VersionedTag;
use crate::error::{Error, Result, ResultExt};

pub(crate) fn to_raw<T: Serialize + ?Sized>(value: &T) -> Result<Box<RawValue>> {
    Ok(to_raw_value(value)?)
}

pub(crate) fn into_bytes(raw: Box<RawValue>) -> Vec<u8> {
    Box::<str>::from(raw).into_string().into_bytes()
}

/// Parses a complete top-level document, rejecting `null` and documents
/// nested deeper than the caller's limit.
pub(crate) fn parse_root<'a>(
    options: &Options,
    data: &'a [u8],
    what: &'static str,
) -> Result<&'a RawValue> {
    if let Some(limit) = options
        .max_depth
        .filter(|&limit| nests_deeper_than(data, limit))
    {
        return Err(Error::Depth { what, limit });
    }
    let raw: &RawValue = serde_json::from_slice(data)?;
    reject_null(raw, what)?;
    Ok(raw)
}

/// Single pass over the bytes counting open arrays and objects outside strings.
fn nests_deeper_than(data: &[u8], limit: usize) -> bool {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for &byte in data {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                if depth > limit {
                    return true;
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    false
}

pub(crate) fn reject_null(raw: &RawValue, what: &'static str) -> Result<()> {
    if raw.get().trim() == "null" {
        Err(Error::Null(what))
    } else {
        Ok(())
    }
}

pub(crate) fn parse_array<'a>(raw: &'a RawValue, what: &'static str) -> Result<Vec<&'a RawValue>> {
    reject_null(raw, what)?;
    serde_json::from_str(raw.get())
        .map_err(|e| Error::Shape(format!("expected {what} array: {e}")))
}

/// Parses an array that must have exactly `N` elements.
pub(crate) fn parse_tuple<'a, const N: usize>(
    raw: &'a RawValue,
    what: &'static str,
) -> Result<[&'a RawValue; N]> {
    let items = parse_array(raw, what)?;
    let actual = items.len();
    items.try_into().map_err(|_| Error::Arity {
        kind: what,
        expected: N,
        actual,
    })
}

pub(crate) fn parse_object<'a, T: Deserialize<'a>>(raw: &'a RawValue, what: &'static str) -> Result<T> {
    reject_null(raw, what)?;
    serde_json::from_str(raw.get())
        .map_err(|e| Error::Shape(format!("expected {what} object: {e}")))
}

pub(crate) fn parse_string(raw: &RawValue, what: &'static str) -> Result<String> {
    serde_json::from_str(raw.get())
        .map_err(|e| Error::Shape(format!("expected {what} string: {e}")))
}

/// Splits a tagged node `[tag, ...]`, resolving the tag for `version` and
/// checking the element count of the resolved kind.
pub(crate) fn parse_node<'a, K: VersionedTag>(
    raw: &'a RawValue,
    version: FormatVersion,
) -> Result<(K, Vec<&'a RawValue>)> {
    let items = parse_array(raw, K::TREE)?;
    if items.len() < 2 {
        return Err(Error::Shape(format!(
            "expected {} array [tag, ...] with at least 2 elements, got {}",
            K::TREE,
            items.len()
        )));
    }
    let tag = parse_string(items[0], "tag")?;
    let kind = K::from_tag(&tag, version)?;
    kind.check_arity(items.len())?;
    Ok((kind, items))
}

/// Writes a tagged node `[tag, fields...]`.
pub(crate) fn write_node<K: VersionedTag>(
    kind: K,
    version: FormatVersion,
    fields: Vec<Box<RawValue>>,
) -> Result<Box<RawValue>> {
    let mut items = Vec::with_capacity(fields.len() + 1);
    items.push(to_raw(kind.tag(version))?);
    items.extend(fields);
    to_raw(&items)
}

/// Encodes each element with `write`, labelling failures with their index.
pub(crate) fn write_list<T, F>(items: &[T], what: &'static str, mut write: F) -> Result<Box<RawValue>>
where
    F: FnMut(&T) -> Result<Box<RawValue>>,
{
    let encoded = items
        .iter()
        .enumerate()
        .map(|(i, item)| write(item).with_context(|| format!("{what} {i}")))
        .collect::<Result<Vec<_>>>()?;
    to_raw(&encoded)
}

/// Decodes each element of an array with `read`, labelling failures with their index.
pub(crate) fn read_list<'a, T, F>(raw: &'a RawValue, what: &'static str, mut read: F) -> Result<Vec<T>>
where
    F: FnMut(&'a RawValue) -> Result<T>,
{
    parse_array(raw, what)?
        .into_iter()
        .enumerate()
        .map(|(i, item)| read(item).with_context(|| format!("{what} {i}")))
        .collect()
}

/// Encodes an ordered map as `[[key, value], ...]`.
pub(crate) fn write_map<K, V, FK, FV>(
    map: &IndexMap<K, V>,
    what: &'static str,
    mut write_key: FK,
    mut write_value: FV,
) -> Result<Box<RawValue>>
where
    K: Display,
    FK: FnMut(&K) -> Result<Box<RawValue>>,
    FV: FnMut(&V) -> Result<Box<RawValue>>,
{
    let encoded = map
        .iter()
        .map(|(key, value)| {
            write_key(key)
                .and_then(|k| write_value(value).and_then(|v| to_raw(&[k, v])))
                .with_context(|| format!("{what} {key}"))
        })
        .collect::<Result<Vec<_>>>()?;
    to_raw(&encoded)
}

/// Decodes `[[key, value], ...]` into an ordered map. A key may appear once.
pub(crate) fn read_map<'a, K, V, FK, FV>(
    raw: &'a RawValue,
    what: &'static str,
    mut read_key: FK,
    mut read_value: FV,
) -> Result<IndexMap<K, V>>
where
    K: Display + Hash + Eq,
    FK: FnMut(&'a RawValue) -> Result<K>,
    FV: FnMut(&'a RawValue) -> Result<V>,
{
    let entries = parse_array(raw, what)?;
    let mut map = IndexMap::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        let [key, value] = parse_tuple::<2>(entry, what).with_context(|| format!("{what} {i}"))?;
        let key = read_key(key).with_context(|| format!("{what} {i}"))?;
        let value = read_value(value).with_context(|| format!("{what} {key}"))?;
        if map.contains_key(&key) {
            return Err(Error::Invalid {
                what,
                reason: format!("duplicate entry {key}"),
            });
        }
        map.insert(key, value);
    }
    Ok(map)
}
