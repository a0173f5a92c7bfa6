//! Caller supplied attribute coders.
//!
//! Attributes are opaque to the codec. Callers hand in an encoder that turns an
//! attribute into JSON bytes and a decoder that reads it back; any closure with
//! the right signature works, as do [`SerdeAttrs`] and [`UnitAttrs`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::error::{Error, Result};

/// Encodes one attribute value as JSON.
pub trait AttrEncoder<A: ?Sized> {
    fn encode_attrs(&self, attrs: &A) -> anyhow::Result<Vec<u8>>;
}

impl<A: ?Sized, F> AttrEncoder<A> for F
where
    F: Fn(&A) -> anyhow::Result<Vec<u8>>,
{
    fn encode_attrs(&self, attrs: &A) -> anyhow::Result<Vec<u8>> {
        self(attrs)
    }
}

/// Decodes one attribute value from JSON.
pub trait AttrDecoder<A> {
    fn decode_attrs(&self, data: &[u8]) -> anyhow::Result<A>;
}

impl<A, F> AttrDecoder<A> for F
where
    F: Fn(&[u8]) -> anyhow::Result<A>,
{
    fn decode_attrs(&self, data: &[u8]) -> anyhow::Result<A> {
        self(data)
    }
}

/// Uses the attribute type's own serde implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeAttrs;

impl<A: Serialize + ?Sized> AttrEncoder<A> for SerdeAttrs {
    fn encode_attrs(&self, attrs: &A) -> anyhow::Result<Vec<u8>> {
        Ok(serde_json::to_vec(attrs)?)
    }
}

impl<A: DeserializeOwned> AttrDecoder<A> for SerdeAttrs {
    fn decode_attrs(&self, data: &[u8]) -> anyhow::Result<A> {
        Ok(serde_json::from_slice(data)?)
    }
}

/// Attributes of trees that carry none, such as the types in a distribution.
///
/// Encodes `()` as `[]`. Decoding accepts `[]` and `{}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitAttrs;

impl AttrEncoder<()> for UnitAttrs {
    fn encode_attrs(&self, _attrs: &()) -> anyhow::Result<Vec<u8>> {
        Ok(b"[]".to_vec())
    }
}

impl AttrDecoder<()> for UnitAttrs {
    fn decode_attrs(&self, data: &[u8]) -> anyhow::Result<()> {
        match serde_json::from_slice::<serde_json::Value>(data)? {
            serde_json::Value::Array(items) if items.is_empty() => Ok(()),
            serde_json::Value::Object(fields) if fields.is_empty() => Ok(()),
            other => anyhow::bail!("expected empty array for unit attributes, got {other}"),
        }
    }
}

/// Runs the caller's encoder and checks that it produced a JSON value.
pub(crate) fn write_attrs<A, E>(encode: &E, attrs: &A) -> Result<Box<RawValue>>
where
    A: ?Sized,
    E: AttrEncoder<A> + ?Sized,
{
    let bytes = encode
        .encode_attrs(attrs)
        .map_err(|source| Error::Attribute {
            direction: "encode",
            source,
        })?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::EmptyAttributes);
    }
    let text = String::from_utf8(bytes).map_err(|e| Error::Attribute {
        direction: "encode",
        source: e.into(),
    })?;
    RawValue::from_string(text).map_err(|e| Error::Attribute {
        direction: "encode",
        source: e.into(),
    })
}

pub(crate) fn read_attrs<A, D>(decode: &D, raw: &RawValue) -> Result<A>
where
    D: AttrDecoder<A> + ?Sized,
{
    decode
        .decode_attrs(raw.get().as_bytes())
        .map_err(|source| Error::Attribute {
            direction: "decode",
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_is_rejected() {
        let encoder = |_: &u8| -> anyhow::Result<Vec<u8>> { Ok(Vec::new()) };
        assert!(matches!(write_attrs(&encoder, &1), Err(Error::EmptyAttributes)));

        let blank = |_: &u8| -> anyhow::Result<Vec<u8>> { Ok(b"  ".to_vec()) };
        assert!(matches!(write_attrs(&blank, &1), Err(Error::EmptyAttributes)));
    }

    #[test]
    fn test_invalid_json_payload_is_rejected() {
        let encoder = |_: &u8| -> anyhow::Result<Vec<u8>> { Ok(b"{not json".to_vec()) };
        assert!(matches!(
            write_attrs(&encoder, &1),
            Err(Error::Attribute { direction: "encode", .. })
        ));
    }

    #[test]
    fn test_encoder_error_is_propagated() {
        let encoder = |_: &u8| -> anyhow::Result<Vec<u8>> { anyhow::bail!("no position") };
        let err = write_attrs(&encoder, &1).unwrap_err();
        assert_eq!(err.to_string(), "encode attributes: no position");
    }

    #[test]
    fn test_unit_attrs() {
        let raw = write_attrs(&UnitAttrs, &()).unwrap();
        assert_eq!(raw.get(), "[]");
        let empty_object = RawValue::from_string("{}".to_string()).unwrap();
        read_attrs::<(), _>(&UnitAttrs, &raw).unwrap();
        read_attrs::<(), _>(&UnitAttrs, &empty_object).unwrap();
        let not_empty = RawValue::from_string("[1]".to_string()).unwrap();
        assert!(read_attrs::<(), _>(&UnitAttrs, &not_empty).is_err());
    }

    #[test]
    fn test_serde_attrs() {
        let raw = write_attrs(&SerdeAttrs, &(3, "x")).unwrap();
        assert_eq!(raw.get(), r#"[3,"x"]"#);
        let back: (u32, String) = read_attrs(&SerdeAttrs, &raw).unwrap();
        assert_eq!(back, (3, "x".to_string()));
    }
}
