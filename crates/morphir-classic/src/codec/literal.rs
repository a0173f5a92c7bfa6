//! Literal codec: `[tag, value]`.

use serde_json::value::RawValue;
use tracing::trace;

use super::options::{FormatVersion, Options};
use super::raw::{into_bytes, parse_node, parse_root, parse_string, to_raw, write_node};
use super::tags::versioned_tags;
use crate::error::{Error, Result, ResultExt};
use crate::ir::{Decimal, Literal};

versioned_tags! {
    enum LiteralKind in "Literal" {
        Bool => ("bool_literal", "BoolLiteral", 2),
        Char => ("char_literal", "CharLiteral", 2),
        String => ("string_literal", "StringLiteral", 2),
        WholeNumber => ("int_literal", "WholeNumberLiteral", 2),
        Float => ("float_literal", "FloatLiteral", 2),
        Decimal => ("decimal_literal", "DecimalLiteral", 2),
    }
}

pub(crate) fn write_literal(version: FormatVersion, literal: &Literal) -> Result<Box<RawValue>> {
    let (kind, value) = match literal {
        Literal::Bool(v) => (LiteralKind::Bool, to_raw(v)?),
        Literal::Char(v) => (LiteralKind::Char, to_raw(&v.to_string())?),
        Literal::String(v) => (LiteralKind::String, to_raw(v)?),
        Literal::WholeNumber(v) => (LiteralKind::WholeNumber, to_raw(v)?),
        Literal::Float(v) if !v.is_finite() => {
            return Err(Error::Invalid {
                what: "float literal",
                reason: format!("{v} has no JSON representation"),
            });
        }
        Literal::Float(v) => (LiteralKind::Float, to_raw(v)?),
        Literal::Decimal(v) => (LiteralKind::Decimal, to_raw(v.as_str())?),
    };
    write_node(kind, version, vec![value])
}

pub(crate) fn read_literal(version: FormatVersion, raw: &RawValue) -> Result<Literal> {
    let (kind, items) = parse_node::<LiteralKind>(raw, version)?;
    let value = items[1];
    let literal = match kind {
        LiteralKind::Bool => Literal::Bool(read_json(value).context("decode BoolLiteral value")?),
        LiteralKind::Char => Literal::Char(read_char(value)?),
        LiteralKind::String => Literal::String(parse_string(value, "string literal")?),
        LiteralKind::WholeNumber => {
            Literal::WholeNumber(read_json(value).context("decode WholeNumberLiteral value")?)
        }
        LiteralKind::Float => Literal::Float(read_json(value).context("decode FloatLiteral value")?),
        LiteralKind::Decimal => {
            Literal::Decimal(Decimal::new(parse_string(value, "decimal literal")?)?)
        }
    };
    Ok(literal)
}

fn read_json<'a, T: serde::Deserialize<'a>>(raw: &'a RawValue) -> Result<T> {
    Ok(serde_json::from_str(raw.get())?)
}

fn read_char(raw: &RawValue) -> Result<char> {
    let text = parse_string(raw, "char literal")?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::Invalid {
            what: "char literal",
            reason: format!("expected a single character, got {text:?}"),
        }),
    }
}

pub fn encode_literal(options: &Options, literal: &Literal) -> Result<Vec<u8>> {
    trace!(version = %options.format_version, "encode Literal");
    Ok(into_bytes(write_literal(options.format_version, literal)?))
}

pub fn decode_literal(options: &Options, data: &[u8]) -> Result<Literal> {
    trace!(version = %options.format_version, len = data.len(), "decode Literal");
    read_literal(options.format_version, parse_root(options, data, "Literal")?).context("decode Literal")
}
