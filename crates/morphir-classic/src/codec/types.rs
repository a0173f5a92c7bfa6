//! Type codec: `[tag, attrs, ...]`.
//!
//! Record fields are `[name, type]` in format version 1 and
//! `{"name": ..., "tpe": ...}` in versions 2 and 3.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use tracing::trace;

use super::attributes::{AttrDecoder, AttrEncoder, read_attrs, write_attrs};
use super::naming::{read_fqname, read_name, write_fqname, write_name};
use super::options::{FormatVersion, Options};
use super::raw::{
    into_bytes, parse_node, parse_object, parse_root, parse_tuple, read_list, to_raw, write_list,
    write_node,
};
use super::tags::versioned_tags;
use crate::error::{Result, ResultExt};
use crate::ir::{Constructor, Field, Type, TypeConstructors};
use crate::stack::ensure_sufficient_stack;

versioned_tags! {
    enum TypeKind in "Type" {
        Variable => ("variable", "Variable", 3),
        Reference => ("reference", "Reference", 4),
        Tuple => ("tuple", "Tuple", 3),
        Record => ("record", "Record", 3),
        ExtensibleRecord => ("extensible_record", "ExtensibleRecord", 4),
        Function => ("function", "Function", 4),
        Unit => ("unit", "Unit", 2),
    }
}

#[derive(Serialize, Deserialize)]
struct FieldObject<'a> {
    #[serde(borrow)]
    name: &'a RawValue,
    #[serde(borrow)]
    tpe: &'a RawValue,
}

pub(crate) fn write_type<A, E>(
    version: FormatVersion,
    encode: &E,
    tpe: &Type<A>,
) -> Result<Box<RawValue>>
where
    E: AttrEncoder<A> + ?Sized,
{
    ensure_sufficient_stack(|| write_type_node(version, encode, tpe))
}

fn write_type_node<A, E>(
    version: FormatVersion,
    encode: &E,
    tpe: &Type<A>,
) -> Result<Box<RawValue>>
where
    E: AttrEncoder<A> + ?Sized,
{
    let attrs = |a: &A| write_attrs(encode, a).context("encode Type attributes");
    let child = |t: &Type<A>| write_type(version, encode, t);

    match tpe {
        Type::Variable(a, name) => {
            write_node(TypeKind::Variable, version, vec![attrs(a)?, write_name(name)?])
        }
        Type::Reference(a, fqname, params) => write_node(
            TypeKind::Reference,
            version,
            vec![
                attrs(a)?,
                write_fqname(fqname)?,
                write_list(params, "type argument", child).context("encode Reference")?,
            ],
        ),
        Type::Tuple(a, elements) => write_node(
            TypeKind::Tuple,
            version,
            vec![
                attrs(a)?,
                write_list(elements, "element", child).context("encode Tuple")?,
            ],
        ),
        Type::Record(a, fields) => write_node(
            TypeKind::Record,
            version,
            vec![attrs(a)?, write_fields(version, encode, fields).context("encode Record")?],
        ),
        Type::ExtensibleRecord(a, variable, fields) => write_node(
            TypeKind::ExtensibleRecord,
            version,
            vec![
                attrs(a)?,
                write_name(variable)?,
                write_fields(version, encode, fields).context("encode ExtensibleRecord")?,
            ],
        ),
        Type::Function(a, argument, result) => write_node(
            TypeKind::Function,
            version,
            vec![
                attrs(a)?,
                child(argument.as_ref()).context("encode Function argument")?,
                child(result.as_ref()).context("encode Function result")?,
            ],
        ),
        Type::Unit(a) => write_node(TypeKind::Unit, version, vec![attrs(a)?]),
    }
}

fn write_fields<A, E>(
    version: FormatVersion,
    encode: &E,
    fields: &[Field<A>],
) -> Result<Box<RawValue>>
where
    E: AttrEncoder<A> + ?Sized,
{
    write_list(fields, "field", |field| {
        let name = write_name(&field.name)?;
        let tpe = write_type(version, encode, &field.tpe)?;
        match version {
            FormatVersion::V1 => to_raw(&[name, tpe]),
            FormatVersion::V2 | FormatVersion::V3 => to_raw(&FieldObject {
                name: &name,
                tpe: &tpe,
            }),
        }
    })
}

pub(crate) fn read_type<A, D>(version: FormatVersion, decode: &D, raw: &RawValue) -> Result<Type<A>>
where
    D: AttrDecoder<A> + ?Sized,
{
    ensure_sufficient_stack(|| read_type_node(version, decode, raw))
}

fn read_type_node<A, D>(version: FormatVersion, decode: &D, raw: &RawValue) -> Result<Type<A>>
where
    D: AttrDecoder<A> + ?Sized,
{
    let (kind, items) = parse_node::<TypeKind>(raw, version)?;
    let attrs = read_attrs(decode, items[1]).context("decode Type attributes")?;
    let child = |raw: &RawValue| read_type(version, decode, raw);

    let tpe = match kind {
        TypeKind::Variable => {
            Type::Variable(attrs, read_name(items[2]).context("decode Variable name")?)
        }
        TypeKind::Reference => Type::Reference(
            attrs,
            read_fqname(items[2]).context("decode Reference name")?,
            read_list(items[3], "type argument", child).context("decode Reference")?,
        ),
        TypeKind::Tuple => Type::Tuple(
            attrs,
            read_list(items[2], "element", child).context("decode Tuple")?,
        ),
        TypeKind::Record => Type::Record(
            attrs,
            read_fields(version, decode, items[2]).context("decode Record")?,
        ),
        TypeKind::ExtensibleRecord => Type::ExtensibleRecord(
            attrs,
            read_name(items[2]).context("decode ExtensibleRecord variable")?,
            read_fields(version, decode, items[3]).context("decode ExtensibleRecord")?,
        ),
        TypeKind::Function => Type::Function(
            attrs,
            Box::new(child(items[2]).context("decode Function argument")?),
            Box::new(child(items[3]).context("decode Function result")?),
        ),
        TypeKind::Unit => Type::Unit(attrs),
    };
    Ok(tpe)
}

fn read_fields<A, D>(version: FormatVersion, decode: &D, raw: &RawValue) -> Result<Vec<Field<A>>>
where
    D: AttrDecoder<A> + ?Sized,
{
    read_list(raw, "field", |item| {
        let (name, tpe) = match version {
            FormatVersion::V1 => {
                let [name, tpe] = parse_tuple::<2>(item, "field")?;
                (name, tpe)
            }
            FormatVersion::V2 | FormatVersion::V3 => {
                let object: FieldObject = parse_object(item, "field")?;
                (object.name, object.tpe)
            }
        };
        Ok(Field {
            name: read_name(name).context("decode field name")?,
            tpe: read_type(version, decode, tpe).context("decode field type")?,
        })
    })
}

// ----------------------------------------------------------------------------
// Type constructors: [[ctorName, [[argName, argType], ...]], ...]
// ----------------------------------------------------------------------------

pub(crate) fn write_constructors<A, E>(
    version: FormatVersion,
    encode: &E,
    ctors: &[Constructor<A>],
) -> Result<Box<RawValue>>
where
    E: AttrEncoder<A> + ?Sized,
{
    write_list(ctors, "constructor", |ctor| {
        let args = write_list(&ctor.args, "argument", |(name, tpe)| {
            to_raw(&[write_name(name)?, write_type(version, encode, tpe)?])
        })?;
        to_raw(&[write_name(&ctor.name)?, args])
    })
}

pub(crate) fn read_constructors<A, D>(
    version: FormatVersion,
    decode: &D,
    raw: &RawValue,
) -> Result<TypeConstructors<A>>
where
    D: AttrDecoder<A> + ?Sized,
{
    read_list(raw, "constructor", |item| {
        let [name, args] = parse_tuple::<2>(item, "constructor")?;
        let args = read_list(args, "argument", |arg| {
            let [name, tpe] = parse_tuple::<2>(arg, "constructor argument")?;
            Ok((
                read_name(name).context("decode argument name")?,
                read_type(version, decode, tpe).context("decode argument type")?,
            ))
        })?;
        Ok(Constructor {
            name: read_name(name).context("decode constructor name")?,
            args,
        })
    })
}

// ----------------------------------------------------------------------------
// Entry points
// ----------------------------------------------------------------------------

pub fn encode_type<A, E>(options: &Options, encode_attrs: &E, tpe: &Type<A>) -> Result<Vec<u8>>
where
    E: AttrEncoder<A> + ?Sized,
{
    trace!(version = %options.format_version, "encode Type");
    Ok(into_bytes(write_type(options.format_version, encode_attrs, tpe)?))
}

pub fn decode_type<A, D>(options: &Options, decode_attrs: &D, data: &[u8]) -> Result<Type<A>>
where
    D: AttrDecoder<A> + ?Sized,
{
    trace!(version = %options.format_version, len = data.len(), "decode Type");
    read_type(options.format_version, decode_attrs, parse_root(options, data, "Type")?)
}

pub fn encode_type_constructors<A, E>(
    options: &Options,
    encode_attrs: &E,
    ctors: &[Constructor<A>],
) -> Result<Vec<u8>>
where
    E: AttrEncoder<A> + ?Sized,
{
    trace!(version = %options.format_version, count = ctors.len(), "encode TypeConstructors");
    Ok(into_bytes(write_constructors(options.format_version, encode_attrs, ctors)?))
}

pub fn decode_type_constructors<A, D>(
    options: &Options,
    decode_attrs: &D,
    data: &[u8],
) -> Result<TypeConstructors<A>>
where
    D: AttrDecoder<A> + ?Sized,
{
    trace!(version = %options.format_version, len = data.len(), "decode TypeConstructors");
    read_constructors(
        options.format_version,
        decode_attrs,
        parse_root(options, data, "TypeConstructors")?,
    )
}
