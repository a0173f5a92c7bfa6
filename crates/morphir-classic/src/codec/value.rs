//! Value codec: `[tag, attrs, ...]`.
//!
//! Values carry two attribute coders. The value attribute coder is used for
//! every value and pattern node; the type attribute coder is used for the types
//! inside let definitions. Value definitions and value specifications are JSON
//! objects in every format version:
//!
//! ```text
//! {"inputTypes": [[name, attrs, type], ...], "outputType": type, "body": value}
//! {"inputs": [[name, type], ...], "output": type}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use tracing::trace;

use super::attributes::{AttrDecoder, AttrEncoder, read_attrs, write_attrs};
use super::literal::{read_literal, write_literal};
use super::naming::{read_fqname, read_name, write_fqname, write_name};
use super::options::{FormatVersion, Options};
use super::pattern::{read_pattern, write_pattern};
use super::raw::{
    into_bytes, parse_node, parse_object, parse_root, parse_tuple, read_list, to_raw, write_list,
    write_node,
};
use super::tags::versioned_tags;
use super::types::{read_type, write_type};
use crate::error::{Result, ResultExt};
use crate::ir::{Pattern, Value, ValueDefinition, ValueSpecification};
use crate::naming::Name;
use crate::stack::ensure_sufficient_stack;

versioned_tags! {
    enum ValueKind in "Value" {
        Literal => ("literal", "Literal", 3),
        Constructor => ("constructor", "Constructor", 3),
        Tuple => ("tuple", "Tuple", 3),
        List => ("list", "List", 3),
        Record => ("record", "Record", 3),
        Variable => ("variable", "Variable", 3),
        Reference => ("reference", "Reference", 3),
        Field => ("field", "Field", 4),
        FieldFunction => ("field_function", "FieldFunction", 3),
        Apply => ("apply", "Apply", 4),
        Lambda => ("lambda", "Lambda", 4),
        LetDefinition => ("let_definition", "LetDefinition", 5),
        LetRecursion => ("let_recursion", "LetRecursion", 4),
        Destructure => ("destructure", "Destructure", 5),
        IfThenElse => ("if_then_else", "IfThenElse", 5),
        PatternMatch => ("pattern_match", "PatternMatch", 4),
        UpdateRecord => ("update_record", "UpdateRecord", 4),
        Unit => ("unit", "Unit", 2),
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DefinitionObject<'a> {
    #[serde(borrow)]
    input_types: &'a RawValue,
    #[serde(borrow)]
    output_type: &'a RawValue,
    #[serde(borrow)]
    body: &'a RawValue,
}

#[derive(Serialize, Deserialize)]
struct SpecificationObject<'a> {
    #[serde(borrow)]
    inputs: &'a RawValue,
    #[serde(borrow)]
    output: &'a RawValue,
}

/// The two attribute encoders a value needs, bundled so the recursion passes
/// one reference.
struct Encoders<'e, ET: ?Sized, EV: ?Sized> {
    version: FormatVersion,
    ta: &'e ET,
    va: &'e EV,
}

impl<ET: ?Sized, EV: ?Sized> Clone for Encoders<'_, ET, EV> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<ET: ?Sized, EV: ?Sized> Copy for Encoders<'_, ET, EV> {}

struct Decoders<'d, DT: ?Sized, DV: ?Sized> {
    version: FormatVersion,
    ta: &'d DT,
    va: &'d DV,
}

impl<DT: ?Sized, DV: ?Sized> Clone for Decoders<'_, DT, DV> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<DT: ?Sized, DV: ?Sized> Copy for Decoders<'_, DT, DV> {}

// ----------------------------------------------------------------------------
// Encoding
// ----------------------------------------------------------------------------

impl<ET: ?Sized, EV: ?Sized> Encoders<'_, ET, EV> {
    fn value<TA, VA>(self, value: &Value<TA, VA>) -> Result<Box<RawValue>>
    where
        ET: AttrEncoder<TA>,
        EV: AttrEncoder<VA>,
    {
        ensure_sufficient_stack(|| self.value_node(value))
    }

    fn value_node<TA, VA>(self, value: &Value<TA, VA>) -> Result<Box<RawValue>>
    where
        ET: AttrEncoder<TA>,
        EV: AttrEncoder<VA>,
    {
        let version = self.version;
        let attrs = |a: &VA| write_attrs(self.va, a).context("encode Value attributes");
        let child = |v: &Value<TA, VA>| self.value(v);

        match value {
            Value::Literal(a, literal) => write_node(
                ValueKind::Literal,
                version,
                vec![attrs(a)?, write_literal(version, literal).context("encode Literal")?],
            ),
            Value::Constructor(a, fqname) => write_node(
                ValueKind::Constructor,
                version,
                vec![attrs(a)?, write_fqname(fqname)?],
            ),
            Value::Tuple(a, elements) => write_node(
                ValueKind::Tuple,
                version,
                vec![
                    attrs(a)?,
                    write_list(elements, "element", child).context("encode Tuple")?,
                ],
            ),
            Value::List(a, items) => write_node(
                ValueKind::List,
                version,
                vec![attrs(a)?, write_list(items, "item", child).context("encode List")?],
            ),
            Value::Record(a, fields) => write_node(
                ValueKind::Record,
                version,
                vec![attrs(a)?, self.named_values(fields).context("encode Record")?],
            ),
            Value::Variable(a, name) => {
                write_node(ValueKind::Variable, version, vec![attrs(a)?, write_name(name)?])
            }
            Value::Reference(a, fqname) => write_node(
                ValueKind::Reference,
                version,
                vec![attrs(a)?, write_fqname(fqname)?],
            ),
            Value::Field(a, subject, name) => write_node(
                ValueKind::Field,
                version,
                vec![
                    attrs(a)?,
                    child(subject.as_ref()).context("encode Field subject")?,
                    write_name(name)?,
                ],
            ),
            Value::FieldFunction(a, name) => {
                write_node(ValueKind::FieldFunction, version, vec![attrs(a)?, write_name(name)?])
            }
            Value::Apply(a, function, argument) => write_node(
                ValueKind::Apply,
                version,
                vec![
                    attrs(a)?,
                    child(function.as_ref()).context("encode Apply function")?,
                    child(argument.as_ref()).context("encode Apply argument")?,
                ],
            ),
            Value::Lambda(a, argument, body) => write_node(
                ValueKind::Lambda,
                version,
                vec![
                    attrs(a)?,
                    self.pattern(argument).context("encode Lambda argument")?,
                    child(body.as_ref()).context("encode Lambda body")?,
                ],
            ),
            Value::LetDefinition(a, name, definition, in_value) => write_node(
                ValueKind::LetDefinition,
                version,
                vec![
                    attrs(a)?,
                    write_name(name)?,
                    self.definition(definition).context("encode LetDefinition definition")?,
                    child(in_value.as_ref()).context("encode LetDefinition inValue")?,
                ],
            ),
            Value::LetRecursion(a, definitions, in_value) => {
                let definitions = write_list(definitions, "definition", |(name, definition)| {
                    to_raw(&[write_name(name)?, self.definition(definition)?])
                })
                .context("encode LetRecursion definitions")?;
                write_node(
                    ValueKind::LetRecursion,
                    version,
                    vec![
                        attrs(a)?,
                        definitions,
                        child(in_value.as_ref()).context("encode LetRecursion inValue")?,
                    ],
                )
            }
            Value::Destructure(a, pattern, value, in_value) => write_node(
                ValueKind::Destructure,
                version,
                vec![
                    attrs(a)?,
                    self.pattern(pattern).context("encode Destructure pattern")?,
                    child(value.as_ref()).context("encode Destructure value")?,
                    child(in_value.as_ref()).context("encode Destructure inValue")?,
                ],
            ),
            Value::IfThenElse(a, condition, then_branch, else_branch) => write_node(
                ValueKind::IfThenElse,
                version,
                vec![
                    attrs(a)?,
                    child(condition.as_ref()).context("encode IfThenElse condition")?,
                    child(then_branch.as_ref()).context("encode IfThenElse then")?,
                    child(else_branch.as_ref()).context("encode IfThenElse else")?,
                ],
            ),
            Value::PatternMatch(a, subject, cases) => {
                let cases = write_list(cases, "case", |(pattern, body)| {
                    to_raw(&[
                        self.pattern(pattern).context("encode case pattern")?,
                        child(body).context("encode case body")?,
                    ])
                })
                .context("encode PatternMatch cases")?;
                write_node(
                    ValueKind::PatternMatch,
                    version,
                    vec![
                        attrs(a)?,
                        child(subject.as_ref()).context("encode PatternMatch subject")?,
                        cases,
                    ],
                )
            }
            Value::UpdateRecord(a, subject, fields) => write_node(
                ValueKind::UpdateRecord,
                version,
                vec![
                    attrs(a)?,
                    child(subject.as_ref()).context("encode UpdateRecord value")?,
                    self.named_values(fields).context("encode UpdateRecord fields")?,
                ],
            ),
            Value::Unit(a) => write_node(ValueKind::Unit, version, vec![attrs(a)?]),
        }
    }

    fn pattern<VA>(self, pattern: &Pattern<VA>) -> Result<Box<RawValue>>
    where
        EV: AttrEncoder<VA>,
    {
        write_pattern(self.version, self.va, pattern)
    }

    /// `[[name, value], ...]`
    fn named_values<TA, VA>(self, fields: &[(Name, Value<TA, VA>)]) -> Result<Box<RawValue>>
    where
        ET: AttrEncoder<TA>,
        EV: AttrEncoder<VA>,
    {
        write_list(fields, "field", |(name, value)| {
            to_raw(&[write_name(name)?, self.value(value)?])
        })
    }

    fn definition<TA, VA>(self, definition: &ValueDefinition<TA, VA>) -> Result<Box<RawValue>>
    where
        ET: AttrEncoder<TA>,
        EV: AttrEncoder<VA>,
    {
        let version = self.version;
        let input_types = write_list(&definition.input_types, "input", |(name, a, tpe)| {
            to_raw(&[
                write_name(name)?,
                write_attrs(self.va, a).context("encode input attributes")?,
                write_type(version, self.ta, tpe).context("encode input type")?,
            ])
        })
        .context("encode ValueDefinition inputTypes")?;
        let output_type = write_type(version, self.ta, &definition.output_type)
            .context("encode ValueDefinition outputType")?;
        let body = self
            .value(&definition.body)
            .context("encode ValueDefinition body")?;
        to_raw(&DefinitionObject {
            input_types: &input_types,
            output_type: &output_type,
            body: &body,
        })
    }
}

// ----------------------------------------------------------------------------
// Decoding
// ----------------------------------------------------------------------------

impl<DT: ?Sized, DV: ?Sized> Decoders<'_, DT, DV> {
    fn value<TA, VA>(self, raw: &RawValue) -> Result<Value<TA, VA>>
    where
        DT: AttrDecoder<TA>,
        DV: AttrDecoder<VA>,
    {
        ensure_sufficient_stack(|| self.value_node(raw))
    }

    fn value_node<TA, VA>(self, raw: &RawValue) -> Result<Value<TA, VA>>
    where
        DT: AttrDecoder<TA>,
        DV: AttrDecoder<VA>,
    {
        let (kind, items) = parse_node::<ValueKind>(raw, self.version)?;
        let attrs = read_attrs(self.va, items[1]).context("decode Value attributes")?;
        let child = |raw: &RawValue| self.value(raw);
        let boxed = |raw: &RawValue, context: &'static str| -> Result<Box<Value<TA, VA>>> {
            Ok(Box::new(self.value(raw).context(context)?))
        };

        let value = match kind {
            ValueKind::Literal => Value::Literal(
                attrs,
                read_literal(self.version, items[2]).context("decode Literal")?,
            ),
            ValueKind::Constructor => Value::Constructor(
                attrs,
                read_fqname(items[2]).context("decode Constructor name")?,
            ),
            ValueKind::Tuple => Value::Tuple(
                attrs,
                read_list(items[2], "element", child).context("decode Tuple")?,
            ),
            ValueKind::List => {
                Value::List(attrs, read_list(items[2], "item", child).context("decode List")?)
            }
            ValueKind::Record => Value::Record(
                attrs,
                self.named_values(items[2]).context("decode Record")?,
            ),
            ValueKind::Variable => {
                Value::Variable(attrs, read_name(items[2]).context("decode Variable name")?)
            }
            ValueKind::Reference => Value::Reference(
                attrs,
                read_fqname(items[2]).context("decode Reference name")?,
            ),
            ValueKind::Field => Value::Field(
                attrs,
                boxed(items[2], "decode Field subject")?,
                read_name(items[3]).context("decode Field name")?,
            ),
            ValueKind::FieldFunction => Value::FieldFunction(
                attrs,
                read_name(items[2]).context("decode FieldFunction name")?,
            ),
            ValueKind::Apply => Value::Apply(
                attrs,
                boxed(items[2], "decode Apply function")?,
                boxed(items[3], "decode Apply argument")?,
            ),
            ValueKind::Lambda => Value::Lambda(
                attrs,
                self.pattern(items[2]).context("decode Lambda argument")?,
                boxed(items[3], "decode Lambda body")?,
            ),
            ValueKind::LetDefinition => Value::LetDefinition(
                attrs,
                read_name(items[2]).context("decode LetDefinition name")?,
                Box::new(
                    self.definition(items[3])
                        .context("decode LetDefinition definition")?,
                ),
                boxed(items[4], "decode LetDefinition inValue")?,
            ),
            ValueKind::LetRecursion => {
                let definitions = read_list(items[2], "definition", |item| {
                    let [name, definition] = parse_tuple::<2>(item, "let definition")?;
                    Ok((
                        read_name(name).context("decode definition name")?,
                        self.definition(definition)?,
                    ))
                })
                .context("decode LetRecursion definitions")?;
                Value::LetRecursion(
                    attrs,
                    definitions,
                    boxed(items[3], "decode LetRecursion inValue")?,
                )
            }
            ValueKind::Destructure => Value::Destructure(
                attrs,
                self.pattern(items[2]).context("decode Destructure pattern")?,
                boxed(items[3], "decode Destructure value")?,
                boxed(items[4], "decode Destructure inValue")?,
            ),
            ValueKind::IfThenElse => Value::IfThenElse(
                attrs,
                boxed(items[2], "decode IfThenElse condition")?,
                boxed(items[3], "decode IfThenElse then")?,
                boxed(items[4], "decode IfThenElse else")?,
            ),
            ValueKind::PatternMatch => {
                let subject = boxed(items[2], "decode PatternMatch subject")?;
                let cases = read_list(items[3], "case", |item| {
                    let [pattern, body] = parse_tuple::<2>(item, "case")?;
                    Ok((
                        self.pattern(pattern).context("decode case pattern")?,
                        self.value(body).context("decode case body")?,
                    ))
                })
                .context("decode PatternMatch cases")?;
                Value::PatternMatch(attrs, subject, cases)
            }
            ValueKind::UpdateRecord => Value::UpdateRecord(
                attrs,
                boxed(items[2], "decode UpdateRecord value")?,
                self.named_values(items[3])
                    .context("decode UpdateRecord fields")?,
            ),
            ValueKind::Unit => Value::Unit(attrs),
        };
        Ok(value)
    }

    fn pattern<VA>(self, raw: &RawValue) -> Result<Pattern<VA>>
    where
        DV: AttrDecoder<VA>,
    {
        read_pattern(self.version, self.va, raw)
    }

    fn named_values<TA, VA>(self, raw: &RawValue) -> Result<Vec<(Name, Value<TA, VA>)>>
    where
        DT: AttrDecoder<TA>,
        DV: AttrDecoder<VA>,
    {
        read_list(raw, "field", |item| {
            let [name, value] = parse_tuple::<2>(item, "field")?;
            Ok((
                read_name(name).context("decode field name")?,
                self.value(value).context("decode field value")?,
            ))
        })
    }

    fn definition<TA, VA>(self, raw: &RawValue) -> Result<ValueDefinition<TA, VA>>
    where
        DT: AttrDecoder<TA>,
        DV: AttrDecoder<VA>,
    {
        let version = self.version;
        let object: DefinitionObject = parse_object(raw, "ValueDefinition")?;
        let input_types = read_list(object.input_types, "input", |item| {
            let [name, a, tpe] = parse_tuple::<3>(item, "input")?;
            Ok((
                read_name(name).context("decode input name")?,
                read_attrs(self.va, a).context("decode input attributes")?,
                read_type(version, self.ta, tpe).context("decode input type")?,
            ))
        })
        .context("decode ValueDefinition inputTypes")?;
        Ok(ValueDefinition {
            input_types,
            output_type: read_type(version, self.ta, object.output_type)
                .context("decode ValueDefinition outputType")?,
            body: self
                .value(object.body)
                .context("decode ValueDefinition body")?,
        })
    }
}

pub(crate) fn write_value_definition<TA, VA, ET, EV>(
    version: FormatVersion,
    encode_ta: &ET,
    encode_va: &EV,
    definition: &ValueDefinition<TA, VA>,
) -> Result<Box<RawValue>>
where
    ET: AttrEncoder<TA> + ?Sized,
    EV: AttrEncoder<VA> + ?Sized,
{
    Encoders {
        version,
        ta: encode_ta,
        va: encode_va,
    }
    .definition(definition)
}

pub(crate) fn read_value_definition<TA, VA, DT, DV>(
    version: FormatVersion,
    decode_ta: &DT,
    decode_va: &DV,
    raw: &RawValue,
) -> Result<ValueDefinition<TA, VA>>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    Decoders {
        version,
        ta: decode_ta,
        va: decode_va,
    }
    .definition(raw)
}

pub(crate) fn write_value_specification<TA, E>(
    version: FormatVersion,
    encode: &E,
    spec: &ValueSpecification<TA>,
) -> Result<Box<RawValue>>
where
    E: AttrEncoder<TA> + ?Sized,
{
    let inputs = write_list(&spec.inputs, "input", |(name, tpe)| {
        to_raw(&[write_name(name)?, write_type(version, encode, tpe)?])
    })
    .context("encode ValueSpecification inputs")?;
    let output =
        write_type(version, encode, &spec.output).context("encode ValueSpecification output")?;
    to_raw(&SpecificationObject {
        inputs: &inputs,
        output: &output,
    })
}

pub(crate) fn read_value_specification<TA, D>(
    version: FormatVersion,
    decode: &D,
    raw: &RawValue,
) -> Result<ValueSpecification<TA>>
where
    D: AttrDecoder<TA> + ?Sized,
{
    let object: SpecificationObject = parse_object(raw, "ValueSpecification")?;
    let inputs = read_list(object.inputs, "input", |item| {
        let [name, tpe] = parse_tuple::<2>(item, "input")?;
        Ok((
            read_name(name).context("decode input name")?,
            read_type(version, decode, tpe).context("decode input type")?,
        ))
    })
    .context("decode ValueSpecification inputs")?;
    Ok(ValueSpecification {
        inputs,
        output: read_type(version, decode, object.output)
            .context("decode ValueSpecification output")?,
    })
}

// ----------------------------------------------------------------------------
// Entry points
// ----------------------------------------------------------------------------

pub fn encode_value<TA, VA, ET, EV>(
    options: &Options,
    encode_ta: &ET,
    encode_va: &EV,
    value: &Value<TA, VA>,
) -> Result<Vec<u8>>
where
    ET: AttrEncoder<TA> + ?Sized,
    EV: AttrEncoder<VA> + ?Sized,
{
    trace!(version = %options.format_version, "encode Value");
    let encoders = Encoders {
        version: options.format_version,
        ta: encode_ta,
        va: encode_va,
    };
    Ok(into_bytes(encoders.value(value)?))
}

pub fn decode_value<TA, VA, DT, DV>(
    options: &Options,
    decode_ta: &DT,
    decode_va: &DV,
    data: &[u8],
) -> Result<Value<TA, VA>>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    trace!(version = %options.format_version, len = data.len(), "decode Value");
    let decoders = Decoders {
        version: options.format_version,
        ta: decode_ta,
        va: decode_va,
    };
    decoders.value(parse_root(options, data, "Value")?)
}

pub fn encode_value_definition<TA, VA, ET, EV>(
    options: &Options,
    encode_ta: &ET,
    encode_va: &EV,
    definition: &ValueDefinition<TA, VA>,
) -> Result<Vec<u8>>
where
    ET: AttrEncoder<TA> + ?Sized,
    EV: AttrEncoder<VA> + ?Sized,
{
    trace!(version = %options.format_version, "encode ValueDefinition");
    Ok(into_bytes(write_value_definition(
        options.format_version,
        encode_ta,
        encode_va,
        definition,
    )?))
}

pub fn decode_value_definition<TA, VA, DT, DV>(
    options: &Options,
    decode_ta: &DT,
    decode_va: &DV,
    data: &[u8],
) -> Result<ValueDefinition<TA, VA>>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    trace!(version = %options.format_version, len = data.len(), "decode ValueDefinition");
    read_value_definition(
        options.format_version,
        decode_ta,
        decode_va,
        parse_root(options, data, "ValueDefinition")?,
    )
}

pub fn encode_value_specification<TA, E>(
    options: &Options,
    encode_attrs: &E,
    spec: &ValueSpecification<TA>,
) -> Result<Vec<u8>>
where
    E: AttrEncoder<TA> + ?Sized,
{
    trace!(version = %options.format_version, "encode ValueSpecification");
    Ok(into_bytes(write_value_specification(
        options.format_version,
        encode_attrs,
        spec,
    )?))
}

pub fn decode_value_specification<TA, D>(
    options: &Options,
    decode_attrs: &D,
    data: &[u8],
) -> Result<ValueSpecification<TA>>
where
    D: AttrDecoder<TA> + ?Sized,
{
    trace!(version = %options.format_version, len = data.len(), "decode ValueSpecification");
    read_value_specification(
        options.format_version,
        decode_attrs,
        parse_root(options, data, "ValueSpecification")?,
    )
}
