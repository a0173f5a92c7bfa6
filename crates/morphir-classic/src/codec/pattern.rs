//! Pattern codec: `[tag, attrs, ...]`.

use serde_json::value::RawValue;
use tracing::trace;

use super::attributes::{AttrDecoder, AttrEncoder, read_attrs, write_attrs};
use super::literal::{read_literal, write_literal};
use super::naming::{read_fqname, read_name, write_fqname, write_name};
use super::options::{FormatVersion, Options};
use super::raw::{into_bytes, parse_node, parse_root, read_list, write_list, write_node};
use super::tags::versioned_tags;
use crate::error::{Result, ResultExt};
use crate::ir::Pattern;
use crate::stack::ensure_sufficient_stack;

versioned_tags! {
    enum PatternKind in "Pattern" {
        Wildcard => ("wildcard_pattern", "WildcardPattern", 2),
        As => ("as_pattern", "AsPattern", 4),
        Tuple => ("tuple_pattern", "TuplePattern", 3),
        Constructor => ("constructor_pattern", "ConstructorPattern", 4),
        EmptyList => ("empty_list_pattern", "EmptyListPattern", 2),
        HeadTail => ("head_tail_pattern", "HeadTailPattern", 4),
        Literal => ("literal_pattern", "LiteralPattern", 3),
        Unit => ("unit_pattern", "UnitPattern", 2),
    }
}

pub(crate) fn write_pattern<A, E>(
    version: FormatVersion,
    encode: &E,
    pattern: &Pattern<A>,
) -> Result<Box<RawValue>>
where
    E: AttrEncoder<A> + ?Sized,
{
    ensure_sufficient_stack(|| write_pattern_node(version, encode, pattern))
}

fn write_pattern_node<A, E>(
    version: FormatVersion,
    encode: &E,
    pattern: &Pattern<A>,
) -> Result<Box<RawValue>>
where
    E: AttrEncoder<A> + ?Sized,
{
    let attrs = |a: &A| write_attrs(encode, a).context("encode Pattern attributes");
    let child = |p: &Pattern<A>| write_pattern(version, encode, p);

    match pattern {
        Pattern::Wildcard(a) => write_node(PatternKind::Wildcard, version, vec![attrs(a)?]),
        Pattern::As(a, subject, name) => write_node(
            PatternKind::As,
            version,
            vec![
                attrs(a)?,
                child(subject.as_ref()).context("encode AsPattern subject")?,
                write_name(name)?,
            ],
        ),
        Pattern::Tuple(a, elements) => write_node(
            PatternKind::Tuple,
            version,
            vec![
                attrs(a)?,
                write_list(elements, "element", child).context("encode TuplePattern")?,
            ],
        ),
        Pattern::Constructor(a, fqname, args) => write_node(
            PatternKind::Constructor,
            version,
            vec![
                attrs(a)?,
                write_fqname(fqname)?,
                write_list(args, "argument", child).context("encode ConstructorPattern")?,
            ],
        ),
        Pattern::EmptyList(a) => write_node(PatternKind::EmptyList, version, vec![attrs(a)?]),
        Pattern::HeadTail(a, head, tail) => write_node(
            PatternKind::HeadTail,
            version,
            vec![
                attrs(a)?,
                child(head.as_ref()).context("encode HeadTailPattern head")?,
                child(tail.as_ref()).context("encode HeadTailPattern tail")?,
            ],
        ),
        Pattern::Literal(a, literal) => write_node(
            PatternKind::Literal,
            version,
            vec![
                attrs(a)?,
                write_literal(version, literal).context("encode LiteralPattern")?,
            ],
        ),
        Pattern::Unit(a) => write_node(PatternKind::Unit, version, vec![attrs(a)?]),
    }
}

pub(crate) fn read_pattern<A, D>(
    version: FormatVersion,
    decode: &D,
    raw: &RawValue,
) -> Result<Pattern<A>>
where
    D: AttrDecoder<A> + ?Sized,
{
    ensure_sufficient_stack(|| read_pattern_node(version, decode, raw))
}

fn read_pattern_node<A, D>(
    version: FormatVersion,
    decode: &D,
    raw: &RawValue,
) -> Result<Pattern<A>>
where
    D: AttrDecoder<A> + ?Sized,
{
    let (kind, items) = parse_node::<PatternKind>(raw, version)?;
    let attrs = read_attrs(decode, items[1]).context("decode Pattern attributes")?;
    let child = |raw: &RawValue| read_pattern(version, decode, raw);

    let pattern = match kind {
        PatternKind::Wildcard => Pattern::Wildcard(attrs),
        PatternKind::As => Pattern::As(
            attrs,
            Box::new(child(items[2]).context("decode AsPattern subject")?),
            read_name(items[3]).context("decode AsPattern name")?,
        ),
        PatternKind::Tuple => Pattern::Tuple(
            attrs,
            read_list(items[2], "element", child).context("decode TuplePattern")?,
        ),
        PatternKind::Constructor => Pattern::Constructor(
            attrs,
            read_fqname(items[2]).context("decode ConstructorPattern name")?,
            read_list(items[3], "argument", child).context("decode ConstructorPattern")?,
        ),
        PatternKind::EmptyList => Pattern::EmptyList(attrs),
        PatternKind::HeadTail => Pattern::HeadTail(
            attrs,
            Box::new(child(items[2]).context("decode HeadTailPattern head")?),
            Box::new(child(items[3]).context("decode HeadTailPattern tail")?),
        ),
        PatternKind::Literal => Pattern::Literal(
            attrs,
            read_literal(version, items[2]).context("decode LiteralPattern")?,
        ),
        PatternKind::Unit => Pattern::Unit(attrs),
    };
    Ok(pattern)
}

pub fn encode_pattern<A, E>(options: &Options, encode_attrs: &E, pattern: &Pattern<A>) -> Result<Vec<u8>>
where
    E: AttrEncoder<A> + ?Sized,
{
    trace!(version = %options.format_version, "encode Pattern");
    Ok(into_bytes(write_pattern(options.format_version, encode_attrs, pattern)?))
}

pub fn decode_pattern<A, D>(options: &Options, decode_attrs: &D, data: &[u8]) -> Result<Pattern<A>>
where
    D: AttrDecoder<A> + ?Sized,
{
    trace!(version = %options.format_version, len = data.len(), "decode Pattern");
    read_pattern(options.format_version, decode_attrs, parse_root(options, data, "Pattern")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::SerdeAttrs;
    use crate::error::Error;
    use crate::ir::Literal;
    use crate::naming::Name;
    use rstest::rstest;

    #[rstest]
    #[case(FormatVersion::V1, r#"["wildcard_pattern",1]"#)]
    #[case(FormatVersion::V2, r#"["WildcardPattern",1]"#)]
    #[case(FormatVersion::V3, r#"["WildcardPattern",1]"#)]
    fn test_wildcard_tag(#[case] version: FormatVersion, #[case] expected: &str) {
        let options = Options::new(version);
        let bytes = encode_pattern(&options, &SerdeAttrs, &Pattern::Wildcard(1u32)).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), expected);
    }

    #[test]
    fn test_as_pattern_layout() -> anyhow::Result<()> {
        let pattern = Pattern::as_pattern(
            0u32,
            Pattern::Literal(1, Literal::WholeNumber(5)),
            Name::from_str("five"),
        );
        let bytes = encode_pattern(&Options::v2(), &SerdeAttrs, &pattern)?;
        assert_eq!(
            String::from_utf8(bytes.clone())?,
            r#"["AsPattern",0,["LiteralPattern",1,["WholeNumberLiteral",5]],["five"]]"#
        );
        assert_eq!(decode_pattern(&Options::v2(), &SerdeAttrs, &bytes)?, pattern);
        Ok(())
    }

    #[test]
    fn test_unit_pattern_arity() {
        let options = Options::v3();
        assert!(decode_pattern::<u32, _>(&options, &SerdeAttrs, br#"["UnitPattern",0]"#).is_ok());
        let err = decode_pattern::<u32, _>(&options, &SerdeAttrs, br#"["UnitPattern",0,1]"#)
            .unwrap_err();
        assert!(matches!(err, Error::Arity { expected: 2, actual: 3, .. }));
    }

    #[test]
    fn test_nested_failure_names_the_path() {
        let payload = br#"["HeadTailPattern",0,["WildcardPattern",0],["TuplePattern",0,[["UnitPattern"]]]]"#;
        let err = decode_pattern::<u32, _>(&Options::v3(), &SerdeAttrs, payload).unwrap_err();
        assert_eq!(
            err.to_string(),
            "decode HeadTailPattern tail: decode TuplePattern: element 0: \
             expected Pattern array [tag, ...] with at least 2 elements, got 1"
        );
    }
}
