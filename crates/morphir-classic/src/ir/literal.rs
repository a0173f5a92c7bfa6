//! Literal values shared by patterns and values.

use crate::error::{Error, Result};
use std::fmt;

/// Literal values - encoded as [tag, value]
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Char(char),
    String(String),
    WholeNumber(i64),
    Float(f64),
    Decimal(Decimal),
}

impl Literal {
    /// Parses and validates a decimal literal.
    pub fn decimal(text: impl Into<String>) -> Result<Self> {
        Decimal::new(text).map(Literal::Decimal)
    }
}

/// Arbitrary precision decimal kept in its source spelling.
///
/// Any text that reads as a rational number is accepted: `-12`, `3.14`, `.5`,
/// `1e-9`, `6.02E23` or `1/3`. The text is never normalized, so `"1.50"` stays
/// `"1.50"` through a decode and re-encode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal(String);

impl Decimal {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if is_rational(&text) {
            Ok(Decimal(text))
        } else {
            Err(Error::Invalid {
                what: "decimal",
                reason: format!("{text:?} is not a decimal number"),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Decimal::new(s)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_rational(text: &str) -> bool {
    match text.split_once('/') {
        Some((numerator, denominator)) => {
            is_integer(numerator)
                && is_unsigned_digits(denominator)
                && denominator.bytes().any(|b| b != b'0')
        }
        None => is_float(text),
    }
}

fn strip_sign(text: &str) -> &str {
    text.strip_prefix(['+', '-']).unwrap_or(text)
}

fn is_unsigned_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn is_integer(text: &str) -> bool {
    is_unsigned_digits(strip_sign(text))
}

fn is_float(text: &str) -> bool {
    let unsigned = strip_sign(text);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };
    let mantissa_ok = match mantissa.split_once('.') {
        Some((whole, fraction)) => {
            (whole.is_empty() || is_unsigned_digits(whole))
                && (fraction.is_empty() || is_unsigned_digits(fraction))
                && !(whole.is_empty() && fraction.is_empty())
        }
        None => is_unsigned_digits(mantissa),
    };
    mantissa_ok && exponent.is_none_or(is_integer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0")]
    #[case("-12")]
    #[case("+7")]
    #[case("3.14")]
    #[case("1.50")]
    #[case(".5")]
    #[case("5.")]
    #[case("1e-9")]
    #[case("6.02E23")]
    #[case("1/3")]
    #[case("-22/7")]
    fn test_decimal_accepts(#[case] text: &str) {
        let decimal = Decimal::new(text).unwrap();
        assert_eq!(decimal.as_str(), text);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1.2.3")]
    #[case(".")]
    #[case("1e")]
    #[case("1/0")]
    #[case("1/-2")]
    #[case("--1")]
    #[case("1 ")]
    fn test_decimal_rejects(#[case] text: &str) {
        assert!(matches!(
            Decimal::new(text),
            Err(Error::Invalid { what: "decimal", .. })
        ));
    }

    #[test]
    fn test_decimal_literal_helper() {
        assert_eq!(
            Literal::decimal("1.50").unwrap(),
            Literal::Decimal("1.50".parse().unwrap())
        );
        assert!(Literal::decimal("one").is_err());
    }
}
