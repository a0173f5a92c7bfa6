//! Codec options.
//!
//! The format version is always chosen by the caller; the codec never guesses
//! it from the payload. Options can be built in code or loaded from JSON or
//! TOML, e.g. a `morphir.toml` section:
//!
//! ```toml
//! formatVersion = 2
//! maxDepth = 512
//! ```
//!
//! [`Options::config_schema`] describes that section as a JSON Schema.

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema, schema_for};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};

/// Classic IR wire schema generation.
///
/// Version 1 uses snake_case tags and array-shaped record fields and access
/// wrappers; versions 2 and 3 use PascalCase tags and object-shaped fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FormatVersion {
    V1,
    V2,
    #[default]
    V3,
}

impl FormatVersion {
    pub const ALL: [FormatVersion; 3] = [FormatVersion::V1, FormatVersion::V2, FormatVersion::V3];

    /// The `formatVersion` number written in distribution files.
    pub fn number(self) -> u32 {
        match self {
            FormatVersion::V1 => 1,
            FormatVersion::V2 => 2,
            FormatVersion::V3 => 3,
        }
    }

    pub fn from_number(number: u64) -> Option<Self> {
        match number {
            1 => Some(FormatVersion::V1),
            2 => Some(FormatVersion::V2),
            3 => Some(FormatVersion::V3),
            _ => None,
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl std::str::FromStr for FormatVersion {
    type Err = Error;

    /// Accepts `3`, `v3` and `V3`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix(['v', 'V'])
            .unwrap_or(trimmed);
        digits
            .parse::<u64>()
            .ok()
            .and_then(FormatVersion::from_number)
            .ok_or_else(|| Error::Parse {
                what: "format version",
                expected: "1, 2 or 3",
                input: s.to_string(),
            })
    }
}

impl Serialize for FormatVersion {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.number())
    }
}

impl<'de> Deserialize<'de> for FormatVersion {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FormatVersionVisitor;

        impl Visitor<'_> for FormatVersionVisitor {
            type Value = FormatVersion;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a format version 1, 2 or 3")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                FormatVersion::from_number(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
                u64::try_from(v)
                    .ok()
                    .and_then(FormatVersion::from_number)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                v.parse()
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(FormatVersionVisitor)
    }
}

impl JsonSchema for FormatVersion {
    fn schema_name() -> Cow<'static, str> {
        "FormatVersion".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "description": "Classic IR format version",
            "type": "integer",
            "enum": [1, 2, 3]
        })
    }
}

/// Options shared by every encode and decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    pub format_version: FormatVersion,
    /// Deepest array/object nesting a decoder accepts. `None` accepts any depth.
    ///
    /// Decoding splits each node's children out of its raw JSON, so the cost
    /// of a document grows with its size times its nesting depth. Callers
    /// reading untrusted input should set a limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Options {
    pub fn new(format_version: FormatVersion) -> Self {
        Self {
            format_version,
            max_depth: None,
        }
    }

    pub fn v1() -> Self {
        Self::new(FormatVersion::V1)
    }

    pub fn v2() -> Self {
        Self::new(FormatVersion::V2)
    }

    pub fn v3() -> Self {
        Self::new(FormatVersion::V3)
    }

    pub fn with_format_version(self, format_version: FormatVersion) -> Self {
        Self {
            format_version,
            ..self
        }
    }

    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..self
        }
    }

    /// JSON Schema for the options document, for editors validating config files.
    pub fn config_schema() -> Schema {
        schema_for!(Options)
    }

    /// Load options from a JSON document such as `{"formatVersion": 2}`.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load options from a TOML document such as `formatVersion = 2`.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
