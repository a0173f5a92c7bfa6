//! QName - a local name qualified by its module path

use super::name::Name;
use super::path::Path;
use super::invalid_part;
use crate::error::Error;
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Qualified name, serialized as [module_path, local_name]
///
/// The string form is `Module.Path:localName`: module segments in TitleCase
/// joined by `.`, and the local name in camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub module_path: Path,
    pub local_name: Name,
}

impl QName {
    pub fn new(module_path: Path, local_name: Name) -> Self {
        Self {
            module_path,
            local_name,
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.module_path.to_string_with(Name::to_title_case, "."),
            self.local_name.to_camel_case()
        )
    }
}

impl std::str::FromStr for QName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split(':').collect::<Vec<_>>().as_slice() {
            [module_path, local_name] => Ok(QName {
                module_path: Path::from_str(module_path),
                local_name: Name::from_str(local_name),
            }),
            _ => Err(Error::Parse {
                what: "QName",
                expected: "ModulePath:localName",
                input: s.to_string(),
            }),
        }
    }
}

impl Serialize for QName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.module_path)?;
        tuple.serialize_element(&self.local_name)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for QName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct QNameVisitor;

        impl<'de> Visitor<'de> for QNameVisitor {
            type Value = QName;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 2-element array [module_path, local_name]")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<Self::Value, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let module_path = seq
                    .next_element::<Path>()
                    .map_err(|e| invalid_part::<V::Error>("module path", e))?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let local_name = seq
                    .next_element::<Name>()
                    .map_err(|e| invalid_part::<V::Error>("local name", e))?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;

                if seq.next_element::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::custom("Expected end of QName array"));
                }

                Ok(QName {
                    module_path,
                    local_name,
                })
            }
        }

        deserializer.deserialize_seq(QNameVisitor)
    }
}
