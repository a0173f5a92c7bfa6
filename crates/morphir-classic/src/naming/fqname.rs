//! FQName - fully qualified name (package path, module path, local name)

use super::invalid_part;
use super::name::Name;
use super::path::Path;
use super::qname::QName;
use crate::error::Error;
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Fully qualified name, serialized as [[[package_name]], [[module_name]], ["local_name"]]
///
/// The string form is `Package.Path:Module.Path:localName`, which parses back to
/// the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FQName {
    pub package_path: Path,
    pub module_path: Path,
    pub local_name: Name,
}

impl FQName {
    pub fn new(package_path: Path, module_path: Path, local_name: Name) -> Self {
        Self {
            package_path,
            module_path,
            local_name,
        }
    }

    /// Qualifies a module-relative name with the package it lives in.
    pub fn from_qname(package_path: Path, qname: QName) -> Self {
        Self {
            package_path,
            module_path: qname.module_path,
            local_name: qname.local_name,
        }
    }

    /// The module-relative part of this name.
    pub fn qname(&self) -> QName {
        QName::new(self.module_path.clone(), self.local_name.clone())
    }
}

impl fmt::Display for FQName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.package_path.to_string_with(Name::to_title_case, "."),
            self.module_path.to_string_with(Name::to_title_case, "."),
            self.local_name.to_camel_case()
        )
    }
}

impl std::str::FromStr for FQName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split(':').collect::<Vec<_>>().as_slice() {
            [package_path, module_path, local_name] => Ok(FQName {
                package_path: Path::from_str(package_path),
                module_path: Path::from_str(module_path),
                local_name: Name::from_str(local_name),
            }),
            _ => Err(Error::Parse {
                what: "FQName",
                expected: "PackagePath:ModulePath:localName",
                input: s.to_string(),
            }),
        }
    }
}

impl Serialize for FQName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.package_path)?;
        tuple.serialize_element(&self.module_path)?;
        tuple.serialize_element(&self.local_name)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for FQName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FQNameVisitor;

        impl<'de> Visitor<'de> for FQNameVisitor {
            type Value = FQName;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 3-element array [package_path, module_path, local_name]")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<Self::Value, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let package_path = seq
                    .next_element::<Path>()
                    .map_err(|e| invalid_part::<V::Error>("package path", e))?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let module_path = seq
                    .next_element::<Path>()
                    .map_err(|e| invalid_part::<V::Error>("module path", e))?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let local_name = seq
                    .next_element::<Name>()
                    .map_err(|e| invalid_part::<V::Error>("local name", e))?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;

                if seq.next_element::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::custom("Expected end of FQName array"));
                }

                Ok(FQName {
                    package_path,
                    module_path,
                    local_name,
                })
            }
        }

        deserializer.deserialize_seq(FQNameVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fqname_string_round_trip() {
        let fq: FQName = "Morphir.SDK:Basics:logBase".parse().unwrap();
        assert_eq!(fq.package_path, Path::from_str("Morphir.SDK"));
        assert_eq!(fq.module_path, Path::from_str("Basics"));
        assert_eq!(fq.local_name, Name::new(["log", "base"]));
        assert_eq!(fq.to_string(), "Morphir.SDK:Basics:logBase");
    }

    #[test]
    fn test_fqname_parse_requires_three_parts() {
        assert!("Morphir.SDK:logBase".parse::<FQName>().is_err());
        assert!("a:b:c:d".parse::<FQName>().is_err());
    }

    #[test]
    fn test_fqname_qname_split() {
        let fq: FQName = "Morphir.SDK:Basics:add".parse().unwrap();
        let q = fq.qname();
        assert_eq!(q.to_string(), "Basics:add");
        assert_eq!(FQName::from_qname(fq.package_path.clone(), q), fq);
    }

    #[test]
    fn test_fqname_json() {
        let fq: FQName = "Morphir.SDK:Basics:add".parse().unwrap();
        let json = serde_json::to_string(&fq).unwrap();
        assert_eq!(json, r#"[[["morphir"],["s","d","k"]],[["basics"]],["add"]]"#);
        assert_eq!(serde_json::from_str::<FQName>(&json).unwrap(), fq);
        assert!(serde_json::from_str::<FQName>(r#"[[["morphir"]],[["basics"]]]"#).is_err());
        assert!(serde_json::from_str::<FQName>("null").is_err());
    }
}
