//! Path - a list of Names, serialized as [["word1"], ["word2", "word3"]]

use super::name::Name;
use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A module or package path. The empty path is the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    pub segments: Vec<Name>,
}

impl Path {
    pub fn new(segments: Vec<Name>) -> Self {
        Self { segments }
    }

    /// Splits text into names along any run of characters that are neither word
    /// characters nor whitespace, so `"Morphir.SDK"` and `"morphir/sdk"` agree.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        let mut segments = Vec::new();
        let mut start = 0;
        let mut in_separator = false;

        for (i, c) in s.char_indices() {
            if is_separator(c) {
                if !in_separator {
                    segments.push(Name::from_str(&s[start..i]));
                    in_separator = true;
                }
            } else if in_separator {
                start = i;
                in_separator = false;
            }
        }
        if in_separator {
            segments.push(Name::from_str(""));
        } else {
            segments.push(Name::from_str(&s[start..]));
        }

        Self { segments }
    }

    /// Renders every segment with `name_to_string` and joins them with `separator`.
    pub fn to_string_with<F>(&self, name_to_string: F, separator: &str) -> String
    where
        F: Fn(&Name) -> String,
    {
        self.segments
            .iter()
            .map(name_to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// True if `prefix` matches the leading segments of this path. The root path
    /// is a prefix of every path.
    pub fn has_prefix(&self, prefix: &Path) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

fn is_separator(c: char) -> bool {
    !(c.is_ascii_alphanumeric() || c == '_' || matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c'))
}

impl std::str::FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::from_str(s))
    }
}

impl From<Vec<Name>> for Path {
    fn from(segments: Vec<Name>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.segments)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PathVisitor;

        impl<'de> Visitor<'de> for PathVisitor {
            type Value = Path;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an array of Name arrays [[\"word1\"], [\"word2\"]]")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<Self::Value, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let mut segments = Vec::new();
                while let Some(name) = seq.next_element::<Name>()? {
                    segments.push(name);
                }
                Ok(Path { segments })
            }
        }

        deserializer.deserialize_seq(PathVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let p = Path::new(vec![Name::from_str("foo"), Name::from_str("bar")]);
        assert_eq!(p.to_string(), "foo.bar");
    }

    #[test]
    fn test_path_from_str() {
        let path = Path::from_str("Morphir.SDK.Basics");
        assert_eq!(
            path,
            Path::new(vec![
                Name::new(["morphir"]),
                Name::new(["s", "d", "k"]),
                Name::new(["basics"]),
            ])
        );
        assert_eq!(Path::from_str("foo/bar baz::qux").len(), 3);
        assert_eq!(Path::from_str("foo_bar").len(), 1);
    }

    #[test]
    fn test_to_string_with() {
        let path = Path::from_str("Morphir.SDK.Basics");
        assert_eq!(path.to_string_with(Name::to_title_case, "."), "Morphir.SDK.Basics");
        assert_eq!(path.to_string_with(Name::to_snake_case, "/"), "morphir/SDK/basics");
    }

    #[test]
    fn test_has_prefix() {
        let path = Path::from_str("Morphir.SDK.Basics");
        assert!(path.has_prefix(&Path::from_str("Morphir.SDK")));
        assert!(path.has_prefix(&Path::default()));
        assert!(!path.has_prefix(&Path::from_str("Morphir.Basics")));
        assert!(!Path::default().has_prefix(&path));
    }

    #[test]
    fn test_path_json() {
        let path = Path::from_str("Morphir.SDK");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"[["morphir"],["s","d","k"]]"#);
        assert_eq!(serde_json::from_str::<Path>(&json).unwrap(), path);
        assert!(serde_json::from_str::<Path>(r#"["morphir"]"#).is_err());
    }
}
