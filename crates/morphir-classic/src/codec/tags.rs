//! Version-selected tag tables.
//!
//! Every tagged tree (types, patterns, values, literals and type declarations)
//! declares its node kinds once with [`versioned_tags!`], giving each kind its
//! version 1 tag, its version 2/3 tag and its exact JSON array length. Encoding
//! and decoding then go through the same [`VersionedTag`] lookups.

use super::options::FormatVersion;
use crate::error::{Error, Result};

pub(crate) trait VersionedTag: Copy + Eq + Sized + 'static {
    /// Tree name used in error messages.
    const TREE: &'static str;
    const ALL: &'static [Self];

    fn v1_tag(self) -> &'static str;
    fn pascal_tag(self) -> &'static str;
    /// Number of elements in the encoded array, tag included.
    fn arity(self) -> usize;

    fn tag(self, version: FormatVersion) -> &'static str {
        match version {
            FormatVersion::V1 => self.v1_tag(),
            FormatVersion::V2 | FormatVersion::V3 => self.pascal_tag(),
        }
    }

    /// True if `tag` names this kind under `version`. Version 1 kinds may accept
    /// more than one spelling; the first one is what the encoder writes.
    fn accepts_tag(self, tag: &str, version: FormatVersion) -> bool;

    fn from_tag(tag: &str, version: FormatVersion) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.accepts_tag(tag, version))
            .ok_or_else(|| Error::UnknownTag {
                tree: Self::TREE,
                tag: tag.to_string(),
                version,
            })
    }

    fn check_arity(self, actual: usize) -> Result<()> {
        if actual == self.arity() {
            Ok(())
        } else {
            Err(Error::Arity {
                kind: self.pascal_tag(),
                expected: self.arity(),
                actual,
            })
        }
    }
}

/// Declares a node-kind enum and its [`VersionedTag`] table.
///
/// Each variant lists its version 1 tag (alternatives separated by `|`), its
/// version 2/3 tag and its arity.
macro_rules! versioned_tags {
    (
        $(#[$meta:meta])*
        enum $kind:ident in $tree:literal {
            $($variant:ident => ($($v1:literal)|+, $pascal:literal, $arity:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub(crate) enum $kind {
            $($variant),+
        }

        impl $crate::codec::tags::VersionedTag for $kind {
            const TREE: &'static str = $tree;
            const ALL: &'static [Self] = &[$($kind::$variant),+];

            fn v1_tag(self) -> &'static str {
                match self {
                    $($kind::$variant => [$($v1),+][0]),+
                }
            }

            fn pascal_tag(self) -> &'static str {
                match self {
                    $($kind::$variant => $pascal),+
                }
            }

            fn arity(self) -> usize {
                match self {
                    $($kind::$variant => $arity),+
                }
            }

            fn accepts_tag(self, tag: &str, version: $crate::codec::options::FormatVersion) -> bool {
                match version {
                    $crate::codec::options::FormatVersion::V1 => match self {
                        $($kind::$variant => [$($v1),+].contains(&tag)),+
                    },
                    _ => self.pascal_tag() == tag,
                }
            }
        }
    };
}

pub(crate) use versioned_tags;

#[cfg(test)]
mod tests {
    use super::*;

    versioned_tags! {
        enum Shape in "Shape" {
            Dot => ("dot", "Dot", 2),
            Line => ("line_segment" | "line", "LineSegment", 4),
        }
    }

    #[test]
    fn test_tag_selection_by_version() {
        assert_eq!(Shape::Line.tag(FormatVersion::V1), "line_segment");
        assert_eq!(Shape::Line.tag(FormatVersion::V2), "LineSegment");
        assert_eq!(Shape::Line.tag(FormatVersion::V3), "LineSegment");
    }

    #[test]
    fn test_from_tag_rejects_other_version_casing() {
        assert_eq!(Shape::from_tag("line_segment", FormatVersion::V1).unwrap(), Shape::Line);
        assert_eq!(Shape::from_tag("LineSegment", FormatVersion::V3).unwrap(), Shape::Line);

        let err = Shape::from_tag("LineSegment", FormatVersion::V1).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"unknown Shape tag "LineSegment" for format version 1"#
        );
        assert!(Shape::from_tag("line_segment", FormatVersion::V2).is_err());
        assert!(Shape::from_tag("line", FormatVersion::V3).is_err());
    }

    #[test]
    fn test_v1_alternative_spelling() {
        assert_eq!(Shape::from_tag("line", FormatVersion::V1).unwrap(), Shape::Line);
        assert_eq!(Shape::Line.tag(FormatVersion::V1), "line_segment");
    }

    #[test]
    fn test_check_arity() {
        assert!(Shape::Dot.check_arity(2).is_ok());
        let err = Shape::Dot.check_arity(3).unwrap_err();
        assert_eq!(err.to_string(), "Dot expects 2 elements, got 3");
    }
}
