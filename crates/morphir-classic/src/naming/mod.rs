//! Naming primitives shared by every part of the IR.
//!
//! A [`Name`] is a list of lower-case words, a [`Path`] a list of names, and
//! [`QName`]/[`FQName`] qualify a local name with a module path (and package
//! path). All of them serialize the same way in every format version.

pub mod fqname;
pub mod interner;
pub mod name;
pub mod path;
pub mod qname;

pub use fqname::FQName;
pub use interner::{Word, intern, resolve};
pub use name::Name;
pub use path::Path;
pub use qname::QName;

/// Wraps the error of one element of a fixed-length name array.
pub(crate) fn invalid_part<E: serde::de::Error>(part: &str, err: impl std::fmt::Display) -> E {
    E::custom(format!("invalid {part}: {err}"))
}
