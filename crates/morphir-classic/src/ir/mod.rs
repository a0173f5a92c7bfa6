//! Morphir classic IR data model.
//!
//! Recursive trees with generic attributes. Every node carries its attribute as
//! the first field, and owns its children outright. The JSON encoding lives in
//! [`crate::codec`] because its shape depends on the format version.

// Core types
pub mod access;
pub mod documented;
pub mod literal;
pub mod pattern;
pub mod types;
pub mod value;

// Structure types
pub mod distribution;
pub mod module;
pub mod package;

pub use access::{Access, AccessControlled};
pub use distribution::Distribution;
pub use documented::Documented;
pub use literal::{Decimal, Literal};
pub use module::{ModuleDefinition, ModuleSpecification};
pub use package::{PackageDefinition, PackageSpecification};
pub use pattern::Pattern;
pub use types::{
    Constructor, DerivedTypeDetails, Field, Type, TypeConstructors, TypeDefinition,
    TypeSpecification,
};
pub use value::{Value, ValueDefinition, ValueSpecification};
