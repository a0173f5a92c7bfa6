//! JSON codec for the classic IR.
//!
//! Every entry point takes the caller's [`Options`] (which fix the format
//! version) and, for trees with attributes, an attribute encoder or decoder.
//! Encoders return the JSON bytes; decoders take a complete JSON document.
//!
//! | Version | Tags                      | Record fields       | Access wrapper            |
//! |---------|---------------------------|---------------------|---------------------------|
//! | 1       | `snake_case`              | `[name, type]`      | `["public", value]`       |
//! | 2, 3    | `PascalCase`              | `{"name", "tpe"}`   | `{"access", "value"}`     |
//!
//! Tagged nodes are arrays `[tag, attrs, ...]` with a fixed length per node
//! kind; a payload with the wrong length or a tag from another version is
//! rejected.

mod access;
mod attributes;
mod distribution;
mod documented;
mod literal;
mod module;
mod naming;
mod options;
mod package;
mod pattern;
mod raw;
mod tags;
mod type_decl;
mod types;
mod value;

pub use attributes::{AttrDecoder, AttrEncoder, SerdeAttrs, UnitAttrs};
pub use distribution::{
    decode_distribution, decode_versioned_distribution, encode_distribution,
    encode_versioned_distribution,
};
pub use literal::{decode_literal, encode_literal};
pub use module::{
    decode_module_definition, decode_module_specification, encode_module_definition,
    encode_module_specification,
};
pub use naming::{
    decode_fqname, decode_name, decode_path, decode_qname, encode_fqname, encode_name,
    encode_path, encode_qname,
};
pub use options::{FormatVersion, Options};
pub use package::{
    decode_package_definition, decode_package_specification, encode_package_definition,
    encode_package_specification,
};
pub use pattern::{decode_pattern, encode_pattern};
pub use type_decl::{
    decode_type_definition, decode_type_specification, encode_type_definition,
    encode_type_specification,
};
pub use types::{decode_type, decode_type_constructors, encode_type, encode_type_constructors};
pub use value::{
    decode_value, decode_value_definition, decode_value_specification, encode_value,
    encode_value_definition, encode_value_specification,
};
