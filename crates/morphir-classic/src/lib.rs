//! Morphir classic IR.
//!
//! The Type, Pattern and Value trees of the Morphir intermediate representation,
//! the module and package declarations built on them, and a JSON codec that
//! reads and writes the three classic format versions (1, 2 and 3).
//!
//! ```
//! use morphir_classic::codec::{self, Options, UnitAttrs};
//! use morphir_classic::ir::Type;
//! use morphir_classic::naming::Name;
//!
//! let tpe: Type<()> = Type::Variable((), Name::from_str("a"));
//! let json = codec::encode_type(&Options::v3(), &UnitAttrs, &tpe).unwrap();
//! assert_eq!(String::from_utf8(json).unwrap(), r#"["Variable",[],["a"]]"#);
//! ```

pub mod codec;
pub mod error;
pub mod ir;
pub mod naming;
mod stack;
pub mod traversal;

pub use codec::{FormatVersion, Options};
pub use error::{Error, Result};
pub use naming::{FQName, Name, Path, QName, Word, intern, resolve};
