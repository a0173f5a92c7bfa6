//! Global word interner.
//!
//! Name words repeat heavily across a package (`morphir`, `s`, `d`, `k`, ...), so
//! every word is stored once in a thread-safe rodeo and names hold [`Word`] keys.
//!
//! The rodeo only grows. Every word passed to [`intern`], built by
//! `Name::from_str` or read by a decoder stays allocated until the process
//! exits, so a long-running service that decodes untrusted documents keeps
//! every distinct word it has ever seen. [`lookup`] checks for a word without
//! adding it.

use lasso::{Spur, ThreadedRodeo};
use std::sync::OnceLock;

static INTERNER: OnceLock<ThreadedRodeo> = OnceLock::new();

/// Returns a reference to the global string interner.
pub fn interner() -> &'static ThreadedRodeo {
    INTERNER.get_or_init(ThreadedRodeo::new)
}

/// A handle to an interned word.
pub type Word = Spur;

/// Interns a string and returns its handle.
pub fn intern(s: &str) -> Word {
    interner().get_or_intern(s)
}

/// Resolves an interned handle back to its string value.
pub fn resolve(word: Word) -> &'static str {
    interner().resolve(&word)
}

/// Returns the handle of a word that was already interned, without adding it.
pub fn lookup(s: &str) -> Option<Word> {
    interner().get(s)
}
