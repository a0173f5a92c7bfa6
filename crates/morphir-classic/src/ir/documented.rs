//! Doc comments on module members.

/// A module member with its doc comment.
///
/// Every member carries a `doc` on the wire; an empty string means the source
/// had no comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Documented<A> {
    pub doc: String,
    pub value: A,
}

impl<A> Documented<A> {
    pub fn new(doc: impl Into<String>, value: A) -> Self {
        Self {
            doc: doc.into(),
            value,
        }
    }

    pub fn undocumented(value: A) -> Self {
        Self::new(String::new(), value)
    }

    /// False when the doc is empty or only whitespace.
    pub fn has_doc(&self) -> bool {
        !self.doc.trim().is_empty()
    }

    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Documented<B> {
        Documented {
            doc: self.doc,
            value: f(self.value),
        }
    }

    /// Builds a new member from a borrowed one, copying the doc.
    pub fn map_ref<B>(&self, f: impl FnOnce(&A) -> B) -> Documented<B> {
        Documented {
            doc: self.doc.clone(),
            value: f(&self.value),
        }
    }
}
