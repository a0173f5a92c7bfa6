//! Access control wrappers.

use serde::{Deserialize, Serialize};

/// Access level - serialized as "Public"/"Private" (format versions 2 and 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Access {
    Public,
    Private,
}

/// A declaration together with its visibility outside the enclosing scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessControlled<A> {
    pub access: Access,
    pub value: A,
}

impl<A> AccessControlled<A> {
    pub fn new(access: Access, value: A) -> Self {
        Self { access, value }
    }

    pub fn public(value: A) -> Self {
        Self::new(Access::Public, value)
    }

    pub fn private(value: A) -> Self {
        Self::new(Access::Private, value)
    }

    pub fn is_public(&self) -> bool {
        self.access == Access::Public
    }

    /// The value, if it is visible from outside.
    pub fn with_public_access(&self) -> Option<&A> {
        self.is_public().then_some(&self.value)
    }

    /// The value as seen from inside the scope, regardless of access.
    pub fn with_private_access(&self) -> &A {
        &self.value
    }

    pub fn map<B, F: FnOnce(A) -> B>(self, f: F) -> AccessControlled<B> {
        AccessControlled {
            access: self.access,
            value: f(self.value),
        }
    }
}
