//! Patterns used by lambdas, destructuring and pattern matches.

use super::literal::Literal;
use crate::naming::{FQName, Name};

/// Pattern with generic attributes
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern<A> {
    /// `_`, matches anything.
    Wildcard(A),
    /// `subject as name`. The subject is matched first, then the whole value is
    /// bound to the name; the binding itself never constrains the match.
    As(A, Box<Pattern<A>>, Name),
    Tuple(A, Vec<Pattern<A>>),
    Constructor(A, FQName, Vec<Pattern<A>>),
    /// `[]`
    EmptyList(A),
    /// `head :: tail`
    HeadTail(A, Box<Pattern<A>>, Box<Pattern<A>>),
    Literal(A, Literal),
    /// `()`
    Unit(A),
}

impl<A> Pattern<A> {
    pub fn attributes(&self) -> &A {
        match self {
            Pattern::Wildcard(a)
            | Pattern::As(a, _, _)
            | Pattern::Tuple(a, _)
            | Pattern::Constructor(a, _, _)
            | Pattern::EmptyList(a)
            | Pattern::HeadTail(a, _, _)
            | Pattern::Literal(a, _)
            | Pattern::Unit(a) => a,
        }
    }

    pub fn as_pattern(attrs: A, subject: Pattern<A>, name: Name) -> Self {
        Pattern::As(attrs, Box::new(subject), name)
    }

    pub fn head_tail(attrs: A, head: Pattern<A>, tail: Pattern<A>) -> Self {
        Pattern::HeadTail(attrs, Box::new(head), Box::new(tail))
    }
}
