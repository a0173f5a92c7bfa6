//! Read-only traversal with enter and exit hooks.
//!
//! A visitor sees every node twice: `enter_*` before its children and
//! `exit_*` after them. The [`TraversalAction`] returned from `enter_*` steers
//! the walk. `SkipChildren` moves on to the next sibling without calling
//! `exit_*`, and `Stop` unwinds the whole walk, which then returns
//! [`ControlFlow::Break`]. Every hook defaults to a no-op that continues.
//!
//! ```
//! use morphir_classic::ir::Type;
//! use morphir_classic::naming::Name;
//! use morphir_classic::traversal::{TraversalAction, TypeVisitor, walk_type};
//!
//! #[derive(Default)]
//! struct Variables(Vec<String>);
//!
//! impl<A> TypeVisitor<A> for Variables {
//!     fn enter_type(&mut self, tpe: &Type<A>) -> TraversalAction {
//!         if let Type::Variable(_, name) = tpe {
//!             self.0.push(name.to_camel_case());
//!         }
//!         TraversalAction::Continue
//!     }
//! }
//!
//! let var = |n: &str| Type::Variable((), Name::from_str(n));
//! let tpe = Type::function((), var("a"), var("b"));
//! let mut visitor = Variables::default();
//! let _ = walk_type(&mut visitor, &tpe);
//! assert_eq!(visitor.0, ["a", "b"]);
//! ```

use std::ops::ControlFlow;

use crate::ir::{Pattern, Type, Value, ValueDefinition};
use crate::stack::ensure_sufficient_stack;

/// What a walk does after `enter_*` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalAction {
    #[default]
    Continue,
    SkipChildren,
    Stop,
}

pub trait TypeVisitor<A> {
    fn enter_type(&mut self, _tpe: &Type<A>) -> TraversalAction {
        TraversalAction::Continue
    }

    fn exit_type(&mut self, _tpe: &Type<A>) {}
}

pub trait PatternVisitor<A> {
    fn enter_pattern(&mut self, _pattern: &Pattern<A>) -> TraversalAction {
        TraversalAction::Continue
    }

    fn exit_pattern(&mut self, _pattern: &Pattern<A>) {}
}

/// Visits values along with the patterns and types they contain.
pub trait ValueVisitor<TA, VA>: TypeVisitor<TA> + PatternVisitor<VA> {
    fn enter_value(&mut self, _value: &Value<TA, VA>) -> TraversalAction {
        TraversalAction::Continue
    }

    fn exit_value(&mut self, _value: &Value<TA, VA>) {}
}

pub fn walk_type<A, V>(visitor: &mut V, tpe: &Type<A>) -> ControlFlow<()>
where
    V: TypeVisitor<A> + ?Sized,
{
    ensure_sufficient_stack(|| match visitor.enter_type(tpe) {
        TraversalAction::Stop => ControlFlow::Break(()),
        TraversalAction::SkipChildren => ControlFlow::Continue(()),
        TraversalAction::Continue => {
            walk_type_children(visitor, tpe)?;
            visitor.exit_type(tpe);
            ControlFlow::Continue(())
        }
    })
}

fn walk_type_children<A, V>(visitor: &mut V, tpe: &Type<A>) -> ControlFlow<()>
where
    V: TypeVisitor<A> + ?Sized,
{
    match tpe {
        Type::Reference(_, _, params) => params.iter().try_for_each(|t| walk_type(visitor, t)),
        Type::Tuple(_, elements) => elements.iter().try_for_each(|t| walk_type(visitor, t)),
        Type::Record(_, fields) | Type::ExtensibleRecord(_, _, fields) => {
            fields.iter().try_for_each(|f| walk_type(visitor, &f.tpe))
        }
        Type::Function(_, argument, result) => {
            walk_type(visitor, argument)?;
            walk_type(visitor, result)
        }
        Type::Variable(..) | Type::Unit(_) => ControlFlow::Continue(()),
    }
}

pub fn walk_pattern<A, V>(visitor: &mut V, pattern: &Pattern<A>) -> ControlFlow<()>
where
    V: PatternVisitor<A> + ?Sized,
{
    ensure_sufficient_stack(|| match visitor.enter_pattern(pattern) {
        TraversalAction::Stop => ControlFlow::Break(()),
        TraversalAction::SkipChildren => ControlFlow::Continue(()),
        TraversalAction::Continue => {
            walk_pattern_children(visitor, pattern)?;
            visitor.exit_pattern(pattern);
            ControlFlow::Continue(())
        }
    })
}

fn walk_pattern_children<A, V>(visitor: &mut V, pattern: &Pattern<A>) -> ControlFlow<()>
where
    V: PatternVisitor<A> + ?Sized,
{
    match pattern {
        Pattern::As(_, subject, _) => walk_pattern(visitor, subject),
        Pattern::Tuple(_, elements) | Pattern::Constructor(_, _, elements) => {
            elements.iter().try_for_each(|p| walk_pattern(visitor, p))
        }
        Pattern::HeadTail(_, head, tail) => {
            walk_pattern(visitor, head)?;
            walk_pattern(visitor, tail)
        }
        Pattern::Wildcard(_) | Pattern::EmptyList(_) | Pattern::Literal(..) | Pattern::Unit(_) => {
            ControlFlow::Continue(())
        }
    }
}

pub fn walk_value<TA, VA, V>(visitor: &mut V, value: &Value<TA, VA>) -> ControlFlow<()>
where
    V: ValueVisitor<TA, VA> + ?Sized,
{
    ensure_sufficient_stack(|| match visitor.enter_value(value) {
        TraversalAction::Stop => ControlFlow::Break(()),
        TraversalAction::SkipChildren => ControlFlow::Continue(()),
        TraversalAction::Continue => {
            walk_value_children(visitor, value)?;
            visitor.exit_value(value);
            ControlFlow::Continue(())
        }
    })
}

/// Walks the input types, the output type and then the body.
pub fn walk_value_definition<TA, VA, V>(
    visitor: &mut V,
    definition: &ValueDefinition<TA, VA>,
) -> ControlFlow<()>
where
    V: ValueVisitor<TA, VA> + ?Sized,
{
    for (_, _, tpe) in &definition.input_types {
        walk_type(visitor, tpe)?;
    }
    walk_type(visitor, &definition.output_type)?;
    walk_value(visitor, &definition.body)
}

fn walk_value_children<TA, VA, V>(visitor: &mut V, value: &Value<TA, VA>) -> ControlFlow<()>
where
    V: ValueVisitor<TA, VA> + ?Sized,
{
    match value {
        Value::Tuple(_, items) | Value::List(_, items) => {
            items.iter().try_for_each(|v| walk_value(visitor, v))
        }
        Value::Record(_, fields) => fields.iter().try_for_each(|(_, v)| walk_value(visitor, v)),
        Value::Field(_, subject, _) => walk_value(visitor, subject),
        Value::Apply(_, function, argument) => {
            walk_value(visitor, function)?;
            walk_value(visitor, argument)
        }
        Value::Lambda(_, argument, body) => {
            walk_pattern(visitor, argument)?;
            walk_value(visitor, body)
        }
        Value::LetDefinition(_, _, definition, in_value) => {
            walk_value_definition(visitor, definition)?;
            walk_value(visitor, in_value)
        }
        Value::LetRecursion(_, definitions, in_value) => {
            for (_, definition) in definitions {
                walk_value_definition(visitor, definition)?;
            }
            walk_value(visitor, in_value)
        }
        Value::Destructure(_, pattern, value, in_value) => {
            walk_pattern(visitor, pattern)?;
            walk_value(visitor, value)?;
            walk_value(visitor, in_value)
        }
        Value::IfThenElse(_, condition, then_branch, else_branch) => {
            walk_value(visitor, condition)?;
            walk_value(visitor, then_branch)?;
            walk_value(visitor, else_branch)
        }
        Value::PatternMatch(_, subject, cases) => {
            walk_value(visitor, subject)?;
            cases.iter().try_for_each(|(pattern, body)| {
                walk_pattern(visitor, pattern)?;
                walk_value(visitor, body)
            })
        }
        Value::UpdateRecord(_, subject, fields) => {
            walk_value(visitor, subject)?;
            fields.iter().try_for_each(|(_, v)| walk_value(visitor, v))
        }
        Value::Literal(..)
        | Value::Constructor(..)
        | Value::Variable(..)
        | Value::Reference(..)
        | Value::FieldFunction(..)
        | Value::Unit(_) => ControlFlow::Continue(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Literal;
    use crate::naming::Name;

    fn var(n: &str) -> Type<u32> {
        Type::Variable(0, Name::from_str(n))
    }

    /// Records `+kind` on enter and `-kind` on exit.
    #[derive(Default)]
    struct Trace {
        events: Vec<String>,
        skip: Option<&'static str>,
        stop: Option<&'static str>,
    }

    impl Trace {
        fn enter(&mut self, kind: &'static str) -> TraversalAction {
            self.events.push(format!("+{kind}"));
            if self.stop == Some(kind) {
                TraversalAction::Stop
            } else if self.skip == Some(kind) {
                TraversalAction::SkipChildren
            } else {
                TraversalAction::Continue
            }
        }
    }

    fn type_kind<A>(tpe: &Type<A>) -> &'static str {
        match tpe {
            Type::Variable(..) => "Variable",
            Type::Reference(..) => "Reference",
            Type::Tuple(..) => "Tuple",
            Type::Record(..) => "Record",
            Type::ExtensibleRecord(..) => "ExtensibleRecord",
            Type::Function(..) => "Function",
            Type::Unit(_) => "Unit",
        }
    }

    impl TypeVisitor<u32> for Trace {
        fn enter_type(&mut self, tpe: &Type<u32>) -> TraversalAction {
            self.enter(type_kind(tpe))
        }

        fn exit_type(&mut self, tpe: &Type<u32>) {
            self.events.push(format!("-{}", type_kind(tpe)));
        }
    }

    impl PatternVisitor<u32> for Trace {
        fn enter_pattern(&mut self, pattern: &Pattern<u32>) -> TraversalAction {
            match pattern {
                Pattern::Wildcard(_) => self.enter("Wildcard"),
                _ => self.enter("Pattern"),
            }
        }
    }

    impl ValueVisitor<u32, u32> for Trace {
        fn enter_value(&mut self, value: &Value<u32, u32>) -> TraversalAction {
            match value {
                Value::Apply(..) => self.enter("Apply"),
                Value::LetDefinition(..) => self.enter("Let"),
                _ => self.enter("Leaf"),
            }
        }

        fn exit_value(&mut self, value: &Value<u32, u32>) {
            if let Value::Apply(..) = value {
                self.events.push("-Apply".to_string());
            }
        }
    }

    #[test]
    fn test_enter_and_exit_wrap_children() {
        let tpe = Type::function(0, Type::Tuple(0, vec![var("a")]), Type::Unit(0));
        let mut trace = Trace::default();
        assert_eq!(walk_type(&mut trace, &tpe), ControlFlow::Continue(()));
        assert_eq!(
            trace.events,
            ["+Function", "+Tuple", "+Variable", "-Variable", "-Tuple", "+Unit", "-Unit", "-Function"]
        );
    }

    #[test]
    fn test_skip_children_skips_exit_too() {
        let tpe = Type::function(0, Type::Tuple(0, vec![var("a")]), Type::Unit(0));
        let mut trace = Trace { skip: Some("Tuple"), ..Trace::default() };
        assert_eq!(walk_type(&mut trace, &tpe), ControlFlow::Continue(()));
        assert_eq!(trace.events, ["+Function", "+Tuple", "+Unit", "-Unit", "-Function"]);
    }

    #[test]
    fn test_stop_ends_the_walk() {
        let tpe = Type::function(0, Type::Tuple(0, vec![var("a")]), Type::Unit(0));
        let mut trace = Trace { stop: Some("Variable"), ..Trace::default() };
        assert_eq!(walk_type(&mut trace, &tpe), ControlFlow::Break(()));
        assert_eq!(trace.events, ["+Function", "+Tuple", "+Variable"]);
    }

    #[test]
    fn test_value_walk_reaches_patterns_and_definition_types() {
        let definition = ValueDefinition::new(
            vec![(Name::from_str("x"), 0, var("a"))],
            Type::Unit(0),
            Value::Variable(0, Name::from_str("x")),
        );
        let value = Value::let_definition(
            0,
            Name::from_str("f"),
            definition,
            Value::apply(
                0,
                Value::lambda(0, Pattern::Wildcard(0), Value::Unit(0)),
                Value::Literal(0, Literal::Bool(true)),
            ),
        );
        let mut trace = Trace::default();
        assert!(walk_value(&mut trace, &value).is_continue());
        assert_eq!(
            trace.events,
            [
                "+Let", "+Variable", "-Variable", "+Unit", "-Unit", "+Leaf", "+Apply", "+Leaf",
                "+Wildcard", "+Leaf", "+Leaf", "-Apply",
            ]
        );
    }

    #[test]
    fn test_stop_inside_a_pattern_stops_the_value_walk() {
        let value: Value<u32, u32> = Value::apply(
            0,
            Value::lambda(0, Pattern::Wildcard(0), Value::Unit(0)),
            Value::Unit(0),
        );
        let mut trace = Trace { stop: Some("Wildcard"), ..Trace::default() };
        assert!(walk_value(&mut trace, &value).is_break());
        assert_eq!(trace.events, ["+Apply", "+Leaf", "+Wildcard"]);
    }
}
