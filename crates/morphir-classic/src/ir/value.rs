//! Value expressions, value definitions and value specifications.
//!
//! `TA` is the attribute of types embedded in a value (lambda signatures, let
//! bindings), `VA` the attribute of every value node. Patterns inside values
//! share `VA`, since they only ever occur where a value is built.

use super::literal::Literal;
use super::pattern::Pattern;
use super::types::Type;
use crate::naming::{FQName, Name};

/// Value expression with generic type and value attributes
#[derive(Debug, Clone, PartialEq)]
pub enum Value<TA, VA> {
    Literal(VA, Literal),
    /// Reference to a custom type constructor.
    Constructor(VA, FQName),
    Tuple(VA, Vec<Value<TA, VA>>),
    List(VA, Vec<Value<TA, VA>>),
    Record(VA, Vec<(Name, Value<TA, VA>)>),
    Variable(VA, Name),
    /// Reference to a value or function defined in a module.
    Reference(VA, FQName),
    /// `subject.name`
    Field(VA, Box<Value<TA, VA>>, Name),
    /// `.name`
    FieldFunction(VA, Name),
    Apply(VA, Box<Value<TA, VA>>, Box<Value<TA, VA>>),
    Lambda(VA, Pattern<VA>, Box<Value<TA, VA>>),
    /// `let name = definition in value`
    LetDefinition(VA, Name, Box<ValueDefinition<TA, VA>>, Box<Value<TA, VA>>),
    /// Mutually recursive let bindings.
    LetRecursion(VA, Vec<(Name, ValueDefinition<TA, VA>)>, Box<Value<TA, VA>>),
    /// `let pattern = value in value`
    Destructure(VA, Pattern<VA>, Box<Value<TA, VA>>, Box<Value<TA, VA>>),
    IfThenElse(
        VA,
        Box<Value<TA, VA>>,
        Box<Value<TA, VA>>,
        Box<Value<TA, VA>>,
    ),
    /// Cases are tried top to bottom; the first match wins.
    PatternMatch(VA, Box<Value<TA, VA>>, Vec<(Pattern<VA>, Value<TA, VA>)>),
    /// `{ record | name = value }`
    UpdateRecord(VA, Box<Value<TA, VA>>, Vec<(Name, Value<TA, VA>)>),
    Unit(VA),
}

impl<TA, VA> Value<TA, VA> {
    pub fn attributes(&self) -> &VA {
        match self {
            Value::Literal(a, _)
            | Value::Constructor(a, _)
            | Value::Tuple(a, _)
            | Value::List(a, _)
            | Value::Record(a, _)
            | Value::Variable(a, _)
            | Value::Reference(a, _)
            | Value::Field(a, _, _)
            | Value::FieldFunction(a, _)
            | Value::Apply(a, _, _)
            | Value::Lambda(a, _, _)
            | Value::LetDefinition(a, _, _, _)
            | Value::LetRecursion(a, _, _)
            | Value::Destructure(a, _, _, _)
            | Value::IfThenElse(a, _, _, _)
            | Value::PatternMatch(a, _, _)
            | Value::UpdateRecord(a, _, _)
            | Value::Unit(a) => a,
        }
    }

    pub fn field(attrs: VA, subject: Value<TA, VA>, name: Name) -> Self {
        Value::Field(attrs, Box::new(subject), name)
    }

    pub fn apply(attrs: VA, function: Value<TA, VA>, argument: Value<TA, VA>) -> Self {
        Value::Apply(attrs, Box::new(function), Box::new(argument))
    }

    pub fn lambda(attrs: VA, argument: Pattern<VA>, body: Value<TA, VA>) -> Self {
        Value::Lambda(attrs, argument, Box::new(body))
    }

    pub fn let_definition(
        attrs: VA,
        name: Name,
        definition: ValueDefinition<TA, VA>,
        in_value: Value<TA, VA>,
    ) -> Self {
        Value::LetDefinition(attrs, name, Box::new(definition), Box::new(in_value))
    }

    pub fn let_recursion(
        attrs: VA,
        definitions: Vec<(Name, ValueDefinition<TA, VA>)>,
        in_value: Value<TA, VA>,
    ) -> Self {
        Value::LetRecursion(attrs, definitions, Box::new(in_value))
    }

    pub fn destructure(
        attrs: VA,
        pattern: Pattern<VA>,
        value_to_destruct: Value<TA, VA>,
        in_value: Value<TA, VA>,
    ) -> Self {
        Value::Destructure(
            attrs,
            pattern,
            Box::new(value_to_destruct),
            Box::new(in_value),
        )
    }

    pub fn if_then_else(
        attrs: VA,
        condition: Value<TA, VA>,
        then_branch: Value<TA, VA>,
        else_branch: Value<TA, VA>,
    ) -> Self {
        Value::IfThenElse(
            attrs,
            Box::new(condition),
            Box::new(then_branch),
            Box::new(else_branch),
        )
    }

    pub fn pattern_match(
        attrs: VA,
        subject: Value<TA, VA>,
        cases: Vec<(Pattern<VA>, Value<TA, VA>)>,
    ) -> Self {
        Value::PatternMatch(attrs, Box::new(subject), cases)
    }

    pub fn update_record(
        attrs: VA,
        value_to_update: Value<TA, VA>,
        fields: Vec<(Name, Value<TA, VA>)>,
    ) -> Self {
        Value::UpdateRecord(attrs, Box::new(value_to_update), fields)
    }
}

/// A function or value with its signature and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueDefinition<TA, VA> {
    /// Arguments as (name, value attribute, type).
    pub input_types: Vec<(Name, VA, Type<TA>)>,
    pub output_type: Type<TA>,
    pub body: Value<TA, VA>,
}

impl<TA, VA> ValueDefinition<TA, VA> {
    pub fn new(
        input_types: Vec<(Name, VA, Type<TA>)>,
        output_type: Type<TA>,
        body: Value<TA, VA>,
    ) -> Self {
        Self {
            input_types,
            output_type,
            body,
        }
    }
}

impl<TA: Clone, VA> ValueDefinition<TA, VA> {
    /// The signature of this definition without its body.
    pub fn to_specification(&self) -> ValueSpecification<TA> {
        ValueSpecification {
            inputs: self
                .input_types
                .iter()
                .map(|(name, _, tpe)| (name.clone(), tpe.clone()))
                .collect(),
            output: self.output_type.clone(),
        }
    }
}

/// Signature of a value as seen from outside its module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpecification<TA> {
    pub inputs: Vec<(Name, Type<TA>)>,
    pub output: Type<TA>,
}

impl<TA> ValueSpecification<TA> {
    pub fn new(inputs: Vec<(Name, Type<TA>)>, output: Type<TA>) -> Self {
        Self { inputs, output }
    }
}
