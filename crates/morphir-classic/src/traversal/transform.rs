//! Transform visitors for the classic IR.
//!
//! A transform rebuilds a tree with every attribute passed through the
//! visitor, producing the same shape with a different attribute type.
//! Implementors only define the attribute functions; the `walk_*` functions
//! handle the recursion. For one-off mappings use the `map_*` and `try_map_*`
//! functions, which wrap plain closures. The walks grow the stack on demand,
//! so arbitrarily deep trees are safe to transform.
//!
//! ```
//! use morphir_classic::ir::Type;
//! use morphir_classic::naming::Name;
//! use morphir_classic::traversal::map_type_attributes;
//!
//! let tpe = Type::Variable(7u32, Name::from_str("a"));
//! let mapped = map_type_attributes(&tpe, |n| n.to_string());
//! assert_eq!(mapped, Type::Variable("7".to_string(), Name::from_str("a")));
//! ```

use std::convert::Infallible;
use std::marker::PhantomData;

use crate::ir::{Field, Pattern, Type, Value, ValueDefinition};
use crate::stack::ensure_sufficient_stack;

// =============================================================================
// Type Transform Visitor
// =============================================================================

/// Transforms `Type<AI>` into `Type<AO>`.
pub trait TypeTransformVisitor<AI, AO> {
    type Error;

    fn transform_type_attrs(&self, attrs: &AI) -> Result<AO, Self::Error>;

    fn transform_type(&self, tpe: &Type<AI>) -> Result<Type<AO>, Self::Error> {
        walk_transform_type(self, tpe)
    }

    fn transform_field(&self, field: &Field<AI>) -> Result<Field<AO>, Self::Error> {
        Ok(Field {
            name: field.name.clone(),
            tpe: self.transform_type(&field.tpe)?,
        })
    }
}

pub fn walk_transform_type<AI, AO, V>(visitor: &V, tpe: &Type<AI>) -> Result<Type<AO>, V::Error>
where
    V: TypeTransformVisitor<AI, AO> + ?Sized,
{
    ensure_sufficient_stack(|| transform_type_node(visitor, tpe))
}

fn transform_type_node<AI, AO, V>(visitor: &V, tpe: &Type<AI>) -> Result<Type<AO>, V::Error>
where
    V: TypeTransformVisitor<AI, AO> + ?Sized,
{
    let attrs = visitor.transform_type_attrs(tpe.attributes())?;
    let types = |types: &[Type<AI>]| {
        types
            .iter()
            .map(|t| visitor.transform_type(t))
            .collect::<Result<Vec<_>, _>>()
    };
    let fields = |fields: &[Field<AI>]| {
        fields
            .iter()
            .map(|f| visitor.transform_field(f))
            .collect::<Result<Vec<_>, _>>()
    };

    Ok(match tpe {
        Type::Variable(_, name) => Type::Variable(attrs, name.clone()),
        Type::Reference(_, fqname, params) => Type::Reference(attrs, fqname.clone(), types(params)?),
        Type::Tuple(_, elements) => Type::Tuple(attrs, types(elements)?),
        Type::Record(_, record) => Type::Record(attrs, fields(record)?),
        Type::ExtensibleRecord(_, variable, record) => {
            Type::ExtensibleRecord(attrs, variable.clone(), fields(record)?)
        }
        Type::Function(_, argument, result) => Type::Function(
            attrs,
            Box::new(visitor.transform_type(argument)?),
            Box::new(visitor.transform_type(result)?),
        ),
        Type::Unit(_) => Type::Unit(attrs),
    })
}

// =============================================================================
// Pattern Transform Visitor
// =============================================================================

/// Transforms `Pattern<AI>` into `Pattern<AO>`.
pub trait PatternTransformVisitor<AI, AO> {
    type Error;

    fn transform_pattern_attrs(&self, attrs: &AI) -> Result<AO, Self::Error>;

    fn transform_pattern(&self, pattern: &Pattern<AI>) -> Result<Pattern<AO>, Self::Error> {
        walk_transform_pattern(self, pattern)
    }
}

pub fn walk_transform_pattern<AI, AO, V>(
    visitor: &V,
    pattern: &Pattern<AI>,
) -> Result<Pattern<AO>, V::Error>
where
    V: PatternTransformVisitor<AI, AO> + ?Sized,
{
    ensure_sufficient_stack(|| transform_pattern_node(visitor, pattern))
}

fn transform_pattern_node<AI, AO, V>(
    visitor: &V,
    pattern: &Pattern<AI>,
) -> Result<Pattern<AO>, V::Error>
where
    V: PatternTransformVisitor<AI, AO> + ?Sized,
{
    let attrs = visitor.transform_pattern_attrs(pattern.attributes())?;
    let child = |p: &Pattern<AI>| visitor.transform_pattern(p);
    let children = |ps: &[Pattern<AI>]| ps.iter().map(child).collect::<Result<Vec<_>, _>>();

    Ok(match pattern {
        Pattern::Wildcard(_) => Pattern::Wildcard(attrs),
        Pattern::As(_, subject, name) => Pattern::As(attrs, Box::new(child(subject)?), name.clone()),
        Pattern::Tuple(_, elements) => Pattern::Tuple(attrs, children(elements)?),
        Pattern::Constructor(_, fqname, args) => {
            Pattern::Constructor(attrs, fqname.clone(), children(args)?)
        }
        Pattern::EmptyList(_) => Pattern::EmptyList(attrs),
        Pattern::HeadTail(_, head, tail) => {
            Pattern::HeadTail(attrs, Box::new(child(head)?), Box::new(child(tail)?))
        }
        Pattern::Literal(_, literal) => Pattern::Literal(attrs, literal.clone()),
        Pattern::Unit(_) => Pattern::Unit(attrs),
    })
}

// =============================================================================
// Value Transform Visitor
// =============================================================================

/// Transforms `Value<TAI, VAI>` into `Value<TAO, VAO>`.
///
/// Type attributes are mapped wherever a type appears (let definition inputs
/// and output types included); value attributes are mapped on every value and
/// pattern node.
pub trait ValueTransformVisitor<TAI, TAO, VAI, VAO> {
    type Error;

    fn transform_type_attrs(&self, attrs: &TAI) -> Result<TAO, Self::Error>;

    fn transform_value_attrs(&self, attrs: &VAI) -> Result<VAO, Self::Error>;

    fn transform_type(&self, tpe: &Type<TAI>) -> Result<Type<TAO>, Self::Error> {
        walk_transform_type(&TypeSide::<_, VAI, VAO>::new(self), tpe)
    }

    fn transform_pattern(&self, pattern: &Pattern<VAI>) -> Result<Pattern<VAO>, Self::Error> {
        walk_transform_pattern(&PatternSide::<_, TAI, TAO>::new(self), pattern)
    }

    fn transform_value(&self, value: &Value<TAI, VAI>) -> Result<Value<TAO, VAO>, Self::Error> {
        walk_transform_value(self, value)
    }

    fn transform_value_definition(
        &self,
        def: &ValueDefinition<TAI, VAI>,
    ) -> Result<ValueDefinition<TAO, VAO>, Self::Error> {
        walk_transform_value_definition(self, def)
    }
}

pub fn walk_transform_value<TAI, TAO, VAI, VAO, V>(
    visitor: &V,
    value: &Value<TAI, VAI>,
) -> Result<Value<TAO, VAO>, V::Error>
where
    V: ValueTransformVisitor<TAI, TAO, VAI, VAO> + ?Sized,
{
    ensure_sufficient_stack(|| transform_value_node(visitor, value))
}

fn transform_value_node<TAI, TAO, VAI, VAO, V>(
    visitor: &V,
    value: &Value<TAI, VAI>,
) -> Result<Value<TAO, VAO>, V::Error>
where
    V: ValueTransformVisitor<TAI, TAO, VAI, VAO> + ?Sized,
{
    let attrs = visitor.transform_value_attrs(value.attributes())?;
    let child = |v: &Value<TAI, VAI>| visitor.transform_value(v);
    let boxed = |v: &Value<TAI, VAI>| child(v).map(Box::new);
    let children = |vs: &[Value<TAI, VAI>]| vs.iter().map(child).collect::<Result<Vec<_>, _>>();
    let named = |fields: &[(crate::naming::Name, Value<TAI, VAI>)]| {
        fields
            .iter()
            .map(|(name, v)| Ok((name.clone(), child(v)?)))
            .collect::<Result<Vec<_>, V::Error>>()
    };

    Ok(match value {
        Value::Literal(_, literal) => Value::Literal(attrs, literal.clone()),
        Value::Constructor(_, fqname) => Value::Constructor(attrs, fqname.clone()),
        Value::Tuple(_, elements) => Value::Tuple(attrs, children(elements)?),
        Value::List(_, items) => Value::List(attrs, children(items)?),
        Value::Record(_, fields) => Value::Record(attrs, named(fields)?),
        Value::Variable(_, name) => Value::Variable(attrs, name.clone()),
        Value::Reference(_, fqname) => Value::Reference(attrs, fqname.clone()),
        Value::Field(_, subject, name) => Value::Field(attrs, boxed(subject)?, name.clone()),
        Value::FieldFunction(_, name) => Value::FieldFunction(attrs, name.clone()),
        Value::Apply(_, function, argument) => {
            Value::Apply(attrs, boxed(function)?, boxed(argument)?)
        }
        Value::Lambda(_, argument, body) => {
            Value::Lambda(attrs, visitor.transform_pattern(argument)?, boxed(body)?)
        }
        Value::LetDefinition(_, name, definition, in_value) => Value::LetDefinition(
            attrs,
            name.clone(),
            Box::new(visitor.transform_value_definition(definition)?),
            boxed(in_value)?,
        ),
        Value::LetRecursion(_, definitions, in_value) => {
            let definitions = definitions
                .iter()
                .map(|(name, def)| Ok((name.clone(), visitor.transform_value_definition(def)?)))
                .collect::<Result<Vec<_>, V::Error>>()?;
            Value::LetRecursion(attrs, definitions, boxed(in_value)?)
        }
        Value::Destructure(_, pattern, value, in_value) => Value::Destructure(
            attrs,
            visitor.transform_pattern(pattern)?,
            boxed(value)?,
            boxed(in_value)?,
        ),
        Value::IfThenElse(_, condition, then_branch, else_branch) => Value::IfThenElse(
            attrs,
            boxed(condition)?,
            boxed(then_branch)?,
            boxed(else_branch)?,
        ),
        Value::PatternMatch(_, subject, cases) => {
            let cases = cases
                .iter()
                .map(|(pattern, body)| Ok((visitor.transform_pattern(pattern)?, child(body)?)))
                .collect::<Result<Vec<_>, V::Error>>()?;
            Value::PatternMatch(attrs, boxed(subject)?, cases)
        }
        Value::UpdateRecord(_, subject, fields) => {
            Value::UpdateRecord(attrs, boxed(subject)?, named(fields)?)
        }
        Value::Unit(_) => Value::Unit(attrs),
    })
}

pub fn walk_transform_value_definition<TAI, TAO, VAI, VAO, V>(
    visitor: &V,
    def: &ValueDefinition<TAI, VAI>,
) -> Result<ValueDefinition<TAO, VAO>, V::Error>
where
    V: ValueTransformVisitor<TAI, TAO, VAI, VAO> + ?Sized,
{
    let input_types = def
        .input_types
        .iter()
        .map(|(name, attrs, tpe)| {
            Ok((
                name.clone(),
                visitor.transform_value_attrs(attrs)?,
                visitor.transform_type(tpe)?,
            ))
        })
        .collect::<Result<Vec<_>, V::Error>>()?;
    Ok(ValueDefinition {
        input_types,
        output_type: visitor.transform_type(&def.output_type)?,
        body: visitor.transform_value(&def.body)?,
    })
}

/// Views a value visitor as a type visitor over its type attributes.
struct TypeSide<'v, V: ?Sized, VAI, VAO> {
    visitor: &'v V,
    _value_attrs: PhantomData<fn(&VAI) -> VAO>,
}

impl<'v, V: ?Sized, VAI, VAO> TypeSide<'v, V, VAI, VAO> {
    fn new(visitor: &'v V) -> Self {
        Self {
            visitor,
            _value_attrs: PhantomData,
        }
    }
}

impl<TAI, TAO, VAI, VAO, V> TypeTransformVisitor<TAI, TAO> for TypeSide<'_, V, VAI, VAO>
where
    V: ValueTransformVisitor<TAI, TAO, VAI, VAO> + ?Sized,
{
    type Error = V::Error;

    fn transform_type_attrs(&self, attrs: &TAI) -> Result<TAO, Self::Error> {
        self.visitor.transform_type_attrs(attrs)
    }

    fn transform_type(&self, tpe: &Type<TAI>) -> Result<Type<TAO>, Self::Error> {
        self.visitor.transform_type(tpe)
    }
}

/// Views a value visitor as a pattern visitor over its value attributes.
struct PatternSide<'v, V: ?Sized, TAI, TAO> {
    visitor: &'v V,
    _type_attrs: PhantomData<fn(&TAI) -> TAO>,
}

impl<'v, V: ?Sized, TAI, TAO> PatternSide<'v, V, TAI, TAO> {
    fn new(visitor: &'v V) -> Self {
        Self {
            visitor,
            _type_attrs: PhantomData,
        }
    }
}

impl<TAI, TAO, VAI, VAO, V> PatternTransformVisitor<VAI, VAO> for PatternSide<'_, V, TAI, TAO>
where
    V: ValueTransformVisitor<TAI, TAO, VAI, VAO> + ?Sized,
{
    type Error = V::Error;

    fn transform_pattern_attrs(&self, attrs: &VAI) -> Result<VAO, Self::Error> {
        self.visitor.transform_value_attrs(attrs)
    }

    fn transform_pattern(&self, pattern: &Pattern<VAI>) -> Result<Pattern<VAO>, Self::Error> {
        self.visitor.transform_pattern(pattern)
    }
}

// =============================================================================
// Closure adapters
// =============================================================================

struct AttrFn<F, E> {
    f: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> AttrFn<F, E> {
    fn new(f: F) -> Self {
        Self {
            f,
            _error: PhantomData,
        }
    }
}

impl<AI, AO, E, F> TypeTransformVisitor<AI, AO> for AttrFn<F, E>
where
    F: Fn(&AI) -> Result<AO, E>,
{
    type Error = E;

    fn transform_type_attrs(&self, attrs: &AI) -> Result<AO, E> {
        (self.f)(attrs)
    }
}

impl<AI, AO, E, F> PatternTransformVisitor<AI, AO> for AttrFn<F, E>
where
    F: Fn(&AI) -> Result<AO, E>,
{
    type Error = E;

    fn transform_pattern_attrs(&self, attrs: &AI) -> Result<AO, E> {
        (self.f)(attrs)
    }
}

struct AttrFns<FT, FV, E> {
    type_attrs: FT,
    value_attrs: FV,
    _error: PhantomData<fn() -> E>,
}

impl<FT, FV, E> AttrFns<FT, FV, E> {
    fn new(type_attrs: FT, value_attrs: FV) -> Self {
        Self {
            type_attrs,
            value_attrs,
            _error: PhantomData,
        }
    }
}

impl<TAI, TAO, VAI, VAO, E, FT, FV> ValueTransformVisitor<TAI, TAO, VAI, VAO> for AttrFns<FT, FV, E>
where
    FT: Fn(&TAI) -> Result<TAO, E>,
    FV: Fn(&VAI) -> Result<VAO, E>,
{
    type Error = E;

    fn transform_type_attrs(&self, attrs: &TAI) -> Result<TAO, E> {
        (self.type_attrs)(attrs)
    }

    fn transform_value_attrs(&self, attrs: &VAI) -> Result<VAO, E> {
        (self.value_attrs)(attrs)
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

// =============================================================================
// Mapping functions
// =============================================================================

pub fn try_map_type_attributes<A, B, E, F>(tpe: &Type<A>, f: F) -> Result<Type<B>, E>
where
    F: Fn(&A) -> Result<B, E>,
{
    AttrFn::new(f).transform_type(tpe)
}

pub fn map_type_attributes<A, B, F>(tpe: &Type<A>, f: F) -> Type<B>
where
    F: Fn(&A) -> B,
{
    infallible(try_map_type_attributes(tpe, |a| Ok(f(a))))
}

pub fn try_map_pattern_attributes<A, B, E, F>(pattern: &Pattern<A>, f: F) -> Result<Pattern<B>, E>
where
    F: Fn(&A) -> Result<B, E>,
{
    AttrFn::new(f).transform_pattern(pattern)
}

pub fn map_pattern_attributes<A, B, F>(pattern: &Pattern<A>, f: F) -> Pattern<B>
where
    F: Fn(&A) -> B,
{
    infallible(try_map_pattern_attributes(pattern, |a| Ok(f(a))))
}

/// Maps both attribute types of a value. `map_type` applies to every type
/// inside the value, `map_value` to every value and pattern node.
pub fn try_map_value_attributes<TA, TB, VA, VB, E, FT, FV>(
    value: &Value<TA, VA>,
    map_type: FT,
    map_value: FV,
) -> Result<Value<TB, VB>, E>
where
    FT: Fn(&TA) -> Result<TB, E>,
    FV: Fn(&VA) -> Result<VB, E>,
{
    AttrFns::new(map_type, map_value).transform_value(value)
}

pub fn map_value_attributes<TA, TB, VA, VB, FT, FV>(
    value: &Value<TA, VA>,
    map_type: FT,
    map_value: FV,
) -> Value<TB, VB>
where
    FT: Fn(&TA) -> TB,
    FV: Fn(&VA) -> VB,
{
    infallible(try_map_value_attributes(
        value,
        |a| Ok(map_type(a)),
        |a| Ok(map_value(a)),
    ))
}

pub fn try_map_value_definition_attributes<TA, TB, VA, VB, E, FT, FV>(
    def: &ValueDefinition<TA, VA>,
    map_type: FT,
    map_value: FV,
) -> Result<ValueDefinition<TB, VB>, E>
where
    FT: Fn(&TA) -> Result<TB, E>,
    FV: Fn(&VA) -> Result<VB, E>,
{
    AttrFns::new(map_type, map_value).transform_value_definition(def)
}

pub fn map_value_definition_attributes<TA, TB, VA, VB, FT, FV>(
    def: &ValueDefinition<TA, VA>,
    map_type: FT,
    map_value: FV,
) -> ValueDefinition<TB, VB>
where
    FT: Fn(&TA) -> TB,
    FV: Fn(&VA) -> VB,
{
    infallible(try_map_value_definition_attributes(
        def,
        |a| Ok(map_type(a)),
        |a| Ok(map_value(a)),
    ))
}
