//! Type expressions and type declarations.

use super::access::AccessControlled;
use crate::naming::{FQName, Name};

// ----------------------------------------------------------------------------
// Type Enum
// ----------------------------------------------------------------------------

/// Type expression with generic attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type<A> {
    /// Type variable such as `a` in `List a`.
    Variable(A, Name),
    /// Reference to a named type with type arguments.
    Reference(A, FQName, Vec<Type<A>>),
    Tuple(A, Vec<Type<A>>),
    Record(A, Vec<Field<A>>),
    /// Record that contains at least the listed fields, `{ a | name : String }`.
    ExtensibleRecord(A, Name, Vec<Field<A>>),
    Function(A, Box<Type<A>>, Box<Type<A>>),
    Unit(A),
}

impl<A> Type<A> {
    pub fn attributes(&self) -> &A {
        match self {
            Type::Variable(a, _)
            | Type::Reference(a, _, _)
            | Type::Tuple(a, _)
            | Type::Record(a, _)
            | Type::ExtensibleRecord(a, _, _)
            | Type::Function(a, _, _)
            | Type::Unit(a) => a,
        }
    }

    pub fn function(attrs: A, argument: Type<A>, result: Type<A>) -> Self {
        Type::Function(attrs, Box::new(argument), Box::new(result))
    }
}

/// Record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<A> {
    pub name: Name,
    pub tpe: Type<A>,
}

impl<A> Field<A> {
    pub fn new(name: Name, tpe: Type<A>) -> Self {
        Self { name, tpe }
    }
}

// ----------------------------------------------------------------------------
// Constructors
// ----------------------------------------------------------------------------

/// One constructor of a custom type with its named arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor<A> {
    pub name: Name,
    pub args: Vec<(Name, Type<A>)>,
}

impl<A> Constructor<A> {
    pub fn new(name: Name, args: Vec<(Name, Type<A>)>) -> Self {
        Self { name, args }
    }
}

/// The constructors of a custom type, in declaration order.
pub type TypeConstructors<A> = Vec<Constructor<A>>;

// ----------------------------------------------------------------------------
// Specification and Definition
// ----------------------------------------------------------------------------

/// Public interface of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpecification<A> {
    TypeAlias(Vec<Name>, Type<A>),
    /// Exposed name only, constructors hidden.
    Opaque(Vec<Name>),
    Custom(Vec<Name>, TypeConstructors<A>),
    /// Opaque type that converts to and from a base type.
    Derived(Vec<Name>, DerivedTypeDetails<A>),
}

impl<A> TypeSpecification<A> {
    pub fn type_params(&self) -> &[Name] {
        match self {
            TypeSpecification::TypeAlias(params, _)
            | TypeSpecification::Opaque(params)
            | TypeSpecification::Custom(params, _)
            | TypeSpecification::Derived(params, _) => params,
        }
    }
}

/// Conversion functions of a derived type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedTypeDetails<A> {
    pub base_type: Type<A>,
    pub from_base_type: FQName,
    pub to_base_type: FQName,
}

/// Full declaration of a type inside a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefinition<A> {
    TypeAlias(Vec<Name>, Type<A>),
    /// Constructors can be private while the type itself is public.
    Custom(Vec<Name>, AccessControlled<TypeConstructors<A>>),
}

impl<A: Clone> TypeDefinition<A> {
    /// The interface this definition exposes outside its module.
    pub fn to_specification(&self) -> TypeSpecification<A> {
        match self {
            TypeDefinition::TypeAlias(params, tpe) => {
                TypeSpecification::TypeAlias(params.clone(), tpe.clone())
            }
            TypeDefinition::Custom(params, ctors) => match ctors.with_public_access() {
                Some(ctors) => TypeSpecification::Custom(params.clone(), ctors.clone()),
                None => TypeSpecification::Opaque(params.clone()),
            },
        }
    }
}
