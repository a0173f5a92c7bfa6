//! Module specifications (interfaces) and definitions (implementations).

use indexmap::IndexMap;

use super::access::AccessControlled;
use super::documented::Documented;
use super::types::{TypeDefinition, TypeSpecification};
use super::value::{ValueDefinition, ValueSpecification};
use crate::naming::Name;

/// Module interface: exposed types and value signatures, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSpecification<TA> {
    pub types: IndexMap<Name, Documented<TypeSpecification<TA>>>,
    pub values: IndexMap<Name, Documented<ValueSpecification<TA>>>,
    pub doc: Option<String>,
}

impl<TA> ModuleSpecification<TA> {
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
            values: IndexMap::new(),
            doc: None,
        }
    }

    pub fn lookup_type_specification(&self, name: &Name) -> Option<&TypeSpecification<TA>> {
        self.types.get(name).map(|documented| &documented.value)
    }

    pub fn lookup_value_specification(&self, name: &Name) -> Option<&ValueSpecification<TA>> {
        self.values.get(name).map(|documented| &documented.value)
    }
}

impl<TA> Default for ModuleSpecification<TA> {
    fn default() -> Self {
        Self::new()
    }
}

/// Module implementation: every type and value with its access level.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDefinition<TA, VA> {
    pub types: IndexMap<Name, AccessControlled<Documented<TypeDefinition<TA>>>>,
    pub values: IndexMap<Name, AccessControlled<Documented<ValueDefinition<TA, VA>>>>,
    pub doc: Option<String>,
}

impl<TA, VA> ModuleDefinition<TA, VA> {
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
            values: IndexMap::new(),
            doc: None,
        }
    }

    pub fn lookup_value_definition(&self, name: &Name) -> Option<&ValueDefinition<TA, VA>> {
        self.values.get(name).map(|entry| &entry.value.value)
    }
}

impl<TA, VA> Default for ModuleDefinition<TA, VA> {
    fn default() -> Self {
        Self::new()
    }
}

impl<TA: Clone, VA> ModuleDefinition<TA, VA> {
    /// The public interface of this module. Private types and values are dropped
    /// and custom types with private constructors become opaque.
    pub fn to_specification(&self) -> ModuleSpecification<TA> {
        let types = self
            .types
            .iter()
            .filter_map(|(name, entry)| {
                let documented = entry.with_public_access()?;
                Some((name.clone(), documented.map_ref(|def| def.to_specification())))
            })
            .collect();
        let values = self
            .values
            .iter()
            .filter_map(|(name, entry)| {
                let documented = entry.with_public_access()?;
                Some((name.clone(), documented.map_ref(|def| def.to_specification())))
            })
            .collect();

        ModuleSpecification {
            types,
            values,
            doc: self.doc.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Constructor, Type, Value};

    fn unit() -> Type<()> {
        Type::Unit(())
    }

    #[test]
    fn test_to_specification_keeps_public_members_only() {
        let mut module: ModuleDefinition<(), ()> = ModuleDefinition::new();
        module.doc = Some("Money helpers".to_string());
        module.types.insert(
            Name::from_str("Currency"),
            AccessControlled::public(Documented::new(
                "ISO code",
                TypeDefinition::Custom(
                    vec![],
                    AccessControlled::private(vec![Constructor::new(Name::from_str("USD"), vec![])]),
                ),
            )),
        );
        module.types.insert(
            Name::from_str("Hidden"),
            AccessControlled::private(Documented::new("", TypeDefinition::TypeAlias(vec![], unit()))),
        );
        module.values.insert(
            Name::from_str("zero"),
            AccessControlled::public(Documented::new(
                "",
                ValueDefinition::new(vec![], unit(), Value::Unit(())),
            )),
        );
        module.values.insert(
            Name::from_str("helper"),
            AccessControlled::private(Documented::new(
                "",
                ValueDefinition::new(vec![], unit(), Value::Unit(())),
            )),
        );

        let spec = module.to_specification();
        assert_eq!(spec.doc.as_deref(), Some("Money helpers"));
        assert_eq!(spec.types.len(), 1);
        assert_eq!(
            spec.lookup_type_specification(&Name::from_str("Currency")),
            Some(&TypeSpecification::Opaque(vec![]))
        );
        assert!(spec.lookup_type_specification(&Name::from_str("Hidden")).is_none());
        assert_eq!(
            spec.lookup_value_specification(&Name::from_str("zero")),
            Some(&ValueSpecification::new(vec![], unit()))
        );
        assert!(spec.lookup_value_specification(&Name::from_str("helper")).is_none());
        assert!(module.lookup_value_definition(&Name::from_str("helper")).is_some());
    }
}
