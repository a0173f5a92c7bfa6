//! Package specifications and definitions.

use indexmap::IndexMap;

use super::access::AccessControlled;
use super::module::{ModuleDefinition, ModuleSpecification};
use crate::naming::Path;

/// Interface of a package: the specification of every exposed module.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageSpecification<TA> {
    pub modules: IndexMap<Path, ModuleSpecification<TA>>,
}

impl<TA> PackageSpecification<TA> {
    pub fn new() -> Self {
        Self {
            modules: IndexMap::new(),
        }
    }
}

impl<TA> Default for PackageSpecification<TA> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implementation of a package, keyed by module path.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDefinition<TA, VA> {
    pub modules: IndexMap<Path, AccessControlled<ModuleDefinition<TA, VA>>>,
}

impl<TA, VA> PackageDefinition<TA, VA> {
    pub fn new() -> Self {
        Self {
            modules: IndexMap::new(),
        }
    }

    pub fn lookup_module_definition(&self, path: &Path) -> Option<&ModuleDefinition<TA, VA>> {
        self.modules.get(path).map(|entry| &entry.value)
    }
}

impl<TA, VA> Default for PackageDefinition<TA, VA> {
    fn default() -> Self {
        Self::new()
    }
}

impl<TA: Clone, VA> PackageDefinition<TA, VA> {
    /// Specifications of the public modules of this package.
    pub fn to_specification(&self) -> PackageSpecification<TA> {
        PackageSpecification {
            modules: self
                .modules
                .iter()
                .filter_map(|(path, entry)| {
                    let module = entry.with_public_access()?;
                    Some((path.clone(), module.to_specification()))
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_specification_skips_private_modules() {
        let mut package: PackageDefinition<(), ()> = PackageDefinition::new();
        package
            .modules
            .insert(Path::from_str("Api"), AccessControlled::public(ModuleDefinition::new()));
        package
            .modules
            .insert(Path::from_str("Internal"), AccessControlled::private(ModuleDefinition::new()));

        let spec = package.to_specification();
        assert_eq!(spec.modules.len(), 1);
        assert!(spec.modules.contains_key(&Path::from_str("Api")));
        assert!(package.lookup_module_definition(&Path::from_str("Internal")).is_some());
    }
}
