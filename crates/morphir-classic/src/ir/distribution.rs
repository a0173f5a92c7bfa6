//! Distribution - a package bundled with the specifications it depends on.

use indexmap::IndexMap;

use super::package::{PackageDefinition, PackageSpecification};
use super::types::Type;
use crate::naming::Path;

/// Distribution of packages, encoded as ["Library", packageName, dependencies, definition]
///
/// Distributions carry no source information, so type attributes are `()` and
/// value attributes are the inferred `Type<()>` of each value.
#[derive(Debug, Clone, PartialEq)]
pub enum Distribution {
    Library(
        Path,
        IndexMap<Path, PackageSpecification<()>>,
        PackageDefinition<(), Type<()>>,
    ),
}

impl Distribution {
    pub fn package_name(&self) -> &Path {
        match self {
            Distribution::Library(name, _, _) => name,
        }
    }

    /// Looks up a dependency by package name.
    pub fn lookup_dependency(&self, package_name: &Path) -> Option<&PackageSpecification<()>> {
        match self {
            Distribution::Library(_, dependencies, _) => dependencies.get(package_name),
        }
    }
}
