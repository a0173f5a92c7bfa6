//! Generic tree operations: structural equality, attribute remapping and
//! read-only enter/exit walks.

pub mod equality;
pub mod transform;
pub mod visit;

pub use equality::{equal_pattern, equal_type, equal_value, equal_value_definition};
pub use transform::{
    PatternTransformVisitor, TypeTransformVisitor, ValueTransformVisitor, map_pattern_attributes,
    map_type_attributes, map_value_attributes, map_value_definition_attributes,
    try_map_pattern_attributes, try_map_type_attributes, try_map_value_attributes,
    try_map_value_definition_attributes, walk_transform_pattern, walk_transform_type,
    walk_transform_value, walk_transform_value_definition,
};
pub use visit::{
    PatternVisitor, TraversalAction, TypeVisitor, ValueVisitor, walk_pattern, walk_type,
    walk_value, walk_value_definition,
};
