//! Menu data model: accessors, tree building, materialization and flattening.

pub mod accessor;
pub mod builder;
pub mod flatten;
pub mod node;
pub mod ordering;

pub use accessor::{Accessor, AccessorError, ItemAccessors};
pub use builder::{BuiltItem, DatasetTreeBuilder, TreeBuilder};
pub use flatten::{flatten, FlatEntry, FlattenedList};
pub use node::{MenuNode, MenuTree, NodeId, NodePath};
pub use ordering::OrderBy;
