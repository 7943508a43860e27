//! Normalized board model: schema snapshot, tree nodes and column values.

mod column_value;
mod node;
pub mod render_hint;
mod schema;

pub use column_value::{ColumnPayload, ColumnValue};
pub use node::{Creator, DataNode, NodeKind, NodeMetadata, Walk};
pub use render_hint::{render_hint, RenderHint, RENDER_HINT_TABLE};
pub use schema::{BoardSchema, ColumnSchema, GroupDescriptor, HierarchyType};
