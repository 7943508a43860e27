use super::column_value::ColumnValue;
use super::schema::{BoardSchema, GroupDescriptor};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which level of the board hierarchy a node sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Board,
    Group,
    Item,
    Subitem,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Board => "board",
            NodeKind::Group => "group",
            NodeKind::Item => "item",
            NodeKind::Subitem => "subitem",
        };
        f.write_str(name)
    }
}

/// Account that created an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub id: String,
    pub name: Option<String>,
}

/// Side information attached to a node.
///
/// Relationships are recorded as ids, never as references into the tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeMetadata {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub creator: Option<Creator>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub group_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parent_item_id: Option<String>,
}

/// A node of the normalized board tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataNode {
    pub kind: NodeKind,
    pub id: String,
    pub name: String,
    pub column_values: Vec<ColumnValue>,
    pub children: Vec<DataNode>,
    pub metadata: NodeMetadata,
}

impl DataNode {
    /// The root node for a board, without children.
    pub fn board(schema: &BoardSchema) -> Self {
        Self {
            kind: NodeKind::Board,
            id: schema.board_id.as_str().to_string(),
            name: schema.board_name.clone(),
            column_values: Vec::new(),
            children: Vec::new(),
            metadata: NodeMetadata::default(),
        }
    }

    /// A group node, without children.
    pub fn group(group: &GroupDescriptor) -> Self {
        Self {
            kind: NodeKind::Group,
            id: group.id.clone(),
            name: group.title.clone(),
            column_values: Vec::new(),
            children: Vec::new(),
            metadata: NodeMetadata {
                group_id: Some(group.id.clone()),
                group_title: Some(group.title.clone()),
                color: group.color.clone(),
                ..NodeMetadata::default()
            },
        }
    }

    pub fn column_value(&self, id: &str) -> Option<&ColumnValue> {
        self.column_values.iter().find(|value| value.id == id)
    }

    /// Pre-order walk over this node and all of its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Finds the first node of `kind` with `id` anywhere in this subtree.
    pub fn find(&self, kind: NodeKind, id: &str) -> Option<&DataNode> {
        self.walk().find(|node| node.kind == kind && node.id == id)
    }

    /// Number of nodes of `kind` in this subtree.
    pub fn count(&self, kind: NodeKind) -> usize {
        self.walk().filter(|node| node.kind == kind).count()
    }
}

/// Pre-order iterator returned by [`DataNode::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a DataNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a DataNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
