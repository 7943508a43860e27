//! Board schema snapshot: columns, groups and board-level facts.

use super::render_hint::{render_hint, RenderHint};
use crate::types::BoardId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a board nests its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyType {
    #[default]
    Classic,
    MultiLevel,
}

impl HierarchyType {
    /// Interprets the API's `hierarchy_type` field. Missing or unrecognised
    /// values are treated as classic boards.
    pub fn from_api(value: Option<&str>) -> Self {
        match value {
            Some("multi_level") => Self::MultiLevel,
            Some("classic") | None => Self::Classic,
            Some(other) => {
                log::debug!("Unknown hierarchy_type '{}', treating as classic", other);
                Self::Classic
            }
        }
    }
}

/// A column definition applied to every item on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Decoded `settings_str`; empty when absent or malformed.
    pub settings: IndexMap<String, Value>,
    pub render_hint: RenderHint,
    /// Label set for enumerated columns (status, dropdown, color picker).
    pub labels: IndexMap<String, String>,
}

impl ColumnSchema {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        type_tag: impl Into<String>,
        settings: IndexMap<String, Value>,
    ) -> Self {
        let type_tag = type_tag.into();
        let render_hint = render_hint(&type_tag);
        let labels = if render_hint.is_enumerated() {
            extract_labels(&settings)
        } else {
            IndexMap::new()
        };

        Self {
            id: id.into(),
            title: title.into(),
            type_tag,
            settings,
            render_hint,
            labels,
        }
    }
}

/// Reads the `labels` setting. Status columns store an index → label object,
/// dropdowns a list of `{id, name}` entries.
fn extract_labels(settings: &IndexMap<String, Value>) -> IndexMap<String, String> {
    match settings.get("labels") {
        Some(Value::Object(map)) => map
            .iter()
            .filter_map(|(key, label)| label.as_str().map(|l| (key.clone(), l.to_string())))
            .collect(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| {
                let id = match entry.get("id")? {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                let name = entry.get("name")?.as_str()?;
                Some((id, name.to_string()))
            })
            .collect(),
        _ => IndexMap::new(),
    }
}

/// A named subdivision of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDescriptor {
    pub id: String,
    pub title: String,
    pub color: Option<String>,
}

/// Immutable snapshot of a board's structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSchema {
    pub board_id: BoardId,
    pub board_name: String,
    pub hierarchy_type: HierarchyType,
    /// `None` when the service omitted `items_count`.
    pub item_count: Option<u64>,
    pub columns: Vec<ColumnSchema>,
    pub groups: Vec<GroupDescriptor>,
}

impl BoardSchema {
    pub fn column(&self, id: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|column| column.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&GroupDescriptor> {
        self.groups.iter().find(|group| group.id == id)
    }

    /// First column of the given type tag, in schema order.
    pub fn first_column_of_type(&self, type_tag: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|column| column.type_tag == type_tag)
    }

    /// Whether discovery proved the board empty, so paging can be skipped.
    pub fn is_known_empty(&self) -> bool {
        self.item_count == Some(0)
    }
}
