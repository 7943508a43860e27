//! Raw items → normalized nodes. Shared by the tree builder and the streamer.

use crate::api::responses::{RawColumnValue, RawItem};
use crate::model::{BoardSchema, ColumnValue, Creator, DataNode, NodeKind, NodeMetadata};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// An item node plus its subitem nodes, not yet attached anywhere.
pub(crate) struct AssembledItem {
    /// The item, with no children.
    pub item: DataNode,
    /// Subitems in delivery order, each carrying `parent_item_id`.
    pub subitems: Vec<DataNode>,
    /// Group id the item reported, if any.
    pub group_id: Option<String>,
}

/// Column lookup for one schema snapshot.
pub(crate) struct NodeAssembler {
    column_positions: HashMap<String, usize>,
}

impl NodeAssembler {
    pub(crate) fn new(schema: &BoardSchema) -> Self {
        Self {
            column_positions: schema
                .columns
                .iter()
                .enumerate()
                .map(|(index, column)| (column.id.clone(), index))
                .collect(),
        }
    }

    pub(crate) fn assemble(&self, schema: &BoardSchema, mut raw: RawItem) -> AssembledItem {
        let subitems = std::mem::take(&mut raw.subitems);
        let group = raw.group.take();
        let group_id = group
            .as_ref()
            .and_then(|group| group.id.clone())
            .filter(|id| !id.is_empty());

        let mut item = self.node(schema, raw, NodeKind::Item);
        item.metadata.group_id = group_id.clone();
        item.metadata.group_title = group_id
            .as_ref()
            .and(group.and_then(|group| group.title));

        let subitems = subitems
            .into_iter()
            .map(|sub| {
                let mut node = self.node(schema, sub, NodeKind::Subitem);
                node.metadata.parent_item_id = Some(item.id.clone());
                node
            })
            .collect();

        AssembledItem {
            item,
            subitems,
            group_id,
        }
    }

    fn node(&self, schema: &BoardSchema, raw: RawItem, kind: NodeKind) -> DataNode {
        let column_values = self.column_values(schema, &raw.id, raw.column_values);

        DataNode {
            kind,
            id: raw.id,
            name: raw.name,
            column_values,
            children: Vec::new(),
            metadata: NodeMetadata {
                creator: raw.creator.map(|creator| Creator {
                    id: creator.id,
                    name: creator.name,
                }),
                created_at: parse_timestamp(raw.created_at.as_deref()),
                updated_at: parse_timestamp(raw.updated_at.as_deref()),
                state: raw.state,
                ..NodeMetadata::default()
            },
        }
    }

    /// Normalizes values in delivery order; a repeated column id keeps its
    /// first occurrence.
    fn column_values(
        &self,
        schema: &BoardSchema,
        item_id: &str,
        raw_values: Vec<RawColumnValue>,
    ) -> Vec<ColumnValue> {
        let mut seen = HashSet::with_capacity(raw_values.len());
        raw_values
            .into_iter()
            .filter(|raw| {
                let fresh = seen.insert(raw.id.clone());
                if !fresh {
                    log::warn!("Item {}: duplicate column value '{}' dropped", item_id, raw.id);
                }
                fresh
            })
            .map(|raw| {
                let column = self
                    .column_positions
                    .get(&raw.id)
                    .and_then(|&index| schema.columns.get(index));
                ColumnValue::normalize(raw.id, raw.type_tag, raw.text, raw.value, column)
            })
            .collect()
    }
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?;
    match DateTime::parse_from_rfc3339(value) {
        Ok(timestamp) => Some(timestamp.with_timezone(&Utc)),
        Err(e) => {
            log::debug!("Unparseable timestamp '{}': {}", value, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnPayload, ColumnSchema, GroupDescriptor, HierarchyType, RenderHint};
    use crate::types::BoardId;
    use indexmap::IndexMap;
    use serde_json::json;

    fn schema() -> BoardSchema {
        BoardSchema {
            board_id: BoardId::parse("1").unwrap(),
            board_name: "Board".to_string(),
            hierarchy_type: HierarchyType::Classic,
            item_count: Some(1),
            columns: vec![
                ColumnSchema::new("status", "Status", "status", IndexMap::new()),
                ColumnSchema::new("due", "Due date", "date", IndexMap::new()),
            ],
            groups: vec![GroupDescriptor {
                id: "topics".to_string(),
                title: "Topics".to_string(),
                color: Some("#579bfc".to_string()),
            }],
        }
    }

    fn raw_item(value: serde_json::Value) -> RawItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn assembles_item_with_subitems_and_metadata() {
        let schema = schema();
        let assembler = NodeAssembler::new(&schema);
        let assembled = assembler.assemble(
            &schema,
            raw_item(json!({
                "id": "100",
                "name": "Launch",
                "group": {"id": "topics", "title": "Topics"},
                "created_at": "2024-03-01T10:00:00Z",
                "creator": {"id": "7", "name": "Sam"},
                "state": "active",
                "column_values": [
                    {"id": "status", "type": "status", "text": "Done", "value": "{\"index\":1}"},
                    {"id": "due", "type": "date", "text": "", "value": null}
                ],
                "subitems": [
                    {"id": "101", "name": "Press kit", "column_values": []},
                    {"id": "102", "name": "Blog post", "column_values": []}
                ]
            })),
        );

        assert_eq!(assembled.group_id.as_deref(), Some("topics"));
        let item = &assembled.item;
        assert_eq!(item.kind, NodeKind::Item);
        assert!(item.children.is_empty());
        assert_eq!(item.metadata.state.as_deref(), Some("active"));
        assert_eq!(item.metadata.group_title.as_deref(), Some("Topics"));
        assert_eq!(item.metadata.creator.as_ref().map(|c| c.id.as_str()), Some("7"));
        assert!(item.metadata.created_at.is_some());

        let status = item.column_value("status").unwrap();
        assert_eq!(status.render_hint, RenderHint::Status);
        assert_eq!(status.value, Some(ColumnPayload::Structured(json!({"index": 1}))));
        assert_eq!(item.column_value("due").unwrap().value, None);

        let ids: Vec<&str> = assembled.subitems.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["101", "102"]);
        for sub in &assembled.subitems {
            assert_eq!(sub.kind, NodeKind::Subitem);
            assert_eq!(sub.metadata.parent_item_id.as_deref(), Some("100"));
        }
    }

    #[test]
    fn duplicate_column_ids_keep_first() {
        let schema = schema();
        let assembler = NodeAssembler::new(&schema);
        let assembled = assembler.assemble(
            &schema,
            raw_item(json!({
                "id": "5",
                "name": "Dup",
                "column_values": [
                    {"id": "status", "type": "status", "text": "First", "value": null},
                    {"id": "status", "type": "status", "text": "Second", "value": null}
                ]
            })),
        );
        assert_eq!(assembled.item.column_values.len(), 1);
        assert_eq!(assembled.item.column_values[0].text.as_deref(), Some("First"));
    }

    #[test]
    fn missing_group_reports_none() {
        let schema = schema();
        let assembler = NodeAssembler::new(&schema);
        let assembled = assembler.assemble(
            &schema,
            raw_item(json!({"id": "9", "name": "Loose", "group": {"id": ""}})),
        );
        assert_eq!(assembled.group_id, None);
        assert_eq!(assembled.item.metadata.group_id, None);
    }
}
