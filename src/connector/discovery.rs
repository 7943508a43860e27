use super::BoardConnector;
use crate::api::parser::decode_data;
use crate::api::queries::BOARD_SCHEMA_QUERY;
use crate::api::responses::{BoardsData, RawBoard, RawColumn, RawGroup};
use crate::api::GraphQlTransport;
use crate::error::AppError;
use crate::model::{BoardSchema, ColumnSchema, GroupDescriptor, HierarchyType};
use crate::types::BoardId;
use indexmap::IndexMap;
use serde_json::{json, Value};

impl<T: GraphQlTransport> BoardConnector<T> {
    /// Fetches a fresh snapshot of the board's columns, groups and counts.
    ///
    /// Fails with `NotFound` when the id resolves to no board. A column whose
    /// settings cannot be decoded keeps empty settings; the rest of the schema
    /// is unaffected.
    pub fn discover_board_schema(&self, board_id: &BoardId) -> Result<BoardSchema, AppError> {
        log::debug!("Discovering schema for board {}", board_id);

        let data = self
            .transport
            .query(BOARD_SCHEMA_QUERY, json!({ "boardId": board_id.as_str() }))?;
        let response: BoardsData<RawBoard> = decode_data(data, "board schema")?;

        let board = response
            .boards
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound {
                board_id: board_id.as_str().to_string(),
            })?;

        let schema = build_schema(board);
        log::info!(
            "Board '{}' ({}): {} columns, {} groups, {} items",
            schema.board_name,
            schema.board_id,
            schema.columns.len(),
            schema.groups.len(),
            schema
                .item_count
                .map_or_else(|| "unknown".to_string(), |n| n.to_string())
        );
        Ok(schema)
    }
}

fn build_schema(board: RawBoard) -> BoardSchema {
    BoardSchema {
        board_id: BoardId::from_normalized(board.id),
        board_name: board.name,
        hierarchy_type: HierarchyType::from_api(board.hierarchy_type.as_deref()),
        item_count: board.items_count,
        columns: board.columns.into_iter().map(build_column).collect(),
        groups: board.groups.into_iter().map(build_group).collect(),
    }
}

pub(crate) fn build_group(group: RawGroup) -> GroupDescriptor {
    GroupDescriptor {
        id: group.id,
        title: group.title,
        color: group.color,
    }
}

pub(crate) fn build_column(column: RawColumn) -> ColumnSchema {
    let settings = column
        .settings_str
        .as_deref()
        .map(|raw| decode_settings(&column.id, raw))
        .unwrap_or_default();
    ColumnSchema::new(column.id, column.title, column.type_tag, settings)
}

/// Decodes a column's `settings_str`. Anything but a JSON object degrades to
/// empty settings.
fn decode_settings(column_id: &str, raw: &str) -> IndexMap<String, Value> {
    if raw.trim().is_empty() {
        return IndexMap::new();
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map.into_iter().collect(),
        Ok(other) => {
            log::warn!(
                "Settings for column '{}' are not an object ({}); ignoring",
                column_id,
                type_name(&other)
            );
            IndexMap::new()
        }
        Err(e) => {
            log::warn!("Malformed settings for column '{}': {}", column_id, e);
            IndexMap::new()
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
