// tests/common/mod.rs
//! Shared fixtures: an in-memory monday.com board that pages like the real API.

#![allow(dead_code)]

use monday_sync::{AppError, DataNode, GraphQlTransport, NodeKind};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One recorded GraphQL call.
#[derive(Debug, Clone)]
pub struct Call {
    pub operation: &'static str,
    pub variables: Value,
}

/// Serves a board's schema and items, cutting pages by `limit` and issuing
/// offset cursors (`"c<offset>"`).
pub struct FakeBoard {
    board: Value,
    items: Vec<Value>,
    fail_on_page: Option<usize>,
    calls: Mutex<Vec<Call>>,
}

impl FakeBoard {
    pub fn new(board: Value, items: Vec<Value>) -> Self {
        Self {
            board,
            items,
            fail_on_page: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Board that doesn't exist: discovery sees an empty `boards` list.
    pub fn missing() -> Self {
        Self::new(Value::Null, Vec::new())
    }

    /// Makes the n-th item page request (0-based) fail with HTTP 500.
    pub fn failing_on_page(mut self, page: usize) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn page_requests(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.operation == "items")
            .count()
    }

    fn items_page(&self, variables: &Value) -> Value {
        let offset = variables["cursor"]
            .as_str()
            .map(|cursor| cursor.trim_start_matches('c').parse::<usize>().unwrap())
            .unwrap_or(0);
        let limit = variables["limit"].as_u64().unwrap() as usize;
        let end = (offset + limit).min(self.items.len());
        let cursor = if end < self.items.len() {
            json!(format!("c{}", end))
        } else {
            Value::Null
        };

        json!({
            "boards": [{
                "items_page": {
                    "cursor": cursor,
                    "items": self.items[offset..end].to_vec(),
                }
            }]
        })
    }
}

impl GraphQlTransport for FakeBoard {
    fn query(&self, query: &str, variables: Value) -> Result<Value, AppError> {
        let operation = if query.contains("DiscoverSchema") {
            "schema"
        } else if query.contains("GetBoardItems") {
            "items"
        } else {
            panic!("unexpected operation: {}", query)
        };

        let page_index = self.page_requests();
        self.calls.lock().unwrap().push(Call {
            operation,
            variables: variables.clone(),
        });

        match operation {
            "schema" if self.board.is_null() => Ok(json!({ "boards": [] })),
            "schema" => Ok(json!({ "boards": [self.board.clone()] })),
            _ if self.fail_on_page == Some(page_index) => Err(AppError::Http {
                status: 500,
                body_preview: "Internal Server Error".to_string(),
            }),
            _ => Ok(self.items_page(&variables)),
        }
    }
}

/// Replays canned responses in order.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, AppError>>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<Value, AppError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

impl GraphQlTransport for ScriptedTransport {
    fn query(&self, _query: &str, _variables: Value) -> Result<Value, AppError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("script ran out of responses")
    }
}

/// Board JSON as the schema query returns it.
pub fn board_json(items_count: Option<u64>, groups: &[(&str, &str)]) -> Value {
    json!({
        "id": "4001",
        "name": "Ana - Apollo - Tasks",
        "hierarchy_type": "classic",
        "items_count": items_count,
        "columns": [
            {"id": "name", "title": "Name", "type": "name", "settings_str": "{}"},
            {"id": "status", "title": "Status", "type": "status",
             "settings_str": "{\"labels\": {\"0\": \"Working on it\", \"1\": \"Done\"}}"},
            {"id": "date4", "title": "Due date", "type": "date", "settings_str": "{}"}
        ],
        "groups": groups
            .iter()
            .map(|(id, title)| json!({"id": id, "title": title, "color": "#579bfc"}))
            .collect::<Vec<_>>(),
    })
}

/// Item JSON with a status value and the given subitems.
pub fn item_json(id: &str, group: Option<&str>, subitems: &[&str]) -> Value {
    json!({
        "id": id,
        "name": format!("Item {}", id),
        "group": group.map(|g| json!({"id": g, "title": g.to_uppercase()})),
        "created_at": "2024-03-01T10:00:00Z",
        "updated_at": "2024-03-02T10:00:00Z",
        "creator": {"id": "7", "name": "Sam"},
        "state": "active",
        "column_values": [
            {"id": "status", "type": "status", "text": "Done", "value": "{\"index\":1}"},
            {"id": "date4", "type": "date", "text": "2026-01-15", "value": "{\"date\":\"2026-01-15\"}"}
        ],
        "subitems": subitems
            .iter()
            .map(|sub| json!({"id": sub, "name": format!("Sub {}", sub), "column_values": []}))
            .collect::<Vec<_>>(),
    })
}

/// `n` items round-robined over groups `a` and `b`, every third with a subitem.
pub fn numbered_items(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            let id = format!("{}", 10_000 + i);
            let group = if i % 2 == 0 { "a" } else { "b" };
            let sub = format!("{}", 50_000 + i);
            if i % 3 == 0 {
                item_json(&id, Some(group), &[sub.as_str()])
            } else {
                item_json(&id, Some(group), &[])
            }
        })
        .collect()
}

/// A tree reduced to kinds and ids, for readable comparisons.
#[derive(Debug, PartialEq)]
pub struct Shape(pub NodeKind, pub String, pub Vec<Shape>);

pub fn shape(node: &DataNode) -> Shape {
    Shape(
        node.kind,
        node.id.clone(),
        node.children.iter().map(shape).collect(),
    )
}

pub fn leaf(kind: NodeKind, id: &str) -> Shape {
    Shape(kind, id.to_string(), Vec::new())
}
