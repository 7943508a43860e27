use super::items::{add_update, create_item, ColumnValues, ItemRef};
use super::search::search_boards;
use crate::api::GraphQlTransport;
use crate::constants::BOARD_NAME_SEPARATOR;
use crate::error::AppError;
use crate::types::BoardId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A task to file on a developer's project board, typically lifted from an email.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskRequest {
    pub developer: String,
    pub project: String,
    pub task_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedTask {
    pub board_id: BoardId,
    pub board_name: String,
    pub item: ItemRef,
    /// Set when the description was posted as an update.
    pub update_id: Option<String>,
}

/// Files a task on the first board named `"<developer> - <project>…"`.
///
/// The first status column receives `status` and the first date column
/// receives `due_date`. The description goes in as an update; failing to
/// post it is logged but does not undo the created item.
pub fn create_task_from_email<T: GraphQlTransport>(
    transport: &T,
    request: &TaskRequest,
) -> Result<CreatedTask, AppError> {
    let term = format!(
        "{}{}{}",
        request.developer, BOARD_NAME_SEPARATOR, request.project
    );
    let board = search_boards(transport, &term, 5)?
        .boards
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound {
            board_id: format!("matching '{}'", term),
        })?;

    let mut values = ColumnValues::new();
    if let Some(status) = &request.status {
        match board.first_column_of_type("status") {
            Some(column) => {
                values.insert(column.id.clone(), json!({ "label": status }));
            }
            None => log::warn!("Board '{}' has no status column", board.name),
        }
    }
    if let Some(due) = request.due_date {
        match board.first_column_of_type("date") {
            Some(column) => {
                values.insert(
                    column.id.clone(),
                    json!({ "date": due.format("%Y-%m-%d").to_string() }),
                );
            }
            None => log::warn!("Board '{}' has no date column", board.name),
        }
    }

    let item = create_item(
        transport,
        &board.id,
        &request.task_name,
        None,
        (!values.is_empty()).then_some(&values),
    )?;

    let update_id = if request.description.trim().is_empty() {
        None
    } else {
        match add_update(transport, &item.id, &request.description) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("Item {} created but description not posted: {}", item.id, e);
                None
            }
        }
    };

    Ok(CreatedTask {
        board_id: board.id,
        board_name: board.name,
        item,
        update_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::sync::Mutex;

    /// Answers by operation name and keeps every request's variables.
    struct FakeMonday {
        calls: Mutex<Vec<(String, Value)>>,
        fail_updates: bool,
    }

    impl FakeMonday {
        fn new(fail_updates: bool) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_updates,
            }
        }

        fn variables_of(&self, operation: &str) -> Option<Value> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .find(|(name, _)| name == operation)
                .map(|(_, variables)| variables.clone())
        }
    }

    impl GraphQlTransport for FakeMonday {
        fn query(&self, query: &str, variables: Value) -> Result<Value, AppError> {
            let operation = if query.contains("SearchBoards") {
                "search"
            } else if query.contains("CreateItem") {
                "create"
            } else {
                "update"
            };
            self.calls
                .lock()
                .unwrap()
                .push((operation.to_string(), variables));

            match operation {
                "search" => Ok(json!({"boards": [{
                    "id": "31",
                    "name": "Ana - Apollo - Tasks",
                    "columns": [
                        {"id": "name", "title": "Name", "type": "name"},
                        {"id": "status", "title": "Status", "type": "status"},
                        {"id": "date4", "title": "Due", "type": "date"},
                        {"id": "date5", "title": "Shipped", "type": "date"}
                    ],
                    "groups": []
                }]})),
                "create" => Ok(json!({"create_item": {"id": "900", "name": "Reply to client"}})),
                _ if self.fail_updates => Err(AppError::GraphQl {
                    messages: vec!["Rate limited".to_string()],
                    partial_data: None,
                }),
                _ => Ok(json!({"create_update": {"id": "77"}})),
            }
        }
    }

    fn request() -> TaskRequest {
        TaskRequest {
            developer: "Ana".to_string(),
            project: "Apollo".to_string(),
            task_name: "Reply to client".to_string(),
            description: "Client asked for a quote.".to_string(),
            due_date: NaiveDate::from_ymd_opt(2026, 1, 15),
            status: Some("Working on it".to_string()),
        }
    }

    #[test]
    fn fills_first_status_and_date_columns() {
        let transport = FakeMonday::new(false);
        let task = create_task_from_email(&transport, &request()).unwrap();

        assert_eq!(task.board_id.as_str(), "31");
        assert_eq!(task.item.id.as_str(), "900");
        assert_eq!(task.update_id.as_deref(), Some("77"));

        let sent = transport.variables_of("create").unwrap();
        let values: Value = serde_json::from_str(sent["columnValues"].as_str().unwrap()).unwrap();
        assert_eq!(
            values,
            json!({"status": {"label": "Working on it"}, "date4": {"date": "2026-01-15"}})
        );
        assert_eq!(transport.variables_of("update").unwrap()["itemId"], "900");
    }

    #[test]
    fn failed_description_keeps_created_item() {
        let transport = FakeMonday::new(true);
        let task = create_task_from_email(&transport, &request()).unwrap();
        assert_eq!(task.item.id.as_str(), "900");
        assert_eq!(task.update_id, None);
    }

    #[test]
    fn plain_task_sends_no_column_values() {
        let transport = FakeMonday::new(false);
        let plain = TaskRequest {
            description: String::new(),
            due_date: None,
            status: None,
            ..request()
        };
        let task = create_task_from_email(&transport, &plain).unwrap();
        assert!(transport.variables_of("create").unwrap()["columnValues"].is_null());
        assert!(transport.variables_of("update").is_none());
        assert_eq!(task.update_id, None);
    }
}
