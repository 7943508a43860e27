use crate::api::parser::decode_data;
use crate::api::queries::{
    CREATE_ITEM_MUTATION, CREATE_UPDATE_MUTATION, ME_QUERY, UPDATE_COLUMN_VALUES_MUTATION,
};
use crate::api::responses::{
    CreateItemData, CreateUpdateData, MeData, RawItemRef, RawUser, UpdateItemData,
};
use crate::api::GraphQlTransport;
use crate::error::AppError;
use crate::types::{BoardId, ItemId, ValidationError};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Column id → new value, e.g. `{"status": {"label": "Done"}, "date4": {"date": "2026-01-15"}}`.
pub type ColumnValues = Map<String, Value>;

/// The account behind the API token.
pub type Account = RawUser;

/// An item as the mutation echoed it back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRef {
    pub id: ItemId,
    pub name: Option<String>,
}

impl From<RawItemRef> for ItemRef {
    fn from(raw: RawItemRef) -> Self {
        Self {
            id: ItemId::from_normalized(raw.id),
            name: raw.name,
        }
    }
}

/// Who the token belongs to. Cheapest way to check a connection.
pub fn me<T: GraphQlTransport>(transport: &T) -> Result<Account, AppError> {
    let data = transport.query(ME_QUERY, json!({}))?;
    let response: MeData = decode_data(data, "current user")?;
    Ok(response.me)
}

/// Parses a column-values argument; only a JSON object is accepted.
pub fn parse_column_values(raw: &str) -> Result<ColumnValues, ValidationError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ValidationError::InvalidColumnValues {
            reason: "expected a JSON object keyed by column id".to_string(),
        }),
        Err(e) => Err(ValidationError::InvalidColumnValues {
            reason: e.to_string(),
        }),
    }
}

/// Creates an item, optionally in a specific group and with initial values.
pub fn create_item<T: GraphQlTransport>(
    transport: &T,
    board_id: &BoardId,
    name: &str,
    group_id: Option<&str>,
    column_values: Option<&ColumnValues>,
) -> Result<ItemRef, AppError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyField("item name").into());
    }

    let data = transport.mutate(
        CREATE_ITEM_MUTATION,
        json!({
            "boardId": board_id.as_str(),
            "itemName": name,
            "groupId": group_id,
            "columnValues": column_values.map(encode_column_values).transpose()?,
        }),
    )?;
    let response: CreateItemData = decode_data(data, "created item")?;
    let item = ItemRef::from(response.create_item);

    log::info!("Created item {} on board {}", item.id, board_id);
    Ok(item)
}

/// Changes several column values of one item in a single mutation.
pub fn update_item<T: GraphQlTransport>(
    transport: &T,
    board_id: &BoardId,
    item_id: &ItemId,
    column_values: &ColumnValues,
) -> Result<ItemRef, AppError> {
    if column_values.is_empty() {
        return Err(ValidationError::InvalidColumnValues {
            reason: "nothing to update".to_string(),
        }
        .into());
    }

    let data = transport.mutate(
        UPDATE_COLUMN_VALUES_MUTATION,
        json!({
            "boardId": board_id.as_str(),
            "itemId": item_id.as_str(),
            "columnValues": encode_column_values(column_values)?,
        }),
    )?;
    let response: UpdateItemData = decode_data(data, "updated item")?;

    log::info!(
        "Updated {} column(s) on item {}",
        column_values.len(),
        item_id
    );
    Ok(response.change_multiple_column_values.into())
}

/// Posts an update (comment) to an item and returns the update id.
pub fn add_update<T: GraphQlTransport>(
    transport: &T,
    item_id: &ItemId,
    body: &str,
) -> Result<String, AppError> {
    if body.trim().is_empty() {
        return Err(ValidationError::EmptyField("update body").into());
    }

    let data = transport.mutate(
        CREATE_UPDATE_MUTATION,
        json!({ "itemId": item_id.as_str(), "body": body }),
    )?;
    let response: CreateUpdateData = decode_data(data, "created update")?;

    log::debug!("Posted update {} to item {}", response.create_update.id, item_id);
    Ok(response.create_update.id)
}

/// monday.com's `JSON` scalar takes the values as an encoded string.
fn encode_column_values(values: &ColumnValues) -> Result<String, AppError> {
    Ok(serde_json::to_string(values)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records the last variables and answers with a canned payload.
    struct Recorder {
        reply: Value,
        seen: Mutex<Vec<Value>>,
    }

    impl Recorder {
        fn new(reply: Value) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn last(&self) -> Value {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl GraphQlTransport for Recorder {
        fn query(&self, _query: &str, variables: Value) -> Result<Value, AppError> {
            self.seen.lock().unwrap().push(variables);
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn create_item_encodes_column_values_as_string() {
        let transport = Recorder::new(json!({"create_item": {"id": "555", "name": "Ship it"}}));
        let board = BoardId::parse("42").unwrap();
        let values = parse_column_values(r#"{"status": {"label": "Done"}}"#).unwrap();

        let item = create_item(&transport, &board, "Ship it", Some("topics"), Some(&values)).unwrap();
        assert_eq!(item.id.as_str(), "555");

        let sent = transport.last();
        assert_eq!(sent["boardId"], "42");
        assert_eq!(sent["groupId"], "topics");
        assert_eq!(sent["columnValues"], r#"{"status":{"label":"Done"}}"#);
    }

    #[test]
    fn create_item_without_values_sends_null() {
        let transport = Recorder::new(json!({"create_item": {"id": 9}}));
        let board = BoardId::parse("42").unwrap();
        create_item(&transport, &board, "Bare", None, None).unwrap();
        assert!(transport.last()["columnValues"].is_null());
        assert!(transport.last()["groupId"].is_null());
    }

    #[test]
    fn blank_inputs_are_rejected_before_any_request() {
        let transport = Recorder::new(json!({}));
        let board = BoardId::parse("42").unwrap();
        let item = ItemId::parse("7").unwrap();

        assert!(matches!(
            create_item(&transport, &board, "  ", None, None),
            Err(AppError::Validation(ValidationError::EmptyField(_)))
        ));
        assert!(matches!(
            update_item(&transport, &board, &item, &ColumnValues::new()),
            Err(AppError::Validation(ValidationError::InvalidColumnValues { .. }))
        ));
        assert!(add_update(&transport, &item, "").is_err());
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn column_values_must_be_an_object() {
        assert!(parse_column_values("[1, 2]").is_err());
        assert!(parse_column_values("{").is_err());
        assert_eq!(parse_column_values(r#"{"text": "hi"}"#).unwrap().len(), 1);
    }

    #[test]
    fn update_and_comment_round_trip_ids() {
        let transport = Recorder::new(json!({
            "change_multiple_column_values": {"id": "7", "name": "Task"},
            "create_update": {"id": "9001"}
        }));
        let board = BoardId::parse("42").unwrap();
        let item = ItemId::parse("7").unwrap();
        let values = parse_column_values(r#"{"date4": {"date": "2026-01-15"}}"#).unwrap();

        let updated = update_item(&transport, &board, &item, &values).unwrap();
        assert_eq!(updated.name.as_deref(), Some("Task"));
        assert_eq!(transport.last()["itemId"], "7");

        assert_eq!(add_update(&transport, &item, "Looks good").unwrap(), "9001");
        assert_eq!(transport.last()["body"], "Looks good");
    }

    #[test]
    fn me_reads_account() {
        let transport = Recorder::new(json!({"me": {"id": 12, "name": "Ana", "email": "ana@example.com"}}));
        let account = me(&transport).unwrap();
        assert_eq!(account.id, "12");
        assert_eq!(account.email.as_deref(), Some("ana@example.com"));
    }
}
