//! Wire types for the `data` objects monday.com returns.
//!
//! monday.com sends ids as strings, but be lenient about numbers; list fields
//! may arrive as `null` and are read as empty.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts `"123"` or `123`.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

fn optional_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `{ "boards": [...] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct BoardsData<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub boards: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBoard {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub hierarchy_type: Option<String>,
    #[serde(default)]
    pub items_count: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<RawColumn>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<RawGroup>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawColumn {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub settings_str: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGroup {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Board entry of the items query.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItemsBoard {
    #[serde(default)]
    pub items_page: Option<RawItemsPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawItemsPage {
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<RawItem>,
}

/// An item (or subitem) exactly as the items query returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub group: Option<RawGroupRef>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub creator: Option<RawCreator>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub column_values: Vec<RawColumnValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subitems: Vec<RawItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGroupRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCreator {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawColumnValue {
    pub id: String,
    #[serde(rename = "type", default)]
    pub type_tag: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

/// Board entry of the search query.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBoardListing {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub workspace_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<RawColumn>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<RawGroup>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeData {
    pub me: RawUser,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize, PartialEq)]
pub struct RawUser {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// `{ id, name }` returned by item mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItemRef {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemData {
    pub create_item: RawItemRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItemData {
    pub change_multiple_column_values: RawItemRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUpdateData {
    pub create_update: RawUpdateRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUpdateRef {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
}
