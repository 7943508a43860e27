use super::render_hint::{render_hint, RenderHint};
use super::schema::ColumnSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Decoded column payload.
///
/// The API sends each value as a JSON-encoded string. Most decode to
/// structured data; the rest are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnPayload {
    Structured(Value),
    Raw(String),
}

impl ColumnPayload {
    /// Decodes a payload string, falling back to the raw text.
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(value) => Self::Structured(value),
            Err(_) => Self::Raw(raw.to_string()),
        }
    }

    /// Interprets the wire `value` field. `null` and empty strings mean no payload.
    pub fn from_wire(value: Option<Value>) -> Option<Self> {
        match value? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(Self::decode(&s)),
            other => Some(Self::Structured(other)),
        }
    }

    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            Self::Structured(value) => Some(value),
            Self::Raw(_) => None,
        }
    }
}

/// A normalized column value with its render hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnValue {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub text: Option<String>,
    pub value: Option<ColumnPayload>,
    pub render_hint: RenderHint,
}

impl ColumnValue {
    /// Builds a value from what the item reported, enriched by the board
    /// column of the same id when there is one.
    ///
    /// The reported type wins over the schema's; title falls back to the
    /// column id when the schema does not know the column.
    pub fn normalize(
        id: String,
        reported_type: Option<String>,
        text: Option<String>,
        value: Option<Value>,
        column: Option<&ColumnSchema>,
    ) -> Self {
        let reported_type = reported_type.filter(|t| !t.is_empty());
        let hint = match (&reported_type, column) {
            (Some(tag), _) => render_hint(tag),
            (None, Some(column)) => column.render_hint,
            (None, None) => RenderHint::Text,
        };
        let type_tag = reported_type
            .or_else(|| column.map(|c| c.type_tag.clone()))
            .unwrap_or_else(|| "unknown".to_string());
        let title = column.map(|c| c.title.clone()).unwrap_or_else(|| id.clone());

        Self {
            id,
            title,
            type_tag,
            text,
            value: ColumnPayload::from_wire(value),
            render_hint: hint,
        }
    }
}
