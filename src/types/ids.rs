use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Strong typing for IDs with phantom types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemMarker;

/// Type aliases for specific ID types
pub type BoardId = Id<BoardMarker>;
pub type ItemId = Id<ItemMarker>;

/// Board URLs look like `https://acme.monday.com/boards/1234567890[/views/...]`.
static BOARD_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/boards/(\d+)(?:[/?#]|$)")
        .expect("Failed to compile board URL regex - this is a bug in the code")
});

/// Item (pulse) URLs carry the item id after `/pulses/`.
static ITEM_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/pulses/(\d+)(?:[/?#]|$)")
        .expect("Failed to compile item URL regex - this is a bug in the code")
});

impl<T> Id<T> {
    /// Create an ID from a value the service handed us (internal use)
    pub(crate) fn from_normalized(value: String) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Get the ID as a string reference
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl BoardId {
    /// Parse a board id from raw digits or a board URL.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        parse_numeric_id(input, &BOARD_URL_REGEX, "board").map(Self::from_normalized)
    }
}

impl ItemId {
    /// Parse an item id from raw digits or an item (pulse) URL.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        parse_numeric_id(input, &ITEM_URL_REGEX, "item").map(Self::from_normalized)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_normalized(value))
    }
}

/// Normalize a monday.com id: digits, optionally embedded in a URL.
fn parse_numeric_id(input: &str, url_regex: &Regex, kind: &str) -> Result<String, ValidationError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::InvalidId(format!("Empty {} ID", kind)));
    }

    if input.starts_with("http://") || input.starts_with("https://") {
        return url_regex
            .captures(input)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                ValidationError::InvalidId(format!(
                    "Could not extract {} ID from URL: {}",
                    kind, input
                ))
            });
    }

    if !input.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidId(format!(
            "{} ID must contain only digits: {}",
            kind, input
        )));
    }

    Ok(input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_id_parsing() {
        let id = BoardId::parse("1234567890").unwrap();
        assert_eq!(id.as_str(), "1234567890");

        let id = BoardId::parse("  987654  ").unwrap();
        assert_eq!(id.as_str(), "987654");

        let id = BoardId::parse("https://acme.monday.com/boards/5551234").unwrap();
        assert_eq!(id.as_str(), "5551234");

        let id = BoardId::parse("https://acme.monday.com/boards/5551234/views/77?term=x").unwrap();
        assert_eq!(id.as_str(), "5551234");
    }

    #[test]
    fn test_item_id_from_pulse_url() {
        let id = ItemId::parse("https://acme.monday.com/boards/1/pulses/424242").unwrap();
        assert_eq!(id.as_str(), "424242");
    }

    #[test]
    fn test_invalid_ids() {
        assert!(BoardId::parse("").is_err());
        assert!(BoardId::parse("12ab").is_err());
        assert!(BoardId::parse("https://acme.monday.com/workspaces/12").is_err());
        assert!(ItemId::parse("not-an-id").is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = BoardId::parse("42").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
        let back: BoardId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(back, id);
    }
}
