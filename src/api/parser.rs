// src/api/parser.rs
//! GraphQL envelope parsing.
//!
//! Turns an HTTP response into the `data` object, or into the matching
//! member of the error taxonomy: non-success status → `Http`, an `errors`
//! list → `GraphQl` (partial data kept), undecodable body → `MalformedResponse`.

use super::client::ApiResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Top-level GraphQL response body.
#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    #[serde(default)]
    message: Option<String>,
}

/// Parses a GraphQL HTTP response into its `data` object.
pub fn parse_graphql_response(result: ApiResponse<String>) -> Result<Value, AppError> {
    if !result.status.is_success() {
        log::error!("HTTP {} from {}", result.status, result.url);
        return Err(AppError::Http {
            status: result.status.as_u16(),
            body_preview: preview(&result.data),
        });
    }

    let envelope: GraphQlEnvelope = serde_json::from_str(&result.data).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", result.url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(&result.data)))
    })?;

    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        let messages: Vec<String> = errors
            .into_iter()
            .map(|e| e.message.unwrap_or_else(|| "Unknown error".to_string()))
            .collect();
        log::warn!("GraphQL errors from {}: {}", result.url, messages.join("; "));
        return Err(AppError::GraphQl {
            messages,
            partial_data: envelope.data.filter(|data| !data.is_null()),
        });
    }

    Ok(envelope
        .data
        .filter(|data| !data.is_null())
        .unwrap_or_else(|| Value::Object(Default::default())))
}

/// Decodes a `data` object (or part of one) into a wire type.
pub fn decode_data<T: DeserializeOwned>(data: Value, what: &str) -> Result<T, AppError> {
    serde_json::from_value(data)
        .map_err(|e| AppError::MalformedResponse(format!("Unexpected shape for {}: {}", what, e)))
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}
