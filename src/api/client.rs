// src/api/client.rs
//! Blocking HTTP client for the monday.com GraphQL endpoint.
//!
//! This module is a thin wrapper around `reqwest::blocking`. It handles
//! authentication, the API version header and the request timeout, and
//! leaves envelope interpretation to the parser.

use super::parser::parse_graphql_response;
use super::GraphQlTransport;
use crate::config::ConnectorConfig;
use crate::error::AppError;
use crate::types::{ApiKey, ApiVersion, ValidatedUrl};
use reqwest::blocking::{Client, Response};
use reqwest::{header, StatusCode};
use serde::Serialize;
use serde_json::Value;

/// Request body of one GraphQL operation.
#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

/// A thin wrapper around a reqwest blocking client for monday.com requests.
#[derive(Clone)]
pub struct MondayHttpClient {
    client: Client,
    endpoint: ValidatedUrl,
}

impl MondayHttpClient {
    /// Creates a client from a resolved configuration.
    pub fn new(config: &ConnectorConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(&config.api_key, &config.api_version)?)
            .timeout(config.timeout)
            .build()
            .map_err(construction_error)?;
        Ok(Self {
            client,
            endpoint: config.api_url.clone(),
        })
    }

    /// Creates a client with the token read once from `MONDAY_API_KEY`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::new(&ConnectorConfig::from_env()?)
    }

    /// Creates the default headers for monday.com API requests.
    fn create_headers(
        api_key: &ApiKey,
        api_version: &ApiVersion,
    ) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(api_key.as_str()).map_err(|e| {
                AppError::Configuration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "API-Version",
            header::HeaderValue::from_str(api_version.as_str()).map_err(|e| {
                AppError::Configuration(format!("Invalid API version header: {}", e))
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// POSTs one GraphQL operation and returns the raw response.
    fn post(&self, query: &str, variables: &Value) -> Result<Response, AppError> {
        log::debug!(
            "POST {} (operation: {})",
            self.endpoint,
            operation_name(query).unwrap_or("anonymous")
        );

        let body = GraphQlRequest { query, variables };
        let response = self
            .client
            .post(self.endpoint.as_url().clone())
            .json(&body)
            .send()?;

        log::debug!("Response status: {}", response.status());
        Ok(response)
    }
}

impl GraphQlTransport for MondayHttpClient {
    fn query(&self, query: &str, variables: Value) -> Result<Value, AppError> {
        let response = self.post(query, &variables)?;
        let result = extract_response_text(response)?;
        parse_graphql_response(result)
    }
}

/// A client that cannot be built is a setup problem, not a network failure.
fn construction_error(err: reqwest::Error) -> AppError {
    AppError::Configuration(format!("Could not build HTTP client: {}", err))
}

/// Reads the operation name out of `query Name(...)` / `mutation Name(...)`.
fn operation_name(query: &str) -> Option<&str> {
    let trimmed = query.trim_start();
    let rest = trimmed
        .strip_prefix("query")
        .or_else(|| trimmed.strip_prefix("mutation"))?
        .trim_start();
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text()?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
