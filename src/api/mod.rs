//! monday.com API interaction: one GraphQL operation per call.
//!
//! The connector depends on [`GraphQlTransport`], never on HTTP details.
//! [`MondayHttpClient`] is the production implementation.

pub mod client;
pub mod parser;
pub mod queries;
pub mod responses;

use crate::error::AppError;
use serde_json::Value;
use std::sync::Arc;

pub use client::{ApiResponse, MondayHttpClient};

/// The ability to run a GraphQL operation against monday.com.
///
/// Implementations make exactly one attempt per call; retry policy belongs to
/// the caller. `Ok` carries the response's `data` object.
pub trait GraphQlTransport: Send + Sync {
    fn query(&self, query: &str, variables: Value) -> Result<Value, AppError>;

    /// GraphQL does not distinguish mutations at the transport level.
    fn mutate(&self, mutation: &str, variables: Value) -> Result<Value, AppError> {
        self.query(mutation, variables)
    }
}

impl<T: GraphQlTransport + ?Sized> GraphQlTransport for &T {
    fn query(&self, query: &str, variables: Value) -> Result<Value, AppError> {
        (**self).query(query, variables)
    }
}

impl<T: GraphQlTransport + ?Sized> GraphQlTransport for Box<T> {
    fn query(&self, query: &str, variables: Value) -> Result<Value, AppError> {
        (**self).query(query, variables)
    }
}

impl<T: GraphQlTransport + ?Sized> GraphQlTransport for Arc<T> {
    fn query(&self, query: &str, variables: Value) -> Result<Value, AppError> {
        (**self).query(query, variables)
    }
}
