// src/lib.rs
//! monday-sync library: discovers monday.com board schemas and traverses
//! board → group → item → subitem hierarchies.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ErrorKind`, `ValidationError`
//! - **Configuration**: `ConnectorConfig`, `CommandLineInput`
//! - **Domain model**: `BoardSchema`, `ColumnSchema`, `DataNode`, `RenderHint`, etc.
//! - **Domain types**: `BoardId`, `ItemId`, `ApiKey`, `ValidatedUrl`
//! - **API client**: `GraphQlTransport`, `MondayHttpClient`, response parsing
//! - **Connector**: `BoardConnector` (`discover_board_schema`, `fetch_board`,
//!   `traverse_hierarchy`)
//! - **Workflows**: board search, item writes, email tasks, CSV export

pub mod analytics;
pub mod api;
pub mod config;
pub mod connector;
pub mod constants;
pub mod error;
pub mod model;
pub mod types;
pub mod workflows;

// --- Error Handling ---
pub use crate::error::{AppError, ErrorKind};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ConnectorConfig};

// --- Domain Model ---
pub use crate::model::{
    render_hint, BoardSchema, ColumnPayload, ColumnSchema, ColumnValue, Creator, DataNode,
    GroupDescriptor, HierarchyType, NodeKind, NodeMetadata, RenderHint, RENDER_HINT_TABLE,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, ApiVersion, BoardId, Id, ItemId, ValidatedUrl};

// --- API Client ---
pub use crate::api::{
    parser::parse_graphql_response, ApiResponse, GraphQlTransport, MondayHttpClient,
};

// --- Connector ---
pub use crate::connector::{BoardConnector, HierarchyStream, ItemsPage};

// --- Analytics ---
pub use crate::analytics::{measure_tree, TreeSummary};

// --- Workflows ---
pub use crate::workflows::{
    add_update, create_item, create_task_from_email, export_board_csv, find_board_by_project,
    format_email_update, items_for_project, me, parse_board_name, post_email_to_item,
    search_boards, update_item, Account, BoardSearchResult, BoardSummary, CreatedTask, EmailMessage, ItemSuggestion,
    ProjectItems, TaskRequest,
};
