//! Consumer operations built on the transport and the connector: board
//! search, item writes, email-driven tasks and CSV export.
//!
//! Each operation is a free function over any [`GraphQlTransport`], so the
//! CLI and tests drive them the same way.
//!
//! [`GraphQlTransport`]: crate::api::GraphQlTransport

mod email;
mod export;
mod items;
mod search;
mod tasks;

pub use email::{format_email_update, post_email_to_item, EmailMessage};
pub use export::export_board_csv;
pub use items::{
    add_update, create_item, me, parse_column_values, update_item, Account, ColumnValues, ItemRef,
};
pub use search::{
    find_board_by_project, items_for_project, parse_board_name, search_boards, BoardNameParts,
    BoardSearchResult, BoardSummary, ItemSuggestion, ProjectItems,
};
pub use tasks::{create_task_from_email, CreatedTask, TaskRequest};
