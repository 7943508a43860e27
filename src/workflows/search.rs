use crate::api::parser::decode_data;
use crate::api::queries::BOARD_SEARCH_QUERY;
use crate::api::responses::{BoardsData, RawBoardListing};
use crate::api::GraphQlTransport;
use crate::connector::{build_column, build_group, BoardConnector};
use crate::constants::{
    BOARD_NAME_SEPARATOR, BOARD_SEARCH_SCAN_LIMIT, MAX_ITEMS_PAGE_SIZE, SUGGESTION_BOARD_LIMIT,
};
use crate::error::AppError;
use crate::model::{ColumnSchema, GroupDescriptor};
use crate::types::{BoardId, ItemId};
use serde::Serialize;
use serde_json::json;

/// The three parts of a `Developer - Project - Item type` board name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardNameParts {
    pub developer: String,
    pub project: String,
    pub item_type: String,
}

/// Splits a board name on `" - "`.
///
/// Separators past the second stay in the item type. A name without any
/// separator is all developer.
pub fn parse_board_name(name: &str) -> BoardNameParts {
    let mut parts = name.splitn(3, BOARD_NAME_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(developer), Some(project), item_type) => BoardNameParts {
            developer: developer.trim().to_string(),
            project: project.trim().to_string(),
            item_type: item_type.map(str::trim).unwrap_or_default().to_string(),
        },
        _ => BoardNameParts {
            developer: name.to_string(),
            ..BoardNameParts::default()
        },
    }
}

/// A board found by [`search_boards`], with enough structure to write to it.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSummary {
    pub id: BoardId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(flatten)]
    pub name_parts: BoardNameParts,
    pub columns: Vec<ColumnSchema>,
    pub groups: Vec<GroupDescriptor>,
}

impl BoardSummary {
    /// First column with the given type tag, in board order.
    pub fn first_column_of_type(&self, type_tag: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.type_tag == type_tag)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardSearchResult {
    pub boards: Vec<BoardSummary>,
    /// Matches before truncation to the requested limit.
    pub total_matched: usize,
}

/// Case-insensitive substring search over board names.
///
/// Only the first boards the token can see are scanned; matches keep the
/// service's order and are cut to `limit`.
pub fn search_boards<T: GraphQlTransport>(
    transport: &T,
    term: &str,
    limit: usize,
) -> Result<BoardSearchResult, AppError> {
    let data = transport.query(
        BOARD_SEARCH_QUERY,
        json!({ "limit": BOARD_SEARCH_SCAN_LIMIT }),
    )?;
    let response: BoardsData<RawBoardListing> = decode_data(data, "board listing")?;
    let scanned = response.boards.len();

    let needle = term.to_lowercase();
    let matched: Vec<BoardSummary> = response
        .boards
        .into_iter()
        .filter(|board| board.name.to_lowercase().contains(&needle))
        .map(summarize)
        .collect();
    let total_matched = matched.len();

    log::debug!(
        "Search '{}': {} of {} boards matched",
        term,
        total_matched,
        scanned
    );

    Ok(BoardSearchResult {
        boards: matched.into_iter().take(limit).collect(),
        total_matched,
    })
}

/// The first board whose name contains `project`.
pub fn find_board_by_project<T: GraphQlTransport>(
    transport: &T,
    project: &str,
) -> Result<BoardSummary, AppError> {
    search_boards(transport, project, 10)?
        .boards
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound {
            board_id: format!("matching '{}'", project),
        })
}

/// An item a message could be attached to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSuggestion {
    pub board_id: BoardId,
    pub board_name: String,
    pub item_id: ItemId,
    pub item_name: String,
    /// Group title, when the item reported one.
    pub group: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectItems {
    pub project: String,
    pub suggestions: Vec<ItemSuggestion>,
    pub count: usize,
}

/// Recent items from the first few boards matching `project`.
///
/// Reads only the first page of each board, at most `limit` items per
/// board. A board whose page cannot be read is skipped with a warning;
/// no matching board at all is `NotFound`.
pub fn items_for_project<T: GraphQlTransport>(
    connector: &BoardConnector<T>,
    project: &str,
    limit: usize,
) -> Result<ProjectItems, AppError> {
    let boards = search_boards(connector.transport(), project, 5)?.boards;
    if boards.is_empty() {
        return Err(AppError::NotFound {
            board_id: format!("matching '{}'", project),
        });
    }

    let page_size = u32::try_from(limit)
        .unwrap_or(MAX_ITEMS_PAGE_SIZE)
        .clamp(1, MAX_ITEMS_PAGE_SIZE);
    let mut suggestions = Vec::new();

    for board in boards.iter().take(SUGGESTION_BOARD_LIMIT) {
        let page = match connector.fetch_page(&board.id, None, page_size) {
            Ok(page) => page,
            Err(e) => {
                log::warn!("Skipping board '{}' for suggestions: {}", board.name, e);
                continue;
            }
        };
        suggestions.extend(page.items.into_iter().take(limit).map(|item| ItemSuggestion {
            board_id: board.id.clone(),
            board_name: board.name.clone(),
            item_id: ItemId::from_normalized(item.id),
            item_name: item.name,
            group: item.group.and_then(|group| group.title),
        }));
    }

    Ok(ProjectItems {
        project: project.to_string(),
        count: suggestions.len(),
        suggestions,
    })
}

fn summarize(board: RawBoardListing) -> BoardSummary {
    BoardSummary {
        name_parts: parse_board_name(&board.name),
        id: BoardId::from_normalized(board.id),
        name: board.name,
        state: board.state,
        workspace_id: board.workspace_id,
        columns: board.columns.into_iter().map(build_column).collect(),
        groups: board.groups.into_iter().map(build_group).collect(),
    }
}
