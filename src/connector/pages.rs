use super::BoardConnector;
use crate::api::parser::decode_data;
use crate::api::queries::BOARD_ITEMS_QUERY;
use crate::api::responses::{BoardsData, RawItem, RawItemsBoard};
use crate::api::GraphQlTransport;
use crate::error::AppError;
use crate::model::BoardSchema;
use crate::types::BoardId;
use serde_json::json;
use std::collections::HashSet;

/// One page of items, subitems already nested inside each item.
#[derive(Debug, Clone)]
pub struct ItemsPage {
    /// Cursor for the next page; `None` once the board is exhausted.
    pub cursor: Option<String>,
    pub items: Vec<RawItem>,
}

impl<T: GraphQlTransport> BoardConnector<T> {
    /// Fetches one page of items. Pass `None` as cursor for the first page.
    ///
    /// A board missing from the response yields an empty, final page.
    pub fn fetch_page(
        &self,
        board_id: &BoardId,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<ItemsPage, AppError> {
        let data = self.transport.query(
            BOARD_ITEMS_QUERY,
            json!({
                "boardId": board_id.as_str(),
                "cursor": cursor,
                "limit": page_size,
            }),
        )?;
        let response: BoardsData<RawItemsBoard> = decode_data(data, "items page")?;

        let page = response
            .boards
            .into_iter()
            .next()
            .and_then(|board| board.items_page)
            .map(|page| ItemsPage {
                cursor: page.cursor.filter(|c| !c.is_empty()),
                items: page.items,
            })
            .unwrap_or(ItemsPage {
                cursor: None,
                items: Vec::new(),
            });

        log::debug!(
            "Board {}: page with {} items (more: {})",
            board_id,
            page.items.len(),
            page.cursor.is_some()
        );
        Ok(page)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum CursorState {
    Start,
    Next(String),
    Exhausted,
}

/// Walks a board's item pages until the cursor runs out.
///
/// Only the cursor survives between pages. A cursor seen twice, or more
/// pages than the reported item count allows (plus one), ends the walk with
/// `MalformedResponse`. After an error the walker is exhausted.
pub(crate) struct PageWalker<'a, T> {
    connector: &'a BoardConnector<T>,
    board_id: BoardId,
    state: CursorState,
    pages_fetched: u64,
    seen_cursors: HashSet<String>,
    /// Upper bound on pages when discovery reported an item count.
    max_pages: Option<u64>,
}

impl<'a, T: GraphQlTransport> PageWalker<'a, T> {
    /// Walker over the board described by `schema`. A board that discovery
    /// reported as empty is not paged at all.
    pub(crate) fn for_schema(connector: &'a BoardConnector<T>, schema: &BoardSchema) -> Self {
        let state = if schema.is_known_empty() {
            log::debug!("Board {} reports no items; skipping paging", schema.board_id);
            CursorState::Exhausted
        } else {
            CursorState::Start
        };
        let page_size = u64::from(connector.page_size().max(1));
        Self {
            connector,
            board_id: schema.board_id.clone(),
            state,
            pages_fetched: 0,
            seen_cursors: HashSet::new(),
            max_pages: schema.item_count.map(|count| count.div_ceil(page_size) + 1),
        }
    }
}

impl<T: GraphQlTransport> Iterator for PageWalker<'_, T> {
    type Item = Result<Vec<RawItem>, AppError>;

    fn next(&mut self) -> Option<Self::Item> {
        let sent = match std::mem::replace(&mut self.state, CursorState::Exhausted) {
            CursorState::Exhausted => return None,
            CursorState::Start => None,
            CursorState::Next(cursor) => Some(cursor),
        };

        let page = match self.connector.fetch_page(
            &self.board_id,
            sent.as_deref(),
            self.connector.page_size(),
        ) {
            Ok(page) => page,
            Err(e) => return Some(Err(e)),
        };
        self.pages_fetched += 1;

        if let Some(sent) = sent {
            self.seen_cursors.insert(sent);
        }

        match page.cursor {
            Some(next) if self.seen_cursors.contains(&next) => {
                return Some(Err(AppError::MalformedResponse(format!(
                    "Board {} repeated cursor '{}' after {} pages",
                    self.board_id, next, self.pages_fetched
                ))));
            }
            Some(_) if self.max_pages.is_some_and(|max| self.pages_fetched >= max) => {
                return Some(Err(AppError::MalformedResponse(format!(
                    "Board {} keeps paging after {} pages; more than its item count allows",
                    self.board_id, self.pages_fetched
                ))));
            }
            Some(next) => self.state = CursorState::Next(next),
            None => log::debug!(
                "Board {} exhausted after {} pages",
                self.board_id,
                self.pages_fetched
            ),
        }

        Some(Ok(page.items))
    }
}

impl<T: GraphQlTransport> std::iter::FusedIterator for PageWalker<'_, T> {}
