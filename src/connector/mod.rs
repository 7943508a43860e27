//! Board hierarchy connector.
//!
//! Discovers a board's schema and traverses board → group → item → subitem
//! across server-side pagination, either into one owned tree
//! ([`BoardConnector::fetch_board`]) or as a lazy stream
//! ([`BoardConnector::traverse_hierarchy`]). Both modes share the page walker
//! and node assembler, so they produce the same items in the same order.
//!
//! Traversal states: `INIT → DISCOVERING → (FETCHING_PAGE → ATTACHING)* → DONE`.
//! Any failure while discovering or fetching a page ends the traversal and is
//! returned to the caller unchanged.

mod assembly;
mod discovery;
mod pages;
mod stream;
mod tree;

use crate::api::GraphQlTransport;
use crate::constants::DEFAULT_ITEMS_PAGE_SIZE;

pub(crate) use discovery::{build_column, build_group};
pub use pages::ItemsPage;
pub use stream::HierarchyStream;

/// Reads board schemas and hierarchies through a [`GraphQlTransport`].
///
/// Holds no state between calls besides the transport and the page size, so
/// one connector can serve concurrent traversals from several threads.
#[derive(Debug, Clone)]
pub struct BoardConnector<T> {
    transport: T,
    page_size: u32,
}

impl<T: GraphQlTransport> BoardConnector<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            page_size: DEFAULT_ITEMS_PAGE_SIZE,
        }
    }

    /// Items requested per page. Affects request count only, never output.
    pub fn with_page_size(self, page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            ..self
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
