use super::assembly::NodeAssembler;
use super::pages::PageWalker;
use super::BoardConnector;
use crate::api::GraphQlTransport;
use crate::error::AppError;
use crate::model::{BoardSchema, DataNode};
use crate::types::BoardId;
use std::collections::VecDeque;
use std::iter::FusedIterator;

impl<T: GraphQlTransport> BoardConnector<T> {
    /// Streams a board's nodes lazily: the board, each group in schema
    /// order, then page by page each item followed (when `include_subitems`)
    /// by its subitems.
    ///
    /// Nothing is fetched until the first pull. Streamed nodes carry no
    /// children; relationships are in their metadata. Memory use is bounded
    /// by one page. Dropping the stream cancels the traversal.
    pub fn traverse_hierarchy(
        &self,
        board_id: &BoardId,
        include_subitems: bool,
    ) -> HierarchyStream<'_, T> {
        HierarchyStream {
            connector: self,
            board_id: board_id.clone(),
            include_subitems,
            phase: Phase::Init,
            pending: VecDeque::new(),
        }
    }
}

enum Phase<'a, T> {
    Init,
    Paging {
        schema: BoardSchema,
        assembler: NodeAssembler,
        pages: PageWalker<'a, T>,
    },
    Done,
}

/// Forward-only, single-pass stream returned by
/// [`BoardConnector::traverse_hierarchy`].
///
/// Yields `Err` once if discovery or a page fetch fails, then ends. Nodes
/// yielded before the failure remain valid.
pub struct HierarchyStream<'a, T> {
    connector: &'a BoardConnector<T>,
    board_id: BoardId,
    include_subitems: bool,
    phase: Phase<'a, T>,
    pending: VecDeque<DataNode>,
}

impl<T> HierarchyStream<'_, T> {
    /// The schema snapshot, available once the first node has been pulled.
    pub fn schema(&self) -> Option<&BoardSchema> {
        match &self.phase {
            Phase::Paging { schema, .. } => Some(schema),
            Phase::Init | Phase::Done => None,
        }
    }
}

impl<T: GraphQlTransport> Iterator for HierarchyStream<'_, T> {
    type Item = Result<DataNode, AppError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.pending.pop_front() {
                return Some(Ok(node));
            }

            match &mut self.phase {
                Phase::Init => match self.connector.discover_board_schema(&self.board_id) {
                    Ok(schema) => {
                        self.pending.push_back(DataNode::board(&schema));
                        self.pending
                            .extend(schema.groups.iter().map(DataNode::group));
                        self.phase = Phase::Paging {
                            assembler: NodeAssembler::new(&schema),
                            pages: PageWalker::for_schema(self.connector, &schema),
                            schema,
                        };
                    }
                    Err(e) => {
                        self.phase = Phase::Done;
                        return Some(Err(e));
                    }
                },
                Phase::Paging {
                    schema,
                    assembler,
                    pages,
                } => match pages.next() {
                    Some(Ok(items)) => {
                        for raw in items {
                            let assembled = assembler.assemble(schema, raw);
                            self.pending.push_back(assembled.item);
                            if self.include_subitems {
                                self.pending.extend(assembled.subitems);
                            }
                        }
                    }
                    Some(Err(e)) => {
                        self.phase = Phase::Done;
                        return Some(Err(e));
                    }
                    None => {
                        log::debug!("Traversal of board {} complete", self.board_id);
                        self.phase = Phase::Done;
                    }
                },
                Phase::Done => return None,
            }
        }
    }
}

impl<T: GraphQlTransport> FusedIterator for HierarchyStream<'_, T> {}
