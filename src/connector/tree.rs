use super::assembly::{AssembledItem, NodeAssembler};
use super::pages::PageWalker;
use super::BoardConnector;
use crate::api::GraphQlTransport;
use crate::error::AppError;
use crate::model::{BoardSchema, DataNode};
use crate::types::BoardId;
use std::collections::HashMap;

impl<T: GraphQlTransport> BoardConnector<T> {
    /// Fetches an entire board as one owned tree.
    ///
    /// Board → groups (schema order) → items (delivery order) → subitems.
    /// Items whose group is absent or unknown hang directly off the board,
    /// after the groups. Meant for boards that fit comfortably in memory;
    /// use [`BoardConnector::traverse_hierarchy`] otherwise.
    pub fn fetch_board(&self, board_id: &BoardId) -> Result<DataNode, AppError> {
        let schema = self.discover_board_schema(board_id)?;
        let assembler = NodeAssembler::new(&schema);
        let mut tree = TreeBuilder::new(&schema);

        for page in PageWalker::for_schema(self, &schema) {
            for raw in page? {
                tree.attach(assembler.assemble(&schema, raw));
            }
        }

        let board = tree.finish();
        log::info!(
            "Fetched board '{}' with {} top-level children",
            board.name,
            board.children.len()
        );
        Ok(board)
    }
}

/// Accumulates assembled items under their groups.
struct TreeBuilder {
    board: DataNode,
    groups: Vec<DataNode>,
    group_index: HashMap<String, usize>,
    ungrouped: Vec<DataNode>,
}

impl TreeBuilder {
    fn new(schema: &BoardSchema) -> Self {
        let groups: Vec<DataNode> = schema.groups.iter().map(DataNode::group).collect();
        let group_index = groups
            .iter()
            .enumerate()
            .map(|(index, group)| (group.id.clone(), index))
            .collect();

        Self {
            board: DataNode::board(schema),
            groups,
            group_index,
            ungrouped: Vec::new(),
        }
    }

    fn attach(&mut self, assembled: AssembledItem) {
        let AssembledItem {
            mut item,
            subitems,
            group_id,
        } = assembled;
        item.children = subitems;

        let slot = group_id
            .as_deref()
            .and_then(|id| self.group_index.get(id).copied());
        match slot {
            Some(index) => self.groups[index].children.push(item),
            None => {
                if let Some(id) = group_id {
                    log::debug!("Item {} references unknown group '{}'", item.id, id);
                }
                self.ungrouped.push(item);
            }
        }
    }

    fn finish(self) -> DataNode {
        let mut board = self.board;
        board.children = self.groups;
        board.children.extend(self.ungrouped);
        board
    }
}
