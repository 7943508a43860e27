// src/analytics/mod.rs
//! Node counts for board trees and streams.

use crate::model::{DataNode, NodeKind};
use std::fmt;

/// Per-kind tallies for user-facing summaries (e.g. "2 groups, 40 items").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeSummary {
    pub boards: usize,
    pub groups: usize,
    pub items: usize,
    pub subitems: usize,
    /// Levels below the root; a lone board is 0, board → group → item is 2.
    pub deepest_nesting: usize,
}

impl TreeSummary {
    /// Counts one node without looking at its children. Feed it streamed
    /// nodes to summarize a traversal as it goes.
    pub fn record(&mut self, node: &DataNode) {
        match node.kind {
            NodeKind::Board => self.boards += 1,
            NodeKind::Group => self.groups += 1,
            NodeKind::Item => self.items += 1,
            NodeKind::Subitem => self.subitems += 1,
        }
    }

    pub fn total_nodes(&self) -> usize {
        self.boards + self.groups + self.items + self.subitems
    }
}

impl fmt::Display for TreeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} groups, {} items, {} subitems",
            self.groups, self.items, self.subitems
        )
    }
}

/// Measures a whole tree.
pub fn measure_tree(root: &DataNode) -> TreeSummary {
    let mut summary = TreeSummary::default();
    walk(&mut summary, root, 0);
    summary
}

fn walk(summary: &mut TreeSummary, node: &DataNode, depth: usize) {
    summary.record(node);
    summary.deepest_nesting = summary.deepest_nesting.max(depth);
    for child in &node.children {
        walk(summary, child, depth + 1);
    }
}
