//! Per-run scratch state for the extraction passes.
//!
//! The scratch fields live in a side table owned by the run and keyed by
//! [`NodeId`] rather than on the nodes themselves, so the tree stays
//! untouched until the final prune and the cleanup step is the table going
//! out of scope.

use crate::tree::{DocTree, NodeId};

use std::ops::{Index, IndexMut};

/// Classification of a node after the marking pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentState {
    /// Not part of the extracted region; pruned with its subtree.
    #[default]
    Excluded,
    /// The single node selected as the primary extracted content.
    ContentRoot,
    /// Kept only because it contains the content root.
    Ancestor,
}

/// Transient per-node fields written and consumed across the passes.
///
/// Counts default to 0; formulas that use a count as a divisor floor it
/// to 1 at the point of use, so an unwritten slot never causes a division
/// error.
#[derive(Debug, Clone, Default)]
pub struct NodeScratch {
    /// Characters in the subtree, visible nodes only.
    pub char_count: usize,
    /// Tags in the subtree, each visible child counting itself plus one.
    pub tag_count: usize,
    /// Characters belonging to hyperlink-like subtrees.
    pub link_char_count: usize,
    /// Tags belonging to hyperlink-like subtrees.
    pub link_tag_count: usize,
    /// Position-weighted character count, hybrid mode only.
    pub hybrid_char_number: f64,
    /// Score from the chosen density function.
    pub text_density: f64,
    /// Sum of direct children's densities, or own density for a leaf.
    pub density_sum: f64,
    /// Largest `density_sum` found anywhere in this node's subtree.
    pub max_density_sum: f64,
    /// The node that achieved `max_density_sum`, recorded during
    /// propagation so later passes never re-search by value.
    pub max_density_node: Option<NodeId>,
    pub state: ContentState,
}

/// Side table of [`NodeScratch`] slots, one per arena slot of the tree.
#[derive(Debug, Clone)]
pub struct ScratchMap {
    slots: Vec<NodeScratch>,
}

impl ScratchMap {
    /// Creates a zeroed table sized for every node of `tree`.
    pub fn for_tree(tree: &DocTree) -> Self {
        Self { slots: vec![NodeScratch::default(); tree.len()] }
    }
}

impl Index<NodeId> for ScratchMap {
    type Output = NodeScratch;

    fn index(&self, id: NodeId) -> &NodeScratch {
        &self.slots[id.index()]
    }
}

impl IndexMut<NodeId> for ScratchMap {
    fn index_mut(&mut self, id: NodeId) -> &mut NodeScratch {
        &mut self.slots[id.index()]
    }
}
