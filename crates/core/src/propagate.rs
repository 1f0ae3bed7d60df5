//! Density propagation: the combined pass that scores the whole tree and
//! locates the highest-density node.
//!
//! One postorder traversal computes, for every visible node, its
//! `text_density` (via the chosen [`Method`]), its `density_sum` (the sum
//! of direct children's densities, or its own density for a leaf), and
//! records which node in its subtree achieved the largest density sum.
//! The root's record is the global maximum the threshold walk starts from.

use crate::density::{BodyStats, Method};
use crate::scratch::ScratchMap;
use crate::tree::{DocTree, NodeId};

/// Scores every visible node and returns the maximum-density node of the
/// whole tree.
///
/// Comparisons are strict (`>`), so ties keep the first candidate
/// encountered in document order. A node with no scored descendants is
/// its own maximum.
pub fn propagate_density(tree: &DocTree, scratch: &mut ScratchMap, method: Method, body: &BodyStats) -> NodeId {
    propagate(tree, scratch, tree.root(), method, body)
}

fn propagate(tree: &DocTree, scratch: &mut ScratchMap, id: NodeId, method: Method, body: &BodyStats) -> NodeId {
    let mut best: Option<NodeId> = None;
    for child in tree.visible_children(id) {
        let child_best = propagate(tree, scratch, child, method, body);
        match best {
            Some(current) if scratch[child_best].density_sum <= scratch[current].density_sum => {}
            _ => best = Some(child_best),
        }
    }

    scratch[id].text_density = method.density(&scratch[id], body);

    if tree.is_leaf(id) {
        scratch[id].density_sum = scratch[id].text_density;
        best = Some(id);
    } else {
        let mut sum = 0.0;
        for child in tree.visible_children(id) {
            // a direct child can still beat the best deep candidate
            if let Some(current) = best
                && scratch[child].density_sum > scratch[current].density_sum
            {
                best = Some(child);
            }
            sum += scratch[child].text_density;
        }
        scratch[id].density_sum = sum;
    }

    let best = best.unwrap_or(id);
    scratch[id].max_density_sum = scratch[best].density_sum;
    scratch[id].max_density_node = Some(best);
    best
}
