//! Threshold derivation, content marking, and pruning.
//!
//! The final stage of a run. Starting from the maximum-density node found
//! by [`crate::propagate`], a walk to the root derives the extraction
//! threshold and tags the ancestor chain; a preorder marking pass confirms
//! the content region; a pruning pass detaches everything excluded. The
//! scratch table is owned by the run and dropped on return, so no pass
//! leaves residual state on the tree.
//!
//! # Example
//!
//! ```rust
//! use pith_core::{Method, extract_content, parse_document};
//!
//! let html = "<html><body>\
//!     <article>\
//!     <p>A long paragraph of real article text, long enough to dominate
//!     the page by sheer character count over any navigation chrome.</p>\
//!     <p>A second paragraph keeps the article region the densest cluster
//!     of the whole document, the way real articles do.</p>\
//!     </article>\
//!     <nav><a>home</a><a>about</a></nav>\
//! </body></html>";
//! let mut tree = parse_document(html).unwrap();
//! extract_content(&mut tree, Method::Standard);
//! assert!(tree.text_content().contains("article text"));
//! assert!(!tree.text_content().contains("about"));
//! ```

use crate::density::{BodyStats, Method};
use crate::metrics::collect_metrics;
use crate::propagate::propagate_density;
use crate::scratch::{ContentState, ScratchMap};
use crate::tree::{DocTree, NodeId};
use crate::visual::apply_visual_weights;

use std::time::{Duration, Instant};

/// Tolerance for the threshold and marking comparisons. Densities close
/// within one ulp of 1.0 compare as equal.
const EPSILON: f64 = f64::EPSILON;

/// Approximate `a >= b`.
fn approx_ge(a: f64, b: f64) -> bool {
    a - b > -EPSILON
}

/// Extracts the main content region of `tree` in place.
///
/// Runs the full pass sequence: metrics, optional visual weighting,
/// density propagation, threshold derivation, marking, pruning. Exactly
/// one node ends up as the content root; everything that is neither that
/// node's subtree nor an ancestor of it is detached. On a degenerate tree
/// the root itself becomes the content root and nothing is pruned.
///
/// Never fails: numeric edge cases degrade to zero densities and the
/// fallback policies above. Returns the wall-clock duration of the
/// density-computation phase (weighting through marking) as a diagnostic;
/// parsing, counting, and pruning are not included.
pub fn extract_content(tree: &mut DocTree, method: Method) -> Duration {
    let mut scratch = ScratchMap::for_tree(tree);
    let widest = collect_metrics(tree, &mut scratch);

    let started = Instant::now();
    if method == Method::Hybrid {
        let mean = (widest.left + widest.right) / 2.0;
        let sd = widest.width() / 2.0;
        apply_visual_weights(tree, &mut scratch, mean, sd);
    }
    let body = BodyStats::from_root(tree, &scratch, method);
    let max_node = propagate_density(tree, &mut scratch, method, &body);
    let threshold = derive_threshold(tree, &mut scratch, max_node);
    mark_content(tree, &mut scratch, threshold, tree.root());
    let elapsed = started.elapsed();

    prune(tree, &scratch);
    elapsed
    // scratch drops here; the tree retains no algorithm state
}

/// Walks from the maximum-density node to the root, lowering the
/// threshold to any ancestor density at or below it.
///
/// Side effects: the starting node becomes the content root and every
/// ancestor is tagged [`ContentState::Ancestor`]. The root's own density
/// never lowers the threshold.
fn derive_threshold(tree: &DocTree, scratch: &mut ScratchMap, start: NodeId) -> f64 {
    let mut threshold = scratch[start].text_density;
    scratch[start].state = ContentState::ContentRoot;

    let mut cursor = start;
    while let Some(parent) = tree.parent(cursor) {
        scratch[parent].state = ContentState::Ancestor;
        if tree.parent(parent).is_some() {
            let parent_density = scratch[parent].text_density;
            if approx_ge(threshold, parent_density) {
                threshold = parent_density;
            }
        }
        cursor = parent;
    }
    threshold
}

/// Preorder confirmation pass.
///
/// Recurses into every node whose density clears the threshold and asks
/// [`mark_subtree`] to tie its recorded maximum back to the content root.
/// A node already marked as the content root is final and not reprocessed;
/// nodes below the threshold stop the recursion.
fn mark_content(tree: &DocTree, scratch: &mut ScratchMap, threshold: f64, id: NodeId) {
    if scratch[id].state == ContentState::ContentRoot {
        return;
    }
    if !approx_ge(scratch[id].text_density, threshold) {
        return;
    }
    mark_subtree(tree, scratch, id);
    for child in tree.visible_children(id) {
        mark_content(tree, scratch, threshold, child);
    }
}

/// Marks the chain between `id` and its recorded maximum-density node.
///
/// Exactly one content root exists per run (placed by the threshold walk),
/// so a recorded maximum that is some other node gets no second root: only
/// chains leading to the already chosen root are tagged, which keeps the
/// surviving region path-connected.
fn mark_subtree(tree: &DocTree, scratch: &mut ScratchMap, id: NodeId) {
    let Some(target) = scratch[id].max_density_node else {
        return;
    };
    if scratch[target].state != ContentState::ContentRoot {
        return;
    }

    let mut cursor = tree.parent(target);
    while let Some(node) = cursor {
        if tree.parent(node).is_none() {
            break; // document root boundary
        }
        if scratch[node].state == ContentState::Excluded {
            scratch[node].state = ContentState::Ancestor;
        }
        if node == id {
            break;
        }
        cursor = tree.parent(node);
    }
}

/// Detaches every subtree that is not the content region or one of its
/// ancestors; the caller's scratch dropping afterwards is the cleanup.
///
/// Inside an ancestor node, only the path toward the content root is
/// structural: invisible elements, excluded subtrees, and loose text are
/// all removed. The content root's subtree is kept whole.
fn prune(tree: &mut DocTree, scratch: &ScratchMap) {
    let root = tree.root();
    if scratch[root].state == ContentState::ContentRoot {
        return;
    }
    prune_children(tree, scratch, root);
}

fn prune_children(tree: &mut DocTree, scratch: &ScratchMap, id: NodeId) {
    let children: Vec<NodeId> = tree.children(id).to_vec();
    for child in children {
        if tree.is_text(child) || !tree.is_visible(child) || scratch[child].state == ContentState::Excluded {
            tree.detach(child);
        } else if scratch[child].state == ContentState::Ancestor {
            prune_children(tree, scratch, child);
        }
        // the content root subtree survives untouched
    }
}
