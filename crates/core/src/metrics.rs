//! Bottom-up character, tag, and link statistics.
//!
//! The first pass of a run: postorder-visits every visible node, writes
//! `char_count` / `tag_count` / `link_char_count` / `link_tag_count` into
//! the scratch table, and returns the bounding box of the widest visible
//! node encountered, which hybrid mode later uses to parameterize its
//! normal-distribution weighting.

use crate::scratch::{ContentState, ScratchMap};
use crate::tree::{Bounds, DocTree, NodeId};

/// Collects subtree metrics for every visible node under the root.
///
/// Invisible elements are skipped entirely: nothing is written for them
/// and nothing under them is counted. Returns the widest visible bounding
/// box in the tree (ties resolved in favor of the last one encountered,
/// in document order).
pub fn collect_metrics(tree: &DocTree, scratch: &mut ScratchMap) -> Bounds {
    collect(tree, scratch, tree.root())
}

fn collect(tree: &DocTree, scratch: &mut ScratchMap, id: NodeId) -> Bounds {
    let mut widest = tree.bounds(id);
    for child in tree.visible_children(id) {
        let candidate = collect(tree, scratch, child);
        if candidate.width() >= widest.width() {
            widest = candidate;
        }
    }

    scratch[id].state = ContentState::Excluded;
    count_chars(tree, scratch, id);
    count_tags(tree, scratch, id);
    count_link_tags(tree, scratch, id);
    count_link_chars(tree, scratch, id);
    widest
}

/// `char_count = Σ char_count(visible children) + Σ text_len(direct text)`.
fn count_chars(tree: &DocTree, scratch: &mut ScratchMap, id: NodeId) {
    let mut chars = 0;
    for &child in tree.children(id) {
        if tree.is_visible(child) {
            chars += scratch[child].char_count;
        } else if tree.is_text(child) {
            chars += tree.text_len(child);
        }
    }
    scratch[id].char_count = chars;
}

/// `tag_count = Σ (tag_count(child) + 1)` over visible children: each
/// visible child contributes its own subtree plus one for its own tag.
fn count_tags(tree: &DocTree, scratch: &mut ScratchMap, id: NodeId) {
    let mut tags = 0;
    for child in tree.visible_children(id) {
        tags += scratch[child].tag_count + 1;
    }
    scratch[id].tag_count = tags;
}

/// A link-like node claims its whole tag count as link tags and pushes
/// that claim down onto every visible descendant; anything else just sums
/// its children.
fn count_link_tags(tree: &DocTree, scratch: &mut ScratchMap, id: NodeId) {
    if tree.is_link_like(id) {
        scratch[id].link_tag_count = scratch[id].tag_count;
        override_subtree_link_tags(tree, scratch, id);
        return;
    }
    let mut link_tags = 0;
    for child in tree.visible_children(id) {
        link_tags += scratch[child].link_tag_count;
    }
    scratch[id].link_tag_count = link_tags;
}

/// Same shape as [`count_link_tags`] for characters: inside a link-like
/// subtree every node's link characters equal its own characters.
fn count_link_chars(tree: &DocTree, scratch: &mut ScratchMap, id: NodeId) {
    if tree.is_link_like(id) {
        scratch[id].link_char_count = scratch[id].char_count;
        override_subtree_link_chars(tree, scratch, id);
        return;
    }
    let mut link_chars = 0;
    for child in tree.visible_children(id) {
        link_chars += scratch[child].link_char_count;
    }
    scratch[id].link_char_count = link_chars;
}

fn override_subtree_link_chars(tree: &DocTree, scratch: &mut ScratchMap, id: NodeId) {
    for child in tree.visible_children(id) {
        scratch[child].link_char_count = scratch[child].char_count;
        override_subtree_link_chars(tree, scratch, child);
    }
}

fn override_subtree_link_tags(tree: &DocTree, scratch: &mut ScratchMap, id: NodeId) {
    for child in tree.visible_children(id) {
        scratch[child].link_tag_count = scratch[child].tag_count;
        override_subtree_link_tags(tree, scratch, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Bounds;

    /// body > (p "x"*100, a "y"*20)
    fn two_branch_tree() -> (DocTree, NodeId, NodeId, NodeId) {
        let mut tree = DocTree::new("html");
        let body = tree.append_element(tree.root(), "body");
        let p = tree.append_element(body, "p");
        tree.append_text(p, &"x".repeat(100));
        let a = tree.append_element(body, "a");
        tree.append_text(a, &"y".repeat(20));
        (tree, body, p, a)
    }

    #[test]
    fn test_char_count_additivity() {
        let (tree, body, p, a) = two_branch_tree();
        let mut scratch = ScratchMap::for_tree(&tree);
        collect_metrics(&tree, &mut scratch);

        assert_eq!(scratch[p].char_count, 100);
        assert_eq!(scratch[a].char_count, 20);
        assert_eq!(scratch[body].char_count, 120);
        assert_eq!(scratch[tree.root()].char_count, 120);
    }

    #[test]
    fn test_tag_count_additivity() {
        let (tree, body, p, a) = two_branch_tree();
        let mut scratch = ScratchMap::for_tree(&tree);
        collect_metrics(&tree, &mut scratch);

        assert_eq!(scratch[p].tag_count, 0);
        assert_eq!(scratch[a].tag_count, 0);
        // each child contributes itself plus its subtree
        assert_eq!(scratch[body].tag_count, 2);
        assert_eq!(scratch[tree.root()].tag_count, 3);
    }

    #[test]
    fn test_link_counts_cover_whole_link_subtree() {
        let mut tree = DocTree::new("html");
        let a = tree.append_element(tree.root(), "a");
        let span = tree.append_element(a, "span");
        tree.append_text(span, "click here");
        let mut scratch = ScratchMap::for_tree(&tree);
        collect_metrics(&tree, &mut scratch);

        assert_eq!(scratch[a].link_char_count, scratch[a].char_count);
        assert_eq!(scratch[a].link_tag_count, scratch[a].tag_count);
        // the override reaches descendants, replacing their own sums
        assert_eq!(scratch[span].link_char_count, scratch[span].char_count);
        assert_eq!(scratch[span].link_tag_count, scratch[span].tag_count);
    }

    #[test]
    fn test_non_link_parent_sums_link_children() {
        let (tree, body, _, a) = two_branch_tree();
        let mut scratch = ScratchMap::for_tree(&tree);
        collect_metrics(&tree, &mut scratch);

        assert_eq!(scratch[a].link_char_count, 20);
        assert_eq!(scratch[body].link_char_count, 20);
        assert_eq!(scratch[body].link_tag_count, 0);
    }

    #[test]
    fn test_invisible_subtree_not_counted() {
        let mut tree = DocTree::new("html");
        let body = tree.append_element(tree.root(), "body");
        let p = tree.append_element(body, "p");
        tree.append_text(p, "kept");
        let nav = tree.append_element(body, "nav");
        tree.append_text(nav, "hidden text");
        tree.set_visible(nav, false);

        let mut scratch = ScratchMap::for_tree(&tree);
        collect_metrics(&tree, &mut scratch);

        assert_eq!(scratch[body].char_count, 4);
        assert_eq!(scratch[body].tag_count, 1);
        // nothing was written for the invisible node
        assert_eq!(scratch[nav].char_count, 0);
    }

    #[test]
    fn test_widest_bounds_returned() {
        let mut tree = DocTree::new("html");
        tree.set_bounds(tree.root(), Bounds::new(0.0, 100.0));
        let narrow = tree.append_element(tree.root(), "aside");
        tree.set_bounds(narrow, Bounds::new(0.0, 50.0));
        let wide = tree.append_element(tree.root(), "main");
        tree.set_bounds(wide, Bounds::new(10.0, 400.0));

        let mut scratch = ScratchMap::for_tree(&tree);
        let widest = collect_metrics(&tree, &mut scratch);
        assert_eq!(widest, Bounds::new(10.0, 400.0));
    }
}
