//! HTML host adapter: builds a [`DocTree`] from markup.
//!
//! The extraction core expects its host to supply visibility and geometry
//! from a real layout. Outside a browser there is no layout engine, so
//! this adapter approximates both: visibility from a static heuristic
//! (non-rendered tags, `hidden` attributes, inline `display:none`), and
//! geometry from a crude block model in which every visible element spans
//! its parent's horizontal extent. Hosts that can measure real boxes
//! should build the tree through [`DocTree`]'s builder methods instead
//! and call [`DocTree::set_bounds`] with measured values.
//!
//! # Example
//!
//! ```rust
//! use pith_core::parse_document;
//!
//! let tree = parse_document("<html><body><p>Hello</p></body></html>").unwrap();
//! assert_eq!(tree.text_content(), "Hello");
//! ```

use crate::tree::{Bounds, DocTree, NodeId};
use crate::{PithError, Result};

use ego_tree::NodeRef;
use regex::Regex;
use scraper::{Html, Node};

use std::sync::LazyLock;

/// Layout parameters for the synthetic block model.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Horizontal extent assigned to the root element, in CSS pixels.
    pub page_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { page_width: 1024.0 }
    }
}

/// Tags that never produce a rendered box.
const NON_RENDERED_TAGS: &[&str] =
    &["base", "head", "link", "meta", "noscript", "script", "style", "template", "title"];

/// Inline style declarations that hide an element.
static HIDDEN_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*none|visibility\s*:\s*hidden").unwrap());

/// Parses an HTML document into a [`DocTree`] with default layout.
pub fn parse_document(html: &str) -> Result<DocTree> {
    parse_document_with(html, &LayoutConfig::default())
}

/// Parses an HTML document into a [`DocTree`], spanning the root element
/// across `layout.page_width`.
///
/// # Errors
///
/// Returns [`PithError::EmptyDocument`] if the markup contains no root
/// element at all.
pub fn parse_document_with(html: &str, layout: &LayoutConfig) -> Result<DocTree> {
    let parsed = Html::parse_document(html);
    let root_ref = parsed
        .tree
        .root()
        .children()
        .find(|child| child.value().is_element())
        .ok_or(PithError::EmptyDocument)?;

    let root_tag = root_ref.value().as_element().map(|el| el.name()).ok_or(PithError::EmptyDocument)?;

    let mut tree = DocTree::new(root_tag);
    let root = tree.root();
    tree.set_bounds(root, Bounds::new(0.0, layout.page_width));
    convert_children(&mut tree, root, root_ref);
    Ok(tree)
}

fn convert_children(tree: &mut DocTree, parent: NodeId, node: NodeRef<'_, Node>) {
    for child in node.children() {
        match child.value() {
            Node::Element(element) => {
                let id = tree.append_element(parent, element.name());
                tree.set_visible(id, element_visible(element));
                // block model: children span their parent (inherited by the arena)
                convert_children(tree, id, child);
            }
            Node::Text(text) => {
                tree.append_text(parent, text);
            }
            _ => {}
        }
    }
}

/// Static stand-in for the host's rendered-area query.
fn element_visible(element: &scraper::node::Element) -> bool {
    let name = element.name();
    if NON_RENDERED_TAGS.contains(&name) {
        return false;
    }
    if element.attr("hidden").is_some() {
        return false;
    }
    if name == "input" && element.attr("type").is_some_and(|t| t.eq_ignore_ascii_case("hidden")) {
        return false;
    }
    if let Some(style) = element.attr("style")
        && HIDDEN_STYLE.is_match(style)
    {
        return false;
    }
    true
}
