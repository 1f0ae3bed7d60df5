//! The document tree the extraction algorithm operates on.
//!
//! [`DocTree`] is an arena: nodes live in a flat `Vec` and refer to each
//! other through [`NodeId`] indices. The host environment builds the tree
//! (directly, or through the HTML adapter in [`crate::html`]), supplies
//! per-element visibility and geometry, and hands the tree to
//! [`crate::extract::extract_content`], which prunes it in place.
//!
//! # Example
//!
//! ```rust
//! use pith_core::tree::DocTree;
//!
//! let mut tree = DocTree::new("html");
//! let body = tree.append_element(tree.root(), "body");
//! let p = tree.append_element(body, "p");
//! tree.append_text(p, "Hello");
//! assert_eq!(tree.text_content(), "Hello");
//! ```

/// Identifier of a node inside a [`DocTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Gets the arena index backing this id.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Horizontal extent of an element in the host's rendering coordinate space.
///
/// Only the horizontal axis matters to the algorithm: the visual weighting
/// engine models importance as a normal distribution over the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
}

impl Bounds {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Gets the horizontal width of this extent.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

/// The two node kinds of the document tree.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// An element with a lowercase tag name.
    Element(String),
    /// A run of text. Text nodes never have children.
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Whether the host rendered this element with non-zero area.
    /// Meaningless for text nodes, which are counted through their parent.
    visible: bool,
    bounds: Bounds,
}

/// Element kinds whose entire subtree is treated as link content.
const LINK_TAGS: &[&str] = &["a", "button", "select"];

/// An arena-backed document tree.
///
/// Detached subtrees stay allocated in the arena but become unreachable
/// from the root; traversal and serialization only ever follow `children`
/// links, so a pruned tree behaves as if the removed nodes were gone.
#[derive(Debug, Clone)]
pub struct DocTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl DocTree {
    /// Creates a tree holding a single visible root element.
    pub fn new(root_tag: &str) -> Self {
        let root = Node {
            kind: NodeKind::Element(root_tag.to_string()),
            parent: None,
            children: Vec::new(),
            visible: true,
            bounds: Bounds::default(),
        };
        Self { nodes: vec![root], root: NodeId(0) }
    }

    /// Gets the root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of arena slots, including detached nodes.
    ///
    /// Use [`DocTree::node_count`] for the reachable size.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a new visible element under `parent` and returns its id.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.push_node(parent, NodeKind::Element(tag.to_lowercase()))
    }

    /// Appends a text node under `parent` and returns its id.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push_node(parent, NodeKind::Text(text.to_string()))
    }

    fn push_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let bounds = self.nodes[parent.0].bounds;
        self.nodes.push(Node { kind, parent: Some(parent), children: Vec::new(), visible: true, bounds });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Sets the host-supplied visibility of an element.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.nodes[id.0].visible = visible;
    }

    /// Sets the host-supplied horizontal extent of an element.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Bounds) {
        self.nodes[id.0].bounds = bounds;
    }

    pub fn bounds(&self, id: NodeId) -> Bounds {
        self.nodes[id.0].bounds
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Children of a node in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Gets the tag name of an element node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(tag) => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Gets the text of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(_) => None,
            NodeKind::Text(text) => Some(text),
        }
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Text(_))
    }

    /// Character count of a text node, 0 for elements.
    pub fn text_len(&self, id: NodeId) -> usize {
        self.text(id).map_or(0, |t| t.chars().count())
    }

    /// True iff the node is an element the host rendered with non-zero area.
    ///
    /// Text nodes are never "visible" in this sense; their characters are
    /// counted through the enclosing element instead.
    pub fn is_visible(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Element(_)) && self.nodes[id.0].visible
    }

    /// True for interactive hyperlink-like element kinds (anchor, button,
    /// select). The counting pass treats such subtrees as 100% link content.
    pub fn is_link_like(&self, id: NodeId) -> bool {
        self.tag(id).is_some_and(|t| LINK_TAGS.contains(&t))
    }

    /// Visible element children of a node, in document order.
    pub fn visible_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0].children.iter().copied().filter(|&c| self.is_visible(c))
    }

    /// True iff the node has no visible element children.
    ///
    /// This is the leaf test used by the weighting and propagation passes:
    /// a paragraph holding only text counts as a leaf.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.visible_children(id).next().is_none()
    }

    /// Detaches a node and its whole subtree from its parent.
    ///
    /// The subtree stays allocated but becomes unreachable from the root.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    /// Number of nodes reachable from the root.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            count += 1;
            stack.extend_from_slice(self.children(id));
        }
        count
    }

    /// Concatenated text of all reachable text nodes, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(self.root, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.text(id) {
            out.push_str(text);
        }
        for &child in self.children(id) {
            self.collect_text(child, out);
        }
    }

    /// Serializes the reachable tree back to HTML.
    ///
    /// Attributes are not modeled by the tree, so the output is the bare
    /// structural content: tags and escaped text.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element(tag) => {
                out.push('<');
                out.push_str(tag);
                out.push('>');
                if !is_void_tag(tag) {
                    for &child in self.children(id) {
                        self.write_node(child, out);
                    }
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
            }
        }
    }
}

/// Elements serialized without a closing tag.
fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "meta" | "source" | "track" | "wbr"
    )
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
