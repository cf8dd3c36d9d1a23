//! In-memory page document.
//!
//! A small arena-backed tree standing in for the browser DOM. It offers only
//! what list rendering needs: lookup by id, element and text creation,
//! visibility flags, one activation handler per element and scroll requests.
//!
//! Text is always stored as literal text nodes. Nothing here parses a string
//! into elements, so data containing markup cannot alter the page structure.
//!
//! The arena lives for one page load. Detached subtrees keep their slots so
//! stale [`NodeId`]s stay valid; re-rendering a list allocates fresh nodes.

use std::any::Any;
use std::collections::HashMap;

/// Handle to a node owned by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
enum NodeKind {
    Element {
        tag: String,
        id: Option<String>,
        class: Option<String>,
        hidden: bool,
    },
    Text(String),
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Behaviour attached to an element and run on activation (a click).
///
/// The handler may freely mutate the document, including replacing itself.
pub trait ActivationHandler: Any {
    fn on_activate(&mut self, doc: &mut Document, target: NodeId);

    fn as_any(&self) -> &dyn Any;
}

/// Arena-backed element tree.
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    handlers: HashMap<NodeId, Box<dyn ActivationHandler>>,
    /// Node whose handler is running, and whether it was rebound meanwhile
    activating: Option<(NodeId, bool)>,
    last_scroll: Option<NodeId>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document with a `<body>` root.
    pub fn new() -> Self {
        let root = Node {
            kind: NodeKind::Element {
                tag: "body".to_string(),
                id: None,
                class: None,
                hidden: false,
            },
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            handlers: HashMap::new(),
            activating: None,
            last_scroll: None,
        }
    }

    /// Page skeleton with one `<div id=...>` per anchor, in order.
    pub fn with_anchors<S: AsRef<str>>(ids: &[S]) -> Self {
        let mut doc = Self::new();
        let root = doc.root;
        for id in ids {
            let el = doc.create_element("div");
            doc.set_id(el, id.as_ref());
            doc.append_child(root, el);
        }
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_string(),
            id: None,
            class: None,
            hidden: false,
        })
    }

    /// Create a detached text node holding `text` verbatim.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    pub fn set_id(&mut self, node: NodeId, value: &str) {
        if let NodeKind::Element { id, .. } = &mut self.nodes[node.0].kind {
            *id = Some(value.to_string());
        }
    }

    pub fn set_class(&mut self, node: NodeId, value: &str) {
        if let NodeKind::Element { class, .. } = &mut self.nodes[node.0].kind {
            *class = Some(value.to_string());
        }
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn class(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { class, .. } => class.as_deref(),
            NodeKind::Text(_) => None,
        }
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0].kind, NodeKind::Text(_))
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|&c| c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Detach every child of `node`. Handlers on detached elements are dropped.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
            self.drop_handlers_below(child);
        }
    }

    fn drop_handlers_below(&mut self, node: NodeId) {
        self.handlers.remove(&node);
        self.note_rebound(node);
        let children = self.nodes[node.0].children.clone();
        for child in children {
            self.drop_handlers_below(child);
        }
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Find an element attached to the tree by its `id` attribute.
    pub fn get_element_by_id(&self, wanted: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if let NodeKind::Element { id: Some(id), .. } = &self.nodes[node.0].kind {
                if id == wanted {
                    return Some(node);
                }
            }
            stack.extend(self.nodes[node.0].children.iter().rev());
        }
        None
    }

    /// Attached descendants of `node` carrying `class`, in document order.
    pub fn elements_by_class(&self, node: NodeId, wanted: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[node.0].children.iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            if self.class(n) == Some(wanted) {
                found.push(n);
            }
            stack.extend(self.nodes[n.0].children.iter().rev());
        }
        found
    }

    pub fn set_hidden(&mut self, node: NodeId, value: bool) {
        if let NodeKind::Element { hidden, .. } = &mut self.nodes[node.0].kind {
            *hidden = value;
        }
    }

    /// Whether this node's own `hidden` flag is set.
    pub fn is_hidden(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0].kind, NodeKind::Element { hidden: true, .. })
    }

    /// Neither the node nor any ancestor is hidden.
    pub fn is_displayed(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if self.is_hidden(n) {
                return false;
            }
            current = self.nodes[n.0].parent;
        }
        true
    }

    /// Replace all children of `node` with a single text node.
    ///
    /// A lone existing text child is rewritten in place.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let &[only] = self.nodes[node.0].children.as_slice() {
            if let NodeKind::Text(existing) = &mut self.nodes[only.0].kind {
                existing.clear();
                existing.push_str(text);
                return;
            }
        }
        self.clear_children(node);
        let t = self.create_text(text);
        self.append_child(node, t);
    }

    /// Concatenated text of all descendant text nodes, in document order.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Text(t) => out.push_str(t),
            NodeKind::Element { .. } => {
                for &child in &self.nodes[node.0].children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Install the activation handler for `node`, replacing any previous one.
    pub fn set_activation_handler(&mut self, node: NodeId, handler: Box<dyn ActivationHandler>) {
        self.handlers.insert(node, handler);
        self.note_rebound(node);
    }

    pub fn clear_activation_handler(&mut self, node: NodeId) {
        self.handlers.remove(&node);
        self.note_rebound(node);
    }

    fn note_rebound(&mut self, node: NodeId) {
        if let Some((running, rebound)) = &mut self.activating {
            if *running == node {
                *rebound = true;
            }
        }
    }

    pub fn has_activation_handler(&self, node: NodeId) -> bool {
        self.handlers.contains_key(&node)
    }

    /// Typed view of the handler attached to `node`.
    pub fn handler_state<T: 'static>(&self, node: NodeId) -> Option<&T> {
        self.handlers
            .get(&node)
            .and_then(|h| h.as_any().downcast_ref::<T>())
    }

    /// Run the activation handler of `node`. Returns false when none is bound.
    pub fn activate(&mut self, node: NodeId) -> bool {
        let Some(mut handler) = self.handlers.remove(&node) else {
            return false;
        };
        let outer = self.activating.replace((node, false));
        handler.on_activate(self, node);
        let rebound = matches!(self.activating, Some((_, true)));
        self.activating = outer;
        // A handler that replaced or cleared itself stays replaced or cleared.
        if !rebound {
            self.handlers.insert(node, handler);
        }
        true
    }

    pub fn scroll_into_view(&mut self, node: NodeId) {
        self.last_scroll = Some(node);
    }

    /// Most recent scroll-into-view request, if any.
    pub fn last_scrolled(&self) -> Option<NodeId> {
        self.last_scroll
    }
}
