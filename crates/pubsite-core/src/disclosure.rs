//! Show-more/show-less disclosure lists.
//!
//! [`render`] fills a container with one node per item and binds a toggle
//! control that flips between the collapsed view (first `initial_show` items)
//! and the expanded view (everything). The list state lives inside the
//! toggle's activation handler, so rendering again replaces the previous
//! state wholesale instead of stacking a second handler on the control.

use std::any::Any;

use serde::Serialize;

use crate::dom::{ActivationHandler, Document, NodeId};
use crate::publication::Publication;

/// Fields shown for each list entry.
pub trait DisclosureItem {
    /// 0 means unknown and renders as an empty label
    fn year(&self) -> i64;
    fn title(&self) -> &str;
    fn authors(&self) -> &str;
    fn venue(&self) -> &str;
}

impl DisclosureItem for Publication {
    fn year(&self) -> i64 {
        self.year
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn authors(&self) -> &str {
        &self.authors
    }

    fn venue(&self) -> &str {
        &self.venue
    }
}

/// Where and how one disclosure list is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisclosureConfig {
    pub container_id: String,
    pub toggle_id: String,
    /// Items visible while collapsed
    pub initial_show: usize,
    /// Toggle label while expanded
    pub expanded_label: String,
    /// Toggle label while collapsed
    pub collapsed_label: String,
}

pub const DEFAULT_INITIAL_SHOW: usize = 5;
pub const SHOW_MORE_LABEL: &str = "Show More";
pub const SHOW_LESS_LABEL: &str = "Show Less";

impl DisclosureConfig {
    pub fn new(container_id: impl Into<String>, toggle_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            toggle_id: toggle_id.into(),
            initial_show: DEFAULT_INITIAL_SHOW,
            expanded_label: SHOW_LESS_LABEL.to_string(),
            collapsed_label: SHOW_MORE_LABEL.to_string(),
        }
    }

    pub fn journal() -> Self {
        Self::new("journal-list", "journal-toggle")
    }

    pub fn proceedings() -> Self {
        Self::new("proceedings-list", "proceedings-toggle")
    }

    pub fn with_initial_show(mut self, initial_show: usize) -> Self {
        self.initial_show = initial_show;
        self
    }
}

/// What a single [`render`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RenderOutcome {
    /// Container anchor missing; nothing rendered
    NoContainer,
    /// More items than `initial_show` but no toggle control; everything shown
    NoToggle { total: usize },
    /// At most `initial_show` items; everything shown, toggle hidden
    AllShown { total: usize },
    /// Collapsed view with `visible` of `total` items and an active toggle
    Collapsible { total: usize, visible: usize },
}

impl RenderOutcome {
    pub fn total(&self) -> usize {
        match *self {
            Self::NoContainer => 0,
            Self::NoToggle { total } | Self::AllShown { total } => total,
            Self::Collapsible { total, .. } => total,
        }
    }
}

/// State of one rendered list, owned by its toggle's activation handler.
#[derive(Debug)]
pub struct DisclosureState {
    items: Vec<NodeId>,
    initial_show: usize,
    expanded: bool,
    expanded_label: String,
    collapsed_label: String,
}

impl DisclosureState {
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    /// Number of items visible in the current view.
    pub fn visible_count(&self) -> usize {
        if self.expanded {
            self.items.len()
        } else {
            self.initial_show.min(self.items.len())
        }
    }

    fn label(&self) -> &str {
        if self.expanded {
            &self.expanded_label
        } else {
            &self.collapsed_label
        }
    }

    fn apply(&self, doc: &mut Document) {
        let visible = self.visible_count();
        for (i, &item) in self.items.iter().enumerate() {
            doc.set_hidden(item, i >= visible);
        }
    }
}

impl ActivationHandler for DisclosureState {
    fn on_activate(&mut self, doc: &mut Document, target: NodeId) {
        self.expanded = !self.expanded;
        self.apply(doc);
        doc.set_text(target, self.label());
        if self.expanded {
            if let Some(&first_revealed) = self.items.get(self.initial_show) {
                doc.scroll_into_view(first_revealed);
            }
        }
        log::debug!(
            "disclosure toggled: expanded={}, visible={}/{}",
            self.expanded,
            self.visible_count(),
            self.items.len()
        );
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Render `items` into the configured container and bind its toggle.
///
/// Missing anchors degrade instead of failing: without a container nothing
/// happens, without a toggle every item stays visible.
pub fn render<T: DisclosureItem>(
    doc: &mut Document,
    config: &DisclosureConfig,
    items: &[T],
) -> RenderOutcome {
    let Some(container) = doc.get_element_by_id(&config.container_id) else {
        log::warn!("container #{} not found, skipping list", config.container_id);
        return RenderOutcome::NoContainer;
    };
    let toggle = doc.get_element_by_id(&config.toggle_id);

    doc.clear_children(container);
    let nodes: Vec<NodeId> = items
        .iter()
        .map(|item| {
            let node = render_item(doc, item);
            doc.append_child(container, node);
            node
        })
        .collect();
    let total = nodes.len();

    if total <= config.initial_show {
        if let Some(toggle) = toggle {
            doc.clear_activation_handler(toggle);
            doc.set_hidden(toggle, true);
        }
        return RenderOutcome::AllShown { total };
    }

    let Some(toggle) = toggle else {
        log::warn!(
            "toggle #{} not found, showing all {total} items in #{}",
            config.toggle_id,
            config.container_id
        );
        return RenderOutcome::NoToggle { total };
    };

    let state = DisclosureState {
        items: nodes,
        initial_show: config.initial_show,
        expanded: false,
        expanded_label: config.expanded_label.clone(),
        collapsed_label: config.collapsed_label.clone(),
    };
    state.apply(doc);
    doc.set_text(toggle, state.label());
    doc.set_hidden(toggle, false);
    doc.set_activation_handler(toggle, Box::new(state));

    RenderOutcome::Collapsible {
        total,
        visible: config.initial_show,
    }
}

fn render_item<T: DisclosureItem>(doc: &mut Document, item: &T) -> NodeId {
    let li = doc.create_element("li");
    doc.set_class(li, "pub-item");

    let year = if item.year() == 0 {
        String::new()
    } else {
        item.year().to_string()
    };
    let fields = [
        ("pub-year", year.as_str()),
        ("pub-title", item.title()),
        ("pub-authors", item.authors()),
        ("pub-venue", item.venue()),
    ];
    for (class, text) in fields {
        let span = doc.create_element("span");
        doc.set_class(span, class);
        doc.set_text(span, text);
        doc.append_child(li, span);
    }
    li
}
